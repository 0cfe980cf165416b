//! Predicates over close approaches and helpers for composing them.
//!
//! A filter answers one question about a single [`ApproachRef`]. The query
//! engine ANDs every supplied filter; there is no OR or NOT combinator, and an
//! absent criterion simply contributes no filter.

use std::fmt;

use chrono::NaiveDate;

use crate::database::ApproachRef;

/// Capability shared by every close-approach predicate.
pub trait ApproachFilter {
    /// Return `true` when the approach satisfies this criterion.
    fn matches(&self, approach: ApproachRef<'_>) -> bool;
}

impl<T: ApproachFilter + ?Sized> ApproachFilter for &T {
    fn matches(&self, approach: ApproachRef<'_>) -> bool {
        (**self).matches(approach)
    }
}

impl<T: ApproachFilter + ?Sized> ApproachFilter for Box<T> {
    fn matches(&self, approach: ApproachRef<'_>) -> bool {
        (**self).matches(approach)
    }
}

/// Filter backed by a closure. Created by [`from_fn`].
#[derive(Clone, Copy)]
pub struct FromFn<F>(F);

impl<F> ApproachFilter for FromFn<F>
where
    F: Fn(ApproachRef<'_>) -> bool,
{
    fn matches(&self, approach: ApproachRef<'_>) -> bool {
        (self.0)(approach)
    }
}

impl<F> fmt::Debug for FromFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FromFn")
    }
}

/// Wrap a closure as an [`ApproachFilter`].
///
/// # Examples
/// ```
/// use neo_core::{ApproachFilter, ApproachRef, from_fn};
///
/// let close = from_fn(|approach: ApproachRef<'_>| approach.distance() < 0.05);
/// let filters: Vec<Box<dyn ApproachFilter>> = vec![Box::new(close)];
/// assert_eq!(filters.len(), 1);
/// ```
pub const fn from_fn<F>(predicate: F) -> FromFn<F>
where
    F: Fn(ApproachRef<'_>) -> bool,
{
    FromFn(predicate)
}

/// How an attribute is compared with its bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Comparison {
    /// Attribute equals the bound.
    Equal,
    /// Attribute is greater than or equal to the bound.
    AtLeast,
    /// Attribute is less than or equal to the bound.
    AtMost,
}

impl Comparison {
    /// Compare `value` against `bound`.
    ///
    /// Uses `PartialOrd`, so any comparison involving `NaN` is `false`.
    #[must_use]
    pub fn compare<T: PartialOrd + ?Sized>(self, value: &T, bound: &T) -> bool {
        match self {
            Self::Equal => value == bound,
            Self::AtLeast => value >= bound,
            Self::AtMost => value <= bound,
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Equal => "=",
            Self::AtLeast => ">=",
            Self::AtMost => "<=",
        })
    }
}

/// A single user criterion with its comparison and bound.
///
/// Criteria on NEO attributes (`Diameter`, `Hazardous`) never match an
/// approach that is not linked to a NEO.
///
/// # Examples
/// ```
/// use neo_core::{ApproachFilter, Comparison, Criterion};
///
/// let criterion = Criterion::Distance(Comparison::AtMost, 0.1);
/// assert_eq!(criterion.to_string(), "distance <= 0.1");
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Criterion {
    /// Calendar date of the approach (time of day ignored).
    Date(Comparison, NaiveDate),
    /// Approach distance in au.
    Distance(Comparison, f64),
    /// Relative velocity in km/s.
    Velocity(Comparison, f64),
    /// Diameter of the linked NEO in km.
    Diameter(Comparison, f64),
    /// Hazard flag of the linked NEO.
    Hazardous(bool),
}

impl ApproachFilter for Criterion {
    fn matches(&self, approach: ApproachRef<'_>) -> bool {
        match *self {
            Self::Date(comparison, date) => comparison.compare(&approach.time().date(), &date),
            Self::Distance(comparison, bound) => comparison.compare(&approach.distance(), &bound),
            Self::Velocity(comparison, bound) => comparison.compare(&approach.velocity(), &bound),
            Self::Diameter(comparison, bound) => approach
                .neo()
                .is_some_and(|neo| comparison.compare(&neo.diameter(), &bound)),
            Self::Hazardous(flag) => approach.neo().is_some_and(|neo| neo.hazardous() == flag),
        }
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Date(comparison, date) => write!(f, "date {comparison} {date}"),
            Self::Distance(comparison, bound) => write!(f, "distance {comparison} {bound}"),
            Self::Velocity(comparison, bound) => write!(f, "velocity {comparison} {bound}"),
            Self::Diameter(comparison, bound) => write!(f, "diameter {comparison} {bound}"),
            Self::Hazardous(flag) => write!(f, "hazardous = {flag}"),
        }
    }
}

/// Optional user criteria collected from the command line or configuration.
///
/// Every `None` field means "no constraint".
///
/// # Examples
/// ```
/// use neo_core::{Comparison, Criterion, QueryCriteria};
///
/// let criteria = QueryCriteria {
///     distance_max: Some(0.05),
///     hazardous: Some(true),
///     ..QueryCriteria::default()
/// };
/// assert_eq!(
///     criteria.into_filters(),
///     vec![
///         Criterion::Distance(Comparison::AtMost, 0.05),
///         Criterion::Hazardous(true),
///     ]
/// );
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct QueryCriteria {
    /// Approaches on exactly this date.
    pub date: Option<NaiveDate>,
    /// Approaches on or after this date.
    pub start_date: Option<NaiveDate>,
    /// Approaches on or before this date.
    pub end_date: Option<NaiveDate>,
    /// Minimum approach distance in au.
    pub distance_min: Option<f64>,
    /// Maximum approach distance in au.
    pub distance_max: Option<f64>,
    /// Minimum relative velocity in km/s.
    pub velocity_min: Option<f64>,
    /// Maximum relative velocity in km/s.
    pub velocity_max: Option<f64>,
    /// Minimum NEO diameter in km.
    pub diameter_min: Option<f64>,
    /// Maximum NEO diameter in km.
    pub diameter_max: Option<f64>,
    /// Required hazard flag.
    pub hazardous: Option<bool>,
}

impl QueryCriteria {
    /// Build one [`Criterion`] per present field.
    #[must_use]
    pub fn into_filters(self) -> Vec<Criterion> {
        use Comparison::{AtLeast, AtMost, Equal};

        [
            self.date.map(|date| Criterion::Date(Equal, date)),
            self.start_date.map(|date| Criterion::Date(AtLeast, date)),
            self.end_date.map(|date| Criterion::Date(AtMost, date)),
            self.distance_min.map(|bound| Criterion::Distance(AtLeast, bound)),
            self.distance_max.map(|bound| Criterion::Distance(AtMost, bound)),
            self.velocity_min.map(|bound| Criterion::Velocity(AtLeast, bound)),
            self.velocity_max.map(|bound| Criterion::Velocity(AtMost, bound)),
            self.diameter_min.map(|bound| Criterion::Diameter(AtLeast, bound)),
            self.diameter_max.map(|bound| Criterion::Diameter(AtMost, bound)),
            self.hazardous.map(Criterion::Hazardous),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

/// Truncate a result stream to at most `n` items.
///
/// `None` and `Some(0)` leave the stream unbounded.
///
/// # Examples
/// ```
/// use neo_core::limit;
///
/// assert_eq!(limit(1..=5, Some(2)).collect::<Vec<_>>(), vec![1, 2]);
/// assert_eq!(limit(1..=3, Some(0)).count(), 3);
/// assert_eq!(limit(1..=3, None).count(), 3);
/// ```
pub fn limit<I>(iter: I, n: Option<usize>) -> std::iter::Take<I::IntoIter>
where
    I: IntoIterator,
{
    let cap = match n {
        Some(0) | None => usize::MAX,
        Some(count) => count,
    };
    iter.into_iter().take(cap)
}
