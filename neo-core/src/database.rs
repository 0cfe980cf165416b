//! In-memory database linking near-Earth objects to their close approaches.
//!
//! [`NeoDatabase`] owns both record collections arena-style. Each NEO keeps
//! the handles of its approaches and each approach keeps the handle of its
//! NEO, so the bidirectional link never forms an ownership cycle. Callers
//! navigate the link through the borrowed views [`NeoRef`] and
//! [`ApproachRef`].

use std::{collections::HashMap, fmt, iter::FusedIterator, ops::Deref, ptr};

use log::debug;

use crate::{
    filters::{ApproachFilter, Criterion},
    model::{ApproachId, CloseApproach, NearEarthObject, NeoId, write_approach},
    record::{ApproachRecord, NeoRecord},
};

/// Linked, read-only collection of NEOs and close approaches.
///
/// Construction indexes every NEO by designation and by name, then links each
/// approach to the NEO carrying its designation. Duplicate keys resolve to the
/// record loaded last. Nothing is mutated after [`NeoDatabase::new`] returns,
/// so shared references may be queried from several threads.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use neo_core::{CloseApproach, NearEarthObject, NeoDatabase};
///
/// # fn main() -> Result<(), neo_core::RecordError> {
/// let time = NaiveDate::from_ymd_opt(1975, 1, 23)
///     .and_then(|date| date.and_hms_opt(7, 39, 0))
///     .expect("valid timestamp");
/// let db = NeoDatabase::new(
///     vec![NearEarthObject::new("433", Some("Eros".into()), 16.84, false)?],
///     vec![CloseApproach::new("433", time, 0.15, 5.4)],
/// );
///
/// let eros = db.get_neo_by_name("Eros").expect("Eros is indexed");
/// assert_eq!(eros.approaches().count(), 1);
/// assert_eq!(db.query_all().count(), 1);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct NeoDatabase {
    neos: Vec<NearEarthObject>,
    approaches: Vec<CloseApproach>,
    by_designation: HashMap<String, NeoId>,
    by_name: HashMap<String, NeoId>,
}

impl NeoDatabase {
    /// Index the NEOs and link every close approach to its NEO.
    ///
    /// Approaches whose designation matches no NEO are kept, unlinked, in
    /// their original position. Runs in `O(N + M)`.
    #[must_use]
    pub fn new(mut neos: Vec<NearEarthObject>, mut approaches: Vec<CloseApproach>) -> Self {
        let mut by_designation = HashMap::with_capacity(neos.len());
        let mut by_name = HashMap::new();
        for (slot, neo) in neos.iter_mut().enumerate() {
            let id = NeoId(slot);
            // Records may be clones taken from another database.
            neo.approaches.clear();
            by_designation.insert(neo.designation().to_owned(), id);
            if let Some(name) = neo.name() {
                by_name.insert(name.to_owned(), id);
            }
        }

        let mut unlinked = 0_usize;
        for (slot, approach) in approaches.iter_mut().enumerate() {
            approach.neo = None;
            let target = by_designation
                .get(approach.designation())
                .copied()
                .and_then(|id| neos.get_mut(id.0).map(|neo| (id, neo)));
            match target {
                Some((id, neo)) => {
                    neo.approaches.push(ApproachId(slot));
                    approach.neo = Some(id);
                }
                None => unlinked += 1,
            }
        }

        debug!(
            "Indexed {} NEOs ({} named) and {} close approaches",
            by_designation.len(),
            by_name.len(),
            approaches.len()
        );
        if unlinked > 0 {
            debug!("{unlinked} close approaches reference no known NEO");
        }

        Self {
            neos,
            approaches,
            by_designation,
            by_name,
        }
    }

    /// Look up a NEO by its exact primary designation.
    #[must_use]
    pub fn get_neo_by_designation(&self, designation: &str) -> Option<NeoRef<'_>> {
        self.by_designation
            .get(designation)
            .and_then(|id| self.neo(*id))
    }

    /// Look up a NEO by its exact name.
    ///
    /// When several NEOs share a name only the last one loaded is reachable.
    #[must_use]
    pub fn get_neo_by_name(&self, name: &str) -> Option<NeoRef<'_>> {
        self.by_name.get(name).and_then(|id| self.neo(*id))
    }

    /// Resolve a NEO handle issued by this database.
    #[must_use]
    pub fn neo(&self, id: NeoId) -> Option<NeoRef<'_>> {
        self.neos
            .get(id.0)
            .map(|record| NeoRef { db: self, id, record })
    }

    /// Resolve a close-approach handle issued by this database.
    #[must_use]
    pub fn approach(&self, id: ApproachId) -> Option<ApproachRef<'_>> {
        self.approaches
            .get(id.0)
            .map(|record| ApproachRef { db: self, id, record })
    }

    /// Stream the close approaches accepted by every filter.
    ///
    /// Each call starts a fresh lazy pass over the approaches in load order.
    /// An empty slice yields every approach.
    pub fn query<'db, 'f, F>(&'db self, filters: &'f [F]) -> Query<'db, 'f, F>
    where
        F: ApproachFilter,
    {
        Query {
            db: self,
            filters,
            remaining: self.approaches.iter().enumerate(),
        }
    }

    /// Stream every close approach in load order.
    #[must_use]
    pub fn query_all(&self) -> Query<'_, 'static, Criterion> {
        self.query(&[])
    }

    /// All NEOs in load order, including ones shadowed by a duplicate key.
    pub fn neos(
        &self,
    ) -> impl DoubleEndedIterator<Item = NeoRef<'_>> + ExactSizeIterator + '_ {
        self.neos
            .iter()
            .enumerate()
            .map(|(slot, record)| NeoRef {
                db: self,
                id: NeoId(slot),
                record,
            })
    }

    /// All close approaches in load order.
    pub fn approaches(
        &self,
    ) -> impl DoubleEndedIterator<Item = ApproachRef<'_>> + ExactSizeIterator + '_ {
        self.approaches
            .iter()
            .enumerate()
            .map(|(slot, record)| ApproachRef {
                db: self,
                id: ApproachId(slot),
                record,
            })
    }

    /// Number of stored NEOs.
    #[must_use]
    pub const fn neo_count(&self) -> usize {
        self.neos.len()
    }

    /// Number of stored close approaches.
    #[must_use]
    pub const fn approach_count(&self) -> usize {
        self.approaches.len()
    }
}

/// Lazy stream of approaches matching a filter set.
///
/// Returned by [`NeoDatabase::query`].
pub struct Query<'db, 'f, F> {
    db: &'db NeoDatabase,
    filters: &'f [F],
    remaining: std::iter::Enumerate<std::slice::Iter<'db, CloseApproach>>,
}

impl<'db, F> Iterator for Query<'db, '_, F>
where
    F: ApproachFilter,
{
    type Item = ApproachRef<'db>;

    fn next(&mut self) -> Option<Self::Item> {
        let db = self.db;
        let filters = self.filters;
        self.remaining.find_map(|(slot, record)| {
            let approach = ApproachRef {
                db,
                id: ApproachId(slot),
                record,
            };
            filters
                .iter()
                .all(|filter| filter.matches(approach))
                .then_some(approach)
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.remaining.size_hint().1)
    }
}

impl<F> FusedIterator for Query<'_, '_, F> where F: ApproachFilter {}

impl<F> fmt::Debug for Query<'_, '_, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Query")
            .field("filters", &self.filters.len())
            .field("remaining", &self.remaining.len())
            .finish()
    }
}

/// Borrowed view of a NEO stored in a [`NeoDatabase`].
///
/// Dereferences to [`NearEarthObject`]. Two views are equal only when they
/// refer to the same slot of the same database.
#[derive(Clone, Copy)]
pub struct NeoRef<'db> {
    db: &'db NeoDatabase,
    id: NeoId,
    record: &'db NearEarthObject,
}

impl<'db> NeoRef<'db> {
    /// Arena handle of this NEO.
    #[must_use]
    pub const fn id(self) -> NeoId {
        self.id
    }

    /// The underlying record, borrowed for the database lifetime.
    #[must_use]
    pub const fn record(self) -> &'db NearEarthObject {
        self.record
    }

    /// Linked close approaches in load order.
    pub fn approaches(self) -> impl Iterator<Item = ApproachRef<'db>> + 'db {
        let db = self.db;
        self.record
            .approaches
            .iter()
            .filter_map(move |id| db.approach(*id))
    }

    /// Output-ready mapping of this NEO.
    #[must_use]
    pub fn serialize(self) -> NeoRecord {
        NeoRecord::from(self.record)
    }
}

impl Deref for NeoRef<'_> {
    type Target = NearEarthObject;

    fn deref(&self) -> &Self::Target {
        self.record
    }
}

impl PartialEq for NeoRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.db, other.db) && self.id == other.id
    }
}

impl Eq for NeoRef<'_> {}

impl fmt::Debug for NeoRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NeoRef")
            .field("id", &self.id)
            .field("record", self.record)
            .finish()
    }
}

impl fmt::Display for NeoRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.record, f)
    }
}

/// Borrowed view of a close approach stored in a [`NeoDatabase`].
///
/// Dereferences to [`CloseApproach`] and resolves the linked NEO on demand.
#[derive(Clone, Copy)]
pub struct ApproachRef<'db> {
    db: &'db NeoDatabase,
    id: ApproachId,
    record: &'db CloseApproach,
}

impl<'db> ApproachRef<'db> {
    /// Arena handle of this approach.
    #[must_use]
    pub const fn id(self) -> ApproachId {
        self.id
    }

    /// The underlying record, borrowed for the database lifetime.
    #[must_use]
    pub const fn record(self) -> &'db CloseApproach {
        self.record
    }

    /// The NEO this approach belongs to, or `None` when unmatched.
    #[must_use]
    pub fn neo(self) -> Option<NeoRef<'db>> {
        self.record.neo.and_then(|id| self.db.neo(id))
    }

    /// Output-ready mapping of this approach and its NEO.
    #[must_use]
    pub fn serialize(self) -> ApproachRecord {
        ApproachRecord {
            datetime_utc: self.record.time_str(),
            distance_au: self.record.distance(),
            velocity_km_s: self.record.velocity(),
            neo: self.neo().map(NeoRef::serialize),
        }
    }
}

impl Deref for ApproachRef<'_> {
    type Target = CloseApproach;

    fn deref(&self) -> &Self::Target {
        self.record
    }
}

impl PartialEq for ApproachRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.db, other.db) && self.id == other.id
    }
}

impl Eq for ApproachRef<'_> {}

impl fmt::Debug for ApproachRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApproachRef")
            .field("id", &self.id)
            .field("record", self.record)
            .finish()
    }
}

impl fmt::Display for ApproachRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.neo() {
            Some(neo) => write_approach(f, self.record, &neo.fullname()),
            None => fmt::Display::fmt(self.record, f),
        }
    }
}
