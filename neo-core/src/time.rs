//! Timestamp formatting shared by record rendering and serialisation.

use chrono::NaiveDateTime;

/// Layout used when rendering close-approach timestamps (`2020-01-01 12:30`).
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Render a UTC timestamp with minute precision.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use neo_core::datetime_to_str;
///
/// let time = NaiveDate::from_ymd_opt(1900, 1, 1)
///     .and_then(|date| date.and_hms_opt(0, 11, 0))
///     .expect("valid timestamp");
/// assert_eq!(datetime_to_str(&time), "1900-01-01 00:11");
/// ```
#[must_use]
pub fn datetime_to_str(time: &NaiveDateTime) -> String {
    time.format(DATETIME_FORMAT).to_string()
}
