//! Year parsing and interval normalization.

use crate::error::CoreError;
use crate::model::{Interval, YearValue};

/// Parse a fact-file year into an integer.
///
/// Accepts an integer, or a digit-only string of at most 4 characters.
/// Anything longer or non-numeric is a data-quality problem in the source
/// facts and is rejected.
pub fn parse_year(value: &YearValue) -> Result<i32, CoreError> {
    let text = match value {
        YearValue::Num(n) => n.to_string(),
        YearValue::Text(s) => s.trim().to_string(),
    };

    if text.is_empty() || text.len() > 4 || !text.chars().all(|c| c.is_ascii_digit()) {
        return Err(CoreError::InvalidYear { value: text });
    }

    // 4 ascii digits always fit an i32
    Ok(text.parse::<i32>().expect("digit-only string of length <= 4"))
}

/// Normalize a `(from, until)` pair into an ordered interval.
///
/// A missing `until` defaults to `from`. Reversed bounds are swapped.
/// `is_interval` is true iff two distinct years were supplied, regardless of
/// their order.
pub fn normalize(time_from: &YearValue, time_until: Option<&YearValue>) -> Result<Interval, CoreError> {
    let start = parse_year(time_from)?;
    let end = match time_until {
        Some(value) => parse_year(value)?,
        None => start,
    };

    let is_interval = start != end;
    let (start, end) = if start > end { (end, start) } else { (start, end) };

    Ok(Interval {
        start,
        end,
        is_interval,
    })
}

/// Every year in `[start, end]`, ascending.
///
/// Fully materialized: interval sizes are bounded by the 4-digit year domain,
/// and the result doubles as both an answer set and a distractor iteration
/// driver.
pub fn enumerate_years(start: i32, end: i32) -> Vec<i32> {
    (start..=end).collect()
}

/// Format elapsed seconds as "N min M sec" for summary rows.
pub fn format_elapsed(secs: f64) -> String {
    let minutes = (secs / 60.0) as i64;
    let rest = (secs - minutes as f64 * 60.0).round() as i64;
    format!("{minutes} min {rest} sec")
}
