//! Exam-date display formatting.
//!
//! The printed schedule shows dates as `DD-Mon-YYYY` (`12-Aug-2025`). Month
//! abbreviations come from a pinned table rather than a locale API, so the
//! document renders identically on every host.

use chrono::{Datelike, NaiveDate};

/// English 3-letter month abbreviations, pinned. Part of the document's
/// guaranteed output format.
const MONTH_ABBREV: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Formats an ISO `YYYY-MM-DD` date for the schedule table.
///
/// Empty input yields empty output. Non-empty input that does not parse as a
/// calendar date is returned unchanged — the validator only guarantees the
/// field is populated, and passing the raw text through keeps formatting
/// total and deterministic.
pub fn format_exam_date(iso: &str) -> String {
    let trimmed = iso.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    match NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        Ok(date) => format!(
            "{:02}-{}-{}",
            date.day(),
            MONTH_ABBREV[date.month0() as usize],
            date.year()
        ),
        Err(_) => trimmed.to_string(),
    }
}
