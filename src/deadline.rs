use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use tracing::trace;

use crate::error::{Result, ShowcaseError};
use crate::model::{Boundary, Instant};

pub(crate) const CALENDAR_DATE_FORMAT: &str = "%Y-%m-%d";

/// Timestamps carrying a numeric offset that RFC 3339 rejects, such as
/// `+0600` without a colon.
const OFFSET_DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
];

/// Local wall-clock date/time layouts accepted besides RFC 3339 / RFC 2822.
const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%B %d, %Y %H:%M:%S",
    "%B %d, %Y %H:%M",
    "%B %d, %Y %I:%M:%S %p",
    "%B %d, %Y %I:%M %p",
    "%B %d %Y %H:%M",
    "%d %B %Y %H:%M:%S",
    "%d %B %Y %H:%M",
];

/// Date-only layouts other than the strict calendar form (including an
/// unpadded `2026-2-1`). These resolve to local midnight regardless of the
/// boundary mode.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%B %d, %Y",
    "%B %d %Y",
    "%d %B %Y",
];

/// Parse a date-like string into an [`Instant`].
///
/// A strict `YYYY-MM-DD` date lands on the start or end of that local day
/// depending on `mode`. Anything else goes through the free-form parser and
/// is returned as written. Blank or unparseable input yields `None`.
pub fn parse(input: &str, mode: Boundary) -> Option<Instant> {
    resolve(input, mode).ok()
}

/// `true` once the current time is strictly after the resolved instant.
/// Missing or invalid dates are never past.
pub fn is_past(input: &str, mode: Boundary) -> bool {
    is_past_at(input, mode, Local::now())
}

pub fn is_past_at(input: &str, mode: Boundary, now: DateTime<Local>) -> bool {
    match resolve(input, mode) {
        Ok(instant) => now > instant.as_datetime(),
        Err(err) => {
            trace!(input, %err, "treating unresolvable date as not past");
            false
        }
    }
}

/// Normalize a date-like string to `YYYY-MM-DD` for display.
///
/// Strict calendar dates pass through, other parseable values are cut to
/// their UTC date, and anything else comes back trimmed but otherwise as is.
pub fn date_only(input: &str) -> String {
    let s = input.trim();
    if s.is_empty() || is_calendar_date(s) {
        return s.to_string();
    }

    match parse_free_form(s) {
        Some(instant) => instant
            .as_datetime()
            .with_timezone(&Utc)
            .format(CALENDAR_DATE_FORMAT)
            .to_string(),
        None => s.to_string(),
    }
}

pub(crate) fn resolve(input: &str, mode: Boundary) -> Result<Instant> {
    let s = input.trim();
    if s.is_empty() {
        return Err(ShowcaseError::EmptyDate);
    }

    let invalid = || ShowcaseError::InvalidDate {
        input: s.to_string(),
    };

    if is_calendar_date(s) {
        let date = NaiveDate::parse_from_str(s, CALENDAR_DATE_FORMAT).map_err(|_| invalid())?;
        let time = match mode {
            Boundary::Start => NaiveTime::MIN,
            Boundary::End => NaiveTime::from_hms_opt(23, 59, 59).ok_or_else(invalid)?,
        };
        return local_instant(date.and_time(time)).ok_or_else(invalid);
    }

    parse_free_form(s).ok_or_else(invalid)
}

/// Resolve a date the way event listings are ordered: a strict calendar date
/// is UTC midnight, anything else goes through the free-form parser.
pub(crate) fn parse_listing_time(input: &str) -> Option<Instant> {
    let s = input.trim();
    if is_calendar_date(s) {
        return NaiveDate::parse_from_str(s, CALENDAR_DATE_FORMAT)
            .ok()
            .map(|d| Utc.from_utc_datetime(&d.and_time(NaiveTime::MIN)))
            .map(|dt| dt.with_timezone(&Local).into());
    }
    if s.is_empty() {
        return None;
    }
    parse_free_form(s)
}

/// Exactly four digits, dash, two digits, dash, two digits.
fn is_calendar_date(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

fn parse_free_form(s: &str) -> Option<Instant> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Local).into());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.with_timezone(&Local).into());
    }
    if let Some(dt) = OFFSET_DATE_TIME_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(s, fmt).ok())
    {
        return Some(dt.with_timezone(&Local).into());
    }

    DATE_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
                .map(|d| d.and_time(NaiveTime::MIN))
        })
        .and_then(local_instant)
}

/// Resolve a wall-clock time in the process timezone. Times skipped by a DST
/// jump have no local instant and are rejected.
fn local_instant(naive: NaiveDateTime) -> Option<Instant> {
    Local.from_local_datetime(&naive).earliest().map(Instant::from)
}
