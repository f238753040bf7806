use std::cmp::Reverse;

use chrono::{DateTime, Local};
use itertools::Itertools;
use tracing::{instrument, trace};

use crate::deadline;
use crate::model::{Boundary, Event, Instant, RegistrationStatus};

/// Number of events featured on the landing page.
pub const FEATURED_EVENTS: usize = 4;

impl Event {
    /// Deadline normalized to `YYYY-MM-DD`, empty when none is set.
    pub fn deadline_date(&self) -> String {
        deadline::date_only(&self.deadline)
    }

    pub fn start_date_only(&self) -> String {
        deadline::date_only(&self.start_date)
    }

    pub fn end_date_only(&self) -> String {
        deadline::date_only(&self.end_date)
    }

    /// Registration state right now.
    pub fn registration_status(&self) -> RegistrationStatus {
        self.registration_status_at(Local::now())
    }

    /// Registration closes once the end of the deadline's calendar day has
    /// passed. An event without a deadline is never closed.
    pub fn registration_status_at(&self, now: DateTime<Local>) -> RegistrationStatus {
        let date = self.deadline_date();
        if date.is_empty() {
            RegistrationStatus::Unscheduled
        } else if deadline::is_past_at(&date, Boundary::End, now) {
            RegistrationStatus::Closed
        } else {
            RegistrationStatus::Open
        }
    }

    /// The time the event is listed under: its deadline, else its start
    /// date, else its single date. Calendar dates count from UTC midnight.
    pub fn reference_instant(&self) -> Option<Instant> {
        [&self.deadline, &self.start_date, &self.date]
            .into_iter()
            .find_map(|v| deadline::parse_listing_time(v))
    }
}

/// Pick the events to feature: those still ahead first, then past ones,
/// then undated ones. Within each group the latest date comes first.
#[instrument(skip(events), fields(events = events.len()))]
pub fn pick_upcoming(events: &[Event], now: DateTime<Local>, limit: usize) -> Vec<Event> {
    events
        .iter()
        .map(|event| {
            let when = event.reference_instant();
            trace!(title = %event.title, when = ?when, "event reference time");
            (event, when)
        })
        .sorted_by_key(|(_, when)| {
            let bucket = match when {
                Some(when) if when.as_datetime() >= now => 0,
                Some(_) => 1,
                None => 2,
            };
            (bucket, Reverse(*when))
        })
        .take(limit)
        .map(|(event, _)| event.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::{TimeDelta, TimeZone, Utc};

    use super::*;

    fn now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 2, 1, 12, 0, 0).unwrap()
    }

    fn event(title: &str, deadline: &str, start_date: &str) -> Event {
        Event {
            title: title.to_string(),
            deadline: deadline.to_string(),
            start_date: start_date.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_registration_status() {
        let e = event("Shutter Stories", "2026-02-01", "");
        assert_eq!(e.registration_status_at(now()), RegistrationStatus::Open);
        assert_eq!(
            e.registration_status_at(now() + TimeDelta::hours(12)),
            RegistrationStatus::Closed
        );
        assert!(!RegistrationStatus::Closed.accepts_submissions());
        assert!(RegistrationStatus::Open.accepts_submissions());
        assert_eq!(RegistrationStatus::Open.to_string(), "Registration Open");
        assert_eq!(RegistrationStatus::Closed.to_string(), "Registration Closed");
    }

    #[test]
    fn test_missing_or_bad_deadline_never_blocks() {
        for date in ["", "  ", "when the jury decides"] {
            let e = event("Cine Sprint", date, "");
            let status = e.registration_status_at(now());
            assert!(status.accepts_submissions(), "{date:?} -> {status}");
        }
        assert_eq!(
            event("Cine Sprint", "", "").registration_status_at(now()),
            RegistrationStatus::Unscheduled
        );
    }

    #[test]
    fn test_free_form_deadline_normalized_to_day() {
        let e = event("Cine Sprint", "2026-02-01T06:00:00Z", "");
        assert_eq!(e.deadline_date(), "2026-02-01");
        assert_eq!(
            e.registration_status_at(Local.with_ymd_and_hms(2026, 2, 1, 23, 0, 0).unwrap()),
            RegistrationStatus::Open
        );
    }

    #[test]
    fn test_date_accessors() {
        let mut e = event("Expo", "2026-03-10", "2026-03-15");
        e.end_date = "2026-03-16".to_string();
        assert_eq!(e.start_date_only(), "2026-03-15");
        assert_eq!(e.end_date_only(), "2026-03-16");
    }

    #[test]
    fn test_pick_upcoming_ordering() {
        let events = vec![
            event("old", "2025-01-01", ""),
            event("undated", "", "tbd"),
            event("soon", "2026-02-10", ""),
            event("later", "", "2026-06-01"),
            event("older", "2024-01-01", ""),
        ];

        let picked = pick_upcoming(&events, now(), FEATURED_EVENTS);
        let titles = picked.iter().map(|e| e.title.as_str()).collect_vec();

        assert_eq!(titles, vec!["later", "soon", "old", "older"]);
    }

    #[test]
    fn test_pick_upcoming_prefers_deadline_over_start() {
        let e = event("both", "2026-01-01", "2026-09-01");
        assert_eq!(
            e.reference_instant().map(|i| i.as_datetime().with_timezone(&Utc)),
            Some(Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap())
        );
        assert!(pick_upcoming(&[], now(), FEATURED_EVENTS).is_empty());
    }

    #[test]
    fn test_pick_upcoming_falls_back_to_single_date() {
        let mut single_day = event("workshop", "", "");
        single_day.date = "2026-03-01".to_string();
        let events = vec![event("undated", "", ""), single_day, event("past", "2025-05-05", "")];

        let picked = pick_upcoming(&events, now(), 2);
        let titles = picked.iter().map(|e| e.title.as_str()).collect_vec();

        assert_eq!(titles, vec!["workshop", "past"]);
    }

    #[test]
    fn test_decode_event() {
        let json = r#"{"id": "e1", "title": "Shutter Stories", "slug": "shutter-stories",
                       "deadline": "2026-02-01", "startDate": "2026-02-05"}"#;
        let e: Event = serde_json::from_str(json).unwrap();
        assert_eq!(e.slug, "shutter-stories");
        assert_eq!(e.start_date, "2026-02-05");
        assert_eq!(e.end_date, "");
    }
}
