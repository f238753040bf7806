use serde::{Deserialize, Serialize};

use super::RecordId;

/// An event as listed by the backend. Only the date fields drive any logic;
/// the rest is carried for display.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Event {
    pub id: RecordId,
    pub title: String,
    pub slug: String,
    pub short_description: String,
    pub venue: String,
    pub status: String,
    pub deadline: String,
    pub start_date: String,
    pub end_date: String,
    /// Single-day events carry a plain date instead of a start/end range.
    pub date: String,
}

/// Whether an event currently takes registrations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, strum_macros::Display)]
pub enum RegistrationStatus {
    #[strum(to_string = "Registration Open")]
    Open,
    #[strum(to_string = "Registration Closed")]
    Closed,
    /// No usable deadline; registration is never blocked on missing data.
    #[strum(to_string = "")]
    Unscheduled,
}

impl RegistrationStatus {
    pub fn accepts_submissions(&self) -> bool {
        !matches!(self, RegistrationStatus::Closed)
    }
}
