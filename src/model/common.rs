use std::fmt::{Display, Formatter};

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Which end of a calendar day a bare `YYYY-MM-DD` date resolves to.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum_macros::EnumString,
    strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Boundary {
    /// `00:00:00` local time.
    Start,
    /// `23:59:59` local time.
    #[default]
    End,
}

/// A canonical, timezone-resolved point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Instant(DateTime<Local>);

impl Instant {
    pub fn as_datetime(&self) -> DateTime<Local> {
        self.0
    }

    pub fn timestamp_millis(&self) -> i64 {
        self.0.timestamp_millis()
    }
}

impl From<DateTime<Local>> for Instant {
    fn from(value: DateTime<Local>) -> Self {
        Self(value)
    }
}

impl Display for Instant {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

/// Row identifier as handed out by the spreadsheet backend, which emits
/// either text or numeric ids depending on how the cell was written.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(i64),
    Text(String),
}

impl Default for RecordId {
    fn default() -> Self {
        RecordId::Text(String::new())
    }
}

impl Display for RecordId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordId::Number(n) => write!(f, "{n}"),
            RecordId::Text(s) => write!(f, "{s}"),
        }
    }
}
