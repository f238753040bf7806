use std::fmt::{Display, Formatter};

use serde::Serialize;

/// Remaining time until a countdown target, split into display buckets.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CountdownSnapshot {
    pub is_done: bool,
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl CountdownSnapshot {
    /// The terminal snapshot: target reached, every bucket zero.
    pub const DONE: Self = Self {
        is_done: true,
        days: 0,
        hours: 0,
        minutes: 0,
        seconds: 0,
    };

    pub fn state(&self) -> CountdownState {
        if self.is_done {
            CountdownState::Done
        } else {
            CountdownState::Counting
        }
    }

    pub fn window(&self) -> WindowState {
        if self.is_done {
            WindowState::Closed
        } else {
            WindowState::Open
        }
    }
}

impl Display for CountdownSnapshot {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:02}d {:02}h {:02}m {:02}s",
            self.days, self.hours, self.minutes, self.seconds
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum CountdownState {
    Counting,
    Done,
}

/// Badge shown next to a countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, strum_macros::Display)]
#[strum(serialize_all = "UPPERCASE")]
pub enum WindowState {
    Open,
    Closed,
}
