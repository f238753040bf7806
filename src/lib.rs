//! Deadline resolution, live countdowns and results aggregation for a club
//! event showcase.
//!
//! Records come from an external backend as plain data; everything here is
//! a pure function of those records and the current time, except the
//! [`CountdownTicker`], which re-publishes a countdown once per tick.
//!
//! ```
//! use club_showcase::{group_results, is_past, Boundary, ResultRecord};
//!
//! assert!(is_past("2000-01-01", Boundary::End));
//!
//! let rows = vec![ResultRecord {
//!     event_title: "Shutter Stories".into(),
//!     category: "Single Photo".into(),
//!     position: "1st".into(),
//!     ..Default::default()
//! }];
//! assert_eq!(group_results(&rows)[0].categories[0].winners[0].rank, 1);
//! ```

pub use countdown::{snapshot, Countdown, CountdownTicker, DEFAULT_TICK};
pub use deadline::{date_only, is_past, is_past_at, parse};
pub use error::{Result, ShowcaseError};
pub use events::{pick_upcoming, FEATURED_EVENTS};
pub use model::*;
pub use results::{
    group_results, position_rank, public_results, title_order, PUBLISHED, UNRANKED,
};

pub mod countdown;
pub mod deadline;
mod error;
pub mod events;
mod model;
pub mod results;
