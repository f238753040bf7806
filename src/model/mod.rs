mod common;
mod countdown;
mod event;
mod result;

pub use common::*;
pub use countdown::*;
pub use event::*;
pub use result::*;
