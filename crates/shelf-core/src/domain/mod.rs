//! Domain entities and their write forms.
//!
//! Entities mirror table rows. Timestamps travel over the wire as epoch
//! milliseconds. Forms are the validated request bodies used for create and
//! update.

mod album;
mod book;
mod comment;
mod file;
mod pet;
mod photo;
mod song;
mod team;
mod user;

pub use album::*;
pub use book::*;
pub use comment::*;
pub use file::*;
pub use pet::*;
pub use photo::*;
pub use song::*;
pub use team::*;
pub use user::*;

use chrono::{DateTime, SubsecRound, Utc};

/// Current time truncated to the millisecond precision timestamps are
/// serialized with.
#[must_use]
pub fn now_millis() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}
