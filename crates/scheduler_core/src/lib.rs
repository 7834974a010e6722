//! Scheduler Core - availability tracking behind the `!schedule` chat commands
//!
//! The crate validates weekday and clock-time tokens, keeps per-day
//! availability windows in memory, and turns command messages into replies.
//! It knows nothing about the chat platform; see `scheduler-discord` for that.

pub mod availability;
pub mod command;
pub mod day;
pub mod error;
pub mod store;
pub mod time;
pub mod usage;

pub use availability::{Availability, UserId};
pub use command::{CommandDispatcher, DEFAULT_PREFIX};
pub use day::Weekday;
pub use error::{Result, ScheduleError};
pub use store::AvailabilityStore;
pub use time::TimeOfDay;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::{
        Availability, AvailabilityStore, CommandDispatcher, Result, ScheduleError, TimeOfDay,
        UserId, Weekday,
    };
}
