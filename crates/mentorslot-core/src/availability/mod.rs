//! Recurring weekly availability.
//!
//! Holds the building blocks the [`Scheduler`](crate::Scheduler) aggregate is
//! composed of: day keys, slots, the weekly pattern, blackout dates and the
//! duration/capacity settings.

mod breaks;
mod config;
mod day;
mod slot;
mod weekly;

pub(crate) use config::validate_max_slots;

pub use breaks::{BreakDate, BreakRegister};
pub use config::{
    AvailabilityConfig, SessionDuration, DEFAULT_MAX_SLOTS_PER_DAY, MAX_SLOTS_PER_DAY_LIMIT,
};
pub use day::DayKey;
pub use slot::{Slot, DEFAULT_SLOT_START};
pub use weekly::WeeklySchedule;
