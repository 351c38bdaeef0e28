//! # mentorslot Core Library
//!
//! Scheduling core for a mentor/interview marketplace: experts publish
//! recurring weekly availability and blackout dates, candidates book
//! fixed-length sessions, and booked sessions move through a clock-driven
//! lifecycle. The `mentorslot` CLI is a thin layer over this library.
//!
//! ## Architecture
//!
//! - **Time**: `HH:MM` wall-clock arithmetic that wraps at midnight
//! - **Availability**: day keys, slots, weekly pattern, break dates, settings
//! - **Scheduler**: immutable aggregate with a command API and a
//!   transactional editor that only commits after a successful save
//! - **Session**: Scheduled → Active → Ended → Reviewed, derived from the clock
//! - **Storage**: SQLite and REST stores behind small traits, plus TOML config
//!
//! ## Key Components
//!
//! - [`Scheduler`]: availability aggregate
//! - [`AvailabilityEditor`]: draft/commit wrapper around persistence
//! - [`Session`]: booked session lifecycle
//! - [`Config`]: application configuration management

pub mod availability;
pub mod error;
pub mod scheduler;
pub mod session;
pub mod storage;
pub mod time;

pub use availability::{AvailabilityConfig, BreakDate, BreakRegister, DayKey, SessionDuration, Slot, WeeklySchedule};
pub use error::{ConfigError, CoreError, ParseError, PersistenceError, ScheduleError, SessionError};
pub use scheduler::{AvailabilityEditor, Opening, ScheduleCommand, Scheduler, SchedulerDocument};
pub use session::{JoinTicket, Review, ReviewSubmission, Session, SessionPhase, SessionRecord};
pub use storage::{Config, LocalStore, RemoteStore, SessionStore, SnapshotStore, StorageMode};
pub use time::TimeOfDay;
