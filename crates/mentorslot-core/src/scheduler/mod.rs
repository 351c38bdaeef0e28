//! The scheduling aggregate.
//!
//! A [`Scheduler`] is an immutable snapshot of one expert's availability:
//! settings, the weekly pattern and blackout dates. Every command takes
//! `&self` and returns either a brand-new snapshot or a typed error, so a
//! failed command can never leave a half-applied state behind.
//!
//! ## Usage
//!
//! ```ignore
//! let scheduler = Scheduler::default()
//!     .add_slot(DayKey::Mon)?
//!     .update_slot_start(DayKey::Mon, 0, "14:00")?
//!     .copy_day_schedule(DayKey::Mon)?;
//! ```

mod calendar;
mod command;
mod document;
mod editor;

pub use calendar::{Opening, MAX_OPENING_DAYS};
pub use command::ScheduleCommand;
pub use document::{BreakDateDocument, SchedulerDocument, SlotDocument};
pub use editor::AvailabilityEditor;

use chrono::NaiveDate;

use crate::availability::{
    validate_max_slots, AvailabilityConfig, BreakRegister, DayKey, SessionDuration, Slot,
    WeeklySchedule, DEFAULT_SLOT_START,
};
use crate::error::ScheduleError;
use crate::time::TimeOfDay;

/// Settings, weekly pattern and blackout dates, persisted as one unit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scheduler {
    config: AvailabilityConfig,
    weekly: WeeklySchedule,
    breaks: BreakRegister,
}

impl Scheduler {
    /// Empty pattern with the given settings.
    pub fn new(config: AvailabilityConfig) -> Self {
        Self {
            config,
            weekly: WeeklySchedule::new(),
            breaks: BreakRegister::new(),
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn config(&self) -> &AvailabilityConfig {
        &self.config
    }

    pub fn weekly(&self) -> &WeeklySchedule {
        &self.weekly
    }

    pub fn breaks(&self) -> &BreakRegister {
        &self.breaks
    }

    pub fn slots(&self, day: DayKey) -> &[Slot] {
        self.weekly.slots(day)
    }

    /// A day is available iff it has at least one slot.
    pub fn is_day_available(&self, day: DayKey) -> bool {
        self.weekly.is_available(day)
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Dispatch a command value to the matching method.
    pub fn apply(&self, command: &ScheduleCommand) -> Result<Scheduler, ScheduleError> {
        tracing::debug!(?command, "applying schedule command");
        match command {
            ScheduleCommand::AddSlot { day } => self.add_slot(*day),
            ScheduleCommand::UpdateSlotStart { day, index, start } => {
                self.update_slot_start(*day, *index, start)
            }
            ScheduleCommand::RemoveSlot { day, index } => self.remove_slot(*day, *index),
            ScheduleCommand::ClearDay { day } => self.clear_day(*day),
            ScheduleCommand::SetDayAvailable { day, available } => {
                self.set_day_available(*day, *available)
            }
            ScheduleCommand::CopyDaySchedule { source } => self.copy_day_schedule(*source),
            ScheduleCommand::SetSessionDuration { minutes } => self.set_session_duration(*minutes),
            ScheduleCommand::SetMaxSlotsPerDay { max } => self.set_max_slots_per_day(*max),
            ScheduleCommand::AddBreakDate { date } => self.add_break_date(*date),
            ScheduleCommand::RemoveBreakDate { index } => self.remove_break_date(*index),
        }
    }

    /// Append a slot starting at 09:00.
    pub fn add_slot(&self, day: DayKey) -> Result<Scheduler, ScheduleError> {
        let mut next = self.clone();
        let slot = Slot::starting_at(DEFAULT_SLOT_START, self.duration());
        next.weekly
            .push(day, slot, self.config.max_slots_per_day())?;
        Ok(next)
    }

    /// Move a slot's start; its end is recomputed from the current duration.
    pub fn update_slot_start(
        &self,
        day: DayKey,
        index: usize,
        new_start: &str,
    ) -> Result<Scheduler, ScheduleError> {
        let start: TimeOfDay = new_start.parse()?;
        let mut next = self.clone();
        next.weekly
            .replace(day, index, Slot::starting_at(start, self.duration()))?;
        Ok(next)
    }

    pub fn remove_slot(&self, day: DayKey, index: usize) -> Result<Scheduler, ScheduleError> {
        let mut next = self.clone();
        next.weekly.remove(day, index)?;
        Ok(next)
    }

    /// Mark a day unavailable by emptying it.
    pub fn clear_day(&self, day: DayKey) -> Result<Scheduler, ScheduleError> {
        let mut next = self.clone();
        next.weekly.clear(day);
        Ok(next)
    }

    /// Toggle a day. Switching on an empty day seeds it with one default
    /// slot; switching off clears it. Already-matching days are left as is.
    pub fn set_day_available(&self, day: DayKey, available: bool) -> Result<Scheduler, ScheduleError> {
        match (available, self.is_day_available(day)) {
            (true, false) => self.add_slot(day),
            (false, true) => self.clear_day(day),
            _ => Ok(self.clone()),
        }
    }

    /// Overwrite every other day with a copy of `source`.
    pub fn copy_day_schedule(&self, source: DayKey) -> Result<Scheduler, ScheduleError> {
        let mut next = self.clone();
        next.weekly.copy_to_all(source);
        Ok(next)
    }

    /// Change the session length. Existing slot ends are left as they are
    /// until each slot is edited again.
    pub fn set_session_duration(&self, minutes: u32) -> Result<Scheduler, ScheduleError> {
        let duration = SessionDuration::try_from(minutes)?;
        let mut next = self.clone();
        next.config = self.config.with_session_duration(duration);
        Ok(next)
    }

    /// Change the per-day limit. Lowering it below a day's current slot
    /// count is refused so the capacity invariant keeps holding.
    pub fn set_max_slots_per_day(&self, max: u32) -> Result<Scheduler, ScheduleError> {
        let limit = validate_max_slots(max)?;
        if let Some((day, len)) = self.weekly.busiest_day() {
            if len > limit as usize {
                return Err(ScheduleError::CapacityExceeded { day, limit });
            }
        }
        let mut next = self.clone();
        next.config = self.config.with_max_slots_per_day(limit);
        Ok(next)
    }

    pub fn add_break_date(&self, date: NaiveDate) -> Result<Scheduler, ScheduleError> {
        let mut next = self.clone();
        next.breaks.add(date)?;
        Ok(next)
    }

    pub fn remove_break_date(&self, index: usize) -> Result<Scheduler, ScheduleError> {
        let mut next = self.clone();
        next.breaks.remove(index)?;
        Ok(next)
    }

    fn duration(&self) -> SessionDuration {
        self.config.session_duration()
    }
}
