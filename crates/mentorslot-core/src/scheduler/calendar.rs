//! Projection of the weekly pattern onto calendar dates.

use chrono::{Days, NaiveDate};
use serde::Serialize;

use super::Scheduler;
use crate::availability::{DayKey, Slot};

/// Longest range `openings` will scan.
pub const MAX_OPENING_DAYS: u32 = 366;

/// Bookable windows on one concrete date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Opening {
    pub date: NaiveDate,
    pub day: DayKey,
    pub slots: Vec<Slot>,
}

impl Scheduler {
    /// Slots offered on `date`: the weekday's pattern, or nothing when a
    /// break covers the date.
    pub fn windows_on(&self, date: NaiveDate) -> &[Slot] {
        if self.breaks.is_blocked(date) {
            return &[];
        }
        self.weekly.slots(DayKey::of(date))
    }

    /// Dates in `[from, from + days)` that offer at least one slot. The range
    /// is capped at [`MAX_OPENING_DAYS`] and stops at the end of the calendar.
    pub fn openings(&self, from: NaiveDate, days: u32) -> Vec<Opening> {
        (0..days.min(MAX_OPENING_DAYS))
            .map_while(|offset| from.checked_add_days(Days::new(offset as u64)))
            .filter_map(|date| {
                let slots = self.windows_on(date);
                (!slots.is_empty()).then(|| Opening {
                    date,
                    day: DayKey::of(date),
                    slots: slots.to_vec(),
                })
            })
            .collect()
    }
}
