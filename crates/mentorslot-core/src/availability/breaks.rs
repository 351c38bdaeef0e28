use chrono::NaiveDate;
use serde::Serialize;

use crate::error::ScheduleError;

/// A blackout on which the weekly pattern is suppressed.
///
/// New breaks always cover a single day (`start == end`). Stored ranges are
/// kept as loaded and honoured by [`BreakDate::covers`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct BreakDate {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl BreakDate {
    pub fn single(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Blackout dates in insertion order, unique by `start`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct BreakRegister {
    dates: Vec<BreakDate>,
}

impl BreakRegister {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn as_slice(&self) -> &[BreakDate] {
        &self.dates
    }

    pub fn contains_start(&self, date: NaiveDate) -> bool {
        self.dates.iter().any(|b| b.start == date)
    }

    /// Whether any break covers `date`.
    pub fn is_blocked(&self, date: NaiveDate) -> bool {
        self.dates.iter().any(|b| b.covers(date))
    }

    /// Breaks ordered by start date, each paired with its register index
    /// (the index `remove` expects).
    pub fn sorted(&self) -> Vec<(usize, &BreakDate)> {
        let mut dates: Vec<_> = self.dates.iter().enumerate().collect();
        dates.sort_by_key(|(_, b)| b.start);
        dates
    }

    pub(crate) fn add(&mut self, date: NaiveDate) -> Result<(), ScheduleError> {
        self.insert(BreakDate::single(date))
    }

    pub(crate) fn insert(&mut self, entry: BreakDate) -> Result<(), ScheduleError> {
        if self.contains_start(entry.start) {
            return Err(ScheduleError::DuplicateBreakDate(entry.start));
        }
        self.dates.push(entry);
        Ok(())
    }

    pub(crate) fn remove(&mut self, index: usize) -> Result<BreakDate, ScheduleError> {
        if index >= self.dates.len() {
            return Err(ScheduleError::IndexOutOfRange {
                collection: "break date".to_string(),
                index,
                len: self.dates.len(),
            });
        }
        Ok(self.dates.remove(index))
    }
}
