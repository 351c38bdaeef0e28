use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// Day of the week in the recurring pattern. Ordering is Monday-first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayKey {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl DayKey {
    pub const ALL: [DayKey; 7] = [
        DayKey::Mon,
        DayKey::Tue,
        DayKey::Wed,
        DayKey::Thu,
        DayKey::Fri,
        DayKey::Sat,
        DayKey::Sun,
    ];

    /// Position in the week, Monday = 0.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Wire token (`mon` .. `sun`).
    pub fn as_str(self) -> &'static str {
        match self {
            DayKey::Mon => "mon",
            DayKey::Tue => "tue",
            DayKey::Wed => "wed",
            DayKey::Thu => "thu",
            DayKey::Fri => "fri",
            DayKey::Sat => "sat",
            DayKey::Sun => "sun",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DayKey::Mon => "Monday",
            DayKey::Tue => "Tuesday",
            DayKey::Wed => "Wednesday",
            DayKey::Thu => "Thursday",
            DayKey::Fri => "Friday",
            DayKey::Sat => "Saturday",
            DayKey::Sun => "Sunday",
        }
    }

    /// Weekday of a calendar date.
    pub fn of(date: NaiveDate) -> Self {
        date.weekday().into()
    }
}

impl From<Weekday> for DayKey {
    fn from(day: Weekday) -> Self {
        DayKey::ALL[day.num_days_from_monday() as usize]
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DayKey {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DayKey::ALL
            .into_iter()
            .find(|day| day.as_str() == s)
            .ok_or_else(|| ParseError::DayKey(s.to_string()))
    }
}
