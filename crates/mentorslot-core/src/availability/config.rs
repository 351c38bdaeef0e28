use serde::{Deserialize, Serialize};

use crate::error::ScheduleError;

/// Largest accepted per-day session limit.
pub const MAX_SLOTS_PER_DAY_LIMIT: u8 = 20;
pub const DEFAULT_MAX_SLOTS_PER_DAY: u8 = 5;

/// Bookable session length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum SessionDuration {
    #[default]
    Thirty,
    Sixty,
    Ninety,
}

impl SessionDuration {
    pub fn minutes(self) -> u32 {
        match self {
            SessionDuration::Thirty => 30,
            SessionDuration::Sixty => 60,
            SessionDuration::Ninety => 90,
        }
    }
}

impl TryFrom<u32> for SessionDuration {
    type Error = ScheduleError;

    fn try_from(minutes: u32) -> Result<Self, Self::Error> {
        match minutes {
            30 => Ok(SessionDuration::Thirty),
            60 => Ok(SessionDuration::Sixty),
            90 => Ok(SessionDuration::Ninety),
            other => Err(ScheduleError::InvalidDuration(other)),
        }
    }
}

impl From<SessionDuration> for u32 {
    fn from(value: SessionDuration) -> Self {
        value.minutes()
    }
}

/// Session length and per-day capacity that parameterize the weekly schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityConfig {
    #[serde(rename = "sessionDurationMinutes")]
    session_duration: SessionDuration,
    max_slots_per_day: u8,
}

impl AvailabilityConfig {
    /// Validate raw settings.
    pub fn new(session_duration_minutes: u32, max_slots_per_day: u32) -> Result<Self, ScheduleError> {
        Ok(Self {
            session_duration: SessionDuration::try_from(session_duration_minutes)?,
            max_slots_per_day: validate_max_slots(max_slots_per_day)?,
        })
    }

    pub fn session_duration(&self) -> SessionDuration {
        self.session_duration
    }

    pub fn session_duration_minutes(&self) -> u32 {
        self.session_duration.minutes()
    }

    pub fn max_slots_per_day(&self) -> u8 {
        self.max_slots_per_day
    }

    pub(crate) fn with_session_duration(mut self, duration: SessionDuration) -> Self {
        self.session_duration = duration;
        self
    }

    pub(crate) fn with_max_slots_per_day(mut self, max: u8) -> Self {
        self.max_slots_per_day = max;
        self
    }
}

impl Default for AvailabilityConfig {
    fn default() -> Self {
        Self {
            session_duration: SessionDuration::default(),
            max_slots_per_day: DEFAULT_MAX_SLOTS_PER_DAY,
        }
    }
}

pub(crate) fn validate_max_slots(n: u32) -> Result<u8, ScheduleError> {
    if (1..=MAX_SLOTS_PER_DAY_LIMIT as u32).contains(&n) {
        Ok(n as u8)
    } else {
        Err(ScheduleError::InvalidMaxSlots(n))
    }
}
