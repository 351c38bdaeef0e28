use serde::Serialize;

use super::config::SessionDuration;
use crate::time::{TimeOfDay, MINUTES_PER_DAY};

/// Start time given to freshly added slots.
pub const DEFAULT_SLOT_START: TimeOfDay = TimeOfDay::from_hm_const(9, 0);

/// One bookable window within a day.
///
/// The end is always derived from the start and the session duration. It can
/// only be produced inside the crate, so no caller can hand in a divergent
/// `to` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Slot {
    from: TimeOfDay,
    to: TimeOfDay,
}

impl Slot {
    pub(crate) fn starting_at(from: TimeOfDay, duration: SessionDuration) -> Self {
        Self {
            from,
            to: from.add_minutes(duration.minutes()),
        }
    }

    /// Rehydrate a stored slot exactly as persisted, including an end that
    /// predates a later duration change.
    pub(crate) fn from_stored(from: TimeOfDay, to: TimeOfDay) -> Self {
        Self { from, to }
    }

    pub fn start(&self) -> TimeOfDay {
        self.from
    }

    pub fn end(&self) -> TimeOfDay {
        self.to
    }

    /// Length of the window, treating an end at or before the start as the
    /// next day.
    pub fn length_minutes(&self) -> u32 {
        (self.to.minutes() + MINUTES_PER_DAY - self.from.minutes()) % MINUTES_PER_DAY
    }

    /// Whether the end wrapped past midnight.
    pub fn wraps_midnight(&self) -> bool {
        self.to < self.from
    }
}

impl std::fmt::Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.from, self.to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> TimeOfDay {
        s.parse().unwrap()
    }

    #[test]
    fn end_is_derived_from_duration() {
        let slot = Slot::starting_at(t("09:00"), SessionDuration::Thirty);
        assert_eq!(slot.end(), t("09:30"));
        assert_eq!(slot.length_minutes(), 30);
        assert_eq!(slot.to_string(), "09:00-09:30");
    }

    #[test]
    fn overnight_slot_wraps() {
        let slot = Slot::starting_at(t("23:30"), SessionDuration::Ninety);
        assert_eq!(slot.end(), t("01:00"));
        assert!(slot.wraps_midnight());
        assert_eq!(slot.length_minutes(), 90);
    }

    #[test]
    fn default_start_is_nine() {
        assert_eq!(DEFAULT_SLOT_START.to_string(), "09:00");
    }

    #[test]
    fn serializes_as_from_to() {
        let slot = Slot::starting_at(t("14:00"), SessionDuration::Sixty);
        let json = serde_json::to_value(slot).unwrap();
        assert_eq!(json, serde_json::json!({"from": "14:00", "to": "15:00"}));
    }
}
