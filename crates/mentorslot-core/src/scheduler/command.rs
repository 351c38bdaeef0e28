use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::availability::DayKey;

/// Every mutation the availability editor accepts.
///
/// Slot ends never appear here: only a start time is accepted and the end
/// is always derived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum ScheduleCommand {
    AddSlot {
        day: DayKey,
    },
    UpdateSlotStart {
        day: DayKey,
        index: usize,
        start: String,
    },
    RemoveSlot {
        day: DayKey,
        index: usize,
    },
    ClearDay {
        day: DayKey,
    },
    /// On/off toggle for a whole day.
    SetDayAvailable {
        day: DayKey,
        available: bool,
    },
    CopyDaySchedule {
        source: DayKey,
    },
    SetSessionDuration {
        minutes: u32,
    },
    SetMaxSlotsPerDay {
        max: u32,
    },
    AddBreakDate {
        date: NaiveDate,
    },
    RemoveBreakDate {
        index: usize,
    },
}

impl ScheduleCommand {
    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            ScheduleCommand::AddSlot { .. } => "add_slot",
            ScheduleCommand::UpdateSlotStart { .. } => "update_slot_start",
            ScheduleCommand::RemoveSlot { .. } => "remove_slot",
            ScheduleCommand::ClearDay { .. } => "clear_day",
            ScheduleCommand::SetDayAvailable { .. } => "set_day_available",
            ScheduleCommand::CopyDaySchedule { .. } => "copy_day_schedule",
            ScheduleCommand::SetSessionDuration { .. } => "set_session_duration",
            ScheduleCommand::SetMaxSlotsPerDay { .. } => "set_max_slots_per_day",
            ScheduleCommand::AddBreakDate { .. } => "add_break_date",
            ScheduleCommand::RemoveBreakDate { .. } => "remove_break_date",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tagged_json_shape() {
        let cmd = ScheduleCommand::UpdateSlotStart {
            day: DayKey::Tue,
            index: 0,
            start: "14:00".into(),
        };
        let json = serde_json::to_value(&cmd).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"command": "update_slot_start", "day": "tue", "index": 0, "start": "14:00"})
        );
        assert_eq!(cmd.name(), "update_slot_start");
    }

    #[test]
    fn unknown_day_in_command_is_rejected() {
        let raw = r#"{"command": "add_slot", "day": "funday"}"#;
        assert!(serde_json::from_str::<ScheduleCommand>(raw).is_err());
    }

    #[test]
    fn end_time_is_not_part_of_any_command() {
        let raw = r#"{"command": "update_slot_start", "day": "mon", "index": 0, "start": "10:00", "end": "12:00"}"#;
        let cmd: ScheduleCommand = serde_json::from_str(raw).unwrap();
        let json = serde_json::to_value(&cmd).unwrap();
        assert!(json.get("end").is_none());
    }
}
