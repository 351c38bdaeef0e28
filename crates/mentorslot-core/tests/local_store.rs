//! Availability persistence through the SQLite store.

use chrono::NaiveDate;
use mentorslot_core::{AvailabilityEditor, DayKey, LocalStore, ScheduleCommand};

#[test]
fn saved_snapshot_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mentorslot.db");

    {
        let store = LocalStore::open_at(&path).unwrap();
        let mut editor = AvailabilityEditor::open(&store).unwrap();
        for command in [
            ScheduleCommand::SetSessionDuration { minutes: 60 },
            ScheduleCommand::AddSlot { day: DayKey::Mon },
            ScheduleCommand::UpdateSlotStart {
                day: DayKey::Mon,
                index: 0,
                start: "13:30".into(),
            },
            ScheduleCommand::CopyDaySchedule { source: DayKey::Mon },
            ScheduleCommand::ClearDay { day: DayKey::Sun },
            ScheduleCommand::AddBreakDate {
                date: NaiveDate::from_ymd_opt(2024, 12, 24).unwrap(),
            },
        ] {
            editor.apply(&command).unwrap();
        }
        editor.save(&store).unwrap();
    }

    let store = LocalStore::open_at(&path).unwrap();
    let editor = AvailabilityEditor::open(&store).unwrap();
    let saved = editor.saved();
    assert_eq!(saved.config().session_duration_minutes(), 60);
    assert_eq!(saved.slots(DayKey::Sat)[0].start().to_string(), "13:30");
    assert_eq!(saved.slots(DayKey::Sat)[0].end().to_string(), "14:30");
    assert!(!saved.is_day_available(DayKey::Sun));
    assert_eq!(saved.breaks().len(), 1);
}

#[test]
fn unsaved_draft_is_not_persisted() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mentorslot.db");
    let store = LocalStore::open_at(&path).unwrap();

    let mut editor = AvailabilityEditor::open(&store).unwrap();
    editor
        .apply(&ScheduleCommand::AddSlot { day: DayKey::Tue })
        .unwrap();
    drop(editor);

    let reopened = AvailabilityEditor::open(&store).unwrap();
    assert!(!reopened.saved().is_day_available(DayKey::Tue));
}
