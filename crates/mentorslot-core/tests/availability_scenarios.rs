//! Integration tests for the availability command API.

use chrono::NaiveDate;
use mentorslot_core::{
    AvailabilityConfig, DayKey, ScheduleCommand, ScheduleError, Scheduler, SchedulerDocument,
};

fn scheduler(duration: u32, max: u32) -> Scheduler {
    Scheduler::new(AvailabilityConfig::new(duration, max).unwrap())
}

fn window(s: &Scheduler, day: DayKey, index: usize) -> (String, String) {
    let slot = s.slots(day)[index];
    (slot.start().to_string(), slot.end().to_string())
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

#[test]
fn new_slot_on_thirty_minute_schedule() {
    let s = scheduler(30, 5).add_slot(DayKey::Mon).unwrap();
    assert_eq!(window(&s, DayKey::Mon, 0), ("09:00".into(), "09:30".into()));
}

#[test]
fn full_day_rejects_another_slot() {
    let s = scheduler(30, 1).add_slot(DayKey::Mon).unwrap();
    let err = s.add_slot(DayKey::Mon).unwrap_err();
    assert!(matches!(err, ScheduleError::CapacityExceeded { day: DayKey::Mon, limit: 1 }));
    assert_eq!(err.to_string(), "Daily limit reached (1 sessions) on mon");
    assert_eq!(s.slots(DayKey::Mon).len(), 1);
}

#[test]
fn moving_start_on_hour_schedule() {
    let s = scheduler(60, 5)
        .add_slot(DayKey::Tue)
        .unwrap()
        .update_slot_start(DayKey::Tue, 0, "14:00")
        .unwrap();
    assert_eq!(window(&s, DayKey::Tue, 0), ("14:00".into(), "15:00".into()));
}

#[test]
fn copying_monday_to_the_whole_week() {
    let s = scheduler(30, 5)
        .add_slot(DayKey::Mon)
        .unwrap()
        .copy_day_schedule(DayKey::Mon)
        .unwrap();
    for day in DayKey::ALL {
        assert_eq!(window(&s, day, 0), ("09:00".into(), "09:30".into()), "{day}");
        assert_eq!(s.slots(day).len(), 1);
    }

    let edited = s.remove_slot(DayKey::Sun, 0).unwrap();
    assert_eq!(edited.slots(DayKey::Mon).len(), 1);
}

#[test]
fn duplicate_break_date() {
    let s = Scheduler::default().add_break_date(date("2024-01-05")).unwrap();
    let err = s.add_break_date(date("2024-01-05")).unwrap_err();
    assert_eq!(err, ScheduleError::DuplicateBreakDate(date("2024-01-05")));
    assert_eq!(err.to_string(), "Date already blocked: 2024-01-05");
    assert_eq!(s.breaks().len(), 1);
}

#[test]
fn commands_replayed_from_json() {
    let script = r#"[
        {"command": "set_session_duration", "minutes": 90},
        {"command": "add_slot", "day": "wed"},
        {"command": "update_slot_start", "day": "wed", "index": 0, "start": "23:00"},
        {"command": "add_break_date", "date": "2024-07-04"},
        {"command": "set_day_available", "day": "fri", "available": true}
    ]"#;
    let commands: Vec<ScheduleCommand> = serde_json::from_str(script).unwrap();
    let s = commands
        .iter()
        .try_fold(Scheduler::default(), |s, c| s.apply(c))
        .unwrap();

    // Overnight window wraps without any marker
    assert_eq!(window(&s, DayKey::Wed, 0), ("23:00".into(), "00:30".into()));
    assert!(s.slots(DayKey::Wed)[0].wraps_midnight());
    assert_eq!(window(&s, DayKey::Fri, 0), ("09:00".into(), "10:30".into()));
    // 2024-07-04 is a Thursday; nothing scheduled there anyway
    assert!(s.windows_on(date("2024-07-04")).is_empty());
}

#[test]
fn snapshot_document_shape() {
    let s = scheduler(60, 2)
        .add_slot(DayKey::Thu)
        .unwrap()
        .add_break_date(date("2024-02-14"))
        .unwrap();
    let json = serde_json::to_value(SchedulerDocument::from(&s)).unwrap();
    assert_eq!(json["sessionDurationMinutes"], 60);
    assert_eq!(json["maxSlotsPerDay"], 2);
    assert_eq!(json["weekly"]["thu"][0]["from"], "09:00");
    assert_eq!(json["weekly"]["thu"][0]["to"], "10:00");
    assert_eq!(json["weekly"]["mon"], serde_json::json!([]));
    assert_eq!(json["breakDates"][0]["start"], "2024-02-14");
}
