//! Wire shape of a persisted snapshot.
//!
//! Documents arrive loosely typed from the backend. They are only turned into
//! a [`Scheduler`] through `TryFrom`, which rejects unknown day keys,
//! malformed times and dates, and day lists over capacity.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Scheduler;
use crate::availability::{AvailabilityConfig, BreakDate, DayKey, Slot};
use crate::error::{ParseError, ScheduleError};
use crate::time::TimeOfDay;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulerDocument {
    pub session_duration_minutes: u32,
    pub max_slots_per_day: u32,
    #[serde(default)]
    pub weekly: BTreeMap<String, Vec<SlotDocument>>,
    #[serde(default)]
    pub break_dates: Vec<BreakDateDocument>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotDocument {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakDateDocument {
    pub start: String,
    pub end: String,
}

fn parse_date(raw: &str) -> Result<NaiveDate, ParseError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| ParseError::Date(raw.to_string()))
}

impl TryFrom<SchedulerDocument> for Scheduler {
    type Error = ScheduleError;

    fn try_from(doc: SchedulerDocument) -> Result<Self, Self::Error> {
        let config = AvailabilityConfig::new(doc.session_duration_minutes, doc.max_slots_per_day)?;
        let limit = config.max_slots_per_day();
        let mut scheduler = Scheduler::new(config);

        for (key, raw_slots) in doc.weekly {
            let day: DayKey = key.parse()?;
            if raw_slots.len() > limit as usize {
                return Err(ScheduleError::CapacityExceeded { day, limit });
            }
            let slots = raw_slots
                .iter()
                .map(|s| {
                    let from: TimeOfDay = s.from.parse()?;
                    let to: TimeOfDay = s.to.parse()?;
                    Ok(Slot::from_stored(from, to))
                })
                .collect::<Result<Vec<_>, ParseError>>()?;
            scheduler.weekly.set_slots(day, slots);
        }

        for raw in doc.break_dates {
            let start = parse_date(&raw.start)?;
            let end = parse_date(&raw.end)?;
            if end < start {
                return Err(ParseError::BreakRange {
                    start: raw.start,
                    end: raw.end,
                }
                .into());
            }
            scheduler.breaks.insert(BreakDate { start, end })?;
        }

        Ok(scheduler)
    }
}

impl From<&Scheduler> for SchedulerDocument {
    fn from(scheduler: &Scheduler) -> Self {
        let weekly = scheduler
            .weekly()
            .iter()
            .map(|(day, slots)| {
                let slots = slots
                    .iter()
                    .map(|slot| SlotDocument {
                        from: slot.start().to_string(),
                        to: slot.end().to_string(),
                    })
                    .collect();
                (day.as_str().to_string(), slots)
            })
            .collect();

        let break_dates = scheduler
            .breaks()
            .as_slice()
            .iter()
            .map(|b| BreakDateDocument {
                start: b.start.format("%Y-%m-%d").to_string(),
                end: b.end.format("%Y-%m-%d").to_string(),
            })
            .collect();

        Self {
            session_duration_minutes: scheduler.config().session_duration_minutes(),
            max_slots_per_day: scheduler.config().max_slots_per_day() as u32,
            weekly,
            break_dates,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: serde_json::Value) -> SchedulerDocument {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn parses_backend_document() {
        let scheduler = Scheduler::try_from(doc(json!({
            "sessionDurationMinutes": 60,
            "maxSlotsPerDay": 3,
            "weekly": {
                "mon": [{"from": "09:00", "to": "10:00"}],
                "fri": []
            },
            "breakDates": [{"start": "2024-01-05", "end": "2024-01-05"}]
        })))
        .unwrap();

        assert_eq!(scheduler.config().session_duration_minutes(), 60);
        assert_eq!(scheduler.slots(DayKey::Mon).len(), 1);
        assert!(!scheduler.is_day_available(DayKey::Fri));
        assert!(!scheduler.is_day_available(DayKey::Sun));
        assert_eq!(scheduler.breaks().len(), 1);
    }

    #[test]
    fn stale_slot_ends_are_kept_as_stored() {
        let scheduler = Scheduler::try_from(doc(json!({
            "sessionDurationMinutes": 90,
            "maxSlotsPerDay": 3,
            "weekly": {"tue": [{"from": "09:00", "to": "09:30"}]}
        })))
        .unwrap();
        assert_eq!(scheduler.slots(DayKey::Tue)[0].end().to_string(), "09:30");
    }

    #[test]
    fn unknown_day_key_is_a_parse_error() {
        let err = Scheduler::try_from(doc(json!({
            "sessionDurationMinutes": 30,
            "maxSlotsPerDay": 3,
            "weekly": {"monday": []}
        })))
        .unwrap_err();
        assert_eq!(err, ScheduleError::Parse(ParseError::DayKey("monday".into())));
    }

    #[test]
    fn malformed_time_is_a_parse_error() {
        let err = Scheduler::try_from(doc(json!({
            "sessionDurationMinutes": 30,
            "maxSlotsPerDay": 3,
            "weekly": {"wed": [{"from": "9am", "to": "09:30"}]}
        })))
        .unwrap_err();
        assert_eq!(err, ScheduleError::Parse(ParseError::Time("9am".into())));
    }

    #[test]
    fn over_capacity_day_is_rejected() {
        let err = Scheduler::try_from(doc(json!({
            "sessionDurationMinutes": 30,
            "maxSlotsPerDay": 1,
            "weekly": {"thu": [
                {"from": "09:00", "to": "09:30"},
                {"from": "10:00", "to": "10:30"}
            ]}
        })))
        .unwrap_err();
        assert_eq!(
            err,
            ScheduleError::CapacityExceeded {
                day: DayKey::Thu,
                limit: 1
            }
        );
    }

    #[test]
    fn bad_break_dates_are_rejected() {
        let base = json!({"sessionDurationMinutes": 30, "maxSlotsPerDay": 2});
        let with_breaks = |breaks: serde_json::Value| {
            let mut v = base.clone();
            v["breakDates"] = breaks;
            Scheduler::try_from(doc(v))
        };

        assert!(matches!(
            with_breaks(json!([{"start": "2024-13-01", "end": "2024-13-01"}])),
            Err(ScheduleError::Parse(ParseError::Date(_)))
        ));
        assert!(matches!(
            with_breaks(json!([{"start": "2024-02-02", "end": "2024-02-01"}])),
            Err(ScheduleError::Parse(ParseError::BreakRange { .. }))
        ));
        assert!(matches!(
            with_breaks(json!([
                {"start": "2024-02-02", "end": "2024-02-02"},
                {"start": "2024-02-02", "end": "2024-02-02"}
            ])),
            Err(ScheduleError::DuplicateBreakDate(_))
        ));
    }

    #[test]
    fn document_roundtrip_preserves_snapshot() {
        let scheduler = Scheduler::default()
            .add_slot(DayKey::Mon)
            .unwrap()
            .copy_day_schedule(DayKey::Mon)
            .unwrap()
            .add_break_date(NaiveDate::from_ymd_opt(2024, 12, 25).unwrap())
            .unwrap();
        let document = SchedulerDocument::from(&scheduler);
        assert_eq!(document.weekly.len(), 7);
        assert_eq!(Scheduler::try_from(document).unwrap(), scheduler);
    }
}
