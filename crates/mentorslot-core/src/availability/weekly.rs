use serde::ser::{Serialize, SerializeMap, Serializer};

use super::day::DayKey;
use super::slot::Slot;
use crate::error::ScheduleError;

/// Recurring per-day slot lists.
///
/// A day with no slots is unavailable; there is no separate on/off flag.
/// Slots keep insertion order and overlapping windows are not rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeeklySchedule {
    days: [Vec<Slot>; 7],
}

impl WeeklySchedule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn slots(&self, day: DayKey) -> &[Slot] {
        &self.days[day.index()]
    }

    pub fn is_available(&self, day: DayKey) -> bool {
        !self.days[day.index()].is_empty()
    }

    /// Days in Monday-first order with their slots.
    pub fn iter(&self) -> impl Iterator<Item = (DayKey, &[Slot])> {
        DayKey::ALL.into_iter().map(move |day| (day, self.slots(day)))
    }

    /// Largest slot count over all days.
    pub fn busiest_day(&self) -> Option<(DayKey, usize)> {
        self.iter()
            .map(|(day, slots)| (day, slots.len()))
            .max_by_key(|&(_, len)| len)
    }

    pub fn total_slots(&self) -> usize {
        self.days.iter().map(Vec::len).sum()
    }

    /// Append a slot unless the day already holds `limit` slots.
    pub(crate) fn push(&mut self, day: DayKey, slot: Slot, limit: u8) -> Result<(), ScheduleError> {
        let list = &mut self.days[day.index()];
        if list.len() >= limit as usize {
            return Err(ScheduleError::CapacityExceeded { day, limit });
        }
        list.push(slot);
        Ok(())
    }

    pub(crate) fn replace(&mut self, day: DayKey, index: usize, slot: Slot) -> Result<(), ScheduleError> {
        let list = &mut self.days[day.index()];
        let len = list.len();
        let existing = list
            .get_mut(index)
            .ok_or_else(|| out_of_range(day, index, len))?;
        *existing = slot;
        Ok(())
    }

    pub(crate) fn remove(&mut self, day: DayKey, index: usize) -> Result<Slot, ScheduleError> {
        let list = &mut self.days[day.index()];
        if index >= list.len() {
            return Err(out_of_range(day, index, list.len()));
        }
        Ok(list.remove(index))
    }

    pub(crate) fn clear(&mut self, day: DayKey) {
        self.days[day.index()].clear();
    }

    /// Give every other day its own copy of `source`'s slots.
    pub(crate) fn copy_to_all(&mut self, source: DayKey) {
        let template = self.days[source.index()].clone();
        for day in DayKey::ALL {
            if day != source {
                self.days[day.index()] = template.clone();
            }
        }
    }

    /// Install a stored list wholesale; the caller checks capacity.
    pub(crate) fn set_slots(&mut self, day: DayKey, slots: Vec<Slot>) {
        self.days[day.index()] = slots;
    }
}

fn out_of_range(day: DayKey, index: usize, len: usize) -> ScheduleError {
    ScheduleError::IndexOutOfRange {
        collection: format!("{day} slot"),
        index,
        len,
    }
}

impl Serialize for WeeklySchedule {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(DayKey::ALL.len()))?;
        for (day, slots) in self.iter() {
            map.serialize_entry(day.as_str(), slots)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::availability::config::SessionDuration;
    use crate::time::TimeOfDay;

    fn slot(start: &str) -> Slot {
        Slot::starting_at(start.parse::<TimeOfDay>().unwrap(), SessionDuration::Thirty)
    }

    #[test]
    fn push_respects_limit() {
        let mut week = WeeklySchedule::new();
        week.push(DayKey::Mon, slot("09:00"), 2).unwrap();
        week.push(DayKey::Mon, slot("10:00"), 2).unwrap();
        let err = week.push(DayKey::Mon, slot("11:00"), 2).unwrap_err();
        assert_eq!(
            err,
            ScheduleError::CapacityExceeded {
                day: DayKey::Mon,
                limit: 2
            }
        );
        assert_eq!(week.slots(DayKey::Mon).len(), 2);
    }

    #[test]
    fn remove_out_of_range() {
        let mut week = WeeklySchedule::new();
        week.push(DayKey::Wed, slot("09:00"), 5).unwrap();
        let err = week.remove(DayKey::Wed, 3).unwrap_err();
        assert!(matches!(
            err,
            ScheduleError::IndexOutOfRange { index: 3, len: 1, .. }
        ));
    }

    #[test]
    fn copy_is_independent() {
        let mut week = WeeklySchedule::new();
        week.push(DayKey::Tue, slot("08:00"), 5).unwrap();
        week.copy_to_all(DayKey::Tue);
        week.clear(DayKey::Fri);
        assert_eq!(week.slots(DayKey::Tue).len(), 1);
        assert_eq!(week.slots(DayKey::Sun), week.slots(DayKey::Tue));
        assert!(!week.is_available(DayKey::Fri));
    }

    #[test]
    fn serializes_all_days_in_order() {
        let mut week = WeeklySchedule::new();
        week.push(DayKey::Sat, slot("12:00"), 5).unwrap();
        let json = serde_json::to_string(&week).unwrap();
        assert_eq!(
            json,
            r#"{"mon":[],"tue":[],"wed":[],"thu":[],"fri":[],"sat":[{"from":"12:00","to":"12:30"}],"sun":[]}"#
        );
    }

    #[test]
    fn busiest_day() {
        let mut week = WeeklySchedule::new();
        assert_eq!(week.busiest_day().map(|(_, len)| len), Some(0));
        week.push(DayKey::Thu, slot("09:00"), 5).unwrap();
        week.push(DayKey::Thu, slot("10:00"), 5).unwrap();
        week.push(DayKey::Mon, slot("10:00"), 5).unwrap();
        assert_eq!(week.busiest_day(), Some((DayKey::Thu, 2)));
        assert_eq!(week.total_slots(), 3);
    }
}
