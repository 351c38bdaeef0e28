//! Wall-clock time arithmetic.
//!
//! Times of day carry no date and no zone. They are stored as minutes since
//! midnight and written as zero-padded `HH:MM`. Arithmetic wraps at midnight
//! without any overnight marker: `23:30 + 60` is simply `00:30`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// Minutes in one day.
pub const MINUTES_PER_DAY: u32 = 1440;

/// A time of day in `[00:00, 23:59]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    /// Build from any minute count, wrapping modulo one day.
    pub fn from_minutes(minutes: i64) -> Self {
        let wrapped = minutes.rem_euclid(MINUTES_PER_DAY as i64);
        TimeOfDay(wrapped as u16)
    }

    /// Const constructor for fixed times. Out-of-range parts wrap.
    pub const fn from_hm_const(hour: u16, minute: u16) -> Self {
        TimeOfDay((hour % 24) * 60 + minute % 60)
    }

    /// Build from hour and minute, rejecting out-of-range parts.
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        if hour > 23 || minute > 59 {
            return None;
        }
        Some(TimeOfDay((hour * 60 + minute) as u16))
    }

    pub fn minutes(self) -> u32 {
        self.0 as u32
    }

    pub fn hour(self) -> u32 {
        self.minutes() / 60
    }

    pub fn minute(self) -> u32 {
        self.minutes() % 60
    }

    /// Add a duration, wrapping silently past midnight.
    pub fn add_minutes(self, minutes: u32) -> Self {
        Self::from_minutes(self.minutes() as i64 + minutes as i64)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for TimeOfDay {
    type Err = ParseError;

    /// Accepts `H:MM` or `HH:MM`. Minutes must be two digits.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseError::Time(s.to_string());
        let (h, m) = s.split_once(':').ok_or_else(invalid)?;

        let digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
        if !digits(h) || h.len() > 2 || !digits(m) || m.len() != 2 {
            return Err(invalid());
        }

        let hour: u32 = h.parse().map_err(|_| invalid())?;
        let minute: u32 = m.parse().map_err(|_| invalid())?;
        TimeOfDay::from_hm(hour, minute).ok_or_else(invalid)
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeOfDay> for String {
    fn from(value: TimeOfDay) -> Self {
        value.to_string()
    }
}

/// Parse `HH:MM` into minutes since midnight.
pub fn to_minutes(hhmm: &str) -> Result<u32, ParseError> {
    hhmm.parse::<TimeOfDay>().map(TimeOfDay::minutes)
}

/// Format a minute count as `HH:MM`, taking it modulo one day first.
pub fn from_minutes(minutes: i64) -> String {
    TimeOfDay::from_minutes(minutes).to_string()
}

/// End time of a window starting at `start` and lasting `duration_minutes`.
pub fn add_duration(start: &str, duration_minutes: u32) -> Result<String, ParseError> {
    let start: TimeOfDay = start.parse()?;
    Ok(start.add_minutes(duration_minutes).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parses_zero_padded_times() {
        assert_eq!(to_minutes("00:00").unwrap(), 0);
        assert_eq!(to_minutes("09:30").unwrap(), 570);
        assert_eq!(to_minutes("23:59").unwrap(), 1439);
    }

    #[test]
    fn accepts_single_digit_hour() {
        assert_eq!(to_minutes("9:05").unwrap(), 545);
    }

    #[test]
    fn rejects_malformed_times() {
        for bad in ["", "9", "24:00", "12:60", "ab:cd", "12:5", "12:345", "-1:00", " 9:00", "123:00"] {
            assert_eq!(
                to_minutes(bad),
                Err(ParseError::Time(bad.to_string())),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn formats_with_padding() {
        assert_eq!(from_minutes(0), "00:00");
        assert_eq!(from_minutes(545), "09:05");
        assert_eq!(from_minutes(1439), "23:59");
    }

    #[test]
    fn from_minutes_wraps_both_directions() {
        assert_eq!(from_minutes(1440), "00:00");
        assert_eq!(from_minutes(1500), "01:00");
        assert_eq!(from_minutes(-30), "23:30");
    }

    #[test]
    fn add_duration_same_day() {
        assert_eq!(add_duration("09:00", 30).unwrap(), "09:30");
        assert_eq!(add_duration("14:00", 60).unwrap(), "15:00");
        assert_eq!(add_duration("10:45", 90).unwrap(), "12:15");
    }

    #[test]
    fn add_duration_wraps_past_midnight() {
        assert_eq!(add_duration("23:30", 60).unwrap(), "00:30");
        assert_eq!(add_duration("23:30", 30).unwrap(), "00:00");
    }

    #[test]
    fn add_duration_propagates_parse_error() {
        assert!(add_duration("9am", 30).is_err());
    }

    #[test]
    fn serde_uses_hhmm_strings() {
        let t = TimeOfDay::from_hm(7, 5).unwrap();
        assert_eq!(serde_json::to_string(&t).unwrap(), "\"07:05\"");
        let back: TimeOfDay = serde_json::from_str("\"18:40\"").unwrap();
        assert_eq!(back.minutes(), 18 * 60 + 40);
        assert!(serde_json::from_str::<TimeOfDay>("\"25:00\"").is_err());
    }

    proptest! {
        #[test]
        fn add_duration_is_consistent(start in 0u32..1440, d in 0u32..10_000) {
            let start_str = from_minutes(start as i64);
            let end = add_duration(&start_str, d).unwrap();
            prop_assert_eq!(to_minutes(&end).unwrap(), (start + d) % MINUTES_PER_DAY);
        }

        #[test]
        fn display_parse_roundtrip(m in 0u32..1440) {
            let t = TimeOfDay::from_minutes(m as i64);
            prop_assert_eq!(t.to_string().parse::<TimeOfDay>().unwrap(), t);
        }
    }
}
