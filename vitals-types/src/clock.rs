//! Wall-clock times and sleep duration math.
//!
//! Sleep is recorded as two `HH:MM` readings with no date attached, so the
//! elapsed time is computed on a notional single day with midnight
//! rollover.

use core::fmt;
use core::str::FromStr;

const MINUTES_PER_DAY: u32 = 24 * 60;

/// A time of day with minute precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime {
    hour: u8,
    minute: u8,
}

impl ClockTime {
    /// Create a clock time, or `None` if out of range.
    pub fn new(hour: u8, minute: u8) -> Option<Self> {
        (hour < 24 && minute < 60).then_some(Self { hour, minute })
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    /// Minutes since midnight.
    pub fn minutes_since_midnight(&self) -> u32 {
        u32::from(self.hour) * 60 + u32::from(self.minute)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// Error returned for anything that is not a valid `HH:MM`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseClockTimeError(String);

impl fmt::Display for ParseClockTimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid clock time (expected HH:MM): {}", self.0)
    }
}

impl std::error::Error for ParseClockTimeError {}

impl FromStr for ClockTime {
    type Err = ParseClockTimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let err = || ParseClockTimeError(s.to_string());

        let (h, m) = s.split_once(':').ok_or_else(err)?;
        let digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if h.is_empty() || h.len() > 2 || m.len() != 2 || !digits(h) || !digits(m) {
            return Err(err());
        }
        let hour: u8 = h.parse().map_err(|_| err())?;
        let minute: u8 = m.parse().map_err(|_| err())?;

        ClockTime::new(hour, minute).ok_or_else(err)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for ClockTime {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for ClockTime {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Elapsed time between falling asleep and waking up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SleepDuration {
    pub hours: u32,
    pub minutes: u32,
    /// Same span as a fractional number of hours.
    pub total_hours: f64,
}

impl SleepDuration {
    fn from_minutes(total: u32) -> Self {
        Self {
            hours: total / 60,
            minutes: total % 60,
            total_hours: f64::from(total) / 60.0,
        }
    }

    /// Total span in minutes.
    pub fn total_minutes(&self) -> u32 {
        self.hours * 60 + self.minutes
    }
}

impl fmt::Display for SleepDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}h {:02}m", self.hours, self.minutes)
    }
}

/// Compute how long a sleep lasted.
///
/// Returns `None` if either reading is missing. When `end <= start` the
/// interval is taken to cross midnight, so `end == start` counts as a full
/// 24 hours rather than zero.
pub fn sleep_duration(start: Option<ClockTime>, end: Option<ClockTime>) -> Option<SleepDuration> {
    let start = start?.minutes_since_midnight();
    let mut end = end?.minutes_since_midnight();

    if end <= start {
        end += MINUTES_PER_DAY;
    }

    Some(SleepDuration::from_minutes(end - start))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> Option<ClockTime> {
        Some(s.parse().unwrap())
    }

    #[test]
    fn overnight_rolls_over_midnight() {
        let d = sleep_duration(t("23:00"), t("06:00")).unwrap();
        assert_eq!(d.hours, 7);
        assert_eq!(d.minutes, 0);
        assert!((d.total_hours - 7.0).abs() < f64::EPSILON);
    }

    #[test]
    fn same_day_span() {
        let d = sleep_duration(t("06:00"), t("23:00")).unwrap();
        assert_eq!(d.hours, 17);
        assert_eq!(d.total_minutes(), 17 * 60);
    }

    #[test]
    fn missing_reading_yields_none() {
        assert!(sleep_duration(None, t("06:00")).is_none());
        assert!(sleep_duration(t("23:00"), None).is_none());
        assert!(sleep_duration(None, None).is_none());
    }

    #[test]
    fn equal_readings_are_a_full_day() {
        let d = sleep_duration(t("07:00"), t("07:00")).unwrap();
        assert_eq!(d.hours, 24);
        assert_eq!(d.minutes, 0);
    }

    #[test]
    fn fractional_hours() {
        let d = sleep_duration(t("23:45"), t("07:15")).unwrap();
        assert_eq!((d.hours, d.minutes), (7, 30));
        assert!((d.total_hours - 7.5).abs() < 1e-9);
        assert_eq!(d.to_string(), "7h 30m");
    }

    #[test]
    fn parse_clock_time() {
        assert_eq!(ClockTime::new(7, 5), t("07:05"));
        assert_eq!(ClockTime::new(7, 5), t("7:05"));
        assert_eq!(t("23:59").unwrap().to_string(), "23:59");
    }

    #[test]
    fn reject_malformed_clock_time() {
        let malformed = [
            "24:00", "12:60", "1200", "12:5", ":30", "ab:cd", "", "123:00", "+7:05", "07:+5",
            "-1:00",
        ];
        for bad in malformed {
            assert!(bad.parse::<ClockTime>().is_err(), "accepted {bad:?}");
        }
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_as_string() {
        let time = ClockTime::new(6, 30).unwrap();
        assert_eq!(serde_json::to_string(&time).unwrap(), "\"06:30\"");
        let parsed: ClockTime = serde_json::from_str("\"22:15\"").unwrap();
        assert_eq!(parsed, ClockTime::new(22, 15).unwrap());
        assert!(serde_json::from_str::<ClockTime>("\"25:00\"").is_err());
    }
}
