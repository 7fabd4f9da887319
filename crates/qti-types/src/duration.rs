//! QTI duration values
//!
//! Durations are read from and written to ISO 8601 duration strings
//! (`P1Y2M3DT4H5M6.5S`). Overflowing time components are carried over on
//! construction (`PT90S` becomes `PT1M30S`), and two durations compare by
//! their absolute length, counting a year as 365 days and a month as 30 days.

use chrono::TimeDelta;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use crate::error::ValueError;

const MICROS_PER_SECOND: i128 = 1_000_000;
const SECONDS_PER_MINUTE: i128 = 60;
const SECONDS_PER_HOUR: i128 = 3_600;
const SECONDS_PER_DAY: i128 = 86_400;
const SECONDS_PER_MONTH: i128 = 30 * SECONDS_PER_DAY;
const SECONDS_PER_YEAR: i128 = 365 * SECONDS_PER_DAY;

static DURATION_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(-)?P(?:(\d+)Y)?(?:(\d+)M)?(?:(\d+)W)?(?:(\d+)D)?(?:T(?:(\d+)H)?(?:(\d+)M)?(?:(\d+)(?:[.,](\d+))?S)?)?$",
    )
    .expect("duration grammar is a valid regex")
});

/// A QTI duration
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct QtiDuration {
    negative: bool,
    years: u32,
    months: u32,
    days: u32,
    hours: u32,
    minutes: u32,
    seconds: u32,
    microseconds: u32,
}

impl QtiDuration {
    /// The zero-length duration
    pub const ZERO: QtiDuration = QtiDuration {
        negative: false,
        years: 0,
        months: 0,
        days: 0,
        hours: 0,
        minutes: 0,
        seconds: 0,
        microseconds: 0,
    };

    /// Parse an ISO 8601 duration string
    pub fn parse(iso: &str) -> Result<Self, ValueError> {
        let invalid = || ValueError::InvalidDuration(iso.to_string());

        let caps = DURATION_PATTERN.captures(iso).ok_or_else(invalid)?;
        // "P" and "PT" alone carry no component
        if caps.iter().skip(2).all(|c| c.is_none()) || iso.ends_with('T') {
            return Err(invalid());
        }

        let component = |index: usize| -> Result<u32, ValueError> {
            caps.get(index)
                .map(|m| m.as_str().parse::<u32>().map_err(|_| invalid()))
                .transpose()
                .map(|v| v.unwrap_or(0))
        };

        let weeks = component(4)?;
        let days = component(5)?
            .checked_add(weeks.checked_mul(7).ok_or_else(invalid)?)
            .ok_or_else(invalid)?;

        let microseconds = match caps.get(9) {
            Some(fraction) => {
                let digits: String = fraction.as_str().chars().take(6).collect();
                format!("{digits:0<6}").parse::<u32>().map_err(|_| invalid())?
            }
            None => 0,
        };

        Ok(Self {
            negative: caps.get(1).is_some(),
            years: component(2)?,
            months: component(3)?,
            days,
            hours: component(6)?,
            minutes: component(7)?,
            seconds: component(8)?,
            microseconds,
        }
        .normalized())
    }

    /// Build a duration from seconds
    pub fn from_seconds(seconds: i64) -> Self {
        Self {
            negative: seconds < 0,
            seconds: u32::try_from(seconds.unsigned_abs()).unwrap_or(u32::MAX),
            ..Self::ZERO
        }
        .normalized()
    }

    /// Build a duration from a chrono time delta
    pub fn from_time_delta(delta: TimeDelta) -> Self {
        let micros = delta.num_microseconds().unwrap_or(i64::MAX);
        let abs = micros.unsigned_abs();
        Self {
            negative: micros < 0,
            seconds: u32::try_from(abs / 1_000_000).unwrap_or(u32::MAX),
            microseconds: (abs % 1_000_000) as u32,
            ..Self::ZERO
        }
        .normalized()
    }

    /// Convert to a chrono time delta, if representable
    pub fn to_time_delta(&self) -> Option<TimeDelta> {
        i64::try_from(self.total_microseconds())
            .ok()
            .map(TimeDelta::microseconds)
    }

    fn normalized(mut self) -> Self {
        self.seconds += self.microseconds / 1_000_000;
        self.microseconds %= 1_000_000;

        let carry = |value: &mut u32, unit: u32| -> u32 {
            let over = *value / unit;
            *value %= unit;
            over
        };

        let minutes = carry(&mut self.seconds, 60);
        self.minutes = self.minutes.saturating_add(minutes);
        let hours = carry(&mut self.minutes, 60);
        self.hours = self.hours.saturating_add(hours);
        let days = carry(&mut self.hours, 24);
        self.days = self.days.saturating_add(days);
        let years = carry(&mut self.months, 12);
        self.years = self.years.saturating_add(years);

        if self.total_microseconds() == 0 {
            self.negative = false;
        }
        self
    }

    /// Absolute length in microseconds, signed
    pub fn total_microseconds(&self) -> i128 {
        let seconds = self.years as i128 * SECONDS_PER_YEAR
            + self.months as i128 * SECONDS_PER_MONTH
            + self.days as i128 * SECONDS_PER_DAY
            + self.hours as i128 * SECONDS_PER_HOUR
            + self.minutes as i128 * SECONDS_PER_MINUTE
            + self.seconds as i128;
        let total = seconds * MICROS_PER_SECOND + self.microseconds as i128;
        if self.negative { -total } else { total }
    }

    /// Absolute length in whole seconds, signed
    pub fn total_seconds(&self) -> i128 {
        self.total_microseconds() / MICROS_PER_SECOND
    }

    pub fn is_negative(&self) -> bool {
        self.negative
    }

    pub fn years(&self) -> u32 {
        self.years
    }

    pub fn months(&self) -> u32 {
        self.months
    }

    pub fn days(&self) -> u32 {
        self.days
    }

    pub fn hours(&self) -> u32 {
        self.hours
    }

    pub fn minutes(&self) -> u32 {
        self.minutes
    }

    pub fn seconds(&self) -> u32 {
        self.seconds
    }

    pub fn microseconds(&self) -> u32 {
        self.microseconds
    }
}

impl PartialEq for QtiDuration {
    fn eq(&self, other: &Self) -> bool {
        self.total_microseconds() == other.total_microseconds()
    }
}

impl Eq for QtiDuration {}

impl Hash for QtiDuration {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.total_microseconds().hash(state);
    }
}

impl PartialOrd for QtiDuration {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QtiDuration {
    fn cmp(&self, other: &Self) -> Ordering {
        self.total_microseconds().cmp(&other.total_microseconds())
    }
}

impl fmt::Display for QtiDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.total_microseconds() == 0 {
            return f.write_str("PT0S");
        }
        if self.negative {
            f.write_str("-")?;
        }
        f.write_str("P")?;
        if self.years > 0 {
            write!(f, "{}Y", self.years)?;
        }
        if self.months > 0 {
            write!(f, "{}M", self.months)?;
        }
        if self.days > 0 {
            write!(f, "{}D", self.days)?;
        }
        if self.hours > 0 || self.minutes > 0 || self.seconds > 0 || self.microseconds > 0 {
            f.write_str("T")?;
            if self.hours > 0 {
                write!(f, "{}H", self.hours)?;
            }
            if self.minutes > 0 {
                write!(f, "{}M", self.minutes)?;
            }
            if self.microseconds > 0 {
                let fraction = format!("{:06}", self.microseconds);
                write!(f, "{}.{}S", self.seconds, fraction.trim_end_matches('0'))?;
            } else if self.seconds > 0 {
                write!(f, "{}S", self.seconds)?;
            }
        }
        Ok(())
    }
}

impl FromStr for QtiDuration {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<QtiDuration> for String {
    fn from(duration: QtiDuration) -> Self {
        duration.to_string()
    }
}

impl TryFrom<String> for QtiDuration {
    type Error = ValueError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("P1D", "P1D")]
    #[case("PT90S", "PT1M30S")]
    #[case("PT3600S", "PT1H")]
    #[case("P14M", "P1Y2M")]
    #[case("P2W", "P14D")]
    #[case("PT1.5S", "PT1.5S")]
    #[case("PT0.25S", "PT0.25S")]
    #[case("PT0S", "PT0S")]
    #[case("-P1DT2H", "-P1DT2H")]
    #[case("P1Y2M3DT4H5M6S", "P1Y2M3DT4H5M6S")]
    fn test_parse_and_display(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(QtiDuration::parse(input).unwrap().to_string(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("P")]
    #[case("PT")]
    #[case("P1DT")]
    #[case("1D")]
    #[case("P1H")]
    #[case("PT1.S")]
    fn test_parse_invalid(#[case] input: &str) {
        assert!(matches!(QtiDuration::parse(input), Err(ValueError::InvalidDuration(_))));
    }

    #[test]
    fn test_equality_is_by_length() {
        assert_eq!(QtiDuration::parse("PT60S").unwrap(), QtiDuration::parse("PT1M").unwrap());
        assert_eq!(QtiDuration::parse("P1Y").unwrap(), QtiDuration::parse("P365D").unwrap());
        assert_eq!(QtiDuration::parse("P1M").unwrap(), QtiDuration::parse("P30D").unwrap());
        assert_ne!(QtiDuration::parse("P1D").unwrap(), QtiDuration::parse("P2D").unwrap());
        assert_eq!(QtiDuration::parse("-PT0S").unwrap(), QtiDuration::ZERO);
    }

    #[test]
    fn test_ordering() {
        let short = QtiDuration::parse("PT59M").unwrap();
        let long = QtiDuration::parse("PT1H").unwrap();
        let negative = QtiDuration::parse("-PT1H").unwrap();
        assert!(short < long);
        assert!(negative < short);
    }

    #[test]
    fn test_time_delta_conversion() {
        let duration = QtiDuration::from_time_delta(TimeDelta::seconds(3_725));
        assert_eq!(duration.to_string(), "PT1H2M5S");
        assert_eq!(duration.to_time_delta(), Some(TimeDelta::seconds(3_725)));
        assert_eq!(QtiDuration::from_seconds(-30).to_string(), "-PT30S");
    }

    #[test]
    fn test_serde_uses_iso_string() {
        let duration = QtiDuration::parse("P1DT1S").unwrap();
        let json = serde_json::to_string(&duration).unwrap();
        assert_eq!(json, "\"P1DT1S\"");
        let back: QtiDuration = serde_json::from_str(&json).unwrap();
        assert_eq!(back, duration);
    }
}
