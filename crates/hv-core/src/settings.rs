//! Settings that decide which days a report covers.

use chrono::{DateTime, Utc, Weekday};
use chrono_tz::Tz;
use thiserror::Error;

use crate::range::{Period, Range};

/// Errors parsing report settings.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SettingsError {
    #[error("unknown time zone: {0}")]
    UnknownTimeZone(String),

    #[error("unknown start of week: {0}")]
    UnknownWeekday(String),
}

/// Immutable settings shared by every report call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportSettings {
    /// First day of the working week.
    pub start_of_week: Weekday,

    /// Zone used to decide what "today" is.
    pub time_zone: Tz,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            start_of_week: Weekday::Sun,
            time_zone: system_time_zone(),
        }
    }
}

impl ReportSettings {
    pub const fn new(start_of_week: Weekday, time_zone: Tz) -> Self {
        Self {
            start_of_week,
            time_zone,
        }
    }

    /// Builds settings from their textual configuration.
    ///
    /// Missing values fall back to the defaults.
    pub fn parse(
        start_of_week: Option<&str>,
        time_zone: Option<&str>,
    ) -> Result<Self, SettingsError> {
        let defaults = Self::default();
        let start_of_week = start_of_week
            .map(parse_weekday)
            .transpose()?
            .unwrap_or(defaults.start_of_week);
        let time_zone = time_zone
            .map(parse_time_zone)
            .transpose()?
            .unwrap_or(defaults.time_zone);
        Ok(Self::new(start_of_week, time_zone))
    }

    /// The range `period` covers at `now`.
    pub fn range(&self, period: Period, now: DateTime<Utc>) -> Range {
        Range::for_period(period, now, self.time_zone, self.start_of_week)
    }

    /// The current day in the configured zone.
    pub fn today(&self) -> Range {
        Range::today(self.time_zone)
    }
}

/// The system time zone, or UTC when it cannot be determined.
pub fn system_time_zone() -> Tz {
    iana_time_zone::get_timezone()
        .ok()
        .and_then(|name| name.parse().ok())
        .unwrap_or(Tz::UTC)
}

/// Parses an IANA zone name such as `Europe/Berlin`.
pub fn parse_time_zone(name: &str) -> Result<Tz, SettingsError> {
    name.trim()
        .parse()
        .map_err(|_| SettingsError::UnknownTimeZone(name.to_string()))
}

/// Parses a weekday name (`mon`, `Monday`) or a number where 0 is Sunday.
pub fn parse_weekday(value: &str) -> Result<Weekday, SettingsError> {
    let value = value.trim();
    if let Ok(number) = value.parse::<u8>() {
        return match number {
            0 => Ok(Weekday::Sun),
            1 => Ok(Weekday::Mon),
            2 => Ok(Weekday::Tue),
            3 => Ok(Weekday::Wed),
            4 => Ok(Weekday::Thu),
            5 => Ok(Weekday::Fri),
            6 => Ok(Weekday::Sat),
            _ => Err(SettingsError::UnknownWeekday(value.to_string())),
        };
    }
    value
        .parse()
        .map_err(|_| SettingsError::UnknownWeekday(value.to_string()))
}
