//! Calendar date ranges passed to the time entry endpoints.

use std::fmt;

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc, Weekday};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors building a [`Range`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RangeError {
    /// The start date falls after the end date.
    #[error("range start {from} is after range end {to}")]
    Inverted { from: NaiveDate, to: NaiveDate },
}

/// Named reporting periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Period {
    Today,
    ThisWeek,
    LastWeek,
    ThisMonth,
    LastMonth,
}

/// Inclusive range of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Range {
    from: NaiveDate,
    to: NaiveDate,
}

impl Range {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Result<Self, RangeError> {
        if from > to {
            return Err(RangeError::Inverted { from, to });
        }
        Ok(Self { from, to })
    }

    /// A range covering a single day.
    pub const fn day(date: NaiveDate) -> Self {
        Self {
            from: date,
            to: date,
        }
    }

    pub const fn from(&self) -> NaiveDate {
        self.from
    }

    pub const fn to(&self) -> NaiveDate {
        self.to
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from <= date && date <= self.to
    }

    /// The current calendar day in `tz`.
    pub fn today(tz: Tz) -> Self {
        Self::today_at(Utc::now(), tz)
    }

    pub fn today_at(now: DateTime<Utc>, tz: Tz) -> Self {
        Self::day(local_date(now, tz))
    }

    /// The seven days of the current week, starting on `start_of_week`.
    pub fn this_week_at(now: DateTime<Utc>, tz: Tz, start_of_week: Weekday) -> Self {
        let today = local_date(now, tz);
        let offset = (7 + today.weekday().num_days_from_monday()
            - start_of_week.num_days_from_monday())
            % 7;
        let from = today - Duration::days(i64::from(offset));
        Self {
            from,
            to: from + Duration::days(6),
        }
    }

    pub fn last_week_at(now: DateTime<Utc>, tz: Tz, start_of_week: Weekday) -> Self {
        let this_week = Self::this_week_at(now, tz, start_of_week);
        Self {
            from: this_week.from - Duration::days(7),
            to: this_week.from - Duration::days(1),
        }
    }

    pub fn this_month_at(now: DateTime<Utc>, tz: Tz) -> Self {
        month_of(local_date(now, tz))
    }

    pub fn last_month_at(now: DateTime<Utc>, tz: Tz) -> Self {
        let first = first_of_month(local_date(now, tz));
        month_of(first - Duration::days(1))
    }

    /// The range a named period covers at `now`.
    pub fn for_period(
        period: Period,
        now: DateTime<Utc>,
        tz: Tz,
        start_of_week: Weekday,
    ) -> Self {
        match period {
            Period::Today => Self::today_at(now, tz),
            Period::ThisWeek => Self::this_week_at(now, tz, start_of_week),
            Period::LastWeek => Self::last_week_at(now, tz, start_of_week),
            Period::ThisMonth => Self::this_month_at(now, tz),
            Period::LastMonth => Self::last_month_at(now, tz),
        }
    }

    /// Query string understood by the entries endpoints.
    pub fn query(&self) -> String {
        format!(
            "from={}&to={}",
            self.from.format("%Y%m%d"),
            self.to.format("%Y%m%d")
        )
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.from == self.to {
            write!(f, "{}", self.from)
        } else {
            write!(f, "{}..{}", self.from, self.to)
        }
    }
}

fn local_date(now: DateTime<Utc>, tz: Tz) -> NaiveDate {
    now.with_timezone(&tz).date_naive()
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.day0()))
}

fn month_of(date: NaiveDate) -> Range {
    let first = first_of_month(date);
    // Day 32 always lands in the following month.
    let next_first = first_of_month(first + Duration::days(32));
    Range {
        from: first,
        to: next_first - Duration::days(1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn today_depends_on_zone() {
        let now = at("2025-01-29T03:30:00Z");
        assert_eq!(Range::today_at(now, Tz::UTC), Range::day(date(2025, 1, 29)));
        assert_eq!(
            Range::today_at(now, chrono_tz::America::New_York),
            Range::day(date(2025, 1, 28))
        );
    }

    #[test]
    fn week_honours_start_day() {
        // Wednesday
        let now = at("2025-01-29T12:00:00Z");

        let sunday = Range::this_week_at(now, Tz::UTC, Weekday::Sun);
        assert_eq!((sunday.from(), sunday.to()), (date(2025, 1, 26), date(2025, 2, 1)));

        let monday = Range::this_week_at(now, Tz::UTC, Weekday::Mon);
        assert_eq!((monday.from(), monday.to()), (date(2025, 1, 27), date(2025, 2, 2)));

        let wednesday = Range::this_week_at(now, Tz::UTC, Weekday::Wed);
        assert_eq!(wednesday.from(), date(2025, 1, 29));
    }

    #[test]
    fn last_week_ends_before_this_week() {
        let now = at("2025-01-29T12:00:00Z");
        let last = Range::last_week_at(now, Tz::UTC, Weekday::Mon);
        assert_eq!((last.from(), last.to()), (date(2025, 1, 20), date(2025, 1, 26)));
    }

    #[test]
    fn months_cover_whole_calendar_month() {
        let now = at("2024-03-15T12:00:00Z");
        let this = Range::this_month_at(now, Tz::UTC);
        assert_eq!((this.from(), this.to()), (date(2024, 3, 1), date(2024, 3, 31)));

        let last = Range::last_month_at(now, Tz::UTC);
        assert_eq!((last.from(), last.to()), (date(2024, 2, 1), date(2024, 2, 29)));
    }

    #[test]
    fn last_month_wraps_year() {
        let last = Range::last_month_at(at("2025-01-10T00:00:00Z"), Tz::UTC);
        assert_eq!((last.from(), last.to()), (date(2024, 12, 1), date(2024, 12, 31)));
    }

    #[test]
    fn query_uses_compact_dates() {
        let range = Range::new(date(2025, 1, 1), date(2025, 1, 31)).unwrap();
        assert_eq!(range.query(), "from=20250101&to=20250131");
        assert!(range.contains(date(2025, 1, 15)));
        assert!(!range.contains(date(2025, 2, 1)));
    }

    #[test]
    fn inverted_range_is_rejected() {
        let err = Range::new(date(2025, 2, 1), date(2025, 1, 1)).unwrap_err();
        assert!(matches!(err, RangeError::Inverted { .. }));
    }
}
