//! Recurrence window - the `[week_start, week_end]` span a run fills in.
//!
//! The window is interpreted at calendar-date granularity in the reference
//! timezone: every local date from the date of `start` through the date of
//! `end` is eligible, both ends inclusive. A session at 09:00 on the first
//! day is generated even when `start` itself is 12:00 that day.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc, Weekday};

use super::errors::SchedulingError;
use super::time::ReferenceTimezone;

/// Longest window a single run may expand.
pub const MAX_WINDOW_DAYS: i64 = 31;

/// Validated recurrence window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    first_day: NaiveDate,
    last_day: NaiveDate,
}

impl WeekWindow {
    /// Builds a window from two instants.
    ///
    /// # Errors
    ///
    /// - `InvalidWindow` if `end` precedes `start`
    /// - `InvalidWindow` if the window covers more than [`MAX_WINDOW_DAYS`] local dates
    pub fn new(
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        timezone: &ReferenceTimezone,
    ) -> Result<Self, SchedulingError> {
        if end < start {
            return Err(SchedulingError::invalid_window(format!(
                "window end {} precedes start {}",
                end.to_rfc3339(),
                start.to_rfc3339()
            )));
        }

        let first_day = timezone.local_date(&start);
        let last_day = timezone.local_date(&end);
        let span = (last_day - first_day).num_days() + 1;
        if span > MAX_WINDOW_DAYS {
            return Err(SchedulingError::invalid_window(format!(
                "window spans {} days, at most {} allowed",
                span, MAX_WINDOW_DAYS
            )));
        }

        Ok(Self {
            start,
            end,
            first_day,
            last_day,
        })
    }

    /// The local week (`week_start` 00:00 through six days later 23:59:59)
    /// that contains `date`.
    pub fn week_of(
        date: NaiveDate,
        week_start: Weekday,
        timezone: &ReferenceTimezone,
    ) -> Result<Self, SchedulingError> {
        let offset = (7 + date.weekday().num_days_from_monday()
            - week_start.num_days_from_monday())
            % 7;
        let first = date - Duration::days(i64::from(offset));
        let last = first + Duration::days(6);

        let start = timezone.start_of_day(first)?;
        let end = timezone.end_of_day(last)?;
        Self::new(start, end, timezone)
    }

    /// The local week containing `now`.
    pub fn containing(
        now: DateTime<Utc>,
        week_start: Weekday,
        timezone: &ReferenceTimezone,
    ) -> Result<Self, SchedulingError> {
        Self::week_of(timezone.local_date(&now), week_start, timezone)
    }

    /// The local week after the one containing `now`.
    pub fn following(
        now: DateTime<Utc>,
        week_start: Weekday,
        timezone: &ReferenceTimezone,
    ) -> Result<Self, SchedulingError> {
        Self::week_of(
            timezone.local_date(&now) + Duration::days(7),
            week_start,
            timezone,
        )
    }

    pub fn start(&self) -> &DateTime<Utc> {
        &self.start
    }

    pub fn end(&self) -> &DateTime<Utc> {
        &self.end
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first_day
    }

    pub fn last_day(&self) -> NaiveDate {
        self.last_day
    }

    /// Number of local dates covered.
    pub fn num_days(&self) -> i64 {
        (self.last_day - self.first_day).num_days() + 1
    }

    /// Local dates of the window in order, both ends included.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let last = self.last_day;
        self.first_day.iter_days().take_while(move |day| *day <= last)
    }

    /// Pulls a matched day back inside the window by a single week.
    ///
    /// Days before the first date move forward seven days, days after the
    /// last date move back seven days. Only one correction is applied, so a
    /// day more than a week out stays outside.
    pub fn clamp(&self, day: NaiveDate) -> NaiveDate {
        if day < self.first_day {
            day + Duration::days(7)
        } else if day > self.last_day {
            day - Duration::days(7)
        } else {
            day
        }
    }
}
