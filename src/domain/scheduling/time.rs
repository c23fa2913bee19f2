//! Wall-clock helpers for the reference timezone.
//!
//! Availability slots are stored as naive weekday/time pairs ("Wednesday",
//! "15:00") that only make sense in one fixed IANA zone. Everything here turns
//! those into absolute UTC instants using the offset in effect on the specific
//! calendar date, so a slot keeps its local time across DST transitions.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc, Weekday};
use chrono_tz::Tz;

use super::errors::TimeError;

/// IANA zone used when none is configured.
pub const DEFAULT_REFERENCE_TIMEZONE: &str = "America/New_York";

/// Format of the timestamp part of a session key (minute precision).
const KEY_STAMP_FORMAT: &str = "%Y-%m-%d-%H:%M";

/// The fixed zone all availability times are interpreted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceTimezone(Tz);

impl ReferenceTimezone {
    pub fn new(tz: Tz) -> Self {
        Self(tz)
    }

    pub fn tz(&self) -> Tz {
        self.0
    }

    /// IANA name, e.g. `America/New_York`.
    pub fn name(&self) -> &'static str {
        self.0.name()
    }

    /// Local calendar date of an instant.
    pub fn local_date(&self, instant: &DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&self.0).date_naive()
    }

    /// Resolves a local wall-clock time to a UTC instant.
    ///
    /// Ambiguous times (DST fold) resolve to the earlier instant. Times inside
    /// a DST gap are shifted forward by one hour, so `02:30` on a spring-forward
    /// night becomes `03:30` daylight time.
    pub fn localize(&self, local: NaiveDateTime) -> Result<DateTime<Utc>, TimeError> {
        match self.0.from_local_datetime(&local) {
            LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => Ok(dt.with_timezone(&Utc)),
            LocalResult::None => {
                let shifted = local
                    .checked_add_signed(Duration::hours(1))
                    .ok_or(TimeError::DateOutOfRange)?;
                match self.0.from_local_datetime(&shifted) {
                    LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => {
                        Ok(dt.with_timezone(&Utc))
                    }
                    LocalResult::None => Err(TimeError::NonExistentLocalTime {
                        local,
                        timezone: self.name(),
                    }),
                }
            }
        }
    }

    /// First instant of a local calendar date.
    pub fn start_of_day(&self, date: NaiveDate) -> Result<DateTime<Utc>, TimeError> {
        let midnight = date.and_hms_opt(0, 0, 0).ok_or(TimeError::DateOutOfRange)?;
        self.localize(midnight)
    }

    /// Last whole second of a local calendar date.
    pub fn end_of_day(&self, date: NaiveDate) -> Result<DateTime<Utc>, TimeError> {
        let next = date.succ_opt().ok_or(TimeError::DateOutOfRange)?;
        Ok(self.start_of_day(next)? - Duration::seconds(1))
    }

    /// Minute-truncated local rendering used inside session keys.
    pub fn key_stamp(&self, instant: &DateTime<Utc>) -> String {
        instant
            .with_timezone(&self.0)
            .format(KEY_STAMP_FORMAT)
            .to_string()
    }
}

impl Default for ReferenceTimezone {
    fn default() -> Self {
        Self(Tz::America__New_York)
    }
}

impl fmt::Display for ReferenceTimezone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for ReferenceTimezone {
    type Err = TimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<Tz>()
            .map(Self)
            .map_err(|_| TimeError::UnknownTimezone(s.to_string()))
    }
}

/// Minute-precision time of day parsed from an availability slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ClockTime(NaiveTime);

impl ClockTime {
    pub fn as_naive_time(&self) -> NaiveTime {
        self.0
    }
}

impl FromStr for ClockTime {
    type Err = TimeError;

    /// Accepts `H:MM`, `HH:MM` and `HH:MM:SS` (seconds are validated, then dropped).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || TimeError::MalformedClockTime(s.to_string());

        let parts: Vec<&str> = s.trim().split(':').collect();
        if parts.len() < 2 || parts.len() > 3 {
            return Err(malformed());
        }

        let mut fields = [0u32; 3];
        for (slot, part) in fields.iter_mut().zip(&parts) {
            if part.is_empty() || part.len() > 2 || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(malformed());
            }
            *slot = part.parse().map_err(|_| malformed())?;
        }

        let [hour, minute, second] = fields;
        if parts[1].len() != 2 || second > 59 {
            return Err(malformed());
        }

        NaiveTime::from_hms_opt(hour, minute, 0)
            .map(Self)
            .ok_or_else(malformed)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%H:%M"))
    }
}

/// Parses a full English weekday name case-insensitively ("Wednesday",
/// "WEDNESDAY"). Abbreviations such as "Wed" are rejected.
pub fn parse_weekday(name: &str) -> Result<Weekday, TimeError> {
    match name.trim().to_ascii_lowercase().as_str() {
        "monday" => Ok(Weekday::Mon),
        "tuesday" => Ok(Weekday::Tue),
        "wednesday" => Ok(Weekday::Wed),
        "thursday" => Ok(Weekday::Thu),
        "friday" => Ok(Weekday::Fri),
        "saturday" => Ok(Weekday::Sat),
        "sunday" => Ok(Weekday::Sun),
        _ => Err(TimeError::UnknownWeekday(name.to_string())),
    }
}
