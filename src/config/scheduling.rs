//! Scheduling configuration

use chrono::Weekday;
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::domain::scheduling::{parse_weekday, ReferenceTimezone, DEFAULT_REFERENCE_TIMEZONE};

/// Settings for session generation and the weekly job.
#[derive(Debug, Clone, Deserialize)]
pub struct SchedulingConfig {
    /// IANA zone in which availability times are interpreted
    #[serde(default = "default_timezone")]
    pub timezone: String,

    /// First day of a scheduling week
    #[serde(default = "default_week_starts_on")]
    pub week_starts_on: String,

    /// Whether the background job fills the upcoming week
    #[serde(default = "default_weekly_job_enabled")]
    pub weekly_job_enabled: bool,

    /// Seconds between weekly job runs
    #[serde(default = "default_job_interval")]
    pub job_interval_secs: u64,
}

impl SchedulingConfig {
    pub fn reference_timezone(&self) -> Result<ReferenceTimezone, ValidationError> {
        self.timezone
            .parse()
            .map_err(|_| ValidationError::InvalidTimezone(self.timezone.clone()))
    }

    pub fn week_start(&self) -> Result<Weekday, ValidationError> {
        parse_weekday(&self.week_starts_on)
            .map_err(|_| ValidationError::InvalidWeekStart(self.week_starts_on.clone()))
    }

    pub fn job_interval(&self) -> Duration {
        Duration::from_secs(self.job_interval_secs)
    }

    /// Validate scheduling configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.reference_timezone()?;
        self.week_start()?;
        if !(60..=604_800).contains(&self.job_interval_secs) {
            return Err(ValidationError::InvalidJobInterval);
        }
        Ok(())
    }
}

impl Default for SchedulingConfig {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
            week_starts_on: default_week_starts_on(),
            weekly_job_enabled: default_weekly_job_enabled(),
            job_interval_secs: default_job_interval(),
        }
    }
}

fn default_timezone() -> String {
    DEFAULT_REFERENCE_TIMEZONE.to_string()
}

fn default_week_starts_on() -> String {
    "monday".to_string()
}

fn default_weekly_job_enabled() -> bool {
    true
}

fn default_job_interval() -> u64 {
    3600
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scheduling_defaults() {
        let config = SchedulingConfig::default();
        assert_eq!(config.reference_timezone().unwrap().name(), "America/New_York");
        assert_eq!(config.week_start().unwrap(), Weekday::Mon);
        assert!(config.weekly_job_enabled);
        assert_eq!(config.job_interval(), Duration::from_secs(3600));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unknown_timezone_is_rejected() {
        let config = SchedulingConfig {
            timezone: "Mars/Olympus_Mons".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidTimezone(_))
        ));
    }

    #[test]
    fn test_unknown_week_start_is_rejected() {
        let config = SchedulingConfig {
            week_starts_on: "someday".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidWeekStart(_))
        ));
    }

    #[test]
    fn test_job_interval_bounds() {
        let config = SchedulingConfig {
            job_interval_secs: 5,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidJobInterval)
        ));
    }

    #[test]
    fn test_week_start_accepts_any_case() {
        let config = SchedulingConfig {
            week_starts_on: "Sunday".to_string(),
            ..Default::default()
        };
        assert_eq!(config.week_start().unwrap(), Weekday::Sun);
    }
}
