//! Engine configuration.
//!
//! Loaded once per process (usually from TOML) and shared by every
//! computation. Missing keys fall back to the defaults below.
//!
//! ```toml
//! default_travel_minutes = 45
//! academy_overlap = "first_listed_wins"
//! max_period_days = 400
//!
//! [default_self_study_allowance]
//! start = "17:00"
//! end = "19:00"
//!
//! [[default_block_set]]
//! day_of_week = 1
//! start_time = "10:00"
//! end_time = "19:00"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScheduleError};
use crate::models::{ClockTime, TimeInterval, WeeklyBlock};
use crate::resolve::OverlapPolicy;
use crate::validation::{validate_blocks, ValidationError, ValidationErrorKind};

/// Default camp study window start (10:00).
const CAMP_STUDY_START: u16 = 10 * 60;
/// Default camp study window end and self-study start (19:00).
const CAMP_SELF_STUDY_START: u16 = 19 * 60;
/// Default camp self-study window end (22:00).
const CAMP_SELF_STUDY_END: u16 = 22 * 60;
/// Default one-way travel time for academies (minutes).
pub const DEFAULT_TRAVEL_MINUTES: u16 = 60;
/// Default upper bound on period length.
pub const DEFAULT_MAX_PERIOD_DAYS: u64 = 731;

/// Engine-wide settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Weekly blocks used when a request selects no block set.
    pub default_block_set: Vec<WeeklyBlock>,
    /// Self-study window applied with the fallback blocks when the request
    /// sets none.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_self_study_allowance: Option<TimeInterval>,
    /// Travel time applied to academy occurrences that carry none.
    pub default_travel_minutes: u16,
    /// How overlapping academy occurrences claim time.
    pub academy_overlap: OverlapPolicy,
    /// Longest accepted period, in days.
    pub max_period_days: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        // Camp study hours 10:00-19:00 followed by camp self-study
        // 19:00-22:00, every day.
        let start = ClockTime::from_minutes(CAMP_STUDY_START).unwrap_or(ClockTime::MIDNIGHT);
        let end = ClockTime::from_minutes(CAMP_SELF_STUDY_END).unwrap_or(ClockTime::END_OF_DAY);
        let self_study = ClockTime::from_minutes(CAMP_SELF_STUDY_START)
            .and_then(|from| TimeInterval::new(from, end));
        Self {
            default_block_set: WeeklyBlock::every_day(start, end),
            default_self_study_allowance: self_study,
            default_travel_minutes: DEFAULT_TRAVEL_MINUTES,
            academy_overlap: OverlapPolicy::FirstListedWins,
            max_period_days: DEFAULT_MAX_PERIOD_DAYS,
        }
    }
}

impl EngineConfig {
    /// Parses a TOML document.
    ///
    /// The fallback block set must itself be a valid block set.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Sets the fallback block set.
    pub fn with_default_block_set(mut self, blocks: Vec<WeeklyBlock>) -> Self {
        self.default_block_set = blocks;
        self
    }

    /// Sets the self-study window used with the fallback blocks.
    pub fn with_default_self_study_allowance(mut self, window: Option<TimeInterval>) -> Self {
        self.default_self_study_allowance = window;
        self
    }

    /// Sets the default travel time.
    pub fn with_default_travel_minutes(mut self, minutes: u16) -> Self {
        self.default_travel_minutes = minutes;
        self
    }

    /// Sets the academy overlap policy.
    pub fn with_academy_overlap(mut self, policy: OverlapPolicy) -> Self {
        self.academy_overlap = policy;
        self
    }

    /// Sets the longest accepted period.
    pub fn with_max_period_days(mut self, days: u64) -> Self {
        self.max_period_days = days;
        self
    }

    /// Checks the fallback block set and self-study window.
    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();
        validate_blocks(&self.default_block_set, &mut errors);
        if let Some(window) = &self.default_self_study_allowance {
            if TimeInterval::new(window.start, window.end).is_none() {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidInterval,
                    format!("default self-study allowance {window} is empty or inverted"),
                ));
            }
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ScheduleError::InvalidInput(errors))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_is_camp_hours() {
        let config = EngineConfig::default();
        assert_eq!(config.default_block_set.len(), 7);
        assert_eq!(config.default_block_set[0].start.to_string(), "10:00");
        assert_eq!(config.default_block_set[0].end.to_string(), "22:00");
        assert_eq!(
            config.default_self_study_allowance,
            TimeInterval::parse("19:00", "22:00")
        );
        assert_eq!(config.default_travel_minutes, 60);
        assert_eq!(config.academy_overlap, OverlapPolicy::FirstListedWins);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = EngineConfig::from_toml_str(
            r#"
            default_travel_minutes = 30
            academy_overlap = "last_listed_wins"
            "#,
        )
        .unwrap();
        assert_eq!(config.default_travel_minutes, 30);
        assert_eq!(config.academy_overlap, OverlapPolicy::LastListedWins);
        assert_eq!(config.max_period_days, DEFAULT_MAX_PERIOD_DAYS);
        assert_eq!(config.default_block_set.len(), 7);
    }

    #[test]
    fn test_custom_block_set_from_toml() {
        let config = EngineConfig::from_toml_str(
            r#"
            [[default_block_set]]
            day_of_week = 1
            start_time = "09:00"
            end_time = "12:00"

            [[default_block_set]]
            day_of_week = 1
            start_time = "13:00"
            end_time = "18:00"
            "#,
        )
        .unwrap();
        assert_eq!(config.default_block_set.len(), 2);
    }

    #[test]
    fn test_overlapping_default_blocks_rejected() {
        let err = EngineConfig::from_toml_str(
            r#"
            [[default_block_set]]
            day_of_week = 1
            start_time = "09:00"
            end_time = "12:00"

            [[default_block_set]]
            day_of_week = 1
            start_time = "11:00"
            end_time = "18:00"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidInput(_)));
    }

    #[test]
    fn test_self_study_allowance_from_toml() {
        let config = EngineConfig::from_toml_str(
            r#"
            [default_self_study_allowance]
            start = "18:00"
            end = "21:00"
            "#,
        )
        .unwrap();
        assert_eq!(
            config.default_self_study_allowance,
            TimeInterval::parse("18:00", "21:00")
        );

        let err = EngineConfig::from_toml_str(
            r#"
            [default_self_study_allowance]
            start = "21:00"
            end = "18:00"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidInput(_)));
    }

    #[test]
    fn test_bad_toml_is_config_error() {
        let err = EngineConfig::from_toml_str("academy_overlap = 3").unwrap_err();
        assert!(matches!(err, ScheduleError::Config(_)));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "max_period_days = 120").unwrap();
        let config = EngineConfig::from_file(file.path()).unwrap();
        assert_eq!(config.max_period_days, 120);

        let missing = EngineConfig::from_file("/nonexistent/u-timetable.toml").unwrap_err();
        assert!(matches!(missing, ScheduleError::Io(_)));
    }
}
