//! Recurring academy (external class) commitments.

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use super::interval::{weekday_from_index, ClockTime, TimeInterval};

/// A weekly external class with travel time on both sides.
///
/// Travel precedes and follows the lesson: an occurrence from 16:00 to
/// 17:00 with 30 minutes of travel occupies 15:30–17:30.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AcademyOccurrence {
    /// Weekday index, `0 = Sunday … 6 = Saturday`.
    pub day_of_week: u8,
    /// Lesson start.
    #[serde(rename = "start_time")]
    pub start: ClockTime,
    /// Lesson end (exclusive).
    #[serde(rename = "end_time")]
    pub end: ClockTime,
    /// Academy name.
    #[serde(default)]
    pub academy_name: String,
    /// Subject taught, if recorded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    /// One-way travel time in minutes. `None` uses the engine default.
    #[serde(default, rename = "travel_time", skip_serializing_if = "Option::is_none")]
    pub travel_time_minutes: Option<u16>,
}

impl AcademyOccurrence {
    /// Creates an occurrence with no subject and default travel time.
    pub fn new(
        day_of_week: u8,
        start: ClockTime,
        end: ClockTime,
        academy_name: impl Into<String>,
    ) -> Self {
        Self {
            day_of_week,
            start,
            end,
            academy_name: academy_name.into(),
            subject: None,
            travel_time_minutes: None,
        }
    }

    /// Creates an occurrence from `"HH:MM"` strings.
    pub fn parse(
        day_of_week: u8,
        start: &str,
        end: &str,
        academy_name: impl Into<String>,
    ) -> Option<Self> {
        Some(Self::new(
            day_of_week,
            start.parse().ok()?,
            end.parse().ok()?,
            academy_name,
        ))
    }

    /// Sets the subject.
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Sets the one-way travel time.
    pub fn with_travel_minutes(mut self, minutes: u16) -> Self {
        self.travel_time_minutes = Some(minutes);
        self
    }

    /// Weekday of this occurrence, if the index is valid.
    pub fn weekday(&self) -> Option<Weekday> {
        weekday_from_index(self.day_of_week)
    }

    /// Lesson interval, if `start < end`.
    pub fn lesson(&self) -> Option<TimeInterval> {
        TimeInterval::new(self.start, self.end)
    }

    /// Travel time, falling back to `default_minutes`.
    pub fn travel_minutes_or(&self, default_minutes: u16) -> u16 {
        self.travel_time_minutes.unwrap_or(default_minutes)
    }

    /// Display label: `"academy-subject"` or just `"academy"`.
    pub fn label(&self) -> String {
        match self.subject.as_deref().filter(|s| !s.is_empty()) {
            Some(subject) => format!("{}-{}", self.academy_name, subject),
            None => self.academy_name.clone(),
        }
    }
}
