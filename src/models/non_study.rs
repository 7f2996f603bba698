//! Recurring non-study time (meals, sleep, custom).

use std::fmt;

use serde::{Deserialize, Serialize};

use super::interval::{weekday_from_index, ClockTime, TimeInterval, WEEKDAYS};
use chrono::Weekday;

/// Kind of non-study time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NonStudyKind {
    /// 아침식사
    #[serde(alias = "아침식사")]
    Breakfast,
    /// 점심식사
    #[serde(alias = "점심식사")]
    Lunch,
    /// 저녁식사
    #[serde(alias = "저녁식사")]
    Dinner,
    /// 수면
    #[serde(alias = "수면")]
    Sleep,
    /// 기타
    #[serde(alias = "기타")]
    Other,
}

impl fmt::Display for NonStudyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Breakfast => "breakfast",
            Self::Lunch => "lunch",
            Self::Dinner => "dinner",
            Self::Sleep => "sleep",
            Self::Other => "other",
        };
        f.write_str(name)
    }
}

/// A recurring period when the student does not study.
///
/// When `end` is earlier than `start` the block wraps past midnight and
/// occupies `[start, 24:00)` plus `[00:00, end)` on each of its weekdays.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NonStudyBlock {
    /// Category.
    #[serde(rename = "type")]
    pub kind: NonStudyKind,
    /// Start time.
    #[serde(rename = "start_time")]
    pub start: ClockTime,
    /// End time (exclusive).
    #[serde(rename = "end_time")]
    pub end: ClockTime,
    /// Weekday indices this block applies to; `None` means every day.
    #[serde(default, rename = "day_of_week", skip_serializing_if = "Option::is_none")]
    pub weekdays: Option<Vec<u8>>,
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl NonStudyBlock {
    /// Creates a block that applies every day.
    pub fn new(kind: NonStudyKind, start: ClockTime, end: ClockTime) -> Self {
        Self {
            kind,
            start,
            end,
            weekdays: None,
            description: None,
        }
    }

    /// Creates a block from `"HH:MM"` strings.
    pub fn parse(kind: NonStudyKind, start: &str, end: &str) -> Option<Self> {
        Some(Self::new(kind, start.parse().ok()?, end.parse().ok()?))
    }

    /// Restricts the block to the given weekday indices.
    pub fn on_weekdays(mut self, weekdays: impl IntoIterator<Item = u8>) -> Self {
        self.weekdays = Some(weekdays.into_iter().collect());
        self
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Whether the block applies on `weekday`.
    pub fn applies_on(&self, weekday: Weekday) -> bool {
        match &self.weekdays {
            None => true,
            Some(days) => days
                .iter()
                .any(|&d| weekday_from_index(d) == Some(weekday)),
        }
    }

    /// Weekdays this block applies on, Sunday-first.
    pub fn active_weekdays(&self) -> impl Iterator<Item = Weekday> + '_ {
        WEEKDAYS.iter().copied().filter(|&d| self.applies_on(d))
    }

    /// Intervals occupied on one day, splitting blocks that wrap midnight.
    pub fn intervals(&self) -> Vec<TimeInterval> {
        if self.start < self.end {
            return TimeInterval::new(self.start, self.end).into_iter().collect();
        }
        [
            TimeInterval::new(self.start, ClockTime::END_OF_DAY),
            TimeInterval::new(ClockTime::MIDNIGHT, self.end),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unscoped_applies_everywhere() {
        let lunch = NonStudyBlock::parse(NonStudyKind::Lunch, "12:00", "13:00").unwrap();
        assert_eq!(lunch.active_weekdays().count(), 7);
    }

    #[test]
    fn test_weekday_scope() {
        let dinner = NonStudyBlock::parse(NonStudyKind::Dinner, "18:00", "19:00")
            .unwrap()
            .on_weekdays([1, 3, 5]);
        assert!(dinner.applies_on(Weekday::Wed));
        assert!(!dinner.applies_on(Weekday::Tue));
        assert_eq!(dinner.active_weekdays().count(), 3);
    }

    #[test]
    fn test_sleep_wraps_midnight() {
        let sleep = NonStudyBlock::parse(NonStudyKind::Sleep, "23:00", "07:00").unwrap();
        assert_eq!(
            sleep.intervals(),
            vec![
                TimeInterval::parse("23:00", "24:00").unwrap(),
                TimeInterval::parse("00:00", "07:00").unwrap(),
            ]
        );
    }

    #[test]
    fn test_korean_kind_alias() {
        let json = r#"{"type":"점심식사","start_time":"12:00","end_time":"13:00"}"#;
        let b: NonStudyBlock = serde_json::from_str(json).unwrap();
        assert_eq!(b.kind, NonStudyKind::Lunch);
        assert!(b.weekdays.is_none());
    }
}
