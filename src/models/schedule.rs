//! Daily timetable (output) model.
//!
//! One [`DailySchedule`] per calendar date of the period, each carrying its
//! classified [`DayType`] and the chronologically ordered [`TimeSlot`]s the
//! composer produced. Advisory problems found on the way are reported as
//! [`ScheduleWarning`]s instead of failing the computation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::academy::AcademyOccurrence;
use super::exclusion::{Exclusion, ExclusionType};
use super::interval::{ClockTime, TimeInterval};

/// Classified type of a calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DayType {
    /// In-cycle study day.
    #[serde(rename = "학습일")]
    Study,
    /// In-cycle review day.
    #[serde(rename = "복습일")]
    Review,
    /// Designated holiday; outside the cycle, self-study only.
    #[serde(rename = "지정휴일")]
    DesignatedHoliday,
    /// Vacation; no study at all.
    #[serde(rename = "휴가")]
    Vacation,
    /// Personal matter; no study at all.
    #[serde(rename = "개인일정")]
    Personal,
    /// Other exclusion; no study at all.
    #[serde(rename = "기타")]
    Other,
}

impl DayType {
    /// Day type implied by an exclusion.
    pub fn from_exclusion(exclusion_type: ExclusionType) -> Self {
        match exclusion_type {
            ExclusionType::Vacation => Self::Vacation,
            ExclusionType::Personal => Self::Personal,
            ExclusionType::DesignatedHoliday => Self::DesignatedHoliday,
            ExclusionType::Other => Self::Other,
        }
    }

    /// Korean display label, identical to the serialized form.
    pub fn label(self) -> &'static str {
        match self {
            Self::Study => "학습일",
            Self::Review => "복습일",
            Self::DesignatedHoliday => "지정휴일",
            Self::Vacation => "휴가",
            Self::Personal => "개인일정",
            Self::Other => "기타",
        }
    }

    /// Whether the date is part of the study/review cycle.
    pub fn is_in_cycle(self) -> bool {
        matches!(self, Self::Study | Self::Review)
    }

    /// Whether the whole date is unavailable.
    pub fn is_leave(self) -> bool {
        matches!(self, Self::Vacation | Self::Personal | Self::Other)
    }
}

/// Purpose of a time slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotType {
    /// Time available for assigned study content.
    StudyTime,
    /// Unassigned available time.
    SelfStudy,
    /// Travel to or from an academy.
    TravelTime,
    /// Academy lesson.
    Academy,
    /// Meal, sleep or other non-study time.
    MealSleep,
}

/// A labelled interval within one day.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeSlot {
    /// Slot start.
    pub start: ClockTime,
    /// Slot end (exclusive).
    pub end: ClockTime,
    /// Slot purpose.
    #[serde(rename = "type")]
    pub slot_type: SlotType,
    /// Display label (academy name, meal kind).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl TimeSlot {
    /// Creates an unlabelled slot covering `interval`.
    pub fn new(interval: TimeInterval, slot_type: SlotType) -> Self {
        Self {
            start: interval.start,
            end: interval.end,
            slot_type,
            label: None,
        }
    }

    /// Sets the label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// The slot as an interval.
    pub fn interval(&self) -> TimeInterval {
        TimeInterval {
            start: self.start,
            end: self.end,
        }
    }

    /// Duration in minutes.
    #[inline]
    pub fn duration_minutes(&self) -> u32 {
        self.interval().duration_minutes()
    }
}

/// The timetable of one calendar date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySchedule {
    /// Calendar date.
    pub date: NaiveDate,
    /// Classified type.
    pub day_type: DayType,
    /// Cycle week for display grouping (1730 policy only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub week_number: Option<u32>,
    /// Chronologically ordered, pairwise disjoint slots.
    pub time_slots: Vec<TimeSlot>,
    /// Study plus self-study hours.
    pub study_hours: f64,
    /// Exclusion that decided the day type, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclusion: Option<Exclusion>,
    /// Academy occurrences recurring on this weekday.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub academy_schedules: Vec<AcademyOccurrence>,
}

impl DailySchedule {
    /// Total minutes of slots with the given purpose.
    pub fn minutes_of(&self, slot_type: SlotType) -> u32 {
        self.time_slots
            .iter()
            .filter(|s| s.slot_type == slot_type)
            .map(TimeSlot::duration_minutes)
            .sum()
    }

    /// Slots with the given purpose.
    pub fn slots_of(&self, slot_type: SlotType) -> impl Iterator<Item = &TimeSlot> {
        self.time_slots
            .iter()
            .filter(move |s| s.slot_type == slot_type)
    }

    /// Minutes of study plus self-study.
    pub fn study_minutes(&self) -> u32 {
        self.minutes_of(SlotType::StudyTime) + self.minutes_of(SlotType::SelfStudy)
    }
}

/// Category of an advisory problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    /// Two academy occurrences overlap on the same weekday.
    AcademyOverlap,
    /// An exclusion date lies outside the period and was ignored.
    ExclusionOutOfPeriod,
    /// A second exclusion with the same date and type was ignored.
    DuplicateExclusion,
    /// An academy or non-study interval misses all block coverage.
    OutsideBlockCoverage,
}

/// A non-fatal problem attached to the result.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScheduleWarning {
    /// Category.
    pub kind: WarningKind,
    /// Affected date, when the problem is date-specific.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    /// Human-readable description.
    pub message: String,
}

impl ScheduleWarning {
    /// Creates a warning not tied to a date.
    pub fn new(kind: WarningKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            date: None,
            message: message.into(),
        }
    }

    /// Attaches the warning to a date.
    pub fn on(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(start: &str, end: &str, t: SlotType) -> TimeSlot {
        TimeSlot::new(TimeInterval::parse(start, end).unwrap(), t)
    }

    #[test]
    fn test_day_type_labels_match_serde() {
        for t in [
            DayType::Study,
            DayType::Review,
            DayType::DesignatedHoliday,
            DayType::Vacation,
            DayType::Personal,
            DayType::Other,
        ] {
            let json = serde_json::to_string(&t).unwrap();
            assert_eq!(json, format!("\"{}\"", t.label()));
        }
    }

    #[test]
    fn test_day_type_from_exclusion() {
        assert_eq!(
            DayType::from_exclusion(ExclusionType::DesignatedHoliday),
            DayType::DesignatedHoliday
        );
        assert!(DayType::from_exclusion(ExclusionType::Personal).is_leave());
        assert!(DayType::Review.is_in_cycle());
        assert!(!DayType::DesignatedHoliday.is_in_cycle());
    }

    #[test]
    fn test_daily_minutes() {
        let day = DailySchedule {
            date: NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
            day_type: DayType::Study,
            week_number: Some(1),
            time_slots: vec![
                slot("14:00", "15:30", SlotType::StudyTime),
                slot("15:30", "16:00", SlotType::TravelTime),
                slot("16:00", "17:00", SlotType::Academy),
                slot("17:00", "17:30", SlotType::TravelTime),
                slot("17:30", "18:00", SlotType::StudyTime),
            ],
            study_hours: 2.0,
            exclusion: None,
            academy_schedules: Vec::new(),
        };
        assert_eq!(day.minutes_of(SlotType::StudyTime), 120);
        assert_eq!(day.minutes_of(SlotType::TravelTime), 60);
        assert_eq!(day.slots_of(SlotType::Academy).count(), 1);
        assert_eq!(day.study_minutes(), 120);
    }

    #[test]
    fn test_slot_serializes_type_field() {
        let s = slot("16:00", "17:00", SlotType::Academy).with_label("Math");
        let json = serde_json::to_value(&s).unwrap();
        assert_eq!(json["type"], "academy");
        assert_eq!(json["label"], "Math");
        assert_eq!(json["start"], "16:00");
    }

    #[test]
    fn test_inverted_slot_has_no_duration() {
        let json = r#"{"start":"18:00","end":"14:00","type":"study_time"}"#;
        let s: TimeSlot = serde_json::from_str(json).unwrap();
        assert_eq!(s.duration_minutes(), 0);

        let day = DailySchedule {
            date: NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
            day_type: DayType::Study,
            week_number: None,
            time_slots: vec![s, slot("14:00", "15:00", SlotType::StudyTime)],
            study_hours: 1.0,
            exclusion: None,
            academy_schedules: Vec::new(),
        };
        assert_eq!(day.study_minutes(), 60);
    }

    #[test]
    fn test_warning_on_date() {
        let d = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
        let w = ScheduleWarning::new(WarningKind::AcademyOverlap, "overlap").on(d);
        assert_eq!(w.date, Some(d));
    }
}
