//! Period-level statistics.
//!
//! Derived solely from the daily timetable, so that any consumer holding
//! a `DailySchedule[]` can recompute the same numbers.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | `total_days` | Dates in the period |
//! | `total_study_days` / `total_review_days` | Dates classified 학습일 / 복습일 |
//! | `total_study_hours` | Sum of every date's `study_hours` |
//! | `total_study_hours_학습일` | `study_time` hours on 학습일 |
//! | `total_study_hours_복습일` | `study_time` hours on 복습일 |
//! | `total_self_study_hours` | Holiday `study_hours` plus `self_study` slots elsewhere |
//! | `total_exclusion_days` | Dates per exclusion day type |
//! | `academy_statistics` | Dated academy occurrences, grouped by academy and subject |
//!
//! Academy travel is counted in both directions: an occurrence with 30
//! minutes of travel contributes one hour of travel, and averages are
//! round-trip minutes per occurrence.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{DailySchedule, DatePeriod, DayType, SlotType};

const MINUTES_PER_HOUR: f64 = 60.0;

/// Period statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleSummary {
    /// Dates in the period.
    pub total_days: u32,
    /// Dates classified as study days.
    pub total_study_days: u32,
    /// Dates classified as review days.
    pub total_review_days: u32,
    /// Study plus self-study hours over all dates.
    pub total_study_hours: f64,
    /// `study_time` hours on study days.
    #[serde(rename = "total_study_hours_학습일")]
    pub study_day_hours: f64,
    /// `study_time` hours on review days.
    #[serde(rename = "total_study_hours_복습일")]
    pub review_day_hours: f64,
    /// Self-study hours.
    pub total_self_study_hours: f64,
    /// Excluded dates per type.
    pub total_exclusion_days: ExclusionDayCounts,
    /// Academy statistics.
    pub academy_statistics: AcademyStatistics,
    /// Summarized period.
    pub period: SummaryPeriod,
}

/// Excluded dates per day type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExclusionDayCounts {
    /// Vacation days.
    #[serde(rename = "휴가")]
    pub vacation: u32,
    /// Personal days.
    #[serde(rename = "개인사정")]
    pub personal: u32,
    /// Designated holidays.
    #[serde(rename = "지정휴일")]
    pub designated_holiday: u32,
    /// Other exclusions.
    #[serde(rename = "기타")]
    pub other: u32,
}

impl ExclusionDayCounts {
    /// Sum over all types.
    pub fn total(&self) -> u32 {
        self.vacation + self.personal + self.designated_holiday + self.other
    }
}

/// Aggregated academy commitments over the period.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AcademyStatistics {
    /// Dated occurrences.
    pub total_academy_schedules: u32,
    /// Distinct academy names.
    pub unique_academies: u32,
    /// Lesson hours.
    pub total_academy_hours: f64,
    /// Travel hours, both directions.
    pub total_travel_hours: f64,
    /// Mean round-trip travel minutes per occurrence.
    pub average_travel_minutes: f64,
    /// Per academy and subject, ordered by name then subject.
    pub academy_groups: Vec<AcademyGroup>,
}

/// Statistics of one academy/subject pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AcademyGroup {
    /// Academy name.
    pub academy_name: String,
    /// Subject, if recorded.
    pub subject: Option<String>,
    /// Dated occurrences.
    pub occurrence_count: u32,
    /// Lesson hours.
    pub total_lesson_hours: f64,
    /// Travel hours, both directions.
    pub total_travel_hours: f64,
    /// Mean round-trip travel minutes per occurrence.
    pub average_travel_minutes: f64,
    /// Weekday indices (`0 = Sunday`), ascending.
    pub days_of_week: Vec<u8>,
}

/// First and last date of the summarized period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryPeriod {
    /// First date.
    pub start_date: NaiveDate,
    /// Last date.
    pub end_date: NaiveDate,
}

#[derive(Default)]
struct GroupTotals {
    count: u32,
    lesson_minutes: u32,
    travel_minutes: u32,
    days: BTreeSet<u8>,
}

impl ScheduleSummary {
    /// Computes the summary of a daily timetable.
    ///
    /// Academy occurrences are expected to carry their effective travel
    /// time; a missing one counts as zero.
    pub fn from_daily(period: &DatePeriod, daily: &[DailySchedule]) -> Self {
        let mut total_study_days = 0;
        let mut total_review_days = 0;
        let mut total_study_minutes = 0u32;
        let mut study_day_minutes = 0u32;
        let mut review_day_minutes = 0u32;
        let mut self_study_minutes = 0u32;
        let mut exclusions = ExclusionDayCounts::default();

        for day in daily {
            let study_time = day.minutes_of(SlotType::StudyTime);
            total_study_minutes += day.study_minutes();

            match day.day_type {
                DayType::Study => {
                    total_study_days += 1;
                    study_day_minutes += study_time;
                }
                DayType::Review => {
                    total_review_days += 1;
                    review_day_minutes += study_time;
                }
                DayType::DesignatedHoliday => exclusions.designated_holiday += 1,
                DayType::Vacation => exclusions.vacation += 1,
                DayType::Personal => exclusions.personal += 1,
                DayType::Other => exclusions.other += 1,
            }

            // Holidays have no study_time, so study minutes are self-study.
            self_study_minutes += if day.day_type == DayType::DesignatedHoliday {
                day.study_minutes()
            } else {
                day.minutes_of(SlotType::SelfStudy)
            };
        }

        Self {
            total_days: daily.len() as u32,
            total_study_days,
            total_review_days,
            total_study_hours: hours(total_study_minutes),
            study_day_hours: hours(study_day_minutes),
            review_day_hours: hours(review_day_minutes),
            total_self_study_hours: hours(self_study_minutes),
            total_exclusion_days: exclusions,
            academy_statistics: AcademyStatistics::from_daily(daily),
            period: SummaryPeriod {
                start_date: period.start,
                end_date: period.end,
            },
        }
    }
}

impl AcademyStatistics {
    /// Aggregates the academy occurrences listed on each date.
    pub fn from_daily(daily: &[DailySchedule]) -> Self {
        let mut groups: BTreeMap<(String, Option<String>), GroupTotals> = BTreeMap::new();

        for occurrence in daily.iter().flat_map(|d| &d.academy_schedules) {
            let lesson = occurrence.lesson().map_or(0, |l| l.duration_minutes());
            let travel = u32::from(occurrence.travel_time_minutes.unwrap_or(0));

            let totals = groups
                .entry((occurrence.academy_name.clone(), occurrence.subject.clone()))
                .or_default();
            totals.count += 1;
            totals.lesson_minutes += lesson;
            totals.travel_minutes += travel;
            totals.days.insert(occurrence.day_of_week);
        }

        let count: u32 = groups.values().map(|g| g.count).sum();
        let lesson_minutes: u32 = groups.values().map(|g| g.lesson_minutes).sum();
        let travel_minutes: u32 = groups.values().map(|g| g.travel_minutes).sum();
        let unique_academies = groups
            .keys()
            .map(|(name, _)| name.as_str())
            .collect::<BTreeSet<_>>()
            .len() as u32;

        let academy_groups = groups
            .into_iter()
            .map(|((academy_name, subject), g)| AcademyGroup {
                academy_name,
                subject,
                occurrence_count: g.count,
                total_lesson_hours: hours(g.lesson_minutes),
                total_travel_hours: hours(2 * g.travel_minutes),
                average_travel_minutes: mean(2 * g.travel_minutes, g.count),
                days_of_week: g.days.into_iter().collect(),
            })
            .collect();

        Self {
            total_academy_schedules: count,
            unique_academies,
            total_academy_hours: hours(lesson_minutes),
            total_travel_hours: hours(2 * travel_minutes),
            average_travel_minutes: mean(2 * travel_minutes, count),
            academy_groups,
        }
    }
}

fn hours(minutes: u32) -> f64 {
    f64::from(minutes) / MINUTES_PER_HOUR
}

fn mean(total: u32, count: u32) -> f64 {
    if count == 0 {
        0.0
    } else {
        f64::from(total) / f64::from(count)
    }
}
