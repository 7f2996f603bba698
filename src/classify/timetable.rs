//! The 1730 timetable policy.
//!
//! A cycle of `study_days` study days followed by `review_days` review
//! days repeats over the period. The cycle is tracked by an explicit
//! position counter that only advances on dates that are not designated
//! holidays, so a holiday shifts every later cycle state by one date.
//! Vacation, personal and other exclusions still consume their slot.

use crate::models::{DatePeriod, DayType, SchedulerOptions};
use crate::resolve::ExclusionCalendar;

use super::{excluded_day_type, DayAssignment, DayClassifier};

const DAYS_PER_WEEK: u32 = 7;

/// Study/review cycle classifier.
#[derive(Debug, Clone, PartialEq)]
pub struct Timetable1730 {
    options: SchedulerOptions,
    additional_review_period: Option<DatePeriod>,
}

impl Timetable1730 {
    /// Creates the policy with the given cycle shape.
    pub fn new(options: SchedulerOptions) -> Self {
        Self {
            options,
            additional_review_period: None,
        }
    }

    /// Turns study days inside `period` into review days.
    ///
    /// Used for a trailing consolidation phase; the cycle itself keeps
    /// running unchanged underneath.
    pub fn with_additional_review_period(mut self, period: DatePeriod) -> Self {
        self.additional_review_period = Some(period);
        self
    }

    /// Cycle state for a 0-based count of advancing dates.
    fn cycle_state(&self, position: u32) -> (DayType, u32) {
        let cycle = self.options.cycle_length().max(1);
        let slot = position % cycle;
        let day_type = if slot < u32::from(self.options.study_days) {
            DayType::Study
        } else {
            DayType::Review
        };
        (day_type, slot + 1)
    }
}

impl DayClassifier for Timetable1730 {
    fn name(&self) -> &'static str {
        "1730_timetable"
    }

    fn classify(&self, period: &DatePeriod, calendar: &ExclusionCalendar) -> Vec<DayAssignment> {
        let mut assignments = Vec::with_capacity(period.len_days() as usize);
        let mut position: u32 = 0;
        let mut last_week: Option<u32> = None;

        for date in period.dates() {
            let excluded = excluded_day_type(calendar, date);

            if excluded == Some(DayType::DesignatedHoliday) {
                assignments.push(DayAssignment {
                    date,
                    day_type: DayType::DesignatedHoliday,
                    week_number: Some(last_week.unwrap_or(1)),
                    cycle_position: None,
                });
                continue;
            }

            let (cycle_type, cycle_position) = self.cycle_state(position);
            let week = position / DAYS_PER_WEEK + 1;
            position += 1;
            last_week = Some(week);

            let mut day_type = excluded.unwrap_or(cycle_type);
            if day_type == DayType::Study
                && self
                    .additional_review_period
                    .is_some_and(|extra| extra.contains(date))
            {
                day_type = DayType::Review;
            }

            assignments.push(DayAssignment {
                date,
                day_type,
                week_number: Some(week),
                cycle_position: Some(cycle_position),
            });
        }

        assignments
    }
}
