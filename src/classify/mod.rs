//! Day classification.
//!
//! Assigns every date of the period a [`DayType`], and for cyclic policies
//! a cycle position and week number. A classifier only sees the period and
//! the exclusion calendar; block coverage and commitments do not influence
//! the day type.
//!
//! # Policies
//!
//! | Policy | Type | Behaviour |
//! |--------|------|-----------|
//! | `1730_timetable` | [`Timetable1730`] | Repeating study/review cycle, holiday-transparent |
//! | `auto` | [`AutoClassifier`] | Every available date is a study date |
//!
//! # Usage
//!
//! ```
//! use chrono::NaiveDate;
//! use u_timetable::classify::{DayClassifier, Timetable1730};
//! use u_timetable::models::{DatePeriod, DayType, SchedulerOptions};
//! use u_timetable::resolve::ExclusionCalendar;
//!
//! let period = DatePeriod::new(
//!     NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
//!     NaiveDate::from_ymd_opt(2024, 3, 14).unwrap(),
//! );
//! let (calendar, _) = ExclusionCalendar::build(&[], &period);
//!
//! let days = Timetable1730::new(SchedulerOptions::new(6, 1)).classify(&period, &calendar);
//! let reviews = days.iter().filter(|d| d.day_type == DayType::Review).count();
//! assert_eq!(reviews, 2);
//! ```

mod auto;
mod timetable;

pub use auto::AutoClassifier;
pub use timetable::Timetable1730;

use std::fmt::Debug;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{DatePeriod, DayType, ScheduleRequest, SchedulerType};
use crate::resolve::ExclusionCalendar;

/// Classification of one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayAssignment {
    /// Calendar date.
    pub date: NaiveDate,
    /// Classified type.
    pub day_type: DayType,
    /// Cycle week, for cyclic policies.
    pub week_number: Option<u32>,
    /// 1-based slot within the current cycle, for dates that advance it.
    pub cycle_position: Option<u32>,
}

impl DayAssignment {
    /// Assignment without cycle information.
    pub fn new(date: NaiveDate, day_type: DayType) -> Self {
        Self {
            date,
            day_type,
            week_number: None,
            cycle_position: None,
        }
    }
}

/// A scheduler policy that classifies dates.
///
/// Implementations must return exactly one assignment per date of the
/// period, in date order.
pub trait DayClassifier: Send + Sync + Debug {
    /// Policy name, as used on the wire.
    fn name(&self) -> &'static str;

    /// Classifies every date of `period`.
    fn classify(&self, period: &DatePeriod, calendar: &ExclusionCalendar) -> Vec<DayAssignment>;
}

/// Builds the classifier selected by a request.
pub fn classifier_for(request: &ScheduleRequest) -> Box<dyn DayClassifier> {
    match request.scheduler_type {
        SchedulerType::Timetable1730 => {
            let mut policy = Timetable1730::new(request.scheduler_options);
            if let Some(extra) = request.additional_review_period {
                policy = policy.with_additional_review_period(extra);
            }
            Box::new(policy)
        }
        SchedulerType::Auto => Box::new(AutoClassifier),
    }
}

/// Day type of an excluded date, if the date is excluded at all.
pub(crate) fn excluded_day_type(calendar: &ExclusionCalendar, date: NaiveDate) -> Option<DayType> {
    calendar
        .classify(date)
        .map(|e| DayType::from_exclusion(e.exclusion_type))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classifier_for_request() {
        let start = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let request = ScheduleRequest::new(start, start);
        assert_eq!(classifier_for(&request).name(), "1730_timetable");

        let request = request.with_scheduler_type(SchedulerType::Auto);
        assert_eq!(classifier_for(&request).name(), "auto");
    }
}
