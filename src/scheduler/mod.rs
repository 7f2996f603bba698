//! Schedule availability computation and its result.
//!
//! [`ScheduleEngine`] runs the whole pipeline for one request:
//!
//! 1. Validate the request
//! 2. Resolve weekly coverage, exclusions, academies and non-study time
//! 3. Classify every date with the selected policy
//! 4. Compose each date's slots
//! 5. Summarize the period
//!
//! The engine is pure and synchronous. Caching lives one layer up in
//! [`ScheduleService`](crate::service::ScheduleService).

mod engine;
mod summary;

pub use engine::ScheduleEngine;
pub use summary::{
    AcademyGroup, AcademyStatistics, ExclusionDayCounts, ScheduleSummary, SummaryPeriod,
};

use serde::{Deserialize, Serialize};

use crate::models::{DailySchedule, ScheduleWarning};

/// Output of one computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleAvailabilityResult {
    /// Period statistics.
    pub summary: ScheduleSummary,
    /// One entry per date, in date order.
    pub daily_schedule: Vec<DailySchedule>,
    /// Advisory problems. Never fatal.
    pub errors: Vec<ScheduleWarning>,
}

impl ScheduleAvailabilityResult {
    /// Schedule of a date, if inside the period.
    pub fn day(&self, date: chrono::NaiveDate) -> Option<&DailySchedule> {
        self.daily_schedule
            .binary_search_by_key(&date, |d| d.date)
            .ok()
            .map(|idx| &self.daily_schedule[idx])
    }

    /// Whether any advisory problem was reported.
    pub fn has_warnings(&self) -> bool {
        !self.errors.is_empty()
    }
}
