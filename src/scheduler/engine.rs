//! The availability engine.

use chrono::Datelike;
use tracing::{debug, trace, warn};

use crate::classify::classifier_for;
use crate::compose::SlotComposer;
use crate::config::EngineConfig;
use crate::error::{Result, ScheduleError};
use crate::models::{
    AcademyOccurrence, DailySchedule, ScheduleRequest, ScheduleWarning, WarningKind,
};
use crate::resolve::{
    coverage_warnings, AcademyDay, AcademyResolver, ExclusionCalendar, NonStudyPattern,
    WeeklyPattern,
};
use crate::validation::validate_request;

use super::{ScheduleAvailabilityResult, ScheduleSummary};

/// Computes day-by-day availability.
///
/// Holds only immutable configuration and can be shared freely across
/// threads.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use u_timetable::config::EngineConfig;
/// use u_timetable::models::{AcademyOccurrence, BlockSet, ScheduleRequest, WeeklyBlock};
/// use u_timetable::scheduler::ScheduleEngine;
///
/// let blocks = BlockSet::new("afternoons").with_blocks(WeeklyBlock::every_day(
///     "14:00".parse().unwrap(),
///     "18:00".parse().unwrap(),
/// ));
/// let request = ScheduleRequest::new(
///     NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 3, 14).unwrap(),
/// )
/// .with_block_set(blocks)
/// .with_academy(
///     AcademyOccurrence::parse(1, "16:00", "17:00", "Math")
///         .unwrap()
///         .with_travel_minutes(30),
/// );
///
/// let result = ScheduleEngine::new(EngineConfig::default())
///     .calculate(&request)
///     .unwrap();
/// assert_eq!(result.daily_schedule.len(), 14);
/// assert_eq!(result.summary.total_review_days, 2);
/// ```
#[derive(Debug, Clone)]
pub struct ScheduleEngine {
    config: EngineConfig,
    academies: AcademyResolver,
}

impl ScheduleEngine {
    /// Creates an engine without checking the configuration.
    ///
    /// Invalid fallback blocks are skipped during resolution. Use
    /// [`ScheduleEngine::try_new`] for configuration built in code.
    pub fn new(config: EngineConfig) -> Self {
        let academies = AcademyResolver::new(
            config.academy_overlap.strategy(),
            config.default_travel_minutes,
        );
        Self { config, academies }
    }

    /// Creates an engine after validating the configuration.
    ///
    /// # Errors
    /// [`ScheduleError::InvalidInput`] if the fallback blocks or the
    /// default self-study window are malformed.
    pub fn try_new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(config))
    }

    /// Engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Computes the timetable of a request.
    ///
    /// # Errors
    /// - [`ScheduleError::InvalidInput`] if the request fails validation
    /// - [`ScheduleError::SlotOverlap`] if composition breaks its invariant
    pub fn calculate(&self, request: &ScheduleRequest) -> Result<ScheduleAvailabilityResult> {
        validate_request(request, self.config.max_period_days)
            .map_err(ScheduleError::InvalidInput)?;

        let period = request.period();
        debug!(
            start = %period.start,
            end = %period.end,
            scheduler = ?request.scheduler_type,
            "calculating schedule availability"
        );

        let weekly = WeeklyPattern::resolve(
            request.block_set.as_ref(),
            &self.config.default_block_set,
        );
        if weekly.is_fallback() {
            debug!("no block set selected, using fallback blocks");
        }
        let (calendar, mut warnings) = ExclusionCalendar::build(&request.exclusions, &period);
        let academies = self.academies.resolve(&request.academy_schedules);
        let non_study = NonStudyPattern::resolve(&request.non_study_time_blocks);
        warnings.extend(coverage_warnings(&weekly, &academies, &non_study));

        let classifier = classifier_for(request);
        let allowance = request.self_study_allowance.or_else(|| {
            weekly
                .is_fallback()
                .then_some(self.config.default_self_study_allowance)
                .flatten()
        });
        let composer = SlotComposer::new().with_self_study_allowance(allowance);

        let mut daily = Vec::with_capacity(period.len_days() as usize);
        for assignment in classifier.classify(&period, &calendar) {
            let weekday = assignment.date.weekday();
            let academy_day = academies.day(weekday);
            warnings.extend(overlap_warnings(assignment.date, academy_day));

            let composed = composer.compose(
                assignment.date,
                assignment.day_type,
                weekly.coverage(weekday),
                academy_day,
                non_study.segments(weekday),
            )?;
            trace!(
                date = %assignment.date,
                day_type = assignment.day_type.label(),
                slots = composed.time_slots.len(),
                study_hours = composed.study_hours,
                "composed day"
            );

            daily.push(DailySchedule {
                date: assignment.date,
                day_type: assignment.day_type,
                week_number: assignment.week_number,
                time_slots: composed.time_slots,
                study_hours: composed.study_hours,
                exclusion: calendar.classify(assignment.date).cloned(),
                academy_schedules: self.listed_academies(academy_day),
            });
        }

        let summary = ScheduleSummary::from_daily(&period, &daily);
        debug!(
            days = summary.total_days,
            study_hours = summary.total_study_hours,
            warnings = warnings.len(),
            "schedule availability calculated"
        );

        Ok(ScheduleAvailabilityResult {
            summary,
            daily_schedule: daily,
            errors: warnings,
        })
    }

    /// Occurrences of a weekday with their effective travel time filled in.
    fn listed_academies(&self, day: &AcademyDay) -> Vec<AcademyOccurrence> {
        day.entries
            .iter()
            .map(|entry| {
                let travel = entry
                    .occurrence
                    .travel_minutes_or(self.config.default_travel_minutes);
                entry.occurrence.clone().with_travel_minutes(travel)
            })
            .collect()
    }
}

impl Default for ScheduleEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

fn overlap_warnings(date: chrono::NaiveDate, day: &AcademyDay) -> Vec<ScheduleWarning> {
    day.conflicts
        .iter()
        .map(|conflict| {
            warn!(%date, first = %conflict.first, second = %conflict.second, "academy overlap");
            ScheduleWarning::new(
                WarningKind::AcademyOverlap,
                format!(
                    "academies '{}' and '{}' overlap at {}",
                    conflict.first, conflict.second, conflict.overlap
                ),
            )
            .on(date)
        })
        .collect()
}
