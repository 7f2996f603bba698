//! Structural validation of schedule requests.
//!
//! Checks the request before any resolution happens and collects every
//! problem found, so the caller can show all of them at once. Detects:
//! - Inverted or over-long periods
//! - Invalid weekday indices
//! - Empty or inverted intervals
//! - Overlapping weekly blocks within one weekday of a block set
//! - Scheduler options outside their ranges
//!
//! Problems the engine can work around (overlapping academies, exclusions
//! outside the period) are not validation errors; they become warnings.

use std::collections::BTreeMap;

use crate::models::{
    weekday_from_index, ScheduleRequest, SchedulerType, TimeInterval, WeeklyBlock,
};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Period is inverted or longer than allowed.
    InvalidPeriod,
    /// A weekday index is outside `0..=6`.
    InvalidWeekday,
    /// An interval has `start >= end`.
    InvalidInterval,
    /// Two blocks of one block set overlap on the same weekday.
    OverlappingBlocks,
    /// Study/review day counts are out of range.
    InvalidSchedulerOptions,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a request.
///
/// Checks:
/// 1. `period_start <= period_end` and the period is at most `max_period_days` long
/// 2. Every weekly block has a valid weekday and `start < end`
/// 3. No two blocks overlap on the same weekday
/// 4. Every academy occurrence has a valid weekday and `start < end`
/// 5. Every non-study block has valid weekdays and `start != end`
/// 6. 1730 options: `study_days` in `1..=7`, `review_days` in `0..=3`
/// 7. Self-study allowance and additional review period are well formed
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_request(request: &ScheduleRequest, max_period_days: u64) -> ValidationResult {
    let mut errors = Vec::new();

    let period = request.period();
    if !period.is_valid() {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidPeriod,
            format!(
                "period start {} is after period end {}",
                request.period_start, request.period_end
            ),
        ));
    } else if period.len_days() > max_period_days {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidPeriod,
            format!(
                "period spans {} days, more than the allowed {max_period_days}",
                period.len_days()
            ),
        ));
    }

    if let Some(block_set) = &request.block_set {
        validate_blocks(&block_set.blocks, &mut errors);
    }

    for (idx, academy) in request.academy_schedules.iter().enumerate() {
        if academy.weekday().is_none() {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidWeekday,
                format!(
                    "academy #{idx} '{}' has invalid weekday {}",
                    academy.academy_name, academy.day_of_week
                ),
            ));
        }
        if academy.lesson().is_none() {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidInterval,
                format!(
                    "academy #{idx} '{}' has empty or inverted time {}~{}",
                    academy.academy_name, academy.start, academy.end
                ),
            ));
        }
    }

    for (idx, block) in request.non_study_time_blocks.iter().enumerate() {
        if let Some(bad) = block
            .weekdays
            .iter()
            .flatten()
            .find(|&&d| weekday_from_index(d).is_none())
        {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidWeekday,
                format!("non-study block #{idx} ({}) has invalid weekday {bad}", block.kind),
            ));
        }
        if block.start == block.end {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidInterval,
                format!(
                    "non-study block #{idx} ({}) starts and ends at {}",
                    block.kind, block.start
                ),
            ));
        }
    }

    if request.scheduler_type == SchedulerType::Timetable1730 {
        let options = &request.scheduler_options;
        if !(1..=7).contains(&options.study_days) {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidSchedulerOptions,
                format!("study_days must be between 1 and 7, got {}", options.study_days),
            ));
        }
        if options.review_days > 3 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidSchedulerOptions,
                format!("review_days must be between 0 and 3, got {}", options.review_days),
            ));
        }
    }

    if let Some(window) = &request.self_study_allowance {
        if TimeInterval::new(window.start, window.end).is_none() {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidInterval,
                format!("self-study allowance {window} is empty or inverted"),
            ));
        }
    }

    if let Some(extra) = &request.additional_review_period {
        if !extra.is_valid() {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidPeriod,
                format!(
                    "additional review period start {} is after its end {}",
                    extra.start, extra.end
                ),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates weekly blocks of one block set.
///
/// Also applied to the configured fallback set by
/// [`EngineConfig::validate`](crate::config::EngineConfig::validate), which
/// runs on TOML loading and in
/// [`ScheduleEngine::try_new`](crate::scheduler::ScheduleEngine::try_new).
pub fn validate_blocks(blocks: &[WeeklyBlock], errors: &mut Vec<ValidationError>) {
    let mut by_weekday: BTreeMap<u8, Vec<(usize, TimeInterval)>> = BTreeMap::new();

    for (idx, block) in blocks.iter().enumerate() {
        if block.weekday().is_none() {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidWeekday,
                format!("block #{idx} has invalid weekday {}", block.day_of_week),
            ));
            continue;
        }
        match block.interval() {
            Some(interval) => by_weekday
                .entry(block.day_of_week)
                .or_default()
                .push((idx, interval)),
            None => errors.push(ValidationError::new(
                ValidationErrorKind::InvalidInterval,
                format!(
                    "block #{idx} has empty or inverted time {}~{}",
                    block.start, block.end
                ),
            )),
        }
    }

    for (day, mut intervals) in by_weekday {
        intervals.sort_by_key(|(_, iv)| *iv);
        for pair in intervals.windows(2) {
            let ((a_idx, a), (b_idx, b)) = (pair[0], pair[1]);
            if a.overlaps(&b) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::OverlappingBlocks,
                    format!("blocks #{a_idx} ({a}) and #{b_idx} ({b}) overlap on weekday {day}"),
                ));
            }
        }
    }
}
