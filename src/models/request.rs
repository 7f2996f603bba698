//! Computation input: period, weekly pattern, exclusions, commitments, policy.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use super::academy::AcademyOccurrence;
use super::block::BlockSet;
use super::exclusion::Exclusion;
use super::interval::TimeInterval;
use super::non_study::NonStudyBlock;

/// An inclusive range of calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DatePeriod {
    /// First date (inclusive).
    #[serde(rename = "period_start")]
    pub start: NaiveDate,
    /// Last date (inclusive).
    #[serde(rename = "period_end")]
    pub end: NaiveDate,
}

impl DatePeriod {
    /// Creates a period. No ordering check; see [`DatePeriod::is_valid`].
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Whether `start <= end`.
    pub fn is_valid(&self) -> bool {
        self.start <= self.end
    }

    /// Number of dates in the period (0 if inverted).
    pub fn len_days(&self) -> u64 {
        if self.is_valid() {
            (self.end - self.start).num_days() as u64 + 1
        } else {
            0
        }
    }

    /// Whether `date` lies inside the period.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Iterates every date of the period in order.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        let start = self.start;
        (0..self.len_days()).filter_map(move |offset| start.checked_add_days(Days::new(offset)))
    }
}

/// Named scheduler policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SchedulerType {
    /// Repeating study/review cycle ("1730 timetable").
    #[default]
    #[serde(rename = "1730_timetable")]
    Timetable1730,
    /// Every available date is a study date; no review cycle.
    #[serde(rename = "auto", alias = "자동스케줄러")]
    Auto,
}

/// How much material a review day revisits.
///
/// Carried through for the content recommender; the day classifier only
/// emits day types and does not read it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewScope {
    /// Review only the most recent cycle.
    #[default]
    Partial,
    /// Review everything covered so far.
    Full,
}

/// Options of the 1730 policy.
///
/// `study_days + review_days` is the cycle length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerOptions {
    /// Study days per cycle (1..=7).
    pub study_days: u8,
    /// Review days per cycle (0..=3).
    pub review_days: u8,
    /// Review coverage hint.
    pub review_scope: ReviewScope,
}

impl SchedulerOptions {
    /// Creates options with the given cycle shape.
    pub fn new(study_days: u8, review_days: u8) -> Self {
        Self {
            study_days,
            review_days,
            review_scope: ReviewScope::Partial,
        }
    }

    /// Sets the review scope.
    pub fn with_review_scope(mut self, scope: ReviewScope) -> Self {
        self.review_scope = scope;
        self
    }

    /// Cycle length in advancing days.
    pub fn cycle_length(&self) -> u32 {
        u32::from(self.study_days) + u32::from(self.review_days)
    }
}

impl Default for SchedulerOptions {
    fn default() -> Self {
        Self::new(6, 1)
    }
}

/// Everything needed for one availability computation.
///
/// Built fresh per request from caller-supplied configuration and never
/// mutated by the engine.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use u_timetable::models::{BlockSet, ScheduleRequest, SchedulerOptions, WeeklyBlock};
///
/// let start = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
/// let end = NaiveDate::from_ymd_opt(2024, 3, 14).unwrap();
/// let blocks = BlockSet::new("afternoons").with_blocks(WeeklyBlock::every_day(
///     "14:00".parse().unwrap(),
///     "18:00".parse().unwrap(),
/// ));
///
/// let request = ScheduleRequest::new(start, end)
///     .with_block_set(blocks)
///     .with_scheduler_options(SchedulerOptions::new(6, 1));
/// assert_eq!(request.period().len_days(), 14);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScheduleRequest {
    /// First date of the study period.
    pub period_start: NaiveDate,
    /// Last date of the study period (inclusive).
    pub period_end: NaiveDate,
    /// Selected weekly block set; `None` falls back to the configured default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_set: Option<BlockSet>,
    /// Dated exclusions.
    #[serde(default)]
    pub exclusions: Vec<Exclusion>,
    /// Recurring academy commitments, in priority order.
    #[serde(default)]
    pub academy_schedules: Vec<AcademyOccurrence>,
    /// Recurring non-study time.
    #[serde(default)]
    pub non_study_time_blocks: Vec<NonStudyBlock>,
    /// Scheduler policy.
    #[serde(default)]
    pub scheduler_type: SchedulerType,
    /// Policy options.
    #[serde(default)]
    pub scheduler_options: SchedulerOptions,
    /// Daily self-study window configured upstream, passed through as
    /// `self_study` on study and review days.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub self_study_allowance: Option<TimeInterval>,
    /// Trailing period whose study days are reallocated to review.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_review_period: Option<DatePeriod>,
}

impl ScheduleRequest {
    /// Creates a request with defaults for everything but the period.
    pub fn new(period_start: NaiveDate, period_end: NaiveDate) -> Self {
        Self {
            period_start,
            period_end,
            block_set: None,
            exclusions: Vec::new(),
            academy_schedules: Vec::new(),
            non_study_time_blocks: Vec::new(),
            scheduler_type: SchedulerType::Timetable1730,
            scheduler_options: SchedulerOptions::default(),
            self_study_allowance: None,
            additional_review_period: None,
        }
    }

    /// The requested period.
    pub fn period(&self) -> DatePeriod {
        DatePeriod::new(self.period_start, self.period_end)
    }

    /// Sets the block set.
    pub fn with_block_set(mut self, block_set: BlockSet) -> Self {
        self.block_set = Some(block_set);
        self
    }

    /// Adds an exclusion.
    pub fn with_exclusion(mut self, exclusion: Exclusion) -> Self {
        self.exclusions.push(exclusion);
        self
    }

    /// Adds an academy occurrence.
    pub fn with_academy(mut self, occurrence: AcademyOccurrence) -> Self {
        self.academy_schedules.push(occurrence);
        self
    }

    /// Adds a non-study block.
    pub fn with_non_study(mut self, block: NonStudyBlock) -> Self {
        self.non_study_time_blocks.push(block);
        self
    }

    /// Sets the scheduler policy.
    pub fn with_scheduler_type(mut self, scheduler_type: SchedulerType) -> Self {
        self.scheduler_type = scheduler_type;
        self
    }

    /// Sets the policy options.
    pub fn with_scheduler_options(mut self, options: SchedulerOptions) -> Self {
        self.scheduler_options = options;
        self
    }

    /// Sets the self-study allowance.
    pub fn with_self_study_allowance(mut self, window: TimeInterval) -> Self {
        self.self_study_allowance = Some(window);
        self
    }

    /// Sets the additional review period.
    pub fn with_additional_review_period(mut self, period: DatePeriod) -> Self {
        self.additional_review_period = Some(period);
        self
    }
}
