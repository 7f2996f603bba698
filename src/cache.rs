//! Content-addressed result cache.
//!
//! Results are keyed by a SHA-256 digest of the request's canonical JSON,
//! so two requests with the same inputs share one entry no matter how they
//! were built. Keys derived with [`CacheKey::for_engine`] also cover the
//! engine configuration, so engines with different settings can share
//! one cache. A block set that carries an `id` contributes only its id;
//! editing such a block set must change its id (or the caller must
//! [`invalidate`](ScheduleCache::invalidate) affected keys).
//!
//! The cache has no TTL and no size bound. It is an explicit instance,
//! typically created once per process and shared through an `Arc`.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use chrono::NaiveDate;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::config::EngineConfig;
use crate::error::Result;
use crate::models::{
    AcademyOccurrence, DatePeriod, Exclusion, NonStudyBlock, ScheduleRequest, SchedulerOptions,
    SchedulerType, TimeInterval, WeeklyBlock,
};
use crate::scheduler::ScheduleAvailabilityResult;

/// Hex-encoded SHA-256 digest identifying a request.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CacheKey(String);

/// Block set as it contributes to the key.
#[derive(Serialize)]
#[serde(rename_all = "snake_case")]
enum BlockSetKey<'a> {
    Id(&'a str),
    Inline(&'a [WeeklyBlock]),
    Fallback,
}

#[derive(Serialize)]
struct KeyMaterial<'a> {
    period_start: NaiveDate,
    period_end: NaiveDate,
    block_set: BlockSetKey<'a>,
    exclusions: &'a [Exclusion],
    academy_schedules: &'a [AcademyOccurrence],
    non_study_time_blocks: &'a [NonStudyBlock],
    scheduler_type: SchedulerType,
    scheduler_options: SchedulerOptions,
    self_study_allowance: Option<TimeInterval>,
    additional_review_period: Option<DatePeriod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    config: Option<&'a EngineConfig>,
}

impl CacheKey {
    /// Derives the key of a request.
    ///
    /// # Example
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use u_timetable::cache::CacheKey;
    /// use u_timetable::models::ScheduleRequest;
    ///
    /// let day = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
    /// let a = CacheKey::for_request(&ScheduleRequest::new(day, day)).unwrap();
    /// let b = CacheKey::for_request(&ScheduleRequest::new(day, day)).unwrap();
    /// assert_eq!(a, b);
    /// assert_eq!(a.as_str().len(), 64);
    /// ```
    pub fn for_request(request: &ScheduleRequest) -> Result<Self> {
        Self::derive(request, None)
    }

    /// Derives the key of a request computed under `config`.
    ///
    /// Fallback blocks, default travel time and the overlap policy all
    /// change the result, so they are part of the key.
    pub fn for_engine(request: &ScheduleRequest, config: &EngineConfig) -> Result<Self> {
        Self::derive(request, Some(config))
    }

    fn derive(request: &ScheduleRequest, config: Option<&EngineConfig>) -> Result<Self> {
        let block_set = match &request.block_set {
            Some(set) => match set.id.as_deref() {
                Some(id) => BlockSetKey::Id(id),
                None => BlockSetKey::Inline(&set.blocks),
            },
            None => BlockSetKey::Fallback,
        };
        let material = KeyMaterial {
            period_start: request.period_start,
            period_end: request.period_end,
            block_set,
            exclusions: &request.exclusions,
            academy_schedules: &request.academy_schedules,
            non_study_time_blocks: &request.non_study_time_blocks,
            scheduler_type: request.scheduler_type,
            scheduler_options: request.scheduler_options,
            self_study_allowance: request.self_study_allowance,
            additional_review_period: request.additional_review_period,
            config,
        };

        let canonical = serde_json::to_vec(&material)?;
        let mut hasher = Sha256::new();
        hasher.update(&canonical);
        Ok(Self(hex::encode(hasher.finalize())))
    }

    /// The hex digest.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// In-memory result cache.
#[derive(Debug, Default)]
pub struct ScheduleCache {
    entries: RwLock<HashMap<CacheKey, Arc<ScheduleAvailabilityResult>>>,
}

impl ScheduleCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached result for a key.
    pub fn get(&self, key: &CacheKey) -> Option<Arc<ScheduleAvailabilityResult>> {
        self.entries.read().get(key).cloned()
    }

    /// Stores a result, replacing any previous entry.
    pub fn set(&self, key: CacheKey, result: Arc<ScheduleAvailabilityResult>) {
        self.entries.write().insert(key, result);
    }

    /// Whether a key is cached.
    pub fn has(&self, key: &CacheKey) -> bool {
        self.entries.read().contains_key(key)
    }

    /// Removes one entry. Returns whether it existed.
    pub fn invalidate(&self, key: &CacheKey) -> bool {
        self.entries.write().remove(key).is_some()
    }

    /// Removes every entry.
    pub fn clear(&self) {
        self.entries.write().clear();
    }

    /// Number of cached results.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}
