//! Cached schedule computation.

use std::sync::Arc;

use tracing::debug;

use crate::cache::{CacheKey, ScheduleCache};
use crate::error::Result;
use crate::models::ScheduleRequest;
use crate::scheduler::{ScheduleAvailabilityResult, ScheduleEngine};

/// Engine fronted by a shared result cache.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use chrono::NaiveDate;
/// use u_timetable::cache::ScheduleCache;
/// use u_timetable::models::ScheduleRequest;
/// use u_timetable::scheduler::ScheduleEngine;
/// use u_timetable::service::ScheduleService;
///
/// let cache = Arc::new(ScheduleCache::new());
/// let service = ScheduleService::new(ScheduleEngine::default(), Arc::clone(&cache));
///
/// let day = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
/// let request = ScheduleRequest::new(day, day);
/// let first = service.calculate(&request).unwrap();
/// let second = service.calculate(&request).unwrap();
/// assert!(Arc::ptr_eq(&first, &second));
/// assert_eq!(cache.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct ScheduleService {
    engine: ScheduleEngine,
    cache: Arc<ScheduleCache>,
}

impl ScheduleService {
    /// Creates a service over a shared cache.
    pub fn new(engine: ScheduleEngine, cache: Arc<ScheduleCache>) -> Self {
        Self { engine, cache }
    }

    /// The underlying engine.
    pub fn engine(&self) -> &ScheduleEngine {
        &self.engine
    }

    /// The shared cache.
    pub fn cache(&self) -> &Arc<ScheduleCache> {
        &self.cache
    }

    /// Returns the cached result for `request`, computing it on a miss.
    ///
    /// The key covers the engine configuration, so services with different
    /// configurations may share one cache. Only successful computations
    /// are cached; an invalid request is re-validated every time.
    pub fn calculate(&self, request: &ScheduleRequest) -> Result<Arc<ScheduleAvailabilityResult>> {
        let key = CacheKey::for_engine(request, self.engine.config())?;
        if let Some(hit) = self.cache.get(&key) {
            debug!(key = %key, "schedule cache hit");
            return Ok(hit);
        }

        debug!(key = %key, "schedule cache miss");
        let result = Arc::new(self.engine.calculate(request)?);
        self.cache.set(key, Arc::clone(&result));
        Ok(result)
    }
}
