//! Study schedule availability engine.
//!
//! Given a study period, a weekly block set, dated exclusions, academy
//! commitments, recurring non-study time and a scheduler policy, computes
//! a deterministic day-by-day timetable: each date's type, its composed
//! time slots and period statistics.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `ScheduleRequest`, `BlockSet`, `Exclusion`,
//!   `AcademyOccurrence`, `NonStudyBlock`, `DailySchedule`, `TimeSlot`
//! - **`resolve`**: Weekly coverage, exclusion calendar, academy and non-study time
//! - **`classify`**: Day classification policies (1730 cycle, auto)
//! - **`compose`**: Per-date slot composition
//! - **`scheduler`**: The engine and the period summary
//! - **`cache`** / **`service`**: Content-addressed result cache in front of the engine
//! - **`validation`**: Structural input checks
//! - **`config`**: Engine configuration (TOML)
//!
//! # Pipeline
//!
//! ```text
//! request ─▶ validate ─▶ resolve ─▶ classify ─▶ compose ─▶ summarize ─▶ result
//! ```
//!
//! Every stage is pure. Same request, same configuration: byte-identical
//! serialized result.
//!
//! # Quick Start
//!
//! ```
//! use chrono::NaiveDate;
//! use u_timetable::models::{BlockSet, DayType, Exclusion, ScheduleRequest, WeeklyBlock};
//! use u_timetable::scheduler::ScheduleEngine;
//!
//! let day = |d| NaiveDate::from_ymd_opt(2024, 3, d).unwrap();
//! let blocks = BlockSet::new("afternoons").with_blocks(WeeklyBlock::every_day(
//!     "14:00".parse().unwrap(),
//!     "18:00".parse().unwrap(),
//! ));
//! let request = ScheduleRequest::new(day(1), day(14))
//!     .with_block_set(blocks)
//!     .with_exclusion(Exclusion::vacation(day(5)));
//!
//! let result = ScheduleEngine::default().calculate(&request).unwrap();
//! assert_eq!(result.daily_schedule[4].day_type, DayType::Vacation);
//! assert_eq!(result.summary.total_exclusion_days.vacation, 1);
//! ```

pub mod cache;
pub mod classify;
pub mod compose;
pub mod config;
pub mod error;
pub mod models;
pub mod resolve;
pub mod scheduler;
pub mod service;
pub mod validation;

pub use cache::{CacheKey, ScheduleCache};
pub use config::EngineConfig;
pub use error::{Result, ScheduleError};
pub use scheduler::{ScheduleAvailabilityResult, ScheduleEngine, ScheduleSummary};
pub use service::ScheduleService;
