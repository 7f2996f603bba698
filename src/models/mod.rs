//! Schedule availability domain models.
//!
//! Input types describe what the caller already knows (a study period, a
//! weekly block set, exclusions, academy commitments, non-study time and a
//! scheduler policy). Output types describe the computed day-by-day
//! timetable. All of them are plain `serde` data; none is mutated after
//! construction.
//!
//! # Domain Glossary
//!
//! | Type | Meaning |
//! |------|---------|
//! | `BlockSet` | Named weekly-recurring study windows |
//! | `Exclusion` | A dated vacation, personal matter, designated holiday or other |
//! | `AcademyOccurrence` | Weekly external class plus travel time |
//! | `NonStudyBlock` | Recurring meal, sleep or custom non-study time |
//! | `DailySchedule` | One date's day type and composed time slots |

mod academy;
mod block;
mod exclusion;
mod interval;
mod non_study;
mod request;
mod schedule;

pub(crate) use interval::clamped_interval;

pub use academy::AcademyOccurrence;
pub use block::{BlockSet, WeeklyBlock};
pub use exclusion::{Exclusion, ExclusionType};
pub use interval::{
    weekday_from_index, ClockTime, IntervalSet, ParseClockTimeError, TimeInterval, WeekTable,
    MINUTES_PER_DAY, WEEKDAYS,
};
pub use non_study::{NonStudyBlock, NonStudyKind};
pub use request::{DatePeriod, ReviewScope, ScheduleRequest, SchedulerOptions, SchedulerType};
pub use schedule::{DailySchedule, DayType, ScheduleWarning, SlotType, TimeSlot, WarningKind};
