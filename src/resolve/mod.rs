//! Resolution of raw configuration into weekly patterns.
//!
//! Each resolver turns one kind of caller-supplied configuration into a
//! per-weekday view the classifier and composer can work with:
//!
//! | Resolver | Input | Output |
//! |----------|-------|--------|
//! | [`WeeklyPattern`] | `BlockSet` or fallback | weekday → coverage |
//! | [`ExclusionCalendar`] | `Exclusion[]` | date → exclusions |
//! | [`AcademyResolver`] | `AcademyOccurrence[]` | weekday → travel/lesson time |
//! | [`NonStudyPattern`] | `NonStudyBlock[]` | weekday → meal/sleep time |
//!
//! All resolvers are pure. Inputs are assumed to have passed
//! [`validate_request`](crate::validation::validate_request).

mod academy;
mod exclusions;
mod non_study;
mod weekly;

pub use academy::{
    AcademyConflict, AcademyDay, AcademyEntry, AcademyPattern, AcademyResolver, FirstListedWins,
    LastListedWins, OverlapPolicy, OverlapStrategy,
};
pub use exclusions::ExclusionCalendar;
pub use non_study::{NonStudyPattern, NonStudySegment};
pub use weekly::{PatternSource, WeeklyPattern};

use tracing::warn;

use crate::models::{ScheduleWarning, WarningKind};

/// Reports academy and non-study intervals that miss all block coverage.
///
/// Such intervals subtract nothing and produce no slots. Weekdays without
/// any coverage are skipped: nothing can be studied there anyway.
pub fn coverage_warnings(
    weekly: &WeeklyPattern,
    academies: &AcademyPattern,
    non_study: &NonStudyPattern,
) -> Vec<ScheduleWarning> {
    let mut warnings = Vec::new();

    for (day, academy_day) in academies.iter() {
        let coverage = weekly.coverage(day);
        if coverage.is_empty() {
            continue;
        }
        for entry in &academy_day.entries {
            if !coverage.overlaps(&entry.footprint) {
                warn!(weekday = %day, academy = %entry.label, "academy outside block coverage");
                warnings.push(ScheduleWarning::new(
                    WarningKind::OutsideBlockCoverage,
                    format!(
                        "academy '{}' ({}) on {day} lies outside all study blocks",
                        entry.label, entry.footprint
                    ),
                ));
            }
        }
    }

    for (day, segments) in non_study.iter() {
        let coverage = weekly.coverage(day);
        if coverage.is_empty() {
            continue;
        }
        for segment in segments {
            if coverage.intersect(&segment.intervals).is_empty() {
                warn!(weekday = %day, kind = %segment.kind, "non-study time outside block coverage");
                warnings.push(ScheduleWarning::new(
                    WarningKind::OutsideBlockCoverage,
                    format!(
                        "non-study time '{}' on {day} lies outside all study blocks",
                        segment.label
                    ),
                ));
            }
        }
    }

    warnings
}
