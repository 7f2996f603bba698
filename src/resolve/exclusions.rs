//! Exclusion calendar: date → exclusions lookup.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::warn;

use crate::models::{DatePeriod, Exclusion, ScheduleWarning, WarningKind};

/// Exclusions of one period, keyed by date.
///
/// Each `(date, type)` appears at most once. A date may carry several
/// exclusions of different types.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExclusionCalendar {
    by_date: BTreeMap<NaiveDate, Vec<Exclusion>>,
}

impl ExclusionCalendar {
    /// Builds the calendar for `period`.
    ///
    /// Duplicate `(date, type)` pairs keep the first entry; dates outside
    /// the period are ignored. Both are reported as warnings.
    pub fn build(exclusions: &[Exclusion], period: &DatePeriod) -> (Self, Vec<ScheduleWarning>) {
        let mut by_date: BTreeMap<NaiveDate, Vec<Exclusion>> = BTreeMap::new();
        let mut warnings = Vec::new();

        for exclusion in exclusions {
            if !period.contains(exclusion.date) {
                warn!(date = %exclusion.date, "exclusion outside period ignored");
                warnings.push(
                    ScheduleWarning::new(
                        WarningKind::ExclusionOutOfPeriod,
                        format!(
                            "exclusion on {} is outside {}..{} and was ignored",
                            exclusion.date, period.start, period.end
                        ),
                    )
                    .on(exclusion.date),
                );
                continue;
            }

            let day = by_date.entry(exclusion.date).or_default();
            if day.iter().any(|e| e.key() == exclusion.key()) {
                warn!(date = %exclusion.date, "duplicate exclusion ignored");
                warnings.push(
                    ScheduleWarning::new(
                        WarningKind::DuplicateExclusion,
                        format!(
                            "duplicate {:?} exclusion on {} was ignored",
                            exclusion.exclusion_type, exclusion.date
                        ),
                    )
                    .on(exclusion.date),
                );
                continue;
            }
            day.push(exclusion.clone());
        }

        (Self { by_date }, warnings)
    }

    /// All exclusions on a date.
    pub fn exclusions_on(&self, date: NaiveDate) -> &[Exclusion] {
        self.by_date.get(&date).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The exclusion that decides the date's type.
    ///
    /// Precedence: designated holiday, vacation, personal, other.
    pub fn classify(&self, date: NaiveDate) -> Option<&Exclusion> {
        self.exclusions_on(date)
            .iter()
            .min_by_key(|e| e.exclusion_type.precedence())
    }

    /// Whether the date is a designated holiday.
    pub fn is_designated_holiday(&self, date: NaiveDate) -> bool {
        self.classify(date)
            .is_some_and(|e| !e.exclusion_type.is_leave())
    }

    /// Number of kept exclusions.
    pub fn len(&self) -> usize {
        self.by_date.values().map(Vec::len).sum()
    }

    /// Whether no exclusion was kept.
    pub fn is_empty(&self) -> bool {
        self.by_date.is_empty()
    }
}
