//! Weekly block resolution.
//!
//! Expands a block set into per-weekday coverage. The fallback block set
//! is chosen here, once; everything downstream only sees coverage.

use chrono::Weekday;

use crate::models::{BlockSet, IntervalSet, WeekTable, WeeklyBlock};

/// Where the coverage came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternSource {
    /// The request's own block set.
    BlockSet(String),
    /// The configured fallback set.
    Fallback,
}

/// Resolved weekly availability.
#[derive(Debug, Clone, PartialEq)]
pub struct WeeklyPattern {
    coverage: WeekTable<IntervalSet>,
    source: PatternSource,
}

impl WeeklyPattern {
    /// Resolves the request's block set, or `fallback` if it has none.
    ///
    /// A selected block set without any blocks counts as "none selected".
    pub fn resolve(block_set: Option<&BlockSet>, fallback: &[WeeklyBlock]) -> Self {
        match block_set.filter(|set| !set.blocks.is_empty()) {
            Some(set) => Self {
                coverage: coverage_of(&set.blocks),
                source: PatternSource::BlockSet(set.name.clone()),
            },
            None => Self {
                coverage: coverage_of(fallback),
                source: PatternSource::Fallback,
            },
        }
    }

    /// Coverage on a weekday.
    pub fn coverage(&self, weekday: Weekday) -> &IntervalSet {
        self.coverage.get(weekday)
    }

    /// Covered minutes on a weekday.
    pub fn total_minutes(&self, weekday: Weekday) -> u32 {
        self.coverage(weekday).total_minutes()
    }

    /// Whether the fallback set was used.
    pub fn is_fallback(&self) -> bool {
        self.source == PatternSource::Fallback
    }

    /// Source of the coverage.
    pub fn source(&self) -> &PatternSource {
        &self.source
    }
}

/// Unions blocks per weekday. Blocks with an invalid weekday or interval
/// are skipped; validation rejects them before resolution.
fn coverage_of(blocks: &[WeeklyBlock]) -> WeekTable<IntervalSet> {
    let mut table: WeekTable<Vec<_>> = WeekTable::default();
    for block in blocks {
        if let (Some(day), Some(interval)) = (block.weekday(), block.interval()) {
            table.get_mut(day).push(interval);
        }
    }

    let mut coverage: WeekTable<IntervalSet> = WeekTable::default();
    for (day, intervals) in table.iter() {
        *coverage.get_mut(day) = IntervalSet::from_intervals(intervals.iter().copied());
    }
    coverage
}
