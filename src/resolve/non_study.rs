//! Non-study time resolution.

use chrono::Weekday;

use crate::models::{IntervalSet, NonStudyBlock, NonStudyKind, WeekTable};

/// One non-study block as it applies on a weekday.
#[derive(Debug, Clone, PartialEq)]
pub struct NonStudySegment {
    /// Category.
    pub kind: NonStudyKind,
    /// Display label: the description if given, otherwise the kind.
    pub label: String,
    /// Occupied minutes.
    pub intervals: IntervalSet,
}

/// Non-study time for the whole week.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NonStudyPattern {
    days: WeekTable<Vec<NonStudySegment>>,
}

impl NonStudyPattern {
    /// Expands blocks onto the weekdays they apply to.
    ///
    /// Unscoped blocks apply to all seven weekdays; blocks wrapping past
    /// midnight occupy both ends of the same day.
    pub fn resolve(blocks: &[NonStudyBlock]) -> Self {
        let mut days: WeekTable<Vec<NonStudySegment>> = WeekTable::default();
        for block in blocks {
            let intervals = IntervalSet::from_intervals(block.intervals());
            if intervals.is_empty() {
                continue;
            }
            let label = block
                .description
                .clone()
                .filter(|d| !d.is_empty())
                .unwrap_or_else(|| block.kind.to_string());
            for day in block.active_weekdays() {
                days.get_mut(day).push(NonStudySegment {
                    kind: block.kind,
                    label: label.clone(),
                    intervals: intervals.clone(),
                });
            }
        }
        Self { days }
    }

    /// Segments on a weekday, in listed order.
    pub fn segments(&self, weekday: Weekday) -> &[NonStudySegment] {
        self.days.get(weekday)
    }

    /// Union of non-study minutes on a weekday.
    pub fn occupied(&self, weekday: Weekday) -> IntervalSet {
        IntervalSet::from_intervals(
            self.segments(weekday)
                .iter()
                .flat_map(|s| s.intervals.iter().copied()),
        )
    }

    /// Iterates weekdays Sunday-first.
    pub fn iter(&self) -> impl Iterator<Item = (Weekday, &[NonStudySegment])> {
        self.days.iter().map(|(day, segments)| (day, segments.as_slice()))
    }
}
