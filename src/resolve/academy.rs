//! Academy schedule resolution.
//!
//! Expands weekly academy occurrences into per-weekday occupied time:
//! pre-travel, lesson and post-travel. Occurrences whose footprints
//! (lesson plus travel) overlap on one weekday are a conflict; an
//! [`OverlapStrategy`] decides which occurrence keeps the contested
//! minutes. Losing occurrences are still listed for display, they just
//! occupy less time.

use std::fmt::Debug;
use std::sync::Arc;

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::models::{clamped_interval, AcademyOccurrence, IntervalSet, TimeInterval, WeekTable};

/// Decides the order in which overlapping occurrences claim time.
///
/// Occurrences earlier in the returned order win contested minutes.
pub trait OverlapStrategy: Send + Sync + Debug {
    /// Strategy name.
    fn name(&self) -> &'static str;

    /// Claim order over `count` occurrences listed on one weekday.
    ///
    /// Must be a permutation of `0..count`.
    fn claim_order(&self, count: usize) -> Vec<usize>;
}

/// Earlier-listed occurrences keep contested minutes.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstListedWins;

impl OverlapStrategy for FirstListedWins {
    fn name(&self) -> &'static str {
        "first_listed_wins"
    }

    fn claim_order(&self, count: usize) -> Vec<usize> {
        (0..count).collect()
    }
}

/// Later-listed occurrences keep contested minutes.
#[derive(Debug, Clone, Copy, Default)]
pub struct LastListedWins;

impl OverlapStrategy for LastListedWins {
    fn name(&self) -> &'static str {
        "last_listed_wins"
    }

    fn claim_order(&self, count: usize) -> Vec<usize> {
        (0..count).rev().collect()
    }
}

/// Configurable selector for the built-in strategies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlapPolicy {
    /// See [`FirstListedWins`].
    #[default]
    FirstListedWins,
    /// See [`LastListedWins`].
    LastListedWins,
}

impl OverlapPolicy {
    /// Strategy implementing this policy.
    pub fn strategy(self) -> Arc<dyn OverlapStrategy> {
        match self {
            Self::FirstListedWins => Arc::new(FirstListedWins),
            Self::LastListedWins => Arc::new(LastListedWins),
        }
    }
}

/// One occurrence on one weekday, with the minutes it actually claims.
#[derive(Debug, Clone, PartialEq)]
pub struct AcademyEntry {
    /// Source occurrence.
    pub occurrence: AcademyOccurrence,
    /// Display label.
    pub label: String,
    /// Lesson plus travel, before conflict resolution.
    pub footprint: TimeInterval,
    /// Claimed travel before the lesson.
    pub pre_travel: IntervalSet,
    /// Claimed lesson time.
    pub lesson: IntervalSet,
    /// Claimed travel after the lesson.
    pub post_travel: IntervalSet,
}

impl AcademyEntry {
    /// All claimed minutes of this entry.
    pub fn claimed(&self) -> IntervalSet {
        self.pre_travel.union(&self.lesson).union(&self.post_travel)
    }

    /// Claimed travel minutes (both directions).
    pub fn travel(&self) -> IntervalSet {
        self.pre_travel.union(&self.post_travel)
    }
}

/// Two occurrences whose footprints overlap.
#[derive(Debug, Clone, PartialEq)]
pub struct AcademyConflict {
    /// Label of the earlier-listed occurrence.
    pub first: String,
    /// Label of the later-listed occurrence.
    pub second: String,
    /// Overlapping part of the footprints.
    pub overlap: TimeInterval,
}

/// Resolved academy time on one weekday.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AcademyDay {
    /// Entries in listed order.
    pub entries: Vec<AcademyEntry>,
    /// Pairwise footprint conflicts.
    pub conflicts: Vec<AcademyConflict>,
}

impl AcademyDay {
    /// Union of claimed minutes.
    pub fn occupied(&self) -> IntervalSet {
        self.entries
            .iter()
            .fold(IntervalSet::new(), |acc, e| acc.union(&e.claimed()))
    }

    /// Whether no occurrence falls on this weekday.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Resolved academy time for the whole week.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AcademyPattern {
    days: WeekTable<AcademyDay>,
}

impl AcademyPattern {
    /// Resolved time on a weekday.
    pub fn day(&self, weekday: Weekday) -> &AcademyDay {
        self.days.get(weekday)
    }

    /// Iterates weekdays Sunday-first.
    pub fn iter(&self) -> impl Iterator<Item = (Weekday, &AcademyDay)> {
        self.days.iter()
    }
}

/// Expands academy occurrences.
///
/// # Example
///
/// ```
/// use chrono::Weekday;
/// use u_timetable::models::AcademyOccurrence;
/// use u_timetable::resolve::{AcademyResolver, OverlapPolicy};
///
/// let resolver = AcademyResolver::new(OverlapPolicy::FirstListedWins.strategy(), 60);
/// let math = AcademyOccurrence::parse(1, "16:00", "17:00", "Math")
///     .unwrap()
///     .with_travel_minutes(30);
/// let pattern = resolver.resolve(&[math]);
///
/// let monday = pattern.day(Weekday::Mon);
/// assert_eq!(monday.occupied().total_minutes(), 120);
/// ```
#[derive(Debug, Clone)]
pub struct AcademyResolver {
    strategy: Arc<dyn OverlapStrategy>,
    default_travel_minutes: u16,
}

impl AcademyResolver {
    /// Creates a resolver.
    pub fn new(strategy: Arc<dyn OverlapStrategy>, default_travel_minutes: u16) -> Self {
        Self {
            strategy,
            default_travel_minutes,
        }
    }

    /// Name of the overlap strategy in use.
    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    /// Resolves occurrences into per-weekday occupied time.
    ///
    /// Occurrences with an invalid weekday or interval are skipped;
    /// validation rejects them before resolution.
    pub fn resolve(&self, occurrences: &[AcademyOccurrence]) -> AcademyPattern {
        let mut listed: WeekTable<Vec<&AcademyOccurrence>> = WeekTable::default();
        for occurrence in occurrences {
            if let (Some(day), Some(_)) = (occurrence.weekday(), occurrence.lesson()) {
                listed.get_mut(day).push(occurrence);
            }
        }

        let mut pattern = AcademyPattern::default();
        for (day, list) in listed.iter() {
            *pattern.days.get_mut(day) = self.resolve_day(list);
        }
        pattern
    }

    fn resolve_day(&self, list: &[&AcademyOccurrence]) -> AcademyDay {
        let raw: Vec<RawEntry> = list
            .iter()
            .filter_map(|o| RawEntry::expand(o, self.default_travel_minutes))
            .collect();

        let mut conflicts = Vec::new();
        for (i, a) in raw.iter().enumerate() {
            for b in &raw[i + 1..] {
                if let Some(overlap) = a.footprint.intersect(&b.footprint) {
                    conflicts.push(AcademyConflict {
                        first: a.occurrence.label(),
                        second: b.occurrence.label(),
                        overlap,
                    });
                }
            }
        }

        let mut claimed_sets: Vec<Option<[IntervalSet; 3]>> = vec![None; raw.len()];
        let mut taken = IntervalSet::new();
        for idx in self.strategy.claim_order(raw.len()) {
            let Some(entry) = raw.get(idx) else {
                continue;
            };
            let claim = |iv: Option<TimeInterval>| {
                iv.map(IntervalSet::single)
                    .unwrap_or_default()
                    .subtract(&taken)
            };
            claimed_sets[idx] = Some([claim(entry.pre), claim(Some(entry.lesson)), claim(entry.post)]);
            taken = taken.union(&IntervalSet::single(entry.footprint));
        }

        let entries = raw
            .into_iter()
            .zip(claimed_sets)
            .map(|(entry, claimed)| {
                let [pre_travel, lesson, post_travel] = claimed.unwrap_or_default();
                AcademyEntry {
                    label: entry.occurrence.label(),
                    occurrence: entry.occurrence.clone(),
                    footprint: entry.footprint,
                    pre_travel,
                    lesson,
                    post_travel,
                }
            })
            .collect();

        AcademyDay { entries, conflicts }
    }
}

impl Default for AcademyResolver {
    fn default() -> Self {
        Self::new(Arc::new(FirstListedWins), crate::config::DEFAULT_TRAVEL_MINUTES)
    }
}

struct RawEntry<'a> {
    occurrence: &'a AcademyOccurrence,
    pre: Option<TimeInterval>,
    lesson: TimeInterval,
    post: Option<TimeInterval>,
    footprint: TimeInterval,
}

impl<'a> RawEntry<'a> {
    fn expand(occurrence: &'a AcademyOccurrence, default_travel: u16) -> Option<Self> {
        let lesson = occurrence.lesson()?;
        let travel = i32::from(occurrence.travel_minutes_or(default_travel));
        let start = i32::from(lesson.start.minutes());
        let end = i32::from(lesson.end.minutes());

        let pre = clamped_interval(start - travel, start);
        let post = clamped_interval(end, end + travel);
        let footprint = TimeInterval {
            start: pre.map_or(lesson.start, |p| p.start),
            end: post.map_or(lesson.end, |p| p.end),
        };
        Some(Self {
            occurrence,
            pre,
            lesson,
            post,
            footprint,
        })
    }
}
