//! Time-of-day interval model.
//!
//! Every availability computation in this crate works on wall-clock minutes
//! within a single calendar day. Day boundaries are date-only; nothing here
//! knows about timezones.
//!
//! # Time Model
//! A [`ClockTime`] is a minute offset from local midnight in `00:00..=24:00`.
//! `24:00` is only meaningful as an exclusive interval end.
//!
//! # Interval Semantics
//! [`TimeInterval`] is half-open: `[start, end)`. Two intervals that merely
//! touch (`a.end == b.start`) do not overlap. [`IntervalSet`] keeps its
//! members sorted and disjoint, coalescing touching neighbours.

use std::fmt;
use std::str::FromStr;

use chrono::Weekday;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Minutes in one calendar day.
pub const MINUTES_PER_DAY: u16 = 24 * 60;

/// A wall-clock time with minute granularity.
///
/// Serialized as `"HH:MM"`.
///
/// # Examples
///
/// ```
/// use u_timetable::models::ClockTime;
///
/// let t: ClockTime = "14:30".parse().unwrap();
/// assert_eq!(t.minutes(), 14 * 60 + 30);
/// assert_eq!(t.to_string(), "14:30");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ClockTime(u16);

impl ClockTime {
    /// Midnight at the start of the day.
    pub const MIDNIGHT: Self = Self(0);
    /// Midnight at the end of the day (exclusive bound only).
    pub const END_OF_DAY: Self = Self(MINUTES_PER_DAY);

    /// Creates a time from hours and minutes.
    ///
    /// Returns `None` when the value lies outside `00:00..=24:00`.
    pub fn from_hm(hours: u16, minutes: u16) -> Option<Self> {
        if minutes >= 60 {
            return None;
        }
        Self::from_minutes(hours.checked_mul(60)?.checked_add(minutes)?)
    }

    /// Creates a time from a minute offset since midnight.
    pub fn from_minutes(minutes: u16) -> Option<Self> {
        (minutes <= MINUTES_PER_DAY).then_some(Self(minutes))
    }

    /// Minute offset, clamped into the day.
    ///
    /// Used for travel padding, which may reach past either midnight.
    pub fn saturating_from_minutes(minutes: i32) -> Self {
        Self(minutes.clamp(0, MINUTES_PER_DAY as i32) as u16)
    }

    /// Minutes since midnight.
    #[inline]
    pub fn minutes(self) -> u16 {
        self.0
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

/// Error produced when a `"HH:MM"` string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid clock time '{0}', expected HH:MM between 00:00 and 24:00")]
pub struct ParseClockTimeError(String);

impl FromStr for ClockTime {
    type Err = ParseClockTimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseClockTimeError(s.to_string());
        let (h, m) = s.trim().split_once(':').ok_or_else(err)?;
        let hours: u16 = h.parse().map_err(|_| err())?;
        // Accept "HH:MM:SS" as sent by some form widgets; seconds are dropped.
        let minutes: u16 = m
            .split(':')
            .next()
            .and_then(|m| m.parse().ok())
            .ok_or_else(err)?;
        Self::from_hm(hours, minutes).ok_or_else(err)
    }
}

impl Serialize for ClockTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ClockTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// A time-of-day interval `[start, end)`.
///
/// Never persisted; always derived from blocks, academy occurrences or
/// non-study blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimeInterval {
    /// Interval start (inclusive).
    pub start: ClockTime,
    /// Interval end (exclusive).
    pub end: ClockTime,
}

impl TimeInterval {
    /// Creates an interval. Returns `None` unless `start < end`.
    pub fn new(start: ClockTime, end: ClockTime) -> Option<Self> {
        (start < end).then_some(Self { start, end })
    }

    /// Creates an interval from `"HH:MM"` strings.
    ///
    /// Convenience for tests and configuration defaults.
    pub fn parse(start: &str, end: &str) -> Option<Self> {
        Self::new(start.parse().ok()?, end.parse().ok()?)
    }

    fn from_raw(start: u16, end: u16) -> Option<Self> {
        Self::new(ClockTime(start), ClockTime(end))
    }

    /// Duration in minutes; zero for an inverted interval built from
    /// deserialized fields.
    #[inline]
    pub fn duration_minutes(&self) -> u32 {
        u32::from(self.end.0.saturating_sub(self.start.0))
    }

    /// Whether two intervals share at least one minute.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Overlapping part of two intervals, if any.
    pub fn intersect(&self, other: &Self) -> Option<Self> {
        Self::new(self.start.max(other.start), self.end.min(other.end))
    }

    /// Removes `other` from `self`, leaving zero, one or two pieces.
    pub fn subtract(&self, other: &Self) -> Vec<Self> {
        if !self.overlaps(other) {
            return vec![*self];
        }
        let mut pieces = Vec::with_capacity(2);
        if let Some(head) = Self::new(self.start, other.start) {
            pieces.push(head);
        }
        if let Some(tail) = Self::new(other.end, self.end) {
            pieces.push(tail);
        }
        pieces
    }
}

impl fmt::Display for TimeInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}~{}", self.start, self.end)
    }
}

/// A normalized set of intervals within one day.
///
/// Invariant: members are sorted by start, pairwise disjoint and never
/// touching (touching members are coalesced).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct IntervalSet(Vec<TimeInterval>);

impl IntervalSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the union of arbitrary intervals.
    pub fn from_intervals(intervals: impl IntoIterator<Item = TimeInterval>) -> Self {
        let mut sorted: Vec<TimeInterval> = intervals.into_iter().collect();
        sorted.sort();

        let mut merged: Vec<TimeInterval> = Vec::with_capacity(sorted.len());
        for next in sorted {
            match merged.last_mut() {
                Some(last) if next.start <= last.end => last.end = last.end.max(next.end),
                _ => merged.push(next),
            }
        }
        Self(merged)
    }

    /// Single-interval set.
    pub fn single(interval: TimeInterval) -> Self {
        Self(vec![interval])
    }

    /// Member intervals in chronological order.
    pub fn intervals(&self) -> &[TimeInterval] {
        &self.0
    }

    /// Iterates member intervals.
    pub fn iter(&self) -> impl Iterator<Item = &TimeInterval> {
        self.0.iter()
    }

    /// Whether the set covers no time at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Total covered minutes.
    pub fn total_minutes(&self) -> u32 {
        self.0.iter().map(TimeInterval::duration_minutes).sum()
    }

    /// Union with another set.
    pub fn union(&self, other: &Self) -> Self {
        Self::from_intervals(self.0.iter().chain(other.0.iter()).copied())
    }

    /// Minutes in `self` that are not in `other`.
    pub fn subtract(&self, other: &Self) -> Self {
        let mut result = Vec::with_capacity(self.0.len());
        for base in &self.0 {
            let mut pieces = vec![*base];
            for cut in other.0.iter().filter(|c| c.overlaps(base)) {
                pieces = pieces.iter().flat_map(|p| p.subtract(cut)).collect();
            }
            result.extend(pieces);
        }
        Self(result)
    }

    /// Minutes present in both sets (clip).
    pub fn intersect(&self, other: &Self) -> Self {
        let mut result = Vec::new();
        let (mut i, mut j) = (0, 0);
        while i < self.0.len() && j < other.0.len() {
            let (a, b) = (self.0[i], other.0[j]);
            if let Some(common) = a.intersect(&b) {
                result.push(common);
            }
            if a.end <= b.end {
                i += 1;
            } else {
                j += 1;
            }
        }
        Self(result)
    }

    /// Whether any member overlaps `interval`.
    pub fn overlaps(&self, interval: &TimeInterval) -> bool {
        self.0.iter().any(|m| m.overlaps(interval))
    }

    /// Whether every minute of `interval` is covered.
    pub fn covers(&self, interval: &TimeInterval) -> bool {
        self.0
            .iter()
            .any(|m| m.start <= interval.start && interval.end <= m.end)
    }
}

impl<'a> IntoIterator for &'a IntervalSet {
    type Item = &'a TimeInterval;
    type IntoIter = std::slice::Iter<'a, TimeInterval>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Builds an interval from raw minute offsets, clamping into the day.
///
/// Returns `None` if the clamped interval is empty.
pub(crate) fn clamped_interval(start: i32, end: i32) -> Option<TimeInterval> {
    let start = ClockTime::saturating_from_minutes(start);
    let end = ClockTime::saturating_from_minutes(end);
    TimeInterval::from_raw(start.0, end.0)
}

/// Converts a `0 = Sunday … 6 = Saturday` index into a [`Weekday`].
pub fn weekday_from_index(index: u8) -> Option<Weekday> {
    match index {
        0 => Some(Weekday::Sun),
        1 => Some(Weekday::Mon),
        2 => Some(Weekday::Tue),
        3 => Some(Weekday::Wed),
        4 => Some(Weekday::Thu),
        5 => Some(Weekday::Fri),
        6 => Some(Weekday::Sat),
        _ => None,
    }
}

/// All weekdays in `0 = Sunday` order.
pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

/// Per-weekday storage, indexed Sunday-first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeekTable<T> {
    days: [T; 7],
}

impl<T> WeekTable<T> {
    /// Value for a weekday.
    pub fn get(&self, weekday: Weekday) -> &T {
        &self.days[weekday.num_days_from_sunday() as usize]
    }

    /// Mutable value for a weekday.
    pub fn get_mut(&mut self, weekday: Weekday) -> &mut T {
        &mut self.days[weekday.num_days_from_sunday() as usize]
    }

    /// Iterates `(weekday, value)` pairs Sunday-first.
    pub fn iter(&self) -> impl Iterator<Item = (Weekday, &T)> {
        WEEKDAYS.iter().copied().zip(self.days.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iv(start: &str, end: &str) -> TimeInterval {
        TimeInterval::parse(start, end).unwrap()
    }

    #[test]
    fn test_clock_time_parse_and_display() {
        let t: ClockTime = "09:05".parse().unwrap();
        assert_eq!(t.minutes(), 545);
        assert_eq!(t.to_string(), "09:05");
        assert_eq!("24:00".parse::<ClockTime>().unwrap(), ClockTime::END_OF_DAY);
        assert_eq!("07:30:00".parse::<ClockTime>().unwrap().minutes(), 450);
        assert!("24:01".parse::<ClockTime>().is_err());
        assert!("12:60".parse::<ClockTime>().is_err());
        assert!("noon".parse::<ClockTime>().is_err());
    }

    #[test]
    fn test_clock_time_serde() {
        let t = ClockTime::from_hm(18, 0).unwrap();
        let json = serde_json::to_string(&t).unwrap();
        assert_eq!(json, "\"18:00\"");
        let back: ClockTime = serde_json::from_str(&json).unwrap();
        assert_eq!(back, t);
    }

    #[test]
    fn test_interval_requires_positive_length() {
        assert!(TimeInterval::parse("10:00", "10:00").is_none());
        assert!(TimeInterval::parse("11:00", "10:00").is_none());
        assert_eq!(iv("10:00", "11:30").duration_minutes(), 90);
    }

    #[test]
    fn test_interval_overlap_is_half_open() {
        let a = iv("10:00", "12:00");
        assert!(a.overlaps(&iv("11:00", "13:00")));
        assert!(!a.overlaps(&iv("12:00", "13:00"))); // touching
    }

    #[test]
    fn test_interval_subtract() {
        let base = iv("10:00", "18:00");
        assert_eq!(
            base.subtract(&iv("12:00", "13:00")),
            vec![iv("10:00", "12:00"), iv("13:00", "18:00")]
        );
        assert_eq!(base.subtract(&iv("09:00", "11:00")), vec![iv("11:00", "18:00")]);
        assert!(base.subtract(&iv("09:00", "19:00")).is_empty());
        assert_eq!(base.subtract(&iv("19:00", "20:00")), vec![base]);
    }

    #[test]
    fn test_set_union_coalesces() {
        let set = IntervalSet::from_intervals([
            iv("14:00", "16:00"),
            iv("10:00", "12:00"),
            iv("12:00", "13:00"),
            iv("15:00", "17:00"),
        ]);
        assert_eq!(set.intervals(), &[iv("10:00", "13:00"), iv("14:00", "17:00")]);
        assert_eq!(set.total_minutes(), 6 * 60);
    }

    #[test]
    fn test_set_subtract_multiple_cuts() {
        let coverage = IntervalSet::from_intervals([iv("09:00", "12:00"), iv("13:00", "18:00")]);
        let busy = IntervalSet::from_intervals([iv("10:00", "10:30"), iv("11:30", "14:00")]);
        let free = coverage.subtract(&busy);
        assert_eq!(
            free.intervals(),
            &[iv("09:00", "10:00"), iv("10:30", "11:30"), iv("14:00", "18:00")]
        );
        assert_eq!(
            free.total_minutes() + coverage.intersect(&busy).total_minutes(),
            coverage.total_minutes()
        );
    }

    #[test]
    fn test_set_intersect() {
        let a = IntervalSet::from_intervals([iv("09:00", "12:00"), iv("13:00", "18:00")]);
        let b = IntervalSet::single(iv("11:00", "14:00"));
        assert_eq!(
            a.intersect(&b).intervals(),
            &[iv("11:00", "12:00"), iv("13:00", "14:00")]
        );
        assert!(a.intersect(&IntervalSet::new()).is_empty());
    }

    #[test]
    fn test_set_covers() {
        let a = IntervalSet::from_intervals([iv("09:00", "12:00"), iv("13:00", "18:00")]);
        assert!(a.covers(&iv("09:30", "11:00")));
        assert!(!a.covers(&iv("11:30", "13:30")));
        assert!(a.overlaps(&iv("11:30", "13:30")));
    }

    #[test]
    fn test_clamped_interval() {
        assert_eq!(clamped_interval(-30, 60), Some(iv("00:00", "01:00")));
        assert_eq!(clamped_interval(1400, 1500), Some(iv("23:20", "24:00")));
        assert_eq!(clamped_interval(-60, 0), None);
    }

    #[test]
    fn test_weekday_index() {
        assert_eq!(weekday_from_index(0), Some(Weekday::Sun));
        assert_eq!(weekday_from_index(6), Some(Weekday::Sat));
        assert_eq!(weekday_from_index(7), None);

        let mut table: WeekTable<u32> = WeekTable::default();
        *table.get_mut(Weekday::Mon) += 3;
        assert_eq!(*table.get(Weekday::Mon), 3);
        assert_eq!(table.iter().next().map(|(d, _)| d), Some(Weekday::Sun));
    }
}
