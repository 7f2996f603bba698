//! Weekly availability blocks.
//!
//! A [`BlockSet`] is a named, weekly-recurring set of study windows. The
//! student picks one block set per plan; when none is picked the engine
//! falls back to the configured default set.

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use super::interval::{weekday_from_index, ClockTime, TimeInterval};

/// One recurring study window on a weekday.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WeeklyBlock {
    /// Weekday index, `0 = Sunday … 6 = Saturday`.
    pub day_of_week: u8,
    /// Window start.
    #[serde(rename = "start_time")]
    pub start: ClockTime,
    /// Window end (exclusive).
    #[serde(rename = "end_time")]
    pub end: ClockTime,
}

impl WeeklyBlock {
    /// Creates a block.
    pub fn new(day_of_week: u8, start: ClockTime, end: ClockTime) -> Self {
        Self {
            day_of_week,
            start,
            end,
        }
    }

    /// Creates a block from `"HH:MM"` strings.
    ///
    /// Returns `None` if either time fails to parse.
    pub fn parse(day_of_week: u8, start: &str, end: &str) -> Option<Self> {
        Some(Self::new(day_of_week, start.parse().ok()?, end.parse().ok()?))
    }

    /// The same window on every day of the week.
    pub fn every_day(start: ClockTime, end: ClockTime) -> Vec<Self> {
        (0..7).map(|d| Self::new(d, start, end)).collect()
    }

    /// Weekday of this block, if the index is valid.
    pub fn weekday(&self) -> Option<Weekday> {
        weekday_from_index(self.day_of_week)
    }

    /// The block as an interval, if `start < end`.
    pub fn interval(&self) -> Option<TimeInterval> {
        TimeInterval::new(self.start, self.end)
    }
}

/// A named weekly availability pattern.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockSet {
    /// Persistent identifier assigned by the owning store, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Display name.
    pub name: String,
    /// Member blocks, in the order the user entered them.
    pub blocks: Vec<WeeklyBlock>,
}

impl BlockSet {
    /// Creates an empty, unsaved block set.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            blocks: Vec::new(),
        }
    }

    /// Sets the persistent identifier.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Adds a block.
    pub fn with_block(mut self, block: WeeklyBlock) -> Self {
        self.blocks.push(block);
        self
    }

    /// Adds several blocks.
    pub fn with_blocks(mut self, blocks: impl IntoIterator<Item = WeeklyBlock>) -> Self {
        self.blocks.extend(blocks);
        self
    }

    /// Blocks recurring on a weekday.
    pub fn blocks_on(&self, weekday: Weekday) -> impl Iterator<Item = &WeeklyBlock> {
        self.blocks
            .iter()
            .filter(move |b| b.weekday() == Some(weekday))
    }
}
