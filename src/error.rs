//! Error types.
//!
//! Only structural problems are errors. Anything the engine can work
//! around is reported as a [`ScheduleWarning`](crate::models::ScheduleWarning)
//! inside the result instead.

use chrono::NaiveDate;
use thiserror::Error;

use crate::models::TimeSlot;
use crate::validation::ValidationError;

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, ScheduleError>;

/// Fatal errors. No partial timetable is produced.
#[derive(Error, Debug)]
pub enum ScheduleError {
    /// The request failed structural validation.
    #[error("invalid schedule request: {}", join_messages(.0))]
    InvalidInput(Vec<ValidationError>),

    /// The composer produced overlapping slots (internal invariant).
    #[error("composed slots overlap on {date}: {first:?} and {second:?}")]
    SlotOverlap {
        /// Affected date.
        date: NaiveDate,
        /// Earlier slot.
        first: Box<TimeSlot>,
        /// Slot starting before `first` ends.
        second: Box<TimeSlot>,
    },

    /// Cache key material could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Engine configuration could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// Engine configuration file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ScheduleError {
    /// Validation problems, if this is an input error.
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            Self::InvalidInput(errors) => errors,
            _ => &[],
        }
    }
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
