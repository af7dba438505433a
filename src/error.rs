//! Error types for roster loading, configuration, and persistence.
//!
//! Three families mirror how a run can fail:
//!
//! - [`ValidationError`]: malformed or semantically invalid input data
//! - [`ConfigurationError`]: parameters that make the search impossible,
//!   detected before the first generation
//! - [`RosterError::Io`]: file access failures

use std::path::PathBuf;

use thiserror::Error;

use crate::models::{Day, ShiftKind};

/// Invalid worker rows or schedule files.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A line could not be split into the expected fields.
    #[error("line {line}: {reason}")]
    Malformed { line: usize, reason: String },

    /// Day text that is not one of the seven weekday names.
    #[error("unknown day '{0}'")]
    UnknownDay(String),

    /// Shift text that is not one of `nat`, `dag`, `aften`.
    #[error("unknown shift '{0}'")]
    UnknownShift(String),

    /// Two workers share a uuid.
    #[error("duplicate worker uuid {0}")]
    DuplicateUuid(u32),

    /// A schedule references a worker the registry does not know.
    #[error("unknown uuid {0}")]
    UnknownUuid(u32),

    /// Worker display name exceeds the maximum length.
    #[error("worker name '{name}' is longer than {max} characters")]
    NameTooLong { name: String, max: usize },

    /// Name contains a character that delimits worker files.
    #[error("worker name '{name}' contains reserved character '{ch}'")]
    ReservedCharacter { name: String, ch: char },

    /// A block holds a different number of workers than its shift requires.
    #[error("block {block}: expected {expected} workers, found {found}")]
    HeadcountMismatch {
        block: usize,
        expected: usize,
        found: usize,
    },

    /// A worker appears twice in the same block.
    #[error("block {block}: worker {uuid} listed more than once")]
    DuplicateInBlock { block: usize, uuid: u32 },

    /// Schedule lines are not in block order.
    #[error("line {line}: expected {expected_day},{expected_shift}")]
    BlockOutOfOrder {
        line: usize,
        expected_day: Day,
        expected_shift: ShiftKind,
    },

    /// A schedule file does not describe exactly one week.
    #[error("expected {expected} schedule lines, found {found}")]
    WrongBlockCount { expected: usize, found: usize },
}

/// Parameters under which no valid search can run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// A day needs more distinct workers than the roster holds.
    #[error("{day} needs {needed} workers but only {available} are available")]
    InsufficientWorkers {
        day: Day,
        needed: usize,
        available: usize,
    },

    /// Invalid GA parameters.
    #[error("invalid GA configuration: {0}")]
    InvalidGa(String),
}

/// Main error type for u-roster operations.
#[derive(Debug, Error)]
pub enum RosterError {
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl RosterError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for u-roster operations.
pub type Result<T> = std::result::Result<T, RosterError>;
