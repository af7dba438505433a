//! Worker identity and scheduling preferences.

use super::calendar::{Day, ShiftKind};

/// Maximum display-name length in characters.
pub const MAX_NAME_LENGTH: usize = 50;

/// Position of a worker in the registry.
///
/// Rosters store these ordinals instead of worker records, so a roster
/// owns its assignment lists while workers stay shared and immutable.
pub type WorkerIndex = usize;

/// A worker available for scheduling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Worker {
    /// Unique id within a run.
    pub uuid: u32,
    /// Display name, at most [`MAX_NAME_LENGTH`] characters.
    pub name: String,
    /// Preferred day off, if any.
    pub desired_day_off: Option<Day>,
    /// Preferred shift kind.
    pub desired_shift: ShiftKind,
}

impl Worker {
    pub fn new(
        uuid: u32,
        name: impl Into<String>,
        desired_day_off: Option<Day>,
        desired_shift: ShiftKind,
    ) -> Self {
        Self {
            uuid,
            name: name.into(),
            desired_day_off,
            desired_shift,
        }
    }

    /// Name as written in schedule files, with the `,` field separator
    /// removed.
    pub fn schedule_name(&self) -> String {
        self.name.replace(',', "")
    }

    /// `name.uuid` token used in schedule files.
    pub fn token(&self) -> String {
        format!("{}.{}", self.schedule_name(), self.uuid)
    }
}
