//! Worker registry.
//!
//! Built once per run from raw input rows and immutable afterwards. Every
//! other component refers to workers by their [`WorkerIndex`] in this
//! registry; the uuid index resolves schedule-file references back to
//! workers.

use std::collections::HashMap;

use tracing::info;

use crate::error::ValidationError;
use crate::models::{Day, ShiftKind, Worker, WorkerIndex, MAX_NAME_LENGTH};

/// Day-off tokens meaning "no preference".
const NO_DAY_OFF: [&str; 3] = ["ingen", "none", "-"];

/// Characters a name may not contain: the `;` row delimiter and line breaks.
const RESERVED_NAME_CHARS: [char; 3] = [';', '\n', '\r'];

/// One unparsed worker row: `name; desiredDay; desiredShift; uuid`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerRow {
    /// 1-based source line, for diagnostics.
    pub line: usize,
    pub name: String,
    pub desired_day: String,
    pub desired_shift: String,
    pub uuid: String,
}

/// Immutable, ordered set of workers for one run.
#[derive(Debug, Clone, Default)]
pub struct WorkerRegistry {
    workers: Vec<Worker>,
    by_uuid: HashMap<u32, WorkerIndex>,
}

impl WorkerRegistry {
    /// Validates rows and builds the registry.
    ///
    /// Fails on the first row with an unknown day or shift token, an
    /// unparsable or duplicate uuid, or an over-long name.
    pub fn load(rows: &[WorkerRow]) -> Result<Self, ValidationError> {
        let mut workers = Vec::with_capacity(rows.len());
        for row in rows {
            workers.push(parse_row(row)?);
        }
        let registry = Self::from_workers(workers)?;
        info!(event = "registry_loaded", workers = registry.len());
        Ok(registry)
    }

    /// Builds a registry from already-typed workers.
    ///
    /// Names may contain `,` but not `;` or line breaks.
    pub fn from_workers(workers: Vec<Worker>) -> Result<Self, ValidationError> {
        let mut by_uuid = HashMap::with_capacity(workers.len());
        for (idx, w) in workers.iter().enumerate() {
            if w.name.chars().count() > MAX_NAME_LENGTH {
                return Err(ValidationError::NameTooLong {
                    name: w.name.clone(),
                    max: MAX_NAME_LENGTH,
                });
            }
            if let Some(ch) = w.name.chars().find(|c| RESERVED_NAME_CHARS.contains(c)) {
                return Err(ValidationError::ReservedCharacter {
                    name: w.name.clone(),
                    ch,
                });
            }
            if by_uuid.insert(w.uuid, idx).is_some() {
                return Err(ValidationError::DuplicateUuid(w.uuid));
            }
        }
        Ok(Self { workers, by_uuid })
    }

    /// Looks up a worker by uuid.
    pub fn find_by_uuid(&self, uuid: u32) -> Option<(WorkerIndex, &Worker)> {
        self.by_uuid.get(&uuid).map(|&idx| (idx, &self.workers[idx]))
    }

    /// Worker at a registry position.
    ///
    /// # Panics
    /// Panics if `index` is out of range.
    pub fn get(&self, index: WorkerIndex) -> &Worker {
        &self.workers[index]
    }

    pub fn workers(&self) -> &[Worker] {
        &self.workers
    }

    pub fn len(&self) -> usize {
        self.workers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workers.is_empty()
    }
}

fn parse_row(row: &WorkerRow) -> Result<Worker, ValidationError> {
    let day_token = row.desired_day.trim();
    let desired_day_off = if NO_DAY_OFF.contains(&day_token.to_lowercase().as_str()) {
        None
    } else {
        Some(day_token.parse::<Day>()?)
    };
    let desired_shift = row.desired_shift.parse::<ShiftKind>()?;
    let uuid = row
        .uuid
        .trim()
        .parse::<u32>()
        .map_err(|_| ValidationError::Malformed {
            line: row.line,
            reason: format!("invalid uuid '{}'", row.uuid.trim()),
        })?;

    Ok(Worker::new(
        uuid,
        row.name.trim(),
        desired_day_off,
        desired_shift,
    ))
}
