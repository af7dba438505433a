//! Persisted schedule format.
//!
//! Exactly 21 lines in block order. Each line is
//!
//! ```text
//! <day>,<shift>,<name>.<uuid>,<name>.<uuid>,...,$
//! ```
//!
//! The `$` field terminates the worker list. On read, workers are resolved
//! by uuid; the name part is informational.

use std::fs;
use std::path::Path;

use tracing::warn;

use crate::error::{Result, RosterError, ValidationError};
use crate::models::{Block, Day, RequiredWorkers, Roster, ShiftKind, BLOCKS_PER_WEEK};
use crate::registry::WorkerRegistry;

/// Field that ends each schedule line.
pub const END_SENTINEL: &str = "$";

/// A schedule read back from disk.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedSchedule {
    pub roster: Roster,
    /// Headcounts, either as given to the reader or inferred from the file.
    pub required: RequiredWorkers,
}

/// Renders a roster in the schedule format.
pub fn write_schedule(roster: &Roster, registry: &WorkerRegistry) -> String {
    let mut out = String::new();
    for block in Block::all() {
        out.push_str(&format!("{},{},", block.day, block.shift));
        for &w in roster.block(block.index()) {
            out.push_str(&registry.get(w).token());
            out.push(',');
        }
        out.push_str(END_SENTINEL);
        out.push('\n');
    }
    out
}

/// Writes a roster to `path`.
pub fn save_schedule(
    path: impl AsRef<Path>,
    roster: &Roster,
    registry: &WorkerRegistry,
) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, write_schedule(roster, registry)).map_err(|e| RosterError::io(path, e))
}

/// Parses a schedule, resolving workers against `registry`.
///
/// When `required` is `None`, each shift kind's headcount is taken from
/// the first block of that kind and every later block must match it.
pub fn read_schedule(
    text: &str,
    registry: &WorkerRegistry,
    required: Option<RequiredWorkers>,
) -> std::result::Result<LoadedSchedule, ValidationError> {
    let mut expected: [Option<usize>; 3] = match required {
        Some(r) => ShiftKind::ALL.map(|k| Some(r.for_shift(k))),
        None => [None; 3],
    };

    let lines: Vec<(usize, &str)> = text
        .lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l.trim()))
        .filter(|(_, l)| !l.is_empty())
        .collect();
    if lines.len() != BLOCKS_PER_WEEK {
        return Err(ValidationError::WrongBlockCount {
            expected: BLOCKS_PER_WEEK,
            found: lines.len(),
        });
    }

    let mut roster = Roster::empty();
    for (index, &(line_no, line)) in lines.iter().enumerate() {
        let block = Block::from_index(index);
        let workers = parse_line(line_no, line, block, registry)?;

        let slot = &mut expected[block.shift.index()];
        let want = *slot.get_or_insert(workers.len());
        if workers.len() != want {
            return Err(ValidationError::HeadcountMismatch {
                block: index,
                expected: want,
                found: workers.len(),
            });
        }
        roster.set_block(index, workers);
    }

    let [night, day, evening] = expected.map(|c| c.unwrap_or(0));
    Ok(LoadedSchedule {
        roster,
        required: RequiredWorkers::new(night, day, evening),
    })
}

/// Reads a schedule file.
pub fn load_schedule(
    path: impl AsRef<Path>,
    registry: &WorkerRegistry,
    required: Option<RequiredWorkers>,
) -> Result<LoadedSchedule> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| RosterError::io(path, e))?;
    Ok(read_schedule(&text, registry, required)?)
}

fn parse_line(
    line_no: usize,
    line: &str,
    block: Block,
    registry: &WorkerRegistry,
) -> std::result::Result<Vec<usize>, ValidationError> {
    let malformed = |reason: String| ValidationError::Malformed {
        line: line_no,
        reason,
    };

    let mut fields = line.split(',').map(str::trim);
    let day = fields.next().unwrap_or_default().parse::<Day>()?;
    let shift = fields
        .next()
        .ok_or_else(|| malformed("missing shift field".into()))?
        .parse::<ShiftKind>()?;
    if Block::new(day, shift) != block {
        return Err(ValidationError::BlockOutOfOrder {
            line: line_no,
            expected_day: block.day,
            expected_shift: block.shift,
        });
    }

    let mut workers = Vec::new();
    let mut terminated = false;
    for token in fields {
        if token == END_SENTINEL {
            terminated = true;
            break;
        }
        let (name, uuid) = token
            .rsplit_once('.')
            .ok_or_else(|| malformed(format!("worker token '{token}' lacks '.uuid'")))?;
        let uuid: u32 = uuid
            .parse()
            .map_err(|_| malformed(format!("invalid uuid in '{token}'")))?;
        let (idx, worker) = registry
            .find_by_uuid(uuid)
            .ok_or(ValidationError::UnknownUuid(uuid))?;
        if worker.schedule_name() != name {
            warn!(
                event = "schedule_name_mismatch",
                line = line_no,
                uuid,
                file_name = name,
                registry_name = %worker.name,
            );
        }
        if workers.contains(&idx) {
            return Err(ValidationError::DuplicateInBlock {
                block: block.index(),
                uuid,
            });
        }
        workers.push(idx);
    }
    if !terminated {
        return Err(malformed(format!("missing '{END_SENTINEL}' terminator")));
    }
    Ok(workers)
}
