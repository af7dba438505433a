//! Worker input rows.
//!
//! Each non-blank line is `name; desiredDay; desiredShift; uuid`, with `;`
//! or `,` as delimiter. Fields past the fourth are ignored.

use std::fs;
use std::path::Path;

use rand::Rng;

use crate::error::{Result, RosterError, ValidationError};
use crate::models::{Day, ShiftKind, Worker, MAX_NAME_LENGTH};
use crate::registry::{WorkerRegistry, WorkerRow};

/// Splits input text into raw worker rows.
pub fn parse_rows(text: &str) -> std::result::Result<Vec<WorkerRow>, ValidationError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut rows = Vec::new();
    for (i, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        let delimiter = if line.contains(';') { ';' } else { ',' };
        let fields: Vec<&str> = line.split(delimiter).collect();
        if fields.len() < 4 {
            return Err(ValidationError::Malformed {
                line: i + 1,
                reason: format!("expected 4 fields, found {}", fields.len()),
            });
        }
        rows.push(WorkerRow {
            line: i + 1,
            name: fields[0].trim().to_string(),
            desired_day: fields[1].trim().to_string(),
            desired_shift: fields[2].trim().to_string(),
            uuid: fields[3].trim().to_string(),
        });
    }
    Ok(rows)
}

/// Reads and validates a worker file into a registry.
pub fn load_registry(path: impl AsRef<Path>) -> Result<WorkerRegistry> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| RosterError::io(path, e))?;
    let rows = parse_rows(&text)?;
    Ok(WorkerRegistry::load(&rows)?)
}

/// Formats workers as input rows, one per line.
///
/// Rows are `,`-delimited unless the name itself contains a `,`, in which
/// case that row uses `;`.
pub fn format_rows(workers: &[Worker]) -> String {
    let mut out = String::new();
    for w in workers {
        let day = w.desired_day_off.map_or("ingen", Day::name);
        let sep = if w.name.contains(',') { ';' } else { ',' };
        out.push_str(&format!(
            "{}{sep} {}{sep} {}{sep} {}\n",
            w.name, day, w.desired_shift, w.uuid
        ));
    }
    out
}

/// Random workers for test rosters.
///
/// Names are drawn with replacement from `names` (names longer than
/// [`MAX_NAME_LENGTH`] are skipped); day off and shift are uniform; uuids
/// run from 0.
pub fn synthesize_workers<R: Rng>(
    names: &[String],
    count: usize,
    rng: &mut R,
) -> std::result::Result<Vec<Worker>, ValidationError> {
    let usable: Vec<&str> = names
        .iter()
        .map(|n| n.trim())
        .filter(|n| !n.is_empty() && n.chars().count() <= MAX_NAME_LENGTH)
        .collect();
    if usable.is_empty() {
        return Err(ValidationError::Malformed {
            line: 0,
            reason: "names list has no usable names".into(),
        });
    }

    let workers = (0..count)
        .map(|i| {
            let name = usable[rng.random_range(0..usable.len())];
            let day = Day::ALL[rng.random_range(0..Day::ALL.len())];
            let shift = ShiftKind::ALL[rng.random_range(0..ShiftKind::ALL.len())];
            Worker::new(i as u32, name, Some(day), shift)
        })
        .collect();
    Ok(workers)
}

/// Reads a names file, one name per line.
pub fn load_names(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| RosterError::io(path, e))?;
    Ok(text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(String::from)
        .collect())
}
