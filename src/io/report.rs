//! Per-worker schedule reports.
//!
//! One fixed-width text grid per worker: a header row of weekday names and
//! one row per shift kind, with [`FILL_GLYPH`] in every worked cell.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{error, info};

use crate::error::{Result, RosterError};
use crate::models::{Block, Day, Roster, ShiftKind, WorkerIndex};
use crate::registry::WorkerRegistry;

/// Marks a worked cell.
pub const FILL_GLYPH: char = '█';

const LABEL_WIDTH: usize = 6;
const CELL_WIDTH: usize = 5;

/// Outcome of a bulk report run.
#[derive(Debug, Default)]
pub struct ReportSummary {
    pub written: Vec<PathBuf>,
    /// Workers whose report could not be written, by uuid.
    pub failed: Vec<(u32, RosterError)>,
}

impl ReportSummary {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Renders the grid for one worker.
pub fn render_worker(roster: &Roster, registry: &WorkerRegistry, worker: WorkerIndex) -> String {
    let w = registry.get(worker);
    let worked = roster.blocks_of(worker);
    let mut out = format!("{} ({})\n", w.name, w.uuid);

    out.push_str(&format!("{:LABEL_WIDTH$}", ""));
    for day in Day::ALL {
        out.push_str(&format!("|{:^CELL_WIDTH$}", day.short_name()));
    }
    out.push_str("|\n");

    for shift in ShiftKind::ALL {
        out.push_str(&format!("{:<LABEL_WIDTH$}", shift.name()));
        for day in Day::ALL {
            out.push('|');
            if worked.contains(&Block::new(day, shift).index()) {
                out.push_str(&FILL_GLYPH.to_string().repeat(CELL_WIDTH));
            } else {
                out.push_str(&" ".repeat(CELL_WIDTH));
            }
        }
        out.push_str("|\n");
    }
    out
}

/// Report file name: `<uuid>_<name>.txt`, with the name reduced to
/// alphanumerics and underscores.
pub fn report_file_name(uuid: u32, name: &str) -> String {
    let clean: String = name
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect();
    format!("{uuid}_{clean}.txt")
}

/// Writes one report per registry worker into `dir`.
///
/// Failing to create `dir` is fatal. A failure on one worker's file is
/// logged and recorded, and the remaining reports are still written.
pub fn write_reports(
    dir: impl AsRef<Path>,
    roster: &Roster,
    registry: &WorkerRegistry,
) -> Result<ReportSummary> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir).map_err(|e| RosterError::io(dir, e))?;

    let mut summary = ReportSummary::default();
    for (index, worker) in registry.workers().iter().enumerate() {
        let path = dir.join(report_file_name(worker.uuid, &worker.name));
        match fs::write(&path, render_worker(roster, registry, index)) {
            Ok(()) => summary.written.push(path),
            Err(e) => {
                error!(
                    event = "report_failed",
                    uuid = worker.uuid,
                    path = %path.display(),
                    error = %e,
                );
                summary.failed.push((worker.uuid, RosterError::io(path, e)));
            }
        }
    }

    info!(
        event = "reports_written",
        written = summary.written.len(),
        failed = summary.failed.len(),
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Worker;

    fn fixture() -> (Roster, WorkerRegistry) {
        let workers = vec![
            Worker::new(7, "Anna Berg", Some(Day::Sunday), ShiftKind::Night),
            Worker::new(8, "Bo", None, ShiftKind::Day),
        ];
        let registry = WorkerRegistry::from_workers(workers).unwrap();
        let mut roster = Roster::empty();
        // Anna: Monday night, Wednesday evening.
        roster.set_block(Block::new(Day::Monday, ShiftKind::Night).index(), vec![0]);
        roster.set_block(Block::new(Day::Wednesday, ShiftKind::Evening).index(), vec![0, 1]);
        (roster, registry)
    }

    #[test]
    fn test_render_grid_shape() {
        let (roster, registry) = fixture();
        let text = render_worker(&roster, &registry, 0);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "Anna Berg (7)");
        assert!(lines[1].contains("man") && lines[1].contains("søn"));
        assert!(lines[2].starts_with("nat"));
        assert!(lines[3].starts_with("dag"));
        assert!(lines[4].starts_with("aften"));
        let widths: Vec<usize> = lines[1..].iter().map(|l| l.chars().count()).collect();
        assert!(widths.iter().all(|&w| w == LABEL_WIDTH + 7 * (CELL_WIDTH + 1) + 1));
    }

    #[test]
    fn test_render_marks_worked_cells() {
        let (roster, registry) = fixture();
        let text = render_worker(&roster, &registry, 0);
        let lines: Vec<&str> = text.lines().collect();
        let cells = |row: &str| -> Vec<bool> {
            row.split('|')
                .skip(1)
                .take(7)
                .map(|c| c.contains(FILL_GLYPH))
                .collect()
        };
        assert_eq!(cells(lines[2]), [true, false, false, false, false, false, false]);
        assert_eq!(cells(lines[3]), [false; 7]);
        assert_eq!(cells(lines[4]), [false, false, true, false, false, false, false]);
        assert_eq!(text.matches(FILL_GLYPH).count(), 2 * CELL_WIDTH);
    }

    #[test]
    fn test_report_file_name() {
        assert_eq!(report_file_name(7, "Anna Berg"), "7_Anna_Berg.txt");
        assert_eq!(report_file_name(3, "Søren/Ø"), "3_Søren_Ø.txt");
    }

    #[test]
    fn test_write_reports_to_dir() {
        let (roster, registry) = fixture();
        let dir = std::env::temp_dir().join(format!("u_roster_reports_{}", std::process::id()));
        let summary = write_reports(&dir, &roster, &registry).unwrap();
        assert!(summary.is_complete());
        assert_eq!(summary.written.len(), 2);
        let text = fs::read_to_string(dir.join("8_Bo.txt")).unwrap();
        assert!(text.starts_with("Bo (8)"));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_write_reports_unusable_dir_is_fatal() {
        let (roster, registry) = fixture();
        let file = std::env::temp_dir().join(format!("u_roster_not_a_dir_{}", std::process::id()));
        fs::write(&file, "x").unwrap();
        let err = write_reports(file.join("sub"), &roster, &registry).unwrap_err();
        assert!(matches!(err, RosterError::Io { .. }));
        let _ = fs::remove_file(&file);
    }

    #[test]
    fn test_write_reports_continues_after_file_failure() {
        let (roster, registry) = fixture();
        let dir = std::env::temp_dir().join(format!("u_roster_partial_{}", std::process::id()));
        // A directory where Anna's report should go makes that one write fail.
        fs::create_dir_all(dir.join("7_Anna_Berg.txt")).unwrap();

        let summary = write_reports(&dir, &roster, &registry).unwrap();
        assert!(!summary.is_complete());
        assert_eq!(summary.written, vec![dir.join("8_Bo.txt")]);
        let failed: Vec<u32> = summary.failed.iter().map(|(uuid, _)| *uuid).collect();
        assert_eq!(failed, vec![7]);
        assert!(matches!(summary.failed[0].1, RosterError::Io { .. }));
        assert!(fs::read_to_string(dir.join("8_Bo.txt")).unwrap().starts_with("Bo (8)"));
        let _ = fs::remove_dir_all(&dir);
    }
}
