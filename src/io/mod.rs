//! File formats: worker rows in, schedules in and out, per-worker reports out.

pub mod input;
pub mod report;
pub mod schedule_file;

pub use input::{format_rows, load_names, load_registry, parse_rows, synthesize_workers};
pub use report::{render_worker, write_reports, ReportSummary, FILL_GLYPH};
pub use schedule_file::{
    load_schedule, read_schedule, save_schedule, write_schedule, LoadedSchedule,
};
