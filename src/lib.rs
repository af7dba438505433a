//! Weekly shift roster optimization.
//!
//! Staffs a 7-day week of three shifts per day (night, day, evening) from a
//! registry of workers, searching with a semi-steady-state genetic
//! algorithm for the roster that best honors worker preferences while
//! avoiding labor-rule violations:
//!
//! - **Models**: days, shift kinds, the 21 blocks of a week, workers, and
//!   the [`Roster`](models::Roster) candidate that owns one worker list per block.
//! - **Registry**: validated worker rows with uuid lookup.
//! - **Generator**: random rosters with one shift per worker per day.
//! - **Fitness**: preference bonus and labor-rule penalties, with a
//!   per-rule breakdown.
//! - **GA**: a generic evolutionary loop (elite, background and offspring
//!   bands) plus roster crossover and mutation operators.
//! - **I/O**: worker input rows, the persisted schedule format and
//!   per-worker text reports.
//!
//! # Example
//!
//! ```no_run
//! use u_roster::config::RunConfig;
//! use u_roster::io::{load_registry, save_schedule};
//! use u_roster::models::RequiredWorkers;
//!
//! # fn main() -> u_roster::error::Result<()> {
//! let registry = load_registry("workers.csv")?;
//! let config = RunConfig::default().with_required(RequiredWorkers::new(2, 3, 2));
//! let result = u_roster::problem::solve(&registry, &config, None)?;
//! save_schedule("schedule.txt", &result.best, &registry)?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod fitness;
pub mod ga;
pub mod generator;
pub mod io;
pub mod models;
pub mod problem;
pub mod random;
pub mod registry;
