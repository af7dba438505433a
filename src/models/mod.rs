//! Roster domain types.
//!
//! - [`calendar`]: the fixed weekly horizon: [`Day`], [`ShiftKind`], [`Block`],
//!   and per-shift headcounts ([`RequiredWorkers`])
//! - [`worker`]: worker identity and preferences
//! - [`roster`]: the candidate assignment evolved by the GA

mod calendar;
mod roster;
mod worker;

pub use calendar::{
    Block, Day, RequiredWorkers, ShiftKind, BLOCKS_PER_WEEK, DAYS_PER_WEEK, SHIFTS_PER_DAY,
};
pub use roster::Roster;
pub use worker::{Worker, WorkerIndex, MAX_NAME_LENGTH};
