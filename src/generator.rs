//! Random roster generation.
//!
//! Each day is staffed independently from the full roster: shifts are
//! filled in the order night, day, evening, drawing without replacement
//! from what remains of that day's pool. The same worker may be picked on
//! several days; rest-rule legality across days is left to the fitness
//! penalties.

use rand::Rng;

use crate::error::ConfigurationError;
use crate::ga::operators::sample_without_replacement;
use crate::models::{Block, Day, RequiredWorkers, Roster, ShiftKind, WorkerIndex};

/// Checks that one day can be fully staffed with distinct workers.
///
/// Run once before the search starts; every later draw relies on it.
pub fn check_capacity(
    worker_count: usize,
    required: &RequiredWorkers,
) -> Result<(), ConfigurationError> {
    let needed = required.per_day();
    if needed > worker_count {
        return Err(ConfigurationError::InsufficientWorkers {
            day: Day::Monday,
            needed,
            available: worker_count,
        });
    }
    Ok(())
}

/// Generates one structurally valid random roster.
pub fn generate<R: Rng>(
    worker_count: usize,
    required: &RequiredWorkers,
    rng: &mut R,
) -> Result<Roster, ConfigurationError> {
    check_capacity(worker_count, required)?;
    Ok(generate_unchecked(worker_count, required, rng))
}

/// Generates a roster assuming [`check_capacity`] already passed.
pub(crate) fn generate_unchecked<R: Rng>(
    worker_count: usize,
    required: &RequiredWorkers,
    rng: &mut R,
) -> Roster {
    let mut roster = Roster::empty();
    let mut pool: Vec<WorkerIndex> = Vec::with_capacity(worker_count);
    for day in Day::ALL {
        pool.clear();
        pool.extend(0..worker_count);
        for shift in ShiftKind::ALL {
            let picked = sample_without_replacement(&mut pool, required.for_shift(shift), rng);
            roster.set_block(Block::new(day, shift).index(), picked);
        }
    }
    roster
}
