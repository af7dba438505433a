//! Roster crossover and mutation operators.
//!
//! # Crossover
//!
//! - [`segment_crossover`]: copy parent A, splice a random contiguous block
//!   range `[start, end)` from parent B
//!
//! # Mutation
//!
//! - [`resample_block`]: redraw one block's whole assignment
//!
//! # Sampling
//!
//! - [`sample_without_replacement`]: uniform draws with swap-to-back removal,
//!   shared by the generator and mutation

use std::ops::Range;

use rand::Rng;

use super::config::MutationScope;
use crate::models::{
    Block, RequiredWorkers, Roster, WorkerIndex, BLOCKS_PER_WEEK, SHIFTS_PER_DAY,
};

// ============================================================================
// Sampling
// ============================================================================

/// Draws up to `count` distinct workers uniformly from `pool`.
///
/// Each draw swaps the chosen entry to the back and pops it, so the pool
/// shrinks in place without reallocation. Returns fewer than `count`
/// workers only when the pool runs out; callers validate capacity first.
///
/// # Complexity
/// O(count)
pub fn sample_without_replacement<R: Rng>(
    pool: &mut Vec<WorkerIndex>,
    count: usize,
    rng: &mut R,
) -> Vec<WorkerIndex> {
    let mut picked = Vec::with_capacity(count.min(pool.len()));
    for _ in 0..count {
        if pool.is_empty() {
            break;
        }
        let i = rng.random_range(0..pool.len());
        let last = pool.len() - 1;
        pool.swap(i, last);
        if let Some(w) = pool.pop() {
            picked.push(w);
        }
    }
    picked
}

// ============================================================================
// Crossover
// ============================================================================

/// Builds a child from parent A with blocks `range` taken from parent B.
///
/// Every block list is copied into the child's own storage.
pub fn splice(parent_a: &Roster, parent_b: &Roster, range: Range<usize>) -> Roster {
    let mut child = Roster::empty();
    for i in 0..BLOCKS_PER_WEEK {
        let source = if range.contains(&i) { parent_b } else { parent_a };
        child.copy_block_from(source, i);
    }
    child
}

/// Segment crossover.
///
/// Picks `start` uniformly in `[0, 20]` and `end` uniformly in
/// `[start + 1, 21]`, then [`splice`]s. Returns the child and the range
/// taken from parent B.
pub fn segment_crossover<R: Rng>(
    parent_a: &Roster,
    parent_b: &Roster,
    rng: &mut R,
) -> (Roster, Range<usize>) {
    let range = random_segment(rng);
    (splice(parent_a, parent_b, range.clone()), range)
}

// ============================================================================
// Mutation
// ============================================================================

/// Replaces block `index` with a fresh draw of its full headcount.
///
/// The pool is the whole roster of `worker_count` workers, minus, for
/// [`MutationScope::Day`], the workers on the other blocks of that day.
/// Workers assigned on other days may always be picked.
///
/// # Panics
/// Panics if the pool holds fewer workers than the block's headcount.
/// [`check_capacity`](crate::generator::check_capacity) rules this out for
/// well-formed rosters.
pub fn resample_block<R: Rng>(
    roster: &mut Roster,
    index: usize,
    worker_count: usize,
    required: &RequiredWorkers,
    scope: MutationScope,
    rng: &mut R,
) {
    let needed = required.for_block(index);
    let mut pool = mutation_pool(roster, index, worker_count, scope);
    assert!(
        pool.len() >= needed,
        "block {index} needs {needed} workers but the mutation pool has {}",
        pool.len()
    );
    let workers = sample_without_replacement(&mut pool, needed, rng);
    roster.set_block(index, workers);
}

/// Picks a random block and [`resample_block`]s it. Returns the block index.
///
/// # Panics
/// Panics under the same condition as [`resample_block`].
pub fn mutate_random_block<R: Rng>(
    roster: &mut Roster,
    worker_count: usize,
    required: &RequiredWorkers,
    scope: MutationScope,
    rng: &mut R,
) -> usize {
    let index = rng.random_range(0..BLOCKS_PER_WEEK);
    resample_block(roster, index, worker_count, required, scope, rng);
    index
}

fn mutation_pool(
    roster: &Roster,
    index: usize,
    worker_count: usize,
    scope: MutationScope,
) -> Vec<WorkerIndex> {
    match scope {
        MutationScope::Global => (0..worker_count).collect(),
        MutationScope::Day => {
            let mut busy = vec![false; worker_count];
            let first = Block::from_index(index).day.index() * SHIFTS_PER_DAY;
            for other in (first..first + SHIFTS_PER_DAY).filter(|&b| b != index) {
                for &w in roster.block(other) {
                    if let Some(slot) = busy.get_mut(w) {
                        *slot = true;
                    }
                }
            }
            (0..worker_count).filter(|&w| !busy[w]).collect()
        }
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Random block range `[start, end)` with `start` in `[0, 20]` and `end` in
/// `[start + 1, 21]`.
fn random_segment<R: Rng>(rng: &mut R) -> Range<usize> {
    let start = rng.random_range(0..BLOCKS_PER_WEEK);
    let end = rng.random_range(start + 1..=BLOCKS_PER_WEEK);
    start..end
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;
    use std::collections::HashSet;

    fn striped(offset: usize) -> Roster {
        Roster::from_blocks(std::array::from_fn(|i| vec![offset + i]))
    }

    fn distinct(list: &[usize]) -> bool {
        list.iter().collect::<HashSet<_>>().len() == list.len()
    }

    // ---- Sampling ----

    #[test]
    fn test_sample_draws_distinct_from_pool() {
        let mut rng = create_rng(42);
        for _ in 0..100 {
            let mut pool: Vec<usize> = (0..10).collect();
            let picked = sample_without_replacement(&mut pool, 4, &mut rng);
            assert_eq!(picked.len(), 4);
            assert_eq!(pool.len(), 6);
            assert!(distinct(&picked));
            assert!(picked.iter().all(|w| !pool.contains(w)));
        }
    }

    #[test]
    fn test_sample_whole_pool() {
        let mut rng = create_rng(42);
        let mut pool: Vec<usize> = (0..5).collect();
        let mut picked = sample_without_replacement(&mut pool, 5, &mut rng);
        picked.sort_unstable();
        assert_eq!(picked, vec![0, 1, 2, 3, 4]);
        assert!(pool.is_empty());
    }

    #[test]
    fn test_sample_short_pool_returns_what_exists() {
        let mut rng = create_rng(42);
        let mut pool = vec![3, 7];
        let picked = sample_without_replacement(&mut pool, 5, &mut rng);
        assert_eq!(picked.len(), 2);
    }

    #[test]
    fn test_sample_covers_pool_uniformly() {
        let mut rng = create_rng(7);
        let mut counts = [0usize; 4];
        for _ in 0..4000 {
            let mut pool: Vec<usize> = (0..4).collect();
            counts[sample_without_replacement(&mut pool, 1, &mut rng)[0]] += 1;
        }
        for c in counts {
            assert!((800..1200).contains(&c), "skewed draw counts: {counts:?}");
        }
    }

    // ---- Crossover ----

    #[test]
    fn test_splice_takes_range_from_b() {
        let a = striped(0);
        let b = striped(100);
        let child = splice(&a, &b, 5..9);
        for i in 0..BLOCKS_PER_WEEK {
            let expected = if (5..9).contains(&i) { b.block(i) } else { a.block(i) };
            assert_eq!(child.block(i), expected, "block {i}");
        }
        assert!(child.score().is_none());
    }

    #[test]
    fn test_splice_deep_copies() {
        let a = striped(0);
        let b = striped(100);
        let child = splice(&a, &b, 0..BLOCKS_PER_WEEK);
        for i in 0..BLOCKS_PER_WEEK {
            assert_ne!(child.block(i).as_ptr(), b.block(i).as_ptr());
        }
    }

    #[test]
    fn test_segment_crossover_range_bounds() {
        let mut rng = create_rng(42);
        let a = striped(0);
        let b = striped(100);
        for _ in 0..1000 {
            let (child, range) = segment_crossover(&a, &b, &mut rng);
            assert!(range.start < BLOCKS_PER_WEEK);
            assert!(range.end > range.start && range.end <= BLOCKS_PER_WEEK);
            assert_eq!(child, splice(&a, &b, range));
        }
    }

    // ---- Mutation ----

    #[test]
    fn test_resample_block_headcount() {
        let mut rng = create_rng(42);
        let req = RequiredWorkers::new(2, 3, 1);
        let mut roster = Roster::empty();
        for i in 0..BLOCKS_PER_WEEK {
            resample_block(&mut roster, i, 10, &req, MutationScope::Global, &mut rng);
        }
        assert!(roster.is_well_formed(&req));
    }

    #[test]
    #[should_panic(expected = "needs 3 workers")]
    fn test_resample_short_pool_panics() {
        let mut rng = create_rng(42);
        let req = RequiredWorkers::new(3, 0, 0);
        resample_block(&mut Roster::empty(), 0, 2, &req, MutationScope::Global, &mut rng);
    }

    #[test]
    #[should_panic(expected = "mutation pool has 1")]
    fn test_resample_day_scope_short_pool_panics() {
        let mut rng = create_rng(42);
        let req = RequiredWorkers::new(2, 2, 2);
        let mut roster = Roster::empty();
        // Five of six workers already on Tuesday's other blocks.
        roster.set_block(3, vec![0, 1, 2]);
        roster.set_block(5, vec![3, 4]);
        resample_block(&mut roster, 4, 6, &req, MutationScope::Day, &mut rng);
    }

    #[test]
    fn test_day_scope_avoids_same_day_workers() {
        let mut rng = create_rng(42);
        let req = RequiredWorkers::new(2, 2, 2);
        let mut roster = Roster::empty();
        roster.set_block(3, vec![0, 1]);
        roster.set_block(5, vec![2, 3]);
        for _ in 0..100 {
            resample_block(&mut roster, 4, 6, &req, MutationScope::Day, &mut rng);
            let mut drawn = roster.block(4).to_vec();
            drawn.sort_unstable();
            assert_eq!(drawn, vec![4, 5]);
        }
    }

    #[test]
    fn test_global_scope_may_reuse_same_day_workers() {
        let mut rng = create_rng(42);
        let req = RequiredWorkers::new(1, 1, 1);
        let mut roster = Roster::empty();
        roster.set_block(0, vec![0]);
        roster.set_block(2, vec![1]);
        let mut seen = HashSet::new();
        for _ in 0..200 {
            resample_block(&mut roster, 1, 3, &req, MutationScope::Global, &mut rng);
            seen.insert(roster.block(1)[0]);
        }
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn test_mutate_random_block_changes_only_that_block() {
        let mut rng = create_rng(3);
        let req = RequiredWorkers::new(1, 1, 1);
        let original = striped(0);
        for _ in 0..50 {
            let mut roster = original.clone();
            let idx = mutate_random_block(&mut roster, 40, &req, MutationScope::Global, &mut rng);
            for i in (0..BLOCKS_PER_WEEK).filter(|&i| i != idx) {
                assert_eq!(roster.block(i), original.block(i));
            }
            assert_eq!(roster.block(idx).len(), 1);
        }
    }
}
