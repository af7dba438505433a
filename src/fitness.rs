//! Roster fitness evaluation.
//!
//! Scores a roster against labor rules by walking the blocks in
//! chronological order and tracking, per worker, the last block worked.
//! Rule violations are large negative penalties rather than hard
//! rejections, so infeasible rosters still rank against each other.
//!
//! | Rule | Condition | Delta |
//! |---|---|---|
//! | Preference match | block shift == desired shift | +1 |
//! | Minimum rest | `block - last <= 2` | −1000 |
//! | Rotation direction | one day after last worked day and `block - last == 5` | −1000 |
//! | Night streak | night block, `last == block - 3`, streak already ≥ 2 | −1000 |
//! | Day-off preference | block day == desired day off | −2 |
//! | Weekly rest | no gap `> 5` blocks, full week only | −1000 (once per worker) |
//!
//! Per-worker state lives in an [`EvalScratch`] owned by the caller, so
//! any number of evaluations can run at once against the same registry.

use std::fmt;

use crate::models::{
    Block, Roster, ShiftKind, Worker, WorkerIndex, BLOCKS_PER_WEEK, SHIFTS_PER_DAY,
};

/// Bonus for a block matching the worker's desired shift.
pub const PREFERENCE_BONUS: f64 = 1.0;

/// Penalty for a hard labor-rule violation.
pub const HARD_PENALTY: f64 = -1000.0;

/// Penalty for working on the desired day off.
pub const DAY_OFF_PENALTY: f64 = -2.0;

/// Gaps of at most this many blocks violate minimum rest.
pub const MIN_REST_BLOCKS: usize = 2;

/// A gap of more than this many blocks counts as weekly rest.
pub const WEEKLY_REST_BLOCKS: usize = 5;

/// Block gap that, one day after the last worked day, is a backward rotation.
pub const ROTATION_GAP_BLOCKS: usize = 5;

/// Consecutive nights allowed before each further night is penalized.
pub const MAX_NIGHT_STREAK: u32 = 2;

/// Per-worker working memory for one evaluation, indexed by worker ordinal.
#[derive(Debug, Clone, Default)]
pub struct EvalScratch {
    last_block: Vec<Option<usize>>,
    night_streak: Vec<u32>,
    had_weekly_rest: Vec<bool>,
    seen: Vec<bool>,
}

impl EvalScratch {
    pub fn new(worker_count: usize) -> Self {
        let mut scratch = Self::default();
        scratch.reset(worker_count);
        scratch
    }

    fn reset(&mut self, worker_count: usize) {
        self.last_block.clear();
        self.last_block.resize(worker_count, None);
        self.night_streak.clear();
        self.night_streak.resize(worker_count, 0);
        self.had_weekly_rest.clear();
        self.had_weekly_rest.resize(worker_count, false);
        self.seen.clear();
        self.seen.resize(worker_count, false);
    }
}

/// Rule hit counts behind a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreBreakdown {
    pub preference_matches: usize,
    pub min_rest_violations: usize,
    pub rotation_violations: usize,
    pub night_streak_violations: usize,
    pub day_off_hits: usize,
    pub missing_weekly_rest: usize,
}

impl ScoreBreakdown {
    /// Number of hard-rule penalties.
    pub fn hard_violations(&self) -> usize {
        self.min_rest_violations
            + self.rotation_violations
            + self.night_streak_violations
            + self.missing_weekly_rest
    }

    /// The score these counts add up to.
    pub fn total(&self) -> f64 {
        self.preference_matches as f64 * PREFERENCE_BONUS
            + self.hard_violations() as f64 * HARD_PENALTY
            + self.day_off_hits as f64 * DAY_OFF_PENALTY
    }
}

impl fmt::Display for ScoreBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "score:                 {}", self.total())?;
        writeln!(f, "preference matches:    {}", self.preference_matches)?;
        writeln!(f, "minimum rest:          {}", self.min_rest_violations)?;
        writeln!(f, "rotation direction:    {}", self.rotation_violations)?;
        writeln!(f, "night streak:          {}", self.night_streak_violations)?;
        writeln!(f, "desired day off:       {}", self.day_off_hits)?;
        write!(f, "missing weekly rest:   {}", self.missing_weekly_rest)
    }
}

/// Scores rosters against one set of workers.
#[derive(Debug, Clone, Copy)]
pub struct Evaluator<'a> {
    workers: &'a [Worker],
}

impl<'a> Evaluator<'a> {
    pub fn new(workers: &'a [Worker]) -> Self {
        Self { workers }
    }

    /// Scratch buffer sized for these workers.
    pub fn scratch(&self) -> EvalScratch {
        EvalScratch::new(self.workers.len())
    }

    /// Score of a full-week roster.
    pub fn evaluate(&self, roster: &Roster, scratch: &mut EvalScratch) -> f64 {
        self.breakdown(roster, scratch).total()
    }

    /// Rule hit counts of a full-week roster.
    pub fn breakdown(&self, roster: &Roster, scratch: &mut EvalScratch) -> ScoreBreakdown {
        self.breakdown_blocks(roster.blocks(), scratch)
    }

    /// Rule hit counts over the first `blocks.len()` blocks of the week.
    ///
    /// `blocks[i]` is the assignment of block `i`. Shorter horizons than a
    /// full week are allowed; the weekly-rest rule is a property of the
    /// whole week and is only applied when all 21 blocks are given.
    ///
    /// # Panics
    /// Panics if more than [`BLOCKS_PER_WEEK`] blocks are given or a worker
    /// index is outside the worker list.
    pub fn breakdown_blocks(
        &self,
        blocks: &[Vec<WorkerIndex>],
        scratch: &mut EvalScratch,
    ) -> ScoreBreakdown {
        assert!(blocks.len() <= BLOCKS_PER_WEEK, "more blocks than a week");
        scratch.reset(self.workers.len());
        let mut counts = ScoreBreakdown::default();

        for (b, assigned) in blocks.iter().enumerate() {
            let block = Block::from_index(b);
            let is_night = block.shift == ShiftKind::Night;

            for &w in assigned {
                let worker = &self.workers[w];
                let last = scratch.last_block[w];
                let follows_night =
                    is_night && b >= SHIFTS_PER_DAY && last == Some(b - SHIFTS_PER_DAY);

                if worker.desired_shift == block.shift {
                    counts.preference_matches += 1;
                }
                if let Some(last) = last {
                    let gap = b - last;
                    if gap <= MIN_REST_BLOCKS {
                        counts.min_rest_violations += 1;
                    }
                    let day_gap = block.day.index() - Block::from_index(last).day.index();
                    if day_gap == 1 && gap == ROTATION_GAP_BLOCKS {
                        counts.rotation_violations += 1;
                    }
                }
                if follows_night && scratch.night_streak[w] >= MAX_NIGHT_STREAK {
                    counts.night_streak_violations += 1;
                }
                if worker.desired_day_off == Some(block.day) {
                    counts.day_off_hits += 1;
                }

                // streak = consecutive nights ending here
                scratch.night_streak[w] = match (is_night, follows_night) {
                    (true, true) => scratch.night_streak[w] + 1,
                    (true, false) => 1,
                    (false, _) => 0,
                };
                // gap since the previous block worked, or since week start
                let since = b as i64 - last.map_or(-1, |l| l as i64);
                if since > WEEKLY_REST_BLOCKS as i64 {
                    scratch.had_weekly_rest[w] = true;
                }
                scratch.last_block[w] = Some(b);
                scratch.seen[w] = true;
            }
        }

        if blocks.len() == BLOCKS_PER_WEEK {
            counts.missing_weekly_rest = scratch
                .seen
                .iter()
                .zip(&scratch.had_weekly_rest)
                .filter(|&(&seen, &rested)| seen && !rested)
                .count();
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Day;

    fn worker(uuid: u32, shift: ShiftKind, day_off: Option<Day>) -> Worker {
        Worker::new(uuid, format!("W{uuid}"), day_off, shift)
    }

    /// Blocks `0..len`, with `worker` placed on `on`.
    fn horizon(len: usize, worker: WorkerIndex, on: &[usize]) -> Vec<Vec<WorkerIndex>> {
        (0..len)
            .map(|b| if on.contains(&b) { vec![worker] } else { vec![] })
            .collect()
    }

    fn breakdown(workers: &[Worker], blocks: &[Vec<WorkerIndex>]) -> ScoreBreakdown {
        let eval = Evaluator::new(workers);
        eval.breakdown_blocks(blocks, &mut eval.scratch())
    }

    // ---- Single-day scenario ----

    #[test]
    fn test_single_day_preferences_only() {
        let workers = vec![
            worker(1, ShiftKind::Night, None),
            worker(2, ShiftKind::Day, None),
            worker(3, ShiftKind::Evening, None),
        ];
        let blocks = vec![vec![0], vec![1], vec![2]];
        let counts = breakdown(&workers, &blocks);
        assert_eq!(counts.preference_matches, 3);
        assert_eq!(counts.min_rest_violations, 0);
        assert_eq!(counts.rotation_violations, 0);
        assert_eq!(counts.night_streak_violations, 0);
        assert_eq!(counts.day_off_hits, 0);
        assert_eq!(counts.missing_weekly_rest, 0);
        assert_eq!(counts.total(), 3.0);
    }

    #[test]
    fn test_single_day_mismatched_preferences() {
        let workers = vec![
            worker(1, ShiftKind::Day, None),
            worker(2, ShiftKind::Day, None),
            worker(3, ShiftKind::Evening, None),
        ];
        let blocks = vec![vec![0], vec![1], vec![2]];
        assert_eq!(breakdown(&workers, &blocks).preference_matches, 2);
    }

    // ---- Minimum rest ----

    #[test]
    fn test_gap_of_two_violates_min_rest_once() {
        let workers = vec![worker(1, ShiftKind::Day, None)];
        let counts = breakdown(&workers, &horizon(3, 0, &[0, 2]));
        assert_eq!(counts.min_rest_violations, 1);
        assert_eq!(counts.rotation_violations, 0);
    }

    #[test]
    fn test_gap_of_three_is_rested() {
        let workers = vec![worker(1, ShiftKind::Day, None)];
        let counts = breakdown(&workers, &horizon(4, 0, &[0, 3]));
        assert_eq!(counts.min_rest_violations, 0);
    }

    // ---- Rotation ----

    #[test]
    fn test_night_then_next_evening_is_rotation_violation() {
        // block 0 = Monday night, block 5 = Tuesday evening
        let workers = vec![worker(1, ShiftKind::Day, None)];
        let counts = breakdown(&workers, &horizon(6, 0, &[0, 5]));
        assert_eq!(counts.rotation_violations, 1);
        assert_eq!(counts.min_rest_violations, 0);
    }

    #[test]
    fn test_five_blocks_two_days_apart_is_not_rotation() {
        // block 2 = Monday evening, block 7 = Wednesday day
        let workers = vec![worker(1, ShiftKind::Day, None)];
        let counts = breakdown(&workers, &horizon(8, 0, &[2, 7]));
        assert_eq!(counts.rotation_violations, 0);
    }

    // ---- Night streak ----

    #[test]
    fn test_third_consecutive_night_penalized_once() {
        let workers = vec![worker(1, ShiftKind::Night, None)];
        let counts = breakdown(&workers, &horizon(7, 0, &[0, 3, 6]));
        assert_eq!(counts.night_streak_violations, 1);
    }

    #[test]
    fn test_two_consecutive_nights_allowed() {
        let workers = vec![worker(1, ShiftKind::Night, None)];
        let counts = breakdown(&workers, &horizon(4, 0, &[0, 3]));
        assert_eq!(counts.night_streak_violations, 0);
    }

    #[test]
    fn test_fourth_consecutive_night_penalized_again() {
        let workers = vec![worker(1, ShiftKind::Night, None)];
        let counts = breakdown(&workers, &horizon(10, 0, &[0, 3, 6, 9]));
        assert_eq!(counts.night_streak_violations, 2);
    }

    #[test]
    fn test_broken_night_streak_restarts_at_one() {
        // nights 0, 3, then a skipped night, then 9, 12: never three in a row
        let workers = vec![worker(1, ShiftKind::Night, None)];
        let counts = breakdown(&workers, &horizon(13, 0, &[0, 3, 9, 12]));
        assert_eq!(counts.night_streak_violations, 0);
    }

    // ---- Day off ----

    #[test]
    fn test_day_off_penalty() {
        let workers = vec![worker(1, ShiftKind::Evening, Some(Day::Tuesday))];
        let counts = breakdown(&workers, &horizon(6, 0, &[5]));
        assert_eq!(counts.day_off_hits, 1);
        assert_eq!(counts.preference_matches, 1);
    }

    // ---- Weekly rest ----

    #[test]
    fn test_no_long_gap_misses_weekly_rest() {
        let workers = vec![worker(1, ShiftKind::Day, None)];
        let counts = breakdown(&workers, &horizon(BLOCKS_PER_WEEK, 0, &[1, 4, 7]));
        assert_eq!(counts.missing_weekly_rest, 1);
    }

    #[test]
    fn test_late_first_block_counts_as_rest() {
        // first worked block 5: gap from week start is 6
        let workers = vec![worker(1, ShiftKind::Day, None)];
        let counts = breakdown(&workers, &horizon(BLOCKS_PER_WEEK, 0, &[5]));
        assert_eq!(counts.missing_weekly_rest, 0);
    }

    #[test]
    fn test_gap_of_six_counts_as_rest() {
        let workers = vec![worker(1, ShiftKind::Day, None)];
        let counts = breakdown(&workers, &horizon(BLOCKS_PER_WEEK, 0, &[1, 7]));
        assert_eq!(counts.missing_weekly_rest, 0);
    }

    #[test]
    fn test_unscheduled_worker_needs_no_rest() {
        let workers = vec![
            worker(1, ShiftKind::Day, None),
            worker(2, ShiftKind::Day, None),
        ];
        let counts = breakdown(&workers, &horizon(BLOCKS_PER_WEEK, 0, &[1]));
        assert_eq!(counts.missing_weekly_rest, 1);
    }

    #[test]
    fn test_partial_horizon_skips_weekly_rest() {
        let workers = vec![worker(1, ShiftKind::Day, None)];
        let counts = breakdown(&workers, &horizon(9, 0, &[1, 4, 7]));
        assert_eq!(counts.missing_weekly_rest, 0);
    }

    // ---- Totals and purity ----

    #[test]
    fn test_total_matches_counts() {
        let counts = ScoreBreakdown {
            preference_matches: 7,
            min_rest_violations: 1,
            rotation_violations: 0,
            night_streak_violations: 1,
            day_off_hits: 2,
            missing_weekly_rest: 1,
        };
        assert_eq!(counts.hard_violations(), 3);
        assert_eq!(counts.total(), 7.0 - 3000.0 - 4.0);
    }

    #[test]
    fn test_evaluate_is_repeatable_with_reused_scratch() {
        let workers: Vec<Worker> = (0..4)
            .map(|i| worker(i, ShiftKind::ALL[i as usize % 3], Day::from_index(i as usize)))
            .collect();
        let roster = Roster::from_blocks(std::array::from_fn(|b| vec![b % 4]));
        let eval = Evaluator::new(&workers);
        let mut scratch = eval.scratch();
        let first = eval.evaluate(&roster, &mut scratch);
        let second = eval.evaluate(&roster, &mut scratch);
        assert_eq!(first, second);
        assert_eq!(first, eval.evaluate(&roster, &mut eval.scratch()));
    }

    #[test]
    fn test_display_lists_every_rule() {
        let text = ScoreBreakdown::default().to_string();
        assert!(text.contains("minimum rest"));
        assert!(text.contains("missing weekly rest"));
    }
}
