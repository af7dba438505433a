//! Candidate weekly assignment (the GA chromosome).

use super::calendar::{Block, RequiredWorkers, BLOCKS_PER_WEEK};
use super::worker::WorkerIndex;

/// One complete weekly assignment of workers to all 21 blocks.
///
/// Each roster owns its block lists. Cloning a roster, or copying a block
/// from another roster, always copies the list; two rosters never share
/// storage for a block.
#[derive(Debug, Clone, PartialEq)]
pub struct Roster {
    blocks: [Vec<WorkerIndex>; BLOCKS_PER_WEEK],
    score: Option<f64>,
}

impl Roster {
    /// Roster with every block empty and no score.
    pub fn empty() -> Self {
        Self {
            blocks: std::array::from_fn(|_| Vec::new()),
            score: None,
        }
    }

    /// Roster from explicit block lists.
    pub fn from_blocks(blocks: [Vec<WorkerIndex>; BLOCKS_PER_WEEK]) -> Self {
        Self {
            blocks,
            score: None,
        }
    }

    /// Workers assigned to the block at `index`.
    pub fn block(&self, index: usize) -> &[WorkerIndex] {
        &self.blocks[index]
    }

    /// All block lists in index order.
    pub fn blocks(&self) -> &[Vec<WorkerIndex>; BLOCKS_PER_WEEK] {
        &self.blocks
    }

    /// Replaces the list of one block, clearing the score.
    pub fn set_block(&mut self, index: usize, workers: Vec<WorkerIndex>) {
        self.blocks[index] = workers;
        self.score = None;
    }

    /// Copies one block's list from `other` into this roster's own storage.
    pub fn copy_block_from(&mut self, other: &Roster, index: usize) {
        self.blocks[index].clear();
        self.blocks[index].extend_from_slice(&other.blocks[index]);
        self.score = None;
    }

    /// Score from the last evaluation, `None` if never evaluated or
    /// modified since.
    pub fn score(&self) -> Option<f64> {
        self.score
    }

    pub fn set_score(&mut self, score: f64) {
        self.score = Some(score);
    }

    /// Blocks (by index) a worker is assigned to, in chronological order.
    pub fn blocks_of(&self, worker: WorkerIndex) -> Vec<usize> {
        self.blocks
            .iter()
            .enumerate()
            .filter(|(_, list)| list.contains(&worker))
            .map(|(i, _)| i)
            .collect()
    }

    /// Checks the structural invariant: every block holds exactly the
    /// required headcount and no worker repeats within a block.
    pub fn is_well_formed(&self, required: &RequiredWorkers) -> bool {
        self.blocks.iter().enumerate().all(|(i, list)| {
            let expected = required.for_shift(Block::from_index(i).shift);
            if list.len() != expected {
                return false;
            }
            let mut sorted = list.clone();
            sorted.sort_unstable();
            sorted.windows(2).all(|w| w[0] != w[1])
        })
    }
}
