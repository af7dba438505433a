//! Core trait definitions for the GA engine.
//!
//! [`Individual`] and [`GaProblem`] define the contract between the
//! evolutionary loop and the roster domain. Scores are maximized: higher
//! is better, and an individual without a score ranks below every scored
//! one.

use std::ops::Range;

use rand::Rng;

/// A candidate solution in the GA population.
///
/// Individuals carry their own score. The runner computes it through
/// [`GaProblem::evaluate`] and stores it via
/// [`set_score`](Individual::set_score).
pub trait Individual: Clone + Send + Sync {
    /// Score from the last evaluation, `None` if not evaluated yet.
    fn score(&self) -> Option<f64>;

    /// Stores an evaluated score.
    fn set_score(&mut self, score: f64);

    /// Score used for ranking; unevaluated individuals rank last.
    fn rank_score(&self) -> f64 {
        self.score().unwrap_or(f64::NEG_INFINITY)
    }
}

/// Defines a GA optimization problem.
///
/// Evaluation takes an explicit scratch buffer instead of mutating shared
/// state, so the runner can evaluate many individuals at once by giving
/// every task its own [`Scratch`](GaProblem::Scratch).
///
/// # Thread Safety
///
/// `GaProblem` must be `Send + Sync` because the runner may evaluate and
/// breed in parallel using rayon.
pub trait GaProblem: Send + Sync {
    /// The individual (solution) type for this problem.
    type Individual: Individual;

    /// Per-task working memory for [`evaluate`](GaProblem::evaluate).
    type Scratch: Send;

    /// Allocates a scratch buffer sized for this problem.
    fn new_scratch(&self) -> Self::Scratch;

    /// Creates a random, structurally valid individual.
    fn create_individual<R: Rng>(&self, rng: &mut R) -> Self::Individual;

    /// Scores an individual. Must be deterministic for an unchanged
    /// individual, whatever the scratch buffer held before the call.
    fn evaluate(&self, individual: &Self::Individual, scratch: &mut Self::Scratch) -> f64;

    /// Produces one child from two parents.
    fn crossover<R: Rng>(
        &self,
        parent_a: &Self::Individual,
        parent_b: &Self::Individual,
        rng: &mut R,
    ) -> Self::Individual;

    /// Mutates an individual in place.
    fn mutate<R: Rng>(&self, individual: &mut Self::Individual, rng: &mut R);

    /// Called after each generation's sort with the current top score.
    ///
    /// The default implementation is a no-op.
    fn on_generation(&self, _generation: usize, _best_score: f64) {}
}

/// Named index ranges of a sorted population.
///
/// ```text
/// [0, E)            elite       breeds, never overwritten
/// [E, P - E*C)      background  read-only mates
/// [P - E*C, P)      offspring   overwritten by children every generation
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopulationBands {
    pub elite: Range<usize>,
    pub background: Range<usize>,
    pub offspring: Range<usize>,
}

impl PopulationBands {
    /// Computes the bands for population size `p`, `e` elites and `c`
    /// children per elite. Ranges are clamped so they never overlap.
    pub fn new(p: usize, e: usize, c: usize) -> Self {
        let e = e.min(p);
        let offspring_start = p.saturating_sub(e.saturating_mul(c)).max(e);
        Self {
            elite: 0..e,
            background: e..offspring_start,
            offspring: offspring_start..p,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bands() {
        let bands = PopulationBands::new(1000, 40, 4);
        assert_eq!(bands.elite, 0..40);
        assert_eq!(bands.background, 40..840);
        assert_eq!(bands.offspring, 840..1000);
    }

    #[test]
    fn test_bands_cover_population_without_overlap() {
        for (p, e, c) in [(10, 2, 3), (51, 10, 4), (7, 1, 1), (5, 5, 2)] {
            let b = PopulationBands::new(p, e, c);
            assert_eq!(b.elite.start, 0);
            assert_eq!(b.elite.end, b.background.start);
            assert_eq!(b.background.end, b.offspring.start);
            assert_eq!(b.offspring.end, p);
        }
    }

    #[derive(Clone)]
    struct Scored(Option<f64>);

    impl Individual for Scored {
        fn score(&self) -> Option<f64> {
            self.0
        }
        fn set_score(&mut self, score: f64) {
            self.0 = Some(score);
        }
    }

    #[test]
    fn test_unscored_ranks_last() {
        assert_eq!(Scored(None).rank_score(), f64::NEG_INFINITY);
        assert_eq!(Scored(Some(-5000.0)).rank_score(), -5000.0);
    }
}
