//! Roster GA problem definition.
//!
//! Implements [`GaProblem`] for weekly rosters, bridging the worker
//! registry, the generator, the fitness rules and the roster operators to
//! the generic evolutionary loop.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use rand::Rng;

use crate::config::RunConfig;
use crate::error::ConfigurationError;
use crate::fitness::{EvalScratch, Evaluator};
use crate::ga::operators::{mutate_random_block, segment_crossover};
use crate::ga::{GaConfig, GaProblem, GaResult, GaRunner, Individual, MutationScope};
use crate::generator::{check_capacity, generate_unchecked};
use crate::models::{RequiredWorkers, Roster};
use crate::registry::WorkerRegistry;

impl Individual for Roster {
    fn score(&self) -> Option<f64> {
        Roster::score(self)
    }

    fn set_score(&mut self, score: f64) {
        Roster::set_score(self, score);
    }
}

/// GA problem: staff a week for one registry and headcount.
///
/// # Example
/// ```no_run
/// use u_roster::ga::{GaConfig, GaRunner};
/// use u_roster::models::{RequiredWorkers, ShiftKind, Worker};
/// use u_roster::problem::RosterProblem;
/// use u_roster::registry::WorkerRegistry;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let workers = (0..6)
///     .map(|i| Worker::new(i, format!("W{i}"), None, ShiftKind::ALL[i as usize % 3]))
///     .collect();
/// let registry = WorkerRegistry::from_workers(workers)?;
/// let config = GaConfig::fast().with_seed(1);
/// let problem = RosterProblem::new(&registry, RequiredWorkers::new(1, 1, 1), &config)?;
/// let result = GaRunner::run(&problem, &config)?;
/// println!("best score: {}", result.best_score);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct RosterProblem<'a> {
    registry: &'a WorkerRegistry,
    required: RequiredWorkers,
    evaluator: Evaluator<'a>,
    mutation_scope: MutationScope,
}

impl<'a> RosterProblem<'a> {
    /// Creates the problem, checking up front that every day can be
    /// staffed, so no generation or mutation can come up short mid-run.
    pub fn new(
        registry: &'a WorkerRegistry,
        required: RequiredWorkers,
        config: &GaConfig,
    ) -> Result<Self, ConfigurationError> {
        check_capacity(registry.len(), &required)?;
        Ok(Self {
            registry,
            required,
            evaluator: Evaluator::new(registry.workers()),
            mutation_scope: config.mutation_scope,
        })
    }

    pub fn registry(&self) -> &'a WorkerRegistry {
        self.registry
    }

    pub fn required(&self) -> &RequiredWorkers {
        &self.required
    }

    pub fn evaluator(&self) -> &Evaluator<'a> {
        &self.evaluator
    }
}

impl GaProblem for RosterProblem<'_> {
    type Individual = Roster;
    type Scratch = EvalScratch;

    fn new_scratch(&self) -> EvalScratch {
        self.evaluator.scratch()
    }

    fn create_individual<R: Rng>(&self, rng: &mut R) -> Roster {
        generate_unchecked(self.registry.len(), &self.required, rng)
    }

    fn evaluate(&self, roster: &Roster, scratch: &mut EvalScratch) -> f64 {
        self.evaluator.evaluate(roster, scratch)
    }

    fn crossover<R: Rng>(&self, parent_a: &Roster, parent_b: &Roster, rng: &mut R) -> Roster {
        segment_crossover(parent_a, parent_b, rng).0
    }

    fn mutate<R: Rng>(&self, roster: &mut Roster, rng: &mut R) {
        mutate_random_block(
            roster,
            self.registry.len(),
            &self.required,
            self.mutation_scope,
            rng,
        );
    }
}

/// Builds the problem for `config` and runs the GA to completion.
pub fn solve(
    registry: &WorkerRegistry,
    config: &RunConfig,
    cancel: Option<Arc<AtomicBool>>,
) -> Result<GaResult<Roster>, ConfigurationError> {
    let problem = RosterProblem::new(registry, config.required, &config.ga)?;
    GaRunner::run_with_cancel(&problem, &config.ga, cancel)
}
