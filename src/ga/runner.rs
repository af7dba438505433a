//! GA evolutionary loop execution.
//!
//! [`GaRunner`] drives a semi-steady-state loop:
//! initialization → (evaluate → sort → breed) × generations.
//!
//! After each sort the population is split into [`PopulationBands`]. Each
//! elite picks one mate from the background band and its children overwrite
//! a fixed slice of the offspring band. Elites are never overwritten, so
//! the top score never decreases from one generation to the next; the
//! background band survives until a sort moves it into the offspring band.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::Rng;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{debug, info};

use super::config::GaConfig;
use super::types::{GaProblem, Individual, PopulationBands};
use crate::error::ConfigurationError;
use crate::random::{fork, rng_from_option};

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// `max_generations` reached.
    Budget,
    /// No better top score for `stagnation_limit` generations.
    Stagnation,
    /// Top score reached `target_score`.
    TargetReached,
    /// `time_limit_ms` elapsed.
    TimeLimit,
    /// Cancellation flag set.
    Cancelled,
    /// Caller-supplied stop predicate returned `true`.
    Predicate,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StopReason::Budget => "generation budget",
            StopReason::Stagnation => "stagnation",
            StopReason::TargetReached => "target score",
            StopReason::TimeLimit => "time limit",
            StopReason::Cancelled => "cancelled",
            StopReason::Predicate => "stop predicate",
        };
        f.write_str(s)
    }
}

/// Snapshot taken after each generation's sort.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationStats {
    /// 1-based generation number.
    pub generation: usize,
    /// Score of `population[0]`.
    pub best_score: f64,
    /// Mean score over the whole population.
    pub mean_score: f64,
    /// Generations since the top score last improved.
    pub stagnant_for: usize,
    /// Wall-clock time since the run started.
    pub elapsed: Duration,
}

/// Result of a GA optimization run.
#[derive(Debug, Clone)]
pub struct GaResult<I: Individual> {
    /// Top individual of the final sort.
    pub best: I,

    /// Score of `best`.
    pub best_score: f64,

    /// Number of generations evaluated and sorted.
    pub generations: usize,

    /// Why the loop stopped.
    pub stop_reason: StopReason,

    /// Top score after each generation's sort. Non-decreasing.
    pub score_history: Vec<f64>,
}

/// Executes the GA evolutionary loop.
///
/// # Usage
///
/// ```ignore
/// let problem = RosterProblem::new(&registry, required, &config)?;
/// let result = GaRunner::run(&problem, &config)?;
/// println!("Best score: {}", result.best_score);
/// ```
pub struct GaRunner;

impl GaRunner {
    /// Runs the GA optimization.
    pub fn run<P: GaProblem>(
        problem: &P,
        config: &GaConfig,
    ) -> Result<GaResult<P::Individual>, ConfigurationError> {
        Self::run_until(problem, config, None, |_| false)
    }

    /// Runs the GA with an optional cancellation token.
    ///
    /// If the flag is set, the GA stops at the next generation boundary and
    /// returns the best roster found so far.
    pub fn run_with_cancel<P: GaProblem>(
        problem: &P,
        config: &GaConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<GaResult<P::Individual>, ConfigurationError> {
        Self::run_until(problem, config, cancel, |_| false)
    }

    /// Runs the GA until a configured limit is hit, the cancellation flag is
    /// set, or `stop` returns `true` for a generation's stats.
    pub fn run_until<P, F>(
        problem: &P,
        config: &GaConfig,
        cancel: Option<Arc<AtomicBool>>,
        mut stop: F,
    ) -> Result<GaResult<P::Individual>, ConfigurationError>
    where
        P: GaProblem,
        F: FnMut(&GenerationStats) -> bool,
    {
        config.validate()?;
        let bands = config.bands();
        let mut rng = rng_from_option(config.seed);
        let started = Instant::now();

        info!(
            event = "solve_start",
            population = config.population_size,
            elites = config.elite_count,
            children_per_elite = config.children_per_elite,
            max_generations = config.max_generations,
        );

        // 1. Initialize population
        let mut population: Vec<P::Individual> = (0..config.population_size)
            .map(|_| problem.create_individual(&mut rng))
            .collect();

        let mut score_history = Vec::new();
        let mut best_seen = f64::NEG_INFINITY;
        let mut stagnant_for = 0usize;
        let mut generation = 0usize;

        // 2. Evolutionary loop
        let stop_reason = loop {
            generation += 1;

            // Evaluate; only new offspring are unscored
            evaluate_population(problem, &mut population, config.parallel);

            // Sort by score, best first
            sort_population(&mut population);

            let best_score = population[0].rank_score();
            score_history.push(best_score);
            if best_score > best_seen {
                best_seen = best_score;
                stagnant_for = 0;
            } else {
                stagnant_for += 1;
            }

            let stats = GenerationStats {
                generation,
                best_score,
                mean_score: mean_score(&population),
                stagnant_for,
                elapsed: started.elapsed(),
            };
            problem.on_generation(generation, best_score);
            if config.log_every > 0 && generation % config.log_every == 0 {
                debug!(
                    event = "generation",
                    generation,
                    best_score,
                    mean_score = stats.mean_score,
                );
            }

            // Termination checks, once per generation boundary
            if let Some(reason) = check_stop(config, &stats, cancel.as_deref(), &mut stop) {
                break reason;
            }

            // Breed into the offspring band
            breed(problem, &mut population, &bands, config, &mut rng);
        };

        let best = population.swap_remove(0);
        let best_score = best.rank_score();
        info!(
            event = "solve_end",
            generations = generation,
            best_score,
            stop_reason = %stop_reason,
            elapsed_ms = started.elapsed().as_millis() as u64,
        );

        Ok(GaResult {
            best,
            best_score,
            generations: generation,
            stop_reason,
            score_history,
        })
    }
}

fn check_stop<F>(
    config: &GaConfig,
    stats: &GenerationStats,
    cancel: Option<&AtomicBool>,
    stop: &mut F,
) -> Option<StopReason>
where
    F: FnMut(&GenerationStats) -> bool,
{
    if config.target_score.is_some_and(|t| stats.best_score >= t) {
        return Some(StopReason::TargetReached);
    }
    if stop(stats) {
        return Some(StopReason::Predicate);
    }
    if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
        return Some(StopReason::Cancelled);
    }
    if config
        .time_limit_ms
        .is_some_and(|ms| stats.elapsed >= Duration::from_millis(ms))
    {
        return Some(StopReason::TimeLimit);
    }
    if config.stagnation_limit > 0 && stats.stagnant_for >= config.stagnation_limit {
        return Some(StopReason::Stagnation);
    }
    if stats.generation >= config.max_generations {
        return Some(StopReason::Budget);
    }
    None
}

/// Sort descending by score; unscored individuals last.
fn sort_population<I: Individual>(population: &mut [I]) {
    population.sort_by(|a, b| {
        b.rank_score()
            .partial_cmp(&a.rank_score())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}

fn mean_score<I: Individual>(population: &[I]) -> f64 {
    let sum: f64 = population.iter().map(|i| i.rank_score()).sum();
    sum / population.len() as f64
}

/// One elite's breeding assignment.
struct BreedTask {
    elite: usize,
    mate: usize,
    rng: StdRng,
}

/// Overwrites the offspring band with children of each elite and a random
/// background mate.
///
/// Mates and per-task RNGs are drawn from the master RNG before any
/// breeding starts, so the outcome is the same serial or parallel.
fn breed<P: GaProblem, R: Rng>(
    problem: &P,
    population: &mut [P::Individual],
    bands: &PopulationBands,
    config: &GaConfig,
    rng: &mut R,
) {
    let tasks: Vec<BreedTask> = bands
        .elite
        .clone()
        .map(|elite| BreedTask {
            elite,
            mate: rng.random_range(bands.background.clone()),
            rng: fork(rng),
        })
        .collect();

    let (parents, offspring) = population.split_at_mut(bands.offspring.start);
    let parents: &[P::Individual] = parents;
    let chunk = config.children_per_elite;
    let rate = config.mutation_rate;

    if config.parallel {
        fill_offspring_parallel(problem, parents, offspring, tasks, chunk, rate);
    } else {
        for (slots, task) in offspring.chunks_mut(chunk).zip(tasks) {
            fill_children(problem, parents, task, slots, rate);
        }
    }
}

#[cfg(feature = "parallel")]
fn fill_offspring_parallel<P: GaProblem>(
    problem: &P,
    parents: &[P::Individual],
    offspring: &mut [P::Individual],
    tasks: Vec<BreedTask>,
    chunk: usize,
    rate: f64,
) {
    offspring
        .par_chunks_mut(chunk)
        .zip(tasks.into_par_iter())
        .for_each(|(slots, task)| fill_children(problem, parents, task, slots, rate));
}

#[cfg(not(feature = "parallel"))]
fn fill_offspring_parallel<P: GaProblem>(
    problem: &P,
    parents: &[P::Individual],
    offspring: &mut [P::Individual],
    tasks: Vec<BreedTask>,
    chunk: usize,
    rate: f64,
) {
    for (slots, task) in offspring.chunks_mut(chunk).zip(tasks) {
        fill_children(problem, parents, task, slots, rate);
    }
}

fn fill_children<P: GaProblem>(
    problem: &P,
    parents: &[P::Individual],
    mut task: BreedTask,
    slots: &mut [P::Individual],
    mutation_rate: f64,
) {
    let elite = &parents[task.elite];
    let mate = &parents[task.mate];
    for slot in slots.iter_mut() {
        let mut child = problem.crossover(elite, mate, &mut task.rng);
        if task.rng.random_bool(mutation_rate) {
            problem.mutate(&mut child, &mut task.rng);
        }
        *slot = child;
    }
}

/// Scores every individual that has no score yet.
fn evaluate_population<P: GaProblem>(
    problem: &P,
    population: &mut [P::Individual],
    parallel: bool,
) {
    if parallel {
        evaluate_parallel(problem, population);
    } else {
        evaluate_serial(problem, population);
    }
}

fn evaluate_serial<P: GaProblem>(problem: &P, population: &mut [P::Individual]) {
    let mut scratch = problem.new_scratch();
    for ind in population.iter_mut().filter(|ind| ind.score().is_none()) {
        let s = problem.evaluate(ind, &mut scratch);
        ind.set_score(s);
    }
}

/// One scratch buffer per rayon worker.
#[cfg(feature = "parallel")]
fn evaluate_parallel<P: GaProblem>(problem: &P, population: &mut [P::Individual]) {
    population
        .par_iter_mut()
        .filter(|ind| ind.score().is_none())
        .for_each_init(
            || problem.new_scratch(),
            |scratch, ind| {
                let s = problem.evaluate(ind, scratch);
                ind.set_score(s);
            },
        );
}

#[cfg(not(feature = "parallel"))]
fn evaluate_parallel<P: GaProblem>(problem: &P, population: &mut [P::Individual]) {
    evaluate_serial(problem, population);
}

// ============================================================================
// Tests
// ============================================================================
