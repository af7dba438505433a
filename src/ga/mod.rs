//! Genetic Algorithm engine.
//!
//! A trait-based evolutionary loop with band-based elitism. The roster
//! domain plugs in by implementing [`GaProblem`] (see
//! [`RosterProblem`](crate::problem::RosterProblem)).
//!
//! # Core Traits
//!
//! - [`Individual`]: A candidate solution carrying its own score
//! - [`GaProblem`]: Problem definition: initialization, evaluation and operators
//!
//! # Key Types
//!
//! - [`GaConfig`]: Algorithm parameters (population layout, stopping, presets)
//! - [`PopulationBands`]: Elite / background / offspring index ranges
//! - [`GaRunner`]: Executes the evolutionary loop
//! - [`GaResult`]: Final optimization result with statistics
//!
//! # Submodules
//!
//! - [`operators`]: Roster segment crossover, block-resampling mutation and
//!   swap-to-back sampling
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - Syswerda (1991), "A Study of Reproduction in Generational and Steady-State
//!   Genetic Algorithms"

mod config;
pub mod operators;
mod runner;
mod types;

pub use config::{GaConfig, MutationScope};
pub use runner::{GaResult, GaRunner, GenerationStats, StopReason};
pub use types::{GaProblem, Individual, PopulationBands};
