//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control the evolutionary loop.

use serde::{Deserialize, Serialize};

use super::types::PopulationBands;
use crate::error::ConfigurationError;

/// Pool that mutation draws replacement workers from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MutationScope {
    /// Whole roster minus workers already on the other blocks of the
    /// mutated block's day. Keeps at most one shift per worker per day.
    #[default]
    Day,
    /// Whole roster.
    Global,
}

/// Configuration for the roster GA.
///
/// The population is split into three bands after every sort (see
/// [`PopulationBands`]): `elite_count` elites each breed
/// `children_per_elite` children that overwrite the trailing offspring
/// band; everything in between is background material that is only ever
/// read as a mate.
///
/// # Defaults
///
/// ```
/// use u_roster::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 1000);
/// assert_eq!(config.elite_count, 40);
/// assert_eq!(config.children_per_elite, 4);
/// assert_eq!(config.max_generations, 100_000);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_roster::ga::GaConfig;
///
/// let config = GaConfig::default()
///     .with_population_size(200)
///     .with_elite_count(10)
///     .with_max_generations(5_000)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GaConfig {
    /// Number of rosters in the population.
    pub population_size: usize,

    /// Number of top-ranked rosters that breed each generation.
    pub elite_count: usize,

    /// Children produced per elite.
    pub children_per_elite: usize,

    /// Generation budget.
    pub max_generations: usize,

    /// Probability of mutating a child after crossover (0.0–1.0).
    pub mutation_rate: f64,

    /// Worker pool used when a mutation redraws a block.
    pub mutation_scope: MutationScope,

    /// Generations without a better top score before stopping.
    ///
    /// Set to 0 to disable stagnation-based termination.
    pub stagnation_limit: usize,

    /// Stop as soon as the top score reaches this value.
    pub target_score: Option<f64>,

    /// Optional wall-clock time limit in milliseconds.
    ///
    /// Checked at each generation boundary, so the run may exceed the
    /// limit by up to one generation.
    pub time_limit_ms: Option<u64>,

    /// Whether to evaluate and breed in parallel using rayon.
    ///
    /// Ignored when the crate is built without the `parallel` feature.
    pub parallel: bool,

    /// Random seed for reproducibility. `None` uses a random seed.
    pub seed: Option<u64>,

    /// Emit a progress event every this many generations (0 disables).
    pub log_every: usize,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 1000,
            elite_count: 40,
            children_per_elite: 4,
            max_generations: 100_000,
            mutation_rate: 1.0 / 3.0,
            mutation_scope: MutationScope::Day,
            stagnation_limit: 0,
            target_score: None,
            time_limit_ms: None,
            parallel: true,
            seed: None,
            log_every: 1000,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the number of elites.
    pub fn with_elite_count(mut self, n: usize) -> Self {
        self.elite_count = n;
        self
    }

    /// Sets the number of children per elite.
    pub fn with_children_per_elite(mut self, n: usize) -> Self {
        self.children_per_elite = n;
        self
    }

    /// Sets the generation budget.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the mutation pool scope.
    pub fn with_mutation_scope(mut self, scope: MutationScope) -> Self {
        self.mutation_scope = scope;
        self
    }

    /// Sets the stagnation limit (0 to disable).
    pub fn with_stagnation_limit(mut self, limit: usize) -> Self {
        self.stagnation_limit = limit;
        self
    }

    /// Stops once the top score reaches `score`.
    pub fn with_target_score(mut self, score: f64) -> Self {
        self.target_score = Some(score);
        self
    }

    /// Sets the wall-clock time limit in milliseconds.
    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = Some(ms);
        self
    }

    /// Enables or disables parallel evaluation and breeding.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the progress logging interval.
    pub fn with_log_every(mut self, n: usize) -> Self {
        self.log_every = n;
        self
    }

    /// Preset for small rosters and tests.
    ///
    /// - Population: 200, Elites: 10 × 4 children, Generations: 2000
    /// - Stagnation limit: 500
    pub fn fast() -> Self {
        Self {
            population_size: 200,
            elite_count: 10,
            max_generations: 2000,
            stagnation_limit: 500,
            log_every: 100,
            ..Self::default()
        }
    }

    /// Index ranges of the elite, background and offspring bands.
    pub fn bands(&self) -> PopulationBands {
        PopulationBands::new(
            self.population_size,
            self.elite_count,
            self.children_per_elite,
        )
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        let invalid = |msg: &str| -> Result<(), ConfigurationError> {
            Err(ConfigurationError::InvalidGa(msg.into()))
        };

        if self.elite_count == 0 {
            return invalid("elite_count must be at least 1");
        }
        if self.children_per_elite == 0 {
            return invalid("children_per_elite must be at least 1");
        }
        if self.max_generations == 0 {
            return invalid("max_generations must be at least 1");
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return invalid("mutation_rate must be within 0.0..=1.0");
        }
        if self.time_limit_ms == Some(0) {
            return invalid("time_limit_ms must be positive or None");
        }
        let offspring = self.elite_count.saturating_mul(self.children_per_elite);
        if self.population_size <= self.elite_count.saturating_add(offspring) {
            return Err(ConfigurationError::InvalidGa(format!(
                "population_size {} leaves no background band for {} elites with {} children each",
                self.population_size, self.elite_count, self.children_per_elite
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GaConfig::default();
        assert_eq!(config.population_size, 1000);
        assert_eq!(config.elite_count, 40);
        assert_eq!(config.children_per_elite, 4);
        assert_eq!(config.max_generations, 100_000);
        assert!((config.mutation_rate - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(config.mutation_scope, MutationScope::Day);
        assert_eq!(config.stagnation_limit, 0);
        assert!(config.target_score.is_none());
        assert!(config.time_limit_ms.is_none());
        assert!(config.parallel);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_builder_pattern() {
        let config = GaConfig::default()
            .with_population_size(300)
            .with_elite_count(20)
            .with_children_per_elite(5)
            .with_max_generations(50)
            .with_mutation_rate(0.5)
            .with_mutation_scope(MutationScope::Global)
            .with_stagnation_limit(10)
            .with_target_score(100.0)
            .with_time_limit_ms(2000)
            .with_parallel(false)
            .with_seed(42);

        assert_eq!(config.population_size, 300);
        assert_eq!(config.elite_count, 20);
        assert_eq!(config.children_per_elite, 5);
        assert_eq!(config.max_generations, 50);
        assert!((config.mutation_rate - 0.5).abs() < 1e-12);
        assert_eq!(config.mutation_scope, MutationScope::Global);
        assert_eq!(config.stagnation_limit, 10);
        assert_eq!(config.target_score, Some(100.0));
        assert_eq!(config.time_limit_ms, Some(2000));
        assert!(!config.parallel);
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn test_validate_ok() {
        assert!(GaConfig::default().validate().is_ok());
        assert!(GaConfig::fast().validate().is_ok());
    }

    #[test]
    fn test_validate_zero_elites() {
        assert!(GaConfig::default().with_elite_count(0).validate().is_err());
    }

    #[test]
    fn test_validate_zero_children() {
        let config = GaConfig::default().with_children_per_elite(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_zero_generations() {
        let config = GaConfig::default().with_max_generations(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_zero_time_limit() {
        let config = GaConfig::default().with_time_limit_ms(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_requires_background_band() {
        // 10 elites + 40 children = 50: no room for mates
        let config = GaConfig::default()
            .with_population_size(50)
            .with_elite_count(10)
            .with_children_per_elite(4);
        assert!(config.validate().is_err());

        let config = config.with_population_size(51);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_clamp_mutation_rate() {
        let config = GaConfig::default().with_mutation_rate(2.0);
        assert!((config.mutation_rate - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_deserialize_partial_toml() {
        let config: GaConfig = toml::from_str(
            r#"
            population_size = 500
            mutation_scope = "global"
            seed = 9
            "#,
        )
        .unwrap();
        assert_eq!(config.population_size, 500);
        assert_eq!(config.mutation_scope, MutationScope::Global);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.elite_count, 40);
    }
}
