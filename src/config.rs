//! Run configuration loaded from TOML.
//!
//! ```toml
//! [required]
//! night = 2
//! day = 3
//! evening = 2
//!
//! [ga]
//! population_size = 500
//! max_generations = 20000
//! stagnation_limit = 2000
//! seed = 42
//! ```
//!
//! Missing sections and keys fall back to their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, RosterError};
use crate::ga::GaConfig;
use crate::models::RequiredWorkers;

/// Headcounts plus GA parameters for one solve.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub required: RequiredWorkers,
    pub ga: GaConfig,
}

impl RunConfig {
    /// Loads configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| RosterError::io(path, e))?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    pub fn with_required(mut self, required: RequiredWorkers) -> Self {
        self.required = required;
        self
    }

    pub fn with_ga(mut self, ga: GaConfig) -> Self {
        self.ga = ga;
        self
    }
}
