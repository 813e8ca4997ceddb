//! Configuration system for antforge.
//!
//! Load colony configuration from TOML or YAML files to control colony size,
//! pheromone dynamics and early stopping without code changes.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use antforge_config::{ColonyConfig, EliteWeight};
//!
//! let config = ColonyConfig::from_toml_str(r#"
//!     ant_count = 20
//!     iteration_budget = 50
//!     random_seed = 7
//!
//!     [pheromone]
//!     beta = 3.0
//!     evaporation_rate = 0.5
//!     elite_weight = { type = "constant", weight = 2.0 }
//!
//!     [convergence]
//!     no_improvement_limit = 10
//! "#).unwrap();
//!
//! assert_eq!(config.ant_count, 20);
//! assert_eq!(config.pheromone.alpha, 1.0);
//! assert_eq!(config.pheromone.elite_weight, EliteWeight::Constant { weight: 2.0 });
//! assert!(config.validate().is_ok());
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use antforge_config::ColonyConfig;
//!
//! let config = ColonyConfig::load("colony.toml").unwrap_or_default();
//! // Proceeds with defaults if file doesn't exist
//! ```

use std::path::Path;

use antforge_core::AntForgeError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl From<ConfigError> for AntForgeError {
    fn from(err: ConfigError) -> Self {
        AntForgeError::InvalidInput(err.to_string())
    }
}

/// Main colony configuration.
///
/// Fixed for the duration of a run.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct ColonyConfig {
    /// Ants constructing a tour per iteration.
    pub ant_count: usize,

    /// Maximum number of iterations.
    pub iteration_budget: usize,

    /// City every ant starts from.
    pub start_city: usize,

    /// Random seed for reproducible results.
    pub random_seed: Option<u64>,

    /// Number of threads for parallel tour construction.
    pub ant_thread_count: AntThreadCount,

    /// Known optimum used only to report the gap.
    pub reference_optimum: Option<f64>,

    /// Pheromone dynamics.
    pub pheromone: PheromoneConfig,

    /// Early stopping.
    pub convergence: ConvergenceConfig,
}

impl Default for ColonyConfig {
    fn default() -> Self {
        Self {
            ant_count: 75,
            iteration_budget: 100,
            start_city: 0,
            random_seed: None,
            ant_thread_count: AntThreadCount::default(),
            reference_optimum: None,
            pheromone: PheromoneConfig::default(),
            convergence: ConvergenceConfig::default(),
        }
    }
}

impl ColonyConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist or contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Sets the number of ants per iteration.
    pub fn with_ant_count(mut self, ant_count: usize) -> Self {
        self.ant_count = ant_count;
        self
    }

    /// Sets the iteration budget.
    pub fn with_iteration_budget(mut self, iterations: usize) -> Self {
        self.iteration_budget = iterations;
        self
    }

    /// Sets the start city.
    pub fn with_start_city(mut self, city: usize) -> Self {
        self.start_city = city;
        self
    }

    /// Sets the random seed.
    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    /// Sets the construction thread count.
    pub fn with_ant_thread_count(mut self, count: AntThreadCount) -> Self {
        self.ant_thread_count = count;
        self
    }

    /// Sets the reference optimum used for gap reporting.
    pub fn with_reference_optimum(mut self, optimum: f64) -> Self {
        self.reference_optimum = Some(optimum);
        self
    }

    /// Replaces the pheromone configuration.
    pub fn with_pheromone(mut self, pheromone: PheromoneConfig) -> Self {
        self.pheromone = pheromone;
        self
    }

    /// Replaces the convergence configuration.
    pub fn with_convergence(mut self, convergence: ConvergenceConfig) -> Self {
        self.convergence = convergence;
        self
    }

    /// Checks every value against its documented range.
    ///
    /// The start city can only be checked against a point set, so that
    /// check is left to the engine.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ant_count == 0 {
            return Err(invalid("ant_count must be positive"));
        }
        if self.iteration_budget == 0 {
            return Err(invalid("iteration_budget must be positive"));
        }
        if let AntThreadCount::Count(0) = self.ant_thread_count {
            return Err(invalid("ant_thread_count must be positive"));
        }
        if let Some(optimum) = self.reference_optimum {
            if !optimum.is_finite() || optimum <= 0.0 {
                return Err(invalid(format!(
                    "reference_optimum must be finite and positive, got {}",
                    optimum
                )));
            }
        }
        self.pheromone.validate()?;
        self.convergence.validate()
    }
}

fn invalid(message: impl Into<String>) -> ConfigError {
    ConfigError::Invalid(message.into())
}

fn non_negative(field: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(format!(
            "{} must be finite and non-negative, got {}",
            field, value
        )))
    }
}

/// Thread count for parallel tour construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AntThreadCount {
    /// Use the global rayon pool.
    #[default]
    Auto,

    /// Construct tours sequentially on the engine thread.
    None,

    /// Dedicated pool with a specific number of threads.
    Count(usize),
}

/// Pheromone dynamics configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct PheromoneConfig {
    /// Pheromone influence exponent.
    pub alpha: f64,

    /// Heuristic (inverse distance) influence exponent.
    pub beta: f64,

    /// Fraction of pheromone removed per iteration, in `[0, 1)`.
    pub evaporation_rate: f64,

    /// Deposit scale `Q`; an ant deposits `Q / length` on each edge.
    pub deposit_scale: f64,

    /// Extra deposit on the best tour's edges.
    pub elite_weight: EliteWeight,
}

impl Default for PheromoneConfig {
    fn default() -> Self {
        Self {
            alpha: 1.0,
            beta: 2.0,
            evaporation_rate: 0.9,
            deposit_scale: 100.0,
            elite_weight: EliteWeight::default(),
        }
    }
}

impl PheromoneConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("pheromone.alpha", self.alpha)?;
        non_negative("pheromone.beta", self.beta)?;
        non_negative("pheromone.deposit_scale", self.deposit_scale)?;
        if !(0.0..1.0).contains(&self.evaporation_rate) {
            return Err(invalid(format!(
                "pheromone.evaporation_rate must be in [0, 1), got {}",
                self.evaporation_rate
            )));
        }
        if let EliteWeight::Constant { weight } = self.elite_weight {
            non_negative("pheromone.elite_weight.weight", weight)?;
        }
        Ok(())
    }
}

/// Elitist reinforcement policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EliteWeight {
    /// Grows linearly from 1.0 on the first iteration towards 2.0 on the last:
    /// `1 + iteration / iteration_budget`.
    #[default]
    Linear,

    /// Same weight on every iteration.
    Constant { weight: f64 },

    /// No elitist reinforcement.
    Disabled,
}

impl EliteWeight {
    /// Weight applied on the 0-based `iteration` of a run of `budget` iterations.
    ///
    /// # Examples
    ///
    /// ```
    /// use antforge_config::EliteWeight;
    ///
    /// assert_eq!(EliteWeight::Linear.weight_at(0, 100), 1.0);
    /// assert_eq!(EliteWeight::Linear.weight_at(50, 100), 1.5);
    /// assert_eq!(EliteWeight::Disabled.weight_at(50, 100), 0.0);
    /// ```
    pub fn weight_at(&self, iteration: usize, budget: usize) -> f64 {
        match *self {
            EliteWeight::Linear => 1.0 + iteration as f64 / budget.max(1) as f64,
            EliteWeight::Constant { weight } => weight,
            EliteWeight::Disabled => 0.0,
        }
    }
}

/// Early stopping configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct ConvergenceConfig {
    /// Relative improvement below which an iteration counts as stagnant.
    pub improvement_threshold: f64,

    /// Consecutive stagnant iterations that stop the run.
    pub no_improvement_limit: u64,
}

impl Default for ConvergenceConfig {
    fn default() -> Self {
        Self {
            improvement_threshold: 0.001,
            no_improvement_limit: 15,
        }
    }
}

impl ConvergenceConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative(
            "convergence.improvement_threshold",
            self.improvement_threshold,
        )?;
        if self.no_improvement_limit == 0 {
            return Err(invalid("convergence.no_improvement_limit must be positive"));
        }
        Ok(())
    }
}
