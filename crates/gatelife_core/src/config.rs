//! Configuration management for simulation parameters.
//!
//! Strongly-typed sections that map onto a TOML settings file. Every section
//! carries `#[serde(default)]`, so a file only needs the keys it overrides.
//!
//! ## Example settings file
//!
//! ```toml
//! [world]
//! width = 60
//! height = 60
//! seed = 42
//! initial_population = 100
//!
//! [lifecycle]
//! reproduction_threshold = 20.0
//! birth_cost = 20.0
//!
//! [tasks]
//! reward_scheme = "Reference"
//! ```

use crate::task::{Task, TaskSuite};
use crate::topology::{BirthPlacement, PopStructure, Topology};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Grid geometry, seeding and run length.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct WorldConfig {
    pub width: usize,
    pub height: usize,
    pub structure: PopStructure,
    pub seed: u64,
    /// Founders injected before the first update.
    pub initial_population: usize,
    /// Updates run by the headless driver.
    pub updates: u64,
    /// Sweep every organism through `move_organism` before each update.
    pub move_each_update: bool,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 10,
            height: 10,
            structure: PopStructure::Grid,
            seed: 1,
            initial_population: 10,
            updates: 1000,
            move_each_update: false,
        }
    }
}

/// Per-tick execution budget and reproduction economics.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct LifecycleConfig {
    pub cpu_cycles_per_update: usize,
    /// Points an organism must strictly exceed to reproduce.
    pub reproduction_threshold: f64,
    /// Points deducted from the parent on every birth.
    pub birth_cost: f64,
    pub birth_placement: BirthPlacement,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            cpu_cycles_per_update: 10,
            reproduction_threshold: 20.0,
            birth_cost: 20.0,
            birth_placement: BirthPlacement::ReplaceNeighbor,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct EvolutionConfig {
    /// Per-site probability of replacing an instruction in an offspring.
    pub mutation_rate: f64,
    /// Instructions in a founder's random program.
    pub genome_length: usize,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            mutation_rate: 0.01,
            genome_length: 100,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RewardScheme {
    /// Every task pays, harder gates pay more.
    #[default]
    Graded,
    /// Only COMPLEX pays.
    Reference,
    /// Task list taken verbatim from `tasks.custom`.
    Custom,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct TaskConfig {
    pub reward_scheme: RewardScheme,
    pub custom: Vec<Task>,
}

impl TaskConfig {
    #[must_use]
    pub fn build_suite(&self) -> TaskSuite {
        match self.reward_scheme {
            RewardScheme::Graded => TaskSuite::graded(),
            RewardScheme::Reference => TaskSuite::reference(),
            RewardScheme::Custom => TaskSuite::new(self.custom.clone()),
        }
    }
}

/// Histogram layout for the point monitor.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct BinConfig {
    pub min: f64,
    pub max: f64,
    pub count: usize,
}

impl Default for BinConfig {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 9.1,
            count: 10,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct MetricsConfig {
    /// Updates between run-summary log lines. Zero disables them.
    pub log_interval: u64,
    pub point_bins: BinConfig,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            log_interval: 100,
            point_bins: BinConfig::default(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    /// Prefix prepended to the data file name; usually a directory with a
    /// trailing separator.
    pub file_path: String,
    pub file_name: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            file_path: String::new(),
            file_name: "_data.dat".to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct AppConfig {
    pub world: WorldConfig,
    pub lifecycle: LifecycleConfig,
    pub evolution: EvolutionConfig,
    pub tasks: TaskConfig,
    pub metrics: MetricsConfig,
    pub output: OutputConfig,
}

impl AppConfig {
    /// Validates all configuration parameters.
    ///
    /// Returns `Ok(())` if all parameters are valid, or `Err` describing the
    /// first failure.
    pub fn validate(&self) -> anyhow::Result<()> {
        // World validation
        anyhow::ensure!(self.world.width > 0, "World width must be positive");
        anyhow::ensure!(self.world.width <= 1000, "World width too large (max 1000)");
        anyhow::ensure!(self.world.height > 0, "World height must be positive");
        anyhow::ensure!(
            self.world.height <= 1000,
            "World height too large (max 1000)"
        );
        anyhow::ensure!(
            self.world.initial_population <= self.world.width * self.world.height,
            "Initial population {} exceeds grid capacity {}",
            self.world.initial_population,
            self.world.width * self.world.height
        );

        // Lifecycle validation
        anyhow::ensure!(
            self.lifecycle.reproduction_threshold.is_finite(),
            "Reproduction threshold must be finite"
        );
        anyhow::ensure!(
            self.lifecycle.birth_cost.is_finite() && self.lifecycle.birth_cost >= 0.0,
            "Birth cost must be finite and non-negative"
        );
        if self.lifecycle.birth_cost > self.lifecycle.reproduction_threshold {
            tracing::warn!(
                birth_cost = self.lifecycle.birth_cost,
                threshold = self.lifecycle.reproduction_threshold,
                "Birth cost exceeds reproduction threshold; parents can go negative"
            );
        }

        // Evolution validation
        anyhow::ensure!(
            (0.0..=1.0).contains(&self.evolution.mutation_rate),
            "Mutation rate must be in [0.0, 1.0]"
        );

        // Task validation
        let suite = self.tasks.build_suite();
        anyhow::ensure!(!suite.is_empty(), "Task suite must not be empty");
        for task in suite.iter() {
            anyhow::ensure!(
                task.reward.is_finite() && task.reward >= 0.0,
                "Reward for {} must be finite and non-negative",
                task.name()
            );
        }

        // Metrics validation
        let bins = &self.metrics.point_bins;
        anyhow::ensure!(bins.count > 0, "Point histogram needs at least one bin");
        anyhow::ensure!(
            bins.min.is_finite() && bins.max.is_finite() && bins.max > bins.min,
            "Point histogram range must be finite with max > min"
        );

        Ok(())
    }

    /// Parses and validates a TOML document.
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config = toml::from_str::<Self>(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    #[must_use]
    pub fn topology(&self) -> Topology {
        Topology::new(self.world.width, self.world.height, self.world.structure)
    }

    /// `{file_path}Org_Vals{seed}{file_name}`
    #[must_use]
    pub fn data_file_path(&self) -> PathBuf {
        PathBuf::from(format!(
            "{}Org_Vals{}{}",
            self.output.file_path, self.world.seed, self.output.file_name
        ))
    }

    /// Hash of the sections that influence simulation outcomes. Output
    /// locations and logging cadence are excluded.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(format!("{:?}", self.world).as_bytes());
        hasher.update(format!("{:?}", self.lifecycle).as_bytes());
        hasher.update(format!("{:?}", self.evolution).as_bytes());
        hasher.update(format!("{:?}", self.tasks.build_suite()).as_bytes());
        hex::encode(hasher.finalize())
    }
}
