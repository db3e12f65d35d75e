//! Settings file handling and command-line overrides.

use anyhow::Context;
use clap::Args;
use gatelife_core::config::AppConfig;
use std::path::Path;

/// Loads the settings file at `path`, writing the defaults there first if it
/// does not exist.
pub fn load_or_create(path: &Path) -> anyhow::Result<AppConfig> {
    if path.exists() {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading settings from {}", path.display()))?;
        return AppConfig::from_toml(&text)
            .with_context(|| format!("parsing settings in {}", path.display()));
    }
    let config = AppConfig::default();
    std::fs::write(path, config.to_toml()?)
        .with_context(|| format!("writing default settings to {}", path.display()))?;
    tracing::info!(path = %path.display(), "Wrote default settings");
    Ok(config)
}

/// Command-line values that take precedence over the settings file.
#[derive(Args, Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    /// Random seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of updates to run
    #[arg(long)]
    pub updates: Option<u64>,

    /// Founders injected before the first update
    #[arg(long = "num-start")]
    pub num_start: Option<usize>,

    /// Per-site mutation rate for offspring
    #[arg(long = "mutation-rate")]
    pub mutation_rate: Option<f64>,

    /// Prefix for the data file, usually a directory with a trailing slash
    #[arg(long = "file-path")]
    pub file_path: Option<String>,

    /// Suffix for the data file
    #[arg(long = "file-name")]
    pub file_name: Option<String>,
}

impl Overrides {
    /// Applies every set value to `config` and re-validates it.
    pub fn apply(&self, config: &mut AppConfig) -> anyhow::Result<()> {
        if let Some(seed) = self.seed {
            config.world.seed = seed;
        }
        if let Some(updates) = self.updates {
            config.world.updates = updates;
        }
        if let Some(n) = self.num_start {
            config.world.initial_population = n;
        }
        if let Some(rate) = self.mutation_rate {
            config.evolution.mutation_rate = rate;
        }
        if let Some(path) = &self.file_path {
            config.output.file_path = path.clone();
        }
        if let Some(name) = &self.file_name {
            config.output.file_name = name.clone();
        }
        config.validate().context("invalid settings after command-line overrides")
    }
}
