//! Configuration file loading for the CLI
//!
//! This module handles finding and loading TOML configuration files
//! from various locations (explicit path, local directory, system directory).
//! A file may carry a `[layout]` table (see [`LayoutConfig`]) and a
//! `[generator]` table describing the demo graph:
//!
//! ```toml
//! [layout]
//! drive_mode = "batch"
//! max_iterations = 200
//!
//! [generator]
//! node_count = 30
//! connection_probability = 0.1
//! ```

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use serde::Deserialize;
use thiserror::Error;

use settle::{
    SettleError,
    config::{ConfigError, LayoutConfig},
};

/// Configuration file errors for CLI
#[derive(Debug, Error)]
pub enum ConfigFileError {
    #[error("Failed to parse TOML configuration: {0}")]
    Parse(String),

    #[error("Missing configuration file: {0}")]
    MissingFile(PathBuf),
}

impl From<ConfigFileError> for SettleError {
    fn from(err: ConfigFileError) -> Self {
        SettleError::Io(io::Error::other(err.to_string()))
    }
}

/// Settings of the random demo graph.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Number of nodes placed on the initial circle.
    node_count: usize,

    /// Chance that any unordered pair becomes a reciprocal edge.
    connection_probability: f32,

    /// Radius of the initial circle, also handed to the engine.
    world_radius: f32,

    seed: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            node_count: 20,
            connection_probability: 0.15,
            world_radius: 5.0,
            seed: 0,
        }
    }
}

impl GeneratorConfig {
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    pub fn connection_probability(&self) -> f32 {
        self.connection_probability
    }

    pub fn world_radius(&self) -> f32 {
        self.world_radius
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn set_node_count(&mut self, count: usize) -> &mut Self {
        self.node_count = count;
        self
    }

    pub fn set_connection_probability(&mut self, probability: f32) -> &mut Self {
        self.connection_probability = probability;
        self
    }

    pub fn set_world_radius(&mut self, radius: f32) -> &mut Self {
        self.world_radius = radius;
        self
    }

    pub fn set_seed(&mut self, seed: u64) -> &mut Self {
        self.seed = seed;
        self
    }

    /// Checks that the connection probability is a probability.
    ///
    /// Node count and radius are left to the engine, which rejects an empty
    /// graph or a bad radius on its own.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::OutOfRange`] if the probability is outside
    /// `[0, 1]`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.connection_probability) {
            return Err(ConfigError::OutOfRange {
                field: "connection_probability",
                value: self.connection_probability.to_string(),
                expected: "a value in [0, 1]",
            });
        }
        Ok(())
    }
}

/// Top-level CLI configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    layout: LayoutConfig,

    #[serde(default)]
    generator: GeneratorConfig,
}

impl AppConfig {
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    pub fn layout_mut(&mut self) -> &mut LayoutConfig {
        &mut self.layout
    }

    pub fn generator(&self) -> &GeneratorConfig {
        &self.generator
    }

    pub fn generator_mut(&mut self) -> &mut GeneratorConfig {
        &mut self.generator
    }

    /// Validates both sections.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.layout.validate()?;
        self.generator.validate()
    }
}

/// Find and load configuration from various locations
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Local project directory (settle/config.toml)
/// 3. Platform-specific config directory
/// 4. Default config if none found
///
/// # Errors
///
/// Returns error if:
/// - Explicit path is provided but file doesn't exist
/// - Config file exists but cannot be parsed
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, SettleError> {
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path = path.display().to_string(); "Loading configuration from explicit path");
        return load_config_file(path);
    }

    let local_config = Path::new("settle/config.toml");
    if local_config.exists() {
        info!(path = local_config.display().to_string(); "Loading configuration from local path");
        return load_config_file(local_config);
    }

    if let Some(proj_dirs) = ProjectDirs::from("com", "settle", "settle") {
        let system_config = proj_dirs.config_dir().join("config.toml");

        if system_config.exists() {
            info!(path = system_config.display().to_string(); "Loading configuration from system path");
            return load_config_file(system_config);
        }

        debug!(path = system_config.display().to_string(); "System configuration file not found");
    } else {
        debug!("Could not determine platform-specific config directory");
    }

    debug!("No configuration file found, using default configuration");
    Ok(AppConfig::default())
}

fn load_config_file(path: impl AsRef<Path>) -> Result<AppConfig, SettleError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ConfigFileError::MissingFile(path.to_path_buf()).into());
    }

    let content = fs::read_to_string(path)?;
    let config: AppConfig =
        toml::from_str(&content).map_err(|e| ConfigFileError::Parse(e.to_string()))?;

    Ok(config)
}
