//! Configuration types for the layout engine.
//!
//! All tunables of the Fruchterman–Reingold simulation live in
//! [`LayoutConfig`]. The type implements [`serde::Deserialize`] so it can be
//! loaded from a `[layout]` table of a TOML file; every field is optional and
//! falls back to the defaults listed below.
//!
//! | field                   | default    |
//! |-------------------------|------------|
//! | `attraction_strength`   | `1.0`      |
//! | `repulsion_strength`    | `10.0`     |
//! | `repulsion_cutoff`      | `3.0`      |
//! | `damping`               | `0.85`     |
//! | `base_optimal_distance` | `3.0`      |
//! | `auto_scale`            | `true`     |
//! | `max_iterations`        | `300`      |
//! | `convergence_threshold` | `0.01`     |
//! | `time_step`             | `0.01`     |
//! | `max_displacement`      | `1.0`      |
//! | `jitter_distance`       | `0.1`      |
//! | `jitter_seed`           | `0`        |
//! | `drive_mode`            | `animated` |
//! | `iterations_per_tick`   | `5`        |
//!
//! # Example
//!
//! ```
//! # use settle::config::{DriveMode, LayoutConfig};
//! let mut config = LayoutConfig::default();
//! config
//!     .set_max_iterations(150)
//!     .set_drive_mode(DriveMode::Batch);
//! assert!(config.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Invalid configuration value
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("invalid `{field}` = {value}: expected {expected}")]
    OutOfRange {
        field: &'static str,
        value: String,
        expected: &'static str,
    },
}

impl ConfigError {
    fn out_of_range(field: &'static str, value: impl ToString, expected: &'static str) -> Self {
        Self::OutOfRange {
            field,
            value: value.to_string(),
            expected,
        }
    }
}

/// How a run is advanced and when positions are published.
///
/// The mode only changes when results become observable. Both modes perform
/// the same iterations in the same order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriveMode {
    /// A few iterations per external tick, publishing after every tick.
    #[default]
    Animated,
    /// Iterate back to back until complete, publishing once.
    Batch,
}

/// Tunables of the force simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Scale of the pull between connected nodes.
    attraction_strength: f32,

    /// Scale of the push between every pair of nodes.
    repulsion_strength: f32,

    /// Pairs farther apart than `repulsion_cutoff * k` do not repel.
    repulsion_cutoff: f32,

    /// Velocity multiplier applied after every integration, in `(0, 1)`.
    damping: f32,

    /// Target spacing, before auto-scaling by area per node.
    base_optimal_distance: f32,

    /// Derive `k` from the world area and node count.
    auto_scale: bool,

    max_iterations: usize,

    /// The run converges once the fastest node is slower than this.
    convergence_threshold: f32,

    /// Fraction of velocity applied to position per iteration.
    time_step: f32,

    /// Farthest a node may move in one iteration, as a multiple of `k`.
    max_displacement: f32,

    /// Length of the synthetic displacement used for coincident nodes.
    jitter_distance: f32,

    /// Seed of the jitter generator. Equal seeds give equal layouts.
    jitter_seed: u64,

    drive_mode: DriveMode,

    /// Iterations per tick in [`DriveMode::Animated`].
    iterations_per_tick: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            attraction_strength: 1.0,
            repulsion_strength: 10.0,
            repulsion_cutoff: 3.0,
            damping: 0.85,
            base_optimal_distance: 3.0,
            auto_scale: true,
            max_iterations: 300,
            convergence_threshold: 0.01,
            time_step: 0.01,
            max_displacement: 1.0,
            jitter_distance: 0.1,
            jitter_seed: 0,
            drive_mode: DriveMode::Animated,
            iterations_per_tick: 5,
        }
    }
}

impl LayoutConfig {
    /// Checks every value against its allowed range.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::OutOfRange`] for the first field found outside
    /// its range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("attraction_strength", self.attraction_strength),
            ("repulsion_strength", self.repulsion_strength),
            ("repulsion_cutoff", self.repulsion_cutoff),
            ("base_optimal_distance", self.base_optimal_distance),
            ("convergence_threshold", self.convergence_threshold),
            ("time_step", self.time_step),
            ("max_displacement", self.max_displacement),
            ("jitter_distance", self.jitter_distance),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::out_of_range(
                    field,
                    value,
                    "a positive finite number",
                ));
            }
        }

        if !(self.damping > 0.0 && self.damping < 1.0) {
            return Err(ConfigError::out_of_range(
                "damping",
                self.damping,
                "a number strictly between 0 and 1",
            ));
        }
        if self.max_iterations == 0 {
            return Err(ConfigError::out_of_range(
                "max_iterations",
                self.max_iterations,
                "at least 1",
            ));
        }
        if self.iterations_per_tick == 0 {
            return Err(ConfigError::out_of_range(
                "iterations_per_tick",
                self.iterations_per_tick,
                "at least 1",
            ));
        }

        Ok(())
    }

    /// Returns the attraction strength
    pub fn attraction_strength(&self) -> f32 {
        self.attraction_strength
    }

    /// Returns the repulsion strength
    pub fn repulsion_strength(&self) -> f32 {
        self.repulsion_strength
    }

    /// Returns the repulsion cutoff as a multiple of `k`
    pub fn repulsion_cutoff(&self) -> f32 {
        self.repulsion_cutoff
    }

    /// Returns the damping factor
    pub fn damping(&self) -> f32 {
        self.damping
    }

    /// Returns the base optimal distance
    pub fn base_optimal_distance(&self) -> f32 {
        self.base_optimal_distance
    }

    /// Returns whether `k` is scaled by area per node
    pub fn auto_scale(&self) -> bool {
        self.auto_scale
    }

    /// Returns the iteration cap
    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    /// Returns the convergence threshold
    pub fn convergence_threshold(&self) -> f32 {
        self.convergence_threshold
    }

    /// Returns the integration time step
    pub fn time_step(&self) -> f32 {
        self.time_step
    }

    /// Returns the per-iteration displacement cap as a multiple of `k`
    pub fn max_displacement(&self) -> f32 {
        self.max_displacement
    }

    /// Returns the jitter displacement length
    pub fn jitter_distance(&self) -> f32 {
        self.jitter_distance
    }

    /// Returns the jitter seed
    pub fn jitter_seed(&self) -> u64 {
        self.jitter_seed
    }

    /// Returns the drive mode
    pub fn drive_mode(&self) -> DriveMode {
        self.drive_mode
    }

    /// Returns the iterations performed per animated tick
    pub fn iterations_per_tick(&self) -> usize {
        self.iterations_per_tick
    }

    /// Set the attraction strength
    pub fn set_attraction_strength(&mut self, strength: f32) -> &mut Self {
        self.attraction_strength = strength;
        self
    }

    /// Set the repulsion strength
    pub fn set_repulsion_strength(&mut self, strength: f32) -> &mut Self {
        self.repulsion_strength = strength;
        self
    }

    /// Set the repulsion cutoff multiplier
    pub fn set_repulsion_cutoff(&mut self, cutoff: f32) -> &mut Self {
        self.repulsion_cutoff = cutoff;
        self
    }

    /// Set the damping factor
    pub fn set_damping(&mut self, damping: f32) -> &mut Self {
        self.damping = damping;
        self
    }

    /// Set the base optimal distance
    pub fn set_base_optimal_distance(&mut self, distance: f32) -> &mut Self {
        self.base_optimal_distance = distance;
        self
    }

    /// Enable or disable auto-scaling of `k`
    pub fn set_auto_scale(&mut self, auto_scale: bool) -> &mut Self {
        self.auto_scale = auto_scale;
        self
    }

    /// Set the iteration cap
    pub fn set_max_iterations(&mut self, iterations: usize) -> &mut Self {
        self.max_iterations = iterations;
        self
    }

    /// Set the convergence threshold
    pub fn set_convergence_threshold(&mut self, threshold: f32) -> &mut Self {
        self.convergence_threshold = threshold;
        self
    }

    /// Set the integration time step
    pub fn set_time_step(&mut self, time_step: f32) -> &mut Self {
        self.time_step = time_step;
        self
    }

    /// Set the per-iteration displacement cap as a multiple of `k`
    pub fn set_max_displacement(&mut self, factor: f32) -> &mut Self {
        self.max_displacement = factor;
        self
    }

    /// Set the jitter displacement length
    pub fn set_jitter_distance(&mut self, distance: f32) -> &mut Self {
        self.jitter_distance = distance;
        self
    }

    /// Set the jitter seed
    pub fn set_jitter_seed(&mut self, seed: u64) -> &mut Self {
        self.jitter_seed = seed;
        self
    }

    /// Set the drive mode
    pub fn set_drive_mode(&mut self, mode: DriveMode) -> &mut Self {
        self.drive_mode = mode;
        self
    }

    /// Set the iterations performed per animated tick
    pub fn set_iterations_per_tick(&mut self, iterations: usize) -> &mut Self {
        self.iterations_per_tick = iterations;
        self
    }
}
