//! # Generation Module
//!
//! Procedural castle generation: corridor carving and item placement.
//!
//! Generation is fully driven by a [`GenerationConfig`] and a seeded
//! [`StdRng`], so the same seed and config always yield the same castle.

pub mod maze;
pub mod placement;

pub use maze::*;
pub use placement::*;

use crate::{config, DarkCastleError, DarkCastleResult, Position};
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for procedural generation.
///
/// Controls the grid size, where carving starts and the probabilities that
/// shape corridors and item placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Random seed for reproducible generation
    pub seed: u64,
    /// Grid height in cells
    pub rows: usize,
    /// Grid width in cells
    pub cols: usize,
    /// Cell all corridors grow from; the grid centre when unset
    pub start: Option<Position>,
    /// Chance per corridor step of spawning a side branch
    pub branch_probability: f64,
    /// How much the branch probability drops for each nested branch
    pub branch_decay: f64,
    /// Shortest corridor segment
    pub min_corridor_length: u32,
    /// Longest corridor segment
    pub max_corridor_length: u32,
    /// Chance per candidate that the placement walk stops there
    pub placement_stop_chance: f64,
}

impl GenerationConfig {
    /// Creates the classic 10×20 castle configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use darkcastle::{GenerationConfig, Position};
    ///
    /// let config = GenerationConfig::new(42);
    /// assert_eq!((config.rows, config.cols), (10, 20));
    /// assert_eq!(config.start_position(), Position::new(5, 10));
    /// assert!(config.validate().is_ok());
    /// ```
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rows: config::DEFAULT_ROWS,
            cols: config::DEFAULT_COLS,
            start: None,
            branch_probability: 0.5,
            branch_decay: 0.1,
            min_corridor_length: 2,
            max_corridor_length: 4,
            placement_stop_chance: 0.1,
        }
    }

    /// Creates a configuration for testing; classic dimensions, explicit seed.
    pub fn for_testing(seed: u64) -> Self {
        Self::new(seed)
    }

    /// Creates a configuration with custom dimensions.
    pub fn with_dimensions(seed: u64, rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            ..Self::new(seed)
        }
    }

    /// Loads a configuration from a JSON file. Missing fields take defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> DarkCastleResult<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// The cell carving starts from.
    pub fn start_position(&self) -> Position {
        self.start
            .unwrap_or_else(|| Position::new((self.rows / 2) as i32, (self.cols / 2) as i32))
    }

    /// Checks that the configuration can produce a playable castle.
    pub fn validate(&self) -> DarkCastleResult<()> {
        if self.rows < config::MIN_DIMENSION || self.cols < config::MIN_DIMENSION {
            return Err(DarkCastleError::InvalidConfig(format!(
                "grid must be at least {0}x{0}, got {1}x{2}",
                config::MIN_DIMENSION,
                self.rows,
                self.cols
            )));
        }
        if self.rows > config::MAX_DIMENSION || self.cols > config::MAX_DIMENSION {
            return Err(DarkCastleError::InvalidConfig(format!(
                "grid dimensions must not exceed {}, got {}x{}",
                config::MAX_DIMENSION,
                self.rows,
                self.cols
            )));
        }

        let start = self.start_position();
        let on_grid = start.row >= 0
            && start.col >= 0
            && (start.row as usize) < self.rows
            && (start.col as usize) < self.cols;
        if !on_grid {
            return Err(DarkCastleError::InvalidConfig(format!(
                "start {} is outside the {}x{} grid",
                start, self.rows, self.cols
            )));
        }
        // The exit corridor runs west from the start and must get somewhere.
        if start.col == 0 {
            return Err(DarkCastleError::InvalidConfig(format!(
                "start {} is on the west edge",
                start
            )));
        }

        for (name, value) in [
            ("branch_probability", self.branch_probability),
            ("branch_decay", self.branch_decay),
            ("placement_stop_chance", self.placement_stop_chance),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(DarkCastleError::InvalidConfig(format!(
                    "{} must be within [0, 1], got {}",
                    name, value
                )));
            }
        }

        if self.min_corridor_length == 0 || self.min_corridor_length > self.max_corridor_length {
            return Err(DarkCastleError::InvalidConfig(format!(
                "corridor length range {}..={} is empty",
                self.min_corridor_length, self.max_corridor_length
            )));
        }

        Ok(())
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::new(42)
    }
}

/// Trait for procedural generators.
pub trait Generator<T> {
    /// Generates content using the provided configuration and random number generator.
    fn generate(&self, config: &GenerationConfig, rng: &mut StdRng) -> DarkCastleResult<T>;

    /// Validates that the generated content meets requirements.
    fn validate(&self, content: &T, config: &GenerationConfig) -> DarkCastleResult<()>;

    /// Gets the generator type name for logging and debugging.
    fn generator_type(&self) -> &'static str;
}

/// Utility functions for generation algorithms.
pub mod utils {
    use super::*;
    use crate::Direction;
    use rand::{Rng, SeedableRng};

    /// Creates a seeded random number generator from the config.
    pub fn create_rng(config: &GenerationConfig) -> StdRng {
        StdRng::seed_from_u64(config.seed)
    }

    /// Picks one of the four directions uniformly.
    pub fn random_direction(rng: &mut StdRng) -> Direction {
        Direction::ALL[rng.gen_range(0..Direction::ALL.len())]
    }
}
