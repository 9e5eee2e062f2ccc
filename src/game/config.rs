use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A selectable simulation rate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeedLevel {
    /// Name shown in the header
    pub label: String,
    /// Discrete ticks per second of simulated time
    pub steps_per_second: f64,
}

impl SpeedLevel {
    pub fn new(label: impl Into<String>, steps_per_second: f64) -> Self {
        Self {
            label: label.into(),
            steps_per_second,
        }
    }

    /// Length of one step in milliseconds
    pub fn step_ms(&self) -> f64 {
        1000.0 / self.steps_per_second
    }
}

/// Configuration for the game
///
/// Every field has a default, so a config file only needs to list the
/// values it changes.
///
/// # Example
///
/// ```rust
/// use grid_snake::game::GameConfig;
///
/// let config = GameConfig {
///     food_margin: 1,
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Side of one square tile in pixels
    pub tile_size: u32,
    /// Smallest playable width in tiles, whatever the viewport
    pub min_cols: u32,
    /// Smallest playable height in tiles, whatever the viewport
    pub min_rows: u32,
    /// Minimum tile distance between food and the grid border
    ///
    /// Clamped down on grids too small to honor it.
    pub food_margin: u32,
    /// Step rates the player can pick from
    pub speeds: Vec<SpeedLevel>,
    /// Index into `speeds` used at boot
    pub default_speed: usize,
    /// Seed for food placement; `None` seeds from the OS
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            tile_size: 20,
            min_cols: 10,
            min_rows: 8,
            food_margin: 3,
            speeds: vec![
                SpeedLevel::new("Slow", 8.0),
                SpeedLevel::new("Normal", 12.0),
                SpeedLevel::new("Fast", 16.0),
                SpeedLevel::new("Insane", 20.0),
            ],
            default_speed: 1,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create a configuration with a custom tile size
    pub fn new(tile_size: u32) -> Self {
        Self {
            tile_size,
            ..Default::default()
        }
    }

    /// Load a configuration from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        let config: GameConfig =
            serde_json::from_str(&json).context("Failed to parse config file")?;
        config
            .validate()
            .map_err(|msg| anyhow::anyhow!("Invalid config {:?}: {}", path, msg))?;
        Ok(config)
    }

    /// Check that all values are usable
    ///
    /// # Returns
    ///
    /// `Ok(())` if the configuration is valid, `Err(String)` describing the
    /// first problem otherwise.
    pub fn validate(&self) -> Result<(), String> {
        if self.tile_size == 0 {
            return Err("tile_size must be at least 1".to_string());
        }

        if self.min_cols == 0 || self.min_rows == 0 {
            return Err(format!(
                "minimum grid must be at least 1x1 tiles, got {}x{}",
                self.min_cols, self.min_rows
            ));
        }

        if u64::from(self.min_cols) * u64::from(self.min_rows) < 2 {
            return Err("minimum grid must hold at least 2 tiles".to_string());
        }

        if self.speeds.is_empty() {
            return Err("at least one speed level is required".to_string());
        }

        if let Some(level) = self
            .speeds
            .iter()
            .find(|level| level.steps_per_second <= 0.0 || !level.steps_per_second.is_finite())
        {
            return Err(format!(
                "speed '{}' must have a positive rate, got {}",
                level.label, level.steps_per_second
            ));
        }

        if self.default_speed >= self.speeds.len() {
            return Err(format!(
                "default_speed ({}) out of range for {} speed levels",
                self.default_speed,
                self.speeds.len()
            ));
        }

        Ok(())
    }
}
