//! Simulation configuration.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::choreo::PathParams;

/// Upper bound (inclusive) of the roll that picks between a board
/// relocation and a piece move.
pub const ROLL_MAX: u32 = 10;

/// Longest tick period or animation leg a config may ask for, in milliseconds.
pub const MAX_DURATION_MS: u64 = 60_000;

/// Tunables for a running diorama.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DioramaConfig {
    /// Seed for the move picker. `None` draws one from the OS.
    pub seed: Option<u64>,
    /// Period between ticks, in milliseconds.
    pub tick_period_ms: u64,
    /// A tick relocates a board when a roll in `0..=10` lands below this.
    pub board_move_odds: u32,
    /// Sampling attempts before a tick gives up.
    pub max_attempts: u32,
    /// Animate piece moves along their full path instead of jumping.
    pub animate: bool,
    /// Path distances and timings.
    pub path: PathParams,
}

impl Default for DioramaConfig {
    fn default() -> Self {
        Self {
            seed: None,
            tick_period_ms: 10,
            board_move_odds: 2,
            max_attempts: 1024,
            animate: true,
            path: PathParams::default(),
        }
    }
}

impl DioramaConfig {
    /// Parse a configuration from JSON text and validate it.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid JSON for this type or a
    /// value is out of range.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(format!("{}: {e}", path.display())))?;
        Self::from_json(&text)
    }

    /// Check that every value is usable.
    ///
    /// # Errors
    ///
    /// Returns the first out-of-range value found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board_move_odds > ROLL_MAX + 1 {
            return Err(ConfigError::Invalid(format!(
                "board_move_odds {} exceeds {}",
                self.board_move_odds,
                ROLL_MAX + 1
            )));
        }
        if self.max_attempts == 0 {
            return Err(ConfigError::Invalid("max_attempts must be at least 1".to_string()));
        }
        if self.tick_period_ms == 0 {
            return Err(ConfigError::Invalid("tick_period_ms must be at least 1".to_string()));
        }
        let durations = [
            ("tick_period_ms", self.tick_period_ms),
            ("path.lift_ms", self.path.lift_ms),
            ("path.base_speed_ms", self.path.base_speed_ms),
            ("path.board_slide_ms", self.path.board_slide_ms),
        ];
        if let Some((name, ms)) = durations.iter().find(|(_, ms)| *ms > MAX_DURATION_MS) {
            return Err(ConfigError::Invalid(format!("{name} {ms} exceeds {MAX_DURATION_MS}")));
        }
        if !self.path.lift_height.is_finite() || !self.path.clear_depth.is_finite() {
            return Err(ConfigError::Invalid("path distances must be finite".to_string()));
        }
        Ok(())
    }
}

/// Error loading a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The file could not be read.
    Io(String),
    /// The text is not a valid configuration.
    Parse(String),
    /// A value is out of range.
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "Failed to read config: {e}"),
            Self::Parse(e) => write!(f, "Failed to parse config: {e}"),
            Self::Invalid(e) => write!(f, "Invalid config: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}
