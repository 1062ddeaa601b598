//! CLI command implementations for tridi.

pub(crate) mod run;
pub(crate) mod soak;
pub(crate) mod watch;

mod output;

use clap::ValueEnum;
use std::error::Error;
use std::fmt;
use std::path::Path;
use tridi::sim::{ConfigError, DioramaConfig};

/// Output format for the `run` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// CLI error type.
#[derive(Debug)]
pub(crate) struct CliError {
    message: String,
}

impl CliError {
    /// Create a new CLI error.
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        Self::new(e.to_string())
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        Self::new(e.to_string())
    }
}

/// Load the config file if one was given, then apply the seed override.
///
/// The returned config always carries a seed so runs can be repeated.
pub(crate) fn load_config(path: Option<&Path>, seed: Option<u64>) -> Result<DioramaConfig, CliError> {
    let mut config = match path {
        Some(path) => DioramaConfig::from_json_file(path)?,
        None => DioramaConfig::default(),
    };
    if seed.is_some() {
        config.seed = seed;
    }
    config.seed = Some(config.seed.unwrap_or_else(clock_seed));
    Ok(config)
}

/// Seed derived from the wall clock.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn clock_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(42)
}
