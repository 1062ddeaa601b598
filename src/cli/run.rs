//! Run command implementation.

use super::output::{JsonRunResult, format_text};
use super::{CliError, OutputFormat, load_config};
use std::path::PathBuf;
use std::time::Duration;
use tridi::render::render_ascii;
use tridi::{ClockPlayback, Diorama};

/// Execute the run command.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded or the result cannot be
/// serialized.
#[allow(clippy::needless_pass_by_value)]
pub(crate) fn execute(
    seed: Option<u64>,
    ticks: u64,
    format: OutputFormat,
    config: Option<PathBuf>,
    quiet: bool,
) -> Result<(), CliError> {
    let config = load_config(config.as_deref(), seed)?;
    let seed = config.seed.unwrap_or_default();
    let period = Duration::from_millis(config.tick_period_ms);

    if !quiet && format == OutputFormat::Text {
        println!("Running diorama with seed {seed} for {ticks} ticks...");
        println!();
    }

    let mut diorama = Diorama::new(config, ClockPlayback::new());
    for _ in 0..ticks {
        diorama.tick();
        diorama.playback_mut().advance(period);
    }

    let clock_ms = u64::try_from(diorama.playback().clock().as_millis()).unwrap_or(u64::MAX);
    let stats = diorama.stats();

    match format {
        OutputFormat::Text => {
            print!("{}", format_text(seed, clock_ms, &stats));
            if !quiet {
                println!();
                print!("{}", render_ascii(diorama.state(), false));
            }
        }
        OutputFormat::Json => {
            let result = JsonRunResult {
                seed,
                ticks,
                clock_ms,
                stats,
                board: diorama.state().snapshot(),
            };
            let json = serde_json::to_string_pretty(&result)
                .map_err(|e| CliError::new(format!("JSON serialization failed: {e}")))?;
            println!("{json}");
        }
    }

    Ok(())
}
