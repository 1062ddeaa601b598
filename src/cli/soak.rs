//! Soak command implementation - many seeded simulations in parallel.

use super::output::{SoakStats, format_soak_text};
use super::{CliError, load_config};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tridi::board::check_invariants;
use tridi::sim::DioramaConfig;
use tridi::{ClockPlayback, Diorama};

/// Execute the soak command.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded or any simulation broke
/// a board invariant.
#[allow(clippy::needless_pass_by_value, clippy::cast_precision_loss)]
pub(crate) fn execute(
    games: u64,
    ticks: u64,
    seed: Option<u64>,
    threads: Option<usize>,
    config: Option<PathBuf>,
    progress: bool,
) -> Result<(), CliError> {
    let config = load_config(config.as_deref(), seed)?;
    let base_seed = config.seed.unwrap_or_default();

    // Set thread pool size if specified
    if let Some(num_threads) = threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
            .ok(); // Ignore error if already initialized
    }

    let pb = if progress {
        let pb = ProgressBar::new(games);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} runs ({per_sec})")
                .map_err(|e| CliError::new(e.to_string()))?
                .progress_chars("=>-"),
        );
        Some(pb)
    } else {
        None
    };

    let start = Instant::now();

    // Each thread folds into its own totals, merged at the end
    let stats = (0..games)
        .into_par_iter()
        .fold(SoakStats::default, |mut local, i| {
            let game_config = DioramaConfig {
                seed: Some(base_seed.wrapping_add(i)),
                ..config
            };
            soak_one(&game_config, ticks, &mut local);
            if let Some(pb) = &pb {
                pb.inc(1);
            }
            local
        })
        .reduce(SoakStats::default, |mut a, b| {
            a.merge(b);
            a
        });

    if let Some(pb) = pb {
        pb.finish_with_message("done");
    }

    let duration = start.elapsed();
    let runs_per_sec = if duration.as_secs_f64() > 0.0 {
        stats.games as f64 / duration.as_secs_f64()
    } else {
        0.0
    };

    println!();
    print!("{}", format_soak_text(&stats));
    println!();
    println!("Duration: {:.2}s ({runs_per_sec:.0} runs/sec)", duration.as_secs_f64());

    if stats.violations.is_empty() {
        Ok(())
    } else {
        Err(CliError::new(format!(
            "{} invariant violations (first at seed {})",
            stats.violations.len(),
            stats.violations[0].0
        )))
    }
}

/// Run one simulation, checking invariants after every tick.
fn soak_one(config: &DioramaConfig, ticks: u64, totals: &mut SoakStats) {
    let seed = config.seed.unwrap_or_default();
    let period = Duration::from_millis(config.tick_period_ms);
    let mut diorama = Diorama::new(*config, ClockPlayback::new());

    for tick in 0..ticks {
        diorama.tick();
        diorama.playback_mut().advance(period);

        let violations = check_invariants(diorama.state());
        if !violations.is_empty() {
            totals
                .violations
                .extend(violations.into_iter().map(|v| (seed, tick, v.message)));
            break;
        }
    }

    totals.add(&diorama.stats());
}
