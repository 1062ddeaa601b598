//! Tridi CLI - run, watch and soak-test the chess diorama from a terminal.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod cli;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Tridi - an autonomous tri-dimensional chess diorama
#[derive(Parser, Debug)]
#[command(name = "tridi")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the diorama headless for a number of ticks
    Run {
        /// Random seed (default: random)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Number of ticks to run (default: 1000)
        #[arg(short, long, default_value = "1000")]
        ticks: u64,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,

        /// JSON configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Only print the final result
        #[arg(short, long)]
        quiet: bool,
    },

    /// Interactive TUI to watch the diorama in real time
    Watch {
        /// Random seed
        #[arg(short, long)]
        seed: Option<u64>,

        /// Tick period in milliseconds (default: 250)
        #[arg(long, default_value = "250")]
        speed: u64,

        /// JSON configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Run many seeded simulations in parallel and check invariants
    Soak {
        /// Number of simulations (default: 100)
        #[arg(short, long, default_value = "100")]
        games: u64,

        /// Ticks per simulation (default: 2000)
        #[arg(short, long, default_value = "2000")]
        ticks: u64,

        /// Starting seed (increments for each simulation)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Parallel threads (default: CPU count)
        #[arg(short = 'j', long)]
        threads: Option<usize>,

        /// JSON configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Show progress bar
        #[arg(short, long)]
        progress: bool,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let result = match args.command {
        Commands::Run {
            seed,
            ticks,
            format,
            config,
            quiet,
        } => cli::run::execute(seed, ticks, format, config, quiet),

        Commands::Watch { seed, speed, config } => cli::watch::execute(seed, speed, config),

        Commands::Soak {
            games,
            ticks,
            seed,
            threads,
            config,
            progress,
        } => cli::soak::execute(games, ticks, seed, threads, config, progress),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
