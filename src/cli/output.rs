//! Output formatting utilities for CLI.

use serde::Serialize;
use std::fmt::Write;
use tridi::board::Snapshot;
use tridi::sim::DioramaStats;

/// JSON-serializable result of a headless run.
#[derive(Debug, Serialize)]
pub(super) struct JsonRunResult {
    /// Random seed used.
    pub(super) seed: u64,
    /// Ticks requested.
    pub(super) ticks: u64,
    /// Simulated time, in milliseconds.
    pub(super) clock_ms: u64,
    /// Counters at the end of the run.
    pub(super) stats: DioramaStats,
    /// Final board.
    pub(super) board: Snapshot,
}

/// Format run counters as human-readable text.
pub(super) fn format_text(seed: u64, clock_ms: u64, stats: &DioramaStats) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "Run Result (seed: {seed})");
    let _ = writeln!(output, "  Ticks: {} ({clock_ms} ms simulated)", stats.ticks);
    let _ = writeln!(
        output,
        "  Piece moves: {} ({} onto an opposing piece)",
        stats.piece_moves, stats.displacements
    );
    let _ = writeln!(output, "  Board relocations: {}", stats.relocations);
    let _ = writeln!(output, "  Busy ticks: {}", stats.busy_ticks);
    let _ = writeln!(output, "  Starved ticks: {}", stats.starved_ticks);

    output
}

/// Totals across a soak run.
#[derive(Debug, Clone, Default)]
pub(super) struct SoakStats {
    /// Simulations finished.
    pub(super) games: u64,
    /// Ticks across all simulations.
    pub(super) ticks: u64,
    /// Piece moves across all simulations.
    pub(super) piece_moves: u64,
    /// Board relocations across all simulations.
    pub(super) relocations: u64,
    /// Starved ticks across all simulations.
    pub(super) starved_ticks: u64,
    /// Busy ticks across all simulations.
    pub(super) busy_ticks: u64,
    /// `(seed, tick, message)` for every invariant violation seen.
    pub(super) violations: Vec<(u64, u64, String)>,
}

impl SoakStats {
    /// Fold one simulation's counters in.
    pub(super) fn add(&mut self, stats: &DioramaStats) {
        self.games += 1;
        self.ticks += stats.ticks;
        self.piece_moves += stats.piece_moves;
        self.relocations += stats.relocations;
        self.starved_ticks += stats.starved_ticks;
        self.busy_ticks += stats.busy_ticks;
    }

    /// Merge another partial total.
    pub(super) fn merge(&mut self, other: Self) {
        self.games += other.games;
        self.ticks += other.ticks;
        self.piece_moves += other.piece_moves;
        self.relocations += other.relocations;
        self.starved_ticks += other.starved_ticks;
        self.busy_ticks += other.busy_ticks;
        self.violations.extend(other.violations);
    }
}

/// Format soak totals as human-readable text.
pub(super) fn format_soak_text(stats: &SoakStats) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "Soak Result ({} simulations, {} ticks)", stats.games, stats.ticks);
    let _ = writeln!(output, "  Piece moves: {}", stats.piece_moves);
    let _ = writeln!(output, "  Board relocations: {}", stats.relocations);
    let _ = writeln!(output, "  Busy ticks: {}", stats.busy_ticks);
    let _ = writeln!(output, "  Starved ticks: {}", stats.starved_ticks);
    let _ = writeln!(output, "  Invariant violations: {}", stats.violations.len());

    for (seed, tick, message) in stats.violations.iter().take(10) {
        let _ = writeln!(output, "    seed {seed} tick {tick}: {message}");
    }

    output
}
