//! The running diorama.
//!
//! Ties board state, the choreographer and the random scheduler together
//! behind the four entry points a host application drives: create, reset,
//! tick and tap.

mod config;
mod diorama;
mod scheduler;

pub use config::{ConfigError, DioramaConfig, MAX_DURATION_MS, ROLL_MAX};
pub use diorama::{Diorama, DioramaStats, TickOutcome};
pub use scheduler::{Plan, Scheduler};
