// Allow unwrap and float comparisons in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::float_cmp))]
//! Tridi: the core of an animated tri-dimensional chess diorama.
//!
//! Three fixed 4x4 main boards are stacked in space, four movable 2x2
//! attack boards dock at twelve stations around them, and 32 pieces wander
//! the 64 squares on their own. This crate decides where everything is and
//! when it may move; drawing frames is left to a [`choreo::Playback`]
//! implementation.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │   Diorama (tick / reset / tap)      │
//! ├──────────────────┬──────────────────┤
//! │    Scheduler     │   Choreographer  │
//! ├──────────────────┴──────────────────┤
//! │   Board state + move validator      │
//! ├─────────────────────────────────────┤
//! │         Geometry layout             │
//! └─────────────────────────────────────┘
//! ```

pub mod board;
pub mod choreo;
pub mod error;
pub mod geometry;
pub mod render;
pub mod sim;

pub use error::{IndexError, IndexKind, IndexResult};

// Re-export key types at crate root for convenience
pub use board::{AttackBoardId, BoardState, Color, EntityId, MoveOutcome, PieceId, Role, SquareId};
pub use choreo::{Choreography, ClockPlayback, Completion, InFlight, InstantPlayback, Playback};
pub use geometry::{Level, Station, Vec3};
pub use sim::{Diorama, DioramaConfig, TickOutcome};
