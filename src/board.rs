//! Board layer for tridi.
//!
//! Implements the logical model of the diorama:
//! - 64 squares on three main boards and four attack boards
//! - 32 pieces split into two colors
//! - Docking of the attack boards at the twelve stations
//! - The move validator and the mutations it applies
//! - Invariant checks over all of the above

mod attack;
mod invariants;
mod piece;
mod rules;
mod square;
mod state;

pub use attack::AttackBoardId;
pub use invariants::{assert_invariants, check_invariants, InvariantViolation};
pub use piece::{Color, Piece, PieceId, Role};
pub use rules::{BoardRelocation, CarriedSquare, MoveOutcome, PieceMove};
pub use square::{Square, SquareId, ATTACK_BOARD_SQUARES, MAIN_BOARD_SQUARES, MAIN_SQUARES};
pub use state::{BoardState, EntityId, Snapshot, SquareSnapshot};
