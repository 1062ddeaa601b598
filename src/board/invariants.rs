//! Board invariants - sanity checks that detect bugs.
//!
//! No sequence of resets, moves and relocations should ever trip these. If
//! one does, the mutation code has a bug.

use crate::board::{AttackBoardId, BoardState, PieceId, SquareId};
use crate::geometry::Station;

/// Tolerance for comparing recomputed positions.
const POSITION_EPS: f32 = 1e-4;

/// Invariant violation error.
#[derive(Debug, Clone)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub message: String,
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invariant violation: {}", self.message)
    }
}

impl std::error::Error for InvariantViolation {}

/// Check all board invariants.
///
/// Returns a list of violations found, or empty if all invariants hold.
#[must_use]
pub fn check_invariants(state: &BoardState) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();

    // Each piece on at most one square
    let mut seen: [Option<SquareId>; PieceId::COUNT] = [None; PieceId::COUNT];
    for square in state.squares() {
        if let Some(piece) = square.occupant {
            if let Some(first) = seen[piece.index()] {
                violations.push(InvariantViolation {
                    message: format!(
                        "Piece {} occupies both {} and {}",
                        piece.index(),
                        first,
                        square.id
                    ),
                });
            } else {
                seen[piece.index()] = Some(square.id);
            }
        }
    }

    // One board per station
    let mut docked: [Option<AttackBoardId>; Station::COUNT] = [None; Station::COUNT];
    for board in AttackBoardId::all() {
        let station = state.station_of(board);
        if let Some(other) = docked[station.index()] {
            violations.push(InvariantViolation {
                message: format!(
                    "Attack boards {} and {} share station {}",
                    other.index(),
                    board.index(),
                    station.index()
                ),
            });
        } else {
            docked[station.index()] = Some(board);
        }
    }

    // Squares sit where the geometry puts them
    for square in state.squares() {
        let expected = state.layout_position(square.id);
        if !square.position.approx_eq(expected, POSITION_EPS) {
            violations.push(InvariantViolation {
                message: format!(
                    "Square {} at {:?}, layout says {:?}",
                    square.id, square.position, expected
                ),
            });
        }
    }

    // Placed pieces stand on their square
    for square in state.squares() {
        if let Some(piece) = square.occupant {
            let position = state.piece(piece).position;
            if !position.approx_eq(square.position, POSITION_EPS) {
                violations.push(InvariantViolation {
                    message: format!(
                        "Piece {} at {:?} but its square {} is at {:?}",
                        piece.index(),
                        position,
                        square.id,
                        square.position
                    ),
                });
            }
        }
    }

    violations
}

/// Assert all board invariants hold, panicking if any are violated.
///
/// Only active in debug builds. No-op in release builds.
///
/// # Panics
///
/// Panics with detailed message if any invariant is violated.
#[cfg(debug_assertions)]
pub fn assert_invariants(state: &BoardState) {
    let violations = check_invariants(state);
    if !violations.is_empty() {
        let messages: Vec<_> = violations.iter().map(|v| v.message.as_str()).collect();
        panic!("Board invariant violations:\n  - {}", messages.join("\n  - "));
    }
}

/// No-op in release builds.
#[cfg(not(debug_assertions))]
pub fn assert_invariants(_state: &BoardState) {}
