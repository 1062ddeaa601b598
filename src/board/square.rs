//! Square identities and records.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::board::{AttackBoardId, PieceId};
use crate::error::{IndexError, IndexKind, IndexResult};
use crate::geometry::{Level, Vec3};

/// Squares on one main board.
pub const MAIN_BOARD_SQUARES: usize = 16;

/// Squares across the three main boards.
pub const MAIN_SQUARES: usize = 48;

/// Squares on one attack board.
pub const ATTACK_BOARD_SQUARES: usize = 4;

/// One of the 64 fixed squares.
///
/// `0..48` are the main boards, sixteen per level in row-major order.
/// `48..64` are the attack boards, four per board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "usize")]
pub struct SquareId(u8);

impl SquareId {
    /// Number of squares.
    pub const COUNT: usize = 64;

    /// Create a square id.
    ///
    /// # Panics
    ///
    /// Panics if `index >= 64`.
    #[must_use]
    pub const fn new(index: u8) -> Self {
        assert!((index as usize) < Self::COUNT, "square out of range");
        Self(index)
    }

    /// Zero-based index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Whether this square belongs to one of the mobile attack boards.
    #[must_use]
    pub const fn is_attack(self) -> bool {
        self.index() >= MAIN_SQUARES
    }

    /// Main board level, for main board squares.
    #[must_use]
    pub const fn level(self) -> Option<Level> {
        if self.is_attack() {
            None
        } else {
            Some(Level::new(self.0 / 16))
        }
    }

    /// Main board square at `row`, `col` (both `0..4`) on `level`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn on_level(level: Level, row: u8, col: u8) -> Self {
        assert!(row < 4 && col < 4, "main board cell out of range");
        Self::new(level.index() as u8 * 16 + row * 4 + col)
    }

    /// Row and column within a main board, for main board squares.
    #[must_use]
    pub const fn row_col(self) -> Option<(u8, u8)> {
        if self.is_attack() {
            None
        } else {
            let cell = self.0 % 16;
            Some((cell / 4, cell % 4))
        }
    }

    /// Owning attack board and cell (`0..4`), for attack board squares.
    #[must_use]
    pub const fn attack_cell(self) -> Option<(AttackBoardId, usize)> {
        if self.is_attack() {
            let offset = self.0 - 48;
            Some((AttackBoardId::new(offset / 4), (offset % 4) as usize))
        } else {
            None
        }
    }

    /// Cosmetic light/dark parity.
    ///
    /// Main boards alternate in a checkerboard; every attack board uses
    /// the diagonal pattern `0 1 / 1 0`.
    #[must_use]
    pub const fn parity(self) -> u8 {
        if let Some((row, col)) = self.row_col() {
            (row + col) % 2
        } else {
            let cell = (self.0 - 48) % 4;
            if cell == 1 || cell == 2 { 1 } else { 0 }
        }
    }

    /// All squares in index order.
    pub fn all() -> impl Iterator<Item = SquareId> {
        (0..64).map(SquareId)
    }
}

impl TryFrom<usize> for SquareId {
    type Error = IndexError;

    fn try_from(value: usize) -> IndexResult<Self> {
        u8::try_from(value)
            .ok()
            .filter(|&v| usize::from(v) < Self::COUNT)
            .map(SquareId)
            .ok_or(IndexError {
                kind: IndexKind::Square,
                value,
            })
    }
}

impl fmt::Display for SquareId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Mutable record for one square.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Square {
    /// Identity.
    pub id: SquareId,
    /// Piece standing on this square.
    pub occupant: Option<PieceId>,
    /// World position; changes only for attack board squares.
    pub position: Vec3,
    /// Tap highlight.
    pub highlighted: bool,
}

impl Square {
    /// Create an empty square at the origin.
    #[must_use]
    pub const fn new(id: SquareId) -> Self {
        Self {
            id,
            occupant: None,
            position: Vec3::ZERO,
            highlighted: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_main_square_decomposition() {
        let sq = SquareId::new(22);
        assert_eq!(sq.level(), Some(Level::new(1)));
        assert_eq!(sq.row_col(), Some((1, 2)));
        assert!(!sq.is_attack());
        assert!(sq.attack_cell().is_none());
        assert_eq!(SquareId::on_level(Level::new(1), 1, 2), sq);
    }

    #[test]
    fn test_attack_square_decomposition() {
        let sq = SquareId::new(57);
        assert!(sq.is_attack());
        assert!(sq.level().is_none());
        assert_eq!(sq.attack_cell(), Some((AttackBoardId::new(2), 1)));
    }

    #[test]
    fn test_parity_patterns() {
        let main: Vec<u8> = (0..8).map(|i| SquareId::new(i).parity()).collect();
        assert_eq!(main, vec![0, 1, 0, 1, 1, 0, 1, 0]);

        let attack: Vec<u8> = (48..56).map(|i| SquareId::new(i).parity()).collect();
        assert_eq!(attack, vec![0, 1, 1, 0, 0, 1, 1, 0]);
    }

    #[test]
    fn test_try_from_bounds() {
        assert!(SquareId::try_from(63).is_ok());
        assert_eq!(SquareId::try_from(64).unwrap_err().kind, IndexKind::Square);
    }
}
