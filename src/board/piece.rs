//! Piece identities, colors and roles.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{IndexError, IndexKind, IndexResult};
use crate::geometry::Vec3;

/// Side a piece belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    /// Identities `0..16`.
    Black,
    /// Identities `16..32`.
    White,
}

impl Color {
    /// The other side.
    #[must_use]
    pub const fn opposite(self) -> Color {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }
}

/// What a piece is, independent of color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Eight per side.
    Pawn,
    /// Two per side.
    Rook,
    /// Two per side.
    Knight,
    /// Two per side.
    Bishop,
    /// One per side.
    Queen,
    /// One per side.
    King,
}

impl Role {
    /// Single-letter notation (upper case).
    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Role::Pawn => 'P',
            Role::Rook => 'R',
            Role::Knight => 'N',
            Role::Bishop => 'B',
            Role::Queen => 'Q',
            Role::King => 'K',
        }
    }

    /// Role of the piece at offset `slot` (`0..16`) within one side.
    const fn for_slot(slot: u8) -> Role {
        match slot {
            0..=7 => Role::Pawn,
            8..=9 => Role::Rook,
            10..=11 => Role::Knight,
            12..=13 => Role::Bishop,
            14 => Role::Queen,
            _ => Role::King,
        }
    }
}

/// One of the 32 fixed piece identities.
///
/// The lower half of the identity space is Black, the upper half White.
/// Within a side the order is 8 pawns, 2 rooks, 2 knights, 2 bishops,
/// queen, king.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "usize")]
pub struct PieceId(u8);

impl PieceId {
    /// Number of pieces.
    pub const COUNT: usize = 32;

    /// Pieces per side.
    pub const PER_SIDE: u8 = 16;

    /// Create a piece id.
    ///
    /// # Panics
    ///
    /// Panics if `index >= 32`.
    #[must_use]
    pub const fn new(index: u8) -> Self {
        assert!((index as usize) < Self::COUNT, "piece out of range");
        Self(index)
    }

    /// Piece id for `slot` (`0..16`) of `color`.
    ///
    /// # Panics
    ///
    /// Panics if `slot >= 16`.
    #[must_use]
    pub const fn of(color: Color, slot: u8) -> Self {
        assert!(slot < Self::PER_SIDE, "piece slot out of range");
        match color {
            Color::Black => Self(slot),
            Color::White => Self(slot + Self::PER_SIDE),
        }
    }

    /// Zero-based index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Side this identity belongs to.
    #[must_use]
    pub const fn color(self) -> Color {
        if self.0 < Self::PER_SIDE {
            Color::Black
        } else {
            Color::White
        }
    }

    /// Role this identity plays.
    #[must_use]
    pub const fn role(self) -> Role {
        Role::for_slot(self.0 % Self::PER_SIDE)
    }

    /// All identities in index order.
    pub fn all() -> impl Iterator<Item = PieceId> {
        (0..32).map(PieceId)
    }
}

impl TryFrom<usize> for PieceId {
    type Error = IndexError;

    fn try_from(value: usize) -> IndexResult<Self> {
        u8::try_from(value)
            .ok()
            .filter(|&v| usize::from(v) < Self::COUNT)
            .map(PieceId)
            .ok_or(IndexError {
                kind: IndexKind::Piece,
                value,
            })
    }
}

impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = self.role().letter();
        match self.color() {
            Color::White => write!(f, "{letter}"),
            Color::Black => write!(f, "{}", letter.to_ascii_lowercase()),
        }
    }
}

/// Mutable record for one piece.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Piece {
    /// Identity.
    pub id: PieceId,
    /// Side, fixed at construction.
    pub color: Color,
    /// Role, fixed at construction.
    pub role: Role,
    /// Where the piece is (or is heading, while animated).
    pub position: Vec3,
    /// Tap highlight.
    pub highlighted: bool,
}

impl Piece {
    /// Create the record for `id` at the origin.
    #[must_use]
    pub const fn new(id: PieceId) -> Self {
        Self {
            id,
            color: id.color(),
            role: id.role(),
            position: Vec3::ZERO,
            highlighted: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_halves_split_by_color() {
        let black = PieceId::all().filter(|p| p.color() == Color::Black).count();
        let white = PieceId::all().filter(|p| p.color() == Color::White).count();
        assert_eq!(black, 16);
        assert_eq!(white, 16);
        assert_eq!(PieceId::new(15).color(), Color::Black);
        assert_eq!(PieceId::new(16).color(), Color::White);
    }

    #[test]
    fn test_role_counts_per_side() {
        for color in [Color::Black, Color::White] {
            let count = |role| {
                (0..16)
                    .map(|slot| PieceId::of(color, slot))
                    .filter(|p| p.role() == role)
                    .count()
            };
            assert_eq!(count(Role::Pawn), 8);
            assert_eq!(count(Role::Rook), 2);
            assert_eq!(count(Role::Knight), 2);
            assert_eq!(count(Role::Bishop), 2);
            assert_eq!(count(Role::Queen), 1);
            assert_eq!(count(Role::King), 1);
        }
    }

    #[test]
    fn test_piece_record_carries_explicit_color() {
        let piece = Piece::new(PieceId::new(30));
        assert_eq!(piece.color, Color::White);
        assert_eq!(piece.role, Role::Queen);
        assert!(!piece.highlighted);
    }

    #[test]
    fn test_display_uses_case_for_color() {
        assert_eq!(PieceId::new(31).to_string(), "K");
        assert_eq!(PieceId::new(10).to_string(), "n");
        assert_eq!(PieceId::new(0).to_string(), "p");
    }

    #[test]
    fn test_try_from_bounds() {
        assert!(PieceId::try_from(31).is_ok());
        assert_eq!(PieceId::try_from(32).unwrap_err().kind, IndexKind::Piece);
    }

    #[test]
    fn test_opposite_color() {
        assert_eq!(Color::Black.opposite(), Color::White);
        assert_eq!(Color::White.opposite(), Color::Black);
    }
}
