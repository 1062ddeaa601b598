//! Attack board identities.

use serde::{Deserialize, Serialize};

use crate::board::square::{ATTACK_BOARD_SQUARES, MAIN_SQUARES};
use crate::board::SquareId;
use crate::error::{IndexError, IndexKind, IndexResult};
use crate::geometry::Station;

/// One of the four mobile 2x2 platforms.
///
/// Board `n` permanently owns squares `48 + 4n .. 52 + 4n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "usize")]
pub struct AttackBoardId(u8);

impl AttackBoardId {
    /// Number of attack boards.
    pub const COUNT: usize = 4;

    /// Create an attack board id.
    ///
    /// # Panics
    ///
    /// Panics if `index >= 4`.
    #[must_use]
    pub const fn new(index: u8) -> Self {
        assert!((index as usize) < Self::COUNT, "attack board out of range");
        Self(index)
    }

    /// Zero-based index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// First square this board owns.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn base(self) -> SquareId {
        // at most 48 + 4 * 3, well inside u8
        SquareId::new((MAIN_SQUARES + ATTACK_BOARD_SQUARES * self.index()) as u8)
    }

    /// The four squares this board owns, in cell order.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn squares(self) -> [SquareId; 4] {
        let base = self.base().index();
        [
            SquareId::new(base as u8),
            SquareId::new(base as u8 + 1),
            SquareId::new(base as u8 + 2),
            SquareId::new(base as u8 + 3),
        ]
    }

    /// Station this board occupies after a reset.
    #[must_use]
    pub const fn home_station(self) -> Station {
        match self.0 {
            0 => Station::new(0),
            1 => Station::new(1),
            2 => Station::new(10),
            _ => Station::new(11),
        }
    }

    /// All attack boards in index order.
    pub fn all() -> impl Iterator<Item = AttackBoardId> {
        (0..4).map(AttackBoardId)
    }
}

impl TryFrom<usize> for AttackBoardId {
    type Error = IndexError;

    fn try_from(value: usize) -> IndexResult<Self> {
        u8::try_from(value)
            .ok()
            .filter(|&v| usize::from(v) < Self::COUNT)
            .map(AttackBoardId)
            .ok_or(IndexError {
                kind: IndexKind::AttackBoard,
                value,
            })
    }
}
