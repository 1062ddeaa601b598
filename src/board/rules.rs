//! Move validation and the mutations that follow it.
//!
//! The only legality rule is same-color blocking. Pieces may jump to any
//! square, and a move onto an opposing piece does not remove it: the square
//! simply changes hands and the displaced piece is left where it stood
//! without a square of its own.

use crate::board::{AttackBoardId, BoardState, PieceId, SquareId};
use crate::geometry::{Station, Vec3};

/// Result of asking the board to change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MoveOutcome<T> {
    /// Nothing to do (same square, or no piece to move).
    NoOp,
    /// The move is not allowed; the board is unchanged.
    Rejected,
    /// The board was updated.
    Applied(T),
}

impl<T> MoveOutcome<T> {
    /// Whether the board was updated.
    #[must_use]
    pub const fn is_applied(&self) -> bool {
        matches!(self, MoveOutcome::Applied(_))
    }

    /// The applied change, if any.
    #[must_use]
    pub fn applied(self) -> Option<T> {
        match self {
            MoveOutcome::Applied(change) => Some(change),
            MoveOutcome::NoOp | MoveOutcome::Rejected => None,
        }
    }
}

/// A piece that changed squares.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PieceMove {
    /// The moving piece.
    pub piece: PieceId,
    /// Square it left.
    pub from: SquareId,
    /// Square it now occupies.
    pub to: SquareId,
    /// World position it left.
    pub from_position: Vec3,
    /// World position it is heading for.
    pub to_position: Vec3,
    /// Opposing piece whose square was taken over, left in place.
    pub displaced: Option<PieceId>,
}

/// One square carried by a relocating attack board.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarriedSquare {
    /// The owned square.
    pub square: SquareId,
    /// Its new world position.
    pub position: Vec3,
    /// Piece riding along on it.
    pub passenger: Option<PieceId>,
}

/// An attack board that changed docking station.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoardRelocation {
    /// The board that moved.
    pub board: AttackBoardId,
    /// Station it left.
    pub from: Station,
    /// Station it now occupies.
    pub to: Station,
    /// Its four squares at their new positions.
    pub carried: [CarriedSquare; 4],
}

impl BoardState {
    /// Move whatever stands on `src` to `dst`.
    ///
    /// Returns `NoOp` when `src == dst` or `src` is empty, `Rejected` when
    /// `dst` holds a piece of the mover's color, otherwise applies the
    /// occupancy change and returns the move.
    pub fn try_move(&mut self, src: SquareId, dst: SquareId) -> MoveOutcome<PieceMove> {
        if src == dst {
            return MoveOutcome::NoOp;
        }
        let Some(piece) = self.occupant(src) else {
            return MoveOutcome::NoOp;
        };

        let displaced = self.occupant(dst);
        if let Some(other) = displaced
            && self.is_white(other) == self.is_white(piece)
        {
            return MoveOutcome::Rejected;
        }

        let from_position = self.square(src).position;
        let to_position = self.square(dst).position;

        self.set_occupant(dst, Some(piece));
        self.set_occupant(src, None);
        self.set_piece_position(piece, to_position);

        MoveOutcome::Applied(PieceMove {
            piece,
            from: src,
            to: dst,
            from_position,
            to_position,
            displaced,
        })
    }

    /// Dock `board` at `station`, carrying its squares and their pieces.
    ///
    /// Returns `Rejected` when any board, including `board` itself, is
    /// already docked there.
    pub fn try_relocate_board(
        &mut self,
        board: AttackBoardId,
        station: Station,
    ) -> MoveOutcome<BoardRelocation> {
        if !self.is_station_free(station) {
            return MoveOutcome::Rejected;
        }

        let from = self.station_of(board);
        self.set_station(board, station);

        let squares = board.squares();
        let mut carried = [CarriedSquare {
            square: squares[0],
            position: Vec3::ZERO,
            passenger: None,
        }; 4];

        for (slot, square) in carried.iter_mut().zip(squares) {
            let position = self.layout_position(square);
            let passenger = self.occupant(square);
            self.set_square_position(square, position);
            if let Some(piece) = passenger {
                self.set_piece_position(piece, position);
            }
            *slot = CarriedSquare {
                square,
                position,
                passenger,
            };
        }

        MoveOutcome::Applied(BoardRelocation {
            board,
            from,
            to: station,
            carried,
        })
    }
}
