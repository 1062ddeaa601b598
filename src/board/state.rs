//! Authoritative board state.

use serde::Serialize;

use crate::board::{AttackBoardId, Color, Piece, PieceId, Square, SquareId};
use crate::geometry::{self, Station, Vec3};

/// Anything on the board that can be tapped, rendered or animated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EntityId {
    /// A square (main or attack board).
    Square(SquareId),
    /// A piece.
    Piece(PieceId),
}

const E: Option<PieceId> = None;

const fn w(slot: u8) -> Option<PieceId> {
    Some(PieceId::of(Color::White, slot))
}

const fn b(slot: u8) -> Option<PieceId> {
    Some(PieceId::of(Color::Black, slot))
}

/// Occupant of every square after a reset.
///
/// Slots within a side: pawns 0-7, rooks 8-9, knights 10-11,
/// bishops 12-13, queen 14, king 15.
#[rustfmt::skip]
const STARTING_LAYOUT: [Option<PieceId>; SquareId::COUNT] = [
    w(10), w(12), w(13), w(11), // level 0
    w(0), w(1), w(2), w(3),
    E, E, E, E,
    E, E, E, E,
    E, E, E, E, // level 1
    E, E, E, E,
    E, E, E, E,
    E, E, E, E,
    E, E, E, E, // level 2
    E, E, E, E,
    b(0), b(1), b(2), b(3),
    b(10), b(12), b(13), b(11),
    w(14), w(8), w(4), w(5), // attack boards 0 and 1
    w(9), w(15), w(6), w(7),
    b(4), b(5), b(14), b(8), // attack boards 2 and 3
    b(6), b(7), b(9), b(15),
];

/// The 64 squares, 32 pieces and the docking of the 4 attack boards.
///
/// A piece's square is derived by scanning square occupants; there is no
/// reverse index to keep in sync.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardState {
    squares: [Square; SquareId::COUNT],
    pieces: [Piece; PieceId::COUNT],
    stations: [Station; AttackBoardId::COUNT],
}

impl Default for BoardState {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardState {
    /// Create a board in the canonical starting arrangement.
    #[must_use]
    pub fn new() -> Self {
        let mut squares = [Square::new(SquareId::new(0)); SquareId::COUNT];
        for id in SquareId::all() {
            squares[id.index()] = Square::new(id);
        }

        let mut pieces = [Piece::new(PieceId::new(0)); PieceId::COUNT];
        for id in PieceId::all() {
            pieces[id.index()] = Piece::new(id);
        }

        let mut stations = [Station::new(0); AttackBoardId::COUNT];
        for board in AttackBoardId::all() {
            stations[board.index()] = board.home_station();
        }

        let mut state = Self {
            squares,
            pieces,
            stations,
        };
        state.reset();
        state
    }

    /// Restore the canonical starting arrangement.
    ///
    /// Every square and piece position is recomputed from the geometry and
    /// all highlights are cleared.
    pub fn reset(&mut self) {
        for board in AttackBoardId::all() {
            self.stations[board.index()] = board.home_station();
        }

        for id in SquareId::all() {
            let position = self.layout_position(id);
            let square = &mut self.squares[id.index()];
            square.occupant = STARTING_LAYOUT[id.index()];
            square.position = position;
            square.highlighted = false;
        }

        for piece in &mut self.pieces {
            piece.highlighted = false;
        }
        for square in &self.squares {
            if let Some(occupant) = square.occupant {
                self.pieces[occupant.index()].position = square.position;
            }
        }
    }

    /// Where `square` belongs according to the geometry and the current docking.
    #[must_use]
    pub fn layout_position(&self, square: SquareId) -> Vec3 {
        match (square.level(), square.row_col(), square.attack_cell()) {
            (Some(level), Some((row, col)), _) => geometry::main_square_position(level, row, col),
            (_, _, Some((board, cell))) => {
                geometry::attack_square_position(self.station_of(board), cell)
            }
            _ => unreachable!("square is either on a main board or an attack board"),
        }
    }

    /// Record for a square.
    #[must_use]
    pub fn square(&self, id: SquareId) -> &Square {
        &self.squares[id.index()]
    }

    /// Record for a piece.
    #[must_use]
    pub fn piece(&self, id: PieceId) -> &Piece {
        &self.pieces[id.index()]
    }

    /// All square records in index order.
    #[must_use]
    pub fn squares(&self) -> &[Square] {
        &self.squares
    }

    /// All piece records in index order.
    #[must_use]
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    /// Piece standing on `square`, if any.
    #[must_use]
    pub fn occupant(&self, square: SquareId) -> Option<PieceId> {
        self.squares[square.index()].occupant
    }

    /// Square `piece` stands on.
    ///
    /// `None` for a piece whose square was overwritten by an opposing move.
    #[must_use]
    pub fn location(&self, piece: PieceId) -> Option<SquareId> {
        self.squares
            .iter()
            .find(|sq| sq.occupant == Some(piece))
            .map(|sq| sq.id)
    }

    /// Raw occupancy write. Callers keep the one-square-per-piece invariant.
    pub(crate) fn set_occupant(&mut self, square: SquareId, piece: Option<PieceId>) {
        self.squares[square.index()].occupant = piece;
    }

    pub(crate) fn set_square_position(&mut self, square: SquareId, position: Vec3) {
        self.squares[square.index()].position = position;
    }

    pub(crate) fn set_piece_position(&mut self, piece: PieceId, position: Vec3) {
        self.pieces[piece.index()].position = position;
    }

    /// Side of `piece`.
    #[must_use]
    pub fn color(&self, piece: PieceId) -> Color {
        self.pieces[piece.index()].color
    }

    /// Whether `piece` is White.
    ///
    /// Black holds identities `0..16` and White `16..32`, so this is false
    /// for the lower half. Only equality of the result matters to the move
    /// rules, which makes either naming of the halves equivalent.
    #[must_use]
    pub fn is_white(&self, piece: PieceId) -> bool {
        self.color(piece) == Color::White
    }

    /// Station `board` is docked at.
    #[must_use]
    pub fn station_of(&self, board: AttackBoardId) -> Station {
        self.stations[board.index()]
    }

    /// Board docked at `station`, if any.
    #[must_use]
    pub fn board_at(&self, station: Station) -> Option<AttackBoardId> {
        AttackBoardId::all().find(|&board| self.stations[board.index()] == station)
    }

    /// Whether no board is docked at `station`.
    #[must_use]
    pub fn is_station_free(&self, station: Station) -> bool {
        self.board_at(station).is_none()
    }

    pub(crate) fn set_station(&mut self, board: AttackBoardId, station: Station) {
        self.stations[board.index()] = station;
    }

    /// Current position of an entity.
    #[must_use]
    pub fn position_of(&self, entity: EntityId) -> Vec3 {
        match entity {
            EntityId::Square(id) => self.squares[id.index()].position,
            EntityId::Piece(id) => self.pieces[id.index()].position,
        }
    }

    /// Whether an entity is highlighted.
    #[must_use]
    pub fn is_highlighted(&self, entity: EntityId) -> bool {
        match entity {
            EntityId::Square(id) => self.squares[id.index()].highlighted,
            EntityId::Piece(id) => self.pieces[id.index()].highlighted,
        }
    }

    /// Flip an entity's highlight and return the new value.
    pub fn toggle_highlight(&mut self, entity: EntityId) -> bool {
        let flag = match entity {
            EntityId::Square(id) => &mut self.squares[id.index()].highlighted,
            EntityId::Piece(id) => &mut self.pieces[id.index()].highlighted,
        };
        *flag = !*flag;
        *flag
    }

    /// Number of squares with an occupant.
    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.squares.iter().filter(|sq| sq.occupant.is_some()).count()
    }

    /// Serializable view of the current state.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            squares: self
                .squares
                .iter()
                .map(|sq| SquareSnapshot {
                    id: sq.id.index(),
                    occupant: sq.occupant.map(|p| p.index()),
                    label: sq.occupant.map(|p| p.to_string()),
                    position: sq.position,
                    highlighted: sq.highlighted,
                })
                .collect(),
            stations: self.stations.iter().map(|s| s.index()).collect(),
            unplaced: PieceId::all()
                .filter(|&p| self.location(p).is_none())
                .map(PieceId::index)
                .collect(),
        }
    }
}

/// Serializable view of one square.
#[derive(Debug, Clone, Serialize)]
pub struct SquareSnapshot {
    /// Square index.
    pub id: usize,
    /// Occupying piece index.
    pub occupant: Option<usize>,
    /// Occupying piece in letter notation (upper case White).
    pub label: Option<String>,
    /// World position.
    pub position: Vec3,
    /// Tap highlight.
    pub highlighted: bool,
}

/// Serializable view of the whole board.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    /// All 64 squares in index order.
    pub squares: Vec<SquareSnapshot>,
    /// Station index of each attack board.
    pub stations: Vec<usize>,
    /// Pieces that no square references.
    pub unplaced: Vec<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Role;

    fn sq(i: u8) -> SquareId {
        SquareId::new(i)
    }

    #[test]
    fn test_reset_layout_landmarks() {
        let state = BoardState::new();

        let corner = state.occupant(sq(0)).unwrap();
        assert_eq!(corner, PieceId::new(26));
        assert_eq!(corner.color(), Color::White);
        assert_eq!(corner.role(), Role::Knight);

        assert_eq!(state.occupant(sq(16)), None);

        let queen = state.occupant(sq(48)).unwrap();
        assert_eq!(queen.role(), Role::Queen);
        assert_eq!(queen.color(), Color::White);

        let king = state.occupant(sq(63)).unwrap();
        assert_eq!(king.role(), Role::King);
        assert_eq!(king.color(), Color::Black);
    }

    #[test]
    fn test_reset_matches_canonical_table() {
        // piece id per square, -1 for empty
        #[rustfmt::skip]
        const EXPECTED: [i8; SquareId::COUNT] = [
            26, 28, 29, 27,
            16, 17, 18, 19,
            -1, -1, -1, -1,
            -1, -1, -1, -1,
            -1, -1, -1, -1,
            -1, -1, -1, -1,
            -1, -1, -1, -1,
            -1, -1, -1, -1,
            -1, -1, -1, -1,
            -1, -1, -1, -1,
            0, 1, 2, 3,
            10, 12, 13, 11,
            30, 24, 20, 21,
            25, 31, 22, 23,
            4, 5, 14, 8,
            6, 7, 9, 15,
        ];

        let mut state = BoardState::new();
        assert!(state.try_move(sq(4), sq(20)).is_applied());
        assert!(state.try_relocate_board(AttackBoardId::new(0), Station::new(5)).is_applied());
        state.reset();

        for square in SquareId::all() {
            let expected = u8::try_from(EXPECTED[square.index()]).ok().map(PieceId::new);
            assert_eq!(state.occupant(square), expected, "square {}", square.index());
        }
    }

    #[test]
    fn test_attack_boards_hold_their_own_side() {
        let state = BoardState::new();
        for i in 48..56 {
            assert!(state.is_white(state.occupant(sq(i)).unwrap()), "square {i}");
        }
        for i in 56..64 {
            assert!(!state.is_white(state.occupant(sq(i)).unwrap()), "square {i}");
        }
    }

    #[test]
    fn test_is_white_splits_identity_halves() {
        let state = BoardState::new();
        for piece in PieceId::all() {
            assert_eq!(state.is_white(piece), piece.index() >= 16, "{piece:?}");
            assert_eq!(state.color(piece), piece.color());
        }
    }

    #[test]
    fn test_reset_places_every_piece_once() {
        let state = BoardState::new();
        assert_eq!(state.occupied_count(), 32);
        for piece in PieceId::all() {
            assert!(state.location(piece).is_some(), "{piece:?} not placed");
        }
    }

    #[test]
    fn test_middle_board_starts_empty() {
        let state = BoardState::new();
        assert!((16..32).all(|i| state.occupant(sq(i)).is_none()));
    }

    #[test]
    fn test_levels_mirror_by_color() {
        let state = BoardState::new();
        for i in 0..8 {
            let low = state.occupant(sq(i)).unwrap();
            let high = state.occupant(sq(47 - i)).unwrap();
            assert_eq!(low.color(), Color::White);
            assert_eq!(high.color(), Color::Black);
            assert_eq!(low.role(), high.role(), "square {i} vs {}", 47 - i);
        }
    }

    #[test]
    fn test_pieces_stand_on_their_square_position() {
        let state = BoardState::new();
        for square in state.squares() {
            if let Some(piece) = square.occupant {
                assert_eq!(state.piece(piece).position, square.position);
            }
        }
    }

    #[test]
    fn test_home_stations_assigned() {
        let state = BoardState::new();
        assert_eq!(state.station_of(AttackBoardId::new(0)), Station::new(0));
        assert_eq!(state.station_of(AttackBoardId::new(3)), Station::new(11));
        assert_eq!(state.board_at(Station::new(10)), Some(AttackBoardId::new(2)));
        assert!(state.is_station_free(Station::new(5)));
    }

    #[test]
    fn test_attack_squares_follow_station_geometry() {
        let state = BoardState::new();
        for board in AttackBoardId::all() {
            for (cell, square) in board.squares().into_iter().enumerate() {
                let expected = geometry::attack_square_position(state.station_of(board), cell);
                assert_eq!(state.square(square).position, expected);
            }
        }
    }

    #[test]
    fn test_reset_restores_after_mutation() {
        let mut state = BoardState::new();
        state.set_occupant(sq(20), state.occupant(sq(4)));
        state.set_occupant(sq(4), None);
        state.set_station(AttackBoardId::new(0), Station::new(5));
        state.toggle_highlight(EntityId::Square(sq(3)));

        state.reset();

        let fresh = BoardState::new();
        assert_eq!(state.squares(), fresh.squares());
        assert_eq!(state.pieces(), fresh.pieces());
        assert_eq!(state.station_of(AttackBoardId::new(0)), Station::new(0));
    }

    #[test]
    fn test_toggle_highlight_flips() {
        let mut state = BoardState::new();
        let entity = EntityId::Piece(PieceId::new(3));
        assert!(state.toggle_highlight(entity));
        assert!(state.is_highlighted(entity));
        assert!(!state.toggle_highlight(entity));
        assert!(!state.is_highlighted(entity));
    }

    #[test]
    fn test_is_white_uses_color_field() {
        let state = BoardState::new();
        assert!(state.is_white(PieceId::new(16)));
        assert!(!state.is_white(PieceId::new(15)));
    }

    #[test]
    fn test_snapshot_shape() {
        let snapshot = BoardState::new().snapshot();
        assert_eq!(snapshot.squares.len(), 64);
        assert_eq!(snapshot.stations, vec![0, 1, 10, 11]);
        assert!(snapshot.unplaced.is_empty());
        assert_eq!(snapshot.squares[48].label.as_deref(), Some("Q"));
    }
}
