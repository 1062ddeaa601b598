#![no_main]

//! Board mutation fuzzer.
//!
//! Applies arbitrary moves, relocations and resets and checks after each
//! one that:
//! 1. No piece sits on two squares
//! 2. No two attack boards share a station
//! 3. Refused changes leave the board untouched

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use tridi::board::{AttackBoardId, BoardState, MoveOutcome, SquareId, check_invariants};
use tridi::geometry::Station;

/// A fuzzer-generated board change.
#[derive(Arbitrary, Debug, Clone, Copy)]
enum FuzzOp {
    /// Move whatever is on `src` to `dst`.
    Move { src: u8, dst: u8 },
    /// Dock a board at a station.
    Relocate { board: u8, station: u8 },
    /// Back to the starting layout.
    Reset,
}

fuzz_target!(|ops: Vec<FuzzOp>| {
    let mut state = BoardState::new();

    for op in ops.into_iter().take(500) {
        let before = state.clone();
        let refused = match op {
            FuzzOp::Move { src, dst } => {
                let outcome = state.try_move(SquareId::new(src % 64), SquareId::new(dst % 64));
                !outcome.is_applied()
            }
            FuzzOp::Relocate { board, station } => {
                let outcome = state.try_relocate_board(AttackBoardId::new(board % 4), Station::new(station % 12));
                matches!(outcome, MoveOutcome::Rejected | MoveOutcome::NoOp)
            }
            FuzzOp::Reset => {
                state.reset();
                false
            }
        };

        if refused {
            assert_eq!(state, before, "refused {op:?} changed the board");
        }

        let violations = check_invariants(&state);
        assert!(violations.is_empty(), "{violations:?} after {op:?}");
    }
});
