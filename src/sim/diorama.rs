//! The diorama world object.

use serde::Serialize;
use tracing::{debug, trace};

use crate::board::{
    AttackBoardId, BoardRelocation, BoardState, EntityId, MoveOutcome, PieceId, PieceMove, SquareId,
    assert_invariants,
};
use crate::choreo::{Choreographer, Playback};
use crate::geometry::Station;
use crate::sim::config::DioramaConfig;
use crate::sim::scheduler::{Plan, Scheduler};

/// What a single tick did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// Something was still animating; nothing changed.
    Busy,
    /// An attack board moved to a new station.
    BoardRelocated(BoardRelocation),
    /// A piece moved to an empty square.
    PieceMoved(PieceMove),
    /// The scheduler ran out of attempts; nothing changed.
    Starved,
    /// The planned change was refused by the board; nothing changed.
    Unchanged,
}

/// Running counters for a diorama.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DioramaStats {
    /// Ticks seen.
    pub ticks: u64,
    /// Ticks skipped because an animation was playing.
    pub busy_ticks: u64,
    /// Ticks where sampling gave up.
    pub starved_ticks: u64,
    /// Piece moves applied.
    pub piece_moves: u64,
    /// Piece moves onto an opposing piece.
    pub displacements: u64,
    /// Attack board relocations applied.
    pub relocations: u64,
    /// Resets since creation.
    pub resets: u64,
    /// Highlight toggles.
    pub taps: u64,
}

/// A board, its choreographer, its scheduler and the playback that shows it.
#[derive(Debug)]
pub struct Diorama<P: Playback> {
    state: BoardState,
    choreographer: Choreographer,
    scheduler: Scheduler,
    playback: P,
    config: DioramaConfig,
    stats: DioramaStats,
}

impl<P: Playback> Diorama<P> {
    /// Build the starting board and place every entity on `playback`.
    #[must_use]
    pub fn new(config: DioramaConfig, playback: P) -> Self {
        let mut diorama = Self {
            state: BoardState::new(),
            choreographer: Choreographer::new(config.path),
            scheduler: Scheduler::from_config(&config),
            playback,
            config,
            stats: DioramaStats::default(),
        };
        diorama.render_all();
        diorama
    }

    /// Put the board back in its starting layout.
    ///
    /// Safe while animations are playing: they are forgotten, and their
    /// completions no longer count.
    pub fn reset(&mut self) {
        self.choreographer.invalidate();
        self.state.reset();
        self.render_all();
        self.stats.resets += 1;
        debug!(resets = self.stats.resets, "diorama reset");
        assert_invariants(&self.state);
    }

    /// Advance the simulation by one step.
    pub fn tick(&mut self) -> TickOutcome {
        self.stats.ticks += 1;

        if self.choreographer.is_busy() {
            self.stats.busy_ticks += 1;
            trace!(in_flight = self.choreographer.in_flight().count(), "tick skipped");
            return TickOutcome::Busy;
        }

        match self.scheduler.plan(&self.state) {
            Plan::Relocate { board, station } => match self.try_relocate_board(board, station) {
                MoveOutcome::Applied(relocation) => TickOutcome::BoardRelocated(relocation),
                MoveOutcome::NoOp | MoveOutcome::Rejected => TickOutcome::Unchanged,
            },
            Plan::Move { src, dst } => match self.try_move(src, dst) {
                MoveOutcome::Applied(change) => TickOutcome::PieceMoved(change),
                MoveOutcome::NoOp | MoveOutcome::Rejected => TickOutcome::Unchanged,
            },
            Plan::Starved => {
                self.stats.starved_ticks += 1;
                TickOutcome::Starved
            }
        }
    }

    /// Toggle the highlight on a tapped entity. Returns the new flag.
    ///
    /// Taps are never held back by running animations.
    pub fn tapped_entity(&mut self, entity: EntityId) -> bool {
        self.stats.taps += 1;
        let on = self.state.toggle_highlight(entity);
        trace!(?entity, on, "highlight toggled");
        on
    }

    /// Move the piece on `src` to `dst` and animate it.
    pub fn try_move(&mut self, src: SquareId, dst: SquareId) -> MoveOutcome<PieceMove> {
        let outcome = self.state.try_move(src, dst);
        if let MoveOutcome::Applied(change) = &outcome {
            self.choreographer
                .play_piece_move(&mut self.playback, change, self.config.animate);
            self.stats.piece_moves += 1;
            if change.displaced.is_some() {
                self.stats.displacements += 1;
            }
            debug!(
                piece = %change.piece,
                from = %change.from,
                to = %change.to,
                displaced = ?change.displaced.map(|p| p.index()),
                "piece moved"
            );
            assert_invariants(&self.state);
        }
        outcome
    }

    /// Dock `board` at `station` and slide its squares and passengers over.
    pub fn try_relocate_board(&mut self, board: AttackBoardId, station: Station) -> MoveOutcome<BoardRelocation> {
        let outcome = self.state.try_relocate_board(board, station);
        if let MoveOutcome::Applied(relocation) = &outcome {
            self.choreographer
                .play_board_relocation(&mut self.playback, relocation, self.config.animate);
            self.stats.relocations += 1;
            debug!(
                board = board.index(),
                from = relocation.from.index(),
                to = relocation.to.index(),
                "attack board relocated"
            );
            assert_invariants(&self.state);
        }
        outcome
    }

    /// Current board state.
    #[must_use]
    pub fn state(&self) -> &BoardState {
        &self.state
    }

    /// The choreographer and its in-flight count.
    #[must_use]
    pub fn choreographer(&self) -> &Choreographer {
        &self.choreographer
    }

    /// Whether an animation is still playing.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.choreographer.is_busy()
    }

    /// The playback collaborator.
    #[must_use]
    pub fn playback(&self) -> &P {
        &self.playback
    }

    /// Mutable access to the playback, for driving its clock.
    pub fn playback_mut(&mut self) -> &mut P {
        &mut self.playback
    }

    /// Configuration in use.
    #[must_use]
    pub fn config(&self) -> &DioramaConfig {
        &self.config
    }

    /// Counters so far.
    #[must_use]
    pub fn stats(&self) -> DioramaStats {
        self.stats
    }

    /// Square a piece currently stands on.
    #[must_use]
    pub fn location(&self, piece: PieceId) -> Option<SquareId> {
        self.state.location(piece)
    }

    fn render_all(&mut self) {
        for square in self.state.squares() {
            self.playback
                .render_entity_at(EntityId::Square(square.id), square.position);
        }
        for piece in self.state.pieces() {
            self.playback
                .render_entity_at(EntityId::Piece(piece.id), piece.position);
        }
    }
}
