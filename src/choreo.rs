//! Choreography: turning applied board changes into animations.
//!
//! The choreographer is the single writer of motion. It builds the
//! waypoint path for each change, hands it to the [`Playback`]
//! collaborator and takes an in-flight slot for every animation it
//! dispatches. The scheduler reads the same counter to decide whether it
//! may start something new.

mod clock;
mod inflight;
mod path;
mod playback;

pub use clock::ClockPlayback;
pub use inflight::{Completion, InFlight};
pub use path::{Choreography, Easing, Leg, PathParams};
pub use playback::{InstantPlayback, Playback};

use std::time::Duration;

use tracing::trace;

use crate::board::{BoardRelocation, EntityId, PieceMove};

/// Dispatches animations and tracks how many are still playing.
#[derive(Debug, Clone, Default)]
pub struct Choreographer {
    params: PathParams,
    in_flight: InFlight,
}

impl Choreographer {
    /// Create a choreographer with the given path parameters.
    #[must_use]
    pub fn new(params: PathParams) -> Self {
        Self {
            params,
            in_flight: InFlight::new(),
        }
    }

    /// Path parameters in use.
    #[must_use]
    pub fn params(&self) -> &PathParams {
        &self.params
    }

    /// Shared in-flight counter.
    #[must_use]
    pub fn in_flight(&self) -> &InFlight {
        &self.in_flight
    }

    /// Whether any dispatched animation is still playing.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        !self.in_flight.is_idle()
    }

    /// Drop every outstanding animation from the count.
    pub fn invalidate(&self) {
        self.in_flight.invalidate();
    }

    /// The path a piece move takes.
    #[must_use]
    pub fn piece_path(&self, change: &PieceMove) -> Choreography {
        Choreography::piece_path(change.from_position, change.to_position, &self.params)
    }

    /// Play a piece move, either along its full path or as a jump.
    pub fn play_piece_move<P: Playback + ?Sized>(&self, playback: &mut P, change: &PieceMove, animate: bool) {
        let entity = EntityId::Piece(change.piece);
        if animate {
            let path = self.piece_path(change);
            trace!(
                piece = change.piece.index(),
                legs = path.legs().len(),
                duration_ms = path.total_duration().as_millis(),
                "dispatching piece path"
            );
            playback.animate_entity_along(entity, path, self.in_flight.begin());
        } else {
            playback.render_entity_at(entity, change.to_position);
        }
    }

    /// Play a board relocation: every owned square and every passenger
    /// slides straight to its new position.
    pub fn play_board_relocation<P: Playback + ?Sized>(
        &self,
        playback: &mut P,
        relocation: &BoardRelocation,
        animate: bool,
    ) {
        let slide = Duration::from_millis(self.params.board_slide_ms);
        for carried in &relocation.carried {
            let mut entities = vec![EntityId::Square(carried.square)];
            entities.extend(carried.passenger.map(EntityId::Piece));

            for entity in entities {
                if animate {
                    let path = Choreography::direct(carried.position, slide);
                    playback.animate_entity_along(entity, path, self.in_flight.begin());
                } else {
                    playback.render_entity_at(entity, carried.position);
                }
            }
        }
        trace!(
            board = relocation.board.index(),
            station = relocation.to.index(),
            in_flight = self.in_flight.count(),
            "dispatched board relocation"
        );
    }
}
