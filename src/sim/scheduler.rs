//! Random move picker.
//!
//! Each tick either relocates an attack board (roughly two ticks in
//! eleven) or moves a piece from an occupied square to an empty one. The
//! picks are uniform; retries are capped so a pathological board cannot
//! hang a tick.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::warn;

use crate::board::{AttackBoardId, BoardState, SquareId};
use crate::geometry::Station;
use crate::sim::config::{DioramaConfig, ROLL_MAX};

/// What the scheduler wants to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Plan {
    /// Move `board` to the free `station`.
    Relocate {
        /// Board to move.
        board: AttackBoardId,
        /// Free station to dock at.
        station: Station,
    },
    /// Move the piece on `src` to the empty `dst`.
    Move {
        /// Occupied source square.
        src: SquareId,
        /// Empty destination square.
        dst: SquareId,
    },
    /// Sampling gave up before finding a candidate.
    Starved,
}

/// Seeded source of plans.
#[derive(Debug, Clone)]
pub struct Scheduler<R = StdRng> {
    rng: R,
    board_move_odds: u32,
    max_attempts: u32,
}

impl Scheduler<StdRng> {
    /// Build a scheduler from a configuration.
    ///
    /// Uses the configured seed, or OS entropy when there is none.
    #[must_use]
    pub fn from_config(config: &DioramaConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(rng, config)
    }
}

impl<R: Rng> Scheduler<R> {
    /// Build a scheduler around an existing random source.
    #[must_use]
    pub fn with_rng(rng: R, config: &DioramaConfig) -> Self {
        Self {
            rng,
            board_move_odds: config.board_move_odds,
            max_attempts: config.max_attempts.max(1),
        }
    }

    /// Pick the next change for `state`.
    pub fn plan(&mut self, state: &BoardState) -> Plan {
        if self.rng.gen_range(0..=ROLL_MAX) < self.board_move_odds {
            self.plan_relocation(state)
        } else {
            self.plan_move(state)
        }
    }

    fn plan_relocation(&mut self, state: &BoardState) -> Plan {
        let Some(board) = self.pick::<AttackBoardId>(AttackBoardId::COUNT) else {
            return Plan::Starved;
        };

        for _ in 0..self.max_attempts {
            if let Some(station) = self.pick::<Station>(Station::COUNT)
                && state.is_station_free(station)
            {
                return Plan::Relocate { board, station };
            }
        }

        warn!(board = board.index(), attempts = self.max_attempts, "no free station found");
        Plan::Starved
    }

    fn plan_move(&mut self, state: &BoardState) -> Plan {
        let Some(src) = self.sample_square(|square| state.occupant(square).is_some()) else {
            warn!(attempts = self.max_attempts, "no occupied square found");
            return Plan::Starved;
        };
        let Some(dst) = self.sample_square(|square| square != src && state.occupant(square).is_none()) else {
            warn!(src = src.index(), attempts = self.max_attempts, "no empty square found");
            return Plan::Starved;
        };
        Plan::Move { src, dst }
    }

    fn sample_square(&mut self, accept: impl Fn(SquareId) -> bool) -> Option<SquareId> {
        (0..self.max_attempts)
            .filter_map(|_| self.pick::<SquareId>(SquareId::COUNT))
            .find(|&square| accept(square))
    }

    fn pick<T: TryFrom<usize>>(&mut self, count: usize) -> Option<T> {
        T::try_from(self.rng.gen_range(0..count)).ok()
    }
}
