#![no_main]

//! Diorama loop fuzzer.
//!
//! Interleaves ticks, out-of-order animation completions, resets and taps
//! against a playback that only finishes animations when told to. Checks
//! that the in-flight count always matches the live completions and that
//! board invariants hold throughout.

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use tridi::board::{EntityId, PieceId, SquareId, check_invariants};
use tridi::choreo::{Choreography, Completion, Playback};
use tridi::geometry::Vec3;
use tridi::sim::{Diorama, DioramaConfig, TickOutcome};

#[derive(Debug, Default)]
struct ManualPlayback {
    held: Vec<Completion>,
}

impl Playback for ManualPlayback {
    fn render_entity_at(&mut self, _entity: EntityId, _position: Vec3) {}

    fn animate_entity_along(&mut self, _entity: EntityId, _choreography: Choreography, done: Completion) {
        self.held.push(done);
    }
}

#[derive(Arbitrary, Debug, Clone, Copy)]
enum FuzzStep {
    Tick,
    Complete(u8),
    CompleteAll,
    Reset,
    TapSquare(u8),
    TapPiece(u8),
}

#[derive(Arbitrary, Debug)]
struct DioramaInput {
    seed: u64,
    animate: bool,
    steps: Vec<FuzzStep>,
}

fuzz_target!(|input: DioramaInput| {
    let config = DioramaConfig {
        seed: Some(input.seed),
        animate: input.animate,
        ..DioramaConfig::default()
    };
    let mut diorama = Diorama::new(config, ManualPlayback::default());

    for step in input.steps.into_iter().take(300) {
        match step {
            FuzzStep::Tick => {
                let was_busy = diorama.is_busy();
                let outcome = diorama.tick();
                assert_eq!(was_busy, outcome == TickOutcome::Busy);
            }
            FuzzStep::Complete(i) => {
                let held = &mut diorama.playback_mut().held;
                if !held.is_empty() {
                    let index = usize::from(i) % held.len();
                    held.swap_remove(index).complete();
                }
            }
            FuzzStep::CompleteAll => diorama.playback_mut().held.clear(),
            FuzzStep::Reset => diorama.reset(),
            FuzzStep::TapSquare(i) => {
                diorama.tapped_entity(EntityId::Square(SquareId::new(i % 64)));
            }
            FuzzStep::TapPiece(i) => {
                diorama.tapped_entity(EntityId::Piece(PieceId::new(i % 32)));
            }
        }

        let live = diorama
            .playback()
            .held
            .iter()
            .filter(|done| done.is_current())
            .count();
        assert_eq!(diorama.choreographer().in_flight().count() as usize, live);
        assert!(check_invariants(diorama.state()).is_empty());
    }
});
