//! Benchmarks for the diorama tick loop.
//!
//! This covers the scheduler, the validator and choreography dispatch
//! together.

#![allow(missing_docs)]

use std::hint::black_box;
use std::time::Duration;

use criterion::{Criterion, criterion_group, criterion_main};
use tridi::board::{BoardState, SquareId};
use tridi::sim::{Diorama, DioramaConfig};
use tridi::{ClockPlayback, InstantPlayback};

fn config(seed: u64) -> DioramaConfig {
    DioramaConfig {
        seed: Some(seed),
        ..DioramaConfig::default()
    }
}

fn bench_instant_ticks(c: &mut Criterion) {
    c.bench_function("1000_ticks_instant", |b| {
        b.iter(|| {
            let mut diorama = Diorama::new(config(black_box(42)), InstantPlayback);
            for _ in 0..1000 {
                black_box(diorama.tick());
            }
            black_box(diorama.stats())
        });
    });
}

fn bench_clock_ticks(c: &mut Criterion) {
    c.bench_function("1000_ticks_clock", |b| {
        b.iter(|| {
            let mut diorama = Diorama::new(config(black_box(42)), ClockPlayback::new());
            for _ in 0..1000 {
                black_box(diorama.tick());
                diorama.playback_mut().advance(Duration::from_millis(10));
            }
            black_box(diorama.stats())
        });
    });
}

fn bench_location_scan(c: &mut Criterion) {
    let state = BoardState::new();

    c.bench_function("location_all_pieces", |b| {
        b.iter(|| {
            for piece in state.pieces() {
                black_box(state.location(piece.id));
            }
        });
    });
}

fn bench_try_move(c: &mut Criterion) {
    c.bench_function("try_move_and_reset", |b| {
        let mut state = BoardState::new();
        b.iter(|| {
            black_box(state.try_move(SquareId::new(4), SquareId::new(20)));
            state.reset();
        });
    });
}

criterion_group!(
    benches,
    bench_instant_ticks,
    bench_clock_ticks,
    bench_location_scan,
    bench_try_move
);
criterion_main!(benches);
