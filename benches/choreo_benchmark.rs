//! Benchmarks for path building and clock playback.

#![allow(missing_docs)]

use std::hint::black_box;
use std::time::Duration;

use criterion::{Criterion, criterion_group, criterion_main};
use tridi::board::EntityId;
use tridi::choreo::{Choreography, ClockPlayback, InFlight, PathParams, Playback};
use tridi::geometry::{Vec3, main_square_position};
use tridi::{Level, PieceId};

fn bench_piece_path(c: &mut Criterion) {
    let params = PathParams::default();
    let from = main_square_position(Level::new(0), 1, 1);
    let to = main_square_position(Level::new(2), 2, 3);

    c.bench_function("piece_path", |b| {
        b.iter(|| Choreography::piece_path(black_box(from), black_box(to), black_box(&params)));
    });
}

fn bench_sample(c: &mut Criterion) {
    let path = Choreography::piece_path(Vec3::ZERO, Vec3::new(3.0, 20.0, 4.0), &PathParams::default());
    let total = path.total_duration();

    c.bench_function("path_sample_100", |b| {
        b.iter(|| {
            for i in 0..100u32 {
                black_box(path.sample(Vec3::ZERO, total * i / 100));
            }
        });
    });
}

fn bench_clock_advance(c: &mut Criterion) {
    let params = PathParams::default();

    c.bench_function("clock_32_animations", |b| {
        b.iter(|| {
            let in_flight = InFlight::new();
            let mut playback = ClockPlayback::new();
            for id in PieceId::all() {
                let path = Choreography::piece_path(Vec3::ZERO, Vec3::new(1.0, 10.0, 1.0), &params);
                playback.animate_entity_along(EntityId::Piece(id), path, in_flight.begin());
            }
            while !in_flight.is_idle() {
                playback.advance(Duration::from_millis(16));
            }
            black_box(playback.finished_count())
        });
    });
}

criterion_group!(benches, bench_piece_path, bench_sample, bench_clock_advance);
criterion_main!(benches);
