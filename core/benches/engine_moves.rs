use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use floe_core::{BoardGenerator, Direction, GameConfig, GameEngine, RandomBoardGenerator, is_fully_connected};

fn bench_connectivity(c: &mut Criterion) {
    let board = RandomBoardGenerator::new(7).generate(GameConfig::new((32, 32)));

    c.bench_function("is_fully_connected_32x32", |b| {
        b.iter(|| is_fully_connected(black_box(&board)))
    });
}

fn bench_shove_cycle(c: &mut Criterion) {
    let engine = GameEngine::starter();

    c.bench_function("shove_cycle_starter", |b| {
        b.iter(|| {
            let mut engine = engine.clone();
            engine.shove(Direction::Up).unwrap();
            engine.shove(Direction::Down).unwrap();
            engine
        })
    });
}

criterion_group!(benches, bench_connectivity, bench_shove_cycle);
criterion_main!(benches);
