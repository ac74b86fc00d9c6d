use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use minehunt_core::*;

fn generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    for difficulty in Difficulty::ALL {
        let config = difficulty.config();
        let center = (config.size.0 / 2, config.size.1 / 2);
        group.bench_function(format!("{difficulty:?}"), |b| {
            b.iter(|| {
                let mut board = Board::new(config.size);
                RandomMineGenerator::new(black_box(7))
                    .generate(&mut board, config.mines, SafeZone::new(center, 1))
                    .unwrap();
                board.compute_adjacency();
                board
            })
        });
    }
    group.finish();
}

fn flood_fill(c: &mut Criterion) {
    let mut group = c.benchmark_group("flood_fill");

    let empty = GameConfig::new((255, 255), 0).unwrap();
    group.bench_function("empty_255x255", |b| {
        b.iter(|| {
            let mut session = GameSession::with_seed(empty, 1).unwrap();
            session.reveal(black_box((127, 127))).unwrap()
        })
    });

    let sparse = GameConfig::new((128, 128), 800).unwrap().with_safe_radius(2);
    group.bench_function("sparse_128x128", |b| {
        b.iter(|| {
            let mut session = GameSession::with_seed(sparse, 1).unwrap();
            session.reveal(black_box((64, 64))).unwrap()
        })
    });

    group.finish();
}

criterion_group!(benches, generation, flood_fill);
criterion_main!(benches);
