use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use gameportal_core::{Board, Difficulty, GameSession, MinePlacer, RandomMinePlacer};

fn bench_place_mines(c: &mut Criterion) {
    let mut group = c.benchmark_group("place_mines");
    for difficulty in Difficulty::ALL {
        let config = difficulty.config();
        group.bench_function(difficulty.label(), |b| {
            let mut seed = 0;
            b.iter(|| {
                seed += 1;
                let mut board = Board::new(config.size);
                RandomMinePlacer::new(seed).place_mines(&mut board, (0, 0), config.mines);
                board.compute_neighbor_counts();
                black_box(board)
            })
        });
    }
    group.finish();
}

fn bench_flood_fill(c: &mut Criterion) {
    let empty = Board::from_mine_coords((255, 255), &[]).expect("valid board");
    c.bench_function("flood_fill/empty_255x255", |b| {
        b.iter(|| {
            let mut board = empty.clone();
            black_box(board.reveal(black_box((127, 127))))
        })
    });

    c.bench_function("first_reveal/hard", |b| {
        let mut seed = 0;
        b.iter(|| {
            seed += 1;
            let mut session = GameSession::new(seed, Difficulty::Hard.config(), seed);
            black_box(session.handle_reveal((8, 15)))
        })
    });
}

criterion_group!(benches, bench_place_mines, bench_flood_fill);
criterion_main!(benches);
