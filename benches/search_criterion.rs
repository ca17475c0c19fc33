use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use sentinel_chess::game_state::position::Position;
use sentinel_chess::search::alpha_beta::alpha_beta_search;
use sentinel_chess::search::board_scoring::HeuristicScorer;
use sentinel_chess::search::minimax::{minimax_search, SearchConfig};

const POSITIONS: &[(&str, &str)] = &[
    (
        "italian",
        "r1bqkbnr/pppp1ppp/2n5/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R b KQkq - 3 3",
    ),
    (
        "kiwipete",
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    ),
];

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(4));
    group.sample_size(10);

    let scorer = HeuristicScorer::default();
    for &(name, fen) in POSITIONS {
        let position = Position::from_fen(fen).expect("benchmark FEN should parse");
        for depth in 1..=3u8 {
            let config = SearchConfig {
                max_depth: depth,
                use_opening_book: false,
            };

            // Both searches must agree before timing either one.
            let pruned = alpha_beta_search(&position, &scorer, config);
            let full = minimax_search(&position, &scorer, config);
            assert_eq!(pruned.best_move, full.best_move, "{name} depth {depth}");

            group.bench_with_input(
                BenchmarkId::new("alpha_beta", format!("{name}_d{depth}")),
                &config,
                |b, config| {
                    b.iter(|| black_box(alpha_beta_search(black_box(&position), &scorer, *config)))
                },
            );
            group.bench_with_input(
                BenchmarkId::new("minimax", format!("{name}_d{depth}")),
                &config,
                |b, config| {
                    b.iter(|| black_box(minimax_search(black_box(&position), &scorer, *config)))
                },
            );
        }
    }

    group.finish();
}

criterion_group!(search_benches, bench_search);
criterion_main!(search_benches);
