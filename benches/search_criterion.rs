use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use plum_core::game_state::chess_types::Board;
use plum_core::moves::attack_tables::AttackTables;
use plum_core::search::board_scoring::MaterialScorer;
use plum_core::search::cancellation::CancelToken;
use plum_core::search::iterative_deepening::Searcher;
use plum_core::search::search_config::SearchConfig;

#[derive(Clone, Copy)]
struct SearchCase {
    name: &'static str,
    fen: &'static str,
}

const CASES: &[SearchCase] = &[
    SearchCase {
        name: "startpos",
        fen: "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
    },
    SearchCase {
        name: "classical_mid",
        fen: "r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P1b1/P1NP1N2/1PP1QPPP/R4RK1 w - - 0 10",
    },
    SearchCase {
        name: "tactical",
        fen: "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    },
    SearchCase {
        name: "end_kpk",
        fen: "8/8/8/8/8/4k3/4P3/4K3 w - - 0 1",
    },
];

fn bench_search(c: &mut Criterion) {
    let depth = std::env::var("PLUM_SEARCH_DEPTH")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(4)
        .clamp(1, 64);

    let mut group = c.benchmark_group("search");
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(4));
    group.sample_size(20);

    let tables = AttackTables::shared();
    let config = SearchConfig {
        max_depth: depth,
        ..SearchConfig::default()
    };

    for case in CASES {
        let board = Board::from_fen(tables.clone(), case.fen).expect("benchmark FEN should parse");
        let mut searcher =
            Searcher::new(board, MaterialScorer, config).expect("benchmark config should be valid");
        let token = CancelToken::new();

        group.bench_function(BenchmarkId::new(case.name, format!("d{depth}")), |b| {
            b.iter(|| {
                searcher.clear_tt();
                let outcome = searcher.search(black_box(&token)).expect("search should run");
                black_box(outcome.nodes)
            });
        });
    }

    group.finish();
}

criterion_group!(search_benches, bench_search);
criterion_main!(search_benches);
