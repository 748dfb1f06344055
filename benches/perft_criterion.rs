use std::hint::black_box;
use std::time::Duration;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use wake_chess::game_state::game_state::GameState;
use wake_chess::move_generation::legal_move_generator::LegalMoveGenerator;
use wake_chess::move_generation::perft::{perft, perft_legal};
use wake_chess::moves::attack_table::RayTracingAttacks;

struct PerftCase {
    name: &'static str,
    fen: &'static str,
    expected_nodes: &'static [u64],
}

const CASES: &[PerftCase] = &[
    PerftCase {
        name: "start",
        fen: "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        expected_nodes: &[20, 400, 8902],
    },
    PerftCase {
        name: "kiwipete",
        fen: "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        expected_nodes: &[48, 2039],
    },
    PerftCase {
        name: "endgame",
        fen: "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        expected_nodes: &[14, 191, 2812],
    },
    PerftCase {
        name: "promotions",
        fen: "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
        expected_nodes: &[44, 1486],
    },
];

fn bench_perft(c: &mut Criterion) {
    let mut group = c.benchmark_group("perft");
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(4));
    group.sample_size(20);

    for case in CASES {
        let game = GameState::from_fen(case.fen).expect("benchmark FEN should parse");

        for (index, &expected) in case.expected_nodes.iter().enumerate() {
            let depth = (index + 1) as u8;

            // Correctness guard before timing.
            let counts = perft_legal(&game, depth).expect("perft should run");
            assert_eq!(counts.nodes, expected, "{} depth {depth}", case.name);

            group.throughput(Throughput::Elements(expected));
            group.bench_with_input(
                BenchmarkId::new(case.name, depth),
                &depth,
                |b, &depth| {
                    b.iter(|| {
                        let counts = perft_legal(black_box(&game), black_box(depth))
                            .expect("perft should run");
                        black_box(counts.nodes)
                    });
                },
            );
        }
    }

    group.finish();
}

fn bench_attack_tables(c: &mut Criterion) {
    let game = GameState::from_fen(CASES[1].fen).expect("benchmark FEN should parse");
    let ray_tracing = LegalMoveGenerator::new(RayTracingAttacks);

    let mut group = c.benchmark_group("attack_tables");
    group.sample_size(20);
    group.bench_function("precomputed_d2", |b| {
        b.iter(|| perft_legal(black_box(&game), 2).expect("perft should run").nodes)
    });
    group.bench_function("ray_tracing_d2", |b| {
        b.iter(|| perft(&ray_tracing, black_box(&game), 2).expect("perft should run").nodes)
    });
    group.finish();
}

criterion_group!(perft_benches, bench_perft, bench_attack_tables);
criterion_main!(perft_benches);
