//! Move generation benchmark for profiling with cargo-flamegraph.
//!
//! Runs many iterations of `legal_moves_into` over classic test positions
//! and a handful of seeded random-army starts, then a short perft.
//!
//! Usage:
//!   cargo flamegraph --example movegen_bench -p chess39_core

use std::time::{Duration, Instant};

use chess39_core::{Board, Game, legal_moves_into, perft};

const TEST_POSITIONS: &[(&str, &str)] = &[
    (
        "Start",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
    ),
    (
        "Kiwipete",
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq -",
    ),
    (
        "Promotions",
        "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq -",
    ),
    ("Rook endgame", "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - -"),
];

const RANDOM_ARMY_SEEDS: std::ops::Range<u64> = 0..4;
const ITERATIONS: usize = 20_000;

fn bench(name: &str, board: &Board, buf: &mut Vec<chess39_core::Move>) -> Duration {
    print!("{name:.<24}");
    let start = Instant::now();
    let mut generated = 0usize;
    for _ in 0..ITERATIONS {
        legal_moves_into(board, buf);
        generated += buf.len();
    }
    let elapsed = start.elapsed();
    let per_pos = generated as f64 / ITERATIONS as f64;
    let pps = ITERATIONS as f64 / elapsed.as_secs_f64().max(f64::EPSILON);
    println!(" {per_pos:>5.1} moves/pos, {pps:>10.0} pos/sec ({elapsed:>8.3?})");
    elapsed
}

fn main() {
    println!("=== Move Generation Benchmark ===");
    println!("Iterations per position: {ITERATIONS}");
    println!();

    let mut buf = Vec::with_capacity(256);
    let mut total = Duration::ZERO;
    let mut positions = 0usize;

    for (name, fen) in TEST_POSITIONS {
        let Ok(board) = Board::from_fen(fen) else {
            eprintln!("skipping {name}: bad FEN");
            continue;
        };
        total += bench(name, &board, &mut buf);
        positions += 1;
    }

    for seed in RANDOM_ARMY_SEEDS {
        let game = Game::with_seed(seed);
        total += bench(&format!("Army seed {seed}"), game.board(), &mut buf);
        positions += 1;
    }

    println!();
    println!("{:=<70}", "");
    let avg = (ITERATIONS * positions) as f64 / total.as_secs_f64().max(f64::EPSILON);
    println!("TOTAL: {positions} positions in {total:.3?} ({avg:.0} positions/sec)");

    let start = Instant::now();
    let nodes = perft(&Board::classic(), 4);
    println!("perft(4) from the classic start: {nodes} nodes in {:.3?}", start.elapsed());
}
