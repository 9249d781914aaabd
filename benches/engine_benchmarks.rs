//! Benchmarks for the checkers rules engine and wire codec.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::prelude::*;

use checkers_relay::board::{Move, Position};
use checkers_relay::protocol::{read_message, write_message, Message};

const MIDGAME_FEN: &str = "W:W18,21,22,23,24,25,K26,27,29,30,31:B1,2,3,5,6,7,9,10,11,12,15,K20";

/// Leaf count where every single jump of a multi-jump is one ply.
fn perft(position: &Position, depth: u32) -> u64 {
    let moves = position.legal_moves();
    if depth <= 1 {
        return if depth == 0 { 1 } else { moves.len() as u64 };
    }
    moves
        .into_iter()
        .map(|mv| {
            let mut next = position.clone();
            next.apply_move(mv);
            perft(&next, depth - 1)
        })
        .sum()
}

fn bench_perft(c: &mut Criterion) {
    let mut group = c.benchmark_group("perft");

    let startpos = Position::starting();
    for depth in 1..=6 {
        group.bench_with_input(BenchmarkId::new("startpos", depth), &depth, |b, &depth| {
            b.iter(|| perft(&startpos, black_box(depth)))
        });
    }

    let midgame = Position::from_fen(MIDGAME_FEN).expect("valid position");
    for depth in 1..=5 {
        group.bench_with_input(BenchmarkId::new("midgame", depth), &depth, |b, &depth| {
            b.iter(|| perft(&midgame, black_box(depth)))
        });
    }

    group.finish();
}

fn bench_movegen(c: &mut Criterion) {
    let mut group = c.benchmark_group("movegen");

    let startpos = Position::starting();
    group.bench_function("startpos", |b| b.iter(|| black_box(startpos.legal_moves())));

    let midgame = Position::from_fen(MIDGAME_FEN).expect("valid position");
    group.bench_function("midgame", |b| b.iter(|| black_box(midgame.legal_moves())));

    group.bench_function("is_valid", |b| {
        let moves: Vec<Move> = midgame.legal_moves().into_iter().collect();
        b.iter(|| moves.iter().all(|&mv| midgame.is_valid(black_box(mv))))
    });

    group.finish();
}

fn bench_playout(c: &mut Criterion) {
    let mut group = c.benchmark_group("playout");
    group.sample_size(20);

    group.bench_function("random_game", |b| {
        let mut rng = StdRng::seed_from_u64(0x00c0_ffee);
        b.iter(|| {
            let mut position = Position::starting();
            for _ in 0..200 {
                let moves = position.legal_moves();
                if moves.is_empty() {
                    break;
                }
                position.apply_move(moves[rng.gen_range(0..moves.len())]);
            }
            black_box(position)
        })
    });

    group.finish();
}

fn bench_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec");

    let position = Position::starting();
    let messages: Vec<Message> = position.legal_moves().into_iter().map(Message::Move).collect();
    group.bench_function("write_read_moves", |b| {
        let mut buf = Vec::with_capacity(64);
        b.iter(|| {
            buf.clear();
            for message in &messages {
                write_message(&mut buf, message).expect("write to vec");
            }
            let mut reader = buf.as_slice();
            for _ in &messages {
                black_box(read_message(&mut reader).expect("read back"));
            }
        })
    });

    group.finish();
}

criterion_group!(benches, bench_perft, bench_movegen, bench_playout, bench_codec);
criterion_main!(benches);
