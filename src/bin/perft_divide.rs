//! Perft divide: per-root-move node counts, for diffing move generation
//! against a reference engine.
//!
//! Usage: `perft_divide [fen] [depth]` (defaults: Kiwipete, depth 3).

use std::time::Instant;

use chess_movegen::board::Board;
use chess_movegen::pregenerate_tables;

const DEFAULT_FEN: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let fen = args.get(1).map_or(DEFAULT_FEN, String::as_str);
    let depth: usize = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(3);

    let mut board = match Board::try_from_fen(fen) {
        Ok(board) => board,
        Err(err) => {
            eprintln!("bad FEN: {err}");
            std::process::exit(1);
        }
    };

    pregenerate_tables();
    println!("Perft divide at depth {depth} for:\n  {fen}");

    let start = Instant::now();
    let mut total = 0u64;
    for mv in &board.generate_moves() {
        board.make(*mv);
        let count = board.perft(depth.saturating_sub(1));
        board.unmake(*mv);
        println!("  {mv}: {count}");
        total += count;
    }
    println!("Total: {} in {:?}", total, start.elapsed());
}
