//! Streaming enumerator tests.

use crate::board::{Board, Color, Ending, MoveGen, Piece, Square};

#[test]
fn test_initial_position_has_twenty_moves() {
    let mut board = Board::new();
    assert_eq!(board.generate_moves().len(), 20);
}

#[test]
fn test_stream_starts_with_lowest_pawn_push() {
    // kings have no moves in the initial position, so the first yields are
    // the a2 pawn's push and double push
    let mut board = Board::new();
    let mut gen = MoveGen::new(&mut board);
    assert_eq!(gen.next().unwrap().to_string(), "a2a3");
    assert_eq!(gen.next().unwrap().to_string(), "a2a4");
}

#[test]
fn test_stream_matches_collected_list() {
    let mut board =
        Board::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1");
    let collected = board.generate_moves();

    let mut gen = MoveGen::new(&mut board);
    let mut streamed = Vec::new();
    while let Some(mv) = gen.next() {
        streamed.push(mv);
    }
    assert_eq!(streamed.len(), collected.len());
    for (a, b) in streamed.iter().zip(collected.iter()) {
        assert_eq!(a, b);
    }
}

#[test]
fn test_next_leaves_board_unchanged() {
    let mut board = Board::new();
    let original = board.clone();
    let mut gen = MoveGen::new(&mut board);
    while gen.next().is_some() {}
    drop(gen);
    assert_eq!(board, original);
}

#[test]
fn test_next_keeping_leaves_move_applied() {
    let mut board = Board::new();
    let original = board.clone();
    let mut gen = MoveGen::new(&mut board);

    let mut count = 0;
    loop {
        let Some(mv) = gen.next_keeping() else {
            break;
        };
        count += 1;
        assert_eq!(gen.board().side_to_move(), Color::Black);
        gen.board().unmake(mv);
    }
    assert_eq!(count, 20);
    drop(gen);
    assert_eq!(board, original);
}

#[test]
fn test_yielded_moves_never_leave_mover_in_check() {
    let fens = [
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3",
    ];
    for fen in fens {
        let mut board = Board::from_fen(fen);
        let mover = board.side_to_move();
        for mv in &board.generate_moves() {
            board.make(*mv);
            assert!(
                !board.color_in_check(mover),
                "{mv} leaves the mover in check on {fen}"
            );
            board.unmake(*mv);
        }
    }
}

#[test]
fn test_wrong_side_moves_are_not_yielded() {
    // after 1. e4 it is black's turn: g1f3 must not parse as playable
    let board = Board::from_fen("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1");
    assert!(board.parse_move("g1f3").is_err());

    let mut board = board;
    let mv = board.parse_move("e7e5").unwrap();
    assert!(mv.is_legal_on(&mut board));
    board.make(mv);
    assert_eq!(board.en_passant_target(), Some(Square::new(5, 4)));
}

#[test]
fn test_king_walks_around_blocking_pawn() {
    // black pawn on e2 blocks the push square and guards d1/f1
    let mut board = Board::from_fen("4k3/8/8/8/8/8/4p3/4K3 w - - 0 1");
    assert!(!board.in_check());

    let moves = board.generate_moves();
    let mut dests: Vec<String> = moves.iter().map(|m| m.to().to_string()).collect();
    dests.sort();
    assert_eq!(dests, ["d2", "e2", "f2"]);
}

#[test]
fn test_promotions_expand_in_order() {
    let mut board = Board::from_fen("8/P7/8/8/8/8/8/K1k5 w - - 0 1");
    let mut gen = MoveGen::new(&mut board);
    let mut promotions = Vec::new();
    while let Some(mv) = gen.next() {
        if mv.promotion().is_some() {
            promotions.push(mv);
        }
    }
    let rendered: Vec<String> = promotions.iter().map(|m| m.to_string()).collect();
    assert_eq!(rendered, ["a7a8n", "a7a8b", "a7a8r", "a7a8q"]);
}

#[test]
fn test_castling_comes_after_regular_moves() {
    let mut board = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
    let mut gen = MoveGen::new(&mut board);
    let mut seen_castle = false;
    let mut castles = Vec::new();
    while let Some(mv) = gen.next() {
        if mv.is_castle() {
            seen_castle = true;
            castles.push(mv.to_string());
        } else {
            assert!(!seen_castle, "regular move yielded after a castle");
        }
    }
    // kingside first, then queenside
    assert_eq!(castles, ["e1g1", "e1c1"]);
}

#[test]
fn test_castling_blocked_by_attacked_transit_square() {
    // black rook on f8 covers f1: kingside is out, queenside stays legal
    let mut board = Board::from_fen("r4rk1/8/8/8/8/8/8/R3K2R w KQ - 0 1");
    let moves = board.generate_moves();
    assert!(!moves.iter().any(|m| m.to_string() == "e1g1"));
    assert!(moves.iter().any(|m| m.to_string() == "e1c1"));
}

#[test]
fn test_castling_blocked_while_in_check() {
    let mut board = Board::from_fen("r3k2r/8/8/8/8/8/4r3/R3K2R w KQkq - 0 1");
    assert!(board.in_check());
    let moves = board.generate_moves();
    assert!(!moves.iter().any(|m| m.is_castle()));
}

#[test]
fn test_castling_blocked_by_piece_between() {
    let mut board = Board::from_fen("r3k2r/8/8/8/8/8/8/RN2K2R w KQkq - 0 1");
    let moves = board.generate_moves();
    assert!(moves.iter().any(|m| m.to_string() == "e1g1"));
    assert!(!moves.iter().any(|m| m.to_string() == "e1c1"));
}

#[test]
fn test_is_square_attacked_reports_attackers() {
    let board = Board::from_fen("4k3/8/8/8/8/2n5/8/R3K3 w - - 0 1");
    // the knight on c3 attacks a4, b1, d1, e2, e4...
    let attackers = board.is_square_attacked(Square::new(0, 3), Color::Black);
    assert_eq!(attackers.popcount(), 1);
    assert!(attackers.contains(Square::new(2, 2)));
    // the rook on a1 defends d1
    let defenders = board.is_square_attacked(Square::new(0, 3), Color::White);
    assert!(defenders.contains(Square::new(0, 0)));
    assert!(defenders.contains(Square::new(0, 4)));
}

#[test]
fn test_ending_normal_when_moves_exist() {
    let mut board = Board::new();
    let mut gen = MoveGen::new(&mut board);
    while gen.next().is_some() {}
    assert_eq!(gen.ending(), Ending::Normal);
    assert!(!gen.is_checkmate());
    assert!(!gen.is_stalemate());
}

#[test]
fn test_back_rank_mate_is_checkmate() {
    let mut board = Board::from_fen("6k1/5ppp/8/8/8/8/5PPP/R5K1 w - - 0 1");
    board.make_move_str("a1a8").unwrap();

    let mut gen = MoveGen::new(&mut board);
    assert!(gen.next().is_none());
    assert!(gen.is_checkmate());
    assert!(!gen.is_stalemate());
    drop(gen);
    assert!(board.is_checkmate());
    assert!(!board.is_stalemate());
}

#[test]
fn test_cornered_king_is_stalemated() {
    let mut board = Board::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1");
    let mut gen = MoveGen::new(&mut board);
    assert!(gen.next().is_none());
    assert!(gen.is_stalemate());
    assert!(!gen.is_checkmate());
    drop(gen);
    assert!(board.is_stalemate());
    assert!(!board.is_checkmate());
}

#[test]
#[should_panic(expected = "before exhaustion")]
fn test_terminal_query_before_exhaustion_panics() {
    let mut board = Board::new();
    let gen = MoveGen::new(&mut board);
    let _ = gen.is_checkmate();
}

#[test]
fn test_exhausted_stream_keeps_returning_none() {
    let mut board = Board::new();
    let mut gen = MoveGen::new(&mut board);
    while gen.next().is_some() {}
    assert!(gen.next().is_none());
    assert!(gen.next().is_none());
}

#[test]
fn test_blocked_pawn_has_no_push() {
    let mut board = Board::from_fen("4k3/8/8/8/8/4p3/4P3/4K3 w - - 0 1");
    let moves = board.generate_moves();
    assert!(moves
        .iter()
        .all(|m| board.piece_on(m.from()) != Some(Piece::Pawn)));
}
