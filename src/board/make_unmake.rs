//! Move construction and reversible make/unmake.

use super::{
    castle_bit, Board, Color, Move, Piece, Square, EP_PRESENT, EP_SQUARE_MASK, FULLMOVE_SHIFT,
    LOW_FLAGS_MASK, SIDE_BLACK,
};

/// The castling right forfeited when a rook leaves (or is captured on) this
/// square, if it is one of `color`'s starting corners.
fn corner_castle_bit(color: Color, sq: Square) -> Option<u32> {
    if sq.rank() != color.home_rank() {
        return None;
    }
    match sq.file() {
        0 => Some(castle_bit(color, false)),
        7 => Some(castle_bit(color, true)),
        _ => None,
    }
}

impl Move {
    /// Build a move from a source/destination pair, inferring capture,
    /// en-passant and castling metadata from `board` and snapshotting the
    /// board flags for later unmake.
    ///
    /// Returns `None` when the squares do not describe a playable move on
    /// this position: empty or opposing source square, destination held by
    /// the mover's own piece, or a pawn stepping onto the en-passant target
    /// with no opposing pawn to take. No legality check is performed beyond
    /// that; see [`Move::is_legal_on`].
    #[must_use]
    pub fn new_from_squares(
        from: Square,
        to: Square,
        promotion: Option<Piece>,
        board: &Board,
    ) -> Option<Move> {
        let mover = board.side_to_move();
        if board.color_on(from) != Some(mover) {
            return None;
        }
        if board.color_on(to) == Some(mover) {
            return None;
        }
        let kind = board.piece_on(from)?;

        let castle = kind == Piece::King
            && from.rank() == mover.home_rank()
            && to.rank() == from.rank()
            && from.file().abs_diff(to.file()) == 2;
        let captured = if let Some(victim) = board.piece_on(to) {
            Some((victim, to))
        } else if kind == Piece::Pawn
            && board.en_passant_target() == Some(to)
            && from.file() != to.file()
        {
            let victim_sq = Square::new(from.rank(), to.file());
            if board
                .pieces_of(mover.opponent(), Piece::Pawn)
                .contains(victim_sq)
            {
                Some((Piece::Pawn, victim_sq))
            } else {
                return None;
            }
        } else {
            None
        };

        Some(Move::pack(
            board.flags & LOW_FLAGS_MASK,
            from,
            to,
            promotion,
            captured,
            castle,
        ))
    }
}

impl Board {
    /// Apply a move to the board.
    ///
    /// The move must have been constructed from this exact position; the
    /// flag snapshot it carries is checked against the board's current
    /// flags, and a mismatch is a caller bug.
    pub fn make(&mut self, mv: Move) {
        assert_eq!(
            mv.prior_flags(),
            self.flags & LOW_FLAGS_MASK,
            "move {mv} was built for a different position"
        );

        let mover = self.side_to_move();
        let from = mv.from();
        let to = mv.to();

        let kind = if mv.is_castle() {
            debug_assert!(!mv.is_capture() && mv.promotion().is_none());
            debug_assert_eq!(from.rank(), mover.home_rank());
            self.remove_piece(from, mover, Piece::King);
            self.set_piece(to, mover, Piece::King);
            let rank = mover.home_rank();
            let (rook_from, rook_to) = if to.file() == 6 {
                (Square::new(rank, 7), Square::new(rank, 5))
            } else {
                (Square::new(rank, 0), Square::new(rank, 3))
            };
            self.remove_piece(rook_from, mover, Piece::Rook);
            self.set_piece(rook_to, mover, Piece::Rook);
            self.flags &= !(castle_bit(mover, true) | castle_bit(mover, false));
            Piece::King
        } else {
            let kind = self.piece_on(from).expect("move source square is empty");
            if kind == Piece::King {
                self.flags &= !(castle_bit(mover, true) | castle_bit(mover, false));
            } else if kind == Piece::Rook {
                if let Some(bit) = corner_castle_bit(mover, from) {
                    self.flags &= !bit;
                }
            }
            if let Some((victim, victim_sq)) = mv.captured() {
                let opponent = mover.opponent();
                self.remove_piece(victim_sq, opponent, victim);
                if victim == Piece::Rook {
                    if let Some(bit) = corner_castle_bit(opponent, victim_sq) {
                        self.flags &= !bit;
                    }
                }
            }
            self.remove_piece(from, mover, kind);
            self.set_piece(to, mover, mv.promotion().unwrap_or(kind));
            kind
        };

        self.flags &= !(EP_PRESENT | EP_SQUARE_MASK);
        if kind == Piece::Pawn && from.rank().abs_diff(to.rank()) == 2 {
            let skipped = Square::new((from.rank() + to.rank()) / 2, from.file());
            self.flags |= EP_PRESENT | skipped.as_index() as u32;
        }

        if mover == Color::Black {
            self.flags += 1 << FULLMOVE_SHIFT;
        }
        self.flags ^= SIDE_BLACK;

        self.assert_invariants();
    }

    /// Undo a move previously applied with [`Board::make`], restoring the
    /// position bit for bit.
    pub fn unmake(&mut self, mv: Move) {
        self.flags = (self.flags & !LOW_FLAGS_MASK) | mv.prior_flags();
        let mover = self.side_to_move();
        if mover == Color::Black {
            self.flags -= 1 << FULLMOVE_SHIFT;
        }

        let from = mv.from();
        let to = mv.to();

        if mv.is_castle() {
            self.remove_piece(to, mover, Piece::King);
            self.set_piece(from, mover, Piece::King);
            let rank = mover.home_rank();
            let (rook_from, rook_to) = if to.file() == 6 {
                (Square::new(rank, 7), Square::new(rank, 5))
            } else {
                (Square::new(rank, 0), Square::new(rank, 3))
            };
            self.remove_piece(rook_to, mover, Piece::Rook);
            self.set_piece(rook_from, mover, Piece::Rook);
        } else {
            let kind_at_to = self
                .piece_on(to)
                .expect("unmake: destination square is empty");
            self.remove_piece(to, mover, kind_at_to);
            let original = if mv.promotion().is_some() {
                Piece::Pawn
            } else {
                kind_at_to
            };
            self.set_piece(from, mover, original);
            if let Some((victim, victim_sq)) = mv.captured() {
                self.set_piece(victim_sq, mover.opponent(), victim);
            }
        }

        self.assert_invariants();
    }
}
