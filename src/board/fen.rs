use std::str::FromStr;

use super::error::{FenError, MoveParseError};
use super::{
    Board, Color, Move, Piece, Square, CASTLE_BLACK_K, CASTLE_BLACK_Q, CASTLE_WHITE_K,
    CASTLE_WHITE_Q, EP_PRESENT, FULLMOVE_SHIFT, LOW_FLAGS_MASK, SIDE_BLACK,
};

impl Board {
    /// Parse a board position from FEN notation.
    ///
    /// Accepts the six standard fields; the half-move clock and full-move
    /// number may be omitted. The half-move clock is parsed and discarded.
    /// Returns an error if the string violates the FEN grammar or the
    /// resulting position violates the board invariants (king counts,
    /// en-passant target placement).
    pub fn try_from_fen(fen: &str) -> Result<Self, FenError> {
        let mut board = Board::empty();
        let parts: Vec<&str> = fen.split_whitespace().collect();

        if parts.len() < 4 {
            return Err(FenError::TooFewFields { found: parts.len() });
        }

        // Piece placement, ranks 8 down to 1
        let ranks: Vec<&str> = parts[0].split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::WrongRankCount { ranks: ranks.len() });
        }
        for (rank_idx, rank_str) in ranks.iter().enumerate() {
            let rank = 7 - rank_idx;
            let mut file = 0;
            for c in rank_str.chars() {
                if let Some(run) = c.to_digit(10) {
                    file += run as usize;
                } else {
                    let color = if c.is_uppercase() {
                        Color::White
                    } else {
                        Color::Black
                    };
                    let piece = Piece::from_char(c).ok_or(FenError::InvalidPiece { char: c })?;
                    if file >= 8 {
                        return Err(FenError::TooManyFiles { rank });
                    }
                    board.set_piece(Square::new(rank, file), color, piece);
                    file += 1;
                }
            }
            if file > 8 {
                return Err(FenError::TooManyFiles { rank });
            }
        }

        // Side to move
        match parts[1] {
            "w" => {}
            "b" => board.flags |= SIDE_BLACK,
            other => {
                return Err(FenError::InvalidSideToMove {
                    found: other.to_string(),
                })
            }
        }

        // Castling rights
        for c in parts[2].chars() {
            match c {
                'K' => board.flags |= CASTLE_WHITE_K,
                'Q' => board.flags |= CASTLE_WHITE_Q,
                'k' => board.flags |= CASTLE_BLACK_K,
                'q' => board.flags |= CASTLE_BLACK_Q,
                '-' => {}
                _ => return Err(FenError::InvalidCastling { char: c }),
            }
        }

        // En passant target
        if parts[3] != "-" {
            let sq: Square = parts[3].parse().map_err(|_| FenError::InvalidEnPassant {
                found: parts[3].to_string(),
            })?;
            let expected_rank = match board.side_to_move() {
                Color::White => 5,
                Color::Black => 2,
            };
            if sq.rank() != expected_rank || !board.is_empty_square(sq) {
                return Err(FenError::InvalidEnPassant {
                    found: parts[3].to_string(),
                });
            }
            board.flags |= EP_PRESENT | sq.as_index() as u32;
        }

        // Half-move clock (field 5) is parsed and discarded. Full-move
        // number (field 6) defaults to 1.
        let full_moves = parts
            .get(5)
            .and_then(|s| s.parse::<u32>().ok())
            .unwrap_or(1)
            .min(0xFFFF);
        board.flags = (board.flags & LOW_FLAGS_MASK) | (full_moves << FULLMOVE_SHIFT);

        for color in [Color::White, Color::Black] {
            let kings = board.pieces_of(color, Piece::King).popcount();
            if kings != 1 {
                return Err(FenError::WrongKingCount {
                    color: if color == Color::White { 'w' } else { 'b' },
                    count: kings,
                });
            }
        }

        Ok(board)
    }

    /// Parse a board position from FEN notation.
    ///
    /// # Panics
    /// Panics if the FEN string is invalid. Use `try_from_fen` for fallible
    /// parsing.
    #[must_use]
    pub fn from_fen(fen: &str) -> Self {
        Self::try_from_fen(fen).expect("Invalid FEN string")
    }

    /// Convert the board position to FEN notation.
    ///
    /// Castling rights are emitted in `KQkq` order and the half-move clock,
    /// which the board does not track, as `0`.
    #[must_use]
    pub fn to_fen(&self) -> String {
        let mut rows: Vec<String> = Vec::new();
        for rank in (0..8).rev() {
            let mut row = String::new();
            let mut empty = 0;
            for file in 0..8 {
                let sq = Square::new(rank, file);
                if let Some(piece) = self.piece_on(sq) {
                    let color = self.color_on(sq).expect("occupied square has a color");
                    if empty > 0 {
                        row.push_str(&empty.to_string());
                        empty = 0;
                    }
                    row.push(piece.to_fen_char(color));
                } else {
                    empty += 1;
                }
            }
            if empty > 0 {
                row.push_str(&empty.to_string());
            }
            rows.push(row);
        }

        let active = if self.side_to_move() == Color::White {
            "w"
        } else {
            "b"
        };
        let mut castling = String::new();
        if self.can_castle(Color::White, true) {
            castling.push('K');
        }
        if self.can_castle(Color::White, false) {
            castling.push('Q');
        }
        if self.can_castle(Color::Black, true) {
            castling.push('k');
        }
        if self.can_castle(Color::Black, false) {
            castling.push('q');
        }
        if castling.is_empty() {
            castling.push('-');
        }
        let ep = self
            .en_passant_target()
            .map_or_else(|| "-".to_string(), |sq| sq.to_string());

        format!(
            "{} {} {} {} 0 {}",
            rows.join("/"),
            active,
            castling,
            ep,
            self.full_turn_number()
        )
    }

    /// Parse a move in pure algebraic notation (e.g. `e2e4`, `e7e8q`) and
    /// synthesize its metadata from this position.
    ///
    /// Uppercase file letters are accepted; promotion letters must be
    /// lowercase. The result is a playable pseudo-move; it has not been
    /// checked for leaving the mover's king in check.
    ///
    /// # Example
    /// ```
    /// use chess_movegen::board::Board;
    ///
    /// let board = Board::new();
    /// let mv = board.parse_move("e2e4").unwrap();
    /// assert_eq!(mv.to_string(), "e2e4");
    /// ```
    pub fn parse_move(&self, s: &str) -> Result<Move, MoveParseError> {
        if s.len() < 4 || s.len() > 5 {
            return Err(MoveParseError::InvalidLength { len: s.len() });
        }
        if !s.is_ascii() {
            return Err(MoveParseError::InvalidSquare {
                notation: s.to_string(),
            });
        }

        let from: Square = s[0..2].parse().map_err(|_| MoveParseError::InvalidSquare {
            notation: s.to_string(),
        })?;
        let to: Square = s[2..4].parse().map_err(|_| MoveParseError::InvalidSquare {
            notation: s.to_string(),
        })?;

        let promotion = match s.as_bytes().get(4) {
            None => None,
            Some(b'n') => Some(Piece::Knight),
            Some(b'b') => Some(Piece::Bishop),
            Some(b'r') => Some(Piece::Rook),
            Some(b'q') => Some(Piece::Queen),
            Some(&c) => {
                return Err(MoveParseError::InvalidPromotion { char: c as char });
            }
        };

        Move::new_from_squares(from, to, promotion, self).ok_or(MoveParseError::Unplayable {
            notation: s.to_string(),
        })
    }

    /// Parse a move string, verify it is legal here, and make it.
    pub fn make_move_str(&mut self, s: &str) -> Result<Move, MoveParseError> {
        let mv = self.parse_move(s)?;
        if !mv.is_legal_on(self) {
            return Err(MoveParseError::IllegalMove {
                notation: s.to_string(),
            });
        }
        self.make(mv);
        Ok(mv)
    }
}

impl FromStr for Board {
    type Err = FenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Board::try_from_fen(s)
    }
}
