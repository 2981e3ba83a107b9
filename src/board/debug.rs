use super::{Bitboard, Board, Color, Piece, Square};

#[cfg(debug_assertions)]
impl Board {
    /// Debug helper to print the position as an ASCII diagram plus the raw
    /// bitboard values.
    pub fn debug_dump(&self) {
        println!("Side to move: {}", self.side_to_move());
        println!("Flags: {:#010x}", self.flags);
        if let Some(ep) = self.en_passant_target() {
            println!("EP target: {ep}");
        }

        println!("  +---+---+---+---+---+---+---+---+");
        for rank in (0..8).rev() {
            print!("{} |", rank + 1);
            for file in 0..8 {
                let sq = Square::new(rank, file);
                let ch = match (self.piece_on(sq), self.color_on(sq)) {
                    (Some(piece), Some(color)) => piece.to_fen_char(color),
                    _ => '.',
                };
                print!(" {ch} |");
            }
            println!("\n  +---+---+---+---+---+---+---+---+");
        }
        println!("    a   b   c   d   e   f   g   h");

        for color in [Color::White, Color::Black] {
            println!("{} occupancy: {:#018x}", color, self.players[color.index()].0);
        }
        for idx in 0..Piece::COUNT {
            let piece = Piece::from_index(idx);
            println!(
                "{}: {:#018x}",
                piece.to_char().to_ascii_uppercase(),
                self.pieces[idx].0
            );
        }
        println!("------------------------------------");
    }

    /// Print a single bitboard as a grid of bits.
    pub fn print_bitboard_grid(label: &str, bb: Bitboard) {
        println!("{} {:#018x}", label, bb.0);
        println!("  +---+---+---+---+---+---+---+---+");
        for rank in (0..8).rev() {
            print!("{} |", rank + 1);
            for file in 0..8 {
                let idx = rank * 8 + file;
                let ch = if (bb.0 >> idx) & 1 == 1 { '1' } else { '.' };
                print!(" {ch} |");
            }
            println!("\n  +---+---+---+---+---+---+---+---+");
        }
        println!("    a   b   c   d   e   f   g   h");
    }
}
