//! Process-wide attack tables for move generation.
//!
//! Leaper attacks (king, knight) and pawn pushes/captures are direct
//! lookups; sliding attacks (rook, bishop, queen = rook|bishop) go through
//! magic bitboards: the blocker subset of a square's relevant-occupancy mask
//! is hashed by a fixed multiplier into one contiguous attack table.
//!
//! The tables are built exactly once behind a one-shot latch, then shared
//! immutably by any number of readers. [`pregenerate_tables`] forces the
//! build eagerly; any lookup will also trigger it on first use.

mod magics;
mod tables;

use once_cell::sync::Lazy;

use magics::{BISHOP_INDEX_BITS, BISHOP_MAGICS, ROOK_INDEX_BITS, ROOK_MAGICS};

/// Total entries across all 128 (square, slider-piece) table regions.
const SLIDER_TABLE_LEN: usize = 107_648;

const ROOK_DIRECTIONS: [(isize, isize); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const BISHOP_DIRECTIONS: [(isize, isize); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

pub(crate) struct Tables {
    pub(crate) king: [u64; 64],
    pub(crate) knight: [u64; 64],
    pawn: Box<[[[[u64; 64]; 8]; 2]; 2]>,
    slider: Box<[u64]>,
    rook_offset: [usize; 64],
    rook_mask: [u64; 64],
    bishop_offset: [usize; 64],
    bishop_mask: [u64; 64],
}

static TABLES: Lazy<Tables> = Lazy::new(Tables::build);

/// Build the process-wide attack tables.
///
/// Idempotent: the first call (from anywhere, including the first board
/// lookup) builds the tables, later calls are no-ops.
pub fn pregenerate_tables() {
    Lazy::force(&TABLES);
}

#[inline]
pub(crate) fn tables() -> &'static Tables {
    &TABLES
}

#[inline]
fn magic_index(occ: u64, mask: u64, magic: u64, bits: u32) -> usize {
    (((occ & mask).wrapping_mul(magic)) >> (64 - bits)) as usize
}

impl Tables {
    fn build() -> Tables {
        let mut slider = vec![0u64; SLIDER_TABLE_LEN].into_boxed_slice();
        let mut rook_offset = [0usize; 64];
        let mut rook_mask = [0u64; 64];
        let mut bishop_offset = [0usize; 64];
        let mut bishop_mask = [0u64; 64];

        let mut next = 0usize;
        for sq in 0..64 {
            rook_mask[sq] = relevant_mask(sq, &ROOK_DIRECTIONS);
            debug_assert_eq!(rook_mask[sq].count_ones(), ROOK_INDEX_BITS[sq]);
            rook_offset[sq] = next;
            next = fill_region(
                &mut slider,
                next,
                sq,
                rook_mask[sq],
                ROOK_MAGICS[sq],
                ROOK_INDEX_BITS[sq],
                &ROOK_DIRECTIONS,
            );
        }
        for sq in 0..64 {
            bishop_mask[sq] = relevant_mask(sq, &BISHOP_DIRECTIONS);
            debug_assert_eq!(bishop_mask[sq].count_ones(), BISHOP_INDEX_BITS[sq]);
            bishop_offset[sq] = next;
            next = fill_region(
                &mut slider,
                next,
                sq,
                bishop_mask[sq],
                BISHOP_MAGICS[sq],
                BISHOP_INDEX_BITS[sq],
                &BISHOP_DIRECTIONS,
            );
        }
        assert_eq!(next, SLIDER_TABLE_LEN);

        #[cfg(feature = "logging")]
        log::debug!("attack tables built ({SLIDER_TABLE_LEN} slider entries)");

        Tables {
            king: tables::king_table(),
            knight: tables::knight_table(),
            pawn: tables::pawn_table(),
            slider,
            rook_offset,
            rook_mask,
            bishop_offset,
            bishop_mask,
        }
    }

    #[inline]
    pub(crate) fn rook_attacks(&self, sq: usize, occ: u64) -> u64 {
        let idx = magic_index(occ, self.rook_mask[sq], ROOK_MAGICS[sq], ROOK_INDEX_BITS[sq]);
        self.slider[self.rook_offset[sq] + idx]
    }

    #[inline]
    pub(crate) fn bishop_attacks(&self, sq: usize, occ: u64) -> u64 {
        let idx = magic_index(
            occ,
            self.bishop_mask[sq],
            BISHOP_MAGICS[sq],
            BISHOP_INDEX_BITS[sq],
        );
        self.slider[self.bishop_offset[sq] + idx]
    }

    #[inline]
    pub(crate) fn queen_attacks(&self, sq: usize, occ: u64) -> u64 {
        self.rook_attacks(sq, occ) | self.bishop_attacks(sq, occ)
    }

    /// Pushes and captures of a `color` pawn on `sq` under the given
    /// occupancy. Pass the pawn occupancy variant (with the en-passant
    /// target bit set) so en-passant captures fall out of the table.
    #[inline]
    pub(crate) fn pawn_moves(&self, color: usize, sq: usize, occ_pawns: u64) -> u64 {
        let (double_ahead, ahead_bits) = tables::pawn_occupancy_index(occ_pawns, sq, color);
        self.pawn[color][double_ahead][ahead_bits][sq]
    }

    /// The squares a `color` pawn on `sq` attacks (captures only, no
    /// pushes): the table entry for "everything ahead occupied".
    #[inline]
    pub(crate) fn pawn_captures(&self, color: usize, sq: usize) -> u64 {
        self.pawn[color][1][0b111][sq]
    }
}

/// Relevant-occupancy mask for a slider: the rays from `sq`, excluding the
/// final square of each ray (a blocker on the board edge cannot shorten the
/// attack set).
fn relevant_mask(sq: usize, directions: &[(isize, isize); 4]) -> u64 {
    let rank = (sq / 8) as isize;
    let file = (sq % 8) as isize;
    let mut mask = 0u64;
    for &(dr, df) in directions {
        let mut r = rank + dr;
        let mut f = file + df;
        while (0..8).contains(&(r + dr)) && (0..8).contains(&(f + df)) {
            mask |= 1u64 << (r * 8 + f);
            r += dr;
            f += df;
        }
    }
    mask
}

/// True attack set of a slider on `sq`: walk each ray until a blocker or the
/// board edge, including the blocker square itself (capture of an own piece
/// is filtered later against the mover's occupancy).
fn ray_attacks(sq: usize, occ: u64, directions: &[(isize, isize); 4]) -> u64 {
    let rank = (sq / 8) as isize;
    let file = (sq % 8) as isize;
    let mut attacks = 0u64;
    for &(dr, df) in directions {
        let mut r = rank + dr;
        let mut f = file + df;
        while (0..8).contains(&r) && (0..8).contains(&f) {
            let bit = 1u64 << (r * 8 + f);
            attacks |= bit;
            if occ & bit != 0 {
                break;
            }
            r += dr;
            f += df;
        }
    }
    attacks
}

/// Fill one square's table region by enumerating every blocker subset of its
/// mask (carry-rippler). A slot written twice with different attack sets
/// means the magic factor is not collision-free, which is a fatal data
/// error.
fn fill_region(
    slider: &mut [u64],
    base: usize,
    sq: usize,
    mask: u64,
    magic: u64,
    bits: u32,
    directions: &[(isize, isize); 4],
) -> usize {
    let mut subset = 0u64;
    loop {
        let attacks = ray_attacks(sq, subset, directions);
        let idx = magic_index(subset, mask, magic, bits);
        let slot = &mut slider[base + idx];
        assert!(
            *slot == 0 || *slot == attacks,
            "magic factor collision at square {sq}"
        );
        *slot = attacks;
        subset = subset.wrapping_sub(mask) & mask;
        if subset == 0 {
            break;
        }
    }
    base + (1usize << bits)
}
