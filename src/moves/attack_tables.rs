//! Precomputed attack tables, built once and shared read-only.
//!
//! `AttackTables` is an explicit context object rather than process-wide
//! state: construct it once (it is a few hundred kilobytes and takes a few
//! milliseconds), wrap it in an `Arc`, and hand clones of that `Arc` to every
//! `Board`. Nothing in it is mutated after construction.

use std::sync::Arc;

use crate::game_state::bitboard::{occupancy_subset, Bitboard};
use crate::game_state::chess_types::{Color, Square};
use crate::moves::king_moves::king_attacks_mask;
use crate::moves::knight_moves::knight_attacks_mask;
use crate::moves::magic::{MagicEntry, Slider};
use crate::moves::pawn_moves::pawn_attacks_mask;

#[derive(Debug, Clone)]
pub struct AttackTables {
    pawn: [[Bitboard; 64]; 2],
    knight: [Bitboard; 64],
    king: [Bitboard; 64],
    bishop_magics: [MagicEntry; 64],
    rook_magics: [MagicEntry; 64],
    bishop_attacks: Vec<Bitboard>,
    rook_attacks: Vec<Bitboard>,
}

impl AttackTables {
    pub fn new() -> Self {
        let mut pawn = [[0u64; 64]; 2];
        let mut knight = [0u64; 64];
        let mut king = [0u64; 64];

        for square in Square::iter() {
            let bb = square.bitboard();
            for color in Color::ALL {
                pawn[color.index()][square.index()] = pawn_attacks_mask(color, bb);
            }
            knight[square.index()] = knight_attacks_mask(bb);
            king[square.index()] = king_attacks_mask(bb);
        }

        let (bishop_magics, bishop_attacks) = build_slider_table(Slider::Bishop);
        let (rook_magics, rook_attacks) = build_slider_table(Slider::Rook);

        log::trace!(
            "attack tables built: {} bishop slots, {} rook slots",
            bishop_attacks.len(),
            rook_attacks.len()
        );

        Self {
            pawn,
            knight,
            king,
            bishop_magics,
            rook_magics,
            bishop_attacks,
            rook_attacks,
        }
    }

    /// Convenience for the common case of one table set per process.
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Squares a pawn of `color` on `square` attacks.
    #[inline]
    pub fn pawn_attacks(&self, color: Color, square: Square) -> Bitboard {
        self.pawn[color.index()][square.index()]
    }

    #[inline]
    pub fn knight_attacks(&self, square: Square) -> Bitboard {
        self.knight[square.index()]
    }

    #[inline]
    pub fn king_attacks(&self, square: Square) -> Bitboard {
        self.king[square.index()]
    }

    #[inline]
    pub fn bishop_attacks(&self, square: Square, occupancy: Bitboard) -> Bitboard {
        let entry = &self.bishop_magics[square.index()];
        self.bishop_attacks[entry.offset + entry.index(occupancy)]
    }

    #[inline]
    pub fn rook_attacks(&self, square: Square, occupancy: Bitboard) -> Bitboard {
        let entry = &self.rook_magics[square.index()];
        self.rook_attacks[entry.offset + entry.index(occupancy)]
    }

    #[inline]
    pub fn queen_attacks(&self, square: Square, occupancy: Bitboard) -> Bitboard {
        self.bishop_attacks(square, occupancy) | self.rook_attacks(square, occupancy)
    }
}

impl Default for AttackTables {
    fn default() -> Self {
        Self::new()
    }
}

/// Fill one flat table holding every square's slice back to back.
fn build_slider_table(slider: Slider) -> ([MagicEntry; 64], Vec<Bitboard>) {
    let mut entries = [MagicEntry::default(); 64];
    let mut offset = 0usize;
    for square in Square::iter() {
        let entry = MagicEntry::new(slider, square, offset);
        offset += entry.table_len();
        entries[square.index()] = entry;
    }

    let mut table = vec![0u64; offset];
    for square in Square::iter() {
        let entry = entries[square.index()];
        for i in 0..entry.table_len() {
            let occupancy = occupancy_subset(i, entry.mask);
            table[entry.offset + entry.index(occupancy)] = slider.traced_attacks(square, occupancy);
        }
    }

    (entries, table)
}
