//! Knight attack patterns built from masked directional shifts.

use crate::game_state::bitboard::{Bitboard, NOT_FILE_A, NOT_FILE_AB, NOT_FILE_GH, NOT_FILE_H};

/// Squares attacked by every knight in `knights`.
#[inline]
pub const fn knight_attacks_mask(knights: Bitboard) -> Bitboard {
    let one_west = (knights >> 1) & NOT_FILE_H;
    let one_east = (knights << 1) & NOT_FILE_A;
    let one_file = one_west | one_east;

    let two_west = (knights >> 2) & NOT_FILE_GH;
    let two_east = (knights << 2) & NOT_FILE_AB;
    let two_files = two_west | two_east;

    (one_file << 16) | (one_file >> 16) | (two_files << 8) | (two_files >> 8)
}
