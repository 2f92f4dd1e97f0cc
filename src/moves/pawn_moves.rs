//! Pawn attack patterns.
//!
//! Attacks are computed set-wise by shifting the whole pawn bitboard one rank
//! forward and one file sideways, masking the destination file so captures
//! never wrap around the board edge.

use crate::game_state::bitboard::{Bitboard, NOT_FILE_A, NOT_FILE_H};
use crate::game_state::chess_types::Color;

/// Squares attacked by every pawn in `pawns` for the given side.
#[inline]
pub const fn pawn_attacks_mask(color: Color, pawns: Bitboard) -> Bitboard {
    match color {
        Color::White => ((pawns << 7) & NOT_FILE_H) | ((pawns << 9) & NOT_FILE_A),
        Color::Black => ((pawns >> 9) & NOT_FILE_H) | ((pawns >> 7) & NOT_FILE_A),
    }
}

/// Single-step pushes into empty squares.
#[inline]
pub const fn pawn_single_pushes(color: Color, pawns: Bitboard, empty: Bitboard) -> Bitboard {
    match color {
        Color::White => (pawns << 8) & empty,
        Color::Black => (pawns >> 8) & empty,
    }
}
