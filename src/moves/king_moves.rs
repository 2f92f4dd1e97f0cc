//! King attack patterns built from masked directional shifts.

use crate::game_state::bitboard::{east, north, south, west, Bitboard};

/// Squares attacked by every king in `kings`.
#[inline]
pub const fn king_attacks_mask(kings: Bitboard) -> Bitboard {
    let sideways = east(kings) | west(kings);
    let row = kings | sideways;
    sideways | north(row) | south(row)
}
