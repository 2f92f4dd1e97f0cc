//! Bishop ray tracing.
//!
//! These loops are the slow reference used to fill the magic attack tables at
//! startup and to cross-check them in tests. Search-time lookups go through
//! `AttackTables` instead.

use crate::game_state::bitboard::Bitboard;
use crate::game_state::chess_types::Square;

const BISHOP_DIRECTIONS: [(i32, i32); 4] = [(1, 1), (-1, 1), (1, -1), (-1, -1)];

/// Attack set of a bishop on `square`, each ray stopping on (and including)
/// the first occupied square.
pub fn bishop_attacks_traced(square: Square, occupancy: Bitboard) -> Bitboard {
    BISHOP_DIRECTIONS
        .iter()
        .fold(0u64, |acc, &(df, dr)| acc | trace_ray(square, df, dr, occupancy))
}

/// Squares whose occupancy can change a bishop's attack set: every ray square
/// except the last one before the board edge.
pub fn bishop_relevant_mask(square: Square) -> Bitboard {
    BISHOP_DIRECTIONS
        .iter()
        .fold(0u64, |acc, &(df, dr)| acc | relevant_ray(square, df, dr))
}

pub(crate) fn trace_ray(square: Square, file_step: i32, rank_step: i32, occupancy: Bitboard) -> Bitboard {
    let mut file = square.file() as i32 + file_step;
    let mut rank = square.rank() as i32 + rank_step;
    let mut attacks = 0u64;

    while (0..8).contains(&file) && (0..8).contains(&rank) {
        let bit = 1u64 << (rank * 8 + file);
        attacks |= bit;

        if occupancy & bit != 0 {
            break;
        }

        file += file_step;
        rank += rank_step;
    }

    attacks
}

pub(crate) fn relevant_ray(square: Square, file_step: i32, rank_step: i32) -> Bitboard {
    let mut file = square.file() as i32 + file_step;
    let mut rank = square.rank() as i32 + rank_step;
    let mut mask = 0u64;

    // The next step must still be on the board for this square to matter.
    while (0..8).contains(&(file + file_step)) && (0..8).contains(&(rank + rank_step)) {
        mask |= 1u64 << (rank * 8 + file);
        file += file_step;
        rank += rank_step;
    }

    mask
}

#[cfg(test)]
mod tests {
    use super::{bishop_attacks_traced, bishop_relevant_mask};
    use crate::game_state::chess_types::Square;

    fn sq(index: u8) -> Square {
        Square::new(index).expect("valid square")
    }

    #[test]
    fn empty_board_bishop_on_d4_sees_thirteen_squares() {
        assert_eq!(bishop_attacks_traced(sq(27), 0).count_ones(), 13);
    }

    #[test]
    fn bishop_blocker_stops_ray() {
        let c1 = sq(2);
        let blocker_on_e3 = 1u64 << 20;
        let attacks = bishop_attacks_traced(c1, blocker_on_e3);

        assert_ne!(attacks & (1u64 << 20), 0);
        assert_eq!(attacks & (1u64 << 29), 0);
    }

    #[test]
    fn relevant_masks_match_known_bit_counts() {
        assert_eq!(bishop_relevant_mask(sq(0)).count_ones(), 6);
        assert_eq!(bishop_relevant_mask(sq(27)).count_ones(), 9);
        assert_eq!(bishop_relevant_mask(sq(1)).count_ones(), 5);
    }
}
