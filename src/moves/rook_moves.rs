//! Rook ray tracing, the orthogonal counterpart of `bishop_moves`.

use crate::game_state::bitboard::Bitboard;
use crate::game_state::chess_types::Square;
use crate::moves::bishop_moves::{relevant_ray, trace_ray};

const ROOK_DIRECTIONS: [(i32, i32); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

pub fn rook_attacks_traced(square: Square, occupancy: Bitboard) -> Bitboard {
    ROOK_DIRECTIONS
        .iter()
        .fold(0u64, |acc, &(df, dr)| acc | trace_ray(square, df, dr, occupancy))
}

pub fn rook_relevant_mask(square: Square) -> Bitboard {
    ROOK_DIRECTIONS
        .iter()
        .fold(0u64, |acc, &(df, dr)| acc | relevant_ray(square, df, dr))
}

#[cfg(test)]
mod tests {
    use super::{rook_attacks_traced, rook_relevant_mask};
    use crate::game_state::chess_types::Square;

    #[test]
    fn empty_board_rook_sees_fourteen_squares() {
        for square in Square::iter() {
            assert_eq!(rook_attacks_traced(square, 0).count_ones(), 14);
        }
    }

    #[test]
    fn rook_blocker_stops_ray() {
        let a1 = Square::A1;
        let blocker_on_a4 = 1u64 << 24;
        let attacks = rook_attacks_traced(a1, blocker_on_a4);
        assert_ne!(attacks & blocker_on_a4, 0);
        assert_eq!(attacks & (1u64 << 32), 0);
        assert_ne!(attacks & (1u64 << 7), 0);
    }

    #[test]
    fn relevant_masks_match_known_bit_counts() {
        assert_eq!(rook_relevant_mask(Square::A1).count_ones(), 12);
        assert_eq!(rook_relevant_mask(Square::B1).count_ones(), 11);
        assert_eq!(rook_relevant_mask(Square::new(27).expect("d4")).count_ones(), 10);
    }
}
