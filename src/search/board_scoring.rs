//! Static evaluation seam used by the search.
//!
//! Search code only sees the `BoardScorer` trait, so any evaluation can be
//! plugged in without touching the search.

use crate::game_state::chess_types::{Board, Color, PieceKind};

/// Score of being mated at the root. A side mated at ply `n` scores
/// `-MATE_SCORE + n`.
pub const MATE_SCORE: i32 = 30_000;
/// Bound of the full search window; no reachable score exceeds it.
pub const INFINITY: i32 = 32_000;
/// Any score at least this far from zero encodes a forced mate.
pub const MATE_THRESHOLD: i32 = MATE_SCORE - 1_000;

#[inline]
pub fn is_mate_score(score: i32) -> bool {
    score.abs() >= MATE_THRESHOLD
}

pub trait BoardScorer: Send + Sync {
    /// Score from the perspective of the side to move.
    fn score(&self, board: &Board) -> i32;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialScorer;

impl MaterialScorer {
    #[inline]
    pub const fn piece_value(piece: PieceKind) -> i32 {
        match piece {
            PieceKind::Pawn => 100,
            PieceKind::Knight => 320,
            PieceKind::Bishop => 330,
            PieceKind::Rook => 500,
            PieceKind::Queen => 900,
            PieceKind::King => 0,
        }
    }

    #[inline]
    fn material_balance_white_minus_black(board: &Board) -> i32 {
        PieceKind::ALL
            .iter()
            .map(|&piece| {
                let white = board.pieces(Color::White, piece).count_ones() as i32;
                let black = board.pieces(Color::Black, piece).count_ones() as i32;
                (white - black) * Self::piece_value(piece)
            })
            .sum()
    }
}

impl BoardScorer for MaterialScorer {
    fn score(&self, board: &Board) -> i32 {
        let white_minus_black = Self::material_balance_white_minus_black(board);
        match board.side_to_move() {
            Color::White => white_minus_black,
            Color::Black => -white_minus_black,
        }
    }
}
