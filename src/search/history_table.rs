//! History heuristic weights for quiet moves.

use crate::game_state::chess_types::Color;
use crate::moves::move_descriptions::Move;

/// History heuristic: `[side][moved piece][destination]` weights, bumped by
/// the remaining depth whenever a quiet move raises alpha.
#[derive(Debug, Clone)]
pub struct HistoryTable {
    scores: [[[i32; 64]; 6]; 2],
}

impl Default for HistoryTable {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryTable {
    /// Keeps history below the killer and capture ordering bands.
    pub const MAX_SCORE: i32 = 7_999;

    pub fn new() -> Self {
        Self {
            scores: [[[0; 64]; 6]; 2],
        }
    }

    #[inline]
    pub fn get(&self, side: Color, mv: Move) -> i32 {
        self.scores[side.index()][mv.moved_piece().index()][mv.to().index()]
    }

    #[inline]
    pub fn add(&mut self, side: Color, mv: Move, depth: i32) {
        let entry = &mut self.scores[side.index()][mv.moved_piece().index()][mv.to().index()];
        *entry = (*entry + depth.max(0)).min(Self::MAX_SCORE);
    }

    pub fn clear(&mut self) {
        self.scores = [[[0; 64]; 6]; 2];
        log::trace!("history table cleared");
    }
}

#[cfg(test)]
mod tests {
    use super::HistoryTable;
    use crate::game_state::chess_types::{Color, PieceKind, Square};
    use crate::moves::move_descriptions::Move;

    #[test]
    fn accumulates_per_side_piece_and_target() {
        let mv = Move::new(Square::G1, Square::F1, PieceKind::Rook, None, None, 0);
        let mut history = HistoryTable::new();
        history.add(Color::White, mv, 3);
        history.add(Color::White, mv, 5);
        assert_eq!(history.get(Color::White, mv), 8);
        assert_eq!(history.get(Color::Black, mv), 0);

        let other_piece = Move::new(Square::G1, Square::F1, PieceKind::King, None, None, 0);
        assert_eq!(history.get(Color::White, other_piece), 0);

        history.add(Color::White, mv, 100_000);
        assert_eq!(history.get(Color::White, mv), HistoryTable::MAX_SCORE);

        history.clear();
        assert_eq!(history.get(Color::White, mv), 0);
    }
}
