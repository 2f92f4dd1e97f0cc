//! Move ordering: PV move, MVV-LVA captures, killers, then history.

use std::cmp::Reverse;

use crate::game_state::chess_types::Color;
use crate::moves::move_descriptions::Move;
use crate::search::history_table::HistoryTable;
use crate::search::killer_table::KillerTable;
use crate::search::pv_table::PvTable;

pub const PV_MOVE_SCORE: i32 = 20_000;
pub const FIRST_KILLER_SCORE: i32 = 9_000;
pub const SECOND_KILLER_SCORE: i32 = 8_000;

/// `[attacker][victim]`: most valuable victim first, cheapest attacker breaks
/// ties. Every entry sits above the killer scores.
pub const MVV_LVA: [[i32; 6]; 6] = build_mvv_lva();

const fn build_mvv_lva() -> [[i32; 6]; 6] {
    let mut table = [[0; 6]; 6];
    let mut attacker = 0;
    while attacker < 6 {
        let mut victim = 0;
        while victim < 6 {
            table[attacker][victim] = 10_000 + 100 * (victim as i32 + 1) + (5 - attacker as i32);
            victim += 1;
        }
        attacker += 1;
    }
    table
}

/// Borrowed view of the heuristic tables for ordering moves at one node.
pub struct MoveOrderer<'a> {
    pub pv: &'a PvTable,
    pub killers: &'a KillerTable,
    pub history: &'a HistoryTable,
    pub side: Color,
    pub ply: usize,
}

impl MoveOrderer<'_> {
    pub fn score(&self, mv: Move) -> i32 {
        if self.pv.pv_move(self.ply) == Some(mv) {
            return PV_MOVE_SCORE;
        }
        if let Some(victim) = mv.captured_piece() {
            return MVV_LVA[mv.moved_piece().index()][victim.index()];
        }
        if self.killers.first(self.ply) == mv {
            FIRST_KILLER_SCORE
        } else if self.killers.second(self.ply) == mv {
            SECOND_KILLER_SCORE
        } else {
            self.history.get(self.side, mv)
        }
    }

    /// Best first. Equal scores keep generation order.
    pub fn order(&self, moves: &mut [Move]) {
        moves.sort_by_cached_key(|&mv| Reverse(self.score(mv)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_types::{Board, PieceKind};
    use crate::move_generation::move_generator::pseudo_legal_moves;
    use crate::moves::attack_tables::AttackTables;

    #[test]
    fn table_prefers_big_victims_then_small_attackers() {
        let pawn = PieceKind::Pawn.index();
        let queen = PieceKind::Queen.index();
        let king = PieceKind::King.index();
        assert_eq!(MVV_LVA[pawn][pawn], 10_105);
        assert_eq!(MVV_LVA[king][queen], 10_500);
        assert!(MVV_LVA[queen][queen] > MVV_LVA[pawn][PieceKind::Rook.index()]);
        assert!(MVV_LVA[pawn][queen] > MVV_LVA[queen][queen]);
        assert!(MVV_LVA.iter().flatten().all(|&s| s > FIRST_KILLER_SCORE && s < PV_MOVE_SCORE));
    }

    #[test]
    fn ordering_bands() {
        let board = Board::from_fen(
            AttackTables::shared(),
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        )
        .expect("valid fen");
        let mut moves = pseudo_legal_moves(&board);

        let quiet: Vec<Move> = moves.iter().copied().filter(|m| m.is_quiet()).collect();
        let (pv_move, killer, hist_move) = (quiet[0], quiet[1], quiet[2]);

        let mut pv = PvTable::new();
        pv.reset_ply(0);
        pv.set_single(0, pv_move);
        pv.begin_iteration();
        let mut killers = KillerTable::new();
        killers.push(0, killer);
        let mut history = HistoryTable::new();
        history.add(Color::White, hist_move, 5);

        let orderer = MoveOrderer {
            pv: &pv,
            killers: &killers,
            history: &history,
            side: Color::White,
            ply: 0,
        };
        orderer.order(&mut moves);

        assert_eq!(moves[0], pv_move);
        let first_quiet = 1 + moves[1..].iter().position(|m| !m.is_capture()).expect("quiet");
        assert!(first_quiet > 1);
        assert!(moves[1..first_quiet].iter().all(|m| m.is_capture()));
        assert_eq!(moves[first_quiet], killer);
        assert_eq!(moves[first_quiet + 1], hist_move);
        // Remaining quiets keep generation order.
        let rest: Vec<Move> = moves[first_quiet + 2..].to_vec();
        let expected: Vec<Move> = quiet[3..].to_vec();
        assert_eq!(rest, expected);
    }
}
