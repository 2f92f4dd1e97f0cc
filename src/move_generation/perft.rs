//! Legal move-tree node counting.
//!
//! Every level makes and unmakes in place; no bulk counting at the horizon so
//! that each leaf also exercises `make_move`.

use crate::game_state::chess_types::*;
use crate::move_generation::move_generator::{has_legal_moves, legal_moves};
use crate::moves::move_descriptions::Move;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: u64,
    pub captures: u64,
    pub en_passant: u64,
    pub castles: u64,
    pub promotions: u64,
    pub checks: u64,
    pub checkmates: u64,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
        self.checkmates += rhs.checkmates;
    }
}

/// Number of leaf positions `depth` plies below `board`.
pub fn perft(board: &mut Board, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = legal_moves(board);
    if depth == 1 {
        return moves.len() as u64;
    }

    let mut nodes = 0;
    for mv in moves {
        let backup = board.make_move(mv);
        nodes += perft(board, depth - 1);
        board.unmake_move(mv, backup);
    }
    nodes
}

/// Per-root-move node counts, in generation order.
pub fn perft_divide(board: &mut Board, depth: u32) -> Vec<(Move, u64)> {
    if depth == 0 {
        return Vec::new();
    }

    legal_moves(board)
        .into_iter()
        .map(|mv| {
            let backup = board.make_move(mv);
            let nodes = perft(board, depth - 1);
            board.unmake_move(mv, backup);
            (mv, nodes)
        })
        .collect()
}

/// Leaf counts broken down by the kind of the last move played.
pub fn perft_counts(board: &mut Board, depth: u32) -> PerftCounts {
    if depth == 0 {
        return PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        };
    }

    let mut total = PerftCounts::default();
    for mv in legal_moves(board) {
        let backup = board.make_move(mv);
        if depth == 1 {
            total.merge(leaf_counts(board, mv));
        } else {
            total.merge(perft_counts(board, depth - 1));
        }
        board.unmake_move(mv, backup);
    }
    total
}

fn leaf_counts(board: &mut Board, mv: Move) -> PerftCounts {
    let gives_check = board.is_in_check();
    PerftCounts {
        nodes: 1,
        captures: u64::from(mv.is_capture()),
        en_passant: u64::from(mv.is_en_passant()),
        castles: u64::from(mv.is_castle()),
        promotions: u64::from(mv.is_promotion()),
        checks: u64::from(gives_check),
        checkmates: u64::from(gives_check && !has_legal_moves(board)),
    }
}
