//! Move list production for the side to move.
//!
//! Pseudo-legal generation ignores whether the mover's king is left in check;
//! legality is decided empirically by making each candidate, testing the
//! king, and unmaking it.

use crate::game_state::chess_types::*;
use crate::move_generation::legal_moves_castling::generate_castling_moves;
use crate::move_generation::legal_moves_pawn::{generate_pawn_captures, generate_pawn_pushes};
use crate::move_generation::legal_moves_piece::{generate_piece_moves, GenType};
use crate::moves::move_descriptions::Move;

pub type MoveList = Vec<Move>;

pub const MOVE_LIST_CAPACITY: usize = 256;

/// Every pseudo-legal move: pawn captures and pushes, piece captures, piece
/// quiets, then castling.
pub fn pseudo_legal_moves(board: &Board) -> MoveList {
    let mut out = Vec::with_capacity(MOVE_LIST_CAPACITY);
    generate_pawn_captures(board, &mut out);
    generate_pawn_pushes(board, &mut out);
    generate_piece_moves(board, GenType::Captures, &mut out);
    generate_piece_moves(board, GenType::Quiets, &mut out);
    generate_castling_moves(board, &mut out);
    out
}

/// Pseudo-legal captures only (capture-promotions and en passant included).
/// Quiet promotions are left out.
pub fn pseudo_legal_captures(board: &Board) -> MoveList {
    let mut out = Vec::with_capacity(MOVE_LIST_CAPACITY / 4);
    generate_pawn_captures(board, &mut out);
    generate_piece_moves(board, GenType::Captures, &mut out);
    out
}

/// After `make_move`, whether the side that just moved kept its king safe.
#[inline]
pub fn mover_king_is_safe(board: &Board) -> bool {
    let mover = board.side_to_move().opposite();
    board
        .king_square(mover)
        .map_or(true, |king| !board.is_square_attacked(king, board.side_to_move()))
}

/// Make `mv`, check king safety, unmake. The board is left unchanged.
#[inline]
pub fn is_legal(board: &mut Board, mv: Move) -> bool {
    let backup = board.make_move(mv);
    let legal = mover_king_is_safe(board);
    board.unmake_move(mv, backup);
    legal
}

pub fn legal_moves(board: &mut Board) -> MoveList {
    let mut moves = pseudo_legal_moves(board);
    moves.retain(|&mv| is_legal(board, mv));
    moves
}

/// Stops at the first legal move found.
pub fn has_legal_moves(board: &mut Board) -> bool {
    pseudo_legal_moves(board)
        .into_iter()
        .any(|mv| is_legal(board, mv))
}

pub fn is_checkmate(board: &mut Board) -> bool {
    board.is_in_check() && !has_legal_moves(board)
}

pub fn is_stalemate(board: &mut Board) -> bool {
    !board.is_in_check() && !has_legal_moves(board)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_rules::KIWIPETE_FEN;
    use crate::moves::attack_tables::AttackTables;

    fn board(fen: &str) -> Board {
        Board::from_fen(AttackTables::shared(), fen).expect("FEN should parse")
    }

    #[test]
    fn start_position_has_twenty_moves() {
        let mut b = Board::new(AttackTables::shared());
        let before = b.clone();
        assert_eq!(pseudo_legal_moves(&b).len(), 20);
        assert_eq!(legal_moves(&mut b).len(), 20);
        assert_eq!(b, before);
    }

    #[test]
    fn kiwipete_move_mix() {
        let mut b = board(KIWIPETE_FEN);
        let moves = legal_moves(&mut b);
        assert_eq!(moves.len(), 48);
        assert_eq!(moves.iter().filter(|mv| mv.is_capture()).count(), 8);
        assert_eq!(moves.iter().filter(|mv| mv.is_castle()).count(), 2);

        let captures = pseudo_legal_captures(&b);
        assert!(captures.iter().all(|mv| mv.is_capture()));
        assert_eq!(captures.len(), 8);
    }

    #[test]
    fn pinned_piece_moves_are_filtered() {
        // Knight on e2 is pinned by the rook on e8.
        let mut b = board("4r1k1/8/8/8/8/8/4N3/4K3 w - - 0 1");
        let moves = legal_moves(&mut b);
        assert!(moves.iter().all(|mv| mv.moved_piece() == PieceKind::King));
        assert!(!pseudo_legal_moves(&b).iter().all(|mv| mv.moved_piece() == PieceKind::King));
    }

    #[test]
    fn checkmate_and_stalemate_detection() {
        // Back-rank mate.
        let mut mated = board("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1");
        assert!(is_checkmate(&mut mated));
        assert!(!is_stalemate(&mut mated));
        assert!(!has_legal_moves(&mut mated));

        let mut stalemated = board("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1");
        assert!(is_stalemate(&mut stalemated));
        assert!(!is_checkmate(&mut stalemated));

        let mut open = Board::new(AttackTables::shared());
        assert!(has_legal_moves(&mut open));
        assert!(!is_checkmate(&mut open) && !is_stalemate(&mut open));
    }

    #[test]
    fn capture_promotions_included_in_capture_list() {
        let b = board("1r2k3/P7/8/8/8/8/8/4K3 w - - 0 1");
        let captures = pseudo_legal_captures(&b);
        assert_eq!(captures.len(), 4);
        assert!(captures.iter().all(|mv| mv.is_promotion() && mv.is_capture()));
    }
}
