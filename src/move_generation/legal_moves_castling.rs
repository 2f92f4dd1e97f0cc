//! Castling move generation.

use crate::game_state::bitboard::is_set;
use crate::game_state::chess_rules::king_home_square;
use crate::game_state::chess_types::*;
use crate::moves::move_descriptions::{Move, FLAG_CASTLING};

/// Castling moves, kingside first.
///
/// A side may castle when the right is still held, every square between king
/// and rook is empty, and the king's start, transit and landing squares are
/// not attacked. Castling out of check is therefore never generated.
pub fn generate_castling_moves(board: &Board, out: &mut Vec<Move>) {
    let side = board.side_to_move();
    let enemy = side.opposite();
    let king_from = king_home_square(side);

    if board.piece_at(king_from) != Some((side, PieceKind::King)) {
        return;
    }
    if board.is_square_attacked(king_from, enemy) {
        return;
    }

    let rights = board.castling_rights();
    let occupancy = board.occupancy_all();
    let square = |delta: i8| king_from.offset(delta);

    if rights.contains(CastlingRights::kingside(side)) {
        if let (Some(f), Some(g)) = (square(1), square(2)) {
            let path_clear = !is_set(occupancy, f) && !is_set(occupancy, g);
            if path_clear && !board.is_square_attacked(f, enemy) && !board.is_square_attacked(g, enemy) {
                out.push(Move::new(king_from, g, PieceKind::King, None, None, FLAG_CASTLING));
            }
        }
    }

    if rights.contains(CastlingRights::queenside(side)) {
        if let (Some(d), Some(c), Some(b)) = (square(-1), square(-2), square(-3)) {
            let path_clear =
                !is_set(occupancy, d) && !is_set(occupancy, c) && !is_set(occupancy, b);
            if path_clear && !board.is_square_attacked(d, enemy) && !board.is_square_attacked(c, enemy) {
                out.push(Move::new(king_from, c, PieceKind::King, None, None, FLAG_CASTLING));
            }
        }
    }
}
