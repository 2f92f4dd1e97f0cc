//! Pawn move generation.
//!
//! Emission order: capture-promotions, plain captures, en passant, then
//! push-promotions, double pushes and single pushes. Each promotion square
//! yields four moves in queen, knight, rook, bishop order.

use crate::game_state::bitboard::{squares, Bitboard, RANK_1, RANK_2, RANK_4, RANK_5, RANK_7, RANK_8};
use crate::game_state::chess_types::*;
use crate::moves::move_descriptions::{Move, FLAG_DOUBLE_PAWN_PUSH, FLAG_EN_PASSANT};
use crate::moves::pawn_moves::pawn_single_pushes;

/// Pawn captures of every kind, promotions and en passant included.
pub fn generate_pawn_captures(board: &Board, out: &mut Vec<Move>) {
    let side = board.side_to_move();
    let tables = board.tables();
    let pawns = board.pieces(side, PieceKind::Pawn);
    let enemy_occ = board.occupancy(side.opposite());
    let pre_promotion = pre_promotion_rank(side);

    for from in squares(pawns & pre_promotion) {
        for to in squares(tables.pawn_attacks(side, from) & enemy_occ) {
            let captured = board.piece_at(to).map(|(_, piece)| piece);
            push_promotions(out, from, to, captured);
        }
    }

    for from in squares(pawns & !pre_promotion) {
        for to in squares(tables.pawn_attacks(side, from) & enemy_occ) {
            let captured = board.piece_at(to).map(|(_, piece)| piece);
            out.push(Move::new(from, to, PieceKind::Pawn, captured, None, 0));
        }
    }

    if let Some(ep) = board.en_passant_square() {
        // Our pawns that attack the target are exactly those a pawn of the
        // other color on the target would attack.
        let capturers = tables.pawn_attacks(side.opposite(), ep) & pawns;
        for from in squares(capturers) {
            out.push(Move::new(
                from,
                ep,
                PieceKind::Pawn,
                Some(PieceKind::Pawn),
                None,
                FLAG_EN_PASSANT,
            ));
        }
    }
}

/// Non-capturing pawn moves: push-promotions, double pushes, single pushes.
pub fn generate_pawn_pushes(board: &Board, out: &mut Vec<Move>) {
    let side = board.side_to_move();
    let pawns = board.pieces(side, PieceKind::Pawn);
    let empty = !board.occupancy_all();
    let back = push_back_offset(side);

    let single = pawn_single_pushes(side, pawns, empty);
    let last_ranks = RANK_1 | RANK_8;

    for to in squares(single & last_ranks) {
        if let Some(from) = to.offset(back) {
            push_promotions(out, from, to, None);
        }
    }

    let double = pawn_single_pushes(side, single, empty) & double_push_rank(side);
    for to in squares(double) {
        if let Some(from) = to.offset(2 * back) {
            out.push(Move::new(from, to, PieceKind::Pawn, None, None, FLAG_DOUBLE_PAWN_PUSH));
        }
    }

    for to in squares(single & !last_ranks) {
        if let Some(from) = to.offset(back) {
            out.push(Move::new(from, to, PieceKind::Pawn, None, None, 0));
        }
    }
}

fn push_promotions(out: &mut Vec<Move>, from: Square, to: Square, captured: Option<PieceKind>) {
    for promo in PieceKind::PROMOTIONS {
        out.push(Move::new(from, to, PieceKind::Pawn, captured, Some(promo), 0));
    }
}

#[inline]
const fn pre_promotion_rank(color: Color) -> Bitboard {
    match color {
        Color::White => RANK_7,
        Color::Black => RANK_2,
    }
}

#[inline]
const fn double_push_rank(color: Color) -> Bitboard {
    match color {
        Color::White => RANK_4,
        Color::Black => RANK_5,
    }
}

/// Index step from a push destination back to its source.
#[inline]
const fn push_back_offset(color: Color) -> i8 {
    match color {
        Color::White => -8,
        Color::Black => 8,
    }
}

#[cfg(test)]
mod tests {
    use super::{generate_pawn_captures, generate_pawn_pushes};
    use crate::game_state::chess_types::*;
    use crate::moves::attack_tables::AttackTables;
    use crate::moves::move_descriptions::Move;

    fn board(fen: &str) -> Board {
        Board::from_fen(AttackTables::shared(), fen).expect("FEN should parse")
    }

    fn texts(moves: &[Move]) -> Vec<String> {
        moves.iter().map(|mv| mv.to_string()).collect()
    }

    #[test]
    fn start_position_pushes() {
        let b = Board::new(AttackTables::shared());
        let mut out = Vec::new();
        generate_pawn_pushes(&b, &mut out);
        assert_eq!(out.len(), 16);
        assert_eq!(out.iter().filter(|mv| mv.is_double_push()).count(), 8);
        // Double pushes come before single pushes.
        assert!(out[..8].iter().all(|mv| mv.is_double_push()));

        let mut captures = Vec::new();
        generate_pawn_captures(&b, &mut captures);
        assert!(captures.is_empty());
    }

    #[test]
    fn blocked_pawn_has_no_double_push() {
        let b = board("4k3/8/8/8/8/4n3/4P3/4K3 w - - 0 1");
        let mut out = Vec::new();
        generate_pawn_pushes(&b, &mut out);
        assert!(out.is_empty());

        let b = board("4k3/8/8/8/4n3/8/4P3/4K3 w - - 0 1");
        let mut out = Vec::new();
        generate_pawn_pushes(&b, &mut out);
        assert_eq!(texts(&out), vec!["e2e3"]);
    }

    #[test]
    fn promotions_come_in_queen_knight_rook_bishop_order() {
        let b = board("1r2k3/P7/8/8/8/8/8/4K3 w - - 0 1");
        let mut captures = Vec::new();
        generate_pawn_captures(&b, &mut captures);
        assert_eq!(texts(&captures), vec!["a7b8q", "a7b8n", "a7b8r", "a7b8b"]);
        assert!(captures.iter().all(|mv| mv.captured_piece() == Some(PieceKind::Rook)));

        let mut pushes = Vec::new();
        generate_pawn_pushes(&b, &mut pushes);
        assert_eq!(texts(&pushes), vec!["a7a8q", "a7a8n", "a7a8r", "a7a8b"]);
    }

    #[test]
    fn black_en_passant_capture_is_generated() {
        let b = board("4k3/8/8/8/3Pp3/8/8/4K3 b - d3 0 1");
        let mut captures = Vec::new();
        generate_pawn_captures(&b, &mut captures);
        assert_eq!(texts(&captures), vec!["e4d3"]);
        assert!(captures[0].is_en_passant());
        assert!(captures[0].is_capture());
    }
}
