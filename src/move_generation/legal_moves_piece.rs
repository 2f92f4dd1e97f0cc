//! Knight, king and slider move generation.
//!
//! Pieces are emitted kind by kind (knight, king, bishop, rook, queen), each
//! kind walking its pieces in ascending square order. The caller runs the
//! capture pass before the quiet pass.

use crate::game_state::bitboard::{squares, Bitboard};
use crate::game_state::chess_types::*;
use crate::moves::move_descriptions::Move;

/// Which half of the destination set a pass produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenType {
    Captures,
    Quiets,
}

const PIECE_ORDER: [PieceKind; 5] = [
    PieceKind::Knight,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Rook,
    PieceKind::Queen,
];

pub fn generate_piece_moves(board: &Board, gen_type: GenType, out: &mut Vec<Move>) {
    let side = board.side_to_move();
    let targets = match gen_type {
        GenType::Captures => board.occupancy(side.opposite()),
        GenType::Quiets => !board.occupancy_all(),
    };

    for piece in PIECE_ORDER {
        for from in squares(board.pieces(side, piece)) {
            for to in squares(piece_attacks(board, piece, from) & targets) {
                let captured = match gen_type {
                    GenType::Captures => board.piece_at(to).map(|(_, victim)| victim),
                    GenType::Quiets => None,
                };
                out.push(Move::new(from, to, piece, captured, None, 0));
            }
        }
    }
}

#[inline]
fn piece_attacks(board: &Board, piece: PieceKind, from: Square) -> Bitboard {
    let tables = board.tables();
    let occupancy = board.occupancy_all();
    match piece {
        PieceKind::Knight => tables.knight_attacks(from),
        PieceKind::King => tables.king_attacks(from),
        PieceKind::Bishop => tables.bishop_attacks(from, occupancy),
        PieceKind::Rook => tables.rook_attacks(from, occupancy),
        PieceKind::Queen => tables.queen_attacks(from, occupancy),
        PieceKind::Pawn => 0,
    }
}
