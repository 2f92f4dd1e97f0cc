//! Canonical chess-rule constants.
//!
//! Start position, well-known test positions and the per-square castling
//! masks used when a move touches a king or rook home square.

use crate::game_state::chess_types::{Color, Square};

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Castling-heavy middlegame used to stress move generation.
pub const KIWIPETE_FEN: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

/// Castling rights kept after a move leaves or lands on each square. Both the
/// source and destination entries are applied, so moving a king or rook, or
/// capturing a rook on its home square, drops the matching right.
pub const CASTLING_RIGHTS_MASK: [u8; 64] = [
    13, 15, 15, 15, 12, 15, 15, 14, //
    15, 15, 15, 15, 15, 15, 15, 15, //
    15, 15, 15, 15, 15, 15, 15, 15, //
    15, 15, 15, 15, 15, 15, 15, 15, //
    15, 15, 15, 15, 15, 15, 15, 15, //
    15, 15, 15, 15, 15, 15, 15, 15, //
    15, 15, 15, 15, 15, 15, 15, 15, //
    7, 15, 15, 15, 3, 15, 15, 11, //
];

/// Rook relocation for a castling king move: `(rook_from, rook_to)`.
#[inline]
pub const fn castling_rook_squares(color: Color, kingside: bool) -> (Square, Square) {
    match (color, kingside) {
        (Color::White, true) => (Square::H1, Square::F1),
        (Color::White, false) => (Square::A1, Square::D1),
        (Color::Black, true) => (Square::H8, Square::F8),
        (Color::Black, false) => (Square::A8, Square::D8),
    }
}

/// Home square of each king.
#[inline]
pub const fn king_home_square(color: Color) -> Square {
    match color {
        Color::White => Square::E1,
        Color::Black => Square::E8,
    }
}
