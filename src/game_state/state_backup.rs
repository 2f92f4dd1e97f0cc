use crate::game_state::chess_types::{CastlingRights, Square};

/// Scalar fields needed to invert exactly one `make_move`.
///
/// Piece placement is restored from the move itself; only the fields a move
/// can change irreversibly live here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateBackup {
    pub en_passant_square: Option<Square>,
    pub castling_rights: CastlingRights,
    pub halfmove_clock: u16,
    pub fullmove_number: u16,
    pub hash: u64,
}
