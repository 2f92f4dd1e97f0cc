//! Long-algebraic move text (`e2e4`, `e7e8q`).
//!
//! Parsing resolves the text against the current legal moves, so the packed
//! move comes back with its capture, en-passant and castle fields filled in.

use crate::errors::{EngineError, EngineResult};
use crate::game_state::chess_types::*;
use crate::move_generation::move_generator::legal_moves;
use crate::moves::move_descriptions::Move;
use crate::utils::algebraic::algebraic_to_square;

#[inline]
pub fn move_to_long_algebraic(mv: Move) -> String {
    mv.to_string()
}

/// Space-separated line, as used for principal variations in logs.
pub fn moves_to_long_algebraic(moves: &[Move]) -> String {
    moves
        .iter()
        .map(|mv| mv.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn long_algebraic_to_move(long_algebraic: &str, board: &mut Board) -> EngineResult<Move> {
    let invalid = |msg: String| EngineError::InvalidMoveText(format!("{long_algebraic}: {msg}"));

    if !long_algebraic.is_ascii() || !(4..=5).contains(&long_algebraic.len()) {
        return Err(invalid("expected 4 or 5 characters".to_owned()));
    }

    let from = algebraic_to_square(&long_algebraic[0..2]).map_err(invalid)?;
    let to = algebraic_to_square(&long_algebraic[2..4]).map_err(invalid)?;
    let promotion = match long_algebraic.as_bytes().get(4) {
        Some(&ch) => Some(char_to_promotion(ch as char).map_err(invalid)?),
        None => None,
    };

    legal_moves(board)
        .into_iter()
        .find(|mv| mv.from() == from && mv.to() == to && mv.promotion_piece() == promotion)
        .ok_or_else(|| invalid("not a legal move in this position".to_owned()))
}

fn char_to_promotion(ch: char) -> Result<PieceKind, String> {
    match ch.to_ascii_lowercase() {
        'n' => Ok(PieceKind::Knight),
        'b' => Ok(PieceKind::Bishop),
        'r' => Ok(PieceKind::Rook),
        'q' => Ok(PieceKind::Queen),
        _ => Err(format!("invalid promotion piece character: {ch}")),
    }
}
