//! FEN tokenizer.
//!
//! Splits a Forsyth-Edwards Notation string into typed fields. Positional
//! sanity (king count, pawns on back ranks, reachable rights) is not checked;
//! `Board::from_fen` builds whatever the text describes.

use crate::errors::{EngineError, EngineResult};
use crate::game_state::chess_types::*;
use crate::utils::algebraic::algebraic_to_square;

/// Tokenized FEN record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FenFields {
    pub placement: [Option<(Color, PieceKind)>; 64],
    pub side_to_move: Color,
    pub castling_rights: CastlingRights,
    pub en_passant_square: Option<Square>,
    pub halfmove_clock: u16,
    pub fullmove_number: u16,
}

/// Parse FEN text. The two clock fields may be omitted and then default to
/// `0` and `1`.
pub fn parse_fen(fen: &str) -> EngineResult<FenFields> {
    let mut parts = fen.split_whitespace();

    let board_part = parts.next().ok_or_else(|| invalid("missing board layout"))?;
    let side_part = parts.next().ok_or_else(|| invalid("missing side-to-move"))?;
    let castling_part = parts.next().ok_or_else(|| invalid("missing castling rights"))?;
    let en_passant_part = parts.next().ok_or_else(|| invalid("missing en-passant square"))?;
    let halfmove_part = parts.next();
    let fullmove_part = parts.next();

    if parts.next().is_some() {
        return Err(invalid("extra trailing fields"));
    }

    let halfmove_clock = match halfmove_part {
        Some(text) => text
            .parse::<u16>()
            .map_err(|_| invalid(format!("invalid halfmove clock: {text}")))?,
        None => 0,
    };
    let fullmove_number = match fullmove_part {
        Some(text) => text
            .parse::<u16>()
            .map_err(|_| invalid(format!("invalid fullmove number: {text}")))?,
        None => 1,
    };

    Ok(FenFields {
        placement: parse_board(board_part)?,
        side_to_move: parse_side_to_move(side_part)?,
        castling_rights: parse_castling_rights(castling_part)?,
        en_passant_square: parse_en_passant_square(en_passant_part)?,
        halfmove_clock,
        fullmove_number,
    })
}

fn invalid(msg: impl Into<String>) -> EngineError {
    EngineError::InvalidFen(msg.into())
}

fn parse_board(board_part: &str) -> EngineResult<[Option<(Color, PieceKind)>; 64]> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(invalid("board layout must contain 8 ranks"));
    }

    let mut placement = [None; 64];

    for (fen_rank_idx, rank_str) in ranks.iter().enumerate() {
        let board_rank = 7 - fen_rank_idx as u8;
        let mut file = 0u8;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(invalid(format!("invalid empty-square count '{ch}'")));
                }
                file += empty_count as u8;
                if file > 8 {
                    return Err(invalid("board rank has too many files"));
                }
                continue;
            }

            let piece = piece_from_fen_char(ch)
                .ok_or_else(|| invalid(format!("invalid piece character '{ch}' in board layout")))?;

            let square = Square::from_file_rank(file, board_rank)
                .ok_or_else(|| invalid("board rank has too many files"))?;
            placement[square.index()] = Some(piece);
            file += 1;
        }

        if file != 8 {
            return Err(invalid("board rank does not sum to 8 files"));
        }
    }

    Ok(placement)
}

fn parse_side_to_move(side_part: &str) -> EngineResult<Color> {
    match side_part {
        "w" => Ok(Color::White),
        "b" => Ok(Color::Black),
        _ => Err(invalid(format!("invalid side-to-move field: {side_part}"))),
    }
}

fn parse_castling_rights(castling_part: &str) -> EngineResult<CastlingRights> {
    let mut rights = CastlingRights::NONE;
    if castling_part == "-" {
        return Ok(rights);
    }

    for ch in castling_part.chars() {
        match ch {
            'K' => rights.insert(CastlingRights::WHITE_KINGSIDE),
            'Q' => rights.insert(CastlingRights::WHITE_QUEENSIDE),
            'k' => rights.insert(CastlingRights::BLACK_KINGSIDE),
            'q' => rights.insert(CastlingRights::BLACK_QUEENSIDE),
            _ => return Err(invalid(format!("invalid castling rights character: {ch}"))),
        }
    }

    Ok(rights)
}

fn parse_en_passant_square(en_passant_part: &str) -> EngineResult<Option<Square>> {
    if en_passant_part == "-" {
        return Ok(None);
    }

    algebraic_to_square(en_passant_part)
        .map(Some)
        .map_err(EngineError::InvalidFen)
}

fn piece_from_fen_char(ch: char) -> Option<(Color, PieceKind)> {
    let color = if ch.is_ascii_uppercase() {
        Color::White
    } else if ch.is_ascii_lowercase() {
        Color::Black
    } else {
        return None;
    };

    PieceKind::from_char(ch).map(|piece| (color, piece))
}
