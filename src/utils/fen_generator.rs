use crate::game_state::chess_types::*;
use crate::utils::algebraic::square_to_algebraic;

pub fn generate_fen(board: &Board) -> String {
    let placement = generate_board_field(board);
    let side_to_move = match board.side_to_move() {
        Color::White => "w",
        Color::Black => "b",
    };
    let castling = generate_castling_field(board.castling_rights());
    let en_passant = board
        .en_passant_square()
        .map_or_else(|| "-".to_owned(), square_to_algebraic);

    format!(
        "{} {} {} {} {} {}",
        placement,
        side_to_move,
        castling,
        en_passant,
        board.halfmove_clock(),
        board.fullmove_number()
    )
}

fn generate_board_field(board: &Board) -> String {
    let mut out = String::new();

    for rank in (0..8u8).rev() {
        let mut empty_count = 0u8;

        for file in 0..8u8 {
            let occupant = Square::from_file_rank(file, rank).and_then(|sq| board.piece_at(sq));
            if let Some((color, piece)) = occupant {
                if empty_count > 0 {
                    out.push(char::from(b'0' + empty_count));
                    empty_count = 0;
                }
                out.push(piece_to_fen_char(color, piece));
            } else {
                empty_count += 1;
            }
        }

        if empty_count > 0 {
            out.push(char::from(b'0' + empty_count));
        }

        if rank > 0 {
            out.push('/');
        }
    }

    out
}

fn piece_to_fen_char(color: Color, piece: PieceKind) -> char {
    let base = piece.to_char();
    match color {
        Color::White => base.to_ascii_uppercase(),
        Color::Black => base,
    }
}

fn generate_castling_field(castling_rights: CastlingRights) -> String {
    let mut out = String::new();
    if castling_rights.contains(CastlingRights::WHITE_KINGSIDE) {
        out.push('K');
    }
    if castling_rights.contains(CastlingRights::WHITE_QUEENSIDE) {
        out.push('Q');
    }
    if castling_rights.contains(CastlingRights::BLACK_KINGSIDE) {
        out.push('k');
    }
    if castling_rights.contains(CastlingRights::BLACK_QUEENSIDE) {
        out.push('q');
    }
    if out.is_empty() {
        out.push('-');
    }
    out
}
