//! Core incremental board state representation.
//!
//! `Board` keeps a piece-on-square array and per-(color, piece) bitboards in
//! lockstep, plus occupancy caches, side/rights/clocks and a running Zobrist
//! hash. `make_move` updates everything incrementally; `unmake_move` reverses
//! the piece edits and restores scalar fields from a `StateBackup`.

use std::fmt;
use std::sync::Arc;

use crate::errors::EngineResult;
use crate::game_state::bitboard::{clear_bit, lsb, set_bit, Bitboard};
use crate::game_state::chess_rules::{
    castling_rook_squares, CASTLING_RIGHTS_MASK, STARTING_POSITION_FEN,
};
use crate::game_state::chess_types::*;
use crate::moves::attack_tables::AttackTables;
use crate::moves::move_descriptions::Move;
use crate::search::zobrist::{
    castling_key, compute_zobrist_key, en_passant_key, piece_square_key, side_to_move_key,
};
use crate::utils::fen_generator::generate_fen;
use crate::utils::fen_parser::parse_fen;
use crate::utils::long_algebraic::long_algebraic_to_move;

#[derive(Clone)]
pub struct Board {
    tables: Arc<AttackTables>,

    // [square] -> occupant
    squares: [Option<(Color, PieceKind)>; 64],
    // [color][piece_kind]
    pieces: [[Bitboard; 6]; 2],

    occupancy_by_color: [Bitboard; 2],
    occupancy_all: Bitboard,

    side_to_move: Color,
    castling_rights: CastlingRights,
    en_passant_square: Option<Square>,

    halfmove_clock: u16,
    fullmove_number: u16,

    hash: u64,
}

impl Board {
    /// Standard starting position.
    pub fn new(tables: Arc<AttackTables>) -> Self {
        // The start FEN is a compile-time constant known to tokenize.
        Self::from_fen(tables, STARTING_POSITION_FEN).expect("starting FEN should always parse")
    }

    /// Rebuild the whole board, hash included, from FEN text.
    ///
    /// Only tokenization is checked; a well-formed but impossible position is
    /// accepted as-is.
    pub fn from_fen(tables: Arc<AttackTables>, fen: &str) -> EngineResult<Self> {
        let fields = parse_fen(fen)?;

        let mut board = Self {
            tables,
            squares: [None; 64],
            pieces: [[0; 6]; 2],
            occupancy_by_color: [0; 2],
            occupancy_all: 0,
            side_to_move: fields.side_to_move,
            castling_rights: fields.castling_rights,
            en_passant_square: fields.en_passant_square,
            halfmove_clock: fields.halfmove_clock,
            fullmove_number: fields.fullmove_number,
            hash: 0,
        };

        for square in Square::iter() {
            if let Some((color, piece)) = fields.placement[square.index()] {
                board.put_piece(color, piece, square);
            }
        }
        board.update_occupancies();
        board.hash = board.compute_hash();

        Ok(board)
    }

    #[inline]
    pub fn to_fen(&self) -> String {
        generate_fen(self)
    }

    #[inline]
    pub fn tables(&self) -> &Arc<AttackTables> {
        &self.tables
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<(Color, PieceKind)> {
        self.squares[square.index()]
    }

    #[inline]
    pub fn pieces(&self, color: Color, piece: PieceKind) -> Bitboard {
        self.pieces[color.index()][piece.index()]
    }

    #[inline]
    pub fn occupancy(&self, color: Color) -> Bitboard {
        self.occupancy_by_color[color.index()]
    }

    #[inline]
    pub fn occupancy_all(&self) -> Bitboard {
        self.occupancy_all
    }

    #[inline]
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    #[inline]
    pub fn en_passant_square(&self) -> Option<Square> {
        self.en_passant_square
    }

    #[inline]
    pub fn halfmove_clock(&self) -> u16 {
        self.halfmove_clock
    }

    #[inline]
    pub fn fullmove_number(&self) -> u16 {
        self.fullmove_number
    }

    #[inline]
    pub fn hash(&self) -> u64 {
        self.hash
    }

    /// From-scratch Zobrist key; always equals `hash()` on a consistent board.
    #[inline]
    pub fn compute_hash(&self) -> u64 {
        compute_zobrist_key(self)
    }

    #[inline]
    pub fn king_square(&self, color: Color) -> Option<Square> {
        lsb(self.pieces(color, PieceKind::King))
    }

    /// Whether any piece of `attacker` attacks `square`. Cheap piece kinds are
    /// tested first and the scan stops at the first hit.
    pub fn is_square_attacked(&self, square: Square, attacker: Color) -> bool {
        let tables = &self.tables;

        // A pawn of `attacker` hits `square` iff a pawn of the other color on
        // `square` would hit it back.
        if tables.pawn_attacks(attacker.opposite(), square) & self.pieces(attacker, PieceKind::Pawn)
            != 0
        {
            return true;
        }

        if tables.knight_attacks(square) & self.pieces(attacker, PieceKind::Knight) != 0 {
            return true;
        }

        if tables.king_attacks(square) & self.pieces(attacker, PieceKind::King) != 0 {
            return true;
        }

        let queens = self.pieces(attacker, PieceKind::Queen);

        let diagonal = self.pieces(attacker, PieceKind::Bishop) | queens;
        if tables.bishop_attacks(square, self.occupancy_all) & diagonal != 0 {
            return true;
        }

        let orthogonal = self.pieces(attacker, PieceKind::Rook) | queens;
        tables.rook_attacks(square, self.occupancy_all) & orthogonal != 0
    }

    /// Side to move has its king attacked. A board without that king is never
    /// in check.
    pub fn is_in_check(&self) -> bool {
        self.king_square(self.side_to_move)
            .is_some_and(|king| self.is_square_attacked(king, self.side_to_move.opposite()))
    }

    /// Resolve 4-5 character long-algebraic text against the legal moves.
    pub fn parse_move(&mut self, text: &str) -> EngineResult<Move> {
        long_algebraic_to_move(text, self)
    }

    #[inline]
    pub fn backup(&self) -> StateBackup {
        StateBackup {
            en_passant_square: self.en_passant_square,
            castling_rights: self.castling_rights,
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
            hash: self.hash,
        }
    }

    /// Apply a pseudo-legal move of the side to move. Returns the snapshot
    /// that `unmake_move` needs to invert it.
    pub fn make_move(&mut self, mv: Move) -> StateBackup {
        let backup = self.backup();

        let us = self.side_to_move;
        let them = us.opposite();
        let from = mv.from();
        let to = mv.to();
        let moved = mv.moved_piece();

        self.remove_piece(us, moved, from);
        self.hash ^= piece_square_key(us, moved, from);

        if mv.is_en_passant() {
            let victim = square_behind(us, to);
            self.remove_piece(them, PieceKind::Pawn, victim);
            self.hash ^= piece_square_key(them, PieceKind::Pawn, victim);
        } else if let Some(captured) = mv.captured_piece() {
            self.remove_piece(them, captured, to);
            self.hash ^= piece_square_key(them, captured, to);
        }

        let placed = mv.promotion_piece().unwrap_or(moved);
        self.put_piece(us, placed, to);
        self.hash ^= piece_square_key(us, placed, to);

        if mv.is_castle() {
            let (rook_from, rook_to) = castling_rook_squares(us, to > from);
            self.remove_piece(us, PieceKind::Rook, rook_from);
            self.put_piece(us, PieceKind::Rook, rook_to);
            self.hash ^= piece_square_key(us, PieceKind::Rook, rook_from);
            self.hash ^= piece_square_key(us, PieceKind::Rook, rook_to);
        }

        if let Some(ep) = self.en_passant_square {
            self.hash ^= en_passant_key(ep);
        }
        self.hash ^= castling_key(self.castling_rights);

        self.en_passant_square = if mv.is_double_push() {
            Some(square_behind(us, to))
        } else {
            None
        };
        self.castling_rights.retain(CASTLING_RIGHTS_MASK[from.index()]);
        self.castling_rights.retain(CASTLING_RIGHTS_MASK[to.index()]);

        if let Some(ep) = self.en_passant_square {
            self.hash ^= en_passant_key(ep);
        }
        self.hash ^= castling_key(self.castling_rights);

        if moved == PieceKind::Pawn || mv.is_capture() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock = self.halfmove_clock.saturating_add(1);
        }

        if us == Color::Black {
            self.fullmove_number = self.fullmove_number.saturating_add(1);
        }

        self.hash ^= side_to_move_key();
        self.side_to_move = them;

        self.update_occupancies();

        backup
    }

    /// Exact inverse of `make_move(mv)` given the backup it returned.
    pub fn unmake_move(&mut self, mv: Move, backup: StateBackup) {
        let us = self.side_to_move.opposite();
        let them = self.side_to_move;
        self.side_to_move = us;

        let from = mv.from();
        let to = mv.to();
        let moved = mv.moved_piece();
        let placed = mv.promotion_piece().unwrap_or(moved);

        self.remove_piece(us, placed, to);
        self.put_piece(us, moved, from);

        if mv.is_en_passant() {
            self.put_piece(them, PieceKind::Pawn, square_behind(us, to));
        } else if let Some(captured) = mv.captured_piece() {
            self.put_piece(them, captured, to);
        }

        if mv.is_castle() {
            let (rook_from, rook_to) = castling_rook_squares(us, to > from);
            self.remove_piece(us, PieceKind::Rook, rook_to);
            self.put_piece(us, PieceKind::Rook, rook_from);
        }

        self.restore(backup);
        self.update_occupancies();
    }

    /// Pass the turn: flip side and clear the en-passant target.
    pub fn make_null_move(&mut self) -> StateBackup {
        let backup = self.backup();

        if let Some(ep) = self.en_passant_square.take() {
            self.hash ^= en_passant_key(ep);
        }
        self.hash ^= side_to_move_key();
        self.side_to_move = self.side_to_move.opposite();

        backup
    }

    pub fn unmake_null_move(&mut self, backup: StateBackup) {
        self.side_to_move = self.side_to_move.opposite();
        self.restore(backup);
    }

    #[inline]
    fn restore(&mut self, backup: StateBackup) {
        self.hash = backup.hash;
        self.halfmove_clock = backup.halfmove_clock;
        self.fullmove_number = backup.fullmove_number;
        self.en_passant_square = backup.en_passant_square;
        self.castling_rights = backup.castling_rights;
    }

    #[inline]
    fn put_piece(&mut self, color: Color, piece: PieceKind, square: Square) {
        set_bit(&mut self.pieces[color.index()][piece.index()], square);
        self.squares[square.index()] = Some((color, piece));
    }

    #[inline]
    fn remove_piece(&mut self, color: Color, piece: PieceKind, square: Square) {
        clear_bit(&mut self.pieces[color.index()][piece.index()], square);
        self.squares[square.index()] = None;
    }

    #[inline]
    fn update_occupancies(&mut self) {
        for color in Color::ALL {
            self.occupancy_by_color[color.index()] =
                self.pieces[color.index()].iter().fold(0u64, |acc, bb| acc | bb);
        }
        self.occupancy_all = self.occupancy_by_color[0] | self.occupancy_by_color[1];
    }
}

/// Square one step back along `color`'s pawn direction: the en-passant
/// target after a double push, or the captured pawn of an en-passant capture.
#[inline]
fn square_behind(color: Color, square: Square) -> Square {
    let index = square.index() as u32;
    match color {
        Color::White => Square::from_index(index.wrapping_sub(8)),
        Color::Black => Square::from_index(index + 8),
    }
}

/// Positional equality; the shared attack tables are not compared.
impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.squares == other.squares
            && self.pieces == other.pieces
            && self.occupancy_by_color == other.occupancy_by_color
            && self.occupancy_all == other.occupancy_all
            && self.side_to_move == other.side_to_move
            && self.castling_rights == other.castling_rights
            && self.en_passant_square == other.en_passant_square
            && self.halfmove_clock == other.halfmove_clock
            && self.fullmove_number == other.fullmove_number
            && self.hash == other.hash
    }
}

impl Eq for Board {}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Board")
            .field("fen", &self.to_fen())
            .field("hash", &format_args!("{:#018x}", self.hash))
            .finish()
    }
}
