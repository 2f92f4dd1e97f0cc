//! Crate root module declarations for the Plum chess engine core.
//!
//! Exposes the board representation, attack generation, move generation and
//! search subsystems so front ends, binaries and benches can import stable
//! module paths.

pub mod errors;

pub mod game_state {
    pub mod bitboard;
    pub mod board;
    pub mod chess_rules;
    pub mod chess_types;
    pub mod state_backup;
}

pub mod moves {
    pub mod attack_tables;
    pub mod bishop_moves;
    pub mod king_moves;
    pub mod knight_moves;
    pub mod magic;
    pub mod move_descriptions;
    pub mod pawn_moves;
    pub mod rook_moves;
}

pub mod move_generation {
    pub mod legal_moves_castling;
    pub mod legal_moves_pawn;
    pub mod legal_moves_piece;
    pub mod move_generator;
    pub mod perft;
}

pub mod search {
    pub mod board_scoring;
    pub mod cancellation;
    pub mod game_history;
    pub mod history_table;
    pub mod iterative_deepening;
    pub mod killer_table;
    pub mod move_ordering;
    pub mod pv_table;
    pub mod search_config;
    pub mod threading;
    pub mod transposition_table;
    pub mod zobrist;
}

pub mod utils {
    pub mod algebraic;
    pub mod fen_generator;
    pub mod fen_parser;
    pub mod long_algebraic;
}
