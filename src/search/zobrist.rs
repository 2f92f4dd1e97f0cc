//! Zobrist hashing support for fast position identity and repetition tracking.
//!
//! The keys are generated from a fixed seed so hashes are deterministic across
//! runs, which is useful for testing and debugging. Unlike attack tables the
//! keys are tiny and never vary, so they live in a lazily built static.

use std::sync::OnceLock;

use crate::game_state::bitboard::squares;
use crate::game_state::chess_types::*;

#[derive(Debug)]
struct ZobristTables {
    piece_square: [[[u64; 64]; 6]; 2],
    side_to_move: u64,
    castling: [u64; 16],
    en_passant_file: [u64; 8],
}

static TABLES: OnceLock<ZobristTables> = OnceLock::new();

#[inline]
fn tables() -> &'static ZobristTables {
    TABLES.get_or_init(build_tables)
}

fn build_tables() -> ZobristTables {
    let mut seed: u64 = 0x9E37_79B9_7F4A_7C15;

    let mut piece_square = [[[0u64; 64]; 6]; 2];
    for color in &mut piece_square {
        for piece in color {
            for sq in piece {
                *sq = next_random_u64(&mut seed);
            }
        }
    }

    let side_to_move = next_random_u64(&mut seed);

    let mut castling = [0u64; 16];
    for key in &mut castling {
        *key = next_random_u64(&mut seed);
    }

    let mut en_passant_file = [0u64; 8];
    for key in &mut en_passant_file {
        *key = next_random_u64(&mut seed);
    }

    ZobristTables {
        piece_square,
        side_to_move,
        castling,
        en_passant_file,
    }
}

#[inline]
fn next_random_u64(state: &mut u64) -> u64 {
    // splitmix64
    *state = state.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Return the Zobrist key for a `(color, piece, square)` occupancy term.
#[inline]
pub fn piece_square_key(color: Color, piece: PieceKind, square: Square) -> u64 {
    tables().piece_square[color.index()][piece.index()][square.index()]
}

#[inline]
pub fn castling_key(castling_rights: CastlingRights) -> u64 {
    tables().castling[castling_rights.bits() as usize]
}

/// Key for an en-passant target; only its file contributes.
#[inline]
pub fn en_passant_key(square: Square) -> u64 {
    tables().en_passant_file[square.file() as usize]
}

/// Return the side-to-move toggle key (xor in when black is to move).
#[inline]
pub fn side_to_move_key() -> u64 {
    tables().side_to_move
}

/// Compute the full position key from scratch.
pub fn compute_zobrist_key(board: &Board) -> u64 {
    let mut key = 0u64;

    for color in Color::ALL {
        for piece in PieceKind::ALL {
            for sq in squares(board.pieces(color, piece)) {
                key ^= piece_square_key(color, piece, sq);
            }
        }
    }

    if board.side_to_move() == Color::Black {
        key ^= side_to_move_key();
    }

    key ^= castling_key(board.castling_rights());

    if let Some(ep_square) = board.en_passant_square() {
        key ^= en_passant_key(ep_square);
    }

    key
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::compute_zobrist_key;
    use crate::game_state::chess_types::Board;
    use crate::moves::attack_tables::AttackTables;

    fn board(tables: &Arc<AttackTables>, fen: &str) -> Board {
        Board::from_fen(Arc::clone(tables), fen).expect("FEN should parse")
    }

    #[test]
    fn starting_position_hash_is_deterministic() {
        let tables = AttackTables::shared();
        let a = Board::new(Arc::clone(&tables));
        let b = Board::new(tables);
        assert_eq!(a.hash(), b.hash());
        assert_eq!(a.hash(), compute_zobrist_key(&a));
    }

    #[test]
    fn side_to_move_changes_hash() {
        let tables = AttackTables::shared();
        let w = board(&tables, "4k3/8/8/8/8/8/8/4K3 w - - 0 1");
        let b = board(&tables, "4k3/8/8/8/8/8/8/4K3 b - - 0 1");
        assert_ne!(w.hash(), b.hash());
    }

    #[test]
    fn castling_rights_change_hash() {
        let tables = AttackTables::shared();
        let with_rights = board(&tables, "4k3/8/8/8/8/8/8/R3K2R w KQ - 0 1");
        let without_rights = board(&tables, "4k3/8/8/8/8/8/8/R3K2R w - - 0 1");
        assert_ne!(with_rights.hash(), without_rights.hash());
    }

    #[test]
    fn en_passant_file_changes_hash() {
        let tables = AttackTables::shared();
        let no_ep = board(&tables, "4k3/8/8/8/4P3/8/8/4K3 b - - 0 1");
        let ep = board(&tables, "4k3/8/8/8/4P3/8/8/4K3 b - e3 0 1");
        assert_ne!(no_ep.hash(), ep.hash());
    }

    #[test]
    fn transposed_move_orders_reach_the_same_hash() {
        let tables = AttackTables::shared();
        let mut a = Board::new(Arc::clone(&tables));
        let mut b = Board::new(tables);

        for text in ["g1f3", "b8c6", "b1c3"] {
            let mv = a.parse_move(text).expect("legal move");
            a.make_move(mv);
        }
        for text in ["b1c3", "b8c6", "g1f3"] {
            let mv = b.parse_move(text).expect("legal move");
            b.make_move(mv);
        }

        assert_eq!(a.hash(), b.hash());
        assert_eq!(a.hash(), compute_zobrist_key(&a));
    }
}
