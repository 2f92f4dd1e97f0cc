//! Packed move representation.
//!
//! Layout (low to high): from (6 bits), to (6), moved piece (3), captured
//! piece (3), promoted piece (3), then the double-push, en-passant and castle
//! flags. Piece code 7 means "no piece". Capture and promotion are derived
//! from the piece fields rather than stored as flags.

use std::fmt;

use crate::game_state::chess_types::{PieceKind, Square};

const FROM_SHIFT: u32 = 0;
const TO_SHIFT: u32 = 6;
const MOVED_PIECE_SHIFT: u32 = 12;
const CAPTURED_PIECE_SHIFT: u32 = 15;
const PROMOTION_PIECE_SHIFT: u32 = 18;

const SQUARE_MASK: u32 = 0x3F;
const PIECE_MASK: u32 = 0x7;
pub const NO_PIECE_CODE: u32 = 0x7;

pub const FLAG_DOUBLE_PAWN_PUSH: u32 = 1 << 21;
pub const FLAG_EN_PASSANT: u32 = 1 << 22;
pub const FLAG_CASTLING: u32 = 1 << 23;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Move(u32);

impl Move {
    /// Placeholder for "no move" in heuristic tables. Never generated: a real
    /// move always has `from != to`.
    pub const NULL: Move = Move(0);

    #[inline]
    pub fn new(
        from: Square,
        to: Square,
        moved_piece: PieceKind,
        captured_piece: Option<PieceKind>,
        promotion_piece: Option<PieceKind>,
        flags: u32,
    ) -> Self {
        let mut out = 0u32;
        out |= (from.index() as u32) << FROM_SHIFT;
        out |= (to.index() as u32) << TO_SHIFT;
        out |= piece_kind_to_code(Some(moved_piece)) << MOVED_PIECE_SHIFT;
        out |= piece_kind_to_code(captured_piece) << CAPTURED_PIECE_SHIFT;
        out |= piece_kind_to_code(promotion_piece) << PROMOTION_PIECE_SHIFT;
        out |= flags & (FLAG_DOUBLE_PAWN_PUSH | FLAG_EN_PASSANT | FLAG_CASTLING);
        Move(out)
    }

    #[inline]
    pub const fn from_bits(bits: u32) -> Self {
        Move(bits)
    }

    #[inline]
    pub const fn bits(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn is_null(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn from(self) -> Square {
        Square::from_index((self.0 >> FROM_SHIFT) & SQUARE_MASK)
    }

    #[inline]
    pub const fn to(self) -> Square {
        Square::from_index((self.0 >> TO_SHIFT) & SQUARE_MASK)
    }

    /// Moving piece. The code is always valid for generated moves; a corrupted
    /// code decodes as a pawn.
    #[inline]
    pub fn moved_piece(self) -> PieceKind {
        piece_kind_from_code((self.0 >> MOVED_PIECE_SHIFT) & PIECE_MASK).unwrap_or(PieceKind::Pawn)
    }

    #[inline]
    pub fn captured_piece(self) -> Option<PieceKind> {
        piece_kind_from_code((self.0 >> CAPTURED_PIECE_SHIFT) & PIECE_MASK)
    }

    #[inline]
    pub fn promotion_piece(self) -> Option<PieceKind> {
        piece_kind_from_code((self.0 >> PROMOTION_PIECE_SHIFT) & PIECE_MASK)
    }

    #[inline]
    pub const fn is_double_push(self) -> bool {
        self.0 & FLAG_DOUBLE_PAWN_PUSH != 0
    }

    #[inline]
    pub const fn is_en_passant(self) -> bool {
        self.0 & FLAG_EN_PASSANT != 0
    }

    #[inline]
    pub const fn is_castle(self) -> bool {
        self.0 & FLAG_CASTLING != 0
    }

    #[inline]
    pub const fn is_capture(self) -> bool {
        (self.0 >> CAPTURED_PIECE_SHIFT) & PIECE_MASK != NO_PIECE_CODE
    }

    #[inline]
    pub const fn is_promotion(self) -> bool {
        (self.0 >> PROMOTION_PIECE_SHIFT) & PIECE_MASK != NO_PIECE_CODE
    }

    /// Neither a capture nor a promotion.
    #[inline]
    pub const fn is_quiet(self) -> bool {
        !self.is_capture() && !self.is_promotion()
    }
}

#[inline]
pub fn piece_kind_to_code(piece_kind: Option<PieceKind>) -> u32 {
    piece_kind.map_or(NO_PIECE_CODE, |p| p.index() as u32)
}

#[inline]
pub fn piece_kind_from_code(code: u32) -> Option<PieceKind> {
    PieceKind::from_index(code as usize)
}

/// Long-algebraic text: source, destination, optional promotion letter.
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from(), self.to())?;
        if let Some(promo) = self.promotion_piece() {
            write!(f, "{}", promo.to_char())?;
        }
        Ok(())
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            return write!(f, "Move(null)");
        }
        write!(f, "Move({self} {:?}", self.moved_piece())?;
        if let Some(captured) = self.captured_piece() {
            write!(f, " x{captured:?}")?;
        }
        if self.is_double_push() {
            write!(f, " double")?;
        }
        if self.is_en_passant() {
            write!(f, " ep")?;
        }
        if self.is_castle() {
            write!(f, " castle")?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capture_promotion_keeps_every_field() {
        let b7 = Square::new(49).expect("b7");
        let mv = Move::new(
            b7,
            Square::A8,
            PieceKind::Pawn,
            Some(PieceKind::Rook),
            Some(PieceKind::Knight),
            0,
        );
        assert_eq!(mv.from(), b7);
        assert_eq!(mv.to(), Square::A8);
        assert_eq!(mv.moved_piece(), PieceKind::Pawn);
        assert_eq!(mv.captured_piece(), Some(PieceKind::Rook));
        assert_eq!(mv.promotion_piece(), Some(PieceKind::Knight));
        assert!(mv.is_capture() && mv.is_promotion());
        assert!(!mv.is_en_passant() && !mv.is_castle() && !mv.is_double_push());
    }

    #[test]
    fn en_passant_is_a_pawn_capture_with_flag() {
        let e5 = Square::new(36).expect("e5");
        let d6 = Square::new(43).expect("d6");
        let mv = Move::new(e5, d6, PieceKind::Pawn, Some(PieceKind::Pawn), None, FLAG_EN_PASSANT);
        assert!(mv.is_en_passant());
        assert!(mv.is_capture());
        assert!(!mv.is_promotion());
        assert_eq!(mv.to_string(), "e5d6");
    }

    #[test]
    fn king_on_h8_does_not_collide_with_null() {
        let mv = Move::new(Square::H8, Square::G8, PieceKind::King, None, None, 0);
        assert!(!mv.is_null());
        assert_eq!(Move::from_bits(mv.bits()), mv);
        assert_eq!(mv.captured_piece(), None);
    }

    #[test]
    fn display_uses_long_algebraic() {
        let e7 = Square::new(52).expect("e7");
        let e8 = Square::E8;
        let mv = Move::new(e7, e8, PieceKind::Pawn, None, Some(PieceKind::Queen), 0);
        assert_eq!(mv.to_string(), "e7e8q");
        assert!(!mv.is_quiet());
        let castle = Move::new(Square::E1, Square::G1, PieceKind::King, None, None, FLAG_CASTLING);
        assert_eq!(castle.to_string(), "e1g1");
        assert!(castle.is_quiet());
        assert!(Move::NULL.is_null());
    }

    #[test]
    fn every_field_combination_survives_packing() {
        let flag_bits = [FLAG_DOUBLE_PAWN_PUSH, FLAG_EN_PASSANT, FLAG_CASTLING];
        let optional: Vec<Option<PieceKind>> = std::iter::once(None)
            .chain(PieceKind::ALL.into_iter().map(Some))
            .collect();
        let promotions = [
            None,
            Some(PieceKind::Knight),
            Some(PieceKind::Bishop),
            Some(PieceKind::Rook),
            Some(PieceKind::Queen),
        ];

        for from in Square::iter() {
            // Every ninth destination; still reaches a1 and h8.
            for to in Square::iter().step_by(9) {
                for moved in PieceKind::ALL {
                    for &captured in &optional {
                        for promotion in promotions {
                            for subset in 0..8usize {
                                let flags = flag_bits
                                    .iter()
                                    .enumerate()
                                    .filter(|(bit, _)| subset & (1 << bit) != 0)
                                    .fold(0, |acc, (_, flag)| acc | flag);
                                let mv = Move::new(from, to, moved, captured, promotion, flags);

                                assert_eq!(mv.from(), from);
                                assert_eq!(mv.to(), to);
                                assert_eq!(mv.moved_piece(), moved);
                                assert_eq!(mv.captured_piece(), captured);
                                assert_eq!(mv.promotion_piece(), promotion);
                                assert_eq!(mv.is_double_push(), flags & FLAG_DOUBLE_PAWN_PUSH != 0);
                                assert_eq!(mv.is_en_passant(), flags & FLAG_EN_PASSANT != 0);
                                assert_eq!(mv.is_castle(), flags & FLAG_CASTLING != 0);
                                assert_eq!(mv.is_capture(), captured.is_some());
                                assert_eq!(mv.is_promotion(), promotion.is_some());
                                assert_eq!(Move::from_bits(mv.bits()), mv);
                            }
                        }
                    }
                }
            }
        }
    }
}
