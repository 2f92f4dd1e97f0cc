//! Bitboard primitives.
//!
//! A bitboard is a plain `u64`, bit `i` standing for square `i`. Multiplication
//! on bitboards is always wrapping (magic indexing depends on it).

use crate::game_state::chess_types::Square;

pub type Bitboard = u64;

pub const EMPTY: Bitboard = 0;

pub const FILE_A: Bitboard = 0x0101_0101_0101_0101;
pub const FILE_B: Bitboard = FILE_A << 1;
pub const FILE_G: Bitboard = FILE_A << 6;
pub const FILE_H: Bitboard = FILE_A << 7;

pub const RANK_1: Bitboard = 0xFF;
pub const RANK_2: Bitboard = RANK_1 << 8;
pub const RANK_4: Bitboard = RANK_1 << 24;
pub const RANK_5: Bitboard = RANK_1 << 32;
pub const RANK_7: Bitboard = RANK_1 << 48;
pub const RANK_8: Bitboard = RANK_1 << 56;

/// Masks applied after an eastward / westward shift so pieces never wrap
/// from the h-file onto the a-file (and vice versa).
pub const NOT_FILE_A: Bitboard = !FILE_A;
pub const NOT_FILE_H: Bitboard = !FILE_H;
pub const NOT_FILE_AB: Bitboard = !(FILE_A | FILE_B);
pub const NOT_FILE_GH: Bitboard = !(FILE_G | FILE_H);

#[inline]
pub const fn is_set(bb: Bitboard, square: Square) -> bool {
    bb & square.bitboard() != 0
}

#[inline]
pub fn set_bit(bb: &mut Bitboard, square: Square) {
    *bb |= square.bitboard();
}

#[inline]
pub fn clear_bit(bb: &mut Bitboard, square: Square) {
    *bb &= !square.bitboard();
}

/// Least significant set square, `None` on an empty board.
#[inline]
pub const fn lsb(bb: Bitboard) -> Option<Square> {
    if bb == 0 {
        None
    } else {
        Some(Square::from_index(bb.trailing_zeros()))
    }
}

/// Remove and return the least significant set square.
#[inline]
pub fn pop_lsb(bb: &mut Bitboard) -> Option<Square> {
    let square = lsb(*bb)?;
    *bb &= *bb - 1;
    Some(square)
}

#[inline]
pub const fn count(bb: Bitboard) -> u32 {
    bb.count_ones()
}

/// Iterate set squares in ascending index order.
#[inline]
pub fn squares(bb: Bitboard) -> SquareIter {
    SquareIter(bb)
}

#[derive(Debug, Clone, Copy)]
pub struct SquareIter(Bitboard);

impl Iterator for SquareIter {
    type Item = Square;

    #[inline]
    fn next(&mut self) -> Option<Square> {
        pop_lsb(&mut self.0)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.0.count_ones() as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for SquareIter {}

#[inline]
pub const fn north(bb: Bitboard) -> Bitboard {
    bb << 8
}

#[inline]
pub const fn south(bb: Bitboard) -> Bitboard {
    bb >> 8
}

#[inline]
pub const fn east(bb: Bitboard) -> Bitboard {
    (bb << 1) & NOT_FILE_A
}

#[inline]
pub const fn west(bb: Bitboard) -> Bitboard {
    (bb >> 1) & NOT_FILE_H
}

/// Spread the low `count_ones(mask)` bits of `index` over the set bits of
/// `mask`, lowest first. Enumerates every subset of `mask` as `index` runs
/// over `0..1 << count_ones(mask)`.
pub fn occupancy_subset(index: usize, mask: Bitboard) -> Bitboard {
    let mut occupancy = EMPTY;
    for (bit, square) in squares(mask).enumerate() {
        if index & (1usize << bit) != 0 {
            occupancy |= square.bitboard();
        }
    }
    occupancy
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_clear_and_scan() {
        let mut bb = EMPTY;
        let e4 = Square::new(28).expect("e4");
        set_bit(&mut bb, e4);
        set_bit(&mut bb, Square::H8);
        assert!(is_set(bb, e4));
        assert_eq!(lsb(bb), Some(e4));
        assert_eq!(pop_lsb(&mut bb), Some(e4));
        assert_eq!(lsb(bb), Some(Square::H8));
        clear_bit(&mut bb, Square::H8);
        assert_eq!(bb, EMPTY);
        assert_eq!(pop_lsb(&mut bb), None);
    }

    #[test]
    fn shifts_do_not_wrap_files() {
        assert_eq!(east(FILE_H), EMPTY);
        assert_eq!(west(FILE_A), EMPTY);
        assert_eq!(north(RANK_8), EMPTY);
        assert_eq!(east(FILE_A), FILE_B);
    }

    #[test]
    fn occupancy_subsets_cover_mask() {
        let mask = 0b1011_0000u64;
        let subsets: Vec<Bitboard> = (0..8).map(|i| occupancy_subset(i, mask)).collect();
        assert_eq!(subsets[0], 0);
        assert_eq!(subsets[7], mask);
        assert!(subsets.iter().all(|s| s & !mask == 0));
        let mut sorted = subsets.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), 8);
    }

    #[test]
    fn square_iter_is_ascending() {
        let got: Vec<usize> = squares(0x8000_0000_0000_0011).map(|s| s.index()).collect();
        assert_eq!(got, vec![0, 4, 63]);
    }
}
