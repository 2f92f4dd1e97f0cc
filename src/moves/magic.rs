//! Magic-bitboard indexing for sliding pieces.
//!
//! For each square, `(occupancy & mask) * magic >> shift` maps every subset of
//! the square's relevant-occupancy mask onto a dense table slot without
//! destructive collisions. The constants below were produced offline by
//! [`find_magic`] (see `src/bin/magic_search.rs`); runtime only reads them.

use rand::Rng;

use crate::game_state::bitboard::{occupancy_subset, Bitboard};
use crate::game_state::chess_types::Square;
use crate::moves::bishop_moves::{bishop_attacks_traced, bishop_relevant_mask};
use crate::moves::rook_moves::{rook_attacks_traced, rook_relevant_mask};

pub const BISHOP_MAGICS: [u64; 64] = [
    0x0040_0408_4440_4084,
    0x0020_0420_8A00_4208,
    0x0010_1900_4108_0202,
    0x0108_0608_4504_2010,
    0x0581_1041_8080_0210,
    0x2112_0804_4620_0010,
    0x1080_8208_2006_0210,
    0x03C0_8084_1022_0200,
    0x0004_0504_0444_0404,
    0x0000_0210_0142_0088,
    0x24D0_0808_0108_2102,
    0x0001_020A_0A02_0400,
    0x0000_0403_0820_0402,
    0x0004_0110_0210_0800,
    0x0401_4841_0410_4005,
    0x0801_0104_0202_0200,
    0x0040_0210_C388_0100,
    0x0404_0220_2410_8200,
    0x0810_0182_0020_4102,
    0x0004_0028_01A0_2003,
    0x0085_0408_2008_0400,
    0x8101_02C8_0888_0400,
    0x000E_9004_1088_4800,
    0x8002_0204_8084_0102,
    0x0220_2008_6509_0201,
    0x2010_100A_0202_1202,
    0x0152_0484_0802_2401,
    0x0020_0800_0208_1110,
    0x4001_0010_2100_4000,
    0x8000_4040_0A01_1002,
    0x00E4_0040_8101_1002,
    0x001C_0040_0101_2080,
    0x8004_2009_62A0_0220,
    0x8422_1002_0850_0202,
    0x2000_4022_0030_0C08,
    0x8646_0200_8008_0080,
    0x8002_0A02_0010_0808,
    0x2010_0048_8011_1000,
    0x6230_00A0_8001_1400,
    0x4200_8C03_4020_9202,
    0x0209_1882_4000_1000,
    0x4004_08A8_8400_1800,
    0x0011_0400_A608_0400,
    0x1840_060A_4402_0800,
    0x0090_0801_0400_0041,
    0x0201_0110_0080_8101,
    0x1A22_0808_0504_F080,
    0x8012_0206_0021_1212,
    0x0500_8610_1124_0000,
    0x0180_8061_0820_0800,
    0x4000_020E_0104_0044,
    0x3000_0026_1044_000A,
    0x0802_2411_0202_0002,
    0x0020_9060_6121_0001,
    0x5A84_8410_0401_0310,
    0x0004_0108_0101_1C04,
    0x000A_0101_0950_2200,
    0x0000_004A_0201_2000,
    0x5002_0101_0098_B028,
    0x8040_0028_1104_0900,
    0x0028_0000_1002_0204,
    0x0600_0020_202D_0240,
    0x8918_8448_4208_2200,
    0x4010_0110_2902_0020,
];

pub const ROOK_MAGICS: [u64; 64] = [
    0x8A80_1040_0080_0020,
    0x0140_0020_0010_0040,
    0x0280_1880_A001_7001,
    0x0100_0810_0100_0420,
    0x0200_0200_1008_0420,
    0x0300_1C00_0201_0008,
    0x8480_0080_0200_0100,
    0x2080_0880_0440_2900,
    0x0000_8000_9820_4000,
    0x2024_4010_0020_0040,
    0x0100_8020_0080_1000,
    0x0120_8008_0080_1000,
    0x0208_8080_8800_0400,
    0x0002_8022_0080_0400,
    0x2200_8001_0002_0080,
    0x0801_0000_6082_1100,
    0x0080_0440_0642_2000,
    0x0100_8080_2000_4000,
    0x1210_8A00_1020_4200,
    0x0140_8480_1000_0802,
    0x0481_8280_1400_2800,
    0x8094_0040_0200_4100,
    0x4010_0400_1001_0802,
    0x0000_0200_0880_6104,
    0x0100_4000_8020_8000,
    0x2040_0021_2008_1000,
    0x0021_2006_8010_0081,
    0x0020_1000_8008_0080,
    0x0002_000A_0020_0410,
    0x0000_0200_8080_0400,
    0x0080_0884_0010_0102,
    0x0080_0046_0004_2881,
    0x4040_0080_4080_0020,
    0x0440_0030_0020_0801,
    0x0004_2000_1100_4500,
    0x0188_0200_1010_0100,
    0x0014_8004_0180_2800,
    0x2080_0400_8080_0200,
    0x0124_0802_0400_1001,
    0x0200_0465_0200_0484,
    0x0480_4000_8008_8020,
    0x1000_4220_1003_4000,
    0x0030_2001_0011_0040,
    0x0000_1000_2101_0009,
    0x2002_0801_0011_0004,
    0x0202_0080_0400_8002,
    0x0020_0200_0401_0100,
    0x2048_4400_4082_0001,
    0x0101_0022_0040_8200,
    0x0040_8020_0040_1080,
    0x4008_1420_0441_0100,
    0x0206_0820_C012_0200,
    0x0001_0010_0408_0100,
    0x020C_0200_8004_0080,
    0x2935_6108_3002_2400,
    0x0044_4400_4100_9200,
    0x0280_0010_4080_2101,
    0x2100_1900_4000_2085,
    0x80C0_0841_0010_2001,
    0x4024_0810_0100_0421,
    0x0002_0030_A024_4872,
    0x0012_0010_0841_4402,
    0x0200_6104_900A_0804,
    0x0001_0040_8100_2402,
];

/// Which sliding geometry a magic entry indexes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slider {
    Bishop,
    Rook,
}

impl Slider {
    #[inline]
    pub fn relevant_mask(self, square: Square) -> Bitboard {
        match self {
            Slider::Bishop => bishop_relevant_mask(square),
            Slider::Rook => rook_relevant_mask(square),
        }
    }

    #[inline]
    pub fn traced_attacks(self, square: Square, occupancy: Bitboard) -> Bitboard {
        match self {
            Slider::Bishop => bishop_attacks_traced(square, occupancy),
            Slider::Rook => rook_attacks_traced(square, occupancy),
        }
    }

    #[inline]
    pub fn magic(self, square: Square) -> u64 {
        match self {
            Slider::Bishop => BISHOP_MAGICS[square.index()],
            Slider::Rook => ROOK_MAGICS[square.index()],
        }
    }
}

/// Per-square lookup parameters. `offset` locates the square's slice inside
/// the shared flat attack table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MagicEntry {
    pub mask: Bitboard,
    pub magic: u64,
    pub shift: u32,
    pub offset: usize,
}

impl MagicEntry {
    pub fn new(slider: Slider, square: Square, offset: usize) -> Self {
        let mask = slider.relevant_mask(square);
        Self {
            mask,
            magic: slider.magic(square),
            shift: 64 - mask.count_ones(),
            offset,
        }
    }

    /// Number of table slots this square owns.
    #[inline]
    pub fn table_len(&self) -> usize {
        1usize << (64 - self.shift)
    }

    /// Slot of `occupancy` within this square's slice.
    #[inline]
    pub fn index(&self, occupancy: Bitboard) -> usize {
        magic_index(occupancy, self.mask, self.magic, self.shift)
    }
}

#[inline]
pub fn magic_index(occupancy: Bitboard, mask: Bitboard, magic: u64, shift: u32) -> usize {
    ((occupancy & mask).wrapping_mul(magic) >> shift) as usize
}

/// Search for a magic constant for one square.
///
/// Candidates are sparse random numbers (AND of three draws); a candidate is
/// accepted when every occupancy subset lands on a slot that is either empty
/// or already holds the same attack set. Returns `None` after
/// `max_attempts` rejected candidates.
pub fn find_magic<R: Rng + ?Sized>(
    slider: Slider,
    square: Square,
    rng: &mut R,
    max_attempts: usize,
) -> Option<u64> {
    let mask = slider.relevant_mask(square);
    let bits = mask.count_ones();
    let shift = 64 - bits;
    let size = 1usize << bits;

    let occupancies: Vec<Bitboard> = (0..size).map(|i| occupancy_subset(i, mask)).collect();
    let attacks: Vec<Bitboard> = occupancies
        .iter()
        .map(|&occ| slider.traced_attacks(square, occ))
        .collect();

    let mut used: Vec<Option<Bitboard>> = vec![None; size];
    for _ in 0..max_attempts {
        let candidate = rng.random::<u64>() & rng.random::<u64>() & rng.random::<u64>();

        // Cheap reject: the high byte of mask * magic should be well populated.
        if (mask.wrapping_mul(candidate) & 0xFF00_0000_0000_0000).count_ones() < 6 {
            continue;
        }

        used.fill(None);
        let collision_free = occupancies.iter().zip(&attacks).all(|(&occ, &attack)| {
            let idx = magic_index(occ, mask, candidate, shift);
            match used[idx] {
                None => {
                    used[idx] = Some(attack);
                    true
                }
                Some(existing) => existing == attack,
            }
        });

        if collision_free {
            return Some(candidate);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn assert_collision_free(slider: Slider, square: Square, magic: u64) {
        let entry = MagicEntry {
            magic,
            ..MagicEntry::new(slider, square, 0)
        };
        let mut slots: Vec<Option<Bitboard>> = vec![None; entry.table_len()];
        for i in 0..entry.table_len() {
            let occ = occupancy_subset(i, entry.mask);
            let attack = slider.traced_attacks(square, occ);
            let idx = entry.index(occ);
            if let Some(existing) = slots[idx] {
                assert_eq!(existing, attack, "collision for {slider:?} on {square}");
            }
            slots[idx] = Some(attack);
        }
    }

    #[test]
    fn precomputed_magics_are_collision_free() {
        for square in Square::iter() {
            assert_collision_free(Slider::Bishop, square, BISHOP_MAGICS[square.index()]);
            assert_collision_free(Slider::Rook, square, ROOK_MAGICS[square.index()]);
        }
    }

    #[test]
    fn finder_produces_usable_bishop_magic() {
        let mut rng = StdRng::seed_from_u64(0x5EED);
        let square = Square::new(27).expect("d4");
        let magic = find_magic(Slider::Bishop, square, &mut rng, 1_000_000)
            .expect("a bishop magic for d4 should be found quickly");
        assert_collision_free(Slider::Bishop, square, magic);
    }
}
