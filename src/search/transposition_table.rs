//! Fixed-size transposition table keyed by Zobrist hash.
//!
//! Direct-mapped: the slot is the low bits of the key and a store always
//! overwrites whatever occupied the slot. There is no depth or age preference.

use crate::moves::move_descriptions::Move;
use crate::search::board_scoring::MATE_THRESHOLD;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    Exact,
    /// Score is at least this (search failed high).
    Lower,
    /// Score is at most this (no move raised alpha).
    Upper,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TTEntry {
    pub key: u64,
    pub depth: i32,
    pub score: i32,
    pub bound: Bound,
    pub best_move: Move,
}

impl TTEntry {
    /// Score usable at a node searched to `depth` with window `(alpha, beta)`,
    /// clamped fail-hard to the window. `None` when the entry is too shallow
    /// or its bound does not decide the node.
    pub fn cutoff_score(&self, depth: i32, alpha: i32, beta: i32, ply: usize) -> Option<i32> {
        if self.depth < depth {
            return None;
        }
        let score = score_from_tt(self.score, ply);
        match self.bound {
            Bound::Exact => Some(score),
            Bound::Upper if score <= alpha => Some(alpha),
            Bound::Lower if score >= beta => Some(beta),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TTStats {
    pub probes: u64,
    pub hits: u64,
    pub stores: u64,
}

#[derive(Debug, Clone)]
pub struct TranspositionTable {
    entries: Vec<Option<TTEntry>>,
    mask: usize,
    stats: TTStats,
}

impl TranspositionTable {
    /// Table using at most `size_mb` megabytes, rounded down to a power-of-two
    /// slot count. A zero budget still yields one slot.
    pub fn new_with_mb(size_mb: usize) -> Self {
        let bytes = size_mb.max(1).saturating_mul(1024 * 1024);
        let entry_size = std::mem::size_of::<Option<TTEntry>>().max(1);
        let fit = (bytes / entry_size).max(1);
        let count = if fit.is_power_of_two() {
            fit
        } else {
            fit.next_power_of_two() >> 1
        };
        Self {
            entries: vec![None; count],
            mask: count - 1,
            stats: TTStats::default(),
        }
    }

    #[inline]
    pub fn clear(&mut self) {
        self.entries.fill(None);
        self.stats = TTStats::default();
        log::trace!("transposition table cleared ({} slots)", self.entries.len());
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn stats(&self) -> TTStats {
        self.stats
    }

    #[inline]
    fn idx(&self, key: u64) -> usize {
        (key as usize) & self.mask
    }

    pub fn probe(&mut self, key: u64) -> Option<TTEntry> {
        self.stats.probes += 1;
        let hit = self.entries[self.idx(key)].filter(|e| e.key == key);
        if hit.is_some() {
            self.stats.hits += 1;
        }
        hit
    }

    pub fn store(&mut self, entry: TTEntry) {
        self.stats.stores += 1;
        let idx = self.idx(entry.key);
        self.entries[idx] = Some(entry);
    }
}

/// Mate scores are stored relative to the node rather than the root so an
/// entry reached at a different ply still encodes the right distance.
#[inline]
pub fn score_to_tt(score: i32, ply: usize) -> i32 {
    let ply = ply as i32;
    if score >= MATE_THRESHOLD {
        score + ply
    } else if score <= -MATE_THRESHOLD {
        score - ply
    } else {
        score
    }
}

#[inline]
pub fn score_from_tt(score: i32, ply: usize) -> i32 {
    let ply = ply as i32;
    if score >= MATE_THRESHOLD {
        score - ply
    } else if score <= -MATE_THRESHOLD {
        score + ply
    } else {
        score
    }
}
