//! Killer moves for ordering quiet moves.

use crate::moves::move_descriptions::Move;
use crate::search::pv_table::MAX_PLY;

/// Two most recent quiet moves that caused a beta cutoff, per ply.
#[derive(Debug, Clone)]
pub struct KillerTable {
    killers: Vec<[Move; 2]>,
}

impl Default for KillerTable {
    fn default() -> Self {
        Self::new()
    }
}

impl KillerTable {
    pub fn new() -> Self {
        Self {
            killers: vec![[Move::NULL; 2]; MAX_PLY],
        }
    }

    #[inline]
    pub fn first(&self, ply: usize) -> Move {
        self.killers.get(ply).map_or(Move::NULL, |k| k[0])
    }

    #[inline]
    pub fn second(&self, ply: usize) -> Move {
        self.killers.get(ply).map_or(Move::NULL, |k| k[1])
    }

    /// Newest killer goes first; re-pushing the current first is a no-op.
    pub fn push(&mut self, ply: usize, mv: Move) {
        let Some(slot) = self.killers.get_mut(ply) else {
            return;
        };
        if slot[0] != mv {
            slot[1] = slot[0];
        }
        slot[0] = mv;
    }

    pub fn clear(&mut self) {
        self.killers.fill([Move::NULL; 2]);
        log::trace!("killer table cleared");
    }
}
