//! Triangular principal-variation table.
//!
//! Row `ply` holds the best line found from that ply downward. When a move
//! raises alpha at `ply`, the row becomes that move followed by the row of
//! `ply + 1`. The root row of the last completed iteration is kept aside so
//! move ordering can follow it during the next iteration.

use crate::moves::move_descriptions::Move;

pub const MAX_PLY: usize = 128;

#[derive(Debug, Clone)]
pub struct PvTable {
    lines: Vec<[Move; MAX_PLY]>,
    lengths: [usize; MAX_PLY],
    previous: Vec<Move>,
}

impl Default for PvTable {
    fn default() -> Self {
        Self::new()
    }
}

impl PvTable {
    pub fn new() -> Self {
        Self {
            lines: vec![[Move::NULL; MAX_PLY]; MAX_PLY],
            lengths: [0; MAX_PLY],
            previous: Vec::new(),
        }
    }

    /// Empty the row for a node being entered at `ply`.
    #[inline]
    pub fn reset_ply(&mut self, ply: usize) {
        if ply < MAX_PLY {
            self.lengths[ply] = ply;
        }
    }

    /// `mv` became the best move at `ply`; copy up the child's line.
    pub fn update(&mut self, ply: usize, mv: Move) {
        if ply >= MAX_PLY {
            return;
        }
        self.lines[ply][ply] = mv;

        let child = ply + 1;
        let child_len = if child < MAX_PLY {
            self.lengths[child].max(child)
        } else {
            child
        };
        if child < MAX_PLY && child_len > child {
            let (upper, lower) = self.lines.split_at_mut(child);
            upper[ply][child..child_len].copy_from_slice(&lower[0][child..child_len]);
        }
        self.lengths[ply] = child_len.min(MAX_PLY);
    }

    /// Line at `ply` is just `mv` (used when a table hit ends the search).
    #[inline]
    pub fn set_single(&mut self, ply: usize, mv: Move) {
        if ply < MAX_PLY {
            self.lines[ply][ply] = mv;
            self.lengths[ply] = ply + 1;
        }
    }

    #[inline]
    pub fn line(&self, ply: usize) -> &[Move] {
        if ply >= MAX_PLY {
            return &[];
        }
        &self.lines[ply][ply..self.lengths[ply].max(ply)]
    }

    pub fn principal_line(&self) -> Vec<Move> {
        self.line(0).to_vec()
    }

    /// Snapshot the current root line as the line to follow next iteration.
    /// An empty root line (a failed-low window) keeps the older snapshot.
    pub fn begin_iteration(&mut self) {
        if self.lengths[0] > 0 {
            self.previous = self.principal_line();
        }
    }

    /// Move the previous iteration's line played at `ply`, if it reached it.
    #[inline]
    pub fn pv_move(&self, ply: usize) -> Option<Move> {
        self.previous.get(ply).copied()
    }

    pub fn clear(&mut self) {
        for line in &mut self.lines {
            line.fill(Move::NULL);
        }
        self.lengths = [0; MAX_PLY];
        self.previous.clear();
        log::trace!("principal variation table cleared");
    }
}
