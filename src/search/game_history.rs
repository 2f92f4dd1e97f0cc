//! Repetition log of position hashes.

/// Hashes of positions visited in the game so far, plus the positions on the
/// current search path while a search is running. Any hit counts as a draw.
#[derive(Debug, Clone, Default)]
pub struct GameHistory {
    hashes: Vec<u64>,
}

impl GameHistory {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn push(&mut self, hash: u64) {
        self.hashes.push(hash);
    }

    #[inline]
    pub fn pop(&mut self) -> Option<u64> {
        self.hashes.pop()
    }

    #[inline]
    pub fn is_repetition(&self, hash: u64) -> bool {
        self.hashes.contains(&hash)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.hashes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.hashes.is_empty()
    }

    pub fn clear(&mut self) {
        self.hashes.clear();
        log::trace!("game history cleared");
    }
}
