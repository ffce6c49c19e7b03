//! Piece registry - remaining cell count per live identifier
//!
//! An entry is created at spawn with the shape's cell count and decremented
//! for every cell a line clear removes. It disappears exactly when the count
//! reaches zero, so `contains(id)` means "some cell of `id` is on the board".

use std::collections::BTreeMap;

use crate::types::PieceId;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registry {
    counts: BTreeMap<PieceId, u8>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `id` with `cells` occupied cells. Zero registers nothing.
    pub fn register(&mut self, id: PieceId, cells: u8) {
        if cells > 0 {
            self.counts.insert(id, cells);
        }
    }

    /// Account for one cleared cell of `id`.
    ///
    /// Returns true when this removed the last cell and the entry is gone.
    /// Unknown identifiers are ignored.
    pub fn release_cell(&mut self, id: PieceId) -> bool {
        let Some(count) = self.counts.get_mut(&id) else {
            return false;
        };
        *count = count.saturating_sub(1);
        if *count == 0 {
            self.counts.remove(&id);
            return true;
        }
        false
    }

    pub fn remaining(&self, id: PieceId) -> Option<u8> {
        self.counts.get(&id).copied()
    }

    pub fn contains(&self, id: PieceId) -> bool {
        self.counts.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Live identifiers in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = PieceId> + '_ {
        self.counts.keys().copied()
    }
}
