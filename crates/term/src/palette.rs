//! Display colour per piece identifier.
//!
//! Pieces are coloured by identity, not by shape. Each newly seen identifier
//! gets a random colour from [`COLORS`] that differs from the colour handed
//! out just before it, so two consecutively spawned pieces never share a
//! colour. Identifiers that have left the board are forgotten.

use std::collections::BTreeMap;

use crate::core::{GameSnapshot, SimpleRng};
use crate::fb::Rgb;
use crate::types::{PieceId, EMPTY};

/// Named piece colours.
pub const COLORS: [(&str, Rgb); 5] = [
    ("white", Rgb::new(240, 240, 240)),
    ("red", Rgb::new(205, 49, 49)),
    ("green", Rgb::new(0, 215, 95)),
    ("yellow", Rgb::new(255, 215, 0)),
    ("orange", Rgb::new(255, 135, 0)),
];

#[derive(Debug, Clone)]
pub struct Palette {
    rng: SimpleRng,
    assigned: BTreeMap<PieceId, usize>,
    last: Option<usize>,
}

impl Palette {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
            assigned: BTreeMap::new(),
            last: None,
        }
    }

    /// Colour identifiers newly present in `snap` (ascending) and drop the
    /// ones no longer on the board.
    pub fn sync(&mut self, snap: &GameSnapshot) {
        let mut present: Vec<PieceId> = snap
            .board
            .iter()
            .flatten()
            .copied()
            .filter(|&id| id != EMPTY)
            .collect();
        present.sort_unstable();
        present.dedup();

        self.assigned.retain(|id, _| present.binary_search(id).is_ok());
        for id in present {
            if !self.assigned.contains_key(&id) {
                let color = self.pick();
                self.assigned.insert(id, color);
            }
        }
    }

    /// Random colour index, never equal to the previous pick.
    fn pick(&mut self) -> usize {
        let n = COLORS.len() as u32;
        let idx = match self.last {
            // Draw from the other n-1 colours and skip over the previous one
            Some(prev) => {
                let k = self.rng.next_range(n - 1) as usize;
                if k >= prev {
                    k + 1
                } else {
                    k
                }
            }
            None => self.rng.next_range(n) as usize,
        };
        self.last = Some(idx);
        idx
    }

    pub fn color_of(&self, id: PieceId) -> Option<Rgb> {
        self.assigned.get(&id).map(|&i| COLORS[i].1)
    }

    pub fn name_of(&self, id: PieceId) -> Option<&'static str> {
        self.assigned.get(&id).map(|&i| COLORS[i].0)
    }

    pub fn len(&self) -> usize {
        self.assigned.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assigned.is_empty()
    }

    pub fn clear(&mut self) {
        self.assigned.clear();
        self.last = None;
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new(1)
    }
}
