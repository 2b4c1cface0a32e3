//! Generation state: liveness bitmap plus transition-relative counts

use serde::{Deserialize, Serialize};

/// One generation of the simulation.
///
/// Liveness is a fixed-size boolean vector indexed by cell index, so
/// membership checks are O(1) and iteration is cache-friendly. The three
/// counts describe the transition that *produced* this generation:
/// `dying_cell_count` is the number of cells that were alive in the previous
/// generation and died in this one, which is why the counts are recomputed on
/// every transition rather than derived from the liveness vector alone.
///
/// With cell drift enabled, two cells can collide onto the same index; the
/// boolean representation deduplicates them, so `living_cell_count` may
/// exceed the number of distinct live indices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationState {
    cells: Vec<bool>,
    pub living_cell_count: usize,
    pub dying_cell_count: usize,
    pub dead_cell_count: usize,
}

impl GenerationState {
    /// Wrap a freshly seeded liveness vector as generation zero.
    ///
    /// Nothing died to produce the initial state, so `dying_cell_count` is 0.
    pub fn initial(cells: Vec<bool>) -> Self {
        let living_cell_count = cells.iter().filter(|&&alive| alive).count();
        let dead_cell_count = cells.len() - living_cell_count;
        Self {
            cells,
            living_cell_count,
            dying_cell_count: 0,
            dead_cell_count,
        }
    }

    /// Wrap the outcome of a rule application.
    pub fn from_transition(
        cells: Vec<bool>,
        living_cell_count: usize,
        dying_cell_count: usize,
    ) -> Self {
        let dead_cell_count = cells.len() - living_cell_count - dying_cell_count;
        Self {
            cells,
            living_cell_count,
            dying_cell_count,
            dead_cell_count,
        }
    }

    pub fn total_cells(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_alive(&self, index: usize) -> bool {
        self.cells[index]
    }

    /// Iterate the indices of live cells in ascending order
    pub fn live_cells(&self) -> impl Iterator<Item = usize> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &alive)| alive)
            .map(|(index, _)| index)
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|&alive| !alive)
    }

    /// Canonical fingerprint of the live-cell set, packed 64 cells per word.
    ///
    /// Two states have equal fingerprints exactly when their live-cell sets
    /// are equal, so cycle detection never false-positives.
    pub fn fingerprint(&self) -> Vec<u64> {
        let mut words = vec![0u64; self.cells.len().div_ceil(64)];
        for (index, &alive) in self.cells.iter().enumerate() {
            if alive {
                words[index / 64] |= 1u64 << (index % 64);
            }
        }
        words
    }
}
