//! Generation transition: the B3/S23 rule plus optional cell drift

use super::{EngineError, GenerationState, GridModel};
use rand::seq::SliceRandom;
use rand::Rng;
use rayon::prelude::*;

/// What the rule decided for a single cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CellFate {
    Survives,
    Born,
    /// Alive last generation, dead now (under- or overpopulation)
    Dies,
    StaysDead,
}

/// Computes generation `n + 1` from generation `n`.
///
/// The rule reads only from the previous state, so every cell's fate is
/// independent of iteration order and the per-cell evaluation can run in
/// parallel without changing the result.
#[derive(Debug, Clone)]
pub struct TransitionEngine {
    grid: GridModel,
    cell_movement: f64,
}

impl TransitionEngine {
    pub fn new(grid: GridModel, cell_movement: f64) -> Result<Self, EngineError> {
        if !(0.0..=1.0).contains(&cell_movement) {
            return Err(EngineError::ProbabilityOutOfRange {
                name: "cell_movement",
                value: cell_movement,
            });
        }
        Ok(Self {
            grid,
            cell_movement,
        })
    }

    pub fn grid(&self) -> &GridModel {
        &self.grid
    }

    /// Apply the standard birth/survival rule, then drift if configured.
    ///
    /// Drift relocations draw from `rng`; with `cell_movement == 0` the rng
    /// is untouched and the transition is a pure function of `previous`.
    pub fn next<R: Rng>(&self, previous: &GenerationState, rng: &mut R) -> GenerationState {
        let fates: Vec<CellFate> = (0..self.grid.total_cells())
            .into_par_iter()
            .map(|index| {
                let alive = previous.is_alive(index);
                let live_neighbors = self
                    .grid
                    .neighbors_of(index)
                    .into_iter()
                    .filter(|&neighbor| previous.is_alive(neighbor))
                    .count();

                match (alive, live_neighbors) {
                    (true, 2) | (true, 3) => CellFate::Survives,
                    (true, _) => CellFate::Dies,
                    (false, 3) => CellFate::Born,
                    (false, _) => CellFate::StaysDead,
                }
            })
            .collect();

        let mut cells = vec![false; self.grid.total_cells()];
        let mut living_cell_count = 0;
        let mut dying_cell_count = 0;

        for (index, fate) in fates.iter().enumerate() {
            match fate {
                CellFate::Survives | CellFate::Born => {
                    cells[index] = true;
                    living_cell_count += 1;
                }
                CellFate::Dies => dying_cell_count += 1,
                CellFate::StaysDead => {}
            }
        }

        if self.cell_movement > 0.0 {
            cells = self.drift(&cells, rng);
        }

        GenerationState::from_transition(cells, living_cell_count, dying_cell_count)
    }

    /// Relocate each live cell, with probability `cell_movement`, to one
    /// uniformly random in-bounds orthogonal neighbor.
    ///
    /// Runs strictly after the rule, in ascending index order so a fixed seed
    /// reproduces the same relocations. A cell with no orthogonal neighbor
    /// (only possible on a 1x1 grid) stays in place. Two cells landing on the
    /// same index collapse into one live cell; drift changes which indices
    /// are live, never the counts.
    fn drift<R: Rng>(&self, cells: &[bool], rng: &mut R) -> Vec<bool> {
        let mut drifted = vec![false; cells.len()];

        for index in cells
            .iter()
            .enumerate()
            .filter(|(_, &alive)| alive)
            .map(|(index, _)| index)
        {
            let destination = if rng.gen_bool(self.cell_movement) {
                let candidates = self.grid.orthogonal_neighbors_of(index);
                candidates.choose(rng).copied().unwrap_or(index)
            } else {
                index
            };
            drifted[destination] = true;
        }

        drifted
    }
}
