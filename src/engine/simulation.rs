//! The simulation object: seeded history owner and public engine surface

use super::{EngineError, GenerationState, GridModel, TransitionEngine};
use crate::analysis::{AnalysisReport, CycleAnalyzer};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Constructor parameters for a [`Simulation`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationParams {
    pub num_columns: usize,
    pub num_rows: usize,
    /// Probability in [0, 1] that each cell starts alive
    pub live_cell_density: f64,
    /// Probability in [0, 1] that a live cell drifts each generation
    pub cell_movement: f64,
    /// Fixed RNG seed for reproducible runs; `None` seeds from entropy
    pub seed: Option<u64>,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            num_columns: 20,
            num_rows: 10,
            live_cell_density: 0.25,
            cell_movement: 0.0,
            seed: None,
        }
    }
}

/// A fixed-grid Game of Life run and its generated history.
///
/// The simulation exclusively owns its `states` sequence: generation appends
/// to it, playback reads it through shared references, and nothing ever
/// shrinks or reorders it. Dimensions are fixed at creation; "restart" means
/// the caller builds a new simulation.
#[derive(Debug)]
pub struct Simulation {
    grid: GridModel,
    engine: TransitionEngine,
    rng: ChaCha8Rng,
    states: Vec<GenerationState>,
    generated: bool,
}

impl Simulation {
    /// Create a simulation with a stochastically seeded initial state.
    ///
    /// Fails for non-positive dimensions or probabilities outside [0, 1].
    pub fn new(params: SimulationParams) -> Result<Self, EngineError> {
        let grid = GridModel::new(params.num_columns, params.num_rows)?;

        if !(0.0..=1.0).contains(&params.live_cell_density) {
            return Err(EngineError::ProbabilityOutOfRange {
                name: "live_cell_density",
                value: params.live_cell_density,
            });
        }

        let engine = TransitionEngine::new(grid, params.cell_movement)?;

        let mut rng = match params.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        let cells = (0..grid.total_cells())
            .map(|_| rng.gen_bool(params.live_cell_density))
            .collect();
        let initial = GenerationState::initial(cells);

        Ok(Self {
            grid,
            engine,
            rng,
            states: vec![initial],
            generated: false,
        })
    }

    pub fn grid(&self) -> &GridModel {
        &self.grid
    }

    pub fn num_columns(&self) -> usize {
        self.grid.num_columns()
    }

    pub fn num_rows(&self) -> usize {
        self.grid.num_rows()
    }

    /// Number of generations in the history, including the initial state
    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    /// Read-only view of the full history
    pub fn states(&self) -> &[GenerationState] {
        &self.states
    }

    /// The generation at `index`, failing for out-of-range rather than
    /// clamping
    pub fn state_at(&self, index: usize) -> Result<&GenerationState, EngineError> {
        self.states
            .get(index)
            .ok_or(EngineError::StateIndexOutOfRange {
                index,
                state_count: self.states.len(),
            })
    }

    /// Grow the history until a cycle, a fixed point, or `max_states`.
    ///
    /// Runs the cycle analysis to completion in one call; hosts that need to
    /// interleave generation with other work drive a [`CycleAnalyzer`] in
    /// budgeted batches instead. Callable once per simulation lifetime.
    pub fn generate(&mut self, max_states: usize) -> Result<AnalysisReport, EngineError> {
        let mut analyzer = CycleAnalyzer::new(self, max_states)?;
        analyzer.run_to_completion(self)
    }

    /// Compute and append the next generation, returning its index.
    ///
    /// Used by the cycle analyzer; each call depends on the full output of
    /// the previous one, so steps never run concurrently.
    pub(crate) fn advance(&mut self) -> usize {
        let next = self
            .engine
            .next(self.states.last().expect("history is never empty"), &mut self.rng);
        self.states.push(next);
        self.states.len() - 1
    }

    pub(crate) fn mark_generated(&mut self) -> Result<(), EngineError> {
        if self.generated {
            return Err(EngineError::AlreadyGenerated);
        }
        self.generated = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(density: f64, seed: u64) -> SimulationParams {
        SimulationParams {
            num_columns: 8,
            num_rows: 6,
            live_cell_density: density,
            cell_movement: 0.0,
            seed: Some(seed),
        }
    }

    #[test]
    fn test_rejects_invalid_parameters() {
        assert!(matches!(
            Simulation::new(SimulationParams {
                num_columns: 0,
                ..SimulationParams::default()
            }),
            Err(EngineError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            Simulation::new(SimulationParams {
                live_cell_density: 1.5,
                ..SimulationParams::default()
            }),
            Err(EngineError::ProbabilityOutOfRange { .. })
        ));
        assert!(matches!(
            Simulation::new(SimulationParams {
                cell_movement: -0.2,
                ..SimulationParams::default()
            }),
            Err(EngineError::ProbabilityOutOfRange { .. })
        ));
    }

    #[test]
    fn test_initial_state_respects_density_extremes() {
        let empty = Simulation::new(params(0.0, 1)).unwrap();
        assert!(empty.state_at(0).unwrap().is_empty());

        let full = Simulation::new(params(1.0, 1)).unwrap();
        assert_eq!(full.state_at(0).unwrap().living_cell_count, 48);
    }

    #[test]
    fn test_seeding_is_reproducible() {
        let a = Simulation::new(params(0.4, 99)).unwrap();
        let b = Simulation::new(params(0.4, 99)).unwrap();
        assert_eq!(a.state_at(0).unwrap(), b.state_at(0).unwrap());
    }

    #[test]
    fn test_state_at_out_of_range() {
        let simulation = Simulation::new(params(0.3, 5)).unwrap();
        assert!(simulation.state_at(0).is_ok());
        assert_eq!(
            simulation.state_at(1),
            Err(EngineError::StateIndexOutOfRange {
                index: 1,
                state_count: 1,
            })
        );
    }

    #[test]
    fn test_generate_is_single_use() {
        let mut simulation = Simulation::new(params(0.3, 5)).unwrap();
        simulation.generate(50).unwrap();
        assert_eq!(simulation.generate(50), Err(EngineError::AlreadyGenerated));
    }

    #[test]
    fn test_history_is_append_only() {
        let mut simulation = Simulation::new(params(0.3, 7)).unwrap();
        let initial = simulation.state_at(0).unwrap().clone();

        simulation.generate(100).unwrap();

        assert!(simulation.state_count() > 1);
        assert_eq!(simulation.state_at(0).unwrap(), &initial);
    }
}
