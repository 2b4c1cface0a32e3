//! Simulation engine: grid geometry, transition rule, state history

pub mod grid;
pub mod simulation;
pub mod state;
pub mod transition;

pub use grid::GridModel;
pub use simulation::{Simulation, SimulationParams};
pub use state::GenerationState;
pub use transition::TransitionEngine;

use thiserror::Error;

/// Construction and programmer errors surfaced by the engine.
///
/// Once a simulation is validly constructed the transition function is
/// total, so no recoverable runtime errors exist past this taxonomy.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("grid dimensions must be positive, got {num_columns}x{num_rows}")]
    InvalidDimensions {
        num_columns: usize,
        num_rows: usize,
    },

    #[error("{name} must be within [0, 1], got {value}")]
    ProbabilityOutOfRange { name: &'static str, value: f64 },

    #[error("state index {index} out of range, history holds {state_count} state(s)")]
    StateIndexOutOfRange { index: usize, state_count: usize },

    #[error("max states must be at least 1, got {max_states}")]
    InvalidMaxStates { max_states: usize },

    #[error("history already generated for this simulation")]
    AlreadyGenerated,
}
