//! Game of Life playback engine
//!
//! This library simulates Conway's Game of Life on a bounded rectangular
//! grid, detects when the board cycles or reaches a fixed point, and exposes
//! the full state history for interactive playback. Renderers consume the
//! engine's `(state, previous state, index)` shape and nothing more.

pub mod analysis;
pub mod config;
pub mod engine;
pub mod playback;
pub mod render;

pub use analysis::{AnalysisOutcome, AnalysisReport, CycleAnalyzer};
pub use config::Settings;
pub use engine::{GenerationState, Simulation, SimulationParams};
pub use playback::PlaybackSession;

use anyhow::Result;

/// Create a simulation from settings and generate its full history
pub fn run_simulation(settings: &Settings) -> Result<(Simulation, AnalysisReport)> {
    settings.validate()?;
    let mut simulation = Simulation::new(settings.simulation_params())?;
    let report = simulation.generate(settings.analysis.max_states)?;
    Ok((simulation, report))
}
