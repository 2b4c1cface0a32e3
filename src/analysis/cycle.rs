//! Cycle detection over the generated state history

use crate::engine::{EngineError, Simulation};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Why generation stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum AnalysisOutcome {
    /// The newest state repeats an earlier one. A fixed point is the
    /// 1-length case: the state repeats its immediate predecessor.
    CycleDetected {
        /// Index of the first occurrence of the repeated state; playback can
        /// loop precisely between here and the end of the history.
        cycle_start: usize,
    },
    /// The history hit the caller-supplied bound before any state repeated
    MaxStatesReached,
}

/// Result of a completed analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub outcome: AnalysisOutcome,
    /// Total states in the history, including the initial state
    pub state_count: usize,
}

impl AnalysisReport {
    /// Length of the detected loop, if one was found.
    ///
    /// The final state duplicates the state at `cycle_start`, so the loop
    /// spans `cycle_start..state_count - 1`.
    pub fn cycle_length(&self) -> Option<usize> {
        match self.outcome {
            AnalysisOutcome::CycleDetected { cycle_start } => {
                Some(self.state_count - 1 - cycle_start)
            }
            AnalysisOutcome::MaxStatesReached => None,
        }
    }
}

/// Progress of one budgeted batch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchStatus {
    /// Budget spent; call again to keep generating
    Yielded { state_count: usize },
    Complete(AnalysisReport),
}

/// Drives repeated transitions until a repeat or a state bound.
///
/// Keeps a fingerprint table mapping each state seen so far to its index,
/// seeded with the initial state, so both cycles and fixed points are caught
/// the first time a state recurs. Generation can be long-running for large
/// boards, so [`run_batch`](Self::run_batch) yields after a time budget and
/// the host interleaves calls with its own tick loop; the computation itself
/// stays single-threaded and deterministic for a fixed seed.
#[derive(Debug)]
pub struct CycleAnalyzer {
    seen: FxHashMap<Vec<u64>, usize>,
    max_states: usize,
    report: Option<AnalysisReport>,
}

impl CycleAnalyzer {
    /// Default per-batch time budget, mirroring a ~10ms host tick
    pub const DEFAULT_BATCH_BUDGET: Duration = Duration::from_millis(10);

    /// Bind an analyzer to a simulation's history.
    ///
    /// Fails if `max_states` would not even admit the initial state, or if
    /// the simulation's history was already generated.
    pub fn new(simulation: &mut Simulation, max_states: usize) -> Result<Self, EngineError> {
        if max_states == 0 {
            return Err(EngineError::InvalidMaxStates { max_states });
        }
        simulation.mark_generated()?;

        let mut seen = FxHashMap::default();
        seen.insert(simulation.state_at(0)?.fingerprint(), 0);

        Ok(Self {
            seen,
            max_states,
            report: None,
        })
    }

    /// Generate states for up to `budget`, then yield.
    pub fn run_batch(
        &mut self,
        simulation: &mut Simulation,
        budget: Duration,
    ) -> Result<BatchStatus, EngineError> {
        let started = Instant::now();

        loop {
            if let Some(report) = self.report {
                return Ok(BatchStatus::Complete(report));
            }

            if simulation.state_count() >= self.max_states {
                return Ok(BatchStatus::Complete(self.finish(
                    AnalysisOutcome::MaxStatesReached,
                    simulation.state_count(),
                )));
            }

            let index = simulation.advance();
            let fingerprint = simulation.state_at(index)?.fingerprint();

            if let Some(&cycle_start) = self.seen.get(&fingerprint) {
                return Ok(BatchStatus::Complete(
                    self.finish(AnalysisOutcome::CycleDetected { cycle_start }, index + 1),
                ));
            }
            self.seen.insert(fingerprint, index);

            if started.elapsed() >= budget {
                return Ok(BatchStatus::Yielded {
                    state_count: simulation.state_count(),
                });
            }
        }
    }

    /// Generate without yielding until a terminal condition
    pub fn run_to_completion(
        &mut self,
        simulation: &mut Simulation,
    ) -> Result<AnalysisReport, EngineError> {
        loop {
            if let BatchStatus::Complete(report) = self.run_batch(simulation, Duration::MAX)? {
                return Ok(report);
            }
        }
    }

    fn finish(&mut self, outcome: AnalysisOutcome, state_count: usize) -> AnalysisReport {
        let report = AnalysisReport {
            outcome,
            state_count,
        };
        self.report = Some(report);
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::SimulationParams;

    fn simulation(columns: usize, rows: usize, density: f64, seed: u64) -> Simulation {
        Simulation::new(SimulationParams {
            num_columns: columns,
            num_rows: rows,
            live_cell_density: density,
            cell_movement: 0.0,
            seed: Some(seed),
        })
        .unwrap()
    }

    #[test]
    fn test_rejects_zero_max_states() {
        let mut sim = simulation(4, 4, 0.3, 1);
        assert_eq!(
            CycleAnalyzer::new(&mut sim, 0).err(),
            Some(EngineError::InvalidMaxStates { max_states: 0 })
        );
    }

    #[test]
    fn test_empty_board_is_an_immediate_fixed_point() {
        let mut sim = simulation(5, 5, 0.0, 1);
        let report = sim.generate(100).unwrap();

        // Generation 1 repeats the empty initial state.
        assert_eq!(
            report.outcome,
            AnalysisOutcome::CycleDetected { cycle_start: 0 }
        );
        assert_eq!(report.state_count, 2);
        assert_eq!(report.cycle_length(), Some(1));

        let first = sim.state_at(1).unwrap();
        assert!(first.is_empty());
        assert_eq!(first.living_cell_count, 0);
        assert_eq!(first.dying_cell_count, 0);
    }

    #[test]
    fn test_max_states_bounds_the_history() {
        // Density 0.5 on a small board can still wander; the bound must hold
        // regardless of whether a cycle exists within it.
        let mut sim = simulation(8, 8, 0.5, 3);
        let report = sim.generate(5).unwrap();

        assert!(sim.state_count() <= 5);
        assert_eq!(report.state_count, sim.state_count());
    }

    #[test]
    fn test_max_states_one_keeps_only_the_initial_state() {
        let mut sim = simulation(8, 8, 0.5, 3);
        let report = sim.generate(1).unwrap();

        assert_eq!(report.outcome, AnalysisOutcome::MaxStatesReached);
        assert_eq!(sim.state_count(), 1);
    }

    #[test]
    fn test_analysis_always_halts_on_small_boards() {
        // A 3x3 board has at most 512 distinct states, so with a generous
        // bound every seed terminates in a cycle or fixed point.
        for seed in 0..20 {
            let mut sim = simulation(3, 3, 0.5, seed);
            let report = sim.generate(1000).unwrap();
            assert!(matches!(
                report.outcome,
                AnalysisOutcome::CycleDetected { .. }
            ));
        }
    }

    #[test]
    fn test_cycle_start_marks_first_occurrence() {
        let mut sim = simulation(6, 6, 0.4, 11);
        let report = sim.generate(500).unwrap();

        if let AnalysisOutcome::CycleDetected { cycle_start } = report.outcome {
            let last = sim.state_at(report.state_count - 1).unwrap();
            let first = sim.state_at(cycle_start).unwrap();
            assert_eq!(last.fingerprint(), first.fingerprint());

            // No earlier state matches, or the cycle would have closed sooner.
            for index in 0..cycle_start {
                assert_ne!(
                    sim.state_at(index).unwrap().fingerprint(),
                    last.fingerprint()
                );
            }
        } else {
            panic!("expected a cycle within 500 states");
        }
    }

    #[test]
    fn test_batched_run_matches_single_run() {
        let mut batched = simulation(6, 6, 0.4, 21);
        let mut analyzer = CycleAnalyzer::new(&mut batched, 200).unwrap();
        let batched_report = loop {
            // A zero budget forces one generation per batch.
            match analyzer.run_batch(&mut batched, Duration::ZERO).unwrap() {
                BatchStatus::Complete(report) => break report,
                BatchStatus::Yielded { .. } => {}
            }
        };

        let mut single = simulation(6, 6, 0.4, 21);
        let single_report = single.generate(200).unwrap();

        assert_eq!(batched_report, single_report);
        assert_eq!(batched.states(), single.states());
    }

    #[test]
    fn test_completed_analyzer_keeps_reporting() {
        let mut sim = simulation(5, 5, 0.0, 1);
        let mut analyzer = CycleAnalyzer::new(&mut sim, 10).unwrap();
        let first = analyzer.run_to_completion(&mut sim).unwrap();
        let again = analyzer
            .run_batch(&mut sim, Duration::from_millis(1))
            .unwrap();

        assert_eq!(again, BatchStatus::Complete(first));
        assert_eq!(sim.state_count(), first.state_count);
    }
}
