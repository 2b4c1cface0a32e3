//! History generation and cycle detection

pub mod cycle;

pub use cycle::{AnalysisOutcome, AnalysisReport, BatchStatus, CycleAnalyzer};
