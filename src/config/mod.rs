//! Configuration management for the simulation and its playback

pub mod settings;

pub use settings::{
    AnalysisConfig, CliOverrides, GridConfig, PlaybackConfig, SeedingConfig, Settings,
    MAX_CELL_COUNT, MAX_FRAMERATE,
};
