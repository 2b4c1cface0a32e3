//! Configuration for simulation, analysis, and playback

use crate::engine::SimulationParams;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Upper bound on total cells; keeps seeding and analysis interactive
pub const MAX_CELL_COUNT: usize = 10_000;

/// Upper bound on playback frames per second
pub const MAX_FRAMERATE: u32 = 50;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub grid: GridConfig,
    pub seeding: SeedingConfig,
    pub analysis: AnalysisConfig,
    pub playback: PlaybackConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridConfig {
    pub num_columns: usize,
    pub num_rows: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedingConfig {
    /// Probability in [0, 1] that each cell starts alive
    pub live_cell_density: f64,
    /// Probability in [0, 1] that a live cell drifts each generation
    pub cell_movement: f64,
    /// Fixed RNG seed for reproducible runs; omit to seed from entropy
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// History bound: generation stops here even without a cycle
    pub max_states: usize,
    /// Time budget per generation batch before yielding, in milliseconds
    pub batch_budget_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackConfig {
    pub framerate: u32,
    pub loop_playback: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            grid: GridConfig {
                num_columns: 20,
                num_rows: 10,
            },
            seeding: SeedingConfig {
                live_cell_density: 0.25,
                cell_movement: 0.0,
                seed: None,
            },
            analysis: AnalysisConfig {
                max_states: 500,
                batch_budget_ms: 10,
            },
            playback: PlaybackConfig {
                framerate: 20,
                loop_playback: true,
            },
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to a YAML file
    pub fn to_file(&self, path: &PathBuf) -> Result<()> {
        let content = serde_yaml::to_string(self).context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        if self.grid.num_columns == 0 || self.grid.num_rows == 0 {
            anyhow::bail!("Grid dimensions must be positive");
        }

        if self.grid.num_columns * self.grid.num_rows > MAX_CELL_COUNT {
            anyhow::bail!(
                "Grid of {}x{} exceeds the {} cell limit",
                self.grid.num_columns,
                self.grid.num_rows,
                MAX_CELL_COUNT
            );
        }

        if !(0.0..=1.0).contains(&self.seeding.live_cell_density) {
            anyhow::bail!("Live cell density must be within [0, 1]");
        }

        if !(0.0..=1.0).contains(&self.seeding.cell_movement) {
            anyhow::bail!("Cell movement must be within [0, 1]");
        }

        if self.analysis.max_states == 0 {
            anyhow::bail!("Max states must be at least 1");
        }

        if self.playback.framerate == 0 || self.playback.framerate > MAX_FRAMERATE {
            anyhow::bail!("Framerate must be within 1..={}", MAX_FRAMERATE);
        }

        Ok(())
    }

    /// Engine constructor parameters for these settings
    pub fn simulation_params(&self) -> SimulationParams {
        SimulationParams {
            num_columns: self.grid.num_columns,
            num_rows: self.grid.num_rows,
            live_cell_density: self.seeding.live_cell_density,
            cell_movement: self.seeding.cell_movement,
            seed: self.seeding.seed,
        }
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(num_columns) = cli_overrides.num_columns {
            self.grid.num_columns = num_columns;
        }
        if let Some(num_rows) = cli_overrides.num_rows {
            self.grid.num_rows = num_rows;
        }
        if let Some(live_cell_density) = cli_overrides.live_cell_density {
            self.seeding.live_cell_density = live_cell_density;
        }
        if let Some(cell_movement) = cli_overrides.cell_movement {
            self.seeding.cell_movement = cell_movement;
        }
        if let Some(seed) = cli_overrides.seed {
            self.seeding.seed = Some(seed);
        }
        if let Some(max_states) = cli_overrides.max_states {
            self.analysis.max_states = max_states;
        }
        if let Some(framerate) = cli_overrides.framerate {
            self.playback.framerate = framerate;
        }
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub num_columns: Option<usize>,
    pub num_rows: Option<usize>,
    pub live_cell_density: Option<f64>,
    pub cell_movement: Option<f64>,
    pub seed: Option<u64>,
    pub max_states: Option<usize>,
    pub framerate: Option<u32>,
}
