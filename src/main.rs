//! Terminal front-end: looping playback and history analysis

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use game_of_life_loop::{
    analysis::{AnalysisOutcome, BatchStatus, CycleAnalyzer},
    config::{CliOverrides, Settings},
    engine::Simulation,
    playback::PlaybackSession,
    render::{ansi, render_frame},
    AnalysisReport,
};
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "game_of_life_loop")]
#[command(about = "Conway's Game of Life with cycle-aware playback")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct SimulationArgs {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.yaml")]
    config: PathBuf,

    /// Number of grid columns (overrides config)
    #[arg(long)]
    columns: Option<usize>,

    /// Number of grid rows (overrides config)
    #[arg(long)]
    rows: Option<usize>,

    /// Initial live cell density in [0, 1] (overrides config)
    #[arg(short, long)]
    density: Option<f64>,

    /// Per-generation drift probability in [0, 1] (overrides config)
    #[arg(long)]
    cell_movement: Option<f64>,

    /// Maximum states to generate (overrides config)
    #[arg(short, long)]
    max_states: Option<usize>,

    /// RNG seed for a reproducible run (overrides config)
    #[arg(short, long)]
    seed: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a history and play it back in the terminal
    Play {
        #[command(flatten)]
        simulation: SimulationArgs,

        /// Playback frames per second (overrides config)
        #[arg(short, long)]
        framerate: Option<u32>,

        /// Stop after one pass instead of looping
        #[arg(long)]
        no_loop: bool,
    },

    /// Generate a history and report its cycle structure
    Analyze {
        #[command(flatten)]
        simulation: SimulationArgs,

        /// Output format
        #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
        format: ReportFormat,

        /// Include per-generation cell counts
        #[arg(short, long)]
        verbose: bool,
    },

    /// Create example configuration files
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ReportFormat {
    Text,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            simulation,
            framerate,
            no_loop,
        } => play_command(simulation, framerate, no_loop),
        Commands::Analyze {
            simulation,
            format,
            verbose,
        } => analyze_command(simulation, format, verbose),
        Commands::Setup { directory, force } => setup_command(directory, force),
    }
}

fn load_settings(args: &SimulationArgs) -> Result<Settings> {
    let mut settings = if args.config.exists() {
        Settings::from_file(&args.config)
            .with_context(|| format!("Failed to load config from {}", args.config.display()))?
    } else {
        Settings::default()
    };

    let overrides = CliOverrides {
        num_columns: args.columns,
        num_rows: args.rows,
        live_cell_density: args.density,
        cell_movement: args.cell_movement,
        seed: args.seed,
        max_states: args.max_states,
        framerate: None,
    };
    settings.merge_with_cli(&overrides);

    Ok(settings)
}

/// Run the cycle analysis in budgeted batches, reporting progress between
/// batches so a slow board never looks hung
fn generate_history(simulation: &mut Simulation, settings: &Settings) -> Result<AnalysisReport> {
    let mut analyzer = CycleAnalyzer::new(simulation, settings.analysis.max_states)?;
    let budget = Duration::from_millis(settings.analysis.batch_budget_ms);

    let report = loop {
        match analyzer.run_batch(simulation, budget)? {
            BatchStatus::Complete(report) => break report,
            BatchStatus::Yielded { state_count } => {
                print!("\rComputed {} generations...", state_count);
                std::io::stdout().flush().ok();
            }
        }
    };
    print!("\r\x1b[K");

    Ok(report)
}

fn play_command(args: SimulationArgs, framerate: Option<u32>, no_loop: bool) -> Result<()> {
    let mut settings = load_settings(&args)?;
    if let Some(framerate) = framerate {
        settings.playback.framerate = framerate;
    }
    if no_loop {
        settings.playback.loop_playback = false;
    }
    settings.validate().context("Configuration validation failed")?;

    let mut simulation =
        Simulation::new(settings.simulation_params()).context("Failed to create simulation")?;
    let report = generate_history(&mut simulation, &settings)?;

    let mut session = PlaybackSession::new(
        simulation.state_count(),
        settings.playback.framerate,
        settings.playback.loop_playback,
    );
    if let AnalysisOutcome::CycleDetected { cycle_start } = report.outcome {
        // The closing state duplicates the one at cycle_start; loop over the
        // repeating segment and skip the duplicate.
        if cycle_start + 1 < simulation.state_count() {
            session = session.with_loop_range(cycle_start, simulation.state_count() - 1);
        }
    }
    session.play();

    loop {
        let index = session.current();
        let state = simulation.state_at(index)?;
        let previous = match index {
            0 => None,
            _ => Some(simulation.state_at(index - 1)?),
        };

        // Clear screen and home the cursor between frames.
        print!("\x1b[2J\x1b[H");
        println!(
            "{}",
            render_frame(
                simulation.grid(),
                state,
                previous,
                index,
                simulation.state_count()
            )
        );
        std::io::stdout().flush()?;

        if !session.is_playing() {
            break;
        }
        std::thread::sleep(session.frame_interval());
        session.tick();
    }

    Ok(())
}

#[derive(Debug, Serialize)]
struct StateCounts {
    index: usize,
    living: usize,
    dying: usize,
    dead: usize,
}

#[derive(Debug, Serialize)]
struct AnalysisSummary {
    num_columns: usize,
    num_rows: usize,
    report: AnalysisReport,
    cycle_length: Option<usize>,
    states: Vec<StateCounts>,
}

fn analyze_command(args: SimulationArgs, format: ReportFormat, verbose: bool) -> Result<()> {
    let settings = load_settings(&args)?;
    settings.validate().context("Configuration validation failed")?;

    let mut simulation =
        Simulation::new(settings.simulation_params()).context("Failed to create simulation")?;
    let report = generate_history(&mut simulation, &settings)?;

    let states: Vec<StateCounts> = simulation
        .states()
        .iter()
        .enumerate()
        .map(|(index, state)| StateCounts {
            index,
            living: state.living_cell_count,
            dying: state.dying_cell_count,
            dead: state.dead_cell_count,
        })
        .collect();

    match format {
        ReportFormat::Json => {
            let summary = AnalysisSummary {
                num_columns: simulation.num_columns(),
                num_rows: simulation.num_rows(),
                report,
                cycle_length: report.cycle_length(),
                states: if verbose { states } else { Vec::new() },
            };
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        ReportFormat::Text => {
            println!(
                "Grid: {}x{} ({} cells)",
                simulation.num_columns(),
                simulation.num_rows(),
                simulation.num_columns() * simulation.num_rows()
            );
            println!("States generated: {}", report.state_count);

            match report.outcome {
                AnalysisOutcome::CycleDetected { cycle_start } => {
                    let length = report.cycle_length().unwrap_or(0);
                    if length == 1 {
                        println!(
                            "{}",
                            ansi::success(&format!("Fixed point at generation {}", cycle_start))
                        );
                    } else {
                        println!(
                            "{}",
                            ansi::success(&format!(
                                "Cycle of length {} starting at generation {}",
                                length, cycle_start
                            ))
                        );
                    }
                }
                AnalysisOutcome::MaxStatesReached => {
                    println!(
                        "{}",
                        ansi::warning(&format!(
                            "No cycle within {} states",
                            settings.analysis.max_states
                        ))
                    );
                }
            }

            if verbose {
                println!("\nGeneration | Living | Dying | Dead");
                println!("-----------|--------|-------|------");
                for counts in &states {
                    println!(
                        "{:10} | {:6} | {:5} | {:5}",
                        counts.index, counts.living, counts.dying, counts.dead
                    );
                }
            }
        }
    }

    Ok(())
}

fn setup_command(directory: PathBuf, force: bool) -> Result<()> {
    let config_dir = directory.join("config");
    std::fs::create_dir_all(&config_dir)
        .with_context(|| format!("Failed to create directory {}", config_dir.display()))?;

    let config_path = config_dir.join("default.yaml");
    if !config_path.exists() || force {
        Settings::default()
            .to_file(&config_path)
            .context("Failed to create default configuration")?;
        println!("Created: {}", config_path.display());
    } else {
        println!("Skipped: {} (already exists)", config_path.display());
    }

    let examples_dir = config_dir.join("examples");
    std::fs::create_dir_all(&examples_dir)?;

    // A denser board that usually takes longer to settle.
    let mut dense = Settings::default();
    dense.grid.num_columns = 40;
    dense.grid.num_rows = 20;
    dense.seeding.live_cell_density = 0.4;
    dense.to_file(&examples_dir.join("dense.yaml"))?;

    // The drift variant: live cells wander after each transition.
    let mut drift = Settings::default();
    drift.seeding.cell_movement = 0.05;
    drift.seeding.seed = Some(42);
    drift.to_file(&examples_dir.join("drift.yaml"))?;

    println!("Created example configurations in: {}", examples_dir.display());
    println!("\n{}", ansi::success("Setup complete"));
    println!("Run: cargo run -- play --config config/default.yaml");

    Ok(())
}
