//! Galaxy Raiders terminal game.
//!
//! # Usage
//!
//! ```bash
//! # Play (default); input is line-buffered: type keys then Enter
//! cargo run -p gr_runner
//!
//! # Unpaced headless run for N ticks, then record the score
//! cargo run -p gr_runner -- --quiet bounded --ticks 200 --seed 42
//!
//! # Print the leaderboard
//! cargo run -p gr_runner -- leaderboard
//! ```
//!
//! Frames go to stdout, logs to stderr.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use gr_core::engine::GameEngine;
use gr_core::ports::Visualizer;
use gr_runner::{
    ascii_visualizer::NullVisualizer, render_leaderboard, AsciiConfig, AsciiVisualizer,
    FrameScheduler, IdleController, InputController, Result, RunSummary, RunnerConfig,
    ScoreBoard, SeededGenerator, StopHandle,
};

#[derive(Parser)]
#[command(name = "galaxy_raiders")]
#[command(about = "Galaxy Raiders: a terminal asteroid shooter")]
#[command(version)]
struct Cli {
    /// Enable verbose logging to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// RON configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Score history file (overrides config and environment)
    #[arg(long, global = true)]
    history: Option<PathBuf>,

    /// Leaderboard file (overrides config and environment)
    #[arg(long, global = true)]
    leaderboard: Option<PathBuf>,

    /// Seed for asteroid spawns (random if omitted)
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Do not render frames
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play at the configured frame rate until quit or end of input
    Run,

    /// Run a fixed number of unpaced ticks with no input
    Bounded {
        /// Number of ticks to run
        #[arg(short, long, default_value = "100")]
        ticks: u64,
    },

    /// Print the current leaderboard
    Leaderboard,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging to stderr (stdout is for frames)
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(!cli.no_color),
        )
        .with(filter)
        .init();

    let result = match &cli.command {
        None | Some(Commands::Run) => cmd_run(&cli),
        Some(Commands::Bounded { ticks }) => cmd_bounded(&cli, *ticks),
        Some(Commands::Leaderboard) => cmd_leaderboard(&cli),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "galaxy_raiders failed");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Layered configuration with CLI path overrides applied.
fn load_config(cli: &Cli) -> Result<RunnerConfig> {
    let mut config = RunnerConfig::load(cli.config.as_deref())?;
    if let Some(path) = &cli.history {
        config.score.history = path.clone();
    }
    if let Some(path) = &cli.leaderboard {
        config.score.leaderboard = path.clone();
    }
    tracing::debug!(?config, "Configuration loaded");
    Ok(config)
}

fn generator(cli: &Cli) -> SeededGenerator {
    match cli.seed {
        Some(seed) => {
            tracing::info!(seed, "Using fixed seed");
            SeededGenerator::from_seed(seed)
        }
        None => SeededGenerator::from_entropy(),
    }
}

fn visualizer(cli: &Cli) -> Box<dyn Visualizer> {
    if cli.quiet {
        Box::new(NullVisualizer)
    } else {
        Box::new(AsciiVisualizer::new(
            std::io::stdout(),
            AsciiConfig {
                use_color: !cli.no_color,
                ..AsciiConfig::default()
            },
        ))
    }
}

/// Play interactively until quit.
fn cmd_run(cli: &Cli) -> Result<()> {
    let config = load_config(cli)?;
    let stop = StopHandle::new();
    let controller = InputController::stdin(stop.clone());

    let engine = GameEngine::new(config.game, generator(cli), controller, visualizer(cli))?;
    let mut scheduler =
        FrameScheduler::new(engine, ScoreBoard::from_paths(&config.score)).with_stop_handle(stop);

    let summary = scheduler.run_continuous()?;
    print_summary(&summary);
    Ok(())
}

/// Run a fixed number of ticks and record the result.
fn cmd_bounded(cli: &Cli, ticks: u64) -> Result<()> {
    let config = load_config(cli)?;

    let engine = GameEngine::new(config.game, generator(cli), IdleController, visualizer(cli))?;
    let mut scheduler = FrameScheduler::new(engine, ScoreBoard::from_paths(&config.score));

    let summary = scheduler.run_bounded(ticks)?;
    print_summary(&summary);
    Ok(())
}

/// Print the leaderboard file.
fn cmd_leaderboard(cli: &Cli) -> Result<()> {
    let config = load_config(cli)?;
    let scores = ScoreBoard::from_paths(&config.score).load_leaderboard()?;
    print!("{}", render_leaderboard(&scores, !cli.no_color));
    Ok(())
}

fn print_summary(summary: &RunSummary) {
    println!(
        "Match over after {} ticks: score {:.1}, {} asteroids destroyed",
        summary.ticks, summary.score.final_score, summary.score.destroyed_asteroids
    );
}
