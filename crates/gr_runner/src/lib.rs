//! Terminal front end for Galaxy Raiders.
//!
//! Everything around the simulation core that touches the outside world:
//!
//! - **Configuration**: defaults, RON file and environment overrides
//! - **Frame scheduler**: paced continuous runs and unpaced bounded runs
//! - **Score files**: JSON history and top-3 leaderboard
//! - **Ports**: ASCII visualizer, keyboard controller, seeded generator
//!
//! # Example
//!
//! ```bash
//! # Play in the terminal; type w/a/s/d, space, p or q then Enter
//! cargo run -p gr_runner
//!
//! # 500 unpaced ticks with a fixed seed, no rendering
//! cargo run -p gr_runner -- --quiet --seed 7 bounded --ticks 500
//!
//! # Show the leaderboard
//! cargo run -p gr_runner -- leaderboard
//! ```

pub mod ascii_visualizer;
pub mod config;
pub mod controller;
pub mod error;
pub mod generator;
pub mod scheduler;
pub mod scoreboard;
pub mod timestamp;

pub use ascii_visualizer::{render_ascii, render_leaderboard, AsciiConfig, AsciiVisualizer};
pub use config::{RunnerConfig, ScorePaths};
pub use controller::{IdleController, InputController};
pub use error::{Result, RunnerError};
pub use generator::SeededGenerator;
pub use scheduler::{FrameScheduler, RunSummary, StopHandle};
pub use scoreboard::ScoreBoard;
