//! ASCII terminal visualizer.
//!
//! Renders the field as a character grid, one cell per world unit, with the
//! top of the field on the first row.

use std::io::Write;

use gr_core::field::SpaceField;
use gr_core::objects::ObjectKind;
use gr_core::ports::{FrameStatus, Visualizer};
use gr_core::score::Score;

/// ASCII visualization configuration.
#[derive(Debug, Clone)]
pub struct AsciiConfig {
    /// Use colored output (ANSI).
    pub use_color: bool,
    /// Clear the terminal before each frame.
    pub clear_screen: bool,
    /// Show the score line under the field.
    pub show_legend: bool,
}

impl Default for AsciiConfig {
    fn default() -> Self {
        Self {
            use_color: true,
            clear_screen: true,
            show_legend: true,
        }
    }
}

/// ANSI color codes.
mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";

    pub const CYAN: &str = "\x1b[36m";
    pub const RED: &str = "\x1b[31m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const WHITE: &str = "\x1b[37m";
    pub const GRAY: &str = "\x1b[90m";

    pub const CLEAR: &str = "\x1b[2J\x1b[H";
}

fn kind_color(kind: ObjectKind) -> &'static str {
    match kind {
        ObjectKind::Ship => colors::CYAN,
        ObjectKind::Asteroid => colors::WHITE,
        ObjectKind::Missile => colors::YELLOW,
        ObjectKind::Explosion => colors::RED,
    }
}

/// Render one frame of the field as text.
pub fn render_ascii(field: &SpaceField, status: FrameStatus, config: &AsciiConfig) -> String {
    let columns = field.width().to_num::<i64>().max(0) as usize + 1;
    let rows = field.height().to_num::<i64>().max(0) as usize + 1;
    let mut grid: Vec<Vec<Option<ObjectKind>>> = vec![vec![None; columns]; rows];

    // Later objects overwrite earlier ones: explosions and missiles stay visible.
    for object in field.space_objects() {
        let x = object.position.x.round().to_num::<i64>();
        let y = object.position.y.round().to_num::<i64>();
        let (Ok(col), Ok(from_bottom)) = (usize::try_from(x), usize::try_from(y)) else {
            continue;
        };
        if col < columns && from_bottom < rows {
            grid[rows - 1 - from_bottom][col] = Some(object.kind());
        }
    }

    let (bold, reset) = if config.use_color {
        (colors::BOLD, colors::RESET)
    } else {
        ("", "")
    };

    let mut output = String::new();
    if config.clear_screen {
        output.push_str(colors::CLEAR);
    }

    output.push('┌');
    output.push_str(&"─".repeat(columns));
    output.push_str("┐\n");

    for row in &grid {
        output.push('│');
        for cell in row {
            match cell {
                Some(kind) if config.use_color => {
                    output.push_str(kind_color(*kind));
                    output.push(kind.symbol());
                    output.push_str(colors::RESET);
                }
                Some(kind) => output.push(kind.symbol()),
                None => output.push(' '),
            }
        }
        output.push_str("│\n");
    }

    output.push('└');
    output.push_str(&"─".repeat(columns));
    output.push_str("┘\n");

    if config.show_legend {
        let score = field.score();
        output.push_str(&format!(
            "{bold}Tick {}{reset}  Score {:.1}  Destroyed {}",
            status.tick, score.final_score, score.destroyed_asteroids
        ));
        if status.paused {
            output.push_str(&format!("  {bold}[PAUSED]{reset}"));
        }
        output.push('\n');
        if config.use_color {
            output.push_str(colors::GRAY);
        }
        output.push_str("w/a/s/d move  space fire  p pause  q quit");
        output.push_str(reset);
        output.push('\n');
    }

    output
}

/// Render a leaderboard as a table.
pub fn render_leaderboard(scores: &[Score], use_color: bool) -> String {
    let (bold, reset) = if use_color {
        (colors::BOLD, colors::RESET)
    } else {
        ("", "")
    };

    let mut output = String::new();
    output.push_str(&format!("{bold}Leaderboard{reset}\n"));
    output.push_str("┌───┬──────────────────────┬────────────┬───────────┐\n");
    output.push_str("│ # │ Date                 │      Score │ Destroyed │\n");
    output.push_str("├───┼──────────────────────┼────────────┼───────────┤\n");
    for (rank, score) in scores.iter().enumerate() {
        output.push_str(&format!(
            "│ {} │ {:<20} │ {:>10.1} │ {:>9} │\n",
            rank + 1,
            score.date_time,
            score.final_score,
            score.destroyed_asteroids
        ));
    }
    if scores.is_empty() {
        output.push_str("│   │ (no matches yet)     │            │           │\n");
    }
    output.push_str("└───┴──────────────────────┴────────────┴───────────┘\n");
    output
}

/// Draws each frame to a writer, usually stdout.
pub struct AsciiVisualizer<W> {
    out: W,
    config: AsciiConfig,
}

impl<W: Write> AsciiVisualizer<W> {
    /// Visualizer writing to `out`.
    pub fn new(out: W, config: AsciiConfig) -> Self {
        Self { out, config }
    }

    /// Hand back the writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Visualizer for AsciiVisualizer<W> {
    fn render_space_field(&mut self, field: &SpaceField, status: FrameStatus) {
        let frame = render_ascii(field, status, &self.config);
        if let Err(e) = self
            .out
            .write_all(frame.as_bytes())
            .and_then(|()| self.out.flush())
        {
            tracing::warn!(error = %e, tick = status.tick, "Failed to draw frame");
        }
    }
}

/// Visualizer that draws nothing, for quiet headless runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullVisualizer;

impl Visualizer for NullVisualizer {
    fn render_space_field(&mut self, _field: &SpaceField, _status: FrameStatus) {}
}
