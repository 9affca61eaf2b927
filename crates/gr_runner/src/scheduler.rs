//! Frame scheduler.
//!
//! Drives a [`GameEngine`] either at a fixed wall-clock cadence until asked to
//! stop, or for an exact number of ticks without pacing. Either way the match
//! score is persisted once the loop ends.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use gr_core::engine::GameEngine;
use gr_core::ports::{Controller, RandomGenerator, Visualizer};
use gr_core::score::Score;

use crate::error::Result;
use crate::scoreboard::ScoreBoard;

/// Shared flag that ends a continuous run before its next tick.
#[derive(Debug, Clone, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    /// Fresh handle, not yet stopped.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the loop to finish after the tick in progress.
    pub fn request_stop(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Whether a stop has been requested.
    #[must_use]
    pub fn is_stop_requested(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Summary of a finished run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    /// Ticks executed.
    pub ticks: u64,
    /// Score as persisted, with its completion time.
    pub score: Score,
    /// Ticks whose work took longer than the frame budget.
    pub overruns: u64,
}

/// Paces an engine and persists its result.
pub struct FrameScheduler<G, C, V> {
    engine: GameEngine<G, C, V>,
    scoreboard: ScoreBoard,
    stop: StopHandle,
}

impl<G, C, V> FrameScheduler<G, C, V>
where
    G: RandomGenerator,
    C: Controller,
    V: Visualizer,
{
    /// Scheduler for `engine`, persisting to `scoreboard`.
    pub fn new(engine: GameEngine<G, C, V>, scoreboard: ScoreBoard) -> Self {
        Self {
            engine,
            scoreboard,
            stop: StopHandle::new(),
        }
    }

    /// Use an existing stop handle, e.g. one already given to a controller.
    #[must_use]
    pub fn with_stop_handle(mut self, stop: StopHandle) -> Self {
        self.stop = stop;
        self
    }

    /// Handle that ends [`run_continuous`](Self::run_continuous).
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// The engine being driven.
    pub fn engine(&self) -> &GameEngine<G, C, V> {
        &self.engine
    }

    /// Tick at the configured frame rate until the stop handle is set, then
    /// persist the match.
    ///
    /// Each tick sleeps for whatever is left of the frame budget. A tick that
    /// overruns the budget is followed immediately by the next one; frames
    /// are never skipped.
    pub fn run_continuous(&mut self) -> Result<RunSummary> {
        let budget = Duration::from_millis(self.engine.config().ms_per_frame());
        let mut ticks = 0;
        let mut overruns = 0;

        tracing::info!(
            frame_budget_ms = budget.as_millis() as u64,
            "Starting continuous run"
        );

        while !self.stop.is_stop_requested() {
            let started = Instant::now();
            self.engine.tick();
            ticks += 1;

            let elapsed = started.elapsed();
            match budget.checked_sub(elapsed) {
                Some(remaining) => thread::sleep(remaining),
                None => {
                    overruns += 1;
                    tracing::debug!(
                        tick = self.engine.tick_count(),
                        elapsed_ms = elapsed.as_millis() as u64,
                        "Frame overran its budget"
                    );
                }
            }
        }

        tracing::info!(ticks, overruns, "Continuous run stopped");
        self.finish(ticks, overruns)
    }

    /// Execute exactly `ticks` ticks back to back, then persist the match.
    pub fn run_bounded(&mut self, ticks: u64) -> Result<RunSummary> {
        tracing::info!(ticks, "Starting bounded run");
        self.engine.execute_ticks(ticks);
        self.finish(ticks, 0)
    }

    fn finish(&self, ticks: u64, overruns: u64) -> Result<RunSummary> {
        let score = self.scoreboard.persist_match(self.engine.score())?;
        tracing::info!(
            final_score = score.final_score,
            destroyed = score.destroyed_asteroids,
            "Match finished"
        );
        Ok(RunSummary {
            ticks,
            score,
            overruns,
        })
    }

    /// Consume the scheduler, returning the engine.
    pub fn into_engine(self) -> GameEngine<G, C, V> {
        self.engine
    }
}
