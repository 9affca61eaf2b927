//! Determinism testing utilities.
//!
//! Provides a harness for verifying that a match produces identical results
//! given identical inputs.
//!
//! # Testing Strategy
//!
//! Bounded runs must be reproducible so that scripted scenarios and seeded
//! headless runs can be asserted exactly. Sources of non-determinism include:
//!
//! - **Floating-point math**: geometry uses fixed-point via
//!   [`gr_core::math::Fixed`]; only the score itself is a float.
//!
//! - **System randomness**: spawn draws go through a
//!   [`RandomGenerator`](gr_core::ports::RandomGenerator) that tests seed or
//!   script.
//!
//! - **Wall-clock pacing**: bounded mode never sleeps, so timing cannot leak
//!   into the simulation.

use std::thread;

use gr_core::engine::GameEngine;
use gr_core::ports::{Controller, RandomGenerator, Visualizer};

/// Result of a determinism test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeterminismResult {
    /// Whether all runs produced identical results.
    pub is_deterministic: bool,
    /// Hashes from each run.
    pub hashes: Vec<u64>,
    /// Number of ticks simulated.
    pub ticks: u64,
}

impl DeterminismResult {
    /// Get all unique hashes (should be 1 for a deterministic match).
    #[must_use]
    pub fn unique_hashes(&self) -> Vec<u64> {
        let mut unique: Vec<u64> = self.hashes.clone();
        unique.sort_unstable();
        unique.dedup();
        unique
    }

    /// Assert that the match was deterministic, with a detailed error message.
    ///
    /// # Panics
    ///
    /// Panics if the runs produced different hashes.
    pub fn assert_deterministic(&self) {
        if !self.is_deterministic {
            let unique = self.unique_hashes();
            panic!(
                "Match is non-deterministic!\n\
                 Runs: {}\n\
                 Ticks: {}\n\
                 Unique hashes: {} (expected 1)\n\
                 All hashes: {:?}",
                self.hashes.len(),
                self.ticks,
                unique.len(),
                self.hashes
            );
        }
    }
}

/// Run a state machine multiple times and verify determinism.
///
/// # Arguments
///
/// * `runs` - Number of times to run
/// * `ticks` - Number of ticks per run
/// * `setup` - Function to create initial state
/// * `step` - Function to advance state by one tick
/// * `hash` - Function to compute state hash
pub fn verify_determinism<S, Setup, Step, HashFn>(
    runs: usize,
    ticks: u64,
    setup: Setup,
    step: Step,
    hash: HashFn,
) -> DeterminismResult
where
    Setup: Fn() -> S,
    Step: Fn(&mut S),
    HashFn: Fn(&S) -> u64,
{
    let mut hashes = Vec::with_capacity(runs);

    for _ in 0..runs {
        let mut state = setup();

        for _ in 0..ticks {
            step(&mut state);
        }

        hashes.push(hash(&state));
    }

    let is_deterministic = hashes.windows(2).all(|w| w[0] == w[1]);

    DeterminismResult {
        is_deterministic,
        hashes,
        ticks,
    }
}

/// Run a freshly built engine twice and compare the final field hashes.
pub fn verify_engine_determinism<G, C, V, F>(setup_fn: F, num_ticks: u64) -> bool
where
    G: RandomGenerator,
    C: Controller,
    V: Visualizer,
    F: Fn() -> GameEngine<G, C, V>,
{
    verify_determinism(
        2,
        num_ticks,
        &setup_fn,
        |engine| {
            engine.tick();
        },
        |engine| engine.field().state_hash(),
    )
    .is_deterministic
}

/// Run `num_runs` engines on scoped threads and collect their final hashes.
///
/// # Panics
///
/// Panics if a worker thread panics.
pub fn run_parallel_matches<G, C, V, F>(setup_fn: F, num_runs: usize, num_ticks: u64) -> Vec<u64>
where
    G: RandomGenerator,
    C: Controller,
    V: Visualizer,
    F: Fn() -> GameEngine<G, C, V> + Sync,
{
    thread::scope(|s| {
        let handles: Vec<_> = (0..num_runs)
            .map(|_| {
                s.spawn(|| {
                    let mut engine = setup_fn();
                    engine.execute_ticks(num_ticks);
                    engine.field().state_hash()
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|h| h.join().expect("match thread panicked"))
            .collect()
    })
}

/// Compare two runs tick-by-tick, finding the first divergence.
///
/// # Returns
///
/// `None` if the runs stay identical, `Some(tick)` if they diverge at that tick.
pub fn find_first_divergence<G, C, V, F>(setup_fn: F, num_ticks: u64) -> Option<u64>
where
    G: RandomGenerator,
    C: Controller,
    V: Visualizer,
    F: Fn() -> GameEngine<G, C, V>,
{
    let mut first = setup_fn();
    let mut second = setup_fn();

    if first.field().state_hash() != second.field().state_hash() {
        return Some(0);
    }

    for tick in 1..=num_ticks {
        first.tick();
        second.tick();

        if first.field().state_hash() != second.field().state_hash() {
            return Some(tick);
        }
    }

    None
}

/// Proptest strategies for scores, explosions and player input.
pub mod strategies {
    use gr_core::math::{Fixed, Vec2Fixed};
    use gr_core::ports::PlayerCommand;
    use gr_core::score::Score;
    use proptest::prelude::*;

    /// Explosion life times (1-100 frames).
    pub fn arb_life_time() -> impl Strategy<Value = i32> {
        1i32..100i32
    }

    /// A position inside the default 12 x 18 field.
    pub fn arb_field_position() -> impl Strategy<Value = Vec2Fixed> {
        (0i32..=12, 0i32..=18).prop_map(|(x, y)| Vec2Fixed::new(Fixed::from_num(x), Fixed::from_num(y)))
    }

    /// Final scores on a coarse grid so ties are common.
    pub fn arb_final_score() -> impl Strategy<Value = f64> {
        (0u32..40).prop_map(|n| f64::from(n) * 12.5)
    }

    /// A persisted score with a distinguishing timestamp.
    pub fn arb_score() -> impl Strategy<Value = Score> {
        (arb_final_score(), 0u32..50, 0u32..10_000).prop_map(|(final_score, destroyed, stamp)| {
            Score {
                date_time: format!("2024-01-01T00:00:00Z#{stamp}"),
                final_score,
                destroyed_asteroids: destroyed,
            }
        })
    }

    /// A score history of up to `max_len` matches.
    pub fn arb_history(max_len: usize) -> impl Strategy<Value = Vec<Score>> {
        proptest::collection::vec(arb_score(), 0..max_len)
    }

    /// Any player command.
    pub fn arb_command() -> impl Strategy<Value = PlayerCommand> {
        prop_oneof![
            Just(PlayerCommand::MoveShipUp),
            Just(PlayerCommand::MoveShipDown),
            Just(PlayerCommand::MoveShipLeft),
            Just(PlayerCommand::MoveShipRight),
            Just(PlayerCommand::LaunchMissile),
            Just(PlayerCommand::PauseGame),
        ]
    }

    /// A per-tick input script, mostly idle.
    pub fn arb_command_script(max_len: usize) -> impl Strategy<Value = Vec<Option<PlayerCommand>>> {
        proptest::collection::vec(
            prop_oneof![3 => Just(None), 1 => arb_command().prop_map(Some)],
            0..max_len,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{quiet_config, LcgGenerator, RecordingVisualizer, ScriptedController};
    use gr_core::config::GameConfig;
    use gr_core::ports::PlayerCommand;
    use proptest::prelude::*;

    fn noisy_match(
        seed: u64,
        script: Vec<Option<PlayerCommand>>,
    ) -> GameEngine<LcgGenerator, ScriptedController, RecordingVisualizer> {
        let config = GameConfig {
            asteroid_probability: 0.6,
            ..GameConfig::default()
        };
        GameEngine::new(
            config,
            LcgGenerator::new(seed),
            ScriptedController::new(script),
            RecordingVisualizer::new(),
        )
        .unwrap()
    }

    #[test]
    fn test_verify_determinism_simple() {
        let result = verify_determinism(3, 100, || 0u64, |n| *n += 1, |n| *n);

        result.assert_deterministic();
        assert_eq!(result.hashes, vec![100, 100, 100]);
        assert_eq!(result.unique_hashes(), vec![100]);
    }

    #[test]
    #[should_panic(expected = "Match is non-deterministic")]
    fn test_diverging_runs_are_reported() {
        let runs = std::cell::Cell::new(0u64);
        let result = verify_determinism(
            2,
            10,
            || {
                runs.set(runs.get() + 1);
                runs.get()
            },
            |n| *n += 1,
            |n| *n,
        );

        assert!(!result.is_deterministic);
        assert_eq!(result.unique_hashes(), vec![11, 12]);
        result.assert_deterministic();
    }

    #[test]
    fn test_idle_match_determinism() {
        assert!(verify_engine_determinism(
            || {
                GameEngine::new(
                    quiet_config(),
                    LcgGenerator::new(1),
                    ScriptedController::idle(),
                    RecordingVisualizer::new(),
                )
                .unwrap()
            },
            200,
        ));
    }

    #[test]
    fn test_noisy_match_has_no_divergence() {
        let script = vec![
            Some(PlayerCommand::LaunchMissile),
            Some(PlayerCommand::MoveShipLeft),
            None,
            Some(PlayerCommand::LaunchMissile),
        ];
        assert_eq!(
            find_first_divergence(|| noisy_match(42, script.clone()), 300),
            None
        );
    }

    #[test]
    fn test_parallel_matches_agree() {
        let hashes = run_parallel_matches(|| noisy_match(9, vec![]), 4, 200);
        assert_eq!(hashes.len(), 4);
        assert!(hashes.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn test_different_seeds_diverge() {
        let a = {
            let mut engine = noisy_match(1, vec![]);
            engine.execute_ticks(50);
            engine.field().state_hash()
        };
        let b = {
            let mut engine = noisy_match(2, vec![]);
            engine.execute_ticks(50);
            engine.field().state_hash()
        };
        assert_ne!(a, b);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_command_scripts_are_replayable(
            seed in any::<u64>(),
            script in strategies::arb_command_script(60),
        ) {
            let result = verify_determinism(
                3,
                120,
                || noisy_match(seed, script.clone()),
                |engine| {
                    engine.tick();
                },
                |engine| engine.field().state_hash(),
            );
            prop_assert_eq!(result.unique_hashes().len(), 1);
            result.assert_deterministic();
        }
    }
}
