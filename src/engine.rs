//! Simulation engine: lifecycle and fixed-timestep driver
//!
//! The host calls `update` (or `advance_to`) whenever it likes, typically
//! once per animation frame. The engine turns elapsed wall-clock time into a
//! whole number of fixed ticks and fires the chaos revert at its deadline.

use serde::Serialize;

use crate::consts::{MAX_FRAME_GAP_MS, MAX_SUBSTEPS};
use crate::platform::{Clock, SystemClock};
use crate::sim::{GameState, ItemKind, TickInput, TickOutcome, tick};
use crate::snapshot::FrameSnapshot;
use crate::tuning::Tuning;

/// Running totals for the current session
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EngineStats {
    pub ticks: u64,
    pub eggs_spawned: u64,
    pub rotten_spawned: u64,
    pub eggs_caught: u64,
    pub rotten_caught: u64,
    pub items_culled: u64,
    pub chaos_periods: u32,
}

/// What a single `advance_to` call did
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameReport {
    pub ticks: u32,
    pub chaos_started: bool,
    pub chaos_ended: bool,
    pub game_over: bool,
}

/// Owns the game state and drives it from a clock
pub struct Engine<C: Clock = SystemClock> {
    tuning: Tuning,
    state: GameState,
    clock: C,
    running: bool,
    last_time: Option<f64>,
    accumulator: f64,
    stats: EngineStats,
}

impl<C: Clock> Engine<C> {
    pub fn new(seed: u64, tuning: Tuning, clock: C) -> Self {
        let tuning = tuning.sanitized();
        Self {
            state: GameState::new(seed, &tuning),
            tuning,
            clock,
            running: false,
            last_time: None,
            accumulator: 0.0,
            stats: EngineStats::default(),
        }
    }

    /// Begin the tick cadence from the clock's current time
    pub fn start(&mut self) {
        if self.running {
            return;
        }
        self.running = true;
        self.last_time = Some(self.clock.now_ms());
        self.accumulator = 0.0;
        log::info!("Engine started (seed {})", self.state.seed);
    }

    /// Halt ticking and invalidate any pending chaos revert
    pub fn stop(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;
        self.last_time = None;
        self.accumulator = 0.0;
        if let Some(handle) = self.state.chaos.cancel() {
            log::debug!("Cancelled chaos timer {}", handle.id);
            if !self.state.is_game_over() {
                self.state.chaos.revert();
            }
        }
        log::info!("Engine stopped after {} ticks", self.stats.ticks);
    }

    /// Throw the session away and begin a fresh one. Keeps the running flag.
    pub fn reset(&mut self, seed: u64) {
        if let Some(handle) = self.state.chaos.cancel() {
            log::debug!("Cancelled chaos timer {} on reset", handle.id);
        }
        self.state = GameState::new(seed, &self.tuning);
        self.stats = EngineStats::default();
        self.accumulator = 0.0;
        if self.running {
            self.last_time = Some(self.clock.now_ms());
        }
        log::info!("Game reset with seed: {}", seed);
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Move the catcher (left edge). Ignored after game over; non-finite
    /// values keep the last valid position.
    pub fn set_catcher_position(&mut self, x: f32) {
        if self.state.is_game_over() {
            return;
        }
        if !self.state.catcher.set_x(x) {
            log::warn!("Ignoring non-finite catcher position {}", x);
        }
    }

    /// Run whatever ticks are due according to the engine's clock
    pub fn update(&mut self) -> FrameReport {
        let now = self.clock.now_ms();
        self.advance_to(now)
    }

    /// Run whatever ticks are due at wall-clock time `now_ms`
    pub fn advance_to(&mut self, now_ms: f64) -> FrameReport {
        let mut report = FrameReport::default();
        if !self.running {
            return report;
        }
        let Some(last) = self.last_time else {
            return report;
        };
        // Clock hiccups (backwards jumps, long stalls) are clamped
        let dt = (now_ms - last).clamp(0.0, MAX_FRAME_GAP_MS);
        self.last_time = Some(now_ms);

        if self.state.is_game_over() {
            return report;
        }
        self.accumulator += dt;

        let tick_ms = self.tuning.tick_ms;
        let mut substeps = 0;
        while self.accumulator >= tick_ms && substeps < MAX_SUBSTEPS {
            let tick_time = now_ms - self.accumulator + tick_ms;
            self.fire_timers(tick_time, &mut report);

            let outcome = tick(&mut self.state, &self.tuning, &TickInput { now_ms: tick_time });
            self.accumulator -= tick_ms;
            substeps += 1;
            self.record(&outcome, &mut report);

            if outcome.game_over {
                self.accumulator = 0.0;
                break;
            }
        }

        self.fire_timers(now_ms, &mut report);
        report
    }

    /// Copy of the state a presenter needs for one frame
    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot::capture(&self.state)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn stats(&self) -> &EngineStats {
        &self.stats
    }

    fn fire_timers(&mut self, now_ms: f64, report: &mut FrameReport) {
        if self.state.expire_chaos(now_ms) {
            report.chaos_ended = true;
        }
    }

    fn record(&mut self, outcome: &TickOutcome, report: &mut FrameReport) {
        if !outcome.ran {
            return;
        }
        report.ticks += 1;
        report.chaos_started |= outcome.chaos_started;
        report.game_over |= outcome.game_over;

        let stats = &mut self.stats;
        stats.ticks += 1;
        match outcome.spawned {
            Some(ItemKind::Egg) => stats.eggs_spawned += 1,
            Some(ItemKind::RottenEgg) => stats.rotten_spawned += 1,
            None => {}
        }
        stats.eggs_caught += outcome.eggs_caught as u64;
        stats.rotten_caught += outcome.rotten_caught as u64;
        stats.items_culled += outcome.culled as u64;
        if outcome.chaos_started {
            stats.chaos_periods += 1;
        }
    }
}
