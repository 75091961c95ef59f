//! Game state and core simulation types
//!
//! Everything a tick mutates lives in `GameState`; presenters only ever see
//! it through `FrameSnapshot`.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::chaos::{ChaosMode, TimerHandle};
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ticks spawn, move and resolve items
    Running,
    /// Run ended; state is frozen
    GameOver,
}

/// Falling item types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind {
    Egg,
    RottenEgg,
}

/// A falling item. `pos` is the top-left corner of its bounding square.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: u32,
    pub pos: Vec2,
    pub kind: ItemKind,
}

impl Item {
    /// Centre of the item for a given diameter
    #[inline]
    pub fn center(&self, size: f32) -> Vec2 {
        self.pos + Vec2::splat(size / 2.0)
    }
}

/// The player's catcher. Only the horizontal position moves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catcher {
    /// Left edge; unconstrained, may leave the canvas
    pub x: f32,
}

impl Catcher {
    /// Move to `x`, keeping the last valid position for non-finite input.
    /// Returns false if the value was rejected.
    pub fn set_x(&mut self, x: f32) -> bool {
        if x.is_finite() {
            self.x = x;
            true
        } else {
            false
        }
    }
}

/// What a single catch did to the score and lives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatchEffect {
    Scored { score: u64 },
    LifeLost { lives: u8 },
    FinalLifeLost,
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Current phase
    pub phase: GamePhase,
    pub score: u64,
    pub lives: u8,
    pub catcher: Catcher,
    /// Falling items (spawn order)
    pub items: Vec<Item>,
    pub chaos: ChaosMode,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new game state with the given seed
    pub fn new(seed: u64, tuning: &Tuning) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            time_ticks: 0,
            phase: GamePhase::Running,
            score: 0,
            lives: tuning.starting_lives,
            catcher: Catcher {
                x: tuning.centered_catcher_x(),
            },
            items: Vec::new(),
            chaos: ChaosMode::default(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Seeded RNG for gameplay rolls
    pub fn rng_mut(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Add an item at `(x, y)` (top-left) and return its id
    pub fn spawn_item(&mut self, x: f32, y: f32, kind: ItemKind) -> u32 {
        let id = self.next_entity_id();
        self.items.push(Item {
            id,
            pos: Vec2::new(x, y),
            kind,
        });
        id
    }

    /// Apply the score/life effect of catching an item of `kind`.
    ///
    /// Lives are checked after each decrement, so a rotten catch that takes
    /// the last life ends the run on that very catch.
    pub fn apply_catch(&mut self, kind: ItemKind, tuning: &Tuning) -> CatchEffect {
        match kind {
            ItemKind::Egg => {
                self.score = self.score.saturating_add(tuning.egg_reward);
                CatchEffect::Scored { score: self.score }
            }
            ItemKind::RottenEgg => {
                let before = self.lives;
                self.lives = self.lives.saturating_sub(1);
                if before <= 1 {
                    self.enter_game_over();
                    CatchEffect::FinalLifeLost
                } else {
                    CatchEffect::LifeLost { lives: self.lives }
                }
            }
        }
    }

    /// Freeze the run. Any pending chaos revert is invalidated so nothing
    /// mutates the state afterwards.
    fn enter_game_over(&mut self) {
        self.phase = GamePhase::GameOver;
        if let Some(handle) = self.chaos.cancel() {
            log::debug!("Cancelled chaos timer {} at game over", handle.id);
        }
        log::info!("Game over: score {} after {} ticks", self.score, self.time_ticks);
    }

    /// Start chaos mode at `now_ms` (no-op while already active)
    pub fn trigger_chaos(&mut self, now_ms: f64, tuning: &Tuning) -> Option<TimerHandle> {
        let handle = self.chaos.activate(
            now_ms,
            tuning.chaos_duration_ms,
            tuning.chaos_speed_multiplier,
        )?;
        log::info!("Chaos mode! x{} until {:.0}ms", tuning.chaos_speed_multiplier, handle.due_ms);
        Some(handle)
    }

    /// Fire the chaos revert if it is due. Returns true when chaos ended.
    pub fn expire_chaos(&mut self, now_ms: f64) -> bool {
        if self.is_game_over() {
            return false;
        }
        let ended = self.chaos.expire(now_ms);
        if ended {
            log::info!("Chaos mode over");
        }
        ended
    }

    /// Speed multiplier currently in effect
    pub fn speed_multiplier(&self) -> f32 {
        self.chaos.speed_multiplier()
    }
}
