//! Data-driven game balance
//!
//! Defaults mirror `crate::consts`. A presenter may ship a JSON override;
//! missing fields fall back to the defaults.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Balance and geometry knobs for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Geometry ===
    pub canvas_width: f32,
    pub canvas_height: f32,
    pub catcher_size: f32,
    pub catcher_bottom_margin: f32,
    pub item_size: f32,
    pub catch_radius: f32,

    // === Timing ===
    /// Fixed tick period in milliseconds
    pub tick_ms: f64,

    // === Spawning & motion ===
    pub base_spawn_probability: f32,
    pub rotten_fraction: f32,
    pub base_fall_speed: f32,
    /// Drop items whose top edge has left the canvas
    pub cull_offscreen: bool,

    // === Scoring ===
    pub egg_reward: u64,
    pub starting_lives: u8,

    // === Chaos mode ===
    pub chaos_probability: f32,
    pub chaos_duration_ms: f64,
    pub chaos_speed_multiplier: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,
            catcher_size: CATCHER_SIZE,
            catcher_bottom_margin: CATCHER_BOTTOM_MARGIN,
            item_size: ITEM_SIZE,
            catch_radius: CATCH_RADIUS,

            tick_ms: TICK_MS,

            base_spawn_probability: BASE_SPAWN_PROBABILITY,
            rotten_fraction: ROTTEN_FRACTION,
            base_fall_speed: BASE_FALL_SPEED,
            cull_offscreen: true,

            egg_reward: EGG_REWARD,
            starting_lives: STARTING_LIVES,

            chaos_probability: CHAOS_PROBABILITY,
            chaos_duration_ms: CHAOS_DURATION_MS,
            chaos_speed_multiplier: CHAOS_SPEED_MULTIPLIER,
        }
    }
}

impl Tuning {
    /// Parse a JSON override, then clamp it into a playable range
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let tuning: Tuning = serde_json::from_str(json)?;
        Ok(tuning.sanitized())
    }

    /// Clamp every field into a range the simulation can run with
    pub fn sanitized(mut self) -> Self {
        let defaults = Tuning::default();

        self.canvas_width = non_negative_or(self.canvas_width, defaults.canvas_width);
        self.canvas_height = non_negative_or(self.canvas_height, defaults.canvas_height);
        self.catcher_size = non_negative_or(self.catcher_size, defaults.catcher_size);
        self.catcher_bottom_margin =
            non_negative_or(self.catcher_bottom_margin, defaults.catcher_bottom_margin);
        self.item_size = non_negative_or(self.item_size, defaults.item_size);
        self.catch_radius = non_negative_or(self.catch_radius, defaults.catch_radius);
        self.base_fall_speed = positive_or(self.base_fall_speed, defaults.base_fall_speed);
        self.chaos_speed_multiplier =
            positive_or(self.chaos_speed_multiplier, defaults.chaos_speed_multiplier);

        // A run starts with at least one life and never above the standard count
        let lives = self.starting_lives.clamp(1, STARTING_LIVES);
        if lives != self.starting_lives {
            log::warn!("Invalid starting lives {}, using {}", self.starting_lives, lives);
            self.starting_lives = lives;
        }

        if !(self.tick_ms.is_finite() && self.tick_ms > 0.0) {
            log::warn!("Invalid tick period {}, using {}", self.tick_ms, defaults.tick_ms);
            self.tick_ms = defaults.tick_ms;
        }
        if !(self.chaos_duration_ms.is_finite() && self.chaos_duration_ms >= 0.0) {
            log::warn!(
                "Invalid chaos duration {}, using {}",
                self.chaos_duration_ms,
                defaults.chaos_duration_ms
            );
            self.chaos_duration_ms = defaults.chaos_duration_ms;
        }

        self.base_spawn_probability = unit_or(self.base_spawn_probability, defaults.base_spawn_probability);
        self.rotten_fraction = unit_or(self.rotten_fraction, defaults.rotten_fraction);
        self.chaos_probability = unit_or(self.chaos_probability, defaults.chaos_probability);

        self
    }

    /// Y coordinate of the catcher's top edge (the catch line)
    pub fn catch_line_y(&self) -> f32 {
        self.canvas_height - self.catcher_size - self.catcher_bottom_margin
    }

    /// Widest x an item may spawn at so it stays fully on the canvas
    pub fn spawn_span(&self) -> f32 {
        (self.canvas_width - self.item_size).max(0.0)
    }

    /// Catcher x that centres it on the canvas
    pub fn centered_catcher_x(&self) -> f32 {
        self.canvas_width / 2.0 - self.catcher_size / 2.0
    }
}

fn non_negative_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        log::warn!("Invalid tuning value {}, using {}", value, fallback);
        fallback
    }
}

fn positive_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        log::warn!("Invalid tuning value {}, using {}", value, fallback);
        fallback
    }
}

fn unit_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        log::warn!("Invalid probability {}, using {}", value, fallback);
        fallback
    }
}
