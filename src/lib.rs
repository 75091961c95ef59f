//! Minion Catch - A falling-egg arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, motion, catches, chaos mode)
//! - `engine`: Lifecycle and fixed-timestep driver around the simulation
//! - `snapshot`: Read-only per-frame view handed to presenters
//! - `platform`: Clock abstraction and browser bindings
//! - `tuning`: Data-driven game balance

pub mod engine;
pub mod platform;
pub mod sim;
pub mod snapshot;
pub mod tuning;

pub use engine::{Engine, EngineStats};
pub use snapshot::{FrameSnapshot, ItemView};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Play field dimensions
    pub const CANVAS_WIDTH: f32 = 320.0;
    pub const CANVAS_HEIGHT: f32 = 480.0;

    /// Catcher (minion) is a square this many units wide and tall
    pub const CATCHER_SIZE: f32 = 40.0;
    /// Gap between the catcher's bottom edge and the canvas bottom
    pub const CATCHER_BOTTOM_MARGIN: f32 = 10.0;

    /// Falling item diameter
    pub const ITEM_SIZE: f32 = 20.0;
    /// Distance below which an item counts as caught
    pub const CATCH_RADIUS: f32 = 30.0;

    /// Fixed simulation tick period (~60 Hz)
    pub const TICK_MS: f64 = 16.0;
    /// Maximum ticks per `advance` call to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 16;
    /// Longest frame gap the driver will try to catch up on
    pub const MAX_FRAME_GAP_MS: f64 = 250.0;

    /// Per-tick spawn chance at speed multiplier 1
    pub const BASE_SPAWN_PROBABILITY: f32 = 0.02;
    /// Share of spawns that are rotten
    pub const ROTTEN_FRACTION: f32 = 0.3;
    /// Units per tick at speed multiplier 1
    pub const BASE_FALL_SPEED: f32 = 2.0;

    /// Points per caught egg
    pub const EGG_REWARD: u64 = 10;
    pub const STARTING_LIVES: u8 = 3;

    /// Per-tick chance of entering chaos mode
    pub const CHAOS_PROBABILITY: f32 = 0.01;
    /// Wall-clock length of a chaos period
    pub const CHAOS_DURATION_MS: f64 = 5000.0;
    pub const CHAOS_SPEED_MULTIPLIER: f32 = 3.0;

    /// Vertical line the catcher collides on (catcher top edge)
    pub const CATCH_LINE_Y: f32 = CANVAS_HEIGHT - CATCHER_SIZE - CATCHER_BOTTOM_MARGIN;
}
