//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - Wall-clock time only arrives through `TickInput`

pub mod chaos;
pub mod collision;
pub mod state;
pub mod tick;

pub use chaos::{ChaosMode, TimerHandle};
pub use collision::{CatchResult, catch_point, is_offscreen, item_catch_check};
pub use state::{CatchEffect, Catcher, GamePhase, GameState, Item, ItemKind};
pub use tick::{TickInput, TickOutcome, tick};
