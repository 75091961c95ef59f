//! Per-frame view of the game for presenters
//!
//! A presenter samples this once per render frame. It is a copy, so reading
//! it can never disturb the simulation.

use serde::{Deserialize, Serialize};

use crate::sim::{GameState, ItemKind};

/// A falling item as drawn (top-left corner)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemView {
    pub id: u32,
    pub x: f32,
    pub y: f32,
    pub kind: ItemKind,
}

/// Everything needed to paint one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub catcher_x: f32,
    pub items: Vec<ItemView>,
    pub score: u64,
    pub lives: u8,
    pub chaos_mode_active: bool,
    pub game_over: bool,
}

impl FrameSnapshot {
    pub fn capture(state: &GameState) -> Self {
        Self {
            catcher_x: state.catcher.x,
            items: state
                .items
                .iter()
                .map(|item| ItemView {
                    id: item.id,
                    x: item.pos.x,
                    y: item.pos.y,
                    kind: item.kind,
                })
                .collect(),
            score: state.score,
            lives: state.lives,
            chaos_mode_active: state.chaos.is_active(),
            game_over: state.is_game_over(),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
