//! Catch detection
//!
//! A catch is a plain circle test: the item's centre against a single
//! collision point on the catcher's top edge.

use glam::Vec2;

use crate::tuning::Tuning;

/// Result of a catch check
#[derive(Debug, Clone, Copy)]
pub struct CatchResult {
    /// Whether the item is within the catch radius
    pub caught: bool,
    /// Centre-to-catch-point distance
    pub distance: f32,
}

/// The catcher's collision point for a given left-edge x
#[inline]
pub fn catch_point(catcher_x: f32, tuning: &Tuning) -> Vec2 {
    Vec2::new(catcher_x + tuning.catcher_size / 2.0, tuning.catch_line_y())
}

/// Check an item centre against the catch point
pub fn item_catch_check(item_center: Vec2, catch_point: Vec2, catch_radius: f32) -> CatchResult {
    let distance = item_center.distance(catch_point);
    CatchResult {
        caught: distance < catch_radius,
        distance,
    }
}

/// True once an item's top edge has left the bottom of the canvas
#[inline]
pub fn is_offscreen(item_top: f32, tuning: &Tuning) -> bool {
    item_top > tuning.canvas_height
}
