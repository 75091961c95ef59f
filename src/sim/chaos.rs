//! Chaos mode: a timed speed modifier
//!
//! Activation schedules a one-shot deactivation against the wall clock. The
//! handle lives here so teardown and resets can invalidate it before it fires.

use serde::{Deserialize, Serialize};

/// A scheduled one-shot deactivation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimerHandle {
    /// Unique per `ChaosMode`, never reused
    pub id: u64,
    /// Wall-clock deadline (ms, same clock as `TickInput::now_ms`)
    pub due_ms: f64,
}

/// Chaos flag, speed multiplier and the pending revert
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChaosMode {
    active: bool,
    speed_multiplier: f32,
    pending: Option<TimerHandle>,
    next_timer_id: u64,
}

impl Default for ChaosMode {
    fn default() -> Self {
        Self {
            active: false,
            speed_multiplier: 1.0,
            pending: None,
            next_timer_id: 1,
        }
    }
}

impl ChaosMode {
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Multiplier applied to spawn chance and fall speed
    pub fn speed_multiplier(&self) -> f32 {
        self.speed_multiplier
    }

    /// The deactivation still waiting to fire, if any
    pub fn pending(&self) -> Option<TimerHandle> {
        self.pending
    }

    /// Enter chaos mode and schedule the revert.
    ///
    /// Returns `None` without touching anything if chaos is already active,
    /// so there is never more than one deactivation in flight.
    pub fn activate(&mut self, now_ms: f64, duration_ms: f64, multiplier: f32) -> Option<TimerHandle> {
        if self.active {
            return None;
        }
        let handle = TimerHandle {
            id: self.next_timer_id,
            due_ms: now_ms + duration_ms,
        };
        self.next_timer_id += 1;
        self.active = true;
        self.speed_multiplier = multiplier;
        self.pending = Some(handle);
        Some(handle)
    }

    /// Fire the pending revert if its deadline has passed.
    /// Returns true when chaos mode ended.
    pub fn expire(&mut self, now_ms: f64) -> bool {
        match self.pending {
            Some(handle) if handle.due_ms <= now_ms => {
                self.pending = None;
                self.revert();
                true
            }
            _ => false,
        }
    }

    /// Invalidate the pending revert without firing it
    pub fn cancel(&mut self) -> Option<TimerHandle> {
        self.pending.take()
    }

    /// Drop back to normal speed immediately
    pub fn revert(&mut self) {
        self.active = false;
        self.speed_multiplier = 1.0;
    }
}
