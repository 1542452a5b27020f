//! Frame timing
//!
//! Turns animation-frame timestamps into simulation steps. The last-frame
//! time advances on every frame, paused or not, so resuming never injects
//! the time spent paused.

/// What the loop should do with the current frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameAction {
    /// Loop not live; nothing to draw
    Idle,
    /// Paused: redraw without advancing the simulation
    RenderOnly,
    /// Step the simulation by `dt` seconds, then draw
    UpdateAndRender(f32),
}

#[derive(Debug, Clone, Copy)]
pub struct FrameClock {
    last_ms: f64,
}

impl FrameClock {
    pub fn new(now_ms: f64) -> Self {
        Self { last_ms: now_ms }
    }

    /// Restart timing from `now_ms` (new run)
    pub fn reset(&mut self, now_ms: f64) {
        self.last_ms = now_ms;
    }

    pub fn last_ms(&self) -> f64 {
        self.last_ms
    }

    /// Record a frame at `now_ms`. A timestamp that goes backwards yields a
    /// zero step.
    pub fn advance(&mut self, now_ms: f64, running: bool, paused: bool) -> FrameAction {
        let dt = ((now_ms - self.last_ms) / 1000.0).max(0.0) as f32;
        self.last_ms = now_ms;

        if !running {
            FrameAction::Idle
        } else if paused {
            FrameAction::RenderOnly
        } else {
            FrameAction::UpdateAndRender(dt)
        }
    }
}
