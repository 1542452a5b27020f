//! Player physics and cosmetic pose
//!
//! Vertical motion only: the world scrolls past a player pinned at
//! `PLAYER_START_X`. Screen coordinates, so smaller `y` is higher.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::Rect;
use crate::consts::*;
use crate::tuning::Tuning;

/// Scale applied on take-off
const LAUNCH_SCALE: f32 = 1.1;
const LAUNCH_ROTATION: f32 = -0.1;
/// Squash applied on touchdown
const LANDING_SCALE: f32 = 0.95;
const LANDING_ROTATION: f32 = 0.05;
/// Per-frame cosmetic recovery (frame-coupled on purpose)
const SCALE_RECOVERY: f32 = 0.02;
const ROTATION_DAMPING: f32 = 0.9;
const ROTATION_SNAP: f32 = 0.01;

/// The runner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    pub velocity_y: f32,
    pub is_jumping: bool,
    /// Resting y; `pos.y` never exceeds it after an update
    pub ground_y: f32,
    pub scale: f32,
    pub rotation: f32,
    pub is_flashing: bool,
    pub flash_start_ms: f64,
}

impl Player {
    pub fn new(ground_y: f32) -> Self {
        Self {
            pos: Vec2::new(PLAYER_START_X, ground_y),
            width: PLAYER_SIZE,
            height: PLAYER_SIZE,
            velocity_y: 0.0,
            is_jumping: false,
            ground_y,
            scale: 1.0,
            rotation: 0.0,
            is_flashing: false,
            flash_start_ms: 0.0,
        }
    }

    /// Back to the starting pose on the ground
    pub fn reset(&mut self) {
        self.pos = Vec2::new(PLAYER_START_X, self.ground_y);
        self.velocity_y = 0.0;
        self.is_jumping = false;
    }

    /// Start a jump. Returns false (and changes nothing) while airborne.
    pub fn jump(&mut self, jump_velocity: f32) -> bool {
        if self.is_jumping {
            return false;
        }
        self.velocity_y = -jump_velocity;
        self.is_jumping = true;
        self.scale = LAUNCH_SCALE;
        self.rotation = LAUNCH_ROTATION;
        true
    }

    /// Integrate gravity, expire the flash, relax the pose, clamp to ground
    pub fn update(&mut self, dt: f32, now_ms: f64, tuning: &Tuning) {
        self.velocity_y += tuning.gravity * dt;
        self.pos.y += self.velocity_y * dt;

        if self.is_flashing && now_ms - self.flash_start_ms >= tuning.flash_duration_ms {
            self.is_flashing = false;
        }

        if self.scale > 1.0 {
            self.scale = (self.scale - SCALE_RECOVERY).max(1.0);
        }
        if self.rotation != 0.0 {
            self.rotation *= ROTATION_DAMPING;
            if self.rotation.abs() < ROTATION_SNAP {
                self.rotation = 0.0;
            }
        }

        if self.pos.y >= self.ground_y {
            self.pos.y = self.ground_y;
            self.velocity_y = 0.0;
            self.is_jumping = false;
            // Held on every grounded frame, not just touchdown
            self.scale = LANDING_SCALE;
            self.rotation = LANDING_ROTATION;
        }
    }

    /// Start the hit flash; position is untouched
    pub fn lose_life_pose(&mut self, now_ms: f64) {
        self.is_flashing = true;
        self.flash_start_ms = now_ms;
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.width, self.height)
    }

    /// Off the ground for sprite selection
    pub fn is_airborne(&self) -> bool {
        self.is_jumping || self.pos.y < self.ground_y
    }
}
