//! Portfolio Runner - a side-scrolling runner that reveals portfolio sections
//!
//! Core modules:
//! - `sim`: Game core (physics, obstacles, collisions, session state machine)
//! - `platform`: Loop clock, input mapping and presenter/audio seams
//! - `renderer`: Canvas 2D drawing of frame snapshots
//! - `audio`: Procedural sound effects
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod game;
pub mod platform;
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use game::Game;
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Largest simulation step a single frame may inject (seconds)
    pub const MAX_FRAME_DT: f32 = 1.0 / 30.0;

    /// Playfield dimensions
    pub const VIEWPORT_WIDTH: f32 = 1200.0;
    pub const GROUND_Y: f32 = 600.0;

    /// Player defaults
    pub const PLAYER_START_X: f32 = 50.0;
    pub const PLAYER_SIZE: f32 = 50.0;
    /// Upward launch speed (pixels/s, applied as negative y velocity)
    pub const JUMP_VELOCITY: f32 = 450.0;
    /// Gravity (pixels/s²)
    pub const GRAVITY: f32 = 750.0;
    pub const FLASH_DURATION_MS: f64 = 200.0;

    /// Session defaults
    pub const MAX_LIVES: u32 = 3;
    pub const MAX_PROGRESS: usize = 5;
    /// World scroll speed (pixels/s)
    pub const GAME_SPEED: f32 = 150.0;
    pub const LIFE_LOSS_COOLDOWN_MS: f64 = 1000.0;
    /// Delay between closing a section overlay and the win check
    pub const WIN_CHECK_DELAY_MS: f64 = 50.0;

    /// Obstacle defaults
    pub const OBSTACLE_SIZE: f32 = 50.0;
    pub const OBSTACLE_SPACING: f32 = 250.0;
    /// Obstacles left of this x are respawned
    pub const OBSTACLE_OFFSCREEN_X: f32 = -50.0;
    /// Collected obstacles at or left of this x are pruned
    pub const OBSTACLE_PRUNE_X: f32 = -100.0;
    pub const RESPAWN_MIN_OFFSET: f32 = 100.0;
    pub const RESPAWN_MAX_OFFSET: f32 = 300.0;
    pub const RESPAWN_MIN_DISTANCE: f32 = 200.0;
    pub const RESPAWN_ATTEMPTS: u32 = 10;
    /// Alpha removed from a collected obstacle per rendered frame
    pub const FADE_STEP: f32 = 0.05;

    /// Cloud speeds are authored in pixels per 60 Hz frame
    pub const CLOUD_SPEED_SCALE: f32 = 60.0;
    pub const CLOUD_WRAP_JITTER: f32 = 200.0;
}

/// Axis-aligned rectangle in screen space (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    #[inline]
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Strict overlap test; touching edges do not overlap
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x + self.w > other.x
            && self.x < other.x + other.w
            && self.y + self.h > other.y
            && self.y < other.y + other.h
    }
}
