//! Data-driven game balance
//!
//! Every gameplay constant the core reads lives in [`Tuning`]. Defaults match
//! [`crate::consts`]; a page can override any subset with a JSON object.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Reasons a tuning override is rejected
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("invalid tuning json: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("tuning field `{field}` must be {expected}, got {value}")]
    OutOfRange {
        field: &'static str,
        expected: &'static str,
        value: f64,
    },
}

/// Gameplay constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub viewport_width: f32,
    pub ground_y: f32,

    pub gravity: f32,
    pub jump_velocity: f32,
    pub flash_duration_ms: f64,

    pub max_lives: u32,
    pub max_progress: usize,
    pub game_speed: f32,
    pub life_loss_cooldown_ms: f64,
    pub win_check_delay_ms: f64,

    pub obstacle_spacing: f32,
    pub respawn_min_offset: f32,
    pub respawn_max_offset: f32,
    pub respawn_min_distance: f32,
    pub respawn_attempts: u32,
    pub fade_step: f32,

    /// Whether sound starts enabled (browsers still need a user gesture)
    pub sound_enabled: bool,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            viewport_width: VIEWPORT_WIDTH,
            ground_y: GROUND_Y,

            gravity: GRAVITY,
            jump_velocity: JUMP_VELOCITY,
            flash_duration_ms: FLASH_DURATION_MS,

            max_lives: MAX_LIVES,
            max_progress: MAX_PROGRESS,
            game_speed: GAME_SPEED,
            life_loss_cooldown_ms: LIFE_LOSS_COOLDOWN_MS,
            win_check_delay_ms: WIN_CHECK_DELAY_MS,

            obstacle_spacing: OBSTACLE_SPACING,
            respawn_min_offset: RESPAWN_MIN_OFFSET,
            respawn_max_offset: RESPAWN_MAX_OFFSET,
            respawn_min_distance: RESPAWN_MIN_DISTANCE,
            respawn_attempts: RESPAWN_ATTEMPTS,
            fade_step: FADE_STEP,

            sound_enabled: false,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON override and validate it
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Parse an override, logging and falling back to defaults on failure
    pub fn from_json_or_default(json: Option<&str>) -> Self {
        match json {
            Some(json) => Self::from_json(json).unwrap_or_else(|e| {
                log::warn!("Ignoring tuning override: {e}");
                Self::default()
            }),
            None => Self::default(),
        }
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        positive("viewport_width", self.viewport_width as f64)?;
        positive("ground_y", self.ground_y as f64)?;
        positive("gravity", self.gravity as f64)?;
        positive("jump_velocity", self.jump_velocity as f64)?;
        non_negative("game_speed", self.game_speed as f64)?;
        non_negative("life_loss_cooldown_ms", self.life_loss_cooldown_ms)?;
        non_negative("flash_duration_ms", self.flash_duration_ms)?;
        non_negative("win_check_delay_ms", self.win_check_delay_ms)?;
        non_negative("obstacle_spacing", self.obstacle_spacing as f64)?;
        non_negative("respawn_min_distance", self.respawn_min_distance as f64)?;
        if self.max_lives == 0 {
            return Err(TuningError::OutOfRange {
                field: "max_lives",
                expected: "at least 1",
                value: 0.0,
            });
        }
        if self.max_progress == 0 || self.max_progress > crate::sim::SECTIONS.len() {
            return Err(TuningError::OutOfRange {
                field: "max_progress",
                expected: "between 1 and the number of sections",
                value: self.max_progress as f64,
            });
        }
        if self.respawn_max_offset <= self.respawn_min_offset {
            return Err(TuningError::OutOfRange {
                field: "respawn_max_offset",
                expected: "greater than respawn_min_offset",
                value: self.respawn_max_offset as f64,
            });
        }
        if !(0.0..=1.0).contains(&self.fade_step) {
            return Err(TuningError::OutOfRange {
                field: "fade_step",
                expected: "within 0..=1",
                value: self.fade_step as f64,
            });
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), TuningError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(TuningError::OutOfRange {
            field,
            expected: "positive",
            value,
        })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), TuningError> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(TuningError::OutOfRange {
            field,
            expected: "non-negative",
            value,
        })
    }
}
