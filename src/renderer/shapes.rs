//! Shape generation for the scenery

use glam::Vec2;

use crate::Rect;

/// Sky gradient stops, top to bottom
pub const SKY_STOPS: [(f32, &str); 3] = [(0.0, "#87CEEB"), (0.5, "#98FB98"), (1.0, "#90EE90")];
pub const GROUND_FILL: &str = "#228B22";
pub const GROUND_EDGE: &str = "#006400";
/// Ground band starts this far below the player's resting y
pub const GROUND_OFFSET: f32 = 30.0;
pub const GROUND_HEIGHT: f32 = 20.0;

/// Cloud radial gradient stops (offset, rgba)
pub const CLOUD_STOPS: [(f32, &str); 3] = [
    (0.0, "rgba(255, 255, 255, 0.9)"),
    (0.7, "rgba(255, 255, 255, 0.6)"),
    (1.0, "rgba(255, 255, 255, 0.3)"),
];
pub const CLOUD_SHADOW: &str = "rgba(0, 0, 0, 0.1)";
/// Gradient radius as a multiple of cloud size
pub const CLOUD_GLOW: f32 = 1.5;
const CLOUD_FLOAT_AMPLITUDE: f32 = 2.0;
const CLOUD_SHADOW_SHIFT: f32 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

impl Circle {
    fn new(x: f32, y: f32, radius: f32) -> Self {
        Self {
            center: Vec2::new(x, y),
            radius,
        }
    }
}

/// Ground strip under the player's resting line
pub fn ground_band(ground_y: f32, width: f32) -> Rect {
    Rect::new(0.0, ground_y + GROUND_OFFSET, width, GROUND_HEIGHT)
}

/// Vertical bob of a cloud at wall-clock `time_ms`
pub fn cloud_float_offset(time_ms: f64, x: f32) -> f32 {
    ((time_ms * 0.001) as f32 + x * 0.01).sin() * CLOUD_FLOAT_AMPLITUDE
}

/// Six overlapping puffs centred on (x, y)
pub fn cloud_body(x: f32, y: f32, size: f32) -> [Circle; 6] {
    [
        Circle::new(x, y, size),
        Circle::new(x + size * 0.6, y, size * 0.8),
        Circle::new(x - size * 0.6, y, size * 0.8),
        Circle::new(x + size * 0.3, y - size * 0.3, size * 0.6),
        Circle::new(x - size * 0.3, y - size * 0.3, size * 0.6),
        Circle::new(x, y - size * 0.5, size * 0.5),
    ]
}

/// Drop shadow drawn between two passes of the body
pub fn cloud_shadow(x: f32, y: f32, size: f32) -> [Circle; 3] {
    let (x, y) = (x + CLOUD_SHADOW_SHIFT, y + CLOUD_SHADOW_SHIFT);
    [
        Circle::new(x, y, size * 0.9),
        Circle::new(x + size * 0.6, y, size * 0.7),
        Circle::new(x - size * 0.6, y, size * 0.7),
    ]
}
