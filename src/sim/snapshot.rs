//! Read-only view of a frame for the renderer

use serde::Serialize;

use super::obstacles;
use super::state::{BlockSkin, GameCore, SessionState};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlayerSnapshot {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub scale: f32,
    pub rotation: f32,
    pub airborne: bool,
    pub flashing: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ObstacleSnapshot {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub skin: BlockSkin,
    pub collected: bool,
    pub alpha: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CloudSnapshot {
    pub x: f32,
    pub y: f32,
    pub size: f32,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameSnapshot {
    pub state: SessionState,
    pub viewport_width: f32,
    pub ground_y: f32,
    pub player: PlayerSnapshot,
    pub obstacles: Vec<ObstacleSnapshot>,
    pub clouds: Vec<CloudSnapshot>,
    pub lives: u32,
    pub progress: usize,
    pub max_progress: usize,
}

impl GameCore {
    pub fn snapshot(&self) -> FrameSnapshot {
        let p = &self.player;
        FrameSnapshot {
            state: self.state,
            viewport_width: self.tuning.viewport_width,
            ground_y: self.tuning.ground_y,
            player: PlayerSnapshot {
                x: p.pos.x,
                y: p.pos.y,
                width: p.width,
                height: p.height,
                scale: p.scale,
                rotation: p.rotation,
                airborne: p.is_airborne(),
                flashing: p.is_flashing,
            },
            obstacles: self
                .obstacles
                .iter()
                .map(|o| ObstacleSnapshot {
                    x: o.pos.x,
                    y: o.pos.y,
                    width: o.width,
                    height: o.height,
                    skin: o.skin,
                    collected: o.collected,
                    alpha: o.fade_alpha,
                })
                .collect(),
            clouds: self
                .clouds
                .iter()
                .map(|c| CloudSnapshot {
                    x: c.pos.x,
                    y: c.pos.y,
                    size: c.size,
                })
                .collect(),
            lives: self.lives,
            progress: self.progress(),
            max_progress: self.tuning.max_progress,
        }
    }

    /// Snapshot for drawing, then advance the per-draw fade of collected
    /// obstacles. Fading is tied to draws, so it continues while paused.
    pub fn render_frame(&mut self) -> FrameSnapshot {
        let snapshot = self.snapshot();
        obstacles::fade_collected(&mut self.obstacles, self.tuning.fade_step);
        snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    #[test]
    fn test_snapshot_mirrors_core() {
        let core = GameCore::new(Tuning::default(), 3);
        let snap = core.snapshot();
        assert_eq!(snap.state, SessionState::Idle);
        assert_eq!(snap.obstacles.len(), 5);
        assert_eq!(snap.clouds.len(), 7);
        assert_eq!(snap.player.x, 50.0);
        assert!(!snap.player.airborne);
        assert_eq!(snap.lives, 3);
        assert_eq!(snap.max_progress, 5);
    }

    #[test]
    fn test_render_frame_fades_after_snapshot() {
        let mut core = GameCore::new(Tuning::default(), 3);
        core.obstacles[0].collected = true;
        let first = core.render_frame();
        assert_eq!(first.obstacles[0].alpha, 1.0);
        let second = core.render_frame();
        assert!((second.obstacles[0].alpha - 0.95).abs() < 1e-6);
        assert_eq!(second.obstacles[1].alpha, 1.0);
    }

    #[test]
    fn test_snapshot_serializes() {
        let core = GameCore::new(Tuning::default(), 3);
        let json = serde_json::to_value(core.snapshot()).unwrap();
        assert_eq!(json["state"], "Idle");
        assert_eq!(json["obstacles"][0]["skin"], "Mario");
    }
}
