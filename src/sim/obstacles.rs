//! Obstacle lifecycle: creation, scrolling, respawn, fade and pruning

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{BlockSkin, SECTIONS, SKIN_ORDER, SectionId};
use crate::Rect;
use crate::consts::*;
use crate::tuning::Tuning;

/// A scrolling block tied to one portfolio section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    /// Top-left corner
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    pub section: SectionId,
    pub skin: BlockSkin,
    pub collected: bool,
    /// 1 = opaque; decays once collected
    pub fade_alpha: f32,
}

impl Obstacle {
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.width, self.height)
    }

    /// One rendered frame of fade-out
    pub fn fade(&mut self, step: f32) {
        if self.collected {
            self.fade_alpha = (self.fade_alpha - step).max(0.0);
        }
    }
}

/// One obstacle per section, spaced out beyond the right edge
pub fn create_all(tuning: &Tuning) -> Vec<Obstacle> {
    SECTIONS
        .iter()
        .zip(SKIN_ORDER)
        .enumerate()
        .map(|(i, (section, skin))| Obstacle {
            id: i as u32,
            pos: Vec2::new(
                tuning.viewport_width + i as f32 * tuning.obstacle_spacing,
                tuning.ground_y - OBSTACLE_SIZE,
            ),
            width: OBSTACLE_SIZE,
            height: OBSTACLE_SIZE,
            section: section.id,
            skin,
            collected: false,
            fade_alpha: 1.0,
        })
        .collect()
}

/// Scroll uncollected obstacles, respawn those that left the screen, then
/// prune spent collected ones.
pub fn advance(obstacles: &mut Vec<Obstacle>, dt: f32, speed: f32, tuning: &Tuning, rng: &mut impl Rng) {
    for i in 0..obstacles.len() {
        if obstacles[i].collected {
            continue;
        }
        obstacles[i].pos.x -= speed * dt;

        if obstacles[i].pos.x < OBSTACLE_OFFSCREEN_X {
            let others: Vec<f32> = obstacles
                .iter()
                .enumerate()
                .filter(|(j, o)| *j != i && !o.collected)
                .map(|(_, o)| o.pos.x)
                .collect();
            let base = tuning.viewport_width;
            let (min, max) = (tuning.respawn_min_offset, tuning.respawn_max_offset);
            let placement = place_respawn(
                &others,
                tuning.respawn_min_distance,
                tuning.respawn_attempts,
                || base + rng.random_range(min..max),
            );
            if !placement.spaced {
                log::warn!(
                    "Obstacle {} respawned at x={:.0} without minimum spacing",
                    obstacles[i].id,
                    placement.x
                );
            }
            obstacles[i].pos.x = placement.x;
        }
    }

    prune(obstacles);
}

/// Result of a respawn placement search
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub x: f32,
    /// False when the attempt budget ran out and the last draw was accepted
    pub spaced: bool,
}

/// Draw a respawn x at least `min_distance` from every x in `others`.
///
/// The first draw is checked, and each violation redraws, up to `attempts`
/// times. The final redraw is accepted unchecked, so placement is best-effort.
pub fn place_respawn(
    others: &[f32],
    min_distance: f32,
    attempts: u32,
    mut sample: impl FnMut() -> f32,
) -> Placement {
    let clear = |x: f32| others.iter().all(|o| (x - o).abs() >= min_distance);

    let mut x = sample();
    for _ in 0..attempts {
        if clear(x) {
            return Placement { x, spaced: true };
        }
        x = sample();
    }
    Placement { x, spaced: clear(x) }
}

/// Drop collected obstacles that have scrolled past the prune line
pub fn prune(obstacles: &mut Vec<Obstacle>) {
    let before = obstacles.len();
    obstacles.retain(|o| !o.collected || o.pos.x > OBSTACLE_PRUNE_X);
    if obstacles.len() != before {
        log::debug!("Pruned {} spent obstacles", before - obstacles.len());
    }
}

/// Apply one rendered frame of fade to every collected obstacle
pub fn fade_collected(obstacles: &mut [Obstacle], step: f32) {
    for obstacle in obstacles.iter_mut() {
        obstacle.fade(step);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_create_all_layout() {
        let tuning = Tuning::default();
        let obstacles = create_all(&tuning);
        assert_eq!(obstacles.len(), 5);
        for (i, o) in obstacles.iter().enumerate() {
            assert_eq!(o.pos.x, tuning.viewport_width + i as f32 * 250.0);
            assert_eq!(o.pos.y, tuning.ground_y - OBSTACLE_SIZE);
            assert_eq!(o.section, SECTIONS[i].id);
            assert!(!o.collected);
            assert_eq!(o.fade_alpha, 1.0);
        }
        let skins: Vec<_> = obstacles.iter().map(|o| o.skin.name()).collect();
        assert_eq!(skins, ["mario", "minecraft", "sonic", "pacman", "mario"]);
    }

    #[test]
    fn test_advance_moves_only_uncollected() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut obstacles = create_all(&tuning);
        obstacles[1].collected = true;
        let x1 = obstacles[1].pos.x;
        advance(&mut obstacles, 0.1, 150.0, &tuning, &mut rng);
        assert_eq!(obstacles[0].pos.x, tuning.viewport_width - 15.0);
        assert_eq!(obstacles[1].pos.x, x1);
    }

    #[test]
    fn test_offscreen_obstacle_respawns_ahead() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(3);
        let mut obstacles = create_all(&tuning);
        obstacles[0].pos.x = -49.0;
        advance(&mut obstacles, 0.1, 150.0, &tuning, &mut rng);
        assert_eq!(obstacles.len(), 5);
        let x = obstacles[0].pos.x;
        assert!(x >= tuning.viewport_width + 100.0 && x < tuning.viewport_width + 300.0);
    }

    #[test]
    fn test_place_respawn_retries_until_clear() {
        // Obstacle A at 1000; candidates inside [800, 1200] must be rejected
        let mut draws = [1050.0, 1150.0, 1250.0].into_iter();
        let placement = place_respawn(&[1000.0], 200.0, 10, || draws.next().unwrap_or(0.0));
        assert_eq!(placement, Placement { x: 1250.0, spaced: true });
    }

    #[test]
    fn test_place_respawn_gives_up_after_budget() {
        let mut draws = 0;
        let placement = place_respawn(&[1000.0], 200.0, 10, || {
            draws += 1;
            1000.0 + draws as f32
        });
        // One initial draw plus ten redraws, last one accepted
        assert_eq!(draws, 11);
        assert_eq!(placement.x, 1011.0);
        assert!(!placement.spaced);
    }

    #[test]
    fn test_prune_only_spent_collected() {
        let tuning = Tuning::default();
        let mut obstacles = create_all(&tuning);
        obstacles[0].collected = true;
        obstacles[0].pos.x = -100.0;
        obstacles[1].collected = true;
        obstacles[1].pos.x = 40.0;
        obstacles[2].pos.x = -100.0;
        prune(&mut obstacles);
        assert_eq!(obstacles.len(), 4);
        assert!(obstacles.iter().all(|o| o.id != 0));
    }

    #[test]
    fn test_fade_floors_at_zero() {
        let tuning = Tuning::default();
        let mut obstacles = create_all(&tuning);
        obstacles[0].collected = true;
        for _ in 0..25 {
            fade_collected(&mut obstacles, FADE_STEP);
        }
        assert_eq!(obstacles[0].fade_alpha, 0.0);
        assert_eq!(obstacles[1].fade_alpha, 1.0);
    }

    proptest! {
        #[test]
        fn prop_respawn_keeps_spacing_when_possible(
            others in proptest::collection::vec(0.0f32..2000.0, 0..9),
            bad_draws in 0usize..10,
            good in 2500.0f32..4000.0,
        ) {
            // Draws collide with the first obstacle until a clear spot comes up
            let mut n = 0;
            let first = others.first().copied().unwrap_or(0.0);
            let placement = place_respawn(&others, 200.0, 10, || {
                n += 1;
                if n <= bad_draws { first + 50.0 } else { good }
            });
            prop_assert!(placement.spaced);
            for o in &others {
                prop_assert!((placement.x - o).abs() >= 200.0);
            }
        }
    }
}
