//! Per-frame simulation update
//!
//! Order inside one tick: pause check, player, obstacles, clouds, collisions,
//! game-over check. A tick resolves at most one contact so a single overlap
//! can never count as both a collect and a life loss.

use super::collision::{Contact, classify_contact};
use super::obstacles;
use super::state::{GameCore, GameEvent, SECTIONS, SessionState, Surface};
use crate::audio::SoundEffect;
use crate::consts::MAX_FRAME_DT;

/// Advance the game by `dt` seconds of simulation time.
///
/// `now_ms` is the wall clock used for the flash effect and the life-loss
/// cooldown. Does nothing unless the session is running and unpaused.
pub fn tick(core: &mut GameCore, dt: f32, now_ms: f64) {
    if core.state != SessionState::Running {
        return;
    }
    let dt = dt.clamp(0.0, MAX_FRAME_DT);

    core.player.update(dt, now_ms, &core.tuning);

    obstacles::advance(
        &mut core.obstacles,
        dt,
        core.game_speed,
        &core.tuning,
        &mut core.rng,
    );

    let width = core.tuning.viewport_width;
    for cloud in &mut core.clouds {
        cloud.drift(dt, width, &mut core.rng);
    }

    resolve_collisions(core, now_ms);

    if core.lives == 0 && !core.state.is_terminal() {
        core.game_over();
    }
}

/// Find the first obstacle the player touches and act on it
fn resolve_collisions(core: &mut GameCore, now_ms: f64) {
    let contact = core
        .obstacles
        .iter()
        .enumerate()
        .find_map(|(i, o)| classify_contact(&core.player, o).map(|c| (i, c)));

    match contact {
        Some((index, Contact::Landing)) => core.collect(index),
        Some((_, Contact::Hit)) => {
            core.lose_life(now_ms);
        }
        None => {}
    }
}

impl GameCore {
    /// Mark an obstacle collected and reveal the next section in collection order
    pub(crate) fn collect(&mut self, index: usize) {
        let Some(obstacle) = self.obstacles.get_mut(index) else {
            return;
        };
        if obstacle.collected {
            return;
        }
        obstacle.collected = true;
        let section = obstacle.section;
        self.collected.push(section);
        self.state = SessionState::PausedForCollect;

        self.emit(GameEvent::Sound(SoundEffect::Collect));

        // Overlay follows the order of collection, not the obstacle's own section
        let shown = SECTIONS[(self.collected.len() - 1).min(SECTIONS.len() - 1)].id;
        self.emit(GameEvent::Show(Surface::Section(shown)));
        self.emit_counters();

        log::info!(
            "Collected {:?} block ({}/{}), showing {:?}",
            section,
            self.progress(),
            self.tuning.max_progress,
            shown
        );
    }
}
