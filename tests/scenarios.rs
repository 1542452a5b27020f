//! End-to-end runs of the game loop with recording backends

use portfolio_runner::audio::SoundEffect;
use portfolio_runner::platform::{AudioSink, Intent, Presenter};
use portfolio_runner::sim::{FrameSnapshot, SectionId, SessionState, Surface};
use portfolio_runner::{Game, Tuning};

#[derive(Default)]
struct RecordingPresenter {
    visible: Vec<Surface>,
    counters: Option<(u32, usize, usize)>,
    frames: usize,
}

impl Presenter for RecordingPresenter {
    fn render(&mut self, _frame: &FrameSnapshot) {
        self.frames += 1;
    }

    fn show_surface(&mut self, surface: Surface) {
        if !self.visible.contains(&surface) {
            self.visible.push(surface);
        }
    }

    fn hide_surface(&mut self, surface: Surface) {
        self.visible.retain(|s| *s != surface);
    }

    fn set_counters(&mut self, lives: u32, progress: usize, max_progress: usize) {
        self.counters = Some((lives, progress, max_progress));
    }
}

#[derive(Default)]
struct RecordingAudio {
    played: Vec<SoundEffect>,
}

impl AudioSink for RecordingAudio {
    fn play_effect(&mut self, effect: SoundEffect) {
        self.played.push(effect);
    }

    fn set_enabled(&mut self, enabled: bool) -> bool {
        enabled
    }
}

type TestGame = Game<RecordingPresenter, RecordingAudio>;

const FRAME_MS: f64 = 16.0;

fn started_game() -> TestGame {
    let mut game = Game::new(
        Tuning::default(),
        2024,
        RecordingPresenter::default(),
        RecordingAudio::default(),
        0.0,
    );
    game.presenter_mut().show_surface(Surface::Instructions);
    game.start(0.0);
    game
}

/// Place the player just above obstacle `index`, falling onto it
fn drop_onto(game: &mut TestGame, index: usize) {
    let core = game.core_mut();
    let (x, y) = (core.obstacles[index].pos.x, core.obstacles[index].pos.y);
    core.player.pos.x = x;
    core.player.pos.y = y - 10.0;
    core.player.velocity_y = 100.0;
    core.player.is_jumping = true;
}

/// Move obstacle `index` against the grounded player's side
fn bump_into(game: &mut TestGame, index: usize) {
    let core = game.core_mut();
    core.player.reset();
    core.obstacles[index].pos.x = core.player.pos.x + 20.0;
    core.player.pos.y = core.obstacles[index].pos.y + 10.0;
    core.player.is_jumping = true;
}

#[test]
fn test_collect_every_section_and_win() {
    let mut game = started_game();
    let mut now = 0.0;
    assert_eq!(game.core().lives, 3);
    assert_eq!(game.core().progress(), 0);
    assert!(!game.presenter().visible.contains(&Surface::Instructions));
    assert!(game.presenter().visible.contains(&Surface::Controls));

    // Land on the first (mario) block
    drop_onto(&mut game, 0);
    now += FRAME_MS;
    game.frame(now);
    assert_eq!(game.core().progress(), 1);
    assert_eq!(game.core().state, SessionState::PausedForCollect);
    assert!(
        game.presenter()
            .visible
            .contains(&Surface::Section(SectionId::About))
    );
    assert_eq!(game.presenter().counters, Some((3, 1, 5)));

    // Paused: frames draw but nothing moves
    let x = game.core().obstacles[1].pos.x;
    now += 2_000.0;
    game.frame(now);
    assert_eq!(game.core().obstacles[1].pos.x, x);

    // Closing the overlay resumes; the deferred win check fails (1 < 5)
    game.close_surface(Surface::Section(SectionId::About), now);
    assert_eq!(game.core().state, SessionState::Running);
    for _ in 0..5 {
        now += FRAME_MS;
        game.frame(now);
    }
    assert_eq!(game.core().state, SessionState::Running);

    // Side collision with the second block
    bump_into(&mut game, 1);
    now += FRAME_MS;
    game.frame(now);
    assert_eq!(game.core().lives, 2);
    assert_eq!(game.core().player.pos.x, 50.0);
    assert_eq!(game.core().player.pos.y, game.core().player.ground_y);
    assert_eq!(game.presenter().counters, Some((2, 1, 5)));

    // Land on the remaining four in turn
    for (index, shown) in [
        (1, SectionId::Education),
        (2, SectionId::Experience),
        (3, SectionId::Projects),
        (4, SectionId::Certifications),
    ] {
        drop_onto(&mut game, index);
        now += FRAME_MS;
        game.frame(now);
        assert_eq!(game.core().state, SessionState::PausedForCollect);
        assert!(game.presenter().visible.contains(&Surface::Section(shown)));
        game.close_surface(Surface::Section(shown), now);
    }
    assert_eq!(game.core().progress(), 5);

    // Win is decided 50ms after the last overlay closes
    now += FRAME_MS;
    game.frame(now);
    assert_eq!(game.core().state, SessionState::Running);
    now += 50.0;
    game.frame(now);
    assert_eq!(game.core().state, SessionState::Won);
    assert!(game.presenter().visible.contains(&Surface::Win));
    assert!(!game.presenter().visible.contains(&Surface::Controls));
    assert_eq!(game.audio().played.last(), Some(&SoundEffect::Win));

    // Loop halted
    let frames = game.presenter().frames;
    let positions: Vec<f32> = game.core().obstacles.iter().map(|o| o.pos.x).collect();
    now += FRAME_MS;
    game.frame(now);
    game.intent(Intent::Jump);
    assert_eq!(game.presenter().frames, frames);
    let after: Vec<f32> = game.core().obstacles.iter().map(|o| o.pos.x).collect();
    assert_eq!(positions, after);
    assert!(!game.audio().played.contains(&SoundEffect::Jump));
}

#[test]
fn test_three_hits_end_the_game() {
    let mut game = started_game();
    let mut now = 0.0;

    for expected_lives in [2, 1, 0] {
        bump_into(&mut game, 2);
        now += 1_100.0;
        game.frame(now);
        assert_eq!(game.core().lives, expected_lives);
    }

    assert_eq!(game.core().state, SessionState::GameOver);
    assert!(game.presenter().visible.contains(&Surface::GameOver));
    assert!(!game.presenter().visible.contains(&Surface::Controls));
    assert_eq!(game.presenter().counters, Some((0, 0, 5)));
    let played = &game.audio().played;
    assert_eq!(played.iter().filter(|s| **s == SoundEffect::LifeLoss).count(), 3);
    assert_eq!(played.last(), Some(&SoundEffect::GameOver));

    // No further updates once over
    let frames = game.presenter().frames;
    now += FRAME_MS;
    game.frame(now);
    assert_eq!(game.presenter().frames, frames);
}

#[test]
fn test_hits_inside_cooldown_cost_one_life() {
    let mut game = started_game();
    let mut now = 0.0;
    for _ in 0..3 {
        bump_into(&mut game, 2);
        now += 300.0;
        game.frame(now);
    }
    assert_eq!(game.core().lives, 2);
}

#[test]
fn test_restart_after_game_over() {
    let mut game = started_game();
    let mut now = 0.0;
    for _ in 0..3 {
        bump_into(&mut game, 2);
        now += 1_100.0;
        game.frame(now);
    }
    assert_eq!(game.core().state, SessionState::GameOver);

    game.restart(now);
    assert_eq!(game.core().state, SessionState::Running);
    assert_eq!(game.core().lives, 3);
    assert!(!game.presenter().visible.contains(&Surface::GameOver));
    assert!(game.presenter().visible.contains(&Surface::Controls));
    assert_eq!(game.presenter().counters, Some((3, 0, 5)));
}

#[test]
fn test_menu_browsing_pauses_without_progress() {
    let mut game = started_game();
    let mut now = FRAME_MS;
    game.frame(now);

    game.intent(Intent::OpenMenu);
    assert_eq!(game.core().state, SessionState::PausedMenu);
    game.open_section_from_menu(SectionId::Projects);
    assert!(!game.presenter().visible.contains(&Surface::Menu));
    game.backdrop_click(Surface::Section(SectionId::Projects), now);
    assert!(game.presenter().visible.contains(&Surface::Menu));
    assert_eq!(game.core().state, SessionState::PausedMenu);

    game.close_menu();
    now += FRAME_MS;
    game.frame(now);
    assert_eq!(game.core().state, SessionState::Running);
    assert_eq!(game.core().progress(), 0);
}

#[test]
fn test_keys_while_browsing_leave_no_section_over_play() {
    for key in [Intent::TogglePause, Intent::OpenMenu] {
        let mut game = started_game();
        game.intent(Intent::OpenMenu);
        game.open_section_from_menu(SectionId::Projects);
        game.intent(key);

        let x = game.core().obstacles[0].pos.x;
        game.frame(FRAME_MS);
        assert_eq!(game.core().state, SessionState::Running);
        assert_eq!(game.presenter().visible, vec![Surface::Controls]);
        assert!(game.core().obstacles[0].pos.x < x);
    }
}
