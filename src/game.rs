//! Loop driver
//!
//! `Game` owns the core together with the presentation and audio backends,
//! and is the only place where frame timing, simulation and event dispatch
//! meet. The browser shell holds one in an `Rc<RefCell<_>>`; native runs and
//! tests drive it directly with synthetic timestamps.

use crate::platform::{self, AudioSink, FrameAction, FrameClock, Intent, Presenter};
use crate::sim::{self, GameCore, SectionId, Surface};
use crate::tuning::Tuning;

pub struct Game<P: Presenter, A: AudioSink> {
    core: GameCore,
    clock: FrameClock,
    presenter: P,
    audio: A,
    sound_enabled: bool,
}

impl<P: Presenter, A: AudioSink> Game<P, A> {
    pub fn new(tuning: Tuning, seed: u64, presenter: P, mut audio: A, now_ms: f64) -> Self {
        let sound_enabled = audio.set_enabled(tuning.sound_enabled);
        let core = GameCore::new(tuning, seed);
        let mut game = Self {
            core,
            clock: FrameClock::new(now_ms),
            presenter,
            audio,
            sound_enabled,
        };
        game.presenter.set_sound_label(sound_enabled);
        game.presenter
            .set_counters(game.core.lives, 0, game.core.tuning.max_progress);
        log::info!("Game initialized with seed: {}", seed);
        game
    }

    /// One animation frame at `now_ms`
    pub fn frame(&mut self, now_ms: f64) {
        self.core.poll_deferred(now_ms);
        self.flush();

        let state = self.core.state;
        match self.clock.advance(now_ms, state.is_running(), state.is_paused()) {
            FrameAction::Idle => {}
            FrameAction::RenderOnly => self.render(),
            FrameAction::UpdateAndRender(dt) => {
                sim::tick(&mut self.core, dt, now_ms);
                self.flush();
                self.render();
            }
        }
    }

    pub fn intent(&mut self, intent: Intent) {
        match intent {
            Intent::Jump => {
                self.core.jump();
            }
            Intent::TogglePause => self.core.toggle_pause(),
            Intent::OpenMenu => self.core.open_menu(),
        }
        self.flush();
    }

    pub fn start(&mut self, now_ms: f64) {
        self.core.start();
        self.clock.reset(now_ms);
        self.flush();
        self.render();
    }

    pub fn restart(&mut self, now_ms: f64) {
        self.core.restart();
        self.clock.reset(now_ms);
        self.flush();
        self.render();
    }

    /// Resume button on the pause overlay
    pub fn resume(&mut self) {
        self.core.resume();
        self.flush();
    }

    pub fn close_surface(&mut self, surface: Surface, now_ms: f64) {
        self.core.close_surface(surface, now_ms);
        self.flush();
    }

    pub fn backdrop_click(&mut self, surface: Surface, now_ms: f64) {
        self.core.backdrop_click(surface, now_ms);
        self.flush();
    }

    pub fn open_section_from_menu(&mut self, section: SectionId) {
        self.core.open_section_from_menu(section);
        self.flush();
    }

    pub fn close_menu(&mut self) {
        self.core.close_menu();
        self.flush();
    }

    /// Flip sound output; returns the new state
    pub fn toggle_sound(&mut self) -> bool {
        self.sound_enabled = self.audio.set_enabled(!self.sound_enabled);
        self.presenter.set_sound_label(self.sound_enabled);
        self.sound_enabled
    }

    pub fn sound_enabled(&self) -> bool {
        self.sound_enabled
    }

    pub fn core(&self) -> &GameCore {
        &self.core
    }

    pub fn core_mut(&mut self) -> &mut GameCore {
        &mut self.core
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    fn render(&mut self) {
        let frame = self.core.render_frame();
        self.presenter.render(&frame);
    }

    fn flush(&mut self) {
        let events = self.core.drain_events();
        platform::dispatch(events, &mut self.presenter, &mut self.audio);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::SoundEffect;
    use crate::sim::{FrameSnapshot, SessionState};

    #[derive(Default)]
    struct Screen {
        frames: usize,
        visible: Vec<Surface>,
        sound_label: Option<bool>,
    }

    impl Presenter for Screen {
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
        fn set_counters(&mut self, _lives: u32, _progress: usize, _max: usize) {}
        fn set_sound_label(&mut self, enabled: bool) {
            self.sound_label = Some(enabled);
        }
    }

    #[derive(Default)]
    struct Speaker {
        enabled: bool,
        played: Vec<SoundEffect>,
    }

    impl AudioSink for Speaker {
        fn play_effect(&mut self, effect: SoundEffect) {
            if self.enabled {
                self.played.push(effect);
            }
        }
        fn set_enabled(&mut self, enabled: bool) -> bool {
            self.enabled = enabled;
            enabled
        }
    }

    fn game() -> Game<Screen, Speaker> {
        Game::new(Tuning::default(), 9, Screen::default(), Speaker::default(), 0.0)
    }

    #[test]
    fn test_sound_starts_disabled_and_toggles() {
        let mut g = game();
        assert!(!g.sound_enabled());
        assert_eq!(g.presenter().sound_label, Some(false));
        g.start(0.0);
        g.intent(Intent::Jump);
        assert!(g.audio().played.is_empty());

        assert!(g.toggle_sound());
        assert_eq!(g.presenter().sound_label, Some(true));
        // Let the first jump land
        for i in 1..=125 {
            g.frame(i as f64 * 16.0);
        }
        assert!(!g.core().player.is_jumping);
        g.intent(Intent::Jump);
        assert_eq!(g.audio().played, vec![SoundEffect::Jump]);
    }

    #[test]
    fn test_idle_frames_do_not_render() {
        let mut g = game();
        g.frame(16.0);
        g.frame(32.0);
        assert_eq!(g.presenter().frames, 0);
        g.start(40.0);
        g.frame(56.0);
        assert_eq!(g.presenter().frames, 2);
    }

    #[test]
    fn test_paused_frames_render_without_moving() {
        let mut g = game();
        g.start(0.0);
        g.frame(16.0);
        g.intent(Intent::TogglePause);
        assert!(g.presenter().visible.contains(&Surface::Pause));
        let x = g.core().obstacles[0].pos.x;
        let rendered = g.presenter().frames;
        g.frame(5_000.0);
        g.frame(9_000.0);
        assert_eq!(g.core().obstacles[0].pos.x, x);
        assert_eq!(g.presenter().frames, rendered + 2);

        g.resume();
        assert_eq!(g.core().state, SessionState::Running);
        assert!(!g.presenter().visible.contains(&Surface::Pause));
        g.frame(9_016.0);
        // Only 16ms of motion despite the long pause
        assert!((g.core().obstacles[0].pos.x - (x - 150.0 * 0.016)).abs() < 1e-2);
    }

    #[test]
    fn test_start_shows_controls_and_hides_instructions() {
        let mut g = game();
        g.presenter_mut().show_surface(Surface::Instructions);
        g.start(0.0);
        assert!(!g.presenter().visible.contains(&Surface::Instructions));
        assert!(g.presenter().visible.contains(&Surface::Controls));
    }
}
