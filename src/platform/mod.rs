//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Frame timing
//! - Input events
//! - Showing overlays and counters
//! - Sound output

pub mod clock;
pub mod input;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use clock::{FrameAction, FrameClock};
pub use input::{Intent, intent_for_key};

use crate::audio::SoundEffect;
use crate::sim::{FrameSnapshot, GameEvent, SectionId, Surface};

/// Where frames and overlays end up (the DOM in the browser)
pub trait Presenter {
    fn render(&mut self, frame: &FrameSnapshot);
    fn show_surface(&mut self, surface: Surface);
    fn hide_surface(&mut self, surface: Surface);
    fn set_counters(&mut self, lives: u32, progress: usize, max_progress: usize);
    /// Sound toggle label; no-op by default
    fn set_sound_label(&mut self, _enabled: bool) {}
}

/// Where sound effects end up
pub trait AudioSink {
    fn play_effect(&mut self, effect: SoundEffect);
    /// Returns the resulting enabled state
    fn set_enabled(&mut self, enabled: bool) -> bool;
}

/// Silent sink for headless runs
impl AudioSink for () {
    fn play_effect(&mut self, _effect: SoundEffect) {}

    fn set_enabled(&mut self, enabled: bool) -> bool {
        enabled
    }
}

/// Route drained core events to the presenter and audio sink
pub fn dispatch<P: Presenter, A: AudioSink>(events: Vec<GameEvent>, presenter: &mut P, audio: &mut A) {
    for event in events {
        match event {
            GameEvent::Sound(effect) => audio.play_effect(effect),
            GameEvent::Show(surface) => presenter.show_surface(surface),
            GameEvent::Hide(surface) => presenter.hide_surface(surface),
            GameEvent::Counters {
                lives,
                progress,
                max_progress,
            } => presenter.set_counters(lives, progress, max_progress),
        }
    }
}

/// Element ids backing a surface
pub fn surface_element_ids(surface: Surface) -> &'static [&'static str] {
    match surface {
        Surface::Instructions => &["instructions"],
        Surface::Section(SectionId::About) => &["aboutModal"],
        Surface::Section(SectionId::Education) => &["educationModal"],
        Surface::Section(SectionId::Experience) => &["experienceModal"],
        Surface::Section(SectionId::Projects) => &["projectsModal"],
        Surface::Section(SectionId::Certifications) => &["certificationsModal"],
        Surface::Pause => &["pauseModal"],
        Surface::Menu => &["menuModal"],
        Surface::Win => &["winModal"],
        Surface::GameOver => &["gameOverModal"],
        Surface::Controls => &["pauseButton", "menuButton"],
    }
}

/// Reverse lookup for overlay elements (used for close buttons and backdrops)
pub fn surface_for_element_id(id: &str) -> Option<Surface> {
    Surface::overlays()
        .chain([Surface::Instructions])
        .find(|s| surface_element_ids(*s).iter().any(|e| *e == id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        shown: Vec<Surface>,
        hidden: Vec<Surface>,
        counters: Option<(u32, usize, usize)>,
        sounds: Vec<SoundEffect>,
    }

    impl Presenter for Recorder {
        fn render(&mut self, _frame: &FrameSnapshot) {}
        fn show_surface(&mut self, surface: Surface) {
            self.shown.push(surface);
        }
        fn hide_surface(&mut self, surface: Surface) {
            self.hidden.push(surface);
        }
        fn set_counters(&mut self, lives: u32, progress: usize, max_progress: usize) {
            self.counters = Some((lives, progress, max_progress));
        }
    }

    impl AudioSink for Recorder {
        fn play_effect(&mut self, effect: SoundEffect) {
            self.sounds.push(effect);
        }
        fn set_enabled(&mut self, enabled: bool) -> bool {
            enabled
        }
    }

    #[test]
    fn test_dispatch_routes_each_event() {
        let mut presenter = Recorder::default();
        let mut audio = Recorder::default();
        dispatch(
            vec![
                GameEvent::Sound(SoundEffect::Collect),
                GameEvent::Show(Surface::Section(SectionId::About)),
                GameEvent::Hide(Surface::Controls),
                GameEvent::Counters {
                    lives: 2,
                    progress: 1,
                    max_progress: 5,
                },
            ],
            &mut presenter,
            &mut audio,
        );
        assert_eq!(audio.sounds, vec![SoundEffect::Collect]);
        assert_eq!(presenter.shown, vec![Surface::Section(SectionId::About)]);
        assert_eq!(presenter.hidden, vec![Surface::Controls]);
        assert_eq!(presenter.counters, Some((2, 1, 5)));
        assert!(presenter.sounds.is_empty());
    }

    #[test]
    fn test_element_ids_round_trip() {
        for surface in Surface::overlays() {
            let id = surface_element_ids(surface)[0];
            assert_eq!(surface_for_element_id(id), Some(surface));
        }
        assert_eq!(surface_for_element_id("instructions"), Some(Surface::Instructions));
        assert_eq!(surface_for_element_id("gameCanvas"), None);
    }
}
