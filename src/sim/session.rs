//! Session transitions: start/restart, intents, overlays, lives and winning
//!
//! Transition table (anything not listed is ignored):
//!
//! | from              | trigger                  | to                |
//! |-------------------|--------------------------|-------------------|
//! | any               | start / restart          | Running           |
//! | Running           | landing                  | PausedForCollect  |
//! | Running           | toggle pause             | PausedByUser      |
//! | PausedByUser      | toggle pause             | Running           |
//! | Running, Paused*  | open menu                | PausedMenu        |
//! | PausedMenu        | pause / menu / close menu| Running           |
//! | PausedMenu        | close section overlay    | PausedMenu        |
//! | PausedForCollect  | close section overlay    | Running           |
//! | Running           | last life lost           | GameOver          |
//! | non-terminal      | deferred win check       | Won               |

use super::state::{GameCore, GameEvent, SectionId, SessionState, Surface};
use crate::audio::SoundEffect;

impl GameCore {
    /// Begin the first run from the instructions screen
    pub fn start(&mut self) {
        self.reset_round();
        self.state = SessionState::Running;
        self.emit(GameEvent::Hide(Surface::Instructions));
        self.emit(GameEvent::Show(Surface::Controls));
        self.emit_counters();
        log::info!("Game started");
    }

    /// Start over, closing every open overlay
    pub fn restart(&mut self) {
        self.reset_round();
        self.state = SessionState::Running;
        let overlays: Vec<Surface> = Surface::overlays().collect();
        for surface in overlays {
            self.emit(GameEvent::Hide(surface));
        }
        self.emit(GameEvent::Show(Surface::Controls));
        self.emit_counters();
        log::info!("Game restarted");
    }

    /// Jump intent; only honored during active play
    pub fn jump(&mut self) -> bool {
        if self.state != SessionState::Running {
            return false;
        }
        let jumped = self.player.jump(self.tuning.jump_velocity);
        if jumped {
            self.emit(GameEvent::Sound(SoundEffect::Jump));
        }
        jumped
    }

    /// Pause intent: flips between play and user pause
    pub fn toggle_pause(&mut self) {
        match self.state {
            SessionState::Running => {
                self.state = SessionState::PausedByUser;
                self.emit(GameEvent::Show(Surface::Pause));
                log::info!("Paused");
            }
            SessionState::PausedByUser => self.resume(),
            SessionState::PausedMenu => self.close_menu(),
            _ => {}
        }
    }

    /// Leave a user pause
    pub fn resume(&mut self) {
        if self.state != SessionState::PausedByUser {
            return;
        }
        self.state = SessionState::Running;
        self.emit(GameEvent::Hide(Surface::Pause));
        log::info!("Resumed");
    }

    /// Menu intent: pauses like the pause key but shows the menu
    pub fn open_menu(&mut self) {
        match self.state {
            SessionState::Running => {}
            SessionState::PausedByUser => self.emit(GameEvent::Hide(Surface::Pause)),
            SessionState::PausedMenu => {
                self.close_menu();
                return;
            }
            _ => return,
        }
        self.state = SessionState::PausedMenu;
        self.emit(GameEvent::Show(Surface::Menu));
        log::info!("Menu opened");
    }

    pub fn close_menu(&mut self) {
        if self.state != SessionState::PausedMenu {
            return;
        }
        self.state = SessionState::Running;
        self.emit(GameEvent::Hide(Surface::Menu));
        if let Some(section) = self.browsing.take() {
            self.emit(GameEvent::Hide(Surface::Section(section)));
        }
        log::info!("Menu closed");
    }

    /// Browse a section from the menu; closing it returns to the menu
    pub fn open_section_from_menu(&mut self, section: SectionId) {
        if self.state != SessionState::PausedMenu {
            return;
        }
        if let Some(open) = self.browsing.replace(section) {
            self.emit(GameEvent::Hide(Surface::Section(open)));
        }
        self.emit(GameEvent::Hide(Surface::Menu));
        self.emit(GameEvent::Show(Surface::Section(section)));
    }

    /// An overlay's close control was used.
    ///
    /// Section overlays opened while user-paused go back to the menu. Closing
    /// any other overlay except Win, GameOver and Menu resumes play and
    /// schedules a win check `win_check_delay_ms` later.
    pub fn close_surface(&mut self, surface: Surface, now_ms: f64) {
        self.emit(GameEvent::Hide(surface));

        if let Surface::Section(_) = surface {
            if self.state.is_user_paused() {
                self.browsing = None;
                self.state = SessionState::PausedMenu;
                self.emit(GameEvent::Show(Surface::Menu));
                return;
            }
        }

        match surface {
            Surface::Win | Surface::GameOver | Surface::Menu | Surface::Instructions | Surface::Controls => {}
            Surface::Section(_) | Surface::Pause => {
                if self.state.is_paused() {
                    self.state = SessionState::Running;
                    self.pending_win_check_ms = Some(now_ms + self.tuning.win_check_delay_ms);
                    log::info!("Resumed after closing {:?}", surface);
                }
            }
        }
    }

    /// A click landed on an overlay's backdrop
    pub fn backdrop_click(&mut self, surface: Surface, now_ms: f64) {
        if surface.dismissible_by_backdrop() {
            self.close_surface(surface, now_ms);
        }
    }

    /// Run timers that fire independently of the simulation
    pub fn poll_deferred(&mut self, now_ms: f64) {
        if let Some(due) = self.pending_win_check_ms {
            if now_ms >= due {
                self.pending_win_check_ms = None;
                self.check_win();
            }
        }
    }

    /// Win once every distinct section has been collected
    pub fn check_win(&mut self) -> bool {
        if !self.state.is_running() || self.progress() < self.tuning.max_progress {
            return false;
        }
        self.state = SessionState::Won;
        self.emit(GameEvent::Sound(SoundEffect::Win));
        self.emit(GameEvent::Show(Surface::Win));
        self.emit(GameEvent::Hide(Surface::Controls));
        log::info!("All {} sections collected, game won", self.tuning.max_progress);
        true
    }

    /// Side or bottom contact. Returns false when absorbed by the cooldown.
    pub fn lose_life(&mut self, now_ms: f64) -> bool {
        if !self.state.is_running() {
            return false;
        }
        if let Some(last) = self.last_life_loss_ms {
            if now_ms - last < self.tuning.life_loss_cooldown_ms {
                log::debug!("Hit ignored, life loss cooldown active");
                return false;
            }
        }

        self.last_life_loss_ms = Some(now_ms);
        self.lives = self.lives.saturating_sub(1);
        self.player.lose_life_pose(now_ms);
        self.emit(GameEvent::Sound(SoundEffect::LifeLoss));
        self.emit_counters();
        log::info!("Life lost, {} left", self.lives);

        if self.lives == 0 {
            self.game_over();
        } else {
            self.player.reset();
        }
        true
    }

    pub(crate) fn game_over(&mut self) {
        self.state = SessionState::GameOver;
        self.pending_win_check_ms = None;
        self.emit(GameEvent::Sound(SoundEffect::GameOver));
        self.emit(GameEvent::Show(Surface::GameOver));
        self.emit(GameEvent::Hide(Surface::Controls));
        log::info!("Game over");
    }
}
