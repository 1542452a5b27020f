//! Game state and core simulation types
//!
//! `GameCore` is the single owned aggregate the loop driver holds. Everything
//! that changes between frames lives here; presentation only ever sees
//! [`super::snapshot::FrameSnapshot`] and drained [`GameEvent`]s.

use std::collections::BTreeSet;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::obstacles::{self, Obstacle};
use super::player::Player;
use crate::audio::SoundEffect;
use crate::consts::*;
use crate::tuning::Tuning;

/// Session state machine
///
/// ```text
/// Idle -> Running <-> PausedForCollect | PausedByUser | PausedMenu
/// Running -> GameOver | Won
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SessionState {
    /// Instructions shown, loop not started
    #[default]
    Idle,
    /// Active gameplay
    Running,
    /// A section overlay opened by landing on an obstacle
    PausedForCollect,
    /// Player pressed pause
    PausedByUser,
    /// Menu surface open (possibly hidden behind a section overlay)
    PausedMenu,
    /// All lives lost
    GameOver,
    /// Every section collected
    Won,
}

impl SessionState {
    /// Loop is live (updating or showing paused visuals)
    pub fn is_running(self) -> bool {
        !matches!(self, Self::Idle | Self::GameOver | Self::Won)
    }

    /// Simulation must not advance
    pub fn is_paused(self) -> bool {
        matches!(
            self,
            Self::PausedForCollect | Self::PausedByUser | Self::PausedMenu
        )
    }

    /// Pause originated from the player (pause key or menu)
    pub fn is_user_paused(self) -> bool {
        matches!(self, Self::PausedByUser | Self::PausedMenu)
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Self::GameOver | Self::Won)
    }
}

/// Portfolio sections, in reveal order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SectionId {
    About,
    Education,
    Experience,
    Projects,
    Certifications,
}

/// A portfolio content block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section {
    pub id: SectionId,
    pub title: &'static str,
    pub emoji: &'static str,
}

pub static SECTIONS: [Section; 5] = [
    Section { id: SectionId::About, title: "About Me", emoji: "👋" },
    Section { id: SectionId::Education, title: "Education", emoji: "🎓" },
    Section { id: SectionId::Experience, title: "Experience", emoji: "💼" },
    Section { id: SectionId::Projects, title: "Projects", emoji: "🚀" },
    Section { id: SectionId::Certifications, title: "Certifications", emoji: "🏆" },
];

impl SectionId {
    pub fn section(self) -> &'static Section {
        &SECTIONS[self.index()]
    }

    pub fn index(self) -> usize {
        match self {
            Self::About => 0,
            Self::Education => 1,
            Self::Experience => 2,
            Self::Projects => 3,
            Self::Certifications => 4,
        }
    }

    /// Short key used by menu buttons (`data-section`)
    pub fn key(self) -> &'static str {
        match self {
            Self::About => "about",
            Self::Education => "education",
            Self::Experience => "experience",
            Self::Projects => "projects",
            Self::Certifications => "certifications",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        SECTIONS
            .iter()
            .map(|s| s.id)
            .find(|id| id.key() == key || id.dom_id() == key)
    }

    /// Element id of this section's overlay
    pub fn dom_id(self) -> &'static str {
        match self {
            Self::About => "aboutModal",
            Self::Education => "educationModal",
            Self::Experience => "experienceModal",
            Self::Projects => "projectsModal",
            Self::Certifications => "certificationsModal",
        }
    }
}

/// Visual theme of an obstacle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockSkin {
    Mario,
    Minecraft,
    Sonic,
    Pacman,
}

/// Skin assignment for obstacles, by creation index
pub const SKIN_ORDER: [BlockSkin; 5] = [
    BlockSkin::Mario,
    BlockSkin::Minecraft,
    BlockSkin::Sonic,
    BlockSkin::Pacman,
    BlockSkin::Mario,
];

impl BlockSkin {
    pub fn name(self) -> &'static str {
        match self {
            Self::Mario => "mario",
            Self::Minecraft => "minecraft",
            Self::Sonic => "sonic",
            Self::Pacman => "pacman",
        }
    }
}

/// UI surfaces the core can show or hide
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Surface {
    Instructions,
    Section(SectionId),
    Pause,
    Menu,
    Win,
    GameOver,
    /// In-loop pause and menu buttons
    Controls,
}

impl Surface {
    /// Every modal overlay (closed together on restart)
    pub fn overlays() -> impl Iterator<Item = Surface> {
        SECTIONS
            .iter()
            .map(|s| Surface::Section(s.id))
            .chain([Surface::Pause, Surface::Menu, Surface::Win, Surface::GameOver])
    }

    /// Whether a click on the backdrop may dismiss this surface
    pub fn dismissible_by_backdrop(self) -> bool {
        matches!(self, Surface::Section(_))
    }
}

/// Discrete notifications for the presentation and audio layers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Sound(SoundEffect),
    Show(Surface),
    Hide(Surface),
    Counters {
        lives: u32,
        progress: usize,
        max_progress: usize,
    },
}

/// A decorative background cloud
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cloud {
    pub pos: Vec2,
    pub size: f32,
    /// Pixels per 60 Hz frame
    pub speed: f32,
}

impl Cloud {
    pub fn new(x: f32, y: f32, size: f32, speed: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size,
            speed,
        }
    }

    /// Drift left; wrap to the right edge once fully off-screen
    pub fn drift(&mut self, dt: f32, viewport_width: f32, rng: &mut impl Rng) {
        self.pos.x -= self.speed * CLOUD_SPEED_SCALE * dt;
        if self.pos.x + self.size < 0.0 {
            self.pos.x = viewport_width + self.size + rng.random_range(0.0..CLOUD_WRAP_JITTER);
        }
    }
}

/// Starting sky layout
pub fn default_clouds() -> Vec<Cloud> {
    vec![
        Cloud::new(100.0, 50.0, 30.0, 0.2),
        Cloud::new(300.0, 80.0, 40.0, 0.15),
        Cloud::new(500.0, 60.0, 25.0, 0.3),
        Cloud::new(700.0, 70.0, 35.0, 0.25),
        Cloud::new(900.0, 45.0, 28.0, 0.18),
        Cloud::new(1100.0, 65.0, 32.0, 0.22),
        Cloud::new(1300.0, 55.0, 38.0, 0.12),
    ]
}

/// The whole game: session, player, obstacles, scenery
#[derive(Debug, Clone)]
pub struct GameCore {
    pub tuning: Tuning,
    pub state: SessionState,
    pub lives: u32,
    /// World scroll speed (pixels/s)
    pub game_speed: f32,
    pub player: Player,
    pub obstacles: Vec<Obstacle>,
    pub clouds: Vec<Cloud>,
    /// Sections of collected obstacles, in collection order
    pub collected: Vec<SectionId>,
    pub(crate) last_life_loss_ms: Option<f64>,
    pub(crate) pending_win_check_ms: Option<f64>,
    /// Section overlay opened from the menu, if one is up
    pub(crate) browsing: Option<SectionId>,
    pub(crate) rng: Pcg32,
    pub(crate) events: Vec<GameEvent>,
}

impl GameCore {
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        let player = Player::new(tuning.ground_y);
        let obstacles = obstacles::create_all(&tuning);
        Self {
            state: SessionState::Idle,
            lives: tuning.max_lives,
            game_speed: tuning.game_speed,
            player,
            obstacles,
            clouds: default_clouds(),
            collected: Vec::new(),
            last_life_loss_ms: None,
            pending_win_check_ms: None,
            browsing: None,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
            tuning,
        }
    }

    /// Distinct sections collected so far
    pub fn progress(&self) -> usize {
        self.collected.iter().collect::<BTreeSet<_>>().len()
    }

    /// Take every event raised since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub(crate) fn emit_counters(&mut self) {
        let event = GameEvent::Counters {
            lives: self.lives,
            progress: self.progress(),
            max_progress: self.tuning.max_progress,
        };
        self.emit(event);
    }

    /// Reset lives, progress, speed, player and obstacles for a new run
    pub(crate) fn reset_round(&mut self) {
        self.lives = self.tuning.max_lives;
        self.game_speed = self.tuning.game_speed;
        self.collected.clear();
        self.last_life_loss_ms = None;
        self.pending_win_check_ms = None;
        self.browsing = None;
        self.player.reset();
        self.player.is_flashing = false;
        self.obstacles = obstacles::create_all(&self.tuning);
    }
}
