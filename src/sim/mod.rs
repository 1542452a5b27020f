//! Game core
//!
//! All gameplay logic lives here, free of any browser dependency:
//! - Variable timestep, clamped per frame
//! - Seeded RNG only
//! - Side effects leave as drained [`GameEvent`]s, never direct calls

pub mod collision;
pub mod obstacles;
pub mod player;
pub mod session;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use collision::{Contact, classify_contact};
pub use obstacles::{Obstacle, Placement, place_respawn};
pub use player::Player;
pub use snapshot::{CloudSnapshot, FrameSnapshot, ObstacleSnapshot, PlayerSnapshot};
pub use state::{
    BlockSkin, Cloud, GameCore, GameEvent, SECTIONS, SKIN_ORDER, Section, SectionId, SessionState,
    Surface,
};
pub use tick::tick;
