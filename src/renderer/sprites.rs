//! Sprite selection and fallbacks
//!
//! Which image a player or obstacle uses, and the flat-colour stand-in drawn
//! until that image has loaded.

use crate::sim::{BlockSkin, ObstacleSnapshot, PlayerSnapshot};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteKey {
    Character,
    CharacterJump,
    CharacterLifeLost,
    Destroyed,
    Block(BlockSkin),
}

impl SpriteKey {
    pub const ALL: [SpriteKey; 8] = [
        SpriteKey::Character,
        SpriteKey::CharacterJump,
        SpriteKey::CharacterLifeLost,
        SpriteKey::Destroyed,
        SpriteKey::Block(BlockSkin::Mario),
        SpriteKey::Block(BlockSkin::Minecraft),
        SpriteKey::Block(BlockSkin::Sonic),
        SpriteKey::Block(BlockSkin::Pacman),
    ];

    pub fn path(self) -> &'static str {
        match self {
            Self::Character => "resources/character.png",
            Self::CharacterJump => "resources/character_jump.png",
            Self::CharacterLifeLost => "resources/character_lifelost.png",
            Self::Destroyed => "resources/destroyed.png",
            Self::Block(BlockSkin::Mario) => "resources/mario.png",
            Self::Block(BlockSkin::Minecraft) => "resources/minecraft.png",
            Self::Block(BlockSkin::Sonic) => "resources/sonic.png",
            Self::Block(BlockSkin::Pacman) => "resources/pacman.png",
        }
    }
}

/// How to draw the player this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlayerLook {
    /// Image, drawn rotated and scaled about the player's centre
    Sprite(SpriteKey),
    /// Flat rectangle in the same transform
    Tinted(&'static str),
    /// Nothing loaded yet: untransformed box with a label
    Loading,
}

pub const LOADING_FILL: &str = "#4A90E2";
pub const LOADING_TEXT: &str = "Loading...";
pub const FLASH_FILL: &str = "#FF0000";
pub const BLOCK_FILL: &str = "#FFD700";
pub const BLOCK_COLLECTED_FILL: &str = "#8B4513";
pub const BLOCK_STROKE: &str = "#654321";

/// Pick the player's look given which sprites are ready
pub fn player_look(player: &PlayerSnapshot, loaded: impl Fn(SpriteKey) -> bool) -> PlayerLook {
    let pose = if player.airborne {
        SpriteKey::CharacterJump
    } else {
        SpriteKey::Character
    };
    if !loaded(pose) {
        return PlayerLook::Loading;
    }
    if !player.flashing {
        PlayerLook::Sprite(pose)
    } else if loaded(SpriteKey::CharacterLifeLost) {
        PlayerLook::Sprite(SpriteKey::CharacterLifeLost)
    } else {
        PlayerLook::Tinted(FLASH_FILL)
    }
}

/// Sprite for an obstacle, collected or not
pub fn obstacle_sprite(obstacle: &ObstacleSnapshot) -> SpriteKey {
    if obstacle.collected {
        SpriteKey::Destroyed
    } else {
        SpriteKey::Block(obstacle.skin)
    }
}

pub fn obstacle_fallback_fill(obstacle: &ObstacleSnapshot) -> &'static str {
    if obstacle.collected {
        BLOCK_COLLECTED_FILL
    } else {
        BLOCK_FILL
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::SpriteSheet;

#[cfg(target_arch = "wasm32")]
mod web {
    use std::collections::HashMap;

    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::HtmlImageElement;

    use super::SpriteKey;

    /// Images requested up front; drawing checks readiness every frame
    pub struct SpriteSheet {
        images: HashMap<SpriteKey, HtmlImageElement>,
    }

    impl SpriteSheet {
        pub fn load() -> Self {
            let mut images = HashMap::new();
            for key in SpriteKey::ALL {
                match HtmlImageElement::new() {
                    Ok(img) => {
                        watch(&img, key.path());
                        img.set_src(key.path());
                        images.insert(key, img);
                    }
                    Err(e) => log::warn!("Could not create image for {}: {:?}", key.path(), e),
                }
            }
            log::info!("Requested {} sprites", images.len());
            Self { images }
        }

        /// Loaded and decodable
        pub fn ready(&self, key: SpriteKey) -> Option<&HtmlImageElement> {
            self.images
                .get(&key)
                .filter(|img| img.complete() && img.natural_width() != 0)
        }

        pub fn is_ready(&self, key: SpriteKey) -> bool {
            self.ready(key).is_some()
        }
    }

    /// Log load outcome; the fallback keeps drawing until then
    fn watch(img: &HtmlImageElement, path: &'static str) {
        let onload = Closure::<dyn FnMut()>::new(move || {
            log::info!("Loaded sprite {}", path);
        });
        img.set_onload(Some(onload.as_ref().unchecked_ref()));
        onload.forget();

        let onerror = Closure::<dyn FnMut()>::new(move || {
            log::warn!("Failed to load sprite {}, using fallback", path);
        });
        img.set_onerror(Some(onerror.as_ref().unchecked_ref()));
        onerror.forget();
    }
}
