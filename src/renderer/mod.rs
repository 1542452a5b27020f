//! Canvas 2D rendering module
//!
//! Geometry and sprite choice are plain functions; only `canvas` talks to
//! the browser.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod shapes;
pub mod sprites;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
pub use sprites::{PlayerLook, SpriteKey};
