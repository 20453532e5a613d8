//! Rendering boundary
//!
//! The game never draws pixels itself. A host supplies a `Renderer` that can
//! blit an already-loaded sprite, a `ScoreSink` for the two score readouts,
//! and a `ResourceLoader` that reports when every sprite is cached.

pub mod scene;

pub use scene::{ROW_SPRITES, draw_background, draw_entities, render_frame};

use crate::sim::Sprite;

/// Draws cached sprite images by their top-left corner
pub trait Renderer {
    fn draw_sprite(&mut self, sprite: Sprite, x: f32, y: f32);
}

/// Receives score readouts whenever they change
pub trait ScoreSink {
    fn show_score(&mut self, score: u64);
    fn show_top_score(&mut self, top_score: u64);
}

/// Loads sprite images ahead of the first frame
pub trait ResourceLoader {
    /// Start loading every listed sprite
    fn load_all(&mut self, sprites: &[Sprite]);
    /// True once every requested sprite is cached
    fn is_ready(&self) -> bool;
}

/// Renderer that discards everything (headless runs)
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn draw_sprite(&mut self, _sprite: Sprite, _x: f32, _y: f32) {}
}

/// Loader for hosts that have nothing to fetch
#[derive(Debug, Clone, Default)]
pub struct Preloaded {
    requested: Vec<Sprite>,
}

impl Preloaded {
    pub fn requested(&self) -> &[Sprite] {
        &self.requested
    }
}

impl ResourceLoader for Preloaded {
    fn load_all(&mut self, sprites: &[Sprite]) {
        for sprite in sprites {
            log::debug!("Sprite ready: {}", sprite.path());
        }
        self.requested.extend_from_slice(sprites);
    }

    fn is_ready(&self) -> bool {
        !self.requested.is_empty()
    }
}
