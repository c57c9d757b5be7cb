//! Texture and drawing seams.
//!
//! The pet runtime never touches pixels. It loads sprite sheets through a
//! [`TextureProvider`] and describes what to paint to a [`DrawSink`]. The
//! desktop host implements both over raylib (see
//! [`texturestore`](crate::resources::texturestore) and
//! [`render`](crate::systems::render)); tests implement them with plain
//! structs.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::resources::frames::Rect;

/// Opaque handle to a texture owned by a [`TextureProvider`].
///
/// Not `Clone`: whoever holds the handle owns the texture and is expected to
/// give it back through [`TextureProvider::unload_texture`] exactly once.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct TextureHandle(u32);

impl TextureHandle {
    pub fn new(id: u32) -> Self {
        TextureHandle(id)
    }
    pub fn id(&self) -> u32 {
        self.0
    }
}

#[derive(Debug, Error)]
pub enum TextureError {
    #[error("failed to load texture {}: {reason}", path.display())]
    Load { path: PathBuf, reason: String },
}

/// Source of textures for animations.
pub trait TextureProvider {
    /// Load the image at `path`. Fails if the file is unreadable or not a
    /// decodable image.
    fn load_texture(&mut self, path: &Path) -> Result<TextureHandle, TextureError>;

    /// Pixel size of a loaded texture, `None` for unknown handles.
    fn texture_size(&self, texture: &TextureHandle) -> Option<(u32, u32)>;

    /// Give a texture back. Consumes the handle.
    fn unload_texture(&mut self, texture: TextureHandle);
}

/// Destination rectangle in screen space.
///
/// `w` is negative for horizontally mirrored draws; see
/// [`AnimationEngine::draw_intent`](crate::components::animation::AnimationEngine::draw_intent).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DestRect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl DestRect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        DestRect { x, y, w, h }
    }

    /// Same rectangle with a non-negative width.
    pub fn normalized(&self) -> DestRect {
        if self.w < 0.0 {
            DestRect::new(self.x + self.w, self.y, -self.w, self.h)
        } else {
            *self
        }
    }
}

/// Receiver of draw calls.
pub trait DrawSink {
    fn draw(&mut self, texture: &TextureHandle, source: Rect, dest: DestRect, flip_horizontal: bool);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalized_dest_keeps_footprint() {
        let flipped = DestRect::new(150.0, 20.0, -50.0, 40.0);
        assert_eq!(flipped.normalized(), DestRect::new(100.0, 20.0, 50.0, 40.0));
        let plain = DestRect::new(100.0, 20.0, 50.0, 40.0);
        assert_eq!(plain.normalized(), plain);
    }

    #[test]
    fn load_error_names_the_path() {
        let err = TextureError::Load {
            path: PathBuf::from("cat/idle.png"),
            reason: "not an image".into(),
        };
        assert_eq!(
            err.to_string(),
            "failed to load texture cat/idle.png: not an image"
        );
    }
}
