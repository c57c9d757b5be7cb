//! Frame-based animation playback.
//!
//! An [`AnimationEngine`] owns one sprite-sheet texture and the frames cut
//! from it. [`advance`](AnimationEngine::advance) moves the frame cursor
//! against elapsed time; [`draw_intent`](AnimationEngine::draw_intent) says
//! what to paint for the current frame without painting it.
//!
//! The frame timer is reset to zero whenever the cursor moves, so leftover
//! time past a frame's duration is dropped rather than carried into the next
//! frame. At most one frame is advanced per call. Deltas are counted in
//! whole milliseconds, truncated each call.

use log::{error, warn};

use crate::resources::frames::{Frame, Rect};
use crate::resources::textures::{DestRect, TextureHandle, TextureProvider};

/// What to draw for the current frame.
#[derive(Debug, PartialEq)]
pub struct DrawIntent<'a> {
    pub texture: &'a TextureHandle,
    pub source: Rect,
    pub dest: DestRect,
    pub flip_horizontal: bool,
}

#[derive(Debug)]
pub struct AnimationEngine {
    texture: Option<TextureHandle>,
    frames: Vec<Frame>,
    current_frame: usize,
    frame_timer_ms: u32,
    looping: bool,
    finished: bool,
}

impl Default for AnimationEngine {
    fn default() -> Self {
        Self {
            texture: None,
            frames: Vec::new(),
            current_frame: 0,
            frame_timer_ms: 0,
            looping: true,
            finished: false,
        }
    }
}

impl AnimationEngine {
    /// Engine that owns `texture` and plays `frames`.
    pub fn new(texture: TextureHandle, frames: Vec<Frame>, looping: bool) -> Self {
        let mut engine = Self::default();
        engine.init(Some(texture), frames, looping);
        engine
    }

    /// Take ownership of `texture` and `frames` and rewind.
    ///
    /// Logs and does nothing when `texture` is `None`.
    pub fn init(&mut self, texture: Option<TextureHandle>, frames: Vec<Frame>, looping: bool) -> bool {
        let Some(texture) = texture else {
            error!("AnimationEngine::init called without a texture");
            return false;
        };
        if let Some(old) = self.texture.replace(texture) {
            warn!("AnimationEngine::init replaced texture #{} without releasing it", old.id());
        }
        self.frames = frames;
        self.looping = looping;
        self.reset();
        true
    }

    /// Move the cursor forward by `dt` seconds. Negative deltas count as 0.
    pub fn advance(&mut self, dt: f32) {
        if self.finished || self.frames.is_empty() {
            return;
        }
        let dt_ms = (dt.max(0.0) * 1000.0) as u32;
        self.frame_timer_ms = self.frame_timer_ms.saturating_add(dt_ms);
        if self.frame_timer_ms < self.frames[self.current_frame].duration_ms {
            return;
        }
        self.frame_timer_ms = 0;
        self.current_frame += 1;
        if self.current_frame >= self.frames.len() {
            if self.looping {
                self.current_frame = 0;
            } else {
                self.current_frame = self.frames.len() - 1;
                self.finished = true;
            }
        }
    }

    /// Rewind to the first frame. The looping flag is kept.
    pub fn reset(&mut self) {
        self.current_frame = 0;
        self.frame_timer_ms = 0;
        self.finished = false;
    }

    /// Draw request for the current frame at `(x, y)` with size `(w, h)`.
    ///
    /// A flipped request mirrors the destination in place: the rectangle is
    /// anchored at its right edge with a negative width, so it covers the same
    /// screen area as the unflipped one.
    pub fn draw_intent(&self, x: f32, y: f32, w: f32, h: f32, flip_horizontal: bool) -> Option<DrawIntent<'_>> {
        let Some(texture) = self.texture.as_ref() else {
            error!("AnimationEngine::draw_intent called without a texture");
            return None;
        };
        let Some(frame) = self.frames.get(self.current_frame) else {
            error!("AnimationEngine::draw_intent called without frames");
            return None;
        };
        let dest = if flip_horizontal {
            DestRect::new(x + w, y, -w, h)
        } else {
            DestRect::new(x, y, w, h)
        };
        Some(DrawIntent {
            texture,
            source: frame.source,
            dest,
            flip_horizontal,
        })
    }

    /// Give the texture back to `provider`. Later calls do nothing.
    pub fn release(&mut self, provider: &mut dyn TextureProvider) {
        if let Some(texture) = self.texture.take() {
            provider.unload_texture(texture);
        }
    }

    pub fn set_looping(&mut self, looping: bool) {
        self.looping = looping;
    }
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }
    pub fn is_finished(&self) -> bool {
        self.finished
    }
    pub fn is_looping(&self) -> bool {
        self.looping
    }
    pub fn current_frame(&self) -> usize {
        self.current_frame
    }
    pub fn frame_timer_ms(&self) -> u32 {
        self.frame_timer_ms
    }
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }
    /// Size of the first frame, if any.
    pub fn frame_size(&self) -> Option<(i32, i32)> {
        self.frames.first().map(|f| (f.source.w, f.source.h))
    }
    pub fn texture(&self) -> Option<&TextureHandle> {
        self.texture.as_ref()
    }
}

impl Drop for AnimationEngine {
    fn drop(&mut self) {
        if let Some(texture) = &self.texture {
            warn!("AnimationEngine dropped while still owning texture #{}", texture.id());
        }
    }
}
