//! Render pass.
//!
//! Pets only describe what to draw; [`render_pass`] walks them in spawn order
//! and hands each description to a [`DrawSink`]. On the desktop host the sink
//! is a [`RaylibCanvas`].
use bevy_ecs::prelude::*;

use crate::components::pet::Pet;
use crate::resources::textures::DrawSink;

#[cfg(feature = "desktop")]
pub use canvas::RaylibCanvas;

pub fn render_pass(world: &mut World, sink: &mut dyn DrawSink) {
    let mut pets = world.query::<&Pet>();
    for pet in pets.iter(world) {
        pet.render(sink);
    }
}

#[cfg(feature = "desktop")]
mod canvas {
    use raylib::prelude::*;

    use crate::resources::frames::Rect;
    use crate::resources::texturestore::RaylibTextures;
    use crate::resources::textures::{DestRect, DrawSink, TextureHandle};

    /// [`DrawSink`] over a raylib draw handle.
    pub struct RaylibCanvas<'a, D: RaylibDraw> {
        d: &'a mut D,
        textures: &'a RaylibTextures,
    }

    impl<'a, D: RaylibDraw> RaylibCanvas<'a, D> {
        pub fn new(d: &'a mut D, textures: &'a RaylibTextures) -> Self {
            Self { d, textures }
        }
    }

    impl<D: RaylibDraw> DrawSink for RaylibCanvas<'_, D> {
        fn draw(&mut self, texture: &TextureHandle, source: Rect, dest: DestRect, flip_horizontal: bool) {
            let Some(tex) = self.textures.get(texture) else {
                return;
            };
            // raylib mirrors through a negative source width, not a negative dest
            let dest = dest.normalized();
            let src_width = if flip_horizontal {
                -(source.w as f32)
            } else {
                source.w as f32
            };
            let src = Rectangle {
                x: source.x as f32,
                y: source.y as f32,
                width: src_width,
                height: source.h as f32,
            };
            let dst = Rectangle {
                x: dest.x,
                y: dest.y,
                width: dest.w,
                height: dest.h,
            };
            self.d
                .draw_texture_pro(tex, src, dst, Vector2::zero(), 0.0, Color::WHITE);
        }
    }
}
