//! Pet species.
//!
//! Every species implements [`DesktopPet`]. The host only talks to pets
//! through this trait, so adding a species means adding one implementation
//! and spawning it; the shared walking/clicking logic lives in
//! [`BehaviorStateMachine`](crate::components::behavior::BehaviorStateMachine).
//!
//! Submodules:
//! - [`catpet`] – the cat, driven by an idle/walk/click manifest
//! - [`loader`] – manifest to ready-to-play animations

pub mod catpet;
pub mod loader;

use crate::components::behavior::PetState;
use crate::events::input::PetInput;
use crate::resources::frames::Rect;
use crate::resources::textures::{DrawSink, TextureProvider};

/// Screen facts a pet needs when it is placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PetContext {
    pub screen_width: i32,
    pub screen_height: i32,
}

/// Capabilities of a pet species.
pub trait DesktopPet: Send + Sync {
    /// Short species tag, used in logs.
    fn species(&self) -> &'static str;

    /// Load animations and place the pet on screen. `false` when the pet has
    /// nothing to show.
    fn init(&mut self, ctx: &PetContext, textures: &mut dyn TextureProvider) -> bool;

    fn load_animations(&mut self, textures: &mut dyn TextureProvider) -> bool;

    fn update(&mut self, dt: f32);

    fn render(&self, sink: &mut dyn DrawSink);

    /// Returns `true` when the pet reacted to `input`.
    fn handle_input(&mut self, input: &PetInput) -> bool;

    /// Give every texture back to `textures`.
    fn clean(&mut self, textures: &mut dyn TextureProvider);

    /// Screen area covered by the pet.
    fn bounds(&self) -> Rect;

    fn state(&self) -> PetState;
}
