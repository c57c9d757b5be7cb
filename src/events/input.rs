//! Pointer input events.
//!
//! The host translates raw mouse state into [`PetInput`] values and triggers a
//! [`PetInputEvent`] for each one. The
//! [`pet_input_observer`](crate::systems::pet::pet_input_observer) forwards
//! them to every pet.

use bevy_ecs::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    Left,
    Right,
    Middle,
}

/// A pointer action in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PetInput {
    PointerDown { button: PointerButton, x: i32, y: i32 },
    PointerUp { button: PointerButton, x: i32, y: i32 },
}

/// Event carrying one [`PetInput`].
#[derive(Event, Debug, Clone, Copy)]
pub struct PetInputEvent {
    pub input: PetInput,
}
