//! Mouse polling for the desktop host.
//!
//! Turns raylib's per-frame button edges into [`PetInput`] values.
use raylib::prelude::*;

use crate::events::input::{PetInput, PointerButton};

const BUTTONS: [(MouseButton, PointerButton); 3] = [
    (MouseButton::MOUSE_BUTTON_LEFT, PointerButton::Left),
    (MouseButton::MOUSE_BUTTON_RIGHT, PointerButton::Right),
    (MouseButton::MOUSE_BUTTON_MIDDLE, PointerButton::Middle),
];

/// Pointer presses and releases that happened this frame.
pub fn poll_pointer_input(rl: &RaylibHandle) -> Vec<PetInput> {
    let x = rl.get_mouse_x();
    let y = rl.get_mouse_y();
    let mut inputs = Vec::new();
    for (raw, button) in BUTTONS {
        if rl.is_mouse_button_pressed(raw) {
            inputs.push(PetInput::PointerDown { button, x, y });
        }
        if rl.is_mouse_button_released(raw) {
            inputs.push(PetInput::PointerUp { button, x, y });
        }
    }
    inputs
}
