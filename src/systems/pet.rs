//! Pet systems.
//!
//! - [`pet_update_system`] advances every pet by the frame delta.
//! - [`pet_input_observer`] forwards pointer input to the pets.
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::debug;

use crate::components::pet::Pet;
use crate::events::input::PetInputEvent;
use crate::resources::worldtime::WorldTime;

pub fn pet_update_system(time: Res<WorldTime>, mut pets: Query<&mut Pet>) {
    for mut pet in pets.iter_mut() {
        pet.update(time.delta);
    }
}

/// Hand the input to each pet until one reacts.
pub fn pet_input_observer(trigger: On<PetInputEvent>, mut pets: Query<(Entity, &mut Pet)>) {
    let input = trigger.event().input;
    for (entity, mut pet) in pets.iter_mut() {
        if pet.handle_input(&input) {
            debug!("{} {:?} reacted to {:?}", pet.species(), entity, input);
            break;
        }
    }
}
