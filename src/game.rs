//! World setup and the per-frame loop, independent of any window.
//!
//! The host builds a world and schedule once, spawns its pets, then calls
//! [`tick`] every frame and [`render_pass`](crate::systems::render::render_pass)
//! to draw. Tests drive the same functions with fake textures.

use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use log::{info, warn};

use crate::components::pet::Pet;
use crate::events::input::{PetInput, PetInputEvent};
use crate::pets::{DesktopPet, PetContext};
use crate::resources::petconfig::PetConfig;
use crate::resources::textures::TextureProvider;
use crate::resources::worldtime::WorldTime;
use crate::systems::pet::{pet_input_observer, pet_update_system};
use crate::systems::time::update_world_time;

/// Fresh world with the clock, the config and the input observer.
pub fn build_world(config: PetConfig) -> World {
    let mut world = World::new();
    world.insert_resource(WorldTime::default().with_time_scale(1.0));
    world.insert_resource(config);
    world.spawn(Observer::new(pet_input_observer));
    // Ensure the observer is registered before any input is triggered.
    world.flush();
    world
}

pub fn build_schedule() -> Schedule {
    let mut update = Schedule::default();
    update.add_systems(pet_update_system);
    update
}

/// Initialize `pet` and add it to the world. `None` when it has nothing to
/// show.
pub fn spawn_pet(
    world: &mut World,
    mut pet: impl DesktopPet + 'static,
    ctx: &PetContext,
    textures: &mut dyn TextureProvider,
) -> Option<Entity> {
    if !pet.init(ctx, textures) {
        warn!("Could not initialize {} pet", pet.species());
        return None;
    }
    let entity = world.spawn(Pet::new(pet)).id();
    info!("Spawned pet {:?}", entity);
    Some(entity)
}

/// Advance the clock by `dt` seconds and run the schedule once.
pub fn tick(world: &mut World, schedule: &mut Schedule, dt: f32) {
    update_world_time(world, dt);
    schedule.run(world);
    world.clear_trackers();
}

pub fn send_input(world: &mut World, input: PetInput) {
    world.trigger(PetInputEvent { input });
}

/// Release every pet's textures and despawn the pets.
pub fn shutdown(world: &mut World, textures: &mut dyn TextureProvider) {
    let mut query = world.query_filtered::<Entity, With<Pet>>();
    let entities: Vec<Entity> = query.iter(world).collect();
    for entity in entities {
        if let Some(mut pet) = world.get_mut::<Pet>(entity) {
            pet.clean(textures);
        }
        world.despawn(entity);
    }
    info!("Pets released");
}
