//! Pet tick integration tests: spawning, walking, clicking, drawing and
//! teardown driven through a bevy_ecs World.

use std::path::{Path, PathBuf};

use bevy_ecs::prelude::*;
use rustc_hash::FxHashMap;

use patpat::components::behavior::PetState;
use patpat::components::pet::Pet;
use patpat::events::input::{PetInput, PointerButton};
use patpat::game::{build_schedule, build_world, send_input, shutdown, spawn_pet, tick};
use patpat::pets::PetContext;
use patpat::pets::catpet::CatPet;
use patpat::resources::frames::Rect;
use patpat::resources::petconfig::PetConfig;
use patpat::resources::textures::{DestRect, DrawSink, TextureError, TextureHandle, TextureProvider};
use patpat::resources::worldtime::WorldTime;
use patpat::systems::render::render_pass;

const CTX: PetContext = PetContext {
    screen_width: 800,
    screen_height: 600,
};

const MANIFEST: &str = r#"{
    "basePath": "cat/",
    "defaults": {"frameWidth": 32, "frameHeight": 32, "fps": 4},
    "animations": {
        "idle":  {"path": "idle.png"},
        "walk":  {"path": "walk.png", "isMovement": true},
        "click": {"path": "click.png", "loop": false}
    }
}"#;

/// Every path loads as a 128x32 sheet (4 frames of 32x32).
#[derive(Default)]
struct FakeTextures {
    next: u32,
    live: FxHashMap<u32, PathBuf>,
}

impl TextureProvider for FakeTextures {
    fn load_texture(&mut self, path: &Path) -> Result<TextureHandle, TextureError> {
        self.next += 1;
        self.live.insert(self.next, path.to_path_buf());
        Ok(TextureHandle::new(self.next))
    }
    fn texture_size(&self, texture: &TextureHandle) -> Option<(u32, u32)> {
        self.live.get(&texture.id()).map(|_| (128, 32))
    }
    fn unload_texture(&mut self, texture: TextureHandle) {
        self.live.remove(&texture.id());
    }
}

#[derive(Default)]
struct RecordingSink {
    calls: Vec<(u32, Rect, DestRect, bool)>,
}

impl DrawSink for RecordingSink {
    fn draw(&mut self, texture: &TextureHandle, source: Rect, dest: DestRect, flip_horizontal: bool) {
        self.calls.push((texture.id(), source, dest, flip_horizontal));
    }
}

fn write_manifest(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("patpat_tick_{}_{}", name, std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("manifest.json");
    std::fs::write(&path, MANIFEST).unwrap();
    path
}

/// Config with a 1s walk interval and a fixed walk target.
fn make_config(name: &str, target_x: i32) -> PetConfig {
    let mut config = PetConfig::new();
    config.manifest_path = write_manifest(name);
    config.view_scale = 1.0;
    config.seed = Some(42);
    config.behavior.move_speed_x = 60.0;
    config.behavior.walk_interval_min = 1.0;
    config.behavior.walk_interval_max = 1.0;
    config.behavior.walk_target_min = target_x;
    config.behavior.walk_target_max = target_x;
    config
}

fn make_world(config: PetConfig, textures: &mut FakeTextures) -> World {
    let cat = CatPet::from_config(&config);
    let mut world = build_world(config);
    assert!(spawn_pet(&mut world, cat, &CTX, textures).is_some());
    world
}

fn pet_state(world: &mut World) -> (PetState, Rect) {
    let mut q = world.query::<&Pet>();
    let pet = q.single(world).unwrap();
    (pet.state(), pet.bounds())
}

#[test]
fn spawned_cat_starts_idle_at_home() {
    let mut textures = FakeTextures::default();
    let mut world = make_world(make_config("home", 100), &mut textures);
    let (state, bounds) = pet_state(&mut world);
    assert_eq!(state, PetState::Idle);
    assert_eq!(bounds, Rect::new(400, 480, 32, 32));
    assert_eq!(textures.live.len(), 3);
    shutdown(&mut world, &mut textures);
}

#[test]
fn cat_walks_to_target_and_idles() {
    let mut textures = FakeTextures::default();
    let mut world = make_world(make_config("walk", 100), &mut textures);
    let mut schedule = build_schedule();

    tick(&mut world, &mut schedule, 0.5);
    assert_eq!(pet_state(&mut world).0, PetState::Idle);

    tick(&mut world, &mut schedule, 0.5);
    let (state, bounds) = pet_state(&mut world);
    assert_eq!(state, PetState::Walk);
    assert_eq!(bounds.x, 370);

    let mut xs = Vec::new();
    for _ in 0..5 {
        tick(&mut world, &mut schedule, 1.0);
        xs.push(pet_state(&mut world).1.x);
    }
    assert_eq!(xs, vec![310, 250, 190, 130, 100]);
    assert_eq!(pet_state(&mut world).0, PetState::Idle);
    assert_eq!(world.resource::<WorldTime>().frame_count, 7);
    shutdown(&mut world, &mut textures);
}

#[test]
fn walking_left_draws_mirrored_in_place() {
    let mut textures = FakeTextures::default();
    let mut world = make_world(make_config("mirror", 100), &mut textures);
    let mut schedule = build_schedule();

    let mut sink = RecordingSink::default();
    render_pass(&mut world, &mut sink);
    assert_eq!(sink.calls.len(), 1);
    assert!(!sink.calls[0].3);

    tick(&mut world, &mut schedule, 1.0);
    let mut sink = RecordingSink::default();
    render_pass(&mut world, &mut sink);
    let (id, _source, dest, flip) = sink.calls[0];
    assert!(flip);
    assert!(textures.live[&id].ends_with("walk.png"));
    assert_eq!(dest, DestRect::new(372.0, 480.0, -32.0, 32.0));
    assert_eq!(dest.normalized(), DestRect::new(340.0, 480.0, 32.0, 32.0));
    shutdown(&mut world, &mut textures);
}

#[test]
fn click_through_observer_plays_once() {
    let mut textures = FakeTextures::default();
    let mut config = make_config("click", 100);
    config.behavior.walk_interval_min = 30.0;
    config.behavior.walk_interval_max = 30.0;
    let mut world = make_world(config, &mut textures);
    let mut schedule = build_schedule();

    send_input(
        &mut world,
        PetInput::PointerDown {
            button: PointerButton::Left,
            x: 5,
            y: 5,
        },
    );
    assert_eq!(pet_state(&mut world).0, PetState::Idle);

    send_input(
        &mut world,
        PetInput::PointerDown {
            button: PointerButton::Left,
            x: 416,
            y: 496,
        },
    );
    assert_eq!(pet_state(&mut world).0, PetState::Click);

    // 4 frames of 250ms
    for _ in 0..3 {
        tick(&mut world, &mut schedule, 0.25);
        assert_eq!(pet_state(&mut world).0, PetState::Click);
    }
    tick(&mut world, &mut schedule, 0.25);
    assert_eq!(pet_state(&mut world).0, PetState::Idle);
    shutdown(&mut world, &mut textures);
}

#[test]
fn paused_clock_freezes_the_cat() {
    let mut textures = FakeTextures::default();
    let mut world = make_world(make_config("paused", 100), &mut textures);
    world.resource_mut::<WorldTime>().time_scale = 0.0;
    let mut schedule = build_schedule();
    for _ in 0..10 {
        tick(&mut world, &mut schedule, 1.0);
    }
    let (state, bounds) = pet_state(&mut world);
    assert_eq!(state, PetState::Idle);
    assert_eq!(bounds.x, 400);
    shutdown(&mut world, &mut textures);
}

#[test]
fn shutdown_releases_every_texture() {
    let mut textures = FakeTextures::default();
    let mut world = make_world(make_config("shutdown", 100), &mut textures);
    shutdown(&mut world, &mut textures);
    assert!(textures.live.is_empty());
    let mut q = world.query::<&Pet>();
    assert_eq!(q.iter(&world).count(), 0);
}

#[test]
fn broken_manifest_spawns_nothing() {
    let mut textures = FakeTextures::default();
    let mut config = PetConfig::new();
    config.manifest_path = PathBuf::from("/missing/manifest.json");
    let cat = CatPet::from_config(&config);
    let mut world = build_world(config);
    assert!(spawn_pet(&mut world, cat, &CTX, &mut textures).is_none());
    let mut q = world.query::<&Pet>();
    assert_eq!(q.iter(&world).count(), 0);
}
