//! patpat main entry point.
//!
//! An animated cat that lives on the desktop, written in Rust using:
//! - **raylib** for the window, textures and drawing (`desktop` feature)
//! - **bevy_ecs** for the per-frame world
//!
//! # Main Loop
//!
//! 1. Load `config.ini` (defaults when missing) and apply CLI overrides
//! 2. Open the window and load the cat's manifest and sprite sheets
//! 3. Every frame: poll the mouse, tick the world, draw the pets
//! 4. Release textures on exit
//!
//! # Running
//!
//! ```sh
//! cargo run --release --features desktop
//! cargo run -- --check-manifest assets/pets/cat/manifest.json
//! ```

// Do not create console on Windows
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

use clap::Parser;
use patpat::resources::manifest::load_manifest;
use patpat::resources::petconfig::PetConfig;
use std::path::{Path, PathBuf};

/// patpat desktop pet
#[derive(Parser)]
#[command(version, about = "An animated pet that lives on your desktop.")]
struct Cli {
    /// Configuration file to read.
    #[arg(long, value_name = "PATH", default_value = "config.ini")]
    config: PathBuf,

    /// Manifest to load instead of the configured one.
    #[arg(long, value_name = "PATH")]
    manifest: Option<PathBuf>,

    /// Fixed seed for walk timing and targets.
    #[arg(long)]
    seed: Option<u64>,

    /// Load a manifest, print it normalized as JSON and exit.
    #[arg(long, value_name = "PATH")]
    check_manifest: Option<PathBuf>,

    /// Write a configuration file with default values and exit.
    #[arg(long, value_name = "PATH")]
    write_config: Option<PathBuf>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    // Early-exit: validate a manifest (no window needed)
    if let Some(path) = cli.check_manifest {
        std::process::exit(check_manifest(&path));
    }

    // Early-exit: write default config (no window needed)
    if let Some(path) = cli.write_config {
        if let Err(e) = PetConfig::with_path(&path).save_to_file() {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
        println!("Config written to {}", path.display());
        return;
    }

    let mut config = PetConfig::with_path(&cli.config);
    if let Err(e) = config.load_from_file() {
        log::warn!("{}, using defaults", e);
    }
    if let Some(manifest) = cli.manifest {
        config.manifest_path = manifest;
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }

    run(config);
}

fn check_manifest(path: &Path) -> i32 {
    let manifest = match load_manifest(path) {
        Ok(manifest) => manifest,
        Err(e) => {
            eprintln!("Error: {e}");
            return 1;
        }
    };
    match serde_json::to_string_pretty(&manifest.normalized()) {
        Ok(text) => {
            println!("{text}");
            0
        }
        Err(e) => {
            eprintln!("Error: {e}");
            1
        }
    }
}

#[cfg(feature = "desktop")]
fn run(config: PetConfig) {
    use patpat::game::{build_schedule, build_world, send_input, shutdown, spawn_pet, tick};
    use patpat::pets::PetContext;
    use patpat::pets::catpet::CatPet;
    use patpat::resources::texturestore::{RaylibTextureLoader, RaylibTextures};
    use patpat::systems::input::poll_pointer_input;
    use patpat::systems::render::{RaylibCanvas, render_pass};
    use raylib::prelude::*;

    log::info!("Hello! patpat is waking up the cat");

    let (width, height) = config.window_size();
    let (mut rl, thread) = raylib::init()
        .size(width as i32, height as i32)
        .title("patpat")
        .transparent()
        .undecorated()
        .build();
    rl.set_target_fps(config.target_fps);
    // Disable ESC to exit
    rl.set_exit_key(None);

    let ctx = PetContext {
        screen_width: rl.get_screen_width(),
        screen_height: rl.get_screen_height(),
    };
    let mut textures = RaylibTextures::new();
    let cat = CatPet::from_config(&config);
    let mut world = build_world(config);

    let spawned = {
        let mut loader = RaylibTextureLoader::new(&mut rl, &thread, &mut textures);
        spawn_pet(&mut world, cat, &ctx, &mut loader)
    };
    if spawned.is_none() {
        log::error!("No animations could be loaded, nothing to show");
        std::process::exit(1);
    }

    let mut update = build_schedule();

    // --------------- Main loop ---------------
    while !rl.window_should_close() {
        let dt = rl.get_frame_time();
        for input in poll_pointer_input(&rl) {
            send_input(&mut world, input);
        }
        tick(&mut world, &mut update, dt);

        let mut d = rl.begin_drawing(&thread);
        d.clear_background(Color::BLANK);
        let mut canvas = RaylibCanvas::new(&mut d, &textures);
        render_pass(&mut world, &mut canvas);
    }

    let mut loader = RaylibTextureLoader::new(&mut rl, &thread, &mut textures);
    shutdown(&mut world, &mut loader);
}

#[cfg(not(feature = "desktop"))]
fn run(_config: PetConfig) {
    eprintln!("This build has no window support; rebuild with `--features desktop`.");
    std::process::exit(1);
}
