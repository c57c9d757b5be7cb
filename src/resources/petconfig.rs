//! Pet configuration resource.
//!
//! Window and behavior settings loaded from an INI file. Every field has a
//! safe default so the host can start without a config file at all.
//!
//! # Configuration File Format
//!
//! ```ini
//! [window]
//! width = 800
//! height = 600
//! target_fps = 60
//!
//! [pet]
//! manifest = assets/pets/cat/manifest.json
//! scale = 2.0
//! move_speed = 60.0
//! walk_interval_min = 3.0
//! walk_interval_max = 8.0
//! walk_target_min = 300
//! walk_target_max = 800
//! seed = 42
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

use crate::components::behavior::BehaviorConfig;

const DEFAULT_WINDOW_WIDTH: u32 = 800;
const DEFAULT_WINDOW_HEIGHT: u32 = 600;
const DEFAULT_TARGET_FPS: u32 = 60;
const DEFAULT_MANIFEST_PATH: &str = "assets/pets/cat/manifest.json";
const DEFAULT_VIEW_SCALE: f32 = 2.0;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

/// Pet configuration resource.
#[derive(Resource, Debug, Clone)]
pub struct PetConfig {
    pub window_width: u32,
    pub window_height: u32,
    pub target_fps: u32,
    /// Manifest of the pet to spawn.
    pub manifest_path: PathBuf,
    /// Multiplier applied to frame size when drawing.
    pub view_scale: f32,
    pub behavior: BehaviorConfig,
    /// Fixed RNG seed; random when unset.
    pub seed: Option<u64>,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for PetConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl PetConfig {
    /// Create a configuration with safe default values.
    pub fn new() -> Self {
        Self {
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
            target_fps: DEFAULT_TARGET_FPS,
            manifest_path: PathBuf::from(DEFAULT_MANIFEST_PATH),
            view_scale: DEFAULT_VIEW_SCALE,
            behavior: BehaviorConfig::default(),
            seed: None,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a configuration bound to a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;

        // [window] section
        if let Some(width) = config.getuint("window", "width").ok().flatten() {
            self.window_width = width as u32;
        }
        if let Some(height) = config.getuint("window", "height").ok().flatten() {
            self.window_height = height as u32;
        }
        if let Some(fps) = config.getuint("window", "target_fps").ok().flatten() {
            self.target_fps = fps as u32;
        }

        // [pet] section
        if let Some(manifest) = config.get("pet", "manifest") {
            self.manifest_path = PathBuf::from(manifest);
        }
        if let Some(scale) = config.getfloat("pet", "scale").ok().flatten() {
            self.view_scale = scale as f32;
        }
        if let Some(speed) = config.getfloat("pet", "move_speed").ok().flatten() {
            self.behavior.move_speed_x = speed as f32;
        }
        if let Some(min) = config.getfloat("pet", "walk_interval_min").ok().flatten() {
            self.behavior.walk_interval_min = min as f32;
        }
        if let Some(max) = config.getfloat("pet", "walk_interval_max").ok().flatten() {
            self.behavior.walk_interval_max = max as f32;
        }
        if let Some(min) = config.getint("pet", "walk_target_min").ok().flatten() {
            self.behavior.walk_target_min = min as i32;
        }
        if let Some(max) = config.getint("pet", "walk_target_max").ok().flatten() {
            self.behavior.walk_target_max = max as i32;
        }
        if let Some(seed) = config.getuint("pet", "seed").ok().flatten() {
            self.seed = Some(seed);
        }

        info!(
            "Loaded config: {}x{} window, fps={}, manifest={:?}, scale={}, speed={}",
            self.window_width,
            self.window_height,
            self.target_fps,
            self.manifest_path,
            self.view_scale,
            self.behavior.move_speed_x
        );

        Ok(())
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();

        // [window] section
        config.set("window", "width", Some(self.window_width.to_string()));
        config.set("window", "height", Some(self.window_height.to_string()));
        config.set("window", "target_fps", Some(self.target_fps.to_string()));

        // [pet] section
        config.set(
            "pet",
            "manifest",
            Some(self.manifest_path.to_string_lossy().into_owned()),
        );
        config.set("pet", "scale", Some(self.view_scale.to_string()));
        config.set("pet", "move_speed", Some(self.behavior.move_speed_x.to_string()));
        config.set(
            "pet",
            "walk_interval_min",
            Some(self.behavior.walk_interval_min.to_string()),
        );
        config.set(
            "pet",
            "walk_interval_max",
            Some(self.behavior.walk_interval_max.to_string()),
        );
        config.set(
            "pet",
            "walk_target_min",
            Some(self.behavior.walk_target_min.to_string()),
        );
        config.set(
            "pet",
            "walk_target_max",
            Some(self.behavior.walk_target_max.to_string()),
        );
        if let Some(seed) = self.seed {
            config.set("pet", "seed", Some(seed.to_string()));
        }

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }

    /// Get the window size.
    pub fn window_size(&self) -> (u32, u32) {
        (self.window_width, self.window_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("patpat_{}_{}.ini", name, std::process::id()))
    }

    #[test]
    fn missing_file_is_an_error_and_keeps_defaults() {
        let mut cfg = PetConfig::with_path(temp_path("does_not_exist"));
        assert!(cfg.load_from_file().is_err());
        assert_eq!(cfg.window_size(), (DEFAULT_WINDOW_WIDTH, DEFAULT_WINDOW_HEIGHT));
        assert_eq!(cfg.seed, None);
    }

    #[test]
    fn partial_file_overrides_only_present_keys() {
        let path = temp_path("partial");
        std::fs::write(&path, "[window]\nwidth = 1024\n\n[pet]\nmove_speed = 90.5\nseed = 7\n").unwrap();
        let mut cfg = PetConfig::with_path(&path);
        cfg.load_from_file().unwrap();
        assert_eq!(cfg.window_width, 1024);
        assert_eq!(cfg.window_height, DEFAULT_WINDOW_HEIGHT);
        assert_eq!(cfg.behavior.move_speed_x, 90.5);
        assert_eq!(cfg.behavior.walk_target_max, BehaviorConfig::default().walk_target_max);
        assert_eq!(cfg.seed, Some(7));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn save_then_load_restores_values() {
        let path = temp_path("roundtrip");
        let mut cfg = PetConfig::with_path(&path);
        cfg.window_width = 1280;
        cfg.target_fps = 30;
        cfg.manifest_path = PathBuf::from("pets/dog/manifest.json");
        cfg.view_scale = 3.0;
        cfg.behavior.walk_interval_min = 1.5;
        cfg.behavior.walk_target_min = 10;
        cfg.seed = Some(99);
        cfg.save_to_file().unwrap();

        let mut loaded = PetConfig::with_path(&path);
        loaded.load_from_file().unwrap();
        assert_eq!(loaded.window_width, 1280);
        assert_eq!(loaded.target_fps, 30);
        assert_eq!(loaded.manifest_path, PathBuf::from("pets/dog/manifest.json"));
        assert_eq!(loaded.view_scale, 3.0);
        assert_eq!(loaded.behavior.walk_interval_min, 1.5);
        assert_eq!(loaded.behavior.walk_target_min, 10);
        assert_eq!(loaded.seed, Some(99));
        let _ = std::fs::remove_file(&path);
    }
}
