//! The cat.
//!
//! Animation names in the manifest map onto [`PetState`]s case-insensitively.
//! A name that matches no state is played as idle, unless the manifest also
//! has a real `idle` entry, which always wins. A cat without any idle
//! animation still loads; it shows nothing until another state plays.

use std::path::PathBuf;

use log::{error, info, warn};

use crate::components::behavior::{BehaviorConfig, BehaviorStateMachine, PetState};
use crate::events::input::{PetInput, PointerButton};
use crate::pets::loader::load_animation_set;
use crate::pets::{DesktopPet, PetContext};
use crate::resources::frames::Rect;
use crate::resources::petconfig::PetConfig;
use crate::resources::textures::{DrawSink, TextureProvider};

pub const DEFAULT_VIEW_SCALE: f32 = 2.0;

pub struct CatPet {
    manifest_path: PathBuf,
    behavior: BehaviorStateMachine,
    view_scale: f32,
    width: i32,
    height: i32,
}

impl CatPet {
    pub fn new(manifest_path: impl Into<PathBuf>, config: BehaviorConfig) -> Self {
        Self::with_behavior(manifest_path.into(), BehaviorStateMachine::new(config))
    }

    pub fn with_seed(manifest_path: impl Into<PathBuf>, config: BehaviorConfig, seed: u64) -> Self {
        Self::with_behavior(manifest_path.into(), BehaviorStateMachine::with_seed(config, seed))
    }

    pub fn from_config(config: &PetConfig) -> Self {
        let pet = match config.seed {
            Some(seed) => Self::with_seed(&config.manifest_path, config.behavior, seed),
            None => Self::new(&config.manifest_path, config.behavior),
        };
        pet.with_view_scale(config.view_scale)
    }

    fn with_behavior(manifest_path: PathBuf, behavior: BehaviorStateMachine) -> Self {
        Self {
            manifest_path,
            behavior,
            view_scale: DEFAULT_VIEW_SCALE,
            width: 0,
            height: 0,
        }
    }

    /// Multiplier applied to the frame size on screen.
    pub fn with_view_scale(mut self, scale: f32) -> Self {
        self.view_scale = if scale > 0.0 { scale } else { DEFAULT_VIEW_SCALE };
        self
    }

    pub fn behavior(&self) -> &BehaviorStateMachine {
        &self.behavior
    }

    pub fn behavior_mut(&mut self) -> &mut BehaviorStateMachine {
        &mut self.behavior
    }

    /// On-screen size in pixels.
    pub fn size(&self) -> (i32, i32) {
        (self.width, self.height)
    }
}

impl DesktopPet for CatPet {
    fn species(&self) -> &'static str {
        "cat"
    }

    fn init(&mut self, ctx: &PetContext, textures: &mut dyn TextureProvider) -> bool {
        if !self.load_animations(textures) {
            error!("Cat has no usable animations in {}", self.manifest_path.display());
            return false;
        }
        let x = ctx.screen_width / 2;
        let y = (ctx.screen_height as f32 * 0.8) as i32;
        self.behavior.set_position(x, y);
        self.behavior.set_state(PetState::Idle);
        self.behavior.start();
        info!("Cat ready at ({}, {}), {}x{}", x, y, self.width, self.height);
        true
    }

    fn load_animations(&mut self, textures: &mut dyn TextureProvider) -> bool {
        let set = match load_animation_set(&self.manifest_path, textures) {
            Ok(set) => set,
            Err(e) => {
                error!("Failed to load cat animations: {}", e);
                return false;
            }
        };

        let mut explicit_idle = false;
        let mut first_size = None;
        for loaded in set {
            let mut engine = loaded.engine;
            let state = match PetState::from_name(&loaded.name) {
                Some(state) => {
                    explicit_idle |= state == PetState::Idle;
                    state
                }
                None if explicit_idle || self.behavior.has_animation(PetState::Idle) => {
                    warn!("Unknown animation '{}' ignored, idle already set", loaded.name);
                    engine.release(textures);
                    continue;
                }
                None => {
                    warn!("Unknown animation '{}' used as idle", loaded.name);
                    PetState::Idle
                }
            };
            // the first animation kept sizes the cat
            if first_size.is_none() {
                first_size = engine.frame_size();
            }
            if let Some(mut old) = self.behavior.insert_animation(state, engine, loaded.is_movement) {
                old.release(textures);
            }
        }

        if !self.behavior.has_animation(PetState::Idle) {
            warn!("Cat manifest {} has no idle animation", self.manifest_path.display());
        }
        let Some((w, h)) = first_size else {
            error!("Cat manifest {} has no frames to size from", self.manifest_path.display());
            self.behavior.release_animations(textures);
            return false;
        };
        self.width = (w as f32 * self.view_scale) as i32;
        self.height = (h as f32 * self.view_scale) as i32;
        true
    }

    fn update(&mut self, dt: f32) {
        self.behavior.update(dt);
    }

    fn render(&self, sink: &mut dyn DrawSink) {
        if let Some(intent) = self.behavior.draw_intent(self.width as f32, self.height as f32) {
            sink.draw(intent.texture, intent.source, intent.dest, intent.flip_horizontal);
        }
    }

    fn handle_input(&mut self, input: &PetInput) -> bool {
        match *input {
            PetInput::PointerDown {
                button: PointerButton::Left,
                x,
                y,
            } if self.bounds().contains(x, y) => self.behavior.click(),
            _ => false,
        }
    }

    fn clean(&mut self, textures: &mut dyn TextureProvider) {
        self.behavior.release_animations(textures);
    }

    fn bounds(&self) -> Rect {
        let pose = self.behavior.pose();
        Rect::new(pose.x, pose.y, self.width, self.height)
    }

    fn state(&self) -> PetState {
        self.behavior.state()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    use rustc_hash::FxHashMap;

    use crate::resources::frames::Rect as SourceRect;
    use crate::resources::textures::{DestRect, TextureError, TextureHandle};

    /// Every texture is `w x h`; `unloaded` records releases.
    struct SheetTextures {
        w: u32,
        h: u32,
        next: u32,
        paths: FxHashMap<u32, PathBuf>,
        unloaded: Vec<u32>,
    }

    impl SheetTextures {
        fn new(w: u32, h: u32) -> Self {
            Self {
                w,
                h,
                next: 0,
                paths: FxHashMap::default(),
                unloaded: Vec::new(),
            }
        }
        fn path_of(&self, id: u32) -> Option<&Path> {
            self.paths.get(&id).map(PathBuf::as_path)
        }
    }

    impl TextureProvider for SheetTextures {
        fn load_texture(&mut self, path: &Path) -> Result<TextureHandle, TextureError> {
            self.next += 1;
            self.paths.insert(self.next, path.to_path_buf());
            Ok(TextureHandle::new(self.next))
        }
        fn texture_size(&self, _texture: &TextureHandle) -> Option<(u32, u32)> {
            Some((self.w, self.h))
        }
        fn unload_texture(&mut self, texture: TextureHandle) {
            self.unloaded.push(texture.id());
        }
    }

    #[derive(Default)]
    struct Recorder {
        calls: Vec<(u32, SourceRect, DestRect, bool)>,
    }

    impl DrawSink for Recorder {
        fn draw(&mut self, texture: &TextureHandle, source: SourceRect, dest: DestRect, flip: bool) {
            self.calls.push((texture.id(), source, dest, flip));
        }
    }

    fn write_manifest(name: &str, body: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("patpat_cat_{}_{}", name, std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("manifest.json");
        std::fs::write(&path, body).unwrap();
        path
    }

    const CTX: PetContext = PetContext {
        screen_width: 800,
        screen_height: 600,
    };

    const FULL: &str = r#"{
        "defaults": {"frameWidth": 24, "frameHeight": 20},
        "animations": {
            "Idle":  {"path": "idle.png"},
            "WALK":  {"path": "walk.png"},
            "click": {"path": "click.png", "loop": false}
        }
    }"#;

    #[test]
    fn init_places_and_sizes_the_cat() {
        let path = write_manifest("init", FULL);
        let mut textures = SheetTextures::new(96, 20);
        let mut cat = CatPet::with_seed(&path, BehaviorConfig::default(), 3);
        assert!(cat.init(&CTX, &mut textures));
        assert_eq!(cat.species(), "cat");
        assert_eq!(cat.state(), PetState::Idle);
        assert_eq!(cat.size(), (48, 40));
        assert_eq!(cat.bounds(), Rect::new(400, 480, 48, 40));
        assert!(cat.behavior().has_animation(PetState::Walk));
        assert!(cat.behavior().walk_timer().is_armed());
        cat.clean(&mut textures);
    }

    #[test]
    fn render_draws_current_frame_at_pose() {
        let path = write_manifest("render", FULL);
        let mut textures = SheetTextures::new(96, 20);
        let mut cat = CatPet::with_seed(&path, BehaviorConfig::default(), 3).with_view_scale(1.0);
        assert!(cat.init(&CTX, &mut textures));
        let mut sink = Recorder::default();
        cat.render(&mut sink);
        assert_eq!(sink.calls.len(), 1);
        let (id, source, dest, flip) = sink.calls[0];
        assert!(textures.path_of(id).unwrap().ends_with("idle.png"));
        assert_eq!(source, SourceRect::new(0, 0, 24, 20));
        assert_eq!(dest, DestRect::new(400.0, 480.0, 24.0, 20.0));
        assert!(!flip);
        cat.clean(&mut textures);
    }

    #[test]
    fn left_click_inside_bounds_plays_click() {
        let path = write_manifest("click", FULL);
        let mut textures = SheetTextures::new(96, 20);
        let mut cat = CatPet::with_seed(&path, BehaviorConfig::default(), 3);
        assert!(cat.init(&CTX, &mut textures));

        let outside = PetInput::PointerDown { button: PointerButton::Left, x: 10, y: 10 };
        assert!(!cat.handle_input(&outside));
        let right = PetInput::PointerDown { button: PointerButton::Right, x: 400, y: 480 };
        assert!(!cat.handle_input(&right));
        let release = PetInput::PointerUp { button: PointerButton::Left, x: 400, y: 480 };
        assert!(!cat.handle_input(&release));
        assert_eq!(cat.state(), PetState::Idle);

        // bottom-right corner is inside
        let edge = PetInput::PointerDown { button: PointerButton::Left, x: 448, y: 520 };
        assert!(cat.handle_input(&edge));
        assert_eq!(cat.state(), PetState::Click);

        // 4 frames of 125ms, non-looping
        for _ in 0..4 {
            cat.update(0.125);
        }
        assert_eq!(cat.state(), PetState::Idle);
        cat.clean(&mut textures);
    }

    #[test]
    fn unknown_names_alias_to_idle() {
        let path = write_manifest(
            "alias",
            r#"{"animations": {"sit": {"path": "sit.png"}, "walk": {"path": "walk.png"}}}"#,
        );
        let mut textures = SheetTextures::new(96, 48);
        let mut cat = CatPet::with_seed(&path, BehaviorConfig::default(), 3);
        assert!(cat.init(&CTX, &mut textures));
        let idle_id = cat.behavior().animation(PetState::Idle).and_then(|a| a.texture()).map(|t| t.id());
        assert!(textures.path_of(idle_id.unwrap()).unwrap().ends_with("sit.png"));
        cat.clean(&mut textures);
    }

    #[test]
    fn explicit_idle_beats_alias_in_any_order() {
        let path = write_manifest(
            "alias_order",
            r#"{"animations": {
                "sit":  {"path": "sit.png"},
                "idle": {"path": "idle.png"},
                "nap":  {"path": "nap.png"}
            }}"#,
        );
        let mut textures = SheetTextures::new(96, 48);
        let mut cat = CatPet::with_seed(&path, BehaviorConfig::default(), 3);
        assert!(cat.init(&CTX, &mut textures));
        let idle_id = cat
            .behavior()
            .animation(PetState::Idle)
            .and_then(|a| a.texture())
            .map(|t| t.id())
            .unwrap();
        assert!(textures.path_of(idle_id).unwrap().ends_with("idle.png"));
        // sit replaced by idle, nap dropped
        let mut unloaded = textures.unloaded.clone();
        unloaded.sort();
        assert_eq!(unloaded, vec![1, 3]);
        cat.clean(&mut textures);
    }

    #[test]
    fn walk_only_manifest_loads_and_walks() {
        let path = write_manifest("no_idle", r#"{"animations": {"walk": {"path": "walk.png"}}}"#);
        let mut textures = SheetTextures::new(96, 48);
        let config = BehaviorConfig {
            move_speed_x: 60.0,
            walk_interval_min: 1.0,
            walk_interval_max: 1.0,
            walk_target_min: 100,
            walk_target_max: 100,
        };
        let mut cat = CatPet::with_seed(&path, config, 3).with_view_scale(1.0);
        assert!(cat.init(&CTX, &mut textures));
        assert!(textures.unloaded.is_empty());
        assert_eq!(cat.size(), (48, 48));
        assert_eq!(cat.state(), PetState::Idle);

        // nothing to show while idle
        let mut sink = Recorder::default();
        cat.render(&mut sink);
        assert!(sink.calls.is_empty());

        cat.update(1.0);
        assert_eq!(cat.state(), PetState::Walk);
        assert_eq!(cat.bounds().x, 340);
        let mut sink = Recorder::default();
        cat.render(&mut sink);
        assert_eq!(sink.calls.len(), 1);
        let (id, _, _, flip) = sink.calls[0];
        assert!(textures.path_of(id).unwrap().ends_with("walk.png"));
        assert!(flip);
        cat.clean(&mut textures);
    }

    #[test]
    fn size_comes_from_the_first_animation() {
        let path = write_manifest(
            "first_size",
            r#"{"animations": {
                "walk": {"path": "walk.png", "frameWidth": 32, "frameHeight": 16},
                "idle": {"path": "idle.png", "frameWidth": 24, "frameHeight": 24}
            }}"#,
        );
        let mut textures = SheetTextures::new(96, 48);
        let mut cat = CatPet::with_seed(&path, BehaviorConfig::default(), 3).with_view_scale(1.0);
        assert!(cat.init(&CTX, &mut textures));
        assert_eq!(cat.size(), (32, 16));
        cat.clean(&mut textures);
    }

    #[test]
    fn missing_manifest_fails_init() {
        let mut textures = SheetTextures::new(96, 48);
        let mut cat = CatPet::new("/no/such/manifest.json", BehaviorConfig::default());
        assert!(!cat.init(&CTX, &mut textures));
        assert_eq!(textures.next, 0);
    }

    #[test]
    fn from_config_applies_scale_and_seed() {
        let path = write_manifest("from_config", FULL);
        let mut config = PetConfig::new();
        config.manifest_path = path;
        config.view_scale = 3.0;
        config.seed = Some(11);
        let mut textures = SheetTextures::new(96, 20);
        let mut cat = CatPet::from_config(&config);
        assert!(cat.init(&CTX, &mut textures));
        assert_eq!(cat.size(), (72, 60));
        cat.clean(&mut textures);
    }
}
