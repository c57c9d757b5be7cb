//! Sprite manifest model and loader.
//!
//! A manifest is a JSON document describing the animations of one pet. Each
//! entry points at a sprite sheet and says how to slice it into frames, either
//! as a single row, a `rows x cols` grid, or a list of explicit rectangles.
//! Entries may leave most fields unset; [`normalize`] fills them from the
//! manifest-wide [`Defaults`].
//!
//! # File Format
//!
//! ```json
//! {
//!   "version": 1,
//!   "basePath": "assets/pets/cat",
//!   "defaults": { "frameWidth": 48, "frameHeight": 48, "fps": 8, "loop": true, "layout": "row" },
//!   "animations": {
//!     "idle":  { "path": "idle.png" },
//!     "walk":  { "path": "walk.png", "fps": 12, "isMovement": true },
//!     "click": { "path": "click.png", "loop": false, "layout": "grid", "rows": 2, "cols": 3 }
//!   }
//! }
//! ```
//!
//! Loading is permissive: wrong-typed or missing fields fall back to their
//! defaults and non-object entries are skipped. The only hard failures are an
//! unreadable file, malformed JSON, a non-object root, and a manifest that ends
//! up with no animations at all.
//!
//! # Related
//!
//! - [`crate::json`] – the document tree the loader reads from
//! - [`crate::resources::frames`] – turns a normalized entry into frames

use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde::Serialize;
use thiserror::Error;

use crate::json::{self, JsonError, Value};

pub const DEFAULT_FRAME_WIDTH: i32 = 48;
pub const DEFAULT_FRAME_HEIGHT: i32 = 48;
pub const DEFAULT_FPS: i32 = 8;
pub const DEFAULT_RECT_DURATION_MS: i32 = 100;
pub const DEFAULT_VERSION: i32 = 1;

/// Errors raised while loading a manifest or the animations it names.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to read manifest file: {}", path.display())]
    Read { path: PathBuf },

    #[error("failed to parse manifest JSON: {0}")]
    Parse(#[from] JsonError),

    #[error("manifest root is not a JSON object")]
    RootNotObject,

    #[error("manifest declares no usable animation entries")]
    NoAnimations,

    #[error("no animation from {} could be built", path.display())]
    NoUsableAnimations { path: PathBuf },
}

/// How frames are laid out on a sprite sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// Frames side by side in a single row.
    #[default]
    Row,
    /// Frames in a regular `rows x cols` tiling, read row-major.
    Grid,
}

impl Layout {
    /// Parse a layout tag. Only `"row"` and `"grid"` are valid.
    pub fn from_tag(tag: &str) -> Option<Layout> {
        match tag {
            "row" => Some(Layout::Row),
            "grid" => Some(Layout::Grid),
            _ => None,
        }
    }
}

/// Explicit source rectangle for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FrameRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
    /// Frame duration in milliseconds; `<= 0` means "derive from fps".
    #[serde(rename = "durationMS")]
    pub duration_ms: i32,
}

/// Manifest-wide values used to backfill unset entry fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Defaults {
    pub frame_width: i32,
    pub frame_height: i32,
    pub fps: i32,
    #[serde(rename = "loop")]
    pub looping: bool,
    pub layout: Layout,
    pub is_movement: bool,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            frame_width: DEFAULT_FRAME_WIDTH,
            frame_height: DEFAULT_FRAME_HEIGHT,
            fps: DEFAULT_FPS,
            looping: true,
            layout: Layout::Row,
            is_movement: false,
        }
    }
}

/// One named animation as written in the manifest.
///
/// Numeric fields `<= 0` are unset. `layout` is `None` when the manifest left
/// it empty or wrote something other than `"row"`/`"grid"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimationDescription {
    pub name: String,
    pub path: String,
    pub frames: i32,
    pub frame_width: i32,
    pub frame_height: i32,
    pub rows: i32,
    pub cols: i32,
    pub fps: i32,
    #[serde(rename = "loop")]
    pub looping: bool,
    pub layout: Option<Layout>,
    pub rects: Vec<FrameRect>,
    pub is_movement: bool,
}

impl AnimationDescription {
    /// An entry with every numeric field unset.
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            frames: -1,
            frame_width: -1,
            frame_height: -1,
            rows: -1,
            cols: -1,
            fps: -1,
            looping: true,
            layout: None,
            rects: Vec::new(),
            is_movement: false,
        }
    }

    /// Layout after normalization; `Row` if still unset.
    pub fn layout_or_row(&self) -> Layout {
        self.layout.unwrap_or_default()
    }
}

/// A loaded manifest. Animations keep the order they had in the file.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    pub version: i32,
    /// Empty, or ending in exactly one path separator.
    pub base_path: String,
    pub defaults: Defaults,
    pub animations: Vec<AnimationDescription>,
}

impl Manifest {
    pub fn get(&self, name: &str) -> Option<&AnimationDescription> {
        self.animations.iter().find(|a| a.name == name)
    }

    /// Full path of an entry's sprite sheet.
    pub fn resolve_path(&self, desc: &AnimationDescription) -> PathBuf {
        PathBuf::from(format!("{}{}", self.base_path, desc.path))
    }

    /// Every entry passed through [`normalize`].
    pub fn normalized(&self) -> Manifest {
        Manifest {
            animations: self
                .animations
                .iter()
                .map(|a| normalize(a, &self.defaults))
                .collect(),
            ..self.clone()
        }
    }
}

/// Backfill unset fields of `desc` from `defaults`.
///
/// Pure and idempotent: fields that are already set are never overwritten.
/// Afterwards `fps`, `frame_width` and `frame_height` are positive and
/// `layout` is set, even when `defaults` itself holds unusable values.
pub fn normalize(desc: &AnimationDescription, defaults: &Defaults) -> AnimationDescription {
    let pick = |value: i32, fallback: i32, builtin: i32| {
        if value > 0 {
            value
        } else if fallback > 0 {
            fallback
        } else {
            builtin
        }
    };
    let mut out = desc.clone();
    out.fps = pick(desc.fps, defaults.fps, DEFAULT_FPS);
    out.frame_width = pick(desc.frame_width, defaults.frame_width, DEFAULT_FRAME_WIDTH);
    out.frame_height = pick(desc.frame_height, defaults.frame_height, DEFAULT_FRAME_HEIGHT);
    out.layout = Some(desc.layout.unwrap_or(defaults.layout));
    out
}

/// Read and parse the manifest at `path`.
pub fn load_manifest(path: impl AsRef<Path>) -> Result<Manifest, ManifestError> {
    let path = path.as_ref();
    let text = read_file_text(path);
    if text.is_empty() {
        return Err(ManifestError::Read {
            path: path.to_path_buf(),
        });
    }
    let manifest = parse_manifest(&text)?;
    debug!(
        "Loaded manifest {} (version {}, {} animations)",
        path.display(),
        manifest.version,
        manifest.animations.len()
    );
    Ok(manifest)
}

/// Whole file as text; empty on any I/O failure.
fn read_file_text(path: &Path) -> String {
    std::fs::read_to_string(path).unwrap_or_else(|e| {
        warn!("Could not read {}: {}", path.display(), e);
        String::new()
    })
}

/// Build a [`Manifest`] from JSON text.
pub fn parse_manifest(text: &str) -> Result<Manifest, ManifestError> {
    let root = json::parse(text)?;
    if !root.is_object() {
        return Err(ManifestError::RootNotObject);
    }

    let version = root.get_int("version", DEFAULT_VERSION);
    let base_path = normalize_base_path(root.get_str("basePath", ""));
    let defaults = root
        .get("defaults")
        .filter(|d| d.is_object())
        .map(read_defaults)
        .unwrap_or_default();

    let mut animations = Vec::new();
    if let Some(entries) = root.get_object("animations") {
        for (name, entry) in entries {
            if !entry.is_object() {
                debug!("Skipping animation '{}': entry is not an object", name);
                continue;
            }
            animations.push(read_description(name, entry, &defaults));
        }
    }

    if animations.is_empty() {
        return Err(ManifestError::NoAnimations);
    }

    Ok(Manifest {
        version,
        base_path,
        defaults,
        animations,
    })
}

/// Collapse trailing separators to one; append `/` when there is none.
fn normalize_base_path(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }
    let is_sep = |c: char| c == '/' || c == '\\';
    let trimmed = raw.trim_end_matches(is_sep);
    let sep = raw[trimmed.len()..].chars().next().unwrap_or('/');
    let mut out = trimmed.to_string();
    out.push(sep);
    out
}

fn read_defaults(value: &Value) -> Defaults {
    let builtin = Defaults::default();
    let positive = |key: &str, fallback: i32| {
        let v = value.get_int(key, fallback);
        if v > 0 {
            v
        } else {
            warn!("Manifest default '{}' = {} is not positive, using {}", key, v, fallback);
            fallback
        }
    };
    let layout = match value.get("layout").and_then(Value::as_str) {
        None => builtin.layout,
        Some(tag) => Layout::from_tag(tag).unwrap_or_else(|| {
            warn!("Manifest default layout '{}' is invalid, using row", tag);
            Layout::Row
        }),
    };
    Defaults {
        frame_width: positive("frameWidth", builtin.frame_width),
        frame_height: positive("frameHeight", builtin.frame_height),
        fps: positive("fps", builtin.fps),
        looping: value.get_bool("loop", builtin.looping),
        layout,
        is_movement: value.get_bool("isMovement", builtin.is_movement),
    }
}

fn read_description(name: &str, entry: &Value, defaults: &Defaults) -> AnimationDescription {
    let layout_tag = entry.get_str("layout", "");
    let layout = Layout::from_tag(layout_tag);
    if layout.is_none() && !layout_tag.is_empty() {
        warn!(
            "Animation '{}' has invalid layout '{}', the default applies",
            name, layout_tag
        );
    }

    let rects: Vec<FrameRect> = entry
        .get_array("rects")
        .map(|items| {
            items
                .iter()
                .filter(|item| item.is_object())
                .map(|item| FrameRect {
                    x: item.get_int("x", 0),
                    y: item.get_int("y", 0),
                    w: item.get_int("w", 0),
                    h: item.get_int("h", 0),
                    duration_ms: item.get_int("durationMS", DEFAULT_RECT_DURATION_MS),
                })
                .collect()
        })
        .unwrap_or_default();

    AnimationDescription {
        name: name.to_string(),
        path: entry.get_str("path", "").to_string(),
        frames: entry.get_int("frames", -1),
        frame_width: entry.get_int("frameWidth", -1),
        frame_height: entry.get_int("frameHeight", -1),
        rows: entry.get_int("rows", -1),
        cols: entry.get_int("cols", -1),
        fps: entry.get_int("fps", -1),
        looping: entry.get_bool("loop", defaults.looping),
        layout,
        rects,
        is_movement: entry.get_bool("isMovement", defaults.is_movement),
    }
}
