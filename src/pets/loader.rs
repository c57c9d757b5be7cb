//! Load-time pipeline: manifest, normalization, textures, frames, engines.
//!
//! Entries that cannot be turned into a playable animation (empty path,
//! texture that fails to load, sheet too small for a single frame) are logged
//! and skipped. The load only fails when no entry survives.

use std::path::Path;

use log::{info, warn};

use crate::components::animation::AnimationEngine;
use crate::resources::frames::build_frames;
use crate::resources::manifest::{Manifest, ManifestError, load_manifest, normalize};
use crate::resources::textures::TextureProvider;

/// One ready-to-play animation from a manifest.
#[derive(Debug)]
pub struct LoadedAnimation {
    pub name: String,
    pub engine: AnimationEngine,
    pub is_movement: bool,
}

/// Load the manifest at `path` and build every usable animation in it.
pub fn load_animation_set(
    path: impl AsRef<Path>,
    textures: &mut dyn TextureProvider,
) -> Result<Vec<LoadedAnimation>, ManifestError> {
    let path = path.as_ref();
    let manifest = load_manifest(path)?;
    build_animation_set(&manifest, path, textures)
}

/// Build the animations of an already loaded manifest. `source` only names
/// the manifest in errors.
pub fn build_animation_set(
    manifest: &Manifest,
    source: &Path,
    textures: &mut dyn TextureProvider,
) -> Result<Vec<LoadedAnimation>, ManifestError> {
    let mut loaded = Vec::with_capacity(manifest.animations.len());

    for raw in &manifest.animations {
        let desc = normalize(raw, &manifest.defaults);
        if desc.path.is_empty() {
            warn!("Skipping animation '{}': no path", desc.name);
            continue;
        }

        let full_path = manifest.resolve_path(&desc);
        let texture = match textures.load_texture(&full_path) {
            Ok(texture) => texture,
            Err(e) => {
                warn!("Skipping animation '{}': {}", desc.name, e);
                continue;
            }
        };

        let Some((tex_w, tex_h)) = textures.texture_size(&texture) else {
            warn!("Skipping animation '{}': texture size unknown", desc.name);
            textures.unload_texture(texture);
            continue;
        };

        let frames = build_frames(&desc, tex_w as i32, tex_h as i32);
        if frames.is_empty() {
            warn!(
                "Skipping animation '{}': no frames fit in {}x{} sheet {}",
                desc.name,
                tex_w,
                tex_h,
                full_path.display()
            );
            textures.unload_texture(texture);
            continue;
        }

        info!(
            "Loaded animation '{}' ({} frames, loop={}, movement={})",
            desc.name,
            frames.len(),
            desc.looping,
            desc.is_movement
        );
        loaded.push(LoadedAnimation {
            name: desc.name.clone(),
            engine: AnimationEngine::new(texture, frames, desc.looping),
            is_movement: desc.is_movement,
        });
    }

    if loaded.is_empty() {
        return Err(ManifestError::NoUsableAnimations {
            path: source.to_path_buf(),
        });
    }
    Ok(loaded)
}
