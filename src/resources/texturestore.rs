//! raylib-backed texture storage for the desktop host.
//!
//! [`RaylibTextures`] keeps the GPU textures keyed by the id inside each
//! [`TextureHandle`]. Loading needs the raylib handle and thread, so it goes
//! through a short-lived [`RaylibTextureLoader`] that borrows both together
//! with the store.

use std::path::Path;

use log::debug;
use raylib::prelude::*;
use rustc_hash::FxHashMap;

use crate::resources::textures::{TextureError, TextureHandle, TextureProvider};

#[derive(Default)]
pub struct RaylibTextures {
    map: FxHashMap<u32, Texture2D>,
    next_id: u32,
}

impl RaylibTextures {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, handle: &TextureHandle) -> Option<&Texture2D> {
        self.map.get(&handle.id())
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// [`TextureProvider`] over a raylib window.
pub struct RaylibTextureLoader<'a> {
    rl: &'a mut RaylibHandle,
    thread: &'a RaylibThread,
    store: &'a mut RaylibTextures,
}

impl<'a> RaylibTextureLoader<'a> {
    pub fn new(rl: &'a mut RaylibHandle, thread: &'a RaylibThread, store: &'a mut RaylibTextures) -> Self {
        Self { rl, thread, store }
    }
}

impl TextureProvider for RaylibTextureLoader<'_> {
    fn load_texture(&mut self, path: &Path) -> Result<TextureHandle, TextureError> {
        let path_str = path.to_string_lossy();
        let texture = self
            .rl
            .load_texture(self.thread, &path_str)
            .map_err(|e| TextureError::Load {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        self.store.next_id += 1;
        let id = self.store.next_id;
        debug!("Loaded texture {} as #{} ({}x{})", path_str, id, texture.width, texture.height);
        self.store.map.insert(id, texture);
        Ok(TextureHandle::new(id))
    }

    fn texture_size(&self, texture: &TextureHandle) -> Option<(u32, u32)> {
        self.store
            .get(texture)
            .map(|t| (t.width.max(0) as u32, t.height.max(0) as u32))
    }

    fn unload_texture(&mut self, texture: TextureHandle) {
        // Texture2D unloads on drop
        if self.store.map.remove(&texture.id()).is_some() {
            debug!("Unloaded texture #{}", texture.id());
        }
    }
}
