//! Resources and the data the pets are built from.
//!
//! Overview
//! - `frames` – sprite-sheet slicing into timed frames
//! - `manifest` – JSON manifest model, loader and normalization
//! - `petconfig` – INI configuration for the window and pet behavior
//! - `textures` – texture provider and draw sink seams
//! - `texturestore` – raylib textures for the desktop host
//! - `worldtime` – simulation time and delta
pub mod frames;
pub mod manifest;
pub mod petconfig;
pub mod textures;
#[cfg(feature = "desktop")]
pub mod texturestore;
pub mod worldtime;
