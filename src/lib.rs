//! patpat desktop pet library.
//!
//! This module exposes the pet runtime's JSON parser, manifest pipeline, ECS
//! components, resources, systems and events for use in integration tests
//! and by the desktop host.

pub mod components;
pub mod events;
pub mod game;
pub mod json;
pub mod pets;
pub mod resources;
pub mod systems;
