//! Pet components and the building blocks they are made of.
//!
//! Submodules overview:
//! - [`animation`] – frame playback over one sprite-sheet texture
//! - [`behavior`] – idle/walk/click state machine shared by all species
//! - [`pet`] – ECS component holding one pet of any species
//! - [`timer`] – stopwatch and interval timer used to schedule walks

pub mod animation;
pub mod behavior;
pub mod pet;
pub mod timer;
