//! Event types exchanged between the host and the pet systems.
//!
//! Submodules:
//! - [`input`] – pointer presses and releases aimed at pets
pub mod input;
