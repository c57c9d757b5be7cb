//! ECS systems and per-frame passes.
//!
//! - [`time`] – advances the shared world clock
//! - [`pet`] – pet update system and input observer
//! - [`render`] – hands pet draw requests to a draw sink
//! - `input` – raylib mouse polling (desktop host only)
#[cfg(feature = "desktop")]
pub mod input;
pub mod pet;
pub mod render;
pub mod time;
