//! Frostwood - procedural snowbound forest and house exploration core
//!
//! Builds a templated house and a noise-driven forest into a [`world::World`],
//! then answers the per-frame queries a game loop needs: what the player is
//! looking at, what they bump into and what a ray hits.

pub mod core;
pub mod interact;
pub mod noise;
pub mod simulation;
pub mod spatial;
pub mod structure;
pub mod terrain;
pub mod world;

pub use crate::core::error::{FrostError, Result};
pub use crate::core::SessionConfig;
pub use crate::simulation::{FrameInput, Session};
pub use crate::world::World;
