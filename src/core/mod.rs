//! Shared types, configuration and the crate-wide error type

pub mod config;
pub mod error;
pub mod types;

pub use config::SessionConfig;
pub use error::{FrostError, Result};
pub use types::{Aabb, Collider, Contact, InteractableId, RayHit, SurfaceTag};
