//! The templated house
//!
//! Layout is authored data in [`templates`]; [`StructureGenerator`] turns it
//! into doors, items, props and colliders inside a [`crate::world::World`].

pub mod generator;
pub mod templates;

pub use generator::{StructureGenerator, StructureStats};
pub use templates::{DoorAnchor, Floor, Room};
