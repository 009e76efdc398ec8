//! Shared interactable state and the capability trait

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::core::types::Aabb;
use crate::interact::item::ItemKind;

/// Minimum `dot(forward, to_target)` for a target to be "looked at"
///
/// Roughly a 45 degree half-angle cone.
pub const VIEW_CONE_DOT: f32 = 0.7;

/// Default reach when a kind does not set its own
pub const DEFAULT_INTERACT_DISTANCE: f32 = 2.5;

/// Kind of interactable, used for prompts and filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InteractableType {
    Door,
    Item,
    Switch,
    Container,
    Readable,
    Generic,
}

/// Fields every interactable carries
#[derive(Debug, Clone, PartialEq)]
pub struct InteractableBase {
    pub position: Vec3,
    pub bounds: Aabb,
    pub interact_distance: f32,
    pub active: bool,
    pub highlighted: bool,
}

impl InteractableBase {
    pub fn new(position: Vec3, interact_distance: f32) -> Self {
        Self {
            position,
            bounds: Aabb::from_center_half_extents(position, Vec3::splat(0.5)),
            interact_distance,
            active: true,
            highlighted: false,
        }
    }

    /// Within `interact_distance` of `pos` (inclusive)
    pub fn check_in_range(&self, pos: Vec3) -> bool {
        self.position.distance(pos) <= self.interact_distance
    }

    /// In range and inside the view cone of `dir`
    pub fn check_line_of_sight(&self, pos: Vec3, dir: Vec3) -> bool {
        if !self.check_in_range(pos) {
            return false;
        }
        in_view_cone(pos, dir, self.position, VIEW_CONE_DOT)
    }
}

/// Cone test shared by line-of-sight checks and the world's focus query
///
/// A zero `dir` disables the test. A target exactly at `pos` is always
/// inside the cone.
pub fn in_view_cone(pos: Vec3, dir: Vec3, target: Vec3, min_dot: f32) -> bool {
    if dir == Vec3::ZERO {
        return true;
    }
    let to_target = target - pos;
    if to_target.length_squared() <= f32::EPSILON {
        return true;
    }
    dir.dot(to_target.normalize()) >= min_dot
}

/// What happened when an interactable was used
#[derive(Debug, Clone, PartialEq)]
pub enum InteractionEvent {
    DoorOpening { door: String },
    DoorClosing { door: String },
    ItemCollected {
        item_id: String,
        name: String,
        kind: ItemKind,
        quantity: u32,
    },
    SwitchToggled { label: String, on: bool },
    ContainerOpened { label: String, contents: Vec<String> },
    ContainerClosed { label: String },
    Read { title: String, text: String },
    Used { label: String },
}

/// Capability set shared by doors, items and props
///
/// Implementors only supply the kind-specific parts; reach, cone and flag
/// handling come from [`InteractableBase`].
pub trait Interact {
    fn base(&self) -> &InteractableBase;
    fn base_mut(&mut self) -> &mut InteractableBase;

    fn interactable_type(&self) -> InteractableType;

    /// Whether `interact` would currently do anything
    fn can_interact(&self) -> bool;

    /// Use the entity. Returns `None` (and changes nothing) when
    /// `can_interact` is false.
    fn interact(&mut self) -> Option<InteractionEvent>;

    /// Prompt shown while focused. Empty when there is nothing to say.
    fn interaction_text(&self) -> String;

    /// Per-frame animation
    fn update(&mut self, _dt: f32) {}

    fn position(&self) -> Vec3 {
        self.base().position
    }

    fn bounds(&self) -> Aabb {
        self.base().bounds
    }

    fn interact_distance(&self) -> f32 {
        self.base().interact_distance
    }

    fn is_active(&self) -> bool {
        self.base().active
    }

    fn set_active(&mut self, active: bool) {
        self.base_mut().active = active;
    }

    fn is_highlighted(&self) -> bool {
        self.base().highlighted
    }

    fn set_highlighted(&mut self, highlighted: bool) {
        self.base_mut().highlighted = highlighted;
    }

    fn check_in_range(&self, pos: Vec3) -> bool {
        self.base().check_in_range(pos)
    }

    fn check_line_of_sight(&self, pos: Vec3, dir: Vec3) -> bool {
        self.base().check_line_of_sight(pos, dir)
    }
}
