//! Pick-up items

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::core::types::Aabb;
use crate::interact::base::{Interact, InteractableBase, InteractableType, InteractionEvent};

pub const ITEM_INTERACT_DISTANCE: f32 = 2.0;

/// Half extent of an item's pick-up box
const ITEM_HALF_EXTENT: f32 = 0.15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    Key,
    Document,
    Battery,
    HealthPack,
    Weapon,
    Ammo,
    QuestItem,
    Misc,
}

/// An item lying in the world, bobbing until picked up
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    base: InteractableBase,
    kind: ItemKind,
    id: String,
    name: String,
    description: String,
    quantity: u32,
    pickupable: bool,
    collected: bool,
    floats: bool,
    float_phase: f32,
    float_speed: f32,
    float_amount: f32,
    base_y: f32,
}

impl Item {
    pub fn new(kind: ItemKind, name: impl Into<String>, id: impl Into<String>) -> Self {
        let mut item = Self {
            base: InteractableBase::new(Vec3::ZERO, ITEM_INTERACT_DISTANCE),
            kind,
            id: id.into(),
            name: name.into(),
            description: String::new(),
            quantity: 1,
            pickupable: true,
            collected: false,
            floats: true,
            float_phase: 0.0,
            float_speed: 2.0,
            float_amount: 0.1,
            base_y: 0.0,
        };
        item.set_position(Vec3::ZERO);
        item
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn with_interact_distance(mut self, distance: f32) -> Self {
        self.base.interact_distance = distance;
        self
    }

    pub fn at(mut self, position: Vec3) -> Self {
        self.set_position(position);
        self
    }

    /// Move the item and make `position.y` the new rest height
    pub fn set_position(&mut self, position: Vec3) {
        self.base_y = position.y;
        self.publish_position(position);
    }

    fn publish_position(&mut self, position: Vec3) {
        self.base.position = position;
        self.base.bounds =
            Aabb::from_center_half_extents(position, Vec3::splat(ITEM_HALF_EXTENT));
    }

    pub fn kind(&self) -> ItemKind {
        self.kind
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn is_collected(&self) -> bool {
        self.collected
    }

    pub fn is_pickupable(&self) -> bool {
        self.pickupable
    }

    pub fn set_pickupable(&mut self, pickupable: bool) {
        self.pickupable = pickupable;
    }

    pub fn set_floats(&mut self, floats: bool) {
        self.floats = floats;
    }

    pub fn rest_height(&self) -> f32 {
        self.base_y
    }
}

impl Interact for Item {
    fn base(&self) -> &InteractableBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut InteractableBase {
        &mut self.base
    }

    fn interactable_type(&self) -> InteractableType {
        InteractableType::Item
    }

    fn can_interact(&self) -> bool {
        self.base.active && !self.collected && self.pickupable
    }

    /// Marks the item collected. Putting it in an inventory is up to the caller.
    fn interact(&mut self) -> Option<InteractionEvent> {
        if !self.can_interact() {
            return None;
        }

        self.collected = true;
        self.base.active = false;

        Some(InteractionEvent::ItemCollected {
            item_id: self.id.clone(),
            name: self.name.clone(),
            kind: self.kind,
            quantity: self.quantity,
        })
    }

    fn interaction_text(&self) -> String {
        if self.collected {
            return String::new();
        }
        format!("Press [E] to pick up {}", self.name)
    }

    fn update(&mut self, dt: f32) {
        if !self.base.active || self.collected || !self.floats {
            return;
        }

        self.float_phase += dt * self.float_speed;
        let mut position = self.base.position;
        position.y = self.base_y + self.float_phase.sin() * self.float_amount;
        self.publish_position(position);
    }
}
