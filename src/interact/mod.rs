//! Interactable entities and the player's inventory
//!
//! Doors, items and props share the [`Interact`] capability set. The world
//! stores them as one tagged [`Interactable`] so every kind goes through the
//! same dispatch path.

pub mod base;
pub mod door;
pub mod inventory;
pub mod item;
pub mod prop;

pub use base::{
    in_view_cone, Interact, InteractableBase, InteractableType, InteractionEvent, VIEW_CONE_DOT,
};
pub use door::{Door, DoorState};
pub use inventory::{Inventory, InventorySlot};
pub use item::{Item, ItemKind};
pub use prop::{Prop, PropKind};

/// Any entity the player can use
#[derive(Debug, Clone, PartialEq)]
pub enum Interactable {
    Door(Door),
    Item(Item),
    Prop(Prop),
}

macro_rules! dispatch {
    ($self:expr, $inner:ident => $body:expr) => {
        match $self {
            Interactable::Door($inner) => $body,
            Interactable::Item($inner) => $body,
            Interactable::Prop($inner) => $body,
        }
    };
}

impl Interactable {
    pub fn as_door(&self) -> Option<&Door> {
        match self {
            Interactable::Door(door) => Some(door),
            _ => None,
        }
    }

    pub fn as_door_mut(&mut self) -> Option<&mut Door> {
        match self {
            Interactable::Door(door) => Some(door),
            _ => None,
        }
    }

    pub fn as_item(&self) -> Option<&Item> {
        match self {
            Interactable::Item(item) => Some(item),
            _ => None,
        }
    }

    pub fn as_item_mut(&mut self) -> Option<&mut Item> {
        match self {
            Interactable::Item(item) => Some(item),
            _ => None,
        }
    }

    pub fn as_prop(&self) -> Option<&Prop> {
        match self {
            Interactable::Prop(prop) => Some(prop),
            _ => None,
        }
    }

    /// Human-readable name for logs
    pub fn label(&self) -> &str {
        match self {
            Interactable::Door(door) => door.name(),
            Interactable::Item(item) => item.name(),
            Interactable::Prop(prop) => prop.label(),
        }
    }
}

impl Interact for Interactable {
    fn base(&self) -> &InteractableBase {
        dispatch!(self, inner => inner.base())
    }

    fn base_mut(&mut self) -> &mut InteractableBase {
        dispatch!(self, inner => inner.base_mut())
    }

    fn interactable_type(&self) -> InteractableType {
        dispatch!(self, inner => inner.interactable_type())
    }

    fn can_interact(&self) -> bool {
        dispatch!(self, inner => inner.can_interact())
    }

    fn interact(&mut self) -> Option<InteractionEvent> {
        dispatch!(self, inner => inner.interact())
    }

    fn interaction_text(&self) -> String {
        dispatch!(self, inner => inner.interaction_text())
    }

    fn update(&mut self, dt: f32) {
        dispatch!(self, inner => inner.update(dt))
    }
}

impl From<Door> for Interactable {
    fn from(door: Door) -> Self {
        Interactable::Door(door)
    }
}

impl From<Item> for Interactable {
    fn from(item: Item) -> Self {
        Interactable::Item(item)
    }
}

impl From<Prop> for Interactable {
    fn from(prop: Prop) -> Self {
        Interactable::Prop(prop)
    }
}
