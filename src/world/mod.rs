//! The world: interactables, static colliders and the spatial queries over them
//!
//! Doors and items live once in the [`InteractableArena`]; the typed lists
//! only hold handles into it, so a door mutated through the generic view is
//! the same door seen through [`World::door`].

pub mod objects;
pub mod queries;

pub use objects::{InteractCallback, InteractableArena};

use tracing::debug;

use crate::core::error::{FrostError, Result};
use crate::core::types::{Collider, InteractableId};
use crate::interact::{Door, Interact, Interactable, InteractionEvent, Inventory, Item, Prop};

#[derive(Debug, Default)]
pub struct World {
    arena: InteractableArena,
    doors: Vec<InteractableId>,
    items: Vec<InteractableId>,
    colliders: Vec<Collider>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register any interactable. Doors and items are also indexed by kind.
    pub fn add_interactable(&mut self, entity: Interactable) -> InteractableId {
        let is_door = matches!(entity, Interactable::Door(_));
        let is_item = matches!(entity, Interactable::Item(_));
        let id = self.arena.insert(entity);
        if is_door {
            self.doors.push(id);
        } else if is_item {
            self.items.push(id);
        }
        id
    }

    pub fn add_door(&mut self, door: Door) -> InteractableId {
        self.add_interactable(door.into())
    }

    pub fn add_item(&mut self, item: Item) -> InteractableId {
        self.add_interactable(item.into())
    }

    pub fn add_prop(&mut self, prop: Prop) -> InteractableId {
        self.add_interactable(prop.into())
    }

    pub fn add_collider(&mut self, collider: Collider) {
        self.colliders.push(collider);
    }

    pub fn get(&self, id: InteractableId) -> Option<&Interactable> {
        self.arena.get(id)
    }

    pub fn get_mut(&mut self, id: InteractableId) -> Option<&mut Interactable> {
        self.arena.get_mut(id)
    }

    pub fn door(&self, id: InteractableId) -> Option<&Door> {
        self.arena.get(id).and_then(Interactable::as_door)
    }

    pub fn door_mut(&mut self, id: InteractableId) -> Option<&mut Door> {
        self.arena.get_mut(id).and_then(Interactable::as_door_mut)
    }

    pub fn item(&self, id: InteractableId) -> Option<&Item> {
        self.arena.get(id).and_then(Interactable::as_item)
    }

    pub fn item_mut(&mut self, id: InteractableId) -> Option<&mut Item> {
        self.arena.get_mut(id).and_then(Interactable::as_item_mut)
    }

    /// Handle of the item with the given stable id
    pub fn find_item(&self, item_id: &str) -> Option<InteractableId> {
        self.items
            .iter()
            .copied()
            .find(|&id| self.item(id).is_some_and(|item| item.id() == item_id))
    }

    /// Handle of the door with the given name
    pub fn find_door(&self, name: &str) -> Option<InteractableId> {
        self.doors
            .iter()
            .copied()
            .find(|&id| self.door(id).is_some_and(|door| door.name() == name))
    }

    /// Drop an interactable for the rest of the session
    pub fn remove(&mut self, id: InteractableId) -> Option<Interactable> {
        let entity = self.arena.remove(id)?;
        self.doors.retain(|&door| door != id);
        self.items.retain(|&item| item != id);
        Some(entity)
    }

    pub fn remove_item(&mut self, item_id: &str) -> Option<Item> {
        let id = self.find_item(item_id)?;
        match self.remove(id)? {
            Interactable::Item(item) => Some(item),
            _ => None,
        }
    }

    /// Live interactables in insertion order
    pub fn interactables(&self) -> impl Iterator<Item = (InteractableId, &Interactable)> {
        self.arena.iter()
    }

    pub fn interactable_count(&self) -> usize {
        self.arena.len()
    }

    pub fn doors(&self) -> impl Iterator<Item = (InteractableId, &Door)> {
        self.doors
            .iter()
            .filter_map(|&id| self.door(id).map(|door| (id, door)))
    }

    pub fn items(&self) -> impl Iterator<Item = (InteractableId, &Item)> {
        self.items
            .iter()
            .filter_map(|&id| self.item(id).map(|item| (id, item)))
    }

    pub fn door_ids(&self) -> &[InteractableId] {
        &self.doors
    }

    pub fn item_ids(&self) -> &[InteractableId] {
        &self.items
    }

    /// Static colliders in insertion order
    pub fn colliders(&self) -> &[Collider] {
        &self.colliders
    }

    /// Current collision boxes of every door leaf
    pub fn door_colliders(&self) -> Vec<Collider> {
        self.doors().map(|(_, door)| door.collider()).collect()
    }

    pub fn set_on_interact(&mut self, id: InteractableId, callback: InteractCallback) -> Result<()> {
        if self.arena.set_callback(id, callback) {
            Ok(())
        } else {
            Err(FrostError::UnknownInteractable(id))
        }
    }

    /// Use an interactable. `None` when the handle is dead or nothing happened.
    pub fn interact(&mut self, id: InteractableId) -> Option<InteractionEvent> {
        let event = self.arena.interact(id)?;
        debug!(?id, ?event, "Interaction");
        Some(event)
    }

    /// Unlock a locked door if `inventory` holds its key
    pub fn unlock_door_with(&mut self, id: InteractableId, inventory: &Inventory) -> bool {
        let unlocked = self
            .door_mut(id)
            .is_some_and(|door| door.unlock_with(inventory));
        if unlocked {
            debug!(?id, "Door unlocked");
        }
        unlocked
    }

    /// Advance door swings and item bobbing
    pub fn update(&mut self, dt: f32) {
        for (_, entity) in self.arena.iter_mut() {
            entity.update(dt);
        }
    }

    /// Highlight `focus` and clear every other highlight
    pub fn set_focus(&mut self, focus: Option<InteractableId>) {
        for (id, entity) in self.arena.iter_mut() {
            entity.set_highlighted(Some(id) == focus);
        }
    }

    /// Drop every entity and collider
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
