//! Interactable arena storage

use crate::core::types::InteractableId;
use crate::interact::{Interact, Interactable, InteractionEvent};

/// Called after an interactable was successfully used
pub type InteractCallback = Box<dyn FnMut(InteractableId, &InteractionEvent)>;

struct Slot {
    entity: Interactable,
    on_interact: Option<InteractCallback>,
}

/// Arena of interactables addressed by stable handles
///
/// Slots are append-only; removal leaves a tombstone so outstanding handles
/// never alias a different entity. Iteration follows insertion order.
#[derive(Default)]
pub struct InteractableArena {
    slots: Vec<Option<Slot>>,
    live: usize,
}

impl InteractableArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an interactable, returning its handle
    pub fn insert(&mut self, entity: Interactable) -> InteractableId {
        let id = InteractableId(self.slots.len() as u32);
        self.slots.push(Some(Slot {
            entity,
            on_interact: None,
        }));
        self.live += 1;
        id
    }

    pub fn get(&self, id: InteractableId) -> Option<&Interactable> {
        self.slots
            .get(id.index())
            .and_then(|slot| slot.as_ref())
            .map(|slot| &slot.entity)
    }

    pub fn get_mut(&mut self, id: InteractableId) -> Option<&mut Interactable> {
        self.slots
            .get_mut(id.index())
            .and_then(|slot| slot.as_mut())
            .map(|slot| &mut slot.entity)
    }

    /// Remove an interactable. Its handle stays dead for the session.
    pub fn remove(&mut self, id: InteractableId) -> Option<Interactable> {
        let slot = self.slots.get_mut(id.index())?.take()?;
        self.live -= 1;
        Some(slot.entity)
    }

    /// Returns false when `id` does not resolve
    pub fn set_callback(&mut self, id: InteractableId, callback: InteractCallback) -> bool {
        match self.slots.get_mut(id.index()).and_then(|slot| slot.as_mut()) {
            Some(slot) => {
                slot.on_interact = Some(callback);
                true
            }
            None => false,
        }
    }

    /// Use the entity and fire its callback when something happened
    pub fn interact(&mut self, id: InteractableId) -> Option<InteractionEvent> {
        let slot = self.slots.get_mut(id.index())?.as_mut()?;
        let event = slot.entity.interact()?;
        if let Some(callback) = slot.on_interact.as_mut() {
            callback(id, &event);
        }
        Some(event)
    }

    /// Iterate live entities in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (InteractableId, &Interactable)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.as_ref()
                .map(|slot| (InteractableId(index as u32), &slot.entity))
        })
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (InteractableId, &mut Interactable)> {
        self.slots.iter_mut().enumerate().filter_map(|(index, slot)| {
            slot.as_mut()
                .map(|slot| (InteractableId(index as u32), &mut slot.entity))
        })
    }

    /// Number of live entities
    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }
}

impl std::fmt::Debug for InteractableArena {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InteractableArena")
            .field("slots", &self.slots.len())
            .field("live", &self.live)
            .finish()
    }
}
