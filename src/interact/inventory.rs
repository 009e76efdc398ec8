//! Inventory - fixed-capacity stacking storage for collected items

use serde::{Deserialize, Serialize};

use crate::core::error::{FrostError, Result};
use crate::interact::item::Item;

pub const DEFAULT_INVENTORY_SLOTS: usize = 20;

/// One inventory cell. An empty `item_id` marks a free slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventorySlot {
    pub item_id: String,
    pub quantity: u32,
}

impl InventorySlot {
    pub fn is_empty(&self) -> bool {
        self.item_id.is_empty()
    }
}

/// Fixed number of slots, each id stacked into at most one slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    slots: Vec<InventorySlot>,
}

impl Inventory {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![InventorySlot::default(); capacity],
        }
    }

    /// Add `quantity` of `item_id`, returning the slot index used
    ///
    /// Stacks onto an existing slot for the same id, otherwise claims the
    /// first free slot. A full inventory or a stack that would overflow is
    /// left untouched.
    pub fn add_item(&mut self, item_id: &str, quantity: u32) -> Result<usize> {
        if item_id.is_empty() {
            return Err(FrostError::InvalidItemId(item_id.to_string()));
        }

        if let Some(index) = self.slot_of(item_id) {
            let slot = &mut self.slots[index];
            slot.quantity = slot.quantity.checked_add(quantity).ok_or_else(|| {
                FrostError::StackOverflow {
                    item_id: item_id.to_string(),
                    quantity,
                }
            })?;
            return Ok(index);
        }

        match self.slots.iter().position(InventorySlot::is_empty) {
            Some(index) => {
                self.slots[index] = InventorySlot {
                    item_id: item_id.to_string(),
                    quantity,
                };
                Ok(index)
            }
            None => Err(FrostError::InventoryFull {
                capacity: self.capacity(),
            }),
        }
    }

    /// Store a picked-up world item
    pub fn add_collected(&mut self, item: &Item) -> Result<usize> {
        self.add_item(item.id(), item.quantity())
    }

    /// Take `quantity` of `item_id`, returning what is left
    ///
    /// The slot is freed once its quantity reaches zero.
    pub fn remove_item(&mut self, item_id: &str, quantity: u32) -> Result<u32> {
        let index = self
            .slot_of(item_id)
            .ok_or_else(|| FrostError::ItemNotHeld(item_id.to_string()))?;

        let slot = &mut self.slots[index];
        slot.quantity = slot.quantity.saturating_sub(quantity);
        let remaining = slot.quantity;
        if remaining == 0 {
            *slot = InventorySlot::default();
        }
        Ok(remaining)
    }

    fn slot_of(&self, item_id: &str) -> Option<usize> {
        if item_id.is_empty() {
            return None;
        }
        self.slots.iter().position(|slot| slot.item_id == item_id)
    }

    pub fn has_item(&self, item_id: &str) -> bool {
        self.item_count(item_id) > 0
    }

    pub fn item_count(&self, item_id: &str) -> u32 {
        self.slot_of(item_id)
            .map(|index| self.slots[index].quantity)
            .unwrap_or(0)
    }

    pub fn slots(&self) -> &[InventorySlot] {
        &self.slots
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn used_slots(&self) -> usize {
        self.slots.iter().filter(|slot| !slot.is_empty()).count()
    }

    pub fn is_full(&self) -> bool {
        self.used_slots() == self.capacity()
    }
}

impl Default for Inventory {
    fn default() -> Self {
        Self::new(DEFAULT_INVENTORY_SLOTS)
    }
}
