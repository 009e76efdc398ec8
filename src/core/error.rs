use thiserror::Error;

use crate::core::types::InteractableId;

#[derive(Error, Debug)]
pub enum FrostError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Inventory full ({capacity} slots)")]
    InventoryFull { capacity: usize },

    #[error("Invalid item id: {0:?}")]
    InvalidItemId(String),

    #[error("Stack of {item_id} cannot hold {quantity} more")]
    StackOverflow { item_id: String, quantity: u32 },

    #[error("Item not held: {0}")]
    ItemNotHeld(String),

    #[error("Interactable not found: {0:?}")]
    UnknownInteractable(InteractableId),
}

pub type Result<T> = std::result::Result<T, FrostError>;
