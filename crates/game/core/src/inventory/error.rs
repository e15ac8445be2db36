use crate::env::ItemKindId;
use crate::error::{ErrorSeverity, GameError};

use super::{EquipmentSlot, Hotkey};

/// Rejected inventory operations. The inventory is unchanged whenever one of
/// these is returned.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InventoryError {
    #[error("slot {index} is out of range (inventory has {len} slots)")]
    InvalidSlot { index: usize, len: usize },

    #[error("slot {index} is empty")]
    EmptySlot { index: usize },

    #[error("quantity must be greater than zero")]
    InvalidQuantity,

    #[error("no slot can accept {kind}")]
    InventoryFull { kind: ItemKindId },

    #[error("{0} has no definition")]
    UnknownItem(ItemKindId),

    #[error("{0} cannot be equipped")]
    NotEquippable(ItemKindId),

    #[error("{0} is not consumable")]
    NotConsumable(ItemKindId),

    #[error("nothing equipped in the {0} slot")]
    NothingEquipped(EquipmentSlot),

    #[error("source and destination are both slot {index}")]
    SameSlot { index: usize },

    #[error("hotkey {0} is not bound")]
    HotkeyUnbound(Hotkey),

    #[error("slot {index} holds {quantity} units, above the max stack of {max}")]
    StackOverflow { index: usize, quantity: u16, max: u16 },
}

impl GameError for InventoryError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InventoryFull { .. } => ErrorSeverity::Recoverable,
            Self::UnknownItem(_) | Self::StackOverflow { .. } => ErrorSeverity::Internal,
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidSlot { .. } => "INVENTORY_INVALID_SLOT",
            Self::EmptySlot { .. } => "INVENTORY_EMPTY_SLOT",
            Self::InvalidQuantity => "INVENTORY_INVALID_QUANTITY",
            Self::InventoryFull { .. } => "INVENTORY_FULL",
            Self::UnknownItem(_) => "INVENTORY_UNKNOWN_ITEM",
            Self::NotEquippable(_) => "INVENTORY_NOT_EQUIPPABLE",
            Self::NotConsumable(_) => "INVENTORY_NOT_CONSUMABLE",
            Self::NothingEquipped(_) => "INVENTORY_NOTHING_EQUIPPED",
            Self::SameSlot { .. } => "INVENTORY_SAME_SLOT",
            Self::HotkeyUnbound(_) => "INVENTORY_HOTKEY_UNBOUND",
            Self::StackOverflow { .. } => "INVENTORY_STACK_OVERFLOW",
        }
    }
}
