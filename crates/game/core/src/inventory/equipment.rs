//! Equipment slots worn by the player.
//!
//! Each slot holds at most one item kind. Equipped items are not present in
//! the inventory grid while they are worn.

use crate::env::ItemKindId;

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::EnumIter, strum::Display, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum EquipmentSlot {
    Weapon,
    Armor,
    Accessory,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Equipment {
    /// Currently wielded weapon (drives the attack profile).
    pub weapon: Option<ItemKindId>,
    pub armor: Option<ItemKindId>,
    pub accessory: Option<ItemKindId>,
}

impl Equipment {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: EquipmentSlot) -> Option<ItemKindId> {
        match slot {
            EquipmentSlot::Weapon => self.weapon,
            EquipmentSlot::Armor => self.armor,
            EquipmentSlot::Accessory => self.accessory,
        }
    }

    fn slot_mut(&mut self, slot: EquipmentSlot) -> &mut Option<ItemKindId> {
        match slot {
            EquipmentSlot::Weapon => &mut self.weapon,
            EquipmentSlot::Armor => &mut self.armor,
            EquipmentSlot::Accessory => &mut self.accessory,
        }
    }

    /// Equips an item, returning the previously equipped one if any.
    pub fn equip(&mut self, slot: EquipmentSlot, kind: ItemKindId) -> Option<ItemKindId> {
        self.slot_mut(slot).replace(kind)
    }

    /// Unequips a slot, returning its item if one was equipped.
    pub fn unequip(&mut self, slot: EquipmentSlot) -> Option<ItemKindId> {
        self.slot_mut(slot).take()
    }
}
