//! Inventory and equipment model.
//!
//! A fixed-size grid of slots with per-kind stacking, three equipment slots
//! and two quick-use bindings. Every operation either succeeds or returns an
//! [`InventoryError`] with the inventory left untouched. Hotkey bindings are
//! refreshed after each successful mutation so no binding ever points at an
//! empty slot.
mod equipment;
mod error;
mod hotkey;
mod slot;

pub use equipment::{Equipment, EquipmentSlot};
pub use error::InventoryError;
pub use hotkey::{Hotkey, HotkeyBinding, Hotkeys};
pub use slot::{InventorySlot, ItemStack};

use arrayvec::ArrayVec;

use crate::config::{AddPolicy, GameConfig};
use crate::env::{ItemDefinition, ItemKindId, ItemOracle};

/// Outcome of a successful `add_item`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AddOutcome {
    /// First slot that received units.
    pub slot: usize,
    pub placed: u16,
    /// Units handed back to the caller (spill policy only).
    pub remainder: u16,
    /// Units lost to a full stack (first-slot policy only).
    pub discarded: u16,
}

/// Where an item pushed out of equipment ended up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stowed {
    Slot(usize),
    /// No empty slot; the caller must place it in the world.
    Dropped,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Displaced {
    pub kind: ItemKindId,
    pub stowed: Stowed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EquipOutcome {
    pub slot: EquipmentSlot,
    pub equipped: ItemKindId,
    pub previous: Option<Displaced>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved,
    /// `moved` units merged; `left` stayed in the source slot.
    Merged { moved: u16, left: u16 },
    Swapped,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConsumableUse {
    pub slot: usize,
    pub kind: ItemKindId,
    pub heal: i32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InventoryState {
    slots: ArrayVec<InventorySlot, { GameConfig::MAX_INVENTORY_SLOTS }>,
    pub equipment: Equipment,
    pub hotkeys: Hotkeys,
}

impl InventoryState {
    /// Creates an empty inventory; the size is capped at `MAX_INVENTORY_SLOTS`.
    pub fn new(size: usize) -> Self {
        let size = size.min(GameConfig::MAX_INVENTORY_SLOTS);
        Self {
            slots: (0..size).map(|_| InventorySlot::EMPTY).collect(),
            equipment: Equipment::empty(),
            hotkeys: Hotkeys::default(),
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(InventorySlot::is_empty)
    }

    pub fn slots(&self) -> &[InventorySlot] {
        &self.slots
    }

    pub fn slot(&self, index: usize) -> Option<&InventorySlot> {
        self.slots.get(index)
    }

    pub fn first_empty(&self) -> Option<usize> {
        self.slots.iter().position(InventorySlot::is_empty)
    }

    /// Total units of `kind` across all slots.
    pub fn count(&self, kind: ItemKindId) -> u32 {
        self.slots
            .iter()
            .filter_map(InventorySlot::stack)
            .filter(|stack| stack.kind == kind)
            .map(|stack| u32::from(stack.quantity))
            .sum()
    }

    /// True if `kind` is carried in a slot or equipped.
    pub fn contains(&self, kind: ItemKindId) -> bool {
        self.count(kind) > 0
            || [
                self.equipment.weapon,
                self.equipment.armor,
                self.equipment.accessory,
            ]
            .contains(&Some(kind))
    }

    pub fn hotkey_slot(&self, key: Hotkey) -> Option<usize> {
        self.hotkeys.get(key).map(|binding| binding.slot)
    }

    // ===== operations =====

    /// Places `stack` scanning slots left to right. A slot accepts when it is
    /// empty or can stack the kind; each slot is filled up to the kind's max
    /// stack. Fails with `InventoryFull` when no slot accepts anything.
    pub fn add_item<I>(
        &mut self,
        items: &I,
        stack: ItemStack,
        policy: AddPolicy,
    ) -> Result<AddOutcome, InventoryError>
    where
        I: ItemOracle + ?Sized,
    {
        if stack.quantity == 0 {
            return Err(InventoryError::InvalidQuantity);
        }
        let definition = definition(items, stack.kind)?;

        let mut remaining = stack.quantity;
        let mut first = None;
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if remaining == 0 {
                break;
            }
            let capacity = slot.capacity_for(stack.kind, definition);
            if capacity == 0 {
                continue;
            }
            let placed = remaining.min(capacity);
            slot.fill(stack.kind, placed);
            remaining -= placed;
            first.get_or_insert(index);
            if policy == AddPolicy::FirstSlot {
                break;
            }
        }

        let Some(slot) = first else {
            return Err(InventoryError::InventoryFull { kind: stack.kind });
        };
        let (remainder, discarded) = match policy {
            AddPolicy::Spill => (remaining, 0),
            AddPolicy::FirstSlot => (0, remaining),
        };
        Ok(AddOutcome {
            slot,
            placed: stack.quantity - remaining,
            remainder,
            discarded,
        })
    }

    /// Removes up to `quantity` units from a slot and returns what was removed.
    pub fn remove_item(
        &mut self,
        index: usize,
        quantity: u16,
    ) -> Result<ItemStack, InventoryError> {
        self.occupied(index)?;
        if quantity == 0 {
            return Err(InventoryError::InvalidQuantity);
        }
        let removed = self.slots[index]
            .drain(quantity)
            .ok_or(InventoryError::EmptySlot { index })?;
        self.refresh_hotkeys();
        Ok(removed)
    }

    /// Equips one unit from `index`. The unit leaves the slot first, so a
    /// previously equipped item may swap into the freed slot; with no empty
    /// slot it is reported as dropped.
    pub fn equip_item<I>(&mut self, items: &I, index: usize) -> Result<EquipOutcome, InventoryError>
    where
        I: ItemOracle + ?Sized,
    {
        let stack = self.occupied(index)?;
        let target = definition(items, stack.kind)?
            .equipment_slot()
            .ok_or(InventoryError::NotEquippable(stack.kind))?;

        self.slots[index].drain(1);
        let previous = self
            .equipment
            .equip(target, stack.kind)
            .map(|kind| self.stow(kind));
        self.refresh_hotkeys();

        Ok(EquipOutcome {
            slot: target,
            equipped: stack.kind,
            previous,
        })
    }

    /// Returns an equipped item to the first empty slot, or reports it dropped.
    pub fn unequip_item(&mut self, slot: EquipmentSlot) -> Result<Displaced, InventoryError> {
        let kind = self
            .equipment
            .unequip(slot)
            .ok_or(InventoryError::NothingEquipped(slot))?;
        Ok(self.stow(kind))
    }

    /// Moves into an empty slot, merges compatible stacks (capped at max
    /// stack, the rest stays behind), and swaps otherwise.
    pub fn move_item<I>(
        &mut self,
        items: &I,
        from: usize,
        to: usize,
    ) -> Result<MoveOutcome, InventoryError>
    where
        I: ItemOracle + ?Sized,
    {
        self.check_index(to)?;
        let source = self.occupied(from)?;
        if from == to {
            return Err(InventoryError::SameSlot { index: from });
        }

        let outcome = match self.slots[to].stack() {
            None => {
                self.slots.swap(from, to);
                MoveOutcome::Moved
            }
            Some(target) if target.kind == source.kind => {
                let definition = definition(items, source.kind)?;
                let capacity = self.slots[to].capacity_for(source.kind, definition);
                if capacity == 0 {
                    self.slots.swap(from, to);
                    MoveOutcome::Swapped
                } else {
                    let moved = capacity.min(source.quantity);
                    self.slots[to].fill(source.kind, moved);
                    self.slots[from].drain(moved);
                    MoveOutcome::Merged {
                        moved,
                        left: source.quantity - moved,
                    }
                }
            }
            Some(_) => {
                self.slots.swap(from, to);
                MoveOutcome::Swapped
            }
        };
        self.refresh_hotkeys();
        Ok(outcome)
    }

    /// Exchanges the contents of two slots, empty or not.
    pub fn swap_items(&mut self, a: usize, b: usize) -> Result<(), InventoryError> {
        self.check_index(a)?;
        self.check_index(b)?;
        if a != b {
            self.slots.swap(a, b);
            self.refresh_hotkeys();
        }
        Ok(())
    }

    /// Consumes one unit of a consumable and returns its effect.
    pub fn use_consumable<I>(
        &mut self,
        items: &I,
        index: usize,
    ) -> Result<ConsumableUse, InventoryError>
    where
        I: ItemOracle + ?Sized,
    {
        let stack = self.occupied(index)?;
        let heal = definition(items, stack.kind)?
            .consumable_heal()
            .ok_or(InventoryError::NotConsumable(stack.kind))?;

        self.slots[index].drain(1);
        self.refresh_hotkeys();
        Ok(ConsumableUse {
            slot: index,
            kind: stack.kind,
            heal,
        })
    }

    /// Binds a hotkey to an occupied slot, replacing any earlier binding.
    pub fn bind_hotkey(
        &mut self,
        key: Hotkey,
        index: usize,
    ) -> Result<HotkeyBinding, InventoryError> {
        let stack = self.occupied(index)?;
        let binding = HotkeyBinding {
            slot: index,
            snapshot: stack.kind,
        };
        self.hotkeys.set(key, binding);
        Ok(binding)
    }

    pub fn clear_hotkey(&mut self, key: Hotkey) -> Option<HotkeyBinding> {
        self.hotkeys.clear(key)
    }

    /// Uses whatever currently sits in the bound slot.
    pub fn quick_use<I>(&mut self, items: &I, key: Hotkey) -> Result<ConsumableUse, InventoryError>
    where
        I: ItemOracle + ?Sized,
    {
        let binding = self
            .hotkeys
            .get(key)
            .ok_or(InventoryError::HotkeyUnbound(key))?;
        if self.slots.get(binding.slot).is_none_or(InventorySlot::is_empty) {
            // Stale binding; repair it and report the empty slot.
            self.hotkeys.clear(key);
            return Err(InventoryError::EmptySlot {
                index: binding.slot,
            });
        }
        self.use_consumable(items, binding.slot)
    }

    // ===== helpers =====

    fn check_index(&self, index: usize) -> Result<(), InventoryError> {
        if index < self.slots.len() {
            Ok(())
        } else {
            Err(InventoryError::InvalidSlot {
                index,
                len: self.slots.len(),
            })
        }
    }

    fn occupied(&self, index: usize) -> Result<ItemStack, InventoryError> {
        self.check_index(index)?;
        self.slots[index]
            .stack()
            .ok_or(InventoryError::EmptySlot { index })
    }

    fn stow(&mut self, kind: ItemKindId) -> Displaced {
        let stowed = match self.first_empty() {
            Some(index) => {
                self.slots[index].put(ItemStack::new(kind, 1));
                Stowed::Slot(index)
            }
            None => Stowed::Dropped,
        };
        Displaced { kind, stowed }
    }

    /// Clears bindings to emptied slots and refreshes display snapshots.
    fn refresh_hotkeys(&mut self) {
        let slots = &self.slots;
        for binding in [&mut self.hotkeys.q, &mut self.hotkeys.e] {
            let current = binding.and_then(|b| slots.get(b.slot).and_then(InventorySlot::kind));
            match current {
                Some(kind) => {
                    if let Some(b) = binding.as_mut() {
                        b.snapshot = kind;
                    }
                }
                None => *binding = None,
            }
        }
    }
}

fn definition<I>(items: &I, kind: ItemKindId) -> Result<&ItemDefinition, InventoryError>
where
    I: ItemOracle + ?Sized,
{
    items
        .definition(kind)
        .ok_or(InventoryError::UnknownItem(kind))
}
