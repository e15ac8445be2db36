use crate::env::{ItemDefinition, ItemKindId};

/// A quantity of one item kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemStack {
    pub kind: ItemKindId,
    pub quantity: u16,
}

impl ItemStack {
    pub const fn new(kind: ItemKindId, quantity: u16) -> Self {
        Self { kind, quantity }
    }
}

/// One position of the inventory grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InventorySlot {
    stack: Option<ItemStack>,
}

impl InventorySlot {
    pub const EMPTY: InventorySlot = InventorySlot { stack: None };

    pub fn is_empty(&self) -> bool {
        self.stack.is_none_or(|stack| stack.quantity == 0)
    }

    pub fn stack(&self) -> Option<ItemStack> {
        self.stack.filter(|stack| stack.quantity > 0)
    }

    pub fn kind(&self) -> Option<ItemKindId> {
        self.stack().map(|stack| stack.kind)
    }

    pub fn quantity(&self) -> u16 {
        self.stack().map_or(0, |stack| stack.quantity)
    }

    /// Same kind, stackable, and not yet at max stack.
    pub fn can_stack(&self, kind: ItemKindId, definition: &ItemDefinition) -> bool {
        match self.stack() {
            Some(stack) => {
                stack.kind == kind
                    && definition.is_stackable()
                    && stack.quantity < definition.max_stack()
            }
            None => false,
        }
    }

    /// Units of `kind` this slot can still receive.
    pub(crate) fn capacity_for(&self, kind: ItemKindId, definition: &ItemDefinition) -> u16 {
        if self.is_empty() {
            definition.max_stack()
        } else if self.can_stack(kind, definition) {
            definition.max_stack() - self.quantity()
        } else {
            0
        }
    }

    /// Adds units of `kind`; callers check capacity first.
    pub(crate) fn fill(&mut self, kind: ItemKindId, quantity: u16) {
        let current = if self.is_empty() { 0 } else { self.quantity() };
        self.stack = Some(ItemStack::new(kind, current + quantity));
    }

    pub(crate) fn put(&mut self, stack: ItemStack) {
        self.stack = Some(stack).filter(|stack| stack.quantity > 0);
    }

    /// Removes up to `quantity` units, clearing the slot when it runs out.
    pub(crate) fn drain(&mut self, quantity: u16) -> Option<ItemStack> {
        let stack = self.stack()?;
        let taken = quantity.min(stack.quantity);
        let left = stack.quantity - taken;
        self.stack = (left > 0).then(|| ItemStack::new(stack.kind, left));
        Some(ItemStack::new(stack.kind, taken))
    }
}
