//! Quick-use bindings.
//!
//! A binding references an inventory slot by position. The item kind seen at
//! bind time is kept as a snapshot for display only; using a hotkey always
//! re-reads the slot.

use crate::env::ItemKindId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::EnumIter, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Hotkey {
    Q,
    E,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HotkeyBinding {
    pub slot: usize,
    pub snapshot: ItemKindId,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hotkeys {
    pub q: Option<HotkeyBinding>,
    pub e: Option<HotkeyBinding>,
}

impl Hotkeys {
    pub fn get(&self, key: Hotkey) -> Option<HotkeyBinding> {
        match key {
            Hotkey::Q => self.q,
            Hotkey::E => self.e,
        }
    }

    fn binding_mut(&mut self, key: Hotkey) -> &mut Option<HotkeyBinding> {
        match key {
            Hotkey::Q => &mut self.q,
            Hotkey::E => &mut self.e,
        }
    }

    pub fn set(&mut self, key: Hotkey, binding: HotkeyBinding) -> Option<HotkeyBinding> {
        self.binding_mut(key).replace(binding)
    }

    pub fn clear(&mut self, key: Hotkey) -> Option<HotkeyBinding> {
        self.binding_mut(key).take()
    }
}
