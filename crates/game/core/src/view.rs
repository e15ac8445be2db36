//! Read-only HUD projection of the game state.

use strum::IntoEnumIterator;

use crate::dialogue::{self, DialogueOracle};
use crate::env::{ItemKindId, ItemOracle};
use crate::inventory::{EquipmentSlot, Hotkey};
use crate::state::{GameState, PlayerFlags, Tick};

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct HotkeyView {
    pub key: Hotkey,
    pub slot: usize,
    pub item: String,
    pub quantity: u16,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct EquippedView {
    pub slot: EquipmentSlot,
    pub item: String,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DialogueView {
    pub speaker: String,
    pub text: String,
    pub choices: Vec<String>,
}

/// Everything the HUD draws for one frame.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct HudSnapshot {
    pub tick: Tick,
    pub health: f32,
    pub stamina: f32,
    pub alive: bool,
    pub flags: PlayerFlags,
    pub hotkeys: Vec<HotkeyView>,
    pub equipped: Vec<EquippedView>,
    pub dialogue: Option<DialogueView>,
}

impl HudSnapshot {
    pub fn capture<I, D>(state: &GameState, items: &I, dialogues: &D) -> Self
    where
        I: ItemOracle + ?Sized,
        D: DialogueOracle + ?Sized,
    {
        let name_of = |kind: ItemKindId| {
            items
                .definition(kind)
                .map(|definition| definition.name.clone())
                .unwrap_or_else(|| kind.to_string())
        };

        let inventory = &state.inventory;
        let hotkeys = Hotkey::iter()
            .filter_map(|key| {
                let slot = inventory.hotkey_slot(key)?;
                let stack = inventory.slot(slot)?.stack()?;
                Some(HotkeyView {
                    key,
                    slot,
                    item: name_of(stack.kind),
                    quantity: stack.quantity,
                })
            })
            .collect();
        let equipped = EquipmentSlot::iter()
            .filter_map(|slot| {
                let kind = inventory.equipment.get(slot)?;
                Some(EquippedView {
                    slot,
                    item: name_of(kind),
                })
            })
            .collect();
        let dialogue = dialogue::current_line(state, dialogues).map(|line| DialogueView {
            speaker: line.speaker.clone(),
            text: line.text.clone(),
            choices: line.choices.iter().map(|c| c.text.clone()).collect(),
        });

        let player = &state.player;
        Self {
            tick: state.tick,
            health: player.health.fraction(),
            stamina: player.stamina.fraction(),
            alive: player.is_alive(),
            flags: player.flags(),
            hotkeys,
            equipped,
            dialogue,
        }
    }
}
