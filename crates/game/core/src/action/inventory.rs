//! Inventory commands issued by the player.
//!
//! Wraps the inventory model and applies its side effects to the rest of the
//! world: weapon stats follow the weapon slot, consumables heal, and items
//! with nowhere to go are dropped at the player's feet.

use crate::config::GameConfig;
use crate::cue::{Cue, CueBuffer, Sound};
use crate::env::{GameEnv, ItemKindId, ItemOracle};
use crate::inventory::{
    ConsumableUse, Displaced, EquipOutcome, EquipmentSlot, Hotkey, HotkeyBinding, InventoryError,
    ItemStack, MoveOutcome, Stowed,
};
use crate::state::{EntityId, GameState, PlayerState, WeaponProfile};

use super::ActionTransition;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InventoryAction {
    Equip { slot: usize },
    Unequip { slot: EquipmentSlot },
    Move { from: usize, to: usize },
    Swap { a: usize, b: usize },
    UseConsumable { slot: usize },
    QuickUse { key: Hotkey },
    BindHotkey { key: Hotkey, slot: usize },
    ClearHotkey { key: Hotkey },
    /// Removes units from a slot and places them in the world.
    Drop { slot: usize, quantity: u16 },
}

impl InventoryAction {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Equip { .. } => "equip",
            Self::Unequip { .. } => "unequip",
            Self::Move { .. } => "move_item",
            Self::Swap { .. } => "swap_items",
            Self::UseConsumable { .. } => "use_consumable",
            Self::QuickUse { .. } => "quick_use",
            Self::BindHotkey { .. } => "bind_hotkey",
            Self::ClearHotkey { .. } => "clear_hotkey",
            Self::Drop { .. } => "drop_item",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InventoryOutcome {
    Equipped(EquipOutcome),
    Unequipped(Displaced),
    Moved(MoveOutcome),
    Swapped,
    Consumed { used: ConsumableUse, healed: i32 },
    HotkeyBound(HotkeyBinding),
    HotkeyCleared(Option<HotkeyBinding>),
    Dropped { stack: ItemStack, entity: EntityId },
}

/// Recomputes the attack profile from the equipped weapon.
pub fn refresh_weapon<I>(
    player: &mut PlayerState,
    items: &I,
    weapon: Option<ItemKindId>,
    config: &GameConfig,
) where
    I: ItemOracle + ?Sized,
{
    let stats = weapon
        .and_then(|kind| items.definition(kind))
        .and_then(|definition| definition.weapon_stats());
    player.weapon = match stats {
        Some(stats) => WeaponProfile::armed(&config.attack, stats),
        None => WeaponProfile::unarmed(&config.attack),
    };
}

impl ActionTransition for InventoryAction {
    type Error = InventoryError;
    type Output = InventoryOutcome;

    fn apply(
        &self,
        state: &mut GameState,
        env: &GameEnv<'_>,
        cues: &mut CueBuffer,
    ) -> Result<Self::Output, Self::Error> {
        let items = env.items();
        let hotkeys_before = state.inventory.hotkeys;

        let outcome = match *self {
            Self::Equip { slot } => {
                let equipped = state.inventory.equip_item(items, slot)?;
                if equipped.slot == EquipmentSlot::Weapon {
                    let weapon = state.inventory.equipment.weapon;
                    refresh_weapon(&mut state.player, items, weapon, env.config());
                }
                if let Some(previous) = equipped.previous {
                    drop_displaced(state, previous, cues);
                }
                cues.push(Cue::sound(Sound::Equip));
                cues.push(Cue::EquipmentChanged {
                    slot: equipped.slot,
                    item: Some(equipped.equipped),
                });
                cues.push(Cue::InventoryChanged);
                InventoryOutcome::Equipped(equipped)
            }
            Self::Unequip { slot } => {
                let displaced = state.inventory.unequip_item(slot)?;
                if slot == EquipmentSlot::Weapon {
                    refresh_weapon(&mut state.player, items, None, env.config());
                }
                drop_displaced(state, displaced, cues);
                cues.push(Cue::EquipmentChanged { slot, item: None });
                cues.push(Cue::InventoryChanged);
                InventoryOutcome::Unequipped(displaced)
            }
            Self::Move { from, to } => {
                let moved = state.inventory.move_item(items, from, to)?;
                cues.push(Cue::InventoryChanged);
                InventoryOutcome::Moved(moved)
            }
            Self::Swap { a, b } => {
                state.inventory.swap_items(a, b)?;
                cues.push(Cue::InventoryChanged);
                InventoryOutcome::Swapped
            }
            Self::UseConsumable { slot } => {
                let used = state.inventory.use_consumable(items, slot)?;
                consumed(state, used, cues)
            }
            Self::QuickUse { key } => {
                let used = state.inventory.quick_use(items, key)?;
                consumed(state, used, cues)
            }
            Self::BindHotkey { key, slot } => {
                InventoryOutcome::HotkeyBound(state.inventory.bind_hotkey(key, slot)?)
            }
            Self::ClearHotkey { key } => {
                InventoryOutcome::HotkeyCleared(state.inventory.clear_hotkey(key))
            }
            Self::Drop { slot, quantity } => {
                let stack = state.inventory.remove_item(slot, quantity)?;
                let entity = state.spawn_item(stack, state.player.position);
                cues.push(Cue::ItemDropped {
                    entity,
                    kind: stack.kind,
                    quantity: stack.quantity,
                });
                cues.push(Cue::InventoryChanged);
                InventoryOutcome::Dropped { stack, entity }
            }
        };

        if state.inventory.hotkeys != hotkeys_before {
            cues.push(Cue::HotkeysChanged);
        }
        Ok(outcome)
    }

    fn post_validate(&self, state: &GameState, env: &GameEnv<'_>) -> Result<(), Self::Error> {
        for (index, slot) in state.inventory.slots().iter().enumerate() {
            let Some(stack) = slot.stack() else {
                continue;
            };
            let max = env
                .items()
                .definition(stack.kind)
                .ok_or(InventoryError::UnknownItem(stack.kind))?
                .max_stack();
            if stack.quantity > max {
                return Err(InventoryError::StackOverflow {
                    index,
                    quantity: stack.quantity,
                    max,
                });
            }
        }
        Ok(())
    }
}

fn consumed(state: &mut GameState, used: ConsumableUse, cues: &mut CueBuffer) -> InventoryOutcome {
    let healed = state.player.heal(used.heal);
    cues.push(Cue::sound(Sound::Consume));
    cues.push(Cue::Healed { amount: healed });
    cues.push(Cue::InventoryChanged);
    InventoryOutcome::Consumed { used, healed }
}

fn drop_displaced(state: &mut GameState, displaced: Displaced, cues: &mut CueBuffer) {
    if displaced.stowed == Stowed::Dropped {
        let stack = ItemStack::new(displaced.kind, 1);
        let entity = state.spawn_item(stack, state.player.position);
        cues.push(Cue::ItemDropped {
            entity,
            kind: displaced.kind,
            quantity: 1,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AddPolicy;
    use crate::dialogue::DialogueLibrary;
    use crate::env::{ItemCatalog, ScanQuery};
    use glam::Vec3;

    const BERRY: ItemKindId = ItemCatalog::HEALING_BERRY;
    const STICK: ItemKindId = ItemCatalog::WOODEN_STICK;

    fn run(
        action: InventoryAction,
        state: &mut GameState,
        env: &GameEnv<'_>,
    ) -> Result<(InventoryOutcome, CueBuffer), InventoryError> {
        let mut cues = CueBuffer::new();
        action.pre_validate(state, env)?;
        let outcome = action.apply(state, env, &mut cues)?;
        action.post_validate(state, env)?;
        Ok((outcome, cues))
    }

    #[test]
    fn equipping_stick_applies_weapon_stats_and_unequip_resets() {
        let config = GameConfig::default();
        let items = ItemCatalog::starter();
        let library = DialogueLibrary::new();
        let env = GameEnv::with_oracles(&config, &items, &ScanQuery, &library);
        let mut state = GameState::new(&config, Vec3::ZERO);
        state
            .inventory
            .add_item(&items, ItemStack::new(STICK, 1), AddPolicy::Spill)
            .unwrap();

        let (_, cues) = run(InventoryAction::Equip { slot: 0 }, &mut state, &env).unwrap();
        assert_eq!(state.player.weapon.damage, 15);
        assert_eq!(state.player.weapon.range, 2.0);
        assert!(cues.contains(&Cue::EquipmentChanged {
            slot: EquipmentSlot::Weapon,
            item: Some(STICK)
        }));

        run(
            InventoryAction::Unequip {
                slot: EquipmentSlot::Weapon,
            },
            &mut state,
            &env,
        )
        .unwrap();
        assert_eq!(state.player.weapon, WeaponProfile::unarmed(&config.attack));
        assert_eq!(state.inventory.slot(0).unwrap().kind(), Some(STICK));
    }

    #[test]
    fn unequip_with_full_inventory_drops_into_world() {
        let mut config = GameConfig::default();
        config.inventory.slots = 1;
        let items = ItemCatalog::starter();
        let library = DialogueLibrary::new();
        let env = GameEnv::with_oracles(&config, &items, &ScanQuery, &library);
        let mut state = GameState::new(&config, Vec3::new(2.0, 0.0, 3.0));
        state.inventory.equipment.weapon = Some(STICK);
        state
            .inventory
            .add_item(&items, ItemStack::new(BERRY, 1), AddPolicy::Spill)
            .unwrap();

        let (outcome, _) = run(
            InventoryAction::Unequip {
                slot: EquipmentSlot::Weapon,
            },
            &mut state,
            &env,
        )
        .unwrap();
        assert!(matches!(
            outcome,
            InventoryOutcome::Unequipped(Displaced {
                stowed: Stowed::Dropped,
                ..
            })
        ));
        // Exactly one representation: on the ground, not equipped.
        assert_eq!(state.inventory.equipment.weapon, None);
        assert_eq!(state.items.len(), 1);
        assert_eq!(state.items[0].stack, ItemStack::new(STICK, 1));
        assert_eq!(state.items[0].position, Vec3::new(2.0, 0.0, 3.0));
    }

    #[test]
    fn quick_use_heals_and_clears_emptied_binding() {
        let config = GameConfig::default();
        let items = ItemCatalog::starter();
        let library = DialogueLibrary::new();
        let env = GameEnv::with_oracles(&config, &items, &ScanQuery, &library);
        let mut state = GameState::new(&config, Vec3::ZERO);
        state.player.health.current = 60;
        state
            .inventory
            .add_item(&items, ItemStack::new(BERRY, 1), AddPolicy::Spill)
            .unwrap();
        run(
            InventoryAction::BindHotkey {
                key: Hotkey::Q,
                slot: 0,
            },
            &mut state,
            &env,
        )
        .unwrap();

        let (outcome, cues) =
            run(InventoryAction::QuickUse { key: Hotkey::Q }, &mut state, &env).unwrap();
        assert!(matches!(outcome, InventoryOutcome::Consumed { healed: 25, .. }));
        assert_eq!(state.player.health.current, 85);
        assert!(cues.contains(&Cue::HotkeysChanged));
        assert_eq!(state.inventory.hotkey_slot(Hotkey::Q), None);
    }

    #[test]
    fn drop_places_stack_at_player() {
        let config = GameConfig::default();
        let items = ItemCatalog::starter();
        let library = DialogueLibrary::new();
        let env = GameEnv::with_oracles(&config, &items, &ScanQuery, &library);
        let mut state = GameState::new(&config, Vec3::ZERO);
        state
            .inventory
            .add_item(&items, ItemStack::new(BERRY, 5), AddPolicy::Spill)
            .unwrap();

        let (outcome, _) = run(
            InventoryAction::Drop {
                slot: 0,
                quantity: 2,
            },
            &mut state,
            &env,
        )
        .unwrap();
        assert!(matches!(
            outcome,
            InventoryOutcome::Dropped {
                stack: ItemStack { quantity: 2, .. },
                ..
            }
        ));
        assert_eq!(state.inventory.count(BERRY), 3);
        assert_eq!(state.items[0].stack.quantity, 2);
    }

    #[test]
    fn failed_command_leaves_state_untouched() {
        let config = GameConfig::default();
        let items = ItemCatalog::starter();
        let library = DialogueLibrary::new();
        let env = GameEnv::with_oracles(&config, &items, &ScanQuery, &library);
        let mut state = GameState::new(&config, Vec3::ZERO);
        let before = state.clone();
        assert_eq!(
            run(InventoryAction::Equip { slot: 3 }, &mut state, &env),
            Err(InventoryError::EmptySlot { index: 3 })
        );
        assert_eq!(state, before);
    }
}
