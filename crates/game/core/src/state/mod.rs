//! Canonical simulation state.
//!
//! [`GameState`] owns every mutable fact of a session: the player, enemies,
//! ground items, props, the inventory and the active dialogue. Only the
//! engine and the action transitions mutate it.
mod common;
mod player;
mod world;

pub use common::{Countdown, EntityId, Health, Stamina, Tick};
pub use player::{ActionTimers, DamageOutcome, PlayerFlags, PlayerState, Roll, WeaponProfile};
pub use world::{Arena, EnemyState, PropKind, PropState, WorldItem};

use glam::Vec3;

use crate::config::GameConfig;
use crate::dialogue::DialogueCursor;
use crate::env::EnemyTemplate;
use crate::inventory::{InventoryState, ItemStack};

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    pub tick: Tick,
    /// Simulated seconds since the session started (paused time excluded).
    pub elapsed: f32,
    pub arena: Arena,
    pub player: PlayerState,
    pub inventory: InventoryState,
    pub enemies: Vec<EnemyState>,
    pub items: Vec<WorldItem>,
    pub props: Vec<PropState>,
    pub dialogue: Option<DialogueCursor>,
    next_id: u32,
}

impl GameState {
    pub fn new(config: &GameConfig, spawn: Vec3) -> Self {
        Self {
            tick: Tick::default(),
            elapsed: 0.0,
            arena: Arena {
                half_extent: config.arena.half_extent,
            },
            player: PlayerState::new(config, spawn),
            inventory: InventoryState::new(config.inventory.slots),
            enemies: Vec::new(),
            items: Vec::new(),
            props: Vec::new(),
            dialogue: None,
            next_id: EntityId::PLAYER.0 + 1,
        }
    }

    /// Hands out the next unused entity id.
    pub fn allocate_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn spawn_enemy(&mut self, template: EnemyTemplate, position: Vec3) -> EntityId {
        let id = self.allocate_id();
        self.enemies.push(EnemyState::new(id, template, position));
        id
    }

    pub fn spawn_item(&mut self, stack: ItemStack, position: Vec3) -> EntityId {
        let id = self.allocate_id();
        self.items.push(WorldItem {
            id,
            position,
            stack,
        });
        id
    }

    pub fn spawn_prop(&mut self, kind: PropKind, position: Vec3) -> EntityId {
        let id = self.allocate_id();
        self.props.push(PropState { id, position, kind });
        id
    }

    pub fn enemy(&self, id: EntityId) -> Option<&EnemyState> {
        self.enemies.iter().find(|enemy| enemy.id == id)
    }

    pub fn enemy_mut(&mut self, id: EntityId) -> Option<&mut EnemyState> {
        self.enemies.iter_mut().find(|enemy| enemy.id == id)
    }

    pub fn prop_mut(&mut self, id: EntityId) -> Option<&mut PropState> {
        self.props.iter_mut().find(|prop| prop.id == id)
    }

    /// Removes a ground item, returning it.
    pub fn take_item(&mut self, id: EntityId) -> Option<WorldItem> {
        let index = self.items.iter().position(|item| item.id == id)?;
        Some(self.items.remove(index))
    }

    pub fn position_of(&self, id: EntityId) -> Option<Vec3> {
        if id.is_player() {
            return Some(self.player.position);
        }
        self.enemies
            .iter()
            .find(|enemy| enemy.id == id)
            .map(|enemy| enemy.position)
            .or_else(|| {
                self.items
                    .iter()
                    .find(|item| item.id == id)
                    .map(|item| item.position)
            })
            .or_else(|| {
                self.props
                    .iter()
                    .find(|prop| prop.id == id)
                    .map(|prop| prop.position)
            })
    }

    /// Ids of all lanterns that are currently lit.
    pub fn lit_lanterns(&self) -> Vec<u32> {
        self.props
            .iter()
            .filter_map(|prop| match prop.kind {
                PropKind::Lantern {
                    lantern_id,
                    lit: true,
                    ..
                } => Some(lantern_id),
                _ => None,
            })
            .collect()
    }

    pub fn is_lantern_lit(&self, lantern_id: u32) -> bool {
        self.lit_lanterns().contains(&lantern_id)
    }

    /// True while a dialogue holds the simulation paused.
    pub fn is_paused(&self) -> bool {
        self.dialogue.is_some()
    }

    /// Swaps the ground items for `items`, e.g. from a save. Later
    /// allocations skip every id the new set uses.
    pub fn replace_items(&mut self, items: Vec<WorldItem>) {
        if let Some(max) = items.iter().map(|item| item.id.0).max() {
            self.next_id = self.next_id.max(max + 1);
        }
        self.items = items;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::ItemKindId;

    #[test]
    fn ids_are_unique_and_skip_the_player() {
        let mut state = GameState::new(&GameConfig::default(), Vec3::ZERO);
        let item = state.spawn_item(ItemStack::new(ItemKindId(1), 1), Vec3::X);
        let prop = state.spawn_prop(
            PropKind::Lantern {
                lantern_id: 7,
                lit: false,
                save_point: true,
            },
            Vec3::Z,
        );
        assert_eq!(item, EntityId(1));
        assert_eq!(prop, EntityId(2));
        assert_eq!(state.position_of(prop), Some(Vec3::Z));
        assert_eq!(state.position_of(EntityId::PLAYER), Some(Vec3::ZERO));
        assert!(!state.is_lantern_lit(7));
    }

    #[test]
    fn replaced_items_reserve_their_ids() {
        let mut state = GameState::new(&GameConfig::default(), Vec3::ZERO);
        state.spawn_item(ItemStack::new(ItemKindId(1), 3), Vec3::X);
        state.replace_items(vec![WorldItem {
            id: EntityId(9),
            position: Vec3::Z,
            stack: ItemStack::new(ItemKindId(2), 1),
        }]);

        assert_eq!(state.items.len(), 1);
        assert_eq!(state.items[0].id, EntityId(9));
        assert_eq!(state.allocate_id(), EntityId(10));
    }

    #[test]
    fn arena_clamps_ground_plane_only() {
        let arena = Arena { half_extent: 9.5 };
        let clamped = arena.clamp(Vec3::new(12.0, 1.0, -20.0));
        assert_eq!(clamped, Vec3::new(9.5, 1.0, -9.5));
    }
}
