//! Save game schema.
//!
//! A save keeps what the player carries between sessions: vitals, position,
//! the inventory with its equipment and hotkeys, the items still lying on
//! the ground and which lanterns burn. Enemies and an open dialogue are
//! rebuilt from the scene.

use chrono::{DateTime, Utc};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use folktale_core::action::refresh_weapon;
use folktale_core::state::{ActionTimers, Health, Stamina, WorldItem};
use folktale_core::{GameConfig, GameState, InventoryState, ItemOracle, PropKind, Tick};

use crate::repository::{RepositoryError, Result};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SaveGame {
    pub tick: Tick,
    pub elapsed: f32,
    pub position: Vec3,
    pub facing: Vec3,
    pub health: Health,
    pub stamina: Stamina,
    pub inventory: InventoryState,
    /// Ground items at save time; picked-up items are not among them.
    pub world_items: Vec<WorldItem>,
    pub lit_lanterns: Vec<u32>,
    /// Lantern whose lighting triggered this save, if any.
    pub lantern_id: Option<u32>,
    pub saved_at: DateTime<Utc>,
}

impl SaveGame {
    pub fn capture(state: &GameState, lantern_id: Option<u32>) -> Self {
        let player = &state.player;
        Self {
            tick: state.tick,
            elapsed: state.elapsed,
            position: player.position,
            facing: player.facing,
            health: player.health,
            stamina: player.stamina,
            inventory: state.inventory.clone(),
            world_items: state.items.clone(),
            lit_lanterns: state.lit_lanterns(),
            lantern_id,
            saved_at: Utc::now(),
        }
    }

    /// Writes the saved facts over `state`.
    ///
    /// Action timers, rolls and swings restart idle, any open dialogue is
    /// closed and the attack profile follows the restored weapon.
    pub fn apply_to<I>(&self, state: &mut GameState, items: &I, config: &GameConfig)
    where
        I: ItemOracle + ?Sized,
    {
        state.tick = self.tick;
        state.elapsed = self.elapsed;
        state.dialogue = None;
        state.inventory = self.inventory.clone();
        state.replace_items(self.world_items.clone());

        for prop in &mut state.props {
            if let PropKind::Lantern { lantern_id, lit, .. } = &mut prop.kind {
                *lit = self.lit_lanterns.contains(lantern_id);
            }
        }

        let player = &mut state.player;
        player.position = self.position;
        player.facing = self.facing;
        player.move_intent = Vec3::ZERO;
        player.health = self.health;
        player.stamina = self.stamina;
        player.timers = ActionTimers::default();
        player.attacking = false;
        player.roll = None;
        player.dead = self.health.is_depleted();
        refresh_weapon(player, items, state.inventory.equipment.weapon, config);
    }

    pub(crate) fn encode(&self) -> Result<Vec<u8>> {
        bincode::serialize(self).map_err(|e| RepositoryError::Serialization(e.to_string()))
    }

    pub(crate) fn decode(bytes: &[u8]) -> Result<Self> {
        bincode::deserialize(bytes).map_err(|e| RepositoryError::Serialization(e.to_string()))
    }
}

/// Human-readable summary stored next to a save.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveMetadata {
    pub slot: String,
    pub tick: Tick,
    pub lantern_id: Option<u32>,
    pub saved_at: DateTime<Utc>,
    /// Hex SHA-256 of the encoded payload.
    pub digest: String,
}

impl SaveMetadata {
    pub(crate) fn describe(slot: &str, save: &SaveGame, payload: &[u8]) -> Self {
        Self {
            slot: slot.to_string(),
            tick: save.tick,
            lantern_id: save.lantern_id,
            saved_at: save.saved_at,
            digest: hex::encode(Sha256::digest(payload)),
        }
    }
}
