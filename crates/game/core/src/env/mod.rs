//! Traits describing read-only world data.
//!
//! Oracles expose item definitions, dialogue scripts and spatial queries. The
//! [`Env`] aggregate bundles them with the active [`GameConfig`] so the engine
//! can reach everything it needs without hard coupling to concrete
//! implementations.
mod enemies;
mod items;
mod spatial;

pub use enemies::{EnemyRoster, EnemyTemplate};
pub use items::{
    EquipSlotHint, ItemBehavior, ItemCatalog, ItemCategory, ItemDefinition, ItemKindId,
    ItemOracle, ItemStats, StackRule, WeaponStats,
};
pub use spatial::{ScanQuery, SpatialQuery, Sphere};

use crate::config::GameConfig;
use crate::dialogue::DialogueOracle;

/// Aggregates read-only oracles required by the engine and action pipeline.
pub struct Env<'a, I, S, D>
where
    I: ItemOracle + ?Sized,
    S: SpatialQuery + ?Sized,
    D: DialogueOracle + ?Sized,
{
    config: &'a GameConfig,
    items: &'a I,
    spatial: &'a S,
    dialogue: &'a D,
}

impl<I, S, D> Clone for Env<'_, I, S, D>
where
    I: ItemOracle + ?Sized,
    S: SpatialQuery + ?Sized,
    D: DialogueOracle + ?Sized,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<I, S, D> Copy for Env<'_, I, S, D>
where
    I: ItemOracle + ?Sized,
    S: SpatialQuery + ?Sized,
    D: DialogueOracle + ?Sized,
{
}

pub type GameEnv<'a> =
    Env<'a, dyn ItemOracle + 'a, dyn SpatialQuery + 'a, dyn DialogueOracle + 'a>;

impl<'a, I, S, D> Env<'a, I, S, D>
where
    I: ItemOracle + ?Sized,
    S: SpatialQuery + ?Sized,
    D: DialogueOracle + ?Sized,
{
    pub fn new(config: &'a GameConfig, items: &'a I, spatial: &'a S, dialogue: &'a D) -> Self {
        Self {
            config,
            items,
            spatial,
            dialogue,
        }
    }

    pub fn config(&self) -> &'a GameConfig {
        self.config
    }

    pub fn items(&self) -> &'a I {
        self.items
    }

    pub fn spatial(&self) -> &'a S {
        self.spatial
    }

    pub fn dialogue(&self) -> &'a D {
        self.dialogue
    }
}

impl<'a> GameEnv<'a> {
    /// Erases concrete oracle types.
    pub fn with_oracles(
        config: &'a GameConfig,
        items: &'a dyn ItemOracle,
        spatial: &'a dyn SpatialQuery,
        dialogue: &'a dyn DialogueOracle,
    ) -> Self {
        Env::new(config, items, spatial, dialogue)
    }
}
