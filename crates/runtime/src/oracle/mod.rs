//! Runtime wrapper around static game content.
//!
//! [`OracleManager`] bundles the loaded config, item catalog, enemy roster,
//! dialogue library and spatial query behind `Arc`s so the runtime can build
//! [`folktale_core::GameEnv`] views on demand. The data is immutable at
//! runtime; dynamic state lives in the simulation worker and repositories.
use std::sync::Arc;

use folktale_content::ContentFactory;
use folktale_core::{
    DialogueLibrary, EnemyRoster, GameConfig, GameEnv, ItemCatalog, ScanQuery, SpatialQuery,
};

/// Manages all oracle implementations and provides unified access
#[derive(Clone)]
pub struct OracleManager {
    config: Arc<GameConfig>,
    items: Arc<ItemCatalog>,
    enemies: Arc<EnemyRoster>,
    dialogue: Arc<DialogueLibrary>,
    spatial: Arc<dyn SpatialQuery>,
}

impl OracleManager {
    /// Creates a new oracle manager using the linear-scan spatial query.
    pub fn new(
        config: GameConfig,
        items: ItemCatalog,
        enemies: EnemyRoster,
        dialogue: DialogueLibrary,
    ) -> Self {
        Self {
            config: Arc::new(config),
            items: Arc::new(items),
            enemies: Arc::new(enemies),
            dialogue: Arc::new(dialogue),
            spatial: Arc::new(ScanQuery),
        }
    }

    /// Loads every content file the runtime needs from a data directory.
    pub fn from_content(factory: &ContentFactory) -> folktale_content::LoadResult<Self> {
        let config = factory.load_config()?;
        let items = factory.load_items()?;
        let enemies = factory.load_enemies()?;
        let dialogue = factory.load_dialogue()?;

        tracing::info!(
            data_dir = %factory.data_dir().display(),
            items = items.len(),
            enemies = enemies.len(),
            scripts = dialogue.len(),
            "Loaded content"
        );

        Ok(Self::new(config, items, enemies, dialogue))
    }

    /// Replaces the spatial query service.
    pub fn with_spatial(mut self, spatial: Arc<dyn SpatialQuery>) -> Self {
        self.spatial = spatial;
        self
    }

    /// Converts oracle manager into GameEnv for folktale-core
    pub fn as_game_env(&self) -> GameEnv<'_> {
        GameEnv::with_oracles(
            self.config.as_ref(),
            self.items.as_ref(),
            self.spatial.as_ref(),
            self.dialogue.as_ref(),
        )
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn items(&self) -> &ItemCatalog {
        &self.items
    }

    pub fn enemies(&self) -> &EnemyRoster {
        &self.enemies
    }

    pub fn dialogue(&self) -> &DialogueLibrary {
        &self.dialogue
    }
}
