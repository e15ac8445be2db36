//! Repository contract for saving and loading play sessions.

use crate::repository::{Result, SaveGame, SaveMetadata};

/// Stores [`SaveGame`]s under named slots.
///
/// Saving to an occupied slot replaces it.
pub trait SaveRepository: Send + Sync {
    fn save(&self, slot: &str, save: &SaveGame) -> Result<SaveMetadata>;

    fn load(&self, slot: &str) -> Result<Option<SaveGame>>;

    fn metadata(&self, slot: &str) -> Result<Option<SaveMetadata>>;

    fn exists(&self, slot: &str) -> bool;

    fn delete(&self, slot: &str) -> Result<()>;

    /// All occupied slots, sorted by name.
    fn list_slots(&self) -> Result<Vec<String>>;
}
