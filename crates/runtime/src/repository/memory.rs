//! In-memory SaveRepository implementation for tests and local runs.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::repository::{
    RepositoryError, Result, SaveGame, SaveMetadata, SaveRepository, validate_slot,
};

/// In-memory implementation of SaveRepository.
pub struct InMemorySaveRepository {
    saves: RwLock<HashMap<String, (SaveGame, SaveMetadata)>>,
}

impl InMemorySaveRepository {
    /// Create a new empty in-memory repository.
    pub fn new() -> Self {
        Self {
            saves: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemorySaveRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl SaveRepository for InMemorySaveRepository {
    fn save(&self, slot: &str, save: &SaveGame) -> Result<SaveMetadata> {
        validate_slot(slot)?;
        let payload = save.encode()?;
        let metadata = SaveMetadata::describe(slot, save, &payload);

        let mut saves = self
            .saves
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        saves.insert(slot.to_string(), (save.clone(), metadata.clone()));
        Ok(metadata)
    }

    fn load(&self, slot: &str) -> Result<Option<SaveGame>> {
        let saves = self
            .saves
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(saves.get(slot).map(|(save, _)| save.clone()))
    }

    fn metadata(&self, slot: &str) -> Result<Option<SaveMetadata>> {
        let saves = self
            .saves
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(saves.get(slot).map(|(_, metadata)| metadata.clone()))
    }

    fn exists(&self, slot: &str) -> bool {
        self.saves
            .read()
            .map(|saves| saves.contains_key(slot))
            .unwrap_or(false)
    }

    fn delete(&self, slot: &str) -> Result<()> {
        let mut saves = self
            .saves
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        saves.remove(slot);
        Ok(())
    }

    fn list_slots(&self) -> Result<Vec<String>> {
        let saves = self
            .saves
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        let mut slots: Vec<String> = saves.keys().cloned().collect();
        slots.sort_unstable();
        Ok(slots)
    }
}

#[cfg(test)]
mod tests {
    use folktale_core::{GameConfig, GameState, Tick};
    use glam::Vec3;

    use super::*;

    #[test]
    fn test_overwrite_keeps_latest() {
        let repo = InMemorySaveRepository::new();
        let mut state = GameState::new(&GameConfig::default(), Vec3::ZERO);

        repo.save("autosave", &SaveGame::capture(&state, None)).unwrap();
        state.tick = Tick(9);
        repo.save("autosave", &SaveGame::capture(&state, Some(3))).unwrap();

        assert_eq!(repo.load("autosave").unwrap().unwrap().tick, Tick(9));
        let metadata = repo.metadata("autosave").unwrap().unwrap();
        assert_eq!(metadata.lantern_id, Some(3));
        assert_eq!(repo.list_slots().unwrap(), vec!["autosave"]);
    }

    #[test]
    fn test_delete() {
        let repo = InMemorySaveRepository::new();
        let state = GameState::new(&GameConfig::default(), Vec3::ZERO);
        repo.save("a", &SaveGame::capture(&state, None)).unwrap();

        repo.delete("a").unwrap();
        assert!(!repo.exists("a"));
        assert!(repo.load("a").unwrap().is_none());
    }
}
