//! File-based SaveRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use crate::repository::{
    RepositoryError, Result, SaveGame, SaveMetadata, SaveRepository, validate_slot,
};

const DIGEST_LEN: usize = 32;
const SAVE_EXTENSION: &str = "sav";
const META_SUFFIX: &str = ".meta.json";

/// File-based implementation of SaveRepository.
///
/// # File Format
///
/// Each slot owns two files in the base directory:
/// - `<slot>.sav`: the SHA-256 digest of the payload (32 bytes) followed by
///   the bincode-encoded [`SaveGame`]
/// - `<slot>.meta.json`: the [`SaveMetadata`] as pretty JSON
///
/// Both are written to a temp file first and renamed into place. A save whose
/// digest does not match its payload is reported as corrupted.
pub struct FileSaveRepository {
    base_dir: PathBuf,
}

impl FileSaveRepository {
    /// Create a new file-based save repository.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir).map_err(RepositoryError::Io)?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Get the path to a save file.
    pub fn save_path(&self, slot: &str) -> PathBuf {
        self.base_dir.join(format!("{}.{}", slot, SAVE_EXTENSION))
    }

    fn meta_path(&self, slot: &str) -> PathBuf {
        self.base_dir.join(format!("{}{}", slot, META_SUFFIX))
    }

    fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, bytes).map_err(RepositoryError::Io)?;
        fs::rename(&temp_path, path).map_err(RepositoryError::Io)?;
        Ok(())
    }
}

impl SaveRepository for FileSaveRepository {
    fn save(&self, slot: &str, save: &SaveGame) -> Result<SaveMetadata> {
        validate_slot(slot)?;
        let payload = save.encode()?;
        let metadata = SaveMetadata::describe(slot, save, &payload);

        let mut bytes = Vec::with_capacity(DIGEST_LEN + payload.len());
        bytes.extend_from_slice(&Sha256::digest(&payload));
        bytes.extend_from_slice(&payload);

        let path = self.save_path(slot);
        Self::write_atomic(&path, &bytes)?;

        let json = serde_json::to_vec_pretty(&metadata)
            .map_err(|e| RepositoryError::Json(e.to_string()))?;
        Self::write_atomic(&self.meta_path(slot), &json)?;

        tracing::debug!("Saved slot[{}] at tick {} to {}", slot, save.tick, path.display());

        Ok(metadata)
    }

    fn load(&self, slot: &str) -> Result<Option<SaveGame>> {
        validate_slot(slot)?;
        let path = self.save_path(slot);

        if !path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&path).map_err(RepositoryError::Io)?;
        if bytes.len() < DIGEST_LEN {
            return Err(RepositoryError::CorruptedData(format!(
                "{} is truncated ({} bytes)",
                path.display(),
                bytes.len()
            )));
        }
        let (digest, payload) = bytes.split_at(DIGEST_LEN);
        if Sha256::digest(payload).as_slice() != digest {
            return Err(RepositoryError::CorruptedData(format!(
                "{} failed its digest check",
                path.display()
            )));
        }
        let save = SaveGame::decode(payload)?;

        tracing::debug!("Loaded slot[{}] from {}", slot, path.display());

        Ok(Some(save))
    }

    fn metadata(&self, slot: &str) -> Result<Option<SaveMetadata>> {
        validate_slot(slot)?;
        let path = self.meta_path(slot);

        if !path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&path).map_err(RepositoryError::Io)?;
        let metadata =
            serde_json::from_slice(&bytes).map_err(|e| RepositoryError::Json(e.to_string()))?;
        Ok(Some(metadata))
    }

    fn exists(&self, slot: &str) -> bool {
        validate_slot(slot).is_ok() && self.save_path(slot).exists()
    }

    fn delete(&self, slot: &str) -> Result<()> {
        validate_slot(slot)?;
        for path in [self.save_path(slot), self.meta_path(slot)] {
            if path.exists() {
                fs::remove_file(&path).map_err(RepositoryError::Io)?;
            }
        }
        tracing::debug!("Deleted slot[{}]", slot);

        Ok(())
    }

    fn list_slots(&self) -> Result<Vec<String>> {
        let mut slots = Vec::new();

        let entries = fs::read_dir(&self.base_dir).map_err(RepositoryError::Io)?;

        for entry in entries {
            let entry = entry.map_err(RepositoryError::Io)?;
            let path = entry.path();

            if path.extension().and_then(|s| s.to_str()) == Some(SAVE_EXTENSION)
                && let Some(slot) = path.file_stem().and_then(|s| s.to_str())
            {
                slots.push(slot.to_string());
            }
        }

        slots.sort_unstable();
        Ok(slots)
    }
}

#[cfg(test)]
mod tests {
    use folktale_core::{GameConfig, GameState, Tick};
    use glam::Vec3;
    use tempfile::TempDir;

    use super::*;

    fn setup() -> (TempDir, FileSaveRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = FileSaveRepository::new(temp_dir.path()).unwrap();
        (temp_dir, repo)
    }

    fn sample_save(tick: u64) -> SaveGame {
        let mut state = GameState::new(&GameConfig::default(), Vec3::new(1.0, 0.0, 2.0));
        state.tick = Tick(tick);
        state.player.health.damage(10);
        SaveGame::capture(&state, Some(1))
    }

    #[test]
    fn test_save_and_load() {
        let (_temp, repo) = setup();
        let save = sample_save(42);

        let metadata = repo.save("slot1", &save).unwrap();
        assert_eq!(metadata.slot, "slot1");
        assert_eq!(metadata.tick, Tick(42));
        assert_eq!(metadata.lantern_id, Some(1));
        assert_eq!(metadata.digest.len(), 64);

        let loaded = repo.load("slot1").unwrap().unwrap();
        assert_eq!(loaded, save);
        assert_eq!(repo.metadata("slot1").unwrap(), Some(metadata));
        assert!(!repo.base_dir().join("slot1.tmp").exists());
    }

    #[test]
    fn test_missing_slot() {
        let (_temp, repo) = setup();
        assert!(repo.load("nothing").unwrap().is_none());
        assert!(repo.metadata("nothing").unwrap().is_none());
        assert!(!repo.exists("nothing"));
    }

    #[test]
    fn test_tampered_save_is_rejected() {
        let (_temp, repo) = setup();
        repo.save("slot1", &sample_save(7)).unwrap();

        let path = repo.save_path("slot1");
        let mut bytes = fs::read(&path).unwrap();
        let last = bytes.len() - 1;
        bytes[last] ^= 0xFF;
        fs::write(&path, bytes).unwrap();

        let err = repo.load("slot1").unwrap_err();
        assert!(matches!(err, RepositoryError::CorruptedData(_)));
    }

    #[test]
    fn test_truncated_save_is_rejected() {
        let (_temp, repo) = setup();
        fs::write(repo.save_path("short"), [0u8; 4]).unwrap();

        let err = repo.load("short").unwrap_err();
        assert!(matches!(err, RepositoryError::CorruptedData(_)));
    }

    #[test]
    fn test_list_and_delete() {
        let (_temp, repo) = setup();
        repo.save("beta", &sample_save(2)).unwrap();
        repo.save("alpha", &sample_save(1)).unwrap();

        assert_eq!(repo.list_slots().unwrap(), vec!["alpha", "beta"]);

        repo.delete("alpha").unwrap();
        assert!(!repo.exists("alpha"));
        assert!(repo.metadata("alpha").unwrap().is_none());
        assert_eq!(repo.list_slots().unwrap(), vec!["beta"]);
    }

    #[test]
    fn test_invalid_slot_names() {
        let (_temp, repo) = setup();
        for slot in ["", "../escape", "a b", "dir/slot"] {
            let err = repo.save(slot, &sample_save(1)).unwrap_err();
            assert!(matches!(err, RepositoryError::InvalidSlot(_)));
        }
    }
}
