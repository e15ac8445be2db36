//! Repository layer for save games.
//!
//! Repositories handle data that CHANGES during play. Static game content
//! (items, enemies, dialogue, scenes) is handled by oracles, not repositories.

mod error;
mod file;
mod memory;
mod save;
mod traits;

pub use error::{RepositoryError, Result};
pub use file::FileSaveRepository;
pub use memory::InMemorySaveRepository;
pub use save::{SaveGame, SaveMetadata};
pub use traits::SaveRepository;

/// Slot names become file stems, so only a safe subset is accepted.
pub(crate) fn validate_slot(slot: &str) -> Result<()> {
    let valid = !slot.is_empty()
        && slot
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(RepositoryError::InvalidSlot(slot.to_string()))
    }
}
