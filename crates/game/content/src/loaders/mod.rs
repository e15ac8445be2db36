//! Content loaders for reading game data from files.
//!
//! Each loader parses one file format into the core types the runtime
//! oracles serve. Parse and validation failures carry the offending path.

pub mod config;
pub mod dialogue;
pub mod enemy;
pub mod factory;
pub mod item;
pub mod scene;

pub use config::ConfigLoader;
pub use dialogue::DialogueLoader;
pub use enemy::EnemyLoader;
pub use factory::ContentFactory;
pub use item::ItemLoader;
pub use scene::{Placement, PlacementKind, Scatter, SceneLayout, SceneLoader};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}

/// Directory holding the content shipped with this crate.
#[cfg(test)]
pub(crate) fn shipped_data_dir() -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("data")
}
