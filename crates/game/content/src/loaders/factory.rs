//! Content factory for loading every content file from one data directory.

use std::path::{Path, PathBuf};

use folktale_core::{DialogueLibrary, EnemyRoster, GameConfig, ItemCatalog};

use crate::loaders::{
    ConfigLoader, DialogueLoader, EnemyLoader, ItemLoader, LoadResult, SceneLayout, SceneLoader,
};

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── items.ron
/// ├── enemies.ron
/// ├── dialogue.ron
/// └── scenes/
///     └── test.ron
/// ```
#[derive(Clone, Debug)]
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load game configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        ConfigLoader::load(&self.data_dir.join("config.toml"))
    }

    /// Load the item catalog from `items.ron`.
    pub fn load_items(&self) -> LoadResult<ItemCatalog> {
        ItemLoader::load(&self.data_dir.join("items.ron"))
    }

    /// Load enemy templates from `enemies.ron`.
    pub fn load_enemies(&self) -> LoadResult<EnemyRoster> {
        EnemyLoader::load(&self.data_dir.join("enemies.ron"))
    }

    /// Load dialogue scripts from `dialogue.ron`.
    pub fn load_dialogue(&self) -> LoadResult<DialogueLibrary> {
        DialogueLoader::load(&self.data_dir.join("dialogue.ron"))
    }

    /// Load a scene from `scenes/{name}.ron`.
    pub fn load_scene(&self, name: &str) -> LoadResult<SceneLayout> {
        let path = self.data_dir.join("scenes").join(format!("{}.ron", name));
        SceneLoader::load(&path)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loaders::shipped_data_dir;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn missing_scene_names_the_path() {
        let factory = ContentFactory::new(shipped_data_dir());
        let err = factory.load_scene("nowhere").unwrap_err();
        assert!(err.to_string().contains("nowhere.ron"));
    }

    #[test]
    fn shipped_content_loads() {
        let factory = ContentFactory::new(shipped_data_dir());
        factory.load_config().unwrap();
        assert!(!factory.load_items().unwrap().is_empty());
        assert!(!factory.load_enemies().unwrap().is_empty());
        assert!(!factory.load_dialogue().unwrap().is_empty());
        factory.load_scene("test").unwrap();
    }
}
