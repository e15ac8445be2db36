//! Game configuration loader.

use std::path::Path;

use folktale_core::GameConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for game configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load and validate a [`GameConfig`] from a TOML file.
    ///
    /// Sections and fields missing from the file keep their defaults.
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to load config {}: {}", path.display(), e))
    }

    pub fn parse(content: &str) -> LoadResult<GameConfig> {
        let config: GameConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;
        config
            .validate()
            .map_err(|e| anyhow::anyhow!("Invalid config: {}", e))?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use folktale_core::AddPolicy;

    use super::*;
    use crate::loaders::shipped_data_dir;

    #[test]
    fn shipped_config_matches_defaults() {
        let config = ConfigLoader::load(&shipped_data_dir().join("config.toml")).unwrap();
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let config = ConfigLoader::parse(
            r#"
            [inventory]
            slots = 2
            add_policy = "first_slot"
            "#,
        )
        .unwrap();
        assert_eq!(config.inventory.slots, 2);
        assert_eq!(config.inventory.add_policy, AddPolicy::FirstSlot);
        assert_eq!(config.attack, GameConfig::default().attack);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let err = ConfigLoader::parse("[inventory]\nslots = 0\n").unwrap_err();
        assert!(err.to_string().contains("inventory.slots"));

        let err = ConfigLoader::parse("[roll]\nduration = -1.0\n").unwrap_err();
        assert!(err.to_string().contains("roll.duration"));
    }
}
