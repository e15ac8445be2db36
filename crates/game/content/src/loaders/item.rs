//! Item catalog loader.

use std::path::Path;

use folktale_core::{ItemCatalog, ItemDefinition};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Item catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ItemCatalogRon {
    items: Vec<ItemDefinition>,
}

/// Loader for the item catalog from RON files.
pub struct ItemLoader;

impl ItemLoader {
    /// Load the item catalog from a RON file.
    ///
    /// Two definitions sharing an id are rejected.
    pub fn load(path: &Path) -> LoadResult<ItemCatalog> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to load items {}: {}", path.display(), e))
    }

    pub fn parse(content: &str) -> LoadResult<ItemCatalog> {
        let data: ItemCatalogRon = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse item catalog RON: {}", e))?;

        let mut catalog = ItemCatalog::new();
        for definition in data.items {
            let id = definition.id;
            if definition.name.trim().is_empty() {
                anyhow::bail!("Item {} has an empty name", id);
            }
            if catalog.insert(definition).is_some() {
                anyhow::bail!("Duplicate item id {}", id);
            }
        }

        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use folktale_core::{ItemCategory, ItemKindId, WeaponStats};

    use super::*;
    use crate::loaders::shipped_data_dir;

    #[test]
    fn shipped_catalog_contains_the_starter_items() {
        let catalog = ItemLoader::load(&shipped_data_dir().join("items.ron")).unwrap();
        let starter = ItemCatalog::starter();

        for kind in [ItemCatalog::HEALING_BERRY, ItemCatalog::WOODEN_STICK] {
            assert_eq!(catalog.get(kind), starter.get(kind));
        }
        let berry = catalog.get(ItemCatalog::HEALING_BERRY).unwrap();
        assert_eq!(berry.max_stack(), 10);
        assert_eq!(berry.consumable_heal(), Some(25));

        let stick = catalog.get(ItemCatalog::WOODEN_STICK).unwrap();
        assert_eq!(stick.category, ItemCategory::Weapon);
        assert_eq!(
            stick.weapon_stats(),
            Some(WeaponStats {
                damage: 15,
                range: 2.0,
                speed: 1.2
            })
        );
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = ItemLoader::parse(
            r#"(items: [
                (id: 7, name: "Pebble", category: Material),
                (id: 7, name: "Other Pebble", category: Material),
            ])"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("Duplicate item id"));
    }

    #[test]
    fn optional_fields_default() {
        let catalog = ItemLoader::parse(r#"(items: [(id: 7, name: "Pebble", category: Material)])"#)
            .unwrap();
        let pebble = catalog.get(ItemKindId(7)).unwrap();
        assert!(!pebble.is_stackable());
        assert!(pebble.behaviors.is_empty());
        assert_eq!(pebble.equipment_slot(), None);
    }
}
