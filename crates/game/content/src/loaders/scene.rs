//! Scene layout loader.
//!
//! A scene lists the player spawn, hand-placed entities and random scatter
//! groups. Names inside a layout (enemy templates, item kinds, dialogue ids)
//! are resolved later against the loaded content when the scene is built.

use std::path::Path;

use folktale_core::{DialogueId, ItemKindId};
use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneLayout {
    pub name: String,
    pub spawn: Vec3,
    /// Seed for scatter placement. `None` lets the builder pick one.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub placements: Vec<Placement>,
    #[serde(default)]
    pub scatter: Vec<Scatter>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub position: Vec3,
    pub kind: PlacementKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlacementKind {
    Enemy {
        template: String,
    },
    Item {
        kind: ItemKindId,
        quantity: u16,
    },
    Lantern {
        lantern_id: u32,
        #[serde(default)]
        save_point: bool,
    },
    Speaker {
        name: String,
        dialogue: DialogueId,
    },
}

/// `count` enemies of `template` dropped uniformly inside a square of
/// `half_extent` around the origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scatter {
    pub template: String,
    pub count: u32,
    pub half_extent: f32,
}

/// Loader for scene layouts from RON files.
pub struct SceneLoader;

impl SceneLoader {
    pub fn load(path: &Path) -> LoadResult<SceneLayout> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to load scene {}: {}", path.display(), e))
    }

    pub fn parse(content: &str) -> LoadResult<SceneLayout> {
        let scene: SceneLayout = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse scene RON: {}", e))?;

        for placement in &scene.placements {
            if let PlacementKind::Item { kind, quantity: 0 } = placement.kind {
                anyhow::bail!("Scene {} places {} with zero quantity", scene.name, kind);
            }
        }
        for scatter in &scene.scatter {
            if !(scatter.half_extent.is_finite() && scatter.half_extent > 0.0) {
                anyhow::bail!(
                    "Scene {} scatters {} over a non-positive area",
                    scene.name,
                    scatter.template
                );
            }
        }

        Ok(scene)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loaders::shipped_data_dir;

    #[test]
    fn shipped_test_scene_parses() {
        let scene = SceneLoader::load(&shipped_data_dir().join("scenes/test.ron")).unwrap();
        assert_eq!(scene.name, "test");
        assert_eq!(scene.spawn, Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(
            scene.scatter,
            vec![Scatter {
                template: "Critter".to_string(),
                count: 3,
                half_extent: 5.0
            }]
        );
        assert!(scene.placements.iter().any(|p| matches!(
            p.kind,
            PlacementKind::Lantern {
                save_point: true,
                ..
            }
        )));
    }

    #[test]
    fn zero_quantity_item_is_rejected() {
        let err = SceneLoader::parse(
            r#"(
                name: "bad",
                spawn: (0.0, 0.0, 0.0),
                placements: [(position: (1.0, 0.0, 1.0), kind: Item(kind: 1, quantity: 0))],
            )"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("zero quantity"));
    }
}
