//! Scenario system for entity placement and game initialization.
//!
//! A scenario turns a [`SceneLayout`] into a fresh [`GameState`]: the player
//! spawns, hand-placed entities are resolved against the loaded content and
//! scatter groups are dropped with a seeded RNG so the same seed always
//! produces the same world.

use std::path::Path;

use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use folktale_content::{PlacementKind, SceneLayout, SceneLoader};
use folktale_core::{DialogueOracle, EnemyTemplate, GameState, ItemOracle, ItemStack, PropKind};

use crate::api::{Result, RuntimeError};
use crate::oracle::OracleManager;

#[derive(Clone, Debug, PartialEq)]
pub struct Scenario {
    layout: SceneLayout,
}

impl Scenario {
    pub fn new(layout: SceneLayout) -> Self {
        Self { layout }
    }

    /// Load a scene layout from a RON file.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let layout =
            SceneLoader::load(path).map_err(|e| RuntimeError::InvalidScene(e.to_string()))?;
        Ok(Self::new(layout))
    }

    pub fn layout(&self) -> &SceneLayout {
        &self.layout
    }

    /// Initialize a GameState from this scenario.
    ///
    /// Every template, item kind and dialogue id must exist in `oracles`, and
    /// every placement must lie inside the arena.
    pub fn create_initial_state(&self, oracles: &OracleManager) -> Result<GameState> {
        let layout = &self.layout;
        let config = oracles.config();
        let mut state = GameState::new(config, layout.spawn);
        let arena = state.arena;

        let seed = layout.seed.unwrap_or_else(rand::random);
        tracing::info!(
            "Creating initial state from scene '{}' with {} placements (seed {})",
            layout.name,
            layout.placements.len(),
            seed
        );

        if !arena.contains(layout.spawn) {
            return Err(self.invalid(format!("spawn {} lies outside the arena", layout.spawn)));
        }

        let mut lanterns = Vec::new();
        for placement in &layout.placements {
            let position = placement.position;
            if !arena.contains(position) {
                return Err(
                    self.invalid(format!("placement at {} lies outside the arena", position))
                );
            }

            match &placement.kind {
                PlacementKind::Enemy { template } => {
                    let template = self.template(oracles, template)?;
                    state.spawn_enemy(template, position);
                }
                PlacementKind::Item { kind, quantity } => {
                    let definition = oracles
                        .items()
                        .definition(*kind)
                        .ok_or_else(|| self.invalid(format!("unknown item {}", kind)))?;
                    if *quantity > definition.max_stack() {
                        return Err(self.invalid(format!(
                            "{} placed {} times but stacks to {}",
                            definition.name,
                            quantity,
                            definition.max_stack()
                        )));
                    }
                    state.spawn_item(ItemStack::new(*kind, *quantity), position);
                }
                PlacementKind::Lantern {
                    lantern_id,
                    save_point,
                } => {
                    if lanterns.contains(lantern_id) {
                        return Err(self.invalid(format!("lantern {} placed twice", lantern_id)));
                    }
                    lanterns.push(*lantern_id);
                    state.spawn_prop(
                        PropKind::Lantern {
                            lantern_id: *lantern_id,
                            lit: false,
                            save_point: *save_point,
                        },
                        position,
                    );
                }
                PlacementKind::Speaker { name, dialogue } => {
                    if oracles.dialogue().script(dialogue).is_none() {
                        return Err(self.invalid(format!("unknown dialogue {}", dialogue)));
                    }
                    state.spawn_prop(
                        PropKind::Speaker {
                            name: name.clone(),
                            dialogue: dialogue.clone(),
                        },
                        position,
                    );
                }
            }
        }

        let mut rng = StdRng::seed_from_u64(seed);
        for scatter in &layout.scatter {
            let template = self.template(oracles, &scatter.template)?;
            let extent = scatter.half_extent.clamp(0.0, arena.half_extent);
            for _ in 0..scatter.count {
                let position = Vec3::new(
                    rng.gen_range(-extent..=extent),
                    0.0,
                    rng.gen_range(-extent..=extent),
                );
                state.spawn_enemy(template.clone(), position);
            }
            tracing::debug!(
                "Scattered {} x {} within {}",
                scatter.count,
                scatter.template,
                extent
            );
        }

        tracing::info!(
            "Scene '{}' ready: {} enemies, {} items, {} props",
            layout.name,
            state.enemies.len(),
            state.items.len(),
            state.props.len()
        );

        Ok(state)
    }

    fn template(&self, oracles: &OracleManager, name: &str) -> Result<EnemyTemplate> {
        oracles
            .enemies()
            .get(name)
            .cloned()
            .ok_or_else(|| self.invalid(format!("unknown enemy template {}", name)))
    }

    fn invalid(&self, reason: String) -> RuntimeError {
        RuntimeError::InvalidScene(format!("{}: {}", self.layout.name, reason))
    }
}

#[cfg(test)]
mod tests {
    use folktale_content::{Placement, Scatter};
    use folktale_core::{DialogueLibrary, EnemyRoster, GameConfig, ItemCatalog, ItemKindId};

    use super::*;

    fn oracles() -> OracleManager {
        OracleManager::new(
            GameConfig::default(),
            ItemCatalog::starter(),
            EnemyRoster::from_templates([EnemyTemplate::critter()]),
            DialogueLibrary::new(),
        )
    }

    fn layout(placements: Vec<Placement>, scatter: Vec<Scatter>) -> SceneLayout {
        SceneLayout {
            name: "unit".to_string(),
            spawn: Vec3::new(0.0, 1.0, 0.0),
            seed: Some(42),
            placements,
            scatter,
        }
    }

    #[test]
    fn scatter_is_deterministic_for_a_seed() {
        let scatter = vec![Scatter {
            template: "Critter".to_string(),
            count: 3,
            half_extent: 5.0,
        }];
        let scenario = Scenario::new(layout(Vec::new(), scatter));

        let a = scenario.create_initial_state(&oracles()).unwrap();
        let b = scenario.create_initial_state(&oracles()).unwrap();
        assert_eq!(a.enemies.len(), 3);
        assert_eq!(a, b);
        for enemy in &a.enemies {
            assert!(enemy.position.x.abs() <= 5.0 && enemy.position.z.abs() <= 5.0);
        }
        assert_eq!(a.player.position, Vec3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn unknown_template_is_rejected() {
        let placements = vec![Placement {
            position: Vec3::X,
            kind: PlacementKind::Enemy {
                template: "Dragon".to_string(),
            },
        }];
        let err = Scenario::new(layout(placements, Vec::new()))
            .create_initial_state(&oracles())
            .unwrap_err();
        assert!(matches!(err, RuntimeError::InvalidScene(reason) if reason.contains("Dragon")));
    }

    #[test]
    fn unknown_dialogue_is_rejected() {
        let placements = vec![Placement {
            position: Vec3::X,
            kind: PlacementKind::Speaker {
                name: "Elder".to_string(),
                dialogue: "missing".into(),
            },
        }];
        let err = Scenario::new(layout(placements, Vec::new()))
            .create_initial_state(&oracles())
            .unwrap_err();
        assert!(matches!(err, RuntimeError::InvalidScene(_)));
    }

    #[test]
    fn placements_outside_the_arena_are_rejected() {
        let placements = vec![Placement {
            position: Vec3::new(50.0, 0.0, 0.0),
            kind: PlacementKind::Item {
                kind: ItemKindId(1),
                quantity: 1,
            },
        }];
        let err = Scenario::new(layout(placements, Vec::new()))
            .create_initial_state(&oracles())
            .unwrap_err();
        assert!(matches!(err, RuntimeError::InvalidScene(_)));
    }

    #[test]
    fn placements_become_entities() {
        let placements = vec![
            Placement {
                position: Vec3::new(2.0, 0.0, 2.0),
                kind: PlacementKind::Lantern {
                    lantern_id: 1,
                    save_point: true,
                },
            },
            Placement {
                position: Vec3::new(1.0, 0.0, 0.0),
                kind: PlacementKind::Item {
                    kind: ItemCatalog::HEALING_BERRY,
                    quantity: 3,
                },
            },
        ];
        let state = Scenario::new(layout(placements, Vec::new()))
            .create_initial_state(&oracles())
            .unwrap();
        assert_eq!(state.props.len(), 1);
        assert_eq!(state.items[0].stack, ItemStack::new(ItemCatalog::HEALING_BERRY, 3));
        assert!(!state.is_lantern_lit(1));
    }
}
