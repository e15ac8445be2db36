//! Interaction probe: pick up items, light lanterns, talk to speakers.

use glam::Vec3;

use crate::cue::{Cue, CueBuffer, Effect, Sound};
use crate::dialogue::{self, DialogueError, DialogueId};
use crate::env::{GameEnv, ItemKindId, Sphere};
use crate::error::{ErrorSeverity, GameError};
use crate::inventory::{InventoryError, ItemStack};
use crate::state::{EntityId, GameState, PropKind};

use super::ActionTransition;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InteractError {
    #[error("player is dead")]
    ActorDead,

    #[error("nothing to interact with in range")]
    NothingToInteract,

    #[error("interaction target {0} disappeared")]
    TargetMissing(EntityId),

    #[error(transparent)]
    Inventory(#[from] InventoryError),

    #[error(transparent)]
    Dialogue(#[from] DialogueError),
}

impl GameError for InteractError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::ActorDead => ErrorSeverity::Validation,
            Self::NothingToInteract => ErrorSeverity::Recoverable,
            Self::TargetMissing(_) => ErrorSeverity::Internal,
            Self::Inventory(error) => error.severity(),
            Self::Dialogue(error) => error.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::ActorDead => "ACTOR_DEAD",
            Self::NothingToInteract => "NOTHING_TO_INTERACT",
            Self::TargetMissing(_) => "INTERACT_TARGET_MISSING",
            Self::Inventory(error) => error.error_code(),
            Self::Dialogue(error) => error.error_code(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InteractOutcome {
    PickedUp {
        kind: ItemKindId,
        placed: u16,
        /// Units left lying on the ground.
        remainder: u16,
        discarded: u16,
    },
    LanternLit {
        lantern_id: u32,
        save_requested: bool,
    },
    LanternAlreadyLit {
        lantern_id: u32,
    },
    DialogueStarted {
        dialogue: DialogueId,
    },
}

/// Uses the nearest interactable within the interaction radius.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InteractAction;

/// Nearest ground item or prop around the player. Enemies are never targets.
pub fn nearest_interactable(state: &GameState, env: &GameEnv<'_>) -> Option<EntityId> {
    let sphere = Sphere::new(state.player.position, env.config().interaction.radius);
    env.spatial()
        .overlap_sphere(state, sphere)
        .into_iter()
        .find(|id| {
            state.items.iter().any(|item| item.id == *id)
                || state.props.iter().any(|prop| prop.id == *id)
        })
}

impl ActionTransition for InteractAction {
    type Error = InteractError;
    type Output = InteractOutcome;

    fn pre_validate(&self, state: &GameState, env: &GameEnv<'_>) -> Result<(), Self::Error> {
        if state.player.dead {
            return Err(InteractError::ActorDead);
        }
        nearest_interactable(state, env)
            .map(|_| ())
            .ok_or(InteractError::NothingToInteract)
    }

    fn apply(
        &self,
        state: &mut GameState,
        env: &GameEnv<'_>,
        cues: &mut CueBuffer,
    ) -> Result<Self::Output, Self::Error> {
        let target = nearest_interactable(state, env).ok_or(InteractError::NothingToInteract)?;

        let ground = state
            .items
            .iter()
            .find(|item| item.id == target)
            .map(|item| (item.stack, item.position));
        if let Some((stack, position)) = ground {
            return pick_up(state, env, cues, target, stack, position);
        }

        let prop = state
            .prop_mut(target)
            .ok_or(InteractError::TargetMissing(target))?;
        match &mut prop.kind {
            PropKind::Lantern {
                lantern_id,
                lit,
                save_point,
            } => {
                let lantern_id = *lantern_id;
                if *lit {
                    return Ok(InteractOutcome::LanternAlreadyLit { lantern_id });
                }
                *lit = true;
                cues.push(Cue::sound(Sound::LanternLight));
                cues.push(Cue::LanternLit { lantern_id });
                if *save_point {
                    cues.push(Cue::SaveRequested { lantern_id });
                }
                Ok(InteractOutcome::LanternLit {
                    lantern_id,
                    save_requested: *save_point,
                })
            }
            PropKind::Speaker { dialogue: id, .. } => {
                let id = id.clone();
                dialogue::start(state, env.dialogue(), &id, cues)?;
                Ok(InteractOutcome::DialogueStarted { dialogue: id })
            }
        }
    }
}

fn pick_up(
    state: &mut GameState,
    env: &GameEnv<'_>,
    cues: &mut CueBuffer,
    target: EntityId,
    stack: ItemStack,
    position: Vec3,
) -> Result<InteractOutcome, InteractError> {
    let policy = env.config().inventory.add_policy;
    let added = state.inventory.add_item(env.items(), stack, policy)?;

    if added.remainder > 0 {
        if let Some(item) = state.items.iter_mut().find(|item| item.id == target) {
            item.stack.quantity = added.remainder;
        }
    } else {
        state.take_item(target);
    }

    cues.push(Cue::sound(Sound::Pickup));
    cues.push(Cue::Effect {
        effect: Effect::Pickup,
        position,
    });
    cues.push(Cue::ItemPickedUp {
        kind: stack.kind,
        quantity: added.placed,
    });
    cues.push(Cue::InventoryChanged);

    Ok(InteractOutcome::PickedUp {
        kind: stack.kind,
        placed: added.placed,
        remainder: added.remainder,
        discarded: added.discarded,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AddPolicy, GameConfig};
    use crate::dialogue::{DialogueLibrary, DialogueLine, DialogueScript};
    use crate::env::{EnemyTemplate, ItemCatalog, ScanQuery};

    const BERRY: ItemKindId = ItemCatalog::HEALING_BERRY;

    fn interact(
        state: &mut GameState,
        env: &GameEnv<'_>,
    ) -> Result<(InteractOutcome, CueBuffer), InteractError> {
        let mut cues = CueBuffer::new();
        InteractAction.pre_validate(state, env)?;
        let outcome = InteractAction.apply(state, env, &mut cues)?;
        Ok((outcome, cues))
    }

    #[test]
    fn picks_up_nearest_item() {
        let config = GameConfig::default();
        let items = ItemCatalog::starter();
        let library = DialogueLibrary::new();
        let env = GameEnv::with_oracles(&config, &items, &ScanQuery, &library);
        let mut state = GameState::new(&config, Vec3::ZERO);
        let far = state.spawn_item(ItemStack::new(BERRY, 1), Vec3::new(1.8, 0.0, 0.0));
        state.spawn_item(ItemStack::new(BERRY, 2), Vec3::new(0.5, 0.0, 0.0));

        let (outcome, cues) = interact(&mut state, &env).unwrap();
        assert!(matches!(outcome, InteractOutcome::PickedUp { placed: 2, .. }));
        assert_eq!(state.items.len(), 1);
        assert_eq!(state.items[0].id, far);
        assert_eq!(state.inventory.count(BERRY), 2);
        assert!(cues.contains(&Cue::InventoryChanged));
    }

    #[test]
    fn remainder_stays_on_the_ground() {
        let mut config = GameConfig::default();
        config.inventory.slots = 1;
        let items = ItemCatalog::starter();
        let library = DialogueLibrary::new();
        let env = GameEnv::with_oracles(&config, &items, &ScanQuery, &library);
        let mut state = GameState::new(&config, Vec3::ZERO);
        state.spawn_item(ItemStack::new(BERRY, 14), Vec3::X);

        let (outcome, _) = interact(&mut state, &env).unwrap();
        assert_eq!(
            outcome,
            InteractOutcome::PickedUp {
                kind: BERRY,
                placed: 10,
                remainder: 4,
                discarded: 0
            }
        );
        assert_eq!(state.items[0].stack.quantity, 4);

        // Inventory now full: the item stays and the pickup is rejected.
        assert_eq!(
            interact(&mut state, &env),
            Err(InteractError::Inventory(InventoryError::InventoryFull { kind: BERRY }))
        );
        assert_eq!(state.items[0].stack.quantity, 4);
    }

    #[test]
    fn first_slot_policy_removes_the_ground_item() {
        let mut config = GameConfig::default();
        config.inventory.slots = 1;
        config.inventory.add_policy = AddPolicy::FirstSlot;
        let items = ItemCatalog::starter();
        let library = DialogueLibrary::new();
        let env = GameEnv::with_oracles(&config, &items, &ScanQuery, &library);
        let mut state = GameState::new(&config, Vec3::ZERO);
        state.spawn_item(ItemStack::new(BERRY, 14), Vec3::X);

        let (outcome, _) = interact(&mut state, &env).unwrap();
        assert!(matches!(
            outcome,
            InteractOutcome::PickedUp {
                discarded: 4,
                remainder: 0,
                ..
            }
        ));
        assert!(state.items.is_empty());
    }

    #[test]
    fn lighting_save_lantern_requests_one_save() {
        let config = GameConfig::default();
        let items = ItemCatalog::starter();
        let library = DialogueLibrary::new();
        let env = GameEnv::with_oracles(&config, &items, &ScanQuery, &library);
        let mut state = GameState::new(&config, Vec3::ZERO);
        state.spawn_prop(
            PropKind::Lantern {
                lantern_id: 3,
                lit: false,
                save_point: true,
            },
            Vec3::new(0.0, 0.0, 1.0),
        );

        let (outcome, cues) = interact(&mut state, &env).unwrap();
        assert_eq!(
            outcome,
            InteractOutcome::LanternLit {
                lantern_id: 3,
                save_requested: true
            }
        );
        assert!(cues.contains(&Cue::sound(Sound::LanternLight)));
        assert!(state.is_lantern_lit(3));

        let (again, cues) = interact(&mut state, &env).unwrap();
        assert_eq!(again, InteractOutcome::LanternAlreadyLit { lantern_id: 3 });
        assert!(!cues.contains(&Cue::SaveRequested { lantern_id: 3 }));
    }

    #[test]
    fn speaker_starts_dialogue() {
        let config = GameConfig::default();
        let items = ItemCatalog::starter();
        let mut library = DialogueLibrary::new();
        library.insert(DialogueScript::new(
            "greeting",
            vec![DialogueLine::new("Elder", "Welcome, little one.")],
        ));
        let env = GameEnv::with_oracles(&config, &items, &ScanQuery, &library);
        let mut state = GameState::new(&config, Vec3::ZERO);
        state.spawn_prop(
            PropKind::Speaker {
                name: "Elder".to_string(),
                dialogue: DialogueId::from("greeting"),
            },
            Vec3::X,
        );

        let (outcome, _) = interact(&mut state, &env).unwrap();
        assert_eq!(
            outcome,
            InteractOutcome::DialogueStarted {
                dialogue: DialogueId::from("greeting")
            }
        );
        assert!(state.is_paused());
    }

    #[test]
    fn enemies_are_not_interactable() {
        let config = GameConfig::default();
        let items = ItemCatalog::starter();
        let library = DialogueLibrary::new();
        let env = GameEnv::with_oracles(&config, &items, &ScanQuery, &library);
        let mut state = GameState::new(&config, Vec3::ZERO);
        state.spawn_enemy(EnemyTemplate::critter(), Vec3::X);
        assert_eq!(
            interact(&mut state, &env),
            Err(InteractError::NothingToInteract)
        );
    }
}
