//! Player actions.
//!
//! Discrete actions (attack, roll, interact, inventory commands, dialogue
//! input) implement [`ActionTransition`] and run through the engine's
//! three-phase pipeline. Continuous locomotion is applied once per tick by
//! the free functions in [`movement`].
pub mod combat;
pub mod error;
pub mod interact;
pub mod inventory;
pub mod movement;
mod transition;

pub use combat::{AttackAction, AttackOutcome, HitRecord, attack_sphere};
pub use error::ActionError;
pub use interact::{InteractAction, InteractError, InteractOutcome, nearest_interactable};
pub use inventory::{InventoryAction, InventoryOutcome, refresh_weapon};
pub use movement::{
    CameraBasis, RollAction, advance_player, regenerate_stamina, rotate_player, tick_timers,
};
pub use transition::ActionTransition;

use glam::{Vec2, Vec3};

use crate::dialogue::{DialogueAction, DialogueProgress};
use crate::inventory::Hotkey;

/// Raw player input for one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct InputFrame {
    /// Stick input, x to the right and y forward.
    pub movement: Vec2,
    pub camera: CameraBasis,
    pub attack: bool,
    pub roll: bool,
    pub interact: bool,
    pub quick_use: Option<Hotkey>,
    /// Index of the dialogue choice picked this frame.
    pub choice: Option<usize>,
}

impl InputFrame {
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn moving(movement: Vec2) -> Self {
        Self {
            movement,
            ..Self::default()
        }
    }
}

/// A discrete action submitted to the engine.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    Attack,
    Roll { direction: Vec3 },
    Interact,
    Inventory(InventoryAction),
    Dialogue(DialogueAction),
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Attack => "attack",
            Self::Roll { .. } => "roll",
            Self::Interact => "interact",
            Self::Inventory(action) => action.name(),
            Self::Dialogue(action) => action.name(),
        }
    }
}

/// Action-specific result returned by the engine.
#[derive(Clone, Debug, PartialEq)]
pub enum ActionResult {
    Attack(AttackOutcome),
    Roll { direction: Vec3 },
    Interact(InteractOutcome),
    Inventory(InventoryOutcome),
    Dialogue(DialogueProgress),
}
