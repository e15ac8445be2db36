//! Deterministic game rules for A Little Folk Tale.
//!
//! `folktale-core` defines the canonical simulation (player actions,
//! inventory, enemies, dialogue, world state) and exposes pure APIs that the
//! runtime and offline tools reuse. All state mutation flows through
//! [`engine::GameEngine`]; presentation collaborators only ever see the
//! [`cue::Cue`] values it returns.
pub mod action;
pub mod config;
pub mod cue;
pub mod dialogue;
pub mod engine;
pub mod env;
pub mod error;
pub mod inventory;
pub mod npc;
pub mod state;
pub mod view;

pub use action::{
    Action, ActionError, ActionResult, ActionTransition, AttackAction, CameraBasis, InputFrame,
    InteractAction, InteractError, InteractOutcome, InventoryAction, InventoryOutcome, RollAction,
};
pub use config::{AddPolicy, ConfigError, GameConfig};
pub use cue::{AnimTrigger, Cue, CueBuffer, Effect, Sound};
pub use dialogue::{
    DialogueAction, DialogueChoice, DialogueCondition, DialogueCursor, DialogueError, DialogueId,
    DialogueLibrary, DialogueLine, DialogueOracle, DialogueProgress, DialogueScript,
};
pub use engine::{
    ExecuteError, ExecutionOutcome, GameEngine, Rejection, StepOutcome, TransitionPhase,
    TransitionPhaseError,
};
pub use env::{
    EnemyRoster, EnemyTemplate, Env, GameEnv, ItemBehavior, ItemCatalog, ItemCategory,
    ItemDefinition, ItemKindId, ItemOracle, ScanQuery, SpatialQuery, Sphere, WeaponStats,
};
pub use error::{ErrorSeverity, GameError};
pub use inventory::{
    EquipmentSlot, Hotkey, HotkeyBinding, InventoryError, InventorySlot, InventoryState, ItemStack,
};
pub use state::{EntityId, GameState, PlayerFlags, PlayerState, PropKind, Tick};
pub use view::HudSnapshot;
