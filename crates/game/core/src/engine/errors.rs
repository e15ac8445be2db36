//! Error types for the action execution pipeline.

use crate::action::{ActionTransition, AttackAction, InteractAction, InventoryAction, RollAction};
use crate::dialogue::DialogueAction;
use crate::error::{ErrorSeverity, GameError};

/// Identifies which stage of the transition pipeline produced an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransitionPhase {
    PreValidate,
    Apply,
    PostValidate,
}

impl TransitionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionPhase::PreValidate => "pre_validate",
            TransitionPhase::Apply => "apply",
            TransitionPhase::PostValidate => "post_validate",
        }
    }
}

/// Associates a transition phase with the underlying error.
#[derive(Clone, Debug, PartialEq)]
pub struct TransitionPhaseError<E> {
    pub phase: TransitionPhase,
    pub error: E,
}

impl<E> TransitionPhaseError<E> {
    pub fn new(phase: TransitionPhase, error: E) -> Self {
        Self { phase, error }
    }
}

impl<E: std::fmt::Display> std::fmt::Display for TransitionPhaseError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} failed: {}", self.phase.as_str(), self.error)
    }
}

impl<E: std::fmt::Display + std::fmt::Debug> std::error::Error for TransitionPhaseError<E> {}

impl<E: GameError> GameError for TransitionPhaseError<E> {
    fn severity(&self) -> ErrorSeverity {
        self.error.severity()
    }

    fn error_code(&self) -> &'static str {
        self.error.error_code()
    }
}

/// Errors surfaced while executing an action through the game engine.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ExecuteError {
    #[error("attack action failed: {0}")]
    Attack(TransitionPhaseError<<AttackAction as ActionTransition>::Error>),

    #[error("roll action failed: {0}")]
    Roll(TransitionPhaseError<<RollAction as ActionTransition>::Error>),

    #[error("interact action failed: {0}")]
    Interact(TransitionPhaseError<<InteractAction as ActionTransition>::Error>),

    #[error("inventory action failed: {0}")]
    Inventory(TransitionPhaseError<<InventoryAction as ActionTransition>::Error>),

    #[error("dialogue action failed: {0}")]
    Dialogue(TransitionPhaseError<<DialogueAction as ActionTransition>::Error>),

    #[error("player is dead")]
    PlayerDead,

    #[error("{action} ignored while a dialogue is active")]
    SimulationPaused { action: &'static str },
}

impl ExecuteError {
    /// Phase that failed, for errors raised inside a transition.
    pub fn phase(&self) -> Option<TransitionPhase> {
        match self {
            Self::Attack(e) | Self::Roll(e) => Some(e.phase),
            Self::Interact(e) => Some(e.phase),
            Self::Inventory(e) => Some(e.phase),
            Self::Dialogue(e) => Some(e.phase),
            Self::PlayerDead | Self::SimulationPaused { .. } => None,
        }
    }
}

impl GameError for ExecuteError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Attack(e) | Self::Roll(e) => e.severity(),
            Self::Interact(e) => e.severity(),
            Self::Inventory(e) => e.severity(),
            Self::Dialogue(e) => e.severity(),
            Self::PlayerDead | Self::SimulationPaused { .. } => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Attack(e) | Self::Roll(e) => e.error_code(),
            Self::Interact(e) => e.error_code(),
            Self::Inventory(e) => e.error_code(),
            Self::Dialogue(e) => e.error_code(),
            Self::PlayerDead => "ACTOR_DEAD",
            Self::SimulationPaused { .. } => "SIMULATION_PAUSED",
        }
    }
}
