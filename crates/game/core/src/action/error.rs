//! Player action errors.
//!
//! Every variant is an expected rejection: the action is a no-op on state.

use crate::error::{ErrorSeverity, GameError};

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ActionError {
    #[error("player is dead")]
    ActorDead,

    #[error("cannot attack while rolling")]
    Rolling,

    #[error("already rolling")]
    AlreadyRolling,

    #[error("already attacking")]
    AlreadyAttacking,

    #[error("attack is on cooldown ({remaining:.2}s left)")]
    AttackOnCooldown { remaining: f32 },

    #[error("roll is on cooldown ({remaining:.2}s left)")]
    RollOnCooldown { remaining: f32 },

    #[error("not enough stamina (need {required}, have {available})")]
    InsufficientStamina { required: f32, available: f32 },

    #[error("roll needs a movement direction")]
    NoMovementInput,
}

impl GameError for ActionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::ActorDead | Self::NoMovementInput => ErrorSeverity::Validation,
            _ => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::ActorDead => "ACTOR_DEAD",
            Self::Rolling => "ACTION_WHILE_ROLLING",
            Self::AlreadyRolling => "ALREADY_ROLLING",
            Self::AlreadyAttacking => "ALREADY_ATTACKING",
            Self::AttackOnCooldown { .. } => "ATTACK_ON_COOLDOWN",
            Self::RollOnCooldown { .. } => "ROLL_ON_COOLDOWN",
            Self::InsufficientStamina { .. } => "INSUFFICIENT_STAMINA",
            Self::NoMovementInput => "NO_MOVEMENT_INPUT",
        }
    }
}
