//! Action transition dispatch and execution logic.

use crate::action::{
    Action, ActionResult, ActionTransition, AttackAction, InteractAction, RollAction,
};
use crate::cue::CueBuffer;
use crate::env::GameEnv;
use crate::state::GameState;

use super::errors::{ExecuteError, TransitionPhase, TransitionPhaseError};

/// Executes a transition through the three-phase pipeline and returns the result.
///
/// Phases:
/// 1. `pre_validate` - Check preconditions before mutation
/// 2. `apply` - Mutate the game state, record cues and return result
/// 3. `post_validate` - Verify postconditions after mutation
#[inline]
fn drive_transition<T>(
    transition: &T,
    state: &mut GameState,
    env: &GameEnv<'_>,
    cues: &mut CueBuffer,
) -> Result<T::Output, TransitionPhaseError<T::Error>>
where
    T: ActionTransition,
{
    transition
        .pre_validate(state, env)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PreValidate, error))?;

    let result = transition
        .apply(state, env, cues)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::Apply, error))?;

    transition
        .post_validate(state, env)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PostValidate, error))?;

    Ok(result)
}

/// Routes each action to its transition and wraps the output in [`ActionResult`].
pub(super) fn execute_transition(
    action: &Action,
    state: &mut GameState,
    env: &GameEnv<'_>,
    cues: &mut CueBuffer,
) -> Result<ActionResult, ExecuteError> {
    match action {
        Action::Attack => {
            let outcome =
                drive_transition(&AttackAction, state, env, cues).map_err(ExecuteError::Attack)?;
            Ok(ActionResult::Attack(outcome))
        }
        Action::Roll { direction } => {
            let direction = drive_transition(&RollAction::new(*direction), state, env, cues)
                .map_err(ExecuteError::Roll)?;
            Ok(ActionResult::Roll { direction })
        }
        Action::Interact => {
            let outcome = drive_transition(&InteractAction, state, env, cues)
                .map_err(ExecuteError::Interact)?;
            Ok(ActionResult::Interact(outcome))
        }
        Action::Inventory(transition) => {
            let outcome =
                drive_transition(transition, state, env, cues).map_err(ExecuteError::Inventory)?;
            Ok(ActionResult::Inventory(outcome))
        }
        Action::Dialogue(transition) => {
            let progress =
                drive_transition(transition, state, env, cues).map_err(ExecuteError::Dialogue)?;
            Ok(ActionResult::Dialogue(progress))
        }
    }
}
