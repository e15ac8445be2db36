use crate::cue::CueBuffer;
use crate::env::GameEnv;
use crate::state::GameState;

/// Defines how a concrete action mutates game state.
///
/// Implementors can override the validation hooks to surface pre- and
/// post-conditions around the mutation. Validation hooks receive read-only
/// state and must stay side-effect free. `apply` may assume `pre_validate`
/// succeeded; if it still fails it must leave state unchanged and push no cues.
pub trait ActionTransition {
    type Error;
    type Output;

    /// Validates pre-conditions using the state **before** mutation.
    fn pre_validate(&self, _state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Applies the action, recording presentation cues as it goes.
    fn apply(
        &self,
        state: &mut GameState,
        env: &GameEnv<'_>,
        cues: &mut CueBuffer,
    ) -> Result<Self::Output, Self::Error>;

    /// Validates post-conditions using the state **after** mutation.
    fn post_validate(&self, _state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        Ok(())
    }
}
