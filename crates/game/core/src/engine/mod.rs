//! Tick loop and action execution pipeline.
//!
//! The [`GameEngine`] is the authoritative reducer for [`GameState`]. Discrete
//! actions run through the three transition phases and surface rich error
//! information; [`GameEngine::step`] folds one frame of input into the
//! per-tick update order and collects every presentation cue it produced.

mod errors;
mod transition;

pub use errors::{ExecuteError, TransitionPhase, TransitionPhaseError};

use glam::Vec3;

use crate::action::{
    Action, ActionResult, InputFrame, InventoryAction, advance_player, regenerate_stamina,
    rotate_player, tick_timers,
};
use crate::config::GameConfig;
use crate::cue::{Cue, CueBuffer};
use crate::dialogue::DialogueAction;
use crate::env::GameEnv;
use crate::error::GameError;
use crate::npc::update_enemies;
use crate::state::{GameState, PlayerState, Tick};

/// Result of a successful [`GameEngine::execute`] call.
#[derive(Clone, Debug, PartialEq)]
pub struct ExecutionOutcome {
    pub result: ActionResult,
    pub cues: CueBuffer,
}

/// An action attempted during a step that was rejected. State is unchanged.
#[derive(Clone, Debug, PartialEq)]
pub struct Rejection {
    pub action: &'static str,
    pub error: ExecuteError,
}

/// Everything one tick produced.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StepOutcome {
    pub tick: Tick,
    pub cues: CueBuffer,
    pub results: Vec<ActionResult>,
    pub rejections: Vec<Rejection>,
}

/// Game engine that owns the update order and routes every action through
/// pre_validate → apply → post_validate.
pub struct GameEngine<'a> {
    state: &'a mut GameState,
}

impl<'a> GameEngine<'a> {
    pub fn new(state: &'a mut GameState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &GameState {
        &*self.state
    }

    /// Executes one discrete action.
    ///
    /// A dead player rejects everything; while a dialogue is active only
    /// dialogue actions are accepted. Cues are returned only on success.
    pub fn execute(
        &mut self,
        env: &GameEnv<'_>,
        action: &Action,
    ) -> Result<ExecutionOutcome, ExecuteError> {
        if self.state.player.dead {
            return Err(ExecuteError::PlayerDead);
        }
        if self.state.is_paused() && !matches!(action, Action::Dialogue(_)) {
            return Err(ExecuteError::SimulationPaused {
                action: action.name(),
            });
        }

        let mut cues = CueBuffer::new();
        let result = transition::execute_transition(action, self.state, env, &mut cues)?;
        Ok(ExecutionOutcome { result, cues })
    }

    /// Advances the simulation by one frame of `dt` seconds.
    ///
    /// Order: movement intent, discrete triggers (attack, roll, interact,
    /// quick-use), movement, rotation, timers, stamina regen, enemies and
    /// corpse cleanup. While a dialogue is active only the tick counter moves:
    /// a picked choice answers the current line, otherwise interact advances.
    pub fn step(&mut self, env: &GameEnv<'_>, input: &InputFrame, dt: f32) -> StepOutcome {
        let config = env.config();
        let mut outcome = StepOutcome::default();
        let flags_before = self.state.player.flags();

        if self.state.is_paused() {
            if let Some(index) = input.choice {
                self.attempt(env, Action::Dialogue(DialogueAction::Choose(index)), &mut outcome);
            } else if input.interact {
                self.attempt(env, Action::Dialogue(DialogueAction::Advance), &mut outcome);
            }
            return self.finish(outcome);
        }

        let player = &mut self.state.player;
        player.move_intent = if player.dead {
            Vec3::ZERO
        } else {
            input
                .camera
                .project(input.movement, config.movement.input_deadzone)
        };

        let mut triggers = Vec::new();
        if input.attack {
            triggers.push(Action::Attack);
        }
        if input.roll {
            triggers.push(Action::Roll {
                direction: self.state.player.move_intent,
            });
        }
        if input.interact {
            triggers.push(Action::Interact);
        }
        if let Some(key) = input.quick_use {
            triggers.push(Action::Inventory(InventoryAction::QuickUse { key }));
        }
        for action in triggers {
            self.attempt(env, action, &mut outcome);
        }

        // An interaction may have opened a dialogue; the world holds still.
        if !self.state.is_paused() {
            self.simulate(config, dt, &mut outcome.cues);
            self.state.elapsed += dt;
        }

        let player = &self.state.player;
        let flags = player.flags();
        if flags != flags_before {
            outcome.cues.push(Cue::Animation {
                flags,
                speed: locomotion_speed(player, config),
            });
        }
        self.finish(outcome)
    }

    fn simulate(&mut self, config: &GameConfig, dt: f32, cues: &mut CueBuffer) {
        let state = &mut *self.state;
        advance_player(&mut state.player, &state.arena, config, dt);
        rotate_player(&mut state.player, config, dt);
        tick_timers(&mut state.player, config, dt);
        regenerate_stamina(&mut state.player, config, dt);
        update_enemies(state, config, dt, cues);
    }

    fn attempt(&mut self, env: &GameEnv<'_>, action: Action, outcome: &mut StepOutcome) {
        match self.execute(env, &action) {
            Ok(mut executed) => {
                outcome.cues.append(&mut executed.cues);
                outcome.results.push(executed.result);
            }
            Err(error) => {
                outcome.cues.push(Cue::ActionRejected {
                    action: action.name(),
                    code: error.error_code(),
                });
                outcome.rejections.push(Rejection {
                    action: action.name(),
                    error,
                });
            }
        }
    }

    fn finish(&mut self, mut outcome: StepOutcome) -> StepOutcome {
        self.state.tick = self.state.tick.next();
        outcome.tick = self.state.tick;
        outcome
    }
}

/// Ground speed reported to the animator.
fn locomotion_speed(player: &PlayerState, config: &GameConfig) -> f32 {
    if player.dead {
        return 0.0;
    }
    if player.is_rolling() {
        return config.roll.speed;
    }
    let mut speed = player.move_intent.length() * config.movement.move_speed;
    if player.attacking {
        speed *= config.movement.attack_move_multiplier;
    }
    speed
}
