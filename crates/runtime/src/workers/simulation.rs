//! Simulation worker that owns the authoritative [`folktale_core::GameState`].
//!
//! Receives commands from [`crate::RuntimeHandle`], runs them through
//! [`folktale_core::GameEngine`], publishes cues to the EventBus and persists
//! a save whenever the core requests one.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error, info, warn};

use folktale_core::{
    Action, ActionResult, Cue, CueBuffer, ExecuteError, ExecutionOutcome, GameEngine, GameError,
    GameState, HudSnapshot, InputFrame, StepOutcome, Tick,
};

use crate::api::{Result, RuntimeError, StepReport};
use crate::events::{CueEvent, Event, EventBus, SessionEvent};
use crate::oracle::OracleManager;
use crate::repository::{SaveGame, SaveMetadata, SaveRepository};

/// Commands that can be sent to the simulation worker
pub enum Command {
    /// Advance one frame with the given input.
    Step {
        input: InputFrame,
        dt: f32,
        reply: oneshot::Sender<StepReport>,
    },
    /// Execute one discrete action outside the frame loop.
    Execute {
        action: Action,
        reply: oneshot::Sender<Result<ActionResult>>,
    },
    /// Save the current state. `None` uses the configured slot.
    Save {
        slot: Option<String>,
        reply: oneshot::Sender<Result<SaveMetadata>>,
    },
    /// Replace the carried state with a saved one.
    Restore {
        slot: String,
        reply: oneshot::Sender<Result<Tick>>,
    },
    /// Query the current game state (read-only).
    QueryState { reply: oneshot::Sender<GameState> },
    /// Query the HUD projection of the current state.
    QueryHud { reply: oneshot::Sender<HudSnapshot> },
}

/// Background task that processes gameplay commands.
pub struct SimulationWorker {
    state: GameState,
    oracles: OracleManager,
    command_rx: mpsc::Receiver<Command>,
    event_bus: EventBus,
    repository: Arc<dyn SaveRepository>,
    save_slot: String,
}

impl SimulationWorker {
    /// Creates a new simulation worker.
    pub fn new(
        state: GameState,
        oracles: OracleManager,
        command_rx: mpsc::Receiver<Command>,
        event_bus: EventBus,
        repository: Arc<dyn SaveRepository>,
        save_slot: String,
    ) -> Self {
        info!(
            "SimulationWorker initialized at tick {} with {} enemies",
            state.tick,
            state.enemies.len()
        );

        Self {
            state,
            oracles,
            command_rx,
            event_bus,
            repository,
            save_slot,
        }
    }

    /// Main worker loop. Ends once every handle is dropped.
    pub async fn run(mut self) {
        while let Some(cmd) = self.command_rx.recv().await {
            self.handle_command(cmd);
        }
        debug!("SimulationWorker stopped at tick {}", self.state.tick);
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::Step { input, dt, reply } => {
                let report = self.handle_step(&input, dt);
                if reply.send(report).is_err() {
                    debug!("Step reply channel closed (caller dropped)");
                }
            }
            Command::Execute { action, reply } => {
                let result = self.handle_execute(&action);
                if reply.send(result).is_err() {
                    debug!("Execute reply channel closed (caller dropped)");
                }
            }
            Command::Save { slot, reply } => {
                let slot = slot.unwrap_or_else(|| self.save_slot.clone());
                let result = self.save(&slot, None);
                if reply.send(result).is_err() {
                    debug!("Save reply channel closed (caller dropped)");
                }
            }
            Command::Restore { slot, reply } => {
                let result = self.handle_restore(&slot);
                if reply.send(result).is_err() {
                    debug!("Restore reply channel closed (caller dropped)");
                }
            }
            Command::QueryState { reply } => {
                if reply.send(self.state.clone()).is_err() {
                    debug!("QueryState reply channel closed (caller dropped)");
                }
            }
            Command::QueryHud { reply } => {
                let hud = HudSnapshot::capture(
                    &self.state,
                    self.oracles.items(),
                    self.oracles.dialogue(),
                );
                if reply.send(hud).is_err() {
                    debug!("QueryHud reply channel closed (caller dropped)");
                }
            }
        }
    }

    fn handle_step(&mut self, input: &InputFrame, dt: f32) -> StepReport {
        let env = self.oracles.as_game_env();
        let StepOutcome {
            tick,
            cues,
            results,
            rejections,
        } = GameEngine::new(&mut self.state).step(&env, input, dt);

        for rejection in &rejections {
            self.report_rejection(tick, rejection.action, &rejection.error);
        }
        let saved = self.publish_cues(tick, &cues);

        StepReport {
            tick,
            cues: cues.into_vec(),
            results,
            rejections,
            saved,
        }
    }

    fn handle_execute(&mut self, action: &Action) -> Result<ActionResult> {
        let env = self.oracles.as_game_env();
        let tick = self.state.tick;

        let outcome = GameEngine::new(&mut self.state).execute(&env, action);
        match outcome {
            Ok(ExecutionOutcome { result, cues }) => {
                self.publish_cues(tick, &cues);
                Ok(result)
            }
            Err(error) => {
                self.report_rejection(tick, action.name(), &error);
                Err(RuntimeError::Rejected(error))
            }
        }
    }

    fn handle_restore(&mut self, slot: &str) -> Result<Tick> {
        let save = self
            .repository
            .load(slot)?
            .ok_or_else(|| RuntimeError::SaveNotFound(slot.to_string()))?;

        save.apply_to(&mut self.state, self.oracles.items(), self.oracles.config());
        info!("Restored slot[{}] at tick {}", slot, save.tick);

        self.event_bus
            .publish(Event::Session(SessionEvent::Restored {
                slot: slot.to_string(),
                tick: save.tick,
            }));
        Ok(save.tick)
    }

    /// Publishes every cue and persists on save requests. Returns the last
    /// save written, if any.
    fn publish_cues(&mut self, tick: Tick, cues: &CueBuffer) -> Option<SaveMetadata> {
        let mut saved = None;
        for cue in cues.iter() {
            if let Cue::SaveRequested { lantern_id } = *cue {
                let slot = self.save_slot.clone();
                match self.save(&slot, Some(lantern_id)) {
                    Ok(metadata) => saved = Some(metadata),
                    Err(e) => warn!("Save requested by lantern {} failed: {}", lantern_id, e),
                }
            }
            self.event_bus.publish(Event::Cue(CueEvent {
                tick,
                cue: cue.clone(),
            }));
        }
        saved
    }

    fn save(&mut self, slot: &str, lantern_id: Option<u32>) -> Result<SaveMetadata> {
        let save = SaveGame::capture(&self.state, lantern_id);
        match self.repository.save(slot, &save) {
            Ok(metadata) => {
                info!("Saved slot[{}] at tick {}", slot, save.tick);
                self.event_bus.publish(Event::Session(SessionEvent::Saved {
                    slot: slot.to_string(),
                    tick: save.tick,
                    lantern_id,
                }));
                Ok(metadata)
            }
            Err(e) => {
                self.event_bus
                    .publish(Event::Session(SessionEvent::SaveFailed {
                        slot: slot.to_string(),
                        error: e.to_string(),
                    }));
                Err(e.into())
            }
        }
    }

    fn report_rejection(&self, tick: Tick, action: &'static str, error: &ExecuteError) {
        let phase = error.phase();
        let code = error.error_code();

        if error.severity().is_internal() {
            error!(
                target: "runtime::worker",
                action,
                phase = phase.map(|p| p.as_str()),
                code,
                error = %error,
                "Action execution failed"
            );
        } else {
            debug!(
                target: "runtime::worker",
                action,
                phase = phase.map(|p| p.as_str()),
                code,
                error = %error,
                "Action rejected"
            );
        }

        self.event_bus
            .publish(Event::Session(SessionEvent::ActionRejected {
                tick,
                action,
                phase,
                code,
            }));
    }
}
