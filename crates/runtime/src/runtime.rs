//! High-level runtime orchestrator.
//!
//! The runtime owns the simulation worker, wires up the command channel and
//! event bus, and exposes a builder-based API for clients to drive it.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use folktale_core::{GameState, InputFrame};

use crate::api::{Result, RuntimeError, RuntimeHandle, StepReport};
use crate::events::EventBus;
use crate::oracle::OracleManager;
use crate::repository::{InMemorySaveRepository, SaveRepository};
use crate::scenario::Scenario;
use crate::workers::{Command, SimulationWorker};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Slot written when a save-point lantern is lit.
    pub save_slot: String,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            save_slot: "autosave".to_string(),
            event_buffer_size: 100,
            command_buffer_size: 32,
        }
    }
}

/// Main runtime that orchestrates the simulation
///
/// Runtime owns the worker; [`RuntimeHandle`] provides a cloneable façade
/// for clients.
pub struct Runtime {
    handle: RuntimeHandle,
    sim_worker_handle: JoinHandle<()>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    /// Advance one frame
    pub async fn step(&self, input: InputFrame, dt: f32) -> Result<StepReport> {
        self.handle.step(input, dt).await
    }

    /// Shutdown the runtime gracefully
    ///
    /// The worker stops once this and every cloned handle are dropped.
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);

        self.sim_worker_handle
            .await
            .map_err(RuntimeError::WorkerJoin)?;

        Ok(())
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    state: Option<GameState>,
    scenario: Option<Scenario>,
    oracles: Option<OracleManager>,
    repository: Option<Arc<dyn SaveRepository>>,
    restore: bool,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            state: None,
            scenario: None,
            oracles: None,
            repository: None,
            restore: false,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Provide initial game state directly
    pub fn initial_state(mut self, state: GameState) -> Self {
        self.state = Some(state);
        self
    }

    /// Build the initial state from a scenario (ignored if a state is given)
    pub fn scenario(mut self, scenario: Scenario) -> Self {
        self.scenario = Some(scenario);
        self
    }

    /// Set required oracle manager
    pub fn oracles(mut self, oracles: OracleManager) -> Self {
        self.oracles = Some(oracles);
        self
    }

    /// Set the save repository (defaults to in-memory)
    pub fn repository(mut self, repository: Arc<dyn SaveRepository>) -> Self {
        self.repository = Some(repository);
        self
    }

    /// Resume from the configured save slot when it holds a save
    pub fn restore_on_start(mut self, restore: bool) -> Self {
        self.restore = restore;
        self
    }

    /// Build the runtime
    pub async fn build(self) -> Result<Runtime> {
        let oracles = self.oracles.ok_or(RuntimeError::MissingOracles)?;
        oracles.config().validate()?;

        let mut initial_state = match (self.state, self.scenario) {
            (Some(state), _) => state,
            (None, Some(scenario)) => scenario.create_initial_state(&oracles)?,
            (None, None) => {
                tracing::info!("No scenario given; starting in an empty arena");
                GameState::new(oracles.config(), glam::Vec3::ZERO)
            }
        };

        let repository = self
            .repository
            .unwrap_or_else(|| Arc::new(InMemorySaveRepository::new()));

        if self.restore {
            match repository.load(&self.config.save_slot)? {
                Some(save) => {
                    save.apply_to(&mut initial_state, oracles.items(), oracles.config());
                    tracing::info!(
                        "Resuming slot[{}] from tick {}",
                        self.config.save_slot,
                        save.tick
                    );
                }
                None => {
                    tracing::info!("No save in slot[{}]; starting fresh", self.config.save_slot)
                }
            }
        }

        let (command_tx, command_rx) =
            mpsc::channel::<Command>(self.config.command_buffer_size.max(1));
        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);
        let handle = RuntimeHandle::new(command_tx, event_bus.clone());

        let sim_worker = SimulationWorker::new(
            initial_state,
            oracles,
            command_rx,
            event_bus,
            repository,
            self.config.save_slot,
        );

        let sim_worker_handle = tokio::spawn(async move {
            sim_worker.run().await;
        });

        Ok(Runtime {
            handle,
            sim_worker_handle,
        })
    }
}
