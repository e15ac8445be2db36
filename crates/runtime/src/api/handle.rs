//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for
//! stepping the simulation, saving, or streaming events from specific topics.
use std::collections::HashMap;

use tokio::sync::{broadcast, mpsc, oneshot};

use folktale_core::{Action, ActionResult, Cue, GameState, HudSnapshot, InputFrame, Rejection, Tick};

use super::errors::{Result, RuntimeError};
use crate::events::{Event, EventBus, Topic};
use crate::repository::SaveMetadata;
use crate::workers::Command;

/// What one [`RuntimeHandle::step`] produced.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StepReport {
    pub tick: Tick,
    pub cues: Vec<Cue>,
    pub results: Vec<ActionResult>,
    pub rejections: Vec<Rejection>,
    /// Set when a lantern requested a save during this step and it was written.
    pub saved: Option<SaveMetadata>,
}

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl RuntimeHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    async fn request<T>(&self, make: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(make(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Advance the simulation by one frame of `dt` seconds.
    pub async fn step(&self, input: InputFrame, dt: f32) -> Result<StepReport> {
        self.request(|reply| Command::Step { input, dt, reply }).await
    }

    /// Execute one discrete action immediately.
    pub async fn execute(&self, action: Action) -> Result<ActionResult> {
        self.request(|reply| Command::Execute { action, reply }).await?
    }

    /// Save to the configured slot.
    pub async fn save(&self) -> Result<SaveMetadata> {
        self.request(|reply| Command::Save { slot: None, reply }).await?
    }

    /// Save to a named slot.
    pub async fn save_to(&self, slot: impl Into<String>) -> Result<SaveMetadata> {
        let slot = Some(slot.into());
        self.request(|reply| Command::Save { slot, reply }).await?
    }

    /// Restore a saved slot over the running session. Returns the saved tick.
    pub async fn restore(&self, slot: impl Into<String>) -> Result<Tick> {
        let slot = slot.into();
        self.request(|reply| Command::Restore { slot, reply }).await?
    }

    /// Query the current game state (read-only snapshot)
    pub async fn query_state(&self) -> Result<GameState> {
        self.request(|reply| Command::QueryState { reply }).await
    }

    /// Query the HUD projection of the current state
    pub async fn hud(&self) -> Result<HudSnapshot> {
        self.request(|reply| Command::QueryHud { reply }).await
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Presentation` - cues for renderers, animators and audio
    /// - `Topic::Session` - saves, restores and rejected actions
    pub fn subscribe(&self, topic: Topic) -> Option<broadcast::Receiver<Event>> {
        self.event_bus.subscribe(topic)
    }

    /// Subscribe to multiple topics at once
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> HashMap<Topic, broadcast::Receiver<Event>> {
        self.event_bus.subscribe_multiple(topics)
    }

    /// Get a reference to the event bus for advanced usage
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }
}
