//! Runtime orchestration for the folk tale simulation.
//!
//! This crate wires the deterministic core to the outside world: a
//! simulation worker owns the authoritative [`folktale_core::GameState`],
//! presentation cues fan out through a topic-based [`EventBus`], and save
//! requests land in a [`SaveRepository`]. Clients drive it through the
//! cloneable [`RuntimeHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides the topic-based event bus
//! - [`oracle`] bundles read-only content for the engine
//! - [`repository`] persists save games
//! - [`scenario`] builds the initial world from a scene layout
pub mod api;
pub mod events;
pub mod oracle;
pub mod repository;
pub mod runtime;
pub mod scenario;

mod workers;

pub use api::{Result, RuntimeError, RuntimeHandle, StepReport};
pub use events::{CueEvent, Event, EventBus, SessionEvent, Topic};
pub use oracle::OracleManager;
pub use repository::{
    FileSaveRepository, InMemorySaveRepository, RepositoryError, SaveGame, SaveMetadata,
    SaveRepository,
};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
pub use scenario::Scenario;
