//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from worker coordination, repositories, content and the
//! engine so clients can bubble them up with consistent context.
use thiserror::Error;
use tokio::sync::oneshot;

use folktale_core::{ConfigError, ExecuteError};

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("simulation worker command channel closed")]
    CommandChannelClosed,

    #[error("simulation worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("simulation worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("runtime requires oracles to be configured before building")]
    MissingOracles,

    #[error("invalid game config")]
    Config(#[from] ConfigError),

    #[error("invalid scene: {0}")]
    InvalidScene(String),

    #[error("no save found in slot {0}")]
    SaveNotFound(String),

    #[error("action rejected")]
    Rejected(#[from] ExecuteError),
}
