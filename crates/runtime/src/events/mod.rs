//! Topic-based event bus for runtime events.
//!
//! Events are published to specific topics, and consumers subscribe only to
//! the topics they need. Publishing is best effort and never blocks a tick.

mod bus;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use types::{CueEvent, SessionEvent};
