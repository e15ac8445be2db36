//! Payloads carried by [`super::Event`].

use folktale_core::{Cue, Tick, TransitionPhase};

/// One presentation cue, stamped with the tick that produced it.
#[derive(Clone, Debug, PartialEq)]
pub struct CueEvent {
    pub tick: Tick,
    pub cue: Cue,
}

/// Session bookkeeping: saves, restores and rejected input.
#[derive(Clone, Debug, PartialEq)]
pub enum SessionEvent {
    Saved {
        slot: String,
        tick: Tick,
        lantern_id: Option<u32>,
    },
    SaveFailed {
        slot: String,
        error: String,
    },
    Restored {
        slot: String,
        tick: Tick,
    },
    ActionRejected {
        tick: Tick,
        action: &'static str,
        phase: Option<TransitionPhase>,
        code: &'static str,
    },
}
