//! Scripted input playback.
//!
//! A script is a RON list of `(frames, input)` pairs; each input is held for
//! its frame count before the next one takes over:
//!
//! ```ron
//! [
//!     (30, (movement: (0.0, 1.0))),
//!     (1, (interact: true)),
//!     (1, (choice: Some(0))),
//! ]
//! ```
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use folktale_core::InputFrame;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct InputScript {
    steps: Vec<(u32, InputFrame)>,
}

impl InputScript {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read input script: {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("Invalid input script: {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        let steps: Vec<(u32, InputFrame)> =
            ron::from_str(content).map_err(|e| anyhow!("Failed to parse RON: {}", e))?;
        Ok(Self { steps })
    }

    /// `frames` idle frames, used when no script is given.
    pub fn idle(frames: u32) -> Self {
        Self {
            steps: vec![(frames, InputFrame::idle())],
        }
    }

    pub fn total_frames(&self) -> u64 {
        self.steps.iter().map(|(frames, _)| u64::from(*frames)).sum()
    }

    /// Every frame in playback order.
    pub fn frames(&self) -> impl Iterator<Item = InputFrame> + '_ {
        self.steps
            .iter()
            .flat_map(|(frames, input)| std::iter::repeat_n(*input, *frames as usize))
    }
}
