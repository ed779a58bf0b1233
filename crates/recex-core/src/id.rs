//! Stable ID newtypes for traced frames.
//!
//! Frame IDs are allocated sequentially per run, so the same program traced
//! twice yields the same IDs. An ID doubles as the frame's index in the
//! [`FrameTree`](crate::tree::FrameTree) arena.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Stable frame identifier. Maps to a slot in the frame arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FrameId(pub u32);

impl FrameId {
    /// Returns the arena slot for this ID.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for FrameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<usize> for FrameId {
    type Error = CoreError;

    /// Converts an arena slot to an ID, failing once slots no longer fit.
    fn try_from(idx: usize) -> Result<Self, CoreError> {
        u32::try_from(idx)
            .map(FrameId)
            .map_err(|_| CoreError::FrameIdOverflow { count: idx })
    }
}
