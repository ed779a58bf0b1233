//! Core error types for recex-core.
//!
//! Uses `thiserror` for structured, matchable error variants covering
//! allocation and lookups in the frame arena.

use crate::id::FrameId;
use thiserror::Error;

/// Core errors produced by the recex-core crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// A frame ID was not found in the arena.
    #[error("frame not found: FrameId({id})", id = id.0)]
    FrameNotFound { id: FrameId },

    /// The arena already holds as many frames as a `FrameId` can address.
    #[error("frame id space exhausted after {count} frames")]
    FrameIdOverflow { count: usize },

    /// A child link does not point forward in creation order (e.g. a cycle
    /// in a hand-edited record).
    #[error("malformed tree: FrameId({parent}) lists FrameId({child}) as a child", parent = parent.0, child = child.0)]
    MalformedTree { parent: FrameId, child: FrameId },
}
