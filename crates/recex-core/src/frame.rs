//! Frame types: one node of the traced call tree.
//!
//! A [`Frame`] represents a single activation of a traced function. Frames are
//! owned by the [`FrameTree`](crate::tree::FrameTree) arena; `parent` and
//! `children` are arena IDs, so the tree carries no owning back-references.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::id::FrameId;
use crate::vars::Vars;

/// Lifecycle status of a frame.
///
/// Every frame starts `Active`. A normal return moves it to `Completed`;
/// abandoning the branch moves it (and its descendants) to `Pruned`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameStatus {
    #[default]
    Active,
    Completed,
    Pruned,
}

impl FrameStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            FrameStatus::Active => "active",
            FrameStatus::Completed => "completed",
            FrameStatus::Pruned => "pruned",
        }
    }
}

impl std::fmt::Display for FrameStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A traced function activation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub id: FrameId,
    /// Label of the traced function.
    pub name: String,
    pub vars: Vars,
    /// Child frames in call order.
    pub children: Vec<FrameId>,
    /// The frame that was on top of the stack when this one was entered.
    /// Non-owning; `None` for the root and for detached frames.
    pub parent: Option<FrameId>,
    pub status: FrameStatus,
    /// Value produced on completion; `null` until set.
    pub result: Value,
    /// Active-stack length at creation (root = 0).
    pub depth: usize,
}

impl Frame {
    /// Creates an active frame with no children and a `null` result.
    pub fn new(id: FrameId, name: impl Into<String>, vars: Vars, depth: usize) -> Self {
        Frame {
            id,
            name: name.into(),
            vars,
            children: Vec::new(),
            parent: None,
            status: FrameStatus::Active,
            result: Value::Null,
            depth,
        }
    }

    /// Marks the frame completed with `result`.
    pub fn mark_completed(&mut self, result: Value) {
        self.status = FrameStatus::Completed;
        self.result = result;
    }

    /// Shallow-merges `patch` into the frame's variables.
    pub fn update_vars(&mut self, patch: &Vars) {
        self.vars.merge(patch);
    }
}
