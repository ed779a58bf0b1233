//! Arena-backed call tree.
//!
//! [`FrameTree`] owns every frame created during a run, indexed by
//! [`FrameId`]. It doubles as the node registry: any frame, including one
//! that never made it into the rooted tree, can be looked up in O(1).
//!
//! The first frame inserted becomes the root. Later frames are attached to
//! the parent the caller names; a frame inserted with no parent after the
//! root exists stays detached (registered, but not reachable from the root).

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CoreError;
use crate::frame::{Frame, FrameStatus};
use crate::id::FrameId;
use crate::vars::Vars;

/// Arena of frames plus the root pointer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameTree {
    frames: Vec<Frame>,
    root: Option<FrameId>,
}

impl FrameTree {
    pub fn new() -> Self {
        FrameTree::default()
    }

    /// Creates a frame and links it under `parent` (if any).
    ///
    /// The very first frame inserted becomes the root regardless of `parent`.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        vars: Vars,
        parent: Option<FrameId>,
        depth: usize,
    ) -> Result<FrameId, CoreError> {
        if let Some(parent_id) = parent {
            self.get_or_err(parent_id)?;
        }

        let id = FrameId::try_from(self.frames.len())?;
        let mut frame = Frame::new(id, name, vars, depth);

        if self.root.is_none() {
            self.root = Some(id);
        } else if let Some(parent_id) = parent {
            frame.parent = Some(parent_id);
            self.frames[parent_id.index()].children.push(id);
        }

        self.frames.push(frame);
        Ok(id)
    }

    pub fn root(&self) -> Option<FrameId> {
        self.root
    }

    pub fn root_frame(&self) -> Option<&Frame> {
        self.root.and_then(|id| self.get(id))
    }

    pub fn get(&self, id: FrameId) -> Option<&Frame> {
        self.frames.get(id.index())
    }

    pub fn get_mut(&mut self, id: FrameId) -> Option<&mut Frame> {
        self.frames.get_mut(id.index())
    }

    pub fn get_or_err(&self, id: FrameId) -> Result<&Frame, CoreError> {
        self.get(id).ok_or(CoreError::FrameNotFound { id })
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Iterates every registered frame in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &Frame> {
        self.frames.iter()
    }

    /// Marks `id` and every current descendant as pruned.
    ///
    /// Returns the number of frames touched; an unknown `id` touches none.
    pub fn mark_pruned(&mut self, id: FrameId) -> usize {
        let mut touched = 0;
        let mut pending = vec![id];
        while let Some(next) = pending.pop() {
            let Some(frame) = self.frames.get_mut(next.index()) else {
                continue;
            };
            frame.status = FrameStatus::Pruned;
            pending.extend(frame.children.iter().copied());
            touched += 1;
        }
        touched
    }

    /// Deepest `depth` of any registered frame, or `None` when empty.
    pub fn max_depth(&self) -> Option<usize> {
        self.frames.iter().map(|f| f.depth).max()
    }

    pub fn count_with_status(&self, status: FrameStatus) -> usize {
        self.frames.iter().filter(|f| f.status == status).count()
    }

    /// Builds an owned nested view of the subtree rooted at `id`.
    ///
    /// Children are always created after their parent, so every child link
    /// must point to a higher ID. A link that doesn't (only possible in a
    /// tree deserialized from edited data) is rejected with
    /// [`CoreError::MalformedTree`], which also rules out cycles.
    pub fn nested(&self, id: FrameId) -> Result<FrameNode, CoreError> {
        let frame = self.get_or_err(id)?;
        let children = frame
            .children
            .iter()
            .map(|&child| {
                if child <= id {
                    return Err(CoreError::MalformedTree { parent: id, child });
                }
                self.nested(child)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(FrameNode {
            id: frame.id,
            name: frame.name.clone(),
            vars: frame.vars.clone(),
            status: frame.status,
            result: frame.result.clone(),
            depth: frame.depth,
            children,
        })
    }
}

/// Owned, nested copy of a subtree with no parent links.
///
/// This is the shape consumers serialize when they want the call tree rather
/// than the flat arena.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameNode {
    pub id: FrameId,
    pub name: String,
    pub vars: Vars,
    pub status: FrameStatus,
    pub result: Value,
    pub depth: usize,
    pub children: Vec<FrameNode>,
}

impl FrameNode {
    /// Number of frames in this subtree, including itself.
    pub fn size(&self) -> usize {
        1 + self.children.iter().map(FrameNode::size).sum::<usize>()
    }
}
