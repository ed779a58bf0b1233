//! The immutable output of one trace run.
//!
//! An [`ExecutionRecord`] is produced only by
//! [`Recorder::finish`](crate::recorder::Recorder::finish) and exposes
//! read-only accessors. Replay queries are available both as free functions
//! in [`crate::replay`] and as methods here.

use recex_core::{CoreError, Frame, FrameId, FrameNode, FrameStatus, FrameTree, Vars};
use serde::{Deserialize, Serialize};

use crate::recorder::{ExecutionStep, FrameSnapshot};
use crate::replay;

/// Root frame, frame registry and ordered step log of a finished run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionRecord {
    registry: FrameTree,
    steps: Vec<ExecutionStep>,
}

/// Summary counts over a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordStats {
    pub total_steps: usize,
    pub frames: usize,
    pub max_depth: Option<usize>,
    pub active: usize,
    pub completed: usize,
    pub pruned: usize,
    pub root_children: usize,
}

impl ExecutionRecord {
    pub(crate) fn new(registry: FrameTree, steps: Vec<ExecutionStep>) -> Self {
        ExecutionRecord { registry, steps }
    }

    /// The root frame, or `None` if nothing was ever entered.
    pub fn root(&self) -> Option<&Frame> {
        self.registry.root_frame()
    }

    pub fn root_id(&self) -> Option<FrameId> {
        self.registry.root()
    }

    /// Looks up any frame recorded during the run.
    pub fn frame(&self, id: FrameId) -> Option<&Frame> {
        self.registry.get(id)
    }

    /// The id -> frame registry.
    pub fn registry(&self) -> &FrameTree {
        &self.registry
    }

    pub fn steps(&self) -> &[ExecutionStep] {
        &self.steps
    }

    pub fn total_steps(&self) -> usize {
        replay::total_steps(self)
    }

    /// Nested copy of the rooted call tree, or `Ok(None)` for an empty run.
    ///
    /// Fails with [`CoreError::MalformedTree`] if a deserialized record has
    /// child links that do not follow creation order.
    pub fn tree(&self) -> Result<Option<FrameNode>, CoreError> {
        self.registry
            .root()
            .map(|root| self.registry.nested(root))
            .transpose()
    }

    pub fn stats(&self) -> RecordStats {
        RecordStats {
            total_steps: self.steps.len(),
            frames: self.registry.len(),
            max_depth: self.registry.max_depth(),
            active: self.registry.count_with_status(FrameStatus::Active),
            completed: self.registry.count_with_status(FrameStatus::Completed),
            pruned: self.registry.count_with_status(FrameStatus::Pruned),
            root_children: self.root().map_or(0, |r| r.children.len()),
        }
    }

    pub fn stack_at_step(&self, index: i64) -> Vec<FrameSnapshot> {
        replay::stack_at_step(self, index)
    }

    pub fn variables_at_step(&self, index: i64) -> Option<Vars> {
        replay::variables_at_step(self, index)
    }

    pub fn stack_at_next_step(&self, index: i64) -> Vec<FrameSnapshot> {
        replay::stack_at_next_step(self, index)
    }

    pub fn frame_at_step(&self, index: i64) -> Option<&Frame> {
        replay::frame_at_step(self, index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProgramError;
    use crate::recorder::{trace, Instrument};
    use recex_core::vars;
    use serde_json::json;

    fn nested_record() -> ExecutionRecord {
        trace(|api| {
            api.enter("outer", vars! { "x" => 1 });
            api.enter("inner", vars! { "y" => 2 });
            api.prune();
            api.exit(json!("done"));
            Ok::<(), ProgramError>(())
        })
        .unwrap()
    }

    #[test]
    fn empty_run_has_no_root() {
        let record = trace(|_| Ok::<(), ProgramError>(())).unwrap();
        assert!(record.root().is_none());
        assert!(record.tree().unwrap().is_none());
        assert_eq!(record.total_steps(), 0);
        assert_eq!(record.stats().max_depth, None);
    }

    #[test]
    fn stats_count_statuses() {
        let stats = nested_record().stats();
        assert_eq!(
            stats,
            RecordStats {
                total_steps: 4,
                frames: 2,
                max_depth: Some(1),
                active: 1,
                completed: 1,
                pruned: 0,
                root_children: 1,
            }
        );
    }

    #[test]
    fn tree_is_nested_and_parent_free() {
        let record = nested_record();
        let tree = record.tree().unwrap().unwrap();
        assert_eq!(tree.name, "outer");
        assert_eq!(tree.children[0].name, "inner");
        assert_eq!(tree.children[0].result, json!("done"));

        let json = serde_json::to_value(&tree).unwrap();
        assert!(json.get("parent").is_none());
    }

    #[test]
    fn record_round_trips_through_json() {
        let record = nested_record();
        let json = serde_json::to_string(&record).unwrap();
        let back: ExecutionRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn tree_of_edited_cyclic_record_is_an_error() {
        let mut json = serde_json::to_value(nested_record()).unwrap();
        json["registry"]["frames"][1]["children"] = json!([0]);
        let record: ExecutionRecord = serde_json::from_value(json).unwrap();

        assert_eq!(
            record.tree().unwrap_err(),
            CoreError::MalformedTree {
                parent: FrameId(1),
                child: FrameId(0),
            }
        );
    }

    #[test]
    fn snapshot_of_single_call_record() {
        let record = trace(|api| {
            api.enter("f", vars! { "n" => 5 });
            api.exit(json!(5));
            Ok::<(), ProgramError>(())
        })
        .unwrap();

        insta::assert_json_snapshot!(record.stack_at_step(1), @r###"
        [
          {
            "id": 0,
            "name": "f",
            "depth": 0,
            "vars": {
              "n": 5
            },
            "status": "completed",
            "result": 5
          }
        ]
        "###);
    }
}
