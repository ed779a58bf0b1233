//! Execution steps: one recorded instrumentation event each.
//!
//! Every effectful `enter`/`exit`/`set`/`prune` call produces an
//! [`ExecutionStep`] holding the event payload and a value copy of the
//! active stack at the moment the step was recorded.

use std::fmt;

use recex_core::{Frame, FrameId, FrameStatus, Vars};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Kind of a recorded step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepType {
    Enter,
    Exit,
    SetVars,
    Prune,
}

impl fmt::Display for StepType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StepType::Enter => "enter",
            StepType::Exit => "exit",
            StepType::SetVars => "set_vars",
            StepType::Prune => "prune",
        };
        f.write_str(s)
    }
}

/// Event-specific payload of a step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StepData {
    Enter {
        name: String,
        vars: Vars,
        depth: usize,
    },
    Exit {
        result: Value,
    },
    /// Carries the patch that was merged, not the full post-merge map.
    SetVars {
        vars: Vars,
    },
    Prune,
}

impl StepData {
    pub fn step_type(&self) -> StepType {
        match self {
            StepData::Enter { .. } => StepType::Enter,
            StepData::Exit { .. } => StepType::Exit,
            StepData::SetVars { .. } => StepType::SetVars,
            StepData::Prune => StepType::Prune,
        }
    }
}

/// Value copy of one active frame, as seen at a particular step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub id: FrameId,
    pub name: String,
    pub depth: usize,
    pub vars: Vars,
    pub status: FrameStatus,
    pub result: Value,
}

impl From<&Frame> for FrameSnapshot {
    fn from(frame: &Frame) -> Self {
        FrameSnapshot {
            id: frame.id,
            name: frame.name.clone(),
            depth: frame.depth,
            vars: frame.vars.clone(),
            status: frame.status,
            result: frame.result.clone(),
        }
    }
}

/// A single recorded instrumentation event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionStep {
    /// 1-based global position in the run.
    pub step_number: usize,
    /// The frame this step concerns.
    pub node_id: FrameId,
    pub data: StepData,
    /// Active frames, bottom of the stack first.
    pub stack_snapshot: Vec<FrameSnapshot>,
}

impl ExecutionStep {
    pub fn step_type(&self) -> StepType {
        self.data.step_type()
    }
}
