//! Recorder state machine.
//!
//! A [`Recorder`] owns all mutable tracing state for exactly one run: the
//! frame arena, the active stack and the step log. The lifecycle is
//! `Recorder::new -> instrumentation calls -> Recorder::finish`, after which
//! the state is frozen into an [`ExecutionRecord`].

use recex_core::{CoreError, Frame, FrameId, FrameTree, Vars};
use serde_json::Value;

use super::step::{ExecutionStep, FrameSnapshot, StepData};
use crate::error::{ProgramError, TraceError};
use crate::record::ExecutionRecord;

/// The instrumentation interface traced code calls into.
///
/// `exit`, `set` and `prune` are no-ops when no frame is active.
pub trait Instrument {
    /// Enters a new frame named `name` with initial variables `vars`.
    fn enter(&mut self, name: &str, vars: Vars);

    /// Completes the topmost frame with `result`.
    fn exit(&mut self, result: Value);

    /// Merges `patch` into the topmost frame's variables.
    fn set(&mut self, patch: Vars);

    /// Marks the topmost frame and its descendants as pruned.
    fn prune(&mut self);

    /// Completes the topmost frame without a result.
    fn exit_null(&mut self) {
        self.exit(Value::Null);
    }
}

/// Configuration for the recorder.
#[derive(Debug, Clone)]
pub struct RecorderConfig {
    /// Whether to emit a `trace`-level event for every recorded step.
    pub log_steps: bool,
    /// Initial capacity of the step log. 0 lets it grow on demand.
    pub step_capacity: usize,
}

impl Default for RecorderConfig {
    fn default() -> Self {
        RecorderConfig {
            log_steps: true,
            step_capacity: 0,
        }
    }
}

/// Records one run of instrumented code.
#[derive(Debug)]
pub struct Recorder {
    config: RecorderConfig,
    /// Every frame created so far; also the id -> frame registry.
    frames: FrameTree,
    /// Entered-but-not-exited frames (last element is the top).
    active: Vec<FrameId>,
    steps: Vec<ExecutionStep>,
    /// First arena fault hit by `enter` (id space exhausted), reported by
    /// `finish`.
    fault: Option<CoreError>,
}

impl Recorder {
    /// Starts a new run with empty state.
    pub fn new(config: RecorderConfig) -> Self {
        let steps = Vec::with_capacity(config.step_capacity);
        Recorder {
            config,
            frames: FrameTree::new(),
            active: Vec::new(),
            steps,
            fault: None,
        }
    }

    /// Runs `program` against a fresh recorder and returns the finished record.
    ///
    /// If the program returns an error, nothing is returned but the error;
    /// the partial state is dropped.
    pub fn run<F, E>(config: RecorderConfig, program: F) -> Result<ExecutionRecord, TraceError>
    where
        F: FnOnce(&mut Recorder) -> Result<(), E>,
        E: Into<ProgramError>,
    {
        let mut recorder = Recorder::new(config);
        if let Err(err) = program(&mut recorder) {
            let source: ProgramError = err.into();
            tracing::warn!(
                steps_recorded = recorder.steps.len(),
                error = %source,
                "traced program failed"
            );
            return Err(TraceError::ExecutionFailed {
                steps_recorded: recorder.steps.len(),
                source,
            });
        }
        recorder.finish()
    }

    /// Freezes the run into an immutable record.
    pub fn finish(self) -> Result<ExecutionRecord, TraceError> {
        if let Some(fault) = self.fault {
            return Err(fault.into());
        }

        let record = ExecutionRecord::new(self.frames, self.steps);
        tracing::debug!(
            total_steps = record.total_steps(),
            frames = record.registry().len(),
            root_children = record.root().map_or(0, |r| r.children.len()),
            unclosed = self.active.len(),
            "trace complete"
        );
        Ok(record)
    }

    /// Current active-stack depth.
    pub fn depth(&self) -> usize {
        self.active.len()
    }

    pub fn steps_recorded(&self) -> usize {
        self.steps.len()
    }

    /// The frame currently on top of the active stack.
    pub fn active_frame(&self) -> Option<&Frame> {
        self.active.last().and_then(|&id| self.frames.get(id))
    }

    /// Value copy of the active stack, bottom first.
    fn snapshot(&self) -> Vec<FrameSnapshot> {
        self.active
            .iter()
            .filter_map(|&id| self.frames.get(id))
            .map(FrameSnapshot::from)
            .collect()
    }

    fn record_step(&mut self, node_id: FrameId, data: StepData) {
        let step_number = self.steps.len() + 1;
        if self.config.log_steps {
            tracing::trace!(
                step = step_number,
                kind = %data.step_type(),
                frame = %node_id,
                stack_depth = self.active.len(),
                "recorded step"
            );
        }

        let stack_snapshot = self.snapshot();
        self.steps.push(ExecutionStep {
            step_number,
            node_id,
            data,
            stack_snapshot,
        });
    }

    fn note_fault(&mut self, err: CoreError) {
        if self.fault.is_none() {
            self.fault = Some(err);
        }
    }
}

impl Instrument for Recorder {
    fn enter(&mut self, name: &str, vars: Vars) {
        let depth = self.active.len();
        let parent = self.active.last().copied();
        let id = match self.frames.insert(name, vars.clone(), parent, depth) {
            Ok(id) => id,
            Err(err) => {
                self.note_fault(err);
                return;
            }
        };

        // Snapshot after the push so the new frame is visible on top.
        self.active.push(id);
        self.record_step(
            id,
            StepData::Enter {
                name: name.to_string(),
                vars,
                depth,
            },
        );
    }

    fn exit(&mut self, result: Value) {
        let Some(&id) = self.active.last() else {
            return;
        };
        if let Some(frame) = self.frames.get_mut(id) {
            frame.mark_completed(result.clone());
        }

        // Snapshot before the pop so the exiting frame is still on top.
        self.record_step(id, StepData::Exit { result });
        self.active.pop();
    }

    fn set(&mut self, patch: Vars) {
        let Some(&id) = self.active.last() else {
            return;
        };
        if let Some(frame) = self.frames.get_mut(id) {
            frame.update_vars(&patch);
        }
        self.record_step(id, StepData::SetVars { vars: patch });
    }

    fn prune(&mut self) {
        let Some(&id) = self.active.last() else {
            return;
        };
        self.frames.mark_pruned(id);
        self.record_step(id, StepData::Prune);
    }
}

/// Traces `program` with the default configuration.
pub fn trace<F, E>(program: F) -> Result<ExecutionRecord, TraceError>
where
    F: FnOnce(&mut Recorder) -> Result<(), E>,
    E: Into<ProgramError>,
{
    Recorder::run(RecorderConfig::default(), program)
}
