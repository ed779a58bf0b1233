//! Execution tracing for instrumented recursive code.
//!
//! Traced code calls `enter`/`exit`/`set`/`prune` on a [`Recorder`]; the
//! result is an immutable [`ExecutionRecord`] (call tree plus step log with a
//! stack snapshot per step) that can be replayed at any step index.

pub mod error;
pub mod record;
pub mod recorder;
pub mod replay;

pub use error::{ProgramError, TraceError};
pub use record::{ExecutionRecord, RecordStats};
pub use recorder::{
    trace, ExecutionStep, FrameSnapshot, Instrument, Recorder, RecorderConfig, StepData,
    StepType,
};
pub use replay::{
    frame_at_step, stack_at_next_step, stack_at_step, total_steps, variables_at_step,
    ReplayCursor,
};
