//! Error types for trace recording.
//!
//! Only a failing traced program (or an internal arena fault) produces an
//! error. Mismatched `exit`/`set`/`prune` calls are no-ops, and replay
//! queries clamp instead of failing.

use recex_core::CoreError;

/// Boxed error returned by a traced program.
pub type ProgramError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors produced while recording a trace.
#[derive(Debug, thiserror::Error)]
pub enum TraceError {
    /// The traced program returned an error. The partial record is discarded.
    #[error("traced program failed after {steps_recorded} step(s): {source}")]
    ExecutionFailed {
        steps_recorded: usize,
        source: ProgramError,
    },

    /// The frame arena rejected an operation.
    #[error("frame arena fault: {0}")]
    Core(#[from] CoreError),
}
