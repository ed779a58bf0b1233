//! Execution recorder for instrumented recursive code.
//!
//! Traced code reports its own activity through the [`Instrument`] interface
//! (`enter`, `exit`, `set`, `prune`). The [`Recorder`] turns those calls into
//! a call tree plus an ordered step log with a stack snapshot per step.
//!
//! # Architecture
//!
//! - [`Recorder`] owns the per-run state: frame arena, active stack, step log.
//! - [`RecorderConfig`] controls step logging and preallocation.
//! - [`ExecutionStep`] is one recorded event; [`StepData`] its payload.
//! - [`FrameSnapshot`] is a value copy of an active frame at a step.
//!
//! The traced program is any closure taking `&mut Recorder`. How that
//! closure was produced (compiled, interpreted, hand-written) is up to the
//! caller.
//!
//! # Usage
//!
//! ```
//! use recex_core::vars;
//! use recex_trace::{trace, Instrument};
//!
//! fn fact<I: Instrument>(api: &mut I, n: u64) -> u64 {
//!     api.enter("fact", vars! { "n" => n });
//!     let result = if n <= 1 { 1 } else { n * fact(api, n - 1) };
//!     api.exit(result.into());
//!     result
//! }
//!
//! let record = trace(|api| {
//!     fact(api, 3);
//!     Ok::<(), recex_trace::ProgramError>(())
//! })
//! .unwrap();
//! assert_eq!(record.total_steps(), 6);
//! ```

pub mod state;
pub mod step;

pub use state::{trace, Instrument, Recorder, RecorderConfig};
pub use step::{ExecutionStep, FrameSnapshot, StepData, StepType};

#[cfg(test)]
mod tests {
    use super::*;
    use recex_core::{vars, FrameStatus, Vars};
    use serde_json::json;

    use crate::error::ProgramError;

    fn fibonacci<I: Instrument>(api: &mut I, n: u64) -> u64 {
        api.enter("fibonacci", vars! { "n" => n });
        if n <= 1 {
            api.exit(json!(n));
            return n;
        }
        let result = fibonacci(api, n - 1) + fibonacci(api, n - 2);
        api.exit(json!(result));
        result
    }

    #[test]
    fn fibonacci_tree_shape() {
        let record = trace(|api| {
            fibonacci(api, 4);
            Ok::<(), ProgramError>(())
        })
        .unwrap();

        // fib(4) makes 9 calls, each one enter + one exit.
        assert_eq!(record.registry().len(), 9);
        assert_eq!(record.total_steps(), 18);

        let root = record.root().unwrap();
        assert_eq!(root.result, json!(3));
        assert_eq!(root.children.len(), 2);
        let first = record.frame(root.children[0]).unwrap();
        assert_eq!(first.vars.get("n"), Some(&json!(3)));
        assert_eq!(first.depth, 1);
        assert!(record
            .registry()
            .iter()
            .all(|f| f.status == FrameStatus::Completed));
    }

    #[test]
    fn step_numbers_are_global_and_monotonic() {
        let record = trace(|api| {
            fibonacci(api, 3);
            Ok::<(), ProgramError>(())
        })
        .unwrap();

        for (idx, step) in record.steps().iter().enumerate() {
            assert_eq!(step.step_number, idx + 1);
        }
    }

    #[test]
    fn prune_marks_existing_children() {
        let record = trace(|api| {
            api.enter("search", Vars::new());
            api.enter("branch", vars! { "i" => 0 });
            api.exit_null();
            api.prune();
            api.enter("late", Vars::new());
            api.exit_null();
            api.exit_null();
            Ok::<(), ProgramError>(())
        })
        .unwrap();

        let root = record.root().unwrap();
        let branch = record.frame(root.children[0]).unwrap();
        let late = record.frame(root.children[1]).unwrap();
        assert_eq!(branch.status, FrameStatus::Pruned);
        // Entered after the prune, so untouched by it.
        assert_eq!(late.status, FrameStatus::Completed);
        // The root was later exited normally, which overrides the prune.
        assert_eq!(root.status, FrameStatus::Completed);
        assert_eq!(record.steps()[3].step_type(), StepType::Prune);
    }
}
