//! Pure step queries over an [`ExecutionRecord`].
//!
//! `index` is a 0-based position into the step log; index `k` is the step
//! with `step_number == k + 1`. Out-of-range indices clamp instead of
//! failing.

use recex_core::{Frame, FrameStatus, Vars};

use crate::record::ExecutionRecord;
use crate::recorder::{FrameSnapshot, StepData};

/// Number of recorded steps.
pub fn total_steps(record: &ExecutionRecord) -> usize {
    record.steps().len()
}

/// Active stack (bottom first) as of step `index`.
///
/// Negative indices give an empty stack; indices past the end give the last
/// step's stack. For an `exit` step the exiting frame is always reported as
/// completed with the recorded result.
pub fn stack_at_step(record: &ExecutionRecord, index: i64) -> Vec<FrameSnapshot> {
    if index < 0 {
        return Vec::new();
    }
    let steps = record.steps();
    let Some(step) = usize::try_from(index)
        .ok()
        .and_then(|i| steps.get(i))
        .or_else(|| steps.last())
    else {
        return Vec::new();
    };

    let mut stack = step.stack_snapshot.clone();
    if let StepData::Exit { result } = &step.data {
        for frame in stack.iter_mut().filter(|f| f.id == step.node_id) {
            frame.status = FrameStatus::Completed;
            frame.result = result.clone();
        }
    }
    stack
}

/// Variables visible at step `index`.
///
/// Frames are overlaid bottom to top, so a name bound by a deeper frame
/// shadows the same name in its callers. `None` when the stack is empty.
pub fn variables_at_step(record: &ExecutionRecord, index: i64) -> Option<Vars> {
    let stack = stack_at_step(record, index);
    if stack.is_empty() {
        return None;
    }
    Some(merge_scopes(&stack))
}

/// Overlays each frame's variables onto those of the frames beneath it.
pub fn merge_scopes(stack: &[FrameSnapshot]) -> Vars {
    let mut visible = Vars::new();
    for frame in stack {
        visible.merge(&frame.vars);
    }
    visible
}

/// Stack as of the step after `index`, or empty if there is none.
pub fn stack_at_next_step(record: &ExecutionRecord, index: i64) -> Vec<FrameSnapshot> {
    let next = index.saturating_add(1);
    match usize::try_from(next) {
        Ok(n) if n < total_steps(record) => stack_at_step(record, next),
        _ => Vec::new(),
    }
}

/// The frame step `index` concerns, clamping past-the-end to the last step.
pub fn frame_at_step(record: &ExecutionRecord, index: i64) -> Option<&Frame> {
    let steps = record.steps();
    let last = steps.len().checked_sub(1)?;
    let i = usize::try_from(index).ok()?.min(last);
    record.frame(steps[i].node_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProgramError;
    use crate::recorder::{trace, Instrument};
    use recex_core::vars;
    use serde_json::json;

    /// f(n=3) -> g(n=2) -> exit(2) -> exit(3)
    fn two_level() -> ExecutionRecord {
        trace(|api| {
            api.enter("f", vars! { "n" => 3 });
            api.enter("g", vars! { "n" => 2 });
            api.exit(json!(2));
            api.exit(json!(3));
            Ok::<(), ProgramError>(())
        })
        .unwrap()
    }

    fn names(stack: &[FrameSnapshot]) -> Vec<&str> {
        stack.iter().map(|f| f.name.as_str()).collect()
    }

    #[test]
    fn stack_clamps_out_of_range() {
        let record = two_level();
        assert!(stack_at_step(&record, -1).is_empty());
        assert!(stack_at_step(&record, i64::MIN).is_empty());
        assert_eq!(stack_at_step(&record, 99), stack_at_step(&record, 3));
        assert_eq!(stack_at_step(&record, i64::MAX), stack_at_step(&record, 3));
    }

    #[test]
    fn exit_step_reports_completed_frame() {
        let record = two_level();
        let stack = stack_at_step(&record, 2);
        assert_eq!(names(&stack), vec!["f", "g"]);
        assert_eq!(stack[0].status, FrameStatus::Active);
        assert_eq!(stack[1].status, FrameStatus::Completed);
        assert_eq!(stack[1].result, json!(2));
    }

    #[test]
    fn exit_overlay_applies_even_if_snapshot_disagrees() {
        let mut json = serde_json::to_value(two_level()).unwrap();
        // Rewrite the stored snapshot of the `g` exit to look still active.
        json["steps"][2]["stack_snapshot"][1]["status"] = json!("active");
        json["steps"][2]["stack_snapshot"][1]["result"] = json!(null);
        let record: ExecutionRecord = serde_json::from_value(json).unwrap();

        let stack = stack_at_step(&record, 2);
        assert_eq!(stack[1].status, FrameStatus::Completed);
        assert_eq!(stack[1].result, json!(2));
    }

    #[test]
    fn empty_record_queries() {
        let record = trace(|_| Ok::<(), ProgramError>(())).unwrap();
        assert!(stack_at_step(&record, 0).is_empty());
        assert!(variables_at_step(&record, 0).is_none());
        assert!(frame_at_step(&record, 0).is_none());
        assert!(stack_at_next_step(&record, -1).is_empty());
        assert_eq!(total_steps(&record), 0);
    }

    #[test]
    fn variables_shadow_by_depth() {
        let record = trace(|api| {
            api.enter("a", vars! { "x" => 1, "y" => 1 });
            api.enter("b", vars! { "x" => 2 });
            api.enter("c", vars! { "z" => 3 });
            Ok::<(), ProgramError>(())
        })
        .unwrap();

        let vars = variables_at_step(&record, 2).unwrap();
        assert_eq!(vars, vars! { "x" => 2, "y" => 1, "z" => 3 });
    }

    #[test]
    fn variables_present_but_empty_for_bare_frame() {
        let record = trace(|api| {
            api.enter("f", Vars::new());
            Ok::<(), ProgramError>(())
        })
        .unwrap();
        assert_eq!(variables_at_step(&record, 0), Some(Vars::new()));
    }

    #[test]
    fn next_step_shows_state_after_pop() {
        let record = two_level();
        assert_eq!(names(&stack_at_next_step(&record, 2)), vec!["f"]);
        assert_eq!(names(&stack_at_next_step(&record, -1)), vec!["f"]);
        assert!(stack_at_next_step(&record, 3).is_empty());
    }

    #[test]
    fn frame_at_step_follows_node_id() {
        let record = two_level();
        assert_eq!(frame_at_step(&record, 1).unwrap().name, "g");
        assert_eq!(frame_at_step(&record, 3).unwrap().name, "f");
        assert_eq!(frame_at_step(&record, 50).unwrap().name, "f");
        assert!(frame_at_step(&record, -1).is_none());
    }
}
