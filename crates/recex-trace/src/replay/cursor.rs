//! Scrubbing cursor over a finished record.

use recex_core::{Frame, Vars};

use super::query;
use crate::record::ExecutionRecord;
use crate::recorder::{ExecutionStep, FrameSnapshot};

/// A position in a record's step log, moved forward, backward or anywhere.
///
/// The cursor only borrows the record, so any number of cursors can scrub
/// the same record independently.
#[derive(Debug, Clone, Copy)]
pub struct ReplayCursor<'r> {
    record: &'r ExecutionRecord,
    index: usize,
}

impl<'r> ReplayCursor<'r> {
    /// Creates a cursor at the first step.
    pub fn new(record: &'r ExecutionRecord) -> Self {
        ReplayCursor { record, index: 0 }
    }

    pub fn record(&self) -> &'r ExecutionRecord {
        self.record
    }

    /// 0-based step index.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn total(&self) -> usize {
        query::total_steps(self.record)
    }

    /// 1-based position for display ("step N of M"); 0 for an empty record.
    pub fn position(&self) -> usize {
        if self.total() == 0 {
            0
        } else {
            self.index + 1
        }
    }

    /// Fraction of the run replayed so far, in `0.0..=1.0`.
    pub fn progress(&self) -> f64 {
        match self.total() {
            0 => 0.0,
            total => self.position() as f64 / total as f64,
        }
    }

    pub fn is_at_end(&self) -> bool {
        self.index + 1 >= self.total()
    }

    /// Advances one step. Returns `false` if already at the last step.
    pub fn step_forward(&mut self) -> bool {
        if self.is_at_end() {
            return false;
        }
        self.index += 1;
        true
    }

    /// Moves back one step. Returns `false` if already at the first step.
    pub fn step_back(&mut self) -> bool {
        if self.index == 0 {
            return false;
        }
        self.index -= 1;
        true
    }

    /// Jumps to `index`, clamped to the last step.
    pub fn seek(&mut self, index: usize) {
        self.index = index.min(self.total().saturating_sub(1));
    }

    pub fn reset(&mut self) {
        self.index = 0;
    }

    pub fn current_step(&self) -> Option<&'r ExecutionStep> {
        self.record.steps().get(self.index)
    }

    pub fn stack(&self) -> Vec<FrameSnapshot> {
        query::stack_at_step(self.record, self.query_index())
    }

    pub fn variables(&self) -> Option<Vars> {
        query::variables_at_step(self.record, self.query_index())
    }

    pub fn frame(&self) -> Option<&'r Frame> {
        query::frame_at_step(self.record, self.query_index())
    }

    fn query_index(&self) -> i64 {
        i64::try_from(self.index).unwrap_or(i64::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProgramError;
    use crate::recorder::{trace, Instrument, StepType};
    use recex_core::vars;
    use serde_json::json;

    fn countdown(n: u64) -> ExecutionRecord {
        fn go<I: Instrument>(api: &mut I, n: u64) {
            api.enter("countdown", vars! { "n" => n });
            if n > 0 {
                go(api, n - 1);
            }
            api.exit(json!(n));
        }
        trace(|api| {
            go(api, n);
            Ok::<(), ProgramError>(())
        })
        .unwrap()
    }

    #[test]
    fn walks_forward_to_the_end() {
        let record = countdown(2);
        let mut cursor = ReplayCursor::new(&record);
        let mut seen = vec![cursor.current_step().unwrap().step_type()];
        while cursor.step_forward() {
            seen.push(cursor.current_step().unwrap().step_type());
        }

        assert_eq!(seen.len(), 6);
        assert_eq!(seen[..3], [StepType::Enter; 3]);
        assert_eq!(seen[3..], [StepType::Exit; 3]);
        assert!(cursor.is_at_end());
        assert_eq!(cursor.position(), 6);
        assert_eq!(cursor.progress(), 1.0);
    }

    #[test]
    fn scrubs_backward_and_seeks() {
        let record = countdown(2);
        let mut cursor = ReplayCursor::new(&record);
        assert!(!cursor.step_back());

        cursor.seek(100);
        assert_eq!(cursor.index(), 5);
        assert!(cursor.step_back());
        assert_eq!(cursor.stack().len(), 2);

        cursor.seek(2);
        assert_eq!(cursor.frame().unwrap().vars.get("n"), Some(&json!(0)));
        assert_eq!(cursor.variables().unwrap().get("n"), Some(&json!(0)));

        cursor.reset();
        assert_eq!(cursor.index(), 0);
        assert_eq!(cursor.stack().len(), 1);
    }

    #[test]
    fn empty_record_cursor() {
        let record = trace(|_| Ok::<(), ProgramError>(())).unwrap();
        let mut cursor = ReplayCursor::new(&record);
        assert_eq!(cursor.position(), 0);
        assert_eq!(cursor.progress(), 0.0);
        assert!(cursor.is_at_end());
        assert!(!cursor.step_forward());
        cursor.seek(3);
        assert_eq!(cursor.index(), 0);
        assert!(cursor.current_step().is_none());
        assert!(cursor.stack().is_empty());
    }
}
