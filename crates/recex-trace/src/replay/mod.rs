//! Read-only replay of a finished [`ExecutionRecord`](crate::ExecutionRecord).
//!
//! The queries in [`query`] are pure functions of `(record, index)`: they
//! never mutate the record, so they can be called in any order, any number
//! of times and from any number of threads. [`ReplayCursor`] wraps them with
//! a movable position for step-by-step playback.

pub mod cursor;
pub mod query;

pub use cursor::ReplayCursor;
pub use query::{
    frame_at_step, merge_scopes, stack_at_next_step, stack_at_step, total_steps,
    variables_at_step,
};
