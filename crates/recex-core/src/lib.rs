pub mod error;
pub mod frame;
pub mod id;
pub mod tree;
pub mod vars;

// Re-export commonly used types
pub use error::CoreError;
pub use frame::{Frame, FrameStatus};
pub use id::FrameId;
pub use tree::{FrameNode, FrameTree};
pub use vars::Vars;

// Used by the `vars!` macro.
#[doc(hidden)]
pub use serde_json;
