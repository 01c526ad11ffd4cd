//! Chat state: the shared message buffer, the scroll offset, and the session
//! that ties them together.
//!
//! Buffer and scroll transitions are pure enough to test without a terminal;
//! only the session introduces locking.

pub mod buffer;
pub mod scroll;
pub mod session;

// Re-export for convenience
pub use buffer::{Appended, BufferLimits, MessageBuffer, Snapshot};
pub use scroll::{ScrollMode, ScrollState};
pub use session::{ChatView, Session};
