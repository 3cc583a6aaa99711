//! Streaming engine: walks paginated collections and merges per-issue
//! events.
//!
//! Every producer runs as its own Tokio task and hands items over through a
//! channel of capacity [`HANDOFF_CAPACITY`]. A shared
//! [`CancellationToken`](tokio_util::sync::CancellationToken) stops all of
//! them.

pub mod collections;
pub mod event;
pub mod fan_in;
pub mod issues;
pub mod walker;

pub use collections::{label_events, notes, state_events};
pub use event::{ErrorEvent, Event, EventSource};
pub use fan_in::{MergedEvents, issue_events, merge};
pub use issues::{IssueStream, issues};
pub use walker::{HANDOFF_CAPACITY, PageStream, walk_pages};

#[cfg(test)]
mod tests;
