//! Tests for the streaming engine.

use std::time::Duration;

use futures::{Stream, StreamExt};

use super::event::Event;

mod issues;

/// Upper bound for any single wait in these tests.
const STEP: Duration = Duration::from_secs(5);

/// Drains `stream`, failing the test if it does not end within [`STEP`]
/// per item.
async fn drain<S>(mut stream: S) -> Vec<S::Item>
where
    S: Stream + Unpin,
{
    let mut items = Vec::new();
    while let Some(item) = tokio::time::timeout(STEP, stream.next())
        .await
        .expect("stream should make progress")
    {
        items.push(item);
    }
    items
}

/// Ids of note events, in order.
fn note_ids(events: &[Event]) -> Vec<u64> {
    events
        .iter()
        .filter_map(|event| match event {
            Event::Note(note) => Some(note.id),
            _ => None,
        })
        .collect()
}

/// Ids of label change events, in order.
fn label_ids(events: &[Event]) -> Vec<u64> {
    events
        .iter()
        .filter_map(|event| match event {
            Event::LabelChange(label) => Some(label.id),
            _ => None,
        })
        .collect()
}

/// Ids of state change events, in order.
fn state_ids(events: &[Event]) -> Vec<u64> {
    events
        .iter()
        .filter_map(|event| match event {
            Event::StateChange(state) => Some(state.id),
            _ => None,
        })
        .collect()
}
