//! Merges several event streams into one.

use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures::stream::BoxStream;
use futures::{Stream, StreamExt};
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::gitlab::gateway::IssueGateway;
use crate::gitlab::locator::IssueRef;
use crate::gitlab::pagination::PageRequest;

use super::collections::{label_events, notes, state_events};
use super::event::Event;
use super::walker::{HANDOFF_CAPACITY, handoff};

/// Every event of every merged source, in arrival order.
///
/// Relative order within one source is kept; order across sources is not
/// defined. The stream ends exactly once, after all sources have ended.
#[derive(Debug)]
pub struct MergedEvents {
    receiver: mpsc::Receiver<Event>,
}

impl Stream for MergedEvents {
    type Item = Event;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.receiver.poll_recv(cx)
    }
}

/// Fans `sources` into one stream.
///
/// Each source is drained by its own forwarding task, so a source that
/// stalls never holds back the others. The output closes once every
/// forwarder has finished. An empty `sources` yields a stream that ends
/// immediately.
///
/// Must be called from within a Tokio runtime.
#[must_use]
pub fn merge(sources: Vec<BoxStream<'static, Event>>, cancel: CancellationToken) -> MergedEvents {
    let (sender, receiver) = mpsc::channel(HANDOFF_CAPACITY);
    let mut forwarders = JoinSet::new();
    for source in sources {
        forwarders.spawn(forward(source, sender.clone(), cancel.clone()));
    }
    tokio::spawn(close_when_drained(forwarders, sender, cancel));
    MergedEvents { receiver }
}

/// All notes, label events and state events of `issue`, merged.
///
/// The three collections are walked concurrently with the page size of
/// `start`. A failure in one collection surfaces as an [`Event::Error`]
/// while the other two keep flowing.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use futures::StreamExt;
/// use gitlab_mirror::gitlab::gateway::scripted::ScriptedGateway;
/// use gitlab_mirror::gitlab::models::test_support::{label_event, note};
/// use gitlab_mirror::gitlab::{IssueNumber, IssueRef, PageRequest};
/// use gitlab_mirror::stream::issue_events;
/// use tokio_util::sync::CancellationToken;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let gateway = Arc::new(
///     ScriptedGateway::default()
///         .with_note_pages(vec![vec![note(1, "first"), note(2, "second")]])
///         .with_label_event_pages(vec![vec![label_event(3, "bug")]]),
/// );
/// let issue = IssueRef::new(42, IssueNumber::new(7)?);
/// let cancel = CancellationToken::new();
/// let events: Vec<_> = issue_events(gateway, issue, PageRequest::default(), cancel)
///     .collect()
///     .await;
/// assert_eq!(events.len(), 3);
/// # Ok(())
/// # }
/// ```
#[must_use]
pub fn issue_events<G>(
    gateway: Arc<G>,
    issue: IssueRef,
    start: PageRequest,
    cancel: CancellationToken,
) -> MergedEvents
where
    G: IssueGateway + ?Sized + 'static,
{
    let sources = vec![
        notes(Arc::clone(&gateway), issue, start, cancel.clone()),
        label_events(Arc::clone(&gateway), issue, start, cancel.clone()),
        state_events(gateway, issue, start, cancel.clone()),
    ];
    merge(sources, cancel)
}

async fn forward(
    mut source: BoxStream<'static, Event>,
    sender: mpsc::Sender<Event>,
    cancel: CancellationToken,
) {
    loop {
        let next = tokio::select! {
            biased;
            () = cancel.cancelled() => return,
            next = source.next() => next,
        };
        let Some(event) = next else {
            return;
        };
        if !handoff(&sender, &cancel, event).await {
            return;
        }
    }
}

/// Holds the last sender until every forwarder is done, then drops it.
async fn close_when_drained(
    mut forwarders: JoinSet<()>,
    sender: mpsc::Sender<Event>,
    cancel: CancellationToken,
) {
    while let Some(joined) = forwarders.join_next().await {
        if let Err(error) = joined {
            tracing::warn!(%error, "event forwarder ended abnormally");
        }
    }
    if cancel.is_cancelled() {
        tracing::trace!("fan-in closed after cancellation");
    }
    drop(sender);
}
