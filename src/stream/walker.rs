//! Drains a paginated collection into a stream of items.
//!
//! A walker owns its cursor and runs as its own Tokio task. Items are handed
//! to the consumer through a channel of capacity [`HANDOFF_CAPACITY`], so a
//! walker never runs more than one item ahead of its consumer.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::Stream;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::gitlab::error::GitLabError;
use crate::gitlab::pagination::{Page, PageRequest};

/// Capacity of every channel between a producer and its consumer.
///
/// Tokio has no rendezvous channel; one slot is the closest bounded handoff.
pub const HANDOFF_CAPACITY: usize = 1;

/// Items of a paginated collection in page order, then array order.
///
/// Yields `Err` at most once, for the page that failed, and ends right
/// after it. Dropping the stream stops the walker at its next handoff.
#[derive(Debug)]
pub struct PageStream<T> {
    receiver: mpsc::Receiver<Result<T, GitLabError>>,
}

impl<T> Stream for PageStream<T> {
    type Item = Result<T, GitLabError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.receiver.poll_recv(cx)
    }
}

/// Starts walking a collection from `start`.
///
/// `fetch` is called once per page with the page to load. After a
/// successful page the walker stops when [`PageInfo::following_page`] says
/// there is nothing further, otherwise it requests that page with the same
/// page size. A failed fetch is yielded as a single `Err` and ends the walk;
/// the failed page is not retried.
///
/// Cancelling `cancel` stops the walker before its next request or handoff;
/// a response that arrives after cancellation is discarded.
///
/// Must be called from within a Tokio runtime.
///
/// [`PageInfo::following_page`]: crate::gitlab::pagination::PageInfo::following_page
#[must_use]
pub fn walk_pages<T, F, Fut>(
    collection: &'static str,
    fetch: F,
    start: PageRequest,
    cancel: CancellationToken,
) -> PageStream<T>
where
    T: Send + 'static,
    F: FnMut(PageRequest) -> Fut + Send + 'static,
    Fut: Future<Output = Result<Page<T>, GitLabError>> + Send + 'static,
{
    let (sender, receiver) = mpsc::channel(HANDOFF_CAPACITY);
    tokio::spawn(drive(collection, fetch, start, cancel, sender));
    PageStream { receiver }
}

async fn drive<T, F, Fut>(
    collection: &'static str,
    mut fetch: F,
    start: PageRequest,
    cancel: CancellationToken,
    sender: mpsc::Sender<Result<T, GitLabError>>,
) where
    F: FnMut(PageRequest) -> Fut,
    Fut: Future<Output = Result<Page<T>, GitLabError>>,
{
    let mut request = start;
    loop {
        let fetched = tokio::select! {
            biased;
            () = cancel.cancelled() => {
                tracing::trace!(collection, page = request.page(), "walk cancelled");
                return;
            }
            fetched = fetch(request) => fetched,
        };

        let page = match fetched {
            Ok(page) => page,
            Err(error) => {
                tracing::debug!(collection, page = request.page(), %error, "page fetch failed");
                let _delivered = handoff(&sender, &cancel, Err(error)).await;
                return;
            }
        };

        tracing::debug!(
            collection,
            page = page.page_info.current_page(),
            total_pages = ?page.page_info.total_pages(),
            items = page.items.len(),
            "fetched page"
        );

        let following = page.page_info.following_page();
        for item in page.items {
            if !handoff(&sender, &cancel, Ok(item)).await {
                return;
            }
        }

        match following {
            Some(next) => request = request.with_page(next),
            None => return,
        }
    }
}

/// Sends `value` unless the token is cancelled first.
///
/// Returns false when the value was not delivered, either because of
/// cancellation or because the consumer has gone away.
pub(crate) async fn handoff<T>(
    sender: &mpsc::Sender<T>,
    cancel: &CancellationToken,
    value: T,
) -> bool {
    tokio::select! {
        biased;
        () = cancel.cancelled() => false,
        sent = sender.send(value) => sent.is_ok(),
    }
}
