//! Per-issue event streams, one per sub-collection.
//!
//! Each stream turns the items of one collection into [`Event`]s in API
//! order. A failed page becomes a single [`Event::Error`] and ends that
//! stream only.

use std::sync::Arc;

use futures::StreamExt;
use futures::stream::BoxStream;
use tokio_util::sync::CancellationToken;

use crate::gitlab::error::GitLabError;
use crate::gitlab::gateway::{IssueGateway, ListNotesParams, NoteOrderBy, SortOrder};
use crate::gitlab::locator::IssueRef;
use crate::gitlab::pagination::PageRequest;

use super::event::{ErrorEvent, Event, EventSource};
use super::walker::{PageStream, walk_pages};

/// Notes of `issue`, oldest first.
#[must_use]
pub fn notes<G>(
    gateway: Arc<G>,
    issue: IssueRef,
    start: PageRequest,
    cancel: CancellationToken,
) -> BoxStream<'static, Event>
where
    G: IssueGateway + ?Sized + 'static,
{
    let fetch = move |page: PageRequest| {
        let client = Arc::clone(&gateway);
        async move {
            let params = ListNotesParams {
                sort: SortOrder::Asc,
                order_by: NoteOrderBy::CreatedAt,
                page,
            };
            client.list_notes(&issue, &params).await
        }
    };
    into_events(
        EventSource::Notes,
        walk_pages(EventSource::Notes.as_str(), fetch, start, cancel),
        Event::Note,
    )
}

/// Label additions and removals on `issue`, in API order.
///
/// Label names are reduced to a single clean line.
#[must_use]
pub fn label_events<G>(
    gateway: Arc<G>,
    issue: IssueRef,
    start: PageRequest,
    cancel: CancellationToken,
) -> BoxStream<'static, Event>
where
    G: IssueGateway + ?Sized + 'static,
{
    let fetch = move |page: PageRequest| {
        let client = Arc::clone(&gateway);
        async move { client.list_label_events(&issue, page).await }
    };
    into_events(
        EventSource::LabelEvents,
        walk_pages(EventSource::LabelEvents.as_str(), fetch, start, cancel),
        Event::label_change,
    )
}

/// Open, close and reopen transitions of `issue`, in API order.
#[must_use]
pub fn state_events<G>(
    gateway: Arc<G>,
    issue: IssueRef,
    start: PageRequest,
    cancel: CancellationToken,
) -> BoxStream<'static, Event>
where
    G: IssueGateway + ?Sized + 'static,
{
    let fetch = move |page: PageRequest| {
        let client = Arc::clone(&gateway);
        async move { client.list_state_events(&issue, page).await }
    };
    into_events(
        EventSource::StateEvents,
        walk_pages(EventSource::StateEvents.as_str(), fetch, start, cancel),
        Event::StateChange,
    )
}

fn into_events<T>(
    source: EventSource,
    pages: PageStream<T>,
    wrap: fn(T) -> Event,
) -> BoxStream<'static, Event>
where
    T: Send + 'static,
{
    pages
        .map(move |item: Result<T, GitLabError>| match item {
            Ok(value) => wrap(value),
            Err(error) => Event::Error(ErrorEvent::now(source, error)),
        })
        .boxed()
}
