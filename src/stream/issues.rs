//! Lists the issues of a project updated since a cut-off.

use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use chrono::{DateTime, Utc};
use futures::Stream;
use tokio_util::sync::CancellationToken;

use crate::gitlab::gateway::{IssueGateway, IssueOrderBy, IssueScope, ListIssuesParams, SortOrder};
use crate::gitlab::locator::ProjectLocator;
use crate::gitlab::models::Issue;
use crate::gitlab::pagination::PageRequest;

use super::walker::{PageStream, walk_pages};

/// Issues of one project, oldest update first.
///
/// A failed page is logged and ends the stream; the consumer sees a normal
/// end of stream and cannot tell it apart from exhaustion.
#[derive(Debug)]
pub struct IssueStream {
    inner: Option<PageStream<Issue>>,
}

impl Stream for IssueStream {
    type Item = Issue;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let Some(inner) = self.inner.as_mut() else {
            return Poll::Ready(None);
        };
        match Pin::new(inner).poll_next(cx) {
            Poll::Ready(Some(Ok(issue))) => Poll::Ready(Some(issue)),
            Poll::Ready(Some(Err(error))) => {
                tracing::warn!(%error, "issue listing stopped early");
                self.inner = None;
                Poll::Ready(None)
            }
            Poll::Ready(None) => {
                self.inner = None;
                Poll::Ready(None)
            }
            Poll::Pending => Poll::Pending,
        }
    }
}

/// Walks every issue of `project` updated at or after `since`.
///
/// Requests use scope `all`, ascending order by `updated_at`, and the page
/// size of `start`. The walk runs as its own task and stops when `cancel`
/// fires or the returned stream is dropped.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use chrono::Utc;
/// use futures::StreamExt;
/// use gitlab_mirror::gitlab::gateway::scripted::ScriptedGateway;
/// use gitlab_mirror::gitlab::models::test_support::issue;
/// use gitlab_mirror::gitlab::{PageRequest, ProjectLocator};
/// use gitlab_mirror::stream::issues;
/// use tokio_util::sync::CancellationToken;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let gateway = Arc::new(ScriptedGateway::default().with_issue_pages(vec![vec![issue(1, 0)]]));
/// let project = ProjectLocator::parse("https://gitlab.example.com/group/project")?;
/// let listed: Vec<_> = issues(
///     gateway,
///     project,
///     Utc::now(),
///     PageRequest::default(),
///     CancellationToken::new(),
/// )
/// .collect()
/// .await;
/// assert_eq!(listed.len(), 1);
/// # Ok(())
/// # }
/// ```
#[must_use]
pub fn issues<G>(
    gateway: Arc<G>,
    project: ProjectLocator,
    since: DateTime<Utc>,
    start: PageRequest,
    cancel: CancellationToken,
) -> IssueStream
where
    G: IssueGateway + ?Sized + 'static,
{
    let shared_project = Arc::new(project);
    let fetch = move |page: PageRequest| {
        let client = Arc::clone(&gateway);
        let target = Arc::clone(&shared_project);
        async move {
            let params = ListIssuesParams {
                updated_after: Some(since),
                scope: IssueScope::All,
                sort: SortOrder::Asc,
                order_by: IssueOrderBy::UpdatedAt,
                page,
            };
            client.list_issues(&target, &params).await
        }
    };
    IssueStream {
        inner: Some(walk_pages("issues", fetch, start, cancel)),
    }
}
