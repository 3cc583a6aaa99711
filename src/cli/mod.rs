//! Mirror operation: walks the issue listing and writes every issue
//! followed by its merged events.

use std::io::Write;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures::StreamExt;
use gitlab_mirror::stream::{issue_events, issues};
use gitlab_mirror::{GitLabError, IssueGateway, PageRequest, ProjectLocator};
use tokio_util::sync::CancellationToken;

pub mod output;

use output::{Record, write_record};

/// Counts reported once a mirror run completes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MirrorSummary {
    /// Issues written.
    pub issues: usize,
    /// Events written, errors included.
    pub events: usize,
    /// Error events written.
    pub errors: usize,
}

/// Streams every issue of `project` updated since `since` to `writer`.
///
/// Each issue line is followed by the lines of its events. Issues are
/// handled one at a time; the three event collections of an issue are
/// fetched concurrently.
///
/// # Errors
///
/// Returns [`GitLabError::Io`] when writing fails. Fetch failures never
/// abort the run: they end the listing or surface as error records.
pub async fn mirror<G, W>(
    gateway: &Arc<G>,
    project: ProjectLocator,
    since: DateTime<Utc>,
    start: PageRequest,
    cancel: &CancellationToken,
    writer: &mut W,
) -> Result<MirrorSummary, GitLabError>
where
    G: IssueGateway + ?Sized + 'static,
    W: Write,
{
    let mut summary = MirrorSummary::default();
    let mut listing = issues(Arc::clone(gateway), project, since, start, cancel.clone());

    while let Some(issue) = listing.next().await {
        write_record(writer, &Record::Issue(&issue))?;
        summary.issues = summary.issues.saturating_add(1);

        let reference = match issue.reference() {
            Ok(reference) => reference,
            Err(error) => {
                tracing::warn!(iid = issue.iid, %error, "skipping events of issue");
                continue;
            }
        };

        let mut events = issue_events(Arc::clone(gateway), reference, start, cancel.child_token());
        while let Some(event) = events.next().await {
            write_record(
                writer,
                &Record::Event {
                    issue_iid: issue.iid,
                    event: &event,
                },
            )?;
            summary.events = summary.events.saturating_add(1);
            if event.is_error() {
                summary.errors = summary.errors.saturating_add(1);
            }
        }
    }

    writer.flush().map_err(|error| GitLabError::Io {
        message: error.to_string(),
    })?;
    Ok(summary)
}
