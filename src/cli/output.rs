//! JSON lines output.

use std::io::Write;

use gitlab_mirror::GitLabError;
use gitlab_mirror::gitlab::Issue;
use gitlab_mirror::stream::Event;
use serde::Serialize;

/// One output line.
#[derive(Debug, Serialize)]
#[serde(tag = "record", rename_all = "snake_case")]
pub enum Record<'a> {
    /// An issue as listed.
    Issue(&'a Issue),
    /// An event belonging to the issue with `issue_iid`.
    Event {
        /// Project-scoped number of the owning issue.
        issue_iid: u64,
        /// The event itself.
        event: &'a Event,
    },
}

/// Serialises `record` as a single line.
///
/// # Errors
///
/// Returns [`GitLabError::Io`] when serialisation or the write fails.
pub fn write_record<W: Write>(writer: &mut W, record: &Record<'_>) -> Result<(), GitLabError> {
    serde_json::to_writer(&mut *writer, record).map_err(|error| io_error(&error))?;
    writeln!(writer).map_err(|error| io_error(&error))
}

fn io_error(error: &impl ToString) -> GitLabError {
    GitLabError::Io {
        message: error.to_string(),
    }
}
