//! Data models for GitLab issues and their activity collections.
//!
//! Types prefixed with `Api` are internal deserialisation targets that
//! convert into the public domain types. Domain types serialise so that the
//! CLI can emit them as JSON lines.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::GitLabError;
use super::locator::{IssueNumber, IssueRef};

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Author or actor attached to an issue, note, or resource event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    /// Numeric user id.
    pub id: u64,
    /// Login name.
    pub username: String,
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
}

/// Issue record as listed by the project issues endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    /// Instance-wide issue id.
    pub id: u64,
    /// Issue number within the project.
    pub iid: u64,
    /// Numeric id of the owning project.
    pub project_id: u64,
    /// Issue title.
    pub title: String,
    /// Markdown description.
    pub description: Option<String>,
    /// `opened` or `closed`.
    pub state: String,
    /// Label names currently applied.
    pub labels: Vec<String>,
    /// Issue author.
    pub author: Option<Author>,
    /// Browser URL.
    pub web_url: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
    /// Close timestamp when closed.
    pub closed_at: Option<DateTime<Utc>>,
}

impl Issue {
    /// Address of this issue's sub-collections.
    ///
    /// # Errors
    ///
    /// Returns [`GitLabError::InvalidIssueNumber`] when GitLab reported an
    /// `iid` of zero.
    pub fn reference(&self) -> Result<IssueRef, GitLabError> {
        Ok(IssueRef::new(self.project_id, IssueNumber::new(self.iid)?))
    }
}

/// Comment (note) on an issue, including system notes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Note {
    /// Note id.
    pub id: u64,
    /// Markdown body.
    pub body: String,
    /// Note author.
    pub author: Option<Author>,
    /// Whether GitLab generated the note.
    pub system: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last edit timestamp.
    pub updated_at: Option<DateTime<Utc>>,
}

/// Label referenced by a label event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    /// Label id.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// Hex colour such as `#d9534f`.
    #[serde(default)]
    pub color: Option<String>,
    /// Label description.
    #[serde(default)]
    pub description: Option<String>,
}

/// Whether a label was added or removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelAction {
    /// The label was applied.
    Add,
    /// The label was removed.
    Remove,
    /// An action this crate does not know about.
    #[serde(other)]
    Unknown,
}

/// Label change recorded in the resource label events log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelEvent {
    /// Event id.
    pub id: u64,
    /// User who changed the label.
    pub author: Option<Author>,
    /// When the change happened.
    pub created_at: DateTime<Utc>,
    /// Add or remove.
    pub action: LabelAction,
    /// The label; `None` when the label has since been deleted.
    pub label: Option<Label>,
}

/// Issue state reached by a state event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueStateChange {
    /// The issue was closed.
    Closed,
    /// The issue was reopened.
    Reopened,
    /// The issue was opened.
    Opened,
    /// The issue was locked.
    Locked,
    /// A state this crate does not know about.
    #[serde(other)]
    Unknown,
}

/// Open/close change recorded in the resource state events log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StateEvent {
    /// Event id.
    pub id: u64,
    /// User who changed the state.
    pub author: Option<Author>,
    /// When the change happened.
    pub created_at: DateTime<Utc>,
    /// The state reached.
    pub state: IssueStateChange,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiIssue {
    pub(crate) id: u64,
    pub(crate) iid: u64,
    pub(crate) project_id: u64,
    pub(crate) title: String,
    #[serde(default)]
    pub(crate) description: Option<String>,
    pub(crate) state: String,
    #[serde(default)]
    pub(crate) labels: Vec<String>,
    #[serde(default)]
    pub(crate) author: Option<Author>,
    #[serde(default)]
    pub(crate) web_url: Option<String>,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
    #[serde(default)]
    pub(crate) closed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiNote {
    pub(crate) id: u64,
    #[serde(default)]
    pub(crate) body: Option<String>,
    #[serde(default)]
    pub(crate) author: Option<Author>,
    #[serde(default)]
    pub(crate) system: bool,
    pub(crate) created_at: DateTime<Utc>,
    #[serde(default)]
    pub(crate) updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiLabelEvent {
    pub(crate) id: u64,
    #[serde(default)]
    pub(crate) user: Option<Author>,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) action: LabelAction,
    #[serde(default)]
    pub(crate) label: Option<Label>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiStateEvent {
    pub(crate) id: u64,
    #[serde(default)]
    pub(crate) user: Option<Author>,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) state: IssueStateChange,
}

impl From<ApiIssue> for Issue {
    fn from(value: ApiIssue) -> Self {
        Self {
            id: value.id,
            iid: value.iid,
            project_id: value.project_id,
            title: value.title,
            description: value.description,
            state: value.state,
            labels: value.labels,
            author: value.author,
            web_url: value.web_url,
            created_at: value.created_at,
            updated_at: value.updated_at,
            closed_at: value.closed_at,
        }
    }
}

impl From<ApiNote> for Note {
    fn from(value: ApiNote) -> Self {
        Self {
            id: value.id,
            body: value.body.unwrap_or_default(),
            author: value.author,
            system: value.system,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl From<ApiLabelEvent> for LabelEvent {
    fn from(value: ApiLabelEvent) -> Self {
        Self {
            id: value.id,
            author: value.user,
            created_at: value.created_at,
            action: value.action,
            label: value.label,
        }
    }
}

impl From<ApiStateEvent> for StateEvent {
    fn from(value: ApiStateEvent) -> Self {
        Self {
            id: value.id,
            author: value.user,
            created_at: value.created_at,
            state: value.state,
        }
    }
}
