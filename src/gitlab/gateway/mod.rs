//! Gateways for listing GitLab issues and their activity collections.
//!
//! [`IssueGateway`] is the transport seam: every paginated list operation
//! the streaming engine needs goes through it. [`RestGateway`] talks to the
//! GitLab v4 REST API; tests substitute a mock or the scripted gateway.

mod client;
mod error_mapping;
mod http_utils;
mod params;
mod rest;
#[cfg(any(test, feature = "test-support"))]
pub mod scripted;

pub use params::{
    IssueOrderBy, IssueScope, ListIssuesParams, ListNotesParams, NoteOrderBy, SortOrder,
};
pub use rest::RestGateway;

use async_trait::async_trait;

use crate::gitlab::error::GitLabError;
use crate::gitlab::locator::{IssueRef, ProjectLocator};
use crate::gitlab::models::{Issue, LabelEvent, Note, StateEvent};
use crate::gitlab::pagination::{Page, PageRequest};

/// Gateway that can list one page of an issue-related collection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IssueGateway: Send + Sync {
    /// List one page of project issues.
    async fn list_issues(
        &self,
        project: &ProjectLocator,
        params: &ListIssuesParams,
    ) -> Result<Page<Issue>, GitLabError>;

    /// List one page of notes on an issue.
    async fn list_notes(
        &self,
        issue: &IssueRef,
        params: &ListNotesParams,
    ) -> Result<Page<Note>, GitLabError>;

    /// List one page of an issue's resource label events.
    async fn list_label_events(
        &self,
        issue: &IssueRef,
        page: PageRequest,
    ) -> Result<Page<LabelEvent>, GitLabError>;

    /// List one page of an issue's resource state events.
    async fn list_state_events(
        &self,
        issue: &IssueRef,
        page: PageRequest,
    ) -> Result<Page<StateEvent>, GitLabError>;
}
