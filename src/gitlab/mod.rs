//! GitLab issue tracker access.
//!
//! This module holds the transport-facing half of the crate: validated
//! project and issue locators, the models returned by the issue, note and
//! resource event endpoints, pagination metadata, and the gateway trait the
//! streaming engine fetches pages through. Errors are mapped into
//! [`GitLabError`] variants so callers never see `reqwest` internals.

pub mod error;
pub mod gateway;
pub mod locator;
pub mod models;
pub mod pagination;
pub mod rate_limit;

pub use error::GitLabError;
pub use gateway::{
    IssueGateway, IssueOrderBy, IssueScope, ListIssuesParams, ListNotesParams, NoteOrderBy,
    RestGateway, SortOrder,
};
pub use locator::{IssueNumber, IssueRef, PersonalAccessToken, ProjectId, ProjectLocator};
pub use models::{
    Author, Issue, IssueStateChange, Label, LabelAction, LabelEvent, Note, StateEvent,
};
pub use pagination::{Page, PageInfo, PageRequest};
pub use rate_limit::RateLimitInfo;

#[cfg(test)]
pub use gateway::MockIssueGateway;

#[cfg(test)]
mod tests;
