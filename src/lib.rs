//! gitlab-mirror library crate: streams GitLab issues and their change
//! history.
//!
//! [`stream::issues`] walks a project's issue listing page by page, and
//! [`stream::issue_events`] merges the notes, label events, and state events
//! of one issue into a single stream of [`stream::Event`]s. All network
//! access goes through the [`gitlab::IssueGateway`] trait; [`RestGateway`]
//! implements it against the GitLab v4 REST API.

pub mod config;
pub mod gitlab;
pub mod stream;
pub mod text;

pub use config::GitLabMirrorConfig;
pub use gitlab::{
    GitLabError, IssueGateway, IssueRef, PageRequest, PersonalAccessToken, ProjectLocator,
    RestGateway,
};
pub use stream::{Event, issue_events, issues};
