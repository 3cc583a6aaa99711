//! In-memory gateway serving scripted pages, for tests.
//!
//! Each collection is scripted as a list of pages. Individual pages can be
//! replaced by a failure, and a collection can be made to stall forever to
//! exercise the fan-in's non-blocking guarantees.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use crate::gitlab::error::GitLabError;
use crate::gitlab::locator::{IssueRef, ProjectLocator};
use crate::gitlab::models::{Issue, LabelEvent, Note, StateEvent};
use crate::gitlab::pagination::{Page, PageInfo, PageRequest};

use super::{IssueGateway, ListIssuesParams, ListNotesParams};

/// Collection a scripted request targeted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScriptedCollection {
    /// Project issues.
    Issues,
    /// Issue notes.
    Notes,
    /// Resource label events.
    LabelEvents,
    /// Resource state events.
    StateEvents,
}

/// A request observed by the scripted gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptedRequest {
    /// Collection requested.
    pub collection: ScriptedCollection,
    /// Page number requested.
    pub page: u32,
    /// Issue filters, for issue listings.
    pub issue_params: Option<ListIssuesParams>,
    /// Note ordering, for note listings.
    pub note_params: Option<ListNotesParams>,
}

#[derive(Debug, Clone)]
struct Script<T> {
    pages: Vec<Vec<T>>,
    failures: HashMap<u32, GitLabError>,
    stalled: bool,
}

impl<T> Default for Script<T> {
    fn default() -> Self {
        Self {
            pages: Vec::new(),
            failures: HashMap::new(),
            stalled: false,
        }
    }
}

impl<T: Clone> Script<T> {
    async fn serve(&self, request: PageRequest) -> Result<Page<T>, GitLabError> {
        if self.stalled {
            std::future::pending::<()>().await;
        }

        if let Some(error) = self.failures.get(&request.page()) {
            return Err(error.clone());
        }

        let total = u32::try_from(self.pages.len()).unwrap_or(u32::MAX);
        let index = usize::try_from(request.page().saturating_sub(1)).unwrap_or(usize::MAX);
        let items = self.pages.get(index).cloned().unwrap_or_default();
        let next_page = (request.page() < total).then(|| request.page().saturating_add(1));

        Ok(Page::new(
            items,
            PageInfo::builder(request.page(), request.per_page())
                .total_pages(Some(total))
                .next_page(next_page)
                .build(),
        ))
    }
}

/// Gateway answering from scripted pages instead of the network.
///
/// # Example
///
/// ```
/// use gitlab_mirror::gitlab::gateway::scripted::ScriptedGateway;
/// use gitlab_mirror::gitlab::models::test_support::note;
///
/// let gateway = ScriptedGateway::default()
///     .with_note_pages(vec![vec![note(1, "first")], vec![note(2, "second")]]);
/// assert!(gateway.requests().is_empty());
/// ```
#[derive(Debug, Default)]
pub struct ScriptedGateway {
    issues: Script<Issue>,
    notes: Script<Note>,
    label_events: Script<LabelEvent>,
    state_events: Script<StateEvent>,
    requests: Mutex<Vec<ScriptedRequest>>,
}

impl ScriptedGateway {
    /// Scripts the issue listing.
    #[must_use]
    pub fn with_issue_pages(mut self, pages: Vec<Vec<Issue>>) -> Self {
        self.issues.pages = pages;
        self
    }

    /// Scripts the note listing.
    #[must_use]
    pub fn with_note_pages(mut self, pages: Vec<Vec<Note>>) -> Self {
        self.notes.pages = pages;
        self
    }

    /// Scripts the label event listing.
    #[must_use]
    pub fn with_label_event_pages(mut self, pages: Vec<Vec<LabelEvent>>) -> Self {
        self.label_events.pages = pages;
        self
    }

    /// Scripts the state event listing.
    #[must_use]
    pub fn with_state_event_pages(mut self, pages: Vec<Vec<StateEvent>>) -> Self {
        self.state_events.pages = pages;
        self
    }

    /// Makes `page` of `collection` fail with `error`.
    #[must_use]
    pub fn failing(
        mut self,
        collection: ScriptedCollection,
        page: u32,
        error: GitLabError,
    ) -> Self {
        match collection {
            ScriptedCollection::Issues => self.issues.failures.insert(page, error),
            ScriptedCollection::Notes => self.notes.failures.insert(page, error),
            ScriptedCollection::LabelEvents => self.label_events.failures.insert(page, error),
            ScriptedCollection::StateEvents => self.state_events.failures.insert(page, error),
        };
        self
    }

    /// Makes every request for `collection` hang forever.
    #[must_use]
    pub fn stalling(mut self, collection: ScriptedCollection) -> Self {
        match collection {
            ScriptedCollection::Issues => self.issues.stalled = true,
            ScriptedCollection::Notes => self.notes.stalled = true,
            ScriptedCollection::LabelEvents => self.label_events.stalled = true,
            ScriptedCollection::StateEvents => self.state_events.stalled = true,
        }
        self
    }

    /// Requests observed so far, in arrival order.
    #[must_use]
    pub fn requests(&self) -> Vec<ScriptedRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Page numbers requested for one collection, in arrival order.
    #[must_use]
    pub fn pages_requested(&self, collection: ScriptedCollection) -> Vec<u32> {
        self.requests()
            .into_iter()
            .filter(|request| request.collection == collection)
            .map(|request| request.page)
            .collect()
    }

    fn record(&self, request: ScriptedRequest) {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request);
    }
}

#[async_trait]
impl IssueGateway for ScriptedGateway {
    async fn list_issues(
        &self,
        _project: &ProjectLocator,
        params: &ListIssuesParams,
    ) -> Result<Page<Issue>, GitLabError> {
        self.record(ScriptedRequest {
            collection: ScriptedCollection::Issues,
            page: params.page.page(),
            issue_params: Some(params.clone()),
            note_params: None,
        });
        self.issues.serve(params.page).await
    }

    async fn list_notes(
        &self,
        _issue: &IssueRef,
        params: &ListNotesParams,
    ) -> Result<Page<Note>, GitLabError> {
        self.record(ScriptedRequest {
            collection: ScriptedCollection::Notes,
            page: params.page.page(),
            issue_params: None,
            note_params: Some(*params),
        });
        self.notes.serve(params.page).await
    }

    async fn list_label_events(
        &self,
        _issue: &IssueRef,
        page: PageRequest,
    ) -> Result<Page<LabelEvent>, GitLabError> {
        self.record(ScriptedRequest {
            collection: ScriptedCollection::LabelEvents,
            page: page.page(),
            issue_params: None,
            note_params: None,
        });
        self.label_events.serve(page).await
    }

    async fn list_state_events(
        &self,
        _issue: &IssueRef,
        page: PageRequest,
    ) -> Result<Page<StateEvent>, GitLabError> {
        self.record(ScriptedRequest {
            collection: ScriptedCollection::StateEvents,
            page: page.page(),
            issue_params: None,
            note_params: None,
        });
        self.state_events.serve(page).await
    }
}
