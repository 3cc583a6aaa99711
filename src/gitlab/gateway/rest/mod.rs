//! `reqwest`-backed gateway for the GitLab v4 REST API.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use url::Url;

use crate::gitlab::error::GitLabError;
use crate::gitlab::locator::{IssueRef, PersonalAccessToken, ProjectLocator};
use crate::gitlab::models::{
    ApiIssue, ApiLabelEvent, ApiNote, ApiStateEvent, Issue, LabelEvent, Note, StateEvent,
};
use crate::gitlab::pagination::{Page, PageRequest};
use crate::gitlab::rate_limit::RateLimitInfo;

use super::IssueGateway;
use super::client::build_http_client;
use super::error_mapping::{map_http_error, map_reqwest_error};
use super::http_utils::{extract_gitlab_message, page_info_from_headers};
use super::params::{ListIssuesParams, ListNotesParams, page_pairs};

/// Gateway issuing one HTTP request per requested page.
pub struct RestGateway {
    client: Client,
    api_base: Url,
}

impl RestGateway {
    /// Creates a gateway from a configured client and API base.
    #[must_use]
    pub const fn new(client: Client, api_base: Url) -> Self {
        Self { client, api_base }
    }

    /// Builds an authenticated client for the project's GitLab instance.
    ///
    /// # Errors
    ///
    /// Returns `GitLabError::Configuration` when the token cannot be used as
    /// a header, or `GitLabError::Network` when the client cannot be built.
    pub fn for_token(
        token: &PersonalAccessToken,
        project: &ProjectLocator,
    ) -> Result<Self, GitLabError> {
        let client = build_http_client(token)?;
        Ok(Self::new(client, project.api_base().clone()))
    }

    fn endpoint(&self, segments: &[String]) -> Result<Url, GitLabError> {
        let mut url = self.api_base.clone();
        {
            let mut path = url.path_segments_mut().map_err(|()| {
                GitLabError::InvalidUrl(format!("API base {} cannot hold a path", self.api_base))
            })?;
            path.pop_if_empty().extend(segments);
        }
        Ok(url)
    }

    async fn fetch_page<Api, Item>(
        &self,
        operation: &str,
        segments: &[String],
        query: &[(&'static str, String)],
        page: PageRequest,
    ) -> Result<Page<Item>, GitLabError>
    where
        Api: DeserializeOwned,
        Item: From<Api>,
    {
        let url = self.endpoint(segments)?;
        tracing::debug!(
            operation,
            page = page.page(),
            per_page = page.per_page(),
            "requesting {url}"
        );

        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|error| map_reqwest_error(operation, &error))?;

        let status = response.status();
        if !status.is_success() {
            let rate_limit = RateLimitInfo::from_headers(response.headers());
            let body = response.text().await.unwrap_or_default();
            return Err(map_http_error(
                operation,
                status,
                extract_gitlab_message(&body),
                rate_limit,
            ));
        }

        let page_info = page_info_from_headers(response.headers(), page);
        let items: Vec<Api> = response
            .json()
            .await
            .map_err(|error| map_reqwest_error(operation, &error))?;

        Ok(Page::new(
            items.into_iter().map(Item::from).collect(),
            page_info,
        ))
    }
}

#[async_trait]
impl IssueGateway for RestGateway {
    async fn list_issues(
        &self,
        project: &ProjectLocator,
        params: &ListIssuesParams,
    ) -> Result<Page<Issue>, GitLabError> {
        self.fetch_page::<ApiIssue, Issue>(
            "list issues",
            &project.issues_segments(),
            &params.query_pairs(),
            params.page,
        )
        .await
    }

    async fn list_notes(
        &self,
        issue: &IssueRef,
        params: &ListNotesParams,
    ) -> Result<Page<Note>, GitLabError> {
        self.fetch_page::<ApiNote, Note>(
            "list notes",
            &issue.collection_segments("notes"),
            &params.query_pairs(),
            params.page,
        )
        .await
    }

    async fn list_label_events(
        &self,
        issue: &IssueRef,
        page: PageRequest,
    ) -> Result<Page<LabelEvent>, GitLabError> {
        self.fetch_page::<ApiLabelEvent, LabelEvent>(
            "list label events",
            &issue.collection_segments("resource_label_events"),
            &page_pairs(page),
            page,
        )
        .await
    }

    async fn list_state_events(
        &self,
        issue: &IssueRef,
        page: PageRequest,
    ) -> Result<Page<StateEvent>, GitLabError> {
        self.fetch_page::<ApiStateEvent, StateEvent>(
            "list state events",
            &issue.collection_segments("resource_state_events"),
            &page_pairs(page),
            page,
        )
        .await
    }
}

#[cfg(test)]
mod tests;
