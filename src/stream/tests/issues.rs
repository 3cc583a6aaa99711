//! Tests for the issue lister.

use std::sync::Arc;

use rstest::{fixture, rstest};
use tokio_util::sync::CancellationToken;

use super::drain;
use crate::gitlab::gateway::scripted::{ScriptedCollection, ScriptedGateway};
use crate::gitlab::gateway::{IssueOrderBy, IssueScope, SortOrder};
use crate::gitlab::models::test_support::{fixture_time, issue};
use crate::gitlab::{GitLabError, PageRequest, ProjectLocator};
use crate::stream::issues;

#[fixture]
fn project() -> ProjectLocator {
    ProjectLocator::parse("https://gitlab.example.com/group/project").expect("valid project URL")
}

#[rstest]
#[tokio::test]
async fn lists_issues_across_pages_with_update_filter(project: ProjectLocator) {
    let since = fixture_time(0);
    let gateway = Arc::new(
        ScriptedGateway::default().with_issue_pages(vec![vec![issue(1, 10)], vec![issue(2, 20)]]),
    );
    let start = PageRequest::first(1).expect("valid page request");

    let listed = drain(issues(
        Arc::clone(&gateway),
        project,
        since,
        start,
        CancellationToken::new(),
    ))
    .await;

    let iids: Vec<u64> = listed.iter().map(|listed_issue| listed_issue.iid).collect();
    assert_eq!(iids, vec![1, 2]);

    let requests = gateway.requests();
    assert_eq!(requests.len(), 2, "one request per page");
    for (expected_page, request) in (1_u32..).zip(&requests) {
        assert_eq!(request.collection, ScriptedCollection::Issues);
        let params = request.issue_params.as_ref().expect("issue params recorded");
        assert_eq!(params.page.page(), expected_page);
        assert_eq!(params.page.per_page(), 1);
        assert_eq!(params.scope, IssueScope::All);
        assert_eq!(params.sort, SortOrder::Asc);
        assert_eq!(params.order_by, IssueOrderBy::UpdatedAt);
        assert_eq!(params.updated_after, Some(since));
    }
}

#[rstest]
#[tokio::test]
async fn empty_project_ends_after_one_request(project: ProjectLocator) {
    let gateway = Arc::new(ScriptedGateway::default());

    let listed = drain(issues(
        Arc::clone(&gateway),
        project,
        fixture_time(0),
        PageRequest::default(),
        CancellationToken::new(),
    ))
    .await;

    assert!(listed.is_empty());
    assert_eq!(gateway.pages_requested(ScriptedCollection::Issues), vec![1]);
}

#[rstest]
#[tokio::test]
async fn failed_page_ends_the_listing_silently(project: ProjectLocator) {
    let gateway = Arc::new(
        ScriptedGateway::default()
            .with_issue_pages(vec![vec![issue(1, 0)], vec![issue(2, 5)], vec![issue(3, 9)]])
            .failing(
                ScriptedCollection::Issues,
                2,
                GitLabError::Authentication {
                    message: "token revoked".to_owned(),
                },
            ),
    );

    let listed = drain(issues(
        Arc::clone(&gateway),
        project,
        fixture_time(0),
        PageRequest::default(),
        CancellationToken::new(),
    ))
    .await;

    let iids: Vec<u64> = listed.iter().map(|listed_issue| listed_issue.iid).collect();
    assert_eq!(iids, vec![1], "issues before the failure are kept");
    assert_eq!(gateway.pages_requested(ScriptedCollection::Issues), vec![1, 2]);
}

#[rstest]
#[tokio::test]
async fn cancelled_listing_ends(project: ProjectLocator) {
    let gateway = Arc::new(ScriptedGateway::default().stalling(ScriptedCollection::Issues));
    let cancel = CancellationToken::new();
    let stream = issues(
        gateway,
        project,
        fixture_time(0),
        PageRequest::default(),
        cancel.clone(),
    );

    cancel.cancel();

    assert!(drain(stream).await.is_empty());
}
