//! Tests for the REST gateway.

use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::RestGateway;
use crate::gitlab::error::GitLabError;
use crate::gitlab::gateway::{IssueGateway, ListIssuesParams, ListNotesParams};
use crate::gitlab::locator::{IssueNumber, IssueRef, PersonalAccessToken, ProjectLocator};
use crate::gitlab::models::{IssueStateChange, LabelAction};
use crate::gitlab::pagination::PageRequest;

const EXPECTED_RATE_LIMIT_RESET_AT: u64 = 1_700_000_000;

struct GatewayFixture {
    server: MockServer,
    project: ProjectLocator,
    gateway: RestGateway,
}

async fn gateway_fixture() -> GatewayFixture {
    let server = MockServer::start().await;
    let project =
        ProjectLocator::from_instance(&server.uri(), "42").expect("should create project locator");
    let token = PersonalAccessToken::new("glpat-valid").expect("token should be valid");
    let gateway = RestGateway::for_token(&token, &project).expect("should create gateway");
    GatewayFixture {
        server,
        project,
        gateway,
    }
}

fn issue_ref() -> IssueRef {
    IssueRef::new(42, IssueNumber::new(7).expect("issue number should be valid"))
}

#[tokio::test]
async fn list_issues_sends_filters_and_reads_pagination_headers() {
    let fixture = gateway_fixture().await;

    let response = ResponseTemplate::new(200)
        .set_body_json(json!([{
            "id": 1007,
            "iid": 7,
            "project_id": 42,
            "title": "Crash on start",
            "state": "opened",
            "labels": [],
            "created_at": "2024-01-01T00:00:00Z",
            "updated_at": "2024-01-05T00:00:00Z"
        }]))
        .insert_header("X-Page", "2")
        .insert_header("X-Per-Page", "1")
        .insert_header("X-Total-Pages", "3")
        .insert_header("X-Next-Page", "3");

    Mock::given(method("GET"))
        .and(path("/api/v4/projects/42/issues"))
        .and(header("private-token", "glpat-valid"))
        .and(query_param("scope", "all"))
        .and(query_param("sort", "asc"))
        .and(query_param("order_by", "updated_at"))
        .and(query_param("updated_after", "2024-01-01T00:00:00Z"))
        .and(query_param("page", "2"))
        .and(query_param("per_page", "1"))
        .respond_with(response)
        .expect(1)
        .mount(&fixture.server)
        .await;

    let params = ListIssuesParams {
        updated_after: Some(crate::gitlab::models::test_support::fixture_time(0)),
        page: PageRequest::new(2, 1).expect("valid page request"),
        ..ListIssuesParams::default()
    };
    let page = fixture
        .gateway
        .list_issues(&fixture.project, &params)
        .await
        .expect("request should succeed");

    assert_eq!(page.items.len(), 1, "expected one issue");
    let first = page.items.first().expect("should have first issue");
    assert_eq!(first.iid, 7);
    assert_eq!(page.page_info.current_page(), 2);
    assert_eq!(page.page_info.total_pages(), Some(3));
    assert_eq!(page.page_info.following_page(), Some(3));
}

#[tokio::test]
async fn list_issues_percent_encodes_project_paths() {
    let server = MockServer::start().await;
    let project = ProjectLocator::from_instance(&server.uri(), "group/project")
        .expect("should create project locator");
    let token = PersonalAccessToken::new("glpat-valid").expect("token should be valid");
    let gateway = RestGateway::for_token(&token, &project).expect("should create gateway");

    Mock::given(method("GET"))
        .and(path("/api/v4/projects/group%2Fproject/issues"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let page = gateway
        .list_issues(&project, &ListIssuesParams::default())
        .await
        .expect("request should succeed");

    assert!(page.items.is_empty());
    assert!(page.page_info.is_last_page());
}

#[tokio::test]
async fn list_notes_requests_creation_order() {
    let fixture = gateway_fixture().await;

    Mock::given(method("GET"))
        .and(path("/api/v4/projects/42/issues/7/notes"))
        .and(query_param("sort", "asc"))
        .and(query_param("order_by", "created_at"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "body": "first", "system": false, "created_at": "2024-01-01T00:00:00Z" },
            { "id": 2, "body": "second", "system": true, "created_at": "2024-01-02T00:00:00Z" }
        ])))
        .mount(&fixture.server)
        .await;

    let page = fixture
        .gateway
        .list_notes(&issue_ref(), &ListNotesParams::default())
        .await
        .expect("request should succeed");

    let bodies: Vec<&str> = page.items.iter().map(|note| note.body.as_str()).collect();
    assert_eq!(bodies, vec!["first", "second"]);
}

#[tokio::test]
async fn list_label_and_state_events_use_resource_event_paths() {
    let fixture = gateway_fixture().await;

    Mock::given(method("GET"))
        .and(path("/api/v4/projects/42/issues/7/resource_label_events"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": 3,
            "user": { "id": 1, "username": "alice" },
            "created_at": "2024-01-01T00:00:00Z",
            "resource_type": "Issue",
            "resource_id": 1007,
            "label": { "id": 9, "name": "bug", "color": "#ff0000" },
            "action": "add"
        }])))
        .mount(&fixture.server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v4/projects/42/issues/7/resource_state_events"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": 4,
            "user": { "id": 1, "username": "alice" },
            "created_at": "2024-01-03T00:00:00Z",
            "resource_type": "Issue",
            "resource_id": 1007,
            "state": "closed"
        }])))
        .mount(&fixture.server)
        .await;

    let labels = fixture
        .gateway
        .list_label_events(&issue_ref(), PageRequest::default())
        .await
        .expect("label events should load");
    let states = fixture
        .gateway
        .list_state_events(&issue_ref(), PageRequest::default())
        .await
        .expect("state events should load");

    assert_eq!(
        labels.items.first().map(|event| event.action),
        Some(LabelAction::Add)
    );
    assert_eq!(
        states.items.first().map(|event| event.state),
        Some(IssueStateChange::Closed)
    );
}

#[tokio::test]
async fn maps_rate_limit_responses() {
    let fixture = gateway_fixture().await;

    let response = ResponseTemplate::new(429)
        .set_body_json(json!({ "message": "Retry later" }))
        .insert_header("RateLimit-Limit", "2000")
        .insert_header("RateLimit-Remaining", "0")
        .insert_header("RateLimit-Reset", EXPECTED_RATE_LIMIT_RESET_AT.to_string());

    Mock::given(method("GET"))
        .and(path("/api/v4/projects/42/issues/7/notes"))
        .respond_with(response)
        .mount(&fixture.server)
        .await;

    let error = fixture
        .gateway
        .list_notes(&issue_ref(), &ListNotesParams::default())
        .await
        .expect_err("request should fail");

    match error {
        GitLabError::RateLimitExceeded {
            rate_limit,
            message,
        } => {
            let info = rate_limit.expect("expected rate_limit info to be populated");
            assert_eq!(info.reset_at(), EXPECTED_RATE_LIMIT_RESET_AT);
            assert!(message.contains("Retry later"), "unexpected message: {message}");
        }
        other => panic!("expected RateLimitExceeded, got {other:?}"),
    }
}

#[tokio::test]
async fn maps_unauthorized_responses() {
    let fixture = gateway_fixture().await;

    Mock::given(method("GET"))
        .and(path("/api/v4/projects/42/issues"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "message": "401 Unauthorized" })),
        )
        .mount(&fixture.server)
        .await;

    let error = fixture
        .gateway
        .list_issues(&fixture.project, &ListIssuesParams::default())
        .await
        .expect_err("request should fail");

    assert!(
        matches!(
            error,
            GitLabError::Authentication { ref message } if message.contains("401 Unauthorized")
        ),
        "expected Authentication, got {error:?}"
    );
}

#[tokio::test]
async fn maps_malformed_bodies_to_decode_errors() {
    let fixture = gateway_fixture().await;

    Mock::given(method("GET"))
        .and(path("/api/v4/projects/42/issues/7/resource_state_events"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&fixture.server)
        .await;

    let error = fixture
        .gateway
        .list_state_events(&issue_ref(), PageRequest::default())
        .await
        .expect_err("request should fail");

    assert!(
        matches!(error, GitLabError::Decode { .. }),
        "expected Decode, got {error:?}"
    );
}
