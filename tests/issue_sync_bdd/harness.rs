//! JSON payloads and pagination headers for the issue synchronisation BDD
//! tests.

use serde_json::{Value, json};
use wiremock::ResponseTemplate;

/// Numeric id of the project served by the mock API.
pub(crate) const PROJECT_ID: u64 = 42;

/// Token the client authenticates with.
pub(crate) const TOKEN: &str = "glpat-bdd";

/// Issue `iid` updated `day` days into January 2024.
pub(crate) fn issue_json(iid: u64, day: u32) -> Value {
    json!({
        "id": iid + 1000,
        "iid": iid,
        "project_id": PROJECT_ID,
        "title": format!("Issue {iid}"),
        "state": "opened",
        "labels": [],
        "author": { "id": 1, "username": "alice", "name": "Alice" },
        "created_at": "2024-01-01T00:00:00Z",
        "updated_at": format!("2024-01-{day:02}T00:00:00Z")
    })
}

pub(crate) fn note_json(id: u64) -> Value {
    json!({
        "id": id,
        "body": format!("note {id}"),
        "author": { "id": 2, "username": "bob", "name": null },
        "system": false,
        "created_at": "2024-01-02T00:00:00Z"
    })
}

pub(crate) fn label_event_json(id: u64, name: &str) -> Value {
    json!({
        "id": id,
        "user": { "id": 2, "username": "bob", "name": null },
        "created_at": "2024-01-03T00:00:00Z",
        "action": "add",
        "label": { "id": id, "name": name, "color": "#ff0000", "description": null }
    })
}

pub(crate) fn state_event_json(id: u64) -> Value {
    json!({
        "id": id,
        "user": { "id": 2, "username": "bob", "name": null },
        "created_at": "2024-01-04T00:00:00Z",
        "state": "closed"
    })
}

/// A 200 response carrying `items` as page `page` of `total`.
pub(crate) fn paginated(items: &[Value], page: u32, per_page: u32, total: u32) -> ResponseTemplate {
    let next = if page < total {
        (page + 1).to_string()
    } else {
        String::new()
    };
    ResponseTemplate::new(200)
        .set_body_json(items)
        .insert_header("X-Page", page.to_string())
        .insert_header("X-Per-Page", per_page.to_string())
        .insert_header("X-Total-Pages", total.to_string())
        .insert_header("X-Next-Page", next)
}
