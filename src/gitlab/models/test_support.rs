//! Builders for model fixtures used by tests.
//!
//! # Examples
//!
//! ```
//! use gitlab_mirror::gitlab::models::test_support::{issue, note};
//!
//! let first = issue(1, 10);
//! assert_eq!(first.iid, 1);
//! let comment = note(7, "looks good");
//! assert_eq!(comment.body, "looks good");
//! ```

use chrono::{DateTime, TimeZone, Utc};

use super::{Author, Issue, IssueStateChange, Label, LabelAction, LabelEvent, Note, StateEvent};

/// Project id shared by every fixture.
pub const FIXTURE_PROJECT_ID: u64 = 42;

/// Fixed instant `2024-01-01T00:00:00Z` plus `offset_seconds`.
#[must_use]
pub fn fixture_time(offset_seconds: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(1_704_067_200_i64.saturating_add(offset_seconds), 0)
        .single()
        .unwrap_or_default()
}

fn fixture_author() -> Author {
    Author {
        id: 1,
        username: "alice".to_owned(),
        name: Some("Alice".to_owned()),
    }
}

/// Issue `iid` in the fixture project, updated `updated_offset` seconds
/// after the fixture epoch.
#[must_use]
pub fn issue(iid: u64, updated_offset: i64) -> Issue {
    Issue {
        id: iid.saturating_add(1000),
        iid,
        project_id: FIXTURE_PROJECT_ID,
        title: format!("Issue {iid}"),
        description: None,
        state: "opened".to_owned(),
        labels: Vec::new(),
        author: Some(fixture_author()),
        web_url: None,
        created_at: fixture_time(0),
        updated_at: fixture_time(updated_offset),
        closed_at: None,
    }
}

/// Note with the given id and body.
#[must_use]
pub fn note(id: u64, body: &str) -> Note {
    Note {
        id,
        body: body.to_owned(),
        author: Some(fixture_author()),
        system: false,
        created_at: fixture_time(0),
        updated_at: None,
    }
}

/// Label event adding a label named `name`.
#[must_use]
pub fn label_event(id: u64, name: &str) -> LabelEvent {
    LabelEvent {
        id,
        author: Some(fixture_author()),
        created_at: fixture_time(0),
        action: LabelAction::Add,
        label: Some(Label {
            id,
            name: name.to_owned(),
            color: None,
            description: None,
        }),
    }
}

/// State event reaching `state`.
#[must_use]
pub fn state_event(id: u64, state: IssueStateChange) -> StateEvent {
    StateEvent {
        id,
        author: Some(fixture_author()),
        created_at: fixture_time(0),
        state,
    }
}
