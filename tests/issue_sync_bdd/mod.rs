//! Support modules for the issue synchronisation BDD tests.

pub(crate) mod harness;
pub(crate) mod state;

pub(crate) use harness::{
    PROJECT_ID, TOKEN, issue_json, label_event_json, note_json, paginated, state_event_json,
};
pub(crate) use state::{SyncState, ensure_runtime_and_server, mount};
