//! Event vocabulary shared by every per-issue stream.

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

use crate::gitlab::error::GitLabError;
use crate::gitlab::models::{LabelEvent, Note, StateEvent};
use crate::text::cleanup_one_line;

/// Sub-collection an event was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventSource {
    /// Issue notes (comments and system notes).
    Notes,
    /// Resource label events.
    LabelEvents,
    /// Resource state events.
    StateEvents,
}

impl EventSource {
    /// Short name used in logs.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Notes => "notes",
            Self::LabelEvents => "label_events",
            Self::StateEvents => "state_events",
        }
    }
}

/// A page of one sub-collection could not be fetched.
///
/// The failure is recoverable from the consumer's point of view: sibling
/// collections keep streaming, and the consumer decides whether the issue
/// can still be translated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorEvent {
    source: EventSource,
    #[serde(serialize_with = "serialize_display")]
    error: GitLabError,
    occurred_at: DateTime<Utc>,
}

impl ErrorEvent {
    /// Records `error` for `source` at `occurred_at`.
    #[must_use]
    pub const fn new(source: EventSource, error: GitLabError, occurred_at: DateTime<Utc>) -> Self {
        Self {
            source,
            error,
            occurred_at,
        }
    }

    /// Records `error` for `source`, stamped with the current time.
    #[must_use]
    pub fn now(source: EventSource, error: GitLabError) -> Self {
        Self::new(source, error, Utc::now())
    }

    /// Collection whose fetch failed.
    #[must_use]
    pub const fn source(&self) -> EventSource {
        self.source
    }

    /// The failure.
    #[must_use]
    pub const fn error(&self) -> &GitLabError {
        &self.error
    }

    /// When the failure was captured.
    #[must_use]
    pub const fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
}

fn serialize_display<S: Serializer>(error: &GitLabError, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(error)
}

/// One change on an issue, or a failure to read some of its changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Event {
    /// A comment or system note, verbatim.
    Note(Note),
    /// A label change with its label name reduced to one clean line.
    LabelChange(LabelEvent),
    /// An open/close change, verbatim.
    StateChange(StateEvent),
    /// A page fetch failed; its collection produced nothing further.
    Error(ErrorEvent),
}

impl Event {
    /// Wraps a label event, repairing the label's display name.
    #[must_use]
    pub fn label_change(mut event: LabelEvent) -> Self {
        if let Some(label) = event.label.as_mut() {
            label.name = cleanup_one_line(&label.name);
        }
        Self::LabelChange(event)
    }

    /// Collection this event came from.
    #[must_use]
    pub const fn source(&self) -> EventSource {
        match self {
            Self::Note(_) => EventSource::Notes,
            Self::LabelChange(_) => EventSource::LabelEvents,
            Self::StateChange(_) => EventSource::StateEvents,
            Self::Error(error) => error.source(),
        }
    }

    /// Returns true for [`Event::Error`].
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    /// When the change happened, or when the failure was captured.
    #[must_use]
    pub const fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            Self::Note(note) => note.created_at,
            Self::LabelChange(event) => event.created_at,
            Self::StateChange(event) => event.created_at,
            Self::Error(error) => error.occurred_at(),
        }
    }
}
