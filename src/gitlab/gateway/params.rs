//! Query parameters for the list operations.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::gitlab::pagination::PageRequest;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Oldest first.
    #[default]
    Asc,
}

impl SortOrder {
    /// Returns the API parameter value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
        }
    }
}

/// Which issues to list relative to the authenticated user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IssueScope {
    /// Every issue visible to the user, open and closed.
    #[default]
    All,
}

impl IssueScope {
    /// Returns the API parameter value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
        }
    }
}

/// Field issues are ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IssueOrderBy {
    /// Last update time.
    #[default]
    UpdatedAt,
}

impl IssueOrderBy {
    /// Returns the API parameter value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::UpdatedAt => "updated_at",
        }
    }
}

/// Field notes are ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NoteOrderBy {
    /// Creation time.
    #[default]
    CreatedAt,
}

impl NoteOrderBy {
    /// Returns the API parameter value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CreatedAt => "created_at",
        }
    }
}

/// Parameters for listing project issues.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListIssuesParams {
    /// Only issues updated at or after this instant.
    pub updated_after: Option<DateTime<Utc>>,
    /// Scope filter. Defaults to all issues.
    pub scope: IssueScope,
    /// Sort direction. Defaults to ascending.
    pub sort: SortOrder,
    /// Ordering field. Defaults to update time.
    pub order_by: IssueOrderBy,
    /// Page to fetch.
    pub page: PageRequest,
}

impl ListIssuesParams {
    /// Query pairs in the order they are sent.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("scope", self.scope.as_str().to_owned()),
            ("sort", self.sort.as_str().to_owned()),
            ("order_by", self.order_by.as_str().to_owned()),
        ];
        if let Some(updated_after) = self.updated_after {
            pairs.push((
                "updated_after",
                updated_after.to_rfc3339_opts(SecondsFormat::Secs, true),
            ));
        }
        pairs.extend(page_pairs(self.page));
        pairs
    }
}

/// Parameters for listing issue notes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ListNotesParams {
    /// Sort direction. Defaults to ascending.
    pub sort: SortOrder,
    /// Ordering field. Defaults to creation time.
    pub order_by: NoteOrderBy,
    /// Page to fetch.
    pub page: PageRequest,
}

impl ListNotesParams {
    /// Query pairs in the order they are sent.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("sort", self.sort.as_str().to_owned()),
            ("order_by", self.order_by.as_str().to_owned()),
        ];
        pairs.extend(page_pairs(self.page));
        pairs
    }
}

pub(super) fn page_pairs(page: PageRequest) -> [(&'static str, String); 2] {
    [
        ("page", page.page().to_string()),
        ("per_page", page.per_page().to_string()),
    ]
}
