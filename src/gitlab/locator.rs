//! URL parsing and identity wrappers for GitLab projects and issues.

use url::Url;

use super::error::GitLabError;

/// Host of the public GitLab instance.
pub const GITLAB_COM: &str = "https://gitlab.com";

/// Project identifier: either the numeric id or the full namespace path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectId {
    /// Numeric project id (e.g. `278964`).
    Numeric(u64),
    /// Namespace path (e.g. `gitlab-org/gitlab`).
    Path(String),
}

impl ProjectId {
    /// Parses a numeric id or a `namespace/project` path.
    ///
    /// # Errors
    ///
    /// Returns [`GitLabError::InvalidProject`] when the value is blank, when
    /// a path has fewer than two segments, or when a segment is empty.
    pub fn parse(value: &str) -> Result<Self, GitLabError> {
        let trimmed = value.trim().trim_matches('/');
        let invalid = || GitLabError::InvalidProject {
            value: value.to_owned(),
        };

        if trimmed.is_empty() {
            return Err(invalid());
        }

        if let Ok(id) = trimmed.parse::<u64>() {
            return if id == 0 { Err(invalid()) } else { Ok(Self::Numeric(id)) };
        }

        let segments: Vec<&str> = trimmed.split('/').collect();
        if segments.len() < 2 || segments.iter().any(|segment| segment.is_empty()) {
            return Err(invalid());
        }

        Ok(Self::Path(trimmed.to_owned()))
    }

    /// Value used in the `:id` slot of API paths, before percent-encoding.
    #[must_use]
    pub fn as_path_segment(&self) -> String {
        match self {
            Self::Numeric(id) => id.to_string(),
            Self::Path(path) => path.clone(),
        }
    }
}

/// Internal id of an issue within its project (`iid`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IssueNumber(u64);

impl IssueNumber {
    /// Wraps a positive issue number.
    ///
    /// # Errors
    ///
    /// Returns [`GitLabError::InvalidIssueNumber`] for zero.
    pub const fn new(value: u64) -> Result<Self, GitLabError> {
        if value == 0 {
            return Err(GitLabError::InvalidIssueNumber);
        }
        Ok(Self(value))
    }

    /// Returns the numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Address of one issue's sub-collections: project id plus issue iid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IssueRef {
    project_id: u64,
    iid: IssueNumber,
}

impl IssueRef {
    /// Creates an issue reference.
    #[must_use]
    pub const fn new(project_id: u64, iid: IssueNumber) -> Self {
        Self { project_id, iid }
    }

    /// Numeric id of the owning project.
    #[must_use]
    pub const fn project_id(&self) -> u64 {
        self.project_id
    }

    /// Issue number within the project.
    #[must_use]
    pub const fn iid(&self) -> IssueNumber {
        self.iid
    }

    pub(crate) fn collection_segments(&self, collection: &str) -> Vec<String> {
        vec![
            "projects".to_owned(),
            self.project_id.to_string(),
            "issues".to_owned(),
            self.iid.get().to_string(),
            collection.to_owned(),
        ]
    }
}

/// Personal access token wrapper enforcing presence.
#[derive(Clone, PartialEq, Eq)]
pub struct PersonalAccessToken(String);

impl PersonalAccessToken {
    /// Validates that the token is non-empty and trims whitespace.
    ///
    /// # Errors
    ///
    /// Returns `GitLabError::MissingToken` when the supplied string is blank.
    pub fn new(token: impl AsRef<str>) -> Result<Self, GitLabError> {
        let trimmed = token.as_ref().trim();
        if trimmed.is_empty() {
            return Err(GitLabError::MissingToken);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the token value.
    #[must_use]
    pub const fn value(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for PersonalAccessToken {
    fn as_ref(&self) -> &str {
        self.value()
    }
}

impl std::fmt::Debug for PersonalAccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PersonalAccessToken(<redacted>)")
    }
}

/// Derives the REST API base (`<instance>/api/v4`) from an instance URL.
///
/// With `keep_path` the instance path is kept as a relative root, so
/// `https://host/gitlab` maps to `https://host/gitlab/api/v4`. Without it the
/// path is discarded, as it names the project rather than the instance.
fn derive_api_base(instance: &Url, keep_path: bool) -> Result<Url, GitLabError> {
    if instance.host_str().is_none() {
        return Err(GitLabError::InvalidUrl("URL must include a host".to_owned()));
    }

    let mut api_base = instance.clone();
    api_base.set_query(None);
    api_base.set_fragment(None);
    if !keep_path {
        api_base.set_path("");
    }
    api_base
        .path_segments_mut()
        .map_err(|()| GitLabError::InvalidUrl(format!("{instance} cannot hold a path")))?
        .pop_if_empty()
        .extend(["api", "v4"]);
    Ok(api_base)
}

/// A GitLab project together with the API base it is served from.
///
/// # Example
///
/// ```
/// use gitlab_mirror::gitlab::locator::ProjectLocator;
///
/// let locator = ProjectLocator::parse("https://gitlab.com/group/sub/project")
///     .expect("should parse project URL");
/// assert_eq!(locator.api_base().as_str(), "https://gitlab.com/api/v4");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLocator {
    api_base: Url,
    project: ProjectId,
}

impl ProjectLocator {
    /// Parses a project web URL such as `https://gitlab.com/group/project`.
    ///
    /// Trailing `/-/...` routes (issues lists, merge requests) are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`GitLabError::InvalidUrl`] when the URL cannot be parsed and
    /// [`GitLabError::InvalidProject`] when the path does not name a project.
    pub fn parse(input: &str) -> Result<Self, GitLabError> {
        let parsed =
            Url::parse(input).map_err(|error| GitLabError::InvalidUrl(error.to_string()))?;

        let project_path = parsed
            .path()
            .split("/-/")
            .next()
            .unwrap_or_default()
            .to_owned();
        let project = ProjectId::parse(&project_path)?;
        let api_base = derive_api_base(&parsed, false)?;

        Ok(Self { api_base, project })
    }

    /// Builds a locator from an instance URL and a project id or path.
    ///
    /// The instance URL may carry a relative root such as
    /// `https://example.com/gitlab`; the API base is nested under it.
    ///
    /// # Errors
    ///
    /// Returns [`GitLabError::InvalidUrl`] for a malformed instance URL and
    /// [`GitLabError::InvalidProject`] for a malformed project.
    pub fn from_instance(instance: &str, project: &str) -> Result<Self, GitLabError> {
        let parsed =
            Url::parse(instance).map_err(|error| GitLabError::InvalidUrl(error.to_string()))?;
        Ok(Self {
            api_base: derive_api_base(&parsed, true)?,
            project: ProjectId::parse(project)?,
        })
    }

    /// API base URL derived from the instance host.
    #[must_use]
    pub const fn api_base(&self) -> &Url {
        &self.api_base
    }

    /// Project identifier.
    #[must_use]
    pub const fn project(&self) -> &ProjectId {
        &self.project
    }

    pub(crate) fn issues_segments(&self) -> Vec<String> {
        vec![
            "projects".to_owned(),
            self.project.as_path_segment(),
            "issues".to_owned(),
        ]
    }
}
