//! Application configuration loaded from CLI, environment, and files.
//!
//! Values are merged with ortho-config's layered approach.
//!
//! # Precedence
//!
//! Configuration values are loaded with the following precedence (lowest to
//! highest):
//!
//! 1. **Defaults** – Built-in application defaults
//! 2. **Configuration file** – `.gitlab-mirror.toml` in the current
//!    directory, home directory, or XDG config directory
//! 3. **Environment variables** – `GITLAB_MIRROR_PROJECT`,
//!    `GITLAB_MIRROR_TOKEN`, or the shared `GITLAB_TOKEN`
//! 4. **Command-line arguments** – `--project`/`-p`, `--token`/`-t`, and
//!    friends
//!
//! # Configuration File
//!
//! ```toml
//! base_url = "https://gitlab.example.com"
//! project = "group/project"
//! token = "glpat-example"
//! since = "2024-01-01T00:00:00Z"
//! per_page = 50
//! ```

use std::env;

use chrono::{DateTime, Utc};
use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

use crate::gitlab::error::GitLabError;
use crate::gitlab::locator::{GITLAB_COM, PersonalAccessToken, ProjectLocator};
use crate::gitlab::pagination::{MAX_PER_PAGE, PageRequest};

/// Environment variable consulted when no token is configured.
pub const SHARED_TOKEN_VAR: &str = "GITLAB_TOKEN";

/// Application configuration supporting CLI, environment, and file sources.
///
/// # Example
///
/// ```no_run
/// use gitlab_mirror::GitLabMirrorConfig;
/// use ortho_config::OrthoConfig;
///
/// let config = GitLabMirrorConfig::load().expect("failed to load configuration");
/// let project = config.project_locator().expect("project required");
/// let token = config.resolve_token().expect("token required");
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "GITLAB_MIRROR",
    discovery(
        dotfile_name = ".gitlab-mirror.toml",
        config_file_name = "gitlab-mirror.toml",
        app_name = "gitlab-mirror"
    )
)]
pub struct GitLabMirrorConfig {
    /// Base URL of the GitLab instance.
    ///
    /// Ignored when `project` is a full project URL.
    ///
    /// Can be provided via:
    /// - CLI: `--base-url <URL>` or `-b <URL>`
    /// - Environment: `GITLAB_MIRROR_BASE_URL`
    /// - Config file: `base_url = "..."`
    #[ortho_config(cli_short = 'b')]
    pub base_url: String,

    /// Personal access token for GitLab API authentication.
    ///
    /// Can be provided via:
    /// - CLI: `--token <TOKEN>` or `-t <TOKEN>`
    /// - Environment: `GITLAB_MIRROR_TOKEN` or `GITLAB_TOKEN`
    /// - Config file: `token = "..."`
    #[ortho_config(cli_short = 't')]
    pub token: Option<String>,

    /// Project to mirror: a numeric id, a `group/project` path, or a full
    /// project URL.
    ///
    /// Can be provided via:
    /// - CLI: `--project <PROJECT>` or `-p <PROJECT>`
    /// - Environment: `GITLAB_MIRROR_PROJECT`
    /// - Config file: `project = "..."`
    #[ortho_config(cli_short = 'p')]
    pub project: Option<String>,

    /// Only issues updated at or after this RFC 3339 instant are listed.
    ///
    /// Defaults to the Unix epoch.
    ///
    /// Can be provided via:
    /// - CLI: `--since <TIME>` or `-s <TIME>`
    /// - Environment: `GITLAB_MIRROR_SINCE`
    /// - Config file: `since = "..."`
    #[ortho_config(cli_short = 's')]
    pub since: Option<String>,

    /// Items requested per page, between 1 and 100.
    ///
    /// Can be provided via:
    /// - CLI: `--per-page <N>`
    /// - Environment: `GITLAB_MIRROR_PER_PAGE`
    /// - Config file: `per_page = 50`
    #[ortho_config()]
    pub per_page: u8,
}

impl Default for GitLabMirrorConfig {
    fn default() -> Self {
        Self {
            base_url: GITLAB_COM.to_owned(),
            token: None,
            project: None,
            since: None,
            per_page: MAX_PER_PAGE,
        }
    }
}

impl GitLabMirrorConfig {
    /// Resolves the token from configuration or the shared `GITLAB_TOKEN`
    /// environment variable.
    ///
    /// A blank configured token counts as absent.
    ///
    /// # Errors
    ///
    /// Returns [`GitLabError::MissingToken`] when no source provides a
    /// non-blank value.
    pub fn resolve_token(&self) -> Result<PersonalAccessToken, GitLabError> {
        let value = self
            .token
            .clone()
            .filter(|token| !token.trim().is_empty())
            .or_else(|| env::var(SHARED_TOKEN_VAR).ok())
            .ok_or(GitLabError::MissingToken)?;
        PersonalAccessToken::new(value)
    }

    /// Returns the configured project or an error if missing.
    ///
    /// # Errors
    ///
    /// Returns [`GitLabError::Configuration`] when no project is configured.
    pub fn require_project(&self) -> Result<&str, GitLabError> {
        self.project
            .as_deref()
            .map(str::trim)
            .filter(|project| !project.is_empty())
            .ok_or_else(|| GitLabError::Configuration {
                message: "project is required (use --project or -p)".to_owned(),
            })
    }

    /// Resolves the project against `base_url` unless it is already a URL.
    ///
    /// # Errors
    ///
    /// Returns [`GitLabError::Configuration`] when no project is configured,
    /// or the locator's parse error when the project or base URL is invalid.
    pub fn project_locator(&self) -> Result<ProjectLocator, GitLabError> {
        let project = self.require_project()?;
        if project.contains("://") {
            ProjectLocator::parse(project)
        } else {
            ProjectLocator::from_instance(&self.base_url, project)
        }
    }

    /// Parses the `since` cut-off, defaulting to the Unix epoch.
    ///
    /// # Errors
    ///
    /// Returns [`GitLabError::Configuration`] when the value is not an
    /// RFC 3339 timestamp.
    pub fn since(&self) -> Result<DateTime<Utc>, GitLabError> {
        self.since.as_deref().map_or(Ok(DateTime::UNIX_EPOCH), |raw| {
            DateTime::parse_from_rfc3339(raw.trim())
                .map(|parsed| parsed.with_timezone(&Utc))
                .map_err(|error| GitLabError::Configuration {
                    message: format!("since must be an RFC 3339 timestamp: {error}"),
                })
        })
    }

    /// First page request using the configured page size.
    ///
    /// # Errors
    ///
    /// Returns [`GitLabError::InvalidPagination`] when `per_page` is outside
    /// `1..=100`.
    pub fn page_request(&self) -> Result<PageRequest, GitLabError> {
        PageRequest::first(self.per_page)
    }
}

#[cfg(test)]
mod tests;
