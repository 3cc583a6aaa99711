//! Error types exposed by the GitLab mirroring layer.

use thiserror::Error;

use super::rate_limit::RateLimitInfo;

/// Errors surfaced while parsing input or communicating with GitLab.
///
/// The type is `Clone` so that a failure can travel inside an
/// [`crate::stream::Event::Error`] value alongside ordinary events.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GitLabError {
    /// The authentication token was missing.
    #[error("personal access token is required")]
    MissingToken,

    /// The provided URL could not be parsed.
    #[error("GitLab URL is invalid: {0}")]
    InvalidUrl(String),

    /// The project identifier is empty or malformed.
    #[error("project must be a numeric id or a namespace/project path: {value}")]
    InvalidProject {
        /// The rejected project identifier.
        value: String,
    },

    /// The issue number is not a positive integer.
    #[error("issue number must be a positive integer")]
    InvalidIssueNumber,

    /// The authentication token was rejected by GitLab.
    #[error("GitLab rejected the token: {message}")]
    Authentication {
        /// GitLab error message returned with the 401/403 response.
        message: String,
    },

    /// The requested project or issue does not exist or is not visible.
    #[error("GitLab resource not found: {message}")]
    NotFound {
        /// Description of the missing resource.
        message: String,
    },

    /// Rate limit exceeded - GitLab answered with 429.
    #[error("GitLab API rate limit exceeded: {message}")]
    RateLimitExceeded {
        /// Rate limit info if available from response headers.
        rate_limit: Option<RateLimitInfo>,
        /// Error message from GitLab.
        message: String,
    },

    /// GitLab returned a non-authentication API error.
    #[error("GitLab API error: {message}")]
    Api {
        /// Response body from GitLab describing the failure.
        message: String,
    },

    /// Networking failed while calling GitLab.
    #[error("network error talking to GitLab: {message}")]
    Network {
        /// Transport-level error detail.
        message: String,
    },

    /// A response body could not be decoded.
    #[error("failed to decode GitLab response: {message}")]
    Decode {
        /// Deserialisation error detail.
        message: String,
    },

    /// Invalid pagination parameters.
    #[error("invalid pagination: {message}")]
    InvalidPagination {
        /// Description of the invalid parameter.
        message: String,
    },

    /// Configuration could not be loaded.
    #[error("configuration error: {message}")]
    Configuration {
        /// Details about the configuration failure.
        message: String,
    },

    /// Local I/O operation failed.
    #[error("I/O error: {message}")]
    Io {
        /// Error detail from the underlying I/O operation.
        message: String,
    },
}
