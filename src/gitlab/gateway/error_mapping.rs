//! Error mapping helpers for the REST gateway.

use http::StatusCode;

use crate::gitlab::error::GitLabError;
use crate::gitlab::rate_limit::RateLimitInfo;

/// Checks if a status indicates an authentication failure.
pub(super) const fn is_auth_failure(status: StatusCode) -> bool {
    matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
}

/// Checks if a `reqwest` error happened before a response arrived.
pub(super) fn is_network_error(error: &reqwest::Error) -> bool {
    error.is_connect() || error.is_timeout() || error.is_request()
}

pub(super) fn map_reqwest_error(operation: &str, error: &reqwest::Error) -> GitLabError {
    if error.is_decode() {
        return GitLabError::Decode {
            message: format!("{operation} failed: {error}"),
        };
    }

    if is_network_error(error) {
        return GitLabError::Network {
            message: format!("{operation} failed: {error}"),
        };
    }

    GitLabError::Api {
        message: format!("{operation} failed: {error}"),
    }
}

pub(super) fn map_http_error(
    operation: &str,
    status: StatusCode,
    maybe_message: Option<String>,
    rate_limit: Option<RateLimitInfo>,
) -> GitLabError {
    let message = maybe_message.unwrap_or_else(|| "unknown error".to_owned());

    if status == StatusCode::TOO_MANY_REQUESTS {
        let base_message = format!("{operation} failed: {message}");
        let message = match &rate_limit {
            Some(info) => format!(
                "{base_message} (resets at {reset})",
                reset = info.reset_at()
            ),
            None => base_message,
        };
        return GitLabError::RateLimitExceeded {
            rate_limit,
            message,
        };
    }

    if is_auth_failure(status) {
        return GitLabError::Authentication {
            message: format!("{operation} failed: GitLab returned {status} {message}"),
        };
    }

    if status == StatusCode::NOT_FOUND {
        return GitLabError::NotFound {
            message: format!("{operation} failed: {message}"),
        };
    }

    GitLabError::Api {
        message: format!("{operation} failed with status {status}: {message}"),
    }
}
