//! HTTP client construction for the REST gateway.

use std::time::Duration;

use reqwest::Client;
use reqwest::header::{HeaderMap, HeaderValue};

use crate::gitlab::error::GitLabError;
use crate::gitlab::locator::PersonalAccessToken;

use super::error_mapping::map_reqwest_error;

const PRIVATE_TOKEN_HEADER: &str = "private-token";
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Builds a `reqwest` client that authenticates every request with the
/// given token.
///
/// # Errors
///
/// Returns `GitLabError::Configuration` when the token cannot be sent as a
/// header value, or `GitLabError::Network` when the TLS backend fails to
/// initialise.
pub(super) fn build_http_client(token: &PersonalAccessToken) -> Result<Client, GitLabError> {
    let mut token_value =
        HeaderValue::from_str(token.value()).map_err(|error| GitLabError::Configuration {
            message: format!("token is not a valid header value: {error}"),
        })?;
    token_value.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(PRIVATE_TOKEN_HEADER, token_value);

    Client::builder()
        .default_headers(headers)
        .user_agent(USER_AGENT)
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(|error| map_reqwest_error("build client", &error))
}
