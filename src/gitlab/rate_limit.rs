//! Rate limit information from GitLab API responses.
//!
//! GitLab reports its quota through the `RateLimit-Limit`,
//! `RateLimit-Remaining` and `RateLimit-Reset` headers. This module captures
//! those values so a throttled request can tell the caller when to retry.

use std::time::{SystemTime, UNIX_EPOCH};

use http::HeaderMap;

/// Rate limit information extracted from GitLab API response headers.
///
/// # Example
///
/// ```
/// use gitlab_mirror::gitlab::rate_limit::RateLimitInfo;
///
/// let info = RateLimitInfo::new(2000, 1999, 1700000000);
/// assert!(!info.is_exhausted());
/// assert_eq!(info.remaining(), 1999);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitInfo {
    /// Maximum requests allowed in the current window.
    limit: u32,
    /// Remaining requests in the current window.
    remaining: u32,
    /// Unix timestamp when the rate limit resets.
    reset_at: u64,
}

impl RateLimitInfo {
    /// Creates a new rate limit info instance.
    #[must_use]
    pub const fn new(limit: u32, remaining: u32, reset_at: u64) -> Self {
        Self {
            limit,
            remaining,
            reset_at,
        }
    }

    /// Reads the `RateLimit-*` headers from a response.
    ///
    /// Returns `None` unless all three headers are present and numeric.
    #[must_use]
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let limit = numeric_header(headers, "ratelimit-limit")?;
        let remaining = numeric_header(headers, "ratelimit-remaining")?;
        let reset_at = numeric_header(headers, "ratelimit-reset")?;
        Some(Self::new(limit, remaining, reset_at))
    }

    /// Returns the maximum requests allowed in the current window.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    /// Returns the remaining requests in the current window.
    #[must_use]
    pub const fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Returns the Unix timestamp when the rate limit resets.
    #[must_use]
    pub const fn reset_at(&self) -> u64 {
        self.reset_at
    }

    /// Returns true if the rate limit has been exhausted.
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }

    /// Calculates seconds until the rate limit resets.
    ///
    /// Returns 0 if the reset time has already passed or if the system time
    /// cannot be determined.
    #[must_use]
    pub fn seconds_until_reset(&self) -> u64 {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|duration| duration.as_secs())
            .unwrap_or(0);

        self.reset_at.saturating_sub(now)
    }
}

fn numeric_header<T: std::str::FromStr>(headers: &HeaderMap, name: &str) -> Option<T> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .and_then(|raw| raw.trim().parse().ok())
}
