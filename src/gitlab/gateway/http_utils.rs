//! Shared HTTP utilities for the REST gateway.

use http::HeaderMap;

use crate::gitlab::pagination::{PageInfo, PageRequest};

const PAGE_HEADER: &str = "x-page";
const PER_PAGE_HEADER: &str = "x-per-page";
const TOTAL_PAGES_HEADER: &str = "x-total-pages";
const NEXT_PAGE_HEADER: &str = "x-next-page";

fn header_number<T: std::str::FromStr>(headers: &HeaderMap, name: &str) -> Option<T> {
    headers
        .get(name)
        .and_then(|raw| raw.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .and_then(|value| value.parse().ok())
}

/// Reads GitLab's pagination headers, falling back to the request for
/// anything the server left out.
///
/// `X-Next-Page` is sent empty on the last page and `X-Total-Pages` is
/// omitted for collections with more than 10,000 rows.
pub(super) fn page_info_from_headers(headers: &HeaderMap, requested: PageRequest) -> PageInfo {
    let current_page = header_number(headers, PAGE_HEADER).unwrap_or(requested.page());
    let per_page = header_number(headers, PER_PAGE_HEADER).unwrap_or(requested.per_page());

    PageInfo::builder(current_page, per_page)
        .total_pages(header_number(headers, TOTAL_PAGES_HEADER))
        .next_page(header_number(headers, NEXT_PAGE_HEADER))
        .build()
}

/// Extracts the `message` (or `error`) field of a GitLab error body.
///
/// GitLab sometimes sends validation messages as objects; those are
/// rendered as compact JSON.
pub(super) fn extract_gitlab_message(body: &str) -> Option<String> {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return None;
    };
    let field = value.get("message").or_else(|| value.get("error"))?;
    match field {
        serde_json::Value::String(message) => Some(message.clone()),
        other => Some(other.to_string()),
    }
}
