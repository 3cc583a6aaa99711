//! Pagination state and navigation for GitLab API responses.
//!
//! GitLab paginates list endpoints with offset pagination and reports the
//! position through `X-Page`, `X-Per-Page`, `X-Total-Pages` and
//! `X-Next-Page` headers. [`PageInfo`] captures that position for one
//! fetched page and [`PageRequest`] selects the page to fetch next.

use crate::gitlab::error::GitLabError;

/// Largest page size GitLab accepts.
pub const MAX_PER_PAGE: u8 = 100;

/// Page size GitLab applies when none is requested.
pub const DEFAULT_PER_PAGE: u8 = 20;

/// Selects one page of a paginated collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    per_page: u8,
}

impl PageRequest {
    /// Creates a page request after validating its bounds.
    ///
    /// # Errors
    ///
    /// Returns [`GitLabError::InvalidPagination`] when `page` is zero or
    /// `per_page` is outside `1..=100`.
    pub fn new(page: u32, per_page: u8) -> Result<Self, GitLabError> {
        if page == 0 {
            return Err(GitLabError::InvalidPagination {
                message: "page must be at least 1".to_owned(),
            });
        }

        if per_page == 0 {
            return Err(GitLabError::InvalidPagination {
                message: "per_page must be at least 1".to_owned(),
            });
        }

        if per_page > MAX_PER_PAGE {
            return Err(GitLabError::InvalidPagination {
                message: format!("per_page must not exceed {MAX_PER_PAGE}"),
            });
        }

        Ok(Self { page, per_page })
    }

    /// First page with the given page size.
    ///
    /// # Errors
    ///
    /// Returns [`GitLabError::InvalidPagination`] when `per_page` is out of
    /// range.
    pub fn first(per_page: u8) -> Result<Self, GitLabError> {
        Self::new(1, per_page)
    }

    /// Page number (1-based).
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Items per page.
    #[must_use]
    pub const fn per_page(&self) -> u8 {
        self.per_page
    }

    /// Returns a request for `page` keeping the page size.
    #[must_use]
    pub const fn with_page(self, page: u32) -> Self {
        Self {
            page,
            per_page: self.per_page,
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

/// Position of a fetched page within a paginated collection.
///
/// # Example
///
/// ```
/// use gitlab_mirror::gitlab::pagination::PageInfo;
///
/// let info = PageInfo::builder(2, 50)
///     .total_pages(Some(5))
///     .next_page(Some(3))
///     .build();
/// assert!(!info.is_first_page());
/// assert!(!info.is_last_page());
/// assert_eq!(info.following_page(), Some(3));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    /// Current page number (1-based).
    current_page: u32,
    /// Items per page.
    per_page: u8,
    /// Total number of pages if GitLab reported it.
    total_pages: Option<u32>,
    /// Next page number if one exists.
    next_page: Option<u32>,
}

impl PageInfo {
    /// Starts building a page info for the given position.
    #[must_use]
    pub const fn builder(current_page: u32, per_page: u8) -> PageInfoBuilder {
        PageInfoBuilder {
            info: Self {
                current_page,
                per_page,
                total_pages: None,
                next_page: None,
            },
        }
    }

    /// A single page holding the whole collection.
    #[must_use]
    pub const fn single(per_page: u8) -> Self {
        Self {
            current_page: 1,
            per_page,
            total_pages: Some(1),
            next_page: None,
        }
    }

    /// Returns the current page number (1-based).
    #[must_use]
    pub const fn current_page(&self) -> u32 {
        self.current_page
    }

    /// Returns the number of items per page.
    #[must_use]
    pub const fn per_page(&self) -> u8 {
        self.per_page
    }

    /// Returns the total number of pages if known.
    #[must_use]
    pub const fn total_pages(&self) -> Option<u32> {
        self.total_pages
    }

    /// Returns the next page number if GitLab advertised one.
    #[must_use]
    pub const fn next_page(&self) -> Option<u32> {
        self.next_page
    }

    /// Returns true if this is the first page.
    #[must_use]
    pub const fn is_first_page(&self) -> bool {
        self.current_page <= 1
    }

    /// Returns true if no page follows this one.
    ///
    /// The total page count wins when GitLab reports it; collections too
    /// large for a total fall back to the presence of a next page.
    #[must_use]
    pub const fn is_last_page(&self) -> bool {
        match self.total_pages {
            Some(total) => self.current_page >= total,
            None => self.next_page.is_none(),
        }
    }

    /// The page a walker should request after this one.
    ///
    /// Returns `None` on the last page and when the advertised next page
    /// does not move forward.
    #[must_use]
    pub const fn following_page(&self) -> Option<u32> {
        if self.is_last_page() {
            return None;
        }
        match self.next_page {
            Some(next) if next > self.current_page => Some(next),
            _ => None,
        }
    }
}

impl Default for PageInfo {
    fn default() -> Self {
        Self::single(DEFAULT_PER_PAGE)
    }
}

/// Builder for [`PageInfo`].
#[derive(Debug, Clone, Copy)]
pub struct PageInfoBuilder {
    info: PageInfo,
}

impl PageInfoBuilder {
    /// Sets the total number of pages.
    #[must_use]
    pub const fn total_pages(mut self, total_pages: Option<u32>) -> Self {
        self.info.total_pages = total_pages;
        self
    }

    /// Sets the next page number.
    #[must_use]
    pub const fn next_page(mut self, next_page: Option<u32>) -> Self {
        self.info.next_page = next_page;
        self
    }

    /// Finishes the builder.
    #[must_use]
    pub const fn build(self) -> PageInfo {
        self.info
    }
}

/// One page of items together with its position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    /// Items on this page, in the order GitLab returned them.
    pub items: Vec<T>,
    /// Pagination state.
    pub page_info: PageInfo,
}

impl<T> Page<T> {
    /// Creates a page from its items and position.
    #[must_use]
    pub const fn new(items: Vec<T>, page_info: PageInfo) -> Self {
        Self { items, page_info }
    }
}
