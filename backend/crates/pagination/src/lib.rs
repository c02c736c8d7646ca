//! Page-number pagination primitives shared by Tasking HTTP endpoints.
//!
//! A [`PageRequest`] captures the validated `page` and `page_size` query
//! parameters, and a [`Page`] wraps one slice of results together with the
//! total count and absolute links to the neighbouring pages.
//!
//! ```
//! use pagination::{Page, PageRequest};
//! use url::Url;
//!
//! let request = PageRequest::new(2, 2).expect("valid request");
//! let base = Url::parse("https://tasks.example/api/lists/?page=2&page_size=2").expect("url");
//! let page = Page::new(vec!["c", "d"], 5, request, &base);
//!
//! assert_eq!(page.count(), 5);
//! assert!(page.next().is_some());
//! assert!(page.previous().is_some());
//! ```

use serde::Serialize;
use url::Url;

/// Query parameter carrying the 1-based page number.
pub const PAGE_PARAM: &str = "page";
/// Query parameter carrying the number of results per page.
pub const PAGE_SIZE_PARAM: &str = "page_size";
/// Page size applied when a caller asks for a page without a size.
pub const DEFAULT_PAGE_SIZE: u32 = 10;
/// Largest page size a caller may request.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Errors raised while validating pagination parameters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PaginationError {
    /// Page numbers start at one.
    #[error("page must be greater than zero")]
    ZeroPage,
    /// A page must hold at least one result.
    #[error("page_size must be greater than zero")]
    ZeroPageSize,
    /// The requested page size exceeds [`MAX_PAGE_SIZE`].
    #[error("page_size must be at most {max}")]
    PageSizeTooLarge {
        /// Maximum accepted page size.
        max: u32,
    },
}

impl PaginationError {
    /// Name of the query parameter the error refers to.
    #[must_use]
    pub const fn parameter(&self) -> &'static str {
        match self {
            Self::ZeroPage => PAGE_PARAM,
            Self::ZeroPageSize | Self::PageSizeTooLarge { .. } => PAGE_SIZE_PARAM,
        }
    }
}

/// Validated page-number request.
///
/// ## Invariants
/// - `page` is at least one.
/// - `page_size` lies within `1..=MAX_PAGE_SIZE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    page_size: u32,
}

impl PageRequest {
    /// Validate and construct a page request.
    ///
    /// # Errors
    /// Returns [`PaginationError`] when either value is out of range.
    pub const fn new(page: u32, page_size: u32) -> Result<Self, PaginationError> {
        if page == 0 {
            return Err(PaginationError::ZeroPage);
        }
        if page_size == 0 {
            return Err(PaginationError::ZeroPageSize);
        }
        if page_size > MAX_PAGE_SIZE {
            return Err(PaginationError::PageSizeTooLarge { max: MAX_PAGE_SIZE });
        }
        Ok(Self { page, page_size })
    }

    /// Build a request from optional query parameters.
    ///
    /// Returns `Ok(None)` when neither parameter is present so callers can
    /// serve the unpaginated collection. A missing `page` defaults to the
    /// first page and a missing `page_size` to [`DEFAULT_PAGE_SIZE`].
    ///
    /// # Errors
    /// Returns [`PaginationError`] when a supplied value is out of range.
    pub fn from_query(
        page: Option<u32>,
        page_size: Option<u32>,
    ) -> Result<Option<Self>, PaginationError> {
        if page.is_none() && page_size.is_none() {
            return Ok(None);
        }
        Self::new(page.unwrap_or(1), page_size.unwrap_or(DEFAULT_PAGE_SIZE)).map(Some)
    }

    /// 1-based page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Number of results per page.
    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Number of rows to skip before the first result of this page.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        (self.page as u64 - 1) * self.page_size as u64
    }

    /// Maximum number of rows on this page.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.page_size
    }
}

/// One page of results with navigation links.
///
/// Serialises as `{ "count", "next", "previous", "results" }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    count: u64,
    next: Option<String>,
    previous: Option<String>,
    results: Vec<T>,
}

impl<T> Page<T> {
    /// Assemble a page from the rows fetched for `request`.
    ///
    /// `total` is the size of the whole collection. Links are derived from
    /// `base`, keeping its unrelated query parameters.
    #[must_use]
    pub fn new(results: Vec<T>, total: u64, request: PageRequest, base: &Url) -> Self {
        let shown = request.offset() + results.len() as u64;
        let next = (shown < total)
            .then(|| page_link(base, request.page() + 1, request.page_size()));
        let previous = (request.page() > 1)
            .then(|| page_link(base, request.page() - 1, request.page_size()));
        Self {
            count: total,
            next,
            previous,
            results,
        }
    }

    /// Size of the whole collection.
    #[must_use]
    pub const fn count(&self) -> u64 {
        self.count
    }

    /// Absolute link to the following page, if any.
    #[must_use]
    pub fn next(&self) -> Option<&str> {
        self.next.as_deref()
    }

    /// Absolute link to the preceding page, if any.
    #[must_use]
    pub fn previous(&self) -> Option<&str> {
        self.previous.as_deref()
    }

    /// Results on this page.
    #[must_use]
    pub fn results(&self) -> &[T] {
        &self.results
    }

    /// Convert each result while keeping the navigation metadata.
    #[must_use]
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            count: self.count,
            next: self.next,
            previous: self.previous,
            results: self.results.into_iter().map(f).collect(),
        }
    }
}

fn page_link(base: &Url, page: u32, page_size: u32) -> String {
    let retained: Vec<(String, String)> = base
        .query_pairs()
        .filter(|(key, _)| key != PAGE_PARAM && key != PAGE_SIZE_PARAM)
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    let mut link = base.clone();
    link.query_pairs_mut()
        .clear()
        .extend_pairs(retained)
        .append_pair(PAGE_PARAM, &page.to_string())
        .append_pair(PAGE_SIZE_PARAM, &page_size.to_string());
    String::from(link)
}
