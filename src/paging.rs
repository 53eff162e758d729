// ABOUTME: Paging instructions and the page fetcher/aggregator for list endpoints
// ABOUTME: fetch_all concatenates successive pages in order until a short or empty page
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::future::Future;

use crate::errors::{ApiError, ApiResult};

/// Page size used when the caller supplies no paging instruction; matches the
/// remote default window.
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// One fetch window against a paginated list endpoint.
///
/// A `Paging` value is always well-formed: [`Paging::new`] rejects a zero
/// page number before any network call can be attempted, and page numbers
/// and sizes are unsigned so negatives are unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paging {
    page: u32,
    per_page: u32,
}

impl Default for Paging {
    /// The full first page at the remote default size.
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Paging {
    /// Create a paging instruction for one window.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidPaging`] if `page` is zero; pages are
    /// numbered from 1.
    pub fn new(page: u32, per_page: u32) -> ApiResult<Self> {
        if page == 0 {
            return Err(ApiError::InvalidPaging(
                "page numbers start at 1".to_owned(),
            ));
        }
        Ok(Self { page, per_page })
    }

    /// The 1-based page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// The number of items requested per page.
    #[must_use]
    pub const fn per_page(&self) -> u32 {
        self.per_page
    }
}

/// Fetch exactly one page.
///
/// With no instruction, requests the full first page at the remote default
/// size; more pages are never fetched even if more data exists. With an
/// instruction, the caller controls pagination and receives exactly the
/// requested window.
///
/// # Errors
///
/// Any error from `page_fn` propagates unmodified.
pub async fn fetch_page<T, F, Fut>(instruction: Option<Paging>, page_fn: F) -> ApiResult<Vec<T>>
where
    F: Fn(Paging) -> Fut,
    Fut: Future<Output = ApiResult<Vec<T>>>,
{
    page_fn(instruction.unwrap_or_default()).await
}

/// Aggregate every page of a list endpoint into one ordered collection.
///
/// Issues successive requests from page 1 at the default page size and
/// concatenates the results, preserving page order and the order within each
/// page. Aggregation stops at the first page returning fewer items than
/// requested. A result set whose last page is exactly full therefore costs
/// one extra request for an empty page; callers relying on call counts
/// observe this behavior, so it is kept rather than special-cased away.
///
/// # Errors
///
/// Any error from `page_fn` propagates unmodified; no partial results are
/// returned.
pub async fn fetch_all<T, F, Fut>(page_fn: F) -> ApiResult<Vec<T>>
where
    F: Fn(Paging) -> Fut,
    Fut: Future<Output = ApiResult<Vec<T>>>,
{
    let mut collected = Vec::new();
    let mut page = 1u32;

    loop {
        let window = Paging::new(page, DEFAULT_PAGE_SIZE)?;
        let batch = page_fn(window).await?;
        let count = batch.len();
        collected.extend(batch);

        // A short page (zero included) signals end of data.
        if count < DEFAULT_PAGE_SIZE as usize {
            break;
        }
        page += 1;
    }

    Ok(collected)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_page_rejected() {
        let err = Paging::new(0, 10).unwrap_err();
        assert!(matches!(err, ApiError::InvalidPaging(_)));
    }

    #[test]
    fn test_default_window() {
        let paging = Paging::default();
        assert_eq!(paging.page(), 1);
        assert_eq!(paging.per_page(), DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_zero_per_page_allowed() {
        let paging = Paging::new(3, 0).unwrap();
        assert_eq!(paging.per_page(), 0);
    }
}
