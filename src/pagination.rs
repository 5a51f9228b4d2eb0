//! This modules defines the common functionality for paging data.

use serde::Serialize;

use crate::Error;

/// The config for pagination
#[derive(Debug, Clone)]
pub struct PaginationConfig {
    /// The page number to default to when not specified in a request.
    pub default_page: u64,
    /// The maximum transactions to display per page when not specified in a request.
    pub default_page_size: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page: 0,
            default_page_size: 10,
        }
    }
}

impl PaginationConfig {
    /// Build a page request, filling in any missing values from the config.
    ///
    /// # Errors
    /// Returns [Error::InvalidPageSize] if the resulting page size is zero.
    pub fn page_request(&self, page: Option<u64>, size: Option<u64>) -> Result<PageRequest, Error> {
        PageRequest::new(
            page.unwrap_or(self.default_page),
            size.unwrap_or(self.default_page_size),
        )
    }
}

/// Which slice of a result set to fetch.
///
/// Pages are numbered from zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u64,
    size: u64,
}

impl PageRequest {
    /// Request page number `page` holding at most `size` items.
    ///
    /// # Errors
    /// Returns [Error::InvalidPageSize] if `size` is zero.
    pub fn new(page: u64, size: u64) -> Result<Self, Error> {
        if size == 0 {
            return Err(Error::InvalidPageSize);
        }

        Ok(Self { page, size })
    }

    /// The zero-based page number.
    pub fn page(&self) -> u64 {
        self.page
    }

    /// The maximum number of items on the page.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// How many items precede this page.
    pub fn offset(&self) -> u64 {
        self.page.saturating_mul(self.size)
    }
}

/// One page of a larger result set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    /// The items on this page.
    pub items: Vec<T>,
    /// The zero-based page number.
    pub page: u64,
    /// The requested page size.
    pub size: u64,
    /// The number of items across all pages.
    pub total_items: u64,
    /// The number of pages needed to hold every item.
    pub total_pages: u64,
    /// Whether there is a page after this one.
    pub has_next: bool,
    /// Whether there is a page before this one.
    pub has_previous: bool,
}

impl<T> Page<T> {
    /// Wrap the `items` fetched for `request` out of `total_items` in total.
    pub fn new(items: Vec<T>, request: PageRequest, total_items: u64) -> Self {
        let total_pages = total_items.div_ceil(request.size);

        Self {
            items,
            page: request.page,
            size: request.size,
            total_items,
            total_pages,
            has_next: request.page.saturating_add(1) < total_pages,
            has_previous: request.page > 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::Error;

    use super::{Page, PageRequest, PaginationConfig};

    #[test]
    fn zero_page_size_is_rejected() {
        assert_eq!(PageRequest::new(0, 0), Err(Error::InvalidPageSize));
    }

    #[test]
    fn config_fills_in_defaults() {
        let request = PaginationConfig::default().page_request(None, None).unwrap();

        assert_eq!(request.page(), 0);
        assert_eq!(request.size(), 10);
    }

    #[test]
    fn offset_skips_earlier_pages() {
        assert_eq!(PageRequest::new(3, 5).unwrap().offset(), 15);
    }

    #[test]
    fn first_page_of_many() {
        let page = Page::new(vec![1, 2], PageRequest::new(0, 2).unwrap(), 5);

        assert_eq!(page.total_pages, 3);
        assert!(page.has_next);
        assert!(!page.has_previous);
    }

    #[test]
    fn last_page_of_many() {
        let page = Page::new(vec![5], PageRequest::new(2, 2).unwrap(), 5);

        assert_eq!(page.total_pages, 3);
        assert!(!page.has_next);
        assert!(page.has_previous);
    }

    #[test]
    fn empty_result_has_no_pages() {
        let page: Page<i32> = Page::new(vec![], PageRequest::new(0, 10).unwrap(), 0);

        assert_eq!(page.total_pages, 0);
        assert!(!page.has_next);
        assert!(!page.has_previous);
    }

    #[test]
    fn page_past_the_end_is_empty() {
        let page: Page<i32> = Page::new(vec![], PageRequest::new(7, 10).unwrap(), 12);

        assert_eq!(page.total_pages, 2);
        assert!(!page.has_next);
        assert!(page.has_previous);
    }
}
