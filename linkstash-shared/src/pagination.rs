/// Page slicing and response metadata
///
/// Listings are paginated with 1-indexed `page`/`per_page` parameters. The
/// slice covers the item range `[(page-1)*per_page, page*per_page)` over the
/// filtered set; requesting a page past the end yields an empty page, not an
/// error.
///
/// # Example
///
/// ```
/// use linkstash_shared::pagination::{PageMeta, PageRequest};
///
/// let page = PageRequest::new(Some(2), Some(5));
/// assert_eq!(page.offset(), 5);
/// assert_eq!(page.limit(), 5);
///
/// let meta = PageMeta::compute(15, &page, 5);
/// assert_eq!(meta.num_pages, 3);
/// ```

use serde::{Deserialize, Serialize};

/// A validated page request
///
/// `page` and `per_page` are both 1-indexed and clamped to a minimum of 1, so
/// `?page=0` behaves like the first page rather than producing a negative
/// offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-indexed page number
    pub page: u32,

    /// Number of items per page
    pub per_page: u32,
}

impl PageRequest {
    /// Default page when the parameter is absent
    pub const DEFAULT_PAGE: u32 = 1;

    /// Default page size when the parameter is absent
    pub const DEFAULT_PER_PAGE: u32 = 10;

    /// Builds a page request from optional query parameters
    pub fn new(page: Option<u32>, per_page: Option<u32>) -> Self {
        Self {
            page: page.unwrap_or(Self::DEFAULT_PAGE).max(1),
            per_page: per_page.unwrap_or(Self::DEFAULT_PER_PAGE).max(1),
        }
    }

    /// Number of items to skip before this page starts
    pub fn offset(&self) -> i64 {
        i64::from(self.page - 1) * i64::from(self.per_page)
    }

    /// Maximum number of items on this page
    pub fn limit(&self) -> i64 {
        i64::from(self.per_page)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// Pagination metadata returned alongside every listing
///
/// `total` and `count` both describe the *filtered* set: `total` is its size
/// before slicing, `count` the number of items actually returned on this page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    /// Size of the filtered set
    pub total: u64,

    /// 1-indexed page number that was served
    pub page: u32,

    /// Number of items on this page
    pub count: u64,

    /// Total number of pages: ceil(total / per_page)
    pub num_pages: u64,
}

impl PageMeta {
    /// Computes metadata for a served page
    ///
    /// `total` is the filtered-set size and `count` the number of items the
    /// slice actually produced.
    pub fn compute(total: u64, page: &PageRequest, count: u64) -> Self {
        Self {
            total,
            page: page.page,
            count,
            num_pages: total.div_ceil(u64::from(page.per_page)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let page = PageRequest::new(None, None);
        assert_eq!(page.page, 1);
        assert_eq!(page.per_page, 10);
        assert_eq!(page.offset(), 0);
        assert_eq!(page.limit(), 10);
        assert_eq!(page, PageRequest::default());
    }

    #[test]
    fn test_zero_parameters_clamp_to_one() {
        let page = PageRequest::new(Some(0), Some(0));
        assert_eq!(page.page, 1);
        assert_eq!(page.per_page, 1);
        assert_eq!(page.offset(), 0);
    }

    #[test]
    fn test_offset_and_limit() {
        let page = PageRequest::new(Some(3), Some(25));
        assert_eq!(page.offset(), 50);
        assert_eq!(page.limit(), 25);
    }

    #[test]
    fn test_num_pages_is_ceiling() {
        let page = PageRequest::new(None, None);
        assert_eq!(PageMeta::compute(15, &page, 10).num_pages, 2);
        assert_eq!(PageMeta::compute(20, &page, 10).num_pages, 2);
        assert_eq!(PageMeta::compute(21, &page, 10).num_pages, 3);
        assert_eq!(PageMeta::compute(1, &page, 1).num_pages, 1);
    }

    #[test]
    fn test_num_pages_empty_set() {
        let page = PageRequest::new(None, None);
        assert_eq!(PageMeta::compute(0, &page, 0).num_pages, 0);
    }

    #[test]
    fn test_fifteen_item_scenario() {
        // 15 items, default pagination: page 1 carries 10, page 2 carries 5.
        let first = PageRequest::new(Some(1), None);
        let meta = PageMeta::compute(15, &first, 10);
        assert_eq!(meta.total, 15);
        assert_eq!(meta.page, 1);
        assert_eq!(meta.count, 10);
        assert_eq!(meta.num_pages, 2);

        let second = PageRequest::new(Some(2), None);
        let meta = PageMeta::compute(15, &second, 5);
        assert_eq!(meta.total, 15);
        assert_eq!(meta.page, 2);
        assert_eq!(meta.count, 5);
        assert_eq!(meta.num_pages, 2);
    }

    #[test]
    fn test_expected_count_for_all_slices() {
        // count = min(per_page, max(0, total - (page-1)*per_page))
        let total: u64 = 23;
        for per_page in 1..=12u32 {
            for page_no in 1..=6u32 {
                let page = PageRequest::new(Some(page_no), Some(per_page));
                let skipped = u64::from(page_no - 1) * u64::from(per_page);
                let expected = u64::from(per_page).min(total.saturating_sub(skipped));
                let meta = PageMeta::compute(total, &page, expected);
                assert_eq!(meta.count, expected);
                assert_eq!(meta.num_pages, total.div_ceil(u64::from(per_page)));
            }
        }
    }

    #[test]
    fn test_page_past_the_end() {
        let page = PageRequest::new(Some(3), Some(5));
        let meta = PageMeta::compute(10, &page, 0);
        assert_eq!(meta.count, 0);
        assert_eq!(meta.num_pages, 2);
    }
}
