//! Pagination input and the page envelope returned to callers.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

/// A validated page request.
///
/// Always satisfies `page_number >= 1` and `1 <= page_size <= MAX_PAGE_SIZE`
/// when built through [`PageRequest::clamped`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// 1-based page number
    pub page_number: usize,
    /// Items per page
    pub page_size: usize,
}

impl PageRequest {
    /// Clamps raw caller input into a valid request.
    ///
    /// - page number missing or below 1 → 1
    /// - page size missing or below 1 → 10
    /// - page size above 50 → 50
    pub fn clamped(page_number: Option<i64>, page_size: Option<i64>) -> Self {
        let page_number = match page_number {
            Some(n) if n >= 1 => usize::try_from(n).unwrap_or(usize::MAX),
            _ => DEFAULT_PAGE_NUMBER,
        };
        let page_size = match page_size {
            Some(n) if n >= 1 => usize::try_from(n).unwrap_or(MAX_PAGE_SIZE).min(MAX_PAGE_SIZE),
            _ => DEFAULT_PAGE_SIZE,
        };

        Self { page_number, page_size }
    }

    /// Number of items preceding this page.
    pub fn offset(&self) -> usize {
        self.page_number.saturating_sub(1).saturating_mul(self.page_size)
    }

    /// Number of pages needed for `total_count` items.
    pub fn total_pages(&self, total_count: usize) -> usize {
        if self.page_size == 0 {
            return 0;
        }
        total_count.div_ceil(self.page_size)
    }

    /// Applies this request to an already-ordered sequence.
    pub fn slice<T>(&self, items: impl IntoIterator<Item = T>) -> Vec<T> {
        items
            .into_iter()
            .skip(self.offset())
            .take(self.page_size)
            .collect()
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page_number: DEFAULT_PAGE_NUMBER,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// One page of results plus pagination metadata.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Items on this page
    pub items: Vec<T>,
    /// Total matching items across all pages
    pub total_count: usize,
    /// 1-based page number
    pub page_number: usize,
    /// Requested page size
    pub page_size: usize,
    /// `ceil(total_count / page_size)`
    pub total_pages: usize,
}

impl<T> Page<T> {
    /// Assembles a page from its items, the request, and the total count.
    pub fn new(items: Vec<T>, request: PageRequest, total_count: usize) -> Self {
        Self {
            items,
            total_count,
            page_number: request.page_number,
            page_size: request.page_size,
            total_pages: request.total_pages(total_count),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use test_case::test_case;

    #[test_case(None, None => (1, 10) ; "defaults")]
    #[test_case(Some(0), Some(100) => (1, 50) ; "page zero and oversized")]
    #[test_case(Some(-3), Some(0) => (1, 10) ; "negative page and zero size")]
    #[test_case(Some(4), Some(-1) => (4, 10) ; "negative size falls back to default")]
    #[test_case(Some(2), Some(50) => (2, 50) ; "max size kept")]
    #[test_case(Some(7), Some(1) => (7, 1) ; "min size kept")]
    fn test_clamped(page: Option<i64>, size: Option<i64>) -> (usize, usize) {
        let req = PageRequest::clamped(page, size);
        (req.page_number, req.page_size)
    }

    #[test]
    fn test_offset() {
        assert_eq!(PageRequest::clamped(Some(1), Some(10)).offset(), 0);
        assert_eq!(PageRequest::clamped(Some(3), Some(20)).offset(), 40);
    }

    #[test_case(0, 10 => 0)]
    #[test_case(1, 10 => 1)]
    #[test_case(10, 10 => 1)]
    #[test_case(11, 10 => 2)]
    #[test_case(500, 50 => 10)]
    fn test_total_pages(total: usize, size: i64) -> usize {
        PageRequest::clamped(None, Some(size)).total_pages(total)
    }

    #[test]
    fn test_slice_past_end_is_empty() {
        let req = PageRequest::clamped(Some(5), Some(10));
        assert!(req.slice(0..20).is_empty());
    }

    #[test]
    fn test_page_serializes_camel_case() {
        let page = Page::new(vec![1, 2], PageRequest::clamped(Some(1), Some(2)), 5);
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["totalCount"], 5);
        assert_eq!(json["pageNumber"], 1);
        assert_eq!(json["pageSize"], 2);
        assert_eq!(json["totalPages"], 3);
        assert_eq!(json["items"], serde_json::json!([1, 2]));
    }

    proptest! {
        #[test]
        fn prop_clamped_is_always_valid(page in any::<i64>(), size in any::<i64>()) {
            let req = PageRequest::clamped(Some(page), Some(size));
            prop_assert!(req.page_number >= 1);
            prop_assert!(req.page_size >= 1 && req.page_size <= MAX_PAGE_SIZE);
        }

        #[test]
        fn prop_slice_is_contiguous_and_bounded(
            len in 0usize..300,
            page in 1i64..40,
            size in 1i64..60,
        ) {
            let req = PageRequest::clamped(Some(page), Some(size));
            let items: Vec<usize> = (0..len).collect();
            let slice = req.slice(items.iter().copied());

            prop_assert!(slice.len() <= req.page_size);
            for (i, item) in slice.iter().enumerate() {
                prop_assert_eq!(*item, req.offset() + i);
            }
        }
    }
}
