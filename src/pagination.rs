//! Offset pagination shared by list queries.

use serde::Serialize;

/// Page size used when the client does not ask for one.
pub const DEFAULT_ITEMS_PER_PAGE: usize = 20;
/// Largest page a client may request.
pub const MAX_ITEMS_PER_PAGE: usize = 100;

/// One-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

impl Pagination {
    /// Normalizes raw client input: missing or non-positive pages become 1,
    /// the page size is clamped to `[1, MAX_ITEMS_PER_PAGE]`.
    pub fn clamped(page: Option<i64>, per_page: Option<i64>) -> Self {
        let page = page.filter(|p| *p > 0).unwrap_or(1);
        let per_page = per_page
            .unwrap_or(DEFAULT_ITEMS_PER_PAGE as i64)
            .clamp(1, MAX_ITEMS_PER_PAGE as i64);
        Self {
            page: usize::try_from(page).unwrap_or(1),
            per_page: per_page as usize,
        }
    }

    /// Number of rows to skip. Saturates at `i64::MAX` for absurd pages.
    pub fn offset(&self) -> i64 {
        let skipped = self.page.max(1).saturating_sub(1).saturating_mul(self.per_page);
        i64::try_from(skipped).unwrap_or(i64::MAX)
    }

    pub fn limit(&self) -> i64 {
        self.per_page as i64
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_ITEMS_PER_PAGE,
        }
    }
}

/// Pagination metadata returned next to a page of rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub current_page: usize,
    pub page_size: usize,
    pub total_posts: usize,
    pub total_pages: usize,
}

impl PageInfo {
    pub fn new(pagination: Pagination, total: usize) -> Self {
        Self {
            current_page: pagination.page,
            page_size: pagination.per_page,
            total_posts: total,
            total_pages: total.div_ceil(pagination.per_page.max(1)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_first_page_of_twenty() {
        assert_eq!(Pagination::clamped(None, None), Pagination::default());
        assert_eq!(Pagination::default().per_page, 20);
    }

    #[test]
    fn clamps_page_size_and_page() {
        assert_eq!(Pagination::clamped(Some(0), Some(0)).per_page, 1);
        assert_eq!(Pagination::clamped(Some(-3), Some(500)).per_page, 100);
        assert_eq!(Pagination::clamped(Some(-3), Some(500)).page, 1);
    }

    #[test]
    fn computes_offsets() {
        assert_eq!(Pagination::clamped(Some(2), Some(20)).offset(), 20);
        assert_eq!(Pagination::clamped(Some(1), Some(20)).offset(), 0);
    }

    #[test]
    fn offset_saturates_for_huge_pages() {
        let pagination = Pagination::clamped(Some(i64::MAX), Some(100));
        assert_eq!(pagination.offset(), i64::MAX);
        assert_eq!(pagination.limit(), 100);
    }

    #[test]
    fn total_pages_rounds_up() {
        let info = PageInfo::new(Pagination::clamped(Some(2), Some(20)), 25);
        assert_eq!(info.total_pages, 2);
        assert_eq!(PageInfo::new(Pagination::default(), 0).total_pages, 0);
        assert_eq!(PageInfo::new(Pagination::default(), 40).total_pages, 2);
    }
}
