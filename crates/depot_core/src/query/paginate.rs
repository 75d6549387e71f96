//! Offset pagination over ordered snapshots.
//!
//! # Invariants
//! - Pagination never fails; an out-of-range page degrades to an empty page
//!   with consistent metadata.
//! - `total_pages` uses ceiling division; an empty input reports zero pages
//!   and both navigation flags false.

use serde::Serialize;

/// Default page size when the caller does not ask for one.
pub const DEFAULT_PAGE_LIMIT: u32 = 10;
/// Upper bound accepted for a page size.
pub const PAGE_LIMIT_MAX: u32 = 100;

/// Page position metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    /// 1-based page requested by the caller.
    pub current: u32,
    /// Ceiling of `total_items / limit`.
    pub total_pages: u32,
    /// Size of the full (filtered) collection.
    pub total_items: usize,
    pub has_next: bool,
    pub has_prev: bool,
}

/// One page of an ordered sequence plus its metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub meta: PageMeta,
}

/// Slices `items` into the 1-based page of size `limit`.
///
/// Callers validate `page >= 1` and `1 <= limit <= PAGE_LIMIT_MAX`; the
/// arithmetic here is saturating so degenerate input still cannot panic.
pub fn paginate<T>(items: Vec<T>, page: u32, limit: u32) -> Page<T> {
    let total_items = items.len();
    let total_pages = total_items.div_ceil(limit.max(1) as usize) as u32;
    let offset = (page.saturating_sub(1) as usize).saturating_mul(limit as usize);

    let page_items: Vec<T> = items
        .into_iter()
        .skip(offset)
        .take(limit as usize)
        .collect();

    Page {
        items: page_items,
        meta: PageMeta {
            current: page,
            total_pages,
            total_items,
            has_next: (page as u64) * (limit as u64) < total_items as u64,
            has_prev: page > 1 && total_items > 0,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::{paginate, DEFAULT_PAGE_LIMIT, PAGE_LIMIT_MAX};

    #[test]
    fn slices_match_boundary_arithmetic() {
        let items: Vec<u32> = (0..25).collect();

        let first = paginate(items.clone(), 1, 10);
        assert_eq!(first.items.len(), 10);
        assert_eq!(first.meta.total_pages, 3);
        assert_eq!(first.meta.total_items, 25);
        assert!(first.meta.has_next);
        assert!(!first.meta.has_prev);

        let last = paginate(items, 3, 10);
        assert_eq!(last.items, (20..25).collect::<Vec<u32>>());
        assert!(!last.meta.has_next);
        assert!(last.meta.has_prev);
    }

    #[test]
    fn out_of_range_page_degrades_to_empty() {
        let page = paginate((0..5).collect::<Vec<u32>>(), 4, 2);
        assert!(page.items.is_empty());
        assert_eq!(page.meta.current, 4);
        assert_eq!(page.meta.total_pages, 3);
        assert!(!page.meta.has_next);
        assert!(page.meta.has_prev);
    }

    #[test]
    fn empty_input_reports_zero_pages_and_no_navigation() {
        let page = paginate(Vec::<u32>::new(), 1, 10);
        assert!(page.items.is_empty());
        assert_eq!(page.meta.total_pages, 0);
        assert_eq!(page.meta.total_items, 0);
        assert!(!page.meta.has_next);
        assert!(!page.meta.has_prev);

        // Even a far-off page keeps both flags false on empty input.
        let far = paginate(Vec::<u32>::new(), 7, 10);
        assert!(!far.meta.has_next);
        assert!(!far.meta.has_prev);
    }

    #[test]
    fn exact_multiple_has_no_phantom_page() {
        let page = paginate((0..20).collect::<Vec<u32>>(), 2, 10);
        assert_eq!(page.items.len(), 10);
        assert_eq!(page.meta.total_pages, 2);
        assert!(!page.meta.has_next);
    }

    #[test]
    fn limit_constants_are_sane() {
        assert!(DEFAULT_PAGE_LIMIT >= 1);
        assert!(DEFAULT_PAGE_LIMIT <= PAGE_LIMIT_MAX);
    }
}
