//! Page arithmetic against the catalog's offset ceiling
//!
//! The catalog refuses start offsets at or beyond `max_offset`, so page counts
//! are computed from `min(total, max_offset)` rather than the raw total.

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: u32 = 12;
pub const DEFAULT_MAX_OFFSET: u32 = 1000;

/// Most page numbers shown at once by pagination controls
pub const PAGE_WINDOW: u32 = 5;

/// Page size and upstream offset ceiling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchPolicy {
    pub page_size: u32,
    pub max_offset: u32,
}

impl Default for SearchPolicy {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            max_offset: DEFAULT_MAX_OFFSET,
        }
    }
}

/// "Showing first-last of total"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResultRange {
    pub first: u32,
    pub last: u32,
    pub of: u32,
}

impl SearchPolicy {
    /// Zero-sized values are bumped to 1
    pub fn new(page_size: u32, max_offset: u32) -> Self {
        Self {
            page_size: page_size.max(1),
            max_offset: max_offset.max(1),
        }
    }

    /// Zero-based start offset of a 1-based page
    pub fn offset(&self, page: u32) -> u32 {
        page.saturating_sub(1).saturating_mul(self.page_size)
    }

    /// Whether fetching `page` would need an offset the catalog refuses
    pub fn exceeds_ceiling(&self, page: u32) -> bool {
        self.offset(page) >= self.max_offset
    }

    /// Page the controller falls back to when the ceiling is hit
    pub fn ceiling_page(&self) -> u32 {
        (self.max_offset / self.page_size).max(1)
    }

    /// Matches that can actually be paged through
    pub fn reachable_matches(&self, total_matches: u32) -> u32 {
        total_matches.min(self.max_offset)
    }

    pub fn total_pages(&self, total_matches: u32) -> u32 {
        self.reachable_matches(total_matches)
            .div_ceil(self.page_size)
    }

    /// Target for a "jump to last page" control
    pub fn last_safe_page(&self, total_matches: u32) -> u32 {
        self.total_pages(total_matches)
            .min(self.max_offset / self.page_size)
    }

    /// Page numbers for pagination controls, at most [`PAGE_WINDOW`] of them
    pub fn page_window(&self, current_page: u32, total_pages: u32) -> Vec<u32> {
        let start = if total_pages <= PAGE_WINDOW || current_page <= 3 {
            1
        } else if current_page >= total_pages - 2 {
            total_pages - (PAGE_WINDOW - 1)
        } else {
            current_page - 2
        };
        let len = total_pages.min(PAGE_WINDOW);

        (start..start + len).collect()
    }

    pub fn result_range(&self, current_page: u32, total_matches: u32) -> Option<ResultRange> {
        let of = self.reachable_matches(total_matches);
        if of == 0 {
            return None;
        }

        let first = self.offset(current_page).saturating_add(1);
        let last = current_page.saturating_mul(self.page_size).min(of);
        Some(ResultRange { first, last, of })
    }

    pub fn ceiling_message(&self) -> String {
        format!("The catalog only returns up to {} results", self.max_offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_page_window_examples() {
        let policy = SearchPolicy::default();
        assert_eq!(policy.page_window(1, 10), vec![1, 2, 3, 4, 5]);
        assert_eq!(policy.page_window(10, 10), vec![6, 7, 8, 9, 10]);
        assert_eq!(policy.page_window(5, 10), vec![3, 4, 5, 6, 7]);
        assert_eq!(policy.page_window(8, 10), vec![6, 7, 8, 9, 10]);
        for current in 1..=3 {
            assert_eq!(policy.page_window(current, 3), vec![1, 2, 3]);
        }
        assert!(policy.page_window(1, 0).is_empty());
    }

    #[test]
    fn test_totals_against_ceiling() {
        let policy = SearchPolicy::default();
        assert_eq!(policy.total_pages(0), 0);
        assert_eq!(policy.total_pages(12), 1);
        assert_eq!(policy.total_pages(13), 2);
        assert_eq!(policy.total_pages(1500), 84);
        assert_eq!(policy.last_safe_page(1500), 83);
        assert_eq!(policy.last_safe_page(30), 3);
        assert_eq!(policy.ceiling_page(), 83);
    }

    #[test]
    fn test_offsets_and_ceiling() {
        let policy = SearchPolicy::default();
        assert_eq!(policy.offset(1), 0);
        assert_eq!(policy.offset(84), 996);
        assert!(!policy.exceeds_ceiling(84));
        assert_eq!(policy.offset(85), 1008);
        assert!(policy.exceeds_ceiling(85));
    }

    #[test]
    fn test_result_range() {
        let policy = SearchPolicy::default();
        assert_eq!(policy.result_range(1, 0), None);
        assert_eq!(
            policy.result_range(2, 30),
            Some(ResultRange { first: 13, last: 24, of: 30 })
        );
        assert_eq!(
            policy.result_range(84, 1500),
            Some(ResultRange { first: 997, last: 1000, of: 1000 })
        );
    }

    proptest! {
        #[test]
        fn last_safe_page_formula(total in 0u32..5_000_000) {
            let policy = SearchPolicy::default();
            let total_pages = total.min(1000).div_ceil(12);
            prop_assert_eq!(policy.total_pages(total), total_pages);
            prop_assert_eq!(policy.last_safe_page(total), total_pages.min(83));
        }

        #[test]
        fn page_window_is_contiguous_and_contains_current(
            total_pages in 1u32..500,
            seed in 0u32..500,
        ) {
            let policy = SearchPolicy::default();
            let current = seed % total_pages + 1;
            let window = policy.page_window(current, total_pages);

            prop_assert_eq!(window.len() as u32, total_pages.min(PAGE_WINDOW));
            prop_assert!(window.contains(&current));
            prop_assert!(window.windows(2).all(|w| w[1] == w[0] + 1));
            prop_assert!(window[0] >= 1 && *window.last().unwrap() <= total_pages);
        }
    }
}
