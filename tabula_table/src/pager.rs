// Copyright 2025 the Tabula Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Page windows and pager button state.

use core::ops::Range;

bitflags::bitflags! {
    /// Pager buttons that are currently enabled.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct PagerButtons: u8 {
        /// Jump to the first page.
        const FIRST = 0b0000_0001;
        /// Go back one page.
        const PREV  = 0b0000_0010;
        /// Go forward one page.
        const NEXT  = 0b0000_0100;
        /// Jump to the last page.
        const LAST  = 0b0000_1000;
    }
}

/// Number of pages needed for `total_rows`.
///
/// Always at least one; a missing or zero page size shows every row on one page.
#[must_use]
pub fn page_count(total_rows: usize, rows_per_page: Option<usize>) -> usize {
    match rows_per_page {
        Some(per_page) if per_page > 0 => total_rows.div_ceil(per_page).max(1),
        _ => 1,
    }
}

/// Pagination of one filtered row set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pager {
    /// Current page, clamped into `0..page_count`.
    pub page: usize,
    /// Number of pages.
    pub page_count: usize,
    /// Number of rows across all pages.
    pub total_rows: usize,
    /// Page size, or `None` to show every row.
    pub rows_per_page: Option<usize>,
    /// Enabled navigation buttons.
    pub buttons: PagerButtons,
}

impl Pager {
    /// Paginates `total_rows`, clamping `page` to the last valid page.
    #[must_use]
    pub fn new(total_rows: usize, rows_per_page: Option<usize>, page: usize) -> Self {
        let rows_per_page = rows_per_page.filter(|&per_page| per_page > 0);
        let page_count = page_count(total_rows, rows_per_page);
        let page = page.min(page_count - 1);
        let mut buttons = PagerButtons::empty();
        if rows_per_page.is_some() {
            if page > 0 {
                buttons |= PagerButtons::FIRST | PagerButtons::PREV;
            }
            if page + 1 < page_count {
                buttons |= PagerButtons::NEXT | PagerButtons::LAST;
            }
        }
        Self {
            page,
            page_count,
            total_rows,
            rows_per_page,
            buttons,
        }
    }

    /// Index range of the rows on the current page.
    #[must_use]
    pub fn window(&self) -> Range<usize> {
        match self.rows_per_page {
            Some(per_page) => {
                let start = (self.page * per_page).min(self.total_rows);
                let end = start.saturating_add(per_page).min(self.total_rows);
                start..end
            }
            None => 0..self.total_rows,
        }
    }

    /// One-based `(first, last)` row numbers on the current page, for range labels.
    #[must_use]
    pub fn row_range(&self) -> Option<(usize, usize)> {
        let window = self.window();
        (!window.is_empty()).then(|| (window.start + 1, window.end))
    }

    /// Index of the last page.
    #[must_use]
    pub const fn last_page(&self) -> usize {
        self.page_count - 1
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::{Pager, PagerButtons, page_count};

    #[test]
    fn show_all_disables_every_button() {
        let pager = Pager::new(42, None, 3);
        assert_eq!(pager.page, 0);
        assert_eq!(pager.window(), 0..42);
        assert!(pager.buttons.is_empty());
    }

    #[test]
    fn middle_page_enables_everything() {
        let pager = Pager::new(30, Some(10), 1);
        assert_eq!(pager.window(), 10..20);
        assert_eq!(pager.buttons, PagerButtons::all());
        assert_eq!(pager.row_range(), Some((11, 20)));
    }

    #[test]
    fn page_clamps_when_rows_shrink() {
        let pager = Pager::new(11, Some(5), 9);
        assert_eq!(pager.page, 2);
        assert_eq!(pager.window(), 10..11);
        assert_eq!(pager.buttons, PagerButtons::FIRST | PagerButtons::PREV);
    }

    #[test]
    fn empty_rows() {
        let pager = Pager::new(0, Some(10), 4);
        assert_eq!(pager.page, 0);
        assert_eq!(pager.page_count, 1);
        assert!(pager.window().is_empty());
        assert_eq!(pager.row_range(), None);
        assert!(pager.buttons.is_empty());
    }

    #[test]
    fn zero_page_size_means_show_all() {
        assert_eq!(page_count(7, Some(0)), 1);
        assert_eq!(Pager::new(7, Some(0), 0).window(), 0..7);
    }

    proptest! {
        #[test]
        fn window_stays_in_bounds(
            total in 0_usize..500,
            per_page in proptest::option::of(1_usize..50),
            page in 0_usize..100,
        ) {
            let pager = Pager::new(total, per_page, page);
            let window = pager.window();
            prop_assert!(pager.page < pager.page_count);
            prop_assert!(window.end <= total);
            if let Some(per_page) = per_page {
                prop_assert!(window.len() <= per_page);
                if total > 0 {
                    prop_assert!(!window.is_empty());
                }
            }
        }
    }
}
