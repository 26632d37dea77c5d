// Copyright 2025 the Tabula Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! View state owned by the host: search text, active sort, and page.

use crate::{OrderBy, Pager, cycle_header};

/// Interactive state of one table.
///
/// `order_by` and manual reordering are mutually exclusive: a table only
/// accepts row drags while `order_by` is `None`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TableViewState {
    /// Search box contents.
    pub filter_text: String,
    /// Active column sort.
    pub order_by: Option<OrderBy>,
    /// Zero-based page index.
    pub page: usize,
    /// Page size, or `None` to show every row.
    pub rows_per_page: Option<usize>,
}

impl TableViewState {
    /// Creates a state on the first page with the given page size.
    #[must_use]
    pub fn new(rows_per_page: Option<usize>) -> Self {
        Self {
            rows_per_page,
            ..Self::default()
        }
    }

    /// Replaces the search text, returning to the first page if it changed.
    pub fn set_filter_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if text != self.filter_text {
            self.filter_text = text;
            self.page = 0;
        }
    }

    /// Advances the three-state sort cycle for `column`.
    ///
    /// Prefer [`Table::click_header`](crate::Table::click_header), which also
    /// checks that the column is sortable.
    pub fn toggle_order(&mut self, column: usize) {
        self.order_by = cycle_header(self.order_by, column);
    }

    /// Changes the page size and returns to the first page.
    pub fn set_rows_per_page(&mut self, rows_per_page: Option<usize>) {
        self.rows_per_page = rows_per_page.filter(|&per_page| per_page > 0);
        self.page = 0;
    }

    /// Moves to `page`; out-of-range pages are clamped on the next view.
    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    /// Clamps `page` for `total_rows`, returning the resulting pager.
    pub fn clamp_page(&mut self, total_rows: usize) -> Pager {
        let pager = Pager::new(total_rows, self.rows_per_page, self.page);
        if pager.page != self.page {
            tracing::trace!(from = self.page, to = pager.page, "page clamped");
            self.page = pager.page;
        }
        pager
    }

    /// Jumps to the first page.
    pub fn first_page(&mut self) {
        self.page = 0;
    }

    /// Goes back one page.
    pub fn prev_page(&mut self) {
        self.page = self.page.saturating_sub(1);
    }

    /// Goes forward one page, up to the last page of `pager`.
    pub fn next_page(&mut self, pager: &Pager) {
        self.page = (self.page + 1).min(pager.last_page());
    }

    /// Jumps to the last page of `pager`.
    pub fn last_page(&mut self, pager: &Pager) {
        self.page = pager.last_page();
    }
}
