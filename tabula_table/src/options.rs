// Copyright 2025 the Tabula Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host-configurable table options and chrome strings.

use crate::{SortDirection, TableViewState};

/// Table options a host can load from configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TableOptions {
    /// Initial page size, or `None` to show every row.
    pub rows_per_page: Option<usize>,
    /// Page sizes offered by the selector; `None` means "show all".
    pub rows_per_page_options: Vec<Option<usize>>,
    /// Text shown when there are no rows; falls back to [`TableStrings::no_data`].
    pub text_on_empty: Option<String>,
    /// Direction applied to the default order.
    pub order_by_default_direction: SortDirection,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            rows_per_page: Some(10),
            rows_per_page_options: vec![Some(10), Some(25), Some(50), None],
            text_on_empty: None,
            order_by_default_direction: SortDirection::Ascending,
        }
    }
}

impl TableOptions {
    /// A fresh view state using these options.
    #[must_use]
    pub fn initial_state(&self) -> TableViewState {
        TableViewState::new(self.rows_per_page)
    }
}

/// Strings used by the table chrome.
///
/// Hosts with a localization layer implement this and hand it to
/// [`Table::with_strings`](crate::Table::with_strings); tables without one use
/// [`DefaultStrings`].
pub trait TableStrings {
    /// Text shown when the filtered row set is empty.
    fn no_data(&self) -> &str;
    /// Label of the "show all" page size.
    fn show_all(&self) -> &str;
    /// Range label such as `"11-20 of 35"`.
    fn range_label(&self, first: usize, last: usize, total: usize) -> String;
}

/// English fallback strings.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultStrings;

impl TableStrings for DefaultStrings {
    fn no_data(&self) -> &str {
        "No data"
    }

    fn show_all(&self) -> &str {
        "All"
    }

    fn range_label(&self, first: usize, last: usize, total: usize) -> String {
        format!("{first}-{last} of {total}")
    }
}
