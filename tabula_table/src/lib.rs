// Copyright 2025 the Tabula Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=tabula_table --heading-base-level=0

//! Tabula Table: a headless sortable, filterable, paginated data table.
//!
//! The table turns caller-owned rows into a [`TableView`]: the rows of the
//! current page, pager state, footer sums, and the text to show when nothing
//! matched. Rendering is left to the host.
//!
//! Each view runs a fixed pipeline:
//!
//! 1. **Filter**: rows whose [`filter_column`](Table::filter_column) value
//!    contains the search text (case-insensitive, taken literally) survive.
//! 2. **Sort**: by the clicked column ([`OrderBy`]), else by the table's
//!    [`order_by_default`](Table::order_by_default), else in input order. The
//!    sort is stable; empty and `NaN` keys sort last in either direction.
//! 3. **Paginate**: the page is clamped to the filtered row count and the
//!    [`Pager`] reports the enabled [`PagerButtons`].
//!
//! Clicking a sortable header cycles that column through ascending,
//! descending, and unsorted ([`cycle_header`]). While no column sort is active,
//! a table with a [`move_id`](Table::move_id) is in manual reorder mode: its
//! rows can be dragged through a [`tabula_reorder::DragAndDropList`] and each
//! drop is reported as a [`MoveRequest`].
//!
//! Hosts keep two pieces of state: the data and a [`TableViewState`]. The
//! table definition itself is immutable once built.
//!
//! ## Minimal example
//!
//! ```rust
//! use std::collections::BTreeMap;
//! use tabula_table::{CellValue, Column, PagerButtons, Table, TableViewState};
//!
//! let data: Vec<BTreeMap<String, CellValue>> = (1..=25)
//!     .map(|n| BTreeMap::from([("n".to_owned(), CellValue::from(n))]))
//!     .collect();
//! let table = Table::new(vec![Column::new("N", "n").sortable()]);
//!
//! let mut state = TableViewState::new(Some(10));
//! state.set_page(2);
//! let view = table.view(Some(data.as_slice()), &mut state).unwrap();
//! assert_eq!(view.rows.len(), 5);
//! assert_eq!(view.pager.buttons, PagerButtons::FIRST | PagerButtons::PREV);
//! assert_eq!(view.pager.row_range(), Some((21, 25)));
//! ```
//!
//! ## Features
//!
//! - `serde`: `Serialize`/`Deserialize` for [`CellValue`], [`TableViewState`],
//!   [`TableOptions`], and the sort types.
//! - `json`: implements [`Record`] for `serde_json::Value` objects.

mod accessor;
mod column;
mod error;
mod filter;
mod options;
mod pager;
mod reorder;
mod sort;
mod state;
mod table;
mod value;

pub use accessor::Accessor;
pub use column::{Column, Propagation, Sum};
pub use error::TableError;
pub use filter::TextFilter;
pub use options::{DefaultStrings, TableOptions, TableStrings};
pub use pager::{Pager, PagerButtons, page_count};
pub use reorder::{MoveRequest, RowMover};
pub use sort::{OrderBy, SortDirection, SortState, cycle_header};
pub use state::TableViewState;
pub use table::{ClickDispatch, Footer, RowClass, Table, TableView, ViewRow};
pub use value::{CellValue, Record};
