// Copyright 2025 the Tabula Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The table definition and its filter → sort → paginate pipeline.

use std::fmt;

use smallvec::SmallVec;

use crate::sort::sort_rows;
use crate::{
    Accessor, CellValue, Column, DefaultStrings, Pager, Propagation, SortDirection, TableError,
    TableOptions, TableStrings, TableViewState, TextFilter,
};

/// Class name applied to each rendered row.
pub enum RowClass<T> {
    /// The same class for every row.
    Static(String),
    /// A class computed from the row.
    Dynamic(Box<dyn Fn(&T) -> String>),
}

impl<T> RowClass<T> {
    /// A class computed from the row.
    pub fn from_fn(f: impl Fn(&T) -> String + 'static) -> Self {
        Self::Dynamic(Box::new(f))
    }

    /// Class name for `row`.
    pub fn resolve(&self, row: &T) -> String {
        match self {
            Self::Static(class) => class.clone(),
            Self::Dynamic(f) => f(row),
        }
    }
}

impl<T> From<&str> for RowClass<T> {
    fn from(class: &str) -> Self {
        Self::Static(class.to_owned())
    }
}

impl<T> fmt::Debug for RowClass<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static(class) => f.debug_tuple("Static").field(class).finish(),
            Self::Dynamic(_) => f.write_str("Dynamic(..)"),
        }
    }
}

/// One row of a [`TableView`].
#[derive(Debug)]
pub struct ViewRow<'a, T> {
    /// Index of the row in the caller's data.
    pub index: usize,
    /// The row itself.
    pub row: &'a T,
    /// Row class name, if the table declares one.
    pub class_name: Option<String>,
}

/// Footer cells, one per column; `None` for columns without a sum.
pub type Footer = SmallVec<[Option<String>; 8]>;

/// Everything a host needs to render one table state.
#[derive(Debug)]
pub struct TableView<'a, T> {
    /// Rows on the current page, in display order.
    pub rows: Vec<ViewRow<'a, T>>,
    /// Number of rows that passed the filter, across all pages.
    pub filtered_rows: usize,
    /// Pager state for the filtered rows.
    pub pager: Pager,
    /// Footer sums over the filtered rows, if any column declares one.
    pub footer: Option<Footer>,
    /// Text to show instead of rows when nothing passed the filter.
    pub empty_text: Option<String>,
    /// Rows are reordered by dragging rather than by a column sort.
    pub manual_reorder: bool,
}

impl<T> TableView<'_, T> {
    /// Returns `true` if no rows are shown.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Which handlers a click reached.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ClickDispatch {
    /// A cell handler ran.
    pub cell: bool,
    /// The row handler ran.
    pub row: bool,
}

/// A data table definition.
///
/// The table owns column and accessor definitions; data and
/// [`TableViewState`] stay with the host and are passed to [`Table::view`].
///
/// ```
/// use std::collections::BTreeMap;
/// use tabula_table::{CellValue, Column, Table, TableOptions};
///
/// type Row = BTreeMap<String, CellValue>;
/// fn person(name: &str, age: i64) -> Row {
///     BTreeMap::from([
///         ("name".to_owned(), CellValue::from(name)),
///         ("age".to_owned(), CellValue::from(age)),
///     ])
/// }
///
/// let data = vec![person("Bob", 35), person("Jane", 25), person("John", 30)];
/// let table = Table::new(vec![
///     Column::new("Name", "name").sortable(),
///     Column::new("Age", "age").sortable().sum(),
/// ])
/// .filter_column("name")
/// .with_options(TableOptions { rows_per_page: Some(1), ..TableOptions::default() });
///
/// let mut state = table.initial_state();
/// state.set_filter_text("o");
/// table.click_header(&mut state, 0);
///
/// let view = table.view(Some(data.as_slice()), &mut state).unwrap();
/// assert_eq!(view.filtered_rows, 2);
/// assert_eq!(view.rows[0].row["name"], CellValue::from("Bob"));
/// assert_eq!(view.footer.unwrap()[1].as_deref(), Some("65"));
/// ```
pub struct Table<T> {
    columns: Vec<Column<T>>,
    filter_column: Option<Accessor<T>>,
    order_by_default: Option<Accessor<T>>,
    move_id: Option<Accessor<T>>,
    row_class: Option<RowClass<T>>,
    on_row_click: Option<Box<dyn Fn(&T)>>,
    options: TableOptions,
    strings: Box<dyn TableStrings>,
}

impl<T> Table<T> {
    /// Creates a table with the given columns and default options.
    pub fn new(columns: Vec<Column<T>>) -> Self {
        Self {
            columns,
            filter_column: None,
            order_by_default: None,
            move_id: None,
            row_class: None,
            on_row_click: None,
            options: TableOptions::default(),
            strings: Box::new(DefaultStrings),
        }
    }

    /// Filters rows by the search text matched against `key`.
    #[must_use]
    pub fn filter_column(mut self, key: impl Into<Accessor<T>>) -> Self {
        self.filter_column = Some(key.into());
        self
    }

    /// Orders rows by `key` whenever no column sort is active.
    ///
    /// The direction comes from [`TableOptions::order_by_default_direction`].
    #[must_use]
    pub fn order_by_default(mut self, key: impl Into<Accessor<T>>) -> Self {
        self.order_by_default = Some(key.into());
        self
    }

    /// Enables manual reordering, identifying rows by `key`.
    #[must_use]
    pub fn move_id(mut self, key: impl Into<Accessor<T>>) -> Self {
        self.move_id = Some(key.into());
        self
    }

    /// Sets the row class name.
    #[must_use]
    pub fn row_class_name(mut self, class: impl Into<RowClass<T>>) -> Self {
        self.row_class = Some(class.into());
        self
    }

    /// Sets the whole-row click handler.
    #[must_use]
    pub fn on_row_click(mut self, handler: impl Fn(&T) + 'static) -> Self {
        self.on_row_click = Some(Box::new(handler));
        self
    }

    /// Replaces the table options.
    #[must_use]
    pub fn with_options(mut self, options: TableOptions) -> Self {
        self.options = options;
        self
    }

    /// Replaces the chrome strings.
    #[must_use]
    pub fn with_strings(mut self, strings: impl TableStrings + 'static) -> Self {
        self.strings = Box::new(strings);
        self
    }

    /// Column definitions.
    #[must_use]
    pub fn columns(&self) -> &[Column<T>] {
        &self.columns
    }

    /// Table options.
    #[must_use]
    pub fn options(&self) -> &TableOptions {
        &self.options
    }

    /// Chrome strings.
    #[must_use]
    pub fn strings(&self) -> &dyn TableStrings {
        &*self.strings
    }

    /// A fresh view state using the table options.
    #[must_use]
    pub fn initial_state(&self) -> TableViewState {
        self.options.initial_state()
    }

    /// Handles a click on the header of `column`.
    ///
    /// Returns `false` (leaving `state` untouched) if the column is not sortable.
    pub fn click_header(&self, state: &mut TableViewState, column: usize) -> bool {
        if !self.columns.get(column).is_some_and(Column::is_sortable) {
            return false;
        }
        state.toggle_order(column);
        true
    }

    /// Returns `true` if rows are reordered by dragging in `state`.
    ///
    /// Requires a [`move_id`](Self::move_id) and no active column sort.
    #[must_use]
    pub fn is_manual_reorder(&self, state: &TableViewState) -> bool {
        self.move_id.is_some() && state.order_by.is_none()
    }

    /// Move identity of `row`, if manual reordering is configured.
    pub fn move_key(&self, row: &T) -> Option<CellValue> {
        self.move_id.as_ref().map(|key| key.resolve(row))
    }

    /// Computes the rows, pager, and footer for `data` under `state`.
    ///
    /// Clamps `state.page` if the filtered row count shrank below it.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::MissingData`] if `data` is `None` and
    /// [`TableError::MissingColumns`] if the table has no columns.
    pub fn try_view<'a>(
        &self,
        data: Option<&'a [T]>,
        state: &mut TableViewState,
    ) -> Result<TableView<'a, T>, TableError> {
        let data = data.ok_or(TableError::MissingData)?;
        if self.columns.is_empty() {
            return Err(TableError::MissingColumns);
        }

        let mut rows: Vec<(usize, &'a T)> = data.iter().enumerate().collect();

        if let Some(filter_column) = &self.filter_column {
            let filter = TextFilter::new(&state.filter_text);
            if !filter.is_pass_through() {
                rows.retain(|(_, row)| filter.matches(&filter_column.resolve(row)));
            }
        }

        self.sort(&mut rows, state);

        let footer = self.footer(&rows);
        let filtered_rows = rows.len();
        let pager = state.clamp_page(filtered_rows);
        let page_rows = rows
            .drain(pager.window())
            .map(|(index, row)| ViewRow {
                index,
                row,
                class_name: self.row_class.as_ref().map(|class| class.resolve(row)),
            })
            .collect();

        let empty_text = (filtered_rows == 0).then(|| {
            self.options
                .text_on_empty
                .clone()
                .unwrap_or_else(|| self.strings.no_data().to_owned())
        });

        Ok(TableView {
            rows: page_rows,
            filtered_rows,
            pager,
            footer,
            empty_text,
            manual_reorder: self.is_manual_reorder(state),
        })
    }

    /// Like [`try_view`](Self::try_view), but logs and renders nothing on a
    /// missing `data` or missing columns.
    pub fn view<'a>(
        &self,
        data: Option<&'a [T]>,
        state: &mut TableViewState,
    ) -> Option<TableView<'a, T>> {
        match self.try_view(data, state) {
            Ok(view) => Some(view),
            Err(err) => {
                tracing::warn!(%err, "table rendered nothing");
                None
            }
        }
    }

    /// Range label such as `"11-20 of 35"` for `view`, or `None` if it is empty.
    pub fn range_label(&self, view: &TableView<'_, T>) -> Option<String> {
        let (first, last) = view.pager.row_range()?;
        Some(self.strings.range_label(first, last, view.filtered_rows))
    }

    /// Entries of the page-size selector as `(rows_per_page, label)` pairs.
    pub fn rows_per_page_choices(&self) -> Vec<(Option<usize>, String)> {
        self.options
            .rows_per_page_options
            .iter()
            .map(|&choice| {
                let label = match choice {
                    Some(rows) => rows.to_string(),
                    None => self.strings.show_all().to_owned(),
                };
                (choice, label)
            })
            .collect()
    }

    /// Dispatches a click on `row`, optionally on the cell of `column`.
    ///
    /// The cell handler, if any, runs first and exactly once. The row handler
    /// runs afterwards unless the cell handler returned [`Propagation::Stop`].
    pub fn dispatch_click(&self, row: &T, column: Option<usize>) -> ClickDispatch {
        let cell = column
            .and_then(|column| self.columns.get(column))
            .and_then(|column| column.click(row));
        let mut dispatch = ClickDispatch {
            cell: cell.is_some(),
            row: false,
        };
        if cell != Some(Propagation::Stop) {
            if let Some(on_row_click) = &self.on_row_click {
                on_row_click(row);
                dispatch.row = true;
            }
        }
        dispatch
    }

    fn sort(&self, rows: &mut Vec<(usize, &T)>, state: &TableViewState) {
        if let Some(order_by) = state.order_by {
            match self.columns.get(order_by.column) {
                Some(column) if column.is_sortable() => {
                    sort_rows(
                        rows,
                        |(_, row)| column.sort_key(row).unwrap_or_default(),
                        order_by.direction,
                    );
                    return;
                }
                _ => {
                    tracing::warn!(
                        column = order_by.column,
                        "sort requested on a missing or unsortable column; ignoring it"
                    );
                }
            }
        }
        if let Some(key) = &self.order_by_default {
            let direction: SortDirection = self.options.order_by_default_direction;
            sort_rows(rows, |(_, row)| key.resolve(row), direction);
        }
    }

    fn footer(&self, rows: &[(usize, &T)]) -> Option<Footer> {
        if !self.columns.iter().any(Column::has_sum) {
            return None;
        }
        let footer = self
            .columns
            .iter()
            .map(|column| {
                let sum = column.footer_sum()?;
                let total: f64 = rows
                    .iter()
                    .filter_map(|(_, row)| column.value(row).as_f64())
                    .sum();
                Some(sum.format(total))
            })
            .collect();
        Some(footer)
    }
}

impl<T> fmt::Debug for Table<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Table")
            .field("columns", &self.columns)
            .field("filter_column", &self.filter_column)
            .field("order_by_default", &self.order_by_default)
            .field("move_id", &self.move_id)
            .field("row_class", &self.row_class)
            .field("on_row_click", &self.on_row_click.is_some())
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
