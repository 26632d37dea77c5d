// Copyright 2025 the Tabula Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Column definitions.

use std::fmt;

use crate::{Accessor, CellValue};

/// Whether a cell click lets the row click handler run afterwards.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Propagation {
    /// Keep propagating to the row handler.
    #[default]
    Continue,
    /// Stop here; the row handler does not run.
    Stop,
}

enum SortSource<T> {
    Selector,
    Accessor(Accessor<T>),
}

/// Footer aggregation for a column.
pub struct Sum {
    format: Option<Box<dyn Fn(f64) -> String>>,
}

impl Sum {
    /// Formats a computed total.
    #[must_use]
    pub fn format(&self, total: f64) -> String {
        match &self.format {
            Some(format) => format(total),
            None => total.to_string(),
        }
    }
}

impl fmt::Debug for Sum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sum")
            .field("formatted", &self.format.is_some())
            .finish()
    }
}

/// One table column: a header name, a value selector, and optional sorting,
/// styling, click, and footer behavior.
///
/// ```
/// use std::collections::BTreeMap;
/// use tabula_table::{CellValue, Column, Propagation};
///
/// type Row = BTreeMap<String, CellValue>;
///
/// let age: Column<Row> = Column::new("Age", "age")
///     .sortable()
///     .class_name("numeric")
///     .sum_formatted(|total| format!("{total} years"))
///     .on_click(|_row: &Row| Propagation::Stop);
/// assert!(age.is_sortable());
/// assert_eq!(age.cell_class_name(), Some("numeric"));
/// ```
pub struct Column<T> {
    name: String,
    selector: Accessor<T>,
    order_by: Option<SortSource<T>>,
    class_name: Option<String>,
    on_click: Option<Box<dyn Fn(&T) -> Propagation>>,
    sum: Option<Sum>,
}

impl<T> Column<T> {
    /// Creates a column named `name` showing `selector`.
    pub fn new(name: impl Into<String>, selector: impl Into<Accessor<T>>) -> Self {
        Self {
            name: name.into(),
            selector: selector.into(),
            order_by: None,
            class_name: None,
            on_click: None,
            sum: None,
        }
    }

    /// Makes the column sortable by its displayed value.
    #[must_use]
    pub fn sortable(mut self) -> Self {
        self.order_by = Some(SortSource::Selector);
        self
    }

    /// Makes the column sortable by a dedicated key.
    #[must_use]
    pub fn order_by(mut self, key: impl Into<Accessor<T>>) -> Self {
        self.order_by = Some(SortSource::Accessor(key.into()));
        self
    }

    /// Sets the cell class name.
    #[must_use]
    pub fn class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    /// Sets the per-cell click handler.
    #[must_use]
    pub fn on_click(mut self, handler: impl Fn(&T) -> Propagation + 'static) -> Self {
        self.on_click = Some(Box::new(handler));
        self
    }

    /// Adds a footer sum, displayed with `f64`'s default formatting.
    #[must_use]
    pub fn sum(mut self) -> Self {
        self.sum = Some(Sum { format: None });
        self
    }

    /// Adds a footer sum displayed through `format`.
    #[must_use]
    pub fn sum_formatted(mut self, format: impl Fn(f64) -> String + 'static) -> Self {
        self.sum = Some(Sum {
            format: Some(Box::new(format)),
        });
        self
    }

    /// Header name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Cell class name, if any.
    #[must_use]
    pub fn cell_class_name(&self) -> Option<&str> {
        self.class_name.as_deref()
    }

    /// Returns `true` if clicking the header sorts by this column.
    #[must_use]
    pub fn is_sortable(&self) -> bool {
        self.order_by.is_some()
    }

    /// Returns `true` if the column has a footer sum.
    #[must_use]
    pub fn has_sum(&self) -> bool {
        self.sum.is_some()
    }

    /// Displayed value for `row`.
    pub fn value(&self, row: &T) -> CellValue {
        self.selector.resolve(row)
    }

    /// Sort key for `row`, or `None` if the column is not sortable.
    pub fn sort_key(&self, row: &T) -> Option<CellValue> {
        match self.order_by.as_ref()? {
            SortSource::Selector => Some(self.selector.resolve(row)),
            SortSource::Accessor(key) => Some(key.resolve(row)),
        }
    }

    /// Runs the cell click handler, returning `None` if there is none.
    pub fn click(&self, row: &T) -> Option<Propagation> {
        self.on_click.as_ref().map(|handler| handler(row))
    }

    pub(crate) fn footer_sum(&self) -> Option<&Sum> {
        self.sum.as_ref()
    }
}

impl<T> fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("name", &self.name)
            .field("selector", &self.selector)
            .field("sortable", &self.is_sortable())
            .field("class_name", &self.class_name)
            .field("clickable", &self.on_click.is_some())
            .field("sum", &self.sum)
            .finish()
    }
}
