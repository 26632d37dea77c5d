// Copyright 2025 the Tabula Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Caller-supplied row accessors.

use std::fmt;

use crate::{CellValue, Record};

/// Reads a [`CellValue`] out of a row.
///
/// Accessors are either a named field of a [`Record`] or an arbitrary
/// function of the row. Accessors are expected to be well formed; the table
/// does not guard against panicking accessors.
pub struct Accessor<T> {
    field: Option<String>,
    read: Box<dyn Fn(&T) -> CellValue>,
}

impl<T> Accessor<T> {
    /// Wraps a function of the row.
    pub fn from_fn<V, F>(f: F) -> Self
    where
        V: Into<CellValue>,
        F: Fn(&T) -> V + 'static,
    {
        Self {
            field: None,
            read: Box::new(move |row| f(row).into()),
        }
    }

    /// Reads the value for `row`.
    pub fn resolve(&self, row: &T) -> CellValue {
        (self.read)(row)
    }

    /// Field name, for accessors built with [`Accessor::field`].
    #[must_use]
    pub fn field_name(&self) -> Option<&str> {
        self.field.as_deref()
    }
}

impl<T: Record> Accessor<T> {
    /// Reads the named field through [`Record::field`].
    pub fn field(name: impl Into<String>) -> Self {
        let name = name.into();
        let key = name.clone();
        Self {
            field: Some(name),
            read: Box::new(move |row: &T| row.field(&key)),
        }
    }
}

impl<T: Record> From<&str> for Accessor<T> {
    fn from(name: &str) -> Self {
        Self::field(name)
    }
}

impl<T: Record> From<String> for Accessor<T> {
    fn from(name: String) -> Self {
        Self::field(name)
    }
}

impl<T> fmt::Debug for Accessor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.field {
            Some(name) => f.debug_tuple("Accessor::field").field(name).finish(),
            None => f.write_str("Accessor::from_fn(..)"),
        }
    }
}
