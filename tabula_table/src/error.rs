// Copyright 2025 the Tabula Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported by the table pipeline.

/// Reasons a table cannot be rendered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    /// The host passed no data at all.
    #[error("table data is missing")]
    MissingData,
    /// The table was defined without columns.
    #[error("table has no columns")]
    MissingColumns,
}
