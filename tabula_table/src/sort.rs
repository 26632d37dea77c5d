// Copyright 2025 the Tabula Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sort directions, the three-state header cycle, and the row sorter.

use std::cmp::Ordering;

use crate::CellValue;

/// Sort direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum SortDirection {
    /// Smallest first.
    #[default]
    Ascending,
    /// Largest first.
    Descending,
}

impl SortDirection {
    /// The opposite direction.
    #[must_use]
    pub const fn reverse(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    /// Applies this direction to an ascending ordering.
    #[must_use]
    pub const fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }
}

/// An explicit column sort.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OrderBy {
    /// Index of the sorted column.
    pub column: usize,
    /// Direction of the sort.
    pub direction: SortDirection,
}

/// Sort state of a single column header.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SortState {
    /// Not sorted by this column.
    #[default]
    Unsorted,
    /// Sorted ascending by this column.
    Ascending,
    /// Sorted descending by this column.
    Descending,
}

impl SortState {
    /// The state after one more click on the same header.
    ///
    /// `Unsorted → Ascending → Descending → Unsorted`.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Unsorted => Self::Ascending,
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Unsorted,
        }
    }

    /// Header state of `column` under the active sort.
    #[must_use]
    pub fn of(column: usize, order_by: Option<OrderBy>) -> Self {
        match order_by {
            Some(OrderBy {
                column: active,
                direction,
            }) if active == column => direction.into(),
            _ => Self::Unsorted,
        }
    }

    /// The direction this state sorts in, if any.
    #[must_use]
    pub const fn direction(self) -> Option<SortDirection> {
        match self {
            Self::Unsorted => None,
            Self::Ascending => Some(SortDirection::Ascending),
            Self::Descending => Some(SortDirection::Descending),
        }
    }
}

impl From<SortDirection> for SortState {
    fn from(direction: SortDirection) -> Self {
        match direction {
            SortDirection::Ascending => Self::Ascending,
            SortDirection::Descending => Self::Descending,
        }
    }
}

/// The active sort after clicking the header of `column`.
///
/// Repeated clicks on the same header cycle through ascending, descending and
/// unsorted; clicking a different header always starts at ascending.
#[must_use]
pub fn cycle_header(current: Option<OrderBy>, column: usize) -> Option<OrderBy> {
    SortState::of(column, current)
        .next()
        .direction()
        .map(|direction| OrderBy { column, direction })
}

/// Compares two sort keys, placing incomparable keys last in either direction.
pub(crate) fn compare_keys(a: &CellValue, b: &CellValue, direction: SortDirection) -> Ordering {
    match (a.sort_cmp(b), a.is_comparable(), b.is_comparable()) {
        (Some(ordering), ..) => direction.apply(ordering),
        (None, false, false) => Ordering::Equal,
        (None, false, true) => Ordering::Greater,
        (None, true, _) => Ordering::Less,
    }
}

/// Stable sort of `rows` by `key`.
///
/// Keys are resolved once per row. Rows with equal keys keep their relative order.
pub(crate) fn sort_rows<R>(
    rows: &mut Vec<R>,
    mut key: impl FnMut(&R) -> CellValue,
    direction: SortDirection,
) {
    let mut keyed: Vec<(CellValue, R)> = rows.drain(..).map(|row| (key(&row), row)).collect();
    keyed.sort_by(|(a, _), (b, _)| compare_keys(a, b, direction));
    rows.extend(keyed.into_iter().map(|(_, row)| row));
}
