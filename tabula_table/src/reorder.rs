// Copyright 2025 the Tabula Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Manual row reordering: bridges a [`TableView`] to a drag-and-drop list.

use tabula_reorder::{DragAndDropList, DropEvent, DropHandler, DropResponse};

use crate::{CellValue, Table, TableView, ViewRow};

/// A row move requested by a completed drop.
#[derive(Debug)]
pub struct MoveRequest<'a, T> {
    /// The dragged row.
    pub moved: &'a T,
    /// The row that occupied the drop slot before the drag began.
    pub target: &'a T,
    /// Index of the dragged row in the caller's data.
    pub from: usize,
    /// Index of the target row in the caller's data.
    pub to: usize,
}

/// Translates list drops into [`MoveRequest`]s for the rows of one view.
///
/// Built with [`TableView::mover`].
#[derive(Debug)]
pub struct RowMover<'v, 'a, T, F> {
    rows: &'v [ViewRow<'a, T>],
    on_move: F,
}

impl<'a, T, F> DropHandler for RowMover<'_, 'a, T, F>
where
    F: FnMut(MoveRequest<'a, T>) -> DropResponse,
{
    fn on_drop(&mut self, event: DropEvent) -> DropResponse {
        let (Some(moved), Some(target)) = (self.rows.get(event.source), self.rows.get(event.target))
        else {
            tracing::warn!(
                source = event.source,
                target = event.target,
                rows = self.rows.len(),
                "drop outside the rendered rows; resetting"
            );
            return DropResponse::Reset;
        };
        (self.on_move)(MoveRequest {
            moved: moved.row,
            target: target.row,
            from: moved.index,
            to: target.index,
        })
    }
}

impl<'a, T> TableView<'a, T> {
    /// A drop handler that reports moves between this view's rows.
    ///
    /// The reorder list must have been synchronized with
    /// [`Table::sync_reorder_list`] for this view.
    pub fn mover<F>(&self, on_move: F) -> RowMover<'_, 'a, T, F>
    where
        F: FnMut(MoveRequest<'a, T>) -> DropResponse,
    {
        RowMover {
            rows: &self.rows,
            on_move,
        }
    }
}

impl<T> Table<T> {
    /// Move identities of the rendered rows, or `None` outside manual reorder mode.
    pub fn move_keys(&self, view: &TableView<'_, T>) -> Option<Vec<CellValue>> {
        if !view.manual_reorder {
            return None;
        }
        view.rows
            .iter()
            .map(|row| self.move_key(row.row))
            .collect()
    }

    /// Points `list` at the rows of `view`.
    ///
    /// Outside manual reorder mode the list is emptied so it offers no drag
    /// targets. Returns `true` if the list was reset.
    pub fn sync_reorder_list(
        &self,
        view: &TableView<'_, T>,
        list: &mut DragAndDropList<CellValue>,
    ) -> bool {
        list.sync(self.move_keys(view).unwrap_or_default())
    }
}
