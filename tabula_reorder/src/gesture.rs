// Copyright 2025 the Tabula Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-gesture drag state and the hover swap decision.
//!
//! A drag gesture is represented by a [`DragSession`] value owned by whoever
//! drives the pointer stream. The session is handed to the list by `&mut`
//! on every hover so the list can advance its tracked slot in place; there is
//! no shared aliasing between the list and the gesture.
//!
//! The swap decision itself is the pure function [`hover_decision`]:
//!
//! ```
//! use kurbo::Rect;
//! use tabula_reorder::{HoverDecision, hover_decision};
//!
//! // A row 100px tall. Dragging slot 0 downward over slot 1.
//! let rect = Rect::new(0.0, 0.0, 200.0, 100.0);
//!
//! // Pointer still in the upper half: hold.
//! assert_eq!(hover_decision(0, 1, Some(rect), Some(25.0)), HoverDecision::Hold);
//! // Pointer crossed into the lower half: swap.
//! assert_eq!(
//!     hover_decision(0, 1, Some(rect), Some(75.0)),
//!     HoverDecision::Swap { from: 0, to: 1 },
//! );
//! ```

use kurbo::Rect;

/// Why a hover event was ignored without changing any state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IgnoreReason {
    /// The dragged item is hovering over its own slot.
    SelfHover,
    /// The hovered element had no bounding rectangle.
    MissingRect,
    /// The pointer position was unavailable.
    MissingPointer,
    /// The session was started against items that have since been replaced.
    StaleSession,
    /// The hovered slot does not exist in the current list.
    OutOfRange,
}

/// Outcome of a single hover tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HoverDecision {
    /// Exchange the dragged slot `from` with the hovered slot `to`.
    Swap {
        /// Slot the dragged item occupied before this tick.
        from: usize,
        /// Slot the dragged item occupies after this tick.
        to: usize,
    },
    /// The pointer has not yet crossed the hovered item's half-height threshold.
    Hold,
    /// The event was a no-op.
    Ignored(IgnoreReason),
}

impl HoverDecision {
    /// Returns `true` for [`HoverDecision::Swap`].
    #[must_use]
    pub const fn is_swap(&self) -> bool {
        matches!(self, Self::Swap { .. })
    }
}

/// Decides whether dragging the item at `drag_index` over `hover_index` swaps them.
///
/// - `rect` is the hovered element's bounding rectangle, `y0` being its top
///   and `y1` its bottom.
/// - `pointer_y` is the pointer's client Y position.
///
/// The threshold is half the hovered element's height, measured as an offset
/// from its top edge: a downward drag swaps once the pointer is at or below that
/// offset, an upward drag once it is at or above it.
#[must_use]
pub fn hover_decision(
    drag_index: usize,
    hover_index: usize,
    rect: Option<Rect>,
    pointer_y: Option<f64>,
) -> HoverDecision {
    if drag_index == hover_index {
        return HoverDecision::Ignored(IgnoreReason::SelfHover);
    }
    let Some(rect) = rect else {
        return HoverDecision::Ignored(IgnoreReason::MissingRect);
    };
    let hover_middle_y = (rect.y1 - rect.y0) / 2.0;
    let Some(pointer_y) = pointer_y else {
        return HoverDecision::Ignored(IgnoreReason::MissingPointer);
    };
    let hover_client_y = pointer_y - rect.y0;

    if drag_index < hover_index && hover_client_y < hover_middle_y {
        return HoverDecision::Hold;
    }
    if drag_index > hover_index && hover_client_y > hover_middle_y {
        return HoverDecision::Hold;
    }
    HoverDecision::Swap {
        from: drag_index,
        to: hover_index,
    }
}

/// State of one pointer-drag gesture, from drag-start to drop or cancel.
///
/// Sessions are created by [`DragAndDropList::begin_drag`](crate::DragAndDropList::begin_drag)
/// and consumed by [`DragAndDropList::end_drag`](crate::DragAndDropList::end_drag).
#[derive(Clone, Debug)]
pub struct DragSession<K> {
    pub(crate) id: u64,
    pub(crate) generation: u64,
    pub(crate) key: K,
    pub(crate) source_slot: usize,
    pub(crate) source_index: usize,
    pub(crate) index: usize,
    pub(crate) dropped_slot: Option<usize>,
}

impl<K> DragSession<K> {
    /// Identity key of the dragged item, captured at drag-start.
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Visual slot the drag started from.
    #[must_use]
    pub const fn source_slot(&self) -> usize {
        self.source_slot
    }

    /// Canonical index of the dragged item in the caller's array.
    #[must_use]
    pub const fn source_index(&self) -> usize {
        self.source_index
    }

    /// Slot the dragged item currently occupies.
    #[must_use]
    pub const fn current_slot(&self) -> usize {
        self.index
    }

    /// Slot the gesture was dropped on, if a drop has happened.
    #[must_use]
    pub const fn dropped_slot(&self) -> Option<usize> {
        self.dropped_slot
    }

    /// Returns `true` once a drop target accepted this gesture.
    #[must_use]
    pub const fn did_drop(&self) -> bool {
        self.dropped_slot.is_some()
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Rect;

    use super::{HoverDecision, IgnoreReason, hover_decision};

    const ROW: Rect = Rect::new(0.0, 0.0, 300.0, 100.0);

    #[test]
    fn self_hover_is_ignored() {
        assert_eq!(
            hover_decision(2, 2, Some(ROW), Some(90.0)),
            HoverDecision::Ignored(IgnoreReason::SelfHover)
        );
    }

    #[test]
    fn missing_geometry_is_ignored() {
        assert_eq!(
            hover_decision(0, 1, None, Some(90.0)),
            HoverDecision::Ignored(IgnoreReason::MissingRect)
        );
        assert_eq!(
            hover_decision(0, 1, Some(ROW), None),
            HoverDecision::Ignored(IgnoreReason::MissingPointer)
        );
    }

    #[test]
    fn downward_drag_waits_for_lower_half() {
        assert_eq!(hover_decision(0, 1, Some(ROW), Some(25.0)), HoverDecision::Hold);
        assert_eq!(
            hover_decision(0, 1, Some(ROW), Some(50.0)),
            HoverDecision::Swap { from: 0, to: 1 }
        );
        assert_eq!(
            hover_decision(0, 1, Some(ROW), Some(75.0)),
            HoverDecision::Swap { from: 0, to: 1 }
        );
    }

    #[test]
    fn upward_drag_waits_for_upper_half() {
        assert_eq!(hover_decision(3, 2, Some(ROW), Some(75.0)), HoverDecision::Hold);
        assert_eq!(
            hover_decision(3, 2, Some(ROW), Some(25.0)),
            HoverDecision::Swap { from: 3, to: 2 }
        );
    }

    #[test]
    fn threshold_is_a_half_height_offset_from_the_top() {
        // Row spanning 200..260: threshold is 30px below its top edge.
        let row = Rect::new(0.0, 200.0, 300.0, 260.0);
        assert_eq!(hover_decision(0, 4, Some(row), Some(229.0)), HoverDecision::Hold);
        assert!(hover_decision(0, 4, Some(row), Some(231.0)).is_swap());
    }
}
