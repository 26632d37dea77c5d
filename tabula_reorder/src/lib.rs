// Copyright 2025 the Tabula Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=tabula_reorder --heading-base-level=0

//! Tabula Reorder: headless drag-and-drop list reordering.
//!
//! This crate keeps the caller's items untouched and layers a visual order on
//! top of them while a pointer drag is in progress. Only the caller commits a
//! new order, from the drop callback; the list then resynchronizes.
//!
//! The core concepts are:
//!
//! - [`Permutation`]: a bijection from visual slot to canonical item index.
//!   At rest it is always the identity.
//! - [`hover_decision`]: the pure swap rule. A hovered item swaps with the
//!   dragged one once the pointer crosses half of the hovered item's height,
//!   in the direction of travel.
//! - [`DragSession`]: the state of one gesture, owned by the code driving the
//!   pointer stream and lent to the list on each event.
//! - [`DragAndDropList`]: the composition root. It owns one permutation keyed
//!   by the caller's item identities, applies hover swaps, reports drops to a
//!   [`DropHandler`], and resets on cancel or when the items change.
//!
//! This crate deliberately does **not** know about widgets or any particular UI
//! framework. Host frameworks are responsible for:
//!
//! - Calling [`DragAndDropList::sync`] with the current item keys on every render.
//! - Forwarding drag-start, hover (with the hovered element's bounds and the
//!   pointer's client Y), drop, and drag-end events.
//! - Rendering slots in [`DragAndDropList::slots`] order, honoring the injected
//!   [`SlotProps`].
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Rect;
//! use tabula_reorder::{DragAndDropList, DragEnd};
//!
//! let mut list = DragAndDropList::new(["first", "second"]);
//! let mut session = list.begin_drag(0).unwrap();
//!
//! // Drag over the lower half of the second row.
//! let second_row = Rect::new(0.0, 40.0, 200.0, 80.0);
//! list.hover(&mut session, 1, Some(second_row), Some(70.0));
//! assert_eq!(list.order(), &[1, 0]);
//!
//! // Released outside the list: the visual order snaps back.
//! assert_eq!(list.end_drag(session), DragEnd::Cancelled);
//! assert_eq!(list.order(), &[0, 1]);
//! ```
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for dependencies such as `kurbo`.
//! - `libm`: enables `no_std` + `alloc` builds that rely on `libm` for floating-point math.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

#[cfg(test)]
extern crate std;

mod error;
mod gesture;
mod list;
mod permutation;

pub use error::ReorderError;
pub use gesture::{DragSession, HoverDecision, IgnoreReason, hover_decision};
pub use list::{
    Cursor, DragAndDropList, DragEnd, DropEvent, DropHandler, DropResponse, ItemRenderer,
    ItemStyle, SlotProps,
};
pub use permutation::Permutation;
