// Copyright 2025 the Tabula Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The drag-and-drop list: one permutation keyed by the caller's current items.

use alloc::vec::Vec;

use kurbo::Rect;

use crate::gesture::{DragSession, HoverDecision, IgnoreReason, hover_decision};
use crate::{Permutation, ReorderError};

/// A completed drop, in the caller's coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DropEvent {
    /// Canonical index of the moved item in the caller's array.
    pub source: usize,
    /// Visual slot the item was dropped on.
    pub target: usize,
}

/// What the list should do with its live permutation after a drop.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DropResponse {
    /// Keep the visual order until the caller's items change.
    ///
    /// Callers that commit the move to their own store return this; the next
    /// [`DragAndDropList::sync`] with the new items resynchronizes the list.
    #[default]
    Keep,
    /// Snap back to the pre-drag order now.
    Reset,
}

/// Receives completed drops.
///
/// Implemented for any `FnMut(DropEvent) -> DropResponse`. The handler is
/// the only place a new order can be persisted; the list never writes to
/// caller data. A handler that wants to roll back later can return
/// [`DropResponse::Keep`] and call [`DragAndDropList::reset`] afterwards.
pub trait DropHandler {
    /// Called exactly once per completed drop.
    fn on_drop(&mut self, event: DropEvent) -> DropResponse;
}

impl<F> DropHandler for F
where
    F: FnMut(DropEvent) -> DropResponse,
{
    fn on_drop(&mut self, event: DropEvent) -> DropResponse {
        self(event)
    }
}

/// How a gesture ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragEnd {
    /// A drop target accepted the gesture.
    Dropped,
    /// The pointer was released outside any target; the permutation was reset.
    Cancelled,
    /// The items changed while dragging; the list had already resynchronized.
    Stale,
}

/// Cursor override injected into every rendered item.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Cursor {
    /// The item can be grabbed and moved.
    #[default]
    Move,
}

/// Style overrides injected into every rendered item.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ItemStyle {
    /// Pointer cursor over the item.
    pub cursor: Cursor,
    /// `0.0` for the slot under an active drag, `1.0` otherwise.
    pub opacity: f32,
}

/// Per-slot properties handed to an [`ItemRenderer`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SlotProps {
    /// Visual slot.
    pub slot: usize,
    /// Canonical index of the item rendered in this slot.
    pub index: usize,
    /// `true` for the slot most recently dropped on.
    pub dropped: bool,
    /// `true` for the slot holding the item being dragged.
    pub dragging: bool,
    /// Cursor and opacity overrides.
    pub style: ItemStyle,
}

/// Renders one item of a [`DragAndDropList`].
///
/// Implemented for any `Fn(&T, &SlotProps) -> O`.
pub trait ItemRenderer<T> {
    /// Rendered output for a single item.
    type Output;

    /// Renders `item` with the injected slot properties.
    fn render(&self, item: &T, props: &SlotProps) -> Self::Output;
}

impl<T, O, F> ItemRenderer<T> for F
where
    F: Fn(&T, &SlotProps) -> O,
{
    type Output = O;

    fn render(&self, item: &T, props: &SlotProps) -> O {
        self(item, props)
    }
}

#[derive(Clone, Copy, Debug)]
struct ActiveDrag {
    id: u64,
    slot: usize,
}

/// A reorderable list over caller-owned items.
///
/// The list stores one identity key per item (`K`) and a [`Permutation`] over
/// them. Call [`sync`](Self::sync) with the current keys whenever the caller's
/// items may have changed; a different key sequence discards any in-flight
/// reorder and invalidates outstanding [`DragSession`]s.
///
/// ```
/// use kurbo::Rect;
/// use tabula_reorder::{DragAndDropList, DragEnd, DropEvent, DropResponse};
///
/// let mut list = DragAndDropList::new(["a", "b", "c"]);
/// let row = |slot: usize| Rect::new(0.0, slot as f64 * 20.0, 100.0, slot as f64 * 20.0 + 20.0);
///
/// let mut session = list.begin_drag(0).unwrap();
/// // Pointer moves into the lower half of slot 1.
/// assert!(list.hover(&mut session, 1, Some(row(1)), Some(35.0)).is_swap());
/// assert_eq!(list.order(), &[1, 0, 2]);
///
/// let mut seen = None;
/// list.drop_on(&mut session, 1, &mut |event: DropEvent| {
///     seen = Some(event);
///     DropResponse::Keep
/// });
/// assert_eq!(list.end_drag(session), DragEnd::Dropped);
/// assert_eq!(seen, Some(DropEvent { source: 0, target: 1 }));
///
/// // The caller commits the move; the list resynchronizes to identity.
/// assert!(list.sync(["b", "a", "c"]));
/// assert_eq!(list.order(), &[0, 1, 2]);
/// ```
#[derive(Clone, Debug)]
pub struct DragAndDropList<K> {
    keys: Vec<K>,
    permutation: Permutation,
    generation: u64,
    next_session: u64,
    active: Option<ActiveDrag>,
    dropped_slot: Option<usize>,
}

impl<K> Default for DragAndDropList<K> {
    fn default() -> Self {
        Self {
            keys: Vec::new(),
            permutation: Permutation::default(),
            generation: 0,
            next_session: 0,
            active: None,
            dropped_slot: None,
        }
    }
}

impl<K: Clone + PartialEq> DragAndDropList<K> {
    /// Creates a list over the given item keys.
    pub fn new(keys: impl IntoIterator<Item = K>) -> Self {
        let keys: Vec<K> = keys.into_iter().collect();
        Self {
            permutation: Permutation::identity(keys.len()),
            keys,
            ..Self::default()
        }
    }

    /// Number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns `true` if the list has no items (and renders no drag targets).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Item keys in canonical order.
    #[must_use]
    pub fn keys(&self) -> &[K] {
        &self.keys
    }

    /// Canonical indices in visual order.
    #[must_use]
    pub fn order(&self) -> &[usize] {
        self.permutation.as_slice()
    }

    /// The live permutation.
    #[must_use]
    pub fn permutation(&self) -> &Permutation {
        &self.permutation
    }

    /// Slot flagged as just dropped on, if any.
    #[must_use]
    pub const fn dropped_slot(&self) -> Option<usize> {
        self.dropped_slot
    }

    /// Returns `true` while a drag session is active.
    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        self.active.is_some()
    }

    /// Resynchronizes with the caller's current items.
    ///
    /// If `keys` differs from the stored sequence the permutation is reset to
    /// the identity and every outstanding session becomes stale. Returns
    /// `true` if a reset happened.
    pub fn sync(&mut self, keys: impl IntoIterator<Item = K>) -> bool {
        let keys: Vec<K> = keys.into_iter().collect();
        if keys == self.keys {
            return false;
        }
        if self.active.is_some() {
            tracing::debug!(
                len = keys.len(),
                "items changed during a drag; discarding the live order"
            );
        }
        self.keys = keys;
        self.permutation.reset(self.keys.len());
        self.generation = self.generation.wrapping_add(1);
        self.active = None;
        true
    }

    /// Restores the pre-drag order without touching the stored keys.
    pub fn reset(&mut self) {
        self.permutation.reset(self.keys.len());
    }

    /// Starts dragging the item in `slot`.
    ///
    /// Clears the dropped flag left by the previous gesture.
    ///
    /// # Errors
    ///
    /// Returns [`ReorderError::SlotOutOfRange`] for a slot outside the list and
    /// [`ReorderError::DragInProgress`] if another session is still active.
    pub fn begin_drag(&mut self, slot: usize) -> Result<DragSession<K>, ReorderError> {
        if self.active.is_some() {
            return Err(ReorderError::DragInProgress);
        }
        let source_index =
            self.permutation
                .canonical_index_of(slot)
                .ok_or(ReorderError::SlotOutOfRange {
                    slot,
                    len: self.len(),
                })?;
        let id = self.next_session;
        self.next_session = self.next_session.wrapping_add(1);
        self.active = Some(ActiveDrag { id, slot });
        self.dropped_slot = None;
        tracing::trace!(slot, source_index, "drag started");
        Ok(DragSession {
            id,
            generation: self.generation,
            key: self.keys[source_index].clone(),
            source_slot: slot,
            source_index,
            index: slot,
            dropped_slot: None,
        })
    }

    /// Returns `true` if `session` still refers to the item it was started on.
    #[must_use]
    pub fn is_current(&self, session: &DragSession<K>) -> bool {
        session.generation == self.generation
            && self.active.is_some_and(|active| active.id == session.id)
            && self
                .permutation
                .canonical_index_of(session.index)
                .and_then(|index| self.keys.get(index))
                .is_some_and(|key| *key == session.key)
    }

    /// Processes one hover tick of `session` over `hover_slot`.
    ///
    /// `rect` is the hovered element's bounds and `pointer_y` the pointer's
    /// client Y position. On a swap the permutation is updated and the
    /// session's tracked slot moves to `hover_slot`.
    pub fn hover(
        &mut self,
        session: &mut DragSession<K>,
        hover_slot: usize,
        rect: Option<Rect>,
        pointer_y: Option<f64>,
    ) -> HoverDecision {
        if !self.is_current(session) {
            tracing::trace!(hover_slot, "hover from a stale drag session ignored");
            return HoverDecision::Ignored(IgnoreReason::StaleSession);
        }
        if hover_slot >= self.len() {
            return HoverDecision::Ignored(IgnoreReason::OutOfRange);
        }
        let decision = hover_decision(session.index, hover_slot, rect, pointer_y);
        if let HoverDecision::Swap { from, to } = decision {
            if let Err(err) = self.permutation.swap(from, to) {
                tracing::warn!(%err, "hover swap rejected");
                return HoverDecision::Ignored(IgnoreReason::OutOfRange);
            }
            session.index = to;
            if let Some(active) = &mut self.active {
                active.slot = to;
            }
            tracing::trace!(from, to, "hover swap");
        }
        decision
    }

    /// Drops `session` on `target_slot`, reporting the move to `handler`.
    ///
    /// The handler runs at most once per session. Returns `false` without
    /// calling it if the session is stale, already dropped, or the target is
    /// out of range.
    pub fn drop_on<H>(
        &mut self,
        session: &mut DragSession<K>,
        target_slot: usize,
        handler: &mut H,
    ) -> bool
    where
        H: DropHandler + ?Sized,
    {
        if session.did_drop() || !self.is_current(session) || target_slot >= self.len() {
            tracing::trace!(target_slot, "drop ignored");
            return false;
        }
        session.dropped_slot = Some(target_slot);
        self.dropped_slot = Some(target_slot);
        let event = DropEvent {
            source: session.source_index,
            target: target_slot,
        };
        tracing::debug!(source = event.source, target = event.target, "drop");
        if handler.on_drop(event) == DropResponse::Reset {
            self.reset();
        }
        true
    }

    /// Ends `session`.
    ///
    /// A gesture that never reached a drop target resets the permutation and
    /// does not notify any handler.
    pub fn end_drag(&mut self, session: DragSession<K>) -> DragEnd {
        if !self.active.is_some_and(|active| active.id == session.id)
            || session.generation != self.generation
        {
            return DragEnd::Stale;
        }
        self.active = None;
        if session.did_drop() {
            DragEnd::Dropped
        } else {
            tracing::trace!(slot = session.source_slot, "drag cancelled");
            self.reset();
            DragEnd::Cancelled
        }
    }

    /// Slot properties in visual order.
    pub fn slots(&self) -> impl Iterator<Item = SlotProps> + '_ {
        let dragging_slot = self.active.map(|active| active.slot);
        self.permutation
            .iter()
            .enumerate()
            .map(move |(slot, index)| {
                let dragging = dragging_slot == Some(slot);
                SlotProps {
                    slot,
                    index,
                    dropped: self.dropped_slot == Some(slot),
                    dragging,
                    style: ItemStyle {
                        cursor: Cursor::Move,
                        opacity: if dragging { 0.0 } else { 1.0 },
                    },
                }
            })
    }

    /// Renders `items` in visual order.
    ///
    /// `items` must be the array the current keys were taken from. Renders
    /// nothing if `renderer` is `None` or if `items` no longer matches the
    /// stored keys in length.
    pub fn render<T, R>(&self, items: &[T], renderer: Option<&R>) -> Vec<R::Output>
    where
        R: ItemRenderer<T> + ?Sized,
    {
        let Some(renderer) = renderer else {
            tracing::warn!("drag-and-drop list has no item renderer; rendering nothing");
            return Vec::new();
        };
        if items.len() != self.keys.len() {
            tracing::warn!(
                items = items.len(),
                keys = self.keys.len(),
                "items were not synced before rendering; rendering nothing"
            );
            return Vec::new();
        }
        self.slots()
            .map(|props| renderer.render(&items[props.index], &props))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;

    use kurbo::Rect;

    use super::{DragAndDropList, DragEnd, DropEvent, DropResponse, SlotProps};
    use crate::{HoverDecision, IgnoreReason, ReorderError};

    fn row(slot: usize) -> Rect {
        let top = slot as f64 * 100.0;
        Rect::new(0.0, top, 400.0, top + 100.0)
    }

    fn pointer_in(slot: usize, offset: f64) -> Option<f64> {
        Some(slot as f64 * 100.0 + offset)
    }

    #[test]
    fn cancel_without_drop_resets_and_never_reports() {
        let mut list = DragAndDropList::new(['a', 'b', 'c']);
        let mut session = list.begin_drag(0).unwrap();
        list.hover(&mut session, 1, Some(row(1)), pointer_in(1, 80.0));
        assert_eq!(list.order(), &[1, 0, 2]);

        // Released outside any target: no drop_on call happened.
        assert!(!session.did_drop());
        assert_eq!(list.end_drag(session), DragEnd::Cancelled);
        assert_eq!(list.dropped_slot(), None);
        assert!(list.permutation().is_identity());
        assert!(!list.is_dragging());
    }

    #[test]
    fn drop_reports_source_and_target_once() {
        let mut list = DragAndDropList::new(['a', 'b', 'c', 'd']);
        let mut session = list.begin_drag(1).unwrap();
        list.hover(&mut session, 2, Some(row(2)), pointer_in(2, 60.0));
        list.hover(&mut session, 3, Some(row(3)), pointer_in(3, 60.0));
        assert_eq!(list.order(), &[0, 2, 3, 1]);

        let mut events = Vec::new();
        let mut handler = |event: DropEvent| {
            events.push(event);
            DropResponse::Keep
        };
        assert!(list.drop_on(&mut session, 3, &mut handler));
        // A second drop on the same gesture is ignored.
        assert!(!list.drop_on(&mut session, 3, &mut handler));
        assert_eq!(list.end_drag(session), DragEnd::Dropped);

        assert_eq!(events, vec![DropEvent { source: 1, target: 3 }]);
        assert_eq!(list.dropped_slot(), Some(3));
        // Kept until the caller commits.
        assert_eq!(list.order(), &[0, 2, 3, 1]);
    }

    #[test]
    fn drop_handler_can_snap_back() {
        let mut list = DragAndDropList::new([10_u32, 20, 30]);
        let mut session = list.begin_drag(2).unwrap();
        list.hover(&mut session, 1, Some(row(1)), pointer_in(1, 10.0));
        assert_eq!(list.order(), &[0, 2, 1]);

        list.drop_on(&mut session, 1, &mut |_: DropEvent| DropResponse::Reset);
        list.end_drag(session);
        assert!(list.permutation().is_identity());
    }

    #[test]
    fn self_hover_and_missing_geometry_do_not_mutate() {
        let mut list = DragAndDropList::new(['a', 'b']);
        let mut session = list.begin_drag(0).unwrap();
        assert_eq!(
            list.hover(&mut session, 0, Some(row(0)), pointer_in(0, 90.0)),
            HoverDecision::Ignored(IgnoreReason::SelfHover)
        );
        assert_eq!(
            list.hover(&mut session, 1, None, pointer_in(1, 90.0)),
            HoverDecision::Ignored(IgnoreReason::MissingRect)
        );
        assert_eq!(
            list.hover(&mut session, 1, Some(row(1)), None),
            HoverDecision::Ignored(IgnoreReason::MissingPointer)
        );
        assert!(list.permutation().is_identity());
        assert_eq!(session.current_slot(), 0);
    }

    #[test]
    fn repeated_hover_after_swap_is_idempotent() {
        let mut list = DragAndDropList::new(['a', 'b', 'c']);
        let mut session = list.begin_drag(0).unwrap();
        assert!(list.hover(&mut session, 1, Some(row(1)), pointer_in(1, 70.0)).is_swap());
        // Same geometry again: the dragged item now sits in slot 1 itself.
        assert_eq!(
            list.hover(&mut session, 1, Some(row(1)), pointer_in(1, 70.0)),
            HoverDecision::Ignored(IgnoreReason::SelfHover)
        );
        assert_eq!(list.order(), &[1, 0, 2]);
    }

    #[test]
    fn items_change_mid_drag_discards_live_order() {
        let mut list = DragAndDropList::new(["A", "B", "C"]);
        let mut session = list.begin_drag(0).unwrap();
        list.hover(&mut session, 1, Some(row(1)), pointer_in(1, 70.0));
        assert_eq!(list.order(), &[1, 0, 2]);

        assert!(list.sync(["X", "Y", "Z"]));
        let items = ["X", "Y", "Z"];
        let rendered = list.render(&items, Some(&|item: &&str, _: &SlotProps| String::from(*item)));
        assert_eq!(rendered, vec!["X", "Y", "Z"]);

        // The old gesture is now inert.
        assert_eq!(
            list.hover(&mut session, 2, Some(row(2)), pointer_in(2, 90.0)),
            HoverDecision::Ignored(IgnoreReason::StaleSession)
        );
        let mut called = false;
        assert!(!list.drop_on(&mut session, 2, &mut |_: DropEvent| {
            called = true;
            DropResponse::Keep
        }));
        assert!(!called);
        assert_eq!(list.end_drag(session), DragEnd::Stale);
        assert!(list.permutation().is_identity());
    }

    #[test]
    fn unchanged_items_keep_the_live_order() {
        let mut list = DragAndDropList::new([1, 2, 3]);
        let mut session = list.begin_drag(0).unwrap();
        list.hover(&mut session, 1, Some(row(1)), pointer_in(1, 70.0));
        assert!(!list.sync([1, 2, 3]));
        assert_eq!(list.order(), &[1, 0, 2]);
        assert!(list.is_current(&session));
    }

    #[test]
    fn reset_under_a_live_session_makes_it_stale() {
        let mut list = DragAndDropList::new(['a', 'b', 'c']);
        let mut session = list.begin_drag(0).unwrap();
        assert!(list.hover(&mut session, 1, Some(row(1)), pointer_in(1, 70.0)).is_swap());

        // Same generation, but slot 1 holds 'b' again.
        list.reset();
        assert!(!list.is_current(&session));
        assert_eq!(
            list.hover(&mut session, 2, Some(row(2)), pointer_in(2, 90.0)),
            HoverDecision::Ignored(IgnoreReason::StaleSession)
        );
        let mut called = false;
        assert!(!list.drop_on(&mut session, 2, &mut |_: DropEvent| {
            called = true;
            DropResponse::Keep
        }));
        assert!(!called);
        assert_eq!(list.dropped_slot(), None);
        assert_eq!(list.end_drag(session), DragEnd::Cancelled);
        assert!(list.permutation().is_identity());
    }

    #[test]
    fn one_session_at_a_time() {
        let mut list = DragAndDropList::new([1, 2]);
        let session = list.begin_drag(0).unwrap();
        assert_eq!(list.begin_drag(1).unwrap_err(), ReorderError::DragInProgress);
        list.end_drag(session);
        assert!(list.begin_drag(1).is_ok());
    }

    #[test]
    fn begin_drag_out_of_range() {
        let mut list: DragAndDropList<u8> = DragAndDropList::new([]);
        assert_eq!(
            list.begin_drag(0).unwrap_err(),
            ReorderError::SlotOutOfRange { slot: 0, len: 0 }
        );
    }

    #[test]
    fn empty_list_and_missing_renderer_render_nothing() {
        let list: DragAndDropList<u8> = DragAndDropList::default();
        let items: [u8; 0] = [];
        let renderer = |item: &u8, _: &SlotProps| *item;
        assert!(list.render(&items, Some(&renderer)).is_empty());

        let list = DragAndDropList::new([1_u8, 2]);
        let none: Option<&fn(&u8, &SlotProps) -> u8> = None;
        assert!(list.render(&[1_u8, 2], none).is_empty());
    }

    #[test]
    fn slot_props_flag_dragging_and_dropped() {
        let mut list = DragAndDropList::new(['a', 'b', 'c']);
        let mut session = list.begin_drag(0).unwrap();
        list.hover(&mut session, 1, Some(row(1)), pointer_in(1, 70.0));

        let props: Vec<SlotProps> = list.slots().collect();
        assert!(props[1].dragging);
        assert_eq!(props[1].style.opacity, 0.0);
        assert_eq!(props[0].style.opacity, 1.0);

        list.drop_on(&mut session, 1, &mut |_: DropEvent| DropResponse::Keep);
        list.end_drag(session);
        // Committing the order keeps the dropped flag for styling.
        list.sync(['b', 'a', 'c']);
        let props: Vec<SlotProps> = list.slots().collect();
        assert!(props[1].dropped);
        assert!(!props.iter().any(|p| p.dragging));

        // The next gesture clears it.
        let session = list.begin_drag(2).unwrap();
        assert_eq!(list.dropped_slot(), None);
        list.end_drag(session);
    }
}
