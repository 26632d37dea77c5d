// Copyright 2025 the Tabula Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The ordered list model: a permutation from visual slot to canonical index.

use alloc::vec::Vec;

use crate::ReorderError;

/// A bijection from visual slot to canonical item index.
///
/// The permutation never touches the caller's items. Slot `s` renders the item
/// at canonical index `canonical_index_of(s)`; at rest this is always `s`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Permutation {
    slots: Vec<usize>,
}

impl Permutation {
    /// Creates the identity permutation `[0, 1, .., len - 1]`.
    #[must_use]
    pub fn identity(len: usize) -> Self {
        Self {
            slots: (0..len).collect(),
        }
    }

    /// Resets to the identity over `len` items, discarding any in-flight reorder.
    pub fn reset(&mut self, len: usize) {
        self.slots.clear();
        self.slots.extend(0..len);
    }

    /// Number of slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` if there are no slots.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Returns `true` if every slot maps to its own index.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.slots.iter().enumerate().all(|(slot, &index)| slot == index)
    }

    /// Exchanges the entries at `slot_a` and `slot_b`.
    ///
    /// Swapping a slot with itself is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`ReorderError::SlotOutOfRange`] if either slot is outside `0..len`;
    /// the permutation is left untouched in that case.
    pub fn swap(&mut self, slot_a: usize, slot_b: usize) -> Result<(), ReorderError> {
        let len = self.slots.len();
        for slot in [slot_a, slot_b] {
            if slot >= len {
                return Err(ReorderError::SlotOutOfRange { slot, len });
            }
        }
        self.slots.swap(slot_a, slot_b);
        Ok(())
    }

    /// Canonical item index rendered at `slot`.
    #[must_use]
    pub fn canonical_index_of(&self, slot: usize) -> Option<usize> {
        self.slots.get(slot).copied()
    }

    /// Slot currently showing the item at canonical `index`.
    #[must_use]
    pub fn slot_of(&self, index: usize) -> Option<usize> {
        self.slots.iter().position(|&i| i == index)
    }

    /// The raw slot → index mapping.
    #[must_use]
    pub fn as_slice(&self) -> &[usize] {
        &self.slots
    }

    /// Iterates canonical indices in visual order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.slots.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use proptest::prelude::*;

    use super::Permutation;
    use crate::ReorderError;

    fn is_bijection(p: &Permutation) -> bool {
        let mut seen = vec![false; p.len()];
        for index in p.iter() {
            if index >= seen.len() || seen[index] {
                return false;
            }
            seen[index] = true;
        }
        true
    }

    #[test]
    fn reset_yields_identity() {
        let mut p = Permutation::identity(4);
        p.swap(0, 3).unwrap();
        assert!(!p.is_identity());

        p.reset(6);
        assert_eq!(p.as_slice(), &[0, 1, 2, 3, 4, 5]);
        assert!(p.is_identity());
    }

    #[test]
    fn empty_permutation() {
        let p = Permutation::identity(0);
        assert!(p.is_empty());
        assert!(p.is_identity());
        assert_eq!(p.canonical_index_of(0), None);
    }

    #[test]
    fn self_swap_is_a_noop() {
        let mut p = Permutation::identity(3);
        p.swap(1, 1).unwrap();
        assert!(p.is_identity());
    }

    #[test]
    fn out_of_range_swap_leaves_permutation_untouched() {
        let mut p = Permutation::identity(3);
        assert_eq!(
            p.swap(0, 3),
            Err(ReorderError::SlotOutOfRange { slot: 3, len: 3 })
        );
        assert!(p.is_identity());
    }

    #[test]
    fn lookups_are_inverse() {
        let mut p = Permutation::identity(4);
        p.swap(0, 2).unwrap();
        p.swap(2, 3).unwrap();
        // [2, 1, 3, 0]
        assert_eq!(p.as_slice(), &[2, 1, 3, 0]);
        for slot in 0..4 {
            let index = p.canonical_index_of(slot).unwrap();
            assert_eq!(p.slot_of(index), Some(slot));
        }
    }

    proptest! {
        #[test]
        fn swaps_preserve_bijection(
            len in 0_usize..32,
            swaps in proptest::collection::vec((0_usize..40, 0_usize..40), 0..64),
        ) {
            let mut p = Permutation::identity(len);
            prop_assert!(p.is_identity());
            for (a, b) in swaps {
                let before: Vec<usize> = p.as_slice().to_vec();
                if p.swap(a, b).is_err() {
                    prop_assert_eq!(p.as_slice(), &before[..]);
                }
                prop_assert!(is_bijection(&p));
                prop_assert_eq!(p.len(), len);
            }
            p.reset(len);
            prop_assert!(p.is_identity());
        }
    }
}
