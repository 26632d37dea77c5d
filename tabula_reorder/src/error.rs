// Copyright 2025 the Tabula Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported by the reorder engine.

/// Reasons a reorder operation was rejected.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ReorderError {
    /// A slot index was outside `0..len`.
    #[error("slot {slot} is out of range for a list of {len} items")]
    SlotOutOfRange {
        /// The offending slot.
        slot: usize,
        /// Length of the list at the time of the call.
        len: usize,
    },
    /// A drag was started while another one was still active on the same list.
    #[error("a drag is already in progress on this list")]
    DragInProgress,
}
