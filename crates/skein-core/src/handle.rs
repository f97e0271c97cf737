//! Stable node handles.
//!
//! A [`NodeHandle`] identifies one specific *allocation* of a slot, not
//! the slot itself: the `generation` field allows O(1) staleness checks
//! without any lookup table. A handle issued before a slot's most recent
//! reuse no longer matches the slot's current generation and is rejected
//! by every handle-taking operation.

use std::fmt;

/// Identifies one allocation of a list slot.
///
/// Returned by every inserting operation and accepted by `insert_after`,
/// `erase_after`, `erase`, and the checked accessors. Handles are
/// non-owning: they may outlive the slot's occupancy (detected as stale)
/// but are only meaningful against the list that issued them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeHandle {
    index: u32,
    generation: u32,
}

impl NodeHandle {
    /// Create a handle from raw parts.
    ///
    /// Lists construct handles themselves; building one by hand is only
    /// useful in tests. A fabricated handle never corrupts a list — at
    /// worst it fails validation.
    pub const fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    /// The slot index this handle points at.
    pub const fn index(&self) -> u32 {
        self.index
    }

    /// The slot generation stamped when this handle was issued.
    pub const fn generation(&self) -> u32 {
        self.generation
    }
}

impl fmt::Display for NodeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeHandle(idx={}, gen={})", self.index, self.generation)
    }
}
