//! Array-backed doubly linked lists with stable, validated handles.
//!
//! A fixed-capacity slot arena with linked-list semantics: O(1) push/pop
//! at either end, O(1) insert-after, O(1) erase-by-handle — and no native
//! pointers anywhere. Links are slot indices into a fixed array, so node
//! lifetime is bounded by the list's lifetime rather than by individual
//! allocations.
//!
//! # Architecture
//!
//! Two layouts share one contract and one internal structure:
//!
//! ```text
//! AosList<T> / SoaList<T>
//! ├── slot storage        (bundled per slot / parallel arrays)
//! ├── FreeList            (stack of unoccupied indices)
//! ├── head / tail / len   (list topology roots)
//! └── per-slot generation (stale-handle detection)
//! ```
//!
//! [`AosList`] stores each slot's value and link fields contiguously;
//! [`SoaList`] keeps `values`, `next`, `prev`, and `generations` in
//! separate parallel arrays, so a traversal that touches only `next` and
//! `values` reads fewer cache lines. The two are contract-equivalent
//! (see [`HandleList`]) and differ only in performance.
//!
//! # Handles and staleness
//!
//! Every inserting operation returns a [`NodeHandle`] — an `(index,
//! generation)` pair. A slot's generation increments each time the slot
//! is (re)allocated, never on release, so a handle issued before a
//! slot's most recent reuse fails validation instead of silently
//! touching the wrong element. Validation always precedes mutation; a
//! rejected operation changes nothing.
//!
//! # Checked and unchecked tiers
//!
//! Handle-taking operations are always validated. Alongside them sits an
//! explicitly named unchecked tier (`head_index`, `next_index_unchecked`,
//! `value_unchecked`) for tight loops where the caller already holds a
//! live index from the traversal itself. The unchecked tier performs no
//! generation check: presenting a recycled index there is not detected.
//! That trade-off is deliberate — callers opt in by name.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod aos;
mod free_list;
pub mod soa;

pub use aos::AosList;
pub use soa::SoaList;

pub use skein_core::{HandleList, ListError, NodeHandle};

/// Null link sentinel. Kept private: the public surface speaks
/// `Option<u32>` and handles, never the sentinel.
pub(crate) const NIL: u32 = u32::MAX;

/// Shared construction-time capacity check.
///
/// Zero capacity is meaningless and anything at or above the sentinel
/// could not be indexed by `u32` links.
pub(crate) fn check_capacity(capacity: usize) -> Result<u32, ListError> {
    if capacity == 0 || capacity >= NIL as usize {
        return Err(ListError::InvalidCapacity);
    }
    Ok(capacity as u32)
}
