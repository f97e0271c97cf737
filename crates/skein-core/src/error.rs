//! Error types for list and arena operations.
//!
//! One variant per failure condition. Nothing is retried internally —
//! every error surfaces synchronously to the immediate caller, and a
//! rejected operation leaves no partial mutation behind.

use std::error::Error;
use std::fmt;

/// Errors that can occur during list operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListError {
    /// A capacity of zero (or one that cannot be indexed by `u32`) was
    /// requested at construction. No list exists after this error.
    InvalidCapacity,
    /// The free list is empty — every slot is occupied. The capacity
    /// ceiling is hard; the list is never resized.
    Exhausted {
        /// Total slot capacity of the list.
        capacity: usize,
    },
    /// The list has no elements.
    Empty,
    /// The slot behind the handle has no successor to remove.
    NoSuccessor {
        /// Index of the slot at the tail position.
        index: u32,
    },
    /// The handle's index is out of range, or its generation no longer
    /// matches the slot (the slot has been released and possibly reused
    /// since the handle was issued).
    StaleHandle {
        /// The offending slot index.
        index: u32,
    },
}

impl fmt::Display for ListError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCapacity => {
                write!(f, "capacity must be greater than zero")
            }
            Self::Exhausted { capacity } => {
                write!(f, "no free slots left: all {capacity} slots occupied")
            }
            Self::Empty => write!(f, "list is empty"),
            Self::NoSuccessor { index } => {
                write!(f, "no node exists after slot {index}")
            }
            Self::StaleHandle { index } => {
                write!(f, "handle for slot {index} is stale or invalid")
            }
        }
    }
}

impl Error for ListError {}
