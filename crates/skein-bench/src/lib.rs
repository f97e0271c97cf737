//! Benchmark workloads and helpers for the skein linked lists.
//!
//! Everything here drives the lists strictly through their public
//! contract — capacity at construction, the handle type, and the
//! add/erase/iterate operations. No internals are observed.

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use rand::{RngExt, SeedableRng};
use rand_chacha::ChaCha8Rng;
use skein_core::{HandleList, NodeHandle};

/// Example payload: one resting order in a book.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Order {
    /// Monotonic order identifier.
    pub id: u64,
    /// Signed quantity; negative for sells.
    pub qty: i32,
}

/// One step of a precomputed churn plan.
#[derive(Clone, Copy, Debug)]
pub enum ChurnStep {
    /// Rest a new order at the back of the book.
    Add(Order),
    /// Cancel the order at `raw % depth` among currently held handles.
    Cancel(usize),
}

/// Precompute a deterministic add/cancel plan.
///
/// Roughly add-biased so the book holds a working depth. Positions are
/// raw draws reduced against the live depth at replay time, which keeps
/// the plan layout-independent.
pub fn churn_plan(seed: u64, steps: usize) -> Vec<ChurnStep> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..steps)
        .map(|i| {
            if rng.random_range(0..10u8) < 6 {
                ChurnStep::Add(Order {
                    id: i as u64,
                    qty: rng.random_range(1..1_000),
                })
            } else {
                ChurnStep::Cancel(rng.random_range(0..usize::MAX))
            }
        })
        .collect()
}

/// Handle-retaining wrapper that drives a list the way an order book
/// cancels resting orders: every issued handle is kept, and cancellation
/// picks one by position, swap-removing it from the local table.
pub struct Book<L> {
    list: L,
    handles: Vec<NodeHandle>,
}

impl<L: HandleList<Order>> Book<L> {
    /// Wrap a freshly constructed list.
    pub fn new(list: L) -> Self {
        let capacity = list.capacity();
        Self {
            list,
            handles: Vec::with_capacity(capacity),
        }
    }

    /// Current book depth (resting orders).
    pub fn depth(&self) -> usize {
        self.handles.len()
    }

    /// Rest an order at the back. Returns `false` when the list is at
    /// capacity (the order is dropped, matching a full book).
    pub fn add(&mut self, order: Order) -> bool {
        match self.list.push_back(order) {
            Ok(handle) => {
                self.handles.push(handle);
                true
            }
            Err(_) => false,
        }
    }

    /// Cancel the order at `pos` among held handles. Out-of-range
    /// positions are ignored.
    pub fn cancel(&mut self, pos: usize) {
        if pos >= self.handles.len() {
            return;
        }
        let handle = self.handles.swap_remove(pos);
        self.list
            .erase(handle)
            .expect("book handles are erased exactly once");
    }

    /// Replay one precomputed churn step.
    pub fn apply(&mut self, step: ChurnStep) {
        match step {
            ChurnStep::Add(order) => {
                self.add(order);
            }
            ChurnStep::Cancel(raw) => {
                if !self.handles.is_empty() {
                    self.cancel(raw % self.handles.len());
                }
            }
        }
    }

    /// Fold the whole book front to back, summing quantities.
    pub fn iterate_sum(&self) -> u64 {
        let mut sum = 0u64;
        self.list
            .for_each(|order, _| sum = sum.wrapping_add(order.qty as u64));
        sum
    }
}
