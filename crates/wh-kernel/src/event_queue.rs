//! `EventQueue` - the kernel's pending-wake priority queue.
//!
//! Entries are ordered by `(at, reason, seq)`:
//!
//! - `at` - the virtual time of the wake;
//! - `reason` - [`WakeReason::Granted`] sorts before [`WakeReason::Timer`],
//!   so a process handed a server slot runs before any timer due at the same
//!   instant;
//! - `seq` - a monotonically increasing registration counter, so among equal
//!   `(at, reason)` the earliest-registered wake fires first.
//!
//! The triple is unique per entry, which makes pop order a total order and
//! the whole run reproducible.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use wh_core::SimTime;

/// Why a parked process is being resumed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WakeReason {
    /// A server slot was handed to the process.
    Granted,
    /// A timed delay elapsed (including the zero delay of a fresh spawn).
    Timer,
}

#[derive(Debug)]
struct Scheduled<T> {
    at:     SimTime,
    reason: WakeReason,
    seq:    u64,
    item:   T,
}

impl<T> PartialEq for Scheduled<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T> Eq for Scheduled<T> {}

impl<T> PartialOrd for Scheduled<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Scheduled<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: BinaryHeap is a max-heap, we want the earliest entry on top.
        other
            .at
            .cmp(&self.at)
            .then_with(|| other.reason.cmp(&self.reason))
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// A min-priority queue of wakes.
pub struct EventQueue<T> {
    heap: BinaryHeap<Scheduled<T>>,
    seq:  u64,
}

impl<T> Default for EventQueue<T> {
    fn default() -> Self {
        Self {
            heap: BinaryHeap::new(),
            seq:  0,
        }
    }
}

impl<T> EventQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `item` to fire at `at`.  Returns the sequence number assigned.
    pub fn push(&mut self, at: SimTime, reason: WakeReason, item: T) -> u64 {
        let seq = self.seq;
        self.heap.push(Scheduled { at, reason, seq, item });
        self.seq += 1;
        seq
    }

    /// Remove and return the earliest entry.
    pub fn pop(&mut self) -> Option<(SimTime, WakeReason, T)> {
        self.heap.pop().map(|s| (s.at, s.reason, s.item))
    }

    /// Time of the earliest entry without removing it.
    pub fn peek_time(&self) -> Option<SimTime> {
        self.heap.peek().map(|s| s.at)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Drop every pending entry.  The sequence counter is not reset.
    pub fn clear(&mut self) {
        self.heap.clear();
    }
}
