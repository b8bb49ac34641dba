//! `EventQueue` — time-ordered pending wake-ups.
//!
//! # Ordering
//!
//! Events are totally ordered by `(time, seq)`.  `seq` is a per-queue
//! insertion counter, so two events for the same instant come out in the
//! order they were pushed.  That tie-break is what makes runs reproducible:
//! three customers spawned at `t=0` start in spawn order, a grant handed over
//! at `t=2` resumes before anything scheduled later for `t=2`.
//!
//! # Structure
//!
//! `BTreeMap<SimTime, VecDeque<Event<T>>>`: one FIFO bucket per distinct
//! instant.  Push appends to the bucket (O(log W)); pop takes the front of
//! the first bucket and drops the bucket once empty (O(log W)), where W is
//! the number of distinct pending instants.  Because `seq` only grows, bucket
//! order and `seq` order always agree.

use std::collections::{BTreeMap, VecDeque};

use vs_core::SimTime;

/// One pending wake-up.
#[derive(Debug, Clone, PartialEq)]
pub struct Event<T> {
    pub time:    SimTime,
    pub seq:     u64,
    pub payload: T,
}

/// A priority queue of events keyed by `(time, insertion sequence)`.
pub struct EventQueue<T> {
    inner:    BTreeMap<SimTime, VecDeque<Event<T>>>,
    next_seq: u64,
    /// Cached total event count for O(1) `len()`.
    total:    usize,
}

impl<T> Default for EventQueue<T> {
    fn default() -> Self {
        Self {
            inner:    BTreeMap::new(),
            next_seq: 0,
            total:    0,
        }
    }
}

impl<T> EventQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `payload` at `time` and return its sequence number.
    pub fn push(&mut self, time: SimTime, payload: T) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.inner
            .entry(time)
            .or_default()
            .push_back(Event { time, seq, payload });
        self.total += 1;
        seq
    }

    /// Remove and return the earliest event.
    pub fn pop(&mut self) -> Option<Event<T>> {
        let mut bucket = self.inner.first_entry()?;
        let event = bucket.get_mut().pop_front();
        if bucket.get().is_empty() {
            bucket.remove();
        }
        if event.is_some() {
            self.total -= 1;
        }
        event
    }

    /// The earliest time with at least one pending event.
    pub fn next_time(&self) -> Option<SimTime> {
        self.inner.keys().next().copied()
    }

    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Number of distinct pending instants.
    pub fn time_count(&self) -> usize {
        self.inner.len()
    }
}
