//! Capacity-bounded stations with a FIFO wait list.
//!
//! A `ResourcePool` only does the bookkeeping: it never schedules anything
//! itself.  [`ResourcePool::release`] returns the process that should be
//! resumed next; the engine (or [`ProcessContext::release`]) turns that into
//! a zero-delay wake-up.
//!
//! [`ProcessContext::release`]: crate::ProcessContext::release

use std::collections::VecDeque;

use tracing::debug;
use vs_core::{ProcessId, StationId};

use crate::{EngineError, EngineResult};

/// Outcome of [`ResourcePool::acquire`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Acquire {
    /// A unit was free and is now held by the caller.
    Granted,
    /// The pool is full; the caller was appended to the wait list.
    Queued,
}

/// Counters kept for reporting.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct PoolStats {
    /// Units handed out, immediately or after waiting.
    pub grants:     u64,
    /// Requests that had to wait in the queue.
    pub queued:     u64,
    /// Longest the wait list ever got.
    pub peak_queue: usize,
}

/// Proof that one unit of a station is held.
///
/// Only the engine creates leases.  They cannot be cloned, and releasing one
/// consumes it, so a unit is never released twice.
#[must_use = "a lease must be released (or held until the process finishes)"]
#[derive(Debug, PartialEq, Eq)]
pub struct Lease {
    station: StationId,
    holder:  ProcessId,
}

impl Lease {
    pub(crate) fn new(station: StationId, holder: ProcessId) -> Self {
        Self { station, holder }
    }

    pub fn station(&self) -> StationId {
        self.station
    }

    pub fn holder(&self) -> ProcessId {
        self.holder
    }
}

/// A station that grants at most `capacity` concurrent holders.
#[derive(Debug, Clone)]
pub struct ResourcePool {
    id:       StationId,
    name:     String,
    capacity: u32,
    held:     u32,
    waiting:  VecDeque<ProcessId>,
    stats:    PoolStats,
}

impl ResourcePool {
    /// Create an empty pool.  `capacity` must be positive.
    pub fn new(id: StationId, name: impl Into<String>, capacity: u32) -> EngineResult<Self> {
        let name = name.into();
        if capacity == 0 {
            return Err(EngineError::InvalidCapacity { station: id, name, capacity });
        }
        Ok(Self {
            id,
            name,
            capacity,
            held: 0,
            waiting: VecDeque::new(),
            stats: PoolStats::default(),
        })
    }

    /// Take a unit if one is free, otherwise join the back of the queue.
    pub fn acquire(&mut self, requester: ProcessId) -> Acquire {
        if self.held < self.capacity {
            self.held += 1;
            self.stats.grants += 1;
            Acquire::Granted
        } else {
            self.waiting.push_back(requester);
            self.stats.queued += 1;
            self.stats.peak_queue = self.stats.peak_queue.max(self.waiting.len());
            debug!(station = %self.name, process = %requester, queue = self.waiting.len(), "queued");
            Acquire::Queued
        }
    }

    /// Give a unit back.
    ///
    /// If someone is waiting, the unit passes straight to the head of the
    /// queue (`held` is unchanged overall) and that process is returned so
    /// the caller can schedule its resumption.
    pub fn release(&mut self) -> EngineResult<Option<ProcessId>> {
        if self.held == 0 {
            return Err(EngineError::ReleaseUnheld(self.id));
        }
        self.held -= 1;
        let next = self.waiting.pop_front();
        if let Some(next) = next {
            self.held += 1;
            self.stats.grants += 1;
            debug!(station = %self.name, process = %next, "handed over");
        }
        Ok(next)
    }

    pub fn id(&self) -> StationId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn held(&self) -> u32 {
        self.held
    }

    pub fn queue_len(&self) -> usize {
        self.waiting.len()
    }

    /// Processes currently waiting, head first.
    pub fn waiting(&self) -> impl Iterator<Item = ProcessId> + '_ {
        self.waiting.iter().copied()
    }

    pub fn stats(&self) -> PoolStats {
        self.stats
    }
}
