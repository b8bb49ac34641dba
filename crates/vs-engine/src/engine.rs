//! The `Engine` struct and its dispatch loop.

use std::collections::HashMap;

use tracing::{debug, trace, warn};
use vs_core::{ProcessId, SimRng, SimTime, StationId};

use crate::process::hand_back;
use crate::{
    Acquire, EngineError, EngineObserver, EngineResult, Lease, PoolStats, Process, ProcessContext,
    ResourcePool, Scheduler, Suspend, Wake, WakeKind,
};

// ── RunReport ─────────────────────────────────────────────────────────────────

/// Everything a finished run hands back.  The engine and its pools are gone
/// by the time the caller sees this.
#[derive(Debug, Clone)]
pub struct RunReport<S> {
    /// Samples in the order they were recorded.
    pub samples:    Vec<S>,
    /// Simulated time of the last dispatched event.
    pub end_time:   SimTime,
    /// Number of events popped from the queue.
    pub events:     u64,
    /// Processes spawned over the run.
    pub spawned:    u64,
    /// Per-station counters, indexed by `StationId`.
    pub pool_stats: Vec<PoolStats>,
}

// ── Engine ────────────────────────────────────────────────────────────────────

/// One simulation run.
///
/// Holds the clock, the event queue, the stations, and every live process.
/// Processes are owned exclusively by the engine from [`Engine::spawn`]
/// until they return [`Suspend::Done`].
///
/// The engine borrows the RNG so a caller can keep one stream running
/// across several consecutive runs.
pub struct Engine<'r, S> {
    scheduler: Scheduler,
    pools:     Vec<ResourcePool>,
    processes: HashMap<ProcessId, Box<dyn Process<S>>>,
    /// Stations each live process holds, in acquisition order.
    leases:    HashMap<ProcessId, Vec<StationId>>,
    rng:       &'r mut SimRng,
    samples:   Vec<S>,
    next_pid:  u32,
    events:    u64,
}

impl<'r, S> Engine<'r, S> {
    /// Create an engine over `pools`.
    ///
    /// Pool `i` must carry `StationId(i)`; processes address stations by id.
    pub fn new(pools: Vec<ResourcePool>, rng: &'r mut SimRng) -> Self {
        debug_assert!(
            pools.iter().enumerate().all(|(i, p)| p.id().index() == i),
            "pool ids must match their position"
        );
        Self {
            scheduler: Scheduler::new(),
            pools,
            processes: HashMap::new(),
            leases: HashMap::new(),
            rng,
            samples: Vec::new(),
            next_pid: 0,
            events: 0,
        }
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Register `process` and schedule its start at the current time.
    pub fn spawn(&mut self, process: Box<dyn Process<S>>) -> EngineResult<ProcessId> {
        let pid = ProcessId(self.next_pid);
        self.next_pid += 1;
        trace!(process = %pid, label = process.label(), now = %self.now(), "spawned");
        self.processes.insert(pid, process);
        self.scheduler.schedule_after(0.0, pid, WakeKind::Start)?;
        Ok(pid)
    }

    #[inline]
    pub fn now(&self) -> SimTime {
        self.scheduler.now()
    }

    pub fn pools(&self) -> &[ResourcePool] {
        &self.pools
    }

    /// Number of processes spawned and not yet finished.
    pub fn live_processes(&self) -> usize {
        self.processes.len()
    }

    /// Dispatch the earliest pending event.
    ///
    /// Returns `Ok(false)` once the queue is empty.
    pub fn step<O: EngineObserver>(&mut self, observer: &mut O) -> EngineResult<bool> {
        let Some(event) = self.scheduler.advance() else {
            return Ok(false);
        };
        self.events += 1;
        let now = event.time;
        let pid = event.payload.target;
        trace!(%now, seq = event.seq, process = %pid, kind = ?event.payload.kind, "dispatch");

        observer.on_event_start(now, pid);
        let wake = match event.payload.kind {
            WakeKind::Start => Wake::Start,
            WakeKind::Timeout => Wake::Timeout,
            WakeKind::Granted(station) => self.grant(pid, station),
        };
        let finished = self.dispatch(pid, wake)?;
        if finished {
            observer.on_process_done(now, pid);
        }
        observer.on_event_end(now, &self.pools);
        Ok(true)
    }

    /// Run until no process is runnable or scheduled, consuming the engine.
    ///
    /// Fails with [`EngineError::Stalled`] if processes are still parked in
    /// a station queue when the event queue drains.
    pub fn run<O: EngineObserver>(mut self, observer: &mut O) -> EngineResult<RunReport<S>> {
        while self.step(observer)? {}

        let end_time = self.now();
        observer.on_run_end(end_time);

        if !self.processes.is_empty() {
            return Err(EngineError::Stalled { waiting: self.processes.len() });
        }

        debug!(
            %end_time,
            events = self.events,
            samples = self.samples.len(),
            "run complete"
        );
        Ok(RunReport {
            samples:    self.samples,
            end_time,
            events:     self.events,
            spawned:    u64::from(self.next_pid),
            pool_stats: self.pools.iter().map(ResourcePool::stats).collect(),
        })
    }

    // ── Dispatch ──────────────────────────────────────────────────────────

    /// Resume `pid` until it suspends on something that is not immediately
    /// available.  Returns `true` if the process finished.
    fn dispatch(&mut self, pid: ProcessId, mut wake: Wake) -> EngineResult<bool> {
        loop {
            let mut spawned: Vec<Box<dyn Process<S>>> = Vec::new();
            let suspend = {
                let process = self
                    .processes
                    .get_mut(&pid)
                    .ok_or(EngineError::UnknownProcess(pid))?;
                let mut ctx = ProcessContext {
                    pid,
                    scheduler: &mut self.scheduler,
                    pools:     &mut self.pools,
                    leases:    &mut self.leases,
                    rng:       &mut *self.rng,
                    samples:   &mut self.samples,
                    spawned:   &mut spawned,
                };
                process.resume(wake, &mut ctx)?
            };

            for child in spawned {
                self.spawn(child)?;
            }

            match suspend {
                Suspend::Timeout(delay) => {
                    self.scheduler.schedule_after(delay, pid, WakeKind::Timeout)?;
                    return Ok(false);
                }
                Suspend::Acquire(station) => {
                    let pool = self
                        .pools
                        .get_mut(station.index())
                        .ok_or(EngineError::UnknownStation(station))?;
                    match pool.acquire(pid) {
                        Acquire::Granted => wake = self.grant(pid, station),
                        Acquire::Queued => return Ok(false),
                    }
                }
                Suspend::Done => {
                    self.retire(pid)?;
                    return Ok(true);
                }
            }
        }
    }

    /// Record that `pid` now holds a unit of `station` and build its lease.
    fn grant(&mut self, pid: ProcessId, station: StationId) -> Wake {
        self.leases.entry(pid).or_default().push(station);
        Wake::Granted(Lease::new(station, pid))
    }

    /// Drop a finished process, returning any units it still holds.
    fn retire(&mut self, pid: ProcessId) -> EngineResult<()> {
        self.processes.remove(&pid);
        let outstanding = self.leases.get(&pid).cloned().unwrap_or_default();
        for station in outstanding {
            warn!(process = %pid, %station, now = %self.now(), "released on exit");
            hand_back(&mut self.pools, &mut self.scheduler, &mut self.leases, pid, station)?;
        }
        self.leases.remove(&pid);
        Ok(())
    }
}
