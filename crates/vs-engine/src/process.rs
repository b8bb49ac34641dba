//! The `Process` trait — the extension point for simulated actors.
//!
//! A process is an explicit state machine.  The engine resumes it with a
//! [`Wake`] describing why it is running again, and the process answers with
//! a [`Suspend`] describing what it is waiting for next.  Everything that
//! does not block (releasing a lease, spawning another process, recording a
//! sample, drawing random numbers) goes through the [`ProcessContext`].

use std::collections::HashMap;

use vs_core::{ProcessId, SimRng, SimTime, StationId};

use crate::{EngineError, EngineResult, Lease, ResourcePool, Scheduler, WakeKind};

/// Why a process is being resumed.
#[derive(Debug)]
pub enum Wake {
    /// First resumption after [`Engine::spawn`](crate::Engine::spawn).
    Start,
    /// The delay returned in `Suspend::Timeout` has elapsed.
    Timeout,
    /// The station requested in `Suspend::Acquire` is now held.
    Granted(Lease),
}

/// What a process waits for after returning from `resume`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Suspend {
    /// Sleep for this many minutes.
    Timeout(f64),
    /// Request one unit of this station; resumed with `Wake::Granted`.
    Acquire(StationId),
    /// The process is finished and will be dropped.
    Done,
}

/// A suspendable unit of execution owned by the engine.
///
/// `S` is the sample type the run collects (see [`ProcessContext::record`]).
///
/// # Example
///
/// ```rust,ignore
/// struct Nap { slept: bool }
///
/// impl Process<f64> for Nap {
///     fn resume(&mut self, wake: Wake, ctx: &mut ProcessContext<'_, f64>) -> EngineResult<Suspend> {
///         match wake {
///             Wake::Start => Ok(Suspend::Timeout(1.0)),
///             _ => {
///                 ctx.record(ctx.now().minutes());
///                 Ok(Suspend::Done)
///             }
///         }
///     }
/// }
/// ```
pub trait Process<S> {
    fn resume(&mut self, wake: Wake, ctx: &mut ProcessContext<'_, S>) -> EngineResult<Suspend>;

    /// Short name used in log lines.
    fn label(&self) -> &str {
        "process"
    }
}

/// The engine state a process may touch while it runs.
///
/// Borrowed field-by-field from the engine for the duration of one
/// `resume` call.
pub struct ProcessContext<'a, S> {
    pub(crate) pid:       ProcessId,
    pub(crate) scheduler: &'a mut Scheduler,
    pub(crate) pools:     &'a mut [ResourcePool],
    pub(crate) leases:    &'a mut HashMap<ProcessId, Vec<StationId>>,
    pub(crate) rng:       &'a mut SimRng,
    pub(crate) samples:   &'a mut Vec<S>,
    pub(crate) spawned:   &'a mut Vec<Box<dyn Process<S>>>,
}

impl<S> ProcessContext<'_, S> {
    #[inline]
    pub fn now(&self) -> SimTime {
        self.scheduler.now()
    }

    /// The running process.
    #[inline]
    pub fn id(&self) -> ProcessId {
        self.pid
    }

    /// The run's RNG.  Draws happen in dispatch order.
    #[inline]
    pub fn rng(&mut self) -> &mut SimRng {
        &mut *self.rng
    }

    /// Add a sample to the run's collector.
    pub fn record(&mut self, sample: S) {
        self.samples.push(sample);
    }

    /// Start `process` at the current time.
    ///
    /// Spawned processes are registered when the current `resume` returns,
    /// in call order, and start before anything the current process
    /// schedules afterwards for the same instant.
    pub fn spawn(&mut self, process: Box<dyn Process<S>>) {
        self.spawned.push(process);
    }

    /// Return a held unit to its station.
    ///
    /// If another process is queued there it receives the unit and is
    /// scheduled at the current time; the caller keeps running.
    pub fn release(&mut self, lease: Lease) -> EngineResult<()> {
        if lease.holder() != self.pid {
            return Err(EngineError::UnexpectedWake {
                process: self.pid,
                detail:  format!("released a lease held by {}", lease.holder()),
            });
        }
        hand_back(self.pools, self.scheduler, self.leases, self.pid, lease.station())
    }
}

/// Release one unit of `station` held by `holder` and wake the next waiter.
pub(crate) fn hand_back(
    pools:     &mut [ResourcePool],
    scheduler: &mut Scheduler,
    leases:    &mut HashMap<ProcessId, Vec<StationId>>,
    holder:    ProcessId,
    station:   StationId,
) -> EngineResult<()> {
    let held = leases.get_mut(&holder).ok_or(EngineError::ReleaseUnheld(station))?;
    let pos = held
        .iter()
        .position(|&s| s == station)
        .ok_or(EngineError::ReleaseUnheld(station))?;
    held.remove(pos);

    let pool = pools
        .get_mut(station.index())
        .ok_or(EngineError::UnknownStation(station))?;
    if let Some(next) = pool.release()? {
        scheduler.schedule_after(0.0, next, WakeKind::Granted(station))?;
    }
    Ok(())
}
