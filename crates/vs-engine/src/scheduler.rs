//! Clock plus event queue: the `schedule_after` / `advance` pair.

use vs_core::{ProcessId, SimClock, SimTime, StationId};

use crate::{EngineError, EngineResult, Event, EventQueue};

/// Why a process is being woken.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum WakeKind {
    /// First resumption after spawn.
    Start,
    /// A `Suspend::Timeout` elapsed.
    Timeout,
    /// A queued acquisition on `StationId` was granted by a release.
    Granted(StationId),
}

/// Payload of every event: which process to resume, and why.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Wakeup {
    pub target: ProcessId,
    pub kind:   WakeKind,
}

/// Owns the run's logical clock and its pending wake-ups.
#[derive(Default)]
pub struct Scheduler {
    clock: SimClock,
    queue: EventQueue<Wakeup>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn now(&self) -> SimTime {
        self.clock.now()
    }

    /// Schedule `target` to wake at `now + delay`.
    ///
    /// `delay` must be finite and `>= 0`; anything else is a defect in the
    /// calling process and is returned as [`EngineError::InvalidDelay`].
    pub fn schedule_after(
        &mut self,
        delay:  f64,
        target: ProcessId,
        kind:   WakeKind,
    ) -> EngineResult<SimTime> {
        if !delay.is_finite() || delay < 0.0 {
            return Err(EngineError::InvalidDelay { delay });
        }
        let at = self.clock.now().after(delay);
        self.queue.push(at, Wakeup { target, kind });
        Ok(at)
    }

    /// Pop the earliest event and move the clock to its time.
    pub fn advance(&mut self) -> Option<Event<Wakeup>> {
        let event = self.queue.pop()?;
        self.clock.advance_to(event.time);
        Some(event)
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn is_idle(&self) -> bool {
        self.queue.is_empty()
    }
}
