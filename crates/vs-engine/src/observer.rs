//! Engine observer trait for invariant checks and progress reporting.

use vs_core::{ProcessId, SimTime};

use crate::ResourcePool;

/// Callbacks invoked by [`Engine::run`][crate::Engine::run] around every
/// dispatched event.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example — capacity checker
///
/// ```rust,ignore
/// struct CapacityCheck;
///
/// impl EngineObserver for CapacityCheck {
///     fn on_event_end(&mut self, now: SimTime, pools: &[ResourcePool]) {
///         for p in pools {
///             assert!(p.held() <= p.capacity(), "{} over capacity at {now}", p.name());
///         }
///     }
/// }
/// ```
pub trait EngineObserver {
    /// Called after the clock moved to `now`, before `target` is resumed.
    fn on_event_start(&mut self, _now: SimTime, _target: ProcessId) {}

    /// Called once the event (and every immediate grant it triggered) has been
    /// fully processed.
    fn on_event_end(&mut self, _now: SimTime, _pools: &[ResourcePool]) {}

    /// Called when a process finishes.
    fn on_process_done(&mut self, _now: SimTime, _process: ProcessId) {}

    /// Called once after the queue drained.
    fn on_run_end(&mut self, _end: SimTime) {}
}

/// An [`EngineObserver`] that does nothing.
pub struct NoopObserver;

impl EngineObserver for NoopObserver {}
