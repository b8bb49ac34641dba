//! Simulation time model.
//!
//! # Design
//!
//! Time is a non-negative real number of simulated minutes wrapped in
//! `SimTime`.  Service durations such as a 3-second ticket check (`3/60`
//! minutes) are not integers, so the integer-tick model is not enough here.
//!
//! `f64` has no total order, so `SimTime` orders with [`f64::total_cmp`].
//! Constructors normalise `-0.0` to `0.0`, which keeps `SimTime::ZERO`
//! equal to every zero the engine produces.  The engine never builds a
//! negative or non-finite `SimTime`; it rejects such delays before they reach
//! the clock.
//!
//! No wall-clock relation exists.  [`SimTime::as_duration`] only converts the
//! minute count to a `Duration` for reporting.

use std::cmp::Ordering;
use std::fmt;
use std::time::Duration;

// ── SimTime ──────────────────────────────────────────────────────────────────

/// An absolute point in simulated time, in minutes since the run started.
#[derive(Copy, Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimTime(f64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0.0);

    /// Wrap a minute count.
    #[inline]
    pub fn from_minutes(minutes: f64) -> SimTime {
        // normalise -0.0
        SimTime(minutes + 0.0)
    }

    #[inline]
    pub fn minutes(self) -> f64 {
        self.0
    }

    /// Return the instant `delay` minutes after `self`.
    #[inline]
    pub fn after(self, delay: f64) -> SimTime {
        SimTime::from_minutes(self.0 + delay)
    }

    /// Minutes elapsed from `earlier` to `self`.
    ///
    /// Negative if `earlier` is actually later; callers that record waits
    /// always pass an arrival time that precedes `self`.
    #[inline]
    pub fn since(self, earlier: SimTime) -> f64 {
        self.0 - earlier.0
    }

    /// The same span expressed as a `Duration` (1 minute = 60 s).
    ///
    /// Negative or non-finite values saturate to zero.
    pub fn as_duration(self) -> Duration {
        minutes_to_duration(self.0)
    }
}

/// Convert a minute count to a `Duration`, saturating invalid input to zero.
pub fn minutes_to_duration(minutes: f64) -> Duration {
    Duration::try_from_secs_f64(minutes * 60.0).unwrap_or(Duration::ZERO)
}

impl PartialEq for SimTime {
    fn eq(&self, other: &Self) -> bool {
        self.0.total_cmp(&other.0) == Ordering::Equal
    }
}

impl Eq for SimTime {}

impl Ord for SimTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl PartialOrd for SimTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl std::ops::Add<f64> for SimTime {
    type Output = SimTime;
    #[inline]
    fn add(self, rhs: f64) -> SimTime {
        self.after(rhs)
    }
}

impl std::ops::Sub for SimTime {
    type Output = f64;
    #[inline]
    fn sub(self, rhs: SimTime) -> f64 {
        self.since(rhs)
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t={:.3}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// The logical clock of one run.
///
/// Only ever moves forward; [`SimClock::advance_to`] ignores attempts to move
/// it backwards (and trips a debug assertion).
#[derive(Clone, Debug, Default)]
pub struct SimClock {
    now: SimTime,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn now(&self) -> SimTime {
        self.now
    }

    /// Move the clock to `t`.
    #[inline]
    pub fn advance_to(&mut self, t: SimTime) {
        debug_assert!(t >= self.now, "clock moved backwards: {t} < {}", self.now);
        if t > self.now {
            self.now = t;
        }
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.1}s)", self.now, self.now.minutes() * 60.0)
    }
}
