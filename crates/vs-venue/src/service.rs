//! Service-time distributions.
//!
//! Every random quantity of a customer journey comes through
//! [`ServiceTimes`], drawn from the run's [`SimRng`] at the moment the
//! journey needs it.  Tests swap in [`FixedServiceTimes`] to get exact,
//! hand-checkable waits.

use vs_core::SimRng;

/// Per-station service durations (minutes) and the food decision.
///
/// Implementations must be `Send + Sync` so one instance can be shared by
/// runs executing on different threads.
pub trait ServiceTimes: Send + Sync {
    /// Time at the cashier once served.
    fn ticket_purchase(&self, rng: &mut SimRng) -> f64;

    /// Time at the usher once served.
    fn ticket_check(&self, rng: &mut SimRng) -> f64;

    /// Whether this customer goes on to the concession stand.
    fn buys_food(&self, rng: &mut SimRng) -> bool;

    /// Time at the concession stand once served.
    fn food_purchase(&self, rng: &mut SimRng) -> f64;
}

/// The venue's observed service times.
///
/// | Step            | Distribution                  |
/// |-----------------|-------------------------------|
/// | ticket purchase | uniform integer in `[1, 3]`   |
/// | ticket check    | fixed `3/60` (three seconds)  |
/// | food decision   | 50/50                         |
/// | food purchase   | uniform integer in `[1, 5]`   |
#[derive(Copy, Clone, Debug, Default)]
pub struct StandardServiceTimes;

impl ServiceTimes for StandardServiceTimes {
    fn ticket_purchase(&self, rng: &mut SimRng) -> f64 {
        f64::from(rng.gen_range(1..=3u32))
    }

    fn ticket_check(&self, _rng: &mut SimRng) -> f64 {
        3.0 / 60.0
    }

    fn buys_food(&self, rng: &mut SimRng) -> bool {
        rng.gen_bool(0.5)
    }

    fn food_purchase(&self, rng: &mut SimRng) -> f64 {
        f64::from(rng.gen_range(1..=5u32))
    }
}

/// Constant service times; `food: None` means nobody buys food.
///
/// Never touches the RNG.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FixedServiceTimes {
    pub purchase: f64,
    pub check:    f64,
    pub food:     Option<f64>,
}

impl ServiceTimes for FixedServiceTimes {
    fn ticket_purchase(&self, _rng: &mut SimRng) -> f64 {
        self.purchase
    }

    fn ticket_check(&self, _rng: &mut SimRng) -> f64 {
        self.check
    }

    fn buys_food(&self, _rng: &mut SimRng) -> bool {
        self.food.is_some()
    }

    fn food_purchase(&self, _rng: &mut SimRng) -> f64 {
        self.food.unwrap_or(0.0)
    }
}
