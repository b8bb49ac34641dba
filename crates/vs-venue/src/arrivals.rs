//! Customer arrivals.

use std::sync::Arc;

use tracing::trace;
use vs_core::CustomerId;
use vs_engine::{EngineError, EngineResult, Process, ProcessContext, Suspend, Wake};

use crate::{CustomerJourney, ServiceTimes, WaitSample};

/// When customers show up.
///
/// `initial` customers arrive together when the run starts; after that one
/// more arrives every `interval` minutes until `additional` have come.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ArrivalPlan {
    pub initial:    u32,
    pub additional: u32,
    /// Minutes between successive late arrivals.
    pub interval:   f64,
}

impl ArrivalPlan {
    /// Customers produced over a whole run; `None` if the count overflows.
    pub fn population(&self) -> Option<u32> {
        self.initial.checked_add(self.additional)
    }
}

impl Default for ArrivalPlan {
    fn default() -> Self {
        Self { initial: 3, additional: 27, interval: 0.20 }
    }
}

/// Process that spawns one [`CustomerJourney`] per arrival.
pub struct ArrivalGenerator {
    plan:      ArrivalPlan,
    remaining: u32,
    next_id:   u32,
    service:   Arc<dyn ServiceTimes>,
}

impl ArrivalGenerator {
    pub fn new(plan: ArrivalPlan, service: Arc<dyn ServiceTimes>) -> Self {
        Self { plan, remaining: plan.additional, next_id: 0, service }
    }

    fn arrive(&mut self, ctx: &mut ProcessContext<'_, WaitSample>) {
        let id = CustomerId(self.next_id);
        self.next_id += 1;
        trace!(customer = %id, now = %ctx.now(), "arrival");
        ctx.spawn(Box::new(CustomerJourney::new(id, Arc::clone(&self.service))));
    }

    fn next(&self) -> Suspend {
        if self.remaining > 0 { Suspend::Timeout(self.plan.interval) } else { Suspend::Done }
    }
}

impl Process<WaitSample> for ArrivalGenerator {
    fn resume(&mut self, wake: Wake, ctx: &mut ProcessContext<'_, WaitSample>) -> EngineResult<Suspend> {
        match wake {
            Wake::Start => {
                for _ in 0..self.plan.initial {
                    self.arrive(ctx);
                }
                Ok(self.next())
            }
            Wake::Timeout if self.remaining > 0 => {
                self.remaining -= 1;
                self.arrive(ctx);
                Ok(self.next())
            }
            other => Err(EngineError::UnexpectedWake {
                process: ctx.id(),
                detail:  format!("arrival generator woken by {other:?}"),
            }),
        }
    }

    fn label(&self) -> &str {
        "arrivals"
    }
}
