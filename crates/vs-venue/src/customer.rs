//! One customer's way from the door to their seat.

use std::sync::Arc;

use tracing::trace;
use vs_core::{CustomerId, SimTime};
use vs_engine::{EngineError, EngineResult, Lease, Process, ProcessContext, Suspend, Wake};

use crate::{ServiceTimes, Station};

/// Where a customer currently is.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Stage {
    Arrived,
    AwaitingCashier,
    PurchasingTicket,
    AwaitingUsher,
    CheckingTicket,
    AwaitingServer,
    BuyingFood,
    Departed,
}

/// The record a customer leaves behind.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct WaitSample {
    pub customer:    CustomerId,
    pub arrival:     SimTime,
    pub departure:   SimTime,
    pub bought_food: bool,
}

impl WaitSample {
    /// Minutes between arrival and departure.
    #[inline]
    pub fn wait(&self) -> f64 {
        self.departure - self.arrival
    }
}

/// A customer as an engine process.
///
/// Each `Awaiting*` stage is entered by asking the engine for the station;
/// the grant moves the customer into the matching service stage, which holds
/// the lease for a drawn duration and releases it when the timeout fires.
pub struct CustomerJourney {
    id:          CustomerId,
    stage:       Stage,
    arrival:     SimTime,
    bought_food: bool,
    lease:       Option<Lease>,
    service:     Arc<dyn ServiceTimes>,
}

impl CustomerJourney {
    pub fn new(id: CustomerId, service: Arc<dyn ServiceTimes>) -> Self {
        Self {
            id,
            stage: Stage::Arrived,
            arrival: SimTime::ZERO,
            bought_food: false,
            lease: None,
            service,
        }
    }

    pub fn id(&self) -> CustomerId {
        self.id
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    fn enter(&mut self, stage: Stage, now: SimTime) {
        trace!(customer = %self.id, from = ?self.stage, to = ?stage, %now, "stage");
        self.stage = stage;
    }

    fn release(&mut self, ctx: &mut ProcessContext<'_, WaitSample>) -> EngineResult<()> {
        match self.lease.take() {
            Some(lease) => ctx.release(lease),
            None => Err(self.fault(ctx, "finished service without holding a station")),
        }
    }

    fn fault(&self, ctx: &ProcessContext<'_, WaitSample>, what: &str) -> EngineError {
        EngineError::UnexpectedWake {
            process: ctx.id(),
            detail:  format!("{} in {:?}: {what}", self.id, self.stage),
        }
    }
}

impl Process<WaitSample> for CustomerJourney {
    fn resume(&mut self, wake: Wake, ctx: &mut ProcessContext<'_, WaitSample>) -> EngineResult<Suspend> {
        let now = ctx.now();
        match (self.stage, wake) {
            (Stage::Arrived, Wake::Start) => {
                self.arrival = now;
                self.enter(Stage::AwaitingCashier, now);
                Ok(Suspend::Acquire(Station::Cashier.id()))
            }
            (Stage::AwaitingCashier, Wake::Granted(lease)) => {
                self.lease = Some(lease);
                self.enter(Stage::PurchasingTicket, now);
                Ok(Suspend::Timeout(self.service.ticket_purchase(ctx.rng())))
            }
            (Stage::PurchasingTicket, Wake::Timeout) => {
                self.release(ctx)?;
                self.enter(Stage::AwaitingUsher, now);
                Ok(Suspend::Acquire(Station::Usher.id()))
            }
            (Stage::AwaitingUsher, Wake::Granted(lease)) => {
                self.lease = Some(lease);
                self.enter(Stage::CheckingTicket, now);
                Ok(Suspend::Timeout(self.service.ticket_check(ctx.rng())))
            }
            (Stage::CheckingTicket, Wake::Timeout) => {
                self.release(ctx)?;
                if self.service.buys_food(ctx.rng()) {
                    self.bought_food = true;
                    self.enter(Stage::AwaitingServer, now);
                    Ok(Suspend::Acquire(Station::Server.id()))
                } else {
                    self.depart(ctx)
                }
            }
            (Stage::AwaitingServer, Wake::Granted(lease)) => {
                self.lease = Some(lease);
                self.enter(Stage::BuyingFood, now);
                Ok(Suspend::Timeout(self.service.food_purchase(ctx.rng())))
            }
            (Stage::BuyingFood, Wake::Timeout) => {
                self.release(ctx)?;
                self.depart(ctx)
            }
            (_, wake) => Err(self.fault(ctx, &format!("unexpected {wake:?}"))),
        }
    }

    fn label(&self) -> &str {
        "customer"
    }
}

impl CustomerJourney {
    fn depart(&mut self, ctx: &mut ProcessContext<'_, WaitSample>) -> EngineResult<Suspend> {
        let now = ctx.now();
        self.enter(Stage::Departed, now);
        ctx.record(WaitSample {
            customer:    self.id,
            arrival:     self.arrival,
            departure:   now,
            bought_food: self.bought_food,
        });
        Ok(Suspend::Done)
    }
}
