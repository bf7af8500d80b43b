//! The four process kinds a run is made of, as explicit state machines.
//!
//! Each variant records where its process resumes.  The kernel parks the
//! value between wakes; [`Sim`][crate::Sim] advances it one stage per wake.
//!
//! ```text
//! Arrivals     Idle ─sleep(gap)→ Arriving ─submit, sleep(gap)→ Arriving …
//! Dispatcher   poll, maybe spawn Order, sleep(interval) …
//! Order        New ─acquire→ AwaitingSlot ─sleep(service)→ InService ─done
//! Replenish    Ordering ─sleep(lead time)→ InTransit ─restock, done
//! ```

use wh_core::{ItemId, Order};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ArrivalStage {
    /// Has not yet drawn the first gap.
    Idle,
    /// Woke at an arrival instant.
    Arriving,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OrderStage {
    /// Spawned by the dispatcher; about to request a server.
    New,
    /// Holds a server slot; service starts on resume.
    AwaitingSlot,
    /// Service time has elapsed.
    InService,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ReplenishStage {
    Ordering,
    InTransit,
}

/// One dispatched order and its handler's progress.
#[derive(Clone, Debug)]
pub struct OrderTask {
    pub order: Order,
    pub stage: OrderStage,
}

/// One in-flight restock of a single item.
#[derive(Copy, Clone, Debug)]
pub struct ReplenishTask {
    pub item:  ItemId,
    pub stage: ReplenishStage,
}

/// A process the kernel can park.
#[derive(Clone, Debug)]
pub enum Process {
    Arrivals(ArrivalStage),
    Dispatcher,
    Order(OrderTask),
    Replenish(ReplenishTask),
}

impl Process {
    pub fn order(order: Order) -> Self {
        Process::Order(OrderTask { order, stage: OrderStage::New })
    }

    pub fn replenish(item: ItemId) -> Self {
        Process::Replenish(ReplenishTask { item, stage: ReplenishStage::Ordering })
    }

    /// Short label for log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            Process::Arrivals(_) => "arrivals",
            Process::Dispatcher => "dispatcher",
            Process::Order(_) => "order",
            Process::Replenish(_) => "replenish",
        }
    }
}
