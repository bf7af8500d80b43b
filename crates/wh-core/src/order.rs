//! The `Order` record and its lifecycle.
//!
//! An order is created by the arrival process, admitted or backlogged by the
//! inventory ledger, started by the order handler once it holds a server
//! slot, and finished when its service delay elapses.  It is dropped after the
//! KPI collector has recorded it; nothing outlives the run.

use crate::{InvariantViolation, ItemId, OrderId, SimTime};

/// A single customer order.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Order {
    pub id:       OrderId,
    pub arrival:  SimTime,
    /// Seconds of server time the order needs once started.
    pub service:  f64,
    pub due:      Option<SimTime>,
    /// 0 = normal, 1 = urgent.  Larger values are served earlier under PRIORITY.
    pub priority: u8,
    pub item:     ItemId,
    pub quantity: u32,
    pub start:    Option<SimTime>,
    pub end:      Option<SimTime>,
    /// Set while the order sits in an item backlog waiting for stock.
    pub stockout: bool,
}

impl Order {
    /// A fresh, unstarted order.
    pub fn new(
        id:       OrderId,
        arrival:  SimTime,
        service:  f64,
        due:      Option<SimTime>,
        priority: u8,
        item:     ItemId,
        quantity: u32,
    ) -> Self {
        Self {
            id,
            arrival,
            service,
            due,
            priority,
            item,
            quantity,
            start: None,
            end: None,
            stockout: false,
        }
    }

    /// Seconds this order has been waiting at `now`; zero once started.
    #[inline]
    pub fn current_wait(&self, now: SimTime) -> f64 {
        match self.start {
            Some(_) => 0.0,
            None => now.since(self.arrival),
        }
    }

    /// Record the moment service begins.
    pub fn mark_started(&mut self, now: SimTime) -> Result<(), InvariantViolation> {
        if self.start.is_some() || now < self.arrival {
            return Err(InvariantViolation::OrderTimeline { order: self.id, at: now });
        }
        self.start = Some(now);
        Ok(())
    }

    /// Record the moment service ends.
    pub fn mark_finished(&mut self, now: SimTime) -> Result<(), InvariantViolation> {
        match self.start {
            Some(start) if self.end.is_none() && start <= now => {
                self.end = Some(now);
                Ok(())
            }
            _ => Err(InvariantViolation::OrderTimeline { order: self.id, at: now }),
        }
    }

    /// `start - arrival`, once started.
    pub fn wait(&self) -> Option<f64> {
        self.start.map(|s| s.since(self.arrival))
    }

    /// `end - arrival`, once finished.
    pub fn flow(&self) -> Option<f64> {
        self.end.map(|e| e.since(self.arrival))
    }

    pub fn is_urgent(&self) -> bool {
        self.priority > 0
    }
}
