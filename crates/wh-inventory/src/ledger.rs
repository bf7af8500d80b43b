//! The stock ledger: one `StockEntry` per catalog item.

use std::collections::VecDeque;

use log::debug;
use wh_core::{InvariantViolation, ItemId, Order, WhResult};

use crate::Catalog;

// ── ReorderPolicy ─────────────────────────────────────────────────────────────

/// Stock parameters applied uniformly to every item in the catalog.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReorderPolicy {
    /// Units on hand at the start of the run.
    pub initial_inventory: u32,
    /// A replenishment is triggered once stock falls to or below this level.
    pub reorder_point:     u32,
    /// Units added by each completed replenishment.
    pub reorder_quantity:  u32,
}

impl Default for ReorderPolicy {
    fn default() -> Self {
        Self {
            initial_inventory: 100,
            reorder_point:     20,
            reorder_quantity:  50,
        }
    }
}

// ── StockEntry ────────────────────────────────────────────────────────────────

/// Ledger state for one item.
#[derive(Debug)]
pub struct StockEntry {
    on_hand:          u32,
    reorder_point:    u32,
    reorder_quantity: u32,
    replenishing:     bool,
    backlog:          VecDeque<Order>,
}

impl StockEntry {
    fn new(policy: &ReorderPolicy) -> Self {
        Self {
            on_hand:          policy.initial_inventory,
            reorder_point:    policy.reorder_point,
            reorder_quantity: policy.reorder_quantity,
            replenishing:     false,
            backlog:          VecDeque::new(),
        }
    }

    pub fn on_hand(&self) -> u32 {
        self.on_hand
    }

    pub fn is_replenishing(&self) -> bool {
        self.replenishing
    }

    /// Orders blocked on stock, oldest first.
    pub fn backlog(&self) -> impl Iterator<Item = &Order> {
        self.backlog.iter()
    }

    /// The most recently backlogged order.
    pub fn backlog_back(&self) -> Option<&Order> {
        self.backlog.back()
    }

    pub fn backlog_len(&self) -> usize {
        self.backlog.len()
    }

    fn take(&mut self, item: ItemId, quantity: u32) -> Result<(), InvariantViolation> {
        self.on_hand = self
            .on_hand
            .checked_sub(quantity)
            .ok_or(InvariantViolation::NegativeStock {
                item,
                on_hand:   self.on_hand,
                requested: quantity,
            })?;
        Ok(())
    }

    /// Set the single-flight guard.  Returns `true` if this call set it.
    fn claim_replenishment(&mut self) -> bool {
        if self.replenishing {
            return false;
        }
        self.replenishing = true;
        true
    }
}

// ── Submission outcome ────────────────────────────────────────────────────────

/// Where a submitted order went.
#[derive(Debug, PartialEq)]
pub enum Admission {
    /// Stock was reserved; the order belongs in the dispatch queue.
    Admitted(Order),
    /// Not enough stock; the order joined its item's backlog.
    Backlogged,
}

/// Result of [`Ledger::submit`].
#[derive(Debug, PartialEq)]
pub struct SubmitOutcome {
    pub admission: Admission,
    /// `true` if this submission set the item's replenishment guard, i.e. the
    /// caller must start exactly one replenishment process for the item.
    pub start_replenishment: bool,
}

// ── Ledger ────────────────────────────────────────────────────────────────────

/// Per-item stock, replenishment guards, and backlogs.
#[derive(Debug)]
pub struct Ledger {
    entries: Vec<StockEntry>,
}

impl Ledger {
    /// A ledger covering every item in `catalog`, each starting from `policy`.
    pub fn new(catalog: &Catalog, policy: &ReorderPolicy) -> Self {
        Self {
            entries: catalog.items().map(|_| StockEntry::new(policy)).collect(),
        }
    }

    pub fn entry(&self, item: ItemId) -> Option<&StockEntry> {
        self.entries.get(item.index())
    }

    pub fn entries(&self) -> impl Iterator<Item = (ItemId, &StockEntry)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, e)| (ItemId(i as u16), e))
    }

    /// Total orders currently blocked on stock across all items.
    pub fn backlog_total(&self) -> usize {
        self.entries.iter().map(StockEntry::backlog_len).sum()
    }

    /// Items whose replenishment guard is currently set.
    pub fn in_flight(&self) -> usize {
        self.entries.iter().filter(|e| e.replenishing).count()
    }

    fn entry_mut(&mut self, item: ItemId) -> Result<&mut StockEntry, InvariantViolation> {
        self.entries
            .get_mut(item.index())
            .ok_or(InvariantViolation::UnknownItem(item))
    }

    /// Admit `order` against stock or backlog it.
    ///
    /// The replenishment guard is set here whenever the outcome asks for a
    /// replenishment, so at most one is ever requested per item until
    /// [`complete_replenishment`][Self::complete_replenishment] clears it.
    pub fn submit(&mut self, mut order: Order) -> WhResult<SubmitOutcome> {
        let item = order.item;
        let entry = self.entry_mut(item)?;

        if entry.on_hand >= order.quantity {
            entry.take(item, order.quantity)?;
            let start_replenishment =
                entry.on_hand <= entry.reorder_point && entry.claim_replenishment();
            return Ok(SubmitOutcome {
                admission: Admission::Admitted(order),
                start_replenishment,
            });
        }

        order.stockout = true;
        debug!(
            "{} stockout for {} ({} on hand, {} requested)",
            order.arrival, order.id, entry.on_hand, order.quantity,
        );
        entry.backlog.push_back(order);
        let start_replenishment = entry.claim_replenishment();
        Ok(SubmitOutcome {
            admission: Admission::Backlogged,
            start_replenishment,
        })
    }

    /// Restock `item`, clear its guard, and release backlogged orders that
    /// can now be filled, oldest first.
    ///
    /// Draining stops at the first order that cannot be filled in full; no
    /// later order overtakes it and no order is partially filled.
    pub fn complete_replenishment(&mut self, item: ItemId) -> WhResult<Vec<Order>> {
        let entry = self.entry_mut(item)?;
        if !entry.replenishing {
            return Err(InvariantViolation::ReplenishmentNotInFlight(item).into());
        }
        entry.on_hand = entry.on_hand.saturating_add(entry.reorder_quantity);
        entry.replenishing = false;

        let mut released = Vec::new();
        while let Some(head) = entry.backlog.front() {
            if entry.on_hand < head.quantity {
                break;
            }
            let quantity = head.quantity;
            entry.take(item, quantity)?;
            if let Some(mut order) = entry.backlog.pop_front() {
                order.stockout = false;
                released.push(order);
            }
        }
        Ok(released)
    }
}
