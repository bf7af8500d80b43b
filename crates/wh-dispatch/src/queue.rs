//! `OrderQueue` - orders that passed inventory admission and await a server.

use std::collections::VecDeque;

use wh_core::{Order, SimTime};

use crate::DispatchRule;

/// The live dispatch queue.
///
/// Orders are appended in admission order.  On each dispatch cycle the whole
/// queue is stably re-sorted by the rule's key and the head removed, so the
/// remaining orders stay sorted until the next arrival.
#[derive(Debug, Default)]
pub struct OrderQueue {
    orders: VecDeque<Order>,
}

impl OrderQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, order: Order) {
        self.orders.push_back(order);
    }

    /// Append several orders, preserving their order.
    pub fn extend(&mut self, orders: impl IntoIterator<Item = Order>) {
        self.orders.extend(orders);
    }

    /// Re-sort by `rule` at `now` and remove the head.
    pub fn pop_next(&mut self, rule: &DispatchRule, now: SimTime) -> Option<Order> {
        if self.orders.is_empty() {
            return None;
        }
        self.orders
            .make_contiguous()
            .sort_by_cached_key(|o| rule.key(o, now));
        self.orders.pop_front()
    }

    /// The order `pop_next` would return, without removing it.
    pub fn peek_next(&self, rule: &DispatchRule, now: SimTime) -> Option<&Order> {
        self.orders.iter().min_by_key(|o| rule.key(o, now))
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Order> {
        self.orders.iter()
    }
}
