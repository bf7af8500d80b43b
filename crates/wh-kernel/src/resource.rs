//! `ResourcePool` - the fixed-capacity server (AGV / station) pool.
//!
//! A slot is held by a [`TaskId`].  Requests are granted immediately while
//! `in_use() < capacity()`, otherwise the task joins a FIFO wait list.  A
//! release hands the slot straight to the head of the wait list, so the slot
//! never becomes observable as free while someone is waiting.

use std::collections::{BTreeSet, VecDeque};

use wh_core::{ConfigError, InvariantViolation, TaskId, WhResult};

/// Outcome of [`ResourcePool::request`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Request {
    /// The task now holds a slot.
    Granted,
    /// The task is waiting; `position` is 0 for the head of the wait list.
    Queued { position: usize },
}

/// Fixed-capacity mutual-exclusion pool with a FIFO wait list.
#[derive(Debug)]
pub struct ResourcePool {
    capacity: usize,
    holders:  BTreeSet<TaskId>,
    waiters:  VecDeque<TaskId>,
}

impl ResourcePool {
    /// A pool of `capacity` identical servers.  Zero capacity is rejected.
    pub fn new(capacity: usize) -> WhResult<Self> {
        if capacity == 0 {
            return Err(ConfigError::NoServers.into());
        }
        Ok(Self {
            capacity,
            holders: BTreeSet::new(),
            waiters: VecDeque::new(),
        })
    }

    /// Ask for a slot on behalf of `task`.
    pub fn request(&mut self, task: TaskId) -> Request {
        if self.holders.len() < self.capacity {
            self.holders.insert(task);
            Request::Granted
        } else {
            self.waiters.push_back(task);
            Request::Queued {
                position: self.waiters.len() - 1,
            }
        }
    }

    /// Return `task`'s slot.
    ///
    /// If anyone is waiting, the slot passes to the head of the wait list and
    /// that task is returned so the caller can wake it.
    pub fn release(&mut self, task: TaskId) -> WhResult<Option<TaskId>> {
        if !self.holders.remove(&task) {
            return Err(InvariantViolation::ReleaseWithoutPermit(task).into());
        }
        let next = self.waiters.pop_front();
        if let Some(next) = next {
            self.holders.insert(next);
        }
        Ok(next)
    }

    /// Forget `task` entirely, whether holding or waiting.
    ///
    /// Used when processes are abandoned at the horizon; no hand-off happens
    /// because nothing runs after abandonment.
    pub fn cancel(&mut self, task: TaskId) -> bool {
        if self.holders.remove(&task) {
            return true;
        }
        match self.waiters.iter().position(|&t| t == task) {
            Some(pos) => {
                self.waiters.remove(pos);
                true
            }
            None => false,
        }
    }

    pub fn holds(&self, task: TaskId) -> bool {
        self.holders.contains(&task)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn in_use(&self) -> usize {
        self.holders.len()
    }

    pub fn available(&self) -> usize {
        self.capacity - self.holders.len()
    }

    pub fn has_free_slot(&self) -> bool {
        self.holders.len() < self.capacity
    }

    pub fn waiting(&self) -> usize {
        self.waiters.len()
    }
}
