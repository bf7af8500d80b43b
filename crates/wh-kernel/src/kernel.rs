//! `Kernel<P>` - virtual clock, parked processes, and the server pool.

use std::collections::BTreeMap;

use log::trace;
use wh_core::{ConfigError, InvariantViolation, SimTime, TaskId, WhResult};

use crate::{EventQueue, Request, ResourcePool, WakeReason};

/// What a process waits for after it hands control back to the kernel.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Yield {
    /// Resume after `delay` seconds of virtual time (`delay >= 0`).  A
    /// positive delay too small to move the clock is rejected.
    Sleep(f64),
    /// Resume once this process holds a server slot.
    Acquire,
    /// The process has finished.  Any slot it still holds is released.
    Done,
}

/// Counters describing one kernel's lifetime.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct KernelStats {
    /// Processes created with [`Kernel::spawn`].
    pub spawned:   u64,
    /// Wakes delivered by [`Kernel::next_ready`].
    pub wakes:     u64,
    /// Processes still parked when the horizon was reached.
    pub abandoned: usize,
}

/// Single-threaded cooperative scheduler over processes of type `P`.
pub struct Kernel<P> {
    now:       SimTime,
    horizon:   SimTime,
    events:    EventQueue<TaskId>,
    parked:    BTreeMap<TaskId, P>,
    pool:      ResourcePool,
    next_task: TaskId,
    stats:     KernelStats,
}

impl<P> Kernel<P> {
    /// A kernel that runs until `horizon` with a pool of `servers` slots.
    pub fn new(horizon: SimTime, servers: usize) -> WhResult<Self> {
        if !(horizon.is_finite() && horizon > SimTime::ZERO) {
            return Err(ConfigError::NonPositive { field: "sim_time", value: horizon.secs() }.into());
        }
        Ok(Self {
            now:       SimTime::ZERO,
            horizon,
            events:    EventQueue::new(),
            parked:    BTreeMap::new(),
            pool:      ResourcePool::new(servers)?,
            next_task: TaskId(0),
            stats:     KernelStats::default(),
        })
    }

    #[inline]
    pub fn now(&self) -> SimTime {
        self.now
    }

    #[inline]
    pub fn horizon(&self) -> SimTime {
        self.horizon
    }

    pub fn pool(&self) -> &ResourcePool {
        &self.pool
    }

    pub fn stats(&self) -> KernelStats {
        self.stats
    }

    /// Number of processes currently suspended.
    pub fn parked(&self) -> usize {
        self.parked.len()
    }

    /// Register a new process.  It first runs at the current time, after
    /// every wake already registered for this instant.
    pub fn spawn(&mut self, process: P) -> TaskId {
        let id = self.next_task;
        self.next_task = id.next();
        self.parked.insert(id, process);
        self.events.push(self.now, WakeReason::Timer, id);
        self.stats.spawned += 1;
        id
    }

    /// Advance the clock to the next wake and hand its process to the caller.
    ///
    /// Returns `None` once no wake remains before the horizon; the clock then
    /// reads exactly `horizon`.
    pub fn next_ready(&mut self) -> WhResult<Option<(TaskId, P)>> {
        match self.events.peek_time() {
            Some(at) if at < self.horizon => {}
            _ => {
                self.now = self.horizon;
                return Ok(None);
            }
        }
        let Some((at, reason, id)) = self.events.pop() else {
            return Ok(None);
        };
        debug_assert!(at >= self.now, "virtual time moved backwards");
        self.now = at;
        let process = self
            .parked
            .remove(&id)
            .ok_or(InvariantViolation::UnknownTask(id))?;
        self.stats.wakes += 1;
        trace!("{} wake {id} ({reason:?})", self.now);
        Ok(Some((id, process)))
    }

    /// Park `process` again under the wake condition `y`.
    pub fn suspend(&mut self, id: TaskId, process: P, y: Yield) -> WhResult<()> {
        match y {
            Yield::Sleep(delay) => {
                let at = self.now.after(delay);
                // A positive delay lost to rounding would wake at `now` forever.
                if !(delay.is_finite() && delay >= 0.0) || (delay > 0.0 && at == self.now) {
                    return Err(InvariantViolation::InvalidDelay { task: id, delay }.into());
                }
                self.parked.insert(id, process);
                self.events.push(at, WakeReason::Timer, id);
            }
            Yield::Acquire => {
                self.parked.insert(id, process);
                if let Request::Granted = self.pool.request(id) {
                    self.events.push(self.now, WakeReason::Granted, id);
                }
            }
            Yield::Done => {
                if self.pool.holds(id) {
                    self.release(id)?;
                }
            }
        }
        Ok(())
    }

    /// Return `id`'s server slot, waking the next waiter if there is one.
    pub fn release(&mut self, id: TaskId) -> WhResult<()> {
        if let Some(next) = self.pool.release(id)? {
            self.events.push(self.now, WakeReason::Granted, next);
        }
        Ok(())
    }

    /// Drop every parked process without resuming it, freeing any slot or
    /// wait-list place it held.  Returns how many were abandoned.
    pub fn abandon(&mut self) -> usize {
        let abandoned = self.parked.len();
        for (&id, _) in self.parked.iter() {
            self.pool.cancel(id);
        }
        self.parked.clear();
        self.events.clear();
        self.stats.abandoned += abandoned;
        abandoned
    }
}
