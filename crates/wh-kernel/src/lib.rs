//! `wh-kernel` - the discrete-event core: clock, event queue, server pool.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                |
//! |-----------------|---------------------------------------------------------|
//! | [`event_queue`] | `EventQueue<T>` min-heap keyed by (time, reason, seq)   |
//! | [`resource`]    | `ResourcePool` - fixed capacity, FIFO wait list         |
//! | [`kernel`]      | `Kernel<P>` - clock, parked processes, `Yield`          |
//!
//! # Process model
//!
//! A process is any value `P` the caller drives as a state machine.  The
//! caller pulls the next ready process with [`Kernel::next_ready`], advances
//! it, and hands it back with [`Kernel::suspend`] together with a [`Yield`]
//! naming its wake condition:
//!
//! ```text
//! loop:
//!   (id, p)  = kernel.next_ready()?      // advances `now`; None at horizon
//!   y        = caller.resume(id, &mut p) // may spawn, release, mutate world
//!   kernel.suspend(id, p, y)?            // Sleep(d) | Acquire | Done
//! ```
//!
//! Only one process runs at a time, so no process state is ever shared.
//! Wakes at equal times are ordered: slot grants first, then timers, each in
//! registration order.

pub mod event_queue;
pub mod kernel;
pub mod resource;

#[cfg(test)]
mod tests;

pub use event_queue::{EventQueue, WakeReason};
pub use kernel::{Kernel, KernelStats, Yield};
pub use resource::{Request, ResourcePool};
