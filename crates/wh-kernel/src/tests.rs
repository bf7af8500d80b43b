//! Unit tests for wh-kernel.

use wh_core::{SimTime, TaskId};

use crate::{EventQueue, Kernel, Request, ResourcePool, WakeReason, Yield};

// ── EventQueue ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod event_queue {
    use super::*;

    #[test]
    fn pops_in_time_order() {
        let mut q = EventQueue::new();
        q.push(SimTime(5.0), WakeReason::Timer, "c");
        q.push(SimTime(1.0), WakeReason::Timer, "a");
        q.push(SimTime(3.0), WakeReason::Timer, "b");
        let order: Vec<_> = std::iter::from_fn(|| q.pop().map(|(_, _, x)| x)).collect();
        assert_eq!(order, vec!["a", "b", "c"]);
    }

    #[test]
    fn equal_times_fire_in_registration_order() {
        let mut q = EventQueue::new();
        for name in ["first", "second", "third"] {
            q.push(SimTime(2.0), WakeReason::Timer, name);
        }
        let order: Vec<_> = std::iter::from_fn(|| q.pop().map(|(_, _, x)| x)).collect();
        assert_eq!(order, vec!["first", "second", "third"]);
    }

    #[test]
    fn grants_beat_timers_at_same_instant() {
        let mut q = EventQueue::new();
        q.push(SimTime(2.0), WakeReason::Timer, "timer");
        q.push(SimTime(2.0), WakeReason::Granted, "grant");
        q.push(SimTime(1.0), WakeReason::Timer, "early");
        assert_eq!(q.pop().unwrap().2, "early");
        let (at, reason, x) = q.pop().unwrap();
        assert_eq!((at, reason, x), (SimTime(2.0), WakeReason::Granted, "grant"));
        assert_eq!(q.pop().unwrap().2, "timer");
        assert!(q.is_empty());
    }

    #[test]
    fn peek_and_clear() {
        let mut q = EventQueue::new();
        assert_eq!(q.peek_time(), None);
        q.push(SimTime(4.0), WakeReason::Timer, 1);
        q.push(SimTime(0.5), WakeReason::Timer, 2);
        assert_eq!(q.peek_time(), Some(SimTime(0.5)));
        assert_eq!(q.len(), 2);
        q.clear();
        assert!(q.is_empty());
        // Sequence numbers keep increasing after a clear.
        assert_eq!(q.push(SimTime(0.0), WakeReason::Timer, 3), 2);
    }
}

// ── ResourcePool ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod resource_pool {
    use super::*;

    #[test]
    fn zero_capacity_rejected() {
        let err = ResourcePool::new(0).unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn grants_until_full_then_queues() {
        let mut pool = ResourcePool::new(2).unwrap();
        assert_eq!(pool.request(TaskId(1)), Request::Granted);
        assert_eq!(pool.request(TaskId(2)), Request::Granted);
        assert_eq!(pool.request(TaskId(3)), Request::Queued { position: 0 });
        assert_eq!(pool.request(TaskId(4)), Request::Queued { position: 1 });
        assert_eq!(pool.in_use(), 2);
        assert_eq!(pool.available(), 0);
        assert_eq!(pool.waiting(), 2);
        assert!(!pool.has_free_slot());
    }

    #[test]
    fn release_hands_off_fifo() {
        let mut pool = ResourcePool::new(1).unwrap();
        pool.request(TaskId(1));
        pool.request(TaskId(2));
        pool.request(TaskId(3));

        assert_eq!(pool.release(TaskId(1)).unwrap(), Some(TaskId(2)));
        assert!(pool.holds(TaskId(2)));
        assert_eq!(pool.in_use(), 1);

        assert_eq!(pool.release(TaskId(2)).unwrap(), Some(TaskId(3)));
        assert_eq!(pool.release(TaskId(3)).unwrap(), None);
        assert_eq!(pool.in_use(), 0);
    }

    #[test]
    fn release_without_permit_is_invariant_violation() {
        let mut pool = ResourcePool::new(1).unwrap();
        let err = pool.release(TaskId(9)).unwrap_err();
        assert!(err.is_invariant());
    }

    #[test]
    fn cancel_removes_holder_or_waiter() {
        let mut pool = ResourcePool::new(1).unwrap();
        pool.request(TaskId(1));
        pool.request(TaskId(2));
        assert!(pool.cancel(TaskId(2)));
        assert_eq!(pool.waiting(), 0);
        assert!(pool.cancel(TaskId(1)));
        assert_eq!(pool.in_use(), 0);
        assert!(!pool.cancel(TaskId(1)));
    }
}

// ── Kernel ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod kernel {
    use super::*;

    /// Test process: a name plus a scripted list of yields.
    struct Script {
        name:  &'static str,
        steps: Vec<Yield>,
    }

    fn script(name: &'static str, steps: Vec<Yield>) -> Script {
        Script { name, steps: steps.into_iter().rev().collect() }
    }

    /// Drive every script to completion or the horizon; return (time, name) of each resume.
    fn drive(kernel: &mut Kernel<Script>) -> Vec<(f64, &'static str)> {
        let mut log = Vec::new();
        while let Some((id, mut p)) = kernel.next_ready().unwrap() {
            log.push((kernel.now().secs(), p.name));
            let y = p.steps.pop().unwrap_or(Yield::Done);
            kernel.suspend(id, p, y).unwrap();
        }
        log
    }

    #[test]
    fn invalid_horizon_rejected() {
        assert!(Kernel::<Script>::new(SimTime(0.0), 1).is_err());
        assert!(Kernel::<Script>::new(SimTime(f64::NAN), 1).is_err());
        assert!(Kernel::<Script>::new(SimTime(10.0), 0).is_err());
    }

    #[test]
    fn spawned_processes_run_in_spawn_order() {
        let mut k = Kernel::new(SimTime(100.0), 1).unwrap();
        k.spawn(script("a", vec![Yield::Sleep(1.0)]));
        k.spawn(script("b", vec![Yield::Sleep(1.0)]));
        let log = drive(&mut k);
        assert_eq!(log, vec![(0.0, "a"), (0.0, "b"), (1.0, "a"), (1.0, "b")]);
    }

    #[test]
    fn clock_is_monotonic_and_ends_at_horizon() {
        let mut k = Kernel::new(SimTime(10.0), 1).unwrap();
        k.spawn(script("x", vec![Yield::Sleep(3.0), Yield::Sleep(0.0), Yield::Sleep(2.5)]));
        let log = drive(&mut k);
        let times: Vec<f64> = log.iter().map(|(t, _)| *t).collect();
        assert_eq!(times, vec![0.0, 3.0, 3.0, 5.5]);
        assert_eq!(k.now(), SimTime(10.0));
    }

    #[test]
    fn wakes_at_or_after_horizon_are_abandoned() {
        let mut k = Kernel::new(SimTime(5.0), 1).unwrap();
        k.spawn(script("late", vec![Yield::Sleep(5.0)]));
        let log = drive(&mut k);
        assert_eq!(log, vec![(0.0, "late")]);
        assert_eq!(k.parked(), 1);
        assert_eq!(k.abandon(), 1);
        assert_eq!(k.parked(), 0);
        assert_eq!(k.stats().abandoned, 1);
    }

    #[test]
    fn acquire_grants_immediately_when_free() {
        let mut k = Kernel::new(SimTime(50.0), 1).unwrap();
        k.spawn(script("a", vec![Yield::Acquire, Yield::Sleep(4.0)]));
        let log = drive(&mut k);
        assert_eq!(log, vec![(0.0, "a"), (0.0, "a"), (4.0, "a")]);
        // Done released the slot.
        assert_eq!(k.pool().in_use(), 0);
    }

    #[test]
    fn waiter_resumes_on_release_before_timers() {
        let mut k = Kernel::new(SimTime(50.0), 1).unwrap();
        // `a` holds the slot for 4s; `b` queues; `c` sleeps exactly 4s.
        k.spawn(script("a", vec![Yield::Acquire, Yield::Sleep(4.0)]));
        k.spawn(script("b", vec![Yield::Acquire, Yield::Sleep(1.0)]));
        k.spawn(script("c", vec![Yield::Sleep(4.0)]));
        let log = drive(&mut k);
        assert_eq!(
            log,
            vec![
                (0.0, "a"), // spawn, slot free
                (0.0, "a"), // grant fires ahead of the other spawns
                (0.0, "b"), // spawn, queues behind a
                (0.0, "c"), // spawn, sleeps 4
                (4.0, "a"), // a's service ends -> Done releases, b granted
                (4.0, "b"), // grant beats c's timer at the same instant
                (4.0, "c"),
                (5.0, "b"),
            ]
        );
    }

    #[test]
    fn abandon_frees_held_slots() {
        let mut k = Kernel::new(SimTime(3.0), 1).unwrap();
        k.spawn(script("holder", vec![Yield::Acquire, Yield::Sleep(100.0)]));
        k.spawn(script("waiter", vec![Yield::Acquire]));
        drive(&mut k);
        assert_eq!(k.pool().in_use(), 1);
        assert_eq!(k.pool().waiting(), 1);
        assert_eq!(k.abandon(), 2);
        assert_eq!(k.pool().in_use(), 0);
        assert_eq!(k.pool().waiting(), 0);
    }

    #[test]
    fn negative_delay_is_invariant_violation() {
        let mut k = Kernel::new(SimTime(3.0), 1).unwrap();
        k.spawn(script("bad", vec![]));
        let (id, p) = k.next_ready().unwrap().unwrap();
        let err = k.suspend(id, p, Yield::Sleep(-1.0)).unwrap_err();
        assert!(err.is_invariant());
    }

    #[test]
    fn delay_lost_to_rounding_is_invariant_violation() {
        let mut k = Kernel::new(SimTime(1e7), 1).unwrap();
        k.spawn(script("tiny", vec![]));
        let (id, p) = k.next_ready().unwrap().unwrap();
        k.suspend(id, p, Yield::Sleep(1e6)).unwrap();
        let (id, p) = k.next_ready().unwrap().unwrap();
        assert_eq!(k.now(), SimTime(1e6));
        let err = k.suspend(id, p, Yield::Sleep(1e-20)).unwrap_err();
        assert!(err.is_invariant());
        assert_eq!(k.parked(), 0);
    }

    #[test]
    fn explicit_release_then_done_is_clean() {
        let mut k = Kernel::new(SimTime(10.0), 1).unwrap();
        k.spawn(script("a", vec![Yield::Acquire]));
        let (id, p) = k.next_ready().unwrap().unwrap();
        k.suspend(id, p, Yield::Acquire).unwrap();
        let (id, p) = k.next_ready().unwrap().unwrap();
        k.release(id).unwrap();
        k.suspend(id, p, Yield::Done).unwrap();
        assert_eq!(k.pool().in_use(), 0);
        assert_eq!(k.stats().spawned, 1);
        assert_eq!(k.stats().wakes, 2);
    }
}
