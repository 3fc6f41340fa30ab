//! Observing a computation's outcome from synchronous code.
//!
//! These helpers start a computation and hand its first outcome back as a
//! value instead of through continuations:
//!
//! - [`settle_now`]: for computations that settle before `fork` returns
//! - [`wait_timeout`]: blocks the calling thread until the computation settles
//!   on some other thread, or the timeout elapses
//!
//! Only the first outcome is kept. A computation that fires its continuations
//! more than once has the later firings ignored. Nothing here schedules work:
//! whoever runs the computation's underlying task still owns that.

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};

use crate::cbit::Cbit;
use crate::error::{Result, SettleError};
use crate::tracing_compat::trace;
use crate::types::Outcome;

#[derive(Debug)]
struct Slot<E, T> {
    first: Mutex<Option<Outcome<E, T>>>,
    ready: Condvar,
}

impl<E, T> Slot<E, T> {
    fn new() -> Self {
        Self {
            first: Mutex::new(None),
            ready: Condvar::new(),
        }
    }

    fn offer(&self, outcome: Outcome<E, T>) {
        let mut first = self.first.lock();
        if first.is_some() {
            trace!(channel = outcome.channel(), "extra firing ignored");
            return;
        }
        *first = Some(outcome);
        drop(first);
        self.ready.notify_all();
    }
}

fn observe<E, T>(cbit: &Cbit<E, T>) -> Arc<Slot<E, T>>
where
    E: Send + 'static,
    T: Send + 'static,
{
    let slot = Arc::new(Slot::new());
    let sink = Arc::clone(&slot);
    cbit.fork_outcome(move |outcome| sink.offer(outcome));
    slot
}

/// Starts `cbit` and returns its outcome if it settled synchronously.
///
/// Returns [`SettleError::Pending`] if neither continuation had fired by the
/// time the runner returned. The computation is not stopped in that case.
pub fn settle_now<E, T>(cbit: &Cbit<E, T>) -> Result<Outcome<E, T>>
where
    E: Send + 'static,
    T: Send + 'static,
{
    let slot = observe(cbit);
    let outcome = slot.first.lock().take();
    outcome.ok_or(SettleError::Pending)
}

/// Starts `cbit` and blocks until it settles or `timeout` elapses.
///
/// Intended for computations whose work completes on another thread.
pub fn wait_timeout<E, T>(cbit: &Cbit<E, T>, timeout: Duration) -> Result<Outcome<E, T>>
where
    E: Send + 'static,
    T: Send + 'static,
{
    // `None` when the deadline is past the end of the clock: wait unbounded.
    let deadline = Instant::now().checked_add(timeout);
    let slot = observe(cbit);
    let mut first = slot.first.lock();
    while first.is_none() {
        match deadline {
            Some(deadline) => {
                if slot.ready.wait_until(&mut first, deadline).timed_out() {
                    break;
                }
            }
            None => slot.ready.wait(&mut first),
        }
    }
    let outcome = first.take();
    drop(first);
    trace!(settled = outcome.is_some(), "wait finished");
    outcome.ok_or(SettleError::TimedOut { timeout })
}
