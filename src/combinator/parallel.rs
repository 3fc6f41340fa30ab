//! Parallel combinator: start many computations, join their outcomes.
//!
//! `from_parallel(inputs)` builds one computation that, when started, starts
//! every input (in input order, without waiting for any of them) and settles
//! under a first-rejection-wins / all-must-resolve policy.
//!
//! # Semantics
//!
//! ```text
//! from_parallel([c0, c1, .., cn-1]):
//!   n == 0              → Resolved([])            (synchronously)
//!   first ci to reject  → Rejected(that value)
//!   every ci resolves   → Resolved([v0, v1, .., vn-1])   (input order)
//! ```
//!
//! **Key property**: the aggregate settles exactly once per run. A latch in
//! the per-run accumulator turns every completion arriving after the first
//! terminal transition into a no-op. Those inputs keep running; only their
//! effect on the aggregate is suppressed. There is no cancellation.
//!
//! # Accumulator
//!
//! Each run allocates a fresh `ParallelState` behind a mutex. The slot
//! write, the remaining-count decrement and the latch check form one critical
//! section, so inputs settling concurrently on different threads cannot
//! double-settle the aggregate. A duplicate resolve from one input finds its
//! slot already filled and is ignored.
//!
//! The outer continuation is fired after the lock is released.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::cbit::Cbit;
use crate::tracing_compat::{debug, trace};
use crate::types::{Continuation, Outcome};

/// Per-run accumulator for [`from_parallel`].
///
/// Owned by exactly one run of the aggregate; never shared across runs.
#[derive(Debug)]
pub(crate) struct ParallelState<T> {
    slots: Vec<Option<T>>,
    remaining: usize,
    completed: bool,
}

/// What the aggregate should do after an input reports.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Transition<E, T> {
    /// Not terminal yet, or the report was discarded.
    Pending,
    /// The aggregate just became terminal with this outcome.
    Settle(Outcome<E, Vec<T>>),
}

impl<T> ParallelState<T> {
    /// Creates an accumulator sized for `inputs` computations.
    #[must_use]
    pub(crate) fn new(inputs: usize) -> Self {
        let mut slots = Vec::with_capacity(inputs);
        slots.resize_with(inputs, || None);
        Self {
            slots,
            remaining: inputs,
            completed: false,
        }
    }

    /// Whether the aggregate has already settled.
    #[cfg(test)]
    #[must_use]
    pub(crate) const fn is_completed(&self) -> bool {
        self.completed
    }

    /// How many inputs have yet to resolve.
    #[cfg(test)]
    #[must_use]
    pub(crate) const fn remaining(&self) -> usize {
        self.remaining
    }

    /// Records input `index` resolving with `value`.
    pub(crate) fn resolve<E>(&mut self, index: usize, value: T) -> Transition<E, T> {
        if self.completed {
            trace!(index, "late resolve discarded");
            return Transition::Pending;
        }
        let slot = &mut self.slots[index];
        if slot.is_some() {
            trace!(index, "duplicate resolve discarded");
            return Transition::Pending;
        }
        *slot = Some(value);
        self.remaining -= 1;
        if self.remaining > 0 {
            return Transition::Pending;
        }

        self.completed = true;
        let values = self.slots.drain(..).flatten().collect();
        debug!(index, "parallel run resolved");
        Transition::Settle(Outcome::Resolved(values))
    }

    /// Records input `index` rejecting with `value`.
    #[cfg_attr(not(feature = "tracing-integration"), allow(unused_variables))]
    pub(crate) fn reject<E>(&mut self, index: usize, value: E) -> Transition<E, T> {
        if self.completed {
            trace!(index, "late reject discarded");
            return Transition::Pending;
        }
        self.completed = true;
        self.slots.clear();
        debug!(index, "parallel run rejected");
        Transition::Settle(Outcome::Rejected(value))
    }
}

/// Joins independent computations into one.
///
/// When started, the result starts every input in order and:
/// - rejects with the value of the first input to reject, or
/// - resolves with every input's resolved value, at its input's index.
///
/// An empty input resolves synchronously with an empty `Vec`. Each run gets
/// its own accumulator, so the result can be started any number of times.
///
/// # Example
/// ```
/// use cbit::{from_parallel, settle_now, Cbit, Outcome};
///
/// let all: Cbit<&str, Vec<i32>> =
///     from_parallel(vec![Cbit::resolved(1), Cbit::resolved(2), Cbit::resolved(3)]);
/// assert_eq!(settle_now(&all).unwrap(), Outcome::Resolved(vec![1, 2, 3]));
///
/// let failed: Cbit<&str, Vec<i32>> =
///     from_parallel(vec![Cbit::resolved(1), Cbit::rejected("boom"), Cbit::resolved(3)]);
/// assert_eq!(settle_now(&failed).unwrap(), Outcome::Rejected("boom"));
/// ```
pub fn from_parallel<E, T, I>(cbits: I) -> Cbit<E, Vec<T>>
where
    E: Send + 'static,
    T: Send + 'static,
    I: IntoIterator<Item = Cbit<E, T>>,
{
    let cbits: Arc<[Cbit<E, T>]> = cbits.into_iter().collect();

    Cbit::new(move |reject: Continuation<E>, resolve: Continuation<Vec<T>>| {
        let inputs = cbits.len();
        debug!(inputs, "parallel run started");
        if inputs == 0 {
            resolve.call(Vec::new());
            return;
        }

        let state = Arc::new(Mutex::new(ParallelState::new(inputs)));
        for (index, cbit) in cbits.iter().enumerate() {
            let on_reject = {
                let state = Arc::clone(&state);
                let reject = reject.clone();
                let resolve = resolve.clone();
                Continuation::new(move |e| {
                    let transition = state.lock().reject(index, e);
                    settle(transition, &reject, &resolve);
                })
            };
            let on_resolve = {
                let state = Arc::clone(&state);
                let reject = reject.clone();
                let resolve = resolve.clone();
                Continuation::new(move |v| {
                    let transition = state.lock().resolve(index, v);
                    settle(transition, &reject, &resolve);
                })
            };
            cbit.run(on_reject, on_resolve);
        }
    })
}

fn settle<E, T>(
    transition: Transition<E, T>,
    reject: &Continuation<E>,
    resolve: &Continuation<Vec<T>>,
) {
    if let Transition::Settle(outcome) = transition {
        outcome.dispatch(reject, resolve);
    }
}
