//! Deferred two-channel computations.
//!
//! A [`Cbit`] ("computational bit") wraps a *runner*: a function that, given a
//! rejected-channel continuation and a resolved-channel continuation, performs
//! some work and eventually calls one of them. Nothing runs until a consumer
//! calls [`Cbit::run`] or [`Cbit::fork`].
//!
//! # Inertness and re-entrancy
//!
//! Building a `Cbit`, or deriving one through a combinator, never executes
//! anything. Every combinator captures the parent runner and returns a new
//! runner closure around it. Starting the same `Cbit` twice executes the
//! underlying work twice; no outcome is cached between runs.
//!
//! # Map vs. chain
//!
//! ```text
//! map(f):    parent ──Resolved(v)──▶ Resolved(f(v))      channel preserved
//! chain(f):  parent ──Resolved(v)──▶ run f(v) with the same continuations
//!                                    (f(v) decides the channel)
//! ```
//!
//! Every resolved-side combinator has a rejected-side mirror, and
//! [`Cbit::bimap`] / [`Cbit::bichain`] handle both channels in one step.
//!
//! # Contract on runners
//!
//! A well-behaved runner fires exactly one continuation, at most once, per
//! run. This is not checked here. Panics raised by user-supplied functions
//! propagate to whoever invoked the continuation; nothing is caught.
//!
//! # Example
//!
//! ```
//! use cbit::{Cbit, Outcome};
//!
//! let parsed: Cbit<String, i32> = Cbit::resolved("41".to_string())
//!     .chain(|s| match s.parse::<i32>() {
//!         Ok(n) => Cbit::resolved(n),
//!         Err(e) => Cbit::rejected(e.to_string()),
//!     })
//!     .map(|n| n + 1);
//!
//! assert_eq!(cbit::settle_now(&parsed).unwrap(), Outcome::Resolved(42));
//! ```

use core::fmt;
use std::sync::Arc;

use crate::types::{Continuation, Outcome};

type Runner<E, T> = dyn Fn(Continuation<E>, Continuation<T>) + Send + Sync;

/// A deferred computation that settles as `Rejected(E)` or `Resolved(T)`.
///
/// Cloning a `Cbit` shares its (immutable) runner.
pub struct Cbit<E, T> {
    run: Arc<Runner<E, T>>,
}

impl<E, T> Clone for Cbit<E, T> {
    fn clone(&self) -> Self {
        Self {
            run: Arc::clone(&self.run),
        }
    }
}

impl<E, T> fmt::Debug for Cbit<E, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cbit").finish_non_exhaustive()
    }
}

impl<E: 'static, T: 'static> Cbit<E, T> {
    /// Wraps a runner. The runner is stored as-is and only invoked on start.
    pub fn new<R>(runner: R) -> Self
    where
        R: Fn(Continuation<E>, Continuation<T>) + Send + Sync + 'static,
    {
        Self {
            run: Arc::new(runner),
        }
    }

    /// Starts the computation with prebuilt continuations.
    #[inline]
    pub fn run(&self, reject: Continuation<E>, resolve: Continuation<T>) {
        (self.run)(reject, resolve);
    }

    /// Starts the computation with plain callbacks.
    pub fn fork<RJ, RS>(&self, on_reject: RJ, on_resolve: RS)
    where
        RJ: Fn(E) + Send + Sync + 'static,
        RS: Fn(T) + Send + Sync + 'static,
    {
        self.run(Continuation::new(on_reject), Continuation::new(on_resolve));
    }

    /// Starts the computation with a single outcome-shaped callback.
    pub fn fork_outcome<F>(&self, on_settle: F)
    where
        F: Fn(Outcome<E, T>) + Send + Sync + 'static,
    {
        let on_settle = Arc::new(on_settle);
        let on_reject = Arc::clone(&on_settle);
        self.run(
            Continuation::new(move |e| on_reject(Outcome::Rejected(e))),
            Continuation::new(move |v| on_settle(Outcome::Resolved(v))),
        );
    }

    // =========================================================================
    // Decided constructors
    // =========================================================================

    /// A computation that resolves with `value`, synchronously, on every run.
    pub fn resolved(value: T) -> Self
    where
        T: Clone + Send + Sync,
    {
        Self::new(move |_, resolve| resolve.call(value.clone()))
    }

    /// A computation that rejects with `value`, synchronously, on every run.
    pub fn rejected(value: E) -> Self
    where
        E: Clone + Send + Sync,
    {
        Self::new(move |reject, _| reject.call(value.clone()))
    }

    /// A computation that settles on whichever channel `outcome` is on.
    pub fn from_outcome(outcome: Outcome<E, T>) -> Self
    where
        E: Clone + Send + Sync,
        T: Clone + Send + Sync,
    {
        Self::new(move |reject, resolve| outcome.clone().dispatch(&reject, &resolve))
    }

    /// A computation that resolves with `Ok` and rejects with `Err`.
    pub fn from_result(result: Result<T, E>) -> Self
    where
        E: Clone + Send + Sync,
        T: Clone + Send + Sync,
    {
        Self::from_outcome(result.into())
    }

    /// Method-syntax form of [`Cbit::resolved`].
    ///
    /// The receiver is ignored: the result is a brand-new computation that
    /// only shares the receiver's rejected type.
    #[must_use]
    pub fn resolved_like<U>(&self, value: U) -> Cbit<E, U>
    where
        U: Clone + Send + Sync + 'static,
    {
        Cbit::resolved(value)
    }

    /// Method-syntax form of [`Cbit::rejected`].
    ///
    /// The receiver is ignored: the result is a brand-new computation that
    /// only shares the receiver's resolved type.
    #[must_use]
    pub fn rejected_like<F>(&self, value: F) -> Cbit<F, T>
    where
        F: Clone + Send + Sync + 'static,
    {
        Cbit::rejected(value)
    }

    // =========================================================================
    // Mapping combinators
    // =========================================================================

    /// Transforms the resolved value; rejections pass through.
    #[must_use]
    pub fn map<U, F>(&self, f: F) -> Cbit<E, U>
    where
        U: 'static,
        F: Fn(T) -> U + Send + Sync + 'static,
    {
        let run = Arc::clone(&self.run);
        let f = Arc::new(f);
        Cbit::new(move |reject, resolve: Continuation<U>| {
            let f = Arc::clone(&f);
            run(reject, Continuation::new(move |v| resolve.call(f(v))));
        })
    }

    /// Transforms the rejected value; resolutions pass through.
    #[must_use]
    pub fn rejected_map<F2, G>(&self, g: G) -> Cbit<F2, T>
    where
        F2: 'static,
        G: Fn(E) -> F2 + Send + Sync + 'static,
    {
        let run = Arc::clone(&self.run);
        let g = Arc::new(g);
        Cbit::new(move |reject: Continuation<F2>, resolve| {
            let g = Arc::clone(&g);
            run(Continuation::new(move |e| reject.call(g(e))), resolve);
        })
    }

    /// Transforms whichever channel the computation settles on.
    #[must_use]
    pub fn bimap<F2, U, G, F>(&self, g: G, f: F) -> Cbit<F2, U>
    where
        F2: 'static,
        U: 'static,
        G: Fn(E) -> F2 + Send + Sync + 'static,
        F: Fn(T) -> U + Send + Sync + 'static,
    {
        let run = Arc::clone(&self.run);
        let g = Arc::new(g);
        let f = Arc::new(f);
        Cbit::new(move |reject: Continuation<F2>, resolve: Continuation<U>| {
            let g = Arc::clone(&g);
            let f = Arc::clone(&f);
            run(
                Continuation::new(move |e| reject.call(g(e))),
                Continuation::new(move |v| resolve.call(f(v))),
            );
        })
    }

    // =========================================================================
    // Chaining combinators
    // =========================================================================

    /// Continues with the computation `f` returns for the resolved value.
    ///
    /// The returned computation is started with the outer continuations, so
    /// its outcome, on either channel, becomes the outcome of the chain.
    #[must_use]
    pub fn chain<U, F>(&self, f: F) -> Cbit<E, U>
    where
        U: 'static,
        F: Fn(T) -> Cbit<E, U> + Send + Sync + 'static,
    {
        let run = Arc::clone(&self.run);
        let f = Arc::new(f);
        Cbit::new(move |reject: Continuation<E>, resolve: Continuation<U>| {
            let f = Arc::clone(&f);
            let next_reject = reject.clone();
            run(
                reject,
                Continuation::new(move |v| f(v).run(next_reject.clone(), resolve.clone())),
            );
        })
    }

    /// Continues with the computation `g` returns for the rejected value.
    ///
    /// This is how a rejection is recovered from: `g` may return a
    /// computation that resolves.
    #[must_use]
    pub fn rejected_chain<F2, G>(&self, g: G) -> Cbit<F2, T>
    where
        F2: 'static,
        G: Fn(E) -> Cbit<F2, T> + Send + Sync + 'static,
    {
        let run = Arc::clone(&self.run);
        let g = Arc::new(g);
        Cbit::new(move |reject: Continuation<F2>, resolve: Continuation<T>| {
            let g = Arc::clone(&g);
            let next_resolve = resolve.clone();
            run(
                Continuation::new(move |e| g(e).run(reject.clone(), next_resolve.clone())),
                resolve,
            );
        })
    }

    /// Continues with `g(e)` on rejection or `f(v)` on resolution.
    #[must_use]
    pub fn bichain<F2, U, G, F>(&self, g: G, f: F) -> Cbit<F2, U>
    where
        F2: 'static,
        U: 'static,
        G: Fn(E) -> Cbit<F2, U> + Send + Sync + 'static,
        F: Fn(T) -> Cbit<F2, U> + Send + Sync + 'static,
    {
        let run = Arc::clone(&self.run);
        let g = Arc::new(g);
        let f = Arc::new(f);
        Cbit::new(move |reject: Continuation<F2>, resolve: Continuation<U>| {
            let g = Arc::clone(&g);
            let f = Arc::clone(&f);
            let (on_reject, on_resolve) = (reject.clone(), resolve.clone());
            run(
                Continuation::new(move |e| g(e).run(reject.clone(), resolve.clone())),
                Continuation::new(move |v| f(v).run(on_reject.clone(), on_resolve.clone())),
            );
        })
    }
}

impl<E: Send + 'static, T: Send + 'static> Cbit<E, Vec<T>> {
    /// Joins independent computations; see
    /// [`from_parallel`](crate::combinator::parallel::from_parallel).
    pub fn from_parallel<I>(cbits: I) -> Self
    where
        I: IntoIterator<Item = Cbit<E, T>>,
    {
        crate::combinator::parallel::from_parallel(cbits)
    }
}
