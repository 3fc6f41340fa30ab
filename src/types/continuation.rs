//! Unary callbacks used as the two channels of a deferred computation.

use core::fmt;
use std::sync::Arc;

/// A shareable unary callback receiving a settled value.
///
/// Continuations are plain `Fn` callbacks behind an `Arc`, so cloning one is a
/// reference-count bump and the same continuation can be handed to several
/// nested runners. Nothing here stops a computation from calling a
/// continuation more than once; callers that need exactly-once delivery must
/// latch on their own (see [`from_parallel`](crate::combinator::parallel::from_parallel)).
pub struct Continuation<V> {
    inner: Arc<dyn Fn(V) + Send + Sync>,
}

impl<V> Continuation<V> {
    /// Wraps a callback.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(V) + Send + Sync + 'static,
    {
        Self { inner: Arc::new(f) }
    }

    /// A continuation that drops whatever it receives.
    #[must_use]
    pub fn noop() -> Self
    where
        V: 'static,
    {
        Self::new(|_| {})
    }

    /// Invokes the callback with `value`.
    #[inline]
    pub fn call(&self, value: V) {
        (self.inner)(value);
    }
}

impl<V> Clone for Continuation<V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<V> fmt::Debug for Continuation<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Continuation").finish_non_exhaustive()
    }
}
