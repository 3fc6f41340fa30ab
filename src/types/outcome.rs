//! Two-channel outcome type.
//!
//! Every deferred computation settles on exactly one of two channels:
//!
//! - `Rejected(E)`: the computation reported a rejection value
//! - `Resolved(T)`: the computation reported a resolution value
//!
//! Neither payload is constrained. A rejection is not required to be an
//! error object; it is just the value that travels on the rejected channel.
//!
//! The two channels are symmetric apart from their names: every
//! transformation on the resolved side has a rejected-side mirror.

use super::continuation::Continuation;

/// The settled outcome of a deferred computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome<E, T> {
    /// The computation rejected with a value.
    Rejected(E),
    /// The computation resolved with a value.
    Resolved(T),
}

impl<E, T> Outcome<E, T> {
    /// Returns true if this outcome is `Rejected`.
    #[must_use]
    pub const fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }

    /// Returns true if this outcome is `Resolved`.
    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }

    /// Returns the rejected value, if any.
    #[must_use]
    pub fn rejected(self) -> Option<E> {
        match self {
            Self::Rejected(e) => Some(e),
            Self::Resolved(_) => None,
        }
    }

    /// Returns the resolved value, if any.
    #[must_use]
    pub fn resolved(self) -> Option<T> {
        match self {
            Self::Rejected(_) => None,
            Self::Resolved(v) => Some(v),
        }
    }

    /// Borrows the payloads of this outcome.
    #[must_use]
    pub const fn as_ref(&self) -> Outcome<&E, &T> {
        match self {
            Self::Rejected(e) => Outcome::Rejected(e),
            Self::Resolved(v) => Outcome::Resolved(v),
        }
    }

    /// Short channel name, used in log fields.
    #[must_use]
    pub const fn channel(&self) -> &'static str {
        match self {
            Self::Rejected(_) => "rejected",
            Self::Resolved(_) => "resolved",
        }
    }

    /// Maps the resolved value, leaving a rejection untouched.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Outcome<E, U> {
        match self {
            Self::Rejected(e) => Outcome::Rejected(e),
            Self::Resolved(v) => Outcome::Resolved(f(v)),
        }
    }

    /// Maps the rejected value, leaving a resolution untouched.
    pub fn map_rejected<F2, G: FnOnce(E) -> F2>(self, g: G) -> Outcome<F2, T> {
        match self {
            Self::Rejected(e) => Outcome::Rejected(g(e)),
            Self::Resolved(v) => Outcome::Resolved(v),
        }
    }

    /// Maps whichever channel this outcome is on.
    pub fn bimap<F2, U, G, F>(self, g: G, f: F) -> Outcome<F2, U>
    where
        G: FnOnce(E) -> F2,
        F: FnOnce(T) -> U,
    {
        match self {
            Self::Rejected(e) => Outcome::Rejected(g(e)),
            Self::Resolved(v) => Outcome::Resolved(f(v)),
        }
    }

    /// Converts into a standard `Result`, with the rejected channel as `Err`.
    pub fn into_result(self) -> Result<T, E> {
        match self {
            Self::Rejected(e) => Err(e),
            Self::Resolved(v) => Ok(v),
        }
    }

    /// Fires the continuation matching this outcome's channel.
    ///
    /// Exactly one of the two continuations is called, exactly once.
    pub fn dispatch(self, reject: &Continuation<E>, resolve: &Continuation<T>) {
        match self {
            Self::Rejected(e) => reject.call(e),
            Self::Resolved(v) => resolve.call(v),
        }
    }
}

impl<E, T> From<Result<T, E>> for Outcome<E, T> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(v) => Self::Resolved(v),
            Err(e) => Self::Rejected(e),
        }
    }
}
