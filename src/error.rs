//! Error types for cbit.
//!
//! The combinator algebra has no error path of its own: a computation reports
//! failure by settling on the rejected channel, with whatever payload its
//! author chose. The only errors in this crate come from observing a
//! computation from synchronous code, in [`settle`](crate::settle).

use std::time::Duration;

/// Why a computation could not be observed as settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SettleError {
    /// The computation had not settled by the time `fork` returned.
    #[error("computation did not settle synchronously")]
    Pending,
    /// The computation had not settled before the wait timed out.
    #[error("computation did not settle within {timeout:?}")]
    TimedOut {
        /// How long the caller waited.
        timeout: Duration,
    },
}

/// A specialized Result type for settle operations.
pub type Result<T> = core::result::Result<T, SettleError>;
