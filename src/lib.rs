//! cbit: deferred two-channel computations with a closed combinator algebra.
//!
//! # Overview
//!
//! A [`Cbit`] ("computational bit") is a computation that has not run yet.
//! When started, it settles on exactly one of two channels: *rejected* or
//! *resolved*. Combinators build new computations out of existing ones by
//! wiring callbacks together; nothing executes until a consumer starts the
//! outermost computation.
//!
//! The crate is agnostic to how a computation produces its outcome. A runner
//! may settle synchronously, from a timer callback, or from another thread.
//!
//! # Core Guarantees
//!
//! - **Inert until started**: constructors and combinators never run anything
//! - **Re-entrant**: starting a computation twice runs its work twice
//! - **Channel-preserving maps**: `map`/`rejected_map`/`bimap` never change
//!   which channel the outcome lands on
//! - **Flattening chains**: `chain`/`rejected_chain`/`bichain` hand the outer
//!   continuations to the next computation, which decides the channel
//! - **Latched aggregation**: [`from_parallel`] settles exactly once per run,
//!   even when inputs settle concurrently or misbehave
//!
//! # Module Structure
//!
//! - [`cbit`](mod@cbit): The deferred computation and its unary combinators
//! - [`combinator`]: Aggregating combinators ([`from_parallel`])
//! - [`types`]: [`Outcome`] and [`Continuation`]
//! - [`settle`]: Observing an outcome from synchronous code
//! - [`error`]: Error types for the settle helpers
//! - [`tracing_compat`]: Logging facade over the optional `tracing` integration

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::doc_markdown)]

pub mod cbit;
pub mod combinator;
pub mod error;
pub mod settle;
pub mod tracing_compat;
pub mod types;

pub use crate::cbit::Cbit;
pub use combinator::parallel::from_parallel;
pub use error::{Result, SettleError};
pub use settle::{settle_now, wait_timeout};
pub use types::{Continuation, Outcome};
