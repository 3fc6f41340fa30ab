//! Combinators that aggregate many computations into one.
//!
//! - [`parallel`]: Start every input, first rejection wins, otherwise resolve
//!   with all values in input order
//!
//! The unary combinators (`map`, `chain`, and their mirrors) live on
//! [`Cbit`](crate::Cbit) itself.

pub mod parallel;

pub use parallel::from_parallel;
