//! Core value types shared by every computation.
//!
//! - [`outcome`]: Two-channel settled outcome (`Rejected` / `Resolved`)
//! - [`continuation`]: Shareable unary callbacks carrying a settled value

pub mod continuation;
pub mod outcome;

pub use continuation::Continuation;
pub use outcome::Outcome;
