#![allow(dead_code)]
#![allow(unused_imports)]
//! Shared integration test utilities.
//!
//! Import with:
//! ```
//! mod common;
//! use common::*;
//! ```

use cbit::{Cbit, Continuation, Outcome};
use parking_lot::Mutex;
use proptest::prelude::ProptestConfig;
use proptest::test_runner::RngSeed;
use std::sync::{Arc, Once};

static INIT_LOGGING: Once = Once::new();

/// Default seed for property tests when running under CI.
pub const DEFAULT_PROPTEST_SEED: u64 = 0x5EED_5EED;

const PROPTEST_SEED_ENV: &str = "CBIT_PROPTEST_SEED";
const PROPTEST_MAX_SHRINK_ITERS_ENV: &str = "CBIT_PROPTEST_MAX_SHRINK_ITERS";
const TEST_LOG_LEVEL_ENV: &str = "TEST_LOG_LEVEL";

/// Configuration for property tests with optional deterministic seed support.
#[derive(Debug, Clone)]
pub struct PropertyTestConfig {
    /// Fixed seed for reproducibility (overrides CI default when set).
    pub seed: Option<u64>,
    /// Number of successful cases required.
    pub cases: u32,
    /// Maximum shrink iterations.
    pub max_shrink_iters: u32,
}

impl PropertyTestConfig {
    /// Build a config with defaults for property tests.
    #[must_use]
    pub fn new(cases: u32) -> Self {
        Self {
            seed: read_proptest_seed(),
            cases,
            max_shrink_iters: read_max_shrink_iters()
                .unwrap_or(ProptestConfig::default().max_shrink_iters),
        }
    }

    /// Convert into a ProptestConfig, applying deterministic seed rules.
    #[must_use]
    pub fn to_proptest_config(&self) -> ProptestConfig {
        let mut config = ProptestConfig::with_cases(self.cases);

        // Honor existing PROPTEST_RNG_SEED, otherwise apply our own.
        if matches!(config.rng_seed, RngSeed::Random) {
            if let Some(seed) = self.seed {
                config.rng_seed = RngSeed::Fixed(seed);
            }
        }

        config.max_shrink_iters = self.max_shrink_iters;
        config
    }
}

/// Build a ProptestConfig with deterministic seed support for CI.
#[must_use]
pub fn test_proptest_config(cases: u32) -> ProptestConfig {
    PropertyTestConfig::new(cases).to_proptest_config()
}

fn read_proptest_seed() -> Option<u64> {
    if let Ok(value) = std::env::var(PROPTEST_SEED_ENV) {
        return value.parse::<u64>().ok();
    }

    // If CI is set and no explicit seed is provided, use a fixed seed.
    if std::env::var("CI").is_ok() {
        return Some(DEFAULT_PROPTEST_SEED);
    }

    None
}

fn read_max_shrink_iters() -> Option<u32> {
    std::env::var(PROPTEST_MAX_SHRINK_ITERS_ENV)
        .ok()
        .and_then(|value| value.parse::<u32>().ok())
}

fn read_log_level() -> tracing::Level {
    std::env::var(TEST_LOG_LEVEL_ENV)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(tracing::Level::INFO)
}

/// Initialize test logging at the level named by `TEST_LOG_LEVEL` (default INFO).
pub fn init_test_logging() {
    init_test_logging_with_level(read_log_level());
}

/// Initialize test logging with a custom level.
pub fn init_test_logging_with_level(level: tracing::Level) {
    INIT_LOGGING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(level)
            .with_test_writer()
            .with_file(true)
            .with_line_number(true)
            .with_target(true)
            .with_thread_ids(true)
            .with_ansi(false)
            .try_init();
    });
}

/// Log a test phase transition with a visual separator.
#[macro_export]
macro_rules! test_phase {
    ($name:expr) => {
        tracing::info!(phase = %$name, "========================================");
        tracing::info!(phase = %$name, "TEST PHASE: {}", $name);
        tracing::info!(phase = %$name, "========================================");
    };
}

/// Log test completion with summary.
#[macro_export]
macro_rules! test_complete {
    ($name:expr) => {
        tracing::info!(test = %$name, "test completed successfully: {}", $name);
    };
}

/// Every outcome delivered by every run started through [`Observed::start`].
pub struct Observed<E, T> {
    events: Arc<Mutex<Vec<Outcome<E, T>>>>,
}

impl<E: Clone + Send + 'static, T: Clone + Send + 'static> Observed<E, T> {
    /// Starts `cbit` and records everything it fires.
    pub fn start(cbit: &Cbit<E, T>) -> Self {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);
        cbit.fork_outcome(move |outcome| sink.lock().push(outcome));
        Self { events }
    }

    /// Snapshot of the firings so far.
    pub fn events(&self) -> Vec<Outcome<E, T>> {
        self.events.lock().clone()
    }
}

/// A computation whose runs park until the test settles them.
pub struct Gate<E, T> {
    parked: Arc<Mutex<Vec<(Continuation<E>, Continuation<T>)>>>,
}

impl<E: Clone + Send + 'static, T: Clone + Send + 'static> Gate<E, T> {
    /// Creates a gate with no parked runs.
    pub fn new() -> Self {
        Self {
            parked: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A computation whose runs park on this gate.
    pub fn cbit(&self) -> Cbit<E, T> {
        let parked = Arc::clone(&self.parked);
        Cbit::new(move |reject, resolve| parked.lock().push((reject, resolve)))
    }

    /// Number of runs started so far.
    pub fn runs(&self) -> usize {
        self.parked.lock().len()
    }

    /// Settles every parked run with `outcome`.
    pub fn settle(&self, outcome: Outcome<E, T>) {
        let parked = self.parked.lock().clone();
        for (reject, resolve) in parked {
            outcome.clone().dispatch(&reject, &resolve);
        }
    }
}
