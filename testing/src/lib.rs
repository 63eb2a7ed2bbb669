//! # Dex Pager Testing
//!
//! Testing utilities and helpers for the Dex Pager reducer architecture.
//!
//! This crate provides:
//! - Deterministic implementations of Environment traits
//! - A Given-When-Then harness for reducers
//! - Assertion helpers for effects
//! - Log capture for tests
//!
//! ## Example
//!
//! ```ignore
//! use dexpager_testing::{ReducerTest, SequenceRandom};
//!
//! ReducerTest::new(PagerReducer::new())
//!     .with_env(test_environment(SequenceRandom::new([7])))
//!     .given_state(PagerState::default())
//!     .when_action(PagerAction::JumpRandom)
//!     .then_state(|s| assert_eq!(s.current_index.get(), 7))
//!     .run();
//! ```

use dexpager_core::environment::RandomSource;

/// Given-When-Then reducer harness
pub mod reducer_test;

/// Mock implementations of Environment traits
pub mod mocks {
    use super::RandomSource;
    use std::collections::VecDeque;
    use std::sync::{Mutex, PoisonError};

    /// Random source that always returns the same value
    ///
    /// The value is clamped into the requested range.
    ///
    /// # Example
    ///
    /// ```
    /// use dexpager_testing::mocks::FixedRandom;
    /// use dexpager_core::environment::RandomSource;
    ///
    /// let rng = FixedRandom::new(42);
    /// assert_eq!(rng.next_in_range(1, 100), 42);
    /// assert_eq!(rng.next_in_range(1, 10), 10);
    /// ```
    #[derive(Debug, Clone, Copy)]
    pub struct FixedRandom {
        value: u32,
    }

    impl FixedRandom {
        /// Create a new fixed random source
        #[must_use]
        pub const fn new(value: u32) -> Self {
            Self { value }
        }
    }

    impl RandomSource for FixedRandom {
        fn next_in_range(&self, low: u32, high: u32) -> u32 {
            self.value.clamp(low, high)
        }
    }

    /// Random source that replays a scripted sequence, then repeats the last value
    ///
    /// Each value is clamped into the requested range. An empty script yields `low`.
    #[derive(Debug)]
    pub struct SequenceRandom {
        values: Mutex<VecDeque<u32>>,
        last: Mutex<Option<u32>>,
    }

    impl SequenceRandom {
        /// Create a random source from the values to return, in order
        #[must_use]
        pub fn new(values: impl IntoIterator<Item = u32>) -> Self {
            Self {
                values: Mutex::new(values.into_iter().collect()),
                last: Mutex::new(None),
            }
        }
    }

    impl RandomSource for SequenceRandom {
        fn next_in_range(&self, low: u32, high: u32) -> u32 {
            let next = self
                .values
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .pop_front();
            let mut last = self.last.lock().unwrap_or_else(PoisonError::into_inner);
            if next.is_some() {
                *last = next;
            }
            last.map_or(low, |value| value.clamp(low, high))
        }
    }
}

/// Test helpers and utilities
pub mod helpers {
    /// Install a `tracing` subscriber that writes through the test harness
    ///
    /// Safe to call from every test; only the first call installs.
    /// Honors `RUST_LOG`, defaulting to `debug`.
    pub fn init_test_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "debug".into()),
            )
            .with_test_writer()
            .try_init();
    }
}

// Re-export commonly used items
pub use helpers::init_test_tracing;
pub use mocks::{FixedRandom, SequenceRandom};
pub use reducer_test::{ReducerTest, assertions};
