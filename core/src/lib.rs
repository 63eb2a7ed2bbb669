//! # Dex Pager Core
//!
//! Core traits and types for the Dex Pager reducer architecture.
//!
//! This crate provides the abstractions the pager feature is written against:
//! a pure reducer, effect descriptions it returns, and the environment traits
//! used to inject non-determinism.
//!
//! ## Core Concepts
//!
//! - **State**: Domain state for a feature
//! - **Action**: All possible inputs to a reducer (user intents and effect results)
//! - **Reducer**: Pure function `(State, Action, Environment) → (State, Effects)`
//! - **Effect**: Side effect descriptions (not execution), optionally cancellable
//! - **Environment**: Injected dependencies via traits
//!
//! ## Example
//!
//! ```ignore
//! use dexpager_core::*;
//!
//! impl Reducer for PagerReducer {
//!     type State = PagerState;
//!     type Action = PagerAction;
//!     type Environment = PagerEnvironment;
//!
//!     fn reduce(
//!         &self,
//!         state: &mut PagerState,
//!         action: PagerAction,
//!         env: &PagerEnvironment,
//!     ) -> SmallVec<[Effect<PagerAction>; 4]> {
//!         smallvec![Effect::None]
//!     }
//! }
//! ```

pub use smallvec::{SmallVec, smallvec};

/// Reducer module - The core trait for business logic
///
/// Reducers are pure functions: `(State, Action, Environment) → (State, Effects)`
///
/// They contain all business logic and are deterministic and testable.
pub mod reducer {
    use super::SmallVec;
    use super::effect::Effect;

    /// The Reducer trait - core abstraction for business logic
    ///
    /// # Type Parameters
    ///
    /// - `State`: The domain state this reducer operates on
    /// - `Action`: The action type this reducer processes
    /// - `Environment`: The injected dependencies this reducer needs
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The environment type with injected dependencies
        type Environment;

        /// Reduce an action into state changes and effects
        ///
        /// This is a pure function that:
        /// 1. Updates state in place
        /// 2. Returns effect descriptions to be executed
        ///
        /// # Arguments
        ///
        /// - `state`: Mutable reference to current state
        /// - `action`: The action to process
        /// - `env`: Reference to injected dependencies
        ///
        /// # Returns
        ///
        /// The effects to be executed by the runtime
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]>;
    }
}

/// Effect module - Side effect descriptions
///
/// Effects describe side effects to be performed by the runtime.
/// They are values (not execution) and are composable and cancellable.
pub mod effect {
    use std::fmt;
    use std::future::Future;
    use std::pin::Pin;
    use std::time::Duration;

    /// Identifier for a cancellable effect
    ///
    /// At most one effect per id is in flight at a time: the runtime aborts the
    /// previous effect registered under an id before starting a new one.
    ///
    /// # Example
    ///
    /// ```
    /// use dexpager_core::effect::EffectId;
    ///
    /// const LOAD: EffectId = EffectId::new("load");
    /// assert_eq!(LOAD.name(), "load");
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct EffectId(&'static str);

    impl EffectId {
        /// Create an effect id from a static name
        #[must_use]
        pub const fn new(name: &'static str) -> Self {
            Self(name)
        }

        /// The name this id was created with
        #[must_use]
        pub const fn name(&self) -> &'static str {
            self.0
        }
    }

    impl fmt::Display for EffectId {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.0)
        }
    }

    /// Effect type - describes a side effect to be executed
    ///
    /// Effects are NOT executed immediately. They are descriptions of what should happen,
    /// returned from reducers and executed by the Store runtime.
    ///
    /// # Type Parameters
    ///
    /// - `Action`: The action type that effects can produce (feedback loop)
    pub enum Effect<Action> {
        /// No-op effect
        None,

        /// Run effects in parallel
        Parallel(Vec<Effect<Action>>),

        /// Run effects sequentially
        Sequential(Vec<Effect<Action>>),

        /// Delayed action
        Delay {
            /// How long to wait
            duration: Duration,
            /// Action to dispatch after delay
            action: Box<Action>,
        },

        /// Arbitrary async computation
        ///
        /// Returns `Option<Action>` - if Some, the action is fed back into the reducer
        Future(Pin<Box<dyn Future<Output = Option<Action>> + Send>>),

        /// Effect that can be superseded or cancelled by id
        ///
        /// Starting a cancellable effect aborts any effect still running under
        /// the same id. An aborted effect feeds nothing back.
        Cancellable {
            /// Cancellation key
            id: EffectId,
            /// The wrapped effect
            effect: Box<Effect<Action>>,
        },

        /// Abort the in-flight effect registered under this id, if any
        Cancel(EffectId),
    }

    // Manual Debug implementation since Future doesn't implement Debug
    impl<Action> fmt::Debug for Effect<Action>
    where
        Action: fmt::Debug,
    {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                Effect::None => write!(f, "Effect::None"),
                Effect::Parallel(effects) => {
                    f.debug_tuple("Effect::Parallel").field(effects).finish()
                },
                Effect::Sequential(effects) => {
                    f.debug_tuple("Effect::Sequential").field(effects).finish()
                },
                Effect::Delay { duration, action } => f
                    .debug_struct("Effect::Delay")
                    .field("duration", duration)
                    .field("action", action)
                    .finish(),
                Effect::Future(_) => write!(f, "Effect::Future(<future>)"),
                Effect::Cancellable { id, effect } => f
                    .debug_struct("Effect::Cancellable")
                    .field("id", id)
                    .field("effect", effect)
                    .finish(),
                Effect::Cancel(id) => f.debug_tuple("Effect::Cancel").field(id).finish(),
            }
        }
    }

    impl<Action> Effect<Action> {
        /// Combine effects to run in parallel
        #[must_use]
        pub const fn merge(effects: Vec<Effect<Action>>) -> Effect<Action> {
            Effect::Parallel(effects)
        }

        /// Chain effects to run sequentially
        #[must_use]
        pub const fn chain(effects: Vec<Effect<Action>>) -> Effect<Action> {
            Effect::Sequential(effects)
        }

        /// Wrap an async computation
        #[must_use]
        pub fn future<F>(fut: F) -> Effect<Action>
        where
            F: Future<Output = Option<Action>> + Send + 'static,
        {
            Effect::Future(Box::pin(fut))
        }

        /// Feed an action straight back into the store
        ///
        /// The action is dispatched as a separate step after the current
        /// reducer call returns, never re-entrantly.
        #[must_use]
        pub fn send(action: Action) -> Effect<Action>
        where
            Action: Send + 'static,
        {
            Effect::future(async move { Some(action) })
        }

        /// Make this effect cancellable under `id`
        #[must_use]
        pub fn cancellable(self, id: EffectId) -> Effect<Action> {
            Effect::Cancellable {
                id,
                effect: Box::new(self),
            }
        }

        /// Whether this is the no-op effect
        #[must_use]
        pub const fn is_none(&self) -> bool {
            matches!(self, Effect::None)
        }

        /// The cancellation id, if this effect is cancellable
        #[must_use]
        pub const fn cancel_id(&self) -> Option<EffectId> {
            match self {
                Effect::Cancellable { id, .. } => Some(*id),
                _ => None,
            }
        }
    }
}

/// Environment module - Dependency injection traits
///
/// All sources of non-determinism are abstracted behind traits and injected
/// via the Environment parameter, so reducers stay pure.
pub mod environment {
    use rand::Rng;

    /// Random number source - abstracts randomness for testability
    ///
    /// # Examples
    ///
    /// ```ignore
    /// // Production - thread-local RNG
    /// let rng = ThreadRandom;
    ///
    /// // Test - scripted values for deterministic tests
    /// let rng = SequenceRandom::new([7, 1025]);
    /// ```
    pub trait RandomSource: Send + Sync {
        /// Sample uniformly from the inclusive range `[low, high]`
        ///
        /// Callers guarantee `low <= high`.
        fn next_in_range(&self, low: u32, high: u32) -> u32;
    }

    /// Production random source backed by `rand::thread_rng`
    #[derive(Debug, Clone, Copy, Default)]
    pub struct ThreadRandom;

    impl RandomSource for ThreadRandom {
        fn next_in_range(&self, low: u32, high: u32) -> u32 {
            rand::thread_rng().gen_range(low..=high)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::effect::{Effect, EffectId};
    use super::environment::{RandomSource, ThreadRandom};
    use proptest::prelude::*;

    const LOAD: EffectId = EffectId::new("load");

    #[test]
    fn test_cancellable_wraps_effect() {
        let effect: Effect<u8> = Effect::send(1).cancellable(LOAD);

        assert_eq!(effect.cancel_id(), Some(LOAD));
        assert!(matches!(
            effect,
            Effect::Cancellable { effect, .. } if matches!(*effect, Effect::Future(_))
        ));
    }

    #[test]
    fn test_debug_output() {
        let effect: Effect<u8> = Effect::Cancel(LOAD);
        assert_eq!(format!("{effect:?}"), "Effect::Cancel(EffectId(\"load\"))");

        let effect: Effect<u8> = Effect::merge(vec![Effect::None]);
        assert_eq!(format!("{effect:?}"), "Effect::Parallel([Effect::None])");
    }

    #[test]
    fn test_is_none() {
        assert!(Effect::<u8>::None.is_none());
        assert!(!Effect::<u8>::Cancel(LOAD).is_none());
        assert_eq!(Effect::<u8>::None.cancel_id(), None);
    }

    #[tokio::test]
    async fn test_send_resolves_to_action() {
        let Effect::Future(fut) = Effect::send(42_u8) else {
            unreachable!("Effect::send always builds a future");
        };
        assert_eq!(fut.await, Some(42));
    }

    proptest! {
        #[test]
        fn prop_thread_random_stays_in_range(low in 0u32..500, span in 0u32..1000) {
            let high = low + span;
            let value = ThreadRandom.next_in_range(low, high);
            prop_assert!((low..=high).contains(&value));
        }
    }
}
