//! # Kiosk Core
//!
//! Core traits and types for the ordering kiosk.
//!
//! Every piece of session behaviour is written as a reducer over plain data:
//!
//! - **State**: the domain data owned by a feature (selection, cart)
//! - **Action**: every input to a reducer, both commands and the events they produce
//! - **Reducer**: `(State, Action, Environment) → (State, Effects)`
//! - **Effect**: a description of side-effecting work, executed by the runtime
//! - **Environment**: injected dependencies (catalog, clock, order submitter)
//!
//! Reducers never perform I/O. Anything that leaves the process (the checkout
//! handoff) is returned as an [`effect::Effect`] and run by the Store in
//! `kiosk-runtime`.
//!
//! ## Example
//!
//! ```
//! use kiosk_core::{SmallVec, effect::Effect, reducer::Reducer, smallvec};
//!
//! #[derive(Clone, Debug, Default)]
//! struct TallyState {
//!     taps: u32,
//! }
//!
//! #[derive(Clone, Debug)]
//! enum TallyAction {
//!     Tap,
//! }
//!
//! struct TallyReducer;
//!
//! impl Reducer for TallyReducer {
//!     type State = TallyState;
//!     type Action = TallyAction;
//!     type Environment = ();
//!
//!     fn reduce(
//!         &self,
//!         state: &mut TallyState,
//!         action: TallyAction,
//!         _env: &(),
//!     ) -> SmallVec<[Effect<TallyAction>; 4]> {
//!         match action {
//!             TallyAction::Tap => state.taps += 1,
//!         }
//!         smallvec![Effect::None]
//!     }
//! }
//!
//! let mut state = TallyState::default();
//! let effects = TallyReducer.reduce(&mut state, TallyAction::Tap, &());
//! assert_eq!(state.taps, 1);
//! assert_eq!(effects.len(), 1);
//! ```

// Re-export commonly used types
pub use chrono::{DateTime, Utc};
pub use smallvec::{SmallVec, smallvec};

/// Reducer module - the core trait for business logic
///
/// Reducers are pure functions: `(State, Action, Environment) → (State, Effects)`.
/// They hold all of the session rules and are deterministic and testable
/// without a runtime.
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
        /// Implementations:
        /// 1. Validate the action against the current state
        /// 2. Update state in place
        /// 3. Return descriptions of any work the runtime must perform
        ///
        /// Most actions produce no effects, so the return value is stored
        /// inline for up to four effects.
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]>;
    }
}

/// Effect module - side effect descriptions
///
/// Effects are values, not execution. A reducer returns them and the Store
/// decides when and where to run them.
pub mod effect {
    use futures::future::BoxFuture;
    use std::future::Future;

    /// Effect type - describes a side effect to be executed
    ///
    /// # Type Parameters
    ///
    /// - `Action`: The action type an effect can feed back into the reducer
    pub enum Effect<Action> {
        /// No-op effect
        None,

        /// Arbitrary async computation
        ///
        /// Resolves to `Option<Action>`: if `Some`, the action is fed back
        /// into the reducer by the runtime.
        Future(BoxFuture<'static, Option<Action>>),
    }

    // Futures are opaque, so Debug is written by hand
    impl<Action> std::fmt::Debug for Effect<Action> {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            match self {
                Effect::None => write!(f, "Effect::None"),
                Effect::Future(_) => write!(f, "Effect::Future(<future>)"),
            }
        }
    }

    impl<Action> Effect<Action> {
        /// Wrap an async computation as an effect
        ///
        /// ```
        /// use kiosk_core::effect::Effect;
        ///
        /// let effect: Effect<u8> = Effect::future(async { Some(7) });
        /// assert!(!effect.is_none());
        /// ```
        #[must_use]
        pub fn future<F>(fut: F) -> Self
        where
            F: Future<Output = Option<Action>> + Send + 'static,
        {
            Effect::Future(Box::pin(fut))
        }

        /// Returns `true` if this effect does nothing
        #[must_use]
        pub const fn is_none(&self) -> bool {
            matches!(self, Effect::None)
        }
    }
}

/// Environment module - dependency injection traits
///
/// External dependencies are abstracted behind traits and injected through
/// the reducer's Environment parameter, so tests can swap them for fixed
/// implementations.
pub mod environment {
    use chrono::{DateTime, Utc};

    /// Clock trait - abstracts time operations for testability
    pub trait Clock: Send + Sync {
        /// Get the current time
        fn now(&self) -> DateTime<Utc>;
    }

    /// Wall-clock time
    #[derive(Debug, Clone, Copy, Default)]
    pub struct SystemClock;

    impl Clock for SystemClock {
        fn now(&self) -> DateTime<Utc> {
            Utc::now()
        }
    }
}
