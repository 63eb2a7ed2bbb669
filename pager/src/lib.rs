//! # Dex Pager
//!
//! A swipeable pager of creature cards backed by the public PokeAPI.
//!
//! The pager keeps one card index in `[1, 1025]`, moves it with
//! `Increment`, `Decrement`, and `JumpRandom`, and loads the creature at the
//! new index through a cancellable effect. A load that finishes after the
//! pager has moved on never overwrites the card.
//!
//! ## Architecture
//!
//! - [`types`]: index, state, and actions
//! - [`reducer`]: the transition function and its load effect
//! - [`environment`]: the creature client and randomness injected into the reducer
//! - [`client`]: the PokeAPI implementation of [`CreatureClient`]
//! - [`config`]: environment-variable configuration
//! - [`command`]: line commands for the terminal front end
//!
//! ## Example
//!
//! ```no_run
//! use dexpager::{PagerAction, PagerEnvironment, PagerReducer, PagerState, PokeApiClient};
//! use dexpager::config::ApiConfig;
//! use dexpager_core::environment::ThreadRandom;
//! use dexpager_runtime::Store;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = PokeApiClient::from_config(&ApiConfig::default())?;
//! let env = PagerEnvironment::new(Arc::new(client), Arc::new(ThreadRandom));
//! let store = Store::new(PagerState::default(), PagerReducer::new(), env);
//!
//! store.send(PagerAction::AppStarted).await?;
//! store.send(PagerAction::Increment).await?;
//! let index = store.state(|s| s.current_index).await;
//! assert_eq!(index.get(), 26);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod command;
pub mod config;
pub mod environment;
pub mod error;
pub mod reducer;
pub mod types;

pub use client::PokeApiClient;
pub use command::Command;
pub use config::Config;
pub use environment::{CreatureClient, PagerEnvironment};
pub use error::FetchError;
pub use reducer::{LOAD_EFFECT, PagerReducer};
pub use types::{Creature, CreatureIndex, FetchErrorKind, NOT_FOUND_LABEL, PagerAction, PagerState};
