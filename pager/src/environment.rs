//! Injected dependencies for the pager reducer

use crate::error::FetchError;
use crate::types::{Creature, CreatureIndex};
use dexpager_core::environment::RandomSource;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Source of creature records
///
/// This trait uses explicit `Pin<Box<dyn Future>>` returns instead of
/// `async fn` so it can be used as a trait object.
pub trait CreatureClient: Send + Sync {
    /// Fetch the creature at `index`
    ///
    /// # Errors
    ///
    /// Returns a [`FetchError`] describing why the creature could not be loaded.
    fn fetch(
        &self,
        index: CreatureIndex,
    ) -> Pin<Box<dyn Future<Output = Result<Creature, FetchError>> + Send + '_>>;
}

/// Pager environment
#[derive(Clone)]
pub struct PagerEnvironment {
    /// Creature source used by the load effect
    pub client: Arc<dyn CreatureClient>,
    /// Randomness for `JumpRandom`
    pub random: Arc<dyn RandomSource>,
}

impl PagerEnvironment {
    /// Create a new pager environment
    #[must_use]
    pub fn new(client: Arc<dyn CreatureClient>, random: Arc<dyn RandomSource>) -> Self {
        Self { client, random }
    }
}

impl std::fmt::Debug for PagerEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PagerEnvironment").finish_non_exhaustive()
    }
}
