//! Pager reducer: navigation, loading, and the creature load effect

use crate::environment::{CreatureClient, PagerEnvironment};
use crate::types::{CreatureIndex, PagerAction, PagerState};
use dexpager_core::effect::{Effect, EffectId};
use dexpager_core::reducer::Reducer;
use dexpager_core::{SmallVec, smallvec};
use dexpager_runtime::metrics::FetchMetrics;
use std::sync::Arc;
use std::time::Instant;

/// Cancellation id shared by every creature load
///
/// Starting a load aborts the one still in flight, so at most one fetch runs
/// at a time.
pub const LOAD_EFFECT: EffectId = EffectId::new("load-creature");

/// Pager reducer
///
/// | Action | State change | Effect |
/// |---|---|---|
/// | `Increment` | index + 1, clamped at 1025; clear card | `LoadRequested` |
/// | `Decrement` | index - 1, clamped at 1; clear card | `LoadRequested` |
/// | `JumpRandom` | uniform index in range; clear card | `LoadRequested` |
/// | `AppStarted` | clear card | `LoadRequested` |
/// | `LoadRequested` | clear name, image, error | cancellable fetch |
/// | `LoadCompleted` | apply outcome if still current | none |
///
/// Every arm that starts a load clears the card in the same dispatch that
/// moves the index, so the state never pairs an index with another
/// creature's name or sprite.
#[derive(Debug, Clone, Copy, Default)]
pub struct PagerReducer;

impl PagerReducer {
    /// Create a new pager reducer
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Reducer for PagerReducer {
    type State = PagerState;
    type Action = PagerAction;
    type Environment = PagerEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            PagerAction::Increment => {
                state.current_index = state.current_index.next();
                state.begin_loading();
                smallvec![Effect::send(PagerAction::LoadRequested)]
            },
            PagerAction::Decrement => {
                state.current_index = state.current_index.previous();
                state.begin_loading();
                smallvec![Effect::send(PagerAction::LoadRequested)]
            },
            PagerAction::JumpRandom => {
                let sampled = env
                    .random
                    .next_in_range(CreatureIndex::MIN.get(), CreatureIndex::MAX.get());
                state.current_index = CreatureIndex::clamped(sampled);
                state.begin_loading();
                smallvec![Effect::send(PagerAction::LoadRequested)]
            },
            PagerAction::AppStarted => {
                state.begin_loading();
                smallvec![Effect::send(PagerAction::LoadRequested)]
            },
            PagerAction::LoadRequested => {
                state.begin_loading();
                smallvec![load_creature(Arc::clone(&env.client), state.current_index)]
            },
            PagerAction::LoadCompleted { index, outcome } => {
                if index == state.current_index {
                    state.apply(outcome);
                } else {
                    tracing::debug!(
                        %index,
                        current = %state.current_index,
                        "Discarding stale creature load"
                    );
                }
                smallvec![Effect::None]
            },
        }
    }
}

/// Fetch the creature at `index` and report it as `LoadCompleted`
///
/// `index` is captured by value; the effect always reports the index it was
/// issued for.
fn load_creature(client: Arc<dyn CreatureClient>, index: CreatureIndex) -> Effect<PagerAction> {
    Effect::future(async move {
        let start = Instant::now();
        let outcome = match client.fetch(index).await {
            Ok(creature) => {
                FetchMetrics::record_success(start.elapsed());
                tracing::info!(%index, name = %creature.name, "Creature loaded");
                Ok(creature)
            },
            Err(error) => {
                let kind = error.kind();
                FetchMetrics::record_failure(kind.as_str(), start.elapsed());
                tracing::warn!(%index, %kind, %error, "Creature load failed");
                Err(kind)
            },
        };
        Some(PagerAction::LoadCompleted { index, outcome })
    })
    .cancellable(LOAD_EFFECT)
}
