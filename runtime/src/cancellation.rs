//! Registry of in-flight cancellable effects.
//!
//! Every `Effect::Cancellable` opens a new *generation* for its id. Tasks
//! spawned on behalf of that effect are registered under the generation, and
//! opening the next generation (or an explicit `Effect::Cancel`) aborts them.
//! A task spawned for a generation that has already been superseded is never
//! started.

use dexpager_core::effect::EffectId;
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::task::AbortHandle;

/// A cancellation id together with the generation a task belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct CancelScope {
    pub(crate) id: EffectId,
    generation: u64,
}

#[derive(Default)]
struct Generation {
    number: u64,
    tasks: HashMap<u64, AbortHandle>,
}

#[derive(Default)]
struct Inner {
    next_generation: u64,
    next_task: u64,
    scopes: HashMap<EffectId, Generation>,
}

/// Shared table of abortable tasks keyed by effect id
#[derive(Default)]
pub(crate) struct CancellationRegistry {
    inner: Mutex<Inner>,
}

impl CancellationRegistry {
    fn lock(&self) -> MutexGuard<'_, Inner> {
        // A panic while holding the lock leaves the table consistent
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Open a new generation for `id`, aborting everything from the previous one
    ///
    /// Returns the new scope and the number of tasks that were aborted.
    pub(crate) fn begin(&self, id: EffectId) -> (CancelScope, usize) {
        let (scope, superseded) = {
            let mut inner = self.lock();
            inner.next_generation += 1;
            let number = inner.next_generation;
            let previous = inner.scopes.insert(
                id,
                Generation {
                    number,
                    tasks: HashMap::new(),
                },
            );
            (
                CancelScope {
                    id,
                    generation: number,
                },
                previous.map(|generation| generation.tasks).unwrap_or_default(),
            )
        };

        (scope, abort_all(superseded))
    }

    /// Abort every task registered under `id` and retire its generation
    pub(crate) fn cancel(&self, id: EffectId) -> usize {
        let removed = self.lock().scopes.remove(&id);
        removed.map_or(0, |generation| abort_all(generation.tasks))
    }

    /// Number of live tasks registered under `id`
    pub(crate) fn in_flight(&self, id: EffectId) -> usize {
        self.lock()
            .scopes
            .get(&id)
            .map_or(0, |generation| generation.tasks.len())
    }

    /// Spawn `task` inside `scope`
    ///
    /// The task is dropped without running if `scope` is no longer the
    /// current generation for its id.
    pub(crate) fn spawn<F>(self: &Arc<Self>, scope: CancelScope, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let mut inner = self.lock();
        let current = inner
            .scopes
            .get(&scope.id)
            .is_some_and(|generation| generation.number == scope.generation);
        if !current {
            drop(inner);
            tracing::trace!(id = %scope.id, "Scope already superseded, effect dropped");
            return;
        }

        inner.next_task += 1;
        let task_id = inner.next_task;

        // Registration happens under the lock, so the deregistration guard
        // inside the task cannot run before the handle is recorded.
        let deregister = Deregister {
            registry: Arc::clone(self),
            scope,
            task_id,
        };
        let handle = tokio::spawn(async move {
            let _deregister = deregister;
            task.await;
        });
        if let Some(generation) = inner.scopes.get_mut(&scope.id) {
            generation.tasks.insert(task_id, handle.abort_handle());
        }
    }

    fn deregister(&self, scope: CancelScope, task_id: u64) {
        let mut inner = self.lock();
        if let Some(generation) = inner.scopes.get_mut(&scope.id) {
            if generation.number == scope.generation {
                generation.tasks.remove(&task_id);
            }
        }
    }
}

fn abort_all(tasks: HashMap<u64, AbortHandle>) -> usize {
    let count = tasks.len();
    for handle in tasks.into_values() {
        handle.abort();
    }
    count
}

/// Removes a finished (or aborted) task from the registry on drop
struct Deregister {
    registry: Arc<CancellationRegistry>,
    scope: CancelScope,
    task_id: u64,
}

impl Drop for Deregister {
    fn drop(&mut self) {
        self.registry.deregister(self.scope, self.task_id);
    }
}
