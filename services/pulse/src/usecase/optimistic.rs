//! Optimistic state updates with compensation on failure.

use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::sync::{Arc, PoisonError, RwLock};

use uuid::Uuid;

/// State shown ahead of store confirmation. Entries live only while a write
/// is in flight; once settled the store is authoritative again.
pub trait OptimisticView {
    type Key: Clone;
    type Value;

    fn read(&self, key: &Self::Key) -> Option<Self::Value>;
    /// Show `value` for `key` and return the generation it was written at.
    fn begin(&self, key: Self::Key, value: Self::Value) -> u64;
    /// Drop the entry for `key` if it still belongs to `generation`.
    fn settle(&self, key: &Self::Key, generation: u64);
}

/// Show `next` in `view` while `commit` runs, then settle the entry whatever
/// the outcome. A later overlapping write for the same key keeps its entry.
pub async fn apply_optimistic<V, F, Fut, T, E>(
    view: &V,
    key: V::Key,
    next: V::Value,
    commit: F,
) -> Result<T, E>
where
    V: OptimisticView,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let generation = view.begin(key.clone(), next);
    let result = commit().await;
    view.settle(&key, generation);
    result
}

#[derive(Debug)]
struct Entries<K, V> {
    next_generation: u64,
    pending: HashMap<K, (u64, V)>,
}

/// In-memory map view; cheap to clone, clones share state.
#[derive(Debug)]
pub struct SharedView<K, V> {
    inner: Arc<RwLock<Entries<K, V>>>,
}

impl<K, V> SharedView<K, V> {
    pub fn len(&self) -> usize {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .pending
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<K, V> Clone for SharedView<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K, V> Default for SharedView<K, V> {
    fn default() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Entries {
                next_generation: 0,
                pending: HashMap::new(),
            })),
        }
    }
}

impl<K, V> OptimisticView for SharedView<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    type Key = K;
    type Value = V;

    fn read(&self, key: &K) -> Option<V> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .pending
            .get(key)
            .map(|(_, value)| value.clone())
    }

    fn begin(&self, key: K, value: V) -> u64 {
        let mut entries = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        entries.next_generation += 1;
        let generation = entries.next_generation;
        entries.pending.insert(key, (generation, value));
        generation
    }

    fn settle(&self, key: &K, generation: u64) {
        let mut entries = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        if entries
            .pending
            .get(key)
            .is_some_and(|(current, _)| *current == generation)
        {
            entries.pending.remove(key);
        }
    }
}

/// Completion state of tasks whose toggle has not settled yet.
pub type TaskStatusView = SharedView<Uuid, bool>;
