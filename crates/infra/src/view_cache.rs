//! Rendered-view cache keyed by route path.
//!
//! Listing pages are rendered once and served from here until a mutation
//! revalidates their path. The next read after a revalidation recomputes the
//! view from the database.

use std::collections::HashMap;

use tokio::sync::RwLock;

/// How many times a path had been revalidated when a view was looked up.
///
/// A view rendered after a miss may only be stored under the generation the
/// miss reported; a revalidation in between makes it stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

/// Result of a cache read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheLookup<V> {
    Hit(V),
    Miss(Generation),
}

/// Path-keyed cache of rendered views.
#[async_trait::async_trait]
pub trait ViewCache<V>: Send + Sync
where
    V: Clone + Send + Sync + 'static,
{
    async fn get(&self, path: &str) -> CacheLookup<V>;

    /// Store a view rendered after a miss at `generation`.
    ///
    /// Returns `false` and keeps the path empty when it was revalidated
    /// after that miss.
    async fn store(&self, path: &str, generation: Generation, view: V) -> bool;

    /// Mark the view at `path` stale; the next `get` misses.
    async fn revalidate_path(&self, path: &str);
}

#[async_trait::async_trait]
impl<V, S> ViewCache<V> for std::sync::Arc<S>
where
    V: Clone + Send + Sync + 'static,
    S: ViewCache<V> + ?Sized,
{
    async fn get(&self, path: &str) -> CacheLookup<V> {
        (**self).get(path).await
    }

    async fn store(&self, path: &str, generation: Generation, view: V) -> bool {
        (**self).store(path, generation, view).await
    }

    async fn revalidate_path(&self, path: &str) {
        (**self).revalidate_path(path).await
    }
}

#[derive(Debug)]
struct Entry<V> {
    view: Option<V>,
    revalidations: u64,
}

impl<V> Default for Entry<V> {
    fn default() -> Self {
        Self {
            view: None,
            revalidations: 0,
        }
    }
}

/// In-process view cache.
#[derive(Debug)]
pub struct InMemoryViewCache<V> {
    entries: RwLock<HashMap<String, Entry<V>>>,
}

impl<V> InMemoryViewCache<V> {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// How many times `path` has been revalidated.
    pub async fn revalidations(&self, path: &str) -> u64 {
        self.entries
            .read()
            .await
            .get(path)
            .map(|e| e.revalidations)
            .unwrap_or(0)
    }
}

impl<V> Default for InMemoryViewCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl<V> ViewCache<V> for InMemoryViewCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    async fn get(&self, path: &str) -> CacheLookup<V> {
        match self.entries.read().await.get(path) {
            Some(Entry {
                view: Some(view), ..
            }) => CacheLookup::Hit(view.clone()),
            Some(entry) => CacheLookup::Miss(Generation(entry.revalidations)),
            None => CacheLookup::Miss(Generation(0)),
        }
    }

    async fn store(&self, path: &str, generation: Generation, view: V) -> bool {
        let mut entries = self.entries.write().await;
        let entry = entries.entry(path.to_string()).or_default();
        if entry.revalidations != generation.0 {
            tracing::debug!(path, "discarding view rendered before a revalidation");
            return false;
        }
        entry.view = Some(view);
        true
    }

    async fn revalidate_path(&self, path: &str) {
        let mut entries = self.entries.write().await;
        let entry = entries.entry(path.to_string()).or_default();
        entry.view = None;
        entry.revalidations += 1;
        tracing::debug!(path, revalidations = entry.revalidations, "view revalidated");
    }
}
