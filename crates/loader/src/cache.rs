use std::hash::Hash;
use std::num::NonZeroUsize;
use std::sync::Mutex;

/// Bounded LRU cache bound to a repository generation.
///
/// Every access names the generation it was computed against. The first
/// access with a newer generation drops all entries, so results computed
/// before a reload are never served after it. Writes carrying an older
/// generation than the cache's are discarded.
///
/// `get` reorders entries, so the inner cache sits behind a mutex.
pub struct GenerationCache<K: Hash + Eq, V: Clone> {
    inner: Option<Mutex<Inner<K, V>>>,
}

struct Inner<K: Hash + Eq, V> {
    generation: u64,
    entries: lru::LruCache<K, V>,
}

impl<K: Hash + Eq, V> Inner<K, V> {
    fn sync(&mut self, generation: u64) {
        if generation > self.generation {
            self.entries.clear();
            self.generation = generation;
        }
    }
}

impl<K: Hash + Eq, V: Clone> GenerationCache<K, V> {
    /// Create a cache holding at most `capacity` entries; zero disables caching
    pub fn new(capacity: usize) -> Self {
        let inner = NonZeroUsize::new(capacity).map(|cap| {
            Mutex::new(Inner {
                generation: 0,
                entries: lru::LruCache::new(cap),
            })
        });
        Self { inner }
    }

    /// Look up `key`, promoting it to most-recently-used
    pub fn get(&self, generation: u64, key: &K) -> Option<V> {
        let mut inner = self.inner.as_ref()?.lock().ok()?;
        inner.sync(generation);
        if inner.generation != generation {
            return None;
        }
        inner.entries.get(key).cloned()
    }

    /// Insert or replace `key`, evicting the least-recently-used entry past capacity
    pub fn insert(&self, generation: u64, key: K, value: V) {
        let Some(lock) = self.inner.as_ref() else {
            return;
        };
        let Ok(mut inner) = lock.lock() else {
            return;
        };
        inner.sync(generation);
        if inner.generation != generation {
            return;
        }
        inner.entries.put(key, value);
    }

    pub fn clear(&self) {
        if let Some(Ok(mut inner)) = self.inner.as_ref().map(Mutex::lock) {
            inner.entries.clear();
        }
    }

    pub fn len(&self) -> usize {
        self.inner
            .as_ref()
            .and_then(|lock| lock.lock().ok().map(|inner| inner.entries.len()))
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.inner
            .as_ref()
            .and_then(|lock| lock.lock().ok().map(|inner| inner.entries.cap().get()))
            .unwrap_or(0)
    }
}
