use std::hash::Hash;
use std::sync::{Mutex, OnceLock, PoisonError};

use rustc_hash::FxHashMap;

use crate::registry::{self, ResettableCache};

/// A keyed memoization wrapper usable as a `static`.
///
/// `Memo::new` is `const`, so rule modules declare their caches as statics:
///
/// ```text
/// static HEADERS: Memo<PathBuf, Header> = Memo::new("my_rules", "headers");
/// ```
///
/// The first use registers the memo in the process-wide registry under its
/// scope, which is what makes a scope-level reset catch it even when the
/// first touch happens mid-test.
pub struct Memo<K, V> {
    scope: &'static str,
    name: &'static str,
    state: OnceLock<Mutex<FxHashMap<K, V>>>,
}

impl<K, V> Memo<K, V>
where
    K: Eq + Hash + Clone + Send + 'static,
    V: Clone + Send + 'static,
{
    pub const fn new(scope: &'static str, name: &'static str) -> Self {
        Self {
            scope,
            name,
            state: OnceLock::new(),
        }
    }

    pub const fn scope(&self) -> &'static str {
        self.scope
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Return the cached value for `key`, computing and storing it with
    /// `compute` on a miss.
    pub fn get_or_insert_with(&'static self, key: K, compute: impl FnOnce() -> V) -> V {
        let mut map = lock(self.map());
        if let Some(value) = map.get(&key) {
            return value.clone();
        }
        let value = compute();
        map.insert(key, value.clone());
        value
    }

    pub fn get(&'static self, key: &K) -> Option<V> {
        lock(self.map()).get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.state.get().map_or(0, |map| lock(map).len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop all entries, returning how many were dropped.
    pub fn clear(&self) -> usize {
        match self.state.get() {
            Some(map) => {
                let mut map = lock(map);
                let dropped = map.len();
                map.clear();
                dropped
            }
            None => 0,
        }
    }

    fn map(&'static self) -> &'static Mutex<FxHashMap<K, V>> {
        self.state.get_or_init(|| {
            registry::register(self);
            Mutex::new(FxHashMap::default())
        })
    }
}

fn lock<K, V>(map: &Mutex<FxHashMap<K, V>>) -> std::sync::MutexGuard<'_, FxHashMap<K, V>> {
    map.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<K, V> ResettableCache for Memo<K, V>
where
    K: Eq + Hash + Clone + Send + 'static,
    V: Clone + Send + 'static,
{
    fn scope(&self) -> &'static str {
        self.scope
    }

    fn name(&self) -> &'static str {
        self.name
    }

    fn clear(&self) -> usize {
        Memo::clear(self)
    }
}
