use std::fmt;
use std::sync::{Mutex, PoisonError};

/// A cache that can be registered for scope-level resets.
///
/// Implemented by [`Memo`](crate::Memo); engine-backed caches can implement
/// it themselves and call [`register`].
pub trait ResettableCache: Send + Sync {
    /// The scope this cache belongs to (a rule name, or the name of the
    /// registry that owns the rule's module-level caches).
    fn scope(&self) -> &'static str;

    /// A name identifying this cache within its scope.
    fn name(&self) -> &'static str;

    /// Drop all cached entries, returning how many were dropped.
    fn clear(&self) -> usize;
}

static REGISTRY: Mutex<Vec<&'static dyn ResettableCache>> = Mutex::new(Vec::new());

fn registered() -> std::sync::MutexGuard<'static, Vec<&'static dyn ResettableCache>> {
    REGISTRY.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Register a cache for the lifetime of the process.
///
/// [`Memo`](crate::Memo) calls this on first use; callers only need it for
/// hand-rolled [`ResettableCache`] implementations.
pub fn register(cache: &'static dyn ResettableCache) {
    registered().push(cache);
}

/// Clear every registered cache under `scope`. Returns the total number of
/// entries dropped.
pub fn clear_scope(scope: &str) -> usize {
    registered()
        .iter()
        .filter(|cache| cache.scope() == scope)
        .map(|cache| cache.clear())
        .sum()
}

/// Clear every registered cache in the process. Returns the total number of
/// entries dropped.
pub fn clear_all() -> usize {
    registered().iter().map(|cache| cache.clear()).sum()
}

/// Handles onto every registered cache.
pub fn handles() -> Vec<ClearHandle> {
    registered().iter().map(|&cache| ClearHandle { cache }).collect()
}

/// Handles onto every registered cache under `scope`.
pub fn scope_handles(scope: &str) -> Vec<ClearHandle> {
    registered()
        .iter()
        .filter(|cache| cache.scope() == scope)
        .map(|&cache| ClearHandle { cache })
        .collect()
}

/// A reference to one registered cache's reset operation.
///
/// Handles borrow `'static` registrants, so invoking one can never fail.
#[derive(Clone, Copy)]
pub struct ClearHandle {
    cache: &'static dyn ResettableCache,
}

impl ClearHandle {
    pub fn scope(&self) -> &'static str {
        self.cache.scope()
    }

    pub fn name(&self) -> &'static str {
        self.cache.name()
    }

    /// Drop the cache's entries, returning how many were dropped.
    pub fn clear(&self) -> usize {
        self.cache.clear()
    }
}

impl fmt::Debug for ClearHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClearHandle({}::{})", self.scope(), self.name())
    }
}
