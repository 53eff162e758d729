// ABOUTME: Per-resource-type, per-token cache keyed by entity identifier
// ABOUTME: Stores the most recently seen snapshot; no TTL, eviction, or capacity bound
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use dashmap::DashMap;

use crate::models::Resource;

/// Request-coalescing cache for one logical session.
///
/// Maps entity identifier to the most recently seen snapshot of that entity.
/// `DashMap` gives sharded locking, so concurrent `put`/`get` from any task
/// are safe without a global lock; operations are in-memory and never block
/// on I/O.
///
/// Overwrites are unconditional: a `Detailed` snapshot may be replaced by a
/// later `Summary` one, because the cache stores "most recently seen", not
/// "most complete seen". Completeness decisions belong to the service
/// facades, which treat a [`ResourceState::Meta`](crate::models::ResourceState)
/// entry as a miss.
///
/// Entries are never evicted; the whole cache is invalidated at once via
/// [`ResourceCache::remove_all`].
pub struct ResourceCache<R: Resource> {
    entries: DashMap<R::Id, R>,
}

impl<R: Resource> std::fmt::Debug for ResourceCache<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceCache")
            .field("entries", &self.entries.len())
            .finish()
    }
}

impl<R: Resource> Default for ResourceCache<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Resource> ResourceCache<R> {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Return the cached snapshot for `id`, if any.
    ///
    /// A META-level snapshot is returned like any other; whether it
    /// satisfies the caller's request is the facade's decision.
    #[must_use]
    pub fn get(&self, id: &R::Id) -> Option<R> {
        self.entries.get(id).map(|entry| entry.value().clone())
    }

    /// Insert or unconditionally overwrite the snapshot for its identifier.
    pub fn put(&self, entity: R) {
        self.entries.insert(entity.id(), entity);
    }

    /// Apply [`ResourceCache::put`] to each member of an ordered sequence.
    pub fn put_all(&self, entities: &[R]) {
        for entity in entities {
            self.put(entity.clone());
        }
    }

    /// Clear every entry; whole-resource-type invalidation.
    pub fn remove_all(&self) {
        self.entries.clear();
    }

    /// Number of cached entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
