// ── Ordered entity cache ──
//
// Last-known server state for one entity kind, in comparator order,
// with push-based change notification via `watch` channels.

use std::cmp::Ordering;
use std::sync::{Arc, RwLock};

use indexmap::IndexMap;
use tokio::sync::watch;
use tracing::warn;

use crate::model::{Entity, EntityId};

/// Read-only view handed to consumers. Never mutated after it is built.
pub type Snapshot<T> = Arc<Vec<Arc<T>>>;

/// Total order used when the cache is replaced by a list refresh.
pub type SortOrder<T> = fn(&T, &T) -> Ordering;

/// An ordered, id-unique collection for a single entity type.
///
/// Only the owning data client mutates it. Every mutation bumps a
/// version counter and rebuilds the snapshot that subscribers receive.
pub struct EntityCache<T: Entity> {
    entries: RwLock<IndexMap<EntityId, Arc<T>>>,

    /// Version counter, bumped on every mutation.
    version: watch::Sender<u64>,

    /// Full snapshot, rebuilt on mutation for cheap subscription.
    snapshot: watch::Sender<Snapshot<T>>,
}

impl<T: Entity> EntityCache<T> {
    pub(crate) fn new() -> Self {
        let (version, _) = watch::channel(0u64);
        let (snapshot, _) = watch::channel(Arc::new(Vec::new()));

        Self {
            entries: RwLock::new(IndexMap::new()),
            version,
            snapshot,
        }
    }

    /// Replace the whole content with `items`, stable-sorted by `order`.
    ///
    /// Records without an id are dropped. A repeated id keeps the
    /// position of its first occurrence and the value of its last.
    pub(crate) fn replace(&self, items: Vec<T>, order: SortOrder<T>) -> Snapshot<T> {
        let mut fresh = IndexMap::with_capacity(items.len());
        for item in items {
            let Some(id) = item.id() else {
                warn!(kind = T::KIND, "dropping listed record without id");
                continue;
            };
            fresh.insert(id, Arc::new(item));
        }
        fresh.sort_by(|_, a, _, b| order(a, b));

        let snap = {
            let mut entries = self.entries.write().expect("entity cache lock poisoned");
            *entries = fresh;
            Self::collect(&entries)
        };
        self.publish(Arc::clone(&snap));
        snap
    }

    /// Remove the given ids. Returns the ids that were actually present,
    /// in the order they were requested.
    pub(crate) fn remove(&self, ids: &[EntityId]) -> Vec<EntityId> {
        let (removed, snap) = {
            let mut entries = self.entries.write().expect("entity cache lock poisoned");
            let removed: Vec<EntityId> = ids
                .iter()
                .copied()
                .filter(|id| entries.shift_remove(id).is_some())
                .collect();
            if removed.is_empty() {
                return removed;
            }
            (removed, Self::collect(&entries))
        };
        self.publish(snap);
        removed
    }

    /// Look up an entity by id.
    pub fn get(&self, id: EntityId) -> Option<Arc<T>> {
        self.entries
            .read()
            .expect("entity cache lock poisoned")
            .get(&id)
            .cloned()
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.entries
            .read()
            .expect("entity cache lock poisoned")
            .contains_key(&id)
    }

    /// Get the current snapshot (cheap `Arc` clone).
    pub fn snapshot(&self) -> Snapshot<T> {
        self.snapshot.borrow().clone()
    }

    /// Subscribe to snapshot changes via a `watch::Receiver`.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot<T>> {
        self.snapshot.subscribe()
    }

    /// Number of mutations since creation.
    pub fn version(&self) -> u64 {
        *self.version.borrow()
    }

    pub fn len(&self) -> usize {
        self.entries.read().expect("entity cache lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // ── Private helpers ──────────────────────────────────────────────

    fn collect(entries: &IndexMap<EntityId, Arc<T>>) -> Snapshot<T> {
        Arc::new(entries.values().map(Arc::clone).collect())
    }

    fn publish(&self, snap: Snapshot<T>) {
        // `send_modify` updates unconditionally, even with zero receivers.
        self.snapshot.send_modify(|current| *current = snap);
        self.version.send_modify(|v| *v += 1);
    }
}
