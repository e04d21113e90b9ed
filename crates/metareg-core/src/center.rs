//! Metadata Center: the key → metadata mapping owned by one registry
use indexmap::IndexMap;
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::fmt::Debug;
use std::hash::Hash;

use crate::error::{RegistryError, Result};
use crate::meta::MetaShape;
use crate::query::Query;

/// Bounds for anything usable as a registered key.
pub trait RegistryKey: Clone + Eq + Hash + Debug + Send + Sync + 'static {}

impl<T> RegistryKey for T where T: Clone + Eq + Hash + Debug + Send + Sync + 'static {}

/// Insertion-ordered mapping from registered key to metadata.
///
/// Re-inserting a key overwrites its metadata in place, so iteration order
/// is the order in which keys were first registered. Queries return the
/// first match in that order.
pub struct MetadataCenter<K, M> {
    entries: RwLock<IndexMap<K, M>>,
}

impl<K: RegistryKey, M: MetaShape> MetadataCenter<K, M> {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(IndexMap::new()),
        }
    }

    /// Store `meta` under `key`, returning the metadata it replaced.
    pub fn insert(&self, key: K, meta: M) -> Option<M> {
        self.entries.write().insert(key, meta)
    }

    pub fn remove(&self, key: &K) -> Result<M> {
        self.entries
            .write()
            .shift_remove(key)
            .ok_or_else(|| RegistryError::key_not_found(key))
    }

    pub fn contains(&self, key: &K) -> bool {
        self.entries.read().contains_key(key)
    }

    pub fn get(&self, key: &K) -> Result<M> {
        self.entries
            .read()
            .get(key)
            .cloned()
            .ok_or_else(|| RegistryError::key_not_found(key))
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    pub fn keys(&self) -> Vec<K> {
        self.entries.read().keys().cloned().collect()
    }

    /// Snapshot of every entry in iteration order.
    pub fn entries(&self) -> Vec<(K, M)> {
        self.entries
            .read()
            .iter()
            .map(|(k, m)| (k.clone(), m.clone()))
            .collect()
    }

    /// First key whose metadata satisfies `query`.
    ///
    /// The query runs over a snapshot with no lock held, so a predicate may
    /// register into or remove from this center; such changes are not seen
    /// by the running scan.
    pub fn find(&self, query: &Query<'_, M>) -> Option<K> {
        self.entries()
            .into_iter()
            .find(|(_, meta)| query.matches(meta))
            .map(|(key, _)| key)
    }

    /// Live read access to the backing map.
    pub fn read(&self) -> RwLockReadGuard<'_, IndexMap<K, M>> {
        self.entries.read()
    }

    /// Live write access to the backing map. Entries written here skip the
    /// registry's construction and check hooks.
    pub fn write(&self) -> RwLockWriteGuard<'_, IndexMap<K, M>> {
        self.entries.write()
    }
}

impl<K: RegistryKey, M: MetaShape> Default for MetadataCenter<K, M> {
    fn default() -> Self {
        Self::new()
    }
}

/// Expands to a `&'static MetadataCenter<K, M>` created on first access.
///
/// Meant as the body of a registry's `center()`; every expansion site owns
/// its own center.
#[macro_export]
macro_rules! metadata_center {
    ($key:ty, $meta:ty) => {{
        static CENTER: $crate::once_cell::sync::Lazy<$crate::MetadataCenter<$key, $meta>> =
            $crate::once_cell::sync::Lazy::new($crate::MetadataCenter::new);
        &*CENTER
    }};
}
