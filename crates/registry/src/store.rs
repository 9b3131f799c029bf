use crate::config::{DuplicateKeyPolicy, RegistryConfig};
use crate::registrar::Registrar;
use docindex_protocol::Fragment;
use log::{debug, warn};
use parking_lot::RwLock;
use serde::Serialize;
use std::collections::hash_map::Entry;
use std::collections::{BTreeMap, HashMap};

/// Merged view of every fragment delivered so far, keyed by fragment key.
///
/// Records under a key are append-only and keep arrival order. Merging is not
/// idempotent: delivering the same fragment twice stores its records twice.
pub struct RegistryStore<R> {
    inner: RwLock<StoreInner<R>>,
    duplicate_keys: DuplicateKeyPolicy,
}

struct StoreInner<R> {
    entries: HashMap<String, Vec<R>>,
    fragments_merged: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RegistryStats {
    pub keys: usize,
    pub records: usize,
    pub fragments_merged: u64,
}

impl<R> RegistryStore<R> {
    #[must_use]
    pub fn new() -> Self {
        Self::with_policy(DuplicateKeyPolicy::default())
    }

    #[must_use]
    pub fn from_config(config: &RegistryConfig) -> Self {
        Self::with_policy(config.duplicate_keys)
    }

    #[must_use]
    pub fn with_policy(duplicate_keys: DuplicateKeyPolicy) -> Self {
        Self {
            inner: RwLock::new(StoreInner {
                entries: HashMap::new(),
                fragments_merged: 0,
            }),
            duplicate_keys,
        }
    }

    /// Appends the fragment's records to its key, creating the key if needed.
    pub fn merge(&self, fragment: Fragment<R>) {
        let (key, records) = fragment.into_parts();
        let added = records.len();

        debug!("merging {added} record(s) under {key:?}");

        let mut inner = self.inner.write();
        inner.fragments_merged += 1;
        match inner.entries.entry(key) {
            Entry::Occupied(mut entry) => {
                if self.duplicate_keys == DuplicateKeyPolicy::Warn {
                    warn!(
                        "key {:?} received another fragment ({added} record(s) appended to {})",
                        entry.key(),
                        entry.get().len()
                    );
                }
                entry.get_mut().extend(records);
            }
            Entry::Vacant(entry) => {
                entry.insert(records);
            }
        }
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.inner.read().entries.contains_key(key)
    }

    /// Keys currently present, sorted.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.inner.read().entries.keys().cloned().collect();
        keys.sort();
        keys
    }

    #[must_use]
    pub fn stats(&self) -> RegistryStats {
        let inner = self.inner.read();
        RegistryStats {
            keys: inner.entries.len(),
            records: inner.entries.values().map(Vec::len).sum(),
            fragments_merged: inner.fragments_merged,
        }
    }
}

impl<R: Clone> RegistryStore<R> {
    /// Records merged under `key` so far; empty when the key was never seen.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Vec<R> {
        self.inner
            .read()
            .entries
            .get(key)
            .cloned()
            .unwrap_or_default()
    }

    #[must_use]
    pub fn snapshot(&self) -> BTreeMap<String, Vec<R>> {
        self.inner
            .read()
            .entries
            .iter()
            .map(|(key, records)| (key.clone(), records.clone()))
            .collect()
    }
}

impl<R> Default for RegistryStore<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Send + Sync> Registrar<R> for RegistryStore<R> {
    fn accept(&self, fragment: Fragment<R>) {
        self.merge(fragment);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn absent_key_is_empty() {
        let store: RegistryStore<u32> = RegistryStore::new();
        assert_eq!(store.lookup("missing"), Vec::<u32>::new());
        assert!(!store.contains_key("missing"));
    }

    #[test]
    fn merge_appends_in_arrival_order() {
        let store = RegistryStore::new();
        store.merge(Fragment::new("fj", vec![1, 2]));
        store.merge(Fragment::new("fj", vec![3]));
        assert_eq!(store.lookup("fj"), vec![1, 2, 3]);
    }

    #[test]
    fn empty_fragment_still_creates_key() {
        let store: RegistryStore<u32> = RegistryStore::new();
        store.merge(Fragment::new("fj_viewer", Vec::new()));
        assert!(store.contains_key("fj_viewer"));
        assert_eq!(store.lookup("fj_viewer"), Vec::<u32>::new());
    }

    #[test]
    fn warn_policy_still_appends() {
        let store = RegistryStore::with_policy(DuplicateKeyPolicy::Warn);
        store.merge(Fragment::new("fj", vec!["a"]));
        store.merge(Fragment::new("fj", vec!["b"]));
        assert_eq!(store.lookup("fj"), vec!["a", "b"]);
    }

    #[test]
    fn stats_count_keys_records_and_fragments() {
        let store = RegistryStore::new();
        store.merge(Fragment::new("a", vec![1]));
        store.merge(Fragment::new("b", vec![2, 3]));
        store.merge(Fragment::new("a", vec![4]));
        assert_eq!(
            store.stats(),
            RegistryStats {
                keys: 2,
                records: 4,
                fragments_merged: 3,
            }
        );
        assert_eq!(store.keys(), vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn snapshot_is_sorted_by_key() {
        let store = RegistryStore::new();
        store.merge(Fragment::new("zeta", vec![1]));
        store.merge(Fragment::new("alpha", vec![2]));
        let keys: Vec<String> = store.snapshot().into_keys().collect();
        assert_eq!(keys, vec!["alpha".to_string(), "zeta".to_string()]);
    }
}
