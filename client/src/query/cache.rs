//! [`Cache`] of query results.

use std::{collections::HashMap, hash::Hash};

use super::{QueryKey, QueryParams};

/// Cache of query results by their [`QueryKey`]s.
///
/// Invalidation is coarse: it marks every entry of a resource family stale,
/// regardless of its parameters. Stale entries are still served until
/// refetched.
#[derive(Debug)]
pub struct Cache<V, P = QueryParams> {
    /// Cached entries.
    entries: HashMap<QueryKey<P>, Entry<V>>,
}

/// Entry of a [`Cache`].
#[derive(Debug)]
struct Entry<V> {
    /// Cached value.
    value: V,

    /// Whether the value must be refetched before being trusted.
    stale: bool,
}

impl<V, P> Default for Cache<V, P> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<V, P: Eq + Hash> Cache<V, P> {
    /// Returns the value cached for the provided [`QueryKey`], if any.
    #[must_use]
    pub fn get(&self, key: &QueryKey<P>) -> Option<&V> {
        self.entries.get(key).map(|e| &e.value)
    }

    /// Indicates whether a non-stale value is cached for the provided
    /// [`QueryKey`].
    #[must_use]
    pub fn is_fresh(&self, key: &QueryKey<P>) -> bool {
        self.entries.get(key).is_some_and(|e| !e.stale)
    }

    /// Caches the provided fresh value.
    pub fn insert(&mut self, key: QueryKey<P>, value: V) {
        drop(self.entries.insert(key, Entry {
            value,
            stale: false,
        }));
    }

    /// Marks every entry of the provided resource `family` stale.
    pub fn invalidate(&mut self, family: &str) {
        for (_, entry) in
            self.entries.iter_mut().filter(|(k, _)| k.family == family)
        {
            entry.stale = true;
        }
    }
}

#[cfg(test)]
mod spec {
    use crate::{
        filter::State,
        query::{QueryKey, QueryParams},
    };

    use super::Cache;

    fn key(family: &'static str, page: usize) -> QueryKey {
        QueryKey {
            family,
            params: QueryParams {
                page,
                ..QueryParams::from(&State::default())
            },
        }
    }

    #[test]
    fn invalidates_whole_family() {
        let mut cache = Cache::default();
        cache.insert(key("users", 1), 1);
        cache.insert(key("users", 2), 2);
        cache.insert(key("roles", 1), 3);

        cache.invalidate("users");

        assert!(!cache.is_fresh(&key("users", 1)));
        assert!(!cache.is_fresh(&key("users", 2)));
        assert!(cache.is_fresh(&key("roles", 1)));
        assert_eq!(cache.get(&key("users", 2)), Some(&2));
    }

    #[test]
    fn insert_refreshes() {
        let mut cache = Cache::default();
        cache.insert(key("users", 1), 1);
        cache.invalidate("users");

        cache.insert(key("users", 1), 10);

        assert!(cache.is_fresh(&key("users", 1)));
        assert_eq!(cache.get(&key("users", 1)), Some(&10));
        assert_eq!(cache.get(&key("users", 3)), None);
    }
}
