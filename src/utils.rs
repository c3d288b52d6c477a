//! Shared interface and helpers for the map implementations

use crate::{ChainedMap, OpenAddressingMap, hash::HashFn};

/// Operations both collision strategies provide, so callers can swap one for
/// the other
pub trait StringMap<V> {
    /// Inserts or updates a key-value pair, resizing first if needed
    fn put(&mut self, key: &str, value: V);

    /// Retrieves the value for `key`
    fn get(&self, key: &str) -> Option<&V>;

    /// Returns true if the map holds `key`
    fn contains_key(&self, key: &str) -> bool;

    /// Removes `key`, returning its value; a missing key changes nothing
    fn remove(&mut self, key: &str) -> Option<V>;

    /// Removes every entry, keeping the capacity
    fn clear(&mut self);

    /// Rebuilds the table with a new capacity; invalid targets are ignored
    fn resize(&mut self, new_capacity: usize);

    /// Returns `len / capacity`
    fn table_load(&self) -> f64;

    /// Returns the number of empty slots or buckets
    fn empty_buckets(&self) -> usize;

    /// Returns the number of entries
    fn len(&self) -> usize;

    /// Returns true if the map holds no entries
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of slots or buckets
    fn capacity(&self) -> usize;

    /// Returns every `(key, value)` pair in table order
    fn keys_and_values(&self) -> Vec<(&str, &V)>;
}

/// Forwards every `StringMap` method to the inherent method of the same name
macro_rules! forward_string_map {
    ($map:ident) => {
        impl<V, H: HashFn> StringMap<V> for $map<V, H> {
            fn put(&mut self, key: &str, value: V) {
                $map::put(self, key, value);
            }

            fn get(&self, key: &str) -> Option<&V> {
                $map::get(self, key)
            }

            fn contains_key(&self, key: &str) -> bool {
                $map::contains_key(self, key)
            }

            fn remove(&mut self, key: &str) -> Option<V> {
                $map::remove(self, key)
            }

            fn clear(&mut self) {
                $map::clear(self);
            }

            fn resize(&mut self, new_capacity: usize) {
                $map::resize(self, new_capacity);
            }

            fn table_load(&self) -> f64 {
                $map::table_load(self)
            }

            fn empty_buckets(&self) -> usize {
                $map::empty_buckets(self)
            }

            fn len(&self) -> usize {
                $map::len(self)
            }

            fn capacity(&self) -> usize {
                $map::capacity(self)
            }

            fn keys_and_values(&self) -> Vec<(&str, &V)> {
                $map::keys_and_values(self)
            }
        }
    };
}

forward_string_map!(OpenAddressingMap);
forward_string_map!(ChainedMap);

/// Extension trait for map implementations that provides additional utility methods
pub trait MapExtensions<V> {
    /// Returns the keys of the map as a Vec, in table order
    fn keys(&self) -> Vec<String>;

    /// Returns the values of the map as a Vec, in table order
    fn values(&self) -> Vec<V>;
}

impl<V, M> MapExtensions<V> for M
where
    M: StringMap<V>,
    V: Clone,
{
    fn keys(&self) -> Vec<String> {
        self.keys_and_values().into_iter().map(|(k, _)| k.to_owned()).collect()
    }

    fn values(&self) -> Vec<V> {
        self.keys_and_values().into_iter().map(|(_, v)| v.clone()).collect()
    }
}

/// Fills `map` with key-value pairs, later pairs overwriting earlier ones
#[must_use]
pub fn from_pairs<M, V, K, I>(mut map: M, pairs: I) -> M
where
    M: StringMap<V>,
    K: AsRef<str>,
    I: IntoIterator<Item = (K, V)>,
{
    for (key, value) in pairs {
        map.put(key.as_ref(), value);
    }

    map
}
