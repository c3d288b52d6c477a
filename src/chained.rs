use std::{fmt, mem};

use crate::{
    entry::Entry,
    hash::{HashFn, additive_hash, bucket_index},
    prime::{next_prime, prime_capacity},
};

/// Requested capacity used by `Default`
const DEFAULT_CAPACITY: usize = 11;

/// The entries of one bucket, in insertion order
#[derive(Debug, Clone)]
struct Chain<V> {
    /// Entries whose key hashes to this bucket
    entries: Vec<Entry<V>>,
}

impl<V> Chain<V> {
    /// Creates an empty chain
    fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Appends an entry; the caller guarantees the key is not present
    fn insert(&mut self, entry: Entry<V>) {
        self.entries.push(entry);
    }

    /// Finds the entry for `key`
    fn find(&self, key: &str) -> Option<&Entry<V>> {
        self.entries.iter().find(|entry| entry.key == key)
    }

    /// Finds the entry for `key`, mutably
    fn find_mut(&mut self, key: &str) -> Option<&mut Entry<V>> {
        self.entries.iter_mut().find(|entry| entry.key == key)
    }

    /// Removes the entry for `key`, keeping the order of the rest
    fn remove(&mut self, key: &str) -> Option<Entry<V>> {
        let index = self.entries.iter().position(|entry| entry.key == key)?;
        Some(self.entries.remove(index))
    }

    /// Number of entries in the chain
    fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the chain has no entries
    fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates the entries in insertion order
    fn iter(&self) -> std::slice::Iter<'_, Entry<V>> {
        self.entries.iter()
    }
}

/// A string-keyed hash map using separate chaining.
///
/// Each of the (prime) number of buckets holds an ordered chain of entries.
/// Lookups and removals only visit the chain of the key's bucket. The table
/// doubles its capacity before a new key would bring the load factor to
/// [`ChainedMap::MAX_LOAD`].
///
/// Note: This implementation is not thread-safe.
#[derive(Clone)]
pub struct ChainedMap<V, H = fn(&str) -> u64> {
    /// One chain per bucket
    buckets: Vec<Chain<V>>,
    /// Total number of entries across all chains
    size: usize,
    /// Hash strategy captured at construction
    hash_fn: H,
}

/// Builds `capacity` empty chains without requiring `V: Clone`
fn empty_chains<V>(capacity: usize) -> Vec<Chain<V>> {
    std::iter::repeat_with(Chain::new).take(capacity).collect()
}

impl<V, H> ChainedMap<V, H> {
    /// Load factor a new key may not reach; `put` resizes first
    pub const MAX_LOAD: f64 = 1.0;

    /// Returns the number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns true if the map holds no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the number of buckets
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Returns the current load factor, `len / capacity`
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn table_load(&self) -> f64 {
        self.size as f64 / self.buckets.len() as f64
    }

    /// Returns the number of buckets with an empty chain
    #[must_use]
    pub fn empty_buckets(&self) -> usize {
        self.buckets.iter().filter(|chain| chain.is_empty()).count()
    }

    /// Removes every entry, keeping the capacity
    pub fn clear(&mut self) {
        self.buckets = empty_chains(self.buckets.len());
        self.size = 0;
    }

    /// Returns an iterator over the entries in bucket order, then chain order.
    ///
    /// Every call starts over from the first bucket.
    #[must_use]
    pub fn iter(&self) -> ChainedIter<'_, V> {
        ChainedIter { buckets: self.buckets.iter(), chain: Default::default() }
    }

    /// Returns every `(key, value)` pair in bucket order, then chain order
    #[must_use]
    pub fn keys_and_values(&self) -> Vec<(&str, &V)> {
        self.iter().collect()
    }

    /// Load factor the table would have with one more entry
    #[allow(clippy::cast_precision_loss)]
    fn load_after_insert(&self) -> f64 {
        self.size.saturating_add(1) as f64 / self.buckets.len() as f64
    }
}

impl<V, H: HashFn> ChainedMap<V, H> {
    /// Creates an empty map with at least `capacity` buckets.
    ///
    /// The capacity is rounded up with [`next_prime`].
    #[must_use]
    pub fn new(capacity: usize, hash_fn: H) -> Self {
        Self { buckets: empty_chains(next_prime(capacity)), size: 0, hash_fn }
    }

    /// Index of the bucket `key` belongs to
    fn bucket_of(&self, key: &str) -> usize {
        bucket_index(self.hash_fn.hash(key), self.buckets.len())
    }

    /// The chain `key` belongs to
    fn chain(&self, key: &str) -> Option<&Chain<V>> {
        self.buckets.get(self.bucket_of(key))
    }

    /// The chain `key` belongs to, mutably
    fn chain_mut(&mut self, key: &str) -> Option<&mut Chain<V>> {
        let index = self.bucket_of(key);
        self.buckets.get_mut(index)
    }

    /// Inserts or updates a key-value pair.
    ///
    /// An existing key has its value replaced in place. A new key first
    /// doubles the capacity if it would push the load to [`Self::MAX_LOAD`],
    /// then is appended to its bucket's chain.
    pub fn put(&mut self, key: &str, value: V) {
        if let Some(entry) = self.chain_mut(key).and_then(|chain| chain.find_mut(key)) {
            entry.value = value;
            return;
        }

        if self.load_after_insert() >= Self::MAX_LOAD {
            self.resize(self.capacity().saturating_mul(2));
        }

        if let Some(chain) = self.chain_mut(key) {
            chain.insert(Entry::new(key, value));
            self.size = self.size.saturating_add(1);
        }
    }

    /// Retrieves the value for `key`
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&V> {
        self.chain(key)?.find(key).map(|entry| &entry.value)
    }

    /// Retrieves a mutable reference to the value for `key`
    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        self.chain_mut(key)?.find_mut(key).map(|entry| &mut entry.value)
    }

    /// Returns true if `key` is in the map
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.chain(key).is_some_and(|chain| chain.find(key).is_some())
    }

    /// Removes `key` from its chain.
    ///
    /// Returns the removed value; a missing key changes nothing.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let entry = self.chain_mut(key)?.remove(key)?;
        self.size = self.size.saturating_sub(1);
        Some(entry.value)
    }

    /// Rebuilds the table with a new number of buckets.
    ///
    /// A target below 1 is ignored. Otherwise the target is rounded up to a
    /// prime, and raised when needed so the rebuilt table stays under
    /// [`Self::MAX_LOAD`]. Entries are re-placed through [`Self::put`] in
    /// bucket order, then chain order.
    pub fn resize(&mut self, new_capacity: usize) {
        if new_capacity < 1 {
            tracing::trace!(new_capacity, size = self.size, "ignoring resize below one bucket");
            return;
        }

        // smallest capacity with size / capacity < 1
        let floor = self.size.saturating_add(1);
        let capacity = prime_capacity(new_capacity.max(floor));
        tracing::debug!(
            from = self.buckets.len(),
            to = capacity,
            entries = self.size,
            chain_max = self.buckets.iter().map(Chain::len).max().unwrap_or(0),
            "resizing chained table"
        );

        let old_buckets = mem::replace(&mut self.buckets, empty_chains(capacity));
        self.size = 0;

        for entry in old_buckets.into_iter().flat_map(|chain| chain.entries) {
            self.put(&entry.key, entry.value);
        }

        debug_assert_eq!(self.buckets.len(), capacity, "rebuild triggered a nested resize");
    }
}

impl<V> Default for ChainedMap<V> {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY, additive_hash)
    }
}

impl<K, V, H> Extend<(K, V)> for ChainedMap<V, H>
where
    K: AsRef<str>,
    H: HashFn,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.put(key.as_ref(), value);
        }
    }
}

impl<K: AsRef<str>, V> FromIterator<(K, V)> for ChainedMap<V> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = Self::default();
        map.extend(iter);
        map
    }
}

impl<V: fmt::Debug, H> fmt::Debug for ChainedMap<V, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainedMap")
            .field("buckets", &self.buckets)
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}

/// One line per bucket: `index: key: value -> key: value`
impl<V: fmt::Display, H> fmt::Display for ChainedMap<V, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, chain) in self.buckets.iter().enumerate() {
            write!(f, "{index}:")?;
            for (position, entry) in chain.iter().enumerate() {
                let separator = if position == 0 { " " } else { " -> " };
                write!(f, "{separator}{entry}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl<'a, V, H> IntoIterator for &'a ChainedMap<V, H> {
    type Item = (&'a str, &'a V);
    type IntoIter = ChainedIter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the entries of a [`ChainedMap`], bucket by bucket
#[derive(Debug, Clone)]
pub struct ChainedIter<'a, V> {
    /// Buckets not visited yet
    buckets: std::slice::Iter<'a, Chain<V>>,
    /// Rest of the current bucket's chain
    chain: std::slice::Iter<'a, Entry<V>>,
}

impl<'a, V> Iterator for ChainedIter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self.chain.next() {
                return Some(entry.as_pair());
            }
            self.chain = self.buckets.next()?.iter();
        }
    }
}
