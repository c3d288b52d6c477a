use std::{fmt, mem};

use crate::{
    entry::Entry,
    hash::{HashFn, additive_hash, bucket_index},
    prime::{next_prime, prime_capacity},
};

/// Requested capacity used by `Default`
const DEFAULT_CAPACITY: usize = 11;

/// The state of a single slot
#[derive(Debug, Clone, PartialEq, Eq)]
enum Slot<V> {
    /// Never used since the last rebuild; ends every probe walk
    Empty,
    /// Holds a live key-value pair
    Live(Entry<V>),
    /// Held an entry that was removed; probe walks continue past it
    Tombstone,
}

/// Outcome of walking a key's probe sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Probe {
    /// The key is live at this index
    Found(usize),
    /// The key is absent; this is where it would be placed
    Vacant(usize),
    /// The key is absent and no reachable slot can take it
    Full,
}

/// Quadratic probe positions `(home + j²) mod capacity` for `j` in `0..capacity`
#[derive(Debug, Clone)]
struct ProbeSeq {
    /// Current position, `(home + j²) mod capacity`
    position: usize,
    /// Distance to the next position, `(2j + 1) mod capacity`
    step: usize,
    /// Number of slots in the table
    capacity: usize,
    /// Positions left to yield
    remaining: usize,
}

impl ProbeSeq {
    /// Starts a probe sequence at `home`
    #[allow(clippy::arithmetic_side_effects)]
    fn new(home: usize, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self { position: home % capacity, step: 1 % capacity, capacity, remaining: capacity }
    }
}

impl Iterator for ProbeSeq {
    type Item = usize;

    #[allow(clippy::arithmetic_side_effects)]
    fn next(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        let current = self.position;
        // (j + 1)² - j² = 2j + 1
        self.position = (self.position + self.step) % self.capacity;
        self.step = (self.step + 2) % self.capacity;
        Some(current)
    }
}

/// A string-keyed hash map using open addressing with quadratic probing.
///
/// All entries live in one flat slot array whose length is always prime.
/// Removal leaves a tombstone so that probe walks for other keys keep going
/// past the vacated slot. The table grows before a new key would bring the
/// load factor to [`OpenAddressingMap::MAX_LOAD`], so the load is always
/// below one half once `put` returns.
///
/// Note: This implementation is not thread-safe.
#[derive(Clone)]
pub struct OpenAddressingMap<V, H = fn(&str) -> u64> {
    /// The slots storing the key-value pairs
    slots: Vec<Slot<V>>,
    /// Number of live slots
    size: usize,
    /// Hash strategy captured at construction
    hash_fn: H,
}

/// Builds `capacity` empty slots without requiring `V: Clone`
fn empty_slots<V>(capacity: usize) -> Vec<Slot<V>> {
    std::iter::repeat_with(|| Slot::Empty).take(capacity).collect()
}

impl<V, H> OpenAddressingMap<V, H> {
    /// Load factor a new key may not reach; `put` resizes first
    pub const MAX_LOAD: f64 = 0.5;

    /// Returns the number of live entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns true if the map holds no live entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the number of slots
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns the current load factor, `len / capacity`
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn table_load(&self) -> f64 {
        self.size as f64 / self.slots.len() as f64
    }

    /// Returns the number of slots that have never held an entry since the
    /// last rebuild. Tombstones are not counted.
    #[must_use]
    pub fn empty_buckets(&self) -> usize {
        self.slots.iter().filter(|slot| matches!(slot, Slot::Empty)).count()
    }

    /// Removes every entry and tombstone, keeping the capacity
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            *slot = Slot::Empty;
        }
        self.size = 0;
    }

    /// Returns an iterator over the live entries in slot order.
    ///
    /// Every call starts over from the first slot.
    #[must_use]
    pub fn iter(&self) -> OpenAddressingIter<'_, V> {
        OpenAddressingIter { slots: &self.slots, index: 0 }
    }

    /// Returns every live `(key, value)` pair in slot order
    #[must_use]
    pub fn keys_and_values(&self) -> Vec<(&str, &V)> {
        self.iter().collect()
    }

    /// Load factor the table would have with one more entry
    #[allow(clippy::cast_precision_loss)]
    fn load_after_insert(&self) -> f64 {
        self.size.saturating_add(1) as f64 / self.slots.len() as f64
    }
}

impl<V, H: HashFn> OpenAddressingMap<V, H> {
    /// Creates an empty map with at least `capacity` slots.
    ///
    /// The capacity is rounded up with [`next_prime`], so `new(20, ..)` has
    /// 23 slots.
    #[must_use]
    pub fn new(capacity: usize, hash_fn: H) -> Self {
        Self { slots: empty_slots(next_prime(capacity)), size: 0, hash_fn }
    }

    /// Walks the probe sequence for `key`.
    ///
    /// Stops at the first empty slot or after `capacity` steps. A vacancy
    /// prefers the first tombstone seen on the way.
    fn probe(&self, key: &str) -> Probe {
        let capacity = self.slots.len();
        let home = bucket_index(self.hash_fn.hash(key), capacity);
        let mut first_tombstone = None;

        for index in ProbeSeq::new(home, capacity) {
            match self.slots.get(index) {
                Some(Slot::Live(entry)) if entry.key == key => return Probe::Found(index),
                Some(Slot::Live(_)) | None => {}
                Some(Slot::Tombstone) => {
                    if first_tombstone.is_none() {
                        first_tombstone = Some(index);
                    }
                }
                Some(Slot::Empty) => return Probe::Vacant(first_tombstone.unwrap_or(index)),
            }
        }

        first_tombstone.map_or(Probe::Full, Probe::Vacant)
    }

    /// Index of the live slot holding `key`
    fn position(&self, key: &str) -> Option<usize> {
        match self.probe(key) {
            Probe::Found(index) => Some(index),
            Probe::Vacant(_) | Probe::Full => None,
        }
    }

    /// Inserts or updates a key-value pair.
    ///
    /// An existing key has its value replaced in place. A new key first
    /// grows the table to twice its capacity if it would push the load to
    /// [`Self::MAX_LOAD`], then takes the first free slot of its probe
    /// sequence.
    pub fn put(&mut self, key: &str, value: V) {
        match self.probe(key) {
            Probe::Found(index) => {
                if let Some(Slot::Live(entry)) = self.slots.get_mut(index) {
                    entry.value = value;
                }
            }
            Probe::Vacant(index) if self.load_after_insert() < Self::MAX_LOAD => {
                if let Some(slot) = self.slots.get_mut(index) {
                    *slot = Slot::Live(Entry::new(key, value));
                    self.size = self.size.saturating_add(1);
                }
            }
            Probe::Vacant(_) | Probe::Full => {
                self.resize(self.capacity().saturating_mul(2));
                self.put(key, value);
            }
        }
    }

    /// Retrieves the value for `key`
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&V> {
        match self.slots.get(self.position(key)?)? {
            Slot::Live(entry) => Some(&entry.value),
            Slot::Empty | Slot::Tombstone => None,
        }
    }

    /// Retrieves a mutable reference to the value for `key`
    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let index = self.position(key)?;
        match self.slots.get_mut(index)? {
            Slot::Live(entry) => Some(&mut entry.value),
            Slot::Empty | Slot::Tombstone => None,
        }
    }

    /// Returns true if `key` is live in the map
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    /// Removes `key`, leaving a tombstone in its slot.
    ///
    /// Returns the removed value; a missing key changes nothing.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let index = self.position(key)?;
        let slot = self.slots.get_mut(index)?;

        match mem::replace(slot, Slot::Tombstone) {
            Slot::Live(entry) => {
                self.size = self.size.saturating_sub(1);
                Some(entry.value)
            }
            other => {
                *slot = other;
                None
            }
        }
    }

    /// Rebuilds the table with a new capacity, dropping all tombstones.
    ///
    /// A target below the current number of entries is ignored. Otherwise the
    /// target is rounded up to a prime, and raised when needed so the rebuilt
    /// table stays under [`Self::MAX_LOAD`]. Live entries are re-placed in
    /// slot order through [`Self::put`].
    pub fn resize(&mut self, new_capacity: usize) {
        if new_capacity < self.size {
            tracing::trace!(new_capacity, size = self.size, "ignoring resize below current size");
            return;
        }

        // smallest capacity with size / capacity < 0.5
        let floor = self.size.saturating_mul(2).saturating_add(1);
        let capacity = prime_capacity(new_capacity.max(floor));
        tracing::debug!(
            from = self.slots.len(),
            to = capacity,
            entries = self.size,
            "resizing open addressing table"
        );

        let old_slots = mem::replace(&mut self.slots, empty_slots(capacity));
        self.size = 0;

        for slot in old_slots {
            if let Slot::Live(entry) = slot {
                self.put(&entry.key, entry.value);
            }
        }

        debug_assert_eq!(self.slots.len(), capacity, "rebuild triggered a nested resize");
    }
}

impl<V> Default for OpenAddressingMap<V> {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY, additive_hash)
    }
}

impl<K, V, H> Extend<(K, V)> for OpenAddressingMap<V, H>
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

impl<V: fmt::Debug, H> fmt::Debug for OpenAddressingMap<V, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAddressingMap")
            .field("slots", &self.slots)
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}

/// One line per slot: `index: key: value`, `_` for empty slots
impl<V: fmt::Display, H> fmt::Display for OpenAddressingMap<V, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, slot) in self.slots.iter().enumerate() {
            match slot {
                Slot::Empty => writeln!(f, "{index}: _")?,
                Slot::Tombstone => writeln!(f, "{index}: (tombstone)")?,
                Slot::Live(entry) => writeln!(f, "{index}: {entry}")?,
            }
        }
        Ok(())
    }
}

impl<'a, V, H> IntoIterator for &'a OpenAddressingMap<V, H> {
    type Item = (&'a str, &'a V);
    type IntoIter = OpenAddressingIter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the live entries of an [`OpenAddressingMap`], in slot order
#[derive(Debug, Clone)]
pub struct OpenAddressingIter<'a, V> {
    /// Reference to the slots in the map
    slots: &'a [Slot<V>],
    /// Next slot to inspect
    index: usize,
}

impl<'a, V> Iterator for OpenAddressingIter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(slot) = self.slots.get(self.index) {
            self.index = self.index.saturating_add(1);
            if let Slot::Live(entry) = slot {
                return Some(entry.as_pair());
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{hash::positional_hash, prime::is_prime};
    use proptest::prelude::*;
    use std::collections::HashMap;

    /// Every key lands on slot 0 first
    fn colliding(_: &str) -> u64 {
        0
    }

    #[test]
    fn test_capacity_rounds_up_to_prime() {
        let map: OpenAddressingMap<i32> = OpenAddressingMap::new(20, additive_hash);
        assert_eq!(map.capacity(), 23);
        assert_eq!(map.len(), 0);
        assert!(map.is_empty());
        assert_eq!(map.empty_buckets(), 23);

        let map: OpenAddressingMap<i32> = OpenAddressingMap::new(0, additive_hash);
        assert_eq!(map.capacity(), 3);
    }

    #[test]
    fn test_put_get_and_resize_scenario() {
        let mut map = OpenAddressingMap::new(20, additive_hash);
        assert_eq!(map.capacity(), 23);

        map.put("key1", 10);
        assert_eq!(map.get("key1"), Some(&10));
        assert!(map.contains_key("key1"));

        map.resize(30);
        assert_eq!(map.capacity(), 31);
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("key1"), Some(&10));
        assert!(map.contains_key("key1"));
    }

    #[test]
    fn test_update_keeps_size() {
        let mut map = OpenAddressingMap::new(101, additive_hash);
        map.put("key1", 10);
        map.put("key2", 20);
        assert_eq!(map.len(), 2);

        map.put("key1", 30);
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("key1"), Some(&30));
        assert!((map.table_load() - 2.0 / 101.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_buckets() {
        let mut map = OpenAddressingMap::new(101, additive_hash);
        assert_eq!(map.empty_buckets(), 101);
        map.put("key1", 10);
        assert_eq!(map.empty_buckets(), 100);
        map.put("key2", 20);
        assert_eq!(map.empty_buckets(), 99);
        map.put("key1", 30);
        assert_eq!(map.empty_buckets(), 99);
        map.put("key4", 40);
        assert_eq!(map.empty_buckets(), 98);
        assert_eq!(map.capacity(), 101);
    }

    #[test]
    fn test_missing_keys() {
        let mut map: OpenAddressingMap<i32> = OpenAddressingMap::new(31, additive_hash);
        assert_eq!(map.get("key"), None);
        assert!(!map.contains_key("key"));
        assert_eq!(map.remove("key"), None);
        assert_eq!(map.len(), 0);
        assert_eq!(map.empty_buckets(), 31);
    }

    #[test]
    fn test_remove_leaves_tombstone() {
        let mut map = OpenAddressingMap::new(11, colliding);
        map.put("a", 1);
        map.put("b", 2);
        map.put("c", 3);
        // probe offsets 0, 1, 4
        assert_eq!(map.keys_and_values(), vec![("a", &1), ("b", &2), ("c", &3)]);

        assert_eq!(map.remove("b"), Some(2));
        assert_eq!(map.len(), 2);
        assert!(!map.contains_key("b"));
        assert_eq!(map.get("b"), None);
        // tombstones are not empty
        assert_eq!(map.empty_buckets(), 8);
        // "c" is still reachable past the tombstone
        assert_eq!(map.get("c"), Some(&3));
        assert_eq!(map.get("a"), Some(&1));
    }

    #[test]
    fn test_put_reuses_first_tombstone() {
        let mut map = OpenAddressingMap::new(11, colliding);
        map.put("a", 1);
        map.put("b", 2);
        map.put("c", 3);
        map.remove("b");

        map.put("d", 4);
        assert_eq!(map.len(), 3);
        assert_eq!(map.empty_buckets(), 8);
        assert_eq!(map.keys_and_values(), vec![("a", &1), ("d", &4), ("c", &3)]);
    }

    #[test]
    fn test_update_past_tombstone_does_not_duplicate() {
        let mut map = OpenAddressingMap::new(11, colliding);
        map.put("a", 1);
        map.put("b", 2);
        map.remove("a");

        map.put("b", 20);
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("b"), Some(&20));
        assert_eq!(map.iter().count(), 1);
    }

    #[test]
    fn test_probe_without_empty_slot() {
        // From slot 0 of 7, quadratic probing only reaches slots 0, 1, 2, 4
        let mut map = OpenAddressingMap::new(7, |key: &str| -> u64 { if key == "w" { 2 } else { 0 } });
        map.put("a", 1);
        map.put("b", 2);
        map.put("c", 3);
        map.remove("b");
        map.remove("c");
        map.put("w", 9);
        assert_eq!(map.keys_and_values(), vec![("a", &1), ("w", &9)]);
        assert_eq!(map.empty_buckets(), 3);

        // Every slot reachable from 0 is live or a tombstone
        assert_eq!(map.get("z"), None);
        assert!(!map.contains_key("z"));
        assert_eq!(map.remove("z"), None);
        assert_eq!(map.len(), 2);

        map.put("d", 4);
        assert_eq!(map.capacity(), 7);
        assert_eq!(map.len(), 3);
        assert_eq!(map.keys_and_values(), vec![("a", &1), ("d", &4), ("w", &9)]);
        assert_eq!(map.get("w"), Some(&9));
    }

    #[test]
    fn test_load_stays_below_half() {
        let mut map = OpenAddressingMap::new(53, additive_hash);
        for i in 0..150 {
            map.put(&format!("str{i}"), i * 100);
            assert!(map.table_load() < 0.5, "load {} at {i}", map.table_load());
            assert!(is_prime(map.capacity()));
        }
        assert_eq!(map.len(), 150);
        for i in 0..150 {
            assert_eq!(map.get(&format!("str{i}")), Some(&(i * 100)));
        }
    }

    #[test]
    fn test_growth_doubles_capacity() {
        let mut map = OpenAddressingMap::new(5, additive_hash);
        map.put("a", 1);
        map.put("b", 2);
        assert_eq!(map.capacity(), 5);
        // a third entry would make the load 3 / 5
        map.put("c", 3);
        assert_eq!(map.capacity(), 11);
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn test_repeated_keys_with_positional_hash() {
        let mut map = OpenAddressingMap::new(41, positional_hash);
        for i in 0..50 {
            map.put(&format!("str{}", i / 3), i * 100);
        }
        assert_eq!(map.len(), 17);
        assert_eq!(map.get("str0"), Some(&200));
        assert_eq!(map.get("str16"), Some(&4900));
    }

    #[test]
    fn test_resize_below_size_is_noop() {
        let mut map = OpenAddressingMap::new(11, additive_hash);
        for i in 0..5 {
            map.put(&format!("key{i}"), i);
        }
        let capacity = map.capacity();
        let before: Vec<(String, i32)> =
            map.iter().map(|(k, v)| (k.to_owned(), *v)).collect();

        map.resize(4);
        assert_eq!(map.capacity(), capacity);
        assert_eq!(map.len(), 5);
        let after: Vec<(String, i32)> = map.iter().map(|(k, v)| (k.to_owned(), *v)).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_resize_drops_tombstones() {
        let mut map = OpenAddressingMap::new(11, colliding);
        map.put("a", 1);
        map.put("b", 2);
        map.remove("a");
        assert_eq!(map.empty_buckets(), 9);

        map.resize(11);
        assert_eq!(map.capacity(), 11);
        assert_eq!(map.empty_buckets(), 10);
        assert_eq!(map.get("b"), Some(&2));
    }

    #[test]
    fn test_resize_keeps_exact_prime_target() {
        let mut map: OpenAddressingMap<i32> = OpenAddressingMap::new(11, additive_hash);
        map.resize(2);
        assert_eq!(map.capacity(), 2);
        map.put("a", 1);
        assert_eq!(map.capacity(), 5);
        assert_eq!(map.get("a"), Some(&1));
    }

    #[test]
    fn test_rebuild_never_nests_a_resize() {
        let mut map = OpenAddressingMap::new(53, additive_hash);
        for i in 0..20 {
            map.put(&format!("key{i}"), i);
        }
        let size = map.len();

        for target in size..=2 * size {
            let mut resized = map.clone();
            resized.resize(target);
            let floor = 2 * size + 1;
            assert_eq!(resized.capacity(), prime_capacity(target.max(floor)));
            assert!(resized.table_load() < OpenAddressingMap::<i32>::MAX_LOAD);
            assert_eq!(resized.len(), size);
            for i in 0..20 {
                assert_eq!(resized.get(&format!("key{i}")), Some(&i));
            }
        }
    }

    #[test]
    fn test_resize_sweep_keeps_membership() {
        let mut map = OpenAddressingMap::new(75, positional_hash);
        let keys: Vec<u32> = (25..1000).step_by(13).collect();
        for &key in &keys {
            map.put(&key.to_string(), key * 42);
        }
        assert_eq!(map.len(), 75);

        for capacity in (111..1000).step_by(117) {
            map.resize(capacity);
            assert!(map.table_load() <= 0.5);

            map.put("some key", 0);
            assert!(map.contains_key("some key"));
            map.remove("some key");

            for &key in &keys {
                assert!(map.contains_key(&key.to_string()));
                assert!(!map.contains_key(&(key + 1).to_string()));
            }
            assert_eq!(map.len(), 75);
        }
    }

    #[test]
    fn test_clear() {
        let mut map = OpenAddressingMap::new(53, additive_hash);
        map.put("key1", 10);
        map.put("key2", 20);
        map.remove("key2");
        map.resize(100);
        assert_eq!(map.capacity(), 101);

        map.clear();
        assert_eq!(map.len(), 0);
        assert_eq!(map.capacity(), 101);
        assert_eq!(map.empty_buckets(), 101);
        assert_eq!(map.get("key1"), None);
    }

    #[test]
    fn test_iter_restarts_and_skips_tombstones() {
        let mut map = OpenAddressingMap::new(10, positional_hash);
        for i in 0..5 {
            map.put(&i.to_string(), i * 24);
        }
        map.remove("0");
        map.remove("4");

        let first: Vec<(&str, &i32)> = map.iter().collect();
        let second: Vec<(&str, &i32)> = (&map).into_iter().collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 3);
        assert!(first.iter().all(|(k, _)| *k != "0" && *k != "4"));

        let mut iter = map.iter();
        assert!(iter.nth(2).is_some());
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn test_get_mut() {
        let mut map = OpenAddressingMap::new(11, additive_hash);
        map.put("key1", 1);
        if let Some(value) = map.get_mut("key1") {
            *value += 10;
        }
        assert_eq!(map.get("key1"), Some(&11));
        assert_eq!(map.get_mut("key2"), None);
    }

    #[test]
    fn test_default_and_extend() {
        let mut map: OpenAddressingMap<i32> = OpenAddressingMap::default();
        assert_eq!(map.capacity(), 11);
        map.extend([("a", 1), ("b", 2), ("a", 3)]);
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("a"), Some(&3));
    }

    #[test]
    fn test_display_lists_every_slot() {
        let mut map = OpenAddressingMap::new(3, colliding);
        map.put("a", 1);
        assert_eq!(map.to_string(), "0: a: 1\n1: _\n2: _\n");

        map.resize(5);
        map.put("b", 2);
        map.remove("a");
        assert_eq!(map.to_string(), "0: (tombstone)\n1: b: 2\n2: _\n3: _\n4: _\n");
    }

    /// A single step of a random workload
    #[derive(Debug, Clone)]
    enum Op {
        /// Insert or update a key
        Put(String, i32),
        /// Remove a key
        Remove(String),
        /// Request a new capacity
        Resize(usize),
    }

    /// Random operations over a small key space so keys collide and repeat
    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            4 => ("[a-e]{1,3}", any::<i32>()).prop_map(|(key, value)| Op::Put(key, value)),
            2 => "[a-e]{1,3}".prop_map(Op::Remove),
            1 => (0usize..64).prop_map(Op::Resize),
        ]
    }

    proptest! {
        #[test]
        fn replay_matches_reference_map(ops in proptest::collection::vec(op_strategy(), 0..200)) {
            let mut map = OpenAddressingMap::new(5, additive_hash);
            let mut model = HashMap::new();

            for op in ops {
                match op {
                    Op::Put(key, value) => {
                        let before = model.len();
                        map.put(&key, value);
                        let existed = model.insert(key, value).is_some();
                        if existed {
                            prop_assert_eq!(map.len(), before);
                        }
                        prop_assert!(map.table_load() < OpenAddressingMap::<i32>::MAX_LOAD);
                    }
                    Op::Remove(key) => {
                        prop_assert_eq!(map.remove(&key), model.remove(&key));
                        prop_assert!(!map.contains_key(&key));
                    }
                    Op::Resize(target) => {
                        let capacity = map.capacity();
                        map.resize(target);
                        if target < model.len() {
                            prop_assert_eq!(map.capacity(), capacity);
                        }
                    }
                }
                prop_assert!(is_prime(map.capacity()));
                prop_assert_eq!(map.len(), model.len());
            }

            for (key, value) in &model {
                prop_assert_eq!(map.get(key), Some(value));
            }
            prop_assert_eq!(map.iter().count(), model.len());
        }
    }
}
