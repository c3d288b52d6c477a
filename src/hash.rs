//! Pluggable string hash functions.
//!
//! A table captures its hash strategy at construction and only relies on it
//! being deterministic for the table's lifetime.

use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
};

/// Strategy turning a string key into a hash code.
///
/// Implemented for every `Fn(&str) -> u64`, so plain functions and closures
/// can be passed straight to a table constructor.
pub trait HashFn {
    /// Hashes `key`. Must return the same code for the same key on every call.
    fn hash(&self, key: &str) -> u64;
}

impl<F> HashFn for F
where
    F: Fn(&str) -> u64,
{
    fn hash(&self, key: &str) -> u64 {
        self(key)
    }
}

/// Sum of the key's character code points.
///
/// Anagrams collide, which makes it handy for exercising collision handling.
#[must_use]
pub fn additive_hash(key: &str) -> u64 {
    key.chars().fold(0u64, |hash, c| hash.wrapping_add(u64::from(c)))
}

/// Sum of each character code point weighted by its 1-based position.
#[must_use]
pub fn positional_hash(key: &str) -> u64 {
    key.chars().zip(1u64..).fold(0u64, |hash, (c, position)| {
        hash.wrapping_add(position.wrapping_mul(u64::from(c)))
    })
}

/// Hash through the standard library's `DefaultHasher`.
///
/// `DefaultHasher::new()` uses fixed keys, so this is stable within a process.
#[must_use]
pub fn std_hash(key: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    Hash::hash(key, &mut hasher);
    hasher.finish()
}

/// Maps a hash code onto `0..capacity`.
///
/// Hash codes are unsigned, so the remainder is never negative. `capacity`
/// must be non-zero; tables never hold an empty slot array.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::arithmetic_side_effects)]
pub(crate) fn bucket_index(hash: u64, capacity: usize) -> usize {
    (hash % (capacity.max(1) as u64)) as usize
}
