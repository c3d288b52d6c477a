//! # strmap
//!
//! String-keyed hash maps with two interchangeable collision-resolution
//! strategies.
//!
//! This crate provides two map implementations:
//!
//! - `OpenAddressingMap`: one flat slot array, quadratic probing and tombstone
//!   deletion, kept below a load factor of 0.5
//! - `ChainedMap`: separate chaining with an ordered chain per bucket, kept
//!   below a load factor of 1.0
//!
//! Both keep a prime number of slots, grow by doubling inside `put`, and take
//! their hash function as a plain `Fn(&str) -> u64` at construction. The
//! [`StringMap`] trait covers the operations they share. [`find_mode`] is
//! built on `ChainedMap` and returns the most frequent value(s) of a sequence.
//!
//! ## Basic Usage
//!
//! ```rust
//! use strmap::{OpenAddressingMap, additive_hash};
//!
//! // 20 is rounded up to the next prime
//! let mut map = OpenAddressingMap::new(20, additive_hash);
//! assert_eq!(map.capacity(), 23);
//!
//! // Insert values
//! map.put("apple", 1);
//! map.put("banana", 2);
//!
//! // Retrieve values
//! assert_eq!(map.get("apple"), Some(&1));
//!
//! // Update values
//! map.put("apple", 10);
//! assert_eq!(map.get("apple"), Some(&10));
//! assert_eq!(map.len(), 2);
//!
//! // Remove values
//! map.remove("apple");
//! assert_eq!(map.get("apple"), None);
//!
//! // Rebuild with a larger prime capacity
//! map.resize(30);
//! assert_eq!(map.capacity(), 31);
//! assert_eq!(map.get("banana"), Some(&2));
//! ```
//!
//! ## Swapping Strategies
//!
//! ```rust
//! use strmap::{ChainedMap, OpenAddressingMap, StringMap, positional_hash};
//!
//! fn count_words<M: StringMap<usize>>(map: &mut M, text: &str) {
//!     for word in text.split_whitespace() {
//!         let count = map.get(word).copied().unwrap_or(0);
//!         map.put(word, count + 1);
//!     }
//! }
//!
//! let text = "the quick fox jumps over the lazy dog the end";
//! let mut open = OpenAddressingMap::new(5, positional_hash);
//! let mut chained = ChainedMap::new(5, positional_hash);
//! count_words(&mut open, text);
//! count_words(&mut chained, text);
//!
//! assert_eq!(open.get("the"), Some(&3));
//! assert_eq!(chained.get("the"), Some(&3));
//! assert!(open.table_load() < 0.5);
//! assert!(chained.table_load() < 1.0);
//! ```

/// Module implementing the separate-chaining map
mod chained;
/// Key-value pair stored by both maps
mod entry;
/// Hash strategies and index normalization
mod hash;
/// Module implementing the mode/frequency computation
mod mode;
/// Module implementing the open-addressing map
mod open_addressing;
/// Prime capacity helpers
mod prime;
/// Shared trait and utility functions for the maps
mod utils;

pub use chained::{ChainedIter, ChainedMap};
pub use hash::{HashFn, additive_hash, positional_hash, std_hash};
pub use mode::{Mode, find_mode, find_mode_with};
pub use open_addressing::{OpenAddressingIter, OpenAddressingMap};
pub use prime::{is_prime, next_prime, prime_capacity};
pub use utils::{MapExtensions, StringMap, from_pairs};
