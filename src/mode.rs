//! Mode and frequency of a sequence, counted in a [`ChainedMap`].

use crate::{
    chained::ChainedMap,
    hash::{HashFn, additive_hash},
};

/// The most frequent value(s) of a sequence and how often they occur
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Mode {
    /// Every value reaching the highest frequency, in the counting table's
    /// bucket order
    pub values: Vec<String>,
    /// The highest frequency; 0 for an empty sequence
    pub frequency: usize,
}

impl Mode {
    /// Returns true if `value` is one of the modes
    #[must_use]
    pub fn contains(&self, value: &str) -> bool {
        self.values.iter().any(|mode| mode == value)
    }
}

/// Finds the mode(s) of `items` by their string form.
///
/// Counts are kept in a [`ChainedMap`] keyed with [`additive_hash`], so the
/// order of [`Mode::values`] follows that table's buckets rather than the
/// input order.
///
/// ```rust
/// use strmap::find_mode;
///
/// let mode = find_mode(["apple", "apple", "grape", "melon", "peach"]);
/// assert_eq!(mode.values, vec!["apple".to_string()]);
/// assert_eq!(mode.frequency, 2);
/// ```
#[must_use]
pub fn find_mode<I>(items: I) -> Mode
where
    I: IntoIterator,
    I::Item: ToString,
{
    find_mode_with(items, additive_hash)
}

/// Like [`find_mode`], counting in a table that uses `hash_fn`
#[must_use]
pub fn find_mode_with<I, H>(items: I, hash_fn: H) -> Mode
where
    I: IntoIterator,
    I::Item: ToString,
    H: HashFn,
{
    let keys: Vec<String> = items.into_iter().map(|item| item.to_string()).collect();

    let mut counts = ChainedMap::new(keys.len(), hash_fn);
    for key in &keys {
        let count = counts.get(key).map_or(1, |count: &usize| count.saturating_add(1));
        counts.put(key, count);
    }

    let frequency = counts.iter().map(|(_, &count)| count).max().unwrap_or(0);
    let values = counts
        .iter()
        .filter(|&(_, &count)| count == frequency)
        .map(|(key, _)| key.to_owned())
        .collect();

    Mode { values, frequency }
}
