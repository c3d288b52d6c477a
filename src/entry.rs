use std::fmt;

/// A key-value pair owned by a table
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Entry<V> {
    /// The key in the key-value pair
    pub(crate) key: String,
    /// The value associated with the key
    pub(crate) value: V,
}

impl<V> Entry<V> {
    /// Creates an entry, taking ownership of a copy of `key`
    pub(crate) fn new(key: &str, value: V) -> Self {
        Self { key: key.to_owned(), value }
    }

    /// Borrows the entry as the `(key, value)` pair handed out by iterators
    pub(crate) fn as_pair(&self) -> (&str, &V) {
        (&self.key, &self.value)
    }
}

impl<V: fmt::Display> fmt::Display for Entry<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.key, self.value)
    }
}
