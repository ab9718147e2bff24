//! Insertion-ordered named map.
//!
//! `combine` over named inputs reports the failure of the *first* key in
//! enumeration order, so the container must have a stable, caller-visible
//! order. [`Named`] keeps entries in insertion order; re-inserting an
//! existing key replaces the value in place without moving it.
//!
//! Lookups are linear. Named maps in pipelines hold a handful of fields,
//! not bulk data.

use core::borrow::Borrow;
use core::fmt;

/// An insertion-ordered map from names to values.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Named<K, V> {
    entries: Vec<(K, V)>,
}

impl<K, V> Named<K, V> {
    /// Creates an empty map.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Creates an empty map with room for `capacity` entries.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the map has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    /// Iterates over keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.iter().map(|(k, _)| k)
    }

    /// Iterates over values in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.iter().map(|(_, v)| v)
    }

    /// Applies `f` to every value, keeping keys and order.
    pub fn map_values<U, F>(self, mut f: F) -> Named<K, U>
    where
        F: FnMut(V) -> U,
    {
        Named {
            entries: self.entries.into_iter().map(|(k, v)| (k, f(v))).collect(),
        }
    }
}

impl<K: PartialEq, V> Named<K, V> {
    /// Inserts a value, returning the previous value for the key.
    ///
    /// A new key is appended; an existing key keeps its position.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        if let Some(slot) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            return Some(core::mem::replace(&mut slot.1, value));
        }
        self.entries.push((key, value));
        None
    }

    /// Builder form of [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, key: K, value: V) -> Self {
        self.insert(key, value);
        self
    }

    /// Returns the value stored under `key`.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: PartialEq + ?Sized,
    {
        self.entries
            .iter()
            .find(|(k, _)| k.borrow() == key)
            .map(|(_, v)| v)
    }

    /// Returns true if `key` is present.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: PartialEq + ?Sized,
    {
        self.get(key).is_some()
    }

    /// Removes `key`, preserving the order of the remaining entries.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: PartialEq + ?Sized,
    {
        let index = self.entries.iter().position(|(k, _)| k.borrow() == key)?;
        Some(self.entries.remove(index).1)
    }
}

impl<K, V> Default for Named<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Named<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: PartialEq, V> FromIterator<(K, V)> for Named<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut named = Self::new();
        named.extend(iter);
        named
    }
}

impl<K: PartialEq, V> Extend<(K, V)> for Named<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K, V> IntoIterator for Named<K, V> {
    type Item = (K, V);
    type IntoIter = std::vec::IntoIter<(K, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Builds a [`Named`] map from `key => value` pairs, in order.
///
/// # Example
/// ```
/// use railway::named;
///
/// let fields = named! { "a" => 1, "b" => 2 };
/// assert_eq!(fields.keys().copied().collect::<Vec<_>>(), vec!["a", "b"]);
/// ```
#[macro_export]
macro_rules! named {
    () => {
        $crate::Named::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {
        $crate::Named::new()$(.with($key, $value))+
    };
}
