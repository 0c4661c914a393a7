//! Ordered map type for NBT compounds.
//!
//! [`Compound`] wraps an [`IndexMap`] so that entries keep the order in which
//! they were inserted or decoded. The format itself attaches no meaning to
//! entry order, but preserving it makes re-encoding a decoded document
//! byte-for-byte deterministic.
//!
//! Duplicate names follow "last write wins": inserting an existing name
//! replaces its value and keeps the entry at its original position. The
//! decoder relies on this when a compound repeats a name.
//!
//! ## Examples
//!
//! ```rust
//! use serde_nbt::{Compound, Tag};
//!
//! let mut compound = Compound::new();
//! compound.insert("name", Tag::from("Steve"));
//! compound.insert("level", Tag::Int(30));
//!
//! assert_eq!(compound.len(), 2);
//! assert_eq!(compound.get("name").and_then(|t| t.as_str()), Some("Steve"));
//! ```

use crate::Tag;
use indexmap::IndexMap;
use std::collections::HashMap;

/// An insertion-ordered mapping from entry names to tags.
///
/// # Examples
///
/// ```rust
/// use serde_nbt::{Compound, Tag};
///
/// let mut compound = Compound::new();
/// compound.insert("first", Tag::Int(1));
/// compound.insert("second", Tag::Int(2));
///
/// let keys: Vec<_> = compound.keys().cloned().collect();
/// assert_eq!(keys, vec!["first", "second"]);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Compound(IndexMap<String, Tag>);

impl Compound {
    /// Creates an empty `Compound`.
    #[must_use]
    pub fn new() -> Self {
        Compound(IndexMap::new())
    }

    /// Creates an empty `Compound` with room for `capacity` entries.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Compound(IndexMap::with_capacity(capacity))
    }

    /// Inserts an entry, returning the previous value stored under the name.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_nbt::{Compound, Tag};
    ///
    /// let mut compound = Compound::new();
    /// assert!(compound.insert("x", Tag::Int(1)).is_none());
    /// assert_eq!(compound.insert("x", Tag::Int(2)), Some(Tag::Int(1)));
    /// assert_eq!(compound.get("x"), Some(&Tag::Int(2)));
    /// ```
    pub fn insert<K: Into<String>>(&mut self, name: K, value: Tag) -> Option<Tag> {
        self.0.insert(name.into(), value)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Tag> {
        self.0.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Tag> {
        self.0.get_mut(name)
    }

    /// Removes an entry, shifting later entries down to keep their order.
    pub fn remove(&mut self, name: &str) -> Option<Tag> {
        self.0.shift_remove(name)
    }

    #[must_use]
    pub fn contains_key(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the entry names, in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, Tag> {
        self.0.keys()
    }

    /// Returns an iterator over the values, in insertion order.
    pub fn values(&self) -> indexmap::map::Values<'_, String, Tag> {
        self.0.values()
    }

    /// Returns an iterator over `(name, tag)` pairs, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Tag> {
        self.0.iter()
    }
}

impl From<HashMap<String, Tag>> for Compound {
    fn from(map: HashMap<String, Tag>) -> Self {
        Compound(map.into_iter().collect())
    }
}

impl From<Compound> for HashMap<String, Tag> {
    fn from(compound: Compound) -> Self {
        compound.0.into_iter().collect()
    }
}

impl IntoIterator for Compound {
    type Item = (String, Tag);
    type IntoIter = indexmap::map::IntoIter<String, Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Compound {
    type Item = (&'a String, &'a Tag);
    type IntoIter = indexmap::map::Iter<'a, String, Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(String, Tag)> for Compound {
    fn from_iter<T: IntoIterator<Item = (String, Tag)>>(iter: T) -> Self {
        Compound(IndexMap::from_iter(iter))
    }
}
