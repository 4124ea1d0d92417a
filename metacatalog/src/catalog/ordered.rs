// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Ordered name map
//!
//! An associative container keyed by folded record name. An `IndexMap` gives
//! hashed lookup and keeps the insertion order of its entries.
//! Registries use it wherever lookups must fold names but enumeration must
//! stay deterministic.

use indexmap::map::{Entry, IntoValues};
use indexmap::IndexMap;
use std::borrow::Cow;
use std::fmt;
use std::marker::PhantomData;

/// Key normalization applied before a name is indexed
pub trait NameFold {
    fn fold(name: &str) -> Cow<'_, str>;
}

/// Names compare without regard to case
///
/// Each char is upper-cased and then lower-cased on its own, so titlecase
/// letters and final sigma land on the same key as their other case forms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CaseInsensitive;

impl NameFold for CaseInsensitive {
    fn fold(name: &str) -> Cow<'_, str> {
        if name.bytes().all(|b| b.is_ascii() && !b.is_ascii_uppercase()) {
            return Cow::Borrowed(name);
        }
        Cow::Owned(
            name.chars()
                .flat_map(char::to_uppercase)
                .flat_map(char::to_lowercase)
                .collect(),
        )
    }
}

/// Names compare byte for byte
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Exact;

impl NameFold for Exact {
    fn fold(name: &str) -> Cow<'_, str> {
        Cow::Borrowed(name)
    }
}

/// Compare two names the way [`CaseInsensitive`] indexes them
pub fn names_equal_ignore_case(a: &str, b: &str) -> bool {
    CaseInsensitive::fold(a) == CaseInsensitive::fold(b)
}

/// Insertion-ordered map with a folded-name key
///
/// Each entry keeps the name it was first inserted under. Overwriting an
/// existing name replaces the value in place, so the entry keeps its position.
/// Removing an entry closes the gap; re-adding it appends at the end.
pub struct OrderedNameMap<V, F = CaseInsensitive> {
    /// Folded name -> (original name, value), in insertion order
    entries: IndexMap<String, (String, V)>,
    fold: PhantomData<F>,
}

impl<V, F> Default for OrderedNameMap<V, F> {
    fn default() -> Self {
        Self {
            entries: IndexMap::new(),
            fold: PhantomData,
        }
    }
}

impl<V: Clone, F> Clone for OrderedNameMap<V, F> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
            fold: PhantomData,
        }
    }
}

impl<V: fmt::Debug, F> fmt::Debug for OrderedNameMap<V, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.entries.values().map(|(k, v)| (k, v)))
            .finish()
    }
}

impl<V, F: NameFold> OrderedNameMap<V, F> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.entries.contains_key(&*F::fold(name))
    }

    pub fn get(&self, name: &str) -> Option<&V> {
        self.entries.get(&*F::fold(name)).map(|(_, value)| value)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut V> {
        self.entries.get_mut(&*F::fold(name)).map(|(_, value)| value)
    }

    /// Entry with the name it was registered under
    pub fn get_key_value(&self, name: &str) -> Option<(&str, &V)> {
        self.entries
            .get(&*F::fold(name))
            .map(|(key, value)| (key.as_str(), value))
    }

    /// Insert or overwrite, returning the previous value
    pub fn insert(&mut self, name: impl Into<String>, value: V) -> Option<V> {
        let name = name.into();
        let folded = F::fold(&name).into_owned();
        match self.entries.entry(folded) {
            Entry::Occupied(mut slot) => Some(std::mem::replace(&mut slot.get_mut().1, value)),
            Entry::Vacant(slot) => {
                slot.insert((name, value));
                None
            }
        }
    }

    /// Insert only if the name is absent; hands the value back otherwise
    pub fn try_insert(&mut self, name: impl Into<String>, value: V) -> Result<(), V> {
        let name = name.into();
        let folded = F::fold(&name).into_owned();
        match self.entries.entry(folded) {
            Entry::Occupied(_) => Err(value),
            Entry::Vacant(slot) => {
                slot.insert((name, value));
                Ok(())
            }
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<V> {
        self.entries
            .shift_remove(&*F::fold(name))
            .map(|(_, value)| value)
    }

    /// Entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.values().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.values().map(|(k, _)| k.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.values().map(|(_, v)| v)
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut V> {
        self.entries.values_mut().map(|(_, v)| v)
    }

    /// Entries ordered by folded name
    pub fn sorted(&self) -> impl Iterator<Item = (&str, &V)> {
        let mut entries: Vec<_> = self.entries.iter().collect();
        entries.sort_unstable_by(|(a, _), (b, _)| a.cmp(b));
        entries
            .into_iter()
            .map(|(_, (key, value))| (key.as_str(), value))
    }

    /// Values ordered by folded name
    pub fn into_sorted_values(mut self) -> impl Iterator<Item = V> {
        self.entries.sort_unstable_keys();
        self.entries.into_values().map(|(_, v)| v)
    }

    pub fn into_values(self) -> impl Iterator<Item = V> {
        self.entries.into_values().map(|(_, v)| v)
    }
}

impl<V, F: NameFold> IntoIterator for OrderedNameMap<V, F> {
    type Item = (String, V);
    type IntoIter = IntoValues<String, (String, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_values()
    }
}

impl<V, F: NameFold, K: Into<String>> FromIterator<(K, V)> for OrderedNameMap<V, F> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (name, value) in iter {
            map.insert(name, value);
        }
        map
    }
}
