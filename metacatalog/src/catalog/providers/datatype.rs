// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Datatype registry implementation
//!
//! Maps case-insensitive names to type definitions. Several names may point at
//! the same definition (aliases); the definition is canonical only under the
//! key equal to its own name. The first registration of a name wins.

use crate::catalog::ordered::OrderedNameMap;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Kind of datatype definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DatatypeKind {
    /// Built-in runtime type
    Basic,
    /// Type supplied by a source or an administrator
    UserDefined,
    /// Named restriction of another type
    Domain,
}

/// Datatype definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Datatype {
    pub id: Uuid,
    pub name: String,
    /// Name of the runtime type values of this datatype are carried as
    pub runtime_type_name: String,
    pub kind: DatatypeKind,
    pub length: Option<u32>,
    pub precision: Option<u32>,
    pub scale: Option<u32>,
    pub nullable: bool,
}

impl Datatype {
    pub fn new(name: impl Into<String>, runtime_type_name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            runtime_type_name: runtime_type_name.into(),
            kind: DatatypeKind::UserDefined,
            length: None,
            precision: None,
            scale: None,
            nullable: true,
        }
    }

    fn basic(name: &str) -> Self {
        Self {
            kind: DatatypeKind::Basic,
            ..Self::new(name, name)
        }
    }

    pub fn with_kind(mut self, kind: DatatypeKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_length(mut self, length: u32) -> Self {
        self.length = Some(length);
        self
    }

    pub fn with_precision(mut self, precision: u32, scale: u32) -> Self {
        self.precision = Some(precision);
        self.scale = Some(scale);
        self
    }

    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }
}

const BUILTIN_TYPES: &[&str] = &[
    "string",
    "char",
    "boolean",
    "byte",
    "short",
    "integer",
    "long",
    "biginteger",
    "float",
    "double",
    "bigdecimal",
    "date",
    "time",
    "timestamp",
    "object",
    "blob",
    "clob",
    "xml",
    "varbinary",
];

/// SQL alias -> runtime type name
const BUILTIN_ALIASES: &[(&str, &str)] = &[
    ("varchar", "string"),
    ("tinyint", "byte"),
    ("smallint", "short"),
    ("bigint", "long"),
    ("real", "float"),
    ("decimal", "bigdecimal"),
];

static BUILTINS: Lazy<Vec<(&'static str, Datatype)>> = Lazy::new(|| {
    let mut types: Vec<(&'static str, Datatype)> = BUILTIN_TYPES
        .iter()
        .map(|name| (*name, Datatype::basic(name)))
        .collect();
    for (alias, target) in BUILTIN_ALIASES {
        let aliased = types
            .iter()
            .find(|(name, _)| name == target)
            .map(|(_, datatype)| datatype.clone());
        if let Some(datatype) = aliased {
            types.push((*alias, datatype));
        }
    }
    types
});

/// Built-in runtime types followed by their SQL aliases
pub fn builtin_datatypes() -> impl Iterator<Item = (&'static str, Datatype)> {
    BUILTINS.iter().map(|(name, datatype)| (*name, datatype.clone()))
}

/// Registry of datatypes keyed by case-insensitive name
#[derive(Debug, Clone, Default)]
pub struct DatatypeRegistry {
    datatypes: OrderedNameMap<Datatype>,
}

impl DatatypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `datatype` under `name` unless the name is already taken
    ///
    /// Returns `true` if the entry was added.
    pub fn add(&mut self, name: impl Into<String>, datatype: Datatype) -> bool {
        let name = name.into();
        match self.datatypes.try_insert(name.clone(), datatype) {
            Ok(()) => true,
            Err(_) => {
                log::trace!("Datatype '{}' already registered, keeping first", name);
                false
            }
        }
    }

    /// Register every entry in caller order; returns how many were added
    pub fn add_all<K, I>(&mut self, datatypes: I) -> usize
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Datatype)>,
    {
        datatypes
            .into_iter()
            .map(|(name, datatype)| self.add(name, datatype))
            .filter(|added| *added)
            .count()
    }

    pub fn get(&self, name: &str) -> Option<&Datatype> {
        self.datatypes.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.datatypes.contains_key(name)
    }

    /// All registered names, aliases included, ordered by case-insensitive name
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Datatype)> {
        self.datatypes.sorted()
    }

    /// Entries whose key is exactly the datatype's own name, aliases excluded
    pub fn canonical(&self) -> BTreeMap<&str, &Datatype> {
        self.datatypes
            .iter()
            .filter(|(key, datatype)| *key == datatype.name)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.datatypes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.datatypes.is_empty()
    }

    pub(crate) fn into_entries(self) -> impl Iterator<Item = (String, Datatype)> {
        self.datatypes.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_registration_wins() {
        let mut registry = DatatypeRegistry::new();
        assert!(registry.add("money", Datatype::new("money", "bigdecimal")));
        assert!(!registry.add("MONEY", Datatype::new("money", "double")));

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("Money").unwrap().runtime_type_name, "bigdecimal");
    }

    #[test]
    fn test_canonical_excludes_aliases() {
        let mut registry = DatatypeRegistry::new();
        let string = Datatype::new("string", "string");
        registry.add("string", string.clone());
        registry.add("varchar", string);

        assert_eq!(registry.len(), 2);
        let canonical = registry.canonical();
        assert_eq!(canonical.keys().copied().collect::<Vec<_>>(), vec!["string"]);
    }

    #[test]
    fn test_canonical_is_case_sensitive() {
        let mut registry = DatatypeRegistry::new();
        registry.add("STRING", Datatype::new("string", "string"));
        assert!(registry.canonical().is_empty());
        assert!(registry.contains("string"));
    }

    #[test]
    fn test_builtins_include_aliases() {
        let mut registry = DatatypeRegistry::new();
        let added = registry.add_all(builtin_datatypes());
        assert_eq!(added, BUILTIN_TYPES.len() + BUILTIN_ALIASES.len());

        let varchar = registry.get("VARCHAR").unwrap();
        assert_eq!(varchar.name, "string");
        assert_eq!(varchar.kind, DatatypeKind::Basic);
        assert_eq!(registry.canonical().len(), BUILTIN_TYPES.len());
    }

    #[test]
    fn test_add_all_keeps_caller_order() {
        let mut registry = DatatypeRegistry::new();
        let added = registry.add_all(vec![
            ("amount", Datatype::new("amount", "bigdecimal").with_precision(10, 2)),
            ("Amount", Datatype::new("amount", "double")),
        ]);
        assert_eq!(added, 1);
        assert_eq!(registry.get("amount").unwrap().precision, Some(10));
    }
}
