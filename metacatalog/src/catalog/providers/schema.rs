// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Schema registry implementation
//!
//! Schemas are unique by case-insensitive name. Enumeration follows insertion
//! order, which downstream consumers (DDL regeneration, system views) rely on
//! for deterministic output.

use crate::catalog::error::{CatalogError, CatalogResult};
use crate::catalog::ordered::OrderedNameMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Schema definition
///
/// Tables and procedures are owned by the external object model; the catalog
/// only tracks the schema record itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    pub id: Uuid,

    pub name: String,

    /// Whether the schema is backed by a physical source
    pub physical: bool,

    /// Schema description/documentation
    pub annotation: Option<String>,

    /// Extension properties
    pub properties: BTreeMap<String, String>,
}

impl Schema {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            physical: true,
            annotation: None,
            properties: BTreeMap::new(),
        }
    }

    /// Create a virtual (view-only) schema
    pub fn virtual_schema(name: impl Into<String>) -> Self {
        Self {
            physical: false,
            ..Self::new(name)
        }
    }

    pub fn with_annotation(mut self, annotation: impl Into<String>) -> Self {
        self.annotation = Some(annotation.into());
        self
    }

    pub fn set_property(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.properties.insert(key.into(), value.into());
    }

    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }
}

/// Registry of schemas keyed by case-insensitive name
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    schemas: OrderedNameMap<Schema>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a schema, failing if the name is already taken in any case
    pub fn add(&mut self, schema: Schema) -> CatalogResult<()> {
        let name = schema.name.clone();
        self.schemas.try_insert(name.clone(), schema).map_err(|_| {
            log::debug!("Rejected duplicate schema '{}'", name);
            CatalogError::duplicate_schema(name.clone())
        })?;
        log::debug!("Added schema '{}'", name);
        Ok(())
    }

    pub fn remove(&mut self, name: &str) -> Option<Schema> {
        let removed = self.schemas.remove(name);
        if removed.is_some() {
            log::debug!("Removed schema '{}'", name);
        }
        removed
    }

    pub fn get(&self, name: &str) -> Option<&Schema> {
        self.schemas.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Schema> {
        self.schemas.get_mut(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.schemas.contains_key(name)
    }

    /// Schemas in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Schema> {
        self.schemas.values()
    }

    /// Schemas ordered by case-insensitive name
    pub fn sorted(&self) -> impl Iterator<Item = &Schema> {
        self.schemas.sorted().map(|(_, schema)| schema)
    }

    pub fn names(&self) -> Vec<&str> {
        self.schemas.values().map(|s| s.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    pub(crate) fn into_schemas(self) -> impl Iterator<Item = Schema> {
        self.schemas.into_values()
    }
}
