// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Role registry implementation
//!
//! Roles are the principals grants are attached to. A role may map to any
//! number of role names of the external security domain, or apply to every
//! authenticated user.

use crate::catalog::ordered::{Exact, OrderedNameMap};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

/// Role definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    /// Security-domain role names this role is granted to
    pub mapped_role_names: BTreeSet<String>,
    /// Role applies to any authenticated user
    pub any_authenticated: bool,
}

impl Role {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: None,
            mapped_role_names: BTreeSet::new(),
            any_authenticated: false,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn map_to(mut self, role_name: impl Into<String>) -> Self {
        self.mapped_role_names.insert(role_name.into());
        self
    }

    pub fn for_any_authenticated(mut self) -> Self {
        self.any_authenticated = true;
        self
    }
}

/// Registry of roles keyed by exact name, in insertion order
#[derive(Debug, Clone, Default)]
pub struct RoleRegistry {
    roles: OrderedNameMap<Role, Exact>,
}

impl RoleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite by name, returning the replaced role
    ///
    /// An overwritten role keeps its enumeration position.
    pub fn add(&mut self, role: Role) -> Option<Role> {
        let name = role.name.clone();
        let previous = self.roles.insert(name.clone(), role);
        if previous.is_some() {
            log::debug!("Replaced role '{}'", name);
        }
        previous
    }

    pub fn get(&self, name: &str) -> Option<&Role> {
        self.roles.get(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<Role> {
        self.roles.remove(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Role> {
        self.roles.values()
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    pub(crate) fn into_roles(self) -> impl Iterator<Item = Role> {
        self.roles.into_values()
    }
}
