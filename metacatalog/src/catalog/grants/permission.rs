// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Grant and permission model

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Kind of catalog object a permission applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ResourceType {
    Database,
    Schema,
    Table,
    Procedure,
    Function,
    Column,
    Language,
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ResourceType::Database => "DATABASE",
            ResourceType::Schema => "SCHEMA",
            ResourceType::Table => "TABLE",
            ResourceType::Procedure => "PROCEDURE",
            ResourceType::Function => "FUNCTION",
            ResourceType::Column => "COLUMN",
            ResourceType::Language => "LANGUAGE",
        };
        write!(f, "{}", s)
    }
}

/// Catalog object or object class a permission targets
///
/// `name` is schema-qualified with `.` separators, e.g. `Sales.Orders` or
/// `Sales.Orders.amount` for a column.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Resource {
    pub resource_type: ResourceType,
    pub name: String,
}

impl Resource {
    pub fn new(resource_type: ResourceType, name: impl Into<String>) -> Self {
        Self {
            resource_type,
            name: name.into(),
        }
    }

    pub fn database(name: impl Into<String>) -> Self {
        Self::new(ResourceType::Database, name)
    }

    pub fn schema(name: impl Into<String>) -> Self {
        Self::new(ResourceType::Schema, name)
    }

    pub fn table(name: impl Into<String>) -> Self {
        Self::new(ResourceType::Table, name)
    }

    pub fn procedure(name: impl Into<String>) -> Self {
        Self::new(ResourceType::Procedure, name)
    }

    pub fn function(name: impl Into<String>) -> Self {
        Self::new(ResourceType::Function, name)
    }

    pub fn column(name: impl Into<String>) -> Self {
        Self::new(ResourceType::Column, name)
    }

    pub fn language(name: impl Into<String>) -> Self {
        Self::new(ResourceType::Language, name)
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.resource_type, self.name)
    }
}

/// Action a permission allows or revokes
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Privilege {
    Select,
    Insert,
    Update,
    Delete,
    Execute,
    Alter,
    Drop,
    Create,
    Usage,
    TemporaryTable,
    Language,
    AllPrivileges,
}

impl fmt::Display for Privilege {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Privilege::Select => "SELECT",
            Privilege::Insert => "INSERT",
            Privilege::Update => "UPDATE",
            Privilege::Delete => "DELETE",
            Privilege::Execute => "EXECUTE",
            Privilege::Alter => "ALTER",
            Privilege::Drop => "DROP",
            Privilege::Create => "CREATE",
            Privilege::Usage => "USAGE",
            Privilege::TemporaryTable => "TEMPORARY TABLE",
            Privilege::Language => "LANGUAGE",
            Privilege::AllPrivileges => "ALL PRIVILEGES",
        };
        write!(f, "{}", s)
    }
}

/// Privileges, pending revocations, mask and row condition on one resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    pub resource: Resource,
    pub privileges: BTreeSet<Privilege>,
    pub revoke_privileges: BTreeSet<Privilege>,
    /// Expression applied to values read through this resource
    pub mask: Option<String>,
    /// Tie-break when more than one mask could apply
    pub mask_order: Option<i32>,
    /// Row filter expression
    pub condition: Option<String>,
    /// The condition is enforced on writes as well as filtering reads
    pub condition_is_constraint: bool,
}

impl Permission {
    pub fn new(resource: Resource) -> Self {
        Self {
            resource,
            privileges: BTreeSet::new(),
            revoke_privileges: BTreeSet::new(),
            mask: None,
            mask_order: None,
            condition: None,
            condition_is_constraint: false,
        }
    }

    pub fn allow(mut self, privilege: Privilege) -> Self {
        self.privileges.insert(privilege);
        self
    }

    pub fn allow_all(mut self, privileges: impl IntoIterator<Item = Privilege>) -> Self {
        self.privileges.extend(privileges);
        self
    }

    pub fn revoke(mut self, privilege: Privilege) -> Self {
        self.revoke_privileges.insert(privilege);
        self
    }

    pub fn revoke_all(mut self, privileges: impl IntoIterator<Item = Privilege>) -> Self {
        self.revoke_privileges.extend(privileges);
        self
    }

    pub fn with_mask(mut self, mask: impl Into<String>, order: i32) -> Self {
        self.mask = Some(mask.into());
        self.mask_order = Some(order);
        self
    }

    pub fn with_condition(mut self, condition: impl Into<String>, is_constraint: bool) -> Self {
        self.condition = Some(condition.into());
        self.condition_is_constraint = is_constraint;
        self
    }

    pub fn clear_mask(&mut self) {
        self.mask = None;
        self.mask_order = None;
    }

    pub fn clear_condition(&mut self) {
        self.condition = None;
        self.condition_is_constraint = false;
    }

    /// A permission with nothing to allow, revoke, mask or filter
    pub fn is_empty(&self) -> bool {
        self.privileges.is_empty()
            && self.revoke_privileges.is_empty()
            && self.mask.is_none()
            && self.condition.is_none()
    }

    pub fn allows(&self, privilege: Privilege) -> bool {
        self.privileges.contains(&privilege)
    }
}

/// A role's full set of permissions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grant {
    pub role: String,
    pub permissions: Vec<Permission>,
}

impl Grant {
    pub fn new(role: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            permissions: Vec::new(),
        }
    }

    pub fn with_permission(mut self, permission: Permission) -> Self {
        self.permissions.push(permission);
        self
    }

    pub fn add_permission(&mut self, permission: Permission) {
        self.permissions.push(permission);
    }

    /// First permission on exactly this resource
    pub fn permission(&self, resource: &Resource) -> Option<&Permission> {
        self.permissions.iter().find(|p| &p.resource == resource)
    }

    pub fn is_empty(&self) -> bool {
        self.permissions.is_empty()
    }
}
