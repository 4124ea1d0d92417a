// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Metacatalog - in-memory metadata catalog for a data-virtualization layer
//!
//! The catalog holds the known schemas, the datatype registry (with aliases),
//! the roles, and the role-based authorization overlay of grants and
//! permissions applied to catalog resources.
//!
//! # Features
//!
//! - **Schema Registry**: case-insensitive unique names with stable insertion order
//! - **Datatype Registry**: first-registration-wins type definitions and aliases
//! - **Role Registry**: insertion-ordered roles, last write wins
//! - **Grant Engine**: merge and revoke of permissions across catalog sources
//!
//! # Usage
//!
//! ```ignore
//! use metacatalog::{Catalog, Grant, Permission, Privilege, Resource, Schema};
//!
//! let mut catalog = Catalog::with_builtin_datatypes();
//! catalog.add_schema(Schema::new("Sales"))?;
//! catalog.merge_grant(Grant::new("reader").with_permission(
//!     Permission::new(Resource::table("Sales.Orders")).allow(Privilege::Select),
//! ))?;
//! ```

pub mod catalog;

pub use catalog::config::{CatalogConfig, GrantPolicy};
pub use catalog::error::{CatalogError, CatalogResult, ConflictKind};
pub use catalog::grants::{
    Grant, GrantStore, Permission, Privilege, QualifiedNameMatcher, Resource, ResourceMatcher,
    ResourceType,
};
pub use catalog::manager::Catalog;
pub use catalog::ordered::{CaseInsensitive, Exact, NameFold, OrderedNameMap};
pub use catalog::providers::datatype::{builtin_datatypes, Datatype, DatatypeKind, DatatypeRegistry};
pub use catalog::providers::schema::{Schema, SchemaRegistry};
pub use catalog::providers::security::{Role, RoleRegistry};

/// Metacatalog version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Metacatalog crate name
pub const CRATE_NAME: &str = env!("CARGO_PKG_NAME");
