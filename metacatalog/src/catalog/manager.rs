// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Catalog - The single external interface
//!
//! This module provides the [`Catalog`], which owns the schema, datatype and
//! role registries and the grant store, and is the only interface external
//! code should use to read or mutate them.

use super::config::CatalogConfig;
use super::error::CatalogResult;
use super::grants::{Grant, GrantStore, ResourceMatcher};
use super::providers::datatype::{builtin_datatypes, Datatype, DatatypeRegistry};
use super::providers::schema::{Schema, SchemaRegistry};
use super::providers::security::{Role, RoleRegistry};
use std::collections::BTreeMap;

/// In-memory metadata catalog
///
/// The catalog is built by a single writer, through incremental additions or
/// by merging other catalogs, and is then shared read-only. It has no
/// internal locking; an embedder that needs concurrent writers must serialize
/// access itself.
///
/// # Key Design Principles
/// - **Owned value**: there is no process-wide catalog; callers pass it along
/// - **Deterministic**: schema enumeration follows insertion order and grant
///   integration follows the order permissions are supplied in
/// - **No rollback**: a failing operation leaves earlier effects in place; use
///   [`Catalog::merge_atomic`] when all-or-nothing is required
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    schemas: SchemaRegistry,
    datatypes: DatatypeRegistry,
    grants: GrantStore,
    roles: RoleRegistry,
    config: CatalogConfig,
}

impl Catalog {
    /// Create an empty catalog with the default configuration
    pub fn new() -> Self {
        Self::with_config(CatalogConfig::default())
    }

    pub fn with_config(config: CatalogConfig) -> Self {
        Self {
            schemas: SchemaRegistry::new(),
            datatypes: DatatypeRegistry::new(),
            grants: GrantStore::with_policy(config.grants),
            roles: RoleRegistry::new(),
            config,
        }
    }

    /// Create an empty catalog seeded with the built-in datatypes and aliases
    pub fn with_builtin_datatypes() -> Self {
        let mut catalog = Self::new();
        let added = catalog.add_datatypes(builtin_datatypes());
        log::debug!("Seeded catalog with {} built-in datatype name(s)", added);
        catalog
    }

    /// Replace the resource match relation used by the grant store
    pub fn with_matcher(mut self, matcher: impl ResourceMatcher + 'static) -> Self {
        self.grants = self.grants.with_matcher(matcher);
        self
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    // ---- schemas ----

    /// Add a schema; fails with `DuplicateRecord` on a case-insensitive clash
    pub fn add_schema(&mut self, schema: Schema) -> CatalogResult<()> {
        self.schemas.add(schema)
    }

    pub fn remove_schema(&mut self, name: &str) -> Option<Schema> {
        self.schemas.remove(name)
    }

    pub fn get_schema(&self, name: &str) -> Option<&Schema> {
        self.schemas.get(name)
    }

    pub fn get_schema_mut(&mut self, name: &str) -> Option<&mut Schema> {
        self.schemas.get_mut(name)
    }

    pub fn contains_schema(&self, name: &str) -> bool {
        self.schemas.contains(name)
    }

    /// Schemas in insertion order
    pub fn list_schemas(&self) -> impl Iterator<Item = &Schema> {
        self.schemas.iter()
    }

    /// Keyed, read-only view of the schemas
    pub fn schema_map(&self) -> &SchemaRegistry {
        &self.schemas
    }

    // ---- datatypes ----

    /// Register a datatype under `name`; an existing name is left untouched
    pub fn add_datatype(&mut self, name: impl Into<String>, datatype: Datatype) -> bool {
        self.datatypes.add(name, datatype)
    }

    pub fn add_datatypes<K, I>(&mut self, datatypes: I) -> usize
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Datatype)>,
    {
        self.datatypes.add_all(datatypes)
    }

    pub fn get_datatype(&self, name: &str) -> Option<&Datatype> {
        self.datatypes.get(name)
    }

    /// Read-only view of every registered name, aliases included
    pub fn datatypes(&self) -> &DatatypeRegistry {
        &self.datatypes
    }

    /// Datatypes keyed by their own name, aliases excluded
    pub fn canonical_datatypes(&self) -> BTreeMap<&str, &Datatype> {
        self.datatypes.canonical()
    }

    // ---- roles ----

    pub fn add_role(&mut self, role: Role) -> Option<Role> {
        self.roles.add(role)
    }

    pub fn get_role(&self, name: &str) -> Option<&Role> {
        self.roles.get(name)
    }

    pub fn list_roles(&self) -> impl Iterator<Item = &Role> {
        self.roles.iter()
    }

    pub fn remove_role(&mut self, name: &str) -> Option<Role> {
        self.roles.remove(name)
    }

    // ---- grants ----

    pub fn merge_grant(&mut self, grant: Grant) -> CatalogResult<()> {
        self.grants.merge_grant(grant)
    }

    pub fn revoke_grant(&mut self, grant: Grant) -> CatalogResult<()> {
        self.grants.revoke_grant(grant)
    }

    pub fn get_grant(&self, role: &str) -> Option<&Grant> {
        self.grants.get(role)
    }

    /// Grants ordered by case-insensitive role name
    pub fn list_grants(&self) -> impl Iterator<Item = &Grant> {
        self.grants.iter()
    }

    // ---- whole-catalog merge ----

    /// Merge every record of `other` into this catalog
    ///
    /// Schemas are added in `other`'s insertion order and a name clash aborts
    /// the merge. Datatypes are added first-wins, grants are merged one role
    /// at a time, and roles overwrite by name. Effects applied before a
    /// failure are kept.
    pub fn merge(&mut self, other: Catalog) -> CatalogResult<()> {
        let Catalog {
            schemas,
            datatypes,
            grants,
            roles,
            ..
        } = other;

        let schema_count = schemas.len();
        for schema in schemas.into_schemas() {
            self.add_schema(schema)?;
        }

        let datatype_count = self.datatypes.add_all(datatypes.into_entries());

        let grant_list = grants.into_grants();
        let grant_count = grant_list.len();
        for grant in grant_list {
            self.merge_grant(grant)?;
        }

        let mut role_count = 0;
        for role in roles.into_roles() {
            self.add_role(role);
            role_count += 1;
        }

        log::info!(
            "Merged catalog: {} schema(s), {} new datatype name(s), {} grant(s), {} role(s)",
            schema_count,
            datatype_count,
            grant_count,
            role_count
        );
        Ok(())
    }

    /// Merge `other` all-or-nothing
    ///
    /// The merge runs against a copy that replaces this catalog only when
    /// every step succeeded.
    pub fn merge_atomic(&mut self, other: Catalog) -> CatalogResult<()> {
        let mut scratch = self.clone();
        scratch.merge(other)?;
        *self = scratch;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::error::CatalogError;
    use crate::catalog::grants::{Permission, Privilege, Resource};

    fn select_on(role: &str, table: &str) -> Grant {
        Grant::new(role)
            .with_permission(Permission::new(Resource::table(table)).allow(Privilege::Select))
    }

    #[test]
    fn test_duplicate_schema_scenario() {
        let mut catalog = Catalog::new();
        catalog.add_schema(Schema::new("Sales")).unwrap();

        let err = catalog.add_schema(Schema::new("sales")).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateRecord { .. }));

        let names: Vec<&str> = catalog.list_schemas().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Sales"]);
    }

    #[test]
    fn test_builtin_datatypes() {
        let catalog = Catalog::with_builtin_datatypes();
        assert_eq!(catalog.get_datatype("BIGINT").unwrap().name, "long");
        assert!(catalog.canonical_datatypes().contains_key("long"));
        assert!(!catalog.canonical_datatypes().contains_key("bigint"));
    }

    #[test]
    fn test_merge_moves_all_registries() {
        let mut target = Catalog::new();
        target.add_schema(Schema::new("Sales")).unwrap();
        target.add_datatype("money", Datatype::new("money", "bigdecimal"));

        let mut source = Catalog::new();
        source.add_schema(Schema::new("Hr")).unwrap();
        source.add_datatype("Money", Datatype::new("money", "double"));
        source.merge_grant(select_on("reader", "Hr.Staff")).unwrap();
        source.add_role(Role::new("reader"));

        target.merge(source).unwrap();

        let names: Vec<&str> = target.list_schemas().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Sales", "Hr"]);
        assert_eq!(target.get_datatype("money").unwrap().runtime_type_name, "bigdecimal");
        assert!(target.get_grant("READER").is_some());
        assert!(target.get_role("reader").is_some());
    }

    #[test]
    fn test_merge_atomic_leaves_target_on_failure() {
        let mut target = Catalog::new();
        target.add_schema(Schema::new("Sales")).unwrap();

        let mut source = Catalog::new();
        source.add_schema(Schema::new("Hr")).unwrap();
        source.add_schema(Schema::new("SALES")).unwrap();

        let err = target.merge_atomic(source.clone()).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateRecord { .. }));
        assert_eq!(target.schema_map().names(), vec!["Sales"]);

        // Plain merge keeps what was applied before the clash.
        target.merge(source).unwrap_err();
        assert_eq!(target.schema_map().names(), vec!["Sales", "Hr"]);
    }

    #[test]
    fn test_with_matcher_is_used_by_merge_grant() {
        let by_type = |a: &Resource, b: &Resource| a.resource_type == b.resource_type;
        let mut catalog = Catalog::new().with_matcher(by_type);
        catalog.merge_grant(select_on("reader", "Sales.Orders")).unwrap();
        catalog
            .merge_grant(Grant::new("reader").with_permission(
                Permission::new(Resource::table("Hr.Staff")).allow(Privilege::Update),
            ))
            .unwrap();

        let reader = catalog.get_grant("reader").unwrap();
        assert_eq!(reader.permissions.len(), 1);
        assert!(reader.permissions[0].allows(Privilege::Update));
    }
}
