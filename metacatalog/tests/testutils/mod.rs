//! Test utilities for metacatalog integration tests
//!
//! Builders for the grants and catalogs the scenarios share, plus logger
//! setup so `RUST_LOG=debug cargo test` shows the engine's decisions.

#![allow(dead_code)]

use metacatalog::{Catalog, Grant, Permission, Privilege, Resource, Schema};

/// Route `log` output through the test harness
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn orders() -> Resource {
    Resource::table("Sales.Orders")
}

/// Grant with a single permission
pub fn grant(role: &str, permission: Permission) -> Grant {
    Grant::new(role).with_permission(permission)
}

pub fn allow(role: &str, resource: Resource, privileges: &[Privilege]) -> Grant {
    grant(
        role,
        Permission::new(resource).allow_all(privileges.iter().copied()),
    )
}

pub fn revoke(role: &str, resource: Resource, privileges: &[Privilege]) -> Grant {
    grant(
        role,
        Permission::new(resource).revoke_all(privileges.iter().copied()),
    )
}

/// Catalog holding the given schemas, in order
pub fn catalog_with_schemas(names: &[&str]) -> Catalog {
    let mut catalog = Catalog::new();
    for name in names {
        catalog
            .add_schema(Schema::new(*name))
            .expect("schema names in fixture must be unique");
    }
    catalog
}

pub fn schema_names(catalog: &Catalog) -> Vec<String> {
    catalog.list_schemas().map(|s| s.name.clone()).collect()
}

pub fn privileges_of(catalog: &Catalog, role: &str, resource: &Resource) -> Vec<Privilege> {
    catalog
        .get_grant(role)
        .and_then(|g| g.permission(resource))
        .map(|p| p.privileges.iter().copied().collect())
        .unwrap_or_default()
}
