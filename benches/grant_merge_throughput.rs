/// Benchmark for grant merge and catalog merge throughput
///
/// Measures how fast incremental metadata imports can be folded into one
/// catalog: per-grant merges against a growing permission list, revokes that
/// prune it back down, and whole-catalog merges of many small sources.

use metacatalog::{Catalog, Datatype, Grant, Permission, Privilege, Resource, Role, Schema};
use std::time::Instant;

const ROLES: usize = 20;
const TABLES: usize = 200;

fn table(i: usize) -> Resource {
    Resource::table(format!("bench_schema_{}.table_{}", i % 10, i))
}

fn grant(role: usize, table_index: usize, privilege: Privilege) -> Grant {
    Grant::new(format!("role_{}", role))
        .with_permission(Permission::new(table(table_index)).allow(privilege))
}

fn main() {
    println!("=== Grant Merge Throughput Benchmark ===\n");

    // Benchmark: merge one permission at a time
    println!("📊 Benchmark: merge_grant() - {} roles x {} tables", ROLES, TABLES);
    let mut catalog = Catalog::with_builtin_datatypes();
    let merge_start = Instant::now();
    for role in 0..ROLES {
        for t in 0..TABLES {
            catalog
                .merge_grant(grant(role, t, Privilege::Select))
                .expect("merge without masks cannot conflict");
        }
    }
    let merges = ROLES * TABLES;
    let merge_duration = merge_start.elapsed();
    let merge_ops_per_sec = merges as f64 / merge_duration.as_secs_f64();
    println!("  Merges: {}", merges);
    println!("  Time: {:?}", merge_duration);
    println!("  Throughput: {:.0} merges/sec", merge_ops_per_sec);
    println!();

    // Benchmark: re-merge onto existing permissions (scan hits)
    println!("📊 Benchmark: merge_grant() - privilege union on existing permissions");
    let union_start = Instant::now();
    for role in 0..ROLES {
        for t in 0..TABLES {
            catalog
                .merge_grant(grant(role, t, Privilege::Insert))
                .expect("merge without masks cannot conflict");
        }
    }
    let union_duration = union_start.elapsed();
    println!("  Time: {:?}", union_duration);
    println!(
        "  Throughput: {:.0} merges/sec",
        merges as f64 / union_duration.as_secs_f64()
    );
    println!();

    // Benchmark: revoke everything back out
    println!("📊 Benchmark: revoke_grant() - prune to empty");
    let revoke_start = Instant::now();
    for role in 0..ROLES {
        for t in 0..TABLES {
            let revoke = Grant::new(format!("role_{}", role)).with_permission(
                Permission::new(table(t)).revoke_all([Privilege::Select, Privilege::Insert]),
            );
            catalog
                .revoke_grant(revoke)
                .expect("revoke without strict mode cannot fail");
        }
    }
    let revoke_duration = revoke_start.elapsed();
    println!("  Time: {:?}", revoke_duration);
    println!("  Grants left: {}", catalog.list_grants().count());
    println!();

    // Benchmark: whole-catalog merge of many small imports
    println!("📊 Benchmark: Catalog::merge() - 100 imported catalogs");
    let mut target = Catalog::with_builtin_datatypes();
    let catalog_merge_start = Instant::now();
    for i in 0..100 {
        let mut source = Catalog::new();
        source
            .add_schema(Schema::new(format!("import_{}", i)))
            .expect("fresh catalog");
        source.add_datatype(format!("type_{}", i), Datatype::new(format!("type_{}", i), "string"));
        source
            .merge_grant(grant(i % ROLES, i, Privilege::Select))
            .expect("fresh catalog");
        source.add_role(Role::new(format!("role_{}", i % ROLES)));
        target.merge(source).expect("import schemas are unique");
    }
    let catalog_merge_duration = catalog_merge_start.elapsed();
    println!("  Time: {:?}", catalog_merge_duration);
    println!("  Average per merge: {:?}", catalog_merge_duration / 100);
    println!();

    // Summary
    println!("=== Summary ===");
    println!("  merge_grant(): {:.0} merges/sec", merge_ops_per_sec);
    println!("  schemas after imports: {}", target.list_schemas().count());
    println!("  grants after imports:  {}", target.list_grants().count());
}
