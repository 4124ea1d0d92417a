// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Resource match relation
//!
//! The grant engine never compares resources with `==`. It asks a
//! [`ResourceMatcher`] whether an existing permission and an incoming one
//! target the same resource, so column-level and table-level patterns can
//! plug in their own rules.

use super::permission::Resource;
use crate::catalog::ordered::names_equal_ignore_case;

/// Decides whether two permissions target the same resource
pub trait ResourceMatcher: Send + Sync {
    fn matches(&self, existing: &Resource, incoming: &Resource) -> bool;
}

impl<F> ResourceMatcher for F
where
    F: Fn(&Resource, &Resource) -> bool + Send + Sync,
{
    fn matches(&self, existing: &Resource, incoming: &Resource) -> bool {
        self(existing, incoming)
    }
}

/// Same resource type and the same schema-qualified name, ignoring case
///
/// Names are compared segment by segment; surrounding whitespace and
/// double quotes on a segment are ignored, so `"Sales".Orders` matches
/// `sales.ORDERS`. Pattern specificity is not ranked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QualifiedNameMatcher;

impl ResourceMatcher for QualifiedNameMatcher {
    fn matches(&self, existing: &Resource, incoming: &Resource) -> bool {
        existing.resource_type == incoming.resource_type
            && qualified_names_match(&existing.name, &incoming.name)
    }
}

fn segment(part: &str) -> &str {
    part.trim().trim_matches('"')
}

fn qualified_names_match(left: &str, right: &str) -> bool {
    let mut left = left.split('.');
    let mut right = right.split('.');
    loop {
        match (left.next(), right.next()) {
            (None, None) => return true,
            (Some(l), Some(r)) if names_equal_ignore_case(segment(l), segment(r)) => {}
            _ => return false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_insensitive_qualified_match() {
        let matcher = QualifiedNameMatcher;
        assert!(matcher.matches(
            &Resource::table("Sales.Orders"),
            &Resource::table("sales.ORDERS")
        ));
        assert!(matcher.matches(
            &Resource::table("\"Sales\".Orders"),
            &Resource::table("Sales. Orders")
        ));
    }

    #[test]
    fn test_scope_and_type_must_agree() {
        let matcher = QualifiedNameMatcher;
        assert!(!matcher.matches(&Resource::table("Sales.Orders"), &Resource::table("Orders")));
        assert!(!matcher.matches(
            &Resource::table("Sales.Orders"),
            &Resource::table("Sales.Orders.amount")
        ));
        assert!(!matcher.matches(&Resource::table("Sales"), &Resource::schema("Sales")));
    }

    #[test]
    fn test_closure_matcher() {
        let by_type = |a: &Resource, b: &Resource| a.resource_type == b.resource_type;
        assert!(by_type.matches(&Resource::table("a"), &Resource::table("b")));
        assert!(!by_type.matches(&Resource::table("a"), &Resource::column("a")));
    }
}
