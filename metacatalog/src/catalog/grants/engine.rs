// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Grant merge and revoke engine
//!
//! Grants are keyed by case-insensitive role name. Integrating a grant walks
//! its permissions in order; each one is matched against the role's existing
//! permissions, first match wins. A merge adds privileges and adopts masks and
//! conditions, a revoke strips privileges and clears masks and conditions.
//! Permissions left without content are pruned, and a role left without
//! permissions is dropped.
//!
//! There is no rollback. When a permission fails, the permissions before it
//! stay integrated.

use super::matcher::{QualifiedNameMatcher, ResourceMatcher};
use super::permission::{Grant, Permission};
use crate::catalog::config::GrantPolicy;
use crate::catalog::error::{CatalogError, CatalogResult, ConflictKind};
use crate::catalog::ordered::OrderedNameMap;
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Merge,
    Revoke,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Merge => write!(f, "merge"),
            Direction::Revoke => write!(f, "revoke"),
        }
    }
}

/// Role -> grant mapping with merge and revoke
#[derive(Clone)]
pub struct GrantStore {
    grants: OrderedNameMap<Grant>,
    matcher: Arc<dyn ResourceMatcher>,
    policy: GrantPolicy,
}

impl fmt::Debug for GrantStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GrantStore")
            .field("grants", &self.grants)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl Default for GrantStore {
    fn default() -> Self {
        Self::new()
    }
}

impl GrantStore {
    pub fn new() -> Self {
        Self::with_policy(GrantPolicy::default())
    }

    pub fn with_policy(policy: GrantPolicy) -> Self {
        Self {
            grants: OrderedNameMap::new(),
            matcher: Arc::new(QualifiedNameMatcher),
            policy,
        }
    }

    /// Replace the resource match relation
    pub fn with_matcher(mut self, matcher: impl ResourceMatcher + 'static) -> Self {
        self.matcher = Arc::new(matcher);
        self
    }

    pub fn policy(&self) -> &GrantPolicy {
        &self.policy
    }

    /// Integrate `incoming` as additional allows
    pub fn merge_grant(&mut self, incoming: Grant) -> CatalogResult<()> {
        self.integrate(incoming, Direction::Merge)
    }

    /// Integrate `to_revoke` as revocations
    pub fn revoke_grant(&mut self, to_revoke: Grant) -> CatalogResult<()> {
        self.integrate(to_revoke, Direction::Revoke)
    }

    pub fn get(&self, role: &str) -> Option<&Grant> {
        self.grants.get(role)
    }

    /// Grants ordered by case-insensitive role name
    pub fn iter(&self) -> impl Iterator<Item = &Grant> {
        self.grants.sorted().map(|(_, grant)| grant)
    }

    pub fn len(&self) -> usize {
        self.grants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grants.is_empty()
    }

    pub(crate) fn into_grants(self) -> Vec<Grant> {
        self.grants.into_sorted_values().collect()
    }

    fn integrate(&mut self, incoming: Grant, direction: Direction) -> CatalogResult<()> {
        let Grant { role, permissions } = incoming;

        let Some(existing) = self.grants.get_mut(&role) else {
            return self.store_new(role, permissions, direction);
        };

        log::debug!(
            "Applying {} of {} permission(s) to role '{}'",
            direction,
            permissions.len(),
            role
        );
        let outcome = permissions.into_iter().try_for_each(|permission| {
            integrate_permission(
                existing,
                permission,
                direction,
                self.matcher.as_ref(),
                &self.policy,
            )
        });

        if existing.permissions.is_empty() {
            self.grants.remove(&role);
            log::debug!("Role '{}' has no permissions left, grant removed", role);
        }
        outcome
    }

    /// No grant yet for the role: store the incoming one as-is, minus any
    /// permissions without content
    fn store_new(
        &mut self,
        role: String,
        permissions: Vec<Permission>,
        direction: Direction,
    ) -> CatalogResult<()> {
        if direction == Direction::Revoke && !self.policy.record_unmatched_revokes {
            log::debug!("Dropping revoke for role '{}' with no grant", role);
            return Ok(());
        }

        let permissions: Vec<Permission> =
            permissions.into_iter().filter(|p| !p.is_empty()).collect();
        if permissions.is_empty() {
            log::debug!("Ignoring {} with no content for role '{}'", direction, role);
            return Ok(());
        }

        log::debug!(
            "Recording new grant for role '{}' from {} ({} permission(s))",
            role,
            direction,
            permissions.len()
        );
        self.grants.insert(role.clone(), Grant { role, permissions });
        Ok(())
    }
}

/// Match one incoming permission against the grant and apply it
///
/// The scan only mutates entries in place; pruning and appending happen once
/// it is over, so positions recorded during the scan stay valid.
fn integrate_permission(
    grant: &mut Grant,
    incoming: Permission,
    direction: Direction,
    matcher: &dyn ResourceMatcher,
    policy: &GrantPolicy,
) -> CatalogResult<()> {
    let mut pending = Some(incoming);
    let mut emptied = Vec::new();
    let mut outcome = Ok(());

    for (pos, current) in grant.permissions.iter_mut().enumerate() {
        let Some(candidate) = pending.as_ref() else {
            break;
        };
        let matched = matcher.matches(&current.resource, &candidate.resource);
        if matched {
            if let Some(incoming) = pending.take() {
                outcome = match direction {
                    Direction::Merge => merge_into(current, incoming, &grant.role, policy),
                    Direction::Revoke => revoke_from(current, incoming, &grant.role, policy),
                };
            }
        }
        // Every visited entry is checked, not only the match.
        if current.is_empty() {
            emptied.push(pos);
        }
        if matched {
            break;
        }
    }

    for pos in emptied.into_iter().rev() {
        let pruned = grant.permissions.remove(pos);
        log::debug!(
            "Pruned empty permission on {} for role '{}'",
            pruned.resource,
            grant.role
        );
    }
    outcome?;

    if let Some(unmatched) = pending {
        append(grant, unmatched, direction, policy);
    }
    Ok(())
}

fn append(grant: &mut Grant, permission: Permission, direction: Direction, policy: &GrantPolicy) {
    if direction == Direction::Revoke && !policy.record_unmatched_revokes {
        log::debug!(
            "Dropping revoke on {} for role '{}': no matching permission",
            permission.resource,
            grant.role
        );
        return;
    }
    if permission.is_empty() {
        return;
    }
    log::trace!(
        "Adding permission on {} to role '{}'",
        permission.resource,
        grant.role
    );
    grant.permissions.push(permission);
}

fn merge_into(
    current: &mut Permission,
    incoming: Permission,
    role: &str,
    policy: &GrantPolicy,
) -> CatalogResult<()> {
    if let Some(mask) = incoming.mask {
        if let Some(existing) = &current.mask {
            return Err(conflict(
                ConflictKind::MaskConflict,
                role,
                current,
                format!("existing mask '{}', incoming mask '{}'", existing, mask),
                policy,
            ));
        }
        current.mask = Some(mask);
        current.mask_order = incoming.mask_order;
    }

    if let Some(condition) = incoming.condition {
        if let Some(existing) = &current.condition {
            return Err(conflict(
                ConflictKind::ConditionConflict,
                role,
                current,
                format!(
                    "existing condition '{}', incoming condition '{}'",
                    existing, condition
                ),
                policy,
            ));
        }
        current.condition = Some(condition);
        current.condition_is_constraint = incoming.condition_is_constraint;
    }

    current.privileges.extend(incoming.privileges);
    Ok(())
}

fn revoke_from(
    current: &mut Permission,
    incoming: Permission,
    role: &str,
    policy: &GrantPolicy,
) -> CatalogResult<()> {
    if incoming.mask.is_some() {
        if current.mask.is_some() {
            current.clear_mask();
        } else if policy.strict_revoke {
            return Err(conflict(
                ConflictKind::MissingMask,
                role,
                current,
                "no mask is set".to_string(),
                policy,
            ));
        }
    }

    if incoming.condition.is_some() {
        if current.condition.is_some() {
            current.clear_condition();
        } else if policy.strict_revoke {
            return Err(conflict(
                ConflictKind::MissingCondition,
                role,
                current,
                "no condition is set".to_string(),
                policy,
            ));
        }
    }

    for privilege in &incoming.revoke_privileges {
        current.privileges.remove(privilege);
    }
    Ok(())
}

fn conflict(
    kind: ConflictKind,
    role: &str,
    current: &Permission,
    detail: String,
    policy: &GrantPolicy,
) -> CatalogError {
    if policy.log_conflicts {
        log::warn!(
            "Grant {} for role '{}' on {}: {}",
            kind,
            role,
            current.resource,
            detail
        );
    }
    CatalogError::Conflict {
        kind,
        role: role.to_string(),
        resource: current.resource.to_string(),
        detail,
    }
}
