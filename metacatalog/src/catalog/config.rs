// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
// Catalog configuration

use serde::{Deserialize, Serialize};

/// How the grant engine treats revokes that find nothing to act on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrantPolicy {
    /// Store a revoke whose role or resource has no existing grant,
    /// so the revocation stays on record for later merges
    pub record_unmatched_revokes: bool,

    /// Reject revoking a mask or condition that was never set
    pub strict_revoke: bool,

    /// Whether to log merge conflicts before they are returned
    pub log_conflicts: bool,
}

impl Default for GrantPolicy {
    fn default() -> Self {
        Self {
            record_unmatched_revokes: true,
            strict_revoke: false,
            log_conflicts: true,
        }
    }
}

impl GrantPolicy {
    /// Create a strict policy: unmatched mask or condition revokes are errors
    pub fn strict() -> Self {
        Self {
            record_unmatched_revokes: true,
            strict_revoke: true,
            log_conflicts: true,
        }
    }

    /// Create a lenient policy: revokes against nothing are dropped
    pub fn lenient() -> Self {
        Self {
            record_unmatched_revokes: false,
            strict_revoke: false,
            log_conflicts: false,
        }
    }
}

/// Configuration for a [`Catalog`](crate::Catalog)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Grant merge and revoke behavior
    pub grants: GrantPolicy,
}

impl CatalogConfig {
    pub fn strict() -> Self {
        Self {
            grants: GrantPolicy::strict(),
        }
    }

    pub fn lenient() -> Self {
        Self {
            grants: GrantPolicy::lenient(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_records_revokes() {
        let policy = GrantPolicy::default();
        assert!(policy.record_unmatched_revokes);
        assert!(!policy.strict_revoke);
    }

    #[test]
    fn test_presets() {
        assert!(CatalogConfig::strict().grants.strict_revoke);
        assert!(!CatalogConfig::lenient().grants.record_unmatched_revokes);
        assert_eq!(CatalogConfig::default().grants, GrantPolicy::default());
    }
}
