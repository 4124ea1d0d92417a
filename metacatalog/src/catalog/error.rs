// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Error types for the metadata catalog

use std::fmt;
use thiserror::Error;

/// What kind of grant conflict was detected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConflictKind {
    /// Two independent masks target the same resource
    MaskConflict,
    /// Two independent row conditions target the same resource
    ConditionConflict,
    /// A strict revoke asked to clear a mask that was never set
    MissingMask,
    /// A strict revoke asked to clear a condition that was never set
    MissingCondition,
}

impl fmt::Display for ConflictKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ConflictKind::MaskConflict => "mask conflict",
            ConflictKind::ConditionConflict => "condition conflict",
            ConflictKind::MissingMask => "no mask to revoke",
            ConflictKind::MissingCondition => "no condition to revoke",
        };
        write!(f, "{}", s)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Duplicate record: {kind} '{name}' already exists")]
    DuplicateRecord { kind: &'static str, name: String },

    #[error("Grant {kind} for role '{role}' on {resource}: {detail}")]
    Conflict {
        kind: ConflictKind,
        role: String,
        resource: String,
        detail: String,
    },
}

impl CatalogError {
    pub fn duplicate_schema(name: impl Into<String>) -> Self {
        CatalogError::DuplicateRecord {
            kind: "schema",
            name: name.into(),
        }
    }

    /// Conflict kind, if this is a grant conflict
    pub fn conflict_kind(&self) -> Option<ConflictKind> {
        match self {
            CatalogError::Conflict { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}

pub type CatalogResult<T> = Result<T, CatalogError>;
