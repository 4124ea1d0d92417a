// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Authorization overlay
//!
//! Grants attach permissions on resource patterns to roles. [`GrantStore`]
//! integrates incoming grants into the existing state, either as additional
//! allows (merge) or as revocations (revoke).

pub mod engine;
pub mod matcher;
pub mod permission;

pub use engine::GrantStore;
pub use matcher::{QualifiedNameMatcher, ResourceMatcher};
pub use permission::{Grant, Permission, Privilege, Resource, ResourceType};
