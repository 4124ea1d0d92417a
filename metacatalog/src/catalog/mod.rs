// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Metadata catalog
//!
//! This module implements the in-memory metadata catalog: the schema, datatype
//! and role registries, plus the grant engine that merges and revokes
//! permissions. [`manager::Catalog`] is the single entry point that owns all of
//! them.

pub mod config;
pub mod error;
pub mod grants;
pub mod manager;
pub mod ordered;
pub mod providers;
