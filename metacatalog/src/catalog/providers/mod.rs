// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Catalog registries
//!
//! Each registry owns one kind of catalog record. The [`Catalog`](crate::Catalog)
//! composes them and is the only place they are mutated from outside.

pub mod datatype;
pub mod schema;
pub mod security;
