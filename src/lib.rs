// Copyright 2026 bcv-rates Contributors
// SPDX-License-Identifier: Apache-2.0

//! bcv-rates — USD/EUR exchange rates scraped from the Banco Central de
//! Venezuela website, exposed over a small HTTP API.
//!
//! This library crate exposes the core modules for integration testing.

pub mod error;
pub mod extraction;
pub mod fetch;
pub mod rest;
pub mod types;
