//! Common test utilities for API integration tests
//!
//! This module provides shared test infrastructure for integration tests:
//! a schema wired to fresh in-memory stores, and helpers to execute GraphQL
//! documents and inspect their results.

#![allow(unused_imports)]

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
