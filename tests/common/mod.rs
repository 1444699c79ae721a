//! Consolidated test utilities for branch-wrangler
//!
//! This module provides unified testing utilities for integration tests,
//! focused on real git repositories with a local bare `origin`.

pub mod assertions;
pub mod repository;
