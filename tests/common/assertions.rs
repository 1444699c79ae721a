//! Common assertion helpers for test output validation

#![allow(dead_code)]

use branch_wrangler::core::error::{Result, WranglerError};
use predicates::prelude::*;
use serde_json::Value;

/// Creates a predicate that checks for git repository error messages
pub fn not_in_git_repo() -> impl Predicate<str> {
    predicates::str::contains("Not in a git repository")
}

/// Creates a predicate that checks for a numbered or current-branch marker
pub fn has_marker(marker: &str, branch: &str) -> impl Predicate<str> {
    predicates::str::contains(format!("[{marker}] {branch}"))
}

/// Parses `list --json` output into `(name, state)` pairs
pub fn states_from_json(stdout: &[u8]) -> Result<Vec<(String, String)>> {
    let branches: Vec<Value> = serde_json::from_slice(stdout)?;
    branches
        .iter()
        .map(|b| {
            let name = b["name"].as_str();
            let state = b["state"].as_str();
            match (name, state) {
                (Some(name), Some(state)) => Ok((name.to_string(), state.to_string())),
                _ => Err(WranglerError::git_command_failed(format!(
                    "unexpected branch record: {b}"
                ))),
            }
        })
        .collect()
}

/// State of `branch` in `list --json` output
pub fn state_of(states: &[(String, String)], branch: &str) -> Option<String> {
    states
        .iter()
        .find(|(name, _)| name == branch)
        .map(|(_, state)| state.clone())
}
