//! Immutable build metadata.
//!
//! [`BuildInfo`] is assembled once in `main` from compile-time environment
//! and handed to whatever needs to report it. Release builds can stamp the
//! commit and date by exporting `BRANCH_WRANGLER_COMMIT` and
//! `BRANCH_WRANGLER_BUILD_DATE` while compiling.

use serde::Serialize;
use std::fmt;

const UNKNOWN: &str = "unknown";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildInfo {
    pub name: String,
    pub version: String,
    pub commit_hash: String,
    pub build_date: String,
    pub os: String,
    pub arch: String,
}

impl BuildInfo {
    pub fn from_env() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            commit_hash: option_env!("BRANCH_WRANGLER_COMMIT")
                .unwrap_or(UNKNOWN)
                .to_string(),
            build_date: option_env!("BRANCH_WRANGLER_BUILD_DATE")
                .unwrap_or(UNKNOWN)
                .to_string(),
            os: std::env::consts::OS.to_string(),
            arch: std::env::consts::ARCH.to_string(),
        }
    }

    pub fn is_development_build(&self) -> bool {
        self.build_date == UNKNOWN
    }

    pub fn short_commit(&self) -> &str {
        let end = self.commit_hash.len().min(7);
        &self.commit_hash[..end]
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_development_build() {
            return write!(f, "{} {} (development build)", self.name, self.version);
        }
        write!(
            f,
            "{} {}\nBuild: {}\nCommit: {}\nTarget: {}/{}",
            self.name,
            self.version,
            self.build_date,
            self.short_commit(),
            self.os,
            self.arch
        )
    }
}
