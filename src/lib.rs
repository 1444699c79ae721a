//! Branch Wrangler - classify every local git branch into one actionable state.
//!
//! This library answers "what should I do with this branch?" for each local
//! branch by combining local git facts with pull request data from the
//! hosting service, and provides filtering over the result.
//!
//! # Public API
//! The main public interface is re-exported from the [`core`] module, which provides:
//! - The [`BranchState`] taxonomy
//! - The [`Classifier`] and its two ports
//! - TTL caching of remote answers
//! - Presentation filters
//! - Error handling and result types

pub mod commands;
pub mod core;

// Re-export the core public API for external users
pub use core::{
    // Classified records
    Branch,
    BranchFacts,
    // State taxonomy
    BranchState,
    BuildInfo,
    CachingRemote,
    Classification,
    // Classification
    Classifier,
    CurrentHead,
    DetachedHeadScope,
    // Filtering
    Filter,
    FilterMode,
    // Adapters
    GitHubClient,
    GitRepo,
    LocalBranch,
    OfflineRemote,
    PullRequest,
    Reconciliation,
    // Ports
    RemoteRepositoryPort,
    Result,
    TtlCache,
    VersionControlPort,
    WranglerConfig,
    // Error handling
    WranglerError,
};
