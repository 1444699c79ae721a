//! Core functionality for branch-wrangler.
//!
//! This module provides the branch state taxonomy, the classifier and its
//! ports, the remote-response cache, presentation filters and the adapters
//! that back the ports with git and GitHub.

pub mod branch_state;
pub mod build_info;
pub mod classifier;
pub mod colors;
pub mod command_init;
pub mod config;
pub mod dirs;
pub mod error;
pub mod filter;
pub mod git;
pub mod github;
pub mod output;
pub mod ports;
pub mod remote_cache;
pub mod state;
pub mod ttl_cache;

// === Error handling ===
// Core error types and result type used throughout the application
pub use error::{Result, WranglerError};

// === Branch states ===
// The closed set of states a local branch can be classified into
pub use branch_state::BranchState;

// === Branch data ===
// Facts gathered per branch and the classified record built from them
pub use state::{
    Branch, BranchFacts, Classification, CurrentHead, LocalBranch, PullRequest, PullRequestLink,
    PullRequestState,
};

// === Ports ===
// Seams between the classifier and the outside world
pub use ports::{RemoteRepositoryPort, VersionControlPort};

// === Classification ===
pub use classifier::{BranchFailure, Classifier, DetachedHeadScope, Reconciliation};

// === Caching ===
// TTL memoization of remote answers
pub use remote_cache::CachingRemote;
pub use ttl_cache::{Clock, SystemClock, TtlCache, DEFAULT_TTL};

// === Filtering ===
pub use filter::{
    predefined_filter_names, Filter, FilterMode, PredefinedFilter, PREDEFINED_FILTERS,
};

// === Adapters ===
// git2-backed repository access and the GitHub REST client
pub use git::GitRepo;
pub use github::{GitHubClient, OfflineRemote, RepositoryIdentity};

// === Configuration and build metadata ===
pub use build_info::BuildInfo;
pub use config::WranglerConfig;

// === Command initialization ===
pub use command_init::{ReconcileContext, ReconcileInit, ReconcileOptions};

// === Color system ===
pub use colors::{
    format_ahead_behind, format_branch_line, get_colored_state_label, get_state_color_style,
};

// === Output formatting ===
// Unified output formatting for consistent CLI presentation
pub use output::{print_error, print_info, print_section_header, print_success, print_warning};
