//! Type-safe branch state enumeration.
//!
//! This module defines [`BranchState`], the closed set of terminal outcomes a
//! branch can be classified into. Every state carries one human-readable label
//! and one stable wire name used in JSON output and on the command line.
//!
//! # Public API
//! - [`BranchState`]: Main enumeration for all branch states
//!
//! # Key Features
//! - **Git-status fallback**: [`BranchState::from_ahead_behind`] is total over
//!   every `(ahead, behind)` pair
//! - **Display formatting**: Labels defined once, used by every output path
//! - **Parsing**: Wire names and variant names, case-insensitive

use crate::core::error::{Result, WranglerError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BranchState {
    /// HEAD is detached at this branch's tip
    DetachedHead,
    /// No upstream configured
    NoUpstream,
    /// Upstream configured but the remote ref is gone
    OrphanRemoteDeleted,
    InSync,
    UnpushedAhead,
    BehindRemote,
    Diverged,
    #[serde(rename = "DRAFT_PR")]
    DraftPR,
    #[serde(rename = "OPEN_PR")]
    OpenPR,
    #[serde(rename = "CLOSED_PR")]
    ClosedPR,
    /// Pull request merged, remote branch still present
    MergedRemoteExists,
    /// Pull request merged, remote branch deleted
    StaleLocal,
    /// Already reachable from a base branch
    FullyMergedBase,
    NoCommits,
    // Reserved: declared for compatibility, never produced by the classifier.
    UpstreamChanged,
    RemoteRenamed,
    UpstreamGone,
}

impl BranchState {
    /// Every state, in declaration order
    pub const ALL: [BranchState; 17] = [
        BranchState::DetachedHead,
        BranchState::NoUpstream,
        BranchState::OrphanRemoteDeleted,
        BranchState::InSync,
        BranchState::UnpushedAhead,
        BranchState::BehindRemote,
        BranchState::Diverged,
        BranchState::DraftPR,
        BranchState::OpenPR,
        BranchState::ClosedPR,
        BranchState::MergedRemoteExists,
        BranchState::StaleLocal,
        BranchState::FullyMergedBase,
        BranchState::NoCommits,
        BranchState::UpstreamChanged,
        BranchState::RemoteRenamed,
        BranchState::UpstreamGone,
    ];

    /// Classify purely by sync state relative to the tracking ref
    pub fn from_ahead_behind(ahead: usize, behind: usize) -> Self {
        match (ahead > 0, behind > 0) {
            (false, false) => BranchState::InSync,
            (true, false) => BranchState::UnpushedAhead,
            (false, true) => BranchState::BehindRemote,
            (true, true) => BranchState::Diverged,
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            BranchState::DetachedHead => "—",
            BranchState::NoUpstream => "No Upstream",
            BranchState::OrphanRemoteDeleted => "Orphan (remote deleted)",
            BranchState::InSync => "In Sync with Remote",
            BranchState::UnpushedAhead => "Ahead of Remote",
            BranchState::BehindRemote => "Behind Remote",
            BranchState::Diverged => "Diverged from Remote",
            BranchState::DraftPR => "Draft PR",
            BranchState::OpenPR => "Open PR",
            BranchState::ClosedPR => "Closed PR",
            BranchState::MergedRemoteExists => "Merged (remote kept)",
            BranchState::StaleLocal => "Merged (remote deleted)",
            BranchState::FullyMergedBase => "Fully Merged Into Base",
            BranchState::NoCommits => "Empty Branch",
            BranchState::UpstreamChanged => "Upstream Moved",
            BranchState::RemoteRenamed => "Remote Renamed",
            BranchState::UpstreamGone => "Upstream Gone",
        }
    }

    /// Stable name used in JSON output and accepted by `--state`
    pub fn wire_name(&self) -> &'static str {
        match self {
            BranchState::DetachedHead => "DETACHED_HEAD",
            BranchState::NoUpstream => "NO_UPSTREAM",
            BranchState::OrphanRemoteDeleted => "ORPHAN_REMOTE_DELETED",
            BranchState::InSync => "IN_SYNC",
            BranchState::UnpushedAhead => "UNPUSHED_AHEAD",
            BranchState::BehindRemote => "BEHIND_REMOTE",
            BranchState::Diverged => "DIVERGED",
            BranchState::DraftPR => "DRAFT_PR",
            BranchState::OpenPR => "OPEN_PR",
            BranchState::ClosedPR => "CLOSED_PR",
            BranchState::MergedRemoteExists => "MERGED_REMOTE_EXISTS",
            BranchState::StaleLocal => "STALE_LOCAL",
            BranchState::FullyMergedBase => "FULLY_MERGED_BASE",
            BranchState::NoCommits => "NO_COMMITS",
            BranchState::UpstreamChanged => "UPSTREAM_CHANGED",
            BranchState::RemoteRenamed => "REMOTE_RENAMED",
            BranchState::UpstreamGone => "UPSTREAM_GONE",
        }
    }

    /// States that exist in the taxonomy but are never assigned
    pub fn is_reserved(&self) -> bool {
        matches!(
            self,
            BranchState::UpstreamChanged | BranchState::RemoteRenamed | BranchState::UpstreamGone
        )
    }

    /// States whose classification came from a pull-request lookup
    pub fn is_pull_request_derived(&self) -> bool {
        matches!(
            self,
            BranchState::DraftPR
                | BranchState::OpenPR
                | BranchState::ClosedPR
                | BranchState::MergedRemoteExists
                | BranchState::StaleLocal
        )
    }
}

impl fmt::Display for BranchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for BranchState {
    type Err = WranglerError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_lowercase();

        BranchState::ALL
            .iter()
            .copied()
            .find(|state| state.wire_name().replace('_', "").to_lowercase() == wanted)
            .ok_or_else(|| WranglerError::unknown_state(s))
    }
}
