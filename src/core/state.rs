//! Branch and pull-request data structures.
//!
//! This module defines the values that flow through a reconciliation pass:
//! facts read from the local repository, records returned by the remote
//! service, and the classified [`Branch`] that comes out the other end.
//!
//! # Public API
//! - [`LocalBranch`]: One enumerated local branch, before any counting
//! - [`BranchFacts`]: A local branch plus every local fact the classifier needs
//! - [`CurrentHead`]: What the working copy has checked out
//! - [`PullRequest`]: A pull-request record from the remote service
//! - [`Branch`]: A fully classified branch
//!
//! # Lifecycle
//! A [`Branch`] is only ever built from [`BranchFacts`] together with its
//! [`Classification`], so an unclassified branch is unrepresentable.

use crate::core::branch_state::BranchState;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// A local branch as enumerated by the version-control port
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalBranch {
    pub name: String,
    pub last_commit_time: Option<DateTime<FixedOffset>>,
    pub author: String,
    pub last_commit_sha: String,
    /// Short upstream name such as `origin/feature-x`; empty without upstream
    pub tracking_ref: String,
    pub is_current: bool,
}

/// Local facts gathered for one branch
#[derive(Debug, Clone, PartialEq)]
pub struct BranchFacts {
    pub branch: LocalBranch,
    pub ahead_count: usize,
    pub behind_count: usize,
    pub commit_count: usize,
    pub remote_ref_exists: bool,
}

impl BranchFacts {
    pub fn name(&self) -> &str {
        &self.branch.name
    }

    pub fn has_upstream(&self) -> bool {
        !self.branch.tracking_ref.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentHead {
    /// Checked-out branch; `None` when detached or unborn
    pub branch_name: Option<String>,
    pub is_detached: bool,
    /// Commit HEAD points at, if any
    pub commit_sha: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PullRequestState {
    Open,
    Closed,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequest {
    pub number: u64,
    pub title: String,
    pub state: PullRequestState,
    pub draft: bool,
    pub merged: bool,
    pub url: String,
}

/// Pull-request metadata attached to a branch whose state came from it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestLink {
    pub number: u64,
    pub title: String,
    pub url: String,
}

impl From<&PullRequest> for PullRequestLink {
    fn from(pr: &PullRequest) -> Self {
        Self {
            number: pr.number,
            title: pr.title.clone(),
            url: pr.url.clone(),
        }
    }
}

/// Outcome of classifying a single branch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub state: BranchState,
    pub pull_request: Option<PullRequestLink>,
}

impl Classification {
    pub fn state(state: BranchState) -> Self {
        Self {
            state,
            pull_request: None,
        }
    }

    pub fn from_pull_request(state: BranchState, pr: &PullRequest) -> Self {
        Self {
            state,
            pull_request: Some(PullRequestLink::from(pr)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Branch {
    pub name: String,
    pub state: BranchState,
    pub last_commit_time: Option<DateTime<FixedOffset>>,
    pub author: String,
    pub last_commit_sha: String,
    pub ahead_count: usize,
    pub behind_count: usize,
    pub tracking_ref: String,
    pub commit_count: usize,
    pub pull_request: Option<PullRequestLink>,
    pub is_current: bool,
}

impl Branch {
    pub fn new(facts: BranchFacts, classification: Classification) -> Self {
        let BranchFacts {
            branch,
            ahead_count,
            behind_count,
            commit_count,
            ..
        } = facts;

        Self {
            name: branch.name,
            state: classification.state,
            last_commit_time: branch.last_commit_time,
            author: branch.author,
            last_commit_sha: branch.last_commit_sha,
            ahead_count,
            behind_count,
            tracking_ref: branch.tracking_ref,
            commit_count,
            pull_request: classification.pull_request,
            is_current: branch.is_current,
        }
    }

    pub fn short_sha(&self) -> &str {
        let end = self.last_commit_sha.len().min(7);
        &self.last_commit_sha[..end]
    }
}
