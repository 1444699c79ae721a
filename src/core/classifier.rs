//! Branch classification engine.
//!
//! [`Classifier`] turns the local facts of one branch, plus whatever the
//! remote service knows about it, into exactly one terminal [`BranchState`].
//! Checks run in a fixed order and the first one that matches wins:
//!
//! 1. detached HEAD
//! 2. no upstream
//! 3. no commits
//! 4. upstream configured but remote ref gone
//! 5. already reachable from a base branch
//! 6. first pull request for the branch, if the remote answers
//! 7. ahead/behind against the tracking ref
//!
//! Local facts are load-bearing: a failing [`VersionControlPort`] call is an
//! error. Remote facts are enrichment: a failing [`RemoteRepositoryPort`] call
//! drops the branch through to step 7.

use crate::core::{
    branch_state::BranchState,
    error::{Result, WranglerError},
    ports::{RemoteRepositoryPort, VersionControlPort},
    state::{
        Branch, BranchFacts, Classification, CurrentHead, LocalBranch, PullRequest,
        PullRequestState,
    },
};
use serde::{Deserialize, Serialize};

/// Which branches a detached HEAD marks as [`BranchState::DetachedHead`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetachedHeadScope {
    /// Only the branch whose tip HEAD is detached at
    #[default]
    CheckedOut,
    /// Every branch, whatever HEAD points at
    AllBranches,
}

impl DetachedHeadScope {
    fn applies(&self, head: &CurrentHead, branch: &LocalBranch) -> bool {
        if !head.is_detached {
            return false;
        }
        match self {
            DetachedHeadScope::AllBranches => true,
            DetachedHeadScope::CheckedOut => {
                head.commit_sha.as_deref() == Some(branch.last_commit_sha.as_str())
            }
        }
    }
}

/// A branch whose local facts could not be gathered
#[derive(Debug)]
pub struct BranchFailure {
    pub branch: String,
    pub error: WranglerError,
}

/// Result of a pass that keeps going past per-branch failures
#[derive(Debug, Default)]
pub struct Reconciliation {
    pub branches: Vec<Branch>,
    pub failures: Vec<BranchFailure>,
}

pub struct Classifier<V, R> {
    vcs: V,
    remote: R,
    base_branches: Vec<String>,
    detached_scope: DetachedHeadScope,
}

impl<V, R> Classifier<V, R>
where
    V: VersionControlPort,
    R: RemoteRepositoryPort,
{
    pub fn new(vcs: V, remote: R, base_branches: Vec<String>) -> Self {
        Self {
            vcs,
            remote,
            base_branches,
            detached_scope: DetachedHeadScope::default(),
        }
    }

    pub fn with_detached_scope(mut self, scope: DetachedHeadScope) -> Self {
        self.detached_scope = scope;
        self
    }

    pub fn vcs(&self) -> &V {
        &self.vcs
    }

    pub fn remote(&self) -> &R {
        &self.remote
    }

    pub fn base_branches(&self) -> &[String] {
        &self.base_branches
    }

    /// Classify every local branch; the first local-fact failure aborts the pass
    pub fn classify_all(&self) -> Result<Vec<Branch>> {
        let (head, locals) = self.enumerate()?;
        log::debug!("Classifying {} branches", locals.len());

        let mut branches = Vec::with_capacity(locals.len());
        for local in locals {
            let name = local.name.clone();
            let branch = self
                .classify_local(local, &head)
                .map_err(|e| WranglerError::classify_failed(&name, e))?;
            branches.push(branch);
        }
        Ok(branches)
    }

    /// Classify every local branch, collecting per-branch failures instead of
    /// aborting. Enumeration failures still abort.
    pub fn classify_all_tolerant(&self) -> Result<Reconciliation> {
        let (head, locals) = self.enumerate()?;
        let mut outcome = Reconciliation::default();

        for local in locals {
            let name = local.name.clone();
            match self.classify_local(local, &head) {
                Ok(branch) => outcome.branches.push(branch),
                Err(error) => {
                    log::warn!("Skipping branch '{name}': {error}");
                    outcome.failures.push(BranchFailure {
                        branch: name,
                        error,
                    });
                }
            }
        }
        Ok(outcome)
    }

    /// Read every local fact the decision order needs
    pub fn gather_facts(&self, branch: LocalBranch) -> Result<BranchFacts> {
        let commit_count = self.vcs.commit_count(&branch.name)?;
        let remote_ref_exists = self.vcs.remote_ref_exists(&branch.name)?;

        let (ahead_count, behind_count) = if !branch.tracking_ref.is_empty() && remote_ref_exists
        {
            self.vcs.ahead_behind(&branch.name, &branch.tracking_ref)?
        } else {
            (0, 0)
        };

        Ok(BranchFacts {
            branch,
            ahead_count,
            behind_count,
            commit_count,
            remote_ref_exists,
        })
    }

    /// Decide the state of one branch from its facts
    pub fn classify(&self, facts: &BranchFacts, head: &CurrentHead) -> Result<Classification> {
        if self.detached_scope.applies(head, &facts.branch) {
            return Ok(Classification::state(BranchState::DetachedHead));
        }

        if !facts.has_upstream() {
            return Ok(Classification::state(BranchState::NoUpstream));
        }

        if facts.commit_count == 0 {
            return Ok(Classification::state(BranchState::NoCommits));
        }

        if !facts.remote_ref_exists {
            return Ok(Classification::state(BranchState::OrphanRemoteDeleted));
        }

        let name = facts.name();
        for base in &self.base_branches {
            // A branch is never merged into itself.
            if base == name {
                continue;
            }
            if self.vcs.is_ancestor_of(name, base)? {
                log::debug!("Branch '{name}' is fully merged into '{base}'");
                return Ok(Classification::state(BranchState::FullyMergedBase));
            }
        }

        match self.remote.pull_requests_for_branch(name) {
            Ok(prs) => {
                if let Some(pr) = prs.first() {
                    if let Some(classification) = self.classify_pull_request(name, pr) {
                        return Ok(classification);
                    }
                }
            }
            Err(e) if e.is_remote() => {
                log::debug!("Pull request lookup for '{name}' failed, using git status: {e}");
            }
            Err(e) => {
                log::warn!("Pull request lookup for '{name}' failed, using git status: {e}");
            }
        }

        Ok(Classification::state(BranchState::from_ahead_behind(
            facts.ahead_count,
            facts.behind_count,
        )))
    }

    /// `None` means the pull request does not decide the state
    fn classify_pull_request(&self, name: &str, pr: &PullRequest) -> Option<Classification> {
        let state = match (&pr.state, pr.merged) {
            (PullRequestState::Open, _) if pr.draft => BranchState::DraftPR,
            (PullRequestState::Open, _) => BranchState::OpenPR,
            (PullRequestState::Closed, true) => match self.remote.remote_branch_exists(name) {
                Ok(true) => BranchState::MergedRemoteExists,
                Ok(false) => BranchState::StaleLocal,
                Err(e) => {
                    log::debug!("Remote branch lookup for '{name}' failed, using git status: {e}");
                    return None;
                }
            },
            (PullRequestState::Closed, false) => BranchState::ClosedPR,
            (PullRequestState::Other, _) => return None,
        };
        Some(Classification::from_pull_request(state, pr))
    }

    fn enumerate(&self) -> Result<(CurrentHead, Vec<LocalBranch>)> {
        let head = self.vcs.current_head()?;
        let locals = self
            .vcs
            .list_branches()
            .map_err(WranglerError::list_branches_failed)?;
        Ok((head, locals))
    }

    fn classify_local(&self, local: LocalBranch, head: &CurrentHead) -> Result<Branch> {
        let facts = self.gather_facts(local)?;
        let classification = self.classify(&facts, head)?;
        log::debug!(
            "Branch '{}' classified as {}",
            facts.name(),
            classification.state.wire_name()
        );
        Ok(Branch::new(facts, classification))
    }
}
