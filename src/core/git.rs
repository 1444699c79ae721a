//! Git repository operations and branch fact gathering.
//!
//! This module provides [`GitRepo`], the `git2`-backed implementation of
//! [`VersionControlPort`]. Read-only facts are taken in-process through
//! `git2`; the few mutations the front end offers shell out to `git` so they
//! honour the user's hooks and configuration.
//!
//! # Public API
//! - [`GitRepo`]: Main interface for git repository operations
//!
//! # Key Features
//! - **Branch enumeration**: Name, tip commit, author, upstream and HEAD flag
//! - **Sync state**: Ahead/behind counts against the tracking ref
//! - **Ancestry**: Merge-base style "is already merged into" checks
//! - **Remote identity**: URL of the configured remote

use crate::core::{
    error::{Result, WranglerError},
    ports::VersionControlPort,
    state::{CurrentHead, LocalBranch},
};
use chrono::{DateTime, FixedOffset};
use git2::{BranchType, ErrorCode, Oid, Repository};
use std::path::Path;

pub const DEFAULT_REMOTE: &str = "origin";

pub struct GitRepo {
    repo: Repository,
    remote_name: String,
}

impl GitRepo {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Repository::discover(path)?;
        Ok(GitRepo {
            repo,
            remote_name: DEFAULT_REMOTE.to_string(),
        })
    }

    /// Use `remote` instead of `origin` for remote-ref and URL lookups
    pub fn with_remote(mut self, remote: impl Into<String>) -> Self {
        self.remote_name = remote.into();
        self
    }

    pub fn remote_name(&self) -> &str {
        &self.remote_name
    }

    /// Execute a git command in the repository's working directory
    fn execute_git_command(&self, mut cmd: std::process::Command) -> Result<()> {
        let workdir = self.repo.workdir().ok_or_else(|| {
            WranglerError::git_command_failed("Repository has no working directory")
        })?;

        cmd.current_dir(workdir);

        let output = cmd.output().map_err(WranglerError::Io)?;

        if !output.status.success() {
            let error_msg = String::from_utf8_lossy(&output.stderr);
            return Err(WranglerError::git_command_failed(error_msg.trim()));
        }

        Ok(())
    }

    /// URL of the configured remote
    pub fn remote_url(&self) -> Result<String> {
        let remote = self.repo.find_remote(&self.remote_name)?;
        remote
            .url()
            .map(str::to_string)
            .ok_or_else(|| WranglerError::remote_url_missing(&self.remote_name))
    }

    /// Delete a local branch with `git branch -d`, refusing unmerged work
    pub fn delete_branch(&self, branch_name: &str) -> Result<()> {
        let mut cmd = std::process::Command::new("git");
        cmd.args(["branch", "-d", branch_name]);
        self.execute_git_command(cmd).map_err(|e| match e {
            WranglerError::GitCommandFailed { message } => {
                WranglerError::branch_delete_failed(branch_name, message)
            }
            other => other,
        })
    }

    fn local_oid(&self, branch: &str) -> Result<Oid> {
        let reference = self.repo.find_reference(&format!("refs/heads/{branch}"))?;
        Ok(reference.peel_to_commit()?.id())
    }

    /// Resolve a rev, treating "does not exist" as `None`
    fn try_resolve(&self, rev: &str) -> Result<Option<Oid>> {
        match self.repo.revparse_single(rev) {
            Ok(object) => Ok(Some(object.peel_to_commit()?.id())),
            Err(e) if e.code() == ErrorCode::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Short upstream name, empty when no upstream is configured
    fn upstream_name(&self, refname: &str) -> Result<String> {
        match self.repo.branch_upstream_name(refname) {
            Ok(buf) => {
                let full = buf.as_str().ok_or(WranglerError::InvalidUtf8BranchName)?;
                Ok(shorten_ref(full).to_string())
            }
            Err(e) if e.code() == ErrorCode::NotFound => Ok(String::new()),
            Err(e) => Err(e.into()),
        }
    }
}

impl VersionControlPort for GitRepo {
    fn list_branches(&self) -> Result<Vec<LocalBranch>> {
        let mut branches = Vec::new();

        for entry in self.repo.branches(Some(BranchType::Local))? {
            let (branch, _) = entry?;
            let name = branch
                .name()?
                .ok_or(WranglerError::InvalidUtf8BranchName)?
                .to_string();
            let refname = branch
                .get()
                .name()
                .ok_or(WranglerError::InvalidUtf8BranchName)?
                .to_string();

            let commit = branch.get().peel_to_commit()?;
            let author = commit.author().name().unwrap_or_default().to_string();

            branches.push(LocalBranch {
                tracking_ref: self.upstream_name(&refname)?,
                last_commit_time: commit_time(&commit.time()),
                author,
                last_commit_sha: commit.id().to_string(),
                is_current: branch.is_head(),
                name,
            });
        }

        branches.sort_by(|a, b| a.name.cmp(&b.name));
        log::debug!("Found {} local branches", branches.len());
        Ok(branches)
    }

    fn current_head(&self) -> Result<CurrentHead> {
        let is_detached = self.repo.head_detached()?;

        match self.repo.head() {
            Ok(head) => Ok(CurrentHead {
                branch_name: if head.is_branch() {
                    head.shorthand().map(str::to_string)
                } else {
                    None
                },
                is_detached,
                commit_sha: head.target().map(|oid| oid.to_string()),
            }),
            Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => {
                Ok(CurrentHead {
                    branch_name: None,
                    is_detached,
                    commit_sha: None,
                })
            }
            Err(e) => Err(e.into()),
        }
    }

    fn ahead_behind(&self, local: &str, remote_ref: &str) -> Result<(usize, usize)> {
        let local_oid = self.local_oid(local)?;
        let remote_oid = self
            .repo
            .revparse_single(remote_ref)?
            .peel_to_commit()?
            .id();
        Ok(self.repo.graph_ahead_behind(local_oid, remote_oid)?)
    }

    fn commit_count(&self, branch: &str) -> Result<usize> {
        let oid = match self.try_resolve(&format!("refs/heads/{branch}"))? {
            Some(oid) => oid,
            None => return Ok(0),
        };

        let mut walk = self.repo.revwalk()?;
        walk.push(oid)?;
        let mut count = 0;
        for commit in walk {
            commit?;
            count += 1;
        }
        Ok(count)
    }

    fn remote_ref_exists(&self, branch: &str) -> Result<bool> {
        let refname = format!("refs/remotes/{}/{}", self.remote_name, branch);
        match self.repo.find_reference(&refname) {
            Ok(_) => Ok(true),
            Err(e) if e.code() == ErrorCode::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn is_ancestor_of(&self, branch: &str, base: &str) -> Result<bool> {
        let base_oid = match self.try_resolve(&format!("refs/heads/{base}"))? {
            Some(oid) => oid,
            None => return Ok(false),
        };
        let branch_oid = self.local_oid(branch)?;

        if branch_oid == base_oid {
            return Ok(true);
        }
        Ok(self.repo.graph_descendant_of(base_oid, branch_oid)?)
    }
}

/// `refs/remotes/origin/x` -> `origin/x`, `refs/heads/x` -> `x`
fn shorten_ref(full: &str) -> &str {
    full.strip_prefix("refs/remotes/")
        .or_else(|| full.strip_prefix("refs/heads/"))
        .unwrap_or(full)
}

fn commit_time(time: &git2::Time) -> Option<DateTime<FixedOffset>> {
    let offset = FixedOffset::east_opt(time.offset_minutes() * 60)?;
    DateTime::from_timestamp(time.seconds(), 0).map(|utc| utc.with_timezone(&offset))
}
