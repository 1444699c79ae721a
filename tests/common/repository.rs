//! Git repository management and setup utilities
//!
//! Provides functions for creating test repositories that track a local bare
//! repository as `origin`, so push, upstream and remote-deletion scenarios can
//! be exercised without a network.

#![allow(dead_code)]

use assert_cmd::prelude::*;
use branch_wrangler::core::error::{Result, WranglerError};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Test repository setup result. The TempDir must be kept alive for the
/// duration of the test to prevent cleanup.
pub struct TestRepo {
    pub temp_dir: TempDir,
    /// Working copy
    pub path: PathBuf,
    /// Bare repository registered as `origin`, if any
    pub origin: Option<PathBuf>,
}

impl TestRepo {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Config path that never exists, so runs use default settings
    pub fn missing_config(&self) -> PathBuf {
        self.temp_dir.path().join("no-such-config.json")
    }

    pub fn write_config(&self, json: &str) -> Result<PathBuf> {
        let path = self.temp_dir.path().join("config.json");
        fs::write(&path, json)?;
        Ok(path)
    }
}

/// Runs git in `dir`, failing on a non-zero exit
pub fn git(dir: &Path, args: &[&str]) -> Result<()> {
    let output = Command::new("git").args(args).current_dir(dir).output()?;
    if !output.status.success() {
        return Err(WranglerError::git_command_failed(format!(
            "git {}: {}",
            args.join(" "),
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }
    Ok(())
}

/// Sets up a fresh git repository on `main` with identity configured
pub fn setup_test_repo() -> Result<TestRepo> {
    let temp_dir = TempDir::new()?;
    let repo_path = temp_dir.path().join("work");
    fs::create_dir(&repo_path)?;

    git(&repo_path, &["init", "-b", "main"])?;
    git(&repo_path, &["config", "user.name", "Test User"])?;
    git(&repo_path, &["config", "user.email", "test@example.com"])?;

    Ok(TestRepo {
        temp_dir,
        path: repo_path,
        origin: None,
    })
}

/// A repository with one commit on `main`
pub fn setup_test_repo_with_initial_commit() -> Result<TestRepo> {
    let repo = setup_test_repo()?;
    commit_file(&repo.path, "initial.txt", "initial content\n", "Initial commit")?;
    Ok(repo)
}

/// A repository with one commit on `main`, pushed to a bare `origin`
pub fn setup_test_repo_with_origin() -> Result<TestRepo> {
    let mut repo = setup_test_repo_with_initial_commit()?;

    let origin = repo.temp_dir.path().join("origin.git");
    fs::create_dir(&origin)?;
    git(&origin, &["init", "--bare", "-b", "main"])?;

    let origin_str = origin.to_string_lossy().to_string();
    git(&repo.path, &["remote", "add", "origin", &origin_str])?;
    push_branch(&repo.path, "main")?;

    repo.origin = Some(origin);
    Ok(repo)
}

pub fn create_file(repo_path: &Path, filename: &str, content: &str) -> Result<()> {
    fs::write(repo_path.join(filename), content)?;
    Ok(())
}

/// Writes, stages and commits a single file
pub fn commit_file(repo_path: &Path, filename: &str, content: &str, message: &str) -> Result<()> {
    create_file(repo_path, filename, content)?;
    git(repo_path, &["add", filename])?;
    git(repo_path, &["commit", "-m", message])
}

/// Creates `branch` at HEAD and switches to it
pub fn create_branch(repo_path: &Path, branch: &str) -> Result<()> {
    git(repo_path, &["checkout", "-b", branch])
}

pub fn checkout_branch(repo_path: &Path, branch: &str) -> Result<()> {
    git(repo_path, &["checkout", branch])
}

/// Pushes `branch` to origin and sets it as upstream
pub fn push_branch(repo_path: &Path, branch: &str) -> Result<()> {
    git(repo_path, &["push", "-u", "origin", branch])
}

/// Deletes `branch` on origin, keeping the local upstream configuration
pub fn delete_remote_branch(repo_path: &Path, branch: &str) -> Result<()> {
    git(repo_path, &["push", "origin", "--delete", branch])
}

/// The binary under test, run inside the repository without colors
pub fn wrangler_command(repo: &TestRepo) -> Result<Command> {
    let mut cmd = Command::cargo_bin("branch-wrangler")
        .map_err(|e| WranglerError::git_command_failed(e.to_string()))?;
    cmd.current_dir(&repo.path).env("NO_COLOR", "1");
    Ok(cmd)
}
