use assert_cmd::prelude::*;
use predicates::prelude::*;

mod common;
use common::{assertions::*, repository::*};
use tempfile::TempDir;

#[cfg(test)]
mod list_command_tests {
    use super::*;

    /// main plus one branch per git-derived state
    fn setup_branch_zoo() -> anyhow::Result<TestRepo> {
        let repo = setup_test_repo_with_origin()?;

        create_branch(&repo.path, "feature-sync")?;
        commit_file(&repo.path, "sync.txt", "sync\n", "Sync work")?;
        push_branch(&repo.path, "feature-sync")?;
        checkout_branch(&repo.path, "main")?;

        create_branch(&repo.path, "feature-ahead")?;
        commit_file(&repo.path, "ahead.txt", "one\n", "Pushed work")?;
        push_branch(&repo.path, "feature-ahead")?;
        commit_file(&repo.path, "ahead.txt", "two\n", "Unpushed work")?;
        checkout_branch(&repo.path, "main")?;

        create_branch(&repo.path, "local-only")?;
        commit_file(&repo.path, "local.txt", "local\n", "Local work")?;
        checkout_branch(&repo.path, "main")?;

        create_branch(&repo.path, "merged-base")?;
        push_branch(&repo.path, "merged-base")?;
        checkout_branch(&repo.path, "main")?;

        create_branch(&repo.path, "orphaned")?;
        commit_file(&repo.path, "orphan.txt", "orphan\n", "Orphan work")?;
        push_branch(&repo.path, "orphaned")?;
        delete_remote_branch(&repo.path, "orphaned")?;
        checkout_branch(&repo.path, "main")?;

        Ok(repo)
    }

    fn list_json(repo: &TestRepo, extra: &[&str]) -> anyhow::Result<Vec<(String, String)>> {
        let config = repo.missing_config();
        let output = wrangler_command(repo)?
            .arg("--config")
            .arg(&config)
            .args(["list", "--json", "--offline"])
            .args(extra)
            .assert()
            .success();
        Ok(states_from_json(&output.get_output().stdout)?)
    }

    #[test]
    fn test_list_classifies_git_states() -> anyhow::Result<()> {
        let repo = setup_branch_zoo()?;
        let states = list_json(&repo, &[])?;

        assert_eq!(state_of(&states, "main").as_deref(), Some("IN_SYNC"));
        assert_eq!(state_of(&states, "feature-sync").as_deref(), Some("IN_SYNC"));
        assert_eq!(
            state_of(&states, "feature-ahead").as_deref(),
            Some("UNPUSHED_AHEAD")
        );
        assert_eq!(state_of(&states, "local-only").as_deref(), Some("NO_UPSTREAM"));
        assert_eq!(
            state_of(&states, "merged-base").as_deref(),
            Some("FULLY_MERGED_BASE")
        );
        assert_eq!(
            state_of(&states, "orphaned").as_deref(),
            Some("ORPHAN_REMOTE_DELETED")
        );
        assert_eq!(states.len(), 6);

        Ok(())
    }

    #[test]
    fn test_list_json_is_sorted_by_name() -> anyhow::Result<()> {
        let repo = setup_branch_zoo()?;
        let names: Vec<String> = list_json(&repo, &[])?
            .into_iter()
            .map(|(name, _)| name)
            .collect();

        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
        Ok(())
    }

    #[test]
    fn test_list_text_output_marks_current_branch() -> anyhow::Result<()> {
        let repo = setup_branch_zoo()?;
        let config = repo.missing_config();

        wrangler_command(&repo)?
            .arg("--config")
            .arg(&config)
            .args(["list", "--offline"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Local Branches:"))
            .stdout(has_marker("*", "main"))
            .stdout(has_marker("1", "feature-ahead"))
            .stdout(has_marker("2", "feature-sync"))
            .stdout(predicate::str::contains("Ahead of Remote"))
            .stdout(predicate::str::contains("No Upstream"));

        Ok(())
    }

    #[test]
    fn test_list_predefined_filter() -> anyhow::Result<()> {
        let repo = setup_branch_zoo()?;
        let states = list_json(&repo, &["--filter", "ahead"])?;

        assert_eq!(
            states,
            vec![("feature-ahead".to_string(), "UNPUSHED_AHEAD".to_string())]
        );
        Ok(())
    }

    #[test]
    fn test_list_state_and_search_combine_with_or() -> anyhow::Result<()> {
        let repo = setup_branch_zoo()?;
        let states = list_json(&repo, &["--state", "NO_UPSTREAM", "--search", "SYNC"])?;

        let names: Vec<&str> = states.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, vec!["feature-sync", "local-only"]);
        Ok(())
    }

    #[test]
    fn test_list_unknown_filter_fails() -> anyhow::Result<()> {
        let repo = setup_test_repo_with_initial_commit()?;
        let config = repo.missing_config();

        wrangler_command(&repo)?
            .arg("--config")
            .arg(&config)
            .args(["list", "--filter", "Ancient"])
            .assert()
            .failure()
            .stdout(predicate::str::contains("Unknown filter 'Ancient'"))
            .stdout(predicate::str::contains("Stale, PR, Merged, Ahead"));

        Ok(())
    }

    #[test]
    fn test_list_empty_filter_result() -> anyhow::Result<()> {
        let repo = setup_branch_zoo()?;
        let config = repo.missing_config();

        wrangler_command(&repo)?
            .arg("--config")
            .arg(&config)
            .args(["list", "--offline", "--filter", "Stale"])
            .assert()
            .success()
            .stdout(predicate::str::contains(
                "No branches match filter 'Stale Branches'",
            ));

        Ok(())
    }

    #[test]
    fn test_base_branches_override() -> anyhow::Result<()> {
        let repo = setup_branch_zoo()?;

        // develop does not exist, so nothing counts as merged
        let states = list_json(&repo, &["--base-branches", "develop"])?;
        assert_eq!(state_of(&states, "merged-base").as_deref(), Some("IN_SYNC"));
        Ok(())
    }

    #[test]
    fn test_base_branches_from_config_file() -> anyhow::Result<()> {
        let repo = setup_branch_zoo()?;
        let config = repo.write_config(r#"{ "base_branches": ["trunk"] }"#)?;

        let output = wrangler_command(&repo)?
            .arg("--config")
            .arg(&config)
            .args(["list", "--json", "--offline"])
            .assert()
            .success();
        let states = states_from_json(&output.get_output().stdout)?;

        assert_eq!(state_of(&states, "merged-base").as_deref(), Some("IN_SYNC"));
        Ok(())
    }

    #[test]
    fn test_malformed_config_fails() -> anyhow::Result<()> {
        let repo = setup_test_repo_with_initial_commit()?;
        let config = repo.write_config("{ not json")?;

        wrangler_command(&repo)?
            .arg("--config")
            .arg(&config)
            .args(["list", "--offline"])
            .assert()
            .failure()
            .stdout(predicate::str::contains("Failed to parse config"));

        Ok(())
    }

    #[test]
    fn test_list_outside_git_repo() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;

        let mut cmd = assert_cmd::Command::cargo_bin("branch-wrangler")?;
        cmd.current_dir(temp_dir.path())
            .env("NO_COLOR", "1")
            .arg("--config")
            .arg(temp_dir.path().join("absent.json"))
            .args(["list", "--offline"])
            .assert()
            .failure()
            .stdout(not_in_git_repo());

        Ok(())
    }

    #[test]
    fn test_keep_going_lists_healthy_branches() -> anyhow::Result<()> {
        let repo = setup_branch_zoo()?;
        let states = list_json(&repo, &["--keep-going"])?;
        assert_eq!(states.len(), 6);
        Ok(())
    }
}
