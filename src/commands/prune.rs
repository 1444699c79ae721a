use crate::core::{
    branch_state::BranchState,
    classifier::Classifier,
    colors::format_branch_line,
    command_init::{ReconcileInit, ReconcileOptions},
    error::{Result, WranglerError},
    git::GitRepo,
    ports::RemoteRepositoryPort,
    print_info, print_section_header, print_success, print_warning,
    state::Branch,
};

pub fn execute_prune(dry_run: bool, reconcile: ReconcileOptions) -> Result<()> {
    let context = ReconcileInit::initialize(reconcile)?;
    prune_branches(&context.classifier, dry_run)
}

/// Classify every branch and delete the stale ones, or list them on a dry run
pub fn prune_branches<R: RemoteRepositoryPort>(
    classifier: &Classifier<GitRepo, R>,
    dry_run: bool,
) -> Result<()> {
    let branches = classifier.classify_all()?;

    let candidates = prune_candidates(&branches);
    if candidates.is_empty() {
        print_info("No stale branches to prune.");
        return Ok(());
    }

    let name_width = candidates
        .iter()
        .map(|b| b.name.chars().count())
        .max()
        .unwrap_or(0);

    if dry_run {
        print_section_header("Would delete");
        for (i, branch) in candidates.iter().enumerate() {
            println!(
                "{}",
                format_branch_line(&(i + 1).to_string(), branch, name_width)
            );
        }
        println!();
        return Ok(());
    }

    let git_repo = classifier.vcs();
    let mut deleted = 0;
    let mut failed = Vec::new();

    for branch in &candidates {
        match git_repo.delete_branch(&branch.name) {
            Ok(()) => {
                log::info!("Deleted branch '{}'", branch.name);
                deleted += 1;
            }
            Err(e) => {
                print_warning(&e.to_string());
                failed.push(branch.name.as_str());
            }
        }
    }

    if deleted > 0 {
        print_success(&format!("Deleted {deleted} stale branch(es)"));
    }

    if !failed.is_empty() {
        return Err(WranglerError::git_command_failed(format!(
            "could not delete: {}",
            failed.join(", ")
        )));
    }

    Ok(())
}

/// Stale branches, excluding the one that is checked out
pub fn prune_candidates(branches: &[Branch]) -> Vec<&Branch> {
    branches
        .iter()
        .filter(|b| b.state == BranchState::StaleLocal && !b.is_current)
        .collect()
}
