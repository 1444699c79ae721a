//! Unified color system for branch state visualization.
//!
//! Every place that prints a branch state goes through
//! [`get_state_color_style`], so a state has the same color in the list, in
//! prune output and in warnings.
//!
//! # Color Scheme
//! - **Safe to delete** (merged, stale): Green
//! - **Needs attention** (ahead, diverged, orphaned): Yellow
//! - **Under review** (open, draft PR): Cyan
//! - **Closed PR, behind**: Magenta
//! - **Informational** (in sync, no upstream, empty, detached): Bright black

use crate::core::{branch_state::BranchState, state::Branch};
use colored::*;

/// Returns a closure that colors any text the way `state` is colored
pub fn get_state_color_style(state: BranchState) -> Box<dyn Fn(&str) -> ColoredString> {
    match state {
        BranchState::StaleLocal | BranchState::FullyMergedBase => {
            Box::new(|text: &str| text.green().bold())
        }
        BranchState::MergedRemoteExists => Box::new(|text: &str| text.green()),
        BranchState::UnpushedAhead
        | BranchState::Diverged
        | BranchState::OrphanRemoteDeleted => Box::new(|text: &str| text.yellow()),
        BranchState::OpenPR | BranchState::DraftPR => Box::new(|text: &str| text.cyan()),
        BranchState::ClosedPR | BranchState::BehindRemote => {
            Box::new(|text: &str| text.magenta())
        }
        BranchState::InSync
        | BranchState::NoUpstream
        | BranchState::NoCommits
        | BranchState::DetachedHead
        | BranchState::UpstreamChanged
        | BranchState::RemoteRenamed
        | BranchState::UpstreamGone => Box::new(|text: &str| text.bright_black()),
    }
}

pub fn get_colored_state_label(state: BranchState) -> ColoredString {
    get_state_color_style(state)(state.label())
}

/// `(+2/−1)` style sync marker, empty when in sync
pub fn format_ahead_behind(ahead: usize, behind: usize) -> String {
    match (ahead, behind) {
        (0, 0) => String::new(),
        (a, 0) => format!("{}+{}{}", "(".bright_black(), a, ")".bright_black()),
        (0, b) => format!("{}-{}{}", "(".bright_black(), b, ")".bright_black()),
        (a, b) => format!("{}+{}/-{}{}", "(".bright_black(), a, b, ")".bright_black()),
    }
}

/// One list line: `[index] name  state  (+a/-b)  #pr title`
pub fn format_branch_line(marker: &str, branch: &Branch, name_width: usize) -> String {
    let marker_colored = format!(
        "{}{}{}",
        "[".bright_black(),
        marker.white(),
        "]".bright_black()
    );
    let name = format!("{:<width$}", branch.name, width = name_width);
    let name_colored = if branch.is_current {
        name.blue().bold()
    } else {
        name.blue()
    };

    let mut line = format!(
        "{marker_colored} {name_colored}  {}",
        get_colored_state_label(branch.state)
    );

    let sync = format_ahead_behind(branch.ahead_count, branch.behind_count);
    if !sync.is_empty() {
        line.push_str("  ");
        line.push_str(&sync);
    }

    if let Some(pr) = &branch.pull_request {
        line.push_str(&format!(
            "  {} {}",
            format!("#{}", pr.number).cyan(),
            pr.title.white()
        ));
    }
    line
}
