use crate::core::{
    branch_state::BranchState,
    colors::format_branch_line,
    command_init::{ReconcileInit, ReconcileOptions},
    error::Result,
    filter::Filter,
    print_info, print_section_header, print_warning,
    state::Branch,
};

#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    pub json: bool,
    /// Name of a predefined filter
    pub filter: Option<String>,
    pub states: Vec<String>,
    pub search: Option<String>,
    pub keep_going: bool,
    pub reconcile: ReconcileOptions,
}

pub fn execute_list(options: ListOptions) -> Result<()> {
    // Parse the filter first so a typo fails before any git or network work
    let filter = build_filter(
        options.filter.as_deref(),
        &options.states,
        options.search.as_deref(),
    )?;

    let context = ReconcileInit::initialize(options.reconcile)?;

    let branches = if options.keep_going {
        let outcome = context.classifier.classify_all_tolerant()?;
        if !options.json {
            for failure in &outcome.failures {
                print_warning(&format!(
                    "Skipped branch '{}': {}",
                    failure.branch, failure.error
                ));
            }
        }
        outcome.branches
    } else {
        context.classifier.classify_all()?
    };

    let selected = filter.select(&branches);

    if options.json {
        println!("{}", serde_json::to_string_pretty(&selected)?);
        return Ok(());
    }

    if branches.is_empty() {
        print_info("No branches found. Make your first commit to create one.");
        return Ok(());
    }

    if selected.is_empty() {
        print_info(&format!(
            "No branches match filter '{}'",
            filter.display_name()
        ));
        return Ok(());
    }

    let header = if filter.is_active {
        filter.display_name()
    } else {
        "Local Branches".to_string()
    };
    print_section_header(&header);

    for line in render_lines(&selected) {
        println!("{line}");
    }

    // Add spacing after branch list
    println!();

    Ok(())
}

/// Combine the command-line selectors into one filter.
///
/// `--state` and `--search` together produce a custom filter that keeps a
/// branch when either one matches.
pub fn build_filter(name: Option<&str>, states: &[String], search: Option<&str>) -> Result<Filter> {
    if let Some(name) = name {
        return Filter::predefined(name);
    }

    let states = states
        .iter()
        .map(|s| s.parse::<BranchState>())
        .collect::<Result<Vec<_>>>()?;
    let search = search.unwrap_or_default();

    let mut filter = Filter::new();
    match (states.is_empty(), search.is_empty()) {
        (true, true) => {}
        (false, true) => filter.set_state_filter(states),
        (true, false) => filter.set_search_filter(search),
        (false, false) => filter.set_custom_filter(
            format!("State or Search: {search}"),
            states,
            search,
        ),
    }
    Ok(filter)
}

fn render_lines(branches: &[&Branch]) -> Vec<String> {
    let name_width = branches
        .iter()
        .map(|b| b.name.chars().count())
        .max()
        .unwrap_or(0);

    let mut index = 0;
    branches
        .iter()
        .map(|branch| {
            let marker = if branch.is_current {
                "*".to_string()
            } else {
                index += 1;
                index.to_string()
            };
            format_branch_line(&marker, branch, name_width)
        })
        .collect()
}
