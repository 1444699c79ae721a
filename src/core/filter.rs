//! Presentation-side selection over classified branches.
//!
//! A [`Filter`] narrows a list of [`Branch`] values for display. It never feeds
//! back into classification. An inactive filter is the identity; an active
//! one keeps the matching branches in their original order.
//!
//! # Modes
//! - **All**: everything
//! - **ByState**: membership in a state set; an empty set matches everything
//! - **BySearch**: case-insensitive substring of the branch name
//! - **ByCustom**: state match OR search match

use crate::core::{
    branch_state::BranchState,
    error::{Result, WranglerError},
    state::Branch,
};
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterMode {
    #[default]
    All,
    ByState,
    BySearch,
    ByCustom,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Filter {
    pub mode: FilterMode,
    pub states: HashSet<BranchState>,
    pub search_term: String,
    pub custom_name: String,
    pub is_active: bool,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&self, branches: Vec<Branch>) -> Vec<Branch> {
        if !self.is_active {
            return branches;
        }
        branches.into_iter().filter(|b| self.matches(b)).collect()
    }

    /// Borrowing variant of [`Filter::apply`]
    pub fn select<'a>(&self, branches: &'a [Branch]) -> Vec<&'a Branch> {
        branches
            .iter()
            .filter(|b| !self.is_active || self.matches(b))
            .collect()
    }

    pub fn matches(&self, branch: &Branch) -> bool {
        match self.mode {
            FilterMode::All => true,
            FilterMode::ByState => self.matches_state(branch.state),
            FilterMode::BySearch => self.matches_search(&branch.name),
            FilterMode::ByCustom => {
                self.matches_state(branch.state) || self.matches_search(&branch.name)
            }
        }
    }

    fn matches_state(&self, state: BranchState) -> bool {
        self.states.is_empty() || self.states.contains(&state)
    }

    fn matches_search(&self, name: &str) -> bool {
        self.search_term.is_empty()
            || name
                .to_lowercase()
                .contains(&self.search_term.to_lowercase())
    }

    pub fn set_state_filter(&mut self, states: impl IntoIterator<Item = BranchState>) {
        self.mode = FilterMode::ByState;
        self.states = states.into_iter().collect();
        self.search_term.clear();
        self.custom_name.clear();
        self.is_active = true;
    }

    /// An empty term leaves the filter inactive
    pub fn set_search_filter(&mut self, term: impl Into<String>) {
        self.mode = FilterMode::BySearch;
        self.search_term = term.into();
        self.is_active = !self.search_term.is_empty();
        self.states.clear();
        self.custom_name.clear();
    }

    pub fn set_custom_filter(
        &mut self,
        name: impl Into<String>,
        states: impl IntoIterator<Item = BranchState>,
        search_term: impl Into<String>,
    ) {
        self.mode = FilterMode::ByCustom;
        self.custom_name = name.into();
        self.states = states.into_iter().collect();
        self.search_term = search_term.into();
        self.is_active = true;
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn display_name(&self) -> String {
        if !self.is_active {
            return "All Branches".to_string();
        }

        match self.mode {
            FilterMode::ByState if !self.custom_name.is_empty() => self.custom_name.clone(),
            FilterMode::ByState if self.states.len() == 1 => self
                .states
                .iter()
                .next()
                .map(|s| s.label().to_string())
                .unwrap_or_default(),
            FilterMode::ByState => "Multiple States".to_string(),
            FilterMode::BySearch => format!("Search: {}", self.search_term),
            FilterMode::ByCustom => self.custom_name.clone(),
            FilterMode::All => "All Branches".to_string(),
        }
    }

    /// Look up a predefined filter by name, ignoring case
    pub fn predefined(name: &str) -> Result<Self> {
        PREDEFINED_FILTERS
            .iter()
            .find(|preset| preset.name.eq_ignore_ascii_case(name))
            .map(PredefinedFilter::to_filter)
            .ok_or_else(|| WranglerError::unknown_filter(name, &predefined_filter_names()))
    }
}

/// A named, fixed filter shipped with the tool
#[derive(Debug)]
pub struct PredefinedFilter {
    pub name: &'static str,
    pub display_name: &'static str,
    pub states: &'static [BranchState],
}

impl PredefinedFilter {
    pub fn to_filter(&self) -> Filter {
        Filter {
            mode: FilterMode::ByState,
            states: self.states.iter().copied().collect(),
            search_term: String::new(),
            custom_name: self.display_name.to_string(),
            is_active: true,
        }
    }
}

pub static PREDEFINED_FILTERS: &[PredefinedFilter] = &[
    PredefinedFilter {
        name: "Stale",
        display_name: "Stale Branches",
        states: &[BranchState::StaleLocal],
    },
    PredefinedFilter {
        name: "PR",
        display_name: "Has PR",
        states: &[BranchState::OpenPR, BranchState::DraftPR, BranchState::ClosedPR],
    },
    PredefinedFilter {
        name: "Merged",
        display_name: "Merged Branches",
        states: &[
            BranchState::MergedRemoteExists,
            BranchState::StaleLocal,
            BranchState::FullyMergedBase,
        ],
    },
    PredefinedFilter {
        name: "Ahead",
        display_name: "Ahead of Remote",
        states: &[BranchState::UnpushedAhead, BranchState::Diverged],
    },
];

pub fn predefined_filter_names() -> Vec<&'static str> {
    PREDEFINED_FILTERS.iter().map(|p| p.name).collect()
}
