//! Tab, saved-view and search filtering of the accumulated leads.
//!
//! Stages run in a fixed order (tab, then saved view, then search) and never
//! reorder records, so the output is always an ordered subsequence of the
//! input.

use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::caller::Caller;
use crate::domain::lead::Lead;
use crate::domain::saved_view::ViewFilter;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    #[default]
    All,
    My,
    Unassigned,
}

impl Tab {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tab::All => "all",
            Tab::My => "my",
            Tab::Unassigned => "unassigned",
        }
    }
}

impl FromStr for Tab {
    type Err = std::convert::Infallible;

    /// Unknown values fall back to [`Tab::All`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "my" => Tab::My,
            "unassigned" => Tab::Unassigned,
            _ => Tab::All,
        })
    }
}

/// Transient filter selection of a list session.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilterState {
    pub tab: Tab,
    pub view: Option<ViewFilter>,
    pub search: String,
}

impl FilterState {
    pub fn tab(mut self, tab: Tab) -> Self {
        self.tab = tab;
        self
    }

    pub fn view(mut self, view: ViewFilter) -> Self {
        self.view = Some(view);
        self
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }
}

/// Tab stage. Callers without a privileged role always get the full set.
pub fn matches_tab(lead: &Lead, tab: Tab, caller: &Caller) -> bool {
    if !caller.role.is_privileged() {
        return true;
    }
    match tab {
        Tab::All => true,
        Tab::My => lead.is_assigned_to(&caller.id),
        Tab::Unassigned => lead.is_unassigned(),
    }
}

/// Saved-view stage. Every non-empty sub-filter must match.
pub fn matches_view(lead: &Lead, view: &ViewFilter, now: NaiveDateTime) -> bool {
    if !view.statuses.is_empty() && !view.statuses.contains(&lead.status) {
        return false;
    }
    if !view.sources.is_empty() && !view.sources.iter().any(|s| s == lead.source.as_str()) {
        return false;
    }
    view.date_range.contains(lead.created_at, now)
}

/// Search stage. `needle` must already be trimmed and lower-cased.
pub fn matches_search(lead: &Lead, needle: &str) -> bool {
    needle.is_empty()
        || lead.name.to_lowercase().contains(needle)
        || lead.email.as_str().to_lowercase().contains(needle)
}

/// Runs the whole pipeline over `records` and returns the positions of the
/// records that pass, in input order. Date windows are evaluated against
/// `now` (UTC).
pub fn apply_indices(
    records: &[Lead],
    state: &FilterState,
    caller: &Caller,
    now: NaiveDateTime,
) -> Vec<usize> {
    let needle = state.search.trim().to_lowercase();

    records
        .iter()
        .enumerate()
        .filter(|(_, lead)| matches_tab(lead, state.tab, caller))
        .filter(|(_, lead)| {
            state
                .view
                .as_ref()
                .is_none_or(|view| matches_view(lead, view, now))
        })
        .filter(|(_, lead)| matches_search(lead, &needle))
        .map(|(index, _)| index)
        .collect()
}

/// Records of `records` that pass the pipeline, in input order.
pub fn apply<'a>(
    records: &'a [Lead],
    state: &FilterState,
    caller: &Caller,
    now: NaiveDateTime,
) -> Vec<&'a Lead> {
    apply_indices(records, state, caller, now)
        .into_iter()
        .map(|index| &records[index])
        .collect()
}
