//! Set of lead ids the user marked for a bulk action.

use std::collections::{BTreeSet, HashSet};

use crate::domain::types::LeadId;

/// Selected lead ids. Holds ids only; hidden records stay selected until
/// [`SelectionTracker::retain_visible`] or [`SelectionTracker::clear`] is
/// called.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SelectionTracker {
    selected: BTreeSet<LeadId>,
}

impl SelectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `id` when absent, removes it otherwise. Returns the new state.
    pub fn toggle(&mut self, id: LeadId) -> bool {
        if self.selected.remove(&id) {
            false
        } else {
            self.selected.insert(id);
            true
        }
    }

    /// Replaces the selection with exactly `visible_ids`.
    pub fn select_all<I>(&mut self, visible_ids: I)
    where
        I: IntoIterator<Item = LeadId>,
    {
        self.selected = visible_ids.into_iter().collect();
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    pub fn is_selected(&self, id: LeadId) -> bool {
        self.selected.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Selected ids in ascending order.
    pub fn ids(&self) -> Vec<LeadId> {
        self.selected.iter().copied().collect()
    }

    /// Drops every selected id that is not in `visible_ids`. Returns how many
    /// were dropped.
    pub fn retain_visible(&mut self, visible_ids: &[LeadId]) -> usize {
        let visible: HashSet<LeadId> = visible_ids.iter().copied().collect();
        let before = self.selected.len();
        self.selected.retain(|id| visible.contains(id));
        before - self.selected.len()
    }
}
