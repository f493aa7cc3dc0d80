//! Client-held sequence of every lead fetched so far in a session.

use std::collections::HashSet;

use crate::domain::lead::Lead;
use crate::domain::types::LeadId;
use crate::listing::page::LeadPage;

#[derive(Debug, Default, Clone)]
pub struct PageAccumulator {
    accumulated: Vec<Lead>,
    seen: HashSet<LeadId>,
    total: usize,
}

impl PageAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the accumulated sequence with the records of `page`.
    pub fn reset(&mut self, page: LeadPage) {
        self.accumulated.clear();
        self.seen.clear();
        self.total = page.total;
        self.extend_unique(page.records);
    }

    /// Appends the records of `page` that are not accumulated yet, in the
    /// order received, and adopts the page's total. Returns how many records
    /// were added.
    pub fn append_page(&mut self, page: LeadPage) -> usize {
        self.total = page.total;
        self.extend_unique(page.records)
    }

    fn extend_unique(&mut self, records: Vec<Lead>) -> usize {
        let before = self.accumulated.len();
        for lead in records {
            if self.seen.insert(lead.id) {
                self.accumulated.push(lead);
            }
        }
        self.accumulated.len() - before
    }

    pub fn records(&self) -> &[Lead] {
        &self.accumulated
    }

    pub fn len(&self) -> usize {
        self.accumulated.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accumulated.is_empty()
    }

    /// Last total reported by the store.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Derived from the last total; a total that shrank after concurrent
    /// deletes simply ends loading early.
    pub fn has_more_to_load(&self) -> bool {
        self.accumulated.len() < self.total
    }

    /// Offset of the next page to request.
    pub fn next_offset(&self) -> usize {
        self.accumulated.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::test_support::{lead, page_of};

    #[test]
    fn incremental_loading_reaches_total() {
        let mut acc = PageAccumulator::new();

        acc.reset(page_of(1..=50, 0, 120));
        assert_eq!(acc.len(), 50);
        assert!(acc.has_more_to_load());

        acc.append_page(page_of(51..=100, 50, 120));
        assert_eq!(acc.next_offset(), 100);
        assert!(acc.has_more_to_load());

        acc.append_page(page_of(101..=120, 100, 120));
        assert_eq!(acc.len(), 120);
        assert!(!acc.has_more_to_load());
    }

    #[test]
    fn overlapping_pages_are_deduplicated() {
        let mut acc = PageAccumulator::new();
        acc.reset(page_of(1..=10, 0, 30));

        let added = acc.append_page(page_of(6..=15, 5, 30));

        assert_eq!(added, 5);
        let ids: Vec<i32> = acc.records().iter().map(|l| l.id.get()).collect();
        assert_eq!(ids, (1..=15).collect::<Vec<_>>());
    }

    #[test]
    fn duplicates_inside_one_page_are_dropped() {
        let mut acc = PageAccumulator::new();
        acc.reset(LeadPage::new(vec![lead(1), lead(2), lead(1)], 0, 3));

        assert_eq!(acc.len(), 2);
    }

    #[test]
    fn shrinking_total_ends_loading() {
        let mut acc = PageAccumulator::new();
        acc.reset(page_of(1..=50, 0, 120));

        acc.append_page(page_of(51..=60, 50, 40));

        assert_eq!(acc.len(), 60);
        assert_eq!(acc.total(), 40);
        assert!(!acc.has_more_to_load());
    }

    #[test]
    fn reset_discards_previous_records() {
        let mut acc = PageAccumulator::new();
        acc.reset(page_of(1..=20, 0, 40));
        acc.append_page(page_of(21..=40, 20, 40));

        acc.reset(page_of(100..=104, 0, 5));

        let ids: Vec<i32> = acc.records().iter().map(|l| l.id.get()).collect();
        assert_eq!(ids, vec![100, 101, 102, 103, 104]);

        // Ids seen before the reset are accepted again.
        assert_eq!(acc.append_page(page_of(1..=2, 5, 7)), 2);
    }
}
