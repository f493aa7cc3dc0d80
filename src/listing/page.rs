//! A single window of leads returned by the record store.

use serde::Serialize;

use crate::domain::lead::Lead;

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct LeadPage {
    pub records: Vec<Lead>,
    /// Offset the page was fetched at.
    pub offset: usize,
    /// Matching records in the store at query time.
    pub total: usize,
    /// More records exist beyond this page.
    pub has_more: bool,
}

impl LeadPage {
    pub fn new(records: Vec<Lead>, offset: usize, total: usize) -> Self {
        let has_more = offset.saturating_add(records.len()) < total;
        Self {
            records,
            offset,
            total,
            has_more,
        }
    }
}

/// Window requested from the store for the next page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageRequest {
    pub offset: usize,
    pub limit: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::test_support::lead;

    #[test]
    fn has_more_compares_window_end_with_total() {
        assert!(LeadPage::new(vec![lead(1), lead(2)], 0, 3).has_more);
        assert!(!LeadPage::new(vec![lead(3)], 2, 3).has_more);
    }

    #[test]
    fn huge_offset_does_not_overflow() {
        let page = LeadPage::new(vec![lead(1), lead(2)], usize::MAX, 10);
        assert!(!page.has_more);
    }
}
