//! Lead list state of one user: accumulated pages, active filters and the
//! current selection.

use chrono::{NaiveDateTime, Utc};

use crate::domain::caller::Caller;
use crate::domain::lead::Lead;
use crate::domain::saved_view::ViewFilter;
use crate::domain::types::{HubId, LeadId};
use crate::listing::ListError;
use crate::listing::accumulator::PageAccumulator;
use crate::listing::filter::{self, FilterState, Tab};
use crate::listing::page::{LeadPage, PageRequest};
use crate::listing::selection::SelectionTracker;
use crate::repository::errors::RepositoryResult;
use crate::repository::{LeadPageQuery, LeadReader};

/// Upper bound for [`LeadListSession::load_at_least`].
pub const MAX_LOADED_LEADS: usize = 2000;

pub struct LeadListSession {
    hub_id: HubId,
    caller: Caller,
    page_size: usize,
    accumulator: PageAccumulator,
    filter: FilterState,
    selection: SelectionTracker,
    /// Indexes into the accumulated records that pass the filter.
    visible: Vec<usize>,
    loading: bool,
    clock: fn() -> NaiveDateTime,
}

fn utc_now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

impl LeadListSession {
    pub fn new(hub_id: HubId, caller: Caller, page_size: usize) -> Self {
        Self {
            hub_id,
            caller,
            page_size: page_size.max(1),
            accumulator: PageAccumulator::new(),
            filter: FilterState::default(),
            selection: SelectionTracker::new(),
            visible: Vec::new(),
            loading: false,
            clock: utc_now,
        }
    }

    /// Replaces the clock used for date-range windows.
    pub fn with_clock(mut self, clock: fn() -> NaiveDateTime) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_filter(mut self, filter: FilterState) -> Self {
        self.filter = filter;
        self.recompute();
        self
    }

    /// Fetches the first page and replaces everything accumulated so far.
    pub fn load_initial<S>(&mut self, store: &S) -> Result<(), ListError>
    where
        S: LeadReader + ?Sized,
    {
        let query = self.query(PageRequest {
            offset: 0,
            limit: self.page_size,
        });
        let page = store.fetch_lead_page(&query)?;
        self.accumulator.reset(page);
        self.loading = false;
        self.refilter();
        Ok(())
    }

    /// Marks a page request as in flight and returns its window.
    pub fn begin_load_more(&mut self) -> Result<PageRequest, ListError> {
        if self.loading {
            return Err(ListError::LoadInProgress);
        }
        if !self.accumulator.has_more_to_load() {
            return Err(ListError::NothingToLoad);
        }
        self.loading = true;
        Ok(PageRequest {
            offset: self.accumulator.next_offset(),
            limit: self.page_size,
        })
    }

    /// Applies the outcome of the request issued by
    /// [`LeadListSession::begin_load_more`]. Failures leave the accumulated
    /// records untouched. Returns how many new records were added.
    pub fn complete_load_more(
        &mut self,
        result: RepositoryResult<LeadPage>,
    ) -> Result<usize, ListError> {
        self.loading = false;
        let page = result?;
        let added = self.accumulator.append_page(page);
        self.recompute();
        Ok(added)
    }

    pub fn load_more<S>(&mut self, store: &S) -> Result<usize, ListError>
    where
        S: LeadReader + ?Sized,
    {
        let request = self.begin_load_more()?;
        let result = store.fetch_lead_page(&self.query(request));
        if let Err(e) = &result {
            log::error!("Failed to load more leads for hub#{}: {e}", self.hub_id);
        }
        self.complete_load_more(result)
    }

    /// Loads pages until at least `count` records are accumulated or the
    /// store runs out. `count` is capped at [`MAX_LOADED_LEADS`].
    pub fn load_at_least<S>(&mut self, store: &S, count: usize) -> Result<(), ListError>
    where
        S: LeadReader + ?Sized,
    {
        let count = count.min(MAX_LOADED_LEADS);
        while self.accumulator.len() < count {
            match self.load_more(store) {
                Ok(0) | Err(ListError::NothingToLoad) => break,
                Ok(_) => {}
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }

    pub fn set_tab(&mut self, tab: Tab) {
        self.filter.tab = tab;
        self.refilter();
    }

    pub fn set_view(&mut self, view: Option<ViewFilter>) {
        self.filter.view = view;
        self.refilter();
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.filter.search = search.into();
        self.refilter();
    }

    fn refilter(&mut self) {
        self.recompute();
        let visible = self.visible_ids();
        self.selection.retain_visible(&visible);
    }

    fn recompute(&mut self) {
        let now = (self.clock)();
        self.visible =
            filter::apply_indices(self.accumulator.records(), &self.filter, &self.caller, now);
    }

    fn query(&self, request: PageRequest) -> LeadPageQuery {
        LeadPageQuery::new(self.hub_id, self.caller.clone()).request(request)
    }

    pub fn visible(&self) -> Vec<&Lead> {
        let records = self.accumulator.records();
        self.visible.iter().map(|&index| &records[index]).collect()
    }

    pub fn visible_ids(&self) -> Vec<LeadId> {
        self.visible().into_iter().map(|lead| lead.id).collect()
    }

    pub fn selection(&self) -> &SelectionTracker {
        &self.selection
    }

    pub fn selection_mut(&mut self) -> &mut SelectionTracker {
        &mut self.selection
    }

    /// Selected ids that are currently visible, in list order.
    pub fn selected_visible_ids(&self) -> Vec<LeadId> {
        self.visible()
            .into_iter()
            .map(|lead| lead.id)
            .filter(|id| self.selection.is_selected(*id))
            .collect()
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn accumulated(&self) -> &[Lead] {
        self.accumulator.records()
    }

    pub fn total(&self) -> usize {
        self.accumulator.total()
    }

    pub fn has_more_to_load(&self) -> bool {
        self.accumulator.has_more_to_load()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }
}
