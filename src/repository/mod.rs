//! Persistence traits and their Diesel implementation.

use crate::db::{DbConnection, DbPool, get_connection};
use crate::domain::caller::Caller;
use crate::domain::lead::{Lead, NewLead, UpdateLead};
use crate::domain::saved_view::{NewSavedView, SavedView};
use crate::domain::tenant::TenantSettings;
use crate::domain::types::{HubId, LeadId, OwnerRef, SavedViewId};
use crate::listing::page::{LeadPage, PageRequest};
use crate::repository::errors::RepositoryResult;

pub mod errors;
pub mod lead;
#[cfg(feature = "test-mocks")]
pub mod mock;
pub mod saved_view;
pub mod tenant_settings;

/// Paginated lead query scoped to a hub and evaluated on behalf of a caller.
#[derive(Debug, Clone)]
pub struct LeadPageQuery {
    pub hub_id: HubId,
    pub caller: Caller,
    pub offset: usize,
    pub limit: usize,
}

impl LeadPageQuery {
    pub fn new(hub_id: HubId, caller: Caller) -> Self {
        Self {
            hub_id,
            caller,
            offset: 0,
            limit: crate::domain::tenant::DEFAULT_PAGE_SIZE,
        }
    }

    pub fn window(mut self, offset: usize, limit: usize) -> Self {
        self.offset = offset;
        self.limit = limit;
        self
    }

    pub fn request(self, request: PageRequest) -> Self {
        self.window(request.offset, request.limit)
    }
}

pub trait LeadReader {
    /// Fetches one window of the leads visible to the caller, newest first.
    fn fetch_lead_page(&self, query: &LeadPageQuery) -> RepositoryResult<LeadPage>;
    fn get_lead_by_id(&self, id: LeadId, hub_id: HubId) -> RepositoryResult<Option<Lead>>;
    /// Every lead visible to the caller, in list order.
    fn list_all_leads(&self, hub_id: HubId, caller: &Caller) -> RepositoryResult<Vec<Lead>>;
}

pub trait LeadWriter {
    fn create_lead(&self, new_lead: &NewLead) -> RepositoryResult<Lead>;
    fn update_lead(
        &self,
        id: LeadId,
        hub_id: HubId,
        updates: &UpdateLead,
    ) -> RepositoryResult<Lead>;
    /// Assigns leads to `owner`; `None` writes the unassigned sentinel.
    fn assign_leads(
        &self,
        hub_id: HubId,
        ids: &[LeadId],
        owner: Option<OwnerRef>,
    ) -> RepositoryResult<usize>;
    fn delete_leads(&self, hub_id: HubId, ids: &[LeadId]) -> RepositoryResult<usize>;
    fn delete_all_leads(&self, hub_id: HubId) -> RepositoryResult<usize>;
}

pub trait SavedViewReader {
    fn list_saved_views(&self, hub_id: HubId, owner: &OwnerRef)
    -> RepositoryResult<Vec<SavedView>>;
    fn get_saved_view(
        &self,
        id: SavedViewId,
        hub_id: HubId,
    ) -> RepositoryResult<Option<SavedView>>;
}

pub trait SavedViewWriter {
    fn create_saved_view(&self, new_view: &NewSavedView) -> RepositoryResult<SavedView>;
    fn delete_saved_view(
        &self,
        id: SavedViewId,
        hub_id: HubId,
        owner: &OwnerRef,
    ) -> RepositoryResult<usize>;
}

pub trait TenantSettingsReader {
    fn get_tenant_settings(&self, hub_id: HubId) -> RepositoryResult<Option<TenantSettings>>;
}

pub trait TenantSettingsWriter {
    fn save_tenant_settings(&self, settings: &TenantSettings) -> RepositoryResult<()>;
}

/// Diesel-backed implementation of every repository trait.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(get_connection(&self.pool)?)
    }
}
