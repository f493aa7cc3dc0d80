//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::caller::Caller;
use crate::domain::lead::{Lead, NewLead, UpdateLead};
use crate::domain::saved_view::{NewSavedView, SavedView};
use crate::domain::tenant::TenantSettings;
use crate::domain::types::{HubId, LeadId, OwnerRef, SavedViewId};
use crate::listing::page::LeadPage;
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    LeadPageQuery, LeadReader, LeadWriter, SavedViewReader, SavedViewWriter,
    TenantSettingsReader, TenantSettingsWriter,
};

mock! {
    pub Repository {}

    impl LeadReader for Repository {
        fn fetch_lead_page(&self, query: &LeadPageQuery) -> RepositoryResult<LeadPage>;
        fn get_lead_by_id(&self, id: LeadId, hub_id: HubId) -> RepositoryResult<Option<Lead>>;
        fn list_all_leads(&self, hub_id: HubId, caller: &Caller) -> RepositoryResult<Vec<Lead>>;
    }

    impl LeadWriter for Repository {
        fn create_lead(&self, new_lead: &NewLead) -> RepositoryResult<Lead>;
        fn update_lead(
            &self,
            id: LeadId,
            hub_id: HubId,
            updates: &UpdateLead,
        ) -> RepositoryResult<Lead>;
        fn assign_leads(
            &self,
            hub_id: HubId,
            ids: &[LeadId],
            owner: Option<OwnerRef>,
        ) -> RepositoryResult<usize>;
        fn delete_leads(&self, hub_id: HubId, ids: &[LeadId]) -> RepositoryResult<usize>;
        fn delete_all_leads(&self, hub_id: HubId) -> RepositoryResult<usize>;
    }

    impl SavedViewReader for Repository {
        fn list_saved_views(&self, hub_id: HubId, owner: &OwnerRef)
        -> RepositoryResult<Vec<SavedView>>;
        fn get_saved_view(
            &self,
            id: SavedViewId,
            hub_id: HubId,
        ) -> RepositoryResult<Option<SavedView>>;
    }

    impl SavedViewWriter for Repository {
        fn create_saved_view(&self, new_view: &NewSavedView) -> RepositoryResult<SavedView>;
        fn delete_saved_view(
            &self,
            id: SavedViewId,
            hub_id: HubId,
            owner: &OwnerRef,
        ) -> RepositoryResult<usize>;
    }

    impl TenantSettingsReader for Repository {
        fn get_tenant_settings(&self, hub_id: HubId) -> RepositoryResult<Option<TenantSettings>>;
    }

    impl TenantSettingsWriter for Repository {
        fn save_tenant_settings(&self, settings: &TenantSettings) -> RepositoryResult<()>;
    }
}
