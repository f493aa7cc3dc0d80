//! JSON access to the paginated lead list.

use pushkind_common::domain::auth::AuthenticatedUser;

use crate::domain::tenant::MAX_PAGE_SIZE;
use crate::dto::api::LeadsQuery;
use crate::listing::page::LeadPage;
use crate::repository::{LeadPageQuery, LeadReader, TenantSettingsReader};
use crate::services::{
    ServiceError, ServiceResult, caller_from_user, hub_of, load_tenant_settings,
};

/// Returns one window of the leads visible to the authenticated user.
pub fn list_leads<R>(repo: &R, user: &AuthenticatedUser, params: LeadsQuery) -> ServiceResult<LeadPage>
where
    R: LeadReader + TenantSettingsReader + ?Sized,
{
    let caller = caller_from_user(user)?;
    let hub_id = hub_of(user)?;

    let limit = match params.limit {
        Some(0) => return Err(ServiceError::Form("limit must be positive".to_string())),
        Some(limit) => limit.min(MAX_PAGE_SIZE),
        None => load_tenant_settings(repo, hub_id)?.page_size,
    };

    let query = LeadPageQuery::new(hub_id, caller).window(params.offset, limit);
    let page = repo.fetch_lead_page(&query).map_err(|err| {
        log::error!("Failed to list leads: {err}");
        err
    })?;
    Ok(page)
}
