//! Services behind the lead list page and its actions.

use pushkind_common::domain::auth::AuthenticatedUser;

use crate::domain::caller::Caller;
use crate::domain::lead::Lead;
use crate::domain::saved_view::SavedView;
use crate::domain::tenant::TenantSettings;
use crate::domain::types::{HubId, LeadId, SavedViewId};
use crate::dto::leads::{IndexPageData, ListFilterParams};
use crate::forms::leads::{AddLeadForm, BulkLeadsForm, BulkLeadsPayload, SaveLeadForm};
use crate::listing::filter::{FilterState, Tab};
use crate::listing::session::LeadListSession;
use crate::repository::{LeadReader, LeadWriter, SavedViewReader, TenantSettingsReader};
use crate::services::{
    ServiceError, ServiceResult, caller_from_user, ensure_admin, ensure_privileged, hub_of,
    load_tenant_settings, owner_of,
};

/// Saved view referenced by `view_id` when it belongs to the caller.
fn resolve_view<R>(
    repo: &R,
    hub_id: HubId,
    caller: &Caller,
    view_id: Option<i32>,
) -> ServiceResult<Option<SavedView>>
where
    R: SavedViewReader + ?Sized,
{
    let Some(id) = view_id.and_then(|id| SavedViewId::new(id).ok()) else {
        return Ok(None);
    };
    let view = repo.get_saved_view(id, hub_id)?;
    Ok(view.filter(|view| view.owner.as_str() == caller.id))
}

/// Loads the leads the user saw, with the same filters applied.
fn open_session<R>(
    repo: &R,
    hub_id: HubId,
    caller: Caller,
    settings: &TenantSettings,
    params: &ListFilterParams,
    view: Option<&SavedView>,
) -> ServiceResult<LeadListSession>
where
    R: LeadReader + ?Sized,
{
    let tab = params
        .tab
        .as_deref()
        .and_then(|tab| tab.parse::<Tab>().ok())
        .unwrap_or_default();
    let filter = FilterState {
        tab,
        view: view.map(|view| view.filter.clone()),
        search: params.search.clone().unwrap_or_default(),
    };

    let mut session = LeadListSession::new(hub_id, caller, settings.page_size).with_filter(filter);
    session.load_initial(repo).map_err(|err| {
        log::error!("Failed to load leads of hub#{hub_id}: {err}");
        err
    })?;
    session.load_at_least(repo, params.loaded.unwrap_or_default())?;
    Ok(session)
}

/// Loads the lead list for the main index page.
pub fn load_index_page<R>(
    repo: &R,
    user: &AuthenticatedUser,
    params: ListFilterParams,
) -> ServiceResult<IndexPageData>
where
    R: LeadReader + SavedViewReader + TenantSettingsReader + ?Sized,
{
    let caller = caller_from_user(user)?;
    let hub_id = hub_of(user)?;
    let settings = load_tenant_settings(repo, hub_id)?;
    let views = repo.list_saved_views(hub_id, &owner_of(&caller)?)?;
    let view = resolve_view(repo, hub_id, &caller, params.view)?;

    let privileged = caller.role.is_privileged();
    let session = open_session(repo, hub_id, caller, &settings, &params, view.as_ref())?;

    let loaded = session.accumulated().len();
    Ok(IndexPageData {
        leads: session.visible().into_iter().cloned().collect(),
        loaded,
        total: session.total(),
        has_more: session.has_more_to_load(),
        next_loaded: loaded + session.page_size(),
        tab: session.filter().tab,
        search: session.filter().search.clone(),
        active_view: view.map(|view| view.id.get()),
        views,
        privileged,
        is_admin: ensure_admin(user).is_ok(),
    })
}

/// Validates the add-lead form and persists a new lead. Plain users own the
/// leads they add.
pub fn add_lead<R>(repo: &R, user: &AuthenticatedUser, form: AddLeadForm) -> ServiceResult<Lead>
where
    R: LeadWriter + TenantSettingsReader + ?Sized,
{
    let caller = caller_from_user(user)?;
    let hub_id = hub_of(user)?;
    let settings = load_tenant_settings(repo, hub_id)?;

    let mut new_lead = form.into_new_lead(hub_id, &settings.default_country_code)?;
    if !caller.role.is_privileged() {
        new_lead = new_lead.assigned_to(owner_of(&caller)?);
    }

    let lead = repo.create_lead(&new_lead).map_err(|err| {
        log::error!("Failed to add a lead: {err}");
        err
    })?;
    Ok(lead)
}

/// Updates an existing lead. Plain users may only edit their own leads.
pub fn save_lead<R>(repo: &R, user: &AuthenticatedUser, form: SaveLeadForm) -> ServiceResult<Lead>
where
    R: LeadReader + LeadWriter + TenantSettingsReader + ?Sized,
{
    let caller = caller_from_user(user)?;
    let hub_id = hub_of(user)?;
    let lead_id = form.lead_id()?;

    let existing = repo
        .get_lead_by_id(lead_id, hub_id)?
        .ok_or(ServiceError::NotFound)?;
    if !caller.role.is_privileged() && !existing.is_assigned_to(&caller.id) {
        return Err(ServiceError::Unauthorized);
    }

    let settings = load_tenant_settings(repo, hub_id)?;
    let updates = form.into_update(&settings.default_country_code, existing.last_contacted_at)?;

    let lead = repo.update_lead(lead_id, hub_id, &updates).map_err(|err| {
        log::error!("Failed to save lead#{lead_id}: {err}");
        err
    })?;
    Ok(lead)
}

/// Checked ids of a bulk form that are still visible under the filter the
/// list was rendered with.
fn selected_visible<R>(
    repo: &R,
    user: &AuthenticatedUser,
    body: &[u8],
) -> ServiceResult<(HubId, BulkLeadsPayload, Vec<LeadId>)>
where
    R: LeadReader + SavedViewReader + TenantSettingsReader + ?Sized,
{
    let caller = ensure_privileged(user)?;
    let hub_id = hub_of(user)?;
    let payload = BulkLeadsPayload::try_from(BulkLeadsForm::from_bytes(body)?)?;
    if payload.ids.is_empty() {
        return Err(ServiceError::Form("No leads selected".to_string()));
    }

    let settings = load_tenant_settings(repo, hub_id)?;
    let view = resolve_view(repo, hub_id, &caller, payload.filter.view)?;
    let mut session = open_session(
        repo,
        hub_id,
        caller,
        &settings,
        &payload.filter,
        view.as_ref(),
    )?;
    session.selection_mut().select_all(payload.ids.iter().copied());

    let ids = session.selected_visible_ids();
    if ids.len() < payload.ids.len() {
        log::warn!(
            "Dropped {} hidden leads from a bulk action in hub#{hub_id}",
            payload.ids.len() - ids.len()
        );
    }
    if ids.is_empty() {
        return Err(ServiceError::Form("No visible leads selected".to_string()));
    }
    Ok((hub_id, payload, ids))
}

/// Deletes the selected visible leads. Returns how many were removed.
pub fn delete_leads<R>(repo: &R, user: &AuthenticatedUser, body: &[u8]) -> ServiceResult<usize>
where
    R: LeadReader + LeadWriter + SavedViewReader + TenantSettingsReader + ?Sized,
{
    let (hub_id, _, ids) = selected_visible(repo, user, body)?;

    let deleted = repo.delete_leads(hub_id, &ids).map_err(|err| {
        log::error!("Failed to delete leads: {err}");
        err
    })?;
    Ok(deleted)
}

/// Assigns the selected visible leads to the posted owner, or unassigns them
/// when the owner is blank.
pub fn assign_leads<R>(repo: &R, user: &AuthenticatedUser, body: &[u8]) -> ServiceResult<usize>
where
    R: LeadReader + LeadWriter + SavedViewReader + TenantSettingsReader + ?Sized,
{
    let (hub_id, payload, ids) = selected_visible(repo, user, body)?;

    let assigned = repo
        .assign_leads(hub_id, &ids, payload.owner)
        .map_err(|err| {
            log::error!("Failed to assign leads: {err}");
            err
        })?;
    Ok(assigned)
}

/// Removes all lead data for the user's hub.
pub fn cleanup_leads<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<usize>
where
    R: LeadWriter + ?Sized,
{
    ensure_admin(user)?;
    let hub_id = hub_of(user)?;

    let deleted = repo.delete_all_leads(hub_id).map_err(|err| {
        log::error!("Failed to delete all leads: {err}");
        err
    })?;
    log::info!("Deleted {deleted} leads of hub#{hub_id}");
    Ok(deleted)
}
