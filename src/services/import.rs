//! CSV upload, export and template download.

use pushkind_common::domain::auth::AuthenticatedUser;

use crate::forms::import::UploadLeadsForm;
use crate::import::{self, ImportSummary};
use crate::repository::{LeadReader, LeadWriter, TenantSettingsReader};
use crate::services::{
    ServiceError, ServiceResult, caller_from_user, hub_of, load_tenant_settings, owner_of,
};

/// Imports the uploaded CSV. Plain users own every lead they import.
pub fn upload_leads<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: &UploadLeadsForm,
) -> ServiceResult<ImportSummary>
where
    R: LeadWriter + TenantSettingsReader + Sync + ?Sized,
{
    let caller = caller_from_user(user)?;
    let hub_id = hub_of(user)?;
    let settings = load_tenant_settings(repo, hub_id)?;
    let country_code = form.country_code(&settings.default_country_code)?;
    let owner = if caller.role.is_privileged() {
        None
    } else {
        Some(owner_of(&caller)?)
    };

    let file = form.reopen().map_err(|err| {
        log::error!("Failed to open uploaded file: {err}");
        ServiceError::Form("Could not read the uploaded file".to_string())
    })?;

    import::import_leads(repo, file, hub_id, &country_code, owner.as_ref()).map_err(|err| {
        log::error!("Failed to parse leads: {err}");
        ServiceError::Form(format!("Could not parse the uploaded file: {err}"))
    })
}

/// CSV with every lead visible to the user.
pub fn export_leads<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<Vec<u8>>
where
    R: LeadReader + ?Sized,
{
    let caller = caller_from_user(user)?;
    let hub_id = hub_of(user)?;

    let leads = repo.list_all_leads(hub_id, &caller).map_err(|err| {
        log::error!("Failed to list leads for export: {err}");
        err
    })?;

    import::export_leads_csv(&leads).map_err(|err| {
        log::error!("Failed to write leads CSV: {err}");
        ServiceError::Form("Could not build the export".to_string())
    })
}

pub fn template(user: &AuthenticatedUser) -> ServiceResult<Vec<u8>> {
    caller_from_user(user)?;
    import::template_csv().map_err(|err| {
        log::error!("Failed to write template CSV: {err}");
        ServiceError::Form("Could not build the template".to_string())
    })
}
