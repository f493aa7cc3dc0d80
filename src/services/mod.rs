//! Business logic behind the HTTP routes.

use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::routes::check_role;
use thiserror::Error;

use crate::domain::caller::{Caller, CallerRole};
use crate::domain::tenant::TenantSettings;
use crate::domain::types::{HubId, OwnerRef, TypeConstraintError};
use crate::forms::FormError;
use crate::listing::ListError;
use crate::repository::TenantSettingsReader;
use crate::repository::errors::RepositoryError;
use crate::{SERVICE_ACCESS_ROLE, SERVICE_ADMIN_ROLE, SERVICE_MANAGER_ROLE};

pub mod api;
pub mod import;
pub mod leads;
pub mod settings;
pub mod views;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("unauthorized")]
    Unauthorized,

    #[error("not found")]
    NotFound,

    #[error("{0}")]
    Form(String),

    #[error("type constraint violated: {0}")]
    TypeConstraint(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<TypeConstraintError> for ServiceError {
    fn from(err: TypeConstraintError) -> Self {
        ServiceError::TypeConstraint(err.to_string())
    }
}

impl From<ListError> for ServiceError {
    fn from(err: ListError) -> Self {
        match err {
            ListError::Store(err) => ServiceError::Repository(err),
            other => ServiceError::Form(other.to_string()),
        }
    }
}

impl From<FormError> for ServiceError {
    fn from(err: FormError) -> Self {
        log::error!("Failed to validate form: {err}");
        ServiceError::Form(format!("Invalid form: {err}"))
    }
}

/// Maps the user's roles to the caller the list engine filters for. Users
/// without the access role are rejected.
pub fn caller_from_user(user: &AuthenticatedUser) -> ServiceResult<Caller> {
    let role = if check_role(SERVICE_ADMIN_ROLE, &user.roles) {
        CallerRole::Admin
    } else if check_role(SERVICE_MANAGER_ROLE, &user.roles) {
        CallerRole::Manager
    } else if check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        CallerRole::User
    } else {
        return Err(ServiceError::Unauthorized);
    };
    Ok(Caller::new(user.email.to_lowercase(), role))
}

pub fn ensure_admin(user: &AuthenticatedUser) -> ServiceResult<()> {
    if check_role(SERVICE_ADMIN_ROLE, &user.roles) {
        Ok(())
    } else {
        Err(ServiceError::Unauthorized)
    }
}

/// Caller with a privileged role, for bulk actions.
pub fn ensure_privileged(user: &AuthenticatedUser) -> ServiceResult<Caller> {
    let caller = caller_from_user(user)?;
    if caller.role.is_privileged() {
        Ok(caller)
    } else {
        Err(ServiceError::Unauthorized)
    }
}

pub fn hub_of(user: &AuthenticatedUser) -> ServiceResult<HubId> {
    Ok(HubId::new(user.hub_id)?)
}

pub fn owner_of(caller: &Caller) -> ServiceResult<OwnerRef> {
    Ok(OwnerRef::new(caller.id.as_str())?)
}

/// Settings of the hub, or the defaults when it never saved any.
pub fn load_tenant_settings<R>(repo: &R, hub_id: HubId) -> ServiceResult<TenantSettings>
where
    R: TenantSettingsReader + ?Sized,
{
    let settings = repo.get_tenant_settings(hub_id).map_err(|err| {
        log::error!("Failed to load settings of hub#{hub_id}: {err}");
        err
    })?;
    Ok(settings.unwrap_or_else(|| TenantSettings::defaults(hub_id)))
}


#[cfg(test)]
mod tests {
    use super::test_users::*;
    use super::*;

    #[test]
    fn roles_map_to_caller_roles() {
        assert_eq!(caller_from_user(&admin()).unwrap().role, CallerRole::Admin);
        assert_eq!(
            caller_from_user(&manager()).unwrap().role,
            CallerRole::Manager
        );
        assert_eq!(caller_from_user(&member()).unwrap().role, CallerRole::User);
        assert!(matches!(
            caller_from_user(&outsider()),
            Err(ServiceError::Unauthorized)
        ));
    }

    #[test]
    fn caller_id_is_lowercased_email() {
        let user = user_with_roles("Rep@Example.COM", &["crm"]);
        assert_eq!(caller_from_user(&user).unwrap().id, "rep@example.com");
    }
}
