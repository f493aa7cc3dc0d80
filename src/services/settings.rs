//! Hub settings page.

use pushkind_common::domain::auth::AuthenticatedUser;

use crate::domain::tenant::{MAX_PAGE_SIZE, TenantSettings};
use crate::dto::settings::SettingsPageData;
use crate::forms::settings::SettingsForm;
use crate::repository::{TenantSettingsReader, TenantSettingsWriter};
use crate::services::{ServiceResult, ensure_admin, hub_of, load_tenant_settings};

pub fn load_settings<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<SettingsPageData>
where
    R: TenantSettingsReader + ?Sized,
{
    ensure_admin(user)?;
    let hub_id = hub_of(user)?;

    Ok(SettingsPageData {
        settings: load_tenant_settings(repo, hub_id)?,
        max_page_size: MAX_PAGE_SIZE,
    })
}

pub fn save_settings<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: SettingsForm,
) -> ServiceResult<TenantSettings>
where
    R: TenantSettingsWriter + ?Sized,
{
    ensure_admin(user)?;
    let hub_id = hub_of(user)?;

    let settings = form.into_settings(hub_id)?;
    repo.save_tenant_settings(&settings).map_err(|err| {
        log::error!("Failed to save settings of hub#{hub_id}: {err}");
        err
    })?;
    Ok(settings)
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::domain::types::HubId;
    use crate::repository::mock::MockRepository;
    use crate::services::ServiceError;
    use crate::services::test_users::{admin, manager};

    #[test]
    fn missing_settings_fall_back_to_defaults() {
        let mut repo = MockRepository::new();
        repo.expect_get_tenant_settings().returning(|_| Ok(None));

        let data = load_settings(&repo, &admin()).unwrap();

        assert_eq!(data.settings, TenantSettings::defaults(HubId::new(7).unwrap()));
    }

    #[test]
    fn only_admins_save_settings() {
        let mut repo = MockRepository::new();
        repo.expect_save_tenant_settings().times(0);
        let form = SettingsForm {
            default_country_code: "+1".to_string(),
            page_size: 20,
        };

        assert!(matches!(
            save_settings(&repo, &manager(), form),
            Err(ServiceError::Unauthorized)
        ));
    }

    #[test]
    fn saves_validated_settings() {
        let mut repo = MockRepository::new();
        repo.expect_save_tenant_settings()
            .withf(|settings| settings.page_size == 20 && settings.default_country_code.as_str() == "+1")
            .times(1)
            .returning(|_| Ok(()));
        let form = SettingsForm {
            default_country_code: "1".to_string(),
            page_size: 20,
        };

        save_settings(&repo, &admin(), form).unwrap();
    }
}
