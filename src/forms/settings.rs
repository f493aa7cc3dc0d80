use serde::Deserialize;
use validator::Validate;

use crate::domain::tenant::TenantSettings;
use crate::domain::types::HubId;
use crate::forms::FormError;

#[derive(Debug, Deserialize, Validate)]
/// Hub-wide settings edited by administrators.
pub struct SettingsForm {
    #[validate(length(min = 1, max = 4))]
    pub default_country_code: String,
    #[validate(range(min = 1, max = 500))]
    pub page_size: usize,
}

impl SettingsForm {
    pub fn into_settings(self, hub_id: HubId) -> Result<TenantSettings, FormError> {
        self.validate()?;
        Ok(TenantSettings::try_new(
            hub_id,
            &self.default_country_code,
            self.page_size,
        )?)
    }
}
