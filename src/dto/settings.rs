use serde::Serialize;

use crate::domain::tenant::TenantSettings;

/// Data required to render the settings page.
#[derive(Debug, Serialize)]
pub struct SettingsPageData {
    pub settings: TenantSettings,
    pub max_page_size: usize,
}
