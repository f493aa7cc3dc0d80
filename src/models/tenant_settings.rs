use diesel::prelude::*;

use crate::domain::tenant::TenantSettings as DomainTenantSettings;
use crate::domain::types::{HubId, TypeConstraintError};

#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::tenant_settings)]
#[diesel(primary_key(hub_id))]
pub struct TenantSettings {
    pub hub_id: i32,
    pub default_country_code: String,
    pub page_size: i32,
}

impl TryFrom<TenantSettings> for DomainTenantSettings {
    type Error = TypeConstraintError;

    fn try_from(settings: TenantSettings) -> Result<Self, Self::Error> {
        let page_size = usize::try_from(settings.page_size)
            .map_err(|_| TypeConstraintError::InvalidValue("negative page size".to_string()))?;
        DomainTenantSettings::try_new(
            HubId::try_from(settings.hub_id)?,
            &settings.default_country_code,
            page_size,
        )
    }
}

impl From<&DomainTenantSettings> for TenantSettings {
    fn from(settings: &DomainTenantSettings) -> Self {
        Self {
            hub_id: settings.hub_id.get(),
            default_country_code: settings.default_country_code.as_str().to_string(),
            // Bounded by MAX_PAGE_SIZE at construction.
            page_size: settings.page_size as i32,
        }
    }
}
