use diesel::prelude::*;

use crate::domain::tenant::TenantSettings;
use crate::domain::types::HubId;
use crate::models::tenant_settings::TenantSettings as DbTenantSettings;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, TenantSettingsReader, TenantSettingsWriter};
use crate::schema::tenant_settings;

impl TenantSettingsReader for DieselRepository {
    fn get_tenant_settings(&self, hub_id: HubId) -> RepositoryResult<Option<TenantSettings>> {
        let mut conn = self.conn()?;
        let row = tenant_settings::table
            .find(hub_id.get())
            .select(DbTenantSettings::as_select())
            .first::<DbTenantSettings>(&mut conn)
            .optional()?;

        match row {
            Some(row) => Ok(Some(
                TenantSettings::try_from(row).map_err(RepositoryError::from)?,
            )),
            None => Ok(None),
        }
    }
}

impl TenantSettingsWriter for DieselRepository {
    fn save_tenant_settings(&self, settings: &TenantSettings) -> RepositoryResult<()> {
        let mut conn = self.conn()?;
        let row = DbTenantSettings::from(settings);

        diesel::insert_into(tenant_settings::table)
            .values(&row)
            .on_conflict(tenant_settings::hub_id)
            .do_update()
            .set(&row)
            .execute(&mut conn)?;

        Ok(())
    }
}
