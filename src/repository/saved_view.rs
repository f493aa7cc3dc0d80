//! Repository implementation for saved views.

use diesel::prelude::*;

use crate::domain::saved_view::{NewSavedView, SavedView};
use crate::domain::types::{HubId, OwnerRef, SavedViewId};
use crate::models::saved_view::{NewSavedView as DbNewSavedView, SavedView as DbSavedView};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, SavedViewReader, SavedViewWriter};
use crate::schema::saved_views;

impl SavedViewReader for DieselRepository {
    fn list_saved_views(
        &self,
        hub_id: HubId,
        owner: &OwnerRef,
    ) -> RepositoryResult<Vec<SavedView>> {
        let mut conn = self.conn()?;
        let rows = saved_views::table
            .filter(saved_views::hub_id.eq(hub_id.get()))
            .filter(saved_views::owner.eq(owner.as_str()))
            .order(saved_views::name.asc())
            .select(DbSavedView::as_select())
            .load::<DbSavedView>(&mut conn)?;

        rows.into_iter()
            .map(|row| SavedView::try_from(row).map_err(RepositoryError::from))
            .collect()
    }

    fn get_saved_view(
        &self,
        id: SavedViewId,
        hub_id: HubId,
    ) -> RepositoryResult<Option<SavedView>> {
        let mut conn = self.conn()?;
        let row = saved_views::table
            .filter(saved_views::id.eq(id.get()))
            .filter(saved_views::hub_id.eq(hub_id.get()))
            .select(DbSavedView::as_select())
            .first::<DbSavedView>(&mut conn)
            .optional()?;

        match row {
            Some(row) => Ok(Some(
                SavedView::try_from(row).map_err(RepositoryError::from)?,
            )),
            None => Ok(None),
        }
    }
}

impl SavedViewWriter for DieselRepository {
    fn create_saved_view(&self, new_view: &NewSavedView) -> RepositoryResult<SavedView> {
        let mut conn = self.conn()?;
        let insertable = DbNewSavedView::try_from(new_view)?;

        let row = diesel::insert_into(saved_views::table)
            .values(&insertable)
            .returning(DbSavedView::as_returning())
            .get_result::<DbSavedView>(&mut conn)?;

        SavedView::try_from(row).map_err(RepositoryError::from)
    }

    fn delete_saved_view(
        &self,
        id: SavedViewId,
        hub_id: HubId,
        owner: &OwnerRef,
    ) -> RepositoryResult<usize> {
        let mut conn = self.conn()?;
        let affected = diesel::delete(
            saved_views::table
                .filter(saved_views::id.eq(id.get()))
                .filter(saved_views::hub_id.eq(hub_id.get()))
                .filter(saved_views::owner.eq(owner.as_str())),
        )
        .execute(&mut conn)?;

        Ok(affected)
    }
}
