use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;

use crate::domain::saved_view::{
    NewSavedView as DomainNewSavedView, SavedView as DomainSavedView, ViewFilter,
};
use crate::domain::types::{HubId, OwnerRef, SavedViewId, SavedViewName, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::saved_views)]
/// Diesel model for [`crate::domain::saved_view::SavedView`]. The filter is
/// kept as a JSON document.
pub struct SavedView {
    pub id: i32,
    pub hub_id: i32,
    pub owner: String,
    pub name: String,
    pub filter: String,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::saved_views)]
pub struct NewSavedView<'a> {
    pub hub_id: i32,
    pub owner: &'a str,
    pub name: &'a str,
    pub filter: String,
    pub created_at: NaiveDateTime,
}

impl TryFrom<SavedView> for DomainSavedView {
    type Error = TypeConstraintError;

    fn try_from(view: SavedView) -> Result<Self, Self::Error> {
        let filter: ViewFilter = serde_json::from_str(&view.filter)
            .map_err(|e| TypeConstraintError::InvalidValue(format!("view filter: {e}")))?;
        Ok(Self {
            id: SavedViewId::try_from(view.id)?,
            hub_id: HubId::try_from(view.hub_id)?,
            owner: OwnerRef::new(view.owner)?,
            name: SavedViewName::new(view.name)?,
            filter,
            created_at: view.created_at,
        })
    }
}

impl<'a> TryFrom<&'a DomainNewSavedView> for NewSavedView<'a> {
    type Error = serde_json::Error;

    fn try_from(view: &'a DomainNewSavedView) -> Result<Self, Self::Error> {
        Ok(Self {
            hub_id: view.hub_id.get(),
            owner: view.owner.as_str(),
            name: view.name.as_str(),
            filter: serde_json::to_string(&view.filter)?,
            created_at: Utc::now().naive_utc(),
        })
    }
}
