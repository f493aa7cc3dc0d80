//! Saved view management.

use pushkind_common::domain::auth::AuthenticatedUser;

use crate::domain::saved_view::SavedView;
use crate::domain::types::SavedViewId;
use crate::forms::views::AddViewForm;
use crate::repository::SavedViewWriter;
use crate::services::{ServiceError, ServiceResult, caller_from_user, hub_of, owner_of};

/// Saves the posted filters as a view owned by the user.
pub fn add_view<R>(repo: &R, user: &AuthenticatedUser, body: &[u8]) -> ServiceResult<SavedView>
where
    R: SavedViewWriter + ?Sized,
{
    let caller = caller_from_user(user)?;
    let hub_id = hub_of(user)?;

    let new_view = AddViewForm::from_bytes(body)?.into_new_view(hub_id, owner_of(&caller)?)?;

    let view = repo.create_saved_view(&new_view).map_err(|err| {
        log::error!("Failed to save a view: {err}");
        err
    })?;
    Ok(view)
}

/// Deletes one of the user's own views.
pub fn delete_view<R>(repo: &R, user: &AuthenticatedUser, view_id: i32) -> ServiceResult<()>
where
    R: SavedViewWriter + ?Sized,
{
    let caller = caller_from_user(user)?;
    let hub_id = hub_of(user)?;
    let view_id = SavedViewId::new(view_id).map_err(|_| ServiceError::NotFound)?;

    let deleted = repo
        .delete_saved_view(view_id, hub_id, &owner_of(&caller)?)
        .map_err(|err| {
            log::error!("Failed to delete view#{view_id}: {err}");
            err
        })?;
    if deleted == 0 {
        return Err(ServiceError::NotFound);
    }
    Ok(())
}
