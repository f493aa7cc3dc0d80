use actix_web::{Responder, post, web};
use actix_web_flash_messages::FlashMessage;
use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::routes::redirect;

use crate::dto::leads::ListFilterParams;
use crate::repository::DieselRepository;
use crate::routes::index_url;
use crate::services::{ServiceError, views as views_service};

#[post("/views/add")]
pub async fn add_view(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    body: web::Bytes,
) -> impl Responder {
    match views_service::add_view(repo.get_ref(), &user, body.as_ref()) {
        Ok(view) => {
            FlashMessage::success(format!("View \"{}\" saved.", view.name)).send();
            redirect(&index_url(&ListFilterParams {
                view: Some(view.id.get()),
                ..ListFilterParams::default()
            }))
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Access denied.").send();
            redirect("/na")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect("/")
        }
        Err(err) => {
            log::error!("Failed to save a view: {err}");
            FlashMessage::error("Could not save the view.").send();
            redirect("/")
        }
    }
}

#[post("/views/{view_id}/delete")]
pub async fn delete_view(
    view_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match views_service::delete_view(repo.get_ref(), &user, view_id.into_inner()) {
        Ok(()) => FlashMessage::success("View deleted.").send(),
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Access denied.").send();
            return redirect("/na");
        }
        Err(ServiceError::NotFound) => FlashMessage::error("View not found.").send(),
        Err(err) => {
            log::error!("Failed to delete a view: {err}");
            FlashMessage::error("Could not delete the view.").send();
        }
    }
    redirect("/")
}
