use actix_multipart::form::MultipartForm;
use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::FlashMessage;
use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::routes::redirect;

use crate::forms::import::UploadLeadsForm;
use crate::repository::DieselRepository;
use crate::routes::csv_download;
use crate::services::{ServiceError, import as import_service};

#[post("/leads/upload")]
pub async fn upload_leads(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    MultipartForm(form): MultipartForm<UploadLeadsForm>,
) -> impl Responder {
    let repo = repo.into_inner();
    let result =
        web::block(move || import_service::upload_leads(repo.as_ref(), &user, &form)).await;

    match result {
        Ok(Ok(summary)) => {
            if summary.skipped() > 0 {
                FlashMessage::warning(summary.to_string()).send();
            } else {
                FlashMessage::success(summary.to_string()).send();
            }
        }
        Ok(Err(ServiceError::Unauthorized)) => {
            FlashMessage::error("Access denied.").send();
            return redirect("/na");
        }
        Ok(Err(ServiceError::Form(message))) => FlashMessage::error(message).send(),
        Ok(Err(err)) => {
            log::error!("Failed to import leads: {err}");
            FlashMessage::error("Could not import the leads.").send();
        }
        Err(err) => {
            log::error!("Import worker failed: {err}");
            FlashMessage::error("Could not import the leads.").send();
        }
    }
    redirect("/")
}

#[get("/leads/template.csv")]
pub async fn download_template(user: AuthenticatedUser) -> impl Responder {
    match import_service::template(&user) {
        Ok(body) => csv_download("leads_template.csv", body),
        Err(ServiceError::Unauthorized) => redirect("/na"),
        Err(err) => {
            log::error!("Failed to build the template: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/leads/export.csv")]
pub async fn export_leads(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match import_service::export_leads(repo.get_ref(), &user) {
        Ok(body) => csv_download("leads.csv", body),
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Access denied.").send();
            redirect("/na")
        }
        Err(err) => {
            log::error!("Failed to export leads: {err}");
            FlashMessage::error("Could not export the leads.").send();
            redirect("/")
        }
    }
}
