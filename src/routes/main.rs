use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::models::config::CommonServerConfig;
use pushkind_common::routes::{base_context, redirect, render_template};
use tera::Tera;

use crate::domain::lead::LeadStatus;
use crate::dto::leads::ListFilterParams;
use crate::forms::leads::{AddLeadForm, BulkLeadsForm, SaveLeadForm};
use crate::repository::DieselRepository;
use crate::routes::index_url;
use crate::services::{ServiceError, leads as leads_service};

#[get("/")]
pub async fn show_index(
    params: web::Query<ListFilterParams>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<CommonServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match leads_service::load_index_page(repo.get_ref(), &user, params.into_inner()) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "index",
                &server_config.auth_service_url,
            );
            context.insert("data", &data);
            context.insert("statuses", &LeadStatus::ALL);

            render_template(&tera, "main/index.html", &context)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Access denied.").send();
            redirect("/na")
        }
        Err(err) => {
            log::error!("Failed to render leads: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/lead/add")]
pub async fn add_lead(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<AddLeadForm>,
) -> impl Responder {
    match leads_service::add_lead(repo.get_ref(), &user, form) {
        Ok(_) => FlashMessage::success("Lead added.").send(),
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Access denied.").send();
            return redirect("/na");
        }
        Err(ServiceError::Form(message)) => FlashMessage::error(message).send(),
        Err(err) => {
            log::error!("Failed to add a lead: {err}");
            FlashMessage::error("Could not add the lead.").send();
        }
    }
    redirect("/")
}

#[post("/lead/save")]
pub async fn save_lead(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<SaveLeadForm>,
) -> impl Responder {
    match leads_service::save_lead(repo.get_ref(), &user, form) {
        Ok(_) => FlashMessage::success("Lead updated.").send(),
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("This lead is not available to you.").send();
        }
        Err(ServiceError::NotFound) => FlashMessage::error("Lead not found.").send(),
        Err(ServiceError::Form(message)) => FlashMessage::error(message).send(),
        Err(err) => {
            log::error!("Failed to save a lead: {err}");
            FlashMessage::error("Could not save the lead.").send();
        }
    }
    redirect("/")
}

/// Index URL the bulk form was posted from.
fn bulk_return_url(body: &[u8]) -> String {
    BulkLeadsForm::from_bytes(body)
        .map(|form| {
            index_url(&ListFilterParams {
                tab: form.tab,
                view: form.view,
                search: form.search,
                loaded: form.loaded,
            })
        })
        .unwrap_or_else(|_| "/".to_string())
}

#[post("/leads/delete")]
pub async fn delete_leads(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    body: web::Bytes,
) -> impl Responder {
    match leads_service::delete_leads(repo.get_ref(), &user, body.as_ref()) {
        Ok(count) => FlashMessage::success(format!("{count} leads deleted.")).send(),
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Access denied.").send();
            return redirect("/na");
        }
        Err(ServiceError::Form(message)) => FlashMessage::error(message).send(),
        Err(err) => {
            log::error!("Failed to delete leads: {err}");
            FlashMessage::error("Could not delete the leads.").send();
        }
    }
    redirect(&bulk_return_url(body.as_ref()))
}

#[post("/leads/assign")]
pub async fn assign_leads(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    body: web::Bytes,
) -> impl Responder {
    match leads_service::assign_leads(repo.get_ref(), &user, body.as_ref()) {
        Ok(count) => FlashMessage::success(format!("{count} leads assigned.")).send(),
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Access denied.").send();
            return redirect("/na");
        }
        Err(ServiceError::Form(message)) => FlashMessage::error(message).send(),
        Err(err) => {
            log::error!("Failed to assign leads: {err}");
            FlashMessage::error("Could not assign the leads.").send();
        }
    }
    redirect(&bulk_return_url(body.as_ref()))
}

#[post("/leads/cleanup")]
pub async fn cleanup_leads(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match leads_service::cleanup_leads(repo.get_ref(), &user) {
        Ok(count) => FlashMessage::success(format!("{count} leads deleted.")).send(),
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Access denied.").send();
            return redirect("/na");
        }
        Err(err) => {
            log::error!("Failed to delete all leads: {err}");
            FlashMessage::error("Could not delete the leads.").send();
        }
    }
    redirect("/")
}
