use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::models::config::CommonServerConfig;
use pushkind_common::routes::{base_context, redirect, render_template};
use tera::Tera;

use crate::forms::settings::SettingsForm;
use crate::repository::DieselRepository;
use crate::services::{ServiceError, settings as settings_service};

#[get("/settings")]
pub async fn show_settings(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<CommonServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match settings_service::load_settings(repo.get_ref(), &user) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "settings",
                &server_config.auth_service_url,
            );
            context.insert("data", &data);

            render_template(&tera, "settings/index.html", &context)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Access denied.").send();
            redirect("/na")
        }
        Err(err) => {
            log::error!("Failed to load settings: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/settings")]
pub async fn save_settings(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<SettingsForm>,
) -> impl Responder {
    match settings_service::save_settings(repo.get_ref(), &user, form) {
        Ok(_) => FlashMessage::success("Settings saved.").send(),
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Access denied.").send();
            return redirect("/na");
        }
        Err(ServiceError::Form(message)) => FlashMessage::error(message).send(),
        Err(err) => {
            log::error!("Failed to save settings: {err}");
            FlashMessage::error("Could not save the settings.").send();
        }
    }
    redirect("/settings")
}
