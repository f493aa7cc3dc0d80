use actix_web::{HttpResponse, Responder, get, web};
use pushkind_common::domain::auth::AuthenticatedUser;

use crate::dto::api::LeadsQuery;
use crate::repository::DieselRepository;
use crate::repository::errors::RepositoryError;
use crate::services::{ServiceError, api as api_service};

#[get("/v1/leads")]
pub async fn api_v1_leads(
    params: web::Query<LeadsQuery>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match api_service::list_leads(repo.get_ref(), &user, params.into_inner()) {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(ServiceError::Unauthorized) => HttpResponse::Unauthorized().finish(),
        Err(ServiceError::Form(message))
        | Err(ServiceError::Repository(RepositoryError::ValidationError(message))) => {
            HttpResponse::BadRequest().body(message)
        }
        Err(err) => {
            log::error!("Failed to list leads: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
