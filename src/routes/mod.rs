//! HTTP handlers. Each handler delegates to a service and turns its result
//! into a page, a redirect with a flash message, or a file download.

use actix_web::HttpResponse;
use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};

use crate::dto::leads::ListFilterParams;

pub mod api;
pub mod import;
pub mod main;
pub mod settings;
pub mod views;

/// Index URL that restores `params`.
pub fn index_url(params: &ListFilterParams) -> String {
    match serde_html_form::to_string(params) {
        Ok(query) if !query.is_empty() => format!("/?{query}"),
        Ok(_) => "/".to_string(),
        Err(err) => {
            log::warn!("Failed to encode list filter: {err}");
            "/".to_string()
        }
    }
}

/// CSV attachment response.
pub fn csv_download(filename: &str, body: Vec<u8>) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(filename.to_string())],
        })
        .body(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_url_keeps_only_set_params() {
        assert_eq!(index_url(&ListFilterParams::default()), "/");
        let params = ListFilterParams {
            tab: Some("my".to_string()),
            search: Some("ann lee".to_string()),
            ..ListFilterParams::default()
        };
        assert_eq!(index_url(&params), "/?tab=my&search=ann+lee");
    }
}
