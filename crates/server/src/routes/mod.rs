pub mod prompts;
pub mod search;
pub mod system;

use actix_web::{http::StatusCode, web, HttpResponse};
use dineroute_common::DineRouteError;

use crate::types::ErrorResponse;

/// Register every route
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(search::search)
        .service(search::search_stats)
        .service(prompts::suggested_prompts)
        .service(system::health)
        .service(system::tool_definition);
}

/// JSON error body with the status the error maps to
pub(crate) fn error_response(err: &DineRouteError) -> HttpResponse {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    HttpResponse::build(status).json(ErrorResponse {
        error: err.to_string(),
    })
}
