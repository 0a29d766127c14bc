use actix_web::{get, web, HttpResponse};
use dineroute_common::DineRouteError;
use dineroute_vector::render;
use std::sync::Arc;

use super::error_response;
use crate::state::AppState;
use crate::types::{SearchQuery, SearchResponse};

/// GET /restaurants/search - Query tool output for free text
#[get("/restaurants/search")]
pub async fn search(
    query: web::Query<SearchQuery>,
    state: web::Data<Arc<AppState>>,
) -> actix_web::Result<HttpResponse> {
    if query.q.trim().is_empty() {
        return Ok(error_response(&DineRouteError::invalid_input(
            "Query cannot be empty",
        )));
    }

    let response = match query.top_k {
        Some(top_k) => render(&state.index.query(&query.q, top_k).await),
        None => state.tool.run(&query.q).await,
    };

    Ok(HttpResponse::Ok().json(SearchResponse {
        query: query.q.clone(),
        response,
    }))
}

/// GET /restaurants/stats - Index statistics
#[get("/restaurants/stats")]
pub async fn search_stats(state: web::Data<Arc<AppState>>) -> actix_web::Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(state.index.stats().await))
}
