use actix_web::{get, web, HttpResponse};
use dineroute_vector::{TOOL_DESCRIPTION, TOOL_NAME};
use std::sync::Arc;

use crate::state::AppState;
use crate::types::{HealthResponse, ToolDefinition};

/// GET /health - Liveness plus index state
#[get("/health")]
pub async fn health(state: web::Data<Arc<AppState>>) -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok".to_string(),
        index_state: state.index.state().await,
    })
}

/// GET /tools/restaurant - Name and description an agent registers the tool under
#[get("/tools/restaurant")]
pub async fn tool_definition() -> HttpResponse {
    HttpResponse::Ok().json(ToolDefinition {
        name: TOOL_NAME.to_string(),
        description: TOOL_DESCRIPTION.to_string(),
    })
}
