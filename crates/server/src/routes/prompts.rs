use actix_web::{get, HttpResponse};

use crate::prompts::SUGGESTED_PROMPTS;

/// GET /prompts/suggested - Example queries for the UI
#[get("/prompts/suggested")]
pub async fn suggested_prompts() -> HttpResponse {
    HttpResponse::Ok().json(SUGGESTED_PROMPTS)
}
