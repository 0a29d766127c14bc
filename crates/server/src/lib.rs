//! DineRoute HTTP Server
//!
//! Actix-web REST API over the restaurant index

pub mod prompts;
pub mod routes;
pub mod state;
pub mod types;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use dineroute_common::{AppConfig, Result};
use std::sync::Arc;
use tracing::info;
use tracing_actix_web::TracingLogger;

pub use prompts::{SuggestedPrompts, SUGGESTED_PROMPTS};
pub use state::AppState;

/// Start the HTTP server
///
/// The index is built in the background; until it is ready, searches get
/// the "still indexing" message.
pub async fn start_server(config: AppConfig) -> Result<()> {
    let bind_addr = config.server_bind_address();
    let state = Arc::new(AppState::new(config)?);

    let index = Arc::clone(&state.index);
    tokio::spawn(async move {
        let final_state = index.initialize().await;
        info!("Restaurant index finished initializing: {}", final_state);
    });

    info!("Starting server on http://{}", bind_addr);

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(Arc::clone(&state)))
            .configure(routes::configure)
    })
    .bind(&bind_addr)?
    .run()
    .await?;

    info!("Server stopped");
    Ok(())
}
