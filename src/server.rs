use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::api;
use crate::config::AppConfig;
use crate::database::Database;
use crate::webhooks;

pub fn build_router(config: AppConfig, database: Database) -> Router {
    let cors = cors_layer(&config);

    Router::new()
        .route("/health", get(api::health_check))
        .route("/webhook/receiver", post(webhooks::github::handle_webhook))
        .route("/api/actions-list", get(api::list_actions))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .into_inner(),
        )
        .with_state((config, database))
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    match config.cors_allow_origin.as_deref().map(HeaderValue::from_str) {
        Some(Ok(origin)) => CorsLayer::new()
            .allow_origin(AllowOrigin::exact(origin))
            .allow_methods(tower_http::cors::Any)
            .allow_headers(tower_http::cors::Any),
        Some(Err(e)) => {
            warn!("Ignoring invalid CORS_ALLOW_ORIGIN: {}", e);
            CorsLayer::permissive()
        }
        None => CorsLayer::permissive(),
    }
}
