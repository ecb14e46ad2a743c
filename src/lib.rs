// src/lib.rs

pub mod common;
pub mod config;
pub mod db;
pub mod docs;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod seed;
pub mod services;

use axum::{
    http::HeaderValue,
    middleware as axum_middleware,
    routing::{get, post, put},
    Json, Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;

use crate::{config::AppState, docs::ApiDoc, middleware::auth::auth_guard};

/// Builds the full HTTP surface under `/api`.
pub fn build_router(app_state: AppState) -> Router {
    // Public routes
    let public_routes = Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login));

    // Everything below needs a valid bearer token
    let protected_routes = Router::new()
        .route("/auth/me", get(handlers::auth::get_me))
        .route(
            "/organizations",
            get(handlers::organizations::list_organizations)
                .post(handlers::organizations::create_organization),
        )
        .route(
            "/organizations/{org_id}",
            get(handlers::organizations::get_organization)
                .put(handlers::organizations::update_organization),
        )
        .route(
            "/organizations/{org_id}/users",
            get(handlers::organizations::list_organization_users),
        )
        .route(
            "/organizations/{org_id}/config",
            get(handlers::configuration::get_configuration)
                .put(handlers::configuration::update_configuration),
        )
        .route(
            "/organizations/{org_id}/documents",
            get(handlers::documents::list_documents).post(handlers::documents::create_document),
        )
        .route(
            "/organizations/{org_id}/documents/{doc_id}",
            get(handlers::documents::get_document).delete(handlers::documents::delete_document),
        )
        .route(
            "/organizations/{org_id}/service-types",
            get(handlers::scheduling::list_service_types)
                .post(handlers::scheduling::create_service_type),
        )
        .route(
            "/organizations/{org_id}/service-types/{service_type_id}",
            put(handlers::scheduling::update_service_type),
        )
        .route(
            "/organizations/{org_id}/appointments",
            get(handlers::scheduling::list_appointments)
                .post(handlers::scheduling::create_appointment),
        )
        .route(
            "/organizations/{org_id}/appointments/{appointment_id}",
            get(handlers::scheduling::get_appointment)
                .put(handlers::scheduling::update_appointment),
        )
        .route(
            "/organizations/{org_id}/messages",
            get(handlers::messages::list_messages).post(handlers::messages::create_message),
        )
        .route(
            "/organizations/{org_id}/messages/{message_id}",
            get(handlers::messages::get_message),
        )
        .route(
            "/organizations/{org_id}/analytics",
            get(handlers::analytics::get_organization_analytics),
        )
        .route(
            "/organizations/{org_id}/metrics",
            get(handlers::analytics::list_metrics),
        )
        .route(
            "/analytics/platform",
            get(handlers::analytics::get_platform_analytics),
        )
        .route_layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let cors = cors_layer(&app_state.config.cors_allowed_origins);

    Router::new()
        .nest("/api", public_routes.merge(protected_routes))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}
