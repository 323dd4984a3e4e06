use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, services::ServeFile, trace::TraceLayer};

use super::{customers, form, handlers, instances, stream};
use crate::state::AppState;

/// All routes live at the root level; there is no /api prefix. The shared
/// key travels in request bodies, so there is no auth middleware either -
/// each mutating handler runs the gate itself. CORS mirrors any origin so
/// browser clients can consume the event streams from other hosts.
pub fn create_router(state: Arc<AppState>) -> Router {
    let favicon = ServeFile::new(state.static_dir().join("favicon.ico"));

    Router::new()
        .route("/", get(form::show_form))
        .route("/", post(form::submit_form))
        .route("/deploy", post(customers::deploy))
        .route("/create", post(customers::create))
        .route("/status", post(customers::update_status))
        .route("/customers", get(customers::list_customers))
        .route("/deployment/{name}", get(stream::deployment_status))
        .route("/instances", get(instances::list_instances))
        .route("/get-waypoints", get(stream::get_waypoints))
        .route("/health", get(handlers::health))
        .route("/config", get(handlers::get_config))
        .route("/metrics", get(handlers::metrics))
        .route_service("/favicon.ico", favicon)
        .layer(middleware::from_fn(
            super::middleware::metrics_middleware,
        ))
        .layer(CorsLayer::very_permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
