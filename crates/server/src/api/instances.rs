//! Cluster inventory proxy.

use axum::{extract::State, http::StatusCode, response::IntoResponse, response::Response, Json};
use serde_json::json;
use std::sync::Arc;
use tracing::error;

use crate::state::AppState;

/// List running deployments as reported by the cluster manager. The view is
/// not joined against the record store; it can disagree with `/customers`.
pub async fn list_instances(State(state): State<Arc<AppState>>) -> Response {
    let Some(cluster) = state.cluster() else {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": "cluster manager not configured"})),
        )
            .into_response();
    };

    match cluster.list_deployments().await {
        Ok(deployments) => Json(deployments).into_response(),
        Err(e) => {
            error!(error = %e, "cluster listing failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": e.to_string()})),
            )
                .into_response()
        }
    }
}
