//! Customer onboarding and status API handlers.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

use concierge_core::{CustomerRecord, OnboardingError, StatusError};

use crate::metrics::{CUSTOMERS_ONBOARDED_TOTAL, DUPLICATE_NAMES_TOTAL, GATE_REJECTIONS_TOTAL};
use crate::state::AppState;

/// Request body for the deploy and create endpoints.
#[derive(Debug, Deserialize)]
pub struct CreateAppBody {
    pub name: String,
    pub motto: String,
    pub key: String,
}

/// Request body for status transitions.
#[derive(Debug, Deserialize)]
pub struct StatusUpdateBody {
    pub name: String,
    pub status: String,
    pub key: String,
}

/// Success response for record creation.
#[derive(Debug, Serialize)]
pub struct CustomerResponse {
    pub name: String,
    pub motto: String,
}

impl From<CustomerRecord> for CustomerResponse {
    fn from(record: CustomerRecord) -> Self {
        Self {
            name: record.name,
            motto: record.motto,
        }
    }
}

/// Deploy a customer: create the record and file a tracking issue.
///
/// Error shape quirk, kept on purpose: a duplicate name answers HTTP 200
/// with `{"error": ..., "code": 1}` in the body. Clients of this endpoint
/// check the body, not the status code. `/create` behaves differently.
pub async fn deploy(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateAppBody>,
) -> Response {
    match state
        .onboarder()
        .deploy(&body.name, &body.motto, &body.key)
        .await
    {
        Ok(record) => {
            CUSTOMERS_ONBOARDED_TOTAL.with_label_values(&["deploy"]).inc();
            (StatusCode::OK, Json(CustomerResponse::from(record))).into_response()
        }
        Err(OnboardingError::DuplicateName(_)) => {
            DUPLICATE_NAMES_TOTAL.inc();
            (
                StatusCode::OK,
                Json(json!({
                    "error": "a customer with this name already exists",
                    "code": 1,
                })),
            )
                .into_response()
        }
        Err(OnboardingError::Unauthorized) => {
            GATE_REJECTIONS_TOTAL.with_label_values(&["/deploy"]).inc();
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({"error": "Unauthorized"})),
            )
                .into_response()
        }
        Err(OnboardingError::Invalid(e)) => (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": e.to_string()})),
        )
            .into_response(),
        Err(OnboardingError::Store(e)) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": e})),
        )
            .into_response(),
    }
}

/// Direct create used by automation: no ticket filing, initial status
/// "db updated". Unlike `/deploy`, every store-side failure (duplicate
/// included) collapses into a generic 400.
pub async fn create(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateAppBody>,
) -> Response {
    match state.onboarder().create(&body.name, &body.motto, &body.key) {
        Ok(record) => {
            CUSTOMERS_ONBOARDED_TOTAL.with_label_values(&["create"]).inc();
            (StatusCode::CREATED, Json(CustomerResponse::from(record))).into_response()
        }
        Err(OnboardingError::Unauthorized) => {
            GATE_REJECTIONS_TOTAL.with_label_values(&["/create"]).inc();
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({"error": "Unauthorized"})),
            )
                .into_response()
        }
        Err(OnboardingError::DuplicateName(_)) => {
            DUPLICATE_NAMES_TOTAL.inc();
            info_incorrect()
        }
        Err(OnboardingError::Invalid(_)) | Err(OnboardingError::Store(_)) => info_incorrect(),
    }
}

fn info_incorrect() -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({"error": "info incorrect"})),
    )
        .into_response()
}

/// Apply a status transition. Answers 204 with no body on success.
pub async fn update_status(
    State(state): State<Arc<AppState>>,
    Json(body): Json<StatusUpdateBody>,
) -> Response {
    if state.gate().verify(&body.key).is_err() {
        GATE_REJECTIONS_TOTAL.with_label_values(&["/status"]).inc();
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": "Unauthorized"})),
        )
            .into_response();
    }

    match state.status_machine().apply(&body.name, &body.status) {
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(StatusError::NotFound(_)) => (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "Could not find that customer"})),
        )
            .into_response(),
        Err(StatusError::Invalid(e)) => (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": e.to_string()})),
        )
            .into_response(),
        Err(StatusError::Store(e)) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": e})),
        )
            .into_response(),
    }
}

/// List every customer record. Read-only, no gate.
pub async fn list_customers(State(state): State<Arc<AppState>>) -> Response {
    match state.store().list() {
        Ok(records) => Json(records).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": e.to_string()})),
        )
            .into_response(),
    }
}
