//! Onboarding form handlers.
//!
//! The browser-facing entry point: GET serves the form, POST runs the gate
//! and files the tracking issue that drives the rest of the onboarding
//! automation. No record is inserted here; that happens when the tracker's
//! automation calls back into `/deploy`.

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Form,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::error;

use concierge_core::OnboardingError;

use crate::metrics::GATE_REJECTIONS_TOTAL;
use crate::state::AppState;

/// Form fields posted by the onboarding page.
#[derive(Debug, Deserialize)]
pub struct FormSubmission {
    pub name: String,
    pub motto: String,
    pub key: String,
}

pub async fn show_form(State(state): State<Arc<AppState>>) -> Response {
    render_template(&state, "form.html").await
}

pub async fn submit_form(
    State(state): State<Arc<AppState>>,
    Form(submission): Form<FormSubmission>,
) -> Response {
    match state
        .onboarder()
        .submit_form(&submission.name, &submission.motto, &submission.key)
        .await
    {
        Ok(()) => confirmation(&state, &submission.name).await,
        Err(OnboardingError::Unauthorized) => {
            GATE_REJECTIONS_TOTAL.with_label_values(&["/"]).inc();
            (StatusCode::UNAUTHORIZED, Html("Wrong key.".to_string())).into_response()
        }
        Err(e) => (StatusCode::BAD_REQUEST, Html(e.to_string())).into_response(),
    }
}

/// Confirmation page with the submitted name interpolated into the
/// `{name}` placeholder.
async fn confirmation(state: &AppState, name: &str) -> Response {
    let path = state.templates_dir().join("subbed_form.html");
    match tokio::fs::read_to_string(&path).await {
        Ok(template) => Html(template.replace("{name}", name)).into_response(),
        Err(e) => {
            error!(path = %path.display(), error = %e, "failed to read template");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

async fn render_template(state: &AppState, file: &str) -> Response {
    let path = state.templates_dir().join(file);
    match tokio::fs::read_to_string(&path).await {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            error!(path = %path.display(), error = %e, "failed to read template");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
