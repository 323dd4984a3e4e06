//! Server-sent event handlers: deployment status and the waypoints demo.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::sse::{Event, Sse},
    response::{IntoResponse, Response},
    Json,
};
use futures::StreamExt;
use serde_json::json;
use tracing::error;

use concierge_core::load_waypoints;

use crate::metrics::{STATUS_SNAPSHOTS_SENT, STATUS_STREAMS_ACTIVE, STATUS_STREAMS_TOTAL};
use crate::state::AppState;

/// Keeps the active-streams gauge honest: decremented when the SSE stream
/// is dropped, whether it ran to its bound or the client disconnected.
struct StreamGauge;

impl StreamGauge {
    fn open() -> Self {
        STATUS_STREAMS_TOTAL.inc();
        STATUS_STREAMS_ACTIVE.inc();
        Self
    }
}

impl Drop for StreamGauge {
    fn drop(&mut self) {
        STATUS_STREAMS_ACTIVE.dec();
    }
}

/// Stream status snapshots for one customer as `text/event-stream`.
///
/// The stream is finite: it ends after the configured snapshot bound and
/// the client is expected to reconnect if it still cares.
pub async fn deployment_status(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Sse<impl futures::Stream<Item = Result<Event, axum::Error>>> {
    let gauge = StreamGauge::open();

    let stream = state.publisher().snapshots(name).map(move |snapshot| {
        let _ = &gauge;
        STATUS_SNAPSHOTS_SENT.inc();
        Event::default().json_data(&snapshot)
    });

    Sse::new(stream)
}

/// Stream the demo waypoints, one per tick.
pub async fn get_waypoints(State(state): State<Arc<AppState>>) -> Response {
    let config = state.waypoints_config().clone();

    let waypoints = match load_waypoints(&config.path, config.limit) {
        Ok(waypoints) => waypoints,
        Err(e) => {
            error!(path = %config.path.display(), error = %e, "failed to load waypoints");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": e.to_string()})),
            )
                .into_response();
        }
    };

    let interval = Duration::from_secs(config.interval_secs);
    let stream = futures::stream::iter(waypoints.into_iter().enumerate()).then(
        move |(i, waypoint)| async move {
            if i > 0 {
                tokio::time::sleep(interval).await;
            }
            Event::default().json_data(&waypoint)
        },
    );

    Sse::new(stream).into_response()
}
