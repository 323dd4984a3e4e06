//! Common test utilities for E2E testing with mocks.
//!
//! Builds an in-process router with mock collaborators injected, so route
//! behavior can be tested without external infrastructure.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use concierge_core::{
    config::{
        AuthConfig, ClusterConfig, Config, DatabaseConfig, ServerConfig, StreamConfig,
        WaypointsConfig,
    },
    testing::{MockCluster, MockTracker},
    ClusterClient, CustomerStore, FormKeyGate, Onboarder, SqliteCustomerStore, StatusMachine,
    StatusPublisher, TicketTracker,
};

use concierge_server::api::create_router;
use concierge_server::state::AppState;

/// The shared form key used by every fixture.
pub const KEY: &str = "0123456789abcdef0123456789ab";

const FORM_TEMPLATE: &str = "<html><body><form method=\"post\">\
<input name=\"name\"><input name=\"motto\"><input name=\"key\">\
</form></body></html>";

const SUBBED_TEMPLATE: &str = "<html><body>Thanks, {name}! We are on it.</body></html>";

const FAVICON: &[u8] = b"fixture-favicon-bytes";

/// Test fixture with an in-process router and controllable mocks.
pub struct TestFixture {
    pub router: Router,
    pub tracker: Arc<MockTracker>,
    pub cluster: Arc<MockCluster>,
    pub store: Arc<dyn CustomerStore>,
    pub temp_dir: TempDir,
}

/// Response from a test request.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
    pub text: String,
}

impl TestFixture {
    pub async fn new() -> Self {
        // Fast stream cadence so SSE bodies terminate quickly under test
        Self::with_stream_config(StreamConfig {
            interval_secs: 1,
            max_snapshots: 3,
        })
        .await
    }

    pub async fn with_stream_config(stream: StreamConfig) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("test.db");

        let templates_dir = temp_dir.path().join("templates");
        std::fs::create_dir_all(&templates_dir).expect("Failed to create templates dir");
        std::fs::write(templates_dir.join("form.html"), FORM_TEMPLATE).unwrap();
        std::fs::write(templates_dir.join("subbed_form.html"), SUBBED_TEMPLATE).unwrap();

        let static_dir = temp_dir.path().join("static");
        std::fs::create_dir_all(&static_dir).expect("Failed to create static dir");
        std::fs::write(static_dir.join("favicon.ico"), FAVICON).unwrap();

        let waypoints_path = temp_dir.path().join("waypoints.json");
        let waypoints: Vec<Value> = (0..12)
            .map(|i| serde_json::json!({"lat": 40 + i, "lon": -74 - i}))
            .collect();
        std::fs::write(
            &waypoints_path,
            serde_json::to_string(&waypoints).unwrap(),
        )
        .unwrap();

        let config = Config {
            auth: AuthConfig {
                form_key: Some(KEY.to_string()),
            },
            server: ServerConfig {
                templates_dir: templates_dir.clone(),
                static_dir: static_dir.clone(),
                ..ServerConfig::default()
            },
            database: DatabaseConfig {
                path: db_path.clone(),
            },
            tracker: None,
            cluster: Some(ClusterConfig {
                url: "http://cluster.invalid/deployments".to_string(),
                timeout_secs: 1,
            }),
            stream,
            waypoints: WaypointsConfig {
                path: waypoints_path,
                interval_secs: 1,
                limit: 10,
            },
        };

        let store: Arc<dyn CustomerStore> = Arc::new(
            SqliteCustomerStore::new(&db_path).expect("Failed to create customer store"),
        );
        let tracker = Arc::new(MockTracker::new());
        let cluster = Arc::new(MockCluster::new());

        let onboarder = Onboarder::new(
            FormKeyGate::from_config(&config.auth),
            Arc::clone(&store),
        )
        .with_tracker(
            Arc::clone(&tracker) as Arc<dyn TicketTracker>,
            "https://forms.example.com",
        );

        let status_machine = StatusMachine::new(Arc::clone(&store));
        let publisher = StatusPublisher::from_config(Arc::clone(&store), &config.stream);

        let state = Arc::new(AppState::new(
            config,
            onboarder,
            status_machine,
            publisher,
            Arc::clone(&store),
            Some(Arc::clone(&cluster) as Arc<dyn ClusterClient>),
        ));

        let router = create_router(state);

        Self {
            router,
            tracker,
            cluster,
            store,
            temp_dir,
        }
    }

    /// Send a GET request to the test server.
    pub async fn get(&self, path: &str) -> TestResponse {
        let request = Request::builder()
            .method("GET")
            .uri(path)
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    /// Send a GET request carrying an Origin header, as a browser would.
    pub async fn get_with_origin(&self, path: &str, origin: &str) -> TestResponse {
        let request = Request::builder()
            .method("GET")
            .uri(path)
            .header("Origin", origin)
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    /// Send a POST request with JSON body.
    pub async fn post(&self, path: &str, body: Value) -> TestResponse {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header("Content-Type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap();
        self.send(request).await
    }

    /// Send a POST request with an urlencoded form body.
    pub async fn post_form(&self, path: &str, body: &str) -> TestResponse {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        let text = String::from_utf8_lossy(&body_bytes).to_string();
        let body: Value = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
        };

        TestResponse {
            status,
            headers,
            body,
            text,
        }
    }
}

impl TestResponse {
    /// Parse the `data:` payloads out of a collected SSE body.
    pub fn sse_events(&self) -> Vec<Value> {
        self.text
            .lines()
            .filter_map(|line| line.strip_prefix("data:"))
            .map(|payload| serde_json::from_str(payload.trim()).expect("SSE payload not JSON"))
            .collect()
    }
}
