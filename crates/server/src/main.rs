use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use concierge_core::{
    load_config, validate_config, ClusterClient, CustomerStore, FormKeyGate, HttpClusterClient,
    HttpTracker, Onboarder, SqliteCustomerStore, StatusMachine, StatusPublisher, TicketTracker,
};

use concierge_server::api::create_router;
use concierge_server::state::AppState;

/// Application version
const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine config path
    let config_path = std::env::var("CONCIERGE_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.toml"));

    // Load configuration
    info!("Loading configuration from {:?}", config_path);
    let config = load_config(&config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;

    // Validate configuration
    validate_config(&config).context("Configuration validation failed")?;

    info!("Configuration loaded successfully");
    info!("Database path: {:?}", config.database.path);

    // Log a config fingerprint so deploys can be told apart in the logs
    let config_json = serde_json::to_string(&config).unwrap_or_default();
    let config_hash = format!("{:x}", Sha256::digest(config_json.as_bytes()));
    info!("Starting concierge {} (config {})", VERSION, &config_hash[..16]);

    if config.auth.form_key.is_none() {
        warn!("No form key configured; every onboarding request will be rejected");
    }

    // Create the customer store
    let store: Arc<dyn CustomerStore> = Arc::new(
        SqliteCustomerStore::new(&config.database.path)
            .context("Failed to create customer store")?,
    );
    info!("Customer store initialized");

    // Create gate and orchestrator
    let gate = FormKeyGate::from_config(&config.auth);
    let mut onboarder = Onboarder::new(gate, Arc::clone(&store));

    // Attach the tracker webhook if configured
    if let Some(ref tracker_config) = config.tracker {
        info!("Initializing issue tracker webhook at {}", tracker_config.url);
        let tracker: Arc<dyn TicketTracker> = Arc::new(HttpTracker::new(tracker_config.clone()));
        onboarder = onboarder.with_tracker(tracker, tracker_config.callback_url.clone());
    } else {
        info!("No issue tracker configured; onboarding will skip ticket filing");
    }

    // Create the cluster client if configured
    let cluster: Option<Arc<dyn ClusterClient>> = match &config.cluster {
        Some(cluster_config) => {
            info!("Initializing cluster client at {}", cluster_config.url);
            Some(Arc::new(HttpClusterClient::new(cluster_config.clone())))
        }
        None => {
            info!("No cluster manager configured");
            None
        }
    };

    let status_machine = StatusMachine::new(Arc::clone(&store));
    let publisher = StatusPublisher::from_config(Arc::clone(&store), &config.stream);

    // Create app state
    let state = Arc::new(AppState::new(
        config.clone(),
        onboarder,
        status_machine,
        publisher,
        store,
        cluster,
    ));

    // Create router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(config.server.host, config.server.port);
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shut down");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
