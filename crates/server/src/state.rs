use std::path::PathBuf;
use std::sync::Arc;

use concierge_core::{
    ClusterClient, Config, CustomerStore, FormKeyGate, Onboarder, SanitizedConfig, StatusMachine,
    StatusPublisher,
};

/// Shared application state
pub struct AppState {
    config: Config,
    onboarder: Onboarder,
    status_machine: StatusMachine,
    publisher: StatusPublisher,
    store: Arc<dyn CustomerStore>,
    cluster: Option<Arc<dyn ClusterClient>>,
    gate: FormKeyGate,
}

impl AppState {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        config: Config,
        onboarder: Onboarder,
        status_machine: StatusMachine,
        publisher: StatusPublisher,
        store: Arc<dyn CustomerStore>,
        cluster: Option<Arc<dyn ClusterClient>>,
    ) -> Self {
        let gate = FormKeyGate::from_config(&config.auth);
        Self {
            config,
            onboarder,
            status_machine,
            publisher,
            store,
            cluster,
            gate,
        }
    }

    pub fn sanitized_config(&self) -> SanitizedConfig {
        SanitizedConfig::from(&self.config)
    }

    pub fn templates_dir(&self) -> PathBuf {
        self.config.server.templates_dir.clone()
    }

    pub fn static_dir(&self) -> PathBuf {
        self.config.server.static_dir.clone()
    }

    pub fn waypoints_config(&self) -> &concierge_core::config::WaypointsConfig {
        &self.config.waypoints
    }

    pub fn onboarder(&self) -> &Onboarder {
        &self.onboarder
    }

    pub fn status_machine(&self) -> &StatusMachine {
        &self.status_machine
    }

    pub fn publisher(&self) -> &StatusPublisher {
        &self.publisher
    }

    pub fn store(&self) -> &dyn CustomerStore {
        self.store.as_ref()
    }

    pub fn cluster(&self) -> Option<&Arc<dyn ClusterClient>> {
        self.cluster.as_ref()
    }

    pub fn gate(&self) -> &FormKeyGate {
        &self.gate
    }
}
