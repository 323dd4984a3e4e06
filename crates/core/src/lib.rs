pub mod auth;
pub mod cluster;
pub mod config;
pub mod customer;
pub mod onboarding;
pub mod status;
pub mod stream;
pub mod testing;
pub mod waypoints;

pub use auth::{AuthError, FormKeyGate, FORM_KEY_LEN};
pub use cluster::{ClusterClient, ClusterError, DeploymentInfo, HttpClusterClient};
pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, SanitizedConfig,
};
pub use customer::{CustomerError, CustomerRecord, CustomerStore, SqliteCustomerStore};
pub use onboarding::{
    HttpTracker, IssueRequest, Onboarder, OnboardingError, TicketTracker, TrackerError,
};
pub use status::{
    StatusError, StatusMachine, STATUS_CREATED, STATUS_DB_UPDATED, STATUS_INITIALIZING,
};
pub use stream::{StatusPublisher, StatusSnapshot};
pub use waypoints::{load_waypoints, WaypointError};
