use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::path::PathBuf;

/// Root configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub auth: AuthConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub tracker: Option<TrackerConfig>,
    #[serde(default)]
    pub cluster: Option<ClusterConfig>,
    #[serde(default)]
    pub stream: StreamConfig,
    #[serde(default)]
    pub waypoints: WaypointsConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Directory holding the onboarding form templates.
    #[serde(default = "default_templates_dir")]
    pub templates_dir: PathBuf,
    /// Directory holding static assets (favicon).
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            templates_dir: default_templates_dir(),
            static_dir: default_static_dir(),
        }
    }
}

fn default_host() -> IpAddr {
    "0.0.0.0".parse().unwrap()
}

fn default_port() -> u16 {
    8080
}

fn default_templates_dir() -> PathBuf {
    PathBuf::from("templates")
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("static")
}

/// Authentication configuration.
///
/// A single shared key gates every mutating request. The key arrives in the
/// request body (`key` field), not in a header.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// Shared form key, exactly 28 characters. When unset, every mutating
    /// request is rejected.
    #[serde(default)]
    pub form_key: Option<String>,
}

/// Database configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_path")]
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

fn default_db_path() -> PathBuf {
    PathBuf::from("concierge.db")
}

/// Issue tracker webhook configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TrackerConfig {
    /// Webhook endpoint that files a tracking issue.
    pub url: String,
    /// Optional bearer token for the webhook.
    #[serde(default)]
    pub token: Option<String>,
    /// Callback URL included in the filed issue.
    pub callback_url: String,
    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
}

/// Cluster manager collaborator configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClusterConfig {
    /// Endpoint listing deployments, e.g. "http://localhost:9090/deployments"
    pub url: String,
    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
}

fn default_timeout() -> u32 {
    30
}

/// Status stream configuration.
///
/// Independent from the waypoint demo stream cadence.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StreamConfig {
    /// Seconds between status snapshots (default: 5)
    #[serde(default = "default_stream_interval")]
    pub interval_secs: u64,
    /// Maximum snapshots per stream before termination (default: 60)
    #[serde(default = "default_max_snapshots")]
    pub max_snapshots: usize,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_stream_interval(),
            max_snapshots: default_max_snapshots(),
        }
    }
}

fn default_stream_interval() -> u64 {
    5
}

fn default_max_snapshots() -> usize {
    60
}

/// Waypoint demo stream configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WaypointsConfig {
    /// Static JSON file holding the waypoint list.
    #[serde(default = "default_waypoints_path")]
    pub path: PathBuf,
    /// Seconds between waypoint events (default: 1)
    #[serde(default = "default_waypoints_interval")]
    pub interval_secs: u64,
    /// Maximum waypoints per stream (default: 10)
    #[serde(default = "default_waypoints_limit")]
    pub limit: usize,
}

impl Default for WaypointsConfig {
    fn default() -> Self {
        Self {
            path: default_waypoints_path(),
            interval_secs: default_waypoints_interval(),
            limit: default_waypoints_limit(),
        }
    }
}

fn default_waypoints_path() -> PathBuf {
    PathBuf::from("waypoints.json")
}

fn default_waypoints_interval() -> u64 {
    1
}

fn default_waypoints_limit() -> usize {
    10
}

/// Sanitized config for API responses (secrets redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub auth: SanitizedAuthConfig,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracker: Option<SanitizedTrackerConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cluster: Option<ClusterConfig>,
    pub stream: StreamConfig,
    pub waypoints: WaypointsConfig,
}

#[derive(Debug, Clone, Serialize)]
pub struct SanitizedAuthConfig {
    pub form_key_configured: bool,
}

/// Sanitized tracker config (token hidden)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedTrackerConfig {
    pub url: String,
    pub token_configured: bool,
    pub callback_url: String,
    pub timeout_secs: u32,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            auth: SanitizedAuthConfig {
                form_key_configured: config
                    .auth
                    .form_key
                    .as_ref()
                    .is_some_and(|k| !k.is_empty()),
            },
            server: config.server.clone(),
            database: config.database.clone(),
            tracker: config.tracker.as_ref().map(|t| SanitizedTrackerConfig {
                url: t.url.clone(),
                token_configured: t.token.as_ref().is_some_and(|t| !t.is_empty()),
                callback_url: t.callback_url.clone(),
                timeout_secs: t.timeout_secs,
            }),
            cluster: config.cluster.clone(),
            stream: config.stream.clone(),
            waypoints: config.waypoints.clone(),
        }
    }
}
