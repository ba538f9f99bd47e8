use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Root configuration for the gateway
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfigFile {
    pub venues: Vec<VenueConfig>,
    #[serde(default)]
    pub global: GlobalConfig,
}

/// Configuration for a single venue
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VenueConfig {
    /// Unique identifier for the venue (e.g., "livecoin")
    pub id: String,
    /// Display name
    pub name: String,
    /// Whether this venue is enabled
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// REST API base URL
    pub rest_url: String,
    /// WebSocket URL
    pub ws_url: String,
    /// API key sent on authenticated endpoints
    #[serde(default)]
    pub api_key: String,
    /// Request signature sent on authenticated endpoints
    #[serde(default)]
    pub api_sign: String,
    /// Pairs to stream, encoded as "BASE/QUOTE"
    #[serde(default)]
    pub symbols: Vec<String>,
    /// Metadata refresh period in seconds
    #[serde(default = "default_refresh_period")]
    pub refresh_period_secs: u64,
    /// Per-request HTTP timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl VenueConfig {
    pub fn refresh_period(&self) -> Duration {
        Duration::from_secs(self.refresh_period_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Global configuration that applies to all venues
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Pause between stream sessions in milliseconds
    #[serde(default = "default_reconnect_delay")]
    pub reconnect_delay_ms: u64,
    /// Seconds of stream silence tolerated before a forced reconnect
    #[serde(default = "default_heartbeat_staleness")]
    pub heartbeat_staleness_secs: u64,
    /// Forced stream reset fires every this many seconds of session time
    #[serde(default = "default_safety_check_ticks")]
    pub safety_check_ticks: u64,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        GlobalConfig {
            reconnect_delay_ms: default_reconnect_delay(),
            heartbeat_staleness_secs: default_heartbeat_staleness(),
            safety_check_ticks: default_safety_check_ticks(),
        }
    }
}

impl GlobalConfig {
    pub fn reconnect_delay(&self) -> Duration {
        Duration::from_millis(self.reconnect_delay_ms)
    }
}

fn default_true() -> bool {
    true
}

fn default_refresh_period() -> u64 {
    300
}

fn default_request_timeout() -> u64 {
    10
}

fn default_reconnect_delay() -> u64 {
    1_000
}

fn default_heartbeat_staleness() -> u64 {
    120
}

fn default_safety_check_ticks() -> u64 {
    300
}
