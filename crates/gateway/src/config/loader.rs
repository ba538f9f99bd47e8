use std::path::Path;
use thiserror::Error;

use super::types::{GatewayConfigFile, VenueConfig};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] serde_json::Error),
    #[error("No enabled venues in config")]
    NoEnabledVenues,
    #[error("Venue not found: {0}")]
    VenueNotFound(String),
    #[error("safety_check_ticks must be greater than zero")]
    ZeroSafetyCheck,
}

/// Load gateway configuration from a JSON file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<GatewayConfigFile, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: GatewayConfigFile = serde_json::from_str(&content)?;
    Ok(config)
}

/// Load configuration from a JSON string
pub fn load_config_from_str(json: &str) -> Result<GatewayConfigFile, ConfigError> {
    let config: GatewayConfigFile = serde_json::from_str(json)?;
    Ok(config)
}

/// Load the default embedded configuration
pub fn load_default_config() -> Result<GatewayConfigFile, ConfigError> {
    let default_config = include_str!("gateway_config.json");
    load_config_from_str(default_config)
}

impl GatewayConfigFile {
    /// Get only enabled venues
    pub fn enabled_venues(&self) -> Vec<&VenueConfig> {
        self.venues.iter().filter(|v| v.enabled).collect()
    }

    /// Get a specific venue by ID
    pub fn get_venue(&self, id: &str) -> Option<&VenueConfig> {
        self.venues.iter().find(|v| v.id == id)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.enabled_venues().is_empty() {
            return Err(ConfigError::NoEnabledVenues);
        }
        if self.global.safety_check_ticks == 0 {
            return Err(ConfigError::ZeroSafetyCheck);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_default_config() {
        let config = load_default_config().unwrap();
        assert!(!config.venues.is_empty());
        config.validate().unwrap();
    }

    #[test]
    fn test_get_venue() {
        let config = load_default_config().unwrap();
        let venue = config.get_venue("livecoin");
        assert!(venue.is_some());
        assert_eq!(venue.unwrap().name, "Livecoin");
    }

    #[test]
    fn test_defaults_fill_missing_fields() {
        let config = load_config_from_str(
            r#"{
                "venues": [{
                    "id": "livecoin",
                    "name": "Livecoin",
                    "rest_url": "https://api.livecoin.net",
                    "ws_url": "wss://ws.api.livecoin.net/ws/v2"
                }]
            }"#,
        )
        .unwrap();

        let venue = config.get_venue("livecoin").unwrap();
        assert!(venue.enabled);
        assert_eq!(venue.refresh_period_secs, 300);
        assert_eq!(config.global.heartbeat_staleness_secs, 120);
        assert_eq!(config.global.safety_check_ticks, 300);
    }

    #[test]
    fn test_validate_rejects_all_disabled() {
        let config = load_config_from_str(
            r#"{
                "venues": [{
                    "id": "livecoin",
                    "name": "Livecoin",
                    "enabled": false,
                    "rest_url": "https://api.livecoin.net",
                    "ws_url": "wss://ws.api.livecoin.net/ws/v2"
                }]
            }"#,
        )
        .unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NoEnabledVenues)
        ));
    }
}
