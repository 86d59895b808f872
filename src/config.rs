use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIG_PATH: &str = "config/chat.json";

pub const PLACEHOLDER_KEY: &str = "YOUR-PUSHER-KEY";
pub const PLACEHOLDER_CLUSTER: &str = "YOUR-PUSHER-CLUSTER";
const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8080/send-message";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Pusher app key for the subscription connection.
    #[serde(default = "default_key")]
    pub pusher_key: String,
    /// Pusher cluster identifier, e.g. "eu" or "us2".
    #[serde(default = "default_cluster")]
    pub pusher_cluster: String,
    /// Backend endpoint that accepts the message POST and fans it out.
    #[serde(default = "default_endpoint")]
    pub endpoint_url: String,
}

fn default_key() -> String {
    PLACEHOLDER_KEY.to_string()
}

fn default_cluster() -> String {
    PLACEHOLDER_CLUSTER.to_string()
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            pusher_key: default_key(),
            pusher_cluster: default_cluster(),
            endpoint_url: default_endpoint(),
        }
    }
}

impl AppConfig {
    /// True while the credentials are still the shipped placeholders.
    /// This only warns; initialization is attempted regardless and fails
    /// downstream in the provider if the values are wrong.
    pub fn has_placeholder_credentials(&self) -> bool {
        self.pusher_key == PLACEHOLDER_KEY || self.pusher_cluster == PLACEHOLDER_CLUSTER
    }
}

pub fn load_config(path: &str) -> AppConfig {
    let path = Path::new(path);
    match fs::read_to_string(path) {
        Ok(content) => match serde_json::from_str::<AppConfig>(&content) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("Failed to parse config file {}: {err}", path.display());
                AppConfig::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            let config = AppConfig::default();
            // Write a placeholder file so the user has something to edit.
            match save_config(&path.to_string_lossy(), &config) {
                Ok(()) => log::info!(
                    "Created {} with placeholder values; fill in your Pusher credentials",
                    path.display()
                ),
                Err(err) => log::warn!("Unable to create {}: {err}", path.display()),
            }
            config
        }
        Err(err) => {
            log::warn!(
                "Failed to read config file {}: {err}; using defaults",
                path.display()
            );
            AppConfig::default()
        }
    }
}

pub fn save_config(path: &str, config: &AppConfig) -> std::io::Result<()> {
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(config)?;
    fs::write(path, json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_placeholders_and_writes_a_template() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config").join("chat.json");
        let path = path.to_str().unwrap();

        let config = load_config(path);

        assert!(config.has_placeholder_credentials());
        assert_eq!(config.endpoint_url, DEFAULT_ENDPOINT);
        // The placeholder template exists now and loads back unchanged.
        let reloaded = load_config(path);
        assert!(reloaded.has_placeholder_credentials());
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chat.json");
        fs::write(&path, "{not json").unwrap();

        let config = load_config(path.to_str().unwrap());
        assert!(config.has_placeholder_credentials());
    }

    #[test]
    fn round_trips_through_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chat.json");
        let config = AppConfig {
            pusher_key: "abc123".to_string(),
            pusher_cluster: "eu".to_string(),
            endpoint_url: "https://chat.example/send-message".to_string(),
        };

        save_config(path.to_str().unwrap(), &config).unwrap();
        let loaded = load_config(path.to_str().unwrap());

        assert!(!loaded.has_placeholder_credentials());
        assert_eq!(loaded.pusher_key, "abc123");
        assert_eq!(loaded.endpoint_url, "https://chat.example/send-message");
    }

    #[test]
    fn partial_file_fills_missing_fields_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chat.json");
        fs::write(&path, r#"{"pusher_key":"abc123","pusher_cluster":"eu"}"#).unwrap();

        let loaded = load_config(path.to_str().unwrap());
        assert!(!loaded.has_placeholder_credentials());
        assert_eq!(loaded.endpoint_url, DEFAULT_ENDPOINT);
    }
}
