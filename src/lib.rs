//! authkeep
//!
//! Client-side authentication session layer: a thin facade sequencing
//! an HTTP API client and a pluggable key-value store to implement the
//! register / login / verify / guest / logout flows, plus the session
//! flags (token, guest, onboarding, pending verification) the UI reads.

pub mod api;
pub mod auth;
pub mod store;

use std::path::PathBuf;

use tracing::{error, info, warn};

pub use api::ApiClient;
pub use auth::{AuthError, AuthSession, LoginRequest, RegisterRequest};
pub use store::{FileStore, KeyValueStore, MemoryStore, StoreError};

/// Client configuration
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthConfig {
    /// Base URL of the authentication API
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Default request timeout in seconds
fn default_timeout_secs() -> u64 {
    30
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.authkeep.dev".to_string(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Get the application data directory (shared across modules)
pub fn app_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("authkeep"))
}

/// Get log directory path
pub fn log_dir() -> Option<PathBuf> {
    app_dir().map(|p| p.join("logs"))
}

impl AuthConfig {
    /// Get config file path
    fn config_path() -> Option<PathBuf> {
        app_dir().map(|p| p.join("config.json"))
    }

    /// Load config from file, falling back to defaults
    pub fn load() -> Self {
        if let Some(path) = Self::config_path() {
            if path.exists() {
                match std::fs::read_to_string(&path) {
                    Ok(content) => match serde_json::from_str(&content) {
                        Ok(config) => {
                            info!("Loaded config from {:?}", path);
                            return config;
                        }
                        Err(e) => {
                            warn!("Failed to parse config file: {}", e);
                        }
                    },
                    Err(e) => {
                        warn!("Failed to read config file: {}", e);
                    }
                }
            }
        }
        Self::default()
    }

    /// Save config to file
    pub fn save(&self) {
        if let Some(path) = Self::config_path() {
            if let Some(parent) = path.parent() {
                if let Err(e) = std::fs::create_dir_all(parent) {
                    error!("Failed to create config directory: {}", e);
                    return;
                }
            }

            match serde_json::to_string_pretty(self) {
                Ok(content) => {
                    if let Err(e) = std::fs::write(&path, content) {
                        error!("Failed to save config: {}", e);
                    } else {
                        info!("Config saved to {:?}", path);
                    }
                }
                Err(e) => {
                    error!("Failed to serialize config: {}", e);
                }
            }
        }
    }
}

/// Initialize logging (console plus a rolling file under the app
/// directory when available). Flattened auth errors are only visible
/// here, never in operation return values.
pub fn init_logging() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());

    let console_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_thread_ids(false);

    if let Some(log_dir) = log_dir() {
        let _ = std::fs::create_dir_all(&log_dir);
        let file_appender = tracing_appender::rolling::daily(&log_dir, "authkeep.log");
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        let file_layer = tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_target(true)
            .with_writer(non_blocking);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(console_layer)
            .with(file_layer)
            .init();

        Some(guard)
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(console_layer)
            .init();

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AuthConfig::default();
        assert_eq!(config.base_url, "https://api.authkeep.dev");
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_config_serializes_camel_case() {
        let json = serde_json::to_value(AuthConfig::default()).unwrap();
        assert!(json.get("baseUrl").is_some());
        assert!(json.get("timeoutSecs").is_some());
    }

    #[test]
    fn test_config_missing_timeout_uses_default() {
        let config: AuthConfig =
            serde_json::from_str(r#"{"baseUrl":"https://example.com"}"#).unwrap();
        assert_eq!(config.timeout_secs, 30);
    }
}
