use serde::Deserialize;

/// Main configuration structure for steermock
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Relay listener and backend configuration
    #[serde(default)]
    pub relay: RelayConfig,
}

/// Relay server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RelayConfig {
    /// Address to listen on (e.g., "127.0.0.1:22222")
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
    /// Base URL of the contract-mock backend
    #[serde(default = "default_backend_url")]
    pub backend_url: String,
    /// Request timeout in seconds (absent = no client timeout; callers
    /// are expected to impose their own)
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            backend_url: default_backend_url(),
            timeout_secs: None,
        }
    }
}

fn default_listen_addr() -> String {
    "127.0.0.1:22222".to_string()
}

fn default_backend_url() -> String {
    "http://127.0.0.1:22221".to_string()
}
