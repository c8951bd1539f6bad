//! Listener settings.

use derive_getters::Getters;
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Where and how the HTTP server listens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, Setters)]
#[serde(default, deny_unknown_fields)]
#[setters(prefix = "with_")]
pub struct ServerConfig {
    /// Interface to bind
    #[setters(into)]
    host: String,
    /// Port to bind
    port: u16,
    /// Longest accepted story topic, in characters
    max_topic_chars: usize,
    /// How often idle sessions are swept
    sweep_interval_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            max_topic_chars: 200,
            sweep_interval_secs: 300,
        }
    }
}

impl ServerConfig {
    /// Socket address to bind, as `host:port`.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Interval between idle-session sweeps.
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs.max(1))
    }
}
