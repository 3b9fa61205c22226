//! `[reload]` section configuration.
//!
//! Contains live-reload client settings.
//!
//! # Example
//!
//! ```toml
//! [reload]
//! host = "127.0.0.1"          # Live-reload server host
//! port = 9876                 # Live-reload server port
//! debounce_ms = 50            # Delay before the page is shown again after a css swap
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};

/// Live-reload client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReloadConfig {
    /// Server host name or address.
    pub host: String,

    /// Server port number.
    pub port: u16,

    /// Visibility restore delay after the last stylesheet swap.
    pub debounce_ms: u64,
}

impl Default for ReloadConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 9876,
            debounce_ms: 50,
        }
    }
}

impl ReloadConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.host.trim().is_empty() {
            diag.error(FieldPath::new("reload.host"), "must not be empty");
        }
        if self.port == 0 {
            diag.error_with_hint(
                FieldPath::new("reload.port"),
                "port 0 cannot be connected to",
                "use the port your live-reload server listens on",
            );
        }
    }
}
