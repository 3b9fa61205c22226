//! `[app]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [app]
//! name = "notes"              # Used for the `userData` directory
//! origin = "app://notes"      # Scope of the local key-value store
//! root = "."                  # Directory holding package.json
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};

/// Application identity settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Application name, appended to `appData` to form `userData`.
    pub name: String,

    /// Storage origin. Local storage files are scoped by this value.
    pub origin: String,

    /// Application root (relative to the config file).
    pub root: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME").to_string(),
            origin: "app://local".to_string(),
            root: PathBuf::from("."),
        }
    }
}

impl AppConfig {
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.name.trim().is_empty() {
            diag.error(FieldPath::new("app.name"), "must not be empty");
        }
        if self.name.contains(['/', '\\']) {
            diag.error_with_hint(
                FieldPath::new("app.name"),
                "must not contain path separators",
                "the name becomes a directory under appData",
            );
        }
        if self.origin.trim().is_empty() {
            diag.error(FieldPath::new("app.origin"), "must not be empty");
        }
    }
}
