//! Host configuration management for `hostbridge.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── app        # [app]
//! │   ├── compress   # [compress]
//! │   ├── ipc        # [ipc]
//! │   ├── reload     # [reload]
//! │   └── storage    # [storage]
//! ├── types/         # ConfigError, ConfigDiagnostics, FieldPath
//! └── mod.rs         # HostConfig (this file)
//! ```
//!
//! The configuration is an explicit value: it is loaded once at startup and
//! handed to [`HostContext`](crate::host::HostContext), never stored globally.

pub mod section;
pub mod types;
mod util;

pub use section::{AppConfig, CompressConfig, IpcConfig, ReloadConfig, StorageConfig};
pub use types::{ConfigDiagnostic, ConfigDiagnostics, ConfigError, FieldPath};
pub use util::{expand_path, find_config_file};

use crate::log;
use crate::utils::path::normalize_path;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Default config file name.
pub const CONFIG_FILE: &str = "hostbridge.toml";

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing hostbridge.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HostConfig {
    /// Absolute path to the config file, if one was found (internal use only)
    #[serde(skip)]
    pub config_path: Option<PathBuf>,

    /// Directory the relative paths are resolved against (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    #[serde(default)]
    pub app: AppConfig,

    #[serde(default)]
    pub reload: ReloadConfig,

    #[serde(default)]
    pub ipc: IpcConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub compress: CompressConfig,
}

impl HostConfig {
    /// Load configuration by searching upward from cwd for `config_name`.
    ///
    /// A missing file is not an error: defaults are used and the root is cwd.
    pub fn load(config_name: &Path) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;

        let mut config = match find_config_file(config_name) {
            Some(path) => {
                let mut config = Self::from_path(&path)?;
                let root = path.parent().map(Path::to_path_buf).unwrap_or(cwd);
                config.config_path = Some(normalize_path(&path));
                config.root = root;
                config
            }
            None => {
                crate::debug!("config"; "{} not found, using defaults", config_name.display());
                Self {
                    root: cwd,
                    ..Self::default()
                }
            }
        };

        config.finalize();
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {} are ignored:", display_path);
        for field in fields {
            eprintln!("- {}", field);
        }
    }

    /// Resolve relative paths against the root.
    fn finalize(&mut self) {
        let root = normalize_path(&self.root);
        self.app.root = normalize_path(&expand_path(&self.app.root, &root));
        if let Some(dir) = self.storage.dir.take() {
            self.storage.dir = Some(expand_path(&dir, &root));
        }
        self.root = root;
    }

    /// Validate configuration, collecting all errors at once.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut diag = ConfigDiagnostics::new();

        self.app.validate(&mut diag);
        self.reload.validate(&mut diag);
        self.compress.validate(&mut diag);

        diag.into_result().map_err(ConfigError::Diagnostics)
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        &self.root
    }

    /// Set the root directory path
    pub fn set_root(&mut self, path: &Path) {
        self.root = path.to_path_buf();
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config, panicking on unknown fields to catch typos in tests.
#[cfg(test)]
pub fn test_parse_config(content: &str) -> HostConfig {
    let (parsed, ignored) = HostConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

/// Default config rooted at `root`, as used by host tests.
#[cfg(test)]
pub fn test_config_at(root: &Path) -> HostConfig {
    let mut config = HostConfig {
        root: root.to_path_buf(),
        ..HostConfig::default()
    };
    config.storage.dir = Some(root.join("storage"));
    config.finalize();
    config
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_invalid_toml() {
        let result = HostConfig::from_str("[reload\nport = 1");
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn test_default_config() {
        let config = HostConfig::default();
        assert!(config.config_path.is_none());
        assert_eq!(config.get_root(), Path::new(""));
        assert_eq!(config.reload.port, 9876);
        assert_eq!(config.compress.level, 6);
        assert!(config.storage.dir.is_none());
    }

    #[test]
    fn test_unknown_fields_detected() {
        let content = "[reload]\nport = 1234\n[unknown_section]\nfield = \"value\"";
        let (config, ignored) = HostConfig::parse_with_ignored(content).unwrap();

        assert_eq!(config.reload.port, 1234);
        assert!(ignored.iter().any(|f| f.contains("unknown_section")));
    }

    #[test]
    fn test_validation_collects_all_errors() {
        let mut config = test_parse_config("[reload]\nport = 0\n[compress]\nlevel = 12");
        config.app.name = String::new();

        let Err(ConfigError::Diagnostics(diag)) = config.validate() else {
            panic!("expected diagnostics");
        };
        assert_eq!(diag.len(), 3);
    }

    #[test]
    fn test_finalize_resolves_paths() {
        let temp = tempfile::TempDir::new().unwrap();
        let mut config = test_parse_config("[app]\nroot = \"ui\"\n[storage]\ndir = \"data\"");
        config.set_root(temp.path());
        config.finalize();

        assert!(config.app.root.ends_with("ui"));
        assert!(config.app.root.is_absolute());
        assert_eq!(config.storage.dir, Some(config.get_root().join("data")));
    }
}
