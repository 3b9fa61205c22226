//! `[storage]` section configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Local storage settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Storage directory. Defaults to `<userData>/Local Storage`.
    pub dir: Option<PathBuf>,
}
