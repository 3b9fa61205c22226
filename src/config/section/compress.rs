//! `[compress]` section configuration.

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};

/// gzip settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CompressConfig {
    /// Compression level, 0 (store) to 9 (best).
    pub level: u32,
}

impl Default for CompressConfig {
    fn default() -> Self {
        Self { level: 6 }
    }
}

impl CompressConfig {
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.level > 9 {
            diag.error_with_hint(
                FieldPath::new("compress.level"),
                format!("level {} is out of range", self.level),
                "use a value between 0 and 9",
            );
        }
    }
}
