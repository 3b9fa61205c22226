//! `package.json` loading.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{HostError, HostResult};

/// Manifest file name, relative to the application root.
pub const MANIFEST_FILE: &str = "package.json";

/// Parsed manifest. Any JSON document is accepted; `name` and `version`
/// are read leniently on top of it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackageManifest(Value);

impl PackageManifest {
    /// `name` when it is a string.
    pub fn name(&self) -> Option<&str> {
        self.get("name").and_then(Value::as_str)
    }

    /// `version` when it is a string.
    pub fn version(&self) -> Option<&str> {
        self.get("version").and_then(Value::as_str)
    }

    /// Top-level key, when the document is an object.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.as_object()?.get(key)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}

/// Read `<root>/package.json` synchronously.
pub fn read_package(root: &Path) -> HostResult<PackageManifest> {
    let path = root.join(MANIFEST_FILE);
    let content = fs::read_to_string(&path).map_err(|e| HostError::io(&path, e))?;
    serde_json::from_str(&content).map_err(|e| HostError::Json(path, e))
}
