//! Open/save dialog requests.
//!
//! The dialog itself lives in the privileged process; this side builds the
//! filter list, performs a blocking request and runs the caller's callback
//! unless the user cancelled.
//!
//! Dialog requests wait for the user without a timeout and must not be
//! issued from a latency-sensitive context.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ErrorKind, HostError, HostResult};
use crate::ipc::IpcRenderer;

pub const OPEN_DIALOG: &str = "showOpenDialog";
pub const SAVE_DIALOG: &str = "showSaveDialog";

/// One or more extension patterns for a filter label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Extensions {
    One(String),
    Many(Vec<String>),
}

impl Extensions {
    pub fn into_vec(self) -> Vec<String> {
        match self {
            Self::One(ext) => vec![ext],
            Self::Many(exts) => exts,
        }
    }
}

impl From<&str> for Extensions {
    fn from(ext: &str) -> Self {
        Self::One(ext.to_string())
    }
}

impl From<String> for Extensions {
    fn from(ext: String) -> Self {
        Self::One(ext)
    }
}

impl From<Vec<String>> for Extensions {
    fn from(exts: Vec<String>) -> Self {
        Self::Many(exts)
    }
}

impl<const N: usize> From<[&str; N]> for Extensions {
    fn from(exts: [&str; N]) -> Self {
        Self::Many(exts.iter().map(|e| e.to_string()).collect())
    }
}

/// A labelled filter as the dialog expects it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogFilter {
    pub name: String,
    pub extensions: Vec<String>,
}

/// Ordered label → extensions mapping.
///
/// ```ignore
/// let filters = FileFilters::new()
///     .add("packed file", "report")
///     .add("json file", ["report.json", "json"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileFilters(Vec<DialogFilter>);

impl FileFilters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(mut self, name: impl Into<String>, extensions: impl Into<Extensions>) -> Self {
        self.0.push(DialogFilter {
            name: name.into(),
            extensions: extensions.into().into_vec(),
        });
        self
    }

    /// Build from a JSON object such as `{"images": ["png", "jpg"], "text": "txt"}`.
    pub fn from_json(value: Value) -> Result<Self, serde_json::Error> {
        let map: serde_json::Map<String, Value> = serde_json::from_value(value)?;
        map.into_iter()
            .map(|(name, ext)| Ok((name, serde_json::from_value::<Extensions>(ext)?)))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DialogFilter> {
        self.0.iter()
    }
}

impl<K: Into<String>, E: Into<Extensions>> FromIterator<(K, E)> for FileFilters {
    fn from_iter<I: IntoIterator<Item = (K, E)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::new(), |filters, (name, ext)| filters.add(name, ext))
    }
}

/// Payload of `showOpenDialog`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenDialogOptions {
    pub filters: FileFilters,
    #[serde(default)]
    pub multiple: bool,
}

/// Payload of `showSaveDialog`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveDialogOptions {
    #[serde(default)]
    pub default_path: String,
    pub filters: FileFilters,
}

/// Show the open dialog; `on_select` runs only when the user picked something.
///
/// Returns whether the callback ran.
pub fn open_file(
    ipc: &IpcRenderer,
    filters: &FileFilters,
    multiple: bool,
    on_select: impl FnOnce(Vec<String>),
) -> HostResult<bool> {
    let options = OpenDialogOptions {
        filters: filters.clone(),
        multiple,
    };
    let reply = ipc.send_blocking(OPEN_DIALOG, vec![to_arg(OPEN_DIALOG, &options)?])?;
    crate::debug!("dialog"; "open -> {}", reply);

    match selected_paths(OPEN_DIALOG, reply)? {
        Some(paths) => {
            on_select(paths);
            Ok(true)
        }
        None => Ok(false),
    }
}

/// Show the save dialog; `on_select` runs only when the user chose a target.
///
/// Returns whether the callback ran.
pub fn save_file(
    ipc: &IpcRenderer,
    default_name: &str,
    filters: &FileFilters,
    on_select: impl FnOnce(String),
) -> HostResult<bool> {
    let options = SaveDialogOptions {
        default_path: default_name.to_string(),
        filters: filters.clone(),
    };
    let reply = ipc.send_blocking(SAVE_DIALOG, vec![to_arg(SAVE_DIALOG, &options)?])?;
    crate::debug!("dialog"; "save -> {}", reply);

    match reply {
        Value::String(path) if !path.is_empty() => {
            on_select(path);
            Ok(true)
        }
        Value::Null | Value::Bool(false) | Value::String(_) => Ok(false),
        other => Err(unexpected_reply(SAVE_DIALOG, &other)),
    }
}

fn to_arg(command: &str, options: &impl Serialize) -> HostResult<Value> {
    serde_json::to_value(options).map_err(|err| HostError::Ipc {
        command: command.to_string(),
        kind: ErrorKind::Malformed,
        message: err.to_string(),
    })
}

/// Interpret an open-dialog reply. `None` means cancelled.
fn selected_paths(command: &str, reply: Value) -> HostResult<Option<Vec<String>>> {
    match reply {
        Value::Null | Value::Bool(false) => Ok(None),
        Value::String(path) if path.is_empty() => Ok(None),
        Value::String(path) => Ok(Some(vec![path])),
        Value::Array(items) => {
            let paths = items
                .into_iter()
                .map(|item| match item {
                    Value::String(path) => Ok(path),
                    other => Err(unexpected_reply(command, &other)),
                })
                .collect::<HostResult<Vec<_>>>()?;
            Ok((!paths.is_empty()).then_some(paths))
        }
        other => Err(unexpected_reply(command, &other)),
    }
}

fn unexpected_reply(command: &str, reply: &Value) -> HostError {
    HostError::Ipc {
        command: command.to_string(),
        kind: ErrorKind::Malformed,
        message: format!("unexpected reply {reply}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ipc::testing::{reply_with, spawn_renderer};
    use serde_json::json;
    use std::cell::Cell;

    #[test]
    fn test_filters_keep_order_and_shape() {
        let filters = FileFilters::new()
            .add("packed file", "report")
            .add("json file", ["report.json", "json"]);

        let value = serde_json::to_value(&filters).unwrap();
        assert_eq!(
            value,
            json!([
                {"name": "packed file", "extensions": ["report"]},
                {"name": "json file", "extensions": ["report.json", "json"]},
            ])
        );
    }

    #[test]
    fn test_filters_from_json_object() {
        let filters = FileFilters::from_json(json!({"text": "txt", "images": ["png", "jpg"]})).unwrap();
        let names: Vec<_> = filters.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["text", "images"]);
        assert_eq!(filters.iter().nth(1).unwrap().extensions, ["png", "jpg"]);

        assert!(FileFilters::from_json(json!({"bad": 3})).is_err());
        assert!(FileFilters::from_json(json!({})).unwrap().is_empty());
    }

    #[test]
    fn test_save_options_wire_format() {
        let options = SaveDialogOptions {
            default_path: "report.json".into(),
            filters: FileFilters::new().add("json", "json"),
        };
        let value = serde_json::to_value(options).unwrap();
        assert_eq!(value["defaultPath"], "report.json");
        assert_eq!(value["filters"][0]["extensions"], json!(["json"]));
    }

    #[test]
    fn test_open_cancelled_skips_callback() {
        let (ipc, _main) = spawn_renderer(reply_with(|_, _| Ok(Value::Null)));
        let called = Cell::new(false);

        let ran = open_file(&ipc, &FileFilters::new(), false, |_| called.set(true)).unwrap();
        assert!(!ran);
        assert!(!called.get());
    }

    #[test]
    fn test_open_selected_runs_callback_once() {
        let (ipc, _main) = spawn_renderer(reply_with(|command, args| {
            assert_eq!(command, OPEN_DIALOG);
            assert_eq!(args[0]["multiple"], true);
            Ok(json!(["/tmp/a.txt", "/tmp/b.txt"]))
        }));
        let calls = Cell::new(0);
        let mut selected = Vec::new();

        open_file(&ipc, &FileFilters::new().add("text", "txt"), true, |paths| {
            calls.set(calls.get() + 1);
            selected = paths;
        })
        .unwrap();

        assert_eq!(calls.get(), 1);
        assert_eq!(selected, ["/tmp/a.txt", "/tmp/b.txt"]);
    }

    #[test]
    fn test_save_cancelled_and_selected() {
        let (ipc, _main) = spawn_renderer(reply_with(|_, args| {
            if args[0]["defaultPath"] == "cancel.txt" {
                Ok(Value::Null)
            } else {
                Ok(json!("/home/u/out.txt"))
            }
        }));

        let called = Cell::new(false);
        assert!(!save_file(&ipc, "cancel.txt", &FileFilters::new(), |_| called.set(true)).unwrap());
        assert!(!called.get());

        let mut target = String::new();
        assert!(save_file(&ipc, "out.txt", &FileFilters::new(), |path| target = path).unwrap());
        assert_eq!(target, "/home/u/out.txt");
    }

    #[test]
    fn test_unexpected_reply_is_malformed() {
        let (ipc, _main) = spawn_renderer(reply_with(|_, _| Ok(json!(42))));
        let err = open_file(&ipc, &FileFilters::new(), false, |_| {}).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Malformed);
    }
}
