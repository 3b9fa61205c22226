//! Native implementation of the host surface.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::Value;

use super::dialog::{self, FileFilters};
use super::manifest::{self, PackageManifest};
use super::{Host, HostContext, compress, fs};
use crate::error::{ErrorKind, HostError, HostResult};
use crate::ipc::IpcEvent;
use crate::ipc::commands::{GET_PATH, OPEN_EXTERNAL, SET_TITLE};
use crate::log;
use crate::utils::path::join_segments;

/// Host backed by the local OS and an in-process privileged actor.
///
/// Cheap to clone; clones share one [`HostContext`].
#[derive(Clone)]
pub struct NativeHost {
    ctx: Arc<HostContext>,
}

impl NativeHost {
    pub fn new(ctx: HostContext) -> Self {
        Self { ctx: Arc::new(ctx) }
    }

    pub fn context(&self) -> &HostContext {
        &self.ctx
    }

    // ------------------------------------------------------------------------
    // Dialogs
    // ------------------------------------------------------------------------

    /// Ask the user for one or more files. `on_select` only runs when the
    /// user picked something. Returns whether it ran.
    ///
    /// Blocks the calling thread until the user answers; do not call from a
    /// latency-sensitive context.
    pub fn open_file(
        &self,
        filters: &FileFilters,
        on_select: impl FnOnce(Vec<String>),
        multiple: bool,
    ) -> HostResult<bool> {
        dialog::open_file(self.ctx.ipc(), filters, multiple, on_select)
    }

    /// Ask the user for a save target. `on_select` only runs when the user
    /// chose one. Returns whether it ran.
    ///
    /// Blocks the calling thread until the user answers; do not call from a
    /// latency-sensitive context.
    pub fn save_file(
        &self,
        default_name: &str,
        filters: &FileFilters,
        on_select: impl FnOnce(String),
    ) -> HostResult<bool> {
        dialog::save_file(self.ctx.ipc(), default_name, filters, on_select)
    }

    // ------------------------------------------------------------------------
    // Window and shell
    // ------------------------------------------------------------------------

    pub fn set_window_title(&self, title: &str) {
        self.send_async_ipc(SET_TITLE, vec![Value::from(title)]);
    }

    pub fn open_external(&self, url: &str) {
        self.send_async_ipc(OPEN_EXTERNAL, vec![Value::from(url)]);
    }

    /// `get_path(kind)` joined with `parts`; absolute parts stay under it.
    pub fn get_global_path(&self, kind: &str, parts: &[&str]) -> HostResult<PathBuf> {
        let base = self.get_path(kind)?;
        Ok(join_segments(
            std::iter::once(base.as_path()).chain(parts.iter().map(Path::new)),
        ))
    }

    // ------------------------------------------------------------------------
    // IPC
    // ------------------------------------------------------------------------

    /// Request/response bounded by `[ipc] timeout_ms`.
    pub fn send_ipc(&self, command: &str, args: Vec<Value>) -> HostResult<Value> {
        self.ctx.ipc().send_sync(command, args)
    }

    /// Request/response without a timeout.
    pub fn send_ipc_blocking(&self, command: &str, args: Vec<Value>) -> HostResult<Value> {
        self.ctx.ipc().send_blocking(command, args)
    }

    /// One-way message; failures are logged.
    pub fn send_async_ipc(&self, command: &str, args: Vec<Value>) {
        self.ctx.ipc().send(command, args);
    }

    /// Install the listener for `channel`, replacing any previous one.
    pub fn define_handler(&self, channel: &str, listener: impl Fn(&IpcEvent) + Send + Sync + 'static) {
        self.ctx.ipc().define_handler(channel, listener);
    }

    /// Deliver queued events to their listeners.
    pub fn pump_events(&self) -> usize {
        self.ctx.ipc().pump_events()
    }

    // ------------------------------------------------------------------------
    // Application
    // ------------------------------------------------------------------------

    /// `package.json` under `[app] root`, read synchronously.
    pub fn get_package(&self) -> HostResult<PackageManifest> {
        manifest::read_package(&self.ctx.config().app.root)
    }

    pub fn get_cur_dir(&self) -> HostResult<PathBuf> {
        self.cwd()
    }
}

impl Host for NativeHost {
    async fn read_binary(&self, path: &Path) -> HostResult<Vec<u8>> {
        fs::read_binary(path).await
    }

    async fn write_binary(&self, path: &Path, data: &[u8]) -> HostResult<bool> {
        fs::write_binary(path, data).await
    }

    async fn read_utf8(&self, path: &Path) -> HostResult<String> {
        fs::read_utf8(path).await
    }

    async fn write_utf8(&self, path: &Path, text: &str) -> HostResult<bool> {
        fs::write_utf8(path, text).await
    }

    async fn compress(&self, data: Vec<u8>) -> HostResult<Vec<u8>> {
        compress::compress(data, self.ctx.config().compress.level).await
    }

    async fn decompress(&self, data: Vec<u8>) -> HostResult<Vec<u8>> {
        compress::decompress(data).await
    }

    async fn read_dir(&self, path: &Path) -> HostResult<Vec<String>> {
        fs::read_dir(path).await
    }

    async fn stat(&self, path: &Path) -> HostResult<Option<fs::FileStat>> {
        fs::stat(path).await
    }

    fn cwd(&self) -> HostResult<PathBuf> {
        std::env::current_dir().map_err(|e| HostError::io(".", e))
    }

    fn get_path(&self, kind: &str) -> HostResult<PathBuf> {
        request_path(self.ctx.ipc(), kind)
    }

    fn read_local_storage(&self, name: &str) -> Option<String> {
        match self.ctx.storage() {
            Ok(store) => store.get(name),
            Err(e) => {
                log!("storage"; "unavailable: {}", e);
                None
            }
        }
    }

    fn write_local_storage(&self, name: &str, value: &str) -> HostResult<()> {
        self.ctx.storage()?.set(name, value)
    }
}

/// Resolve a well-known directory through the privileged process.
pub(super) fn request_path(ipc: &crate::ipc::IpcRenderer, kind: &str) -> HostResult<PathBuf> {
    match ipc.send_sync(GET_PATH, vec![Value::from(kind)])? {
        Value::String(path) => Ok(PathBuf::from(path)),
        other => Err(HostError::Ipc {
            command: GET_PATH.to_string(),
            kind: ErrorKind::Malformed,
            message: format!("expected a path, got {other}"),
        }),
    }
}
