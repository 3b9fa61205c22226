//! Host capability surface.
//!
//! # Module Structure
//!
//! ```text
//! host/
//! ├── path.rs      # Path string decomposition
//! ├── fs.rs        # File and directory access
//! ├── compress.rs  # gzip codec
//! ├── dialog.rs    # Open/save dialog requests
//! ├── canvas.rs    # Drawable surface
//! ├── manifest.rs  # package.json
//! ├── native.rs    # NativeHost, the Host implementation
//! └── mod.rs       # Host trait and HostContext (this file)
//! ```
//!
//! Everything a host operation needs is reachable from one explicit
//! [`HostContext`]: configuration, the IPC endpoint and the local store.

pub mod canvas;
pub mod compress;
pub mod dialog;
pub mod fs;
pub mod manifest;
pub mod native;
pub mod path;

pub use canvas::Canvas;
pub use dialog::{DialogFilter, FileFilters};
pub use fs::FileStat;
pub use manifest::PackageManifest;
pub use native::NativeHost;
pub use path::{PathPart, PathParts};

use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use crate::config::HostConfig;
use crate::error::HostResult;
use crate::ipc::{self, CommandHandler, Dialogs, IpcRenderer, MainProcess, ShellCommands, WindowHandle};
use crate::storage::LocalStorage;
use crate::utils::path::join_segments;

/// Directory under `userData` holding the local stores.
pub const LOCAL_STORAGE_DIR: &str = "Local Storage";

// ============================================================================
// Host trait
// ============================================================================

/// Capabilities the UI side may use.
pub trait Host {
    /// Join path segments. Absolute segments after the first are appended,
    /// and `.`/`..` are resolved.
    fn make_path(&self, parts: &[&str]) -> PathBuf {
        join_segments(parts)
    }

    fn read_binary(&self, path: &Path) -> impl Future<Output = HostResult<Vec<u8>>> + Send;

    /// Always resolves to `true` on success.
    fn write_binary(&self, path: &Path, data: &[u8]) -> impl Future<Output = HostResult<bool>> + Send;

    /// Fails with `Malformed` on invalid UTF-8.
    fn read_utf8(&self, path: &Path) -> impl Future<Output = HostResult<String>> + Send;

    /// Always resolves to `true` on success.
    fn write_utf8(&self, path: &Path, text: &str) -> impl Future<Output = HostResult<bool>> + Send;

    fn compress(&self, data: Vec<u8>) -> impl Future<Output = HostResult<Vec<u8>>> + Send;

    /// Fails with `Malformed` on empty or non-gzip input.
    fn decompress(&self, data: Vec<u8>) -> impl Future<Output = HostResult<Vec<u8>>> + Send;

    /// Entry names, sorted.
    fn read_dir(&self, path: &Path) -> impl Future<Output = HostResult<Vec<String>>> + Send;

    /// `None` when nothing exists at `path`.
    fn stat(&self, path: &Path) -> impl Future<Output = HostResult<Option<FileStat>>> + Send;

    /// `kind` is one of `dirname`, `basename`, `filename`, `extname`;
    /// anything else yields an empty string.
    fn get_path_part(&self, path: &str, kind: &str) -> String {
        path::get_path_part(path, kind)
    }

    fn cwd(&self) -> HostResult<PathBuf>;

    /// Well-known directory such as `home`, `temp` or `userData`.
    fn get_path(&self, kind: &str) -> HostResult<PathBuf>;

    fn read_local_storage(&self, name: &str) -> Option<String>;

    fn write_local_storage(&self, name: &str, value: &str) -> HostResult<()>;

    fn create_canvas(&self) -> Canvas {
        Canvas::default()
    }
}

// ============================================================================
// HostContext
// ============================================================================

/// Shared state behind a [`NativeHost`].
///
/// Owns the privileged actor when one was started here; dropping the context
/// stops it.
pub struct HostContext {
    config: Arc<HostConfig>,
    ipc: IpcRenderer,
    storage: OnceLock<Arc<LocalStorage>>,
    window: Option<WindowHandle>,
    main: Option<MainProcess>,
}

impl HostContext {
    /// Start the privileged actor with the built-in command set.
    pub fn start(config: HostConfig, dialogs: impl Dialogs) -> HostResult<Self> {
        let shell = ShellCommands::new(&config.app.name, dialogs);
        let window = shell.window();
        let mut ctx = Self::with_handler(config, shell)?;
        ctx.window = Some(window);
        Ok(ctx)
    }

    /// Start the privileged actor with a custom command handler.
    pub fn with_handler(config: HostConfig, handler: impl CommandHandler) -> HostResult<Self> {
        let (renderer, endpoint) = ipc::bridge(config.ipc.timeout());
        let main = MainProcess::spawn(endpoint, handler)?;
        Ok(Self::with_renderer(config, renderer, Some(main)))
    }

    /// Wrap an existing renderer endpoint. `main` is kept alive with the context.
    pub fn with_renderer(config: HostConfig, ipc: IpcRenderer, main: Option<MainProcess>) -> Self {
        Self {
            config: Arc::new(config),
            ipc,
            storage: OnceLock::new(),
            window: None,
            main,
        }
    }

    pub fn config(&self) -> &HostConfig {
        &self.config
    }

    pub fn ipc(&self) -> &IpcRenderer {
        &self.ipc
    }

    /// Title last set through `setTitle`, when the built-in commands run here.
    pub fn window_title(&self) -> Option<String> {
        self.window.as_ref().and_then(WindowHandle::title)
    }

    /// Whether this context owns a privileged actor.
    pub fn owns_main_process(&self) -> bool {
        self.main.is_some()
    }

    /// The local store for the configured origin, opened on first use.
    ///
    /// Contexts configured with the same origin and directory share one store.
    pub fn storage(&self) -> HostResult<&LocalStorage> {
        if let Some(store) = self.storage.get() {
            return Ok(store.as_ref());
        }
        let dir = self.storage_dir()?;
        let store = LocalStorage::open(&dir, &self.config.app.origin)?;
        Ok(self.storage.get_or_init(|| store).as_ref())
    }

    /// `[storage] dir`, or `<userData>/Local Storage`.
    pub fn storage_dir(&self) -> HostResult<PathBuf> {
        match &self.config.storage.dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(native::request_path(&self.ipc, "userData")?.join(LOCAL_STORAGE_DIR)),
        }
    }
}
