//! Configuration section definitions.
//!
//! Each module corresponds to a section in `hostbridge.toml`:
//!
//! | Module     | TOML Section   | Purpose                               |
//! |------------|----------------|---------------------------------------|
//! | `app`      | `[app]`        | Application name, storage origin      |
//! | `compress` | `[compress]`   | gzip level                            |
//! | `ipc`      | `[ipc]`        | Request/response timeout              |
//! | `reload`   | `[reload]`     | Live-reload server address, debounce  |
//! | `storage`  | `[storage]`    | Local storage directory               |

mod app;
mod compress;
mod ipc;
mod reload;
mod storage;

pub use app::AppConfig;
pub use compress::CompressConfig;
pub use ipc::IpcConfig;
pub use reload::ReloadConfig;
pub use storage::StorageConfig;
