//! hostbridge - host capabilities for desktop UI shells.
//!
//! A sandboxed UI side reaches files, gzip, dialogs, window control, local
//! storage and a privileged process through [`Host`] and [`NativeHost`]. A
//! live-reload client ([`reload::install_hmr`]) refreshes the page during
//! development.

pub mod logger;

pub mod config;
pub mod error;
pub mod host;
pub mod ipc;
pub mod reload;
pub mod storage;
pub mod utils;

pub use error::{ErrorKind, HostError, HostResult};
pub use host::{Host, HostContext, NativeHost};
