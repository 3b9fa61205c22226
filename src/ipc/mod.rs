//! Inter-process messaging between the UI side and the privileged process.
//!
//! ```text
//! IpcRenderer --[MainMsg::Request]--> MainProcess --> CommandHandler
//!      ^                                   |
//!      +--------[IpcReply / IpcEvent]------+
//! ```
//!
//! # Module Structure
//!
//! - `messages` - Request, reply, fault and event types
//! - `handlers` - Single-slot listener table for events
//! - `renderer` - UI-side endpoint (sync, blocking and one-way sends)
//! - `main_process` - Privileged actor thread and the `CommandHandler` seam
//! - `commands` - Built-in privileged commands (dialogs, title, paths, shell)
//! - `dialogs` - Dialog providers used by the built-in commands

pub mod commands;
pub mod dialogs;
pub mod handlers;
pub mod main_process;
pub mod messages;
pub mod renderer;

pub use commands::{ShellCommands, WindowHandle};
pub use dialogs::{Dialogs, TerminalDialogs};
pub use handlers::{HandlerTable, Listener};
pub use main_process::{CommandHandler, EventEmitter, MainEndpoint, MainProcess};
pub use messages::{IpcEvent, IpcFault, IpcReply, IpcRequest, MainMsg};
pub use renderer::IpcRenderer;

use std::time::Duration;

use crossbeam::channel;

/// Create a connected renderer endpoint and privileged-side endpoint.
///
/// `timeout` bounds [`IpcRenderer::send_sync`]; `None` waits forever.
pub fn bridge(timeout: Option<Duration>) -> (IpcRenderer, MainEndpoint) {
    let (request_tx, request_rx) = channel::unbounded::<MainMsg>();
    let (event_tx, event_rx) = channel::unbounded::<IpcEvent>();

    let renderer = IpcRenderer::new(request_tx.clone(), event_rx, timeout);
    let endpoint = MainEndpoint::new(request_tx, request_rx, EventEmitter::new(event_tx));
    (renderer, endpoint)
}
