//! IPC Message Definitions
//!
//! ```text
//! IpcRenderer --Request--> MainProcess --IpcReply--> IpcRenderer
//! MainProcess --IpcEvent--> IpcRenderer (listener table)
//! ```

use crossbeam::channel::Sender;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::error::{ErrorKind, HostError};

/// Reply of a privileged command.
pub type IpcReply = Result<Value, IpcFault>;

// =============================================================================
// MainProcess Messages
// =============================================================================

/// Messages to the privileged actor
#[derive(Debug)]
pub enum MainMsg {
    /// Run a command
    Request(IpcRequest),
    /// Stop the actor loop
    Shutdown,
}

/// A command invocation.
#[derive(Debug)]
pub struct IpcRequest {
    pub command: String,
    pub args: Vec<Value>,
    /// - Some: request/response, the reply is sent back here
    /// - None: one-way message
    pub reply: Option<Sender<IpcReply>>,
}

/// Failure reported by a privileged command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{message}")]
pub struct IpcFault {
    pub kind: ErrorKind,
    pub message: String,
}

impl IpcFault {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Malformed, message)
    }

    pub fn other(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Other, message)
    }

    /// Attach the command name, producing the caller-facing error.
    pub fn into_host_error(self, command: &str) -> HostError {
        HostError::Ipc {
            command: command.to_string(),
            kind: self.kind,
            message: self.message,
        }
    }
}

// =============================================================================
// Renderer Events
// =============================================================================

/// Event pushed from the privileged process to a renderer channel.
#[derive(Debug, Clone, PartialEq)]
pub struct IpcEvent {
    pub channel: String,
    pub args: Vec<Value>,
}

impl IpcEvent {
    pub fn new(channel: impl Into<String>, args: Vec<Value>) -> Self {
        Self {
            channel: channel.into(),
            args,
        }
    }
}
