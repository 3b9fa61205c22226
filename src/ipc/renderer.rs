//! UI-side IPC endpoint.
//!
//! Three ways to talk to the privileged process:
//!
//! - [`IpcRenderer::send_sync`]: request/response bounded by the configured timeout
//! - [`IpcRenderer::send_blocking`]: request/response with no timeout (dialogs)
//! - [`IpcRenderer::send`]: one-way, failures are logged and dropped
//!
//! Events pushed back by the privileged process queue up until
//! [`IpcRenderer::pump_events`] hands them to the [`HandlerTable`].

use std::time::Duration;

use crossbeam::channel::{self, Receiver, RecvTimeoutError, Sender};
use serde_json::Value;

use super::handlers::HandlerTable;
use super::messages::{IpcEvent, IpcReply, IpcRequest, MainMsg};
use crate::debug;
use crate::error::{HostError, HostResult};
use crate::log;

/// Renderer endpoint of the IPC bridge.
pub struct IpcRenderer {
    tx: Sender<MainMsg>,
    events: Receiver<IpcEvent>,
    handlers: HandlerTable,
    timeout: Option<Duration>,
}

impl IpcRenderer {
    pub(super) fn new(tx: Sender<MainMsg>, events: Receiver<IpcEvent>, timeout: Option<Duration>) -> Self {
        Self {
            tx,
            events,
            handlers: HandlerTable::new(),
            timeout,
        }
    }

    /// Timeout applied by [`send_sync`](Self::send_sync).
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Request/response, failing with [`HostError::Timeout`] when no reply
    /// arrives within the configured timeout.
    pub fn send_sync(&self, command: &str, args: Vec<Value>) -> HostResult<Value> {
        self.request(command, args, self.timeout)
    }

    /// Request/response that waits for as long as the privileged side takes.
    pub fn send_blocking(&self, command: &str, args: Vec<Value>) -> HostResult<Value> {
        self.request(command, args, None)
    }

    fn request(&self, command: &str, args: Vec<Value>, timeout: Option<Duration>) -> HostResult<Value> {
        let (reply_tx, reply_rx) = channel::bounded::<IpcReply>(1);
        debug!("ipc"; "-> {} ({} args)", command, args.len());

        self.post(IpcRequest {
            command: command.to_string(),
            args,
            reply: Some(reply_tx),
        })?;

        let reply = match timeout {
            Some(limit) => reply_rx.recv_timeout(limit).map_err(|err| match err {
                RecvTimeoutError::Timeout => HostError::Timeout(command.to_string(), limit),
                RecvTimeoutError::Disconnected => HostError::Disconnected,
            })?,
            None => reply_rx.recv().map_err(|_| HostError::Disconnected)?,
        };

        reply.map_err(|fault| fault.into_host_error(command))
    }

    /// One-way message. Delivery failures are logged, never returned.
    pub fn send(&self, command: &str, args: Vec<Value>) {
        debug!("ipc"; "=> {} ({} args)", command, args.len());
        let request = IpcRequest {
            command: command.to_string(),
            args,
            reply: None,
        };
        if let Err(e) = self.post(request) {
            log!("ipc"; "`{}` not delivered: {}", command, e);
        }
    }

    fn post(&self, request: IpcRequest) -> HostResult<()> {
        self.tx
            .send(MainMsg::Request(request))
            .map_err(|_| HostError::Disconnected)
    }

    /// Install the single listener for `channel`, replacing any previous one.
    pub fn define_handler(&self, channel: &str, listener: impl Fn(&IpcEvent) + Send + Sync + 'static) {
        self.handlers.define(channel, listener);
    }

    /// Remove the listener for `channel`.
    pub fn remove_handler(&self, channel: &str) -> bool {
        self.handlers.remove(channel)
    }

    pub fn handlers(&self) -> &HandlerTable {
        &self.handlers
    }

    /// Dispatch every queued event. Returns how many were taken off the queue.
    pub fn pump_events(&self) -> usize {
        let mut count = 0;
        while let Ok(event) = self.events.try_recv() {
            self.handlers.dispatch(&event);
            count += 1;
        }
        count
    }

    /// Wait up to `timeout` for one event, then dispatch it and anything
    /// queued behind it.
    pub fn wait_events(&self, timeout: Duration) -> usize {
        match self.events.recv_timeout(timeout) {
            Ok(event) => {
                self.handlers.dispatch(&event);
                1 + self.pump_events()
            }
            Err(_) => 0,
        }
    }
}
