//! Live-reload WebSocket client.
//!
//! # Architecture
//!
//! ```text
//! socket thread --[ReloadMessage]--> dispatcher task --> Page
//!  (tungstenite)     (tokio mpsc)     (RestoreTimer)
//! ```
//!
//! One connection attempt, no reconnect. The handle moves
//! `Disconnected -> Connected -> Closed`, or straight to `Closed` when the
//! connection cannot be established.

use std::net::TcpStream;
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tungstenite::stream::MaybeTlsStream;
use tungstenite::{Message, WebSocket};
use url::Url;

use super::css::{epoch_ms, refresh_stylesheets};
use super::debounce::RestoreTimer;
use super::message::ReloadMessage;
use super::page::Page;
use crate::config::ReloadConfig;
use crate::error::{HostError, HostResult};
use crate::{debug, log};

/// Channel buffer size
const CHANNEL_BUFFER: usize = 32;

/// Called instead of a page reload when supplied.
pub type ReloadCallback = Box<dyn Fn() + Send + Sync>;

// =============================================================================
// Options and state
// =============================================================================

/// Where to connect and how long to keep the body hidden.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReloadOptions {
    pub host: String,
    pub port: u16,
    pub debounce: Duration,
}

impl Default for ReloadOptions {
    fn default() -> Self {
        Self::from_config(&ReloadConfig::default())
    }
}

impl ReloadOptions {
    pub fn from_config(config: &ReloadConfig) -> Self {
        Self {
            host: config.host.clone(),
            port: config.port,
            debounce: config.debounce(),
        }
    }

    /// `ws://host:port/ws`, or `wss://` for a secure page.
    pub fn address(&self, secure: bool) -> HostResult<Url> {
        let scheme = if secure { "wss" } else { "ws" };
        let raw = format!("{scheme}://{}:{}/ws", self.host, self.port);
        Url::parse(&raw).map_err(|e| HostError::Address(format!("{raw}: {e}")))
    }
}

/// Connection state of a live-reload client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ReloadState {
    Disconnected = 0,
    Connected = 1,
    Closed = 2,
}

impl ReloadState {
    fn from_u8(value: u8) -> Self {
        match value {
            0 => Self::Disconnected,
            1 => Self::Connected,
            _ => Self::Closed,
        }
    }
}

#[derive(Debug, Clone)]
struct SharedState(Arc<AtomicU8>);

impl SharedState {
    fn new() -> Self {
        Self(Arc::new(AtomicU8::new(ReloadState::Disconnected as u8)))
    }

    fn get(&self) -> ReloadState {
        ReloadState::from_u8(self.0.load(Ordering::SeqCst))
    }

    fn set(&self, state: ReloadState) {
        self.0.store(state as u8, Ordering::SeqCst);
    }
}

/// Handle to an installed client.
pub struct ReloadHandle {
    address: Url,
    state: SharedState,
    task: JoinHandle<()>,
}

impl ReloadHandle {
    pub fn state(&self) -> ReloadState {
        self.state.get()
    }

    pub fn address(&self) -> &Url {
        &self.address
    }

    /// Wait until the socket has ended and any pending restore has run.
    pub async fn join(self) -> HostResult<()> {
        self.task.await.map_err(|e| HostError::Task(e.to_string()))
    }

    /// Stop dispatching. The socket thread exits on its next frame.
    pub fn abort(&self) {
        self.task.abort();
    }
}

// =============================================================================
// Install
// =============================================================================

/// Connect to the live-reload server and act on its frames.
///
/// Must be called within a tokio runtime.
pub fn install_hmr(
    options: ReloadOptions,
    page: Arc<dyn Page>,
    on_reload: Option<ReloadCallback>,
) -> HostResult<ReloadHandle> {
    let runtime = Handle::try_current().map_err(|e| HostError::Task(e.to_string()))?;
    let address = options.address(page.is_secure())?;
    let state = SharedState::new();

    let (tx, rx) = mpsc::channel::<ReloadMessage>(CHANNEL_BUFFER);
    let dispatcher = ReloadDispatcher::new(page, on_reload, options.debounce);
    let task = runtime.spawn(dispatcher.run(rx));

    let thread_address = address.clone();
    let thread_state = state.clone();
    std::thread::Builder::new()
        .name("hostbridge-reload".into())
        .spawn(move || socket_loop(thread_address, thread_state, tx))
        .map_err(|e| HostError::Task(format!("failed to spawn reload thread: {e}")))?;

    log!("reload"; "live reload enabled");
    Ok(ReloadHandle {
        address,
        state,
        task,
    })
}

/// Connect, then forward recognized frames until the socket ends.
fn socket_loop(address: Url, state: SharedState, tx: mpsc::Sender<ReloadMessage>) {
    let mut socket = match tungstenite::connect(address.as_str()) {
        Ok((socket, _)) => socket,
        Err(e) => {
            log!("reload"; "cannot connect to {}: {}", address, e);
            state.set(ReloadState::Closed);
            return;
        }
    };

    state.set(ReloadState::Connected);
    debug!("reload"; "connected to {}", address);
    read_frames(&mut socket, &tx);

    state.set(ReloadState::Closed);
    debug!("reload"; "disconnected from {}", address);
}

fn read_frames(socket: &mut WebSocket<MaybeTlsStream<TcpStream>>, tx: &mpsc::Sender<ReloadMessage>) {
    loop {
        match socket.read() {
            Ok(Message::Text(text)) => {
                let Some(msg) = ReloadMessage::parse(text.as_str()) else {
                    debug!("reload"; "ignored frame {:?}", text.as_str());
                    continue;
                };
                if tx.blocking_send(msg).is_err() {
                    break; // Dispatcher gone
                }
            }
            Ok(Message::Close(_)) => break,
            Ok(_) => {}
            Err(e) => {
                debug!("reload"; "socket ended: {}", e);
                break;
            }
        }
    }
}

// =============================================================================
// Dispatcher
// =============================================================================

/// Applies server frames to the page. Owns the restore timer.
pub struct ReloadDispatcher {
    page: Arc<dyn Page>,
    on_reload: Option<ReloadCallback>,
    timer: RestoreTimer,
}

impl ReloadDispatcher {
    pub fn new(page: Arc<dyn Page>, on_reload: Option<ReloadCallback>, debounce: Duration) -> Self {
        Self {
            page,
            on_reload,
            timer: RestoreTimer::new(debounce),
        }
    }

    pub fn handle(&mut self, msg: ReloadMessage) {
        debug!("reload"; "<- {}", msg.as_str());
        match msg {
            ReloadMessage::Reload => match &self.on_reload {
                Some(callback) => callback(),
                None => self.page.reload(),
            },
            ReloadMessage::RefreshCss => {
                let count = refresh_stylesheets(self.page.as_ref(), epoch_ms());
                debug!("reload"; "refreshed {} stylesheets", count);
                self.timer.arm();
            }
        }
    }

    fn restore_if_due(&mut self) {
        if self.timer.take_if_due() {
            self.page.set_body_visible(true);
        }
    }

    /// Run until the sender side closes, then finish any pending restore.
    pub async fn run(mut self, mut rx: mpsc::Receiver<ReloadMessage>) {
        loop {
            tokio::select! {
                biased;
                msg = rx.recv() => match msg {
                    Some(msg) => self.handle(msg),
                    None => break,
                },
                _ = tokio::time::sleep_until(self.timer.wake_at()), if self.timer.is_armed() => {
                    self.restore_if_due();
                }
            }
        }

        if self.timer.is_armed() {
            tokio::time::sleep_until(self.timer.wake_at()).await;
            self.restore_if_due();
        }
    }
}
