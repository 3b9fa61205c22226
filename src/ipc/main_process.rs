//! Privileged actor.
//!
//! A single thread owns the [`CommandHandler`] and serves requests strictly
//! in arrival order. The loop ends on [`MainMsg::Shutdown`] or when every
//! renderer endpoint has been dropped.

use std::thread::{self, JoinHandle};

use crossbeam::channel::{Receiver, Sender};
use serde_json::Value;

use super::messages::{IpcEvent, IpcReply, IpcRequest, MainMsg};
use crate::error::{HostError, HostResult};
use crate::{debug, log};

/// Executes privileged commands.
pub trait CommandHandler: Send + 'static {
    fn handle(&self, command: &str, args: &[Value]) -> IpcReply;
}

impl<F> CommandHandler for F
where
    F: Fn(&str, &[Value]) -> IpcReply + Send + 'static,
{
    fn handle(&self, command: &str, args: &[Value]) -> IpcReply {
        self(command, args)
    }
}

/// Pushes events to the renderer's listener table.
#[derive(Clone)]
pub struct EventEmitter {
    tx: Sender<IpcEvent>,
}

impl EventEmitter {
    pub(super) fn new(tx: Sender<IpcEvent>) -> Self {
        Self { tx }
    }

    /// Queue an event. Returns false once the renderer is gone.
    pub fn emit(&self, channel: &str, args: Vec<Value>) -> bool {
        self.tx.send(IpcEvent::new(channel, args)).is_ok()
    }
}

/// Privileged side of a bridge, consumed by [`MainProcess::spawn`].
pub struct MainEndpoint {
    tx: Sender<MainMsg>,
    rx: Receiver<MainMsg>,
    emitter: EventEmitter,
}

impl MainEndpoint {
    pub(super) fn new(tx: Sender<MainMsg>, rx: Receiver<MainMsg>, emitter: EventEmitter) -> Self {
        Self { tx, rx, emitter }
    }

    /// Emitter for handlers that push events to the renderer.
    pub fn emitter(&self) -> EventEmitter {
        self.emitter.clone()
    }
}

/// Running privileged actor. Dropping it stops the thread.
pub struct MainProcess {
    tx: Sender<MainMsg>,
    thread: Option<JoinHandle<()>>,
}

impl MainProcess {
    pub fn spawn(endpoint: MainEndpoint, handler: impl CommandHandler) -> HostResult<Self> {
        let MainEndpoint { tx, rx, .. } = endpoint;
        let thread = thread::Builder::new()
            .name("hostbridge-main".into())
            .spawn(move || Self::run(rx, handler))
            .map_err(|e| HostError::Task(format!("failed to spawn main process: {e}")))?;

        Ok(Self {
            tx,
            thread: Some(thread),
        })
    }

    fn run(rx: Receiver<MainMsg>, handler: impl CommandHandler) {
        // Drops out when every sender is gone, too
        while let Ok(msg) = rx.recv() {
            match msg {
                MainMsg::Request(request) => Self::serve(&handler, request),
                MainMsg::Shutdown => break,
            }
        }
        debug!("main"; "stopped");
    }

    fn serve(handler: &impl CommandHandler, request: IpcRequest) {
        let IpcRequest { command, args, reply } = request;
        let result = handler.handle(&command, &args);

        match reply {
            // Receiver may have timed out already
            Some(reply) => {
                if reply.send(result).is_err() {
                    debug!("main"; "reply to `{}` dropped", command);
                }
            }
            None => {
                if let Err(fault) = result {
                    log!("main"; "`{}` failed: {}", command, fault);
                }
            }
        }
    }

    /// Stop the actor and wait for the thread to finish.
    pub fn shutdown(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        let Some(thread) = self.thread.take() else {
            return;
        };
        let _ = self.tx.send(MainMsg::Shutdown);
        if thread.join().is_err() {
            log!("error"; "main process panicked");
        }
    }
}

impl Drop for MainProcess {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ipc::bridge;
    use crate::ipc::messages::IpcFault;
    use crate::ipc::testing::reply_with;
    use std::sync::{Arc, Mutex};

    struct Recorder(Arc<Mutex<Vec<String>>>);

    impl CommandHandler for Recorder {
        fn handle(&self, command: &str, _args: &[Value]) -> IpcReply {
            self.0.lock().unwrap().push(command.to_string());
            Ok(Value::Null)
        }
    }

    #[test]
    fn test_commands_served_in_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let (ipc, endpoint) = bridge(None);
        let main = MainProcess::spawn(endpoint, Recorder(Arc::clone(&log))).unwrap();

        ipc.send("a", vec![]);
        ipc.send("b", vec![]);
        ipc.send_sync("c", vec![]).unwrap();
        main.shutdown();

        assert_eq!(*log.lock().unwrap(), ["a", "b", "c"]);
    }

    #[test]
    fn test_failed_one_way_message_keeps_actor_alive() {
        let (ipc, endpoint) = bridge(None);
        let _main = MainProcess::spawn(
            endpoint,
            reply_with(|command, _| match command {
                "fail" => Err(IpcFault::other("boom")),
                _ => Ok(Value::Bool(true)),
            }),
        )
        .unwrap();

        ipc.send("fail", vec![]);
        assert_eq!(ipc.send_sync("ok", vec![]).unwrap(), Value::Bool(true));
    }

    #[test]
    fn test_handler_panic_disconnects() {
        let (ipc, endpoint) = bridge(None);
        let _main = MainProcess::spawn(endpoint, reply_with(|_, _| panic!("handler crashed"))).unwrap();

        assert!(matches!(ipc.send_blocking("x", vec![]), Err(HostError::Disconnected)));
    }
}
