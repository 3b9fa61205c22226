//! Shutdown state.
//!
//! - `SHUTDOWN`: Has shutdown been requested? (Ctrl+C received)
//! - `LISTENING`: Is a long-running command waiting for the signal?

use std::sync::atomic::{AtomicBool, Ordering};

use hostbridge::log;
use tokio::sync::Notify;

/// Shutdown has been requested (Ctrl+C received)
static SHUTDOWN: AtomicBool = AtomicBool::new(false);

/// A command is waiting in `shutdown_signal()`
static LISTENING: AtomicBool = AtomicBool::new(false);

static SHUTDOWN_NOTIFY: Notify = Notify::const_new();

/// Setup the global Ctrl+C handler. Call once at program start
///
/// - Nobody listening: exit immediately, there is nothing to wind down
/// - Otherwise: set the flag and wake the listener
pub fn setup_shutdown_handler() -> anyhow::Result<()> {
    ctrlc::set_handler(|| {
        SHUTDOWN.store(true, Ordering::SeqCst);

        if LISTENING.load(Ordering::SeqCst) {
            log!("main"; "shutting down...");
            // Stores a permit if the listener is not polling yet
            SHUTDOWN_NOTIFY.notify_one();
        } else {
            std::process::exit(130);
        }
    })
    .map_err(|e| anyhow::anyhow!("failed to set Ctrl+C handler: {}", e))
}

/// Resolve once Ctrl+C has been pressed.
pub async fn shutdown_signal() {
    LISTENING.store(true, Ordering::SeqCst);
    if is_shutdown() {
        return;
    }
    SHUTDOWN_NOTIFY.notified().await;
}

/// Check if shutdown has been requested
pub fn is_shutdown() -> bool {
    SHUTDOWN.load(Ordering::Relaxed)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_signal_resolves_after_notify() {
        let waiter = tokio::spawn(shutdown_signal());
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(LISTENING.load(Ordering::SeqCst));

        SHUTDOWN.store(true, Ordering::SeqCst);
        SHUTDOWN_NOTIFY.notify_one();
        tokio::time::timeout(Duration::from_secs(1), waiter).await.unwrap().unwrap();
        assert!(is_shutdown());
    }
}
