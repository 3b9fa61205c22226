//! `[ipc]` section configuration.
//!
//! ```toml
//! [ipc]
//! timeout_ms = 10000          # 0 waits forever
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Inter-process messaging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IpcConfig {
    /// Reply timeout for request/response calls, in milliseconds.
    /// Dialog calls are exempt and always wait for the user.
    pub timeout_ms: u64,
}

impl Default for IpcConfig {
    fn default() -> Self {
        Self { timeout_ms: 10_000 }
    }
}

impl IpcConfig {
    /// Configured timeout, `None` when disabled.
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_ms > 0).then(|| Duration::from_millis(self.timeout_ms))
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::config::test_parse_config;

    #[test]
    fn test_ipc_timeout() {
        let config = test_parse_config("");
        assert_eq!(config.ipc.timeout(), Some(Duration::from_secs(10)));

        let config = test_parse_config("[ipc]\ntimeout_ms = 0");
        assert_eq!(config.ipc.timeout(), None);
    }
}
