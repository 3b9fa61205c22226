//! Body visibility restore timer.
//!
//! Pure timing: arming again pushes the deadline out, so only the last
//! stylesheet swap of a burst leads to a restore.

use std::time::Duration;

use tokio::time::Instant;

/// Idle sleep when nothing is armed.
const IDLE: Duration = Duration::from_secs(3600);

#[derive(Debug)]
pub struct RestoreTimer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl RestoreTimer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    /// Start or restart the countdown from now.
    pub fn arm(&mut self) {
        self.deadline = Some(Instant::now() + self.delay);
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// When the select loop should wake up next.
    pub fn wake_at(&self) -> Instant {
        self.deadline.unwrap_or_else(|| Instant::now() + IDLE)
    }

    /// Disarm and return true once the deadline has passed.
    pub fn take_if_due(&mut self) -> bool {
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_rearm_pushes_deadline() {
        let mut timer = RestoreTimer::new(Duration::from_millis(50));
        assert!(!timer.is_armed());
        assert!(!timer.take_if_due());

        timer.arm();
        tokio::time::sleep(Duration::from_millis(30)).await;
        timer.arm();
        tokio::time::sleep(Duration::from_millis(30)).await;
        assert!(!timer.take_if_due());

        tokio::time::sleep_until(timer.wake_at()).await;
        assert!(timer.take_if_due());
        assert!(!timer.is_armed());
        assert!(!timer.take_if_due());
    }
}
