//! Polling cadence.
//!
//! The core holds no timers. The platform driver sleeps and feeds
//! [`Tick`]s into the daemon loop; the scheduler only defines the two
//! intervals and their relationship.

use std::time::Duration;

/// How often to poll, update, and prune windows.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// A timer event delivered into the daemon loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Refresh the window registry.
    Poll,
    /// Re-arm the transform rate limiter.
    Cooldown,
}

/// The two periodic intervals driving the core.
///
/// The cooldown interval is fixed at double the polling interval so
/// at least one registry refresh runs between two permitted transform
/// operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scheduler {
    poll: Duration,
}

impl Scheduler {
    pub fn new(poll: Duration) -> Self {
        let poll = if poll.is_zero() {
            DEFAULT_POLL_INTERVAL
        } else {
            poll
        };
        Self { poll }
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll
    }

    pub fn cooldown_interval(&self) -> Duration {
        self.poll * 2
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new(DEFAULT_POLL_INTERVAL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cooldown_is_double_the_poll_interval() {
        // Arrange
        let scheduler = Scheduler::new(Duration::from_millis(250));

        // Assert
        assert_eq!(scheduler.poll_interval(), Duration::from_millis(250));
        assert_eq!(scheduler.cooldown_interval(), Duration::from_millis(500));
    }

    #[test]
    fn default_polls_every_second() {
        // Assert
        assert_eq!(Scheduler::default().poll_interval(), Duration::from_secs(1));
        assert_eq!(
            Scheduler::default().cooldown_interval(),
            Duration::from_secs(2)
        );
    }

    #[test]
    fn zero_interval_falls_back_to_default() {
        // Act
        let scheduler = Scheduler::new(Duration::ZERO);

        // Assert
        assert_eq!(scheduler.poll_interval(), DEFAULT_POLL_INTERVAL);
    }
}
