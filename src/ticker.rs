use std::time::{Duration, Instant};

/// Event loop poll interval in milliseconds
pub const DEFAULT_POLL_MS: u64 = 250;

/// A running session advances once per minute
pub const TICK_INTERVAL: Duration = Duration::from_secs(60);

/// How long the "just started" state lasts after a session begins
pub const AFTER_ADDING_TIMEOUT: Duration = Duration::from_millis(1000);

/// Get the event loop poll duration
pub fn poll_duration() -> Duration {
    Duration::from_millis(DEFAULT_POLL_MS)
}

/// Timer driven by an external clock.
///
/// Nothing fires on its own: the owner calls [`Timer::poll`] with the current
/// instant and receives the number of intervals that elapsed.
#[derive(Debug, Clone)]
pub struct Timer {
    interval: Duration,
    single_shot: bool,
    deadline: Option<Instant>,
}

impl Timer {
    pub fn repeating(interval: Duration) -> Self {
        Self {
            interval,
            single_shot: false,
            deadline: None,
        }
    }

    pub fn single_shot(interval: Duration) -> Self {
        Self {
            interval,
            single_shot: true,
            deadline: None,
        }
    }

    /// Start, or restart, counting from `now`
    pub fn start(&mut self, now: Instant) {
        self.deadline = Some(now + self.interval);
    }

    pub fn stop(&mut self) {
        self.deadline = None;
    }

    pub fn is_active(&self) -> bool {
        self.deadline.is_some()
    }

    /// Number of timeouts due at `now`. A single-shot timer fires at most
    /// once and then stops.
    pub fn poll(&mut self, now: Instant) -> u32 {
        let Some(mut deadline) = self.deadline else {
            return 0;
        };

        let mut fired = 0;
        while now >= deadline {
            fired += 1;
            if self.single_shot || self.interval.is_zero() {
                self.deadline = None;
                return fired;
            }
            deadline += self.interval;
        }

        self.deadline = Some(deadline);
        fired
    }
}
