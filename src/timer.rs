//! Search time management.
//!
//! A `TimeManager` is a sampled deadline: it records a monotonic start
//! timestamp and an allocated budget, and the search asks `should_stop` at
//! its node-count poll points. Nothing here interacts with scheduling.

use std::time::{Duration, Instant};

pub struct TimeManager {
    start_time: Instant,
    allocated: Option<Duration>,
}

impl TimeManager {
    /// Take a fresh sample of the monotonic clock and store the budget.
    /// `None` means no time limit (depth-limited or infinite search).
    #[must_use]
    pub fn start_search(budget_ms: Option<u64>) -> Self {
        TimeManager {
            start_time: Instant::now(),
            allocated: budget_ms.map(Duration::from_millis),
        }
    }

    /// Whether the allocated budget has elapsed.
    #[must_use]
    pub fn should_stop(&self) -> bool {
        match self.allocated {
            Some(budget) => self.start_time.elapsed() >= budget,
            None => false,
        }
    }

    /// Milliseconds since the search started. Purely observational.
    #[must_use]
    pub fn elapsed_ms(&self) -> u64 {
        self.start_time.elapsed().as_millis() as u64
    }
}
