//! Simulated time and the periodic save schedule

use std::time::Duration;

/// Target tick length, roughly 30 Hz
pub const DEFAULT_TICK_DURATION: Duration = Duration::from_millis(33);

/// Simulated time between periodic saves
pub const DEFAULT_SAVE_INTERVAL: Duration = Duration::from_secs(5);

/// Counts ticks and accumulates simulated time toward the next save.
///
/// Only simulated time is tracked, so the schedule is the same whether the
/// loop runs at the target rate, faster (headless) or slower (a stalled window).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationClock {
    tick_duration: Duration,
    save_interval: Duration,
    since_save: Duration,
    elapsed: Duration,
    ticks: u64,
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self::new(DEFAULT_TICK_DURATION, DEFAULT_SAVE_INTERVAL)
    }
}

impl SimulationClock {
    pub fn new(tick_duration: Duration, save_interval: Duration) -> Self {
        Self {
            tick_duration,
            save_interval,
            since_save: Duration::ZERO,
            elapsed: Duration::ZERO,
            ticks: 0,
        }
    }

    /// Record one tick. Returns true when a periodic save is due.
    pub fn advance(&mut self) -> bool {
        self.ticks += 1;
        self.elapsed += self.tick_duration;
        self.since_save += self.tick_duration;

        if self.save_interval.is_zero() || self.since_save < self.save_interval {
            return false;
        }
        self.since_save -= self.save_interval;
        true
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Total simulated time
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn tick_duration(&self) -> Duration {
        self.tick_duration
    }

    pub fn save_interval(&self) -> Duration {
        self.save_interval
    }

    /// Ticks per simulated second, at least one
    pub fn ticks_per_second(&self) -> u64 {
        if self.tick_duration.is_zero() {
            return 1;
        }
        (Duration::from_secs(1).as_nanos() / self.tick_duration.as_nanos()).max(1) as u64
    }
}
