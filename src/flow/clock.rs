//! Virtual clock for the access flow
//!
//! This module contains the simulated clock every timeline step is scheduled
//! against. The clock never moves on its own; whoever owns it advances it.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use tracing::debug;

/// Simulated clock driving the flow timeline
///
/// The clock starts at a fixed epoch so repeated runs produce identical
/// timestamps, and it only moves forward.
#[derive(Debug, Clone)]
pub struct SimulationClock {
    /// Instant the simulated timeline starts at
    start: DateTime<Utc>,
    /// How far the clock has advanced past the start
    elapsed: Duration,
}

impl SimulationClock {
    /// Create a clock at the default epoch
    pub fn new() -> Self {
        Self::starting_at(default_epoch())
    }

    /// Create a clock starting at a specific instant
    pub fn starting_at(start: DateTime<Utc>) -> Self {
        Self { start, elapsed: Duration::zero() }
    }

    /// The instant the clock started at
    pub fn start_time(&self) -> DateTime<Utc> {
        self.start
    }

    /// The current simulated instant
    pub fn now(&self) -> DateTime<Utc> {
        self.start + self.elapsed
    }

    /// How far the clock has advanced since it started
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Move the clock forward by a duration
    ///
    /// Zero and negative durations are ignored; the clock never moves
    /// backwards.
    pub fn advance_by(&mut self, duration: Duration) {
        if duration <= Duration::zero() {
            return;
        }
        self.elapsed = self.elapsed + duration;
        debug!("Clock advanced by {}ms to {}", duration.num_milliseconds(), self.now());
    }

    /// Move the clock forward to a target instant
    ///
    /// Targets at or before the current instant are ignored.
    pub fn advance_to(&mut self, target: DateTime<Utc>) {
        let now = self.now();
        if target <= now {
            return;
        }
        self.advance_by(target - now);
    }
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixed default epoch: 2024-09-02 08:00:00 UTC, a school-day morning
fn default_epoch() -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(2024, 9, 2)
        .and_then(|date| date.and_hms_opt(8, 0, 0))
        .map(|datetime| datetime.and_utc())
        .unwrap_or(DateTime::UNIX_EPOCH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_creation() {
        let clock = SimulationClock::new();

        assert_eq!(clock.now(), clock.start_time());
        assert_eq!(clock.elapsed(), Duration::zero());
    }

    #[test]
    fn test_clock_default_epoch_is_deterministic() {
        let first = SimulationClock::new();
        let second = SimulationClock::default();

        // Two fresh clocks read the same instant
        assert_eq!(first.now(), second.now());
        assert_eq!(first.start_time(), default_epoch());
    }

    #[test]
    fn test_clock_starting_at() {
        let start = default_epoch() + Duration::hours(2);
        let clock = SimulationClock::starting_at(start);

        assert_eq!(clock.now(), start);
        assert_eq!(clock.start_time(), start);
    }

    #[test]
    fn test_clock_advance_by() {
        let mut clock = SimulationClock::new();

        clock.advance_by(Duration::milliseconds(1500));
        assert_eq!(clock.elapsed(), Duration::milliseconds(1500));
        assert_eq!(clock.now(), clock.start_time() + Duration::milliseconds(1500));

        clock.advance_by(Duration::milliseconds(500));
        assert_eq!(clock.elapsed(), Duration::milliseconds(2000));
    }

    #[test]
    fn test_clock_ignores_backwards_movement() {
        let mut clock = SimulationClock::new();
        clock.advance_by(Duration::seconds(5));
        let now = clock.now();

        clock.advance_by(Duration::seconds(-10));
        assert_eq!(clock.now(), now);

        clock.advance_by(Duration::zero());
        assert_eq!(clock.now(), now);

        clock.advance_to(now - Duration::seconds(1));
        assert_eq!(clock.now(), now);
    }

    #[test]
    fn test_clock_advance_to() {
        let mut clock = SimulationClock::new();
        let target = clock.start_time() + Duration::milliseconds(5500);

        clock.advance_to(target);
        assert_eq!(clock.now(), target);

        // Advancing to the current instant is a no-op
        clock.advance_to(target);
        assert_eq!(clock.now(), target);
    }
}
