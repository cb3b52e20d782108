//! Statistics collection and reporting
//!
//! This module tracks counters for a flow run and produces summary output.

use std::fmt;

use chrono::Duration;
use serde::{Deserialize, Serialize};

/// Counters collected while driving the access flow
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FlowStatistics {
    /// Number of scans accepted for processing
    pub scans_started: usize,
    /// Number of scans rejected because another scan was in flight
    pub scans_rejected: usize,
    /// Number of scans that ran their full timeline
    pub scans_completed: usize,
    /// Number of scans denied by the school app
    pub scans_denied: usize,
    /// Number of door cycles started
    pub door_cycles_started: usize,
    /// Number of manual door requests rejected
    pub door_requests_rejected: usize,
    /// Simulated time covered by the run, in milliseconds
    pub simulated_duration_ms: i64,
}

impl FlowStatistics {
    /// Create new statistics with all counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an accepted scan
    pub fn record_scan_started(&mut self) {
        self.scans_started += 1;
    }

    /// Record a scan rejected by the re-entrancy guard
    pub fn record_scan_rejected(&mut self) {
        self.scans_rejected += 1;
    }

    /// Record a scan that ran its timeline to completion
    pub fn record_scan_completed(&mut self) {
        self.scans_completed += 1;
    }

    /// Record a scan denied by the school app
    pub fn record_scan_denied(&mut self) {
        self.scans_denied += 1;
    }

    /// Record a door cycle starting
    pub fn record_door_cycle(&mut self) {
        self.door_cycles_started += 1;
    }

    /// Record a rejected manual door request
    pub fn record_door_request_rejected(&mut self) {
        self.door_requests_rejected += 1;
    }

    /// Set the simulated time covered by the run
    pub fn set_simulated_duration(&mut self, duration: Duration) {
        self.simulated_duration_ms = duration.num_milliseconds();
    }

    /// Get the simulated time covered by the run
    pub fn simulated_duration(&self) -> Duration {
        Duration::milliseconds(self.simulated_duration_ms)
    }

    /// Get the total number of scan requests, accepted or rejected
    pub fn total_scan_requests(&self) -> usize {
        self.scans_started + self.scans_rejected
    }

    /// Get the percentage of started scans that completed
    pub fn completion_percentage(&self) -> f64 {
        if self.scans_started == 0 {
            0.0
        } else {
            (self.scans_completed as f64 / self.scans_started as f64) * 100.0
        }
    }

    /// Get the percentage of started scans that were denied
    pub fn denial_percentage(&self) -> f64 {
        if self.scans_started == 0 {
            0.0
        } else {
            (self.scans_denied as f64 / self.scans_started as f64) * 100.0
        }
    }

    /// Get the percentage of scan requests rejected by the guard
    pub fn rejection_percentage(&self) -> f64 {
        let total = self.total_scan_requests();
        if total == 0 {
            0.0
        } else {
            (self.scans_rejected as f64 / total as f64) * 100.0
        }
    }

    /// Generate a compact one-line summary suitable for logging
    pub fn summary(&self) -> String {
        format!(
            "Flow: {} scans started ({} completed, {} denied), {} rejected, {} door cycles, {}ms simulated",
            self.scans_started,
            self.scans_completed,
            self.scans_denied,
            self.scans_rejected,
            self.door_cycles_started,
            self.simulated_duration_ms
        )
    }
}

impl fmt::Display for FlowStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.summary())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statistics_creation() {
        let stats = FlowStatistics::new();

        assert_eq!(stats.scans_started, 0);
        assert_eq!(stats.scans_rejected, 0);
        assert_eq!(stats.scans_completed, 0);
        assert_eq!(stats.scans_denied, 0);
        assert_eq!(stats.door_cycles_started, 0);
        assert_eq!(stats.door_requests_rejected, 0);
        assert_eq!(stats.simulated_duration_ms, 0);
    }

    #[test]
    fn test_statistics_recording() {
        let mut stats = FlowStatistics::new();

        stats.record_scan_started();
        stats.record_scan_started();
        stats.record_scan_completed();
        stats.record_scan_denied();
        stats.record_scan_rejected();
        stats.record_door_cycle();
        stats.record_door_request_rejected();

        assert_eq!(stats.scans_started, 2);
        assert_eq!(stats.scans_completed, 1);
        assert_eq!(stats.scans_denied, 1);
        assert_eq!(stats.scans_rejected, 1);
        assert_eq!(stats.door_cycles_started, 1);
        assert_eq!(stats.door_requests_rejected, 1);
        assert_eq!(stats.total_scan_requests(), 3);
    }

    #[test]
    fn test_statistics_percentages() {
        let mut stats = FlowStatistics::new();

        stats.record_scan_started();
        stats.record_scan_started();
        stats.record_scan_started();
        stats.record_scan_started();
        stats.record_scan_completed();
        stats.record_scan_completed();
        stats.record_scan_completed();
        stats.record_scan_denied();
        stats.record_scan_rejected();

        assert_eq!(stats.completion_percentage(), 75.0); // 3/4 * 100
        assert_eq!(stats.denial_percentage(), 25.0); // 1/4 * 100
        assert_eq!(stats.rejection_percentage(), 20.0); // 1/5 * 100
    }

    #[test]
    fn test_statistics_zero_division() {
        let stats = FlowStatistics::new();

        assert_eq!(stats.completion_percentage(), 0.0);
        assert_eq!(stats.denial_percentage(), 0.0);
        assert_eq!(stats.rejection_percentage(), 0.0);
    }

    #[test]
    fn test_simulated_duration() {
        let mut stats = FlowStatistics::new();

        stats.set_simulated_duration(Duration::milliseconds(9500));
        assert_eq!(stats.simulated_duration_ms, 9500);
        assert_eq!(stats.simulated_duration(), Duration::milliseconds(9500));
    }

    #[test]
    fn test_statistics_summary() {
        let mut stats = FlowStatistics::new();
        stats.record_scan_started();
        stats.record_scan_completed();
        stats.record_door_cycle();
        stats.set_simulated_duration(Duration::milliseconds(9500));

        let summary = stats.summary();
        assert!(summary.contains("1 scans started"));
        assert!(summary.contains("1 completed"));
        assert!(summary.contains("1 door cycles"));
        assert!(summary.contains("9500ms simulated"));

        let display_output = format!("{}", stats);
        assert_eq!(display_output, summary);
    }
}
