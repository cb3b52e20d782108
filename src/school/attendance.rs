//! Attendance records for admitted students
//!
//! This module contains the attendance entries appended each time a student
//! scan is verified against an active class session.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::AttendanceStatus;

/// A single attendance mark for one student scan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceEntry {
    /// Display name of the student
    pub name: String,
    /// Timestamp when the mark was recorded
    pub timestamp: DateTime<Utc>,
    /// Outcome recorded for the student
    pub status: AttendanceStatus,
}

impl AttendanceEntry {
    /// Create a new attendance entry
    pub fn new(name: impl Into<String>, timestamp: DateTime<Utc>, status: AttendanceStatus) -> Self {
        Self { name: name.into(), timestamp, status }
    }

    /// Check whether the entry marks the student present
    pub fn is_present(&self) -> bool {
        self.status == AttendanceStatus::Present
    }
}

/// Append-only log of attendance marks
///
/// Every verified student scan appends an entry, so a student who scans twice
/// appears twice.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AttendanceLog {
    entries: Vec<AttendanceEntry>,
}

impl AttendanceLog {
    /// Create an empty attendance log
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Append an attendance mark
    pub fn record(&mut self, entry: AttendanceEntry) {
        self.entries.push(entry);
    }

    /// Append a present mark for a student
    pub fn mark_present(&mut self, name: impl Into<String>, timestamp: DateTime<Utc>) {
        self.record(AttendanceEntry::new(name, timestamp, AttendanceStatus::Present));
    }

    /// Append an absent mark for a student
    pub fn mark_absent(&mut self, name: impl Into<String>, timestamp: DateTime<Utc>) {
        self.record(AttendanceEntry::new(name, timestamp, AttendanceStatus::Absent));
    }

    /// All entries in recording order
    pub fn entries(&self) -> &[AttendanceEntry] {
        &self.entries
    }

    /// Number of recorded entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether the log is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries recorded for a student
    pub fn count_for(&self, name: &str) -> usize {
        self.entries.iter().filter(|entry| entry.name == name).count()
    }

    /// Most recent entry recorded for a student, if any
    pub fn latest_for(&self, name: &str) -> Option<&AttendanceEntry> {
        self.entries.iter().rev().find(|entry| entry.name == name)
    }

    /// Render the log as pretty-printed JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn epoch() -> DateTime<Utc> {
        chrono::NaiveDate::from_ymd_opt(2024, 9, 2)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap()
            .and_utc()
    }

    #[test]
    fn test_attendance_entry() {
        let entry = AttendanceEntry::new("MOHAMMED", epoch(), AttendanceStatus::Present);

        assert_eq!(entry.name, "MOHAMMED");
        assert!(entry.is_present());

        let absent = AttendanceEntry::new("SARA", epoch(), AttendanceStatus::Absent);
        assert!(!absent.is_present());
    }

    #[test]
    fn test_attendance_log_marks() {
        let mut log = AttendanceLog::new();
        assert!(log.is_empty());

        log.mark_present("MOHAMMED", epoch());
        log.mark_absent("SARA", epoch() + Duration::minutes(5));

        assert_eq!(log.len(), 2);
        assert_eq!(log.entries()[0].name, "MOHAMMED");
        assert!(log.entries()[0].is_present());
        assert_eq!(log.entries()[1].name, "SARA");
        assert!(!log.entries()[1].is_present());
    }

    #[test]
    fn test_attendance_log_allows_duplicates() {
        let mut log = AttendanceLog::new();

        log.mark_present("MOHAMMED", epoch());
        log.mark_present("MOHAMMED", epoch() + Duration::minutes(10));

        // Each scan appends its own entry
        assert_eq!(log.len(), 2);
        assert_eq!(log.count_for("MOHAMMED"), 2);
        assert_eq!(log.count_for("SARA"), 0);
    }

    #[test]
    fn test_attendance_log_latest_for() {
        let mut log = AttendanceLog::new();
        let later = epoch() + Duration::minutes(10);

        log.mark_present("MOHAMMED", epoch());
        log.mark_present("MOHAMMED", later);

        let latest = log.latest_for("MOHAMMED").unwrap();
        assert_eq!(latest.timestamp, later);
        assert!(log.latest_for("SARA").is_none());
    }

    #[test]
    fn test_attendance_log_to_json() {
        let mut log = AttendanceLog::new();
        log.mark_present("MOHAMMED", epoch());

        let json = log.to_json().unwrap();
        let parsed: Vec<AttendanceEntry> = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].name, "MOHAMMED");
        assert_eq!(parsed[0].status, AttendanceStatus::Present);
    }
}
