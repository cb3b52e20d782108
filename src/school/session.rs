//! Class session state
//!
//! This module contains the class session record created when a teacher scan
//! completes, which gates student admission for the rest of the flow.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A class session started by a teacher scan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassSession {
    /// Course being taught
    pub course: String,
    /// Room the class meets in
    pub room: String,
    /// Display name of the teacher who started the session
    pub teacher: String,
    /// Whether the session currently admits students
    pub active: bool,
    /// Timestamp when the session started
    pub started_at: DateTime<Utc>,
}

impl ClassSession {
    /// Create a new active session
    pub fn new(
        course: impl Into<String>,
        room: impl Into<String>,
        teacher: impl Into<String>,
        started_at: DateTime<Utc>,
    ) -> Self {
        Self {
            course: course.into(),
            room: room.into(),
            teacher: teacher.into(),
            active: true,
            started_at,
        }
    }

    /// One-line "course - room" label used in status messages
    pub fn summary(&self) -> String {
        format!("{} - {}", self.course, self.room)
    }

    /// Check whether the session currently admits students
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Stop admitting students
    pub fn end(&mut self) {
        self.active = false;
    }
}
