//! School domain state for the access flow
//!
//! This module contains the class session and attendance records the school
//! application maintains as scans are processed.
//!
//! # Overview
//!
//! The school module provides the application-side domain state:
//!
//! - **ClassSession**: Session started by a teacher scan, gating student access
//! - **AttendanceEntry / AttendanceLog**: Append-only attendance marks
//!
//! # Usage Example
//!
//! ```rust
//! use palm_access_simulator::school::*;
//! use chrono::Utc;
//!
//! // Start a session and mark a student present
//! let session = ClassSession::new("Biology 101", "Room 301", "AHMED", Utc::now());
//! assert_eq!(session.summary(), "Biology 101 - Room 301");
//!
//! let mut attendance = AttendanceLog::new();
//! attendance.mark_present("MOHAMMED", Utc::now());
//! assert_eq!(attendance.count_for("MOHAMMED"), 1);
//! ```

pub mod attendance;
pub mod session;

// Re-export all public types for convenience
pub use attendance::*;
pub use session::*;
