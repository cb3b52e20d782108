//! Event transcript for the access flow
//!
//! This module handles the transcript events emitted by the pipeline stages
//! and the log that accumulates and exports them.
//!
//! # Overview
//!
//! The events module provides the flow's observable record:
//!
//! - **FlowEvent**: A single transcript line with timestamp, stage, and message
//! - **EventLog**: Ordered accumulation with category filters and JSON/CSV export
//!
//! # Usage Example
//!
//! ```rust
//! use palm_access_simulator::events::*;
//! use palm_access_simulator::types::*;
//! use chrono::Utc;
//!
//! // Record a transcript line
//! let mut log = EventLog::new();
//! log.record(FlowEvent::new(
//!     Utc::now(),
//!     "Device: Scanning palm for AHMED",
//!     EventCategory::Device,
//!     None,
//! ));
//!
//! assert_eq!(log.len(), 1);
//! assert_eq!(log.category_count(EventCategory::Device), 1);
//! ```

pub mod event;
pub mod log;

// Re-export all public types for convenience
pub use event::*;
pub use log::*;
