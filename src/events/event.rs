//! Transcript events emitted by the access flow
//!
//! This module contains the event structure recorded every time a pipeline
//! stage announces progress, mirroring the messages a wall display would show.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{EventCategory, ScanId};

/// A single line in the flow transcript
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowEvent {
    /// Timestamp when the event occurred
    pub timestamp: DateTime<Utc>,
    /// Human-readable event message
    pub message: String,
    /// Pipeline stage that produced the event
    pub category: EventCategory,
    /// Scan the event belongs to, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scan_id: Option<ScanId>,
}

impl FlowEvent {
    /// Create a new flow event
    pub fn new(
        timestamp: DateTime<Utc>,
        message: impl Into<String>,
        category: EventCategory,
        scan_id: Option<ScanId>,
    ) -> Self {
        Self { timestamp, message: message.into(), category, scan_id }
    }

    /// Check whether the scanner device produced this event
    pub fn is_device(&self) -> bool {
        self.category == EventCategory::Device
    }

    /// Check whether the middleware produced this event
    pub fn is_middleware(&self) -> bool {
        self.category == EventCategory::Middleware
    }

    /// Check whether the school application produced this event
    pub fn is_app(&self) -> bool {
        self.category == EventCategory::App
    }

    /// Check whether the door actuator produced this event
    pub fn is_door(&self) -> bool {
        self.category == EventCategory::Door
    }
}
