//! Observable pipeline state
//!
//! This module contains the state shared by every stage of the access
//! pipeline: scanner, middleware, school app, link indicator and door.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::school::ClassSession;
use crate::types::{DoorPhase, LinkPhase};

/// Scanner status line shown while no scan is running
pub const IDLE_SCAN_STATUS: &str = "Ready to Scan";

/// Middleware status line shown while no scan is running
pub const IDLE_MIDDLEWARE_STEP: &str = "Ready...";

/// School app status line shown while no scan is running
pub const IDLE_APP_STEP: &str = "Waiting for requests...";

/// Observable state of the whole access pipeline
///
/// A scan rewrites these fields as its timeline steps are applied. The
/// door position and the running class session outlive individual scans.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowState {
    /// Whether a scan is currently being processed
    pub processing: bool,
    /// Status line of the palm scanner device
    pub scan_status: String,
    /// Name reported by the device, empty until identification completes
    pub identified_user: String,
    /// Status line of the middleware
    pub middleware_step: String,
    /// Status line of the school app
    pub app_step: String,
    /// Which pipeline link is currently carrying traffic
    pub link: LinkPhase,
    /// Physical door position
    pub door: DoorPhase,
    /// Whether the school app is querying its database
    pub db_lookup_active: bool,
    /// Class session currently on record, if any
    pub session: Option<ClassSession>,
}

impl FlowState {
    /// Create a fresh idle state with the door closed and no session
    pub fn new() -> Self {
        Self {
            processing: false,
            scan_status: IDLE_SCAN_STATUS.to_string(),
            identified_user: String::new(),
            middleware_step: IDLE_MIDDLEWARE_STEP.to_string(),
            app_step: IDLE_APP_STEP.to_string(),
            link: LinkPhase::Idle,
            door: DoorPhase::Closed,
            db_lookup_active: false,
            session: None,
        }
    }

    /// Return the scan-facing fields to their idle values
    ///
    /// The door position and the session record are left untouched; a
    /// door cycle finishes on its own schedule and sessions persist
    /// across scans.
    pub fn reset_to_idle(&mut self) {
        self.processing = false;
        self.scan_status = IDLE_SCAN_STATUS.to_string();
        self.identified_user.clear();
        self.middleware_step = IDLE_MIDDLEWARE_STEP.to_string();
        self.app_step = IDLE_APP_STEP.to_string();
        self.link = LinkPhase::Idle;
        self.db_lookup_active = false;
    }

    /// Check whether the scan-facing fields are at their idle values
    ///
    /// The door and session are not consulted: the pipeline is ready for
    /// the next scan even while the door is still closing.
    pub fn is_idle(&self) -> bool {
        !self.processing
            && self.scan_status == IDLE_SCAN_STATUS
            && self.identified_user.is_empty()
            && self.middleware_step == IDLE_MIDDLEWARE_STEP
            && self.app_step == IDLE_APP_STEP
            && self.link.is_idle()
            && !self.db_lookup_active
    }

    /// Check whether a class session is currently active
    pub fn has_active_session(&self) -> bool {
        self.session.as_ref().map_or(false, |session| session.is_active())
    }
}

impl Default for FlowState {
    fn default() -> Self {
        Self::new()
    }
}

/// Point-in-time capture of the pipeline state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowSnapshot {
    /// Simulated instant the snapshot was taken at
    pub timestamp: DateTime<Utc>,
    /// The pipeline state at that instant
    pub state: FlowState,
}

impl FlowSnapshot {
    /// Capture the given state at a simulated instant
    pub fn capture(timestamp: DateTime<Utc>, state: &FlowState) -> Self {
        Self { timestamp, state: state.clone() }
    }

    /// Serialize the snapshot to pretty-printed JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
