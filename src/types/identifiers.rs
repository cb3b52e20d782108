//! Unique identifier types for the palm access simulator
//!
//! This module contains the UUID-based identifier assigned to each palm scan
//! as it enters the flow, used to correlate transcript events and to cancel
//! pending pipeline steps when a scan ends early.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a single palm scan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScanId(pub Uuid);

impl ScanId {
    /// Create a new random scan ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ScanId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ScanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SCAN_{}", self.0.simple())
    }
}

impl Serialize for ScanId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format!("SCAN_{}", self.0.simple()))
    }
}

impl<'de> Deserialize<'de> for ScanId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        if let Some(uuid_str) = s.strip_prefix("SCAN_") {
            let uuid = Uuid::parse_str(uuid_str).map_err(serde::de::Error::custom)?;
            Ok(ScanId(uuid))
        } else {
            // Fallback: try to parse as raw UUID for backward compatibility
            let uuid = Uuid::parse_str(&s).map_err(serde::de::Error::custom)?;
            Ok(ScanId(uuid))
        }
    }
}
