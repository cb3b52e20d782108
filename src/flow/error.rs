//! Error types and handling
//!
//! This module contains error types for the access flow and its
//! configuration surface.

use thiserror::Error;

use crate::types::{ConfigError, ConfigValidationError, ScanId};

/// Errors that can occur while driving the access flow
#[derive(Debug, Error)]
pub enum FlowError {
    /// A scan was requested while another scan is still in flight
    #[error("Scan {scan_id} is still in progress, overlapping scan rejected")]
    ScanInFlight {
        /// Identifier of the scan currently being processed
        scan_id: ScanId,
    },

    /// A manual door cycle was requested while the door is already cycling
    #[error("Door cycle already in progress, request rejected")]
    DoorCycleInProgress,

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),

    /// Configuration failed validation
    #[error("Configuration validation failed: {0}")]
    Validation(#[from] ConfigValidationError),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl FlowError {
    /// Create a scan-in-flight rejection for the given scan
    pub fn scan_in_flight(scan_id: ScanId) -> Self {
        Self::ScanInFlight { scan_id }
    }

    /// Check if this is a recoverable error
    ///
    /// Rejections are recoverable: the caller can retry once the flow
    /// returns to idle. Configuration problems are not.
    pub fn is_recoverable(&self) -> bool {
        match self {
            FlowError::ScanInFlight { .. } => true,
            FlowError::DoorCycleInProgress => true,
            FlowError::Configuration(_) => false,
            FlowError::Validation(_) => false,
            FlowError::Serialization(_) => true,
            FlowError::Io(_) => true,
        }
    }

    /// Get the error category
    pub fn category(&self) -> &'static str {
        match self {
            FlowError::ScanInFlight { .. } => "Scan",
            FlowError::DoorCycleInProgress => "Door",
            FlowError::Configuration(_) => "Configuration",
            FlowError::Validation(_) => "Validation",
            FlowError::Serialization(_) => "Serialization",
            FlowError::Io(_) => "IO",
        }
    }
}

/// Result type for flow operations
pub type FlowResult<T> = Result<T, FlowError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_error_creation() {
        let scan_id = ScanId::new();
        let error = FlowError::scan_in_flight(scan_id);
        assert!(matches!(error, FlowError::ScanInFlight { .. }));
        assert_eq!(
            error.to_string(),
            format!("Scan {} is still in progress, overlapping scan rejected", scan_id)
        );

        let door_error = FlowError::DoorCycleInProgress;
        assert_eq!(door_error.to_string(), "Door cycle already in progress, request rejected");
    }

    #[test]
    fn test_error_from_io_error() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let flow_error: FlowError = io_error.into();
        assert!(matches!(flow_error, FlowError::Io(_)));
    }

    #[test]
    fn test_error_from_config_error() {
        let config_error = ConfigError::FileNotFound("missing.json".to_string());
        let flow_error: FlowError = config_error.into();
        assert!(matches!(flow_error, FlowError::Configuration(_)));

        let validation_error = ConfigValidationError::InvalidTimeScale(0.0);
        let flow_error: FlowError = validation_error.into();
        assert!(matches!(flow_error, FlowError::Validation(_)));
    }

    #[test]
    fn test_error_recoverability() {
        assert!(FlowError::scan_in_flight(ScanId::new()).is_recoverable());
        assert!(FlowError::DoorCycleInProgress.is_recoverable());

        let validation_error: FlowError = ConfigValidationError::InvalidTimeScale(-1.0).into();
        assert!(!validation_error.is_recoverable());
    }

    #[test]
    fn test_error_categories() {
        assert_eq!(FlowError::scan_in_flight(ScanId::new()).category(), "Scan");
        assert_eq!(FlowError::DoorCycleInProgress.category(), "Door");

        let config_error: FlowError = ConfigError::FileNotFound("x.json".to_string()).into();
        assert_eq!(config_error.category(), "Configuration");

        let io_error: FlowError = io::Error::new(io::ErrorKind::Other, "disk").into();
        assert_eq!(io_error.category(), "IO");
    }

    #[test]
    fn test_flow_result_type() {
        let success: FlowResult<i32> = Ok(42);
        assert!(success.is_ok());

        let failure: FlowResult<i32> = Err(FlowError::DoorCycleInProgress);
        assert!(failure.is_err());
    }
}
