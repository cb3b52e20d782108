//! Core types and identifiers for the palm access simulator
//!
//! This module contains fundamental types, identifiers, and configuration structures
//! used throughout the access flow.
//!
//! # Overview
//!
//! The types module provides the foundational data types for the flow:
//!
//! - **Identifiers**: UUID-based scan identifiers for event correlation
//! - **Enums**: Type-safe enumerations for identities, link phases, door phases, etc.
//! - **Configuration**: Flow configuration with validation and CLI support
//!
//! # Usage Example
//!
//! ```rust
//! use palm_access_simulator::types::*;
//!
//! // Create a scan identifier
//! let scan_id = ScanId::new();
//!
//! // Use enums for type safety
//! let identity = Identity::Teacher;
//! let category = EventCategory::Middleware;
//! let phase = LinkPhase::DeviceToMiddleware;
//!
//! // Configure the flow
//! let config = FlowConfig {
//!     teacher_name: "FATIMA".to_string(),
//!     door_relay_hold_ms: 1500,
//!     ..Default::default()
//! };
//! assert!(config.validate().is_ok());
//! ```

pub mod config;
pub mod enums;
pub mod identifiers;

// Re-export all public types for convenience
pub use config::*;
pub use enums::*;
pub use identifiers::*;
