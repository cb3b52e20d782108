//! Access flow orchestration
//!
//! This module contains the heart of the simulator: the virtual clock, the
//! timeline scripts, and the controller that owns the pipeline state and
//! applies scheduled transitions in due order.
//!
//! # Overview
//!
//! The flow module provides the orchestration layer:
//!
//! - **SimulationClock**: Deterministic virtual clock advanced by the controller
//! - **Timeline**: Ordered `{offset, transition}` scripts per identity
//! - **FlowController**: Single owner of state, queue, transcript, and statistics
//! - **FlowState / FlowSnapshot**: Observable pipeline state and point-in-time captures
//! - **FlowStatistics**: Counters for scans, denials, rejections, and door cycles
//! - **Logging**: Tracing subscriber setup for console and file output
//!
//! # Usage Example
//!
//! ```rust
//! use palm_access_simulator::flow::*;
//! use palm_access_simulator::types::{FlowConfig, Identity};
//!
//! let mut controller = FlowController::new(FlowConfig::default());
//!
//! // A teacher scan starts a class session
//! assert!(controller.scan(Identity::Teacher).is_ok());
//! controller.run_until_idle();
//!
//! assert!(controller.state().has_active_session());
//! assert_eq!(controller.statistics().scans_completed, 1);
//! ```

pub mod clock;
pub mod controller;
pub mod error;
pub mod logging;
pub mod state;
pub mod statistics;
pub mod timeline;

// Re-export all public types for convenience
pub use clock::*;
pub use controller::*;
pub use error::*;
pub use logging::*;
pub use state::*;
pub use statistics::*;
pub use timeline::*;
