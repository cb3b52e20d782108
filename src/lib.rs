//! Palm Access Simulator
//!
//! A headless simulation of a palm-vein access control pipeline for a school,
//! modeling the full path from palm scan through middleware protocol conversion
//! to application decisions and the door actuator.
//!
//! # Overview
//!
//! This library models a four-stage access pipeline as a deterministic timed
//! sequence. A scan schedules an ordered script of transitions against a
//! virtual clock; advancing the clock applies the steps in due order and
//! records a transcript of everything each stage did. The same flow that a
//! hardware rig would spread across devices runs here as one state machine.
//!
//! ## Key Features
//!
//! - **Identity-Specific Flows**: Security, teacher, and student scans branch
//!   at the application stage
//! - **Protocol Hop Modeling**: Device TCP traffic converted to HTTP and back
//!   by the middleware stage
//! - **Class Sessions and Attendance**: Teacher scans start sessions, student
//!   scans verify enrollment and mark attendance
//! - **Door Cycle Control**: Open, hold, and close phases with overlap guards
//! - **Virtual Clock**: Deterministic scheduling, instant or real-time runs
//! - **Scenario Driver**: Predefined scan sequences runnable from the CLI
//!
//! ## Quick Start
//!
//! ```rust
//! use palm_access_simulator::*;
//!
//! // Configure the flow
//! let config = FlowConfig {
//!     teacher_name: "FATIMA".to_string(),
//!     ..Default::default()
//! };
//! config.validate()?;
//!
//! // Run a full teacher scan
//! let mut controller = FlowController::new(config);
//! controller.scan(Identity::Teacher)?;
//! controller.run_until_idle();
//!
//! let stats = controller.statistics();
//! println!("Completed {} scan(s)", stats.scans_completed);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Module Organization
//!
//! - [`types`]: Core types, identifiers, and configuration
//! - [`events`]: Transcript events and the event log
//! - [`school`]: Class sessions and attendance records
//! - [`flow`]: Virtual clock, timeline scripts, and the flow controller
//!
//! ## Architecture
//!
//! The pipeline stages live in one state machine owned by the controller:
//!
//! ```text
//! ┌──────────┐    ┌────────────┐    ┌────────────┐    ┌──────────┐
//! │  Device  │───►│ Middleware │───►│ School App │───►│   Door   │
//! │          │    │            │    │            │    │          │
//! │ Palm scan│    │ TCP / HTTP │    │ Decisions  │    │ Actuator │
//! └──────────┘    └────────────┘    └────────────┘    └──────────┘
//!       ▲                                                   ▲
//!       │                                                   │
//!       └───────────────── FlowController ──────────────────┘
//!                (virtual clock, ordered step queue)
//! ```
#![warn(missing_docs, missing_debug_implementations, unreachable_pub)]

// Module declarations
pub mod events;
pub mod flow;
pub mod school;
pub mod types;

// Re-export all public types for backward compatibility

// Core types and identifiers
pub use types::{
    // Identifiers
    ScanId,
    // Enums
    AttendanceStatus,
    DoorPhase,
    EventCategory,
    Identity,
    LinkPhase,
    OutputFormat,
    Scenario,
    // Configuration
    ConfigError,
    ConfigValidationError,
    FlowConfig,
};

// Event transcript types
pub use events::{EventLog, FlowEvent};

// School domain types
pub use school::{AttendanceEntry, AttendanceLog, ClassSession};

// Flow orchestration types
pub use flow::{
    FlowController, FlowError, FlowResult, FlowSnapshot, FlowState, FlowStatistics,
    LoggingConfig, SimulationClock, TimelineStep, Transition,
};
