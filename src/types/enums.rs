//! Enumeration types for the palm access simulator
//!
//! This module contains all enumeration types used throughout the access flow,
//! including user identities, event categories, pipeline link phases, door
//! phases, attendance statuses, scenarios, and output formats.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identity classes recognized by the palm vein scanner
///
/// The Display form is the lowercase role word that appears inside pipeline
/// status messages ("Processing student request...").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Identity {
    /// Security agent - unconditional door access
    Security,
    /// Teacher - starts a class session on scan
    Teacher,
    /// Student - admitted only while a class session is active
    Student,
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identity::Security => write!(f, "security"),
            Identity::Teacher => write!(f, "teacher"),
            Identity::Student => write!(f, "student"),
        }
    }
}

impl FromStr for Identity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "security" | "security agent" | "agent" => Ok(Identity::Security),
            "teacher" => Ok(Identity::Teacher),
            "student" => Ok(Identity::Student),
            _ => Err(format!("Unknown identity: {}", s)),
        }
    }
}

/// Pipeline stage that produced a transcript event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventCategory {
    /// Palm vein scanner at the door
    Device,
    /// TCP/HTTP translation middleware
    Middleware,
    /// School attendance application
    App,
    /// Door actuator
    Door,
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventCategory::Device => write!(f, "device"),
            EventCategory::Middleware => write!(f, "middleware"),
            EventCategory::App => write!(f, "app"),
            EventCategory::Door => write!(f, "door"),
        }
    }
}

impl FromStr for EventCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "device" => Ok(EventCategory::Device),
            "middleware" => Ok(EventCategory::Middleware),
            "app" | "application" | "custom app" => Ok(EventCategory::App),
            "door" => Ok(EventCategory::Door),
            _ => Err(format!("Unknown event category: {}", s)),
        }
    }
}

/// Which hop of the device/middleware/app pipeline is carrying traffic
///
/// At most one hop is active at any instant. The upstream hops light up while
/// an identification travels toward the app, the downstream hops while the door
/// open command travels back toward the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LinkPhase {
    /// No traffic on any hop
    Idle,
    /// TCP identification payload moving from device to middleware
    DeviceToMiddleware,
    /// HTTP request moving from middleware to app
    MiddlewareToApp,
    /// HTTP door command moving from app back to middleware
    AppToMiddleware,
    /// TCP door command moving from middleware back to device
    MiddlewareToDevice,
}

impl LinkPhase {
    /// Returns true when no hop is carrying traffic
    pub fn is_idle(&self) -> bool {
        matches!(self, LinkPhase::Idle)
    }

    /// Returns true while an identification is traveling toward the app
    pub fn is_upstream(&self) -> bool {
        matches!(self, LinkPhase::DeviceToMiddleware | LinkPhase::MiddlewareToApp)
    }

    /// Returns true while a door command is traveling back toward the device
    pub fn is_downstream(&self) -> bool {
        matches!(self, LinkPhase::AppToMiddleware | LinkPhase::MiddlewareToDevice)
    }
}

impl fmt::Display for LinkPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkPhase::Idle => write!(f, "Idle"),
            LinkPhase::DeviceToMiddleware => write!(f, "Device to Middleware"),
            LinkPhase::MiddlewareToApp => write!(f, "Middleware to App"),
            LinkPhase::AppToMiddleware => write!(f, "App to Middleware"),
            LinkPhase::MiddlewareToDevice => write!(f, "Middleware to Device"),
        }
    }
}

impl FromStr for LinkPhase {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "idle" => Ok(LinkPhase::Idle),
            "device to middleware" | "devicetomiddleware" => Ok(LinkPhase::DeviceToMiddleware),
            "middleware to app" | "middlewaretoapp" => Ok(LinkPhase::MiddlewareToApp),
            "app to middleware" | "apptomiddleware" => Ok(LinkPhase::AppToMiddleware),
            "middleware to device" | "middlewaretodevice" => Ok(LinkPhase::MiddlewareToDevice),
            _ => Err(format!("Unknown link phase: {}", s)),
        }
    }
}

/// Physical position of the door actuator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DoorPhase {
    /// Door is shut and latched
    Closed,
    /// Door is swinging open
    Opening,
    /// Door is fully open
    Open,
}

impl DoorPhase {
    /// Returns true when the door is shut
    pub fn is_closed(&self) -> bool {
        matches!(self, DoorPhase::Closed)
    }

    /// Returns true when the door is mid-swing
    pub fn is_opening(&self) -> bool {
        matches!(self, DoorPhase::Opening)
    }

    /// Returns true when the door is fully open
    pub fn is_open(&self) -> bool {
        matches!(self, DoorPhase::Open)
    }
}

impl fmt::Display for DoorPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DoorPhase::Closed => write!(f, "Closed"),
            DoorPhase::Opening => write!(f, "Opening"),
            DoorPhase::Open => write!(f, "Open"),
        }
    }
}

impl FromStr for DoorPhase {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "closed" => Ok(DoorPhase::Closed),
            "opening" => Ok(DoorPhase::Opening),
            "open" | "opened" => Ok(DoorPhase::Open),
            _ => Err(format!("Unknown door phase: {}", s)),
        }
    }
}

/// Attendance outcome recorded for a student
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttendanceStatus {
    /// Student was admitted and marked present
    Present,
    /// Student was recorded absent (manual correction)
    Absent,
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttendanceStatus::Present => write!(f, "Present"),
            AttendanceStatus::Absent => write!(f, "Absent"),
        }
    }
}

impl FromStr for AttendanceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "present" => Ok(AttendanceStatus::Present),
            "absent" => Ok(AttendanceStatus::Absent),
            _ => Err(format!("Unknown attendance status: {}", s)),
        }
    }
}

/// Built-in scan sequences the binary can replay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Scenario {
    /// Single security agent scan
    SecurityOnly,
    /// Single teacher scan that starts a class session
    TeacherOnly,
    /// Single student scan with no session, ending in denial
    StudentDenied,
    /// Teacher starts a session, then a student is admitted
    TeacherThenStudent,
    /// All identities plus a duplicate student scan and a manual door demo
    FullDemo,
}

impl Scenario {
    /// The ordered identities scanned when this scenario runs
    pub fn scan_sequence(&self) -> Vec<Identity> {
        match self {
            Scenario::SecurityOnly => vec![Identity::Security],
            Scenario::TeacherOnly => vec![Identity::Teacher],
            Scenario::StudentDenied => vec![Identity::Student],
            Scenario::TeacherThenStudent => vec![Identity::Teacher, Identity::Student],
            Scenario::FullDemo => vec![
                Identity::Security,
                Identity::Teacher,
                Identity::Student,
                Identity::Student,
            ],
        }
    }

    /// Short human-readable description of what the scenario demonstrates
    pub fn description(&self) -> &'static str {
        match self {
            Scenario::SecurityOnly => "Security agent scan with unconditional door access",
            Scenario::TeacherOnly => "Teacher scan that starts a class session",
            Scenario::StudentDenied => "Student scan denied because no session is active",
            Scenario::TeacherThenStudent => "Teacher starts a session, then a student is admitted",
            Scenario::FullDemo => "Every identity in sequence plus a manual door trigger demo",
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scenario::SecurityOnly => write!(f, "security-only"),
            Scenario::TeacherOnly => write!(f, "teacher-only"),
            Scenario::StudentDenied => write!(f, "student-denied"),
            Scenario::TeacherThenStudent => write!(f, "teacher-then-student"),
            Scenario::FullDemo => write!(f, "full-demo"),
        }
    }
}

impl FromStr for Scenario {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "security-only" | "security only" | "securityonly" => Ok(Scenario::SecurityOnly),
            "teacher-only" | "teacher only" | "teacheronly" => Ok(Scenario::TeacherOnly),
            "student-denied" | "student denied" | "studentdenied" => Ok(Scenario::StudentDenied),
            "teacher-then-student" | "teacher then student" | "teacherthenstudent" => {
                Ok(Scenario::TeacherThenStudent)
            }
            "full-demo" | "full demo" | "fulldemo" | "full" => Ok(Scenario::FullDemo),
            _ => Err(format!("Unknown scenario: {}", s)),
        }
    }
}

/// Output format options for the event transcript export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutputFormat {
    /// JSON format for structured data
    Json,
    /// CSV format for tabular data
    Csv,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "JSON"),
            OutputFormat::Csv => write!(f, "CSV"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}
