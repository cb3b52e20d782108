//! Timed step scripts for scans and door cycles
//!
//! This module contains the timeline tables the controller schedules
//! from. Each script is a list of offsets paired with named transitions;
//! the controller owns what every transition does to the pipeline state.

use chrono::Duration;

use crate::types::Identity;

/// How long the door takes to swing fully open, in milliseconds
pub const DOOR_SWING_MS: i64 = 1000;

/// A named state change applied at one point of a timeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transition {
    /// Device reads the palm and the pipeline starts processing
    BeginScan,
    /// Device resolves the palm to a user name
    IdentifyUser,
    /// Middleware receives the device's TCP payload
    ReceiveTcp,
    /// Middleware converts the TCP payload to an HTTP request
    ConvertToHttp,
    /// School app receives the identification request and opens a lookup
    ReceiveAppRequest,
    /// School app recognizes a security agent and grants access outright
    GrantSecurityAccess,
    /// School app starts checking the teacher's schedule
    CheckTeacherSchedule,
    /// School app finds the scheduled class and starts a session
    StartClassSession,
    /// School app starts checking for an active session
    CheckActiveSession,
    /// School app verifies the student against the active session, or denies
    VerifyEnrollment,
    /// School app records the student as present
    MarkAttendance,
    /// School app sends the door open command back down the pipeline
    SendDoorCommand,
    /// Middleware converts the door command back to TCP
    RelayDoorCommand,
    /// Device receives the door command and the door cycle begins
    DeliverDoorCommand,
    /// Scan finishes and the pipeline returns to idle
    CompleteScan,
    /// Door starts swinging open
    StartDoorOpening,
    /// Door reaches fully open
    CompleteDoorOpening,
    /// Door swings shut after the relay hold
    CloseDoor,
}

impl Transition {
    /// Check whether this transition belongs to a door cycle
    pub fn is_door_step(&self) -> bool {
        matches!(
            self,
            Transition::StartDoorOpening | Transition::CompleteDoorOpening | Transition::CloseDoor
        )
    }
}

/// One scheduled entry of a timeline script
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimelineStep {
    /// Offset from the start of the script
    pub offset: Duration,
    /// Transition applied when the offset is reached
    pub transition: Transition,
}

impl TimelineStep {
    /// Create a step at the given offset
    pub fn new(offset: Duration, transition: Transition) -> Self {
        Self { offset, transition }
    }

    /// Create a step at a millisecond offset
    pub fn at_ms(offset_ms: i64, transition: Transition) -> Self {
        Self::new(Duration::milliseconds(offset_ms), transition)
    }
}

/// Build the scan script for the given identity
///
/// Steps sharing an offset are applied in list order. The attendance
/// mark shares its instant with the middleware relay and lands after it.
pub fn scan_script(identity: Identity) -> Vec<TimelineStep> {
    let mut script = vec![
        TimelineStep::at_ms(0, Transition::BeginScan),
        TimelineStep::at_ms(1000, Transition::IdentifyUser),
        TimelineStep::at_ms(1500, Transition::ReceiveTcp),
        TimelineStep::at_ms(2000, Transition::ConvertToHttp),
        TimelineStep::at_ms(2500, Transition::ReceiveAppRequest),
    ];

    match identity {
        Identity::Security => {
            script.push(TimelineStep::at_ms(3000, Transition::GrantSecurityAccess));
        }
        Identity::Teacher => {
            script.push(TimelineStep::at_ms(3000, Transition::CheckTeacherSchedule));
            script.push(TimelineStep::at_ms(4000, Transition::StartClassSession));
        }
        Identity::Student => {
            script.push(TimelineStep::at_ms(3000, Transition::CheckActiveSession));
            script.push(TimelineStep::at_ms(4000, Transition::VerifyEnrollment));
        }
    }

    script.push(TimelineStep::at_ms(4500, Transition::SendDoorCommand));
    script.push(TimelineStep::at_ms(5000, Transition::RelayDoorCommand));
    if identity == Identity::Student {
        script.push(TimelineStep::at_ms(5000, Transition::MarkAttendance));
    }
    script.push(TimelineStep::at_ms(5500, Transition::DeliverDoorCommand));
    script.push(TimelineStep::at_ms(6000, Transition::CompleteScan));

    script
}

/// Build the door cycle script for the given relay hold duration
pub fn door_script(relay_hold: Duration) -> Vec<TimelineStep> {
    vec![
        TimelineStep::at_ms(0, Transition::StartDoorOpening),
        TimelineStep::at_ms(DOOR_SWING_MS, Transition::CompleteDoorOpening),
        TimelineStep::new(
            Duration::milliseconds(DOOR_SWING_MS) + relay_hold,
            Transition::CloseDoor,
        ),
    ]
}
