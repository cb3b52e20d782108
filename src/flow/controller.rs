//! Flow controller
//!
//! This module contains the single owner of the access pipeline. The
//! controller schedules timeline steps against the virtual clock, applies
//! them in due order, and records every transcript event. Nothing else
//! mutates the pipeline state.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashSet};

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info, instrument, warn};

use crate::events::{EventLog, FlowEvent};
use crate::flow::clock::SimulationClock;
use crate::flow::error::{FlowError, FlowResult};
use crate::flow::state::{FlowSnapshot, FlowState};
use crate::flow::statistics::FlowStatistics;
use crate::flow::timeline::{door_script, scan_script, Transition};
use crate::school::{AttendanceLog, ClassSession};
use crate::types::{DoorPhase, EventCategory, FlowConfig, Identity, LinkPhase, ScanId};

/// A transition waiting for its due instant
#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingStep {
    /// Absolute simulated instant the step fires at
    due: DateTime<Utc>,
    /// Insertion order, breaks ties between steps due at the same instant
    seq: u64,
    /// Scan the step belongs to, None for door cycle steps
    scan_id: Option<ScanId>,
    /// Transition applied when the step fires
    transition: Transition,
}

impl Ord for PendingStep {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.due.cmp(&other.due).then_with(|| self.seq.cmp(&other.seq))
    }
}

impl PartialOrd for PendingStep {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Bookkeeping for the scan currently owning the pipeline
#[derive(Debug, Clone)]
struct ActiveScan {
    /// Identifier handed back to the caller
    id: ScanId,
    /// Identity the palm resolved to
    identity: Identity,
    /// Display name used in status lines and events
    display_name: String,
}

/// Single-owner state machine driving the access pipeline
///
/// All mutation goes through an ordered step queue: [`scan`] and
/// [`trigger_door`] enqueue scripts, and the advance methods apply the
/// steps that have come due. Steps sharing a due instant fire in the
/// order they were scheduled.
///
/// [`scan`]: FlowController::scan
/// [`trigger_door`]: FlowController::trigger_door
#[derive(Debug)]
pub struct FlowController {
    /// Configuration for the flow
    config: FlowConfig,
    /// Virtual clock the timeline runs against
    clock: SimulationClock,
    /// Observable pipeline state
    state: FlowState,
    /// Transcript of pipeline events
    events: EventLog,
    /// Attendance records collected by the school app
    attendance: AttendanceLog,
    /// Counters for the run
    statistics: FlowStatistics,
    /// Steps waiting for their due instant
    queue: BinaryHeap<Reverse<PendingStep>>,
    /// Monotonic insertion counter for tie-breaking
    next_seq: u64,
    /// Scan currently owning the pipeline, if any
    active_scan: Option<ActiveScan>,
    /// Scans whose remaining queued steps must be dropped
    cancelled_scans: HashSet<ScanId>,
    /// Whether a door cycle is in flight
    door_cycle_active: bool,
}

impl FlowController {
    /// Create a new controller with a fresh clock at the default epoch
    #[instrument(skip(config), fields(scenario = %config.scenario, time_scale = config.time_scale))]
    pub fn new(config: FlowConfig) -> Self {
        Self::with_clock(config, SimulationClock::new())
    }

    /// Create a new controller driving the given clock
    pub fn with_clock(config: FlowConfig, clock: SimulationClock) -> Self {
        info!("Initializing flow controller at {}", clock.now());

        Self {
            config,
            clock,
            state: FlowState::new(),
            events: EventLog::new(),
            attendance: AttendanceLog::new(),
            statistics: FlowStatistics::new(),
            queue: BinaryHeap::new(),
            next_seq: 0,
            active_scan: None,
            cancelled_scans: HashSet::new(),
            door_cycle_active: false,
        }
    }

    /// Get the configuration the controller runs with
    pub fn config(&self) -> &FlowConfig {
        &self.config
    }

    /// Get the observable pipeline state
    pub fn state(&self) -> &FlowState {
        &self.state
    }

    /// Get the transcript of recorded events
    pub fn events(&self) -> &EventLog {
        &self.events
    }

    /// Get the attendance records collected so far
    pub fn attendance(&self) -> &AttendanceLog {
        &self.attendance
    }

    /// Get the class session started by the latest teacher scan, if any
    pub fn session(&self) -> Option<&ClassSession> {
        self.state.session.as_ref()
    }

    /// End the active class session
    ///
    /// Later student scans are denied until a teacher scan starts a new
    /// session. A scan already past its session check keeps its grant.
    /// Returns true when an active session was ended.
    pub fn end_session(&mut self) -> bool {
        match self.state.session.as_mut() {
            Some(session) if session.is_active() => {
                info!("Ending session {}", session.summary());
                session.end();
                true
            }
            _ => false,
        }
    }

    /// Get the counters for the run
    pub fn statistics(&self) -> &FlowStatistics {
        &self.statistics
    }

    /// The current simulated instant
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Capture the pipeline state at the current simulated instant
    pub fn snapshot(&self) -> FlowSnapshot {
        FlowSnapshot::capture(self.clock.now(), &self.state)
    }

    /// Number of steps still waiting in the queue
    pub fn pending_steps(&self) -> usize {
        self.queue.len()
    }

    /// Check whether a scan currently owns the pipeline
    pub fn scan_in_progress(&self) -> bool {
        self.active_scan.is_some()
    }

    /// Check whether a door cycle is in flight
    pub fn door_cycle_in_progress(&self) -> bool {
        self.door_cycle_active
    }

    /// The due instant of the next queued step, if any
    pub fn next_deadline(&self) -> Option<DateTime<Utc>> {
        self.queue.peek().map(|Reverse(step)| step.due)
    }

    /// Process a palm scan for the given identity
    ///
    /// Schedules the identity's full timeline and applies every step due
    /// at the current instant before returning. While a scan is in
    /// flight, further scans are rejected rather than interleaved.
    #[instrument(skip(self), fields(identity = %identity))]
    pub fn scan(&mut self, identity: Identity) -> FlowResult<ScanId> {
        if let Some(active) = &self.active_scan {
            let in_flight = active.id;
            self.statistics.record_scan_rejected();
            warn!("Scan rejected, scan {} still in flight", in_flight);
            return Err(FlowError::scan_in_flight(in_flight));
        }

        let scan_id = ScanId::new();
        let display_name = self.config.display_name(identity).to_string();
        info!("Scan {} accepted for {} ({})", scan_id, display_name, identity);

        self.active_scan = Some(ActiveScan { id: scan_id, identity, display_name });
        self.statistics.record_scan_started();

        let base = self.clock.now();
        for step in scan_script(identity) {
            self.schedule(base + self.scaled(step.offset), Some(scan_id), step.transition);
        }

        // Zero-offset steps fire at the instant the scan is requested
        self.advance_to(base);

        Ok(scan_id)
    }

    /// Open the door without a scan
    ///
    /// Rejected while a door cycle is already in flight. A scan in
    /// progress does not block the request; its own door command later
    /// finds the door busy and leaves the running cycle alone.
    #[instrument(skip(self))]
    pub fn trigger_door(&mut self) -> FlowResult<()> {
        if self.door_cycle_active {
            self.statistics.record_door_request_rejected();
            warn!("Door request rejected, cycle already in progress");
            return Err(FlowError::DoorCycleInProgress);
        }

        info!("Manual door cycle requested");
        let base = self.clock.now();
        self.begin_door_cycle();
        self.advance_to(base);

        Ok(())
    }

    /// Advance simulated time to the target instant, applying every step
    /// due on the way
    ///
    /// Steps are applied at their own due instants in schedule order.
    /// Targets at or before the current instant still apply steps that
    /// are already due.
    pub fn advance_to(&mut self, target: DateTime<Utc>) {
        while let Some(Reverse(step)) = self.queue.peek() {
            if step.due > target {
                break;
            }
            if let Some(Reverse(step)) = self.queue.pop() {
                self.clock.advance_to(step.due);
                self.apply_step(step);
            }
        }

        self.clock.advance_to(target);
        self.statistics.set_simulated_duration(self.clock.elapsed());

        if self.queue.is_empty() {
            self.cancelled_scans.clear();
        }
    }

    /// Advance simulated time by the given duration
    pub fn advance_by(&mut self, duration: Duration) {
        self.advance_to(self.clock.now() + duration);
    }

    /// Drain the queue completely, returning the simulated time covered
    #[instrument(skip(self))]
    pub fn run_until_idle(&mut self) -> Duration {
        let start = self.clock.now();

        while let Some(deadline) = self.next_deadline() {
            self.advance_to(deadline);
        }

        let elapsed = self.clock.now() - start;
        debug!("Queue drained after {}ms of simulated time", elapsed.num_milliseconds());
        elapsed
    }

    /// Put a step on the queue
    fn schedule(&mut self, due: DateTime<Utc>, scan_id: Option<ScanId>, transition: Transition) {
        let step = PendingStep { due, seq: self.next_seq, scan_id, transition };
        self.next_seq += 1;
        debug!("Scheduled {:?} at {}", transition, due);
        self.queue.push(Reverse(step));
    }

    /// Scale a script offset by the configured time scale
    fn scaled(&self, duration: Duration) -> Duration {
        if (self.config.time_scale - 1.0).abs() < f64::EPSILON {
            return duration;
        }
        let millis = duration.num_milliseconds() as f64 * self.config.time_scale;
        Duration::milliseconds(millis as i64)
    }

    /// Start a door cycle unless one is already in flight
    fn begin_door_cycle(&mut self) {
        if self.door_cycle_active {
            warn!("Door cycle already in progress, leaving the running cycle alone");
            return;
        }

        self.door_cycle_active = true;
        self.statistics.record_door_cycle();

        let base = self.clock.now();
        for step in door_script(self.config.door_relay_hold()) {
            self.schedule(base + self.scaled(step.offset), None, step.transition);
        }
    }

    /// Apply a popped step, dropping it if its scan was cancelled
    fn apply_step(&mut self, step: PendingStep) {
        if let Some(scan_id) = step.scan_id {
            if self.cancelled_scans.contains(&scan_id) {
                debug!("Skipping {:?} for cancelled scan {}", step.transition, scan_id);
                return;
            }
        }

        debug!("Applying {:?} at {}", step.transition, self.clock.now());

        if step.transition.is_door_step() {
            self.apply_door_transition(step.transition);
        } else if let Some(active) = self.active_scan.clone() {
            self.apply_scan_transition(step.transition, &active);
        } else {
            warn!("Dropping {:?}, no scan in flight", step.transition);
        }
    }

    /// Apply one scan timeline transition to the pipeline
    fn apply_scan_transition(&mut self, transition: Transition, active: &ActiveScan) {
        let scan_id = Some(active.id);

        match transition {
            Transition::BeginScan => {
                self.state.processing = true;
                self.state.scan_status = "Identifying User...".to_string();
                self.state.identified_user.clear();
                self.record_event(
                    format!("Device: Scanning palm for {}", active.display_name),
                    EventCategory::Device,
                    scan_id,
                );
            }
            Transition::IdentifyUser => {
                self.state.scan_status = format!("User Identified: {}", active.display_name);
                self.state.identified_user = active.display_name.clone();
                self.state.link = LinkPhase::DeviceToMiddleware;
                self.record_event(
                    format!("Device: User '{}' identified", active.display_name),
                    EventCategory::Device,
                    scan_id,
                );
            }
            Transition::ReceiveTcp => {
                self.state.middleware_step = "Processing TCP Data...".to_string();
                self.record_event(
                    "Middleware: TCP received, converting...",
                    EventCategory::Middleware,
                    scan_id,
                );
            }
            Transition::ConvertToHttp => {
                self.state.middleware_step = "Converting to HTTP Request...".to_string();
                self.state.link = LinkPhase::MiddlewareToApp;
                self.record_event(
                    "Middleware: Converting TCP to HTTP",
                    EventCategory::Middleware,
                    scan_id,
                );
            }
            Transition::ReceiveAppRequest => {
                self.state.app_step = format!("Processing {} request...", active.identity);
                self.state.db_lookup_active = true;
                self.record_event(
                    format!("Custom App: Received {} identification", active.identity),
                    EventCategory::App,
                    scan_id,
                );
            }
            Transition::GrantSecurityAccess => {
                self.state.app_step = "User is Security Agent. Opening door.".to_string();
                self.state.db_lookup_active = false;
                self.record_event(
                    "Custom App: Security access granted",
                    EventCategory::App,
                    scan_id,
                );
            }
            Transition::CheckTeacherSchedule => {
                self.state.app_step = "User is Teacher. Checking schedule...".to_string();
                self.record_event(
                    "Custom App: Checking teacher schedule",
                    EventCategory::App,
                    scan_id,
                );
            }
            Transition::StartClassSession => {
                let session = ClassSession::new(
                    self.config.course.clone(),
                    self.config.room.clone(),
                    active.display_name.clone(),
                    self.clock.now(),
                );
                self.state.app_step =
                    format!("Class Scheduled: {}. Starting session...", session.summary());
                self.state.db_lookup_active = false;
                let message = format!(
                    "Custom App: {} session started by {}",
                    session.course, session.teacher
                );
                info!("Session started: {}", session.summary());
                self.state.session = Some(session);
                self.record_event(message, EventCategory::App, scan_id);
            }
            Transition::CheckActiveSession => {
                self.state.app_step = "User is Student. Checking for active session...".to_string();
                self.record_event(
                    "Custom App: Checking for active session",
                    EventCategory::App,
                    scan_id,
                );
            }
            Transition::VerifyEnrollment => match self.state.session.clone() {
                Some(session) if session.is_active() => {
                    self.state.app_step = format!(
                        "Active session ({}) found, initiated by {}. Verifying {}'s enrollment...",
                        session.course, session.teacher, active.display_name
                    );
                    self.record_event(
                        format!("Custom App: Active session found - {}", session.course),
                        EventCategory::App,
                        scan_id,
                    );
                }
                _ => {
                    self.record_event(
                        "Custom App: No active session - Access denied",
                        EventCategory::App,
                        scan_id,
                    );
                    self.deny_active_scan(active);
                }
            },
            Transition::MarkAttendance => {
                self.state.app_step =
                    format!("Student {} is enrolled. Marking present.", active.display_name);
                self.state.db_lookup_active = false;
                self.attendance.mark_present(active.display_name.clone(), self.clock.now());
                self.record_event(
                    format!("Custom App: {} enrollment verified", active.display_name),
                    EventCategory::App,
                    scan_id,
                );
            }
            Transition::SendDoorCommand => {
                self.state.link = LinkPhase::AppToMiddleware;
                self.record_event(
                    "Custom App: Sending door open command",
                    EventCategory::App,
                    scan_id,
                );
            }
            Transition::RelayDoorCommand => {
                self.state.middleware_step = "Received door command. Converting to TCP...".to_string();
                self.state.link = LinkPhase::MiddlewareToDevice;
                self.record_event(
                    "Middleware: Converting HTTP to TCP",
                    EventCategory::Middleware,
                    scan_id,
                );
            }
            Transition::DeliverDoorCommand => {
                self.state.link = LinkPhase::Idle;
                self.record_event(
                    "Device: Received door open command",
                    EventCategory::Device,
                    scan_id,
                );
                self.begin_door_cycle();
            }
            Transition::CompleteScan => {
                if active.identity == Identity::Student {
                    let course = self
                        .state
                        .session
                        .as_ref()
                        .filter(|session| session.is_active())
                        .map(|session| session.course.clone());
                    if let Some(course) = course {
                        self.record_event(
                            format!(
                                "Student {} marked present for {}",
                                active.display_name, course
                            ),
                            EventCategory::App,
                            scan_id,
                        );
                    }
                }
                self.state.reset_to_idle();
                self.active_scan = None;
                self.statistics.record_scan_completed();
                info!("Scan {} completed for {}", active.id, active.display_name);
            }
            Transition::StartDoorOpening
            | Transition::CompleteDoorOpening
            | Transition::CloseDoor => {
                self.apply_door_transition(transition);
            }
        }
    }

    /// Apply one door cycle transition
    fn apply_door_transition(&mut self, transition: Transition) {
        match transition {
            Transition::StartDoorOpening => {
                self.state.door = DoorPhase::Opening;
                self.record_event("Door: Opening...", EventCategory::Door, None);
            }
            Transition::CompleteDoorOpening => {
                self.state.door = DoorPhase::Open;
                self.record_event("Door: Opened", EventCategory::Door, None);
            }
            Transition::CloseDoor => {
                self.state.door = DoorPhase::Closed;
                self.door_cycle_active = false;
                self.record_event("Door: Closed", EventCategory::Door, None);
            }
            _ => warn!("Not a door transition: {:?}", transition),
        }
    }

    /// Deny the active scan and drop its remaining queued steps
    fn deny_active_scan(&mut self, active: &ActiveScan) {
        warn!(
            "Access denied for {} ({}), cancelling remaining steps",
            active.display_name, active.identity
        );
        self.cancelled_scans.insert(active.id);
        self.active_scan = None;
        self.state.reset_to_idle();
        self.statistics.record_scan_denied();
    }

    /// Record a transcript event at the current simulated instant
    fn record_event(
        &mut self,
        message: impl Into<String>,
        category: EventCategory,
        scan_id: Option<ScanId>,
    ) {
        let event = FlowEvent::new(self.clock.now(), message, category, scan_id);
        self.events.record(event);
    }
}
