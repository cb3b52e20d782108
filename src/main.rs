// Palm Access Simulator - Main Entry Point
//
// You can run it via Cargo:
//
// ```console
// $ cargo build --release
// $ ./target/release/palm-access-simulator
// ```
//
// Or with custom configuration:
//
// ```console
// $ ./target/release/palm-access-simulator --scenario full-demo --time-scale 0.5 --verbose
// ```

use anyhow::Context;
use clap::Parser;
use palm_access_simulator::flow::{FlowController, LoggingConfig};
use palm_access_simulator::types::config::CliArgs;
use palm_access_simulator::types::{FlowConfig, Identity, Scenario};
use std::process;
use std::thread;
use tracing::{error, info};

fn main() {
    // Parse CLI arguments first to check for special flags
    let args = CliArgs::parse();

    // Handle special CLI flags that don't require full initialization
    if args.print_config {
        let default_config = FlowConfig::default();
        match default_config.print_json() {
            Ok(json) => {
                println!("{}", json);
                return;
            }
            Err(e) => {
                eprintln!("Failed to serialize default configuration: {}", e);
                process::exit(1);
            }
        }
    }

    // Initialize logging based on CLI flags
    let logging_result = if args.debug {
        LoggingConfig::init_debug()
    } else if args.verbose {
        LoggingConfig::init_verbose()
    } else if args.quiet {
        LoggingConfig::init_quiet()
    } else {
        // Default: minimal logging for normal users
        LoggingConfig::new().init()
    };

    if let Err(e) = logging_result {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    info!("Starting Palm Access Simulator");

    // Load configuration from CLI arguments and optional config file
    let config = match FlowConfig::from_cli_args(args.clone()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    // Validate configuration
    if let Err(e) = config.validate() {
        error!("Configuration validation failed: {}", e);
        process::exit(1);
    }

    info!("Configuration loaded and validated successfully");

    // Handle dry run mode
    if args.dry_run {
        eprintln!("Configuration validation successful!");
        eprintln!("Dry run mode - the flow will not be executed.");
        print_configuration_summary(&config);
        return;
    }

    // Print startup banner and configuration
    print_startup_banner(&config);

    // Run the flow
    info!("Starting flow replay");
    if let Err(e) = run_flow(config) {
        error!("Flow replay failed: {:#}", e);
        process::exit(1);
    }

    info!("Palm Access Simulator completed successfully");
}

/// Replay the configured scenario and report what happened
fn run_flow(config: FlowConfig) -> anyhow::Result<()> {
    let scenario = config.get_scenario().map_err(anyhow::Error::msg)?;
    let format = config.get_output_format().map_err(anyhow::Error::msg)?;
    let real_time = config.real_time;
    let snapshots = config.snapshots;
    let events_output = config.events_output.clone();

    let mut controller = FlowController::new(config);

    for identity in scenario.scan_sequence() {
        run_scan(&mut controller, identity, real_time, snapshots);
    }

    // The full demo closes with a manual door trigger and a rejected
    // duplicate press
    if scenario == Scenario::FullDemo {
        run_manual_door_demo(&mut controller, real_time)?;
    }

    // Real-time mode already streamed the transcript line by line
    if !real_time {
        print_transcript(&controller);
    }
    print_attendance(&controller);
    print_session(&controller);

    eprintln!();
    eprintln!("{}", controller.statistics().summary());

    if let Some(path) = events_output {
        controller
            .events()
            .write_to_file(&path, format)
            .with_context(|| format!("Failed to write event transcript to '{}'", path))?;
        eprintln!("Event transcript written to: {}", path);
        info!("Event transcript written to: {}", path);
    }

    Ok(())
}

/// Run a single scan for the given identity and drain its timeline
fn run_scan(controller: &mut FlowController, identity: Identity, real_time: bool, snapshots: bool) {
    let display_name = controller.config().display_name(identity).to_string();
    eprintln!();
    eprintln!("Scanning palm of {} ({})...", display_name, identity);

    let printed = controller.events().len();
    match controller.scan(identity) {
        Ok(scan_id) => info!("Scan {} accepted", scan_id),
        Err(e) => {
            eprintln!("Scan rejected: {}", e);
            return;
        }
    }

    drain(controller, real_time, printed);

    if snapshots {
        match controller.snapshot().to_json() {
            Ok(json) => println!("{}", json),
            Err(e) => error!("Failed to serialize snapshot: {}", e),
        }
    }
}

/// Trigger the door by hand and show that a second press is rejected
fn run_manual_door_demo(controller: &mut FlowController, real_time: bool) -> anyhow::Result<()> {
    eprintln!();
    eprintln!("Triggering the door manually...");
    let printed = controller.events().len();
    controller.trigger_door().context("Manual door trigger failed")?;

    if let Err(e) = controller.trigger_door() {
        eprintln!("Second door request rejected: {}", e);
    }

    drain(controller, real_time, printed);
    Ok(())
}

/// Apply every remaining timeline step, instantly or paced by the wall clock
///
/// Real-time mode prints each event as its step fires, so the console
/// reads like the live device panel.
fn drain(controller: &mut FlowController, real_time: bool, printed: usize) {
    if !real_time {
        controller.run_until_idle();
        return;
    }

    let mut printed = print_events_since(controller, printed);

    // Sleep up to each deadline so the replay takes as long as the
    // simulated flow
    while let Some(deadline) = controller.next_deadline() {
        let wait = deadline - controller.now();
        if let Ok(wait) = wait.to_std() {
            thread::sleep(wait);
        }
        controller.advance_to(deadline);
        printed = print_events_since(controller, printed);
    }
}

/// Print transcript lines recorded after `from`, returning the new length
fn print_events_since(controller: &FlowController, from: usize) -> usize {
    let events = controller.events().events();
    for event in &events[from..] {
        println!(
            "[{}] [{}] {}",
            event.timestamp.format("%H:%M:%S%.3f"),
            event.category,
            event.message
        );
    }
    events.len()
}

/// Print startup banner and configuration summary
fn print_startup_banner(config: &FlowConfig) {
    eprintln!("Palm Access Simulator");
    eprintln!("=====================");
    eprintln!("A timed replay of the palm vein access control pipeline");
    eprintln!();

    print_configuration_summary(config);
}

/// Print configuration summary
fn print_configuration_summary(config: &FlowConfig) {
    eprintln!("Configuration:");
    eprintln!("  Scenario: {}", config.scenario);
    if let Ok(scenario) = config.get_scenario() {
        eprintln!("    {}", scenario.description());
        let scans: Vec<String> =
            scenario.scan_sequence().iter().map(|identity| identity.to_string()).collect();
        eprintln!("    Scans: {}", scans.join(", "));
    }
    eprintln!("  Security Name: {}", config.security_name);
    eprintln!("  Teacher Name: {}", config.teacher_name);
    eprintln!("  Student Name: {}", config.student_name);
    eprintln!("  Course: {} ({})", config.course, config.room);
    eprintln!("  Door Hold: {} ms", config.door_relay_hold_ms);
    eprintln!("  Time Scale: {}", config.time_scale);
    eprintln!("  Replay Mode: {}", if config.real_time { "real-time" } else { "instant" });
    eprintln!("  Output Format: {}", config.output_format);
    if let Some(path) = &config.events_output {
        eprintln!("  Events Output: {}", path);
    }
    if config.snapshots {
        eprintln!("  Snapshots: enabled");
    }
    eprintln!();
}

/// Print the full event transcript to stdout
fn print_transcript(controller: &FlowController) {
    eprintln!();
    eprintln!("Event Transcript:");
    eprintln!("=================");
    for event in controller.events().events() {
        println!(
            "[{}] [{}] {}",
            event.timestamp.format("%H:%M:%S%.3f"),
            event.category,
            event.message
        );
    }
}

/// Print attendance records, if any were collected
fn print_attendance(controller: &FlowController) {
    let attendance = controller.attendance();
    if attendance.is_empty() {
        return;
    }

    eprintln!();
    eprintln!("Attendance:");
    eprintln!("===========");
    for entry in attendance.entries() {
        println!(
            "{} - {} at {}",
            entry.name,
            entry.status,
            entry.timestamp.format("%H:%M:%S")
        );
    }
}

/// Print the class session left active after the replay, if any
fn print_session(controller: &FlowController) {
    if let Some(session) = &controller.state().session {
        if session.is_active() {
            eprintln!();
            eprintln!(
                "Class session still active: {} (started by {})",
                session.summary(),
                session.teacher
            );
        }
    }
}
