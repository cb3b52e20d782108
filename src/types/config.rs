//! Configuration structures for the palm access simulator
//!
//! This module contains the flow configuration structure and validation logic
//! used to control the identities, timings, and output of the access flow.

use super::{Identity, OutputFormat, Scenario};
use chrono::Duration;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Command line arguments structure
#[derive(Debug, Clone, Parser)]
#[command(
    name = "palm-access-simulator",
    version = "0.1.0",
    about = "Palm Access Simulator - Replays the palm vein access control flow",
    long_about = "Replays the timed palm vein access control flow between a scanner device, a TCP/HTTP middleware, a school attendance application, and a door actuator, driven entirely by a virtual clock.

EXAMPLES:
    # Run the default teacher-then-student scenario instantly
    palm-access-simulator

    # Replay with wall-clock pacing
    palm-access-simulator --real-time

    # Use a configuration file
    palm-access-simulator --config config.json

    # Pick a scenario and slow the timeline down
    palm-access-simulator --scenario full-demo --time-scale 2.0

    # Export the event transcript
    palm-access-simulator --events-output transcript.csv --output-format csv

    # Generate configuration template
    palm-access-simulator --print-config > my-config.json

    # Validate configuration without running
    palm-access-simulator --config my-config.json --dry-run

CONFIGURATION:
    Configuration can be provided via:
    1. Command line arguments (highest priority)
    2. Configuration file (--config flag)
    3. Default values (lowest priority)

    Supported configuration file formats: JSON (.json)

    Use --print-config to generate a template configuration file."
)]
pub struct CliArgs {
    /// Configuration file path (JSON format)
    #[arg(
        short,
        long,
        help = "Configuration file path (JSON format)",
        long_help = "Path to a JSON configuration file. CLI arguments will override file settings."
    )]
    pub config: Option<String>,

    /// Scenario to replay
    #[arg(
        long,
        help = "Scenario to replay",
        long_help = "Scan sequence to replay. Supported: security-only, teacher-only, student-denied, teacher-then-student, full-demo. Default: teacher-then-student"
    )]
    pub scenario: Option<String>,

    /// Multiplier applied to every timeline offset
    #[arg(
        long,
        help = "Timeline offset multiplier",
        long_help = "Multiplier applied to every timeline offset. 0.5 halves every delay, 2.0 doubles them. Must be a positive number. Default: 1.0"
    )]
    pub time_scale: Option<f64>,

    /// How long the door stays fully open, in milliseconds
    #[arg(
        long,
        help = "Door hold time in milliseconds",
        long_help = "How long the door stays fully open before closing, in milliseconds. Must be greater than 0. Default: 3000"
    )]
    pub door_relay_hold_ms: Option<u64>,

    /// Display name for the security agent
    #[arg(long, help = "Display name for the security agent")]
    pub security_name: Option<String>,

    /// Display name for the teacher
    #[arg(long, help = "Display name for the teacher")]
    pub teacher_name: Option<String>,

    /// Display name for the student
    #[arg(long, help = "Display name for the student")]
    pub student_name: Option<String>,

    /// Course name used when a class session starts
    #[arg(long, help = "Course name for the class session")]
    pub course: Option<String>,

    /// Room name used when a class session starts
    #[arg(long, help = "Room name for the class session")]
    pub room: Option<String>,

    /// Output path for the event transcript
    #[arg(long, help = "Output path for the event transcript file")]
    pub events_output: Option<String>,

    /// Output format for the event transcript
    #[arg(
        long,
        help = "Output format (json or csv)",
        long_help = "Output format for the event transcript export. Supported formats: json, csv. Default: json"
    )]
    pub output_format: Option<String>,

    /// Pace the replay against the wall clock
    #[arg(
        long,
        help = "Pace the replay against the wall clock",
        long_help = "Sleep between timeline steps so the replay takes as long as the simulated flow. Without this flag the whole flow runs instantly."
    )]
    pub real_time: bool,

    /// Print a state snapshot after each scan
    #[arg(long, help = "Print a JSON state snapshot after each scan")]
    pub snapshots: bool,

    /// Enable verbose logging
    #[arg(short, long, help = "Enable verbose logging")]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(short, long, help = "Enable debug logging")]
    pub debug: bool,

    /// Only log errors
    #[arg(short, long, help = "Only log errors")]
    pub quiet: bool,

    /// Dry run mode - validate configuration without running the flow
    #[arg(long, help = "Validate configuration without running the flow")]
    pub dry_run: bool,

    /// Print default configuration and exit
    #[arg(long, help = "Print default configuration in JSON format and exit")]
    pub print_config: bool,
}

/// Configuration file structure (allows partial configuration)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigFile {
    /// Display name for the security agent
    pub security_name: Option<String>,

    /// Display name for the teacher
    pub teacher_name: Option<String>,

    /// Display name for the student
    pub student_name: Option<String>,

    /// Course name used when a class session starts
    pub course: Option<String>,

    /// Room name used when a class session starts
    pub room: Option<String>,

    /// How long the door stays fully open, in milliseconds
    pub door_relay_hold_ms: Option<u64>,

    /// Multiplier applied to every timeline offset
    pub time_scale: Option<f64>,

    /// Scenario to replay
    pub scenario: Option<String>,

    /// Pace the replay against the wall clock
    pub real_time: Option<bool>,

    /// Output path for the event transcript
    pub events_output: Option<String>,

    /// Output format for the event transcript
    pub output_format: Option<String>,

    /// Print a state snapshot after each scan
    pub snapshots: Option<bool>,
}

/// Configuration for the palm access flow
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowConfig {
    /// Display name for the security agent
    pub security_name: String,

    /// Display name for the teacher
    pub teacher_name: String,

    /// Display name for the student
    pub student_name: String,

    /// Course name used when a class session starts
    pub course: String,

    /// Room name used when a class session starts
    pub room: String,

    /// How long the door stays fully open, in milliseconds
    pub door_relay_hold_ms: u64,

    /// Multiplier applied to every timeline offset
    pub time_scale: f64,

    /// Scenario to replay
    pub scenario: String,

    /// Pace the replay against the wall clock
    pub real_time: bool,

    /// Output path for the event transcript
    pub events_output: Option<String>,

    /// Output format for the event transcript
    pub output_format: String,

    /// Print a state snapshot after each scan
    pub snapshots: bool,
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    /// Configuration file read error
    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),

    /// JSON parsing error
    #[error("Failed to parse JSON configuration: {0}")]
    JsonError(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("Failed to parse TOML configuration: {0}")]
    TomlError(String),

    /// Unsupported configuration file format
    #[error("Unsupported configuration file format: {0} (supported: .json, .toml)")]
    UnsupportedFormat(String),
}

/// Validation errors for flow configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    /// A required text field is empty
    #[error("{field} must not be empty")]
    EmptyField {
        /// Name of the empty field
        field: String,
    },

    /// Time scale is not a positive number
    #[error("Time scale must be a positive number, got {0}")]
    InvalidTimeScale(f64),

    /// Door hold time is invalid
    #[error("Door hold time must be greater than 0 ms, got {0}")]
    InvalidDoorRelayHold(u64),

    /// Scenario name is not recognized
    #[error("Unknown scenario: {0} (supported: security-only, teacher-only, student-denied, teacher-then-student, full-demo)")]
    UnknownScenario(String),

    /// Output format is not recognized
    #[error("Unknown output format: {0} (supported: json, csv)")]
    UnknownOutputFormat(String),
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            security_name: "Agent Smith".to_string(),
            teacher_name: "AHMED".to_string(),
            student_name: "MOHAMMED".to_string(),
            course: "Biology 101".to_string(),
            room: "Room 301".to_string(),
            door_relay_hold_ms: 3000,
            time_scale: 1.0,
            scenario: "teacher-then-student".to_string(),
            real_time: false,
            events_output: None,
            output_format: "json".to_string(),
            snapshots: false,
        }
    }
}

impl FlowConfig {
    /// Create a new configuration from command line arguments and optional config file
    pub fn from_args() -> Result<Self, ConfigError> {
        let args = CliArgs::parse();
        Self::from_cli_args(args)
    }

    /// Create configuration from parsed CLI arguments
    pub fn from_cli_args(args: CliArgs) -> Result<Self, ConfigError> {
        // Start with default configuration
        let mut config = Self::default();

        // Load from config file if specified
        if let Some(config_path) = &args.config {
            config = Self::from_file(config_path)?;
        }

        // Override with command line arguments (CLI takes precedence)
        Self::apply_cli_overrides(&mut config, args);

        Ok(config)
    }

    /// Load configuration from a file (JSON or TOML)
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }

        let content = fs::read_to_string(path)?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => {
                let config_file: ConfigFile = serde_json::from_str(&content)?;
                Ok(Self::from_config_file(config_file))
            }
            Some("toml") => {
                // Add TOML support if needed in the future
                Err(ConfigError::TomlError("TOML support not yet implemented".to_string()))
            }
            Some(ext) => Err(ConfigError::UnsupportedFormat(ext.to_string())),
            None => Err(ConfigError::UnsupportedFormat("no extension".to_string())),
        }
    }

    /// Create configuration from a config file, merging with defaults
    fn from_config_file(config_file: ConfigFile) -> Self {
        let defaults = Self::default();

        Self {
            security_name: config_file.security_name.unwrap_or(defaults.security_name),
            teacher_name: config_file.teacher_name.unwrap_or(defaults.teacher_name),
            student_name: config_file.student_name.unwrap_or(defaults.student_name),
            course: config_file.course.unwrap_or(defaults.course),
            room: config_file.room.unwrap_or(defaults.room),
            door_relay_hold_ms: config_file
                .door_relay_hold_ms
                .unwrap_or(defaults.door_relay_hold_ms),
            time_scale: config_file.time_scale.unwrap_or(defaults.time_scale),
            scenario: config_file.scenario.unwrap_or(defaults.scenario),
            real_time: config_file.real_time.unwrap_or(defaults.real_time),
            events_output: config_file.events_output.or(defaults.events_output),
            output_format: config_file.output_format.unwrap_or(defaults.output_format),
            snapshots: config_file.snapshots.unwrap_or(defaults.snapshots),
        }
    }

    /// Apply CLI argument overrides to configuration
    fn apply_cli_overrides(config: &mut Self, args: CliArgs) {
        if let Some(value) = args.security_name {
            config.security_name = value;
        }
        if let Some(value) = args.teacher_name {
            config.teacher_name = value;
        }
        if let Some(value) = args.student_name {
            config.student_name = value;
        }
        if let Some(value) = args.course {
            config.course = value;
        }
        if let Some(value) = args.room {
            config.room = value;
        }
        if let Some(value) = args.door_relay_hold_ms {
            config.door_relay_hold_ms = value;
        }
        if let Some(value) = args.time_scale {
            config.time_scale = value;
        }
        if let Some(value) = args.scenario {
            config.scenario = value;
        }
        if let Some(value) = args.events_output {
            config.events_output = Some(value);
        }
        if let Some(value) = args.output_format {
            config.output_format = value;
        }

        // Boolean flags can only enable settings
        if args.real_time {
            config.real_time = true;
        }
        if args.snapshots {
            config.snapshots = true;
        }
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Print configuration as JSON
    pub fn print_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate the configuration parameters
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        // Validate display names and session fields
        self.validate_non_empty("security_name", &self.security_name)?;
        self.validate_non_empty("teacher_name", &self.teacher_name)?;
        self.validate_non_empty("student_name", &self.student_name)?;
        self.validate_non_empty("course", &self.course)?;
        self.validate_non_empty("room", &self.room)?;

        // Validate time scale
        if !self.time_scale.is_finite() || self.time_scale <= 0.0 {
            return Err(ConfigValidationError::InvalidTimeScale(self.time_scale));
        }

        // Validate door hold time
        if self.door_relay_hold_ms == 0 {
            return Err(ConfigValidationError::InvalidDoorRelayHold(self.door_relay_hold_ms));
        }

        // Validate scenario name
        if self.scenario.parse::<Scenario>().is_err() {
            return Err(ConfigValidationError::UnknownScenario(self.scenario.clone()));
        }

        // Validate output format
        if self.output_format.parse::<OutputFormat>().is_err() {
            return Err(ConfigValidationError::UnknownOutputFormat(self.output_format.clone()));
        }

        Ok(())
    }

    /// Helper method to validate required text fields
    fn validate_non_empty(&self, field: &str, value: &str) -> Result<(), ConfigValidationError> {
        if value.trim().is_empty() {
            return Err(ConfigValidationError::EmptyField { field: field.to_string() });
        }
        Ok(())
    }

    /// Get the configured display name for an identity
    pub fn display_name(&self, identity: Identity) -> &str {
        match identity {
            Identity::Security => &self.security_name,
            Identity::Teacher => &self.teacher_name,
            Identity::Student => &self.student_name,
        }
    }

    /// Get the door hold time as a duration
    pub fn door_relay_hold(&self) -> Duration {
        Duration::milliseconds(self.door_relay_hold_ms as i64)
    }

    /// Get the scenario as an enum value
    pub fn get_scenario(&self) -> Result<Scenario, String> {
        self.scenario.parse::<Scenario>()
    }

    /// Get the output format as an enum value
    pub fn get_output_format(&self) -> Result<OutputFormat, String> {
        self.output_format.parse::<OutputFormat>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_cli_args() -> CliArgs {
        CliArgs {
            config: None,
            scenario: None,
            time_scale: None,
            door_relay_hold_ms: None,
            security_name: None,
            teacher_name: None,
            student_name: None,
            course: None,
            room: None,
            events_output: None,
            output_format: None,
            real_time: false,
            snapshots: false,
            verbose: false,
            debug: false,
            quiet: false,
            dry_run: false,
            print_config: false,
        }
    }

    #[test]
    fn test_flow_config_default() {
        let config = FlowConfig::default();

        assert_eq!(config.security_name, "Agent Smith");
        assert_eq!(config.teacher_name, "AHMED");
        assert_eq!(config.student_name, "MOHAMMED");
        assert_eq!(config.course, "Biology 101");
        assert_eq!(config.room, "Room 301");
        assert_eq!(config.door_relay_hold_ms, 3000);
        assert_eq!(config.time_scale, 1.0);
        assert_eq!(config.scenario, "teacher-then-student");
        assert!(!config.real_time);
        assert!(config.events_output.is_none());
        assert_eq!(config.output_format, "json");
        assert!(!config.snapshots);
    }

    #[test]
    fn test_cli_parsing() {
        // Test parsing with a scenario flag
        let args = vec!["test", "--scenario", "security-only"];
        let cli_args = CliArgs::try_parse_from(args).unwrap();
        assert_eq!(cli_args.scenario, Some("security-only".to_string()));

        // Test parsing timing flags
        let args = vec!["test", "--time-scale", "2.5", "--door-relay-hold-ms", "1000"];
        let cli_args = CliArgs::try_parse_from(args).unwrap();
        assert_eq!(cli_args.time_scale, Some(2.5));
        assert_eq!(cli_args.door_relay_hold_ms, Some(1000));

        // Test defaults
        let args = vec!["test"];
        let cli_args = CliArgs::try_parse_from(args).unwrap();
        assert!(cli_args.scenario.is_none());
        assert!(cli_args.time_scale.is_none());
        assert!(!cli_args.real_time);
        assert!(!cli_args.snapshots);
    }

    #[test]
    fn test_cli_flag_parsing() {
        let args = vec!["test", "--real-time", "--snapshots", "--dry-run"];
        let cli_args = CliArgs::try_parse_from(args).unwrap();
        assert!(cli_args.real_time);
        assert!(cli_args.snapshots);
        assert!(cli_args.dry_run);
        assert!(!cli_args.print_config);
    }

    #[test]
    fn test_cli_overrides() {
        let args = CliArgs {
            scenario: Some("full-demo".to_string()),
            time_scale: Some(0.5),
            teacher_name: Some("FATIMA".to_string()),
            events_output: Some("transcript.json".to_string()),
            real_time: true,
            ..default_cli_args()
        };

        let config = FlowConfig::from_cli_args(args).unwrap();

        assert_eq!(config.scenario, "full-demo");
        assert_eq!(config.time_scale, 0.5);
        assert_eq!(config.teacher_name, "FATIMA");
        assert_eq!(config.events_output, Some("transcript.json".to_string()));
        assert!(config.real_time);
        // Default values should remain for non-overridden fields
        assert_eq!(config.security_name, "Agent Smith");
        assert_eq!(config.student_name, "MOHAMMED");
        assert_eq!(config.door_relay_hold_ms, 3000);
    }

    #[test]
    fn test_config_file_loading() {
        use std::io::Write;
        use tempfile::Builder;

        // Create a temporary config file with .json extension
        let mut temp_file = Builder::new().suffix(".json").tempfile().unwrap();
        let config_json = r#"{
            "teacher_name": "FATIMA",
            "student_name": "SARA",
            "course": "Chemistry 202",
            "door_relay_hold_ms": 1500,
            "scenario": "teacher-only",
            "output_format": "csv"
        }"#;

        temp_file.write_all(config_json.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        // Load configuration from file
        let config = FlowConfig::from_file(temp_file.path()).unwrap();

        assert_eq!(config.teacher_name, "FATIMA");
        assert_eq!(config.student_name, "SARA");
        assert_eq!(config.course, "Chemistry 202");
        assert_eq!(config.door_relay_hold_ms, 1500);
        assert_eq!(config.scenario, "teacher-only");
        assert_eq!(config.output_format, "csv");
        // Unspecified fields fall back to defaults
        assert_eq!(config.security_name, "Agent Smith");
        assert_eq!(config.room, "Room 301");
        assert_eq!(config.time_scale, 1.0);
    }

    #[test]
    fn test_config_file_not_found() {
        match FlowConfig::from_file("does-not-exist.json") {
            Err(ConfigError::FileNotFound(path)) => assert!(path.contains("does-not-exist")),
            _ => panic!("Expected FileNotFound error"),
        }
    }

    #[test]
    fn test_config_file_toml_not_supported() {
        use std::io::Write;
        use tempfile::Builder;

        let mut temp_file = Builder::new().suffix(".toml").tempfile().unwrap();
        temp_file.write_all(b"teacher_name = \"FATIMA\"").unwrap();
        temp_file.flush().unwrap();

        match FlowConfig::from_file(temp_file.path()) {
            Err(ConfigError::TomlError(_)) => {}
            _ => panic!("Expected TomlError"),
        }
    }

    #[test]
    fn test_config_file_unsupported_extension() {
        use std::io::Write;
        use tempfile::Builder;

        let mut temp_file = Builder::new().suffix(".yaml").tempfile().unwrap();
        temp_file.write_all(b"teacher_name: FATIMA").unwrap();
        temp_file.flush().unwrap();

        match FlowConfig::from_file(temp_file.path()) {
            Err(ConfigError::UnsupportedFormat(ext)) => assert_eq!(ext, "yaml"),
            _ => panic!("Expected UnsupportedFormat error"),
        }
    }

    #[test]
    fn test_flow_config_validation_success() {
        let config = FlowConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_flow_config_validation_empty_name() {
        let mut config = FlowConfig::default();
        config.teacher_name = "  ".to_string();

        match config.validate() {
            Err(ConfigValidationError::EmptyField { field }) => {
                assert_eq!(field, "teacher_name");
            }
            _ => panic!("Expected EmptyField error"),
        }
    }

    #[test]
    fn test_flow_config_validation_time_scale() {
        let mut config = FlowConfig::default();
        config.time_scale = 0.0;

        match config.validate() {
            Err(ConfigValidationError::InvalidTimeScale(value)) => assert_eq!(value, 0.0),
            _ => panic!("Expected InvalidTimeScale error"),
        }

        config.time_scale = -1.5;
        assert!(config.validate().is_err());

        config.time_scale = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_flow_config_validation_door_hold() {
        let mut config = FlowConfig::default();
        config.door_relay_hold_ms = 0;

        match config.validate() {
            Err(ConfigValidationError::InvalidDoorRelayHold(0)) => {}
            _ => panic!("Expected InvalidDoorRelayHold error"),
        }
    }

    #[test]
    fn test_flow_config_validation_scenario() {
        let mut config = FlowConfig::default();
        config.scenario = "chaos-mode".to_string();

        match config.validate() {
            Err(ConfigValidationError::UnknownScenario(name)) => assert_eq!(name, "chaos-mode"),
            _ => panic!("Expected UnknownScenario error"),
        }
    }

    #[test]
    fn test_flow_config_validation_output_format() {
        let mut config = FlowConfig::default();
        config.output_format = "xml".to_string();

        match config.validate() {
            Err(ConfigValidationError::UnknownOutputFormat(format)) => assert_eq!(format, "xml"),
            _ => panic!("Expected UnknownOutputFormat error"),
        }
    }

    #[test]
    fn test_flow_config_helper_methods() {
        let config = FlowConfig::default();

        assert_eq!(config.display_name(Identity::Security), "Agent Smith");
        assert_eq!(config.display_name(Identity::Teacher), "AHMED");
        assert_eq!(config.display_name(Identity::Student), "MOHAMMED");
        assert_eq!(config.door_relay_hold(), Duration::milliseconds(3000));
        assert_eq!(config.get_scenario().unwrap(), Scenario::TeacherThenStudent);
        assert!(matches!(config.get_output_format().unwrap(), OutputFormat::Json));
    }

    #[test]
    fn test_output_format_parsing() {
        let mut config = FlowConfig::default();

        config.output_format = "json".to_string();
        assert!(matches!(config.get_output_format().unwrap(), OutputFormat::Json));

        config.output_format = "csv".to_string();
        assert!(matches!(config.get_output_format().unwrap(), OutputFormat::Csv));

        config.output_format = "invalid".to_string();
        assert!(config.get_output_format().is_err());
    }

    #[test]
    fn test_scenario_parsing() {
        let mut config = FlowConfig::default();

        config.scenario = "security-only".to_string();
        assert_eq!(config.get_scenario().unwrap(), Scenario::SecurityOnly);

        config.scenario = "student-denied".to_string();
        assert_eq!(config.get_scenario().unwrap(), Scenario::StudentDenied);

        config.scenario = "invalid".to_string();
        assert!(config.get_scenario().is_err());
    }

    #[test]
    fn test_flow_config_serialization() {
        let config = FlowConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: FlowConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(config.teacher_name, deserialized.teacher_name);
        assert_eq!(config.door_relay_hold_ms, deserialized.door_relay_hold_ms);
        assert_eq!(config.scenario, deserialized.scenario);
        assert_eq!(config.output_format, deserialized.output_format);
    }
}
