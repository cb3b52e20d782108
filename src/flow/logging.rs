//! Logging and tracing configuration
//!
//! This module provides centralized logging configuration for the flow
//! simulator. Diagnostics go to stderr so transcript output on stdout
//! stays clean.

use std::io;
use std::path::PathBuf;

use tracing::{debug, Level};
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level used when no environment filter applies
    pub level: Level,
    /// Whether console output uses JSON formatting
    pub json_format: bool,
    /// Directory for daily-rolled JSON log files, if file logging is enabled
    pub file_directory: Option<PathBuf>,
    /// Log file prefix for file logging
    pub file_prefix: String,
    /// Whether to enable ANSI colors in console output
    pub enable_ansi: bool,
    /// Custom environment filter overriding the level
    pub env_filter: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::WARN,
            json_format: false,
            file_directory: None,
            file_prefix: "palm-access-simulator".to_string(),
            enable_ansi: true,
            env_filter: None,
        }
    }
}

impl LoggingConfig {
    /// Create a new logging configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the log level
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Enable JSON formatting on the console
    pub fn with_json_format(mut self) -> Self {
        self.json_format = true;
        self
    }

    /// Enable file logging into the given directory
    pub fn with_file_logging(mut self, directory: impl Into<PathBuf>) -> Self {
        self.file_directory = Some(directory.into());
        self
    }

    /// Set the log file prefix
    pub fn with_file_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.file_prefix = prefix.into();
        self
    }

    /// Disable ANSI colors
    pub fn without_ansi(mut self) -> Self {
        self.enable_ansi = false;
        self
    }

    /// Set a custom environment filter
    pub fn with_env_filter(mut self, filter: impl Into<String>) -> Self {
        self.env_filter = Some(filter.into());
        self
    }

    /// Initialize the global tracing subscriber
    pub fn init(self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let env_filter = if let Some(filter) = &self.env_filter {
            EnvFilter::try_new(filter)?
        } else {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                EnvFilter::new(format!(
                    "{}={}",
                    env!("CARGO_PKG_NAME").replace('-', "_"),
                    self.level
                ))
            })
        };

        let registry = Registry::default().with(env_filter);

        let console_layer = if self.json_format {
            fmt::layer().json().with_writer(io::stderr).boxed()
        } else {
            fmt::layer().pretty().with_writer(io::stderr).with_ansi(self.enable_ansi).boxed()
        };

        match &self.file_directory {
            Some(directory) => {
                let file_appender = rolling::daily(directory, &self.file_prefix);
                let (file_writer, guard) = non_blocking(file_appender);
                let file_layer = fmt::layer().json().with_writer(file_writer);

                registry.with(console_layer).with(file_layer).init();

                // The writer guard must live as long as the subscriber
                std::mem::forget(guard);
            }
            None => registry.with(console_layer).init(),
        }

        debug!("Logging initialized");
        Ok(())
    }

    /// Initialize quiet logging (errors only)
    pub fn init_quiet() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        Self::new().with_level(Level::ERROR).init()
    }

    /// Initialize verbose logging (INFO level)
    pub fn init_verbose() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        Self::new().with_level(Level::INFO).init()
    }

    /// Initialize debug logging (DEBUG level)
    pub fn init_debug() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        Self::new().with_level(Level::DEBUG).init()
    }

    /// Initialize logging for headless environments (JSON file output, no colors)
    pub fn init_to_file(
        directory: impl Into<PathBuf>,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        Self::new()
            .with_level(Level::INFO)
            .with_json_format()
            .with_file_logging(directory)
            .without_ansi()
            .init()
    }
}
