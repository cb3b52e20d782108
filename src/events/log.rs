//! Event transcript accumulation and export
//!
//! This module collects every transcript line the flow emits, in emission
//! order, and renders the transcript as JSON or CSV for export.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::events::FlowEvent;
use crate::flow::FlowResult;
use crate::types::{EventCategory, OutputFormat};

/// Ordered transcript of everything the pipeline announced
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventLog {
    events: Vec<FlowEvent>,
}

impl EventLog {
    /// Create an empty event log
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Append an event to the transcript
    pub fn record(&mut self, event: FlowEvent) {
        debug!("Event recorded: [{}] {}", event.category, event.message);
        self.events.push(event);
    }

    /// All recorded events in emission order
    pub fn events(&self) -> &[FlowEvent] {
        &self.events
    }

    /// Number of recorded events
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Check whether the transcript is empty
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// All event messages in emission order
    pub fn messages(&self) -> Vec<&str> {
        self.events.iter().map(|event| event.message.as_str()).collect()
    }

    /// Events produced by a single pipeline stage, in emission order
    pub fn events_in_category(&self, category: EventCategory) -> Vec<&FlowEvent> {
        self.events.iter().filter(|event| event.category == category).collect()
    }

    /// Number of events produced by a single pipeline stage
    pub fn category_count(&self, category: EventCategory) -> usize {
        self.events.iter().filter(|event| event.category == category).count()
    }

    /// Position of the first event carrying the given message, if any
    pub fn position_of(&self, message: &str) -> Option<usize> {
        self.events.iter().position(|event| event.message == message)
    }

    /// Render the transcript as pretty-printed JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.events)
    }

    /// Render the transcript as CSV with a header row
    pub fn to_csv(&self) -> String {
        let mut output = String::from("timestamp,category,message\n");
        for event in &self.events {
            output.push_str(&format!(
                "{},{},{}\n",
                event.timestamp.to_rfc3339(),
                event.category,
                escape_csv_field(&event.message),
            ));
        }
        output
    }

    /// Write the transcript to a file in the requested format
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P, format: OutputFormat) -> FlowResult<()> {
        let content = match format {
            OutputFormat::Json => self.to_json()?,
            OutputFormat::Csv => self.to_csv(),
        };
        fs::write(path, content)?;
        Ok(())
    }
}

/// Quote a CSV field when it contains a delimiter, quote, or newline
fn escape_csv_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
