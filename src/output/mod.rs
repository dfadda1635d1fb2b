//! Output formatting and writing functionality

pub mod formatters;
mod writers;

pub use self::formatters::report_diagnostics;
pub use self::writers::{create_writer, FileWriter, OutputWriter, StdoutWriter};

use crate::error::Result;
use crate::models::config::OutputFormat;
use crate::models::output::ChunkSpec;

/// Trait for different output formatters
pub trait Formatter {
    /// Format a chunk specification into a string
    fn format(&self, spec: &ChunkSpec) -> Result<String>;
}

/// JSON formatter producing the optimizer-facing result object
pub struct JsonFormatter {
    pub legacy_sources_key: bool,
}

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new(legacy_sources_key: bool) -> Self {
        Self { legacy_sources_key }
    }
}

impl Formatter for JsonFormatter {
    fn format(&self, spec: &ChunkSpec) -> Result<String> {
        formatters::format_spec_json(spec, self.legacy_sources_key)
    }
}

/// Text formatter for human inspection
pub struct TextFormatter {
    pub use_colors: bool,
}

impl TextFormatter {
    /// Create a new text formatter
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }
}

impl Formatter for TextFormatter {
    fn format(&self, spec: &ChunkSpec) -> Result<String> {
        Ok(formatters::format_spec_text(spec, self.use_colors))
    }
}

/// Create a formatter based on the output format
pub fn create_formatter(
    format: OutputFormat,
    legacy_sources_key: bool,
    use_colors: bool,
) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Json => Box::new(JsonFormatter::new(legacy_sources_key)),
        OutputFormat::Text => Box::new(TextFormatter::new(use_colors)),
    }
}
