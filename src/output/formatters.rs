//! Output formatting functionality
//!
//! This module provides the JSON result object consumed by the optimizer
//! driver and a human-readable chunk table.

use crate::error::{ErrorSeverity, Result};
use crate::models::output::{ChunkSpec, Diagnostic};
use ansi_term::Colour::{Blue, Green, Red, Yellow};
use ansi_term::Style;
use serde_json::{json, Value};

/// Render the result object: `{"chunk": [...], "js"|"sources": [...]}`
pub fn format_spec_json(spec: &ChunkSpec, legacy_sources_key: bool) -> Result<String> {
    let sources: Vec<Value> = spec
        .sources
        .iter()
        .map(|path| Value::String(path.display().to_string()))
        .collect();

    let sources_key = if legacy_sources_key { "sources" } else { "js" };
    let mut output = serde_json::Map::new();
    output.insert("chunk".to_string(), json!(spec.chunk_flags));
    output.insert(sources_key.to_string(), Value::Array(sources));
    let output = Value::Object(output);

    let mut rendered = serde_json::to_string_pretty(&output)?;
    rendered.push('\n');
    Ok(rendered)
}

/// Render a human-readable chunk table
pub fn format_spec_text(spec: &ChunkSpec, use_colors: bool) -> String {
    let mut output = String::new();

    output.push_str(&format!("{} chunk(s):\n\n", spec.chunks.len()));

    for chunk in &spec.chunks {
        let name = if use_colors {
            Blue.bold().paint(&chunk.name).to_string()
        } else {
            chunk.name.clone()
        };
        output.push_str(&format!("{}\n", name));
        output.push_str(&format!("  Entry: {}\n", chunk.entry.display()));
        output.push_str(&format!("  Sources: {}\n", chunk.source_count));
        if chunk.parents.is_empty() {
            output.push_str("  Parents: (primary entry)\n");
        } else {
            output.push_str(&format!("  Parents: {}\n", chunk.parents.join(", ")));
        }
        output.push('\n');
    }

    output.push_str(&format!("{} source file(s) in load order\n", spec.sources.len()));
    output
}

/// Print diagnostics to stderr with severity coloring
pub fn report_diagnostics(diagnostics: &[Diagnostic], use_colors: bool) {
    for diagnostic in diagnostics {
        let label = match diagnostic.severity {
            ErrorSeverity::Warning => {
                if use_colors {
                    Yellow.paint("warning").to_string()
                } else {
                    "warning".to_string()
                }
            }
            ErrorSeverity::Error => {
                if use_colors {
                    Red.paint("error").to_string()
                } else {
                    "error".to_string()
                }
            }
            ErrorSeverity::Critical => {
                if use_colors {
                    Red.bold().paint("critical").to_string()
                } else {
                    "critical".to_string()
                }
            }
        };
        eprintln!("{}: {}", label, diagnostic.message);
    }
}

/// Render a short success summary line
pub fn format_summary(spec: &ChunkSpec, use_colors: bool) -> String {
    let chunks = spec.chunks.len().to_string();
    let sources = spec.sources.len().to_string();
    if use_colors {
        format!(
            "Calculated {} chunk(s) covering {} source file(s)\n",
            Green.paint(chunks),
            Style::new().bold().paint(sources)
        )
    } else {
        format!("Calculated {} chunk(s) covering {} source file(s)\n", chunks, sources)
    }
}
