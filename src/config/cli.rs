//! Command-line argument configuration source

use std::path::PathBuf;

use super::ConfigSource;
use crate::cli::args::{Args, NameStyle as CliNameStyle, OutputFormat as CliOutputFormat};
use crate::error::{ChunkerError, Result};
use crate::models::config::{ExtraDep, ManualEntrySpec, NameStyle, OutputFormat, PartialSettings};

/// Command-line argument configuration source
#[derive(Debug)]
pub struct CliConfig {
    args: Args,
    name: String,
    priority: u8,
}

impl CliConfig {
    /// Create a CLI configuration source from parsed arguments
    pub fn from_args(args: &Args) -> Self {
        Self {
            args: args.clone(),
            name: "command-line arguments".to_string(),
            priority: 30, // Highest priority
        }
    }

    /// Get the config file path if specified
    pub fn config_path(&self) -> Option<&PathBuf> {
        self.args.config.as_ref()
    }
}

impl ConfigSource for CliConfig {
    fn load(&self) -> Result<PartialSettings> {
        let mut settings = PartialSettings::default();

        if !self.args.entrypoints.is_empty() {
            settings.entrypoints = Some(self.args.entrypoints.clone());
        }

        if !self.args.manual_entrypoints.is_empty() {
            let parsed: Result<Vec<ManualEntrySpec>> = self
                .args
                .manual_entrypoints
                .iter()
                .map(|raw| parse_manual_entrypoint(raw))
                .collect();
            settings.manual_entrypoints = Some(parsed?);
        }

        if let Some(base_directory) = &self.args.base_directory {
            settings.base_directory = Some(base_directory.clone());
        }

        if let Some(goog_base_path) = &self.args.goog_base_path {
            settings.goog_base_path = Some(goog_base_path.clone());
        }

        if !self.args.deps_files.is_empty() {
            settings.deps_files = Some(self.args.deps_files.clone());
        }

        if !self.args.extra_deps.is_empty() {
            let parsed: Result<Vec<ExtraDep>> =
                self.args.extra_deps.iter().map(|raw| parse_extra_dep(raw)).collect();
            settings.extra_deps = Some(parsed?);
        }

        if let Some(entry_names) = &self.args.package_json_entry_names {
            settings.package_json_entry_names = Some(entry_names.clone());
        }

        if let Some(name_style) = self.args.name_style {
            settings.name_style = Some(match name_style {
                CliNameStyle::Entrypoint => NameStyle::Entrypoint,
                CliNameStyle::Numbered => NameStyle::Numbered,
            });
        }

        if let Some(chunk_prefix) = &self.args.chunk_prefix {
            settings.chunk_prefix = Some(chunk_prefix.clone());
        }

        if self.args.legacy_sources_key {
            settings.legacy_sources_key = Some(true);
        }

        settings.output_format = Some(match self.args.output {
            CliOutputFormat::Json => OutputFormat::Json,
            CliOutputFormat::Text => OutputFormat::Text,
        });

        if let Some(output_file) = &self.args.output_file {
            settings.output_file = Some(output_file.clone());
        }

        if self.args.quiet {
            settings.quiet = Some(true);
        }

        if self.args.verbose {
            settings.verbose = Some(true);
        }

        if self.args.no_colors {
            settings.use_colors = Some(false);
        }

        Ok(settings)
    }

    fn is_available(&self) -> bool {
        true
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn priority(&self) -> u8 {
        self.priority
    }
}

/// Parse a `parent:child` manual entry point pair
fn parse_manual_entrypoint(raw: &str) -> Result<ManualEntrySpec> {
    match raw.split_once(':') {
        Some((parent, child)) if !parent.is_empty() && !child.is_empty() => Ok(ManualEntrySpec {
            parent: PathBuf::from(parent),
            name: PathBuf::from(child),
        }),
        _ => Err(ChunkerError::config_error(format!(
            "invalid manual entry point '{}'; expected PARENT:CHILD",
            raw
        ))),
    }
}

/// Parse a `namespace=path` extra dependency pair
fn parse_extra_dep(raw: &str) -> Result<ExtraDep> {
    match raw.split_once('=') {
        Some((namespace, path)) if !namespace.is_empty() && !path.is_empty() => Ok(ExtraDep {
            namespace: namespace.to_string(),
            path: PathBuf::from(path),
        }),
        _ => Err(ChunkerError::config_error(format!(
            "invalid extra-deps pair '{}'; expected NAMESPACE=PATH",
            raw
        ))),
    }
}
