//! Configuration settings validation

use crate::error::{ChunkerError, Result};
use crate::models::config::Settings;
use std::path::Path;

/// Settings validator for ensuring configuration is valid
pub struct SettingsValidator;

impl SettingsValidator {
    /// Validate settings and return errors if invalid
    pub fn validate(settings: &Settings) -> Result<()> {
        if settings.entrypoints.is_empty() {
            return Err(ChunkerError::config_error(
                "at least one entry point is required (use --entrypoint)",
            ));
        }

        for entry in &settings.entrypoints {
            if !entry.is_file() {
                return Err(ChunkerError::InvalidPath {
                    path: entry.clone(),
                    #[cfg(not(tarpaulin_include))]
                    backtrace: std::backtrace::Backtrace::capture(),
                });
            }
        }

        if !settings.base_directory.is_dir() {
            return Err(ChunkerError::InvalidPath {
                path: settings.base_directory.clone(),
                #[cfg(not(tarpaulin_include))]
                backtrace: std::backtrace::Backtrace::capture(),
            });
        }

        if let Some(goog_base) = &settings.goog_base_path {
            if !goog_base.is_file() {
                return Err(ChunkerError::InvalidPath {
                    path: goog_base.clone(),
                    #[cfg(not(tarpaulin_include))]
                    backtrace: std::backtrace::Backtrace::capture(),
                });
            }
        }

        for deps_file in &settings.deps_files {
            if !deps_file.is_file() {
                return Err(ChunkerError::InvalidPath {
                    path: deps_file.clone(),
                    #[cfg(not(tarpaulin_include))]
                    backtrace: std::backtrace::Backtrace::capture(),
                });
            }
        }

        if settings.package_json_entry_names.is_empty() {
            return Err(ChunkerError::config_error(
                "package_json_entry_names must name at least one field",
            ));
        }

        // Validate output file path is writable if specified
        if let Some(path) = &settings.output_file {
            Self::validate_output_path(path)?;
        }

        Ok(())
    }

    /// Validate that an output path's parent directory exists
    fn validate_output_path(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                return Err(ChunkerError::InvalidPath {
                    path: parent.to_path_buf(),
                    #[cfg(not(tarpaulin_include))]
                    backtrace: std::backtrace::Backtrace::capture(),
                });
            }
        }

        Ok(())
    }
}
